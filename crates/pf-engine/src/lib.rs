//! Native engine boundary for passforge
//!
//! Everything that crosses into the native pass-manager shim goes
//! through the [`PassEngine`] trait defined here. The `native` feature
//! enables the real implementation backed by the C++ shim library;
//! [`NullEngine`] is an in-process stand-in that records every call,
//! used by the wrapper tests and for dry runs.

pub mod engine;
pub mod handles;
pub mod null;

#[cfg(feature = "native")]
pub mod native;
#[cfg(feature = "native")]
pub mod sys;

pub use engine::PassEngine;
pub use handles::{
    FunctionPassManagerRef, FunctionRef, ModulePassManagerRef, ModuleRef, PassBuilderRef,
    TargetMachineRef, TuningOptionsRef,
};
pub use null::NullEngine;

#[cfg(feature = "native")]
pub use native::NativeEngine;
