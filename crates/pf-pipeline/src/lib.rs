//! Safe wrappers over the native pass-manager engine
//!
//! Each wrapper owns exactly one native handle and releases it exactly
//! once, either through an explicit [`dispose`](ModulePassManager::dispose)
//! or on drop. Target machines and IR values are borrowed from their
//! native owner and never released here.

pub mod builder;
pub mod error;
pub mod manager;
pub mod options;
pub mod values;

mod handle;

pub use builder::PassBuilder;
pub use error::{PassError, Result};
pub use manager::{FunctionPassManager, ModulePassManager};
pub use options::PipelineTuningOptions;
pub use values::{Function, Module, TargetMachine};
