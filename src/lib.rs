//! Passforge - safe bindings to a native new-pass-manager engine
//!
//! The native engine owns every optimization pass and all pipeline
//! construction logic; this crate only marshals handles across the
//! boundary and guarantees each one is released exactly once.
//!
//! ```no_run
//! use std::sync::Arc;
//! use passforge::{PassBuilder, PipelineTuningOptions, TargetMachine};
//!
//! # fn target_machine() -> TargetMachine { unimplemented!() }
//! # fn main() -> passforge::Result<()> {
//! let engine: Arc<dyn passforge::PassEngine> = Arc::new(passforge::NullEngine::new());
//! let tm = target_machine();
//! let mut options = PipelineTuningOptions::new(engine.clone())?;
//! options.set_opt_level(2)?;
//! options.set_slp_vectorization(false)?;
//!
//! let builder = PassBuilder::new(engine, &tm, &options)?;
//! let pipeline = builder.build_module_pipeline()?;
//! pipeline.add_verifier_pass()?;
//! # Ok(())
//! # }
//! ```

pub mod logging;

pub use pf_engine::{NullEngine, PassEngine};
pub use pf_pipeline::{
    Function, FunctionPassManager, Module, ModulePassManager, PassBuilder, PassError,
    PipelineTuningOptions, Result, TargetMachine,
};

#[cfg(feature = "native")]
pub use pf_engine::NativeEngine;
