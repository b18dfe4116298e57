//! Module and function pass managers

use std::sync::Arc;

use pf_engine::handles::{FunctionPassManagerOpaque, ModulePassManagerOpaque};
use pf_engine::{FunctionPassManagerRef, ModulePassManagerRef, PassEngine};

use crate::builder::PassBuilder;
use crate::error::{PassError, Result};
use crate::handle::OwnedHandle;
use crate::values::{Function, Module};

/// Threshold value the engine treats as "use the pass default".
const UNSPECIFIED_THRESHOLD: i32 = -1;

/// Pass manager operating on whole modules.
///
/// Passes may be added in any order; the engine decides legality and
/// scheduling. `run` is synchronous and leaves the manager reusable.
pub struct ModulePassManager {
    engine: Arc<dyn PassEngine>,
    handle: OwnedHandle<ModulePassManagerOpaque>,
}

impl ModulePassManager {
    /// Create an empty module pass manager.
    pub fn new(engine: Arc<dyn PassEngine>) -> Result<Self> {
        let raw = engine.create_module_pass_manager();
        Self::from_raw(engine, raw)
    }

    /// Adopt a handle returned by pipeline construction.
    pub(crate) fn from_raw(engine: Arc<dyn PassEngine>, raw: ModulePassManagerRef) -> Result<Self> {
        let handle = OwnedHandle::adopt(raw, "module pass manager")?;
        Ok(Self { engine, handle })
    }

    /// Run the accumulated pipeline on a module.
    ///
    /// The pass builder only provides analysis management to the
    /// engine; it is not mutated.
    pub fn run(&self, module: &Module, builder: &PassBuilder<'_>) -> Result<()> {
        let pm = self.handle.get()?;
        let pb = builder.raw()?;
        tracing::trace!(target: "passforge", "running module pass manager");
        self.engine.run_module(pm, pb, module.raw());
        Ok(())
    }

    pub fn add_verifier_pass(&self) -> Result<()> {
        self.engine.add_verifier_pass(self.handle.get()?);
        Ok(())
    }

    pub fn add_aa_eval_pass(&self) -> Result<()> {
        self.engine.add_aa_eval_pass_module(self.handle.get()?);
        Ok(())
    }

    pub fn add_simplify_cfg_pass(&self) -> Result<()> {
        self.engine.add_simplify_cfg_pass_module(self.handle.get()?);
        Ok(())
    }

    pub fn add_loop_unroll_pass(&self) -> Result<()> {
        self.engine.add_loop_unroll_pass_module(self.handle.get()?);
        Ok(())
    }

    pub fn add_loop_rotate_pass(&self) -> Result<()> {
        self.engine.add_loop_rotate_pass_module(self.handle.get()?);
        Ok(())
    }

    pub fn add_instruction_combine_pass(&self) -> Result<()> {
        self.engine
            .add_instruction_combine_pass_module(self.handle.get()?);
        Ok(())
    }

    /// Add a jump-threading pass. `None` leaves the duplication
    /// threshold to the engine default.
    pub fn add_jump_threading_pass(&self, threshold: Option<i32>) -> Result<()> {
        self.engine.add_jump_threading_pass_module(
            self.handle.get()?,
            threshold.unwrap_or(UNSPECIFIED_THRESHOLD),
        );
        Ok(())
    }

    /// Release the native pass manager. Further use is an error.
    pub fn dispose(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(raw) => {
                self.engine.dispose_module_pass_manager(raw);
                Ok(())
            }
            None => Err(PassError::UseAfterDispose(self.handle.what())),
        }
    }
}

impl Drop for ModulePassManager {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            self.engine.dispose_module_pass_manager(raw);
        }
    }
}

/// Pass manager operating on single functions.
pub struct FunctionPassManager {
    engine: Arc<dyn PassEngine>,
    handle: OwnedHandle<FunctionPassManagerOpaque>,
}

impl FunctionPassManager {
    /// Create an empty function pass manager.
    pub fn new(engine: Arc<dyn PassEngine>) -> Result<Self> {
        let raw = engine.create_function_pass_manager();
        Self::from_raw(engine, raw)
    }

    pub(crate) fn from_raw(
        engine: Arc<dyn PassEngine>,
        raw: FunctionPassManagerRef,
    ) -> Result<Self> {
        let handle = OwnedHandle::adopt(raw, "function pass manager")?;
        Ok(Self { engine, handle })
    }

    /// Run the accumulated pipeline on a function.
    pub fn run(&self, function: &Function, builder: &PassBuilder<'_>) -> Result<()> {
        let pm = self.handle.get()?;
        let pb = builder.raw()?;
        tracing::trace!(target: "passforge", "running function pass manager");
        self.engine.run_function(pm, pb, function.raw());
        Ok(())
    }

    pub fn add_aa_eval_pass(&self) -> Result<()> {
        self.engine.add_aa_eval_pass_function(self.handle.get()?);
        Ok(())
    }

    pub fn add_simplify_cfg_pass(&self) -> Result<()> {
        self.engine
            .add_simplify_cfg_pass_function(self.handle.get()?);
        Ok(())
    }

    pub fn add_loop_unroll_pass(&self) -> Result<()> {
        self.engine.add_loop_unroll_pass_function(self.handle.get()?);
        Ok(())
    }

    pub fn add_loop_rotate_pass(&self) -> Result<()> {
        self.engine.add_loop_rotate_pass_function(self.handle.get()?);
        Ok(())
    }

    pub fn add_instruction_combine_pass(&self) -> Result<()> {
        self.engine
            .add_instruction_combine_pass_function(self.handle.get()?);
        Ok(())
    }

    /// Add a jump-threading pass. `None` leaves the duplication
    /// threshold to the engine default.
    pub fn add_jump_threading_pass(&self, threshold: Option<i32>) -> Result<()> {
        self.engine.add_jump_threading_pass_function(
            self.handle.get()?,
            threshold.unwrap_or(UNSPECIFIED_THRESHOLD),
        );
        Ok(())
    }

    /// Release the native pass manager. Further use is an error.
    pub fn dispose(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(raw) => {
                self.engine.dispose_function_pass_manager(raw);
                Ok(())
            }
            None => Err(PassError::UseAfterDispose(self.handle.what())),
        }
    }
}

impl Drop for FunctionPassManager {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            self.engine.dispose_function_pass_manager(raw);
        }
    }
}
