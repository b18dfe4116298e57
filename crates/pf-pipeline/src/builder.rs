//! Pass builder

use std::marker::PhantomData;
use std::sync::Arc;

use pf_engine::handles::PassBuilderOpaque;
use pf_engine::{PassBuilderRef, PassEngine};

use crate::error::{PassError, Result};
use crate::handle::OwnedHandle;
use crate::manager::{FunctionPassManager, ModulePassManager};
use crate::options::PipelineTuningOptions;
use crate::values::TargetMachine;

/// Constructs default optimization pipelines for a target machine.
///
/// The builder borrows the target machine and the tuning options; it
/// owns only its own native handle. Pipeline construction reads the
/// optimization level stored on the options wrapper.
pub struct PassBuilder<'a> {
    engine: Arc<dyn PassEngine>,
    handle: OwnedHandle<PassBuilderOpaque>,
    options: &'a PipelineTuningOptions,
    _target: PhantomData<&'a TargetMachine>,
}

impl<'a> PassBuilder<'a> {
    pub fn new(
        engine: Arc<dyn PassEngine>,
        target: &'a TargetMachine,
        options: &'a PipelineTuningOptions,
    ) -> Result<Self> {
        let raw = engine.create_pass_builder(target.raw(), options.raw()?);
        let handle = OwnedHandle::adopt(raw, "pass builder")?;
        Ok(Self {
            engine,
            handle,
            options,
            _target: PhantomData,
        })
    }

    /// Build the default per-module optimization pipeline at the
    /// options' optimization level.
    pub fn build_module_pipeline(&self) -> Result<ModulePassManager> {
        let level = self.options.opt_level();
        let raw = self
            .engine
            .build_module_pipeline(self.handle.get()?, level as i32);
        tracing::debug!(target: "passforge", opt_level = level, "built module pipeline");
        ModulePassManager::from_raw(Arc::clone(&self.engine), raw)
    }

    /// Build the function-simplification pipeline at the options'
    /// optimization level.
    pub fn build_function_pipeline(&self) -> Result<FunctionPassManager> {
        let level = self.options.opt_level();
        let raw = self
            .engine
            .build_function_pipeline(self.handle.get()?, level as i32);
        tracing::debug!(target: "passforge", opt_level = level, "built function pipeline");
        FunctionPassManager::from_raw(Arc::clone(&self.engine), raw)
    }

    /// Release the builder's own handle. The borrowed target machine
    /// and options stay with their owners.
    pub fn dispose(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(raw) => {
                self.engine.dispose_pass_builder(raw);
                Ok(())
            }
            None => Err(PassError::UseAfterDispose(self.handle.what())),
        }
    }

    pub(crate) fn raw(&self) -> Result<PassBuilderRef> {
        self.handle.get()
    }
}

impl Drop for PassBuilder<'_> {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            self.engine.dispose_pass_builder(raw);
        }
    }
}
