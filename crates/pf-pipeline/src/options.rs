//! Pipeline tuning options

use std::sync::Arc;

use pf_engine::handles::TuningOptionsOpaque;
use pf_engine::{PassEngine, TuningOptionsRef};

use crate::error::{PassError, Result};
use crate::handle::OwnedHandle;

/// Highest supported optimization level.
pub const MAX_OPT_LEVEL: u32 = 3;

/// Tuning knobs consumed during pipeline construction.
///
/// The four boolean flags live on the native options object and each
/// accessor forwards directly. The optimization level is kept on the
/// wrapper only: the native options object never sees it, the pass
/// builder reads it when a pipeline is constructed.
pub struct PipelineTuningOptions {
    engine: Arc<dyn PassEngine>,
    handle: OwnedHandle<TuningOptionsOpaque>,
    opt_level: u32,
}

impl PipelineTuningOptions {
    /// Create a fresh options object with native defaults and
    /// optimization level 3.
    pub fn new(engine: Arc<dyn PassEngine>) -> Result<Self> {
        let raw = engine.create_tuning_options();
        let handle = OwnedHandle::adopt(raw, "pipeline tuning options")?;
        Ok(Self {
            engine,
            handle,
            opt_level: MAX_OPT_LEVEL,
        })
    }

    pub fn loop_interleaving(&self) -> Result<bool> {
        Ok(self.engine.loop_interleaving(self.handle.get()?))
    }

    pub fn set_loop_interleaving(&mut self, value: bool) -> Result<()> {
        self.engine.set_loop_interleaving(self.handle.get()?, value);
        Ok(())
    }

    pub fn loop_vectorization(&self) -> Result<bool> {
        Ok(self.engine.loop_vectorization(self.handle.get()?))
    }

    pub fn set_loop_vectorization(&mut self, value: bool) -> Result<()> {
        self.engine.set_loop_vectorization(self.handle.get()?, value);
        Ok(())
    }

    pub fn slp_vectorization(&self) -> Result<bool> {
        Ok(self.engine.slp_vectorization(self.handle.get()?))
    }

    pub fn set_slp_vectorization(&mut self, value: bool) -> Result<()> {
        self.engine.set_slp_vectorization(self.handle.get()?, value);
        Ok(())
    }

    pub fn loop_unrolling(&self) -> Result<bool> {
        Ok(self.engine.loop_unrolling(self.handle.get()?))
    }

    pub fn set_loop_unrolling(&mut self, value: bool) -> Result<()> {
        self.engine.set_loop_unrolling(self.handle.get()?, value);
        Ok(())
    }

    /// Optimization level the pass builder will use, between 0 and 3.
    pub fn opt_level(&self) -> u32 {
        self.opt_level
    }

    /// Set the optimization level. Values above 3 are rejected before
    /// anything reaches the native layer.
    pub fn set_opt_level(&mut self, level: u32) -> Result<()> {
        if level > MAX_OPT_LEVEL {
            return Err(PassError::InvalidOptLevel(level));
        }
        self.opt_level = level;
        Ok(())
    }

    /// Release the native options object. Further use is an error.
    pub fn dispose(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(raw) => {
                self.engine.dispose_tuning_options(raw);
                Ok(())
            }
            None => Err(PassError::UseAfterDispose(self.handle.what())),
        }
    }

    pub(crate) fn raw(&self) -> Result<TuningOptionsRef> {
        self.handle.get()
    }
}

impl Drop for PipelineTuningOptions {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            self.engine.dispose_tuning_options(raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_engine::NullEngine;

    fn options() -> PipelineTuningOptions {
        PipelineTuningOptions::new(Arc::new(NullEngine::new())).unwrap()
    }

    #[test]
    fn test_default_opt_level_is_three() {
        assert_eq!(options().opt_level(), 3);
    }

    #[test]
    fn test_opt_level_round_trips_in_range() {
        let mut pto = options();
        for level in 0..=MAX_OPT_LEVEL {
            pto.set_opt_level(level).unwrap();
            assert_eq!(pto.opt_level(), level);
        }
    }

    #[test]
    fn test_opt_level_out_of_range_rejected() {
        let mut pto = options();
        pto.set_opt_level(1).unwrap();
        for level in [4, 10, u32::MAX] {
            assert_eq!(
                pto.set_opt_level(level),
                Err(PassError::InvalidOptLevel(level))
            );
        }
        // rejected values must not stick
        assert_eq!(pto.opt_level(), 1);
    }

    #[test]
    fn test_flags_round_trip_all_combinations() {
        // Four independent flags, all 16 assignments.
        for bits in 0u8..16 {
            let mut pto = options();
            let interleave = bits & 1 != 0;
            let loop_vec = bits & 2 != 0;
            let slp_vec = bits & 4 != 0;
            let unroll = bits & 8 != 0;

            pto.set_loop_interleaving(interleave).unwrap();
            pto.set_loop_vectorization(loop_vec).unwrap();
            pto.set_slp_vectorization(slp_vec).unwrap();
            pto.set_loop_unrolling(unroll).unwrap();

            assert_eq!(pto.loop_interleaving().unwrap(), interleave);
            assert_eq!(pto.loop_vectorization().unwrap(), loop_vec);
            assert_eq!(pto.slp_vectorization().unwrap(), slp_vec);
            assert_eq!(pto.loop_unrolling().unwrap(), unroll);
        }
    }

    #[test]
    fn test_use_after_dispose_fails() {
        let mut pto = options();
        pto.dispose().unwrap();
        assert_eq!(
            pto.loop_unrolling(),
            Err(PassError::UseAfterDispose("pipeline tuning options"))
        );
        assert_eq!(
            pto.set_slp_vectorization(true),
            Err(PassError::UseAfterDispose("pipeline tuning options"))
        );
    }
}
