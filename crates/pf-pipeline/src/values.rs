//! Borrowed references to externally owned native objects
//!
//! Target machines and IR values are created and destroyed by other
//! parts of the toolchain. These wrappers only carry the handle across
//! calls; they never release it.

use pf_engine::{FunctionRef, ModuleRef, TargetMachineRef};

/// Borrowed target machine handle.
pub struct TargetMachine {
    raw: TargetMachineRef,
}

impl TargetMachine {
    /// Wrap an externally owned target machine handle.
    ///
    /// # Safety
    ///
    /// `raw` must be a valid handle that outlives this wrapper and
    /// every pass builder constructed from it.
    pub unsafe fn from_raw(raw: TargetMachineRef) -> Self {
        Self { raw }
    }

    pub(crate) fn raw(&self) -> TargetMachineRef {
        self.raw
    }
}

/// Borrowed IR module handle.
pub struct Module {
    raw: ModuleRef,
}

impl Module {
    /// Wrap an externally owned module handle.
    ///
    /// # Safety
    ///
    /// `raw` must be a valid handle for the duration of any run that
    /// receives this wrapper.
    pub unsafe fn from_raw(raw: ModuleRef) -> Self {
        Self { raw }
    }

    pub(crate) fn raw(&self) -> ModuleRef {
        self.raw
    }
}

/// Borrowed IR function handle.
pub struct Function {
    raw: FunctionRef,
}

impl Function {
    /// Wrap an externally owned function handle.
    ///
    /// # Safety
    ///
    /// `raw` must be a valid handle for the duration of any run that
    /// receives this wrapper.
    pub unsafe fn from_raw(raw: FunctionRef) -> Self {
        Self { raw }
    }

    pub(crate) fn raw(&self) -> FunctionRef {
        self.raw
    }
}
