//! Opaque handle types for native pass-manager objects
//!
//! Each native object kind gets its own uninhabited payload type so the
//! raw pointers cannot be mixed up across entry points. The binding
//! never dereferences any of these; they are tokens passed back to the
//! engine by value.

/// Payload of a native module pass manager handle.
#[repr(C)]
pub struct ModulePassManagerOpaque {
    _private: [u8; 0],
}

/// Payload of a native function pass manager handle.
#[repr(C)]
pub struct FunctionPassManagerOpaque {
    _private: [u8; 0],
}

/// Payload of a native pass builder handle.
#[repr(C)]
pub struct PassBuilderOpaque {
    _private: [u8; 0],
}

/// Payload of a native pipeline tuning options handle.
#[repr(C)]
pub struct TuningOptionsOpaque {
    _private: [u8; 0],
}

/// Payload of a native target machine handle.
#[repr(C)]
pub struct TargetMachineOpaque {
    _private: [u8; 0],
}

/// Payload of a native IR module handle.
#[repr(C)]
pub struct ModuleOpaque {
    _private: [u8; 0],
}

/// Payload of a native IR function handle.
#[repr(C)]
pub struct FunctionOpaque {
    _private: [u8; 0],
}

pub type ModulePassManagerRef = *mut ModulePassManagerOpaque;
pub type FunctionPassManagerRef = *mut FunctionPassManagerOpaque;
pub type PassBuilderRef = *mut PassBuilderOpaque;
pub type TuningOptionsRef = *mut TuningOptionsOpaque;
pub type TargetMachineRef = *mut TargetMachineOpaque;
pub type ModuleRef = *mut ModuleOpaque;
pub type FunctionRef = *mut FunctionOpaque;
