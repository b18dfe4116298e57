//! The native engine call table
//!
//! One trait method per native entry point, with the fixed signature
//! the shim exports. Implementations forward the arguments verbatim;
//! no validation or interpretation happens at this layer.

use libc::c_int;

use crate::handles::{
    FunctionPassManagerRef, FunctionRef, ModulePassManagerRef, ModuleRef, PassBuilderRef,
    TargetMachineRef, TuningOptionsRef,
};

/// Call table of the native pass-manager engine.
///
/// Create entry points return a null handle on failure; the wrapper
/// layer turns that into a construction error. Every other call either
/// succeeds silently or aborts inside the engine.
pub trait PassEngine: Send + Sync {
    // Lifecycle

    fn create_module_pass_manager(&self) -> ModulePassManagerRef;
    fn dispose_module_pass_manager(&self, pm: ModulePassManagerRef);

    fn create_function_pass_manager(&self) -> FunctionPassManagerRef;
    fn dispose_function_pass_manager(&self, pm: FunctionPassManagerRef);

    fn create_tuning_options(&self) -> TuningOptionsRef;
    fn dispose_tuning_options(&self, pto: TuningOptionsRef);

    fn create_pass_builder(&self, tm: TargetMachineRef, pto: TuningOptionsRef) -> PassBuilderRef;
    fn dispose_pass_builder(&self, pb: PassBuilderRef);

    // Pipeline construction

    /// Build the default per-module optimization pipeline.
    fn build_module_pipeline(&self, pb: PassBuilderRef, opt_level: c_int)
        -> ModulePassManagerRef;

    /// Build the function-simplification pipeline.
    fn build_function_pipeline(
        &self,
        pb: PassBuilderRef,
        opt_level: c_int,
    ) -> FunctionPassManagerRef;

    // Execution

    fn run_module(&self, pm: ModulePassManagerRef, pb: PassBuilderRef, module: ModuleRef);
    fn run_function(&self, pm: FunctionPassManagerRef, pb: PassBuilderRef, function: FunctionRef);

    // Per-pass registration, module granularity

    fn add_verifier_pass(&self, pm: ModulePassManagerRef);
    fn add_aa_eval_pass_module(&self, pm: ModulePassManagerRef);
    fn add_simplify_cfg_pass_module(&self, pm: ModulePassManagerRef);
    fn add_loop_unroll_pass_module(&self, pm: ModulePassManagerRef);
    fn add_loop_rotate_pass_module(&self, pm: ModulePassManagerRef);
    fn add_instruction_combine_pass_module(&self, pm: ModulePassManagerRef);
    fn add_jump_threading_pass_module(&self, pm: ModulePassManagerRef, threshold: c_int);

    // Per-pass registration, function granularity

    fn add_aa_eval_pass_function(&self, pm: FunctionPassManagerRef);
    fn add_simplify_cfg_pass_function(&self, pm: FunctionPassManagerRef);
    fn add_loop_unroll_pass_function(&self, pm: FunctionPassManagerRef);
    fn add_loop_rotate_pass_function(&self, pm: FunctionPassManagerRef);
    fn add_instruction_combine_pass_function(&self, pm: FunctionPassManagerRef);
    fn add_jump_threading_pass_function(&self, pm: FunctionPassManagerRef, threshold: c_int);

    // Tuning flag accessors

    fn loop_interleaving(&self, pto: TuningOptionsRef) -> bool;
    fn set_loop_interleaving(&self, pto: TuningOptionsRef, value: bool);

    fn loop_vectorization(&self, pto: TuningOptionsRef) -> bool;
    fn set_loop_vectorization(&self, pto: TuningOptionsRef, value: bool);

    fn slp_vectorization(&self, pto: TuningOptionsRef) -> bool;
    fn set_slp_vectorization(&self, pto: TuningOptionsRef, value: bool);

    fn loop_unrolling(&self, pto: TuningOptionsRef) -> bool;
    fn set_loop_unrolling(&self, pto: TuningOptionsRef, value: bool);
}
