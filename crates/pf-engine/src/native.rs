//! Real engine backed by the C++ shim

use libc::c_int;

use crate::engine::PassEngine;
use crate::handles::{
    FunctionPassManagerRef, FunctionRef, ModulePassManagerRef, ModuleRef, PassBuilderRef,
    TargetMachineRef, TuningOptionsRef,
};
use crate::sys;

/// Engine that forwards every call to the linked shim library.
///
/// All calls are synchronous and single-threaded on the native side;
/// serializing concurrent use of one handle is the caller's job.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeEngine;

impl NativeEngine {
    pub fn new() -> Self {
        Self
    }
}

impl PassEngine for NativeEngine {
    fn create_module_pass_manager(&self) -> ModulePassManagerRef {
        unsafe { sys::PFPM_CreateModulePassManager() }
    }

    fn dispose_module_pass_manager(&self, pm: ModulePassManagerRef) {
        unsafe { sys::PFPM_DisposeModulePassManager(pm) }
    }

    fn create_function_pass_manager(&self) -> FunctionPassManagerRef {
        unsafe { sys::PFPM_CreateFunctionPassManager() }
    }

    fn dispose_function_pass_manager(&self, pm: FunctionPassManagerRef) {
        unsafe { sys::PFPM_DisposeFunctionPassManager(pm) }
    }

    fn create_tuning_options(&self) -> TuningOptionsRef {
        unsafe { sys::PFPM_CreatePipelineTuningOptions() }
    }

    fn dispose_tuning_options(&self, pto: TuningOptionsRef) {
        unsafe { sys::PFPM_DisposePipelineTuningOptions(pto) }
    }

    fn create_pass_builder(&self, tm: TargetMachineRef, pto: TuningOptionsRef) -> PassBuilderRef {
        unsafe { sys::PFPM_CreatePassBuilder(tm, pto) }
    }

    fn dispose_pass_builder(&self, pb: PassBuilderRef) {
        unsafe { sys::PFPM_DisposePassBuilder(pb) }
    }

    fn build_module_pipeline(
        &self,
        pb: PassBuilderRef,
        opt_level: c_int,
    ) -> ModulePassManagerRef {
        unsafe { sys::PFPM_BuildPerModuleDefaultPipeline(pb, opt_level) }
    }

    fn build_function_pipeline(
        &self,
        pb: PassBuilderRef,
        opt_level: c_int,
    ) -> FunctionPassManagerRef {
        unsafe { sys::PFPM_BuildFunctionSimplificationPipeline(pb, opt_level) }
    }

    fn run_module(&self, pm: ModulePassManagerRef, pb: PassBuilderRef, module: ModuleRef) {
        unsafe { sys::PFPM_RunModule(pm, pb, module) }
    }

    fn run_function(&self, pm: FunctionPassManagerRef, pb: PassBuilderRef, function: FunctionRef) {
        unsafe { sys::PFPM_RunFunction(pm, pb, function) }
    }

    fn add_verifier_pass(&self, pm: ModulePassManagerRef) {
        unsafe { sys::PFPM_AddVerifierPass(pm) }
    }

    fn add_aa_eval_pass_module(&self, pm: ModulePassManagerRef) {
        unsafe { sys::PFPM_AddAAEvalPassModule(pm) }
    }

    fn add_simplify_cfg_pass_module(&self, pm: ModulePassManagerRef) {
        unsafe { sys::PFPM_AddSimplifyCFGPassModule(pm) }
    }

    fn add_loop_unroll_pass_module(&self, pm: ModulePassManagerRef) {
        unsafe { sys::PFPM_AddLoopUnrollPassModule(pm) }
    }

    fn add_loop_rotate_pass_module(&self, pm: ModulePassManagerRef) {
        unsafe { sys::PFPM_AddLoopRotatePassModule(pm) }
    }

    fn add_instruction_combine_pass_module(&self, pm: ModulePassManagerRef) {
        unsafe { sys::PFPM_AddInstructionCombinePassModule(pm) }
    }

    fn add_jump_threading_pass_module(&self, pm: ModulePassManagerRef, threshold: c_int) {
        unsafe { sys::PFPM_AddJumpThreadingPassModule(pm, threshold) }
    }

    fn add_aa_eval_pass_function(&self, pm: FunctionPassManagerRef) {
        unsafe { sys::PFPM_AddAAEvalPassFunction(pm) }
    }

    fn add_simplify_cfg_pass_function(&self, pm: FunctionPassManagerRef) {
        unsafe { sys::PFPM_AddSimplifyCFGPassFunction(pm) }
    }

    fn add_loop_unroll_pass_function(&self, pm: FunctionPassManagerRef) {
        unsafe { sys::PFPM_AddLoopUnrollPassFunction(pm) }
    }

    fn add_loop_rotate_pass_function(&self, pm: FunctionPassManagerRef) {
        unsafe { sys::PFPM_AddLoopRotatePassFunction(pm) }
    }

    fn add_instruction_combine_pass_function(&self, pm: FunctionPassManagerRef) {
        unsafe { sys::PFPM_AddInstructionCombinePassFunction(pm) }
    }

    fn add_jump_threading_pass_function(&self, pm: FunctionPassManagerRef, threshold: c_int) {
        unsafe { sys::PFPM_AddJumpThreadingPassFunction(pm, threshold) }
    }

    fn loop_interleaving(&self, pto: TuningOptionsRef) -> bool {
        unsafe { sys::PFPM_PTOGetLoopInterleaving(pto) }
    }

    fn set_loop_interleaving(&self, pto: TuningOptionsRef, value: bool) {
        unsafe { sys::PFPM_PTOSetLoopInterleaving(pto, value) }
    }

    fn loop_vectorization(&self, pto: TuningOptionsRef) -> bool {
        unsafe { sys::PFPM_PTOGetLoopVectorization(pto) }
    }

    fn set_loop_vectorization(&self, pto: TuningOptionsRef, value: bool) {
        unsafe { sys::PFPM_PTOSetLoopVectorization(pto, value) }
    }

    fn slp_vectorization(&self, pto: TuningOptionsRef) -> bool {
        unsafe { sys::PFPM_PTOGetSLPVectorization(pto) }
    }

    fn set_slp_vectorization(&self, pto: TuningOptionsRef, value: bool) {
        unsafe { sys::PFPM_PTOSetSLPVectorization(pto, value) }
    }

    fn loop_unrolling(&self, pto: TuningOptionsRef) -> bool {
        unsafe { sys::PFPM_PTOGetLoopUnrolling(pto) }
    }

    fn set_loop_unrolling(&self, pto: TuningOptionsRef, value: bool) {
        unsafe { sys::PFPM_PTOSetLoopUnrolling(pto, value) }
    }
}
