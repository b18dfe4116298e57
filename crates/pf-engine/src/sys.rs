//! Raw entry points of the C++ shim library
//!
//! Signatures are fixed at compile time; the shim (libpassforge_shim)
//! must export exactly these symbols.

use libc::c_int;

use crate::handles::{
    FunctionPassManagerRef, FunctionRef, ModulePassManagerRef, ModuleRef, PassBuilderRef,
    TargetMachineRef, TuningOptionsRef,
};

#[link(name = "passforge_shim")]
extern "C" {
    // Module pass manager
    pub fn PFPM_CreateModulePassManager() -> ModulePassManagerRef;
    pub fn PFPM_DisposeModulePassManager(pm: ModulePassManagerRef);
    pub fn PFPM_RunModule(pm: ModulePassManagerRef, pb: PassBuilderRef, module: ModuleRef);
    pub fn PFPM_AddVerifierPass(pm: ModulePassManagerRef);
    pub fn PFPM_AddAAEvalPassModule(pm: ModulePassManagerRef);
    pub fn PFPM_AddSimplifyCFGPassModule(pm: ModulePassManagerRef);
    pub fn PFPM_AddLoopUnrollPassModule(pm: ModulePassManagerRef);
    pub fn PFPM_AddLoopRotatePassModule(pm: ModulePassManagerRef);
    pub fn PFPM_AddInstructionCombinePassModule(pm: ModulePassManagerRef);
    pub fn PFPM_AddJumpThreadingPassModule(pm: ModulePassManagerRef, threshold: c_int);

    // Function pass manager
    pub fn PFPM_CreateFunctionPassManager() -> FunctionPassManagerRef;
    pub fn PFPM_DisposeFunctionPassManager(pm: FunctionPassManagerRef);
    pub fn PFPM_RunFunction(pm: FunctionPassManagerRef, pb: PassBuilderRef, function: FunctionRef);
    pub fn PFPM_AddAAEvalPassFunction(pm: FunctionPassManagerRef);
    pub fn PFPM_AddSimplifyCFGPassFunction(pm: FunctionPassManagerRef);
    pub fn PFPM_AddLoopUnrollPassFunction(pm: FunctionPassManagerRef);
    pub fn PFPM_AddLoopRotatePassFunction(pm: FunctionPassManagerRef);
    pub fn PFPM_AddInstructionCombinePassFunction(pm: FunctionPassManagerRef);
    pub fn PFPM_AddJumpThreadingPassFunction(pm: FunctionPassManagerRef, threshold: c_int);

    // Pass builder
    pub fn PFPM_CreatePassBuilder(tm: TargetMachineRef, pto: TuningOptionsRef) -> PassBuilderRef;
    pub fn PFPM_DisposePassBuilder(pb: PassBuilderRef);
    pub fn PFPM_BuildPerModuleDefaultPipeline(
        pb: PassBuilderRef,
        opt_level: c_int,
    ) -> ModulePassManagerRef;
    pub fn PFPM_BuildFunctionSimplificationPipeline(
        pb: PassBuilderRef,
        opt_level: c_int,
    ) -> FunctionPassManagerRef;

    // Pipeline tuning options
    pub fn PFPM_CreatePipelineTuningOptions() -> TuningOptionsRef;
    pub fn PFPM_DisposePipelineTuningOptions(pto: TuningOptionsRef);
    pub fn PFPM_PTOGetLoopInterleaving(pto: TuningOptionsRef) -> bool;
    pub fn PFPM_PTOSetLoopInterleaving(pto: TuningOptionsRef, value: bool);
    pub fn PFPM_PTOGetLoopVectorization(pto: TuningOptionsRef) -> bool;
    pub fn PFPM_PTOSetLoopVectorization(pto: TuningOptionsRef, value: bool);
    pub fn PFPM_PTOGetSLPVectorization(pto: TuningOptionsRef) -> bool;
    pub fn PFPM_PTOSetSLPVectorization(pto: TuningOptionsRef, value: bool);
    pub fn PFPM_PTOGetLoopUnrolling(pto: TuningOptionsRef) -> bool;
    pub fn PFPM_PTOSetLoopUnrolling(pto: TuningOptionsRef, value: bool);
}
