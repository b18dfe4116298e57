//! Tests for pipeline construction, pass registration and runs

use std::sync::Arc;

use pf_engine::null::HandleKind;
use pf_engine::{FunctionRef, ModuleRef, NullEngine, TargetMachineRef};
use pf_pipeline::{
    Function, Module, ModulePassManager, PassBuilder, PipelineTuningOptions, TargetMachine,
};

fn target_machine() -> TargetMachine {
    unsafe { TargetMachine::from_raw(0x7000 as TargetMachineRef) }
}

#[test]
fn test_module_pipeline_built_at_stored_opt_level() {
    let engine = Arc::new(NullEngine::new());
    let tm = target_machine();
    let mut pto = PipelineTuningOptions::new(engine.clone()).unwrap();
    pto.set_opt_level(2).unwrap();

    let pb = PassBuilder::new(engine.clone(), &tm, &pto).unwrap();
    let _pipeline = pb.build_module_pipeline().unwrap();

    let builds = engine.builds();
    assert_eq!(builds.len(), 1);
    assert_eq!(builds[0].opt_level, 2);
    assert_eq!(builds[0].kind, HandleKind::ModulePassManager);
    assert_eq!(builds[0].builder, engine.created(HandleKind::PassBuilder)[0]);
}

#[test]
fn test_function_pipeline_does_not_disturb_module_pipeline() {
    let engine = Arc::new(NullEngine::new());
    let tm = target_machine();
    let pto = PipelineTuningOptions::new(engine.clone()).unwrap();
    let pb = PassBuilder::new(engine.clone(), &tm, &pto).unwrap();

    let module_pipeline = pb.build_module_pipeline().unwrap();
    let function_pipeline = pb.build_function_pipeline().unwrap();

    let builds = engine.builds();
    assert_eq!(builds.len(), 2);
    assert_ne!(builds[0].produced, builds[1].produced);
    assert!(engine.is_live(builds[0].produced));
    assert!(engine.is_live(builds[1].produced));

    // the first pipeline is still fully usable
    module_pipeline.add_verifier_pass().unwrap();
    assert_eq!(engine.passes(builds[0].produced), vec!["verifier"]);
    function_pipeline.add_simplify_cfg_pass().unwrap();
}

#[test]
fn test_module_passes_forward_in_order() {
    let engine = Arc::new(NullEngine::new());
    let pm = ModulePassManager::new(engine.clone()).unwrap();

    pm.add_verifier_pass().unwrap();
    pm.add_aa_eval_pass().unwrap();
    pm.add_simplify_cfg_pass().unwrap();
    pm.add_loop_unroll_pass().unwrap();
    pm.add_loop_rotate_pass().unwrap();
    pm.add_instruction_combine_pass().unwrap();

    let token = engine.created(HandleKind::ModulePassManager)[0];
    assert_eq!(
        engine.passes(token),
        vec![
            "verifier",
            "aa-eval",
            "simplifycfg",
            "loop-unroll",
            "loop-rotate",
            "instcombine",
        ]
    );
}

#[test]
fn test_jump_threading_threshold_defaults_to_unspecified() {
    let engine = Arc::new(NullEngine::new());
    let pm = ModulePassManager::new(engine.clone()).unwrap();

    pm.add_jump_threading_pass(None).unwrap();
    pm.add_jump_threading_pass(Some(50)).unwrap();

    let token = engine.created(HandleKind::ModulePassManager)[0];
    assert_eq!(
        engine.passes(token),
        vec!["jump-threading(-1)", "jump-threading(50)"]
    );
}

#[test]
fn test_run_module_forwards_manager_builder_and_module() {
    let engine = Arc::new(NullEngine::new());
    let tm = target_machine();
    let pto = PipelineTuningOptions::new(engine.clone()).unwrap();
    let pb = PassBuilder::new(engine.clone(), &tm, &pto).unwrap();
    let pipeline = pb.build_module_pipeline().unwrap();

    let module = unsafe { Module::from_raw(0x9100 as ModuleRef) };
    pipeline.run(&module, &pb).unwrap();

    let runs = engine.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].manager, engine.builds()[0].produced);
    assert_eq!(runs[0].builder, engine.created(HandleKind::PassBuilder)[0]);
    assert_eq!(runs[0].payload, 0x9100);
}

#[test]
fn test_run_function_pipeline() {
    let engine = Arc::new(NullEngine::new());
    let tm = target_machine();
    let mut pto = PipelineTuningOptions::new(engine.clone()).unwrap();
    pto.set_opt_level(1).unwrap();
    let pb = PassBuilder::new(engine.clone(), &tm, &pto).unwrap();

    let pipeline = pb.build_function_pipeline().unwrap();
    pipeline.add_loop_rotate_pass().unwrap();

    let function = unsafe { Function::from_raw(0x9200 as FunctionRef) };
    pipeline.run(&function, &pb).unwrap();

    let builds = engine.builds();
    assert_eq!(builds[0].opt_level, 1);
    assert_eq!(builds[0].kind, HandleKind::FunctionPassManager);

    let runs = engine.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].payload, 0x9200);

    // the run is synchronous and leaves the manager configurable
    pipeline.add_simplify_cfg_pass().unwrap();
}

#[test]
fn test_opt_level_change_applies_to_later_builds() {
    let engine = Arc::new(NullEngine::new());
    let tm = target_machine();
    let mut pto = PipelineTuningOptions::new(engine.clone()).unwrap();

    pto.set_opt_level(0).unwrap();
    let pb = PassBuilder::new(engine.clone(), &tm, &pto).unwrap();
    let _first = pb.build_module_pipeline().unwrap();
    drop(pb);

    pto.set_opt_level(3).unwrap();
    let pb = PassBuilder::new(engine.clone(), &tm, &pto).unwrap();
    let _second = pb.build_module_pipeline().unwrap();

    let builds = engine.builds();
    assert_eq!(builds[0].opt_level, 0);
    assert_eq!(builds[1].opt_level, 3);
}
