//! Null engine (no native library)
//!
//! Fabricates handle tokens and records every call instead of crossing
//! the FFI boundary. Used by the wrapper tests to check the handle
//! lifecycle contract, and usable as a dry-run engine.

use std::collections::HashMap;

use libc::c_int;
use parking_lot::Mutex;

use crate::engine::PassEngine;
use crate::handles::{
    FunctionPassManagerRef, FunctionRef, ModulePassManagerRef, ModuleRef, PassBuilderRef,
    TargetMachineRef, TuningOptionsRef,
};

/// Kind tag for fabricated handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    ModulePassManager,
    FunctionPassManager,
    PassBuilder,
    TuningOptions,
}

/// One pipeline-construction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRecord {
    pub builder: usize,
    pub opt_level: i32,
    pub produced: usize,
    pub kind: HandleKind,
}

/// One run call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRecord {
    pub manager: usize,
    pub builder: usize,
    pub payload: usize,
}

// The native options object enables all four behaviors by default.
#[derive(Debug, Clone, Copy)]
struct TuningFlags {
    loop_interleaving: bool,
    loop_vectorization: bool,
    slp_vectorization: bool,
    loop_unrolling: bool,
}

impl Default for TuningFlags {
    fn default() -> Self {
        Self {
            loop_interleaving: true,
            loop_vectorization: true,
            slp_vectorization: true,
            loop_unrolling: true,
        }
    }
}

#[derive(Default)]
struct NullState {
    next_token: usize,
    created: Vec<(usize, HandleKind)>,
    live: HashMap<usize, HandleKind>,
    destroy_calls: HashMap<usize, u32>,
    flags: HashMap<usize, TuningFlags>,
    passes: HashMap<usize, Vec<String>>,
    builds: Vec<BuildRecord>,
    runs: Vec<RunRecord>,
}

/// Engine stand-in that records calls (useful for tests).
#[derive(Default)]
pub struct NullEngine {
    state: Mutex<NullState>,
}

impl NullEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw handle turned back into its token form.
    pub fn token<T>(raw: *mut T) -> usize {
        raw as usize
    }

    /// Tokens created so far for one handle kind, in creation order.
    pub fn created(&self, kind: HandleKind) -> Vec<usize> {
        self.state
            .lock()
            .created
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(t, _)| *t)
            .collect()
    }

    /// How many times the destroy entry point was called for a token.
    pub fn destroy_calls(&self, token: usize) -> u32 {
        self.state.lock().destroy_calls.get(&token).copied().unwrap_or(0)
    }

    pub fn is_live(&self, token: usize) -> bool {
        self.state.lock().live.contains_key(&token)
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }

    /// Names of the passes registered on a pass-manager token.
    pub fn passes(&self, token: usize) -> Vec<String> {
        self.state.lock().passes.get(&token).cloned().unwrap_or_default()
    }

    pub fn builds(&self) -> Vec<BuildRecord> {
        self.state.lock().builds.clone()
    }

    pub fn runs(&self) -> Vec<RunRecord> {
        self.state.lock().runs.clone()
    }

    fn alloc(&self, kind: HandleKind) -> usize {
        let mut state = self.state.lock();
        state.next_token += 1;
        let token = state.next_token;
        state.created.push((token, kind));
        state.live.insert(token, kind);
        if kind == HandleKind::TuningOptions {
            state.flags.insert(token, TuningFlags::default());
        }
        token
    }

    fn destroy(&self, token: usize) {
        let mut state = self.state.lock();
        *state.destroy_calls.entry(token).or_insert(0) += 1;
        state.live.remove(&token);
    }

    fn record_pass(&self, token: usize, name: &str) {
        self.state
            .lock()
            .passes
            .entry(token)
            .or_default()
            .push(name.to_string());
    }

    fn with_flags<R>(&self, token: usize, f: impl FnOnce(&mut TuningFlags) -> R) -> R {
        let mut state = self.state.lock();
        f(state.flags.entry(token).or_default())
    }
}

impl PassEngine for NullEngine {
    fn create_module_pass_manager(&self) -> ModulePassManagerRef {
        self.alloc(HandleKind::ModulePassManager) as ModulePassManagerRef
    }

    fn dispose_module_pass_manager(&self, pm: ModulePassManagerRef) {
        self.destroy(pm as usize);
    }

    fn create_function_pass_manager(&self) -> FunctionPassManagerRef {
        self.alloc(HandleKind::FunctionPassManager) as FunctionPassManagerRef
    }

    fn dispose_function_pass_manager(&self, pm: FunctionPassManagerRef) {
        self.destroy(pm as usize);
    }

    fn create_tuning_options(&self) -> TuningOptionsRef {
        self.alloc(HandleKind::TuningOptions) as TuningOptionsRef
    }

    fn dispose_tuning_options(&self, pto: TuningOptionsRef) {
        self.destroy(pto as usize);
    }

    fn create_pass_builder(&self, _tm: TargetMachineRef, _pto: TuningOptionsRef) -> PassBuilderRef {
        self.alloc(HandleKind::PassBuilder) as PassBuilderRef
    }

    fn dispose_pass_builder(&self, pb: PassBuilderRef) {
        self.destroy(pb as usize);
    }

    fn build_module_pipeline(
        &self,
        pb: PassBuilderRef,
        opt_level: c_int,
    ) -> ModulePassManagerRef {
        let produced = self.alloc(HandleKind::ModulePassManager);
        self.state.lock().builds.push(BuildRecord {
            builder: pb as usize,
            opt_level,
            produced,
            kind: HandleKind::ModulePassManager,
        });
        produced as ModulePassManagerRef
    }

    fn build_function_pipeline(
        &self,
        pb: PassBuilderRef,
        opt_level: c_int,
    ) -> FunctionPassManagerRef {
        let produced = self.alloc(HandleKind::FunctionPassManager);
        self.state.lock().builds.push(BuildRecord {
            builder: pb as usize,
            opt_level,
            produced,
            kind: HandleKind::FunctionPassManager,
        });
        produced as FunctionPassManagerRef
    }

    fn run_module(&self, pm: ModulePassManagerRef, pb: PassBuilderRef, module: ModuleRef) {
        self.state.lock().runs.push(RunRecord {
            manager: pm as usize,
            builder: pb as usize,
            payload: module as usize,
        });
    }

    fn run_function(&self, pm: FunctionPassManagerRef, pb: PassBuilderRef, function: FunctionRef) {
        self.state.lock().runs.push(RunRecord {
            manager: pm as usize,
            builder: pb as usize,
            payload: function as usize,
        });
    }

    fn add_verifier_pass(&self, pm: ModulePassManagerRef) {
        self.record_pass(pm as usize, "verifier");
    }

    fn add_aa_eval_pass_module(&self, pm: ModulePassManagerRef) {
        self.record_pass(pm as usize, "aa-eval");
    }

    fn add_simplify_cfg_pass_module(&self, pm: ModulePassManagerRef) {
        self.record_pass(pm as usize, "simplifycfg");
    }

    fn add_loop_unroll_pass_module(&self, pm: ModulePassManagerRef) {
        self.record_pass(pm as usize, "loop-unroll");
    }

    fn add_loop_rotate_pass_module(&self, pm: ModulePassManagerRef) {
        self.record_pass(pm as usize, "loop-rotate");
    }

    fn add_instruction_combine_pass_module(&self, pm: ModulePassManagerRef) {
        self.record_pass(pm as usize, "instcombine");
    }

    fn add_jump_threading_pass_module(&self, pm: ModulePassManagerRef, threshold: c_int) {
        self.record_pass(pm as usize, &format!("jump-threading({threshold})"));
    }

    fn add_aa_eval_pass_function(&self, pm: FunctionPassManagerRef) {
        self.record_pass(pm as usize, "aa-eval");
    }

    fn add_simplify_cfg_pass_function(&self, pm: FunctionPassManagerRef) {
        self.record_pass(pm as usize, "simplifycfg");
    }

    fn add_loop_unroll_pass_function(&self, pm: FunctionPassManagerRef) {
        self.record_pass(pm as usize, "loop-unroll");
    }

    fn add_loop_rotate_pass_function(&self, pm: FunctionPassManagerRef) {
        self.record_pass(pm as usize, "loop-rotate");
    }

    fn add_instruction_combine_pass_function(&self, pm: FunctionPassManagerRef) {
        self.record_pass(pm as usize, "instcombine");
    }

    fn add_jump_threading_pass_function(&self, pm: FunctionPassManagerRef, threshold: c_int) {
        self.record_pass(pm as usize, &format!("jump-threading({threshold})"));
    }

    fn loop_interleaving(&self, pto: TuningOptionsRef) -> bool {
        self.with_flags(pto as usize, |f| f.loop_interleaving)
    }

    fn set_loop_interleaving(&self, pto: TuningOptionsRef, value: bool) {
        self.with_flags(pto as usize, |f| f.loop_interleaving = value);
    }

    fn loop_vectorization(&self, pto: TuningOptionsRef) -> bool {
        self.with_flags(pto as usize, |f| f.loop_vectorization)
    }

    fn set_loop_vectorization(&self, pto: TuningOptionsRef, value: bool) {
        self.with_flags(pto as usize, |f| f.loop_vectorization = value);
    }

    fn slp_vectorization(&self, pto: TuningOptionsRef) -> bool {
        self.with_flags(pto as usize, |f| f.slp_vectorization)
    }

    fn set_slp_vectorization(&self, pto: TuningOptionsRef, value: bool) {
        self.with_flags(pto as usize, |f| f.slp_vectorization = value);
    }

    fn loop_unrolling(&self, pto: TuningOptionsRef) -> bool {
        self.with_flags(pto as usize, |f| f.loop_unrolling)
    }

    fn set_loop_unrolling(&self, pto: TuningOptionsRef, value: bool) {
        self.with_flags(pto as usize, |f| f.loop_unrolling = value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_nonzero() {
        let engine = NullEngine::new();
        let a = engine.create_module_pass_manager();
        let b = engine.create_function_pass_manager();
        assert!(!a.is_null());
        assert!(!b.is_null());
        assert_ne!(a as usize, b as usize);
    }

    #[test]
    fn test_destroy_is_counted_per_token() {
        let engine = NullEngine::new();
        let pm = engine.create_module_pass_manager();
        let token = NullEngine::token(pm);
        assert!(engine.is_live(token));

        engine.dispose_module_pass_manager(pm);
        assert!(!engine.is_live(token));
        assert_eq!(engine.destroy_calls(token), 1);
    }

    #[test]
    fn test_flags_default_enabled() {
        let engine = NullEngine::new();
        let pto = engine.create_tuning_options();
        assert!(engine.loop_interleaving(pto));
        assert!(engine.loop_vectorization(pto));
        assert!(engine.slp_vectorization(pto));
        assert!(engine.loop_unrolling(pto));
    }
}
