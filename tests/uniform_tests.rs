//! Uniform Synchronization Tests
//!
//! Tests for:
//! - UniformKind: WGSL allow-list parsing, byte sizes
//! - ValueGetter: construction-time type validation
//! - UniformHook: value-equality dirty tracking, first-poll-applies
//! - UniformHookGroup: registration-order polling, per-hook failure isolation
//! - UniformSourceSet: two-phase collect-then-wire setup

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use glam::{Mat4, Vec3};

use frameloom::errors::FrameError;
use frameloom::uniform::{
    UniformHook, UniformHookGroup, UniformKind, UniformSink, UniformSourceSet, UniformValue,
    ValueGetter,
};

/// CPU-side state the getters read from.
struct FrameState {
    time: f32,
    sun_dir: Vec3,
    view_proj: Mat4,
}

impl FrameState {
    fn new() -> Self {
        Self {
            time: 0.0,
            sun_dir: Vec3::Y,
            view_proj: Mat4::IDENTITY,
        }
    }
}

/// Sink that records every value it receives.
struct RecordingSink {
    writes: Rc<RefCell<Vec<UniformValue>>>,
}

impl RecordingSink {
    fn new() -> (Self, Rc<RefCell<Vec<UniformValue>>>) {
        let writes = Rc::new(RefCell::new(Vec::new()));
        (Self { writes: Rc::clone(&writes) }, writes)
    }
}

impl UniformSink for RecordingSink {
    fn set(
        &mut self,
        value: &UniformValue,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.writes.borrow_mut().push(*value);
        Ok(())
    }
}

/// Sink that rejects every write.
struct FailingSink;

impl UniformSink for FailingSink {
    fn set(
        &mut self,
        _value: &UniformValue,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err("device lost".into())
    }
}

fn time_getter() -> Arc<ValueGetter<FrameState>> {
    Arc::new(ValueGetter::of_kind(UniformKind::Float, |state: &FrameState, _| {
        Some(UniformValue::Float(state.time))
    }))
}

// ============================================================================
// UniformKind
// ============================================================================

#[test]
fn parse_accepts_every_supported_wgsl_name() {
    for kind in UniformKind::ALL {
        assert_eq!(UniformKind::parse(kind.wgsl_name()).unwrap(), kind);
    }
    // Shorthand forms from shader reflection.
    assert_eq!(UniformKind::parse("vec3f").unwrap(), UniformKind::Vec3);
    assert_eq!(UniformKind::parse("mat4x4f").unwrap(), UniformKind::Mat4);
}

#[test]
fn parse_rejects_unsupported_types() {
    for name in ["bool", "vec2<i32>", "texture_2d<f32>", "mat3x4<f32>", ""] {
        let err = UniformKind::parse(name).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedUniformType(n) if n == name));
    }
}

#[test]
fn getter_construction_validates_type_name() {
    assert!(ValueGetter::<FrameState>::new("f32", |s, _| Some(s.time.into())).is_ok());

    let err = ValueGetter::<FrameState>::new("bool", |_, _| None).unwrap_err();
    assert!(matches!(err, FrameError::UnsupportedUniformType(_)));
}

// ============================================================================
// UniformHook dirty tracking
// ============================================================================

#[test]
fn first_poll_always_applies() {
    let (sink, writes) = RecordingSink::new();
    let mut hook = UniformHook::new("u_time", time_getter(), Box::new(sink));

    let state = FrameState::new();
    assert!(hook.poll(&state).unwrap());
    assert_eq!(writes.borrow().len(), 1);
    assert_eq!(hook.applied(), Some(&UniformValue::Float(0.0)));
}

#[test]
fn unchanged_value_applies_exactly_once() {
    let (sink, writes) = RecordingSink::new();
    let mut hook = UniformHook::new("u_time", time_getter(), Box::new(sink));

    let state = FrameState::new();
    assert!(hook.poll(&state).unwrap());
    assert!(!hook.poll(&state).unwrap());
    assert!(!hook.poll(&state).unwrap());

    assert_eq!(writes.borrow().len(), 1);
}

#[test]
fn each_distinct_value_applies_in_order() {
    let (sink, writes) = RecordingSink::new();
    let mut hook = UniformHook::new("u_time", time_getter(), Box::new(sink));

    let mut state = FrameState::new();
    for time in [0.0f32, 0.016, 0.016, 0.033] {
        state.time = time;
        hook.poll(&state).unwrap();
    }

    let expected: Vec<UniformValue> =
        [0.0f32, 0.016, 0.033].into_iter().map(UniformValue::Float).collect();
    assert_eq!(*writes.borrow(), expected);
}

#[test]
fn missing_value_is_an_error() {
    let getter: Arc<ValueGetter<FrameState>> =
        Arc::new(ValueGetter::of_kind(UniformKind::Float, |_, _| None));
    let (sink, writes) = RecordingSink::new();
    let mut hook = UniformHook::new("u_missing", getter, Box::new(sink));

    let err = hook.poll(&FrameState::new()).unwrap_err();
    assert!(matches!(err, FrameError::MissingUniformValue(n) if n == "u_missing"));
    assert!(writes.borrow().is_empty());
}

#[test]
fn kind_mismatch_is_an_error() {
    // Declared float, produces a vec3.
    let getter: Arc<ValueGetter<FrameState>> =
        Arc::new(ValueGetter::of_kind(UniformKind::Float, |state: &FrameState, _| {
            Some(UniformValue::Vec3(state.sun_dir))
        }));
    let (sink, writes) = RecordingSink::new();
    let mut hook = UniformHook::new("u_sun", getter, Box::new(sink));

    let err = hook.poll(&FrameState::new()).unwrap_err();
    assert!(matches!(
        err,
        FrameError::UniformKindMismatch { expected: UniformKind::Float, actual: UniformKind::Vec3, .. }
    ));
    assert!(writes.borrow().is_empty());
}

#[test]
fn failed_apply_keeps_no_baseline() {
    let mut hook = UniformHook::new("u_time", time_getter(), Box::new(FailingSink));

    let state = FrameState::new();
    assert!(matches!(hook.poll(&state), Err(FrameError::UniformApply { .. })));
    // The write never landed, so nothing counts as applied.
    assert_eq!(hook.applied(), None);
}

// ============================================================================
// UniformHookGroup
// ============================================================================

#[test]
fn group_polls_hooks_in_registration_order() {
    let sun_getter: Arc<ValueGetter<FrameState>> =
        Arc::new(ValueGetter::of_kind(UniformKind::Vec3, |state: &FrameState, _| {
            Some(UniformValue::Vec3(state.sun_dir))
        }));

    let (time_sink, time_writes) = RecordingSink::new();
    let (sun_sink, sun_writes) = RecordingSink::new();

    let mut group = UniformHookGroup::new("sky_material");
    group.add(UniformHook::new("u_time", time_getter(), Box::new(time_sink))).unwrap();
    group.add(UniformHook::new("u_sun", sun_getter, Box::new(sun_sink))).unwrap();

    let names: Vec<&str> = group.hooks().map(|h| h.name()).collect();
    assert_eq!(names, ["u_time", "u_sun"]);

    assert_eq!(group.poll_all(&FrameState::new()), 2);
    assert_eq!(time_writes.borrow().len(), 1);
    assert_eq!(sun_writes.borrow().len(), 1);
}

#[test]
fn one_failing_hook_does_not_stop_the_rest() {
    let broken_getter: Arc<ValueGetter<FrameState>> =
        Arc::new(ValueGetter::of_kind(UniformKind::Float, |_, _| None));
    let matrix_getter: Arc<ValueGetter<FrameState>> =
        Arc::new(ValueGetter::of_kind(UniformKind::Mat4, |state: &FrameState, _| {
            Some(UniformValue::Mat4(state.view_proj))
        }));

    let (first_sink, first_writes) = RecordingSink::new();
    let (last_sink, last_writes) = RecordingSink::new();

    let mut group = UniformHookGroup::new("terrain_material");
    group.add(UniformHook::new("u_time", time_getter(), Box::new(first_sink))).unwrap();
    group.add(UniformHook::new("u_broken", broken_getter, Box::new(FailingSink))).unwrap();
    group.add(UniformHook::new("u_view_proj", matrix_getter, Box::new(last_sink))).unwrap();

    // The middle hook fails every frame; its neighbors still apply.
    assert_eq!(group.poll_all(&FrameState::new()), 2);
    assert_eq!(first_writes.borrow().len(), 1);
    assert_eq!(last_writes.borrow().len(), 1);
}

#[test]
fn duplicate_hook_name_is_rejected() {
    let mut group = UniformHookGroup::new("dup_group");
    let (sink_a, _) = RecordingSink::new();
    let (sink_b, _) = RecordingSink::new();

    group.add(UniformHook::new("u_time", time_getter(), Box::new(sink_a))).unwrap();
    let err = group.add(UniformHook::new("u_time", time_getter(), Box::new(sink_b))).unwrap_err();
    assert!(matches!(err, FrameError::DuplicateHook(n) if n == "u_time"));
    assert_eq!(group.len(), 1);
}

// ============================================================================
// Two-phase source collection and wiring
// ============================================================================

#[test]
fn duplicate_source_registration_fails() {
    let mut sources = UniformSourceSet::<FrameState>::new();
    sources
        .insert("u_time", ValueGetter::of_kind(UniformKind::Float, |s: &FrameState, _| Some(s.time.into())))
        .unwrap();

    let err = sources
        .insert("u_time", ValueGetter::of_kind(UniformKind::Float, |s: &FrameState, _| Some(s.time.into())))
        .unwrap_err();
    assert!(matches!(err, FrameError::DuplicateUniformSource(n) if n == "u_time"));
}

#[test]
fn wire_builds_hooks_from_collected_sources() {
    let mut sources = UniformSourceSet::<FrameState>::new();
    sources
        .insert("u_time", ValueGetter::of_kind(UniformKind::Float, |s: &FrameState, _| Some(s.time.into())))
        .unwrap();
    sources
        .insert("u_sun", ValueGetter::of_kind(UniformKind::Vec3, |s: &FrameState, _| Some(s.sun_dir.into())))
        .unwrap();

    let (time_sink, time_writes) = RecordingSink::new();
    let (sun_sink, _) = RecordingSink::new();

    let slots: Vec<(String, Box<dyn UniformSink>)> = vec![
        ("u_time".to_string(), Box::new(time_sink)),
        ("u_sun".to_string(), Box::new(sun_sink)),
    ];
    let mut group = UniformHookGroup::wire("water_material", &sources, slots).unwrap();

    assert_eq!(group.len(), 2);
    assert_eq!(group.poll_all(&FrameState::new()), 2);
    assert_eq!(time_writes.borrow().len(), 1);
}

#[test]
fn wire_fails_for_unknown_source() {
    let sources = UniformSourceSet::<FrameState>::new();
    let (sink, _) = RecordingSink::new();

    let slots: Vec<(String, Box<dyn UniformSink>)> = vec![("u_fog".to_string(), Box::new(sink))];
    let err = UniformHookGroup::wire("fog_material", &sources, slots).unwrap_err();
    assert!(matches!(err, FrameError::MissingUniformSource(n) if n == "u_fog"));
}

#[test]
fn shared_source_feeds_independent_baselines() {
    let mut sources = UniformSourceSet::<FrameState>::new();
    sources
        .insert("u_time", ValueGetter::of_kind(UniformKind::Float, |s: &FrameState, _| Some(s.time.into())))
        .unwrap();

    let getter = sources.get("u_time").unwrap();
    let (sink_a, writes_a) = RecordingSink::new();
    let (sink_b, writes_b) = RecordingSink::new();
    let mut hook_a = UniformHook::new("u_time", Arc::clone(&getter), Box::new(sink_a));
    let mut hook_b = UniformHook::new("u_time", getter, Box::new(sink_b));

    let mut state = FrameState::new();
    hook_a.poll(&state).unwrap();
    state.time = 1.0;
    hook_b.poll(&state).unwrap();

    // Same source, but each hook tracks its own last-applied value.
    assert_eq!(*writes_a.borrow(), [UniformValue::Float(0.0)]);
    assert_eq!(*writes_b.borrow(), [UniformValue::Float(1.0)]);
}
