//! Animation Tests
//!
//! Tests for:
//! - Sampler interval lookup and linear/step/cubic interpolation
//! - Quaternion slerp endpoints and shortest path
//! - Play-head looping by repeated subtraction
//! - AnimationPlayer selection and inert states

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3, Vec4};

use armature::animation::{
    Animation, AnimationChannel, AnimationPlayer, AnimationSampler, Interpolatable, InterpolationMode,
    TargetPath,
};
use armature::errors::ArmatureError;
use armature::scene::{Node, SceneGraph};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn single_node_graph() -> SceneGraph {
    let mut graph = SceneGraph::new();
    let root = graph.insert(Node::new(0));
    graph.add_root(root).unwrap();
    graph.rebuild_linear();
    graph
}

fn translation_animation(times: Vec<f32>, values: Vec<Vec3>) -> Animation {
    let outputs = values.into_iter().map(|v| v.extend(0.0)).collect();
    let sampler = AnimationSampler::new(times, outputs, InterpolationMode::Linear);
    let channel = AnimationChannel {
        target: TargetPath::Translation,
        sampler: 0,
        node: 0,
    };
    Animation::new("move".to_string(), vec![sampler], vec![channel])
}

// ============================================================================
// AnimationSampler
// ============================================================================

#[test]
fn sampler_linear_midpoint() {
    let sampler = AnimationSampler::new(
        vec![0.0, 1.0],
        vec![Vec4::ZERO, Vec4::new(10.0, 20.0, 30.0, 0.0)],
        InterpolationMode::Linear,
    );

    let value: Vec3 = sampler.sample(0.5).unwrap();
    assert!(value.abs_diff_eq(Vec3::new(5.0, 10.0, 15.0), EPSILON), "got {value}");
}

#[test]
fn sampler_picks_first_matching_interval() {
    let sampler = AnimationSampler::new(
        vec![0.0, 1.0, 2.0],
        vec![Vec4::ZERO, Vec4::ONE, Vec4::splat(5.0)],
        InterpolationMode::Linear,
    );

    // t = 1.0 lies on the boundary of both intervals; the first one wins.
    assert_eq!(sampler.find_interval(1.0), Some(0));
    assert_eq!(sampler.find_interval(1.5), Some(1));
    assert_eq!(sampler.find_interval(2.5), None);
    assert_eq!(sampler.find_interval(-0.1), None);
}

#[test]
fn sampler_outside_range_yields_nothing() {
    let sampler = AnimationSampler::new(
        vec![1.0, 2.0],
        vec![Vec4::ZERO, Vec4::ONE],
        InterpolationMode::Linear,
    );
    assert!(sampler.sample::<Vec3>(0.5).is_none());
}

#[test]
fn sampler_single_keyframe_never_matches() {
    let sampler = AnimationSampler::new(vec![0.0], vec![Vec4::ONE], InterpolationMode::Linear);
    assert!(sampler.sample::<Vec3>(0.0).is_none());
}

#[test]
fn sampler_duplicate_times_hold_left_value() {
    let sampler = AnimationSampler::new(
        vec![1.0, 1.0],
        vec![Vec4::splat(2.0), Vec4::splat(7.0)],
        InterpolationMode::Linear,
    );
    let value: Vec3 = sampler.sample(1.0).unwrap();
    assert!(value.abs_diff_eq(Vec3::splat(2.0), EPSILON));
}

#[test]
fn sampler_step_holds_left_keyframe() {
    let sampler = AnimationSampler::new(
        vec![0.0, 1.0],
        vec![Vec4::splat(3.0), Vec4::splat(9.0)],
        InterpolationMode::Step,
    );
    let value: Vec3 = sampler.sample(0.99).unwrap();
    assert!(value.abs_diff_eq(Vec3::splat(3.0), EPSILON));
}

#[test]
fn sampler_step_switches_at_right_keyframe_time() {
    let sampler = AnimationSampler::new(
        vec![0.0, 1.0, 2.0],
        vec![Vec4::splat(3.0), Vec4::splat(9.0), Vec4::splat(5.0)],
        InterpolationMode::Step,
    );

    let at_middle: Vec3 = sampler.sample(1.0).unwrap();
    let at_last: Vec3 = sampler.sample(2.0).unwrap();
    assert!(at_middle.abs_diff_eq(Vec3::splat(9.0), EPSILON));
    assert!(at_last.abs_diff_eq(Vec3::splat(5.0), EPSILON));
}

#[test]
fn sampler_cubic_hits_keyframe_values() {
    // (in, value, out) per keyframe
    let outputs = vec![
        Vec4::ZERO,
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(4.0, 0.0, 0.0, 0.0),
        Vec4::new(-2.0, 0.0, 0.0, 0.0),
        Vec4::new(3.0, 0.0, 0.0, 0.0),
        Vec4::ZERO,
    ];
    let sampler = AnimationSampler::new(vec![0.0, 2.0], outputs, InterpolationMode::CubicSpline);

    let start: Vec3 = sampler.sample(0.0).unwrap();
    let end: Vec3 = sampler.sample(2.0).unwrap();
    assert!(approx(start.x, 1.0));
    assert!(approx(end.x, 3.0));
}

#[test]
fn cubic_with_zero_tangents_is_smoothstep() {
    let v = Vec3::interpolate_cubic(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, Vec3::ONE, 0.5, 1.0);
    assert!(approx(v.x, 0.5));

    let v = Vec3::interpolate_cubic(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, Vec3::ONE, 0.25, 1.0);
    assert!(approx(v.x, 0.156_25));
}

// ============================================================================
// Quaternion interpolation
// ============================================================================

#[test]
fn slerp_endpoints_are_exact_keyframes() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(FRAC_PI_2 * 0.9);

    let sampler = AnimationSampler::new(
        vec![0.0, 1.0],
        vec![Vec4::from(q0), Vec4::from(q1)],
        InterpolationMode::Linear,
    );

    let start: Quat = sampler.sample(0.0).unwrap();
    let end: Quat = sampler.sample(1.0).unwrap();
    assert!(start.abs_diff_eq(q0, EPSILON), "got {start}");
    assert!(end.abs_diff_eq(q1, EPSILON), "got {end}");
}

#[test]
fn slerp_is_monotonic_within_ninety_degrees() {
    let q0 = Quat::from_rotation_z(0.0);
    let q1 = Quat::from_rotation_z(FRAC_PI_2);

    let mut previous = 0.0;
    for step in 1..=10 {
        let t = step as f32 / 10.0;
        let q = Quat::interpolate_linear(q0, q1, t);
        let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
        assert!(angle >= previous - 1e-4, "angle went backwards at t = {t}");
        assert!(q.is_normalized());
        previous = angle;
    }
    assert!((previous - FRAC_PI_2).abs() < 1e-3);
}

#[test]
fn slerp_midpoint_is_half_angle() {
    let q = Quat::interpolate_linear(Quat::IDENTITY, Quat::from_rotation_x(FRAC_PI_2), 0.5);
    assert!(q.abs_diff_eq(Quat::from_rotation_x(FRAC_PI_2 / 2.0), EPSILON));
}

#[test]
fn slerp_renormalizes_unnormalized_keyframes() {
    let q0 = Quat::from_xyzw(0.0, 0.0, 0.0, 2.0);
    let q1 = Quat::from_xyzw(0.0, 0.0, 0.0, 3.0);
    let q = Quat::interpolate_linear(q0, q1, 0.3);
    assert!(q.abs_diff_eq(Quat::IDENTITY, EPSILON));
}

// ============================================================================
// Play-head
// ============================================================================

#[test]
fn window_spans_all_samplers() {
    let a = AnimationSampler::new(vec![0.5, 1.0], vec![Vec4::ZERO; 2], InterpolationMode::Linear);
    let b = AnimationSampler::new(vec![0.2, 3.0], vec![Vec4::ZERO; 2], InterpolationMode::Linear);
    let animation = Animation::new("mixed".to_string(), vec![a, b], Vec::new());

    assert!(approx(animation.start(), 0.2));
    assert!(approx(animation.end(), 3.0));
    assert!(approx(animation.current_time(), 0.2));
}

#[test]
fn looping_wraps_and_interpolates() {
    let mut graph = single_node_graph();
    let a = Vec3::ZERO;
    let b = Vec3::new(10.0, 0.0, 0.0);
    let mut animation = translation_animation(vec![0.0, 1.0], vec![a, b]);

    for _ in 0..5 {
        animation.advance_time(0.5);
    }
    animation.apply(&mut graph);

    assert!(approx(animation.current_time(), 0.5), "got {}", animation.current_time());
    let translation = graph.get(0).unwrap().transform.translation;
    assert!(translation.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), EPSILON));
}

#[test]
fn large_step_skips_several_loops() {
    let mut animation = translation_animation(vec![1.0, 3.0], vec![Vec3::ZERO, Vec3::ONE]);

    animation.advance_time(9.5);
    // 1.0 + 9.5 = 10.5 → 8.5 → 6.5 → 4.5 → 2.5
    assert!(approx(animation.current_time(), 2.5));
}

#[test]
fn landing_on_end_does_not_wrap() {
    let mut animation = translation_animation(vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::ONE]);
    animation.advance_time(1.0);
    assert!(approx(animation.current_time(), 1.0));
}

#[test]
fn empty_window_never_loops_forever() {
    let mut animation = translation_animation(vec![2.0], vec![Vec3::ONE]);
    animation.advance_time(5.0);
    assert!(approx(animation.current_time(), 7.0));
}

#[test]
fn unmatched_channel_keeps_previous_transform() {
    let mut graph = single_node_graph();
    graph.get_mut(0).unwrap().transform.translation = Vec3::splat(4.0);

    let mut animation = translation_animation(vec![1.0, 2.0], vec![Vec3::ZERO, Vec3::ONE]);
    animation.seek(0.5);
    animation.apply(&mut graph);

    assert_eq!(graph.get(0).unwrap().transform.translation, Vec3::splat(4.0));
}

#[test]
fn rotation_and_scale_channels_write_their_fields() {
    let mut graph = single_node_graph();
    let rotation = AnimationSampler::new(
        vec![0.0, 1.0],
        vec![Vec4::from(Quat::IDENTITY), Vec4::from(Quat::from_rotation_z(1.0))],
        InterpolationMode::Linear,
    );
    let scale = AnimationSampler::new(
        vec![0.0, 1.0],
        vec![Vec4::new(1.0, 1.0, 1.0, 0.0), Vec4::new(3.0, 3.0, 3.0, 0.0)],
        InterpolationMode::Linear,
    );
    let channels = vec![
        AnimationChannel {
            target: TargetPath::Rotation,
            sampler: 0,
            node: 0,
        },
        AnimationChannel {
            target: TargetPath::Scale,
            sampler: 1,
            node: 0,
        },
    ];
    let mut animation = Animation::new("spin".to_string(), vec![rotation, scale], channels);
    animation.seek(0.5);
    animation.apply(&mut graph);

    let transform = graph.get(0).unwrap().transform;
    assert!(transform.rotation.abs_diff_eq(Quat::from_rotation_z(0.5), EPSILON));
    assert!(transform.scale.abs_diff_eq(Vec3::splat(2.0), EPSILON));
}

// ============================================================================
// AnimationPlayer
// ============================================================================

#[test]
fn player_without_animations_is_inert() {
    let mut graph = single_node_graph();
    let mut player = AnimationPlayer::new(Vec::new());

    assert!(player.active().is_none());
    assert!(!player.update(1.0, &mut graph));
}

#[test]
fn player_activates_first_animation() {
    let player = AnimationPlayer::new(vec![
        translation_animation(vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::ONE]),
        translation_animation(vec![0.0, 2.0], vec![Vec3::ZERO, Vec3::ONE]),
    ]);
    assert_eq!(player.active_index(), Some(0));
    assert_eq!(player.animation_names().collect::<Vec<_>>(), ["move", "move"]);
}

#[test]
fn player_rejects_out_of_range_selection() {
    let mut player = AnimationPlayer::new(vec![translation_animation(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::ONE],
    )]);

    let err = player.set_active(3).unwrap_err();
    assert!(matches!(
        err,
        ArmatureError::AnimationIndexOutOfBounds { index: 3, count: 1 }
    ));
    assert_eq!(player.active_index(), Some(0));
}

#[test]
fn player_scales_delta() {
    let mut graph = single_node_graph();
    let mut player = AnimationPlayer::new(vec![translation_animation(
        vec![0.0, 4.0],
        vec![Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)],
    )]);
    player.time_scale = 2.0;

    assert!(player.update(0.5, &mut graph));
    assert!(approx(player.active().unwrap().current_time(), 1.0));
    assert!(approx(graph.get(0).unwrap().transform.translation.x, 1.0));
}

#[test]
fn cleared_player_stops_updating() {
    let mut graph = single_node_graph();
    let mut player = AnimationPlayer::new(vec![translation_animation(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::ONE],
    )]);
    player.clear_active();
    assert!(!player.update(0.5, &mut graph));
    assert_eq!(graph.get(0).unwrap().transform.translation, Vec3::ZERO);
}
