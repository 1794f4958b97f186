//! The five-step physics turn: rotate, thrust/shield/boost, move-with-collisions,
//! friction, finalize. See SPEC_FULL.md §4.4.

use crate::constants::{
    CHECKPOINT_RADIUS, EPSILON, FRICTION_FACTOR, POD_RADIUS, REBOUND_MINIMUM_IMPULSE,
    SHIELD_COOLDOWN, THRUST_BOOST,
};
use crate::geometry::Vec2;
use crate::pod::{Move, Plan, Pod, Turn};
use crate::track::Track;

/// The four-pod world the simulator advances. Indices 0/1 are the owned
/// pods (their moves come from the candidate plan), 2/3 are the opponents
/// (modeled as zero rotation, zero thrust over the horizon — their real
/// moves are unknown to the search).
pub type World = [Pod; 4];

/// Runs a full candidate plan against a cloned world, turn by turn.
pub fn simulate_plan(world: &mut World, track: &Track, plan: &Plan) {
    for turn in &plan.turns {
        simulate_turn(world, track, turn);
    }
}

/// Advances the world by exactly one turn, applying the five steps in order.
pub fn simulate_turn(world: &mut World, track: &Track, turn: &Turn) {
    rotate(world, turn);
    apply_thrust_shield_boost(world, turn);
    move_with_collisions(world, track);
    apply_friction(world);
    finalize(world);
}

/// Step A.
fn rotate(world: &mut World, turn: &Turn) {
    for i in 0..2 {
        let pod = &mut world[i];
        pod.angle = (pod.angle + turn[i].rotation).rem_euclid(360);
    }
}

/// Step B.
fn apply_thrust_shield_boost(world: &mut World, turn: &Turn) {
    for i in 0..2 {
        let pod = &mut world[i];
        let mv = &turn[i];

        if mv.use_shield {
            pod.shield_cooldown = SHIELD_COOLDOWN;
            continue;
        }
        if pod.shield_cooldown > 0 {
            continue;
        }

        let angle_rad = (pod.angle as f64).to_radians();
        let direction = Vec2::new(angle_rad.cos(), angle_rad.sin());

        let thrust = if mv.use_boost && pod.boost_available {
            pod.boost_available = false;
            THRUST_BOOST
        } else {
            mv.thrust as f64
        };
        pod.velocity = pod.velocity + direction * thrust;
    }
}

/// Step C: advance from simulated time 0 to 1, resolving the soonest
/// collision (if any) at each sub-step and checking checkpoint passage
/// after every partial advance.
fn move_with_collisions(world: &mut World, track: &Track) {
    let mut time_remaining = 1.0_f64;
    while time_remaining > 0.0 {
        let mut dt = time_remaining;
        let mut colliding: Option<(usize, usize)> = None;

        for i in 0..4 {
            for j in (i + 1)..4 {
                if let Some(t) = time_to_collision(&world[i], &world[j]) {
                    if t < dt {
                        dt = t;
                        colliding = Some((i, j));
                    }
                }
            }
        }

        for pod in world.iter_mut() {
            pod.position = pod.position + pod.velocity * dt;
            check_checkpoint_passage(pod, track);
        }

        if let Some((i, j)) = colliding {
            let (a, b) = split_pair_mut(world, i, j);
            rebound(a, b);
        }

        time_remaining -= dt;
    }
}

fn check_checkpoint_passage(pod: &mut Pod, track: &Track) {
    let target = track.checkpoint(pod.next_checkpoint_id);
    if pod.position.distance(target) < CHECKPOINT_RADIUS {
        pod.next_checkpoint_id = (pod.next_checkpoint_id + 1) % track.checkpoint_count();
        pod.total_checkpoints_passed += 1;
    }
}

fn split_pair_mut(world: &mut World, i: usize, j: usize) -> (&mut Pod, &mut Pod) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = world.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = world.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

/// Smallest positive `tau` at which the two pods' centers are exactly
/// `2 * POD_RADIUS` apart, or `None` if no such collision occurs within the
/// remaining turn. Numerical edge cases (near-zero relative velocity,
/// negative discriminant, non-positive root) are treated as "no collision".
fn time_to_collision(a: &Pod, b: &Pod) -> Option<f64> {
    let position_diff = b.position - a.position;
    let velocity_diff = b.velocity - a.velocity;

    let quad_a = velocity_diff.dot(velocity_diff);
    if quad_a.abs() < EPSILON {
        return None;
    }

    let quad_b = -2.0 * position_diff.dot(velocity_diff);
    let quad_c = position_diff.dot(position_diff) - (2.0 * POD_RADIUS).powi(2);

    let discriminant = quad_b * quad_b - 4.0 * quad_a * quad_c;
    if discriminant < 0.0 {
        return None;
    }

    let time = (quad_b - discriminant.sqrt()) / (2.0 * quad_a);
    if time <= EPSILON {
        return None;
    }
    Some(time)
}

/// Elastic-ish rebound with a clamped minimum/maximum impulse.
fn rebound(a: &mut Pod, b: &mut Pod) {
    let mass_a = a.mass();
    let mass_b = b.mass();

    let position_diff = b.position - a.position;
    let distance = position_diff.length();
    let normal = position_diff / distance;
    let velocity_diff = b.velocity - a.velocity;

    let reduced_mass = (mass_a * mass_b) / (mass_a + mass_b);
    let closing_speed = velocity_diff.dot(normal);

    let impulse = crate::constants::clamp_f64(
        -2.0 * reduced_mass * closing_speed,
        -REBOUND_MINIMUM_IMPULSE,
        REBOUND_MINIMUM_IMPULSE,
    );

    a.velocity = a.velocity + normal * (-mass_a * impulse);
    b.velocity = b.velocity + normal * (mass_b * impulse);
}

/// Step D.
fn apply_friction(world: &mut World) {
    for pod in world.iter_mut() {
        pod.velocity = pod.velocity * FRICTION_FACTOR;
    }
}

/// Step E.
fn finalize(world: &mut World) {
    for pod in world.iter_mut() {
        pod.position = pod.position.round();
        pod.velocity = pod.velocity.round();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pod::Move;

    fn track_ahead() -> Track {
        Track::new(vec![Vec2::new(0.0, 0.0), Vec2::new(10000.0, 0.0)], 1)
    }

    fn world_with(pods: [Pod; 4]) -> World {
        pods
    }

    #[test]
    fn thrust_accumulates_then_decays_by_friction() {
        let mut pod = Pod::new();
        pod.angle = 0;
        let mut world = world_with([pod, Pod::new(), Pod::new(), Pod::new()]);
        let track = track_ahead();
        let turn: Turn = [
            Move { rotation: 0, thrust: 100, ..Default::default() },
            Move::default(),
        ];
        simulate_turn(&mut world, &track, &turn);
        assert_eq!(world[0].velocity, Vec2::new(85.0, 0.0));
    }

    #[test]
    fn four_turns_of_thrust_passes_the_checkpoint() {
        let mut pod = Pod::new();
        pod.angle = 0;
        pod.next_checkpoint_id = 1;
        let mut world = world_with([pod, Pod::new(), Pod::new(), Pod::new()]);
        let track = track_ahead();
        let turn: Turn = [
            Move { rotation: 0, thrust: 100, ..Default::default() },
            Move::default(),
        ];
        for _ in 0..4 {
            simulate_turn(&mut world, &track, &turn);
        }
        assert!(world[0].total_checkpoints_passed >= 1);
    }

    #[test]
    fn mild_head_on_collision_reverses_relative_velocity_along_normal() {
        // Closing speed small enough that the impulse isn't clamped: the
        // rebound should behave as a perfectly elastic bounce.
        let mut a = Pod::new();
        a.position = Vec2::new(0.0, 0.0);
        a.velocity = Vec2::new(10.0, 0.0);
        let mut b = Pod::new();
        b.position = Vec2::new(800.0, 0.0);
        b.velocity = Vec2::new(-10.0, 0.0);
        let normal = Vec2::new(1.0, 0.0);
        let closing_before = (b.velocity - a.velocity).dot(normal);
        rebound(&mut a, &mut b);
        let closing_after = (b.velocity - a.velocity).dot(normal);
        assert!((closing_after + closing_before).abs() < 1e-6, "relative velocity should reverse");
    }

    #[test]
    fn strong_head_on_collision_clamps_impulse_to_120() {
        let mut a = Pod::new();
        a.position = Vec2::new(0.0, 0.0);
        a.velocity = Vec2::new(100.0, 0.0);
        let mut b = Pod::new();
        b.position = Vec2::new(800.0, 0.0);
        b.velocity = Vec2::new(-100.0, 0.0);
        rebound(&mut a, &mut b);
        // Equal masses: |delta_v| = mass * impulse = 1 * 120.
        assert!((a.velocity.x - (100.0 - REBOUND_MINIMUM_IMPULSE)).abs() < 1e-6);
        assert!((b.velocity.x - (-100.0 + REBOUND_MINIMUM_IMPULSE)).abs() < 1e-6);
    }

    #[test]
    fn shielded_pod_changes_velocity_by_mass_ratio() {
        let mut a = Pod::new();
        a.position = Vec2::new(0.0, 0.0);
        a.velocity = Vec2::new(100.0, 0.0);
        a.shield_cooldown = SHIELD_COOLDOWN;
        let mut b = Pod::new();
        b.position = Vec2::new(800.0, 0.0);
        b.velocity = Vec2::new(-100.0, 0.0);
        let before_a = a.velocity;
        let before_b = b.velocity;
        rebound(&mut a, &mut b);
        let delta_a = (a.velocity - before_a).length();
        let delta_b = (b.velocity - before_b).length();
        // delta = mass * |impulse|, so the shielded (mass 10) pod swings ten
        // times as much as the unshielded (mass 1) one for the same impulse.
        assert!((delta_a / delta_b - 10.0).abs() < 1e-6);
    }

    #[test]
    fn no_collision_when_relative_velocity_is_zero() {
        let a = Pod::new();
        let mut b = Pod::new();
        b.position = Vec2::new(100.0, 0.0);
        assert_eq!(time_to_collision(&a, &b), None);
    }
}
