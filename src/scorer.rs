//! Rates a post-simulation world from the owning side's perspective.
//!
//! See SPEC_FULL.md §4.5.

use crate::constants::{AHEAD_SCORE_BIAS, CHECKPOINT_SCORE_FACTOR};
use crate::physics::World;
use crate::pod::Pod;
use crate::track::Track;

/// `podScore = 30000 * total_checkpoints_passed - round(distance to next checkpoint)`.
fn pod_score(pod: &Pod, track: &Track) -> i64 {
    let dist_to_checkpoint = pod.position.distance(track.checkpoint(pod.next_checkpoint_id));
    CHECKPOINT_SCORE_FACTOR * pod.total_checkpoints_passed as i64 - dist_to_checkpoint.round() as i64
}

/// Scores a simulated world (indices 0/1 own, 2/3 opponent) from the owning
/// side's perspective. Mutates `world[..].score` as a side effect, matching
/// the source's scratch field, and returns the side's combined score.
pub fn rate_world(world: &mut World, track: &Track) -> i64 {
    for pod in world.iter_mut() {
        pod.score = pod_score(pod, track);
    }

    let own_racer_idx = if world[0].score > world[1].score { 0 } else { 1 };
    let own_interceptor_idx = 1 - own_racer_idx;
    let opponent_racer_idx = if world[2].score > world[3].score { 2 } else { 3 };

    let own_racer = world[own_racer_idx];
    let own_interceptor = world[own_interceptor_idx];
    let opponent_racer = world[opponent_racer_idx];

    let max_checkpoints = track.max_checkpoints();
    if own_racer.total_checkpoints_passed > max_checkpoints {
        return i64::MAX;
    }
    if opponent_racer.total_checkpoints_passed > max_checkpoints {
        return i64::MIN;
    }

    let ahead_score = own_racer.score - opponent_racer.score;

    let interceptor_score = if own_racer.next_checkpoint_id == opponent_racer.next_checkpoint_id {
        -own_interceptor.position.distance(opponent_racer.position).round() as i64
    } else {
        let opponent_checkpoint = track.checkpoint(opponent_racer.next_checkpoint_id);
        -own_interceptor.position.distance(opponent_checkpoint).round() as i64
    };

    ahead_score * AHEAD_SCORE_BIAS + interceptor_score
}
