//! Population of candidate plans, mutation, scoring and the time-bounded
//! improvement loop. See SPEC_FULL.md §4.6.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::constants::{
    BOOST_DISTANCE_SQUARED_THRESHOLD, ROTATION_MAXIMUM, SIMULATION_HORIZON, SOLUTIONS_COUNT,
    THRUST_MAXIMUM,
};
use crate::physics::{simulate_plan, World};
use crate::pod::{Move, Plan, Turn};
use crate::rng::Rng;
use crate::scorer::rate_world;
use crate::track::Track;

/// Holds `2 * SOLUTIONS_COUNT` plans: the first half are incumbents kept
/// between turns, the second half is scratch space for this turn's mutants.
pub struct Solver {
    plans: Vec<Plan>,
    rng: Rng,
}

impl Solver {
    pub fn new(track: &Track) -> Self {
        let mut solver = Self {
            plans: vec![Plan::empty(); 2 * SOLUTIONS_COUNT],
            rng: Rng::default(),
        };
        solver.init_population();
        solver.first_turn_boost(track);
        solver
    }

    fn init_population(&mut self) {
        for plan in self.plans.iter_mut() {
            for turn in plan.turns.iter_mut() {
                for mv in turn.iter_mut() {
                    randomize(&mut self.rng, mv, true);
                }
            }
        }
    }

    /// Considers an opening boost whenever the first two checkpoints are
    /// far apart.
    fn first_turn_boost(&mut self, track: &Track) {
        if !opening_boost_required(track) {
            return;
        }
        for plan in self.plans[..SOLUTIONS_COUNT].iter_mut() {
            for mv in plan.turns[0].iter_mut() {
                mv.use_boost = true;
            }
        }
    }

    /// Runs the time-bounded improvement loop and returns the best plan for
    /// this turn. If `deadline` expires before any mutant is scored, the
    /// shifted-and-rescored incumbent is returned unchanged (§7 graceful
    /// degradation).
    pub fn solve(&mut self, live_world: &World, track: &Track, deadline: Duration) -> Plan {
        let start = Instant::now();

        for plan in self.plans[..SOLUTIONS_COUNT].iter_mut() {
            shift_by_one_turn(&mut self.rng, plan);
            let mut world = *live_world;
            simulate_plan(&mut world, track, plan);
            plan.score = rate_world(&mut world, track);
        }

        let mut rounds = 0u32;
        while start.elapsed() < deadline {
            for i in 0..SOLUTIONS_COUNT {
                let mut mutant = self.plans[i];
                mutate(&mut self.rng, &mut mutant);
                let mut world = *live_world;
                simulate_plan(&mut world, track, &mutant);
                mutant.score = rate_world(&mut world, track);
                self.plans[SOLUTIONS_COUNT + i] = mutant;
            }
            self.plans.sort_unstable_by(|a, b| b.score.cmp(&a.score));
            rounds += 1;
        }

        debug!(rounds, elapsed_ms = start.elapsed().as_millis() as u64, "solver round summary");
        self.plans[0]
    }
}

/// Modifies one or all attributes of a move. Mirrors the source's weighted
/// attribute draw: rotation 5, thrust 5, shield 1, boost 0 when mutating a
/// single attribute; boost is only ever touched during full randomization.
fn randomize(rng: &mut Rng, mv: &mut Move, modify_all: bool) {
    const PROB_ROTATION: i32 = 5;
    const PROB_THRUST: i32 = PROB_ROTATION + 5;
    const PROB_SHIELD: i32 = PROB_THRUST + 1;

    #[derive(PartialEq)]
    enum Attr {
        Rotation,
        Thrust,
        Shield,
        Boost,
    }

    let attr = if modify_all {
        None
    } else {
        let draw = rng.range(0, PROB_SHIELD + 1);
        Some(if draw <= PROB_ROTATION {
            Attr::Rotation
        } else if draw <= PROB_THRUST {
            Attr::Thrust
        } else {
            Attr::Shield
        })
    };

    let touches = |target: Attr| modify_all || attr.as_ref() == Some(&target);

    if touches(Attr::Rotation) {
        // Tri-modal bias toward {-18, 0, 18}: most of the high tail of the
        // draw range snaps to 0.
        let r = rng.range(-2 * ROTATION_MAXIMUM, 3 * ROTATION_MAXIMUM + 1);
        mv.rotation = if r > 2 * ROTATION_MAXIMUM {
            0
        } else {
            crate::constants::clamp_i32(r, -ROTATION_MAXIMUM, ROTATION_MAXIMUM)
        };
    }
    if touches(Attr::Thrust) {
        let r = rng.range(-THRUST_MAXIMUM / 2, 2 * THRUST_MAXIMUM + 1);
        mv.thrust = crate::constants::clamp_i32(r, 0, THRUST_MAXIMUM);
    }
    if touches(Attr::Shield) {
        if !modify_all || rng.chance(4) {
            mv.use_shield = !mv.use_shield;
        }
    }
    if touches(Attr::Boost) {
        if !modify_all || rng.chance(4) {
            mv.use_boost = !mv.use_boost;
        }
    }
}

fn shift_by_one_turn(rng: &mut Rng, plan: &mut Plan) {
    for t in 1..SIMULATION_HORIZON {
        plan.turns[t - 1] = plan.turns[t];
    }
    let fresh: &mut Turn = &mut plan.turns[SIMULATION_HORIZON - 1];
    for mv in fresh.iter_mut() {
        randomize(rng, mv, true);
    }
}

fn mutate(rng: &mut Rng, plan: &mut Plan) {
    let k = rng.range(0, 2 * SIMULATION_HORIZON as i32) as usize;
    let (turn_idx, pod_idx) = (k / 2, k % 2);
    randomize(rng, &mut plan.turns[turn_idx][pod_idx], false);
}

fn opening_boost_required(track: &Track) -> bool {
    let d = track.checkpoint(0).distance(track.checkpoint(1));
    d * d > BOOST_DISTANCE_SQUARED_THRESHOLD
}
