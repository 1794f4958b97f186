//! Per-turn input ingestion, timer selection, output formatting and cooldown
//! bookkeeping. See SPEC_FULL.md §4.3, §4.6 (Emission), §5, §6.

use std::io::{BufRead, Write};
use std::time::Duration;

use tracing::{error, info, warn};

use crate::constants::{
    TARGET_PROJECTION_DISTANCE, TIMEOUT_FIRST_TURN_MS, TIMEOUT_MS, TIMEOUT_SAFETY_FACTOR,
};
use crate::error::{DriverError, Result};
use crate::geometry::Vec2;
use crate::physics::World;
use crate::pod::{Move, Pod};
use crate::solver::Solver;
use crate::track::Track;

/// Drives the turn loop until the input channel closes.
pub struct Driver<R, W> {
    reader: R,
    writer: W,
    track: Track,
    pods: World,
    solver: Solver,
    turn: u32,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    /// Reads the track header and constructs the driver, ready to run turns.
    pub fn new(mut reader: R, writer: W) -> Result<Self> {
        let track = read_track(&mut reader)?;
        info!(
            laps = track.laps(),
            checkpoints = track.checkpoint_count(),
            max_checkpoints = track.max_checkpoints(),
            "track loaded"
        );
        let solver = Solver::new(&track);
        Ok(Self {
            reader,
            writer,
            track,
            pods: [Pod::new(), Pod::new(), Pod::new(), Pod::new()],
            solver,
            turn: 0,
        })
    }

    /// Runs turns until the input channel reports end-of-file.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.run_turn() {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(err) => {
                    error!(error = %err, turn = self.turn, "fatal input error");
                    return Err(err);
                }
            }
        }
    }

    /// Runs one turn. Returns `Ok(false)` on clean end-of-input.
    fn run_turn(&mut self) -> Result<bool> {
        for i in 0..4 {
            match read_pod_line(&mut self.reader, self.turn)? {
                Some((position, velocity, angle, next_checkpoint_id)) => {
                    let angle = if self.turn == 0 {
                        override_angle(position, self.track.first_checkpoint())
                    } else {
                        angle
                    };
                    self.pods[i].update_from_input(position, velocity, angle, next_checkpoint_id);
                }
                None => {
                    if i == 0 {
                        return Ok(false);
                    }
                    return Err(DriverError::UnexpectedEof { context: "pod line" });
                }
            }
        }

        let nominal_budget = if self.turn == 0 { TIMEOUT_FIRST_TURN_MS } else { TIMEOUT_MS };
        let budget_ms = (nominal_budget as f64 * TIMEOUT_SAFETY_FACTOR) as u64;
        let deadline = Duration::from_millis(budget_ms);

        let plan = self.solver.solve(&self.pods, &self.track, deadline);
        if plan.score == i64::MIN {
            warn!(turn = self.turn, "solver found no winning continuation within budget");
        }

        for i in 0..2 {
            let mv = plan.turns[0][i];
            let line = format_move(&self.pods[i], &mv);
            writeln!(self.writer, "{line}")?;
            self.pods[i].apply_move_flags(&mv);
        }
        self.writer.flush()?;

        info!(turn = self.turn, "turn emitted");
        self.turn += 1;
        Ok(true)
    }
}

fn read_track<R: BufRead>(reader: &mut R) -> Result<Track> {
    let laps = read_ints_line(reader, "laps", 0, 1)?[0] as u32;
    let checkpoint_count = read_ints_line(reader, "checkpoint count", 0, 1)?[0] as usize;
    let mut checkpoints = Vec::with_capacity(checkpoint_count);
    for idx in 0..checkpoint_count {
        let xy = read_ints_line(reader, "checkpoint", idx as u32, 2)?;
        checkpoints.push(Vec2::new(xy[0] as f64, xy[1] as f64));
    }
    Ok(Track::new(checkpoints, laps))
}

type PodLine = (Vec2, Vec2, i32, usize);

fn read_pod_line<R: BufRead>(reader: &mut R, turn: u32) -> Result<Option<PodLine>> {
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .map_err(|source| DriverError::Input { source })?;
    if bytes == 0 {
        return Ok(None);
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 6 {
        return Err(DriverError::WrongTokenCount {
            expected: 6,
            actual: tokens.len(),
            context: "pod line",
            turn,
        });
    }
    let parse = |idx: usize| -> Result<i32> {
        tokens[idx].parse::<i32>().map_err(|_| DriverError::MalformedToken {
            token: tokens[idx].to_string(),
            context: "pod line",
            turn,
        })
    };
    let x = parse(0)?;
    let y = parse(1)?;
    let vx = parse(2)?;
    let vy = parse(3)?;
    let angle = parse(4)?;
    let next_checkpoint_id = parse(5)?;
    Ok(Some((
        Vec2::new(x as f64, y as f64),
        Vec2::new(vx as f64, vy as f64),
        angle,
        next_checkpoint_id.max(0) as usize,
    )))
}

fn read_ints_line<R: BufRead>(
    reader: &mut R,
    context: &'static str,
    turn: u32,
    expected: usize,
) -> Result<Vec<i32>> {
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .map_err(|source| DriverError::Input { source })?;
    if bytes == 0 {
        return Err(DriverError::UnexpectedEof { context });
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(DriverError::WrongTokenCount {
            expected,
            actual: tokens.len(),
            context,
            turn,
        });
    }
    tokens
        .iter()
        .map(|t| {
            t.parse::<i32>().map_err(|_| DriverError::MalformedToken {
                token: t.to_string(),
                context,
                turn,
            })
        })
        .collect()
}

/// Makes a pod face its target on the very first turn, before any move has
/// been computed. See SPEC_FULL.md §4.3.
fn override_angle(position: Vec2, target: Vec2) -> i32 {
    let dir = (target - position).normalized();
    let mut angle_deg = dir.x.acos().to_degrees();
    if dir.y < 0.0 {
        angle_deg = 360.0 - angle_deg;
    }
    angle_deg.round() as i32
}

/// Formats one pod's move as the output protocol line. See SPEC_FULL.md §4.6
/// Emission.
fn format_move(pod: &Pod, mv: &Move) -> String {
    let effective_angle = ((pod.angle + mv.rotation).rem_euclid(360)) as f64;
    let angle_rad = effective_angle.to_radians();
    let direction = Vec2::new(angle_rad.cos(), angle_rad.sin());
    let target = (pod.position + direction * TARGET_PROJECTION_DISTANCE).round();

    if mv.use_shield {
        format!("{} {} SHIELD SHIELD", target.x as i64, target.y as i64)
    } else if mv.use_boost && pod.boost_available {
        format!("{} {} BOOST BOOST", target.x as i64, target.y as i64)
    } else {
        format!("{} {} {} {}", target.x as i64, target.y as i64, mv.thrust, mv.thrust)
    }
}
