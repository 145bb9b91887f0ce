//! Match scoring
//!
//! Each ring scores 1 point for its colour, the top ring of a stack 3. Mobile
//! goals are scaled by a corner multiplier:
//!
//! | Phase | Bottom corner | Top corner | Elsewhere |
//! |---|---|---|---|
//! | no clock, or >= 30s left | 2 | -2 | 1 |
//! | < 30s left | 2 if in the 30s snapshot, else 1 | 1 | 1 |
//!
//! Stakes always score at 1. Totals are clamped at zero, then a DQ flag
//! replaces the displayed value.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::FieldGeometry;
use super::holder::{MobileGoal, RingHolder};
use super::ring::{Ring, RingStack};
use super::state::{Alliance, CornerSnapshot, MatchState};
use crate::consts::*;

/// Signed per-colour points from one or more stacks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackScore {
    pub red: i32,
    pub blue: i32,
}

impl StackScore {
    fn add(&mut self, ring: Ring, points: i32) {
        match ring {
            Ring::Red => self.red += points,
            Ring::Blue => self.blue += points,
        }
    }
}

impl std::ops::AddAssign for StackScore {
    fn add_assign(&mut self, rhs: Self) {
        self.red += rhs.red;
        self.blue += rhs.blue;
    }
}

/// Score one stack at a multiplier (may be negative)
pub fn score_stack(stack: &RingStack, multiplier: i32) -> StackScore {
    let mut score = StackScore::default();
    for &ring in stack.below_top() {
        score.add(ring, RING_POINTS * multiplier);
    }
    if let Some(top) = stack.top() {
        score.add(top, TOP_RING_POINTS * multiplier);
    }
    score
}

/// A displayed alliance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreValue {
    Points(u32),
    Disqualified,
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreValue::Points(p) => write!(f, "{p}"),
            ScoreValue::Disqualified => f.write_str("DQ"),
        }
    }
}

/// Result of one scoring pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub red: ScoreValue,
    pub blue: ScoreValue,
    /// Clamped red total, computed even when red is disqualified
    pub red_points: u32,
    /// Clamped blue total, computed even when blue is disqualified
    pub blue_points: u32,
}

impl Scoreboard {
    pub fn value(&self, alliance: Alliance) -> ScoreValue {
        match alliance {
            Alliance::Red => self.red,
            Alliance::Blue => self.blue,
        }
    }
}

/// Tunable parts of the scoring rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub geometry: FieldGeometry,
    /// Countdown second at which the snapshot is taken and the late phase begins
    pub late_phase_secs: u32,
    /// Per-axis tolerance when matching goals to the snapshot by position
    pub snapshot_epsilon: f32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            geometry: FieldGeometry::default(),
            late_phase_secs: LATE_PHASE_SECS,
            snapshot_epsilon: SNAPSHOT_EPSILON,
        }
    }
}

impl ScoringRules {
    /// Late phase: clock running with less than `late_phase_secs` left
    pub fn is_late_phase(&self, countdown: Option<u32>) -> bool {
        countdown.is_some_and(|t| t < self.late_phase_secs)
    }

    /// Multiplier for a mobile goal at its current position
    pub fn corner_multiplier(
        &self,
        goal: &MobileGoal,
        countdown: Option<u32>,
        snapshot: &CornerSnapshot,
    ) -> i32 {
        let pos = goal.position();
        let in_positive = self.geometry.in_positive_corner(pos);

        if self.is_late_phase(countdown) {
            if in_positive && snapshot.contains(goal, self.snapshot_epsilon) {
                POSITIVE_CORNER_MULTIPLIER
            } else {
                1
            }
        } else if in_positive {
            POSITIVE_CORNER_MULTIPLIER
        } else if self.geometry.in_negative_corner(pos) {
            NEGATIVE_CORNER_MULTIPLIER
        } else {
            1
        }
    }
}

/// Computes the two displayed scores from a match state
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rules: ScoringRules,
}

impl ScoringEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Take the corner snapshot if the clock sits exactly on the late-phase
    /// mark and none has been taken this match.
    pub fn capture_snapshot(&self, state: &mut MatchState) -> bool {
        if state.countdown != Some(self.rules.late_phase_secs) {
            return false;
        }
        let MatchState {
            mobile_goals,
            attached_goal,
            snapshot,
            ..
        } = state;
        let captured = snapshot.capture(
            mobile_goals.iter().chain(attached_goal.iter()),
            &self.rules.geometry,
        );
        if captured {
            log::info!(
                "Corner snapshot at {}s: {} goal(s) hold the bonus",
                self.rules.late_phase_secs,
                snapshot.entries().len()
            );
        }
        captured
    }

    /// Raw signed totals before clamping
    pub fn tally(&self, state: &MatchState) -> StackScore {
        let mut total = StackScore::default();
        for goal in state.all_goals() {
            let mult = self
                .rules
                .corner_multiplier(goal, state.countdown, &state.snapshot);
            total += score_stack(goal.stack(), mult);
        }
        for stake in &state.stakes {
            total += score_stack(stake.stack(), 1);
        }
        total
    }

    /// Score a tick. The only mutation is the one-time corner snapshot.
    pub fn compute_scores(&self, state: &mut MatchState) -> Scoreboard {
        self.capture_snapshot(state);

        let total = self.tally(state);
        let red_points = total.red.max(0) as u32;
        let blue_points = total.blue.max(0) as u32;

        let display = |dq: bool, points: u32| {
            if dq {
                ScoreValue::Disqualified
            } else {
                ScoreValue::Points(points)
            }
        };

        Scoreboard {
            red: display(state.red_disqualified, red_points),
            blue: display(state.blue_disqualified, blue_points),
            red_points,
            blue_points,
        }
    }
}
