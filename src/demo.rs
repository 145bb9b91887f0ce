//! Seeded demo match
//!
//! Stands in for the physics page when running natively: goals wander, rings
//! land on random holders, the robot picks up and drops goals, and the clock
//! runs down one second per step. Same seed, same match.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::ScoreError;
use crate::field::{
    FieldGeometry, MatchClock, MatchState, MobileGoal, Ring, RingStack, Scoreboard, ScoringEngine,
};
use crate::settings::Settings;

/// Goals on the field at the start of a demo
pub const DEMO_GOAL_COUNT: u32 = 4;
/// Max distance a resting goal drifts per second (inches)
const GOAL_DRIFT_INCHES: f32 = 6.0;
/// Max distance the robot carries its goal per second (inches)
const ROBOT_STRIDE_INCHES: f32 = 24.0;
/// Chance per second that a ring gets scored
const RING_CHANCE: f64 = 0.7;
/// Chance per second that the robot picks up or drops a goal
const SWAP_CHANCE: f64 = 0.15;

/// A self-driving match
#[derive(Debug, Clone)]
pub struct DemoMatch {
    pub state: MatchState,
    engine: ScoringEngine,
    clock: MatchClock,
    geometry: FieldGeometry,
    /// Canvas units per inch for this field
    scale: f32,
    rng: Pcg32,
    last: Option<Scoreboard>,
}

impl DemoMatch {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let geometry = settings.geometry();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = MatchState::new(&geometry);

        for id in 1..=DEMO_GOAL_COUNT {
            let pos = Vec2::new(
                rng.random_range(0.0..geometry.size),
                rng.random_range(0.0..geometry.size),
            );
            state.mobile_goals.push(MobileGoal::with_id(id, pos));
        }

        let mut clock = MatchClock::new(settings.match_duration_secs);
        clock.start();
        state.start_match(settings.match_duration_secs);

        Self {
            state,
            engine: ScoringEngine::new(settings.rules()),
            clock,
            geometry,
            scale: settings.pixels_per_inch,
            rng,
            last: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    /// Seconds remaining
    pub fn countdown(&self) -> Option<u32> {
        self.state.countdown
    }

    /// Advance one second of match time and score it. `None` once the clock
    /// has run out.
    pub fn step(&mut self) -> Option<Scoreboard> {
        if self.is_finished() {
            return None;
        }
        self.state.countdown = self.clock.advance(1.0);

        self.move_goals();
        if self.rng.random_bool(SWAP_CHANCE) {
            self.swap_attached_goal();
        }
        if self.rng.random_bool(RING_CHANCE) {
            if let Err(e) = self.score_random_ring() {
                log::debug!("Ring bounced off: {}", e);
            }
        }

        let board = self.engine.compute_scores(&mut self.state);
        if self.last != Some(board) {
            log::info!(
                "[{:>2}s] red {} - blue {}",
                self.state.countdown.unwrap_or(0),
                board.red,
                board.blue
            );
        }
        self.last = Some(board);
        Some(board)
    }

    /// Play to the end and return the final scoreboard
    pub fn run(&mut self) -> Option<Scoreboard> {
        while self.step().is_some() {}
        self.last
    }

    fn move_goals(&mut self) {
        let drift = GOAL_DRIFT_INCHES * self.scale;
        for goal in &mut self.state.mobile_goals {
            let delta = Vec2::new(
                self.rng.random_range(-drift..=drift),
                self.rng.random_range(-drift..=drift),
            );
            goal.pos = self.geometry.clamp(goal.pos + delta);
        }

        let stride = ROBOT_STRIDE_INCHES * self.scale;
        if let Some(goal) = self.state.attached_goal.as_mut() {
            let delta = Vec2::new(
                self.rng.random_range(-stride..=stride),
                self.rng.random_range(-stride..=stride),
            );
            goal.pos = self.geometry.clamp(goal.pos + delta);
        }
    }

    fn swap_attached_goal(&mut self) {
        if self.state.attached_goal.is_some() {
            self.state.detach_goal();
        } else if !self.state.mobile_goals.is_empty() {
            let index = self.rng.random_range(0..self.state.mobile_goals.len());
            self.state.attach_goal(index);
        }
    }

    fn score_random_ring(&mut self) -> Result<(), ScoreError> {
        let ring = if self.rng.random_bool(0.5) {
            Ring::Red
        } else {
            Ring::Blue
        };

        let mut holders: Vec<&mut RingStack> = self
            .state
            .mobile_goals
            .iter_mut()
            .map(|g| &mut g.stack)
            .chain(self.state.attached_goal.iter_mut().map(|g| &mut g.stack))
            .chain(self.state.stakes.iter_mut().map(|s| &mut s.stack))
            .collect();
        if holders.is_empty() {
            return Ok(());
        }
        let index = self.rng.random_range(0..holders.len());
        holders[index].push(ring)
    }
}
