//! Match state: world snapshot, DQ flags, the 30-second corner snapshot and
//! the match clock.
//!
//! The host owns `MatchState` and overwrites the live world every tick. Only
//! the corner snapshot persists across ticks, and only within one match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::FieldGeometry;
use super::holder::{GoalId, MobileGoal, RingHolder, Stake};
use crate::consts::MATCH_DURATION_SECS;
use crate::error::ScoreError;

/// The two alliances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alliance::Red => "red",
            Alliance::Blue => "blue",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ScoreError> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(Alliance::Red),
            "blue" => Ok(Alliance::Blue),
            _ => Err(ScoreError::UnknownAlliance(s.to_string())),
        }
    }
}

/// A goal recorded in the corner snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: Option<GoalId>,
    pub pos: Vec2,
}

impl SnapshotEntry {
    /// Same goal: by id when both sides have one, else by per-axis proximity
    pub fn matches(&self, goal: &MobileGoal, epsilon: f32) -> bool {
        match (self.id, goal.id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                let d = (self.pos - goal.pos).abs();
                d.x < epsilon && d.y < epsilon
            }
        }
    }
}

/// Mobile goals sitting in a positive corner at the 30-second mark.
/// Written once per match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerSnapshot {
    captured: bool,
    entries: Vec<SnapshotEntry>,
}

impl CornerSnapshot {
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Record every goal currently in a positive corner. Returns false (and
    /// changes nothing) if this match already has a snapshot.
    pub fn capture<'a>(
        &mut self,
        goals: impl IntoIterator<Item = &'a MobileGoal>,
        geometry: &FieldGeometry,
    ) -> bool {
        if self.captured {
            return false;
        }
        self.entries = goals
            .into_iter()
            .filter(|g| geometry.in_positive_corner(g.position()))
            .map(|g| SnapshotEntry {
                id: g.id,
                pos: g.pos,
            })
            .collect();
        self.captured = true;
        true
    }

    pub fn contains(&self, goal: &MobileGoal, epsilon: f32) -> bool {
        self.entries.iter().any(|e| e.matches(goal, epsilon))
    }

    pub fn clear(&mut self) {
        self.captured = false;
        self.entries.clear();
    }
}

/// Everything the scoring engine reads for one tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchState {
    /// Whole seconds remaining; `None` when no match clock is running
    pub countdown: Option<u32>,
    pub red_disqualified: bool,
    pub blue_disqualified: bool,
    /// Goals resting on the field
    pub mobile_goals: Vec<MobileGoal>,
    /// Goal currently held by the robot
    pub attached_goal: Option<MobileGoal>,
    /// Alliance and wall stakes
    pub stakes: Vec<Stake>,
    pub snapshot: CornerSnapshot,
}

impl MatchState {
    /// Empty field with the four stakes in place
    pub fn new(geometry: &FieldGeometry) -> Self {
        Self {
            stakes: Stake::field_set(geometry),
            ..Default::default()
        }
    }

    /// Begin a new match: reset clock value, DQ flags and the corner snapshot
    pub fn start_match(&mut self, duration_secs: u32) {
        self.countdown = Some(duration_secs);
        self.red_disqualified = false;
        self.blue_disqualified = false;
        self.snapshot.clear();
    }

    pub fn is_disqualified(&self, alliance: Alliance) -> bool {
        match alliance {
            Alliance::Red => self.red_disqualified,
            Alliance::Blue => self.blue_disqualified,
        }
    }

    pub fn set_disqualified(&mut self, alliance: Alliance, dq: bool) {
        match alliance {
            Alliance::Red => self.red_disqualified = dq,
            Alliance::Blue => self.blue_disqualified = dq,
        }
    }

    /// All mobile goals, the attached one last
    pub fn all_goals(&self) -> impl Iterator<Item = &MobileGoal> {
        self.mobile_goals.iter().chain(self.attached_goal.iter())
    }

    /// Robot picks up the goal at `index` (drops any goal it already holds)
    pub fn attach_goal(&mut self, index: usize) -> bool {
        if index >= self.mobile_goals.len() {
            return false;
        }
        let goal = self.mobile_goals.remove(index);
        if let Some(previous) = self.attached_goal.replace(goal) {
            self.mobile_goals.push(previous);
        }
        true
    }

    /// Robot releases its goal where it stands
    pub fn detach_goal(&mut self) -> bool {
        match self.attached_goal.take() {
            Some(goal) => {
                self.mobile_goals.push(goal);
                true
            }
            None => false,
        }
    }
}

/// Match countdown timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchClock {
    duration_secs: u32,
    elapsed: f32,
    running: bool,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new(MATCH_DURATION_SECS)
    }
}

impl MatchClock {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            elapsed: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Advance by `dt` seconds and return whole seconds remaining
    pub fn advance(&mut self, dt: f32) -> Option<u32> {
        if self.running {
            self.elapsed += dt.max(0.0);
        }
        self.remaining()
    }

    /// Whole seconds remaining (rounded up), `None` before `start`
    pub fn remaining(&self) -> Option<u32> {
        if !self.running {
            return None;
        }
        let left = (self.duration_secs as f32 - self.elapsed).max(0.0);
        Some(left.ceil() as u32)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> FieldGeometry {
        FieldGeometry::new(100.0, 20.0)
    }

    #[test]
    fn test_snapshot_captures_positive_corners_once() {
        let g = geometry();
        let in_corner = MobileGoal::new(Vec2::new(5.0, 95.0));
        let elsewhere = MobileGoal::new(Vec2::new(50.0, 50.0));
        let mut snapshot = CornerSnapshot::default();

        assert!(snapshot.capture([&in_corner, &elsewhere], &g));
        assert_eq!(snapshot.entries().len(), 1);

        // A second capture in the same match is ignored
        let late = MobileGoal::new(Vec2::new(95.0, 95.0));
        assert!(!snapshot.capture([&in_corner, &late], &g));
        assert_eq!(snapshot.entries().len(), 1);
        assert!(!snapshot.contains(&late, 1.0));

        snapshot.clear();
        assert!(!snapshot.is_captured());
        assert!(snapshot.entries().is_empty());
    }

    #[test]
    fn test_snapshot_matching_by_position_and_id() {
        let g = geometry();
        let goal = MobileGoal::new(Vec2::new(5.0, 95.0));
        let mut snapshot = CornerSnapshot::default();
        snapshot.capture([&goal], &g);

        assert!(snapshot.contains(&MobileGoal::new(Vec2::new(5.5, 94.5)), 1.0));
        assert!(!snapshot.contains(&MobileGoal::new(Vec2::new(6.5, 95.0)), 1.0));

        let tracked = MobileGoal::with_id(7, Vec2::new(5.0, 95.0));
        let mut by_id = CornerSnapshot::default();
        by_id.capture([&tracked], &g);
        // Same id far away still matches; a different id on the same spot does not
        assert!(by_id.contains(&MobileGoal::with_id(7, Vec2::new(10.0, 90.0)), 1.0));
        assert!(!by_id.contains(&MobileGoal::with_id(8, Vec2::new(5.0, 95.0)), 1.0));
    }

    #[test]
    fn test_attach_and_detach() {
        let mut state = MatchState::new(&geometry());
        state.mobile_goals.push(MobileGoal::with_id(1, Vec2::ZERO));
        state.mobile_goals.push(MobileGoal::with_id(2, Vec2::ONE));

        assert!(state.attach_goal(0));
        assert_eq!(state.attached_goal.as_ref().and_then(|g| g.id), Some(1));
        assert_eq!(state.mobile_goals.len(), 1);
        assert_eq!(state.all_goals().count(), 2);

        // Picking up another goal drops the first
        assert!(state.attach_goal(0));
        assert_eq!(state.attached_goal.as_ref().and_then(|g| g.id), Some(2));
        assert_eq!(state.mobile_goals[0].id, Some(1));

        assert!(state.detach_goal());
        assert!(!state.detach_goal());
        assert_eq!(state.mobile_goals.len(), 2);
        assert!(!state.attach_goal(5));
    }

    #[test]
    fn test_start_match_resets() {
        let g = geometry();
        let mut state = MatchState::new(&g);
        state.red_disqualified = true;
        state.snapshot.capture(std::iter::empty::<&MobileGoal>(), &g);
        state.start_match(60);
        assert_eq!(state.countdown, Some(60));
        assert!(!state.is_disqualified(Alliance::Red));
        assert!(!state.snapshot.is_captured());
        assert_eq!(state.stakes.len(), 4);
    }

    #[test]
    fn test_alliance_parse() {
        assert_eq!(Alliance::parse("Red"), Ok(Alliance::Red));
        assert_eq!(Alliance::parse(" blue "), Ok(Alliance::Blue));
        assert!(Alliance::parse("green").is_err());
        assert_eq!(Alliance::parse(Alliance::Blue.as_str()), Ok(Alliance::Blue));
    }

    #[test]
    fn test_clock_counts_down() {
        let mut clock = MatchClock::new(60);
        assert_eq!(clock.remaining(), None);
        assert_eq!(clock.advance(1.0), None);

        clock.start();
        assert_eq!(clock.remaining(), Some(60));
        assert_eq!(clock.advance(0.5), Some(60));
        assert_eq!(clock.advance(0.5), Some(59));
        assert_eq!(clock.advance(29.0), Some(30));
        assert_eq!(clock.advance(100.0), Some(0));
        assert!(clock.is_finished());
    }
}
