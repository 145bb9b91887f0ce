//! Field model and scoring engine
//!
//! Pure with respect to its inputs:
//! - The host (physics page or demo driver) owns and mutates `MatchState`
//! - Scoring reads it once per tick and writes only the corner snapshot
//! - No rendering or platform dependencies

pub mod frame;
pub mod geometry;
pub mod holder;
pub mod ring;
pub mod scoring;
pub mod state;

pub use frame::{GoalFrame, HostFrame, PillarFrame};
pub use geometry::{Corner, FieldGeometry};
pub use holder::{Edge, GoalId, MobileGoal, RingHolder, Stake, StakeKind};
pub use ring::{FillDirection, Ring, RingStack};
pub use scoring::{ScoreValue, Scoreboard, ScoringEngine, ScoringRules, StackScore, score_stack};
pub use state::{Alliance, CornerSnapshot, MatchClock, MatchState, SnapshotEntry};
