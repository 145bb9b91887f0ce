//! Host tick frames
//!
//! The browser page runs the physics and hands us one JSON document per
//! animation frame describing where everything is. Field names follow the
//! page's camelCase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::FieldGeometry;
use super::holder::{GoalId, MobileGoal, Stake, StakeKind};
use super::ring::RingStack;
use super::state::MatchState;
use crate::error::ScoreError;

/// A mobile goal as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalFrame {
    #[serde(default)]
    pub id: Option<GoalId>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub rings: RingStack,
}

impl From<GoalFrame> for MobileGoal {
    fn from(frame: GoalFrame) -> Self {
        MobileGoal {
            id: frame.id,
            pos: Vec2::new(frame.x, frame.y),
            stack: frame.rings,
        }
    }
}

/// A fixed post as reported by the host; only stake positions score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarFrame {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub rings: RingStack,
}

/// One host tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostFrame {
    pub countdown_seconds: Option<u32>,
    pub red_disqualified: bool,
    pub blue_disqualified: bool,
    pub mobile_goals: Vec<GoalFrame>,
    pub attached_mobile_goal: Option<GoalFrame>,
    pub pillars: Vec<PillarFrame>,
}

impl HostFrame {
    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        serde_json::from_str(json).map_err(|e| ScoreError::Frame(e.to_string()))
    }
}

impl MatchState {
    /// Replace the live world with a host frame. The corner snapshot is kept.
    pub fn apply_frame(&mut self, frame: HostFrame, geometry: &FieldGeometry) {
        self.countdown = frame.countdown_seconds;
        self.red_disqualified = frame.red_disqualified;
        self.blue_disqualified = frame.blue_disqualified;
        self.mobile_goals = frame.mobile_goals.into_iter().map(MobileGoal::from).collect();
        self.attached_goal = frame.attached_mobile_goal.map(MobileGoal::from);
        self.stakes = frame
            .pillars
            .into_iter()
            .filter_map(|p| {
                let pos = Vec2::new(p.x, p.y);
                match StakeKind::classify(pos, geometry) {
                    Some(kind) => Some(Stake {
                        kind,
                        pos,
                        stack: p.rings,
                    }),
                    None => {
                        log::debug!("Ignoring pillar at ({}, {}): not a scoring stake", p.x, p.y);
                        None
                    }
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::holder::Edge;
    use crate::field::ring::Ring;

    const FRAME: &str = r#"{
        "countdownSeconds": 42,
        "blueDisqualified": true,
        "mobileGoals": [
            {"id": 1, "x": 20.0, "y": 700.0, "rings": ["red", "blue"]},
            {"x": 360.0, "y": 360.0}
        ],
        "attachedMobileGoal": {"id": 3, "x": 100.0, "y": 100.0, "rings": ["blue"]},
        "pillars": [
            {"x": 0.0, "y": 360.0, "rings": ["blue", "red"]},
            {"x": 360.0, "y": 0.0, "rings": []},
            {"x": 300.0, "y": 360.0, "rings": ["red"]}
        ]
    }"#;

    #[test]
    fn test_parse_and_apply() {
        let geometry = FieldGeometry::default();
        let frame = HostFrame::from_json(FRAME).unwrap();
        let mut state = MatchState::new(&geometry);
        state.apply_frame(frame, &geometry);

        assert_eq!(state.countdown, Some(42));
        assert!(!state.red_disqualified);
        assert!(state.blue_disqualified);
        assert_eq!(state.mobile_goals.len(), 2);
        assert_eq!(state.mobile_goals[0].id, Some(1));
        assert_eq!(state.mobile_goals[0].stack.rings(), &[Ring::Red, Ring::Blue]);
        assert!(state.mobile_goals[1].stack.is_empty());
        assert_eq!(state.attached_goal.as_ref().and_then(|g| g.id), Some(3));

        // The pillar at x=300 is a neutral post
        assert_eq!(state.stakes.len(), 2);
        assert_eq!(state.stakes[0].kind, StakeKind::Alliance(Edge::Left));
        assert_eq!(state.stakes[1].kind, StakeKind::Wall(Edge::Top));
    }

    #[test]
    fn test_apply_keeps_snapshot() {
        let geometry = FieldGeometry::default();
        let mut state = MatchState::new(&geometry);
        state.countdown = Some(30);
        state
            .mobile_goals
            .push(MobileGoal::new(Vec2::new(20.0, 700.0)));
        state.snapshot.capture(state.mobile_goals.iter(), &geometry);

        state.apply_frame(HostFrame::from_json(FRAME).unwrap(), &geometry);
        assert!(state.snapshot.is_captured());
        assert_eq!(state.snapshot.entries().len(), 1);
    }

    #[test]
    fn test_empty_frame_defaults() {
        let frame = HostFrame::from_json("{}").unwrap();
        assert_eq!(frame, HostFrame::default());
        assert_eq!(frame.countdown_seconds, None);
    }

    #[test]
    fn test_rejects_unknown_colour() {
        let json = r#"{"mobileGoals": [{"x": 1.0, "y": 1.0, "rings": ["green"]}]}"#;
        assert!(matches!(HostFrame::from_json(json), Err(ScoreError::Frame(_))));
    }

    #[test]
    fn test_rejects_overfull_stack() {
        let json = r#"{"pillars": [{"x": 0.0, "y": 360.0,
            "rings": ["red","red","red","red","red","red","red"]}]}"#;
        let err = HostFrame::from_json(json).unwrap_err();
        assert!(err.to_string().contains("full"));
    }
}
