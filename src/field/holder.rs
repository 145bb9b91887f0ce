//! Ring holders: mobile goals and fixed stakes

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::FieldGeometry;
use super::ring::{FillDirection, RingStack};

/// Anything that carries a ring stack at a field position
pub trait RingHolder {
    fn position(&self) -> Vec2;
    fn stack(&self) -> &RingStack;
}

/// Stable mobile goal identifier assigned by the host
pub type GoalId = u32;

/// A movable goal ("mogo")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileGoal {
    /// Host-assigned id, if the host tracks goals by identity
    #[serde(default)]
    pub id: Option<GoalId>,
    pub pos: Vec2,
    pub stack: RingStack,
}

impl MobileGoal {
    pub fn new(pos: Vec2) -> Self {
        Self {
            id: None,
            pos,
            stack: RingStack::new(),
        }
    }

    pub fn with_id(id: GoalId, pos: Vec2) -> Self {
        Self {
            id: Some(id),
            ..Self::new(pos)
        }
    }

    pub fn with_stack(mut self, stack: RingStack) -> Self {
        self.stack = stack;
        self
    }
}

impl RingHolder for MobileGoal {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn stack(&self) -> &RingStack {
        &self.stack
    }
}

/// Field edge a fixed stake sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Fixed stake type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeKind {
    /// Left or right edge midpoint
    Alliance(Edge),
    /// Top or bottom edge midpoint
    Wall(Edge),
}

impl StakeKind {
    /// Identify a stake by exact coordinate match against the fixed stake
    /// positions. Anything else (neutral posts, stray pillars) is `None`.
    pub fn classify(pos: Vec2, geometry: &FieldGeometry) -> Option<Self> {
        let [left, right] = geometry.alliance_stake_positions();
        let [top, bottom] = geometry.wall_stake_positions();
        if pos == left {
            Some(StakeKind::Alliance(Edge::Left))
        } else if pos == right {
            Some(StakeKind::Alliance(Edge::Right))
        } else if pos == top {
            Some(StakeKind::Wall(Edge::Top))
        } else if pos == bottom {
            Some(StakeKind::Wall(Edge::Bottom))
        } else {
            None
        }
    }
}

/// A fixed stake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stake {
    pub kind: StakeKind,
    pub pos: Vec2,
    pub stack: RingStack,
}

impl Stake {
    /// Build a stake at its fixed position for this field
    pub fn at(kind: StakeKind, geometry: &FieldGeometry) -> Self {
        let [left, right] = geometry.alliance_stake_positions();
        let [top, bottom] = geometry.wall_stake_positions();
        let pos = match kind {
            StakeKind::Alliance(Edge::Left) => left,
            StakeKind::Alliance(_) => right,
            StakeKind::Wall(Edge::Top) => top,
            StakeKind::Wall(_) => bottom,
        };
        Self {
            kind,
            pos,
            stack: RingStack::new(),
        }
    }

    /// All four stakes of a field, empty
    pub fn field_set(geometry: &FieldGeometry) -> Vec<Stake> {
        [
            StakeKind::Alliance(Edge::Left),
            StakeKind::Alliance(Edge::Right),
            StakeKind::Wall(Edge::Top),
            StakeKind::Wall(Edge::Bottom),
        ]
        .into_iter()
        .map(|kind| Stake::at(kind, geometry))
        .collect()
    }

    /// Display fill direction: the top wall stake hangs its rings downward
    pub fn fill_direction(&self) -> FillDirection {
        match self.kind {
            StakeKind::Wall(Edge::Top) => FillDirection::TopDown,
            _ => FillDirection::BottomUp,
        }
    }
}

impl RingHolder for Stake {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn stack(&self) -> &RingStack {
        &self.stack
    }
}
