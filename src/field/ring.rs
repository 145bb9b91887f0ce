//! Rings and ring stacks

use serde::{Deserialize, Serialize};

use crate::consts::RING_STACK_CAPACITY;
use crate::error::ScoreError;

/// Ring colour. Serialized lowercase (`"red"` / `"blue"`); any other tag is
/// rejected when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ring {
    Red,
    Blue,
}

/// Which way a stack fills its display slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillDirection {
    /// First ring sits in the bottom slot
    #[default]
    BottomUp,
    /// First ring sits in the top slot (top wall stake)
    TopDown,
}

/// Rings on a holder, bottom (oldest) first. Never longer than
/// `RING_STACK_CAPACITY`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RingStack {
    rings: Vec<Ring>,
}

impl RingStack {
    pub fn new() -> Self {
        Self {
            rings: Vec::with_capacity(RING_STACK_CAPACITY),
        }
    }

    /// Build a stack from bottom-to-top rings
    pub fn from_rings(rings: impl IntoIterator<Item = Ring>) -> Result<Self, ScoreError> {
        let mut stack = Self::new();
        for ring in rings {
            stack.push(ring)?;
        }
        Ok(stack)
    }

    /// Place a ring on top. Fails without modifying the stack when full.
    pub fn push(&mut self, ring: Ring) -> Result<(), ScoreError> {
        if self.is_full() {
            return Err(ScoreError::StackFull {
                capacity: RING_STACK_CAPACITY,
            });
        }
        self.rings.push(ring);
        Ok(())
    }

    pub fn top(&self) -> Option<Ring> {
        self.rings.last().copied()
    }

    /// Rings below the top, bottom first
    pub fn below_top(&self) -> &[Ring] {
        match self.rings.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rings.len() >= RING_STACK_CAPACITY
    }

    /// Slot contents for the stack indicator, top of screen first.
    ///
    /// Bottom-up stacks put the first ring in the lowest slot; top-down
    /// stacks put it in the highest.
    pub fn screen_slots(&self, direction: FillDirection, slot_count: usize) -> Vec<Option<Ring>> {
        let slot = |i: usize| self.rings.get(i).copied();
        match direction {
            FillDirection::TopDown => (0..slot_count).map(slot).collect(),
            FillDirection::BottomUp => (0..slot_count).rev().map(slot).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for RingStack {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rings = Vec::<Ring>::deserialize(deserializer)?;
        RingStack::from_rings(rings).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut stack = RingStack::new();
        for _ in 0..RING_STACK_CAPACITY {
            stack.push(Ring::Red).unwrap();
        }
        assert!(stack.is_full());
        assert_eq!(
            stack.push(Ring::Blue),
            Err(ScoreError::StackFull {
                capacity: RING_STACK_CAPACITY
            })
        );
        assert_eq!(stack.len(), RING_STACK_CAPACITY);
        assert_eq!(stack.top(), Some(Ring::Red));
    }

    #[test]
    fn test_top_and_below() {
        let stack = RingStack::from_rings([Ring::Red, Ring::Red, Ring::Blue]).unwrap();
        assert_eq!(stack.top(), Some(Ring::Blue));
        assert_eq!(stack.below_top(), &[Ring::Red, Ring::Red]);

        let empty = RingStack::new();
        assert_eq!(empty.top(), None);
        assert!(empty.below_top().is_empty());
    }

    #[test]
    fn test_screen_slots() {
        let stack = RingStack::from_rings([Ring::Red, Ring::Blue]).unwrap();
        assert_eq!(
            stack.screen_slots(FillDirection::BottomUp, 4),
            vec![None, None, Some(Ring::Blue), Some(Ring::Red)]
        );
        assert_eq!(
            stack.screen_slots(FillDirection::TopDown, 4),
            vec![Some(Ring::Red), Some(Ring::Blue), None, None]
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_colour() {
        let stack: RingStack = serde_json::from_str(r#"["red","blue"]"#).unwrap();
        assert_eq!(stack.rings(), &[Ring::Red, Ring::Blue]);
        assert!(serde_json::from_str::<RingStack>(r#"["red","green"]"#).is_err());
    }

    #[test]
    fn test_deserialize_rejects_overfull() {
        let json = r#"["red","red","red","red","red","red","blue"]"#;
        let err = serde_json::from_str::<RingStack>(json).unwrap_err();
        assert!(err.to_string().contains("full"));
    }
}
