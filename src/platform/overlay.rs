//! Scoreboard overlay state, independent of the browser
//!
//! Holds the settings, the engine and the match state the page drives. The
//! wasm handle forwards to this; native tests drive it directly.

use crate::consts::RING_STACK_CAPACITY;
use crate::error::ScoreError;
use crate::field::{
    Alliance, FieldGeometry, HostFrame, MatchState, Ring, Scoreboard, ScoringEngine,
};
use crate::settings::Settings;

/// Scoring state for one page
#[derive(Debug, Clone)]
pub struct Overlay {
    settings: Settings,
    geometry: FieldGeometry,
    engine: ScoringEngine,
    state: MatchState,
    red_dq: bool,
    blue_dq: bool,
}

impl Overlay {
    pub fn new(settings: Settings) -> Self {
        let geometry = settings.geometry();
        Self {
            engine: ScoringEngine::new(settings.rules()),
            state: MatchState::new(&geometry),
            geometry,
            settings,
            red_dq: false,
            blue_dq: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Reset the corner snapshot and DQ flags for a new match
    pub fn start_match(&mut self) {
        self.state.start_match(self.settings.match_duration_secs);
        self.red_dq = false;
        self.blue_dq = false;
        log::info!("Match started ({}s)", self.settings.match_duration_secs);
    }

    /// Flag or clear a disqualification. Sticks until the next match start,
    /// whatever the host frames say.
    pub fn set_disqualified(&mut self, alliance: Alliance, dq: bool) {
        match alliance {
            Alliance::Red => self.red_dq = dq,
            Alliance::Blue => self.blue_dq = dq,
        }
        log::info!("{} alliance DQ = {}", alliance.as_str(), dq);
    }

    /// Score one host frame
    pub fn update(&mut self, frame_json: &str) -> Result<Scoreboard, ScoreError> {
        let frame = HostFrame::from_json(frame_json)?;
        self.state.apply_frame(frame, &self.geometry);
        self.state.red_disqualified |= self.red_dq;
        self.state.blue_disqualified |= self.blue_dq;
        Ok(self.engine.compute_scores(&mut self.state))
    }

    /// Replace the settings from a JSON document and persist them.
    ///
    /// Invalid documents leave the current settings untouched. A change of
    /// field units drops the live world and the corner snapshot, since
    /// their positions were in the old units.
    pub fn set_settings(&mut self, json: &str) -> Result<(), ScoreError> {
        let settings = Settings::from_json(json)?;
        let geometry = settings.geometry();
        if geometry != self.geometry {
            self.state = MatchState::new(&geometry);
        }
        self.engine = ScoringEngine::new(settings.rules());
        self.geometry = geometry;
        self.settings = settings;
        self.settings.save();
        log::info!("Settings updated");
        Ok(())
    }

    /// Stack indicator for the stake at `index` in the last frame, top of
    /// screen first
    pub fn stake_slots(&self, index: usize) -> Result<Vec<Option<Ring>>, ScoreError> {
        let stake = self
            .state
            .stakes
            .get(index)
            .ok_or(ScoreError::UnknownStake(index))?;
        Ok(stake
            .stack
            .screen_slots(stake.fill_direction(), RING_STACK_CAPACITY))
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ScoreValue;

    const PILLARS: &str = r#"{
        "pillars": [
            {"x": 360.0, "y": 0.0, "rings": ["red", "blue"]},
            {"x": 0.0, "y": 360.0, "rings": ["red", "blue"]}
        ]
    }"#;

    #[test]
    fn test_dq_sticks_across_frames() {
        let mut overlay = Overlay::default();
        overlay.start_match();
        overlay.set_disqualified(Alliance::Blue, true);

        let board = overlay.update("{}").unwrap();
        assert_eq!(board.blue, ScoreValue::Disqualified);
        assert_eq!(board.red, ScoreValue::Points(0));

        overlay.start_match();
        let board = overlay.update("{}").unwrap();
        assert_eq!(board.blue, ScoreValue::Points(0));
    }

    #[test]
    fn test_update_rejects_bad_frame() {
        let mut overlay = Overlay::default();
        assert!(matches!(
            overlay.update("{\"mobileGoals\": 3}"),
            Err(ScoreError::Frame(_))
        ));
    }

    #[test]
    fn test_stake_slots_follow_fill_direction() {
        let mut overlay = Overlay::default();
        overlay.update(PILLARS).unwrap();

        let top_wall = overlay.stake_slots(0).unwrap();
        assert_eq!(top_wall.len(), RING_STACK_CAPACITY);
        assert_eq!(&top_wall[..3], &[Some(Ring::Red), Some(Ring::Blue), None]);

        let alliance = overlay.stake_slots(1).unwrap();
        assert_eq!(
            &alliance[RING_STACK_CAPACITY - 3..],
            &[None, Some(Ring::Blue), Some(Ring::Red)]
        );

        assert_eq!(overlay.stake_slots(2), Err(ScoreError::UnknownStake(2)));
    }

    #[test]
    fn test_set_settings_applies_and_validates() {
        let mut overlay = Overlay::default();
        overlay.update(PILLARS).unwrap();

        assert!(matches!(
            overlay.set_settings(r#"{"pixels_per_inch": -1.0}"#),
            Err(ScoreError::InvalidSetting {
                name: "pixels_per_inch",
                ..
            })
        ));
        assert_eq!(overlay.settings(), &Settings::default());
        assert_eq!(overlay.state().stakes.len(), 2);

        overlay
            .set_settings(r#"{"pixels_per_inch": 2.0, "match_duration_secs": 90}"#)
            .unwrap();
        assert_eq!(overlay.settings().match_duration_secs, 90);
        // New units: old pillar positions no longer apply
        assert_eq!(overlay.state().stakes.len(), 4);

        // (144, 0) is the top wall stake at 2 units per inch
        overlay
            .update(r#"{"pillars": [{"x": 144.0, "y": 0.0, "rings": ["blue"]}]}"#)
            .unwrap();
        assert_eq!(overlay.stake_slots(0).unwrap()[0], Some(Ring::Blue));
    }
}
