//! wasm-bindgen surface for the physics page
//!
//! The page keeps running its rigid-body engine in JavaScript and calls
//! `ScoreboardHandle::update` once per animation frame with a JSON frame.

use wasm_bindgen::prelude::*;

use super::overlay::Overlay;
use super::{BLUE_SCORE_ELEMENT, RED_SCORE_ELEMENT};
use crate::error::ScoreError;
use crate::field::{Alliance, Scoreboard};
use crate::settings::Settings;

impl From<ScoreError> for JsValue {
    fn from(err: ScoreError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Scoring state for one page
#[wasm_bindgen]
pub struct ScoreboardHandle {
    overlay: Overlay,
}

#[wasm_bindgen]
impl ScoreboardHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ScoreboardHandle {
        ScoreboardHandle {
            overlay: Overlay::new(Settings::load()),
        }
    }

    /// Reset the corner snapshot and DQ flags for a new match
    #[wasm_bindgen(js_name = startMatch)]
    pub fn start_match(&mut self) {
        self.overlay.start_match();
    }

    /// Match length from settings, for the page's timer
    #[wasm_bindgen(js_name = matchDuration)]
    pub fn match_duration(&self) -> u32 {
        self.overlay.settings().match_duration_secs
    }

    /// Flag or clear a disqualification (`"red"` / `"blue"`)
    #[wasm_bindgen(js_name = setDisqualified)]
    pub fn set_disqualified(&mut self, alliance: &str, dq: bool) -> Result<(), JsValue> {
        self.overlay.set_disqualified(Alliance::parse(alliance)?, dq);
        Ok(())
    }

    /// Replace the settings and store them in LocalStorage
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        self.overlay.set_settings(json)?;
        Ok(())
    }

    /// Current settings as JSON
    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        Ok(self.overlay.settings().to_json()?)
    }

    /// Stack indicator slots for one stake as a JSON array, top of screen
    /// first (`"red"`, `"blue"` or `null`)
    #[wasm_bindgen(js_name = stakeSlots)]
    pub fn stake_slots(&self, index: usize) -> Result<String, JsValue> {
        let slots = self.overlay.stake_slots(index)?;
        serde_json::to_string(&slots).map_err(|e| js_sys::Error::new(&e.to_string()).into())
    }

    /// Score one frame, write both values into the DOM and return them as
    /// `"<red>,<blue>"`
    pub fn update(&mut self, frame_json: &str) -> Result<String, JsValue> {
        let board = self.overlay.update(frame_json)?;
        write_scoreboard(&board);
        Ok(format!("{},{}", board.red, board.blue))
    }
}

impl Default for ScoreboardHandle {
    fn default() -> Self {
        Self::new()
    }
}

fn write_scoreboard(board: &Scoreboard) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = document.get_element_by_id(RED_SCORE_ELEMENT) {
        el.set_text_content(Some(&board.red.to_string()));
    }
    if let Some(el) = document.get_element_by_id(BLUE_SCORE_ELEMENT) {
        el.set_text_content(Some(&board.blue.to_string()));
    }
}

/// Module init: logging and panic hook
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("High Stakes scoring loaded");
}
