//! JavaScript bindings over a [`Session`].

use wasm_bindgen::prelude::*;

use crate::persist::SavedGame;
use crate::session::{Session, SessionConfig};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// A game session driven from JavaScript with the same commands as the terminal.
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: Session::new(SessionConfig::default()),
        }
    }

    /// Runs one command line and returns everything it printed.
    pub fn execute(&mut self, line: &str) -> String {
        let mut out = Vec::new();
        self.session.execute(line, &mut out).ok();
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Current [`GameView`](crate::types::GameView) as a JS object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.game().view()).map_err(JsValue::from)
    }

    /// The game in save-file format.
    pub fn export_save(&self) -> String {
        self.session.game().to_saved().to_string()
    }

    pub fn import_save(&mut self, text: &str) {
        self.session
            .game_mut()
            .restore_saved(SavedGame::parse(text));
    }
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn execute_returns_command_output() {
        let mut wasm = WasmSession::new();

        let out = wasm.execute("place D3");

        assert!(out.starts_with("Piece placed at D3"));
        assert_eq!(wasm.session.game().current_player(), Color::White);
    }

    #[test]
    fn export_then_import_restores_position() {
        let mut wasm = WasmSession::new();
        wasm.execute("place D3");
        let saved = wasm.export_save();

        let mut other = WasmSession::new();
        other.import_save(&saved);

        assert_eq!(other.export_save(), saved);
        assert_eq!(other.session.game().board(), wasm.session.game().board());
    }
}
