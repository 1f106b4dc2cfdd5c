use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle position of a daily work record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    Started,
    OnBreak,
    Ended,
}

impl SessionState {
    /// Convert enum → stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not_started",
            SessionState::Started => "started",
            SessionState::OnBreak => "on_break",
            SessionState::Ended => "ended",
        }
    }

    /// Convert stored string → enum
    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(SessionState::NotStarted),
            "started" => Some(SessionState::Started),
            "on_break" => Some(SessionState::OnBreak),
            "ended" => Some(SessionState::Ended),
            _ => None,
        }
    }

    /// Helper: accept CLI input in either stored form or a looser spelling
    /// (`on-break`, `OnBreak`, `ENDED`).
    pub fn from_input(s: &str) -> Option<Self> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "notstarted" => Some(SessionState::NotStarted),
            "started" => Some(SessionState::Started),
            "onbreak" => Some(SessionState::OnBreak),
            "ended" => Some(SessionState::Ended),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "Not started",
            SessionState::Started => "Working",
            SessionState::OnBreak => "On break",
            SessionState::Ended => "Ended",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_strings_match_document_format() {
        for state in [
            SessionState::NotStarted,
            SessionState::Started,
            SessionState::OnBreak,
            SessionState::Ended,
        ] {
            assert_eq!(SessionState::from_stored(state.as_str()), Some(state));
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
    }

    #[test]
    fn loose_input_is_accepted() {
        assert_eq!(SessionState::from_input("on-break"), Some(SessionState::OnBreak));
        assert_eq!(SessionState::from_input("OnBreak"), Some(SessionState::OnBreak));
        assert_eq!(SessionState::from_input(" STARTED "), Some(SessionState::Started));
        assert_eq!(SessionState::from_input("paused"), None);
    }
}
