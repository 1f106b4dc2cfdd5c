/// ANSI color helper utilities for terminal output.
use crate::models::SessionState;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Working → green, on break → yellow, ended → blue, not started → grey.
pub fn color_for_state(state: SessionState) -> &'static str {
    match state {
        SessionState::NotStarted => GREY,
        SessionState::Started => GREEN,
        SessionState::OnBreak => YELLOW,
        SessionState::Ended => BLUE,
    }
}

/// Grey out placeholder values ("N/A", "--:--", "Ongoing").
pub fn colorize_optional(value: &str) -> String {
    match value.trim() {
        "" | "N/A" | "--:--" | "Ongoing" | "No breaks" => format!("{GREY}{value}{RESET}"),
        _ => value.to_string(),
    }
}

pub fn colorize_state(state: SessionState) -> String {
    format!("{}{}{}", color_for_state(state), state.label(), RESET)
}
