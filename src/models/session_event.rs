use std::fmt;

/// Inbound user interaction fed to the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Resume,
    BeginBreak,
    EndBreak,
    End,
}

impl SessionEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEvent::Start => "start",
            SessionEvent::Resume => "resume",
            SessionEvent::BeginBreak => "begin_break",
            SessionEvent::EndBreak => "end_break",
            SessionEvent::End => "end",
        }
    }

    /// Resume only reads the record back.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, SessionEvent::Resume)
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
