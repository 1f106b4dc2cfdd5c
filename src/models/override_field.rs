use crate::errors::{AppError, AppResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakPart {
    Start,
    End,
}

/// Field addressed by an administrative edit.
///
/// Textual forms: `start`, `end`, `break-<N>-start`, `break-<N>-end`,
/// where `N` is the 1-based break number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideField {
    Start,
    End,
    Break { number: usize, part: BreakPart },
}

impl OverrideField {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let s = raw.trim().to_lowercase();

        match s.as_str() {
            "start" => return Ok(OverrideField::Start),
            "end" => return Ok(OverrideField::End),
            _ => {}
        }

        let parts: Vec<&str> = s.split('-').collect();
        if let ["break", number, part] = parts.as_slice() {
            let number: usize = number
                .parse()
                .map_err(|_| AppError::InvalidField(raw.to_string()))?;
            if number == 0 {
                return Err(AppError::InvalidField(raw.to_string()));
            }
            let part = match *part {
                "start" => BreakPart::Start,
                "end" => BreakPart::End,
                _ => return Err(AppError::InvalidField(raw.to_string())),
            };
            return Ok(OverrideField::Break { number, part });
        }

        Err(AppError::InvalidField(raw.to_string()))
    }
}

impl fmt::Display for OverrideField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideField::Start => f.write_str("start"),
            OverrideField::End => f.write_str("end"),
            OverrideField::Break { number, part } => {
                let part = match part {
                    BreakPart::Start => "start",
                    BreakPart::End => "end",
                };
                write!(f, "break-{}-{}", number, part)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn parses_every_documented_form() {
        assert_eq!(OverrideField::parse("start").unwrap(), OverrideField::Start);
        assert_eq!(OverrideField::parse(" END ").unwrap(), OverrideField::End);
        assert_eq!(
            OverrideField::parse("break-2-start").unwrap(),
            OverrideField::Break {
                number: 2,
                part: BreakPart::Start
            }
        );
        assert_eq!(
            OverrideField::parse("Break-10-End").unwrap(),
            OverrideField::Break {
                number: 10,
                part: BreakPart::End
            }
        );
    }

    #[test]
    fn rejects_malformed_fields() {
        for raw in ["", "state", "break-0-start", "break-x-end", "break-1", "break-1-middle"] {
            let err = OverrideField::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidField, "input: {raw:?}");
        }
    }

    #[test]
    fn display_round_trips_break_fields() {
        let field = OverrideField::parse("break-3-end").unwrap();
        assert_eq!(field.to_string(), "break-3-end");
    }
}
