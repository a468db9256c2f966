use std::fmt;

use crate::event::EventId;

/// Machine-readable error codes so callers can branch without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedHistory,
    UnknownEventType,
    ConfigParseError,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedHistory => "E1001",
            Self::UnknownEventType => "E2001",
            Self::ConfigParseError => "E3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedHistory => "History payload is not a valid event list",
            Self::UnknownEventType => "Event type has no connection rule",
            Self::ConfigParseError => "Graph config parse error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedHistory => {
                Some("Pass a JSON array of {eventId, eventType, eventFullDetails} records.")
            }
            Self::UnknownEventType => Some(
                "Upgrade histograph, or set `skip_unrecognized = true` to leave such events unlinked.",
            ),
            Self::ConfigParseError => Some("Fix the syntax of the graph config TOML and retry."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced while computing event connections.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The event's type tag is not one of the known history event types.
    #[error("event {event_id} has unknown event type '{tag}'")]
    UnknownEventType { event_id: EventId, tag: String },

    /// The history payload could not be deserialized.
    #[error("malformed history: {0}")]
    MalformedHistory(#[from] serde_json::Error),
}

impl ConnectionError {
    /// The stable error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownEventType { .. } => ErrorCode::UnknownEventType,
            Self::MalformedHistory(_) => ErrorCode::MalformedHistory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConnectionError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::MalformedHistory,
            ErrorCode::UnknownEventType,
            ErrorCode::ConfigParseError,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::UnknownEventType.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn unknown_event_type_message_names_event_and_tag() {
        let err = ConnectionError::UnknownEventType {
            event_id: 14,
            tag: "WorkflowPropertiesModified".into(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownEventType);
        let msg = err.to_string();
        assert!(msg.contains("14"));
        assert!(msg.contains("WorkflowPropertiesModified"));
    }

    #[test]
    fn json_errors_convert_to_malformed_history() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = ConnectionError::from(json_err);
        assert_eq!(err.code(), ErrorCode::MalformedHistory);
        assert!(err.to_string().starts_with("malformed history"));
    }
}
