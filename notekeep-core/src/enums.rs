//! Enum types for notekeep entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PRIORITY
// ============================================================================

/// Priority attached to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All variants, in ascending order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, PriorityParseError> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(PriorityParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

/// Error when parsing an invalid priority string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityParseError(pub String);

impl fmt::Display for PriorityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid priority: {}", self.0)
    }
}

impl std::error::Error for PriorityParseError {}

// ============================================================================
// DOCUMENT KIND
// ============================================================================

/// Document discriminator. Every stored note carries `"note"` and it never
/// changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum NoteKind {
    #[default]
    #[serde(rename = "note")]
    Note,
}

impl NoteKind {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            NoteKind::Note => "note",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

// ============================================================================
// ENTITY DISCRIMINATOR
// ============================================================================

/// Entity type discriminator used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EntityKind {
    Note,
    NoteOrder,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Note => write!(f, "Note"),
            EntityKind::NoteOrder => write!(f, "NoteOrder"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_db_round_trip() {
        for p in Priority::ALL {
            assert_eq!(Priority::from_db_str(p.as_db_str()), Ok(p));
        }
    }

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
    }

    #[test]
    fn test_priority_rejects_unknown() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid priority: urgent");
    }

    #[test]
    fn test_priority_serde_lowercase() {
        let json = serde_json::to_string(&Priority::Low).unwrap();
        assert_eq!(json, "\"low\"");
        let back: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(back, Priority::Medium);
    }

    #[test]
    fn test_note_kind_serializes_as_note() {
        assert_eq!(serde_json::to_string(&NoteKind::Note).unwrap(), "\"note\"");
        assert!(serde_json::from_str::<NoteKind>("\"task\"").is_err());
    }
}
