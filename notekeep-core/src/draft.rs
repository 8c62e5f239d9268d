//! Note field rules.
//!
//! A [`NoteDraft`] is the client-supplied part of a note. `normalize`
//! trims the fields that are stored trimmed and enforces the length limits;
//! it rejects on the first violation.

use crate::{Priority, ValidationError};

pub const TITLE_MAX_CHARS: usize = 200;
pub const CONTENT_MAX_CHARS: usize = 10_000;
pub const TAG_MAX_CHARS: usize = 50;
pub const CATEGORY_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const CODE_CONTENT_MAX_CHARS: usize = 20_000;
pub const TOPIC_CONTENT_MAX_CHARS: usize = 15_000;

/// Client-editable note fields. `None` on an optional field means
/// "use the default" on create and "keep the stored value" on update.
/// A present but blank description is kept as `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Option<Vec<String>>,
    pub programming_language: Option<String>,
    pub description: Option<String>,
    pub is_revision: Option<bool>,
    pub priority: Option<Priority>,
    pub code_content: Option<String>,
    pub topic_content: Option<String>,
}

impl NoteDraft {
    /// Trim, default and check every field.
    pub fn normalize(self) -> Result<Self, ValidationError> {
        let title = required_trimmed("title", &self.title, TITLE_MAX_CHARS)?;

        if self.content.trim().is_empty() {
            return Err(missing("content"));
        }
        check_len("content", &self.content, CONTENT_MAX_CHARS)?;

        let category = required_trimmed("category", &self.category, CATEGORY_MAX_CHARS)?;

        let tags = match self.tags {
            Some(tags) => {
                let mut cleaned = Vec::with_capacity(tags.len());
                for tag in tags {
                    let tag = tag.trim();
                    if tag.is_empty() {
                        continue;
                    }
                    check_len("tags", tag, TAG_MAX_CHARS)?;
                    cleaned.push(tag.to_string());
                }
                Some(cleaned)
            }
            None => None,
        };

        let programming_language = self
            .programming_language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let description = self.description.map(|d| d.trim().to_string());
        if let Some(d) = &description {
            check_len("description", d, DESCRIPTION_MAX_CHARS)?;
        }

        if let Some(code) = &self.code_content {
            check_len("codeContent", code, CODE_CONTENT_MAX_CHARS)?;
        }
        if let Some(topic) = &self.topic_content {
            check_len("topicContent", topic, TOPIC_CONTENT_MAX_CHARS)?;
        }

        Ok(Self {
            title,
            content: self.content,
            category,
            tags,
            programming_language,
            description,
            is_revision: self.is_revision,
            priority: self.priority,
            code_content: self.code_content,
            topic_content: self.topic_content,
        })
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::RequiredFieldMissing {
        field: field.to_string(),
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn required_trimmed(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing(field));
    }
    check_len(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NoteDraft {
        NoteDraft {
            title: "  Traits  ".to_string(),
            content: "Static dispatch".to_string(),
            category: " rust ".to_string(),
            ..NoteDraft::default()
        }
    }

    #[test]
    fn test_normalize_trims_fields() {
        let draft = NoteDraft {
            tags: Some(vec![" a ".to_string(), "   ".to_string(), "b".to_string()]),
            programming_language: Some("  rust ".to_string()),
            description: Some("  ".to_string()),
            ..base()
        }
        .normalize()
        .unwrap();
        assert_eq!(draft.title, "Traits");
        assert_eq!(draft.category, "rust");
        assert_eq!(draft.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(draft.programming_language.as_deref(), Some("rust"));
        assert_eq!(draft.description.as_deref(), Some(""));
    }

    #[test]
    fn test_normalize_rejects_blank_title() {
        let err = NoteDraft {
            title: "   ".to_string(),
            ..base()
        }
        .normalize()
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::RequiredFieldMissing {
                field: "title".to_string()
            }
        );
    }

    #[test]
    fn test_normalize_reports_first_violation() {
        let err = NoteDraft {
            title: "x".repeat(TITLE_MAX_CHARS + 1),
            content: String::new(),
            ..base()
        }
        .normalize()
        .unwrap_err();
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn test_limits_count_chars_not_bytes() {
        let draft = NoteDraft {
            title: "é".repeat(TITLE_MAX_CHARS),
            ..base()
        };
        assert!(draft.normalize().is_ok());
    }

    #[test]
    fn test_normalize_rejects_long_tag() {
        let err = NoteDraft {
            tags: Some(vec!["t".repeat(TAG_MAX_CHARS + 1)]),
            ..base()
        }
        .normalize()
        .unwrap_err();
        assert_eq!(err.field(), "tags");
    }

    #[test]
    fn test_normalize_rejects_long_topic_content() {
        let err = NoteDraft {
            topic_content: Some("t".repeat(TOPIC_CONTENT_MAX_CHARS + 1)),
            ..base()
        }
        .normalize()
        .unwrap_err();
        assert_eq!(err.field(), "topicContent");
    }
}
