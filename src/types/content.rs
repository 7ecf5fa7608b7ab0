use serde::{Deserialize, Serialize};

use crate::transcript::Role;

/// The author of a piece of content in a Gemini conversation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    /// Content written by the user.
    User,

    /// Content produced by the model.
    Model,
}

impl From<Role> for ContentRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => ContentRole::User,
            Role::Assistant => ContentRole::Model,
        }
    }
}

/// A single part of a content item.
///
/// Only text parts are produced or consumed; other part kinds in a response
/// deserialize with `text` unset and are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Part {
    /// The text of this part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Set on parts that carry the model's internal reasoning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// Create a new text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }
}

/// A multi-part message exchanged with the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// The producer of the content; omitted for system instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ContentRole>,

    /// The ordered parts making up this content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a new `Content` with a single text part.
    pub fn new(role: Option<ContentRole>, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::text(text)],
        }
    }

    /// Create a new user `Content` with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Some(ContentRole::User), text)
    }

    /// Create a new model `Content` with a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Some(ContentRole::Model), text)
    }

    /// Create a role-less `Content`, as used for system instructions.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(None, text)
    }

    /// Concatenates all non-thought text parts.
    ///
    /// Returns `None` when the content carries no text at all.
    pub fn text(&self) -> Option<String> {
        let mut texts = self
            .parts
            .iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn user_content_serialization() {
        let content = Content::user("Explain this ESQL");
        assert_eq!(
            to_value(&content).unwrap(),
            json!({
                "role": "user",
                "parts": [{"text": "Explain this ESQL"}]
            })
        );
    }

    #[test]
    fn system_content_has_no_role() {
        let content = Content::system("You are an architect.");
        assert_eq!(
            to_value(&content).unwrap(),
            json!({"parts": [{"text": "You are an architect."}]})
        );
    }

    #[test]
    fn text_skips_thoughts_and_non_text_parts() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                {"text": "planning...", "thought": true},
                {"text": "### Summary\n"},
                {"functionCall": {"name": "noop", "args": {}}},
                {"text": "It routes orders."}
            ]
        }))
        .unwrap();
        assert_eq!(content.role, Some(ContentRole::Model));
        assert_eq!(
            content.text().as_deref(),
            Some("### Summary\nIt routes orders.")
        );
    }

    #[test]
    fn text_is_none_without_text_parts() {
        let content = Content {
            role: Some(ContentRole::Model),
            parts: Vec::new(),
        };
        assert_eq!(content.text(), None);
    }
}
