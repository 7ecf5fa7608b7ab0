use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Token accounting reported with each response.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt, including history and system instruction.
    #[serde(default)]
    pub prompt_token_count: u32,

    /// Tokens across all generated candidates.
    #[serde(default)]
    pub candidates_token_count: u32,

    /// Total tokens for the request.
    #[serde(default)]
    pub total_token_count: u32,
}

impl UsageMetadata {
    /// Create a new `UsageMetadata` from prompt and candidate counts.
    pub fn new(prompt_token_count: u32, candidates_token_count: u32) -> Self {
        Self {
            prompt_token_count,
            candidates_token_count,
            total_token_count: prompt_token_count.saturating_add(candidates_token_count),
        }
    }
}

impl Add for UsageMetadata {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            prompt_token_count: self.prompt_token_count.saturating_add(rhs.prompt_token_count),
            candidates_token_count: self
                .candidates_token_count
                .saturating_add(rhs.candidates_token_count),
            total_token_count: self.total_token_count.saturating_add(rhs.total_token_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_partial() {
        let usage: UsageMetadata =
            serde_json::from_str(r#"{"promptTokenCount": 120, "totalTokenCount": 120}"#).unwrap();
        assert_eq!(usage.prompt_token_count, 120);
        assert_eq!(usage.candidates_token_count, 0);
    }

    #[test]
    fn add_accumulates() {
        let total = UsageMetadata::new(10, 5) + UsageMetadata::new(3, 2);
        assert_eq!(total, UsageMetadata::new(13, 7));
        assert_eq!(total.total_token_count, 20);
    }
}
