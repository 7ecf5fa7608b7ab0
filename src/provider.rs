//! The seam between a chat session and the model it talks to.

use crate::client::Gemini;
use crate::error::Result;
use crate::types::{GenerateContentRequest, GenerateContentResponse, Model};

/// Something that can answer a conversation.
///
/// [`Gemini`] is the production implementation; tests substitute their own.
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generate a reply for `request` using `model`, in a single attempt.
    async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

#[async_trait::async_trait]
impl ChatProvider for Gemini {
    async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        Gemini::generate_content(self, model, request).await
    }
}
