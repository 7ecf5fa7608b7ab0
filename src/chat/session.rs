//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript,
//! the conversation history sent to the model, and the export entry points.

use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::chat::config::ChatConfig;
use crate::client::Gemini;
use crate::error::{Error, Result};
use crate::export::{Export, export_transcript};
use crate::observability::{
    PROVIDER_EMPTY_REPLIES, SESSION_FAILED_TURNS, SESSION_RESETS, SESSION_TURNS,
};
use crate::prompts::SYSTEM_PROMPT;
use crate::provider::ChatProvider;
use crate::transcript::{Transcript, Turn};
use crate::types::{Content, GenerateContentRequest, Model, UsageMetadata};
use crate::utils::time::now;

/// A chat session that manages conversation state and API interactions.
///
/// Two records are kept side by side. The transcript holds every turn the user
/// saw, including a question whose answer failed. The history holds only
/// completed exchanges and is what the model is shown on the next call.
pub struct ChatSession<P: ChatProvider = Gemini> {
    provider: Option<P>,
    config: ChatConfig,
    transcript: Transcript,
    history: Vec<Content>,
    usage_totals: UsageMetadata,
    last_turn_usage: Option<UsageMetadata>,
    request_count: u64,
    failed_requests: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// The number of turns in the transcript.
    pub turn_count: usize,
    /// Whether the built-in system prompt is in use.
    pub default_system_prompt: bool,
    /// The sampling temperature, if set.
    pub temperature: Option<f32>,
    /// Whether a provider is configured.
    pub connected: bool,
    /// Total prompt tokens across all requests.
    pub total_prompt_tokens: u64,
    /// Total reply tokens across all requests.
    pub total_reply_tokens: u64,
    /// Total number of API requests made.
    pub total_requests: u64,
    /// Requests that failed or came back empty.
    pub failed_requests: u64,
    /// Prompt tokens for the last turn, if available.
    pub last_turn_prompt_tokens: Option<u64>,
    /// Reply tokens for the last turn, if available.
    pub last_turn_reply_tokens: Option<u64>,
}

impl<P: ChatProvider> ChatSession<P> {
    /// Creates a new chat session.
    ///
    /// A session without a provider can still be configured, but every send
    /// fails with a configuration error until
    /// [`set_provider`](Self::set_provider) is called.
    ///
    /// ```
    /// # tokio_test::block_on(async {
    /// use ace_explainer::chat::{ChatConfig, ChatSession};
    ///
    /// let mut session: ChatSession = ChatSession::new(None, ChatConfig::default());
    /// let err = session.send("SET OutputRoot = InputRoot;").await.unwrap_err();
    /// assert!(err.is_configuration());
    /// assert!(session.transcript().is_empty());
    /// # });
    /// ```
    pub fn new(provider: Option<P>, config: ChatConfig) -> Self {
        Self {
            provider,
            config,
            transcript: Transcript::new(),
            history: Vec::new(),
            usage_totals: UsageMetadata::default(),
            last_turn_usage: None,
            request_count: 0,
            failed_requests: 0,
        }
    }

    /// Installs or replaces the provider.
    pub fn set_provider(&mut self, provider: P) {
        self.provider = Some(provider);
    }

    /// Whether a provider is configured.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Sends a user message and waits for the full reply.
    ///
    /// This method:
    /// 1. Appends the user turn to the transcript
    /// 2. Sends the completed history plus this message in one request
    /// 3. Appends the reply to the transcript and history
    ///
    /// # Errors
    ///
    /// Without a provider this is a configuration error and nothing is
    /// recorded. If the call fails or the reply has no text, the user turn
    /// stays in the transcript, no assistant turn is added, and the history
    /// is left unchanged.
    pub async fn send(&mut self, user_input: &str) -> Result<String> {
        let Some(provider) = &self.provider else {
            return Err(Error::configuration(
                "no API key configured; set GOOGLE_API_KEY or use /key",
            ));
        };

        self.transcript.push(Turn::user(user_input));
        SESSION_TURNS.click();

        let mut contents = self.history.clone();
        contents.push(Content::user(user_input));
        let request = GenerateContentRequest::new(contents)
            .with_system_instruction(self.config.system_prompt.clone())
            .with_generation_config(self.config.generation_config());

        self.request_count = self.request_count.saturating_add(1);
        let result = provider.generate_content(&self.config.model, &request).await;
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.record_failure();
                return Err(err);
            }
        };
        if let Some(usage) = response.usage_metadata {
            self.last_turn_usage = Some(usage);
            self.usage_totals = self.usage_totals + usage;
        }
        let Some(reply) = response.text() else {
            PROVIDER_EMPTY_REPLIES.click();
            self.record_failure();
            return Err(Error::empty_reply(response.empty_reason()));
        };

        self.history.push(Content::user(user_input));
        self.history.push(Content::model(reply.clone()));
        self.transcript.push(Turn::assistant(reply.clone()));
        SESSION_TURNS.click();
        Ok(reply)
    }

    fn record_failure(&mut self) {
        self.failed_requests = self.failed_requests.saturating_add(1);
        SESSION_FAILED_TURNS.click();
    }

    /// Clears the transcript and the model-side history.
    ///
    /// Configuration, including the model, is kept.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.history.clear();
        SESSION_RESETS.click();
    }

    /// The turns so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Builds the report for the transcript, stamped with the current time.
    pub fn export(&self) -> Result<Export> {
        self.export_at(now())
    }

    /// Builds the report for the transcript, stamped with `generated_at`.
    pub fn export_at(&self, generated_at: OffsetDateTime) -> Result<Export> {
        export_transcript(&self.transcript, generated_at)
    }

    /// Builds the report and writes it out, returning where it landed.
    ///
    /// With no target the report goes into the configured export directory
    /// under its generated name. A target that is an existing directory gets
    /// the same treatment; anything else is used as the file path.
    pub fn export_to(&self, target: Option<&Path>) -> Result<PathBuf> {
        if self.transcript.is_empty() {
            return Err(Error::export("nothing to export yet", None));
        }
        let export = self.export()?;
        match target {
            Some(path) if path.is_dir() => export.write_to_dir(path),
            Some(path) => {
                export.write_to(path)?;
                Ok(path.to_path_buf())
            }
            None => export.write_to_dir(&self.config.export_dir),
        }
    }

    /// Changes the model used for responses.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Sets the system prompt; `None` restores the built-in one.
    pub fn set_system_prompt(&mut self, prompt: Option<String>) {
        self.config.system_prompt = prompt.unwrap_or_else(|| SYSTEM_PROMPT.to_string());
    }

    /// Returns the current system prompt.
    pub fn system_prompt(&self) -> &str {
        &self.config.system_prompt
    }

    /// Sets the sampling temperature.
    pub fn set_temperature(&mut self, temperature: Option<f32>) {
        self.config.temperature = temperature;
    }

    /// Returns the sampling temperature, if set.
    pub fn temperature(&self) -> Option<f32> {
        self.config.temperature
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.config.model.clone(),
            turn_count: self.transcript.len(),
            default_system_prompt: self.config.system_prompt == SYSTEM_PROMPT,
            temperature: self.config.temperature,
            connected: self.provider.is_some(),
            total_prompt_tokens: u64::from(self.usage_totals.prompt_token_count),
            total_reply_tokens: u64::from(self.usage_totals.candidates_token_count),
            total_requests: self.request_count,
            failed_requests: self.failed_requests,
            last_turn_prompt_tokens: self
                .last_turn_usage
                .map(|usage| u64::from(usage.prompt_token_count)),
            last_turn_reply_tokens: self
                .last_turn_usage
                .map(|usage| u64::from(usage.candidates_token_count)),
        }
    }
}
