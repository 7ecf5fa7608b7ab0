//! Interactive chat front-end for explaining IBM ACE / IIB code.
//!
//! This module provides a REPL chat interface built on top of the Gemini
//! client. It supports:
//!
//! - Pasting code or asking questions, with the full history sent each turn
//! - ANSI-styled replies that mirror the exported report
//! - Slash commands for session control and export
//! - Configurable model, system prompt, and temperature
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Conversation state, API interaction, and export
//! - [`commands`]: Slash command parsing
//! - [`render`]: Terminal output

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, PASTE_TERMINATOR, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_TEMPERATURE, MAX_TEMPERATURE, parse_temperature};
pub use render::{PlainTextRenderer, Renderer, style_reply};
pub use session::{ChatSession, SessionStats};
