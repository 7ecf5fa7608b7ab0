// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod export;
pub mod prompts;
pub mod provider;
pub mod transcript;
pub mod types;
pub mod utils;

mod client_logger;
mod observability;

// Re-exports
pub use client::Gemini;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use provider::ChatProvider;
pub use transcript::{Role, Transcript, Turn};
pub use types::*;
