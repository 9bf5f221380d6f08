//! `gemini-client`: minimal blocking driver for the Gemini
//! `generateContent` REST endpoint.
//!
//! Only the single-turn, text-only subset of the API is modelled: one prompt
//! goes out, the text of the first candidate comes back.
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::new(std::env::var("GEMINI_API_KEY")?);
//! let text = client.generate("Suggest a radio station name.")?;
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::{GeminiClient, DEFAULT_BASE_URL, MODEL};
pub use error::GeminiError;
pub use types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GeminiError>;
