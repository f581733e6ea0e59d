//! Unified LLM interface types and traits.
//!
//! This crate provides the shared types used across the relay:
//! `Message`, `StreamChunk`, `General`, and the `LLM` trait. Also
//! provides `HttpProvider` for OpenAI-compatible HTTP transport and a
//! shared `Request` body type.

pub use config::{General, ToolChoice};
pub use http::HttpProvider;
pub use message::{Message, Role};
pub use provider::LLM;
pub use request::Request;
pub use reqwest::{self, Client};
pub use response::{Choice, CompletionMeta, Delta, FinishReason, Usage};
pub use stream::StreamChunk;

mod config;
mod http;
mod message;
mod provider;
mod request;
mod response;
mod stream;
