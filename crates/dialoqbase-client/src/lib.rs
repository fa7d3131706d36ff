//! HTTP client SDK for the Dialoqbase conversational bot platform.
//!
//! This crate provides a typed client for the Dialoqbase server API:
//! admin settings, bot management, source ingestion, and chat in both
//! buffered and streaming modes.
//!
//! # Example
//!
//! ```no_run
//! use dialoqbase_client::{ChatRequest, DialoqbaseClient, Result};
//!
//! # async fn example() -> Result<()> {
//! // Create a client
//! let client = DialoqbaseClient::builder()
//!     .base_url("http://localhost:3000")
//!     .api_key("db_ed2e9ded3f8a46a89063fee4590179b5")
//!     .build()?;
//!
//! // Find a bot that is ready to chat
//! let bots = client.bots().list().await?;
//! let bot_id = &bots[0].id;
//!
//! // Buffered chat: one complete response
//! let response = client.chat().message(bot_id, "Hello!").await?;
//! println!("{}", response.bot.text);
//!
//! // Streaming chat: messages arrive as the bot produces them
//! use futures::StreamExt;
//! let mut stream = client
//!     .chat()
//!     .stream(bot_id, &ChatRequest::new("Tell me a joke"))
//!     .await?;
//! while let Some(message) = stream.next().await {
//!     println!("{}", message?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Admin**: users, instance settings, registered models
//! - **Bots**: create, list, get, update, delete, readiness
//! - **Sources**: bulk add, file upload, list, delete, refresh
//! - **Chat**: buffered and streaming responses
//!
//! # Streaming
//!
//! Streaming chat responses arrive as `event:`/`data:` framed lines over
//! the response body. [`ChatStream`] decodes them incrementally and yields
//! one JSON payload per frame, in arrival order, ending at the `result`
//! frame. Dropping the stream early closes the response body; see the
//! [`stream`] module for the full contract.

pub mod api;
pub mod client;
pub mod error;
pub mod stream;
pub mod types;

pub use client::{ClientBuilder, DialoqbaseClient};
pub use error::{Error, Result};
pub use stream::{ChatStream, EventFrame};
pub use types::*;
