//! API endpoint implementations.

mod admin;
mod bots;
mod chat;
mod sources;

pub use admin::AdminApi;
pub use bots::BotsApi;
pub use chat::ChatApi;
pub use sources::SourcesApi;
