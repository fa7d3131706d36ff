//! Request and response types for the Dialoqbase API.
//!
//! These types mirror the server's API contract. The server mixes camelCase
//! and snake_case field names; renames below follow the wire format exactly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Bots
// ─────────────────────────────────────────────────────────────────────────────

/// A bot as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    /// Bot ID.
    pub id: String,
    /// Public ID used in shareable links.
    #[serde(rename = "publicId")]
    pub public_id: String,
    /// Bot description.
    #[serde(default)]
    pub description: Option<String>,
    /// Creation time (ISO 8601).
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Model provider.
    pub provider: String,
    /// Bot name.
    pub name: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Chat model.
    pub model: String,
    /// Embedding model.
    pub embedding: String,
    /// Whether streaming responses are enabled.
    pub streaming: bool,
    /// Whether source references are shown in answers.
    #[serde(rename = "showRef")]
    pub show_ref: bool,
    /// Prompt used to condense follow-up questions.
    #[serde(rename = "questionGeneratorPrompt")]
    pub question_generator_prompt: String,
    /// Prompt used for answering over retrieved context.
    #[serde(rename = "qaPrompt")]
    pub qa_prompt: String,
    /// Whether hybrid search is enabled.
    pub use_hybrid_search: bool,
    /// Voice-to-text backend.
    #[serde(default)]
    pub voice_to_text_type: Option<String>,
    /// Whether text-to-voice is enabled.
    #[serde(default)]
    pub text_to_voice_enabled: bool,
    /// Text-to-voice backend.
    #[serde(default)]
    pub text_to_voice_type: Option<String>,
    /// Backend-specific text-to-voice settings.
    #[serde(default)]
    pub text_to_voice_type_metadata: Value,
    /// Whether retrieval-augmented generation is enabled.
    #[serde(default)]
    pub use_rag: bool,
    /// Whether bot-protection is enabled.
    #[serde(default)]
    pub bot_protect: bool,
    /// Per-bot API key, if one was generated.
    #[serde(default)]
    pub bot_api_key: Option<String>,
    /// Per-bot model API key, if one was set.
    #[serde(default)]
    pub bot_model_api_key: Option<String>,
    /// Provider-specific options.
    #[serde(default)]
    pub options: Value,
    /// Sources attached to the bot.
    #[serde(default)]
    pub source: Vec<BotSourceRef>,
}

/// Reference to a source attached to a bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSourceRef {
    /// Source type (text, website, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request to create a bot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBot {
    /// Bot name; the server generates one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Embedding model.
    pub embedding: String,
    /// Chat model.
    pub model: String,
    /// System prompt override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Question generator prompt override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_generator_prompt: Option<String>,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Request to update a bot. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBot {
    /// New system prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// New question generator prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_generator_prompt: Option<String>,
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// New chat model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Toggle streaming responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,
    /// Toggle source references.
    #[serde(default, rename = "showRef", skip_serializing_if = "Option::is_none")]
    pub show_ref: Option<bool>,
    /// Toggle hybrid search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_hybrid_search: Option<bool>,
    /// Toggle bot protection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_protect: Option<bool>,
    /// Toggle retrieval-augmented generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_rag: Option<bool>,
    /// New per-bot model API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_model_api_key: Option<String>,
    /// Number of documents to retrieve per question. The update endpoint
    /// expects this one in camelCase.
    #[serde(
        default,
        rename = "noOfDocumentsToRetrieve",
        skip_serializing_if = "Option::is_none"
    )]
    pub no_of_documents_to_retrieve: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

/// Role of a chat history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The human side of the conversation.
    Human,
    /// The bot side of the conversation.
    Ai,
}

/// One entry of conversation history sent with a chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    /// Who said it.
    pub role: ChatRole,
    /// What was said.
    pub text: String,
}

/// A chat request body.
///
/// The streaming flag is not part of this type; it is set by
/// [`ChatApi::send`](crate::api::ChatApi::send) and
/// [`ChatApi::stream`](crate::api::ChatApi::stream), which fix the result
/// shape at compile time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The message to send.
    pub message: String,
    /// Conversation history to resume from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<ChatHistoryEntry>,
    /// Server-side history to append to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_id: Option<String>,
}

impl ChatRequest {
    /// Create a request with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Attach conversation history.
    pub fn with_history(mut self, history: Vec<ChatHistoryEntry>) -> Self {
        self.history = history;
        self
    }

    /// Attach a server-side history ID.
    pub fn with_history_id(mut self, history_id: impl Into<String>) -> Self {
        self.history_id = Some(history_id.into());
        self
    }
}

/// A complete chat response (buffered mode, and the `result` frame payload
/// in streaming mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The bot's answer.
    pub bot: BotReply,
    /// Updated conversation history.
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

/// The answer part of a chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotReply {
    /// Answer text.
    pub text: String,
    /// Documents the answer was grounded on.
    #[serde(default, rename = "sourceDocuments")]
    pub source_documents: Vec<SourceDocument>,
}

/// A message in the returned conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Who said it.
    #[serde(rename = "type")]
    pub role: ChatRole,
    /// What was said.
    pub text: String,
}

/// A retrieved document referenced by an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Retrieved text.
    #[serde(default, rename = "pageContent")]
    pub page_content: String,
    /// Document metadata.
    #[serde(default)]
    pub metadata: Value,
    /// Where the document came from.
    #[serde(default)]
    pub source: Option<String>,
    /// Raw document content.
    #[serde(default)]
    pub content: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sources
// ─────────────────────────────────────────────────────────────────────────────

/// A source to ingest into a bot, tagged by type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    /// Raw text.
    Text {
        /// The text itself.
        content: String,
    },
    /// A single web page.
    Website {
        /// Page URL.
        content: String,
    },
    /// A sitemap to expand into pages.
    Sitemap {
        /// Sitemap URL.
        content: String,
    },
    /// A site crawl starting from one URL.
    Crawl {
        /// Start URL.
        content: String,
        /// How deep to follow links.
        #[serde(rename = "maxDepth")]
        max_depth: u32,
        /// How many links to follow in total.
        #[serde(rename = "maxLink")]
        max_link: u32,
    },
    /// A YouTube video.
    Youtube {
        /// Video URL.
        content: String,
        /// Transcription settings.
        options: YoutubeOptions,
    },
    /// A REST endpoint to pull content from.
    Rest {
        /// Endpoint URL.
        content: String,
        /// Request settings.
        options: RestOptions,
    },
    /// A GitHub repository.
    Github {
        /// Repository URL.
        content: String,
        /// Checkout settings.
        options: GithubOptions,
    },
}

/// How a YouTube source is transcribed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeOptions {
    /// `whisper` or `transcript`.
    pub youtube_mode: String,
}

/// Request settings for a REST source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestOptions {
    /// HTTP method.
    pub method: String,
    /// Request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Request body.
    #[serde(default)]
    pub body: Value,
}

/// Checkout settings for a GitHub source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubOptions {
    /// Whether the repository is private.
    pub is_private: bool,
    /// Branch to check out.
    pub branch: String,
}

/// A source attached to a bot, as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceData {
    /// Source ID.
    pub id: String,
    /// Source type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Source content (text, URL, ...).
    pub content: String,
    /// Where ingested files are stored.
    #[serde(default)]
    pub location: Option<String>,
    /// Whether ingestion is still running.
    #[serde(rename = "isPending")]
    pub is_pending: bool,
    /// Ingestion status.
    pub status: String,
    /// Creation time (ISO 8601).
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Type-specific options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, Value>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin
// ─────────────────────────────────────────────────────────────────────────────

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address, if set.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the user is an administrator.
    pub is_admin: bool,
    /// Number of bots the user owns.
    pub bots: i64,
    /// Creation time (ISO 8601).
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// A model registered on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Model registry ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Provider-side model identifier.
    pub model_id: String,
    /// Model type (chat, embedding, ...).
    pub model_type: String,
    /// Whether the model supports streaming.
    pub stream_available: bool,
    /// Provider name.
    pub model_provider: String,
    /// Whether the model runs locally.
    pub local_model: bool,
    /// Provider-specific configuration.
    #[serde(default)]
    pub config: Option<Value>,
    /// Whether the model is hidden from users.
    pub hide: bool,
    /// Whether the model is soft-deleted.
    pub deleted: bool,
    /// Creation time (ISO 8601).
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Instance-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreSettings {
    /// How many bots each user may create.
    #[serde(rename = "noOfBotsPerUser")]
    pub no_of_bots_per_user: i64,
    /// Whether non-admin users may create bots.
    #[serde(rename = "allowUserToCreateBots")]
    pub allow_user_to_create_bots: bool,
    /// Whether new users may register.
    #[serde(rename = "allowUserToRegister")]
    pub allow_user_to_register: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_skips_empty_optionals() {
        let request = ChatRequest::new("hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"message": "hello"}));
    }

    #[test]
    fn chat_history_roles_use_wire_names() {
        let entry = ChatHistoryEntry {
            role: ChatRole::Human,
            text: "hi".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["role"], "human");
    }

    #[test]
    fn update_bot_renames_retrieval_count() {
        let update = UpdateBot {
            no_of_documents_to_retrieve: Some(4),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"noOfDocumentsToRetrieve": 4}));
    }

    #[test]
    fn source_serializes_with_type_tag() {
        let source = Source::Github {
            content: "https://github.com/dialoqbase/dialoqbase".into(),
            options: GithubOptions {
                is_private: false,
                branch: "main".into(),
            },
        };
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["type"], "github");
        assert_eq!(json["options"]["branch"], "main");
    }

    #[test]
    fn chat_response_parses_server_shape() {
        let json = serde_json::json!({
            "bot": {
                "text": "Hello!",
                "sourceDocuments": [
                    {"pageContent": "greetings doc", "metadata": {"page": 1}}
                ]
            },
            "history": [
                {"type": "human", "text": "Hi"},
                {"type": "ai", "text": "Hello!"}
            ]
        });
        let response: ChatResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.bot.text, "Hello!");
        assert_eq!(response.bot.source_documents.len(), 1);
        assert_eq!(response.history[1].role, ChatRole::Ai);
    }
}
