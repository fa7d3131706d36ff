//! Integration tests for the resource APIs against a mock server.

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dialoqbase_client::{CoreSettings, CreateBot, DialoqbaseClient, Source, UpdateBot};

fn client(server: &MockServer) -> DialoqbaseClient {
    DialoqbaseClient::builder()
        .base_url(server.uri())
        .api_key("db_test")
        .build()
        .unwrap()
}

fn bot_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "publicId": format!("pub-{id}"),
        "description": null,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "provider": "openai",
        "name": "support-bot",
        "temperature": 0.7,
        "model": "gpt-3.5-turbo",
        "embedding": "text-embedding-ada-002",
        "streaming": true,
        "showRef": false,
        "questionGeneratorPrompt": "Condense the question",
        "qaPrompt": "Answer from context",
        "use_hybrid_search": false,
        "voice_to_text_type": "web_api",
        "text_to_voice_enabled": false,
        "text_to_voice_type": "web_api",
        "text_to_voice_type_metadata": {},
        "use_rag": true,
        "bot_protect": false,
        "bot_api_key": null,
        "bot_model_api_key": null,
        "options": {},
        "source": [{"type": "website"}]
    })
}

#[tokio::test]
async fn requests_carry_the_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bot"))
        .and(header("Authorization", "db_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let bots = client(&server).bots().list().await.unwrap();
    assert!(bots.is_empty());
}

#[tokio::test]
async fn create_bot_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bot/api"))
        .and(body_partial_json(json!({"model": "gpt-3.5-turbo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "bot-1"})))
        .mount(&server)
        .await;

    let id = client(&server)
        .bots()
        .create(&CreateBot {
            name: Some("support-bot".into()),
            embedding: "text-embedding-ada-002".into(),
            model: "gpt-3.5-turbo".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(id, "bot-1");
}

#[tokio::test]
async fn get_bot_unwraps_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bot/bot-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": bot_json("bot-1")})))
        .mount(&server)
        .await;

    let bot = client(&server).bots().get("bot-1").await.unwrap();
    assert_eq!(bot.id, "bot-1");
    assert_eq!(bot.public_id, "pub-bot-1");
    assert_eq!(bot.source.len(), 1);
}

#[tokio::test]
async fn list_bots_parses_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bot"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([bot_json("a"), bot_json("b")])),
        )
        .mount(&server)
        .await;

    let bots = client(&server).bots().list().await.unwrap();
    assert_eq!(bots.len(), 2);
    assert_eq!(bots[1].id, "b");
}

#[tokio::test]
async fn update_bot_sends_camel_case_retrieval_count() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/bot/bot-1/update"))
        .and(body_json(json!({"temperature": 0.2, "noOfDocumentsToRetrieve": 6})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .bots()
        .update(
            "bot-1",
            &UpdateBot {
                temperature: Some(0.2),
                no_of_documents_to_retrieve: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_bot_and_readiness() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/bot/bot-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bot/bot-1/is-ready"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_ready": true})))
        .mount(&server)
        .await;

    let client = client(&server);
    client.bots().delete("bot-1").await.unwrap();
    assert!(client.bots().is_ready("bot-1").await.unwrap());
}

#[tokio::test]
async fn admin_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "username": "admin",
                "email": "admin@example.com",
                "is_admin": true,
                "bots": 3,
                "createdAt": "2024-01-01T00:00:00.000Z"
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/dialoqbase-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "noOfBotsPerUser": 10,
            "allowUserToCreateBots": true,
            "allowUserToRegister": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/dialoqbase-settings"))
        .and(body_partial_json(json!({"noOfBotsPerUser": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 1,
                "name": "GPT-3.5 Turbo",
                "model_id": "gpt-3.5-turbo",
                "model_type": "chat",
                "stream_available": true,
                "model_provider": "openai",
                "local_model": false,
                "config": null,
                "hide": false,
                "deleted": false,
                "createdAt": "2024-01-01T00:00:00.000Z"
            }]
        })))
        .mount(&server)
        .await;

    let client = client(&server);

    let users = client.admin().users().await.unwrap();
    assert_eq!(users[0].username, "admin");

    let settings = client.admin().settings().await.unwrap();
    assert_eq!(settings.no_of_bots_per_user, 10);

    client
        .admin()
        .update_settings(&CoreSettings {
            no_of_bots_per_user: 5,
            allow_user_to_create_bots: true,
            allow_user_to_register: false,
        })
        .await
        .unwrap();

    let models = client.admin().models().await.unwrap();
    assert_eq!(models[0].model_id, "gpt-3.5-turbo");
    assert!(models[0].stream_available);
}

#[tokio::test]
async fn source_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bot/bot-1/source/bulk"))
        .and(body_json(json!([
            {"type": "website", "content": "https://example.com"}
        ])))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"source_ids": ["src-1"]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bot/bot-1/source"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "src-1",
                "type": "website",
                "content": "https://example.com",
                "location": null,
                "isPending": false,
                "status": "FINISHED",
                "createdAt": "2024-01-01T00:00:00.000Z"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/bot/bot-1/source/src-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bot/bot-1/source/src-1/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    let ids = client
        .sources()
        .add(
            "bot-1",
            &[Source::Website {
                content: "https://example.com".into(),
            }],
        )
        .await
        .unwrap();
    assert_eq!(ids, vec!["src-1".to_string()]);

    let sources = client.sources().list("bot-1").await.unwrap();
    assert_eq!(sources[0].kind, "website");
    assert!(!sources[0].is_pending);

    client.sources().delete("bot-1", "src-1").await.unwrap();
    client.sources().refresh("bot-1", "src-1").await.unwrap();
}

#[tokio::test]
async fn upload_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bot/bot-1/source/upload/bulk"))
        .and(body_string_contains("filename=\"notes.txt\""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"source_ids": ["src-9"]})),
        )
        .mount(&server)
        .await;

    let ids = client(&server)
        .sources()
        .upload("bot-1", "notes.txt", b"hello world".to_vec())
        .await
        .unwrap();
    assert_eq!(ids, vec!["src-9".to_string()]);
}

#[tokio::test]
async fn error_body_message_field_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bot/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "bot not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).bots().get("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("bot not found"));
}

#[tokio::test]
async fn error_body_error_field_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bot/api"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "bad request"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .bots()
        .create(&CreateBot::default())
        .await
        .unwrap_err();
    match err {
        dialoqbase_client::Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad request");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/users"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client(&server).admin().users().await.unwrap_err();
    assert!(err.is_server_error());
    assert!(err.to_string().contains("Service Unavailable"));
}
