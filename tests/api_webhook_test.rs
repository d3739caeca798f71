//! Integration tests for the webhook and debug API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use mockito::{Matcher, Server};
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_json, test_app, test_app_with_config, test_config};

    async fn post_raw(app: &Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/webhooks/agentmail")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, body_to_json(response).await)
    }

    /// Tests a received message is stored in memory as a narrative
    #[tokio::test]
    async fn it_ingests_received_messages() {
        let mut server = Server::new_async().await;
        let memory = server
            .mock("POST", "/memories/add")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({
                    "collection": "agentmail_emails",
                    "metadata": {"email_id": "m1", "from": "Joy <joy@example.com>", "subject": "Hi"},
                })),
                Matcher::Regex("ENCOUNTER WITH Joy at Blue Bottle Coffee, SF".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"resource_id": "r1"}"#)
            .create_async()
            .await;

        let app = test_app_with_config(test_config(&server.url())).await;
        let event = json!({
            "event": "message.received",
            "message": {
                "message_id": "m1",
                "from": "Joy <joy@example.com>",
                "subject": "Hi",
                "text": "Hello!\n\n--- PLAIPIN METADATA ---\n{\"locationName\": \"Blue Bottle Coffee, SF\"}\n---\n",
                "timestamp": "2025-11-01T10:00:00Z"
            }
        });
        let (status, body) = post_raw(&app, &event.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "received": true}));
        memory.assert_async().await;
    }

    /// Tests other events are acknowledged without storing anything
    #[tokio::test]
    async fn it_acknowledges_other_events() {
        let mut server = Server::new_async().await;
        let memory = server
            .mock("POST", "/memories/add")
            .expect(0)
            .create_async()
            .await;

        let app = test_app_with_config(test_config(&server.url())).await;
        let (status, body) = post_raw(&app, r#"{"event": "message.sent", "message": {}}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "received": true}));
        memory.assert_async().await;
    }

    /// Tests storage failures, including missing credentials, still
    /// answer 200
    #[tokio::test]
    async fn it_swallows_ingestion_failures() {
        let app = test_app().await;
        let (status, body) = post_raw(
            &app,
            r#"{"event": "message.received", "message": {"message_id": "m1", "text": "hi"}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "received": true}));
    }

    /// Tests payloads that aren't JSON are reported but still answer 200
    #[tokio::test]
    async fn it_reports_unparseable_payloads() {
        let app = test_app().await;
        let (status, body) = post_raw(&app, "not json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": false, "error": "Processing failed"}));
    }

    /// Tests the env report exposes presence and length only
    #[tokio::test]
    async fn it_reports_configured_credentials() {
        let app = test_app_with_config(test_config("http://127.0.0.1:9")).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/debug/env")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response).await;
        assert_eq!(
            body,
            json!({
                "hasAgentMailKey": true,
                "hasHyperspellToken": true,
                "hasOpenAIKey": false,
                "agentMailKeyLength": "test-agentmail-key".len(),
                "hyperspellTokenLength": "test-hyperspell-token".len(),
            })
        );
    }
}
