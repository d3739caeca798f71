//! Integration tests for the journal and companion chat API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_json, test_app};

    async fn get_json(app: &Router, uri: &str) -> Value {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_to_json(response).await
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
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

    /// Tests journal entries are listed newest first
    #[tokio::test]
    async fn it_lists_journal_newest_first() {
        let app = test_app().await;

        let entries = get_json(&app, "/api/journal").await;
        let titles: Vec<_> = entries
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["A wonderful day at the park", "Halloween adventures"]);
    }

    /// Tests a created entry shows up first
    #[tokio::test]
    async fn it_creates_journal_entries() {
        let app = test_app().await;

        let (status, entry) = post(
            &app,
            "/api/journal",
            json!({"title": "Rainy day", "content": "We stayed in.", "mood": "Calm"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entry["title"], "Rainy day");
        assert!(entry["createdAt"].is_string());

        let entries = get_json(&app, "/api/journal").await;
        assert_eq!(entries.as_array().unwrap().len(), 3);
        assert_eq!(entries[0]["title"], "Rainy day");
    }

    /// Tests incomplete journal entries are rejected
    #[tokio::test]
    async fn it_rejects_incomplete_journal_entries() {
        let app = test_app().await;

        let (status, body) = post(&app, "/api/journal", json!({"title": "Only a title"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Failed to create journal entry"}));
    }

    /// Tests messages are listed oldest first and filtered by partner
    #[tokio::test]
    async fn it_lists_messages_in_order() {
        let app = test_app().await;

        let messages = get_json(&app, "/api/messages").await;
        let texts: Vec<_> = messages
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["text"].as_str().unwrap())
            .collect();
        assert_eq!(
            texts,
            vec![
                "Hey Buddy! How are you today?",
                "I'm doing great! Just finished training.",
                "Let's play together!",
            ]
        );
        assert_eq!(messages[1]["isOwn"], 1);

        let luna = get_json(&app, "/api/messages?conversationWith=Luna").await;
        assert_eq!(luna.as_array().unwrap().len(), 3);

        let nobody = get_json(&app, "/api/messages?conversationWith=Max").await;
        assert!(nobody.as_array().unwrap().is_empty());

        let empty_filter = get_json(&app, "/api/messages?conversationWith=").await;
        assert_eq!(empty_filter.as_array().unwrap().len(), 3);
    }

    /// Tests sending a message appends it to the conversation
    #[tokio::test]
    async fn it_sends_messages() {
        let app = test_app().await;

        let (status, sent) = post(
            &app,
            "/api/messages",
            json!({"conversationWith": "Max", "senderName": "Buddy", "text": "Hi Max!"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sent["isOwn"], 0);

        let max = get_json(&app, "/api/messages?conversationWith=Max").await;
        assert_eq!(max.as_array().unwrap().len(), 1);
        assert_eq!(max[0]["text"], "Hi Max!");

        let (status, body) = post(&app, "/api/messages", json!({"text": "no sender"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Failed to send message"}));
    }
}
