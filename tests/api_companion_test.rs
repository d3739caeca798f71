//! Integration tests for the companion and store API endpoints

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

    async fn interact(app: &Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/companion/interact")
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

    /// Tests the seeded companion is returned
    #[tokio::test]
    async fn it_gets_the_default_companion() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/companion")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        assert_eq!(body["name"], "Buddy");
        assert_eq!(body["energy"], 85);
        assert_eq!(body["happiness"], 92);
        assert_eq!(body["level"], 12);
    }

    /// Tests each action updates and persists the stats
    #[tokio::test]
    async fn it_applies_actions() {
        let app = test_app().await;

        let (status, body) = interact(&app, json!({"action": "feed"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!((body["energy"].as_i64(), body["happiness"].as_i64()), (Some(95), Some(97)));

        let (_, body) = interact(&app, json!({"action": "play"})).await;
        assert_eq!((body["energy"].as_i64(), body["happiness"].as_i64()), (Some(90), Some(100)));

        let (_, body) = interact(&app, json!({"action": "train"})).await;
        assert_eq!((body["energy"].as_i64(), body["level"].as_i64()), (Some(80), Some(13)));
    }

    /// Tests unknown actions are rejected without changing the companion
    #[tokio::test]
    async fn it_rejects_invalid_action() {
        let app = test_app().await;

        let (status, body) = interact(&app, json!({"action": "dance"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid action"}));

        let (status, _) = interact(&app, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    /// Tests the store lists the seeded catalogue
    #[tokio::test]
    async fn it_lists_store_items() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/store/items")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0]["name"], "Rainbow Ball");
        assert_eq!(items[0]["price"], 150);
        assert_eq!(items[5]["category"], "Consumables");
    }
}
