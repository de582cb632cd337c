mod common;

use common::*;
use httpmock::prelude::*;
use serde_json::json;
use youtube_unofficial::YtError;

fn toggle_endpoint(token: &str) -> serde_json::Value {
    json!({
        "clickTrackingParams": format!("ct-{}", token),
        "commandMetadata": {"webCommandMetadata": {"apiUrl": "/youtubei/v1/feedback"}},
        "feedbackEndpoint": {"feedbackToken": token}
    })
}

#[tokio::test]
async fn test_toggle_search_history() {
    let server = MockServer::start();
    let initial = feed_actions(vec![
        json!({}),
        json!({}),
        feed_action_button(toggle_endpoint("pause-search"), json!({})),
    ]);
    server.mock(|when, then| {
        when.method(GET).path("/feed/history/search_history");
        then.status(200).body(html_page(&ytcfg(), &initial));
    });
    let feedback = server.mock(|when, then| {
        when.method(POST)
            .path("/youtubei/v1/feedback")
            .query_param("key", "test-key")
            .header_exists("authorization")
            .json_body_partial(
                r#"{"feedbackTokens": ["pause-search"], "context": {"clickTracking": {"clickTrackingParams": "ct-pause-search"}, "user": {"lockedSafetyMode": false}}}"#,
            );
        then.status(200)
            .json_body(json!({"feedbackResponses": [{"isProcessed": true}]}));
    });
    let client = logged_in_client(&server);

    assert!(client.toggle_search_history().await.unwrap());
    feedback.assert();
}

#[tokio::test]
async fn test_toggle_watch_history_uses_fourth_button() {
    let server = MockServer::start();
    let initial = feed_actions(vec![
        json!({}),
        json!({}),
        json!({}),
        feed_action_button(toggle_endpoint("pause-watch"), json!({})),
    ]);
    server.mock(|when, then| {
        when.method(GET).path("/feed/history");
        then.status(200).body(html_page(&ytcfg(), &initial));
    });
    let feedback = server.mock(|when, then| {
        when.method(POST)
            .path("/youtubei/v1/feedback")
            .json_body_partial(r#"{"feedbackTokens": ["pause-watch"]}"#);
        then.status(200)
            .json_body(json!({"feedbackResponses": [{"isProcessed": false}]}));
    });
    let client = logged_in_client(&server);

    assert!(!client.toggle_watch_history().await.unwrap());
    feedback.assert();
}

#[tokio::test]
async fn test_clear_search_history() {
    let server = MockServer::start();
    let initial = feed_actions(vec![
        json!({}),
        feed_action_button(toggle_endpoint("clear-search"), json!({})),
    ]);
    server.mock(|when, then| {
        when.method(GET).path("/feed/history/search_history");
        then.status(200).body(html_page(&ytcfg(), &initial));
    });
    let feedback = server.mock(|when, then| {
        when.method(POST)
            .path("/youtubei/v1/feedback")
            .json_body_partial(r#"{"feedbackTokens": ["clear-search"], "isFeedbackTokenUnencrypted": false, "shouldMerge": false}"#);
        then.status(200)
            .json_body(json!({"feedbackResponses": [{"isProcessed": true}]}));
    });
    let client = logged_in_client(&server);

    assert!(client.clear_search_history().await.unwrap());
    feedback.assert();
}

#[tokio::test]
async fn test_missing_button_is_a_key_path_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feed/history/search_history");
        then.status(200).body(html_page(&ytcfg(), &feed_actions(vec![])));
    });
    let client = logged_in_client(&server);

    let result = client.clear_search_history().await;

    assert!(matches!(result, Err(YtError::MissingKeyPathError { .. })));
}
