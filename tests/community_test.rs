mod common;

use common::*;
use httpmock::prelude::*;
use serde_json::{json, Value};

fn comment(text: &str, action: &str) -> Value {
    json!({
        "commentHistoryEntryRenderer": {
            "content": {"runs": [{"text": text}]},
            "summary": {"runs": [{"text": "You commented on "}, {"text": "A video"}]},
            "timestamp": {"simpleText": "1 day ago"},
            "actionMenu": {"menuRenderer": {"items": [{"menuNavigationItemRenderer": {
                "navigationEndpoint": {"confirmDialogEndpoint": {"content": {"confirmDialogRenderer": {
                    "confirmButton": {"buttonRenderer": {"serviceEndpoint": {
                        "performCommentActionEndpoint": {"action": action}
                    }}}
                }}}}
            }}]}}
        }
    })
}

fn community_initial_data() -> Value {
    json!({
        "contents": {"twoColumnBrowseResultsRenderer": {"tabs": [{"tabRenderer": {"content": {
            "sectionListRenderer": {"contents": [{"itemSectionRenderer": {
                "contents": [comment("first", "del-1"), comment("second", "del-2")],
                "continuations": [{"nextContinuationData": {"continuation": "cc2", "clickTrackingParams": "ct2"}}]
            }}]}
        }}}]}}
    })
}

fn mount_community(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
    let page = server.mock(|when, then| {
        when.method(GET).path("/feed/history/comment_history");
        then.status(200).body(html_page(&ytcfg(), &community_initial_data()));
    });
    let next = server.mock(|when, then| {
        when.method(POST)
            .path("/browse_ajax")
            .query_param("ctoken", "cc2")
            .query_param("itct", "ct2")
            .header_exists("x-spf-previous")
            .body_contains("session_token=xsrf-1");
        then.status(200).json_body(browse_ajax(
            json!({"continuationContents": {"itemSectionContinuation": {
                "contents": [comment("third", "del-3")]
            }}}),
            "xsrf-2",
        ));
    });
    (page, next)
}

#[tokio::test]
async fn test_community_history_walks_continuations() {
    let server = MockServer::start();
    let (page, next) = mount_community(&server);
    let client = logged_in_client(&server);

    let entries = client.community_history(false).await.unwrap();

    page.assert();
    next.assert();
    let contents: Vec<_> = entries.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
    assert_eq!(entries[2].delete_action.as_deref(), Some("del-3"));
    assert_eq!(entries[0].summary.as_deref(), Some("You commented on A video"));
}

#[tokio::test]
async fn test_community_history_first_page_only() {
    let server = MockServer::start();
    let (_, next) = mount_community(&server);
    let client = logged_in_client(&server);

    let entries = client.community_history(true).await.unwrap();

    assert_eq!(entries.len(), 2);
    next.assert_hits(0);
}

#[tokio::test]
async fn test_delete_community_entry() {
    let server = MockServer::start();
    let (page, _) = mount_community(&server);
    let action = server.mock(|when, then| {
        when.method(POST)
            .path("/youtubei/v1/comment/perform_comment_action")
            .query_param("key", "test-key")
            .header_exists("authorization")
            .json_body_partial(r#"{"actions": ["del-1"], "context": {"user": {"onBehalfOfUser": "delegated-1"}}}"#);
        then.status(200)
            .json_body(json!({"actionResults": [{"status": "STATUS_SUCCEEDED"}]}));
    });
    let client = logged_in_client(&server);

    let deleted = client.delete_community_entry("del-1", None, None).await.unwrap();

    assert!(deleted);
    action.assert();
    page.assert();
}

#[tokio::test]
async fn test_delete_community_entry_with_supplied_ytcfg() {
    let server = MockServer::start();
    let (page, _) = mount_community(&server);
    let action = server.mock(|when, then| {
        when.method(POST).path("/custom/action");
        then.status(200)
            .json_body(json!({"actionResults": [{"status": "STATUS_FAILED"}]}));
    });
    let client = logged_in_client(&server);
    let ytcfg = youtube_unofficial::Ytcfg::from_html(&html_page(&ytcfg(), &json!({}))).unwrap();

    let deleted = client
        .delete_community_entry("del-1", Some("/custom/action"), Some(&ytcfg))
        .await
        .unwrap();

    assert!(!deleted);
    action.assert();
    page.assert_hits(0);
}
