#![allow(dead_code)]

use httpmock::MockServer;
use serde_json::{json, Value};
use youtube_unofficial::{ClientConfig, YouTube};

pub const COOKIES: &str = "SID=sid-value; SAPISID=sapisid-value";

/// Test client pointed at the mock server, already logged in, with a 1ms backoff unit
pub fn logged_in_client(server: &MockServer) -> YouTube<ClientConfig> {
    let mut config = ClientConfig::with_cookies(COOKIES);
    config.http.base_url = Some(server.base_url());
    config.http.retry_delay_unit_ms = Some(1);
    config.session.logged_in = Some(true);
    YouTube::new(config)
}

pub fn ytcfg() -> Value {
    json!({
        "INNERTUBE_API_KEY": "test-key",
        "XSRF_TOKEN": "xsrf-1",
        "EVENT_ID": "event-1",
        "LOGGED_IN": true,
        "INNERTUBE_CONTEXT_CLIENT_NAME": 1,
        "INNERTUBE_CONTEXT_CLIENT_VERSION": "2.20240101",
        "DELEGATED_SESSION_ID": "delegated-1"
    })
}

/// HTML page embedding ytcfg and ytInitialData the way the site does
pub fn html_page(ytcfg: &Value, initial_data: &Value) -> String {
    format!(
        "<html><head><script>ytcfg.set({});</script></head><body>\
         <script>var ytInitialData = {};</script></body></html>",
        ytcfg, initial_data
    )
}

pub fn continuation_item(token: &str) -> Value {
    json!({
        "continuationItemRenderer": {
            "continuationEndpoint": {
                "clickTrackingParams": format!("itct-{}", token),
                "continuationCommand": {"token": token}
            }
        }
    })
}

pub fn video(video_id: &str) -> Value {
    json!({
        "videoRenderer": {
            "videoId": video_id,
            "title": {"runs": [{"text": format!("Title {}", video_id)}]},
            "menu": {"menuRenderer": {"topLevelButtons": [{"buttonRenderer": {
                "serviceEndpoint": {"feedbackEndpoint": {"feedbackToken": format!("remove-{}", video_id)}}
            }}]}}
        }
    })
}

pub fn playlist_video(video_id: &str) -> Value {
    json!({
        "playlistVideoRenderer": {
            "videoId": video_id,
            "title": {"runs": [{"text": format!("Title {}", video_id)}]},
            "shortBylineText": {"runs": [{"text": "Some Channel"}]}
        }
    })
}

/// Legacy browse AJAX response: `[meta, {response, xsrf_token}]`
pub fn browse_ajax(response: Value, xsrf_token: &str) -> Value {
    json!([
        {"page": "browse"},
        {"response": response, "xsrf_token": xsrf_token}
    ])
}

pub fn append_items(items: Vec<Value>) -> Value {
    json!({
        "onResponseReceivedActions": [{
            "appendContinuationItemsAction": {"continuationItems": items}
        }]
    })
}

/// `browseFeedActionsRenderer` button whose confirm dialog carries the given endpoints
pub fn feed_action_button(confirm_endpoint: Value, confirm_button_endpoint: Value) -> Value {
    json!({
        "buttonRenderer": {
            "navigationEndpoint": {
                "confirmDialogEndpoint": {
                    "content": {
                        "confirmDialogRenderer": {
                            "confirmEndpoint": confirm_endpoint,
                            "confirmButton": {"buttonRenderer": {"serviceEndpoint": confirm_button_endpoint}}
                        }
                    }
                }
            }
        }
    })
}

pub fn feed_actions(buttons: Vec<Value>) -> Value {
    json!({
        "contents": {
            "twoColumnBrowseResultsRenderer": {
                "secondaryContents": {
                    "browseFeedActionsRenderer": {"contents": buttons}
                }
            }
        }
    })
}
