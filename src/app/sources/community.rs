use super::split_page;
use crate::core::client::YouTube;
use crate::core::continuation::browse_response;
use crate::core::download::PageRequest;
use crate::core::initial_data::initial_data;
use crate::core::json_path::{at_path, path_str, text_of};
use crate::core::urls::{BROWSE_AJAX_PATH, COMMUNITY_HISTORY_PATH};
use crate::core::ytcfg::Ytcfg;
use crate::domain::model::{CommunityHistoryEntry, Continuation, Page};
use crate::domain::ports::{ConfigProvider, ContinuationSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

const ITEM_SECTION_PATH: &str = "contents.twoColumnBrowseResultsRenderer.tabs.0.tabRenderer.\
     content.sectionListRenderer.contents.0.itemSectionRenderer";
const SECTION_CONTINUATION_PATH: &str = "continuationContents.itemSectionContinuation";
const DELETE_ACTION_PATH: &str = "actionMenu.menuRenderer.items.0.menuNavigationItemRenderer.\
     navigationEndpoint.confirmDialogEndpoint.content.confirmDialogRenderer.confirmButton.\
     buttonRenderer.serviceEndpoint.performCommentActionEndpoint.action";
const ENTRY_KEY: &str = "commentHistoryEntryRenderer";

#[derive(Default)]
struct CommunityState {
    headers: Vec<(String, String)>,
    xsrf_token: String,
}

/// 留言記錄 (comment history)
pub struct CommunitySource<'a, C: ConfigProvider> {
    client: &'a YouTube<C>,
    state: Mutex<CommunityState>,
}

impl<'a, C: ConfigProvider> CommunitySource<'a, C> {
    pub fn new(client: &'a YouTube<C>) -> Self {
        Self {
            client,
            state: Mutex::new(CommunityState::default()),
        }
    }
}

fn section_page(section: &Value) -> Page {
    let items = section
        .get("contents")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let mut page = split_page(items, ENTRY_KEY);
    if page.next.is_none() {
        page.next = Continuation::from_continuations(section);
    }
    page
}

#[async_trait]
impl<C: ConfigProvider> ContinuationSource for CommunitySource<'_, C> {
    async fn first_page(&self) -> Result<Page> {
        let html = self.client.download_page(COMMUNITY_HISTORY_PATH, &[]).await?;
        let ytcfg = Ytcfg::from_html(&html)?;
        let data = initial_data(&html)?;
        let page = section_page(at_path(&data, ITEM_SECTION_PATH)?);

        let page_url = self.client.url(COMMUNITY_HISTORY_PATH);
        let mut state = self.state.lock().await;
        state.headers = ytcfg.headers();
        state.headers.push(("x-spf-previous".to_string(), page_url.clone()));
        state.headers.push(("x-spf-referer".to_string(), page_url));
        state.xsrf_token = ytcfg.xsrf_token()?.to_string();
        Ok(page)
    }

    async fn next_page(&self, continuation: &Continuation) -> Result<Page> {
        let state = self.state.lock().await;
        let mut request = PageRequest::post(self.client.url(BROWSE_AJAX_PATH))
            .headers(state.headers.clone())
            .form("session_token", state.xsrf_token.clone());
        request.query = continuation.query();

        let value = self.client.downloader().download_json(&request).await?;
        let (response, _) = browse_response(&value)?;
        Ok(section_page(at_path(response, SECTION_CONTINUATION_PATH)?))
    }
}

impl CommunityHistoryEntry {
    pub fn from_item(item: Value) -> Option<Self> {
        let renderer = item.get(ENTRY_KEY)?;
        let delete_action = path_str(renderer, DELETE_ACTION_PATH)
            .ok()
            .map(str::to_string);
        if delete_action.is_none() {
            tracing::debug!("Comment history entry has no delete action");
        }
        Some(Self {
            content: renderer
                .get("content")
                .and_then(text_of)
                .unwrap_or_default(),
            summary: renderer.get("summary").and_then(text_of),
            timestamp: renderer.get("timestamp").and_then(text_of),
            delete_action,
            raw: item,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_from_item() {
        let item = json!({
            "commentHistoryEntryRenderer": {
                "content": {"runs": [{"text": "nice "}, {"text": "video"}]},
                "summary": {"runs": [{"text": "You commented on "}, {"text": "Some Video"}]},
                "timestamp": {"simpleText": "2 weeks ago"},
                "actionMenu": {"menuRenderer": {"items": [{"menuNavigationItemRenderer": {
                    "navigationEndpoint": {"confirmDialogEndpoint": {"content": {"confirmDialogRenderer": {
                        "confirmButton": {"buttonRenderer": {"serviceEndpoint": {
                            "performCommentActionEndpoint": {"action": "delete-me"}
                        }}}
                    }}}}
                }}]}}
            }
        });

        let entry = CommunityHistoryEntry::from_item(item).unwrap();

        assert_eq!(entry.content, "nice video");
        assert_eq!(entry.summary.as_deref(), Some("You commented on Some Video"));
        assert_eq!(entry.timestamp.as_deref(), Some("2 weeks ago"));
        assert_eq!(entry.delete_action.as_deref(), Some("delete-me"));
    }

    #[test]
    fn test_section_page_uses_next_continuation_data() {
        let section = json!({
            "contents": [{"commentHistoryEntryRenderer": {"content": {"simpleText": "hi"}}}],
            "continuations": [{"nextContinuationData": {"continuation": "c2", "clickTrackingParams": "ct"}}]
        });

        let page = section_page(&section);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next.unwrap().token, "c2");
        assert!(section_page(&json!({"contents": []})).next.is_none());
    }
}
