use crate::core::client::YouTube;
use crate::core::continuation::browse_response;
use crate::core::download::PageRequest;
use crate::core::json_path::{at_path, text_of};
use crate::core::urls::{BROWSE_AJAX_PATH, HISTORY_PATH};
use crate::core::ytcfg::Ytcfg;
use crate::core::initial_data::initial_data;
use crate::domain::model::{Continuation, HistoryEntry, Page};
use crate::domain::ports::{ConfigProvider, ContinuationSource};
use crate::utils::error::{Result, YtError};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

const SECTION_LIST_PATH: &str =
    "contents.twoColumnBrowseResultsRenderer.tabs.0.tabRenderer.content.sectionListRenderer";
const CONTINUATION_ITEMS_PATH: &str =
    "onResponseReceivedActions.0.appendContinuationItemsAction.continuationItems";

#[derive(Default)]
struct HistoryState {
    headers: Vec<(String, String)>,
    xsrf_token: String,
}

/// 觀看記錄：第一頁來自 `/feed/history`，其後 POST browse AJAX 並帶上滾動更新的 XSRF token
pub struct HistorySource<'a, C: ConfigProvider> {
    client: &'a YouTube<C>,
    state: Mutex<HistoryState>,
}

impl<'a, C: ConfigProvider> HistorySource<'a, C> {
    pub fn new(client: &'a YouTube<C>) -> Self {
        Self {
            client,
            state: Mutex::new(HistoryState::default()),
        }
    }
}

/// 展開 `itemSectionRenderer.contents`，遇到 `continuationItemRenderer` 即停止
fn flatten_sections(sections: &[Value]) -> Page {
    let mut page = Page::default();
    for section in sections {
        if let Some(contents) = section
            .get("itemSectionRenderer")
            .and_then(|s| s.get("contents"))
            .and_then(Value::as_array)
        {
            page.items.extend(contents.iter().cloned());
        } else if let Some(next) = Continuation::from_item_renderer(section) {
            page.next = Some(next);
            break;
        } else {
            tracing::debug!("Skipping history section without item contents");
        }
    }
    page
}

#[async_trait]
impl<C: ConfigProvider> ContinuationSource for HistorySource<'_, C> {
    async fn first_page(&self) -> Result<Page> {
        let html = self.client.download_page(HISTORY_PATH, &[]).await?;
        let ytcfg = Ytcfg::from_html(&html)?;
        let data = initial_data(&html)?;

        let section_list = at_path(&data, SECTION_LIST_PATH)?;
        let sections = section_list
            .get("contents")
            .and_then(Value::as_array)
            .ok_or_else(|| YtError::unexpected("history section list has no contents"))?;

        let mut page = flatten_sections(sections);
        if page.next.is_none() {
            page.next = Continuation::from_continuations(section_list);
        }

        let mut state = self.state.lock().await;
        state.headers = ytcfg.headers();
        state.xsrf_token = ytcfg.xsrf_token()?.to_string();
        Ok(page)
    }

    async fn next_page(&self, continuation: &Continuation) -> Result<Page> {
        let mut state = self.state.lock().await;
        let mut request = PageRequest::post(self.client.url(BROWSE_AJAX_PATH))
            .headers(state.headers.clone())
            .form("session_token", state.xsrf_token.clone());
        request.query = continuation.query();

        let value = self.client.downloader().download_json(&request).await?;
        let (response, xsrf) = browse_response(&value)?;
        if let Some(xsrf) = xsrf {
            state.xsrf_token = xsrf.to_string();
        }

        let sections = match at_path(response, CONTINUATION_ITEMS_PATH) {
            Ok(Value::Array(sections)) => sections,
            _ => {
                // 多半是記錄的結尾
                tracing::debug!(
                    "No continuation items in history response. Keys: {:?}",
                    response
                        .as_object()
                        .map(|o| o.keys().cloned().collect::<Vec<_>>())
                        .unwrap_or_default()
                );
                return Ok(Page::default());
            }
        };
        Ok(flatten_sections(sections))
    }
}

impl HistoryEntry {
    pub fn from_item(item: Value) -> Self {
        let renderer = item.get("videoRenderer");
        Self {
            video_id: renderer
                .and_then(|r| r.get("videoId"))
                .and_then(Value::as_str)
                .map(str::to_string),
            title: renderer.and_then(|r| r.get("title")).and_then(text_of),
            raw: item,
        }
    }
}
