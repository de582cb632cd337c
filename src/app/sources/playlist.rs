use super::split_page;
use crate::core::client::YouTube;
use crate::core::continuation::browse_response;
use crate::core::download::PageRequest;
use crate::core::initial_data::initial_data;
use crate::core::json_path::{at_path, text_of};
use crate::core::urls::{BROWSE_AJAX_PATH, PLAYLIST_PATH};
use crate::core::ytcfg::Ytcfg;
use crate::domain::model::{Continuation, Page, PlaylistEntry};
use crate::domain::ports::{ConfigProvider, ContinuationSource};
use crate::utils::error::{Result, YtError};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

const VIDEO_LIST_PATH: &str = "contents.twoColumnBrowseResultsRenderer.tabs.0.tabRenderer.content.\
     sectionListRenderer.contents.0.itemSectionRenderer.contents.0.playlistVideoListRenderer";
const CONTINUATION_ITEMS_PATH: &str =
    "onResponseReceivedActions.0.appendContinuationItemsAction.continuationItems";
const VIDEO_KEY: &str = "playlistVideoRenderer";

pub struct PlaylistSource<'a, C: ConfigProvider> {
    client: &'a YouTube<C>,
    playlist_id: String,
    headers: Mutex<Vec<(String, String)>>,
}

impl<'a, C: ConfigProvider> PlaylistSource<'a, C> {
    pub fn new(client: &'a YouTube<C>, playlist_id: &str) -> Self {
        Self {
            client,
            playlist_id: playlist_id.to_string(),
            headers: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<C: ConfigProvider> ContinuationSource for PlaylistSource<'_, C> {
    async fn first_page(&self) -> Result<Page> {
        let html = self
            .client
            .download_page(PLAYLIST_PATH, &[("list", self.playlist_id.as_str())])
            .await?;
        let ytcfg = Ytcfg::from_html(&html)?;
        let data = initial_data(&html)?;

        let renderer = match at_path(&data, VIDEO_LIST_PATH) {
            Ok(renderer) => renderer,
            Err(YtError::MissingKeyPathError { segment, .. }) if segment == "playlistVideoListRenderer" => {
                return Err(YtError::EmptyPlaylistError {
                    playlist_id: self.playlist_id.clone(),
                });
            }
            Err(e) => return Err(e),
        };

        let items = renderer
            .get("contents")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let mut page = split_page(items, VIDEO_KEY);
        if page.next.is_none() {
            page.next = Continuation::from_continuations(renderer);
        }

        *self.headers.lock().await = ytcfg.headers();
        Ok(page)
    }

    async fn next_page(&self, continuation: &Continuation) -> Result<Page> {
        let headers = self.headers.lock().await.clone();
        let mut request = PageRequest::get(self.client.url(BROWSE_AJAX_PATH)).headers(headers);
        request.query = continuation.query();

        let value = self.client.downloader().download_json(&request).await?;
        let (response, _) = browse_response(&value)?;
        let items = at_path(response, CONTINUATION_ITEMS_PATH)?
            .as_array()
            .ok_or_else(|| YtError::unexpected("playlist continuation items are not an array"))?;
        Ok(split_page(items, VIDEO_KEY))
    }
}

impl PlaylistEntry {
    pub fn from_item(item: Value) -> Option<Self> {
        let renderer = item.get(VIDEO_KEY)?;
        Some(Self {
            video_id: renderer.get("videoId")?.as_str()?.to_string(),
            title: renderer.get("title").and_then(text_of),
            channel: renderer.get("shortBylineText").and_then(text_of),
            raw: item,
        })
    }
}
