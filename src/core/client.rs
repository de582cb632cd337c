use crate::app::sources::{CommunitySource, HistorySource, PlaylistSource};
use crate::core::auth::authorization_header;
use crate::core::continuation::ContinuationWalker;
use crate::core::download::{Downloader, PageRequest};
use crate::core::initial_data::initial_data;
use crate::core::json_path::{at_path, path_str};
use crate::core::urls::{
    COMMENT_ACTION_API_PATH, COMMUNITY_HISTORY_PATH, EDIT_PLAYLIST_PATH, FEEDBACK_API_PATH,
    HISTORY_PATH, HOME_PATH, PLAYLIST_PATH, SEARCH_HISTORY_PATH, SERVICE_AJAX_PATH,
    WATCH_HISTORY_PATH, WATCH_LATER_PLAYLIST_ID,
};
use crate::core::ytcfg::Ytcfg;
use crate::domain::model::{CommunityHistoryEntry, HistoryEntry, PlaylistEntry};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, YtError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

const STATUS_SUCCEEDED: &str = "STATUS_SUCCEEDED";
const REMOVE_VIDEO_PARAMS: &str = "CAFAAQ%3D%3D";

const FEED_ACTIONS_PATH: &str =
    "contents.twoColumnBrowseResultsRenderer.secondaryContents.browseFeedActionsRenderer.contents";
const CONFIRM_DIALOG_PATH: &str =
    "buttonRenderer.navigationEndpoint.confirmDialogEndpoint.content.confirmDialogRenderer";

/// 以瀏覽器 session cookie 操作帳號狀態的客戶端
pub struct YouTube<C: ConfigProvider> {
    config: C,
    downloader: Downloader,
    logged_in: AtomicBool,
    playlist_ytcfg_cache: Mutex<Option<Ytcfg>>,
}

impl<C: ConfigProvider> YouTube<C> {
    pub fn new(config: C) -> Self {
        let downloader = Downloader::new(&config);
        let logged_in = AtomicBool::new(config.assume_logged_in());
        tracing::debug!(
            "Client for {} with {} cookie(s)",
            config.base_url(),
            downloader.cookies().len()
        );
        Self {
            config,
            downloader,
            logged_in,
            playlist_ytcfg_cache: Mutex::new(None),
        }
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }

    /// 重播 session cookie，並確認首頁 ytcfg 的 `LOGGED_IN`
    pub async fn login(&self) -> Result<()> {
        if self.logged_in() {
            return Ok(());
        }
        self.downloader.cookies().sapisid()?;

        let html = self.download_page(HOME_PATH, &[]).await?;
        let ytcfg = Ytcfg::from_html(&html)?;
        if !ytcfg.logged_in() {
            return Err(YtError::AuthenticationError {
                message: "Session cookies were not accepted (LOGGED_IN is false)".to_string(),
            });
        }

        self.logged_in.store(true, Ordering::SeqCst);
        tracing::info!("Logged in with session cookies");
        Ok(())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    pub(crate) fn downloader(&self) -> &Downloader {
        &self.downloader
    }

    pub(crate) async fn download_page(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let mut request = PageRequest::get(self.url(path));
        for (key, value) in query {
            request = request.query(key, *value);
        }
        self.downloader.download_text(&request).await
    }

    fn ensure_logged_in(&self) -> Result<()> {
        if self.logged_in() {
            Ok(())
        } else {
            Err(YtError::not_logged_in())
        }
    }

    /// innertube (`/youtubei/v1/...`) 請求
    fn innertube_request(&self, api_url: &str, ytcfg: &Ytcfg, body: Value) -> Result<PageRequest> {
        Ok(PageRequest::post(self.url(api_url))
            .query("key", ytcfg.api_key()?)
            .header(
                "Authorization",
                authorization_header(self.downloader.cookies(), self.config.origin())?,
            )
            .header("x-goog-authuser", self.config.authuser())
            .header("x-origin", self.config.origin())
            .json(body))
    }

    pub async fn remove_video_id_from_playlist(
        &self,
        playlist_id: &str,
        video_id: &str,
        cache_values: bool,
    ) -> Result<bool> {
        self.ensure_logged_in()?;

        let mut cache = self.playlist_ytcfg_cache.lock().await;
        let ytcfg = match cache.as_ref() {
            Some(cached) if cache_values => cached.clone(),
            _ => {
                let html = self
                    .download_page(PLAYLIST_PATH, &[("list", playlist_id)])
                    .await?;
                Ytcfg::from_html(&html)?
            }
        };
        if cache_values {
            *cache = Some(ytcfg.clone());
        }
        drop(cache);

        let body = json!({
            "actions": [{
                "removedVideoId": video_id,
                "action": "ACTION_REMOVE_VIDEO_BY_VIDEO_ID",
            }],
            "playlistId": playlist_id,
            "params": REMOVE_VIDEO_PARAMS,
            "context": ytcfg.context(None),
        });
        let request = self.innertube_request(EDIT_PLAYLIST_PATH, &ytcfg, body)?;
        let response = self.downloader.download_json(&request).await?;

        Ok(path_str(&response, "status")? == STATUS_SUCCEEDED)
    }

    pub async fn get_playlist_info(&self, playlist_id: &str) -> Result<Vec<PlaylistEntry>> {
        self.ensure_logged_in()?;
        let items = ContinuationWalker::new(PlaylistSource::new(self, playlist_id))
            .collect()
            .await?;
        Ok(items.into_iter().filter_map(PlaylistEntry::from_item).collect())
    }

    /// 移除播放清單內所有影片，回傳成功移除的數量。`WL` 為稍後觀看
    pub async fn clear_playlist(&self, playlist_id: &str) -> Result<usize> {
        self.ensure_logged_in()?;
        let entries = match self.get_playlist_info(playlist_id).await {
            Ok(entries) => entries,
            Err(YtError::EmptyPlaylistError { .. }) => {
                tracing::info!("Playlist {} is empty", playlist_id);
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in &entries {
            tracing::debug!("Deleting from playlist: video_id = {}", entry.video_id);
            if self
                .remove_video_id_from_playlist(playlist_id, &entry.video_id, true)
                .await?
            {
                removed += 1;
            }
        }
        tracing::info!("Removed {}/{} videos from {}", removed, entries.len(), playlist_id);
        Ok(removed)
    }

    pub async fn clear_watch_later(&self) -> Result<usize> {
        self.clear_playlist(WATCH_LATER_PLAYLIST_ID).await
    }

    pub async fn get_history_info(&self) -> Result<Vec<HistoryEntry>> {
        self.ensure_logged_in()?;
        let items = ContinuationWalker::new(HistorySource::new(self))
            .collect()
            .await?;
        Ok(items.into_iter().map(HistoryEntry::from_item).collect())
    }

    /// 以影片 ID 刪除觀看記錄，全部成功才回傳 true
    pub async fn remove_video_ids_from_history(&self, video_ids: &[&str]) -> Result<bool> {
        self.ensure_logged_in()?;
        if video_ids.is_empty() {
            return Ok(false);
        }

        let entries: Vec<HistoryEntry> = self
            .get_history_info()
            .await?
            .into_iter()
            .filter(|e| e.video_id.as_deref().is_some_and(|id| video_ids.contains(&id)))
            .collect();
        if entries.is_empty() {
            return Ok(false);
        }

        let html = self.download_page(HISTORY_PATH, &[]).await?;
        let ytcfg = Ytcfg::from_html(&html)?;

        let mut all_succeeded = true;
        for entry in &entries {
            let endpoint = at_path(
                &entry.raw,
                "videoRenderer.menu.menuRenderer.topLevelButtons.0.buttonRenderer.serviceEndpoint",
            )?;
            let response = self.service_ajax_feedback(&ytcfg, endpoint, &[]).await?;
            let succeeded = response.get("code").and_then(Value::as_str) == Some("SUCCESS");
            if !succeeded {
                tracing::warn!("Could not remove {:?} from history", entry.video_id);
            }
            all_succeeded &= succeeded;
        }
        Ok(all_succeeded)
    }

    /// 舊版 `service_ajax?name=feedbackEndpoint` 呼叫
    async fn service_ajax_feedback(
        &self,
        ytcfg: &Ytcfg,
        service_endpoint: &Value,
        extra_headers: &[(String, String)],
    ) -> Result<Value> {
        let request = PageRequest::post(self.url(SERVICE_AJAX_PATH))
            .query("name", "feedbackEndpoint")
            .headers(ytcfg.headers())
            .headers(extra_headers.iter().cloned())
            .form("sej", serde_json::to_string(service_endpoint)?)
            .form("csn", ytcfg.event_id()?)
            .form("session_token", ytcfg.xsrf_token()?);
        self.downloader.download_json(&request).await
    }

    /// 清除觀看記錄；清除按鈕不存在 (記錄多半已是空的) 時回傳 false
    pub async fn clear_watch_history(&self) -> Result<bool> {
        self.ensure_logged_in()?;
        let html = self.download_page(HISTORY_PATH, &[]).await?;
        let ytcfg = Ytcfg::from_html(&html)?;
        let data = initial_data(&html)?;

        let path = format!(
            "{}.2.{}.confirmButton.buttonRenderer.serviceEndpoint",
            FEED_ACTIONS_PATH, CONFIRM_DIALOG_PATH
        );
        let endpoint = match at_path(&data, &path) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                tracing::debug!("Clear button is likely disabled. History is likely empty ({})", e);
                return Ok(false);
            }
        };

        let history_url = self.url(HISTORY_PATH);
        let spf_headers = [
            ("x-spf-previous".to_string(), history_url.clone()),
            ("x-spf-referer".to_string(), history_url),
        ];
        let response = self
            .service_ajax_feedback(&ytcfg, endpoint, &spf_headers)
            .await?;
        let succeeded = response.get("code").and_then(Value::as_str) == Some("SUCCESS");
        if succeeded {
            tracing::info!("Successfully cleared history");
        } else {
            tracing::warn!("Clearing history was rejected: {}", response);
        }
        Ok(succeeded)
    }

    async fn single_feedback_api_call(
        &self,
        ytcfg: &Ytcfg,
        feedback_token: &str,
        click_tracking_params: &str,
        api_url: &str,
    ) -> Result<bool> {
        let mut context = ytcfg.context(Some(click_tracking_params));
        context["user"] = json!({ "lockedSafetyMode": false });
        let body = json!({
            "context": context,
            "feedbackTokens": [feedback_token],
            "isFeedbackTokenUnencrypted": false,
            "shouldMerge": false,
        });

        let request = self.innertube_request(api_url, ytcfg, body)?;
        let response = self.downloader.download_json(&request).await?;
        at_path(&response, "feedbackResponses.0.isProcessed")?
            .as_bool()
            .ok_or_else(|| YtError::unexpected("isProcessed is not a boolean"))
    }

    async fn toggle_history(&self, path: &str, contents_index: usize) -> Result<bool> {
        self.ensure_logged_in()?;
        let html = self.download_page(path, &[]).await?;
        let ytcfg = Ytcfg::from_html(&html)?;
        let data = initial_data(&html)?;

        let info = at_path(
            &data,
            &format!(
                "{}.{}.{}.confirmEndpoint",
                FEED_ACTIONS_PATH, contents_index, CONFIRM_DIALOG_PATH
            ),
        )?;
        self.single_feedback_api_call(
            &ytcfg,
            path_str(info, "feedbackEndpoint.feedbackToken")?,
            path_str(info, "clickTrackingParams")?,
            path_str(info, "commandMetadata.webCommandMetadata.apiUrl")?,
        )
        .await
    }

    /// 依目前狀態暫停或恢復搜尋記錄
    pub async fn toggle_search_history(&self) -> Result<bool> {
        self.toggle_history(SEARCH_HISTORY_PATH, 2).await
    }

    /// 依目前狀態暫停或恢復觀看記錄
    pub async fn toggle_watch_history(&self) -> Result<bool> {
        self.toggle_history(WATCH_HISTORY_PATH, 3).await
    }

    pub async fn clear_search_history(&self) -> Result<bool> {
        self.ensure_logged_in()?;
        let html = self.download_page(SEARCH_HISTORY_PATH, &[]).await?;
        let ytcfg = Ytcfg::from_html(&html)?;
        let data = initial_data(&html)?;

        let token = path_str(
            &data,
            &format!(
                "{}.1.{}.confirmEndpoint.feedbackEndpoint.feedbackToken",
                FEED_ACTIONS_PATH, CONFIRM_DIALOG_PATH
            ),
        )?;
        self.single_feedback_api_call(&ytcfg, token, "", FEEDBACK_API_PATH)
            .await
    }

    pub async fn community_history(&self, only_first_page: bool) -> Result<Vec<CommunityHistoryEntry>> {
        self.ensure_logged_in()?;
        let mut walker = ContinuationWalker::new(CommunitySource::new(self));
        if only_first_page {
            walker = walker.with_max_pages(1);
        }
        let items = walker.collect().await?;
        Ok(items
            .into_iter()
            .filter_map(CommunityHistoryEntry::from_item)
            .collect())
    }

    /// 刪除一則留言記錄；`api_url` 預設為 perform_comment_action，未提供 ytcfg 時重新抓取
    pub async fn delete_community_entry(
        &self,
        action: &str,
        api_url: Option<&str>,
        ytcfg: Option<&Ytcfg>,
    ) -> Result<bool> {
        self.ensure_logged_in()?;
        let fetched;
        let ytcfg = match ytcfg {
            Some(ytcfg) => ytcfg,
            None => {
                let html = self.download_page(COMMUNITY_HISTORY_PATH, &[]).await?;
                fetched = Ytcfg::from_html(&html)?;
                &fetched
            }
        };

        let mut context = ytcfg.context(Some(""));
        if let Some(session_id) = ytcfg.delegated_session_id() {
            context["user"] = json!({ "onBehalfOfUser": session_id });
        }
        let body = json!({
            "actions": [action],
            "context": context,
        });

        let request = self.innertube_request(
            api_url.unwrap_or(COMMENT_ACTION_API_PATH),
            ytcfg,
            body,
        )?;
        let response = self.downloader.download_json(&request).await?;
        Ok(path_str(&response, "actionResults.0.status")? == STATUS_SUCCEEDED)
    }
}
