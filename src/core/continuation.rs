use crate::domain::model::{Continuation, Page};
use crate::domain::ports::ContinuationSource;
use crate::utils::error::{Result, YtError};
use serde_json::Value;
use std::collections::HashSet;

impl Continuation {
    /// 從 `continuationItemRenderer` 取得 continuation
    pub fn from_item_renderer(item: &Value) -> Option<Self> {
        let endpoint = item
            .get("continuationItemRenderer")?
            .get("continuationEndpoint")?;
        Some(Self {
            token: endpoint
                .get("continuationCommand")?
                .get("token")?
                .as_str()?
                .to_string(),
            click_tracking_params: endpoint
                .get("clickTrackingParams")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// 從 `continuations[0].nextContinuationData` 取得 continuation
    pub fn from_continuations(renderer: &Value) -> Option<Self> {
        let data = renderer
            .get("continuations")?
            .get(0)?
            .get("nextContinuationData")?;
        Some(Self {
            token: data.get("continuation")?.as_str()?.to_string(),
            click_tracking_params: data
                .get("clickTrackingParams")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// 舊版 browse AJAX 的 query 參數
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("ctoken".to_string(), self.token.clone()),
            ("continuation".to_string(), self.token.clone()),
            ("itct".to_string(), self.click_tracking_params.clone()),
        ]
    }
}

/// browse AJAX 回應可能是 `[meta, {response, xsrf_token}]` 或單一物件
pub fn browse_response(value: &Value) -> Result<(&Value, Option<&str>)> {
    let envelope = match value {
        Value::Array(parts) => parts
            .iter()
            .find(|part| part.get("response").is_some())
            .ok_or_else(|| YtError::unexpected("browse response array without a response"))?,
        Value::Object(_) => value,
        _ => return Err(YtError::unexpected("browse response is not JSON object or array")),
    };
    let response = envelope.get("response").unwrap_or(envelope);
    let xsrf = envelope.get("xsrf_token").and_then(Value::as_str);
    Ok((response, xsrf))
}

/// 依序抓取所有分頁直到沒有 continuation
pub struct ContinuationWalker<S: ContinuationSource> {
    source: S,
    max_pages: Option<usize>,
}

impl<S: ContinuationSource> ContinuationWalker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub async fn collect(&self) -> Result<Vec<Value>> {
        let first = self.source.first_page().await?;
        let mut items = first.items;
        let mut next = first.next;
        let mut pages = 1;
        let mut seen = HashSet::new();

        while let Some(continuation) = next.take() {
            if self.max_pages.is_some_and(|max| pages >= max) {
                tracing::debug!("Stopping after {} page(s)", pages);
                break;
            }

            seen.insert(continuation.token.clone());
            let page = self.source.next_page(&continuation).await?;
            pages += 1;
            tracing::debug!("Page {}: {} item(s)", pages, page.items.len());
            items.extend(page.items);

            next = match page.next {
                Some(following) if seen.contains(&following.token) => {
                    tracing::warn!("Continuation token {} repeated, stopping walk", following.token);
                    None
                }
                other => other,
            };
        }

        Ok(items)
    }
}
