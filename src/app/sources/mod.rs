pub mod community;
pub mod history;
pub mod playlist;

pub use community::CommunitySource;
pub use history::HistorySource;
pub use playlist::PlaylistSource;

use crate::domain::model::{Continuation, Page};
use serde_json::Value;

/// 保留含有 `key` 的項目，遇到 `continuationItemRenderer` 即停止
pub(crate) fn split_page(items: &[Value], key: &str) -> Page {
    let mut page = Page::default();
    for item in items {
        if item.get(key).is_some() {
            page.items.push(item.clone());
        } else if let Some(next) = Continuation::from_item_renderer(item) {
            page.next = Some(next);
            break;
        }
    }
    page
}
