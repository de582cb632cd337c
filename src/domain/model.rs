use serde::{Deserialize, Serialize};

/// 下一頁的 continuation token 與對應的 click tracking 參數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    pub token: String,
    pub click_tracking_params: String,
}

/// 一頁原始項目，以及 (若有) 下一頁的 continuation
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<serde_json::Value>,
    pub next: Option<Continuation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub video_id: String,
    pub title: Option<String>,
    pub channel: Option<String>,
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityHistoryEntry {
    pub content: String,
    pub summary: Option<String>,
    pub timestamp: Option<String>,
    /// perform_comment_action 用的刪除動作
    pub delete_action: Option<String>,
    pub raw: serde_json::Value,
}
