pub const BROWSE_AJAX_PATH: &str = "/browse_ajax";
pub const SERVICE_AJAX_PATH: &str = "/service_ajax";
pub const HISTORY_PATH: &str = "/feed/history";
pub const WATCH_HISTORY_PATH: &str = "/feed/history";
pub const SEARCH_HISTORY_PATH: &str = "/feed/history/search_history";
pub const COMMUNITY_HISTORY_PATH: &str = "/feed/history/comment_history";
pub const EDIT_PLAYLIST_PATH: &str = "/youtubei/v1/browse/edit_playlist";
pub const FEEDBACK_API_PATH: &str = "/youtubei/v1/feedback";
pub const COMMENT_ACTION_API_PATH: &str = "/youtubei/v1/comment/perform_comment_action";

pub const PLAYLIST_PATH: &str = "/playlist";
pub const HOME_PATH: &str = "/";

pub const WATCH_LATER_PLAYLIST_ID: &str = "WL";
