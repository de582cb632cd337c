pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::ClientConfig;
pub use crate::core::{
    auth::{sapisidhash, SessionCookies},
    client::YouTube,
    continuation::ContinuationWalker,
    retry::RetryPolicy,
    ytcfg::Ytcfg,
};
pub use crate::domain::model::{CommunityHistoryEntry, HistoryEntry, PlaylistEntry};
pub use crate::utils::error::{Result, YtError};
