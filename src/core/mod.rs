pub mod auth;
pub mod client;
pub mod continuation;
pub mod download;
pub mod initial_data;
pub mod json_path;
pub mod retry;
pub mod urls;
pub mod ytcfg;

pub use crate::domain::model::{Continuation, Page};
pub use crate::domain::ports::{ConfigProvider, ContinuationSource};
pub use crate::utils::error::Result;
