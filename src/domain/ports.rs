use crate::domain::model::{Continuation, Page};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn origin(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn cookie_header(&self) -> &str;
    fn authuser(&self) -> &str;
    fn assume_logged_in(&self) -> bool;
    fn timeout(&self) -> Duration;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_unit(&self) -> Duration;
}

/// 分頁來源：第一頁由 HTML 頁面取得，其後以 continuation token 取得
#[async_trait]
pub trait ContinuationSource: Send + Sync {
    async fn first_page(&self) -> Result<Page>;
    async fn next_page(&self, continuation: &Continuation) -> Result<Page>;
}
