use crate::core::auth::SessionCookies;
use crate::core::retry::RetryPolicy;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, YtError};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

/// 錯誤訊息中保留的回應內容長度
const ERROR_BODY_LIMIT: usize = 512;

/// 單一 HTTP 請求描述
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub form: Option<Vec<(String, String)>>,
    pub json: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl PageRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            form: None,
            json: None,
            headers: Vec::new(),
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            ..Self::get(url)
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn form(mut self, key: &str, value: impl Into<String>) -> Self {
        self.form
            .get_or_insert_with(Vec::new)
            .push((key.to_string(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// 帶著 session cookie 的 HTTP 下載器，每個請求都套用重試策略
pub struct Downloader {
    client: Client,
    cookies: SessionCookies,
    user_agent: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Downloader {
    pub fn new<C: ConfigProvider>(config: &C) -> Self {
        Self {
            client: Client::new(),
            cookies: SessionCookies::parse(config.cookie_header()),
            user_agent: config.user_agent().to_string(),
            timeout: config.timeout(),
            retry: RetryPolicy::new(config.retry_attempts(), config.retry_delay_unit()),
        }
    }

    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    pub async fn download_text(&self, request: &PageRequest) -> Result<String> {
        self.retry.run(|| self.send_once(request)).await
    }

    pub async fn download_json(&self, request: &PageRequest) -> Result<Value> {
        let text = self.download_text(request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_once(&self, request: &PageRequest) -> Result<String> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header("User-Agent", &self.user_agent)
            .timeout(self.timeout);

        if !self.cookies.is_empty() {
            builder = builder.header("Cookie", self.cookies.header());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }
        if let Some(json) = &request.json {
            builder = builder.json(json);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(YtError::StatusError {
                status: status.as_u16(),
                url: request.url.clone(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }
        Ok(body)
    }
}
