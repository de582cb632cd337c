use crate::utils::error::{Result, YtError};
use sha1::{Digest, Sha1};

const SAPISID_COOKIES: [&str; 2] = ["SAPISID", "__Secure-3PAPISID"];

/// 解析後的 Cookie 標頭，保留原本順序
#[derive(Debug, Clone, Default)]
pub struct SessionCookies {
    cookies: Vec<(String, String)>,
}

impl SessionCookies {
    pub fn parse(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect();
        Self { cookies }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// `SAPISID`，沒有時改用 `__Secure-3PAPISID`
    pub fn sapisid(&self) -> Result<&str> {
        SAPISID_COOKIES
            .iter()
            .find_map(|name| self.get(name))
            .ok_or_else(|| YtError::MissingCookieError {
                name: SAPISID_COOKIES.join(" or "),
            })
    }

    pub fn header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

/// `SAPISIDHASH {ts}_{sha1("{ts} {secret} {origin}")}`
pub fn sapisidhash(timestamp: i64, secret: &str, origin: &str) -> String {
    let digest = Sha1::digest(format!("{} {} {}", timestamp, secret, origin).as_bytes());
    format!("SAPISIDHASH {}_{:x}", timestamp, digest)
}

/// 以目前時間產生私有 API 所需的 Authorization 標頭
pub fn authorization_header(cookies: &SessionCookies, origin: &str) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    Ok(sapisidhash(now, cookies.sapisid()?, origin))
}
