use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, YtError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/74.0.3729.108 Safari/537.36";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// `name=value; name=value` 格式的 Cookie 標頭
    pub cookies: Option<String>,
    /// 略過 login() 的首頁檢查
    pub logged_in: Option<bool>,
    pub authuser: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub base_url: Option<String>,
    pub origin: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_unit_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl ClientConfig {
    /// 以 Cookie 標頭建立預設設定
    pub fn with_cookies(cookies: impl Into<String>) -> Self {
        Self {
            session: SessionConfig {
                cookies: Some(cookies.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(YtError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${YOUTUBE_COOKIES})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| YtError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let cookies = validation::validate_required_field("session.cookies", &self.session.cookies)?;
        validation::validate_non_empty_string("session.cookies", cookies)?;
        if cookies.contains("${") {
            return Err(YtError::InvalidConfigValueError {
                field: "session.cookies".to_string(),
                value: cookies.clone(),
                reason: "Unresolved environment variable".to_string(),
            });
        }

        validation::validate_url("http.base_url", self.base_url())?;
        validation::validate_url("http.origin", self.origin())?;

        if let Some(attempts) = self.http.retry_attempts {
            validation::validate_positive_number("http.retry_attempts", attempts as usize, 1)?;
        }
        if let Some(timeout) = self.http.timeout_seconds {
            validation::validate_range("http.timeout_seconds", timeout, 1, 600)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        self.http
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    fn origin(&self) -> &str {
        self.http.origin.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn user_agent(&self) -> &str {
        self.http.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn cookie_header(&self) -> &str {
        self.session.cookies.as_deref().unwrap_or_default()
    }

    fn authuser(&self) -> &str {
        self.session.authuser.as_deref().unwrap_or("0")
    }

    fn assume_logged_in(&self) -> bool {
        self.session.logged_in.unwrap_or(false)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds.unwrap_or(30))
    }

    fn retry_attempts(&self) -> u32 {
        self.http.retry_attempts.unwrap_or(5)
    }

    fn retry_delay_unit(&self) -> Duration {
        Duration::from_millis(self.http.retry_delay_unit_ms.unwrap_or(1000))
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[session]
cookies = "SID=abc; SAPISID=xyz"
logged_in = true

[http]
base_url = "http://127.0.0.1:9000/"
retry_attempts = 3
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.cookie_header(), "SID=abc; SAPISID=xyz");
        assert!(config.assume_logged_in());
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.origin(), DEFAULT_BASE_URL);
        assert_eq!(config.retry_attempts(), 3);
        assert_eq!(config.retry_delay_unit(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_http_section() {
        let config = ClientConfig::from_toml_str("[session]\ncookies = \"SAPISID=1\"\n").unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.authuser(), "0");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_attempts(), 5);
        assert!(!config.assume_logged_in());
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("YT_TEST_COOKIES", "SAPISID=from-env");

        let toml_content = r#"
[session]
cookies = "${YT_TEST_COOKIES}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.cookie_header(), "SAPISID=from-env");

        std::env::remove_var("YT_TEST_COOKIES");
    }

    #[test]
    fn test_config_validation() {
        let unresolved =
            ClientConfig::from_toml_str("[session]\ncookies = \"${YT_TEST_UNSET_VAR}\"\n").unwrap();
        assert!(unresolved.validate().is_err());

        let without_table = ClientConfig::from_toml_str("[http]\nretry_attempts = 2\n").unwrap();
        assert!(matches!(
            without_table.validate(),
            Err(YtError::MissingConfigError { ref field }) if field == "session.cookies"
        ));

        let missing = ClientConfig::from_toml_str("[session]\n").unwrap();
        assert!(matches!(
            missing.validate(),
            Err(YtError::MissingConfigError { .. })
        ));

        let mut bad_url = ClientConfig::with_cookies("SAPISID=1");
        bad_url.http.base_url = Some("not a url".to_string());
        assert!(bad_url.validate().is_err());

        let mut zero_retries = ClientConfig::with_cookies("SAPISID=1");
        zero_retries.http.retry_attempts = Some(0);
        assert!(zero_retries.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[session]
cookies = "SAPISID=file"

[logging]
level = "debug"
json = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.cookie_header(), "SAPISID=file");
        let logging = config.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("debug"));
        assert_eq!(logging.json, Some(true));
    }
}
