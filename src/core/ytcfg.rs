use crate::core::initial_data::find_matching_brace;
use crate::utils::error::{Result, YtError};
use serde_json::{json, Map, Value};

/// 標頭名稱與對應的 ytcfg 鍵
const HEADER_KEYS: [(&str, &str); 7] = [
    ("x-youtube-client-name", "INNERTUBE_CONTEXT_CLIENT_NAME"),
    ("x-youtube-client-version", "INNERTUBE_CONTEXT_CLIENT_VERSION"),
    ("x-youtube-device", "DEVICE"),
    ("x-youtube-identity-token", "ID_TOKEN"),
    ("x-youtube-page-cl", "PAGE_CL"),
    ("x-youtube-page-label", "PAGE_BUILD_LABEL"),
    ("x-youtube-variants-checksum", "VARIANTS_CHECKSUM"),
];

/// 頁面內所有 `ytcfg.set({...})` 合併後的設定
#[derive(Debug, Clone, Default)]
pub struct Ytcfg(Map<String, Value>);

impl Ytcfg {
    pub fn from_html(html: &str) -> Result<Self> {
        let mut merged = Map::new();
        for chunk in html.split("ytcfg.set(").skip(1) {
            let Some(json_str) = find_matching_brace(chunk.trim_start()) else {
                continue;
            };
            match serde_json::from_str::<Value>(json_str) {
                Ok(Value::Object(map)) => merged.extend(map),
                Ok(_) => {}
                Err(e) => tracing::debug!("Skipping unparsable ytcfg.set block: {}", e),
            }
        }

        if merged.is_empty() {
            return Err(YtError::MissingEmbeddedJsonError {
                name: "ytcfg".to_string(),
            });
        }
        Ok(Self(merged))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str_value(&self, key: &str) -> Result<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| YtError::MissingYtcfgKeyError {
                key: key.to_string(),
            })
    }

    pub fn api_key(&self) -> Result<&str> {
        self.str_value("INNERTUBE_API_KEY")
    }

    pub fn xsrf_token(&self) -> Result<&str> {
        self.str_value("XSRF_TOKEN")
    }

    pub fn event_id(&self) -> Result<&str> {
        self.str_value("EVENT_ID")
    }

    pub fn delegated_session_id(&self) -> Option<&str> {
        self.0.get("DELEGATED_SESSION_ID").and_then(Value::as_str)
    }

    pub fn logged_in(&self) -> bool {
        self.0
            .get("LOGGED_IN")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// 舊版 AJAX 端點需要的 `x-youtube-*` 標頭，缺少的鍵略過
    pub fn headers(&self) -> Vec<(String, String)> {
        HEADER_KEYS
            .iter()
            .filter_map(|(header, key)| {
                let value = match self.0.get(*key)? {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((header.to_string(), value))
            })
            .collect()
    }

    /// innertube 請求的 `context.client`
    pub fn context_client(&self) -> Value {
        if let Some(client) = self
            .0
            .get("INNERTUBE_CONTEXT")
            .and_then(|c| c.get("client"))
        {
            return client.clone();
        }

        let mut client = Map::new();
        let flat = [
            ("clientName", "INNERTUBE_CONTEXT_CLIENT_NAME"),
            ("clientVersion", "INNERTUBE_CONTEXT_CLIENT_VERSION"),
            ("hl", "HL"),
            ("gl", "GL"),
            ("visitorData", "VISITOR_DATA"),
        ];
        for (field, key) in flat {
            if let Some(value) = self.0.get(key) {
                client.insert(field.to_string(), value.clone());
            }
        }
        Value::Object(client)
    }

    /// 完整的 innertube `context`
    pub fn context(&self, click_tracking_params: Option<&str>) -> Value {
        let mut context = json!({
            "client": self.context_client(),
            "request": {
                "consistencyTokenJars": [],
                "internalExperimentFlags": [],
            },
        });
        if let Some(params) = click_tracking_params {
            context["clickTracking"] = json!({ "clickTrackingParams": params });
        }
        context
    }
}
