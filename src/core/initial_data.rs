use crate::utils::error::{Result, YtError};
use serde_json::Value;

const INITIAL_DATA_MARKERS: [&str; 3] = [
    "var ytInitialData = ",
    "window[\"ytInitialData\"] = ",
    "ytInitialData = ",
];

/// 從頁面 HTML 取出 `ytInitialData`
pub fn initial_data(html: &str) -> Result<Value> {
    for marker in INITIAL_DATA_MARKERS {
        let Some(start) = html.find(marker) else {
            continue;
        };
        let rest = html[start + marker.len()..].trim_start();
        if let Some(json_str) = find_matching_brace(rest) {
            return Ok(serde_json::from_str(json_str)?);
        }
    }
    Err(YtError::MissingEmbeddedJsonError {
        name: "ytInitialData".to_string(),
    })
}

/// 回傳以 `{` 開頭、括號平衡的 JSON 物件子字串
pub(crate) fn find_matching_brace(s: &str) -> Option<&str> {
    if !s.starts_with('{') {
        return None;
    }
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;
    for (i, ch) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
