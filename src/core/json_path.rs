use crate::utils::error::{Result, YtError};
use serde_json::Value;

/// 以點分隔路徑取值，數字片段視為陣列索引 (例如 `contents.0.itemSectionRenderer`)
pub fn at_path<'a>(value: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        let next = match current {
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Object(map) => map.get(segment),
            _ => None,
        };
        current = next.ok_or_else(|| YtError::MissingKeyPathError {
            path: path.to_string(),
            segment: segment.to_string(),
        })?;
    }
    Ok(current)
}

pub fn path_str<'a>(value: &'a Value, path: &str) -> Result<&'a str> {
    at_path(value, path)?
        .as_str()
        .ok_or_else(|| YtError::unexpected(format!("{} is not a string", path)))
}

pub fn path_default<'a>(value: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    at_path(value, path).unwrap_or(default)
}

/// 取出 `runs[].text`、`simpleText` 或 `text` 形式的文字
pub fn text_of(value: &Value) -> Option<String> {
    if let Some(runs) = value.get("runs").and_then(Value::as_array) {
        let text: String = runs
            .iter()
            .filter_map(|run| run.get("text").and_then(Value::as_str))
            .collect();
        return Some(text);
    }
    value
        .get("simpleText")
        .or_else(|| value.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
