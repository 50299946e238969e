//! Unmarshal functions turning message file bytes into a [`MessageFile`]

use crate::message::MessageFile;
use std::sync::Arc;

/// Error returned by an unmarshal function
pub type UnmarshalError = Box<dyn std::error::Error + Send + Sync>;

/// Pluggable decoder for one message file format
pub type UnmarshalFn = Arc<dyn Fn(&[u8]) -> Result<MessageFile, UnmarshalError> + Send + Sync>;

/// Decode a YAML message file
pub fn yaml(bytes: &[u8]) -> Result<MessageFile, UnmarshalError> {
    if is_blank(bytes) {
        return Ok(MessageFile::new());
    }
    Ok(serde_yaml::from_slice(bytes)?)
}

/// Decode a JSON message file
pub fn json(bytes: &[u8]) -> Result<MessageFile, UnmarshalError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode a TOML message file
pub fn toml(bytes: &[u8]) -> Result<MessageFile, UnmarshalError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(::toml::from_str(text)?)
}

/// Shared handle to [`yaml`]
pub fn yaml_fn() -> UnmarshalFn {
    Arc::new(yaml)
}

/// Shared handle to [`json`]
pub fn json_fn() -> UnmarshalFn {
    Arc::new(json)
}

/// Shared handle to [`toml`]
pub fn toml_fn() -> UnmarshalFn {
    Arc::new(toml)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}
