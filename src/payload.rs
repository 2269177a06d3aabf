use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{DeployError, Result};

/// Reads the `version` field of a JSON manifest such as `package.json`.
///
/// A missing file, a manifest without a `version` key, or a manifest that is
/// not valid JSON all yield `None`. Only an existing file that cannot be read
/// is an error.
pub fn read_manifest_version(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        debug!("No manifest at {}", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| DeployError::Manifest {
        path: path.display().to_string(),
        source,
    })?;

    let manifest: Value = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!("Ignoring manifest {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    Ok(manifest.get("version").cloned())
}

/// Parses the `--payload` argument. The payload must be a JSON object;
/// `null` overlays nothing.
pub fn parse_custom_payload(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(DeployError::InvalidPayloadJson(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(DeployError::InvalidPayloadJson(e.to_string())),
    }
}

/// Starts from `{version}` and overlays every key of the custom payload.
pub fn build_payload(
    version: Option<Value>,
    custom: Option<Map<String, Value>>,
) -> Map<String, Value> {
    let mut payload = Map::new();
    if let Some(version) = version {
        payload.insert("version".to_string(), version);
    }
    payload.extend(custom.unwrap_or_default());
    payload
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
