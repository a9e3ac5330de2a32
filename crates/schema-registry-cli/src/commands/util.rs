use schema_registry_core::error::{Error, Result};
use schema_registry_core::types::CompatibilityPolicy;

/// Schema text arguments accept either an inline string or, when the
/// argument names an existing file, that file's contents.
pub fn read_content(content: &str) -> Result<String> {
    let path = std::path::Path::new(content);
    if path.is_file() {
        std::fs::read_to_string(path).map_err(Error::from)
    } else {
        Ok(content.to_string())
    }
}

pub fn parse_policy(raw: &str) -> Result<CompatibilityPolicy> {
    match raw.to_uppercase().as_str() {
        "NONE" => Ok(CompatibilityPolicy::None),
        "BACKWARD" => Ok(CompatibilityPolicy::Backward),
        "FORWARD" => Ok(CompatibilityPolicy::Forward),
        "FULL" => Ok(CompatibilityPolicy::Full),
        "BOTH" => Ok(CompatibilityPolicy::Both),
        other => Err(Error::ConfigurationError(format!(
            "unknown compatibility policy: {other} (expected NONE, BACKWARD, FORWARD, FULL, or BOTH)"
        ))),
    }
}
