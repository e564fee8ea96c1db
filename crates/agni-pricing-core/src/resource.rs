//! Loading of static data resources (incentive schedules, regulatory
//! matrices) from JSON or YAML text.

use serde::de::DeserializeOwned;

use crate::error::AgniError;
use crate::AgniResult;

/// Serialization format of a data resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Pick a format from a file name. Anything other than `.yaml`/`.yml`
    /// is treated as JSON.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            DataFormat::Yaml
        } else {
            DataFormat::Json
        }
    }
}

/// Deserialize a resource from its text form.
pub fn parse_resource<T: DeserializeOwned>(text: &str, format: DataFormat) -> AgniResult<T> {
    if text.trim().is_empty() {
        return Err(AgniError::ConfigError("Resource is empty".into()));
    }
    match format {
        DataFormat::Json => Ok(serde_json::from_str(text)?),
        DataFormat::Yaml => Ok(serde_yaml::from_str(text)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DataFormat::from_path("matrix.yaml"), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path("MATRIX.YML"), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path("matrix.json"), DataFormat::Json);
        assert_eq!(DataFormat::from_path("matrix"), DataFormat::Json);
    }

    #[test]
    fn test_parse_json_and_yaml() {
        let json: Sample = parse_resource(r#"{"name":"a","count":2}"#, DataFormat::Json).unwrap();
        let yaml: Sample = parse_resource("name: a\ncount: 2\n", DataFormat::Yaml).unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_empty_resource_rejected() {
        let result: AgniResult<Sample> = parse_resource("   ", DataFormat::Json);
        assert!(matches!(result, Err(AgniError::ConfigError(_))));
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        let result: AgniResult<Sample> = parse_resource("name: [", DataFormat::Yaml);
        assert!(matches!(result, Err(AgniError::ConfigError(_))));
    }
}
