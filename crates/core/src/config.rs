//! Generator configuration loaded from TOML.
//!
//! ```toml
//! package_name = "com.google.compute.v1"
//!
//! [output]
//! root = "src/main/java"
//!
//! [[methods."compute.instances.get".flattening]]
//! fields = [
//!   { name = "instance", resource_name_treatment = "static_types", entity_name = "project_zone_instance" },
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::GeneratorError;

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Package the request classes are generated into
    pub package_name: String,
    #[serde(default)]
    pub license_header: Vec<String>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    /// Per-method configuration keyed by method id
    #[serde(default)]
    pub methods: BTreeMap<String, MethodConfig>,
}

impl GeneratorConfig {
    pub fn from_toml(contents: &str) -> Result<Self, GeneratorError> {
        toml::from_str(contents).map_err(GeneratorError::InvalidConfig)
    }

    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let contents = std::fs::read_to_string(path).map_err(|source| GeneratorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn method_config(&self, method_id: &str) -> Option<&MethodConfig> {
        self.methods.get(method_id)
    }
}

/// Where output units are placed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: String,
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: "src/main/java".to_string(),
            extension: "java".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Generate typed resource-name parameters for flattened fields
    pub resource_name_types: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            resource_name_types: true,
        }
    }
}

impl FeatureConfig {
    /// Whether a flattened field is represented as a resource name.
    pub fn use_resource_name_format(self, field: &FieldConfig) -> bool {
        self.resource_name_types
            && field.resource_name_treatment == ResourceNameTreatment::StaticTypes
            && field.entity_name.as_deref().is_some_and(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodConfig {
    /// Flattening groups, in configured order
    #[serde(default)]
    pub flattening: Vec<FlatteningGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlatteningGroup {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl FlatteningGroup {
    /// A group with a repeated resource-name field only uses resource names
    /// in samples, so none of its fields yields a resource-name parameter.
    pub fn has_repeated_resource_name(&self, features: FeatureConfig) -> bool {
        self.fields
            .iter()
            .any(|field| field.repeated && features.use_resource_name_format(field))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub resource_name_treatment: ResourceNameTreatment,
    /// Resource entity, e.g. "project_zone_instance"
    pub entity_name: Option<String>,
    /// The field carries a list of resource names
    #[serde(default)]
    pub repeated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceNameTreatment {
    #[default]
    None,
    StaticTypes,
    SampleOnly,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const CONFIG_TOML: &str = r#"
package_name = "com.google.compute.v1"
license_header = ["Copyright 2026", "Licensed under Apache-2.0"]

[output]
root = "gen/java"

[[methods."compute.instances.get".flattening]]
fields = [
  { name = "zone" },
  { name = "instance", resource_name_treatment = "static_types", entity_name = "project_zone_instance" },
]
"#;

    #[test]
    fn test_parse_config() {
        let config = GeneratorConfig::from_toml(CONFIG_TOML).unwrap();
        assert_eq!(config.package_name, "com.google.compute.v1");
        assert_eq!(config.output.root, "gen/java");
        assert_eq!(config.output.extension, "java");
        assert!(config.features.resource_name_types);
        assert_eq!(config.license_header.len(), 2);

        let method = config.method_config("compute.instances.get").unwrap();
        assert_eq!(method.flattening.len(), 1);
        let fields = &method.flattening[0].fields;
        assert_eq!(fields[0].resource_name_treatment, ResourceNameTreatment::None);
        assert_eq!(
            fields[1].resource_name_treatment,
            ResourceNameTreatment::StaticTypes
        );
        assert!(config.method_config("compute.instances.list").is_none());
    }

    #[test]
    fn test_use_resource_name_format() {
        let features = FeatureConfig::default();
        let field = FieldConfig {
            name: "instance".into(),
            resource_name_treatment: ResourceNameTreatment::StaticTypes,
            entity_name: Some("project_zone_instance".into()),
            repeated: false,
        };
        assert!(features.use_resource_name_format(&field));

        let no_entity = FieldConfig {
            entity_name: None,
            ..field.clone()
        };
        assert!(!features.use_resource_name_format(&no_entity));

        let sample_only = FieldConfig {
            resource_name_treatment: ResourceNameTreatment::SampleOnly,
            ..field.clone()
        };
        assert!(!features.use_resource_name_format(&sample_only));

        let disabled = FeatureConfig {
            resource_name_types: false,
        };
        assert!(!disabled.use_resource_name_format(&field));
    }

    #[test]
    fn test_repeated_resource_name_group() {
        let config = GeneratorConfig::from_toml(
            r#"
package_name = "com.google.compute.v1"

[[methods."compute.instances.bulkDelete".flattening]]
fields = [
  { name = "instances", resource_name_treatment = "static_types", entity_name = "project_zone_instance", repeated = true },
]

[[methods."compute.instances.bulkDelete".flattening]]
fields = [
  { name = "zone", resource_name_treatment = "static_types", entity_name = "project_zone" },
  { name = "labels", repeated = true },
]
"#,
        )
        .unwrap();
        let features = config.features;
        let groups = &config
            .method_config("compute.instances.bulkDelete")
            .unwrap()
            .flattening;
        assert!(groups[0].fields[0].repeated);
        assert!(groups[0].has_repeated_resource_name(features));
        // A repeated field that is not a resource name does not count.
        assert!(!groups[1].has_repeated_resource_name(features));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = GeneratorConfig::from_toml("package_name = 3").unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidConfig(_)));
    }
}
