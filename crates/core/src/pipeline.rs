//! Batch generation over a whole discovery document.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::assemble::{FileAssembler, sort_output_units};
use crate::config::{GeneratorConfig, MethodConfig};
use crate::error::GeneratorError;
use crate::model::{DiscoveryDocument, Interface};
use crate::naming::Namer;
use crate::request::RequestViewBuilder;
use crate::type_resolver::TypeResolver;
use crate::view::OutputUnit;

/// Lower every method of `doc` into an output unit, sorted by output path.
///
/// The first failing method aborts the batch.
pub fn generate(
    doc: &DiscoveryDocument,
    config: &GeneratorConfig,
    namer: &dyn Namer,
) -> Result<Vec<OutputUnit>, GeneratorError> {
    let mut units = Vec::new();
    for interface in doc.interfaces() {
        units.extend(generate_interface(&interface, config, namer)?);
    }
    sort_output_units(&mut units);
    info!(api = %doc.name, files = units.len(), "Generated request views.");
    Ok(units)
}

/// Same batch as [`generate`], with interfaces processed concurrently.
pub fn generate_parallel(
    doc: &DiscoveryDocument,
    config: &GeneratorConfig,
    namer: &dyn Namer,
) -> Result<Vec<OutputUnit>, GeneratorError> {
    let per_interface: Vec<Vec<OutputUnit>> = doc
        .interfaces()
        .par_iter()
        .map(|interface| generate_interface(interface, config, namer))
        .collect::<Result<_, _>>()?;

    let mut units: Vec<OutputUnit> = per_interface.into_iter().flatten().collect();
    sort_output_units(&mut units);
    info!(api = %doc.name, files = units.len(), "Generated request views in parallel.");
    Ok(units)
}

fn generate_interface(
    interface: &Interface<'_>,
    config: &GeneratorConfig,
    namer: &dyn Namer,
) -> Result<Vec<OutputUnit>, GeneratorError> {
    let builder = RequestViewBuilder::new(namer, config.features);
    let assembler = FileAssembler::new(config);
    let mut types = TypeResolver::new(namer, &config.package_name);
    let default_config = MethodConfig::default();

    let mut units = Vec::with_capacity(interface.methods.len());
    for method in &interface.methods {
        debug!(interface = interface.name, method = %method.id, "Lowering method");
        let method_config = config.method_config(&method.id).unwrap_or(&default_config);
        let (view, _resource_name) = builder
            .build(*method, method_config, &mut types)
            .map_err(|err| err.in_interface(interface.name))?;
        units.push(assembler.assemble(view, &mut types));
    }
    Ok(units)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::naming::JavaNamer;

    const DISCOVERY: &str = r#"{
      "name": "compute",
      "version": "v1",
      "resources": {
        "zones": {
          "methods": {
            "get": {
              "id": "compute.zones.get",
              "path": "{project}/zones/{zone}",
              "httpMethod": "GET",
              "parameters": {
                "project": { "type": "string", "location": "path", "required": true },
                "zone": { "type": "string", "location": "path", "required": true }
              }
            }
          }
        },
        "addresses": {
          "methods": {
            "insert": {
              "id": "compute.addresses.insert",
              "path": "{project}/regions/{region}/addresses",
              "httpMethod": "POST",
              "parameters": {
                "region": { "type": "string", "location": "path", "required": true },
                "requestId": { "type": "string", "location": "query" }
              },
              "request": { "$ref": "Address" }
            },
            "get": {
              "id": "compute.addresses.get",
              "path": "{project}/regions/{region}/addresses/{address}",
              "httpMethod": "GET",
              "parameters": {
                "address": { "type": "string", "location": "path", "required": true }
              }
            }
          }
        }
      }
    }"#;

    fn config() -> GeneratorConfig {
        GeneratorConfig::from_toml(r#"package_name = "com.google.compute.v1""#).unwrap()
    }

    #[test]
    fn test_generate_sorted_batch() {
        let doc = DiscoveryDocument::from_json(DISCOVERY).unwrap();
        let units = generate(&doc, &config(), &JavaNamer).unwrap();
        let paths: Vec<_> = units.iter().map(|u| u.output_path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "src/main/java/com/google/compute/v1/GetAddressHttpRequest.java",
                "src/main/java/com/google/compute/v1/GetZoneHttpRequest.java",
                "src/main/java/com/google/compute/v1/InsertAddressHttpRequest.java",
            ]
        );
    }

    #[test]
    fn test_imports_accumulate_within_an_interface() {
        let doc = DiscoveryDocument::from_json(DISCOVERY).unwrap();
        let units = generate(&doc, &config(), &JavaNamer).unwrap();
        let has_address = |unit: &OutputUnit| {
            unit.imports
                .iter()
                .any(|i| i.qualified_name == "com.google.compute.v1.Address")
        };
        // addresses.get is processed before addresses.insert.
        let get_address = &units[0];
        let insert_address = &units[2];
        let get_zone = &units[1];
        assert!(!has_address(get_address));
        assert!(has_address(insert_address));
        assert!(!has_address(get_zone));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let doc = DiscoveryDocument::from_json(DISCOVERY).unwrap();
        let config = config();
        let sequential = generate(&doc, &config, &JavaNamer).unwrap();
        let parallel = generate_parallel(&doc, &config, &JavaNamer).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_missing_identifier_aborts_batch() {
        let doc = DiscoveryDocument::from_json(
            r#"{
              "name": "compute",
              "resources": {
                "projects": {
                  "methods": {
                    "list": { "id": "compute.projects.list", "path": "projects" }
                  }
                }
              }
            }"#,
        )
        .unwrap();
        let err = generate(&doc, &config(), &JavaNamer).unwrap_err();
        let GeneratorError::Interface { interface, source } = &err else {
            unreachable!("unexpected error {err}");
        };
        assert_eq!(interface, "projects");
        assert!(matches!(
            source.as_ref(),
            GeneratorError::MissingResourceIdentifier { method, .. } if method == "compute.projects.list"
        ));
        assert!(err.to_string().contains("Interface 'projects'"));
        assert!(generate_parallel(&doc, &config(), &JavaNamer).is_err());
    }
}
