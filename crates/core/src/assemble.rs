//! Positions request views as output files.

use crate::config::GeneratorConfig;
use crate::type_resolver::TypeResolver;
use crate::view::{FileHeader, OutputUnit, RequestView, compare_output_paths};

/// Imports every generated request class needs.
pub const CORE_IMPORTS: [&str; 14] = [
    "com.google.api.core.BetaApi",
    "com.google.api.gax.httpjson.ApiMessage",
    "com.google.common.collect.ImmutableList",
    "com.google.common.collect.ImmutableMap",
    "com.google.gson.annotations.SerializedName",
    "java.util.Collections",
    "java.util.HashMap",
    "java.util.LinkedList",
    "java.util.List",
    "java.util.Map",
    "java.util.Objects",
    "java.util.Set",
    "javax.annotation.Generated",
    "javax.annotation.Nullable",
];

#[derive(Debug, Clone)]
pub struct FileAssembler<'c> {
    config: &'c GeneratorConfig,
}

impl<'c> FileAssembler<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self { config }
    }

    /// Wrap `view` in an output unit.
    ///
    /// The core imports are recorded last, so the snapshot holds every
    /// import the resolver has seen for this interface so far.
    pub fn assemble(&self, view: RequestView, types: &mut TypeResolver<'_>) -> OutputUnit {
        for import in CORE_IMPORTS {
            types.record_import(import);
        }

        OutputUnit {
            output_path: self.output_path(&view.type_name),
            imports: types.imports(),
            file_header: FileHeader {
                package_name: self.config.package_name.clone(),
                license_lines: self.config.license_header.clone(),
            },
            message: view,
        }
    }

    /// `{root}/{package dirs}/{type_name}.{extension}`. The root is kept as
    /// configured apart from trailing slashes.
    fn output_path(&self, type_name: &str) -> String {
        let output = &self.config.output;
        let file_name = if output.extension.is_empty() {
            type_name.to_string()
        } else {
            format!("{type_name}.{}", output.extension)
        };

        let mut relative: Vec<&str> = self
            .config
            .package_name
            .split('.')
            .filter(|s| !s.is_empty())
            .collect();
        relative.push(&file_name);
        let relative = relative.join("/");

        if output.root.is_empty() {
            relative
        } else {
            format!("{}/{relative}", output.root.trim_end_matches('/'))
        }
    }
}

/// Stable sort by case-insensitive output path.
pub fn sort_output_units(units: &mut [OutputUnit]) {
    units.sort_by(compare_output_paths);
}
