//! Surface type names and import bookkeeping for one interface.

use std::collections::BTreeMap;

use crate::model::{FieldType, Primitive};
use crate::naming::{Name, Namer};
use crate::symbol_table::SymbolTable;
use crate::view::ImportEntry;

/// Surface type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub type_name: String,
    /// Element type for lists, otherwise equal to `type_name`
    pub inner_type_name: String,
}

/// Maps field types to surface names and collects the imports they need.
///
/// One resolver is shared by every method of an interface so imports are
/// deduplicated across the interface's files. Aliases are allocated from
/// an internal symbol table seeded with the built-in type names.
#[derive(Debug)]
pub struct TypeResolver<'n> {
    namer: &'n dyn Namer,
    package_name: String,
    /// qualified name -> alias
    imports: BTreeMap<String, String>,
    aliases: SymbolTable,
}

impl<'n> TypeResolver<'n> {
    pub fn new(namer: &'n dyn Namer, package_name: &str) -> Self {
        let builtins = [
            Primitive::String,
            Primitive::Int32,
            Primitive::Int64,
            Primitive::Float,
            Primitive::Double,
            Primitive::Bool,
            Primitive::Bytes,
            Primitive::Any,
        ]
        .map(|p| namer.primitive_type_name(p));

        Self {
            namer,
            package_name: package_name.to_string(),
            imports: BTreeMap::new(),
            aliases: SymbolTable::from_seed(builtins),
        }
    }

    pub fn resolve(&mut self, field_type: &FieldType) -> ResolvedType {
        let type_name = self.type_name(field_type);
        let inner_type_name = match field_type {
            FieldType::List(element) => self.type_name(element),
            _ => type_name.clone(),
        };
        ResolvedType {
            type_name,
            inner_type_name,
        }
    }

    /// Return the alias for a qualified name, recording it on first use.
    pub fn record_import(&mut self, qualified_name: &str) -> String {
        if let Some(alias) = self.imports.get(qualified_name) {
            return alias.clone();
        }
        let short_name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(qualified_name);
        let alias = self.aliases.allocate(short_name);
        self.imports
            .insert(qualified_name.to_string(), alias.clone());
        alias
    }

    /// Every recorded import, ordered by qualified name.
    pub fn imports(&self) -> Vec<ImportEntry> {
        self.imports
            .iter()
            .map(|(qualified_name, alias)| ImportEntry {
                qualified_name: qualified_name.clone(),
                alias: alias.clone(),
            })
            .collect()
    }

    fn type_name(&mut self, field_type: &FieldType) -> String {
        match field_type {
            FieldType::Primitive(primitive) => {
                self.namer.primitive_type_name(*primitive).to_string()
            }
            FieldType::Message(name) => {
                let qualified = self.qualify(name);
                self.record_import(&qualified)
            }
            FieldType::List(element) => {
                let list_type = self.namer.list_type();
                let container = self.record_import(list_type);
                let element = self.type_name(element);
                self.namer.generic_type_name(&container, &[element.as_str()])
            }
            FieldType::Map(value) => {
                let map_type = self.namer.map_type();
                let container = self.record_import(map_type);
                let key = self.namer.primitive_type_name(Primitive::String);
                let value = self.type_name(value);
                self.namer
                    .generic_type_name(&container, &[key, value.as_str()])
            }
        }
    }

    fn qualify(&self, message: &str) -> String {
        if message.contains('.') {
            return message.to_string();
        }
        let class_name = self.namer.public_class_name(&Name::any_camel(message));
        if self.package_name.is_empty() {
            class_name
        } else {
            format!("{}.{class_name}", self.package_name)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::naming::JavaNamer;

    fn message(name: &str) -> FieldType {
        FieldType::Message(name.to_string())
    }

    #[test]
    fn test_primitives_need_no_import() {
        let namer = JavaNamer;
        let mut types = TypeResolver::new(&namer, "com.google.compute.v1");
        let resolved = types.resolve(&FieldType::Primitive(Primitive::Int64));
        assert_eq!(resolved.type_name, "Long");
        assert_eq!(resolved.inner_type_name, "Long");
        assert!(types.imports().is_empty());
    }

    #[test]
    fn test_list_splits_inner_type() {
        let namer = JavaNamer;
        let mut types = TypeResolver::new(&namer, "com.google.compute.v1");
        let resolved = types.resolve(&FieldType::List(Box::new(message("AttachedDisk"))));
        assert_eq!(resolved.type_name, "List<AttachedDisk>");
        assert_eq!(resolved.inner_type_name, "AttachedDisk");

        let qualified: Vec<_> = types
            .imports()
            .into_iter()
            .map(|i| i.qualified_name)
            .collect();
        assert_eq!(
            qualified,
            ["com.google.compute.v1.AttachedDisk", "java.util.List"]
        );
    }

    #[test]
    fn test_map_type() {
        let namer = JavaNamer;
        let mut types = TypeResolver::new(&namer, "com.google.compute.v1");
        let resolved = types.resolve(&FieldType::Map(Box::new(FieldType::Primitive(
            Primitive::Int32,
        ))));
        assert_eq!(resolved.type_name, "Map<String, Integer>");
        assert_eq!(resolved.inner_type_name, "Map<String, Integer>");
    }

    #[test]
    fn test_record_import_is_stable_and_disambiguates() {
        let namer = JavaNamer;
        let mut types = TypeResolver::new(&namer, "com.google.compute.v1");
        assert_eq!(types.record_import("java.util.List"), "List");
        assert_eq!(types.record_import("java.util.List"), "List");
        assert_eq!(types.record_import("java.awt.List"), "List2");
        // Built-in names are never taken by an import.
        assert_eq!(types.record_import("com.example.String"), "String2");
        assert_eq!(types.imports().len(), 3);
    }

    #[test]
    fn test_imports_match_recorded_names_one_to_one() {
        let namer = JavaNamer;
        let mut types = TypeResolver::new(&namer, "com.google.compute.v1");
        let recorded = [
            "java.util.Map",
            "com.google.compute.v1.Instance",
            "java.util.Map",
            "com.other.Instance",
        ];
        for name in recorded {
            types.record_import(name);
        }
        let imports = types.imports();
        assert_eq!(imports.len(), 3);
        let mut aliases: Vec<_> = imports.iter().map(|i| i.alias.as_str()).collect();
        aliases.sort_unstable();
        aliases.dedup();
        assert_eq!(aliases.len(), 3);
    }

    #[test]
    fn test_message_names_are_qualified_in_package() {
        let namer = JavaNamer;
        let mut types = TypeResolver::new(&namer, "com.google.compute.v1");
        assert_eq!(types.resolve(&message("address")).type_name, "Address");
        assert_eq!(
            types.imports()[0].qualified_name,
            "com.google.compute.v1.Address"
        );
        assert_eq!(types.resolve(&message("com.other.Thing")).type_name, "Thing");
    }
}
