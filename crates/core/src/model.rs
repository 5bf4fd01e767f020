//! API model consumed by the request lowering stage.
//!
//! `MethodModel` and `FieldModel` are the format-agnostic capabilities the
//! builder depends on. The discovery document structs below are the one
//! implementation; they deserialize a minimal subset of the discovery
//! format with serde.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::GeneratorError;
use crate::naming::{Name, singularize};

/// Scalar types a field can lower to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Int32,
    Int64,
    Float,
    Double,
    Bool,
    Bytes,
    Any,
}

/// Declared type of a field, independent of the source format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Primitive(Primitive),
    /// Named message type, e.g. "Address"
    Message(String),
    List(Box<FieldType>),
    /// String-keyed map with the given value type
    Map(Box<FieldType>),
}

impl FieldType {
    pub fn is_list(&self) -> bool {
        matches!(self, FieldType::List(_))
    }
}

/// A field as seen by the request builder.
pub trait FieldModel {
    fn name(&self) -> &str;
    fn field_type(&self) -> FieldType;
    fn is_required(&self) -> bool;
    fn may_be_in_resource_name(&self) -> bool;
    fn description(&self) -> &str;

    fn is_repeated(&self) -> bool {
        self.field_type().is_list()
    }
}

/// A method as seen by the request builder.
pub trait MethodModel {
    type Field<'a>: FieldModel
    where
        Self: 'a;

    fn id(&self) -> &str;
    fn description(&self) -> &str;
    /// URL path template, e.g. "{project}/zones/{zone}/instances/{instance}"
    fn path(&self) -> &str;
    fn input_fields(&self) -> Vec<Self::Field<'_>>;
    fn input_field(&self, name: &str) -> Option<Self::Field<'_>>;
    /// Request body, only when it refers to a named type.
    fn request_body(&self) -> Option<Self::Field<'_>>;
    /// Canonical name of the request message.
    fn request_name(&self) -> Name;
    /// Canonical name of the request body parameter, when there is one.
    fn input_name(&self) -> Option<Name>;
    fn has_extra_field_mask(&self) -> bool;
}

/// Root discovery document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDocument {
    pub name: String,
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
}

/// A resource grouping methods. Each top-level resource is one interface.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub methods: BTreeMap<String, Method>,
}

/// An interface and its methods, in method-name order.
#[derive(Debug, Clone)]
pub struct Interface<'a> {
    pub name: &'a str,
    pub methods: Vec<&'a Method>,
}

impl DiscoveryDocument {
    pub fn from_json(json: &str) -> Result<Self, GeneratorError> {
        serde_json::from_str(json).map_err(GeneratorError::InvalidModel)
    }

    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let json = std::fs::read_to_string(path).map_err(|source| GeneratorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// One interface per top-level resource, in resource-name order.
    pub fn interfaces(&self) -> Vec<Interface<'_>> {
        self.resources
            .iter()
            .map(|(name, resource)| Interface {
                name,
                methods: resource.methods.values().collect(),
            })
            .collect()
    }
}

/// A discovery method.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Dotted id, e.g. "compute.instances.get"
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, Schema>,
    pub request: Option<Schema>,
}

/// Discovery schema, used both for parameters and for message types.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub id: Option<String>,
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    pub format: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub repeated: bool,
    /// "path" or "query" for method parameters
    pub location: Option<String>,
    pub items: Option<Box<Schema>>,
    pub additional_properties: Option<Box<Schema>>,
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Any,
    Array,
    Object,
}

impl Schema {
    /// Named reference target, ignoring empty references.
    pub fn named_reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    pub fn field_type(&self) -> FieldType {
        let element = self.element_type();
        if self.repeated && !element.is_list() {
            FieldType::List(Box::new(element))
        } else {
            element
        }
    }

    fn element_type(&self) -> FieldType {
        if let Some(reference) = self.named_reference() {
            return FieldType::Message(reference.to_string());
        }

        let format = self.format.as_deref();
        match self.schema_type {
            Some(SchemaType::String) => match format {
                Some("int64" | "uint64") => FieldType::Primitive(Primitive::Int64),
                Some("byte") => FieldType::Primitive(Primitive::Bytes),
                _ => FieldType::Primitive(Primitive::String),
            },
            Some(SchemaType::Integer) => match format {
                Some("int64" | "uint64") => FieldType::Primitive(Primitive::Int64),
                _ => FieldType::Primitive(Primitive::Int32),
            },
            Some(SchemaType::Number) => match format {
                Some("float") => FieldType::Primitive(Primitive::Float),
                _ => FieldType::Primitive(Primitive::Double),
            },
            Some(SchemaType::Boolean) => FieldType::Primitive(Primitive::Bool),
            Some(SchemaType::Array) => {
                let item = self
                    .items
                    .as_ref()
                    .map_or(FieldType::Primitive(Primitive::Any), |items| {
                        items.field_type()
                    });
                FieldType::List(Box::new(item))
            }
            Some(SchemaType::Object) => {
                if let Some(value) = &self.additional_properties {
                    FieldType::Map(Box::new(value.field_type()))
                } else if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
                    FieldType::Message(id.to_string())
                } else {
                    FieldType::Primitive(Primitive::Any)
                }
            }
            Some(SchemaType::Any) | None => FieldType::Primitive(Primitive::Any),
        }
    }
}

/// A named parameter or request body of a discovery method.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryField<'a> {
    name: &'a str,
    schema: &'a Schema,
}

impl<'a> DiscoveryField<'a> {
    pub fn new(name: &'a str, schema: &'a Schema) -> Self {
        Self { name, schema }
    }
}

impl FieldModel for DiscoveryField<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn field_type(&self) -> FieldType {
        self.schema.field_type()
    }

    fn is_required(&self) -> bool {
        self.schema.required
    }

    fn may_be_in_resource_name(&self) -> bool {
        self.schema.location.as_deref() == Some("path")
    }

    fn description(&self) -> &str {
        &self.schema.description
    }
}

impl MethodModel for Method {
    type Field<'a> = DiscoveryField<'a>;

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn input_fields(&self) -> Vec<DiscoveryField<'_>> {
        self.parameters
            .iter()
            .map(|(name, schema)| DiscoveryField::new(name, schema))
            .collect()
    }

    fn input_field(&self, name: &str) -> Option<DiscoveryField<'_>> {
        self.parameters
            .get_key_value(name)
            .map(|(name, schema)| DiscoveryField::new(name, schema))
    }

    fn request_body(&self) -> Option<DiscoveryField<'_>> {
        let schema = self.request.as_ref()?;
        let reference = schema.named_reference()?;
        Some(DiscoveryField::new(reference, schema))
    }

    /// `compute.addresses.insert` -> `InsertAddressHttpRequest`
    fn request_name(&self) -> Name {
        let mut segments = self.id.rsplit('.');
        let verb = segments.next().unwrap_or_default();
        let mut words = Name::any_camel(verb).words().to_vec();
        if let Some(resource) = segments.next() {
            let mut resource_words = Name::any_camel(resource).words().to_vec();
            if let Some(last) = resource_words.last_mut() {
                *last = singularize(last);
            }
            words.extend(resource_words);
        }
        words.extend(["http".to_string(), "request".to_string()]);
        Name::from_words(&words)
    }

    /// Request body `Address` -> `addressResource`
    fn input_name(&self) -> Option<Name> {
        let reference = self.request.as_ref()?.named_reference()?;
        Some(Name::any_camel(reference).join(&Name::from_words(&["resource"])))
    }

    fn has_extra_field_mask(&self) -> bool {
        self.http_method.eq_ignore_ascii_case("PATCH")
    }
}
