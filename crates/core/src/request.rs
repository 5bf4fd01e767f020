//! Lowering of one method into its request message view.
//!
//! The steps run in a fixed order because each one draws names from the
//! same symbol table:
//! 1. Pick the resource-name parameter from the flattening groups
//! 2. Inject the standard query parameters the method does not declare
//! 3. Add the method's own input fields
//! 4. Add the resource identifier field
//! 5. Copy the field mask flag
//! 6. Sort the properties
//! 7. Attach the request body outside the sorted properties

use tracing::debug;

use crate::config::{FeatureConfig, FieldConfig, MethodConfig};
use crate::error::GeneratorError;
use crate::model::{FieldModel, MethodModel, Primitive};
use crate::naming::{Cardinality, Name, Namer};
use crate::symbol_table::SymbolTable;
use crate::type_resolver::TypeResolver;
use crate::view::{FieldView, RequestView, ResourceNameParamView, compare_field_views};

/// Query parameters accepted by every discovery method, in injection order.
pub const STANDARD_QUERY_PARAMS: [(&str, &str); 7] = [
    ("access_token", "OAuth 2.0 token for the current user."),
    (
        "callback",
        "Name of the JavaScript callback function that handles the response.",
    ),
    (
        "fields",
        "Selector specifying a subset of fields to include in the response.",
    ),
    (
        "key",
        "API key. Required unless you provide an OAuth 2.0 token.",
    ),
    (
        "prettyPrint",
        "Returns response with indentations and line breaks.",
    ),
    ("quotaUser", "Alternative to userIp."),
    (
        "userIp",
        "IP address of the end user for whom the API call is being made.",
    ),
];

/// Builds request views for the methods of one target.
#[derive(Debug, Clone, Copy)]
pub struct RequestViewBuilder<'a> {
    namer: &'a dyn Namer,
    features: FeatureConfig,
}

impl<'a> RequestViewBuilder<'a> {
    pub fn new(namer: &'a dyn Namer, features: FeatureConfig) -> Self {
        Self { namer, features }
    }

    /// Lower `method` into its request view.
    ///
    /// Also returns the resource-name parameter picked from the flattening
    /// configuration, if any.
    pub fn build<M: MethodModel>(
        &self,
        method: &M,
        method_config: &MethodConfig,
        types: &mut TypeResolver<'_>,
    ) -> Result<(RequestView, Option<ResourceNameParamView>), GeneratorError> {
        let resource_name = self.resource_name_param(method_config);

        let mut symbols = SymbolTable::from_seed(self.namer.reserved_words());

        let request_name = method.request_name();
        let name = symbols.allocate(&self.namer.private_field_name(&request_name));
        let type_name = self.namer.public_class_name(&request_name);
        let doc_lines = self.namer.doc_lines(&format!(
            "Request object for method {}. {}",
            method.id(),
            method.description()
        ));

        let mut properties = self.standard_query_params(method, &mut symbols);

        let mut has_required_properties = false;
        for field in method.input_fields() {
            if field.may_be_in_resource_name() {
                // Carried by the resource identifier field below.
                has_required_properties |= field.is_required();
                continue;
            }
            let preferred = self
                .namer
                .private_field_name(&Name::any_camel(field.name()));
            properties.push(self.field_view(&field, &preferred, types, Some(&mut symbols)));
            has_required_properties |= field.is_required();
        }

        properties.push(self.resource_identifier_field(
            method,
            resource_name.as_ref(),
            &mut symbols,
        )?);

        let has_field_mask = method.has_extra_field_mask();

        properties.sort_by(compare_field_views);

        let request_body = match (method.request_body(), method.input_name()) {
            (Some(body), Some(input_name)) => {
                let preferred = self.namer.private_field_name(&input_name);
                Some(self.field_view(&body, &preferred, types, None))
            }
            _ => None,
        };

        debug!(
            method = method.id(),
            request = %type_name,
            properties = properties.len(),
            has_request_body = request_body.is_some(),
            "Built request view."
        );

        let view = RequestView {
            name,
            type_name,
            doc_lines,
            properties,
            has_required_properties,
            has_field_mask,
            request_body,
        };
        Ok((view, resource_name))
    }

    /// First field, across groups in order, configured as a resource name.
    /// Groups holding a repeated resource name are skipped.
    fn resource_name_param(&self, method_config: &MethodConfig) -> Option<ResourceNameParamView> {
        let field = method_config
            .flattening
            .iter()
            .filter(|group| !group.has_repeated_resource_name(self.features))
            .flat_map(|group| group.fields.iter())
            .find(|field| self.features.use_resource_name_format(field))?;
        Some(self.resource_name_view(field))
    }

    fn resource_name_view(&self, field: &FieldConfig) -> ResourceNameParamView {
        let field_name = Name::any_camel(&field.name);
        let entity = Name::any_camel(field.entity_name.as_deref().unwrap_or_default());
        ResourceNameParamView {
            name: self.namer.private_field_name(&field_name),
            type_name: self
                .namer
                .public_class_name(&entity.join(&Name::from_words(&["name"]))),
            getter: self.namer.getter_name(&field_name),
            setter: self
                .namer
                .setter_name(&field_name, Cardinality::NotRepeated),
        }
    }

    fn standard_query_params<M: MethodModel>(
        &self,
        method: &M,
        symbols: &mut SymbolTable,
    ) -> Vec<FieldView> {
        let string_type = self.namer.primitive_type_name(Primitive::String);
        STANDARD_QUERY_PARAMS
            .iter()
            .filter(|(param, _)| method.input_field(param).is_none())
            .map(|&(param, description)| {
                let param_name = Name::any_camel(param);
                FieldView {
                    raw_name: param.to_string(),
                    name: symbols.allocate(param),
                    type_name: string_type.to_string(),
                    inner_type_name: string_type.to_string(),
                    is_required: false,
                    is_repeated: false,
                    getter: self.namer.getter_name(&param_name),
                    setter: self
                        .namer
                        .setter_name(&param_name, Cardinality::NotRepeated),
                    adder: None,
                    doc_lines: self.namer.doc_lines(description),
                    properties: Vec::new(),
                }
            })
            .collect()
    }

    /// View of a declared field. With a symbol table the name is made unique,
    /// without one `preferred` is used as is.
    fn field_view<F: FieldModel>(
        &self,
        field: &F,
        preferred: &str,
        types: &mut TypeResolver<'_>,
        symbols: Option<&mut SymbolTable>,
    ) -> FieldView {
        let field_type = field.field_type();
        let resolved = types.resolve(&field_type);
        let accessor_name = Name::any_camel(preferred);
        let is_repeated = field.is_repeated();
        let name = match symbols {
            Some(symbols) => symbols.allocate(preferred),
            None => preferred.to_string(),
        };

        FieldView {
            raw_name: name.clone(),
            name,
            type_name: resolved.type_name,
            inner_type_name: resolved.inner_type_name,
            is_required: field.is_required(),
            is_repeated,
            getter: self.namer.getter_name(&accessor_name),
            setter: self
                .namer
                .setter_name(&accessor_name, Cardinality::of_repeated(is_repeated)),
            adder: Some(self.namer.adder_name(&accessor_name)),
            doc_lines: self.namer.doc_lines(field.description()),
            properties: Vec::new(),
        }
    }

    /// The required field naming the targeted resource. Always present.
    fn resource_identifier_field<M: MethodModel>(
        &self,
        method: &M,
        resource_name: Option<&ResourceNameParamView>,
        symbols: &mut SymbolTable,
    ) -> Result<FieldView, GeneratorError> {
        let token = resource_identifier(method.path()).ok_or_else(|| {
            GeneratorError::MissingResourceIdentifier {
                method: method.id().to_string(),
                path: method.path().to_string(),
            }
        })?;
        let resource = Name::any_camel(token);
        let resource_key = resource.to_lower_camel();

        let declared = method
            .input_field(&resource_key)
            .map(|field| field.description().to_string())
            .unwrap_or_default();
        let description = resource_description(&declared, method.path(), &resource_key);

        let (raw_name, getter, setter) = match resource_name {
            Some(param) => (
                param.name.clone(),
                param.getter.clone(),
                param.setter.clone(),
            ),
            None => (
                self.namer.private_field_name(&resource),
                self.namer.getter_name(&resource),
                self.namer.setter_name(&resource, Cardinality::NotRepeated),
            ),
        };
        let string_type = self.namer.primitive_type_name(Primitive::String);

        Ok(FieldView {
            name: symbols.allocate(&raw_name),
            raw_name,
            type_name: string_type.to_string(),
            inner_type_name: string_type.to_string(),
            is_required: true,
            is_repeated: false,
            getter,
            setter,
            adder: None,
            doc_lines: self.namer.doc_lines(&description),
            properties: Vec::new(),
        })
    }
}

/// Last `{...}` variable of a path template, without a leading `+`.
pub fn resource_identifier(path: &str) -> Option<&str> {
    let open = path.rfind('{')?;
    let rest = &path[open + 1..];
    let close = rest.find('}')?;
    let token = rest[..close].trim_start_matches('+');
    (!token.is_empty()).then_some(token)
}

fn resource_description(declared: &str, path: &str, resource: &str) -> String {
    let mut description = String::new();
    if !declared.is_empty() {
        description.push_str(declared);
        description.push('\n');
    }
    description.push_str(&format!(
        "It must have the format `{path}`. `{{{resource}}}` must start with a letter,\n"
    ));
    description.push_str(
        "and contain only letters (`[A-Za-z]`), numbers (`[0-9]`), dashes (`-`),\n\
         underscores (`_`), periods (`.`), tildes (`~`), plus (`+`) or percent\n\
         signs (`%`). It must be between 3 and 255 characters in length, and it\n\
         must not start with `\"goog\"`.",
    );
    description
}
