//! Render-ready views produced by the lowering stage.
//!
//! Views are plain values: built once, never mutated, handed to the renderer.

use std::cmp::Ordering;

use serde::Serialize;

/// One property of a request message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    /// Wire name
    pub raw_name: String,
    /// Identifier in generated code, unique within the message
    pub name: String,
    pub type_name: String,
    /// Element type when repeated, otherwise the same as `type_name`
    pub inner_type_name: String,
    pub is_required: bool,
    pub is_repeated: bool,
    pub getter: String,
    pub setter: String,
    pub adder: Option<String>,
    pub doc_lines: Vec<String>,
    pub properties: Vec<FieldView>,
}

/// The request message of one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub name: String,
    pub type_name: String,
    pub doc_lines: Vec<String>,
    /// Sorted with [`compare_field_views`]
    pub properties: Vec<FieldView>,
    pub has_required_properties: bool,
    pub has_field_mask: bool,
    /// Request body, never part of `properties`
    pub request_body: Option<FieldView>,
}

/// Resource-name parameter chosen from a flattening group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNameParamView {
    pub name: String,
    /// Resource name class, e.g. "ProjectZoneInstanceName"
    pub type_name: String,
    pub getter: String,
    pub setter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    pub qualified_name: String,
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHeader {
    pub package_name: String,
    pub license_lines: Vec<String>,
}

/// One generated file: a positioned request view and its imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputUnit {
    pub output_path: String,
    pub imports: Vec<ImportEntry>,
    pub file_header: FileHeader,
    pub message: RequestView,
}

/// Order properties by name, ignoring case, with exact name and raw name as
/// tie-breakers so the order is total.
pub fn compare_field_views(a: &FieldView, b: &FieldView) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.raw_name.cmp(&b.raw_name))
}

/// Order output units by path, ignoring case.
pub fn compare_output_paths(a: &OutputUnit, b: &OutputUnit) -> Ordering {
    a.output_path
        .to_lowercase()
        .cmp(&b.output_path.to_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn field(name: &str, raw_name: &str) -> FieldView {
        FieldView {
            raw_name: raw_name.to_string(),
            name: name.to_string(),
            type_name: "String".into(),
            inner_type_name: "String".into(),
            is_required: false,
            is_repeated: false,
            getter: String::new(),
            setter: String::new(),
            adder: None,
            doc_lines: Vec::new(),
            properties: Vec::new(),
        }
    }

    #[test]
    fn test_compare_field_views_ignores_case() {
        let mut fields = vec![
            field("userIp", "userIp"),
            field("Zone", "zone"),
            field("accessToken", "access_token"),
            field("key", "key"),
        ];
        fields.sort_by(compare_field_views);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["accessToken", "key", "userIp", "Zone"]);
    }

    #[test]
    fn test_compare_field_views_is_total() {
        assert_eq!(
            compare_field_views(&field("Key", "a"), &field("key", "a")),
            Ordering::Less
        );
        assert_eq!(
            compare_field_views(&field("key", "a"), &field("key", "b")),
            Ordering::Less
        );
        assert_eq!(
            compare_field_views(&field("key", "a"), &field("key", "a")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_request_view_serializes_camel_case() {
        let view = RequestView {
            name: "getInstanceHttpRequest".into(),
            type_name: "GetInstanceHttpRequest".into(),
            doc_lines: Vec::new(),
            properties: vec![field("key", "key")],
            has_required_properties: true,
            has_field_mask: false,
            request_body: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["typeName"], "GetInstanceHttpRequest");
        assert_eq!(json["hasRequiredProperties"], true);
        assert_eq!(json["properties"][0]["rawName"], "key");
        assert!(json["requestBody"].is_null());
    }
}
