//! Type mapping from document types to the intermediate representation
//!
//! Maps Swagger/OpenAPI `type` + `format` pairs and schema references to
//! `PropertyKind`.

use crate::openapi::{AdditionalProperties, OpenApiSpec, Parameter, Schema, SchemaOrRef};
use kube_codegen_common::PropertyKind;

/// Maps document schemas to PropertyKind
pub struct TypeMapper;

impl TypeMapper {
    /// Map a primitive `type`/`format` pair
    ///
    /// # Examples
    /// ```
    /// use kube_codegen_parser::TypeMapper;
    /// use kube_codegen_common::PropertyKind;
    ///
    /// assert_eq!(TypeMapper::map_type(Some("string"), None), PropertyKind::String);
    /// assert_eq!(TypeMapper::map_type(Some("integer"), Some("int64")), PropertyKind::Long);
    /// assert_eq!(TypeMapper::map_type(Some("boolean"), None), PropertyKind::Boolean);
    /// ```
    pub fn map_type(schema_type: Option<&str>, format: Option<&str>) -> PropertyKind {
        match (schema_type, format) {
            (Some("integer"), Some("int64")) => PropertyKind::Long,
            (Some("integer"), _) => PropertyKind::Integer,
            (Some("number"), Some("float")) => PropertyKind::Float,
            (Some("number"), _) => PropertyKind::Double,
            (Some("boolean"), _) => PropertyKind::Boolean,
            (Some("string"), Some("date")) => PropertyKind::Date,
            (Some("string"), Some("date-time")) => PropertyKind::DateTime,
            (Some("string"), Some("byte" | "binary")) => PropertyKind::Binary,
            (Some("string"), _) => PropertyKind::String,
            (Some("file"), _) => PropertyKind::File,
            (Some("array"), _) => PropertyKind::Array(Box::new(PropertyKind::String)),
            // Objects and untyped schemas
            _ => PropertyKind::Object,
        }
    }

    /// Map a schema or a reference to a named schema
    pub fn map_schema_or_ref(schema_or_ref: &SchemaOrRef) -> PropertyKind {
        match schema_or_ref {
            SchemaOrRef::Reference { ref_path } => Self::map_ref(ref_path),
            SchemaOrRef::Schema(schema) => Self::map_schema(schema),
        }
    }

    /// Map an inline schema
    pub fn map_schema(schema: &Schema) -> PropertyKind {
        match schema.schema_type.as_deref() {
            Some("array") => {
                let inner = schema
                    .items
                    .as_deref()
                    .map(Self::map_schema_or_ref)
                    .unwrap_or(PropertyKind::String);
                PropertyKind::Array(Box::new(inner))
            }
            Some("object") | None => match &schema.additional_properties {
                Some(AdditionalProperties::Schema(value)) => {
                    PropertyKind::Map(Box::new(Self::map_schema_or_ref(value)))
                }
                Some(AdditionalProperties::Allowed(true)) => {
                    PropertyKind::Map(Box::new(PropertyKind::Object))
                }
                _ => PropertyKind::Object,
            },
            other => Self::map_type(other, schema.format.as_deref()),
        }
    }

    /// Map a parameter, using its schema when present
    pub fn map_parameter(parameter: &Parameter) -> PropertyKind {
        if let Some(ref schema) = parameter.schema {
            return Self::map_schema_or_ref(schema);
        }

        match parameter.param_type.as_deref() {
            Some("array") => {
                let inner = parameter
                    .items
                    .as_deref()
                    .map(Self::map_schema_or_ref)
                    .unwrap_or(PropertyKind::String);
                PropertyKind::Array(Box::new(inner))
            }
            other => Self::map_type(other, parameter.format.as_deref()),
        }
    }

    fn map_ref(ref_path: &str) -> PropertyKind {
        match OpenApiSpec::schema_ref_name(ref_path) {
            Some(name) => PropertyKind::Model(name.to_string()),
            // Unresolvable references default to a free-form object
            None => PropertyKind::Object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: &str) -> Schema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_map_basic_types() {
        assert_eq!(TypeMapper::map_type(Some("string"), None), PropertyKind::String);
        assert_eq!(TypeMapper::map_type(Some("integer"), None), PropertyKind::Integer);
        assert_eq!(
            TypeMapper::map_type(Some("integer"), Some("int32")),
            PropertyKind::Integer
        );
        assert_eq!(TypeMapper::map_type(Some("number"), None), PropertyKind::Double);
        assert_eq!(
            TypeMapper::map_type(Some("number"), Some("float")),
            PropertyKind::Float
        );
        assert_eq!(
            TypeMapper::map_type(Some("string"), Some("date-time")),
            PropertyKind::DateTime
        );
        assert_eq!(
            TypeMapper::map_type(Some("string"), Some("byte")),
            PropertyKind::Binary
        );
        assert_eq!(TypeMapper::map_type(None, None), PropertyKind::Object);
    }

    #[test]
    fn test_map_collections() {
        assert_eq!(
            TypeMapper::map_schema(&schema(
                r##"{"type": "array", "items": {"$ref": "#/definitions/v1.Container"}}"##
            )),
            PropertyKind::Array(Box::new(PropertyKind::Model("v1.Container".to_string())))
        );
        assert_eq!(
            TypeMapper::map_schema(&schema(
                r#"{"type": "object", "additionalProperties": {"type": "string"}}"#
            )),
            PropertyKind::Map(Box::new(PropertyKind::String))
        );
        assert_eq!(
            TypeMapper::map_schema(&schema(r#"{"type": "object"}"#)),
            PropertyKind::Object
        );
    }

    #[test]
    fn test_map_parameter() {
        let body: Parameter = serde_json::from_str(
            r##"{"name": "body", "in": "body", "schema": {"$ref": "#/definitions/v1.Pod"}}"##,
        )
        .unwrap();
        assert_eq!(
            TypeMapper::map_parameter(&body),
            PropertyKind::Model("v1.Pod".to_string())
        );

        let query: Parameter = serde_json::from_str(
            r#"{"name": "limit", "in": "query", "type": "integer"}"#,
        )
        .unwrap();
        assert_eq!(TypeMapper::map_parameter(&query), PropertyKind::Integer);
    }
}
