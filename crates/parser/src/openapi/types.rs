//! Swagger 2.0 / OpenAPI 3.0 document types
//!
//! Simplified representation focusing on paths, operations, parameters and
//! schema definitions. Both `definitions` (Swagger 2.0, as served by the
//! Kubernetes API server) and `components.schemas` (OpenAPI 3.0) are read.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const DEFINITIONS_PREFIX: &str = "#/definitions/";
const COMPONENT_SCHEMAS_PREFIX: &str = "#/components/schemas/";
const PARAMETERS_PREFIX: &str = "#/parameters/";
const COMPONENT_PARAMETERS_PREFIX: &str = "#/components/parameters/";

/// Document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// Swagger version (e.g., "2.0")
    #[serde(default)]
    pub swagger: Option<String>,

    /// OpenAPI version (e.g., "3.0.0")
    #[serde(default)]
    pub openapi: Option<String>,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    /// Swagger 2.0 schema definitions
    #[serde(default)]
    pub definitions: BTreeMap<String, Schema>,

    /// Swagger 2.0 shared parameters
    #[serde(default)]
    pub parameters: HashMap<String, Parameter>,

    /// OpenAPI 3.0 reusable components
    #[serde(default)]
    pub components: Option<Components>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,

    /// API version
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,
}

/// Path item (operations for a path)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,

    #[serde(default)]
    pub head: Option<Operation>,

    #[serde(default)]
    pub options: Option<Operation>,

    /// Parameters shared by every operation of the path
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    /// OpenAPI 3.0 request body
    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<RequestBody>,

    /// Tags (for grouping)
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parameter or reference to a shared parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Box<Parameter>),
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Location: query, header, path, body, formData, cookie
    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Swagger 2.0 inline type of non-body parameters
    #[serde(rename = "type")]
    #[serde(default)]
    pub param_type: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(rename = "x-example")]
    #[serde(default)]
    pub example: Option<serde_json::Value>,

    /// Body parameter (Swagger 2.0) or any parameter (OpenAPI 3.0) schema
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,
}

/// OpenAPI 3.0 request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    /// Content types
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

/// Media type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,
}

/// Schema or reference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    /// Reference to a named schema
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },

    /// Inline schema
    Schema(Box<Schema>),
}

/// `additionalProperties` is either a flag or a value schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<SchemaOrRef>),
}

/// Schema definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Type: string, number, integer, boolean, array, object, file
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<String>,

    /// Format (e.g., int32, int64, date-time)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaOrRef>,

    /// Required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Items schema (for array type)
    #[serde(default)]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    /// Validation pattern
    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    /// Extensions (x-kubernetes-*, etc.)
    #[serde(flatten)]
    pub extensions: HashMap<String, serde_json::Value>,
}

/// OpenAPI 3.0 reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,

    #[serde(default)]
    pub parameters: HashMap<String, Parameter>,
}

impl OpenApiSpec {
    /// Name of the model a schema reference points at
    /// e.g., "#/definitions/v1.Pod" -> "v1.Pod"
    pub fn schema_ref_name(ref_path: &str) -> Option<&str> {
        ref_path
            .strip_prefix(DEFINITIONS_PREFIX)
            .or_else(|| ref_path.strip_prefix(COMPONENT_SCHEMAS_PREFIX))
    }

    /// Get a shared parameter by reference path
    pub fn resolve_parameter_ref(&self, ref_path: &str) -> Option<&Parameter> {
        if let Some(name) = ref_path.strip_prefix(PARAMETERS_PREFIX) {
            return self.parameters.get(name);
        }

        let name = ref_path.strip_prefix(COMPONENT_PARAMETERS_PREFIX)?;
        self.components
            .as_ref()
            .and_then(|c| c.parameters.get(name))
    }

    /// All named schemas, Swagger 2.0 definitions first
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.definitions.iter().chain(
            self.components
                .iter()
                .flat_map(|c| c.schemas.iter()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_ref_name() {
        assert_eq!(
            OpenApiSpec::schema_ref_name("#/definitions/v1.Pod"),
            Some("v1.Pod")
        );
        assert_eq!(
            OpenApiSpec::schema_ref_name("#/components/schemas/Pod"),
            Some("Pod")
        );
        assert_eq!(OpenApiSpec::schema_ref_name("v1.Pod"), None);
    }

    #[test]
    fn test_parameter_or_ref_untagged() {
        let parsed: Vec<ParameterOrRef> = serde_json::from_str(
            r##"[
                {"$ref": "#/parameters/pretty-nN7o5FEq"},
                {"name": "namespace", "in": "path", "required": true, "type": "string"}
            ]"##,
        )
        .unwrap();

        assert!(matches!(parsed[0], ParameterOrRef::Reference { .. }));
        match &parsed[1] {
            ParameterOrRef::Parameter(p) => {
                assert_eq!(p.name, "namespace");
                assert_eq!(p.param_type.as_deref(), Some("string"));
            }
            other => panic!("expected inline parameter, got {:?}", other),
        }
    }

    #[test]
    fn test_additional_properties_forms() {
        let flag: Schema = serde_json::from_str(r#"{"additionalProperties": true}"#).unwrap();
        assert!(matches!(
            flag.additional_properties,
            Some(AdditionalProperties::Allowed(true))
        ));

        let schema: Schema =
            serde_json::from_str(r#"{"additionalProperties": {"type": "string"}}"#).unwrap();
        assert!(matches!(
            schema.additional_properties,
            Some(AdditionalProperties::Schema(_))
        ));
    }
}
