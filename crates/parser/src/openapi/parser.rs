//! API description file parser

use super::types::OpenApiSpec;
use kube_codegen_common::{ApiDescription, GeneratorError, Result};
use std::fs;
use std::path::Path;

/// Swagger 2.0 / OpenAPI 3.0 document parser
///
/// Reads Kubernetes-style API descriptions (e.g. the `swagger.json` served by
/// the API server at `/openapi/v2`) from JSON or YAML.
pub struct OpenApiParser {
    /// Loaded document
    spec: OpenApiSpec,
}

impl OpenApiParser {
    /// Load a document from a file path
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, everything else as
    /// JSON.
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("swagger.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read API description {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse API description JSON: {}", e))
        })?;

        Ok(Self { spec })
    }

    /// Parse a document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_yaml::from_str(yaml).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse API description YAML: {}", e))
        })?;

        Ok(Self { spec })
    }

    /// Convert the document into the intermediate representation
    pub fn parse(&self) -> Result<ApiDescription> {
        super::converter::convert_to_api_description(&self.spec)
    }

    /// Get reference to the underlying document
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}
