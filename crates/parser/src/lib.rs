//! API description parsing
//!
//! This crate loads Swagger 2.0 and OpenAPI 3.0 documents and converts them
//! into the intermediate representation (`ApiDescription`) consumed by the
//! resolver.
//!
//! ## Conversion rules
//!
//! - Only GET, POST, PUT, PATCH and DELETE operations are kept
//! - Path-level parameters are merged into every operation of the path
//! - `$ref` parameters are resolved against `parameters` / `components.parameters`
//! - Schema `type`/`format` pairs are mapped by [`TypeMapper`]
//! - Validation patterns are copied verbatim; the resolver translates them

pub mod openapi;
mod type_mapper;

pub use openapi::OpenApiParser;
pub use type_mapper::TypeMapper;

use kube_codegen_common::{ApiDescription, Result};
use std::path::Path;

/// Load an API description file into the IR
///
/// # Arguments
/// * `path` - JSON or YAML document (`.yaml`/`.yml` are read as YAML)
///
/// # Returns
/// * `ApiDescription` - Intermediate representation of the API
pub fn parse_api_description<P: AsRef<Path>>(path: P) -> Result<ApiDescription> {
    let parser = OpenApiParser::from_file(path)?;
    parser.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_api_description_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"swagger": "2.0", "info": {{"title": "Kubernetes", "version": "v1"}}, "paths": {{}}}}"#
        )
        .unwrap();

        let description = parse_api_description(file.path()).unwrap();
        assert_eq!(description.title, "Kubernetes");
        assert!(description.paths.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(parse_api_description("/nonexistent/swagger.json").is_err());
    }
}
