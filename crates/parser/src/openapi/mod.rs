//! Swagger 2.0 / OpenAPI 3.0 document parser
//!
//! Parses API descriptions into the `ApiDescription` IR.
//!
//! ## Sources
//!
//! The resolver targets Kubernetes-style descriptions:
//! - From a cluster: `kubectl proxy && curl http://localhost:8001/openapi/v2`
//! - From GitHub: `https://github.com/kubernetes/kubernetes/blob/master/api/openapi-spec/swagger.json`
//!
//! Any Swagger 2.0 or OpenAPI 3.0 document is accepted; paths that do not
//! follow Kubernetes conventions simply keep their author-supplied names.
//!
//! ## Usage
//! ```rust,ignore
//! use kube_codegen_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("swagger.json")?;
//! let description = parser.parse()?;
//! ```

mod converter;
mod parser;
mod types;

pub use parser::OpenApiParser;
pub use types::*;
