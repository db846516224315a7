//! Resource-operation resolution for Kubernetes-style API descriptions
//!
//! Turns a freshly loaded [`ApiDescription`] into one the generator can
//! render: versioned paths get canonical operation ids and tags, subresource
//! and proxy paths are dropped, validation patterns are split into portable
//! `x-regex`/`x-modifiers` pairs, and every `<apiVersion>.<Kind>` model is
//! bound to the operations that act on it.
//!
//! # Example
//!
//! ```rust,ignore
//! use kube_codegen_resolver::resolve;
//!
//! let mut description = kube_codegen_parser::parse_api_description("swagger.json")?;
//! let resolution = resolve(&mut description)?;
//! println!("{} operations", resolution.index.operation_count());
//! ```

pub mod annotator;
pub mod binder;
pub mod index;
pub mod naming;
pub mod pattern;
pub mod values;

pub use annotator::{Annotation, Removal, RemovedPath, VersionedPathAnnotator};
pub use binder::ModelOperationBinder;
pub use index::{OperationSnapshot, PathOperationIndex, PathOperationIndexBuilder};
pub use pattern::{PatternMetadata, RegexModifier};

use kube_codegen_common::{ApiDescription, Result};
use tracing::debug;

/// Outcome of [`resolve`]
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Sealed path → operation index
    pub index: PathOperationIndex,
    /// Paths removed from the description
    pub removed: Vec<RemovedPath>,
    /// Number of models that received an operation map
    pub bound_models: usize,
}

/// Run the whole resolution pipeline on `description`
///
/// Annotation always completes before binding starts; the binder only sees
/// the sealed index. The first malformed pattern or empty operation id
/// aborts the run.
pub fn resolve(description: &mut ApiDescription) -> Result<Resolution> {
    let Annotation { index, removed } = VersionedPathAnnotator::new().annotate(&mut description.paths)?;

    translate_patterns(description)?;

    let bound_models = ModelOperationBinder::new(&index).bind_all(&mut description.models);
    debug!(
        "Bound {} of {} models",
        bound_models,
        description.models.len()
    );

    Ok(Resolution {
        index,
        removed,
        bound_models,
    })
}

/// Translate the patterns of every operation parameter and model property
pub fn translate_patterns(description: &mut ApiDescription) -> Result<()> {
    for api_path in description.paths.values_mut() {
        for operation in api_path.operations.values_mut() {
            for param in &mut operation.parameters {
                let owner = format!(
                    "{} {} parameter {}",
                    operation.http_method, operation.path, param.name
                );
                pattern::apply_pattern(
                    param.pattern.as_deref(),
                    &owner,
                    &mut param.vendor_extensions,
                )?;
            }
        }
    }

    for model in &mut description.models {
        for property in &mut model.properties {
            let owner = format!("{}.{}", model.name, property.name);
            pattern::apply_pattern(
                property.pattern.as_deref(),
                &owner,
                &mut property.vendor_extensions,
            )?;
        }
    }

    Ok(())
}
