//! Model → operation binding
//!
//! Attaches to every `<apiVersion>.<Kind>` model the generated client methods
//! that create, replace, patch or delete it, by matching the model's version
//! and lowercased kind against the segments of indexed paths.

use crate::annotator::{NAMESPACE_PARAM, NAME_PARAM};
use crate::index::PathOperationIndex;
use crate::naming;
use kube_codegen_common::{
    split_segments, CrudVerb, HttpMethod, Model, OperationBinding, OperationKind, OperationMap,
};
use tracing::{debug, trace};

/// Models that share a kind across groups and are never bound
pub const EXEMPT_MODELS: &[&str] = &["v1.Scale", "v1beta1.Scale"];

/// Extension of generated API source files
pub const SOURCE_FILE_EXTENSION: &str = ".py";

/// Where the matched resource segment sits in a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathShape {
    /// The path ends with the resource segment
    Trailing,
    /// `{name}` directly follows the resource segment
    Item { ends_with_name: bool },
}

impl PathShape {
    fn classify(segments: &[String], matched: &str) -> Option<Self> {
        if segments.last().is_some_and(|last| last == matched) {
            return Some(PathShape::Trailing);
        }

        let name_index = segments.iter().position(|s| s == NAME_PARAM)?;
        let previous = segments.get(name_index.checked_sub(1)?)?;
        if previous != matched {
            return None;
        }

        Some(PathShape::Item {
            ends_with_name: segments.last().is_some_and(|last| last == NAME_PARAM),
        })
    }

    fn verb_for(&self, method: HttpMethod) -> Option<CrudVerb> {
        match (self, method) {
            (PathShape::Trailing, HttpMethod::Post) => Some(CrudVerb::Create),
            (PathShape::Item { ends_with_name: true }, HttpMethod::Delete) => Some(CrudVerb::Delete),
            (PathShape::Item { ends_with_name: true }, HttpMethod::Put) => Some(CrudVerb::Replace),
            (PathShape::Item { ends_with_name: true }, HttpMethod::Post) => Some(CrudVerb::Create),
            (PathShape::Item { ends_with_name: true }, HttpMethod::Patch) => Some(CrudVerb::Patch),
            _ => None,
        }
    }
}

/// Binds models against a sealed index
#[derive(Debug, Clone, Copy)]
pub struct ModelOperationBinder<'a> {
    index: &'a PathOperationIndex,
}

impl<'a> ModelOperationBinder<'a> {
    pub fn new(index: &'a PathOperationIndex) -> Self {
        Self { index }
    }

    /// Set `apiVersion` and `operations` on a qualified model
    ///
    /// Returns `false`, leaving the model untouched, for undotted names and
    /// the exempt `Scale` models.
    pub fn bind(&self, model: &mut Model) -> bool {
        if EXEMPT_MODELS.contains(&model.name.as_str()) {
            debug!("Skipping binding of exempt model {}", model.name);
            return false;
        }

        let Some((api_version, kind)) = model.qualified_parts() else {
            debug!("Skipping binding of unqualified model {}", model.name);
            return false;
        };

        let operations = self.operations_for(api_version, kind);
        let api_version = api_version.to_string();

        model.api_version = Some(api_version);
        model.operations = Some(operations);
        true
    }

    /// Bind every model; returns how many were bound
    pub fn bind_all(&self, models: &mut [Model]) -> usize {
        models
            .iter_mut()
            .map(|model| self.bind(model))
            .filter(|bound| *bound)
            .count()
    }

    /// Operation map for a kind under an API version
    ///
    /// Paths are scanned in order and a later binding for the same key
    /// replaces an earlier one.
    pub fn operations_for(&self, api_version: &str, kind: &str) -> OperationMap {
        let singular = kind.to_lowercase();
        let plural = naming::pluralize(&singular);
        let mut operations = OperationMap::new();

        for (path, snapshots) in self.index.iter() {
            let segments = split_segments(path);
            if !segments.iter().any(|s| s == api_version) {
                continue;
            }

            let matched = if segments.contains(&plural) {
                &plural
            } else if segments.contains(&singular) {
                &singular
            } else {
                continue;
            };

            let Some(shape) = PathShape::classify(&segments, matched) else {
                continue;
            };
            let namespaced = segments.iter().any(|s| s == NAMESPACE_PARAM);

            for snapshot in snapshots {
                let Some(key) = shape
                    .verb_for(snapshot.http_method)
                    .and_then(|verb| OperationKind::new(verb, namespaced))
                else {
                    continue;
                };

                let tag = snapshot.primary_tag();
                trace!(
                    "Binding {}.{} {} to {}",
                    api_version,
                    kind,
                    key,
                    snapshot.operation_id
                );

                operations.insert(
                    key,
                    OperationBinding {
                        operation_id: snapshot.operation_id.clone(),
                        target_file_name: format!("{}{}", tag, SOURCE_FILE_EXTENSION),
                        target_type_name: naming::to_api_name(tag),
                    },
                );
            }
        }

        operations
    }
}
