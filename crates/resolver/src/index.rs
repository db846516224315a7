//! Path → operation index
//!
//! The index is written while paths are annotated and read while models are
//! bound. The two phases are separate types: a `PathOperationIndexBuilder`
//! only accepts writes and is consumed by [`PathOperationIndexBuilder::seal`],
//! which yields the read-only `PathOperationIndex` the binder requires.

use crate::naming;
use kube_codegen_common::{GeneratorError, HttpMethod, Operation, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Tag given to operations that declare none
pub const DEFAULT_TAG: &str = "default";

/// Operation as it stood once annotation finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSnapshot {
    pub path: String,

    #[serde(rename = "httpMethod")]
    pub http_method: HttpMethod,

    /// Final operation id, e.g. `createNamespacedPod`
    #[serde(rename = "operationId")]
    pub operation_id: String,

    /// Generated method name, e.g. `create_namespaced_pod`
    pub nickname: String,

    /// Never empty
    pub tags: Vec<String>,
}

impl OperationSnapshot {
    /// Capture an annotated operation
    ///
    /// Fails with `EmptyOperationId` when the operation still has no id.
    pub fn capture(operation: &Operation) -> Result<Self> {
        let nickname = naming::to_operation_id(&operation.operation_id).ok_or_else(|| {
            GeneratorError::EmptyOperationId {
                path: operation.path.clone(),
                method: operation.http_method,
            }
        })?;

        let tags = if operation.tags.is_empty() {
            vec![DEFAULT_TAG.to_string()]
        } else {
            operation.tags.clone()
        };

        Ok(Self {
            path: operation.path.clone(),
            http_method: operation.http_method,
            operation_id: operation.operation_id.clone(),
            nickname,
            tags,
        })
    }

    /// First tag; selects the API class the operation is generated into
    pub fn primary_tag(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or(DEFAULT_TAG)
    }
}

/// Write phase of the index
#[derive(Debug, Default)]
pub struct PathOperationIndexBuilder {
    entries: BTreeMap<String, Vec<OperationSnapshot>>,
}

impl PathOperationIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot under its path; the first write creates the entry
    pub fn record(&mut self, snapshot: OperationSnapshot) {
        self.entries
            .entry(snapshot.path.clone())
            .or_default()
            .push(snapshot);
    }

    /// Finish the write phase
    pub fn seal(self) -> PathOperationIndex {
        PathOperationIndex {
            entries: self.entries,
        }
    }
}

/// Read-only path → operations table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathOperationIndex {
    entries: BTreeMap<String, Vec<OperationSnapshot>>,
}

impl PathOperationIndex {
    pub fn get(&self, path: &str) -> Option<&[OperationSnapshot]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Paths with their operations, in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OperationSnapshot])> {
        self.entries
            .iter()
            .map(|(path, ops)| (path.as_str(), ops.as_slice()))
    }

    /// All snapshots in path-then-method order
    pub fn operations(&self) -> impl Iterator<Item = &OperationSnapshot> {
        self.entries.values().flatten()
    }

    /// Number of indexed paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of indexed (path, method) pairs
    pub fn operation_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
