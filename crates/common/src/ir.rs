//! Intermediate representation of an API description
//!
//! The parser produces these types, the resolver annotates them in place, and
//! the generator renders them.

use crate::GeneratorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// HTTP methods that carry CRUD semantics
///
/// Declaration order is the per-path iteration order of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeneratorError::Parse(format!("Unsupported HTTP method: {}", s)))
    }
}

/// CRUD verb inferred for a (path, method) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrudVerb {
    Create,
    Get,
    List,
    Watch,
    Replace,
    Patch,
    Delete,
}

impl CrudVerb {
    /// Lowercase verb used as the head of a synthesized operation id
    pub fn as_str(&self) -> &'static str {
        match self {
            CrudVerb::Create => "create",
            CrudVerb::Get => "get",
            CrudVerb::List => "list",
            CrudVerb::Watch => "watch",
            CrudVerb::Replace => "replace",
            CrudVerb::Patch => "patch",
            CrudVerb::Delete => "delete",
        }
    }
}

/// Key of a model's `operations` map
///
/// Serializes to the camelCase names consumed by templates, e.g.
/// `namespacedCreate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Create,
    Get,
    List,
    Watch,
    Replace,
    Patch,
    Delete,
    NamespacedCreate,
    NamespacedGet,
    NamespacedList,
    NamespacedReplace,
    NamespacedPatch,
    NamespacedDelete,
}

impl OperationKind {
    /// Compose a verb with namespace scoping
    ///
    /// Returns `None` for `watch` in a namespace, which has no key.
    ///
    /// # Examples
    /// ```
    /// use kube_codegen_common::{CrudVerb, OperationKind};
    ///
    /// assert_eq!(
    ///     OperationKind::new(CrudVerb::Create, true),
    ///     Some(OperationKind::NamespacedCreate)
    /// );
    /// assert_eq!(OperationKind::new(CrudVerb::Delete, false), Some(OperationKind::Delete));
    /// ```
    pub fn new(verb: CrudVerb, namespaced: bool) -> Option<Self> {
        let kind = match (verb, namespaced) {
            (CrudVerb::Create, false) => OperationKind::Create,
            (CrudVerb::Get, false) => OperationKind::Get,
            (CrudVerb::List, false) => OperationKind::List,
            (CrudVerb::Watch, false) => OperationKind::Watch,
            (CrudVerb::Replace, false) => OperationKind::Replace,
            (CrudVerb::Patch, false) => OperationKind::Patch,
            (CrudVerb::Delete, false) => OperationKind::Delete,
            (CrudVerb::Create, true) => OperationKind::NamespacedCreate,
            (CrudVerb::Get, true) => OperationKind::NamespacedGet,
            (CrudVerb::List, true) => OperationKind::NamespacedList,
            (CrudVerb::Replace, true) => OperationKind::NamespacedReplace,
            (CrudVerb::Patch, true) => OperationKind::NamespacedPatch,
            (CrudVerb::Delete, true) => OperationKind::NamespacedDelete,
            (CrudVerb::Watch, true) => return None,
        };
        Some(kind)
    }

    /// Map key as rendered into templates
    pub fn key(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Get => "get",
            OperationKind::List => "list",
            OperationKind::Watch => "watch",
            OperationKind::Replace => "replace",
            OperationKind::Patch => "patch",
            OperationKind::Delete => "delete",
            OperationKind::NamespacedCreate => "namespacedCreate",
            OperationKind::NamespacedGet => "namespacedGet",
            OperationKind::NamespacedList => "namespacedList",
            OperationKind::NamespacedReplace => "namespacedReplace",
            OperationKind::NamespacedPatch => "namespacedPatch",
            OperationKind::NamespacedDelete => "namespacedDelete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Wiring from a model to the generated client method that acts on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationBinding {
    /// Operation id as synthesized by path annotation
    #[serde(rename = "method")]
    pub operation_id: String,

    /// Source file holding the API class
    #[serde(rename = "fileName")]
    pub target_file_name: String,

    /// API class name
    #[serde(rename = "className")]
    pub target_type_name: String,
}

/// Per-model operation bindings
pub type OperationMap = BTreeMap<OperationKind, OperationBinding>;

/// Open key-value side channel for the emission stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorExtensions(BTreeMap<String, serde_json::Value>);

impl VendorExtensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }
}

/// Schema kinds of properties and parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "camelCase")]
pub enum PropertyKind {
    String,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Date,
    DateTime,
    Binary,
    File,
    Object,
    Array(Box<PropertyKind>),
    Map(Box<PropertyKind>),
    /// Reference to a declared model by its raw name (e.g. `v1.ObjectMeta`)
    Model(String),
}

impl PropertyKind {
    pub fn is_list_container(&self) -> bool {
        matches!(self, PropertyKind::Array(_))
    }

    pub fn is_map_container(&self) -> bool {
        matches!(self, PropertyKind::Map(_))
    }

    /// Innermost non-container kind
    pub fn base_kind(&self) -> &PropertyKind {
        match self {
            PropertyKind::Array(inner) | PropertyKind::Map(inner) => inner.base_kind(),
            other => other,
        }
    }
}

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    FormData,
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<String>,
    pub kind: PropertyKind,
    /// Validation pattern in `/regex/flags` form
    pub pattern: Option<String>,
    pub default: Option<serde_json::Value>,
    pub example: Option<String>,
    #[serde(rename = "vendorExtensions")]
    pub vendor_extensions: VendorExtensions,
}

/// One (path, method) operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "httpMethod")]
    pub http_method: HttpMethod,

    /// Owning path template
    pub path: String,

    #[serde(rename = "operationId")]
    pub operation_id: String,

    pub tags: Vec<String>,

    pub summary: Option<String>,

    pub parameters: Vec<Parameter>,
}

/// A path template and its operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPath {
    pub path: String,

    /// Non-empty `/`-delimited segments, in order
    pub segments: Vec<String>,

    pub operations: BTreeMap<HttpMethod, Operation>,
}

impl ApiPath {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let segments = split_segments(&path);
        Self {
            path,
            segments,
            operations: BTreeMap::new(),
        }
    }

    /// Add an operation, taking ownership of its method and path
    pub fn insert_operation(&mut self, mut operation: Operation) {
        operation.path = self.path.clone();
        self.operations.insert(operation.http_method, operation);
    }
}

/// Split a path template into its non-empty segments
pub fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Model property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub required: bool,
    pub description: Option<String>,
    pub kind: PropertyKind,
    /// Validation pattern in `/regex/flags` form
    pub pattern: Option<String>,
    pub default: Option<serde_json::Value>,
    #[serde(rename = "vendorExtensions")]
    pub vendor_extensions: VendorExtensions,
}

/// Declared data-model type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Raw definition name, e.g. `v1.Pod`
    pub name: String,

    pub description: Option<String>,

    pub properties: Vec<Property>,

    /// Set by the binder for qualified names
    #[serde(rename = "apiVersion", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Set by the binder for qualified names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<OperationMap>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            properties: Vec::new(),
            api_version: None,
            operations: None,
        }
    }

    /// `(apiVersion, kind)` for names of the form `<apiVersion>.<Kind>[...]`
    ///
    /// # Examples
    /// ```
    /// use kube_codegen_common::Model;
    ///
    /// assert_eq!(Model::new("v1.Pod").qualified_parts(), Some(("v1", "Pod")));
    /// assert_eq!(Model::new("Pod").qualified_parts(), None);
    /// assert_eq!(Model::new("v1.").qualified_parts(), None);
    /// ```
    pub fn qualified_parts(&self) -> Option<(&str, &str)> {
        let mut parts = self.name.split('.');
        let api_version = parts.next()?;
        let kind = parts.next().filter(|kind| !kind.is_empty())?;
        Some((api_version, kind))
    }
}

/// Whole API description after loading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDescription {
    pub title: String,
    pub version: String,
    pub paths: BTreeMap<String, ApiPath>,
    pub models: Vec<Model>,
}

impl ApiDescription {
    /// Number of (path, method) pairs
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|p| p.operations.len()).sum()
    }

    pub fn find_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }
}
