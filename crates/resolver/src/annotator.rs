//! Versioned path annotation
//!
//! Kubernetes-style paths carry a version token (`v1`, `v1beta1`, ...) after
//! an optional group prefix. Everything after the version describes the
//! resource: `namespaces/{namespace}` scoping, a collection segment and an
//! optional `{name}` item segment. From that shape the annotator derives a
//! canonical operation id (`deleteNamespacedPod`), rewrites the grouping tag
//! and drops paths that do not fit plain CRUD semantics.

use crate::index::{OperationSnapshot, PathOperationIndex, PathOperationIndexBuilder};
use crate::naming;
use kube_codegen_common::{split_segments, ApiPath, CrudVerb, HttpMethod, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, info};

/// `(prefix)(version)(suffix)`, matching the last version token in the path
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)(v\d+(?:(?:alpha|beta)\d+)?)(.*)$").expect("valid version regex")
});

/// Last components that mark a subresource rather than a resource
const SIDE_CHANNEL_COMPONENTS: &[&str] = &[
    "watch",
    "status",
    "attach",
    "exec",
    "portforward",
    "binding",
    "bindings",
];

const PROXY_COMPONENT: &str = "proxy";
const WATCH_COMPONENT: &str = "watch";
const NAMESPACES_COMPONENT: &str = "namespaces";
pub(crate) const NAME_PARAM: &str = "{name}";
pub(crate) const NAMESPACE_PARAM: &str = "{namespace}";

/// Why a path was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Removal {
    /// The path proxies to another endpoint
    Proxy,
    /// The path ends in a subresource such as `status` or `exec`
    SideChannel(String),
}

impl fmt::Display for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Removal::Proxy => f.write_str("proxy"),
            Removal::SideChannel(component) => write!(f, "{} subresource", component),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedPath {
    pub path: String,
    pub reason: Removal,
}

/// Result of annotating a path set
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Surviving operations, sealed
    pub index: PathOperationIndex,
    /// Paths dropped from the description, in path order
    pub removed: Vec<RemovedPath>,
}

/// A path split around its version token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionedPath<'a> {
    /// Group prefix plus version, e.g. `/apis/apps/v1`
    pub stem: &'a str,
    /// Resource part after the version, e.g. `/namespaces/{namespace}/deployments`
    pub suffix: &'a str,
}

impl<'a> VersionedPath<'a> {
    /// Split a path; `None` when it carries no version token
    ///
    /// # Examples
    /// ```
    /// use kube_codegen_resolver::annotator::VersionedPath;
    ///
    /// let split = VersionedPath::split("/apis/apps/v1beta1/deployments").unwrap();
    /// assert_eq!(split.stem, "/apis/apps/v1beta1");
    /// assert_eq!(split.suffix, "/deployments");
    /// assert!(VersionedPath::split("/healthz").is_none());
    /// ```
    pub fn split(path: &'a str) -> Option<Self> {
        let captures = VERSION_PATTERN.captures(path)?;
        let stem_end = captures.get(2)?.end();
        Some(Self {
            stem: &path[..stem_end],
            suffix: &path[stem_end..],
        })
    }
}

/// Rewrites operation ids and tags of versioned paths and builds the index
#[derive(Debug, Default, Clone, Copy)]
pub struct VersionedPathAnnotator;

impl VersionedPathAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Annotate `paths` in place
    ///
    /// Runs a scan pass that rewrites tags and ids and collects unsupported
    /// paths, then an apply pass that deletes them. The survivors are indexed
    /// path-then-method. Fails if an indexed operation ends up without an id.
    pub fn annotate(&self, paths: &mut BTreeMap<String, ApiPath>) -> Result<Annotation> {
        let mut removed = Vec::new();

        for (path, api_path) in paths.iter_mut() {
            let versioned = VersionedPath::split(path);

            let tag_source = versioned.map(|v| v.stem).unwrap_or(path.as_str());
            for operation in api_path.operations.values_mut() {
                rewrite_tag(&mut operation.tags, tag_source);
            }

            let Some(versioned) = versioned else {
                continue;
            };

            let components = split_segments(versioned.suffix);
            if let Some(reason) = removal_reason(&components) {
                removed.push(RemovedPath {
                    path: path.clone(),
                    reason,
                });
                continue;
            }

            for (method, operation) in api_path.operations.iter_mut() {
                operation.operation_id = synthesize_operation_id(*method, &components);
            }
        }

        for entry in &removed {
            info!("Removing path {} ({})", entry.path, entry.reason);
            paths.remove(&entry.path);
        }

        let mut builder = PathOperationIndexBuilder::new();
        for api_path in paths.values() {
            for operation in api_path.operations.values() {
                builder.record(OperationSnapshot::capture(operation)?);
            }
        }

        let index = builder.seal();
        debug!(
            "Indexed {} operations on {} paths, removed {} paths",
            index.operation_count(),
            index.len(),
            removed.len()
        );

        Ok(Annotation { index, removed })
    }
}

/// Replace the first tag equal to the slash-free `source` with its
/// underscored form, e.g. `apisappsv1` → `apis_apps_v1`
fn rewrite_tag(tags: &mut [String], source: &str) {
    let key = source.replace('/', "");
    if let Some(tag) = tags.iter_mut().find(|t| **t == key) {
        *tag = source.replace('/', "_").chars().skip(1).collect();
    }
}

fn removal_reason(components: &[String]) -> Option<Removal> {
    if components.iter().any(|c| c == PROXY_COMPONENT) {
        return Some(Removal::Proxy);
    }

    components
        .last()
        .filter(|last| SIDE_CHANNEL_COMPONENTS.contains(&last.as_str()))
        .map(|last| Removal::SideChannel(last.clone()))
}

fn crud_verb(method: HttpMethod, components: &[String]) -> CrudVerb {
    match method {
        HttpMethod::Get if components.iter().any(|c| c == WATCH_COMPONENT) => CrudVerb::Watch,
        HttpMethod::Get if components.iter().any(|c| c == NAME_PARAM) => CrudVerb::Get,
        HttpMethod::Get => CrudVerb::List,
        HttpMethod::Post => CrudVerb::Create,
        HttpMethod::Put => CrudVerb::Replace,
        HttpMethod::Patch => CrudVerb::Patch,
        HttpMethod::Delete => CrudVerb::Delete,
    }
}

fn remove_first(components: &mut Vec<String>, value: &str) {
    if let Some(index) = components.iter().position(|c| c == value) {
        components.remove(index);
    }
}

/// Operation id for `method` on a path whose resource part is `components`
///
/// # Examples
/// ```
/// use kube_codegen_common::{split_segments, HttpMethod};
/// use kube_codegen_resolver::annotator::synthesize_operation_id;
///
/// let components = split_segments("/namespaces/{namespace}/pods/{name}");
/// assert_eq!(
///     synthesize_operation_id(HttpMethod::Delete, &components),
///     "deleteNamespacedPod"
/// );
/// ```
pub fn synthesize_operation_id(method: HttpMethod, components: &[String]) -> String {
    let mut components = components.to_vec();
    let verb = crud_verb(method, &components);

    if let Some(index) = components.iter().position(|c| c == NAME_PARAM) {
        components.remove(index);
        if let Some(previous) = index.checked_sub(1).and_then(|i| components.get_mut(i)) {
            *previous = naming::singularize(previous);
        }
    }

    if method == HttpMethod::Post {
        if let Some(last) = components.last_mut() {
            *last = naming::singularize(last);
        }
    }

    let mut operation_id = verb.as_str().to_string();

    if components.iter().any(|c| c == NAMESPACE_PARAM) {
        operation_id.push_str("Namespaced");
        remove_first(&mut components, NAMESPACES_COMPONENT);
        remove_first(&mut components, NAMESPACE_PARAM);
    }

    for component in &components {
        let bare = component.trim_matches(|c| c == '{' || c == '}');
        operation_id.push_str(&naming::capitalize(bare));
    }

    operation_id
}
