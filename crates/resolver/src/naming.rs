//! Identifier normalization
//!
//! Pure string transforms that turn names found in an API description into
//! valid, idiomatic identifiers of the generated (Python) client: casing
//! conversion, reserved-word escaping, numeric-prefix guarding and the naive
//! singular/plural heuristics used to match path segments to resource names.
//!
//! None of these functions fail. Corrective renames are logged with
//! `tracing::warn!`.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Names that cannot be used verbatim, compared case-insensitively
const RESERVED_WORDS: &[&str] = &[
    // local variable names used in generated API methods
    "all_params",
    "resource_path",
    "path_params",
    "query_params",
    "header_params",
    "form_params",
    "local_var_files",
    "body_params",
    "auth_settings",
    // @property
    "property",
    // python keywords
    "and",
    "del",
    "from",
    "not",
    "while",
    "as",
    "elif",
    "global",
    "or",
    "with",
    "assert",
    "else",
    "if",
    "pass",
    "yield",
    "break",
    "except",
    "import",
    "print",
    "class",
    "exec",
    "in",
    "raise",
    "continue",
    "finally",
    "is",
    "return",
    "def",
    "for",
    "lambda",
    "try",
    "self",
];

const DEFAULT_API_NAME: &str = "DefaultApi";
const DEFAULT_API_VAR_NAME: &str = "default_api";

static UPPERCASE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z_]*$").expect("valid uppercase regex"));
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid acronym regex"));
static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("valid case boundary regex"));

/// What an identifier names; selects the escape applied to collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Variables and parameters, escaped with a leading `_`
    Variable,
    /// Model classes and files, escaped with `model_`
    Model,
    /// Generated methods, escaped with `call_`
    Operation,
}

impl IdentifierKind {
    fn escape_prefix(&self) -> &'static str {
        match self {
            IdentifierKind::Variable => "_",
            IdentifierKind::Model => "model_",
            IdentifierKind::Operation => "call_",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            IdentifierKind::Variable => "variable name",
            IdentifierKind::Model => "model name",
            IdentifierKind::Operation => "method name",
        }
    }
}

/// Case-insensitive reserved-word check
pub fn is_reserved_word(name: &str) -> bool {
    let lower = name.to_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
}

fn starts_with_digit(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Strip characters that cannot appear in an identifier
///
/// Bracket, parenthesis, dot, dash and space separators become `_`; anything
/// else outside `[A-Za-z0-9_]` (notably `$`) is dropped.
///
/// # Examples
/// ```
/// use kube_codegen_resolver::naming::sanitize;
///
/// assert_eq!(sanitize("v1.Pod"), "v1_Pod");
/// assert_eq!(sanitize("$ref"), "ref");
/// assert_eq!(sanitize("items[]"), "items");
/// ```
pub fn sanitize(name: &str) -> String {
    if name == "$" {
        return "value".to_string();
    }

    name.replace("[]", "")
        .chars()
        .filter_map(|c| match c {
            '[' | '(' | '.' | '-' | ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// Insert `_` at case transitions and lowercase
///
/// `PhoneNumber → phone_number`, `HTTPServer → http_server`.
pub fn underscore(word: &str) -> String {
    let word = ACRONYM_BOUNDARY.replace_all(word, "${1}_${2}");
    let word = CASE_BOUNDARY.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Convert a name to snake_case
///
/// Uppercase-only names are lowercased as a whole; leading separators are
/// stripped.
///
/// # Examples
/// ```
/// use kube_codegen_resolver::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("petId"), "pet_id");
/// assert_eq!(to_snake_case("API_KEY"), "api_key");
/// assert_eq!(to_snake_case("_internal"), "internal");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let name = if UPPERCASE_ONLY.is_match(name) {
        name.to_lowercase()
    } else {
        name.to_string()
    };

    underscore(&name).trim_start_matches('_').to_string()
}

/// Capitalize every word, dropping the separators between them
///
/// # Examples
/// ```
/// use kube_codegen_resolver::naming::to_capitalized_case;
///
/// assert_eq!(to_capitalized_case("phone_number"), "PhoneNumber");
/// assert_eq!(to_capitalized_case("core_v1"), "CoreV1");
/// ```
pub fn to_capitalized_case(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut upper_next = true;

    for ch in word.chars() {
        if matches!(ch, '_' | '-' | ' ' | '.' | '/') {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Uppercase the first character only
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix names that collide with reserved words or start with a digit
pub fn escape_if_reserved(name: &str, kind: IdentifierKind) -> String {
    let reason = if is_reserved_word(name) {
        "reserved word"
    } else if starts_with_digit(name) {
        "starts with number"
    } else {
        return name.to_string();
    };

    let escaped = format!("{}{}", kind.escape_prefix(), name);
    warn!(
        "{} ({}) cannot be used as {}. Renamed to {}",
        name,
        reason,
        kind.describe(),
        escaped
    );
    escaped
}

/// Approximate singular form of a path segment
///
/// Drops a trailing `es` from words ending in `ses` and a trailing `s`
/// otherwise. Irregular plurals (`endpoints` is fine, `policies` is not) are
/// not handled; this is only used to derive names from path segments.
///
/// # Examples
/// ```
/// use kube_codegen_resolver::naming::singularize;
///
/// assert_eq!(singularize("pods"), "pod");
/// assert_eq!(singularize("statuses"), "status");
/// assert_eq!(singularize("policies"), "policie");
/// ```
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ses") {
        format!("{}s", stem)
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

/// Naive plural used to match a kind against collection segments
pub fn pluralize(word: &str) -> String {
    format!("{}s", word)
}

/// Variable name for a property
pub fn to_var_name(name: &str) -> String {
    let name = to_snake_case(&sanitize(name));
    escape_if_reserved(&name, IdentifierKind::Variable)
}

/// Parameter name; same rules as variables
pub fn to_param_name(name: &str) -> String {
    to_var_name(name)
}

/// Model class name
///
/// # Examples
/// ```
/// use kube_codegen_resolver::naming::to_model_name;
///
/// assert_eq!(to_model_name("v1.Pod"), "V1Pod");
/// assert_eq!(to_model_name("return"), "ModelReturn");
/// assert_eq!(to_model_name("200Response"), "Model200Response");
/// ```
pub fn to_model_name(name: &str) -> String {
    let name = escape_if_reserved(&sanitize(name), IdentifierKind::Model);
    to_capitalized_case(&name)
}

/// Model module file name, without extension
pub fn to_model_filename(name: &str) -> String {
    let name = escape_if_reserved(&sanitize(name), IdentifierKind::Model);
    underscore(&name)
}

pub fn to_model_test_filename(name: &str) -> String {
    format!("test_{}", to_model_filename(name))
}

/// API module file name, without extension
pub fn to_api_filename(name: &str) -> String {
    underscore(&name.replace('-', "_"))
}

pub fn to_api_test_filename(name: &str) -> String {
    format!("test_{}", to_api_filename(name))
}

/// API class name for a tag; empty tags map to `DefaultApi`
pub fn to_api_name(name: &str) -> String {
    if name.is_empty() {
        return DEFAULT_API_NAME.to_string();
    }
    to_capitalized_case(name)
}

/// API instance variable name for a tag; empty tags map to `default_api`
pub fn to_api_var_name(name: &str) -> String {
    if name.is_empty() {
        return DEFAULT_API_VAR_NAME.to_string();
    }
    underscore(name)
}

/// Method name for an operation id
///
/// Returns `None` for an empty id; callers treat that as fatal.
///
/// # Examples
/// ```
/// use kube_codegen_resolver::naming::to_operation_id;
///
/// assert_eq!(
///     to_operation_id("createNamespacedPod").as_deref(),
///     Some("create_namespaced_pod")
/// );
/// assert_eq!(to_operation_id("exec").as_deref(), Some("call_exec"));
/// assert_eq!(to_operation_id(""), None);
/// ```
pub fn to_operation_id(operation_id: &str) -> Option<String> {
    if operation_id.is_empty() {
        return None;
    }

    let escaped = escape_if_reserved(operation_id, IdentifierKind::Operation);
    Some(underscore(&sanitize(&escaped)))
}

/// Tag as a capitalized word run without spaces or symbols
pub fn sanitize_tag(tag: &str) -> String {
    tag.split(' ')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<String>()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Python package name: word characters only, snake_case
pub fn generate_package_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    underscore(&cleaned)
}

/// Remove `'` so text cannot break out of a single-quoted literal
pub fn escape_quotation_mark(input: &str) -> String {
    input.replace('\'', "")
}

/// Neutralize `'''` so text cannot close a docstring
pub fn escape_unsafe_characters(input: &str) -> String {
    input.replace("'''", "'_'_'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words_case_insensitive() {
        assert!(is_reserved_word("class"));
        assert!(is_reserved_word("Class"));
        assert!(is_reserved_word("AUTH_SETTINGS"));
        assert!(!is_reserved_word("pod"));
    }

    #[test]
    fn test_reserved_variable_and_model_names() {
        assert_eq!(to_var_name("class"), "_class");
        assert_eq!(to_param_name("from"), "_from");
        assert_eq!(to_model_name("class"), "ModelClass");
        assert_eq!(to_model_filename("class"), "model_class");
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(to_var_name("2fa"), "_2fa");
        assert_eq!(to_model_name("200Response"), "Model200Response");
        assert_eq!(to_model_filename("200Response"), "model_200_response");
        assert_eq!(to_operation_id("3rdParty").as_deref(), Some("call_3rd_party"));
    }

    #[test]
    fn test_to_var_name() {
        assert_eq!(to_var_name("petId"), "pet_id");
        assert_eq!(to_var_name("$ref"), "ref");
        assert_eq!(to_var_name("apiVersion"), "api_version");
        assert_eq!(to_var_name("X_RATE_LIMIT"), "x_rate_limit");
        assert_eq!(to_var_name("_continue"), "_continue");
        assert_eq!(to_var_name("x-kubernetes-preserve"), "x_kubernetes_preserve");
    }

    #[test]
    fn test_underscore_acronyms() {
        assert_eq!(underscore("HTTPServer"), "http_server");
        assert_eq!(underscore("IOError"), "io_error");
        assert_eq!(underscore("v1beta1Deployment"), "v1beta1_deployment");
        assert_eq!(underscore("created-at"), "created_at");
    }

    #[test]
    fn test_model_names() {
        assert_eq!(to_model_name("v1.Pod"), "V1Pod");
        assert_eq!(to_model_name("v1beta1.Deployment"), "V1beta1Deployment");
        assert_eq!(to_model_filename("v1.Pod"), "v1_pod");
        assert_eq!(to_model_test_filename("v1.Pod"), "test_v1_pod");
    }

    #[test]
    fn test_api_names() {
        assert_eq!(to_api_name("core_v1"), "CoreV1");
        assert_eq!(to_api_name("apis_apps_v1"), "ApisAppsV1");
        assert_eq!(to_api_name(""), "DefaultApi");
        assert_eq!(to_api_var_name(""), "default_api");
        assert_eq!(to_api_var_name("CoreV1"), "core_v1");
        assert_eq!(to_api_filename("apps-v1"), "apps_v1");
        assert_eq!(to_api_test_filename("core_v1"), "test_core_v1");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("deployments"), "deployment");
        assert_eq!(singularize("classes"), "class");
        assert_eq!(singularize("pod"), "pod");
        assert_eq!(singularize(""), "");
        // accepted approximation for irregular plurals
        assert_eq!(singularize("networkpolicies"), "networkpolicie");
        assert_eq!(pluralize("pod"), "pods");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pods"), "Pods");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Pod"), "Pod");
    }

    #[test]
    fn test_sanitize_tag() {
        assert_eq!(sanitize_tag("core v1"), "CoreV1");
        assert_eq!(sanitize_tag("apps  v1-beta"), "AppsV1beta");
    }

    #[test]
    fn test_generate_package_name() {
        assert_eq!(generate_package_name("Kubernetes-Client"), "kubernetes_client");
        assert_eq!(generate_package_name("swagger_client"), "swagger_client");
    }

    #[test]
    fn test_escaping_helpers() {
        assert_eq!(escape_quotation_mark("it's"), "its");
        assert_eq!(escape_unsafe_characters("a ''' b"), "a '_'_' b");
    }

    #[test]
    fn test_snake_case_round_trip() {
        let identifiers = [
            "petId",
            "phone_number",
            "PhoneNumber",
            "HTTPServer",
            "apiVersion",
            "API",
            "createNamespacedPod",
            "v1beta1Deployment",
            "resourceVersion",
            "x-kubernetes-group",
        ];

        for x in identifiers {
            let snake = to_snake_case(x);
            assert_eq!(
                to_snake_case(&to_capitalized_case(&snake)),
                snake,
                "round trip failed for {}",
                x
            );
        }
    }
}
