//! Default and example values rendered as Python literals

use crate::naming;
use kube_codegen_common::{Parameter, PropertyKind};
use serde_json::Value;
use tracing::warn;

const NULL_EXAMPLE: &str = "NULL";

/// Python literal for a declared default, if the kind has one
///
/// # Examples
/// ```
/// use kube_codegen_common::PropertyKind;
/// use kube_codegen_resolver::values::default_value;
/// use serde_json::json;
///
/// assert_eq!(default_value(&PropertyKind::String, Some(&json!("Always"))).as_deref(), Some("'Always'"));
/// assert_eq!(default_value(&PropertyKind::Boolean, Some(&json!(false))).as_deref(), Some("False"));
/// assert_eq!(default_value(&PropertyKind::Date, Some(&json!("2017-01-01"))), None);
/// ```
pub fn default_value(kind: &PropertyKind, default: Option<&Value>) -> Option<String> {
    let default = default?;

    match kind {
        PropertyKind::String => Some(format!("'{}'", plain_string(default))),
        PropertyKind::Boolean => {
            if plain_string(default).eq_ignore_ascii_case("false") {
                Some("False".to_string())
            } else {
                Some("True".to_string())
            }
        }
        PropertyKind::Integer | PropertyKind::Long | PropertyKind::Float | PropertyKind::Double => {
            Some(plain_string(default))
        }
        _ => None,
    }
}

/// Example argument for a parameter in generated usage docs
///
/// The declared default wins over the declared example; otherwise a
/// placeholder is chosen by kind. Containers wrap the element example.
pub fn example_value(param: &Parameter, package_name: &str) -> String {
    let declared = param
        .default
        .as_ref()
        .map(plain_string)
        .or_else(|| param.example.clone());

    let example = match param.kind.base_kind() {
        PropertyKind::String | PropertyKind::Binary => Some(quoted(
            declared.unwrap_or_else(|| format!("{}_example", naming::to_param_name(&param.name))),
        )),
        PropertyKind::Integer | PropertyKind::Long => Some(declared.unwrap_or_else(|| "56".into())),
        PropertyKind::Float | PropertyKind::Double => {
            Some(declared.unwrap_or_else(|| "3.4".into()))
        }
        PropertyKind::Boolean => Some(declared.unwrap_or_else(|| "True".into())),
        PropertyKind::File => Some(quoted(declared.unwrap_or_else(|| "/path/to/file".into()))),
        PropertyKind::Date => Some(quoted(declared.unwrap_or_else(|| "2013-10-20".into()))),
        PropertyKind::DateTime => Some(quoted(
            declared.unwrap_or_else(|| "2013-10-20T19:20:30+01:00".into()),
        )),
        PropertyKind::Model(name) => Some(format!(
            "{}.{}()",
            package_name,
            naming::to_model_name(name)
        )),
        PropertyKind::Object => {
            warn!(
                "No example for parameter {} of kind object",
                param.name
            );
            declared
        }
        PropertyKind::Array(_) | PropertyKind::Map(_) => declared,
    };

    match example {
        None => NULL_EXAMPLE.to_string(),
        Some(example) if param.kind.is_list_container() => format!("[{}]", example),
        Some(example) if param.kind.is_map_container() => format!("{{'key': {}}}", example),
        Some(example) => example,
    }
}

/// Escape text for a single-quoted literal or docstring
pub fn escape_text(input: &str) -> String {
    let flattened: String = input
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect();
    let escaped = flattened.replace('\\', "\\\\").replace('"', "\\\"");
    naming::escape_unsafe_characters(&escaped)
}

fn quoted(text: String) -> String {
    format!("'{}'", escape_text(&text))
}

fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
