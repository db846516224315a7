//! Template loading and custom filters

use kube_codegen_common::{GeneratorError, PropertyKind, Result};
use kube_codegen_resolver::naming;
use std::collections::HashMap;
use tera::{Tera, Value};

const TEMPLATES: &[(&str, &str)] = &[
    ("model.py", include_str!("../templates/model.py.tera")),
    ("api.py", include_str!("../templates/api.py.tera")),
    ("package_init.py", include_str!("../templates/package_init.py.tera")),
    ("models_init.py", include_str!("../templates/models_init.py.tera")),
    ("apis_init.py", include_str!("../templates/apis_init.py.tera")),
    ("model_test.py", include_str!("../templates/model_test.py.tera")),
    ("api_test.py", include_str!("../templates/api_test.py.tera")),
    ("README.md", include_str!("../templates/README.md.tera")),
];

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("snake_case", snake_case_filter);
    tera.register_filter("camel_case", camel_case_filter);
    tera.register_filter("python_type", python_type_filter);

    for (name, source) in TEMPLATES {
        tera.add_raw_template(name, source).map_err(|e| {
            GeneratorError::Generation(format!("Failed to load {} template: {}", name, e))
        })?;
    }

    Ok(tera)
}

/// Python type declaration for a property kind
///
/// Model references render as their generated class name.
pub fn python_type(kind: &PropertyKind) -> String {
    match kind {
        PropertyKind::String | PropertyKind::Binary => "str".to_string(),
        PropertyKind::Boolean => "bool".to_string(),
        PropertyKind::Integer | PropertyKind::Long => "int".to_string(),
        PropertyKind::Float | PropertyKind::Double => "float".to_string(),
        PropertyKind::Date => "date".to_string(),
        PropertyKind::DateTime => "datetime".to_string(),
        PropertyKind::File => "file".to_string(),
        PropertyKind::Object => "object".to_string(),
        PropertyKind::Array(inner) => format!("list[{}]", python_type(inner)),
        PropertyKind::Map(inner) => format!("dict(str, {})", python_type(inner)),
        PropertyKind::Model(name) => naming::to_model_name(name),
    }
}

fn string_arg<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{} filter expects a string", filter)))
}

fn snake_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = string_arg(value, "snake_case")?;
    Ok(Value::String(naming::to_snake_case(s)))
}

fn camel_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = string_arg(value, "camel_case")?;
    Ok(Value::String(naming::to_capitalized_case(s)))
}

/// Accepts a serialized `PropertyKind`
fn python_type_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let kind: PropertyKind = serde_json::from_value(value.clone())
        .map_err(|e| tera::Error::msg(format!("python_type filter expects a kind: {}", e)))?;
    Ok(Value::String(python_type(&kind)))
}
