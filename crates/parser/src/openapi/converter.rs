//! Converts a parsed document to the ApiDescription IR

use super::types::{self, OpenApiSpec, ParameterOrRef, PathItem, Schema, SchemaOrRef};
use crate::TypeMapper;
use kube_codegen_common::{
    ApiDescription, ApiPath, HttpMethod, Model, Operation, Parameter, ParameterLocation,
    Property, PropertyKind, Result, VendorExtensions,
};
use tracing::{debug, warn};

/// Convert a document to an ApiDescription
pub fn convert_to_api_description(spec: &OpenApiSpec) -> Result<ApiDescription> {
    let mut description = ApiDescription {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        ..Default::default()
    };

    for (path, path_item) in &spec.paths {
        description
            .paths
            .insert(path.clone(), convert_path(spec, path, path_item));
    }

    for (name, schema) in spec.schemas() {
        description.models.push(convert_model(name, schema));
    }

    debug!(
        "Converted {} paths ({} operations) and {} models",
        description.paths.len(),
        description.operation_count(),
        description.models.len()
    );

    Ok(description)
}

/// Convert one path item, keeping only CRUD-capable methods
fn convert_path(spec: &OpenApiSpec, path: &str, path_item: &PathItem) -> ApiPath {
    let mut api_path = ApiPath::new(path);
    let shared = resolve_parameters(spec, &path_item.parameters);

    let methods = [
        (HttpMethod::Get, &path_item.get),
        (HttpMethod::Post, &path_item.post),
        (HttpMethod::Put, &path_item.put),
        (HttpMethod::Patch, &path_item.patch),
        (HttpMethod::Delete, &path_item.delete),
    ];

    for (method, op) in methods {
        if let Some(op) = op {
            api_path.insert_operation(convert_operation(spec, path, method, op, &shared));
        }
    }

    if path_item.head.is_some() || path_item.options.is_some() {
        debug!("Skipping HEAD/OPTIONS operations of {}", path);
    }

    api_path
}

fn convert_operation(
    spec: &OpenApiSpec,
    path: &str,
    method: HttpMethod,
    op: &types::Operation,
    shared: &[Parameter],
) -> Operation {
    // Operation-level parameters override path-level ones with the same name and location
    let own = resolve_parameters(spec, &op.parameters);
    let mut parameters: Vec<Parameter> = shared
        .iter()
        .filter(|p| {
            !own.iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .cloned()
        .collect();
    parameters.extend(own);

    if let Some(body) = request_body_parameter(op) {
        parameters.push(body);
    }

    Operation {
        http_method: method,
        path: path.to_string(),
        operation_id: op.operation_id.clone().unwrap_or_default(),
        tags: op.tags.clone(),
        summary: op.summary.clone().or_else(|| op.description.clone()),
        parameters,
    }
}

fn resolve_parameters(spec: &OpenApiSpec, params: &[ParameterOrRef]) -> Vec<Parameter> {
    params
        .iter()
        .filter_map(|param| match param {
            ParameterOrRef::Parameter(p) => convert_parameter(p),
            ParameterOrRef::Reference { ref_path } => match spec.resolve_parameter_ref(ref_path) {
                Some(p) => convert_parameter(p),
                None => {
                    warn!("Unresolvable parameter reference {}", ref_path);
                    None
                }
            },
        })
        .collect()
}

fn convert_parameter(param: &types::Parameter) -> Option<Parameter> {
    let location = match param.location.as_str() {
        "path" => ParameterLocation::Path,
        "query" => ParameterLocation::Query,
        "header" => ParameterLocation::Header,
        "body" => ParameterLocation::Body,
        "formData" => ParameterLocation::FormData,
        other => {
            debug!("Skipping parameter {} in {}", param.name, other);
            return None;
        }
    };

    // OpenAPI 3.0 keeps the pattern on the parameter schema
    let pattern = param.pattern.clone().or_else(|| match &param.schema {
        Some(SchemaOrRef::Schema(schema)) => schema.pattern.clone(),
        _ => None,
    });

    Some(Parameter {
        name: param.name.clone(),
        location,
        required: param.required,
        description: param.description.clone(),
        kind: TypeMapper::map_parameter(param),
        pattern,
        default: param.default.clone(),
        example: param.example.as_ref().map(json_to_plain_string),
        vendor_extensions: VendorExtensions::new(),
    })
}

/// OpenAPI 3.0 request bodies become a `body` parameter
fn request_body_parameter(op: &types::Operation) -> Option<Parameter> {
    let body = op.request_body.as_ref()?;
    let kind = body
        .content
        .values()
        .find_map(|media| media.schema.as_ref())
        .map(TypeMapper::map_schema_or_ref)
        .unwrap_or(PropertyKind::Object);

    Some(Parameter {
        name: "body".to_string(),
        location: ParameterLocation::Body,
        required: body.required,
        description: body.description.clone(),
        kind,
        pattern: None,
        default: None,
        example: None,
        vendor_extensions: VendorExtensions::new(),
    })
}

fn convert_model(name: &str, schema: &Schema) -> Model {
    let mut model = Model::new(name);
    model.description = schema.description.clone();

    for (prop_name, prop_schema) in &schema.properties {
        let (kind, pattern, default, description, vendor_extensions) = match prop_schema {
            SchemaOrRef::Reference { .. } => (
                TypeMapper::map_schema_or_ref(prop_schema),
                None,
                None,
                None,
                VendorExtensions::new(),
            ),
            SchemaOrRef::Schema(s) => (
                TypeMapper::map_schema(s),
                s.pattern.clone(),
                s.default.clone(),
                s.description.clone(),
                schema_extensions(s),
            ),
        };

        model.properties.push(Property {
            name: prop_name.clone(),
            required: schema.required.contains(prop_name),
            description,
            kind,
            pattern,
            default,
            vendor_extensions,
        });
    }

    model
}

/// `x-` keys of a schema, in key order
fn schema_extensions(schema: &Schema) -> VendorExtensions {
    let mut extensions = VendorExtensions::new();
    let mut keys: Vec<&String> = schema
        .extensions
        .keys()
        .filter(|key| key.starts_with("x-"))
        .collect();
    keys.sort();
    for key in keys {
        extensions.insert(key.as_str(), schema.extensions[key].clone());
    }
    extensions
}

/// Render a JSON scalar without quotes
fn json_to_plain_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
