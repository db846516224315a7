//! Template contexts built from a resolved description

use kube_codegen_common::{
    ApiDescription, Model, Operation, Parameter, ParameterLocation, Property, PropertyKind,
    Result, VendorExtensions,
};
use kube_codegen_resolver::pattern::{MODIFIERS_EXTENSION, REGEX_EXTENSION};
use kube_codegen_resolver::{naming, values, OperationSnapshot};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ModelView {
    /// Raw definition name, e.g. `v1.Pod`
    pub name: String,
    pub class_name: String,
    pub file_name: String,
    pub test_file_name: String,
    pub description: Option<String>,
    pub properties: Vec<PropertyView>,
    pub api_version: Option<String>,
    pub operations: Vec<BindingView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyView {
    /// JSON key
    pub name: String,
    pub var_name: String,
    pub kind: PropertyKind,
    pub required: bool,
    pub description: Option<String>,
    /// Python literal
    pub default: Option<String>,
    pub regex: Option<String>,
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BindingView {
    pub key: String,
    pub method: String,
    pub method_name: String,
    pub file_name: String,
    pub class_name: String,
}

/// Operations sharing a primary tag, rendered as one API class
#[derive(Debug, Clone, Serialize)]
pub struct ApiView {
    pub tag: String,
    pub class_name: String,
    pub var_name: String,
    pub file_name: String,
    pub test_file_name: String,
    pub operations: Vec<OperationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationView {
    pub nickname: String,
    pub operation_id: String,
    pub http_method: String,
    pub path: String,
    pub summary: Option<String>,
    pub params: Vec<ParamView>,
    pub required_params: Vec<ParamView>,
    pub optional_params: Vec<ParamView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamView {
    pub name: String,
    pub var_name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub kind: PropertyKind,
    pub description: Option<String>,
    pub example: String,
    pub regex: Option<String>,
    pub modifiers: Vec<String>,
}

impl ModelView {
    pub fn from_model(model: &Model) -> Self {
        let operations = model
            .operations
            .iter()
            .flatten()
            .map(|(key, binding)| BindingView {
                key: key.key().to_string(),
                method: binding.operation_id.clone(),
                method_name: naming::to_operation_id(&binding.operation_id).unwrap_or_default(),
                file_name: binding.target_file_name.clone(),
                class_name: binding.target_type_name.clone(),
            })
            .collect();

        Self {
            name: model.name.clone(),
            class_name: naming::to_model_name(&model.name),
            file_name: naming::to_model_filename(&model.name),
            test_file_name: naming::to_model_test_filename(&model.name),
            description: model.description.as_deref().map(values::escape_text),
            properties: model.properties.iter().map(PropertyView::from_property).collect(),
            api_version: model.api_version.clone(),
            operations,
        }
    }
}

impl PropertyView {
    fn from_property(property: &Property) -> Self {
        let (regex, modifiers) = pattern_parts(&property.vendor_extensions);
        Self {
            name: property.name.clone(),
            var_name: naming::to_var_name(&property.name),
            kind: property.kind.clone(),
            required: property.required,
            description: property.description.as_deref().map(values::escape_text),
            default: values::default_value(&property.kind, property.default.as_ref()),
            regex,
            modifiers,
        }
    }
}

impl ParamView {
    fn from_parameter(param: &Parameter, package_name: &str) -> Self {
        let (regex, modifiers) = pattern_parts(&param.vendor_extensions);
        Self {
            name: param.name.clone(),
            var_name: naming::to_param_name(&param.name),
            location: param.location,
            required: param.required,
            kind: param.kind.clone(),
            description: param.description.as_deref().map(values::escape_text),
            example: values::example_value(param, package_name),
            regex,
            modifiers,
        }
    }
}

impl OperationView {
    fn new(
        operation: &Operation,
        snapshot: &OperationSnapshot,
        package_name: &str,
        sort_by_required: bool,
    ) -> Self {
        let mut params: Vec<ParamView> = operation
            .parameters
            .iter()
            .map(|p| ParamView::from_parameter(p, package_name))
            .collect();
        if sort_by_required {
            params.sort_by_key(|p| !p.required);
        }

        let (required_params, optional_params): (Vec<ParamView>, Vec<ParamView>) =
            params.iter().cloned().partition(|p| p.required);

        Self {
            nickname: snapshot.nickname.clone(),
            operation_id: snapshot.operation_id.clone(),
            http_method: snapshot.http_method.to_string(),
            path: snapshot.path.clone(),
            summary: operation.summary.as_deref().map(values::escape_text),
            params,
            required_params,
            optional_params,
        }
    }
}

/// Group operations by primary tag, in tag order
pub fn api_views(
    description: &ApiDescription,
    package_name: &str,
    sort_by_required: bool,
) -> Result<Vec<ApiView>> {
    // sanitized tag -> (first raw tag, operations)
    let mut by_tag: BTreeMap<String, (String, Vec<OperationView>)> = BTreeMap::new();

    for api_path in description.paths.values() {
        for operation in api_path.operations.values() {
            let snapshot = OperationSnapshot::capture(operation)?;
            let view = OperationView::new(operation, &snapshot, package_name, sort_by_required);
            let tag = snapshot.primary_tag();
            by_tag
                .entry(naming::sanitize_tag(tag))
                .or_insert_with(|| (tag.to_string(), Vec::new()))
                .1
                .push(view);
        }
    }

    Ok(by_tag
        .into_iter()
        .map(|(sanitized, (tag, operations))| ApiView {
            class_name: naming::to_api_name(&sanitized),
            var_name: naming::to_api_var_name(&sanitized),
            file_name: naming::to_api_filename(&sanitized),
            test_file_name: naming::to_api_test_filename(&sanitized),
            tag,
            operations,
        })
        .collect())
}

fn pattern_parts(extensions: &VendorExtensions) -> (Option<String>, Vec<String>) {
    let regex = extensions
        .get(REGEX_EXTENSION)
        .and_then(|v| v.as_str())
        .map(String::from);
    let modifiers = extensions
        .get(MODIFIERS_EXTENSION)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|m| m.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();
    (regex, modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube_codegen_common::{ApiPath, HttpMethod, OperationBinding, OperationKind, OperationMap};

    fn param(name: &str, required: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            location: ParameterLocation::Query,
            required,
            description: None,
            kind: PropertyKind::String,
            pattern: None,
            default: None,
            example: None,
            vendor_extensions: VendorExtensions::new(),
        }
    }

    fn description() -> ApiDescription {
        let mut pods = ApiPath::new("/api/v1/namespaces/{namespace}/pods");
        pods.insert_operation(Operation {
            http_method: HttpMethod::Get,
            path: String::new(),
            operation_id: "listNamespacedPods".to_string(),
            tags: vec!["api_v1".to_string()],
            summary: Some("list or watch \"pods\"".to_string()),
            parameters: vec![param("pretty", false), param("namespace", true)],
        });

        let mut version = ApiPath::new("/version/");
        version.insert_operation(Operation {
            http_method: HttpMethod::Get,
            path: String::new(),
            operation_id: "getCode".to_string(),
            tags: vec![],
            summary: None,
            parameters: vec![],
        });

        ApiDescription {
            paths: [pods, version].into_iter().map(|p| (p.path.clone(), p)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_api_views_group_by_tag() {
        let views = api_views(&description(), "k8s", true).unwrap();
        let tags: Vec<&str> = views.iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(tags, vec!["api_v1", "default"]);

        let core = &views[0];
        assert_eq!(core.class_name, "ApiV1");
        assert_eq!(core.file_name, "api_v1");
        let list = &core.operations[0];
        assert_eq!(list.nickname, "list_namespaced_pods");
        assert_eq!(list.http_method, "GET");
        assert_eq!(list.summary.as_deref(), Some(r#"list or watch \"pods\""#));
        assert_eq!(list.params[0].name, "namespace");
        assert_eq!(list.required_params.len(), 1);
        assert_eq!(list.optional_params[0].example, "'pretty_example'");

        assert_eq!(views[1].class_name, "Default");
    }

    #[test]
    fn test_tags_are_sanitized_for_class_and_file_names() {
        let mut nodes = ApiPath::new("/api/v1/nodes");
        nodes.insert_operation(Operation {
            http_method: HttpMethod::Get,
            path: String::new(),
            operation_id: "listNodes".to_string(),
            tags: vec!["core v1".to_string()],
            summary: None,
            parameters: vec![],
        });
        let description = ApiDescription {
            paths: [(nodes.path.clone(), nodes)].into_iter().collect(),
            ..Default::default()
        };

        let views = api_views(&description, "k8s", true).unwrap();
        assert_eq!(views[0].tag, "core v1");
        assert_eq!(views[0].class_name, "CoreV1");
        assert_eq!(views[0].file_name, "core_v1");
        assert_eq!(views[0].test_file_name, "test_core_v1");
    }

    #[test]
    fn test_unsorted_params_keep_declaration_order() {
        let views = api_views(&description(), "k8s", false).unwrap();
        assert_eq!(views[0].operations[0].params[0].name, "pretty");
    }

    #[test]
    fn test_model_view() {
        let mut model = Model::new("v1.Pod");
        let mut extensions = VendorExtensions::new();
        extensions.insert(REGEX_EXTENSION, "^[a-z]+$");
        extensions.insert(MODIFIERS_EXTENSION, serde_json::json!(["IGNORECASE"]));
        model.properties.push(Property {
            name: "restartPolicy".to_string(),
            required: false,
            description: Some("Restart policy".to_string()),
            kind: PropertyKind::String,
            pattern: Some("/^[a-z]+$/i".to_string()),
            default: Some(serde_json::json!("Always")),
            vendor_extensions: extensions,
        });
        let mut operations = OperationMap::new();
        operations.insert(
            OperationKind::NamespacedCreate,
            OperationBinding {
                operation_id: "createNamespacedPod".to_string(),
                target_file_name: "api_v1.py".to_string(),
                target_type_name: "ApiV1".to_string(),
            },
        );
        model.api_version = Some("v1".to_string());
        model.operations = Some(operations);

        let view = ModelView::from_model(&model);
        assert_eq!(view.class_name, "V1Pod");
        assert_eq!(view.file_name, "v1_pod");
        assert_eq!(view.test_file_name, "test_v1_pod");

        let property = &view.properties[0];
        assert_eq!(property.var_name, "restart_policy");
        assert_eq!(property.default.as_deref(), Some("'Always'"));
        assert_eq!(property.regex.as_deref(), Some("^[a-z]+$"));
        assert_eq!(property.modifiers, vec!["IGNORECASE"]);

        assert_eq!(view.operations[0].key, "namespacedCreate");
        assert_eq!(view.operations[0].method_name, "create_namespaced_pod");
    }
}
