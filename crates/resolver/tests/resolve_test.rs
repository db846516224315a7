//! End-to-end resolution of a Kubernetes-style Swagger document

use kube_codegen_common::{HttpMethod, OperationKind};
use kube_codegen_parser::OpenApiParser;
use kube_codegen_resolver::{resolve, Removal};

const SWAGGER: &str = r##"{
    "swagger": "2.0",
    "info": {"title": "Kubernetes", "version": "v1.5.0"},
    "parameters": {
        "pretty": {"name": "pretty", "in": "query", "type": "string"}
    },
    "paths": {
        "/api/v1/namespaces/{namespace}/pods": {
            "parameters": [
                {"name": "namespace", "in": "path", "required": true, "type": "string"},
                {"$ref": "#/parameters/pretty"}
            ],
            "get": {"operationId": "listCoreV1NamespacedPod", "tags": ["apiv1"]},
            "post": {
                "operationId": "createCoreV1NamespacedPod",
                "tags": ["apiv1"],
                "parameters": [
                    {"name": "body", "in": "body", "required": true, "schema": {"$ref": "#/definitions/v1.Pod"}}
                ]
            }
        },
        "/api/v1/namespaces/{namespace}/pods/{name}": {
            "parameters": [
                {"name": "namespace", "in": "path", "required": true, "type": "string"},
                {"name": "name", "in": "path", "required": true, "type": "string", "pattern": "/^[a-z0-9.-]+$/"}
            ],
            "get": {"operationId": "readCoreV1NamespacedPod", "tags": ["apiv1"]},
            "put": {"operationId": "replaceCoreV1NamespacedPod", "tags": ["apiv1"]},
            "patch": {"operationId": "patchCoreV1NamespacedPod", "tags": ["apiv1"]},
            "delete": {"operationId": "deleteCoreV1NamespacedPod", "tags": ["apiv1"]}
        },
        "/api/v1/namespaces/{namespace}/pods/{name}/status": {
            "get": {"operationId": "readCoreV1NamespacedPodStatus", "tags": ["apiv1"]}
        },
        "/api/v1/proxy/nodes/{name}": {
            "get": {"operationId": "proxyCoreV1GETNode", "tags": ["apiv1"]}
        },
        "/apis/apps/v1beta1/namespaces/{namespace}/deployments": {
            "post": {"operationId": "createAppsV1beta1NamespacedDeployment", "tags": ["apisappsv1beta1"]}
        },
        "/apis/apps/v1beta1/namespaces/{namespace}/deployments/{name}/scale": {
            "put": {"operationId": "replaceAppsV1beta1NamespacedDeploymentScale", "tags": ["apisappsv1beta1"]}
        },
        "/version/": {
            "get": {"operationId": "getCodeVersion", "tags": ["version"]}
        }
    },
    "definitions": {
        "v1.Pod": {
            "properties": {
                "metadata": {"$ref": "#/definitions/v1.ObjectMeta"},
                "spec": {"$ref": "#/definitions/v1.PodSpec"}
            }
        },
        "v1.ObjectMeta": {
            "properties": {
                "name": {"type": "string", "pattern": "/^[a-z0-9]([-a-z0-9]*[a-z0-9])?$/"}
            }
        },
        "v1beta1.Deployment": {"properties": {}},
        "v1beta1.Scale": {"properties": {"replicas": {"type": "integer", "format": "int32"}}},
        "intstr.IntOrString": {"type": "string"},
        "Quantity": {"type": "string"}
    }
}"##;

#[test]
fn test_resolve_kubernetes_document() {
    let mut description = OpenApiParser::from_json(SWAGGER).unwrap().parse().unwrap();
    let resolution = resolve(&mut description).unwrap();

    let removed: Vec<(&str, &Removal)> = resolution
        .removed
        .iter()
        .map(|r| (r.path.as_str(), &r.reason))
        .collect();
    assert_eq!(
        removed,
        vec![
            ("/api/v1/namespaces/{namespace}/pods/{name}/status", &Removal::SideChannel("status".to_string())),
            ("/api/v1/proxy/nodes/{name}", &Removal::Proxy),
        ]
    );

    let ids: Vec<&str> = resolution
        .index
        .operations()
        .map(|s| s.operation_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "listNamespacedPods",
            "createNamespacedPod",
            "getNamespacedPod",
            "replaceNamespacedPod",
            "patchNamespacedPod",
            "deleteNamespacedPod",
            "createNamespacedDeployment",
            "replaceNamespacedDeploymentScale",
            "getCodeVersion",
        ]
    );

    let version = &description.paths["/version/"].operations[&HttpMethod::Get];
    assert_eq!(version.tags, vec!["version_"]);

    let create = &description.paths["/api/v1/namespaces/{namespace}/pods"].operations[&HttpMethod::Post];
    assert_eq!(create.tags, vec!["api_v1"]);
}

#[test]
fn test_models_receive_bindings() {
    let mut description = OpenApiParser::from_json(SWAGGER).unwrap().parse().unwrap();
    resolve(&mut description).unwrap();

    let pod = description.find_model("v1.Pod").unwrap();
    assert_eq!(pod.api_version.as_deref(), Some("v1"));
    let operations = pod.operations.as_ref().unwrap();
    let create = &operations[&OperationKind::NamespacedCreate];
    assert_eq!(create.operation_id, "createNamespacedPod");
    assert_eq!(create.target_file_name, "api_v1.py");
    assert_eq!(create.target_type_name, "ApiV1");
    assert_eq!(
        operations[&OperationKind::NamespacedReplace].operation_id,
        "replaceNamespacedPod"
    );

    let deployment = description.find_model("v1beta1.Deployment").unwrap();
    let operations = deployment.operations.as_ref().unwrap();
    assert_eq!(operations.len(), 1);
    assert_eq!(
        operations[&OperationKind::NamespacedCreate].target_type_name,
        "ApisAppsV1beta1"
    );

    let scale = description.find_model("v1beta1.Scale").unwrap();
    assert!(scale.operations.is_none());

    let meta = description.find_model("v1.ObjectMeta").unwrap();
    assert_eq!(meta.operations.as_ref().map(|o| o.len()), Some(0));

    let quantity = description.find_model("Quantity").unwrap();
    assert!(quantity.api_version.is_none());
}

#[test]
fn test_patterns_are_translated() {
    let mut description = OpenApiParser::from_json(SWAGGER).unwrap().parse().unwrap();
    resolve(&mut description).unwrap();

    let meta = description.find_model("v1.ObjectMeta").unwrap();
    let name = &meta.properties[0];
    assert_eq!(
        name.vendor_extensions.get("x-regex"),
        Some(&serde_json::json!("^[a-z0-9]([-a-z0-9]*[a-z0-9])?$"))
    );
    assert_eq!(
        name.vendor_extensions.get("x-modifiers"),
        Some(&serde_json::json!([]))
    );

    let get = &description.paths["/api/v1/namespaces/{namespace}/pods/{name}"].operations[&HttpMethod::Get];
    let name_param = get.parameters.iter().find(|p| p.name == "name").unwrap();
    assert_eq!(
        name_param.vendor_extensions.get("x-regex"),
        Some(&serde_json::json!("^[a-z0-9.-]+$"))
    );
}

#[test]
fn test_index_serializes_by_path() {
    let mut description = OpenApiParser::from_json(SWAGGER).unwrap().parse().unwrap();
    let resolution = resolve(&mut description).unwrap();

    let json = serde_json::to_value(&resolution.index).unwrap();
    let pods = &json["/api/v1/namespaces/{namespace}/pods"];
    assert_eq!(pods[1]["httpMethod"], "POST");
    assert_eq!(pods[1]["operationId"], "createNamespacedPod");
    assert_eq!(pods[1]["nickname"], "create_namespaced_pod");
    assert_eq!(pods[1]["tags"], serde_json::json!(["api_v1"]));
}
