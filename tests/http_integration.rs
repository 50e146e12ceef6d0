//! Integration tests for the Resource Manager client using wiremock
//!
//! These tests drive the command layer against mocked endpoints, checking the
//! URLs, filters and bodies sent and how answers and errors are surfaced.

use azrm::arm::auth::ArmCredentials;
use azrm::arm::client::ArmClient;
use azrm::error::{as_cli_error, CliError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUB: &str = "00000000-0000-0000-0000-000000000001";

fn client(server: &MockServer) -> ArmClient {
    ArmClient::new(SUB, &server.uri(), ArmCredentials::from_token("test-token"))
        .unwrap()
        .with_poll_interval(Duration::ZERO)
}

fn sub_path(rest: &str) -> String {
    format!("/subscriptions/{}/{}", SUB, rest)
}

/// Resource group commands
mod group_tests {
    use super::*;
    use azrm::commands::groups;

    #[tokio::test]
    async fn test_list_sends_tag_filter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(sub_path("resourcegroups")))
            .and(bearer_token("test-token"))
            .and(query_param("api-version", "2016-09-01"))
            .and(query_param("$filter", "tagname eq 'env' and tagvalue eq 'prod'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{"id": "/subscriptions/x/resourceGroups/rg1", "name": "rg1", "location": "westus"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = groups::list_resource_groups(&client(&server), Some("env=prod"))
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name.as_deref(), Some("rg1"));
    }

    #[tokio::test]
    async fn test_list_follows_next_link() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(sub_path("resourcegroups")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{"name": "rg1", "location": "westus"}],
                "nextLink": format!("{}/page2", server.uri())
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/page2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{"name": "rg2", "location": "eastus"}]
            })))
            .mount(&server)
            .await;

        let result = groups::list_resource_groups(&client(&server), None).await.unwrap();
        let names: Vec<_> = result.iter().filter_map(|g| g.name.clone()).collect();
        assert_eq!(names, vec!["rg1", "rg2"]);
    }

    #[tokio::test]
    async fn test_export_with_embedded_error_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(sub_path("resourcegroups/rg1/exportTemplate")))
            .and(body_json(json!({"resources": ["*"], "options": "IncludeComments"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "template": {"resources": []},
                "error": {
                    "code": "ExportTemplateCompletedWithErrors",
                    "message": "Export template operation completed with errors.",
                    "details": [{"code": "ExportTemplateProviderError", "message": "Could not get resources of the type 'Microsoft.Web/sites/config'."}]
                }
            })))
            .mount(&server)
            .await;

        let err = groups::export_group_as_template(&client(&server), "rg1", true, false)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Could not get resources of the type 'Microsoft.Web/sites/config'."
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(sub_path("resourcegroups/missing/exportTemplate")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": "ResourceGroupNotFound", "message": "Resource group 'missing' could not be found."}
            })))
            .mount(&server)
            .await;

        let err = groups::export_group_as_template(&client(&server), "missing", false, false)
            .await
            .unwrap_err();

        assert_eq!(
            as_cli_error(&err),
            Some(&CliError::Api {
                status: 404,
                code: Some("ResourceGroupNotFound".to_string()),
                message: "Resource group 'missing' could not be found.".to_string(),
            })
        );
    }
}

/// Generic resource commands
mod resource_tests {
    use super::*;
    use azrm::commands::resource::{self, ResourceArgs, ResourceFilter};
    use azrm::commands::TagFilter;

    async fn mount_web_provider(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(sub_path("providers/Microsoft.Web")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "namespace": "Microsoft.Web",
                "resourceTypes": [
                    {"resourceType": "sites", "apiVersions": ["2016-09-01-preview", "2016-08-01"]},
                    {"resourceType": "serverFarms", "apiVersions": ["2016-09-01"]}
                ]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_show_resolves_api_version_from_provider() {
        let server = MockServer::start().await;
        mount_web_provider(&server).await;

        Mock::given(method("GET"))
            .and(path(sub_path("resourcegroups/rg1/providers/Microsoft.Web/sites/app1")))
            .and(query_param("api-version", "2016-08-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "/subscriptions/x/resourceGroups/rg1/providers/Microsoft.Web/sites/app1",
                "name": "app1",
                "type": "Microsoft.Web/sites",
                "location": "westus"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let args = ResourceArgs {
            resource_group: Some("rg1".into()),
            resource_type: Some("Microsoft.Web/sites".into()),
            name: Some("app1".into()),
            ..Default::default()
        };
        let found = resource::show_resource(&client(&server), &args).await.unwrap();
        assert_eq!(found.resource_type.as_deref(), Some("Microsoft.Web/sites"));
    }

    #[tokio::test]
    async fn test_show_by_id_resolves_child_through_parent() {
        let server = MockServer::start().await;
        mount_web_provider(&server).await;

        let id = format!(
            "/subscriptions/{}/resourceGroups/rg1/providers/Microsoft.Web/sites/app1/slots/staging",
            SUB
        );
        Mock::given(method("GET"))
            .and(path(id.clone()))
            .and(query_param("api-version", "2016-08-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "staging"})))
            .expect(1)
            .mount(&server)
            .await;

        let args = ResourceArgs {
            id: Some(id),
            ..Default::default()
        };
        let found = resource::show_resource(&client(&server), &args).await.unwrap();
        assert_eq!(found.name.as_deref(), Some("staging"));
    }

    #[tokio::test]
    async fn test_tag_rebuilds_resource_with_new_tags() {
        let server = MockServer::start().await;
        let resource_path = sub_path("resourcegroups/rg1/providers/Microsoft.Web/sites/app1");

        Mock::given(method("GET"))
            .and(path(resource_path.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "/subscriptions/x/resourceGroups/rg1/providers/Microsoft.Web/sites/app1",
                "name": "app1",
                "location": "westus",
                "kind": "app",
                "tags": {"old": "1"},
                "properties": {"enabled": true}
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path(resource_path))
            .and(body_json(json!({
                "location": "westus",
                "kind": "app",
                "tags": {"env": "prod"},
                "properties": {"enabled": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "app1"})))
            .expect(1)
            .mount(&server)
            .await;

        let args = ResourceArgs {
            resource_group: Some("rg1".into()),
            namespace: Some("Microsoft.Web".into()),
            resource_type: Some("sites".into()),
            name: Some("app1".into()),
            api_version: Some("2016-08-01".into()),
            ..Default::default()
        };
        let tags = azrm::commands::parse_tags(&["env=prod".to_string()]);
        resource::tag_resource(&client(&server), &args, tags).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_checks_group_then_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(sub_path("resourcegroups/rg1")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "rg1", "location": "westus"})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(sub_path("resources")))
            .and(query_param("$filter", "resourceGroup eq 'rg1' and startswith(tagname, 'env')"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [{"name": "a"}]})))
            .expect(1)
            .mount(&server)
            .await;

        let filter = ResourceFilter {
            resource_group: Some("rg1".into()),
            tag: Some(TagFilter::parse("env*")),
            ..Default::default()
        };
        let found = resource::list_resources(&client(&server), &filter).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_polls_async_operation() {
        let server = MockServer::start().await;
        let resource_path = sub_path("resourcegroups/rg1/providers/Microsoft.Web/sites/app1");

        Mock::given(method("DELETE"))
            .and(path(resource_path))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Azure-AsyncOperation", format!("{}/operations/op1", server.uri()).as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/operations/op1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Succeeded"})))
            .expect(1)
            .mount(&server)
            .await;

        let args = ResourceArgs {
            resource_group: Some("rg1".into()),
            namespace: Some("Microsoft.Web".into()),
            resource_type: Some("sites".into()),
            name: Some("app1".into()),
            api_version: Some("2016-08-01".into()),
            ..Default::default()
        };
        let result = resource::delete_resource(&client(&server), &args).await.unwrap();
        assert!(result.is_null());
    }

    #[tokio::test]
    async fn test_failed_operation_surfaces_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Azure-AsyncOperation", format!("{}/operations/op2", server.uri()).as_str()),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/operations/op2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "Failed",
                "error": {"code": "Conflict", "message": "Resource is locked"}
            })))
            .mount(&server)
            .await;

        let args = ResourceArgs {
            id: Some(format!("/subscriptions/{}/resourceGroups/rg1/providers/NS/things/t1", SUB)),
            api_version: Some("1".into()),
            ..Default::default()
        };
        let err = resource::delete_resource(&client(&server), &args).await.unwrap_err();
        assert_eq!(err.to_string(), "Resource is locked");
    }

    #[tokio::test]
    async fn test_operation_that_never_finishes_gives_up() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Azure-AsyncOperation", format!("{}/operations/op3", server.uri()).as_str()),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/operations/op3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "InProgress"})))
            .expect(3)
            .mount(&server)
            .await;

        let args = ResourceArgs {
            id: Some(format!("/subscriptions/{}/resourceGroups/rg1/providers/NS/things/t1", SUB)),
            api_version: Some("1".into()),
            ..Default::default()
        };
        let client = client(&server).with_max_polls(3);
        let err = resource::delete_resource(&client, &args).await.unwrap_err();
        assert!(err.to_string().contains("still running after 3 status checks"));
    }

    #[tokio::test]
    async fn test_update_merges_properties_and_keeps_other_fields() {
        let server = MockServer::start().await;
        let resource_path = sub_path("resourcegroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1");

        Mock::given(method("GET"))
            .and(path(resource_path.clone()))
            .and(query_param("api-version", "2017-03-30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "vm1",
                "location": "westus",
                "zones": ["1"],
                "etag": "W/\"abc\"",
                "extendedLocation": {"name": "edge", "type": "EdgeZone"},
                "properties": {"a": 1}
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path(resource_path))
            .and(body_json(json!({
                "name": "vm1",
                "location": "westus",
                "zones": ["1"],
                "etag": "W/\"abc\"",
                "extendedLocation": {"name": "edge", "type": "EdgeZone"},
                "properties": {"a": 1, "b": 2}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "vm1"})))
            .expect(1)
            .mount(&server)
            .await;

        let args = ResourceArgs {
            resource_group: Some("rg1".into()),
            namespace: Some("Microsoft.Compute".into()),
            resource_type: Some("virtualMachines".into()),
            name: Some("vm1".into()),
            api_version: Some("2017-03-30".into()),
            ..Default::default()
        };
        resource::update_resource(&client(&server), &args, json!({"b": 2}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_move_posts_target_group_and_waits() {
        let server = MockServer::start().await;
        let ids = vec![
            format!("/subscriptions/{}/resourceGroups/rg1/providers/Microsoft.Web/sites/app1", SUB),
            format!("/subscriptions/{}/resourceGroups/rg1/providers/Microsoft.Web/serverFarms/plan1", SUB),
        ];

        Mock::given(method("POST"))
            .and(path(sub_path("resourcegroups/rg1/moveResources")))
            .and(body_json(json!({
                "resources": ids.clone(),
                "targetResourceGroup": format!("/subscriptions/{}/resourceGroups/rg2", SUB)
            })))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Location", format!("{}/moves/m1", server.uri()).as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/moves/m1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = resource::move_resource(&client(&server), &ids, "rg2", None)
            .await
            .unwrap();
        assert!(result.is_null());
    }

    #[tokio::test]
    async fn test_move_across_groups_is_rejected() {
        let server = MockServer::start().await;
        let ids = vec![
            format!("/subscriptions/{}/resourceGroups/rg1/providers/Microsoft.Web/sites/app1", SUB),
            format!("/subscriptions/{}/resourceGroups/rg9/providers/Microsoft.Web/sites/app2", SUB),
        ];

        let err = resource::move_resource(&client(&server), &ids, "rg2", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "All resources should be under the same group");
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}

/// Lock commands
mod lock_tests {
    use super::*;
    use azrm::arm::models::LockLevel;
    use azrm::commands::lock::{self, LockArgs};

    #[tokio::test]
    async fn test_create_at_resource_level() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(sub_path(
                "resourcegroups/rg1/providers/Microsoft.Storage/storageAccounts/sa1/providers/Microsoft.Authorization/locks/nodelete",
            )))
            .and(body_json(json!({
                "name": "nodelete",
                "properties": {"level": "CanNotDelete", "notes": "keep"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "nodelete",
                "properties": {"level": "CanNotDelete", "notes": "keep"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let args = LockArgs {
            resource_group: Some("rg1".into()),
            resource_type: Some("Microsoft.Storage/storageAccounts".into()),
            resource_name: Some("sa1".into()),
            ..Default::default()
        };
        let created = lock::create_lock(&client(&server), "nodelete", &args, "CanNotDelete", Some("keep"))
            .await
            .unwrap();
        assert_eq!(created.properties.notes.as_deref(), Some("keep"));
    }

    #[tokio::test]
    async fn test_update_changes_notes() {
        let server = MockServer::start().await;
        let lock_path = sub_path("resourceGroups/rg1/providers/Microsoft.Authorization/locks/l1");

        Mock::given(method("GET"))
            .and(path(lock_path.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "l1",
                "properties": {"level": "ReadOnly", "notes": "old"}
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path(lock_path))
            .and(body_json(json!({
                "name": "l1",
                "properties": {"level": "ReadOnly", "notes": "new"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "l1",
                "properties": {"level": "ReadOnly", "notes": "new"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let updated = lock::update_lock(&client(&server), "l1", Some("rg1"), None, Some("new"))
            .await
            .unwrap();
        assert_eq!(updated.properties.notes.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_delete_at_group_level() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(sub_path("resourceGroups/rg1/providers/Microsoft.Authorization/locks/l1")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let args = LockArgs {
            resource_group: Some("rg1".into()),
            ..Default::default()
        };
        lock::delete_lock(&client(&server), "l1", &args).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_accepts_unspecified_level() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(sub_path("providers/Microsoft.Authorization/locks")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [
                    {"name": "a", "properties": {"level": "CanNotDelete"}},
                    {"name": "b", "properties": {"level": "NotSpecified"}}
                ]
            })))
            .mount(&server)
            .await;

        let locks = lock::list_locks(&client(&server), &LockArgs::default(), None)
            .await
            .unwrap();
        assert_eq!(locks.len(), 2);
        assert_eq!(locks[1].properties.level, LockLevel::NotSpecified);
    }

    #[tokio::test]
    async fn test_invalid_level_is_rejected_before_any_call() {
        let server = MockServer::start().await;
        let err = lock::create_lock(&client(&server), "l", &LockArgs::default(), "Everything", None)
            .await
            .unwrap_err();
        assert!(matches!(as_cli_error(&err), Some(CliError::Usage(_))));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}

/// Policy commands
mod policy_tests {
    use super::*;
    use azrm::commands::policy;

    #[tokio::test]
    async fn test_list_strictly_matches_group_scope() {
        let server = MockServer::start().await;
        let group_scope = format!("/subscriptions/{}/resourceGroups/rg1", SUB);

        Mock::given(method("GET"))
            .and(path(sub_path(
                "resourcegroups/rg1/providers/Microsoft.Authorization/policyAssignments",
            )))
            .and(query_param("api-version", "2016-12-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [
                    {"name": "here", "properties": {"scope": group_scope.to_uppercase()}},
                    {"name": "inherited", "properties": {"scope": format!("/subscriptions/{}", SUB)}}
                ]
            })))
            .mount(&server)
            .await;

        let c = client(&server);
        let strict = policy::list_policy_assignment(&c, false, Some("rg1"), None)
            .await
            .unwrap();
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].name.as_deref(), Some("here"));

        let all = policy::list_policy_assignment(&c, true, None, Some(&group_scope))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_create_resolves_definition_by_name() {
        let server = MockServer::start().await;
        let definition_id = format!(
            "/subscriptions/{}/providers/Microsoft.Authorization/policyDefinitions/allowed-locations",
            SUB
        );

        Mock::given(method("GET"))
            .and(path(sub_path(
                "providers/Microsoft.Authorization/policyDefinitions/allowed-locations",
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": definition_id,
                "name": "allowed-locations",
                "properties": {}
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path(sub_path(
                "providers/Microsoft.Authorization/policyAssignments/a1",
            )))
            .and(body_json(json!({
                "properties": {
                    "policyDefinitionId": definition_id,
                    "scope": format!("/subscriptions/{}", SUB)
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "a1", "properties": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let created = policy::create_policy_assignment(&client(&server), "allowed-locations", Some("a1"), None, None, None)
            .await
            .unwrap();
        assert_eq!(created.name.as_deref(), Some("a1"));
    }
}

/// Deployment commands
mod deployment_tests {
    use super::*;
    use azrm::commands::deployment::{self, DeploymentRequest};
    use azrm::prompt::TerminalPrompter;
    use std::io::{Cursor, Write};

    #[tokio::test]
    async fn test_validate_posts_merged_parameters() {
        let server = MockServer::start().await;

        let mut template = tempfile::NamedTempFile::new().unwrap();
        write!(
            template,
            r#"{{"parameters": {{"site": {{"type": "string"}}, "sku": {{"type": "string", "defaultValue": "F1"}}}}}}"#
        )
        .unwrap();

        Mock::given(method("POST"))
            .and(path(sub_path(
                "resourcegroups/rg1/providers/Microsoft.Resources/deployments/deployment_dry_run/validate",
            )))
            .and(body_json(json!({
                "properties": {
                    "template": {"parameters": {"site": {"type": "string"}, "sku": {"type": "string", "defaultValue": "F1"}}},
                    "parameters": {"site": {"value": "second"}},
                    "mode": "Incremental"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"properties": {"provisioningState": "Succeeded"}})))
            .expect(1)
            .mount(&server)
            .await;

        let request = DeploymentRequest {
            resource_group: "rg1".into(),
            template_file: Some(template.path().to_path_buf()),
            parameters: vec![
                r#"{"site": {"value": "first"}}"#.to_string(),
                r#"{"parameters": {"site": {"value": "second"}}}"#.to_string(),
            ],
            ..Default::default()
        };
        let mut prompter = TerminalPrompter::new(Cursor::new(Vec::new()), Vec::new());
        let result = deployment::validate(&client(&server), &request, &mut prompter)
            .await
            .unwrap();
        assert_eq!(result["properties"]["provisioningState"], "Succeeded");
    }

    #[tokio::test]
    async fn test_export_returns_template() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(sub_path(
                "resourcegroups/rg1/providers/Microsoft.Resources/deployments/web/exportTemplate",
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "template": {"$schema": "s", "resources": [{"type": "Microsoft.Web/sites"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let template = deployment::export_deployment_as_template(&client(&server), "rg1", "web")
            .await
            .unwrap();
        assert_eq!(template["resources"][0]["type"], "Microsoft.Web/sites");
    }

    #[tokio::test]
    async fn test_operations_are_fetched_in_order() {
        let server = MockServer::start().await;

        for id in ["op1", "op2"] {
            Mock::given(method("GET"))
                .and(path(sub_path(&format!(
                    "resourcegroups/rg1/providers/Microsoft.Resources/deployments/web/operations/{}",
                    id
                ))))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"operationId": id})))
                .mount(&server)
                .await;
        }

        let ops = deployment::get_deployment_operations(
            &client(&server),
            "rg1",
            "web",
            &["op2".to_string(), "op1".to_string()],
        )
        .await
        .unwrap();
        assert_eq!(ops[0]["operationId"], "op2");
        assert_eq!(ops[1]["operationId"], "op1");
    }
}
