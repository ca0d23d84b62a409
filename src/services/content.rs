// src/services/content.rs

use std::sync::Arc;

use crate::error::ClientError;
use crate::objects::ContentObject;
use crate::rest::RestService;

use super::{parse_list, Outcome};

const BASE_ENDPOINT: &str = "/api/v1/content";
const TARGET: &str = "cognos_client::services::content";

/// Content-repository endpoints.
pub struct ContentService {
    rest: Arc<RestService>,
}

impl ContentService {
    pub(crate) fn new(rest: Arc<RestService>) -> Self {
        Self { rest }
    }

    /// Fetch a content object. `fields` narrows the returned attribute set
    /// (comma-joined into the `fields` query parameter); pass `None` for the
    /// server default.
    pub async fn get_content(
        &self,
        content_id: &str,
        fields: Option<&[&str]>,
    ) -> Result<ContentObject, ClientError> {
        let joined = fields.map(|list| list.join(","));
        let params = joined
            .as_ref()
            .map(|value| vec![("fields", value.as_str())]);
        let response = self
            .rest
            .get(&format!("{BASE_ENDPOINT}/{content_id}"), params.as_deref())
            .await?;
        Ok(serde_json::from_value(response.data)?)
    }

    /// List the objects inside a content object, e.g. the reports in a
    /// folder.
    pub async fn get_content_items(
        &self,
        content_id: &str,
    ) -> Result<Vec<ContentObject>, ClientError> {
        let response = self
            .rest
            .get(&format!("{BASE_ENDPOINT}/{content_id}/items"), None)
            .await?;
        Ok(parse_list(&response.data, "content"))
    }

    /// PUT a modified content object back, policies included. 204 means the
    /// update was applied.
    pub async fn update_content(
        &self,
        content_object: &ContentObject,
    ) -> Result<Outcome, ClientError> {
        let data = serde_json::to_value(content_object)?;
        let response = self
            .rest
            .put(
                &format!("{BASE_ENDPOINT}/{}", content_object.id),
                None,
                Some(&data),
            )
            .await?;
        let outcome = Outcome::from_response(&response);
        if outcome == Outcome::NoContent {
            tracing::debug!(
                target: TARGET,
                object = %content_object.default_name,
                "updated content object"
            );
        } else {
            tracing::warn!(
                target: TARGET,
                object = %content_object.default_name, message = %response.message,
                "updating content object failed"
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Permission, Policy, SecurityObject};
    use httptest::{
        matchers::{all_of, contains, request, url_decoded},
        responders::{json_encoded, status_code},
        Expectation, Server,
    };
    use reqwest::Url;
    use serde_json::json;

    fn service(server: &Server) -> ContentService {
        let base_url = Url::parse(&server.url_str("")).unwrap();
        ContentService::new(Arc::new(RestService::new(base_url).unwrap()))
    }

    #[tokio::test]
    async fn get_content_parses_policies() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/api/v1/content/c1"),
                request::query(url_decoded(contains((
                    "fields",
                    "defaultName,policies"
                )))),
            ])
            .respond_with(json_encoded(json!({
                "id": "c1",
                "type": "folder",
                "defaultName": "Shared Reports",
                "modificationTime": "2024-03-01T10:00:00Z",
                "policies": [{
                    "permissions": [{"access": "grant", "name": "read"}],
                    "securityObject": {"searchPath": "/g1", "type": "group"},
                }],
            }))),
        );

        let content = service(&server)
            .get_content("c1", Some(&["defaultName", "policies"]))
            .await
            .unwrap();
        assert_eq!(content.default_name, "Shared Reports");
        assert_eq!(content.policies.len(), 1);
        assert_eq!(content.policies[0].permissions[0].access, "grant");
    }

    #[tokio::test]
    async fn get_content_items_reads_the_content_key() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/api/v1/content/c1/items"))
                .respond_with(json_encoded(json!({
                    "content": [{
                        "id": "c2",
                        "type": "report",
                        "defaultName": "Quarterly Sales",
                        "modificationTime": "2024-03-02T09:00:00Z",
                    }]
                }))),
        );

        let items = service(&server).get_content_items("c1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].object_type, "report");
        assert!(items[0].policies.is_empty());
    }

    #[tokio::test]
    async fn update_content_serializes_the_full_object() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/api/v1/content/c1"),
                request::body(httptest::matchers::json_decoded(
                    httptest::matchers::eq(json!({
                        "id": "c1",
                        "type": "folder",
                        "defaultName": "Shared Reports",
                        "policies": [{
                            "permissions": [{"access": "grant", "name": "read"}],
                            "securityObject": {"searchPath": "/g1", "type": "group"},
                        }],
                    }))
                )),
            ])
            .respond_with(status_code(204)),
        );

        let content = ContentObject {
            id: "c1".into(),
            object_type: "folder".into(),
            default_name: "Shared Reports".into(),
            modification_time: None,
            policies: vec![Policy {
                permissions: vec![Permission {
                    access: "grant".into(),
                    name: "read".into(),
                }],
                security_object: SecurityObject {
                    search_path: "/g1".into(),
                    object_type: "group".into(),
                },
            }],
        };
        let outcome = service(&server).update_content(&content).await.unwrap();
        assert_eq!(outcome, Outcome::NoContent);
    }
}
