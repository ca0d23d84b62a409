// src/services/namespaces.rs
//
// These endpoints are not part of the documented API; they are what the
// Cognos UI calls when navigating the Accounts menu. They require the
// X-XSRF-Token header obtained through
// [`ReportDataService::login`](super::ReportDataService::login).

use std::sync::Arc;

use crate::error::ClientError;
use crate::objects::NamespaceObject;
use crate::rest::RestService;

use super::parse_list;

const BASE_ENDPOINT: &str = "/v1/namespaces";

/// Namespace-administration endpoints.
pub struct NamespacesService {
    rest: Arc<RestService>,
}

impl NamespacesService {
    pub(crate) fn new(rest: Arc<RestService>) -> Self {
        Self { rest }
    }

    /// List the configured namespaces.
    pub async fn get_namespaces(&self) -> Result<Vec<NamespaceObject>, ClientError> {
        let response = self.rest.get(BASE_ENDPOINT, None).await?;
        Ok(parse_list(&response.data, "data"))
    }

    /// List the items directly under a namespace object.
    pub async fn get_namespace_items(
        &self,
        namespace_object: &NamespaceObject,
    ) -> Result<Vec<NamespaceObject>, ClientError> {
        let response = self
            .rest
            .get(&format!("{BASE_ENDPOINT}/{}/items", namespace_object.id), None)
            .await?;
        Ok(parse_list(&response.data, "data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::request, responders::json_encoded, Expectation, Server};
    use reqwest::Url;
    use serde_json::json;

    fn service(server: &Server) -> NamespacesService {
        let base_url = Url::parse(&server.url_str("")).unwrap();
        NamespacesService::new(Arc::new(RestService::new(base_url).unwrap()))
    }

    #[tokio::test]
    async fn get_namespaces_reads_the_data_key() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v1/namespaces"))
                .respond_with(json_encoded(json!({
                    "data": [{
                        "id": "CognosEx",
                        "type": "namespace",
                        "defaultName": "CognosEx",
                        "searchPath": "CAMID(\"CognosEx\")",
                        "objectClass": "namespace",
                        "hasChildren": true,
                    }]
                }))),
        );

        let namespaces = service(&server).get_namespaces().await.unwrap();
        assert_eq!(namespaces.len(), 1);
        assert_eq!(namespaces[0].object_class, "namespace");
        assert_eq!(namespaces[0].has_children, Some(true));
    }

    #[tokio::test]
    async fn get_namespaces_defaults_to_empty_without_the_key() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v1/namespaces"))
                .respond_with(json_encoded(json!({"error": "not signed on"}))),
        );

        let namespaces = service(&server).get_namespaces().await.unwrap();
        assert!(namespaces.is_empty());
    }
}
