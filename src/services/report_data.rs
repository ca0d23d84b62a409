// src/services/report_data.rs

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::rest::RestService;

use super::Outcome;

const BASE_ENDPOINT: &str = "/v1/disp/rds";
const TARGET: &str = "cognos_client::services::report_data";

/// Cognos Mashup Services endpoints: synchronous report execution plus the
/// legacy logon that hands out the XSRF token.
pub struct ReportDataService {
    rest: Arc<RestService>,
}

impl ReportDataService {
    pub(crate) fn new(rest: Arc<RestService>) -> Self {
        Self { rest }
    }

    /// Log on to the legacy mashup dispatcher.
    ///
    /// Not needed for running reports — the REST session is enough — but this
    /// logon sets the `XSRF-TOKEN` cookie, which is copied into the
    /// persistent `X-XSRF-Token` header required by the undocumented
    /// namespace endpoints. The credentials travel as an XML document inside
    /// the `xmlData` query parameter; that is how this endpoint works.
    pub async fn login(
        &self,
        namespace: &str,
        user: &str,
        password: &SecretString,
    ) -> Result<Outcome, ClientError> {
        let xml_credentials = format!(
            "<credentials>\
             <credentialElements><name>CAMNamespace</name><label>Namespace:</label>\
             <value><actualValue>{namespace}</actualValue></value></credentialElements>\
             <credentialElements><name>CAMUsername</name><label>User ID:</label>\
             <value><actualValue>{user}</actualValue></value></credentialElements>\
             <credentialElements><name>CAMPassword</name><label>Password:</label>\
             <value><actualValue>{password}</actualValue></value></credentialElements>\
             </credentials>",
            password = password.expose_secret(),
        );
        let response = self
            .rest
            .post(
                &format!("{BASE_ENDPOINT}/auth/logon"),
                Some(&[("xmlData", xml_credentials.as_str())]),
                None,
            )
            .await?;

        if response.status_code.as_u16() == 200 {
            let token = self.rest.get_cookie("XSRF-TOKEN")?;
            self.rest.add_http_header("X-XSRF-Token", &token);
            tracing::info!(target: TARGET, namespace, user, "logged in to Cognos Mashup Services");
            Ok(Outcome::Success)
        } else {
            tracing::error!(
                target: TARGET,
                namespace, user, message = %response.message,
                "failed to log in to Cognos Mashup Services"
            );
            Ok(Outcome::Failed {
                status: response.status_code.as_u16(),
                message: response.message,
            })
        }
    }

    /// Run a report synchronously and return the resulting dataset.
    ///
    /// `fmt` defaults to `DataSetJSON`; `selection` narrows the run to one
    /// report object; `row_limit` caps the dataset size. Returns an empty
    /// object (and logs) when the dispatcher rejects the run.
    pub async fn run_report_sync(
        &self,
        report_id: &str,
        selection: Option<&str>,
        fmt: Option<&str>,
        row_limit: Option<u32>,
    ) -> Result<Value, ClientError> {
        tracing::debug!(target: TARGET, report_id, ?selection, "running report");
        let row_limit_value;
        let mut params: Vec<(&str, &str)> = vec![
            ("v", "3"),
            ("async", "OFF"),
            ("fmt", fmt.unwrap_or("DataSetJSON")),
        ];
        if let Some(selection) = selection {
            params.push(("selection", selection));
        }
        if let Some(limit) = row_limit {
            row_limit_value = limit.to_string();
            params.push(("row_limit", row_limit_value.as_str()));
        }
        let response = self
            .rest
            .post(
                &format!("{BASE_ENDPOINT}/reportData/report/{report_id}"),
                Some(&params),
                None,
            )
            .await?;

        if response.status_code.as_u16() == 200 {
            Ok(response.data)
        } else {
            tracing::error!(
                target: TARGET,
                report_id, status = %response.status_code, message = %response.message,
                "report run failed"
            );
            Ok(Value::Object(Map::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{
        matchers::{all_of, contains, request, url_decoded},
        responders::{json_encoded, status_code},
        Expectation, Server,
    };
    use reqwest::Url;
    use serde_json::json;

    fn setup(server: &Server) -> (Arc<RestService>, ReportDataService) {
        let base_url = Url::parse(&server.url_str("")).unwrap();
        let rest = Arc::new(RestService::new(base_url).unwrap());
        (rest.clone(), ReportDataService::new(rest))
    }

    #[tokio::test]
    async fn login_copies_the_xsrf_cookie_into_a_header() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/v1/disp/rds/auth/logon"))
                .respond_with(
                    status_code(200).append_header("set-cookie", "XSRF-TOKEN=tok42; Path=/"),
                ),
        );

        let (rest, service) = setup(&server);
        let outcome = service
            .login("CognosEx", "alice", &SecretString::from("secret"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(rest.get_http_header("X-XSRF-Token").unwrap(), "tok42");
    }

    #[tokio::test]
    async fn run_report_sync_sends_the_dispatcher_params() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/v1/disp/rds/reportData/report/rpt1"),
                request::query(url_decoded(contains(("v", "3")))),
                request::query(url_decoded(contains(("async", "OFF")))),
                request::query(url_decoded(contains(("fmt", "DataSetJSON")))),
                request::query(url_decoded(contains(("row_limit", "100")))),
            ])
            .respond_with(json_encoded(json!({"dataSet": {"dataTable": {"row": []}}}))),
        );

        let (_, service) = setup(&server);
        let dataset = service
            .run_report_sync("rpt1", None, None, Some(100))
            .await
            .unwrap();
        assert!(dataset.get("dataSet").is_some());
    }

    #[tokio::test]
    async fn run_report_sync_returns_empty_object_on_rejection() {
        let server = Server::run();
        // 403 would be fatal at the transport; 409 gets through as data.
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1/disp/rds/reportData/report/rpt1",
            ))
            .respond_with(status_code(409)),
        );

        let (_, service) = setup(&server);
        let dataset = service
            .run_report_sync("rpt1", None, None, None)
            .await
            .unwrap();
        assert_eq!(dataset, json!({}));
    }
}
