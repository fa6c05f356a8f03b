//! Async Batch REST client.
//!
//! One signed `POST` per operation, awaited until the service acknowledges
//! acceptance. No retry and no polling: scheduling begins service-side as
//! soon as the add call returns.

use bytes::Bytes;
use chrono::Utc;
use http::{Method, Request, header};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{SharedKeyCredentials, SignableRequest};
use crate::error::{BatchError, BatchResult};
use crate::models::{JobAddParameter, PoolAddParameter, TaskAddParameter};

/// REST API version pinned on every call.
pub const API_VERSION: &str = "2023-05-01.17.0";

const CONTENT_TYPE_JSON: &str = "application/json; odata=minimalmetadata";

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Client for one Batch account endpoint.
pub struct BatchClient {
    http: HttpsClient,
    base_url: String,
    credentials: SharedKeyCredentials,
}

impl BatchClient {
    pub fn new(endpoint: &str, credentials: SharedKeyCredentials) -> BatchResult<Self> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        // Validate the endpoint up front; later per-request parses append
        // only paths built here.
        let _: http::Uri = base_url.parse()?;
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();
        let http = Client::builder(TokioExecutor::new()).build(connector);
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// `POST /pools` — create an autoscaling pool.
    pub async fn add_pool(&self, pool: &PoolAddParameter) -> BatchResult<()> {
        self.post("/pools", pool).await
    }

    /// `POST /jobs` — create a job bound to a pool.
    pub async fn add_job(&self, job: &JobAddParameter) -> BatchResult<()> {
        self.post("/jobs", job).await
    }

    /// `POST /jobs/{job}/tasks` — add a task to a job.
    pub async fn add_task(&self, job_id: &str, task: &TaskAddParameter) -> BatchResult<()> {
        self.post(&format!("/jobs/{job_id}/tasks"), task).await
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> BatchResult<()> {
        let path_and_query = format!("{path}?api-version={API_VERSION}");
        let uri: http::Uri = format!("{}{}", self.base_url, path_and_query).parse()?;
        let payload = serde_json::to_vec(body)?;

        let ocp_date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let ocp_headers = [("ocp-date".to_string(), ocp_date.clone())];
        let authorization = self.credentials.authorize(&SignableRequest {
            method: "POST",
            path_and_query: &path_and_query,
            content_length: payload.len(),
            content_type: CONTENT_TYPE_JSON,
            ocp_headers: &ocp_headers,
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header("ocp-date", ocp_date)
            .header("client-request-id", Uuid::new_v4().to_string())
            .header(header::AUTHORIZATION, authorization)
            .body(Full::new(Bytes::from(payload)))?;

        debug!(%path, "submitting add request");
        let response = self.http.request(request).await?;
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes();
        if status.is_success() {
            debug!(%path, status = status.as_u16(), "request accepted");
            Ok(())
        } else {
            Err(BatchError::api(status, &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_validated_on_construction() {
        let creds = SharedKeyCredentials::new("acct", "a2V5").unwrap();
        assert!(BatchClient::new("https://\\bad", creds).is_err());
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let creds = SharedKeyCredentials::new("acct", "a2V5").unwrap();
        let client =
            BatchClient::new("https://acct.westeurope.batch.azure.com/", creds).unwrap();
        assert_eq!(client.base_url, "https://acct.westeurope.batch.azure.com");
    }
}
