//! Azure DevOps REST client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::models::{GraphDescriptorResult, GraphGroup, PagedGraphGroups, PolicyConfiguration};
use super::{GraphApi, PolicyApi};
use crate::error::{ApiError, ApiResult};

/// REST API version for policy endpoints
const POLICY_API_VERSION: &str = "5.1";

/// REST API version for graph endpoints
const GRAPH_API_VERSION: &str = "5.1-preview.1";

/// Response header carrying the continuation token for graph listings
const CONTINUATION_TOKEN_HEADER: &str = "x-ms-continuationtoken";

/// Default pacing: 10 requests per second
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

/// Azure DevOps API client
pub struct AzdoClient {
    http: HttpClient,
    org_url: Url,
    graph_url: Url,
    authorization: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

/// Standard list envelope: `{"count": n, "value": [...]}`
#[derive(Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

impl AzdoClient {
    /// Create a client for an organization URL such as `https://dev.azure.com/contoso`.
    ///
    /// The graph host is derived from the organization URL; override it with
    /// [`AzdoClient::with_graph_url`].
    pub fn new(org_url: &str, personal_access_token: &str) -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let org_url = parse_base_url(org_url)?;
        let graph_url = derive_graph_url(&org_url);

        // PATs are sent as basic auth with an empty user name
        let authorization = format!(
            "Basic {}",
            general_purpose::STANDARD.encode(format!(":{}", personal_access_token))
        );

        Ok(Self {
            http,
            org_url,
            graph_url,
            authorization,
            rate_limiter: Arc::new(RateLimiter::direct(quota(DEFAULT_REQUESTS_PER_SECOND))),
        })
    }

    /// Use an explicit graph (vssps) base URL.
    pub fn with_graph_url(mut self, graph_url: &str) -> ApiResult<Self> {
        self.graph_url = parse_base_url(graph_url)?;
        Ok(self)
    }

    /// Change the client-side request pacing.
    pub fn with_requests_per_second(mut self, per_second: u32) -> Self {
        self.rate_limiter = Arc::new(RateLimiter::direct(quota(per_second)));
        self
    }

    /// Build `{org}/{project}/_apis/policy/configurations[/{id}]`
    fn policy_endpoint(&self, project: &str, configuration_id: Option<i32>) -> ApiResult<Url> {
        let mut url = self.org_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::BadRequest(format!("Invalid base URL: {}", self.org_url)))?;
            segments
                .pop_if_empty()
                .push(project)
                .extend(["_apis", "policy", "configurations"]);
            if let Some(id) = configuration_id {
                segments.push(&id.to_string());
            }
        }
        url.query_pairs_mut()
            .append_pair("api-version", POLICY_API_VERSION);
        Ok(url)
    }

    /// Build `{vssps}/_apis/graph/{path...}`
    fn graph_endpoint(&self, path: &[&str]) -> ApiResult<Url> {
        let mut url = self.graph_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BadRequest(format!("Invalid base URL: {}", self.graph_url)))?
            .pop_if_empty()
            .extend(["_apis", "graph"])
            .extend(path);
        url.query_pairs_mut()
            .append_pair("api-version", GRAPH_API_VERSION);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
    }

    /// Send a request and map non-success status codes to `ApiError`
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        self.rate_limiter.until_ready().await;

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        match status {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg))
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg))
            }
            _ => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code: {}",
                status
            ))),
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

fn quota(per_second: u32) -> Quota {
    Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN))
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::BadRequest(format!("Invalid base URL: {}", raw)));
    }
    Ok(url)
}

/// `https://dev.azure.com/org` becomes `https://vssps.dev.azure.com/org`.
/// Hosts that are not `dev.azure.com` are used as-is.
fn derive_graph_url(org_url: &Url) -> Url {
    let mut graph_url = org_url.clone();
    if org_url.host_str() == Some("dev.azure.com") {
        // set_host only fails for cannot-be-a-base URLs, which parse_base_url rejects
        let _ = graph_url.set_host(Some("vssps.dev.azure.com"));
    }
    graph_url
}

#[async_trait]
impl PolicyApi for AzdoClient {
    async fn create_policy_configuration(
        &self,
        project: &str,
        configuration: &PolicyConfiguration,
    ) -> ApiResult<PolicyConfiguration> {
        let url = self.policy_endpoint(project, None)?;
        let response = self
            .send(self.request(Method::POST, url).json(configuration))
            .await?;
        Self::decode(response).await
    }

    async fn get_policy_configuration(
        &self,
        project: &str,
        configuration_id: i32,
    ) -> ApiResult<PolicyConfiguration> {
        let url = self.policy_endpoint(project, Some(configuration_id))?;
        let response = self.send(self.request(Method::GET, url)).await?;
        Self::decode(response).await
    }

    async fn update_policy_configuration(
        &self,
        project: &str,
        configuration_id: i32,
        configuration: &PolicyConfiguration,
    ) -> ApiResult<PolicyConfiguration> {
        let url = self.policy_endpoint(project, Some(configuration_id))?;
        let response = self
            .send(self.request(Method::PUT, url).json(configuration))
            .await?;
        Self::decode(response).await
    }

    async fn delete_policy_configuration(
        &self,
        project: &str,
        configuration_id: i32,
    ) -> ApiResult<()> {
        let url = self.policy_endpoint(project, Some(configuration_id))?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[async_trait]
impl GraphApi for AzdoClient {
    async fn get_descriptor(&self, storage_key: Uuid) -> ApiResult<GraphDescriptorResult> {
        let url = self.graph_endpoint(&["descriptors", &storage_key.to_string()])?;
        let response = self.send(self.request(Method::GET, url)).await?;
        Self::decode(response).await
    }

    async fn list_groups(
        &self,
        scope_descriptor: &str,
        continuation_token: Option<&str>,
    ) -> ApiResult<PagedGraphGroups> {
        let mut url = self.graph_endpoint(&["groups"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("scopeDescriptor", scope_descriptor);
            if let Some(token) = continuation_token {
                query.append_pair("continuationToken", token);
            }
        }

        let response = self.send(self.request(Method::GET, url)).await?;

        let tokens: Vec<String> = response
            .headers()
            .get_all(CONTINUATION_TOKEN_HEADER)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();

        let envelope: ListEnvelope<GraphGroup> = Self::decode(response).await?;

        Ok(PagedGraphGroups {
            graph_groups: envelope.value,
            continuation_token: if tokens.is_empty() { None } else { Some(tokens) },
        })
    }
}
