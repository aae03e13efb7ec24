// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the CMS query API.
//!
//! Queries are plain GETs:
//!
//! ```text
//! https://{project}.api.sanity.io/v{api_version}/data/query/{dataset}?query=<groq>&$slug="..."
//! ```
//!
//! with `apicdn` instead of `api` when the CDN is enabled. Parameter values
//! are JSON-encoded. Responses wrap the payload as `{ "result": ... }`.

use crate::application::port::ContentSource;
use crate::content::{queries, Project};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("FolioLens/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Error body returned by the query API.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    description: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error
            .and_then(|e| e.description)
            .or(self.message)
    }
}

/// Where and how to reach one project's dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityEndpoint {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl SanityEndpoint {
    /// Query endpoint URL for these coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the project id or dataset is blank.
    pub fn query_base(&self) -> Result<Url> {
        let project_id = self.project_id.trim();
        let dataset = self.dataset.trim();
        if project_id.is_empty() || dataset.is_empty() {
            return Err(Error::Config(
                "query endpoint needs a project id and a dataset".to_string(),
            ));
        }
        let host = if self.use_cdn { "apicdn" } else { "api" };
        let base = format!(
            "https://{project_id}.{host}.sanity.io/v{}/data/query/{dataset}",
            self.api_version.trim().trim_start_matches('v'),
        );
        Url::parse(&base).map_err(|err| Error::Config(err.to_string()))
    }
}

/// CMS query client.
#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl SanityClient {
    /// Creates a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the project id or dataset is missing,
    /// and [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(endpoint: &SanityEndpoint) -> Result<Self> {
        Self::with_base_url(endpoint.query_base()?, endpoint)
    }

    /// Creates a client against an explicit query endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(base: Url, endpoint: &SanityEndpoint) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(endpoint.timeout)
            .build()?;

        Ok(Self {
            http,
            base,
            token: endpoint.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    /// The query endpoint this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds the request URL for a query and its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if a parameter cannot be JSON-encoded.
    pub fn query_url(&self, query: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                pairs.append_pair(&format!("${name}"), &serde_json::to_string(value)?);
            }
        }
        Ok(url)
    }

    /// Runs a query and decodes its `result`.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] on transport failures and timeouts
    /// - [`Error::Cms`] on non-2xx responses
    /// - [`Error::Decode`] if the body does not match `T`
    pub async fn fetch<T: DeserializeOwned>(&self, query: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.query_url(query, params)?;
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(Error::Cms {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let envelope: QueryResponse<T> = serde_json::from_slice(&body)?;
        tracing::debug!(bytes = body.len(), "CMS query succeeded");
        Ok(envelope.result)
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn projects(&self) -> Result<Vec<Project>> {
        let projects: Option<Vec<Project>> = self.fetch(queries::PROJECTS, &[]).await?;
        Ok(projects.unwrap_or_default())
    }

    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        self.fetch(queries::PROJECT_BY_SLUG, &[("slug", slug)]).await
    }

    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        let projects: Option<Vec<Project>> = self
            .fetch(queries::PROJECTS_BY_CATEGORY, &[("category", category)])
            .await?;
        Ok(projects.unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "cms"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> SanityEndpoint {
        SanityEndpoint {
            project_id: " abc123 ".into(),
            dataset: "production".into(),
            api_version: "v2024-01-01".into(),
            use_cdn: false,
            token: None,
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn builds_api_endpoint() {
        let client = SanityClient::new(&endpoint()).expect("client");
        assert_eq!(
            client.base_url().as_str(),
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn cdn_endpoint_when_enabled() {
        let config = SanityEndpoint {
            use_cdn: true,
            ..endpoint()
        };
        let client = SanityClient::new(&config).expect("client");
        assert_eq!(client.base_url().host_str(), Some("abc123.apicdn.sanity.io"));
    }

    #[test]
    fn missing_project_is_a_config_error() {
        let blank = SanityEndpoint {
            dataset: "  ".into(),
            ..endpoint()
        };
        let err = SanityClient::new(&blank).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn parameters_are_json_encoded() {
        let client = SanityClient::new(&endpoint()).expect("client");
        let url = client
            .query_url(queries::PROJECT_BY_SLUG, &[("slug", "les-mots-bleus")])
            .expect("url");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0].0, "query");
        assert_eq!(pairs[0].1, queries::PROJECT_BY_SLUG);
        assert_eq!(pairs[1], ("$slug".to_string(), "\"les-mots-bleus\"".to_string()));
    }

    #[test]
    fn error_bodies_yield_messages() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":{"description":"param $slug referenced, but not provided"}}"#)
                .expect("parses");
        assert_eq!(
            body.into_message().as_deref(),
            Some("param $slug referenced, but not provided")
        );
        let body: ErrorBody = serde_json::from_str(r#"{"message":"Unauthorized"}"#).expect("parses");
        assert_eq!(body.into_message().as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn envelope_unwraps_result() {
        let envelope: QueryResponse<Option<Project>> =
            serde_json::from_str(r#"{"ms": 3, "query": "*", "result": null}"#).expect("parses");
        assert!(envelope.result.is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_http_error() {
        let base = Url::parse("http://127.0.0.1:9/v1/data/query/production").expect("url");
        let config = SanityEndpoint {
            timeout: Duration::from_secs(1),
            ..endpoint()
        };
        let client = SanityClient::with_base_url(base, &config).expect("client");
        let err = client.projects().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)), "got {err:?}");
    }
}
