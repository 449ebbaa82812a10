//! HTTP client for FaceIT-style question banks.

use async_trait::async_trait;
use tracing::instrument;

use quizkit_core::model::QuestionPackage;

use crate::error::FetchError;
use crate::format::{package_from_wire, WireResponse};

const DEFAULT_BASE_URL: &str = "https://dev.faceittools.com/questions";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for backends that search a question bank by keyword.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "faceit").
    fn name(&self) -> &str;

    /// Search for questions matching `query` and return them as a package.
    ///
    /// An empty package (HTTP 204 upstream) is a successful result, not an
    /// error.
    async fn search(&self, query: &str) -> Result<QuestionPackage, FetchError>;
}

/// Client for the FaceIT `fetch_questions` endpoint.
pub struct FaceitClient {
    base_url: String,
    /// Threshold stamped onto fetched packages; the wire format has none.
    passing_threshold: f64,
    client: reqwest::Client,
}

impl FaceitClient {
    pub fn new(base_url: Option<String>, passing_threshold: f64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            passing_threshold,
            client,
        }
    }
}

#[async_trait]
impl QuestionSource for FaceitClient {
    fn name(&self) -> &str {
        "faceit"
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<QuestionPackage, FetchError> {
        let url = format!("{}/fetch_questions/{}", self.base_url, query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();

        // The bank signals "no matches" with 204 rather than an empty list.
        if status.as_u16() == 204 {
            return Ok(QuestionPackage {
                name: query.to_string(),
                description: String::new(),
                questions: vec![],
                passing_threshold: self.passing_threshold,
                additional_material: None,
                status: Some("no-content".into()),
            });
        }

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| FetchError::MalformedBody(e.to_string()))?;

        // Sanity check: 200 with a non-success body status is an upstream
        // inconsistency, not data.
        if body.status != "success" {
            return Err(FetchError::BadStatus(body.status));
        }

        let (package, rejected) = package_from_wire(body, query, self.passing_threshold);
        if !rejected.is_empty() {
            tracing::warn!(
                count = rejected.len(),
                "dropped questions the bank sent in an unusable shape"
            );
        }
        Ok(package)
    }
}
