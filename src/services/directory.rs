use crate::models::{Gender, MatchProfile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://randomuser.me/api";
pub const DEFAULT_NATIONALITY: &str = "fr";
pub const DEFAULT_RESULT_COUNT: usize = 6;

/// Fields requested from the directory
const INCLUDED_FIELDS: &str = "name,location,dob,picture";

/// Errors that can occur when talking to the people directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Directory returned status {0}")]
    Status(u16),

    #[error("Invalid response format: {0}")]
    MalformedResponse(String),
}

impl DirectoryError {
    /// Whether the request itself failed, as opposed to the payload
    pub fn is_network(&self) -> bool {
        matches!(self, DirectoryError::RequestError(_))
    }
}

/// People-directory API client
///
/// Issues exactly one GET per call. There is no retry and no caching; a
/// timeout is applied only when one is configured.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    nationality: String,
    result_count: usize,
    client: Client,
}

impl DirectoryClient {
    /// Create a new directory client
    pub fn new(
        base_url: String,
        nationality: String,
        result_count: usize,
        timeout: Option<Duration>,
    ) -> Result<Self, DirectoryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            base_url,
            nationality,
            result_count,
            client,
        })
    }

    /// Client against the public endpoint with the stock query
    pub fn with_defaults() -> Result<Self, DirectoryError> {
        Self::new(
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_NATIONALITY.to_string(),
            DEFAULT_RESULT_COUNT,
            None,
        )
    }

    pub fn result_count(&self) -> usize {
        self.result_count
    }

    /// Full request URL for a target gender
    pub fn request_url(&self, gender: Gender) -> String {
        format!(
            "{}/?gender={}&results={}&nat={}&inc={}&noinfo",
            self.base_url.trim_end_matches('/'),
            gender,
            self.result_count,
            urlencoding::encode(&self.nationality),
            INCLUDED_FIELDS,
        )
    }

    /// Fetch one batch of profiles of the given gender
    pub async fn fetch_matches(&self, gender: Gender) -> Result<Vec<MatchProfile>, DirectoryError> {
        let url = self.request_url(gender);

        tracing::debug!("Fetching profiles from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Directory responded with {}", status);
            return Err(DirectoryError::Status(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| DirectoryError::MalformedResponse(format!("Body is not JSON: {}", e)))?;

        let profiles = parse_results(&json, self.result_count)?;

        tracing::debug!("Fetched {} profiles (gender: {})", profiles.len(), gender);

        Ok(profiles)
    }
}

/// Turn a directory payload into match profiles
///
/// Either every entry parses or the whole payload is rejected. More entries
/// than were requested is also treated as malformed.
pub fn parse_results(json: &Value, max_results: usize) -> Result<Vec<MatchProfile>, DirectoryError> {
    let results = json
        .get("results")
        .and_then(|r| r.as_array())
        .ok_or_else(|| DirectoryError::MalformedResponse("Missing results array".into()))?;

    if results.len() > max_results {
        return Err(DirectoryError::MalformedResponse(format!(
            "Expected at most {} results, got {}",
            max_results,
            results.len()
        )));
    }

    results
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            parse_entry(entry)
                .ok_or_else(|| DirectoryError::MalformedResponse(format!("Result {} is incomplete", idx)))
        })
        .collect()
}

fn parse_entry(entry: &Value) -> Option<MatchProfile> {
    let text = |a: &str, b: &str| entry.get(a)?.get(b)?.as_str().map(str::to_string);

    Some(MatchProfile {
        first_name: text("name", "first")?,
        last_name: text("name", "last")?,
        city: text("location", "city")?,
        country: text("location", "country")?,
        age: entry
            .get("dob")?
            .get("age")?
            .as_u64()
            .and_then(|a| u32::try_from(a).ok())?,
        photo_url: text("picture", "large")?,
    })
}
