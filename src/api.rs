//! SWAPI client

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::action::Action;
use crate::state::Character;

pub const DEFAULT_API_BASE: &str = "https://swapi.dev/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// The one message shown for any failed page fetch.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

const PORTRAIT_BASE: &str = "https://starwars-visualguide.com/assets/img/characters";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `GET /people/?page=N` response body
#[derive(Debug, Deserialize)]
struct PeopleResponse {
    #[serde(default)]
    next: Option<String>,
    results: Vec<Character>,
}

/// One page of the people listing
#[derive(Clone, Debug, PartialEq)]
pub struct PeoplePage {
    pub characters: Vec<Character>,
    /// The listing reported a following page
    pub has_next: bool,
}

/// Parse a people listing body
pub fn parse_people_page(body: &[u8]) -> Result<PeoplePage, ApiError> {
    let response: PeopleResponse = serde_json::from_slice(body)?;
    let has_next = response.next.is_some() && !response.results.is_empty();
    Ok(PeoplePage {
        characters: response.results,
        has_next,
    })
}

/// Turn a finished page fetch into the action the reducer expects.
///
/// Every failure collapses into [`FETCH_FAILED_MESSAGE`]; the cause only
/// goes to the log.
pub fn page_result_action(page: u32, result: Result<PeoplePage, ApiError>) -> Action {
    match result {
        Ok(loaded) => Action::PageDidLoad {
            page,
            characters: loaded.characters,
            has_next: loaded.has_next,
        },
        Err(err) => {
            tracing::warn!(page, "page fetch failed: {err}");
            Action::PageDidError {
                page,
                error: FETCH_FAILED_MESSAGE.to_string(),
            }
        }
    }
}

/// Portrait image for a character, keyed on its SWAPI id
pub fn portrait_url(character: &Character) -> Option<String> {
    character
        .resource_id()
        .map(|id| format!("{PORTRAIT_BASE}/{id}.jpg"))
}

#[derive(Clone, Debug)]
pub struct SwapiClient {
    http: reqwest::Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn people_url(&self, page: u32) -> String {
        format!("{}/people/?page={page}", self.base_url)
    }

    /// Fetch one page of characters
    pub async fn fetch_people(&self, page: u32) -> Result<PeoplePage, ApiError> {
        let url = self.people_url(page);
        tracing::debug!(%url, "fetching people page");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.bytes().await?;
        let page_data = parse_people_page(&body)?;

        tracing::info!(
            page,
            count = page_data.characters.len(),
            has_next = page_data.has_next,
            "people page loaded"
        );
        Ok(page_data)
    }
}
