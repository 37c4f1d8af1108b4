pub mod dto;
pub mod pagination;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, error, warn};

use crate::config::CanvasConfig;
use crate::error::AppError;
use crate::models::ListedCourse;
use pagination::{Listing, Page};

pub const PAGE_SIZE: u32 = 100;

#[async_trait]
pub trait CanvasClient: Send + Sync {
    /// All courses in `account` matching `search_term`, in page order.
    ///
    /// A failed page ends the listing; earlier pages are kept. Entries that
    /// could not be read stay in the listing as `Err`.
    async fn list_courses(&self, account: &str, search_term: &str) -> Listing<ListedCourse>;

    /// The `sis_user_id` of a Canvas user, or `None` when it cannot be had.
    async fn resolve_instructor_identity(&self, user_id: u64) -> Option<String>;
}

pub struct CanvasHttpClient {
    client: Client,
    config: CanvasConfig,
}

impl CanvasHttpClient {
    pub fn new(config: CanvasConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn courses_url(&self, account: &str, search_term: &str) -> Result<Url, AppError> {
        let base = format!("{}/accounts/{}/courses", self.config.base_url, account);
        let per_page = PAGE_SIZE.to_string();
        Url::parse_with_params(
            &base,
            &[
                ("search_term", search_term),
                ("search_by", "course"),
                ("per_page", per_page.as_str()),
                ("include[]", "total_students"),
                ("include[]", "teachers"),
                ("include[]", "term"),
                ("include[]", "account"),
                ("include[]", "start_at"),
            ],
        )
        .map_err(|e| AppError::Config(format!("Invalid Canvas URL {}: {}", base, e)))
    }

    async fn fetch_course_page(&self, url: String) -> Result<Page<ListedCourse>, AppError> {
        debug!("Fetching Canvas page {}", url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::from_response(response).await);
        }

        let next = pagination::next_link(response.headers());
        let raw: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(format!("Canvas course page: {}", e)))?;

        let items = raw
            .into_iter()
            .map(|value| {
                let entry = dto::parse_course(value);
                if let Err(rejected) = &entry {
                    warn!(
                        "Failed to parse Canvas course {} on {}: {}",
                        rejected.code, url, rejected.error
                    );
                }
                entry
            })
            .collect();

        Ok(Page { items, next })
    }

    async fn fetch_sis_user_id(&self, user_id: u64) -> Result<String, AppError> {
        let url = format!("{}/users/{}", self.config.base_url, user_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        dto::read_user(user_id, status, &body)
    }
}

#[async_trait]
impl CanvasClient for CanvasHttpClient {
    async fn list_courses(&self, account: &str, search_term: &str) -> Listing<ListedCourse> {
        let first = match self.courses_url(account, search_term) {
            Ok(url) => url.to_string(),
            Err(e) => {
                error!("Canvas listing for account {} not started: {}", account, e);
                return Listing {
                    items: Vec::new(),
                    pages: 0,
                    error: Some(e),
                };
            }
        };

        let listing = pagination::collect_pages(first, |url| self.fetch_course_page(url)).await;

        if let Some(e) = &listing.error {
            error!(
                "Canvas listing for account {} stopped after {} page(s): {}",
                account, listing.pages, e
            );
        }

        listing
    }

    async fn resolve_instructor_identity(&self, user_id: u64) -> Option<String> {
        match self.fetch_sis_user_id(user_id).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Instructor {} unresolved: {}", user_id, e);
                None
            }
        }
    }
}
