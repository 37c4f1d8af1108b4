pub mod dto;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use tracing::debug;

use crate::config::LegantoConfig;
use crate::error::AppError;
use crate::models::{CourseUpdate, TargetCourseRecord};

#[async_trait]
pub trait LegantoClient: Send + Sync {
    /// Exact-match lookup by course code. `AppError::NotFound` when nothing matches.
    async fn find_by_code(&self, code: &str) -> Result<TargetCourseRecord, AppError>;

    /// Replaces the course record `course_id` with `update`.
    async fn update_course(&self, course_id: &str, update: &CourseUpdate) -> Result<(), AppError>;
}

pub struct LegantoHttpClient {
    client: Client,
    config: LegantoConfig,
}

impl LegantoHttpClient {
    pub fn new(config: LegantoConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("apikey {}", self.config.api_key))
            .header(ACCEPT, "application/json")
    }

    fn search_url(&self, code: &str) -> Result<Url, AppError> {
        let base = format!("{}/courses", self.config.base_url);
        let query = format!("code~{}", code);
        Url::parse_with_params(
            &base,
            &[
                ("q", query.as_str()),
                ("limit", "10"),
                ("offset", "0"),
                ("status", "ALL"),
                ("order_by", "code"),
                ("direction", "ASC"),
                ("exact_search", "true"),
                ("format", "json"),
            ],
        )
        .map_err(|e| AppError::Config(format!("Invalid Leganto URL {}: {}", base, e)))
    }
}

#[async_trait]
impl LegantoClient for LegantoHttpClient {
    async fn find_by_code(&self, code: &str) -> Result<TargetCourseRecord, AppError> {
        let url = self.search_url(code)?;
        let response = self.authorized(self.client.get(url)).send().await?;

        let status = response.status();
        let body = response.text().await?;
        dto::read_search(code, status, &body)
    }

    async fn update_course(&self, course_id: &str, update: &CourseUpdate) -> Result<(), AppError> {
        let url = format!("{}/courses/{}?format=json", self.config.base_url, course_id);

        let response = self
            .authorized(self.client.put(&url))
            .header(CONTENT_TYPE, "application/json")
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::from_response(response).await);
        }

        debug!("Leganto update {} for {}: {}", course_id, update.code, status);
        Ok(())
    }
}
