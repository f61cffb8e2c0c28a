//! HTTP wrapper shared by the SPARQL and Action API clients

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Rate limited")]
    RateLimited,
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// reqwest wrapper carrying the bot's User-Agent and, when configured,
/// an OAuth bearer token for write operations.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            user_agent: user_agent.to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn apply_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("User-Agent", &self.user_agent);
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    pub async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let request = self.apply_headers(self.client.get(url));
        Self::finish(request).await
    }

    pub async fn get_with_params(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        let url = Url::parse_with_params(url, params).map_err(|_| HttpError::InvalidUrl {
            url: url.to_string(),
        })?;

        self.get(url.as_str()).await
    }

    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        let request = self.apply_headers(self.client.post(url)).form(form);
        Self::finish(request).await
    }

    async fn finish(request: RequestBuilder) -> Result<HttpResponse, HttpError> {
        let response = request.send().await.map_err(|e| HttpError::RequestFailed {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(HttpError::RateLimited);
        }

        let body = response.text().await.map_err(|e| HttpError::RequestFailed {
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}
