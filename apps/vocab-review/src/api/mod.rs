//! HTTP client for the vocabulary service.

pub mod models;

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use review_core::{
    CheckInReceipt, CheckInService, CheckInState, ReviewService, ServiceError, WordCard,
};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use models::{BatchDeleteRequest, Envelope, VerdictRequest};
pub use models::{NewQuote, NewWord, Quote, QuoteUpdate, WordEntry, WordStats, WordUpdate};

struct ApiClientInner {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Client for the vocabulary service's REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                token,
            }),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_url, config.token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // === Words ===

    pub async fn list_words(&self) -> Result<Vec<WordEntry>, ServiceError> {
        let words: Option<Vec<WordEntry>> = self.fetch(Method::GET, "/words").await?;
        Ok(words.unwrap_or_default())
    }

    pub async fn add_word(&self, word: &NewWord) -> Result<(), ServiceError> {
        self.execute(self.request(Method::POST, "/words/addWord").json(word))
            .await
    }

    pub async fn update_word(&self, id: &str, update: &WordUpdate) -> Result<(), ServiceError> {
        let path = format!("/words/updateWord/{id}");
        self.execute(self.request(Method::PUT, &path).json(update))
            .await
    }

    pub async fn delete_word(&self, id: &str) -> Result<(), ServiceError> {
        let path = format!("/words/deleteWord/{id}");
        self.execute(self.request(Method::DELETE, &path)).await
    }

    pub async fn batch_delete_words(&self, ids: &[String]) -> Result<(), ServiceError> {
        self.execute(
            self.request(Method::DELETE, "/words/batchDeleteWord")
                .json(&BatchDeleteRequest { ids }),
        )
        .await
    }

    pub async fn word_stats(&self) -> Result<WordStats, ServiceError> {
        self.fetch(Method::GET, "/words/stats").await
    }

    // === Quotes ===

    pub async fn random_quote(&self) -> Result<Quote, ServiceError> {
        self.fetch(Method::GET, "/quotes/random").await
    }

    pub async fn list_quotes(&self) -> Result<Vec<Quote>, ServiceError> {
        let quotes: Option<Vec<Quote>> = self.fetch(Method::GET, "/quotes").await?;
        Ok(quotes.unwrap_or_default())
    }

    pub async fn add_quote(&self, quote: &NewQuote) -> Result<(), ServiceError> {
        self.execute(self.request(Method::POST, "/quotes/addQuote").json(quote))
            .await
    }

    pub async fn update_quote(&self, id: &str, update: &QuoteUpdate) -> Result<(), ServiceError> {
        let path = format!("/quotes/updateQuote/{id}");
        self.execute(self.request(Method::PUT, &path).json(update))
            .await
    }

    pub async fn delete_quote(&self, id: &str) -> Result<(), ServiceError> {
        let path = format!("/quotes/deleteQuote/{id}");
        self.execute(self.request(Method::DELETE, &path)).await
    }

    // === Private methods ===

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        let builder = self.inner.client.request(method, url);
        match &self.inner.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, ServiceError> {
        let resp = self.send(self.request(method, path)).await?;
        let body: Envelope<T> = resp
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        Ok(body.into_inner())
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(), ServiceError> {
        self.send(builder).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ServiceError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Backend { status, message });
        }

        Ok(resp)
    }
}

impl ReviewService for ApiClient {
    async fn fetch_due_words(&self) -> Result<Vec<WordCard>, ServiceError> {
        let words: Option<Vec<WordCard>> = self.fetch(Method::GET, "/words/review").await?;
        Ok(words.unwrap_or_default())
    }

    async fn submit_verdict(&self, word_id: &str, remembered: bool) -> Result<(), ServiceError> {
        let path = format!("/words/review/{word_id}");
        self.execute(
            self.request(Method::POST, &path)
                .json(&VerdictRequest { remembered }),
        )
        .await
    }
}

impl CheckInService for ApiClient {
    async fn fetch_check_in_state(&self) -> Result<CheckInState, ServiceError> {
        self.fetch(Method::GET, "/checkin/stats").await
    }

    async fn perform_check_in(&self) -> Result<CheckInReceipt, ServiceError> {
        self.fetch(Method::POST, "/checkin").await
    }
}
