//! HTTP client for the alquran.cloud REST API
//!
//! One GET per attempt through a [`Transport`], retried according to the
//! configured [`RetryPolicy`]. Successful bodies are returned raw or decoded into
//! the typed schemas in [`crate::models`]. Failures come back as a single
//! [`RequestError`]; surfacing them to the user is left to the caller.

use crate::config::{ClientConfig, RetryPolicy};
use crate::endpoint::{EditionFilter, Endpoint, Pagination, SectionKind};
use crate::error::{ConfigError, RequestError};
use crate::models::{
    Ayah, Edition, Envelope, Meta, Quran, SajdaAyahs, SearchResults, SectionText, Surah,
    SurahReference,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Response as received, before status classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one GET. Errors are client-side failures with no HTTP status.
    async fn get(&self, url: &str) -> Result<RawResponse, RequestError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, RequestError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            // status already received; an error response keeps it
            Err(e) if !status.is_success() => {
                debug!(url, error = %e, "Discarding unreadable error body");
                String::new()
            }
            Err(e) => return Err(RequestError::Transport(e.to_string())),
        };

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown Error").to_string(),
            body,
        })
    }
}

#[async_trait]
impl<T: Transport> Transport for Arc<T> {
    async fn get(&self, url: &str) -> Result<RawResponse, RequestError> {
        self.as_ref().get(url).await
    }
}

pub struct QuranClient<T = HttpTransport> {
    base_url: String,
    retry: RetryPolicy,
    transport: T,
}

impl QuranClient<HttpTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> QuranClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        endpoint.url(&self.base_url)
    }

    /// Fetch the raw decoded body (the whole envelope) without schema checks
    pub async fn fetch_value(&self, endpoint: &Endpoint) -> Result<serde_json::Value, RequestError> {
        let url = self.url_for(endpoint);
        let body = self.get_with_retry(&url).await?;
        serde_json::from_str(&body)
            .map_err(|e| RequestError::Decode(format!("Invalid JSON from {}: {}", url, e)))
    }

    /// Fetch and decode the envelope's `data` payload
    pub async fn fetch<D: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<D, RequestError> {
        let url = self.url_for(endpoint);
        let body = self.get_with_retry(&url).await?;
        let envelope: Envelope<D> = serde_json::from_str(&body).map_err(|e| {
            RequestError::Decode(format!("Unexpected response from {}: {}", url, e))
        })?;
        Ok(envelope.data)
    }

    async fn get_with_retry(&self, url: &str) -> Result<String, RequestError> {
        let attempts = self.retry.attempts();
        let mut attempt = 1;
        loop {
            debug!(url, attempt, "GET");
            match self.attempt(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < attempts && e.is_retryable() => {
                    warn!(url, attempt, error = %e, "Request failed, retrying");
                    attempt += 1;
                    let delay = self.retry.delay_before(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(&self, url: &str) -> Result<String, RequestError> {
        let response = self.transport.get(url).await?;
        if !(200..300).contains(&response.status) {
            return Err(RequestError::Status {
                status: response.status,
                message: format!(
                    "Http failure response for {}: {} {}",
                    url, response.status, response.reason
                ),
            });
        }
        Ok(response.body)
    }

    // ---- editions ----

    pub async fn editions(&self, filter: EditionFilter) -> Result<Vec<Edition>, RequestError> {
        self.fetch(&Endpoint::Editions(filter)).await
    }

    pub async fn languages(&self) -> Result<Vec<String>, RequestError> {
        self.fetch(&Endpoint::Languages).await
    }

    pub async fn editions_for_language(&self, lang: &str) -> Result<Vec<Edition>, RequestError> {
        self.fetch(&Endpoint::EditionsForLanguage(lang.to_string())).await
    }

    pub async fn edition_types(&self) -> Result<Vec<String>, RequestError> {
        self.fetch(&Endpoint::EditionTypes).await
    }

    pub async fn editions_for_type(&self, edition_type: &str) -> Result<Vec<Edition>, RequestError> {
        self.fetch(&Endpoint::EditionsForType(edition_type.to_string())).await
    }

    pub async fn formats(&self) -> Result<Vec<String>, RequestError> {
        self.fetch(&Endpoint::Formats).await
    }

    pub async fn editions_for_format(&self, format: &str) -> Result<Vec<Edition>, RequestError> {
        self.fetch(&Endpoint::EditionsForFormat(format.to_string())).await
    }

    // ---- text ----

    pub async fn quran(&self, edition: &str) -> Result<Quran, RequestError> {
        self.fetch(&Endpoint::Quran(edition.to_string())).await
    }

    pub async fn surahs(&self) -> Result<Vec<SurahReference>, RequestError> {
        self.fetch(&Endpoint::Surahs).await
    }

    pub async fn surah(&self, surah: u32, edition: &str) -> Result<Surah, RequestError> {
        self.fetch(&Endpoint::Surah { surah, edition: edition.to_string() }).await
    }

    /// `editions` is a comma-separated list of edition identifiers
    pub async fn surah_editions(&self, surah: u32, editions: &str) -> Result<Vec<Surah>, RequestError> {
        self.fetch(&Endpoint::SurahEditions { surah, editions: editions.to_string() }).await
    }

    /// `reference` is an ayah number (`262`) or `surah:ayah` (`2:255`)
    pub async fn ayah(&self, reference: &str, edition: &str) -> Result<Ayah, RequestError> {
        self.fetch(&Endpoint::Ayah { reference: reference.to_string(), edition: edition.to_string() })
            .await
    }

    pub async fn ayah_editions(&self, reference: &str, editions: &str) -> Result<Vec<Ayah>, RequestError> {
        self.fetch(&Endpoint::AyahEditions {
            reference: reference.to_string(),
            editions: editions.to_string(),
        })
        .await
    }

    /// `surah` is a surah number or `all`
    pub async fn search(
        &self,
        keyword: &str,
        surah: &str,
        edition_or_language: &str,
    ) -> Result<SearchResults, RequestError> {
        self.fetch(&Endpoint::Search {
            keyword: keyword.to_string(),
            surah: surah.to_string(),
            edition_or_language: edition_or_language.to_string(),
        })
        .await
    }

    pub async fn section(
        &self,
        kind: SectionKind,
        number: u32,
        edition: &str,
        window: Pagination,
    ) -> Result<SectionText, RequestError> {
        self.fetch(&Endpoint::section(kind, number, edition).with_window(window)).await
    }

    pub async fn juz(&self, juz: u32, edition: &str) -> Result<SectionText, RequestError> {
        self.section(SectionKind::Juz, juz, edition, Pagination::default()).await
    }

    pub async fn manzil(&self, manzil: u32, edition: &str) -> Result<SectionText, RequestError> {
        self.section(SectionKind::Manzil, manzil, edition, Pagination::default()).await
    }

    pub async fn ruku(&self, ruku: u32, edition: &str) -> Result<SectionText, RequestError> {
        self.section(SectionKind::Ruku, ruku, edition, Pagination::default()).await
    }

    pub async fn page(&self, page: u32, edition: &str) -> Result<SectionText, RequestError> {
        self.section(SectionKind::Page, page, edition, Pagination::default()).await
    }

    pub async fn hizb_quarter(&self, hizb: u32, edition: &str) -> Result<SectionText, RequestError> {
        self.section(SectionKind::HizbQuarter, hizb, edition, Pagination::default()).await
    }

    pub async fn sajda(&self, edition: &str) -> Result<SajdaAyahs, RequestError> {
        self.fetch(&Endpoint::Sajda(edition.to_string())).await
    }

    pub async fn meta(&self) -> Result<Meta, RequestError> {
        self.fetch(&Endpoint::Meta).await
    }
}
