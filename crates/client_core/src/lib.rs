use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::protocol::{
    CharacteristicsResponse, FestivalRecord, FestivalsEnvelope, HomeMessageResponse, QuoteResponse,
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

pub mod fetch_scope;
pub use fetch_scope::{FetchScope, Generation};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const FESTIVAL_FIRST_PAGE: u32 = 1;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} responded with {status}")]
    Status { status: StatusCode, url: String },
    #[error("{url} returned an unreadable body: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The `/api/*` surface the dashboard consumes.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn festivals(
        &self,
        page_no: u32,
        num_of_rows: u32,
    ) -> Result<Vec<FestivalRecord>, ApiClientError>;
    async fn home_message(&self) -> Result<String, ApiClientError>;
    async fn characteristic(&self) -> Result<String, ApiClientError>;
    async fn quote(&self) -> Result<String, ApiClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ApiClientError> {
        let mut base_url = Url::parse(base_url.trim())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, ApiClientError> {
        let response = self.http.get(url.clone()).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiClientError::Status {
                status,
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DashboardApi for HttpApiClient {
    async fn festivals(
        &self,
        page_no: u32,
        num_of_rows: u32,
    ) -> Result<Vec<FestivalRecord>, ApiClientError> {
        let envelope: FestivalsEnvelope = self
            .get_json(
                self.endpoint("api/festivals")?,
                &[
                    ("pageNo", page_no.to_string()),
                    ("numOfRows", num_of_rows.to_string()),
                ],
            )
            .await?;
        Ok(envelope.into_items())
    }

    async fn home_message(&self) -> Result<String, ApiClientError> {
        let body: HomeMessageResponse = self.get_json(self.endpoint("api/")?, &[]).await?;
        Ok(body.message)
    }

    async fn characteristic(&self) -> Result<String, ApiClientError> {
        let body: CharacteristicsResponse = self
            .get_json(self.endpoint("api/characteristics")?, &[])
            .await?;
        Ok(body.characteristics)
    }

    async fn quote(&self) -> Result<String, ApiClientError> {
        let body: QuoteResponse = self.get_json(self.endpoint("api/quote")?, &[]).await?;
        Ok(body.quote)
    }
}

/// First page of the festival feed; any failure degrades to an empty list.
pub async fn load_festivals_or_empty(
    api: &dyn DashboardApi,
    num_of_rows: u32,
) -> Vec<FestivalRecord> {
    match api.festivals(FESTIVAL_FIRST_PAGE, num_of_rows).await {
        Ok(items) => {
            info!(count = items.len(), "festival feed loaded");
            items
        }
        Err(err) => {
            warn!("festival feed unavailable, showing empty list: {err}");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeField {
    Message,
    Characteristic,
    Quote,
}

impl HomeField {
    pub const ALL: [HomeField; 3] = [HomeField::Message, HomeField::Characteristic, HomeField::Quote];

    fn label(self) -> &'static str {
        match self {
            HomeField::Message => "home message",
            HomeField::Characteristic => "characteristic",
            HomeField::Quote => "quote",
        }
    }
}

/// One home-page fetch. A failure is logged and leaves the field blank.
pub async fn load_home_field(api: &dyn DashboardApi, field: HomeField) -> String {
    let result = match field {
        HomeField::Message => api.home_message().await,
        HomeField::Characteristic => api.characteristic().await,
        HomeField::Quote => api.quote().await,
    };
    result.unwrap_or_else(|err| {
        warn!("failed to fetch {}: {err}", field.label());
        String::new()
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
