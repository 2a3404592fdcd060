use std::time::Duration;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, warn};
use crate::base::config::{AurionConfig, Favorites};
use crate::utils::xml::{parse_document, Element};
use crate::Error;

/// Interacts with the Web Aurion API. <br>
/// Only holds read-only configuration, so it can be cloned and shared freely
#[derive(Clone, Debug)]
pub struct AurionClient {
    config: AurionConfig,
    client: Client,
}

impl AurionClient {
    const INITIAL_BACKOFF_MS: u64 = 500;
    /// Backoff stops growing after this many doublings (32 s)
    const MAX_BACKOFF_EXPONENT: u32 = 6;

    /// Creates a new client. Fails if no URL is provided
    pub fn new(config: AurionConfig) -> Result<Self, Error> {
        if config.url.trim().is_empty() {
            return Err(Error::Configuration(String::from("a correct URL must be provided")));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client '{}'", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &AurionConfig {
        &self.config
    }

    pub fn favorites(&self) -> &Favorites {
        &self.config.favorites
    }

    /// Executes a favorite and returns the root element of the response
    pub async fn send_request(&self, favorite_id: u64) -> Result<Element, Error> {
        let data = request_envelope(favorite_id, &self.config.database)?;
        let params = [
            ("login", self.config.login.as_str()),
            ("password", self.config.password.as_str()),
            ("data", data.as_str()),
        ];

        let mut attempt: u32 = 0;
        let text = loop {
            debug!("Executing favorite {favorite_id} (attempt {attempt})");
            match self.exchange(&params).await {
                Ok(text) => break text,
                Err(e) if attempt < self.config.retries => {
                    attempt += 1;
                    let backoff = Self::backoff(attempt);
                    warn!("Request for favorite {favorite_id} failed: {e}, retrying in {backoff:?}");
                    sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        };

        parse_document(&text)
    }

    /// Delay before the given retry (starting at 1), doubling up to a fixed ceiling
    fn backoff(attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(Self::MAX_BACKOFF_EXPONENT);
        Duration::from_millis(Self::INITIAL_BACKOFF_MS << exponent)
    }

    async fn exchange(&self, params: &[(&str, &str)]) -> Result<String, Error> {
        match self.client.post(&self.config.url).form(params).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Network(format!("request failed with status code {}", status.as_u16())));
                }
                response
                    .text()
                    .await
                    .map_err(|e| Error::Network(format!("failed to read response body '{}'", e)))
            }
            Err(e) => Err(Error::Network(format!("failed to get response from '{}': {}", self.config.url, e))),
        }
    }
}

/// Builds the `data` field sent to the API: <br>
/// `<executeFavori><favori><id>{favorite_id}</id></favori><database>{database}</database></executeFavori>`
pub fn request_envelope(favorite_id: u64, database: &str) -> Result<String, Error> {
    let mut writer = Writer::new(Vec::new());
    let id = favorite_id.to_string();

    let events = [
        Event::Start(BytesStart::new("executeFavori")),
        Event::Start(BytesStart::new("favori")),
        Event::Start(BytesStart::new("id")),
        Event::Text(BytesText::new(&id)),
        Event::End(BytesEnd::new("id")),
        Event::End(BytesEnd::new("favori")),
        Event::Start(BytesStart::new("database")),
        Event::Text(BytesText::new(database)),
        Event::End(BytesEnd::new("database")),
        Event::End(BytesEnd::new("executeFavori")),
    ];
    for event in events {
        writer
            .write_event(event)
            .map_err(|e| Error::Parsing(format!("failed to write request envelope '{}'", e)))?;
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::Parsing(format!("request envelope is not valid UTF-8 '{}'", e)))
}
