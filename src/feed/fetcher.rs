use crate::config::{FeedConfig, FeedFormat};
use crate::error::CycleError;
use crate::stations::StationRecord;
use crate::stations::loader::{decode_bike_points, decode_cycle_hire_xml};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};

const USER_AGENT: &str = "curl/8.5.0";
const ACCEPT: &str = "application/json, text/xml;q=0.9, */*;q=0.8";

/// Fetches a fresh station snapshot from the upstream feed on every call.
#[derive(Clone)]
pub struct FeedClient {
    inner: reqwest::Client,
    url: Url,
    format: FeedFormat,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Result<Self, CycleError> {
        let url = feed_url(&config)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(header::CONNECTION, HeaderValue::from_static("close"));

        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .http1_only()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()
            .map_err(|e| CycleError::Configuration(format!("could not build http client: {e}")))?;

        Ok(Self {
            inner,
            url,
            format: config.format,
        })
    }

    pub async fn fetch_stations(&self) -> Result<Vec<StationRecord>, CycleError> {
        let response = self.inner.get(self.url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CycleError::UpstreamFetch(format!(
                "status {}",
                status.as_u16()
            )));
        }

        let bytes = response.bytes().await?;

        let stations = match self.format {
            FeedFormat::Json => decode_bike_points(&bytes)?,
            FeedFormat::Xml => decode_cycle_hire_xml(&String::from_utf8_lossy(&bytes))?,
        };

        tracing::debug!("Fetched {} stations from feed", stations.len());
        Ok(stations)
    }
}

fn feed_url(config: &FeedConfig) -> Result<Url, CycleError> {
    let mut url: Url = config.url.parse().map_err(|e| {
        CycleError::Configuration(format!("{} is not a valid url: {}", config.url, e))
    })?;

    if let Some(key) = &config.app_key {
        url.query_pairs_mut().append_pair("app_key", key);
    }

    Ok(url)
}
