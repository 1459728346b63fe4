use crate::error::CycleError;
use clap::{Parser, ValueEnum};
use std::time::Duration;

const BIKE_POINT_URL: &str = "https://api.tfl.gov.uk/BikePoint";
const CYCLE_HIRE_XML_URL: &str =
    "https://tfl.gov.uk/tfl/syndication/feeds/cycle-hire/livecyclehireupdates.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedFormat {
    /// TfL unified API `BikePoint` JSON (needs an app key)
    Json,
    /// Cycle hire syndication XML
    Xml,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "nearby-cycles")]
#[command(about = "Finds the nearest cycle hire stations with bikes and docks")]
pub struct Config {
    /// Port to run the HTTP server on
    #[arg(short, long, env = "PORT", default_value = "4000")]
    pub port: u16,

    /// TfL API app key
    #[arg(long, env = "TFL_APP_KEY", hide_env_values = true)]
    pub app_key: Option<String>,

    #[arg(long, env = "FEED_FORMAT", value_enum, default_value = "json")]
    pub feed_format: FeedFormat,

    /// Overrides the upstream feed endpoint
    #[arg(long, env = "FEED_URL")]
    pub feed_url: Option<String>,

    /// Search radius for /cycles/nearby/siri
    #[arg(long, env = "NEARBY_RADIUS_KM", default_value = "1.0")]
    pub nearby_radius_km: f64,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "15")]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> Result<(), CycleError> {
        let has_key = self.app_key.as_deref().is_some_and(|k| !k.is_empty());
        if self.feed_format == FeedFormat::Json && !has_key {
            return Err(CycleError::Configuration(
                "TFL_APP_KEY must be set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn feed_config(&self) -> FeedConfig {
        let url = match (&self.feed_url, self.feed_format) {
            (Some(url), _) => url.clone(),
            (None, FeedFormat::Json) => BIKE_POINT_URL.to_string(),
            (None, FeedFormat::Xml) => CYCLE_HIRE_XML_URL.to_string(),
        };

        FeedConfig {
            url,
            app_key: self.app_key.clone().filter(|k| !k.is_empty()),
            format: self.feed_format,
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// What the feed client needs to reach the upstream source.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    pub app_key: Option<String>,
    pub format: FeedFormat,
    pub timeout: Duration,
}
