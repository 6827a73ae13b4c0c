//! Sources of holiday lists.

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// Supplies the raw holiday list for a year.
pub trait HolidayProvider {
    /// Holiday dates for `year` as `YYYY-MM-DD` strings, in provider order.
    fn fetch(&self, year: isize) -> Result<Vec<String>>;
}

impl<P: HolidayProvider + ?Sized> HolidayProvider for &P {
    #[inline]
    fn fetch(&self, year: isize) -> Result<Vec<String>> {
        (**self).fetch(year)
    }
}

impl<P: HolidayProvider + ?Sized> HolidayProvider for Box<P> {
    #[inline]
    fn fetch(&self, year: isize) -> Result<Vec<String>> {
        (**self).fetch(year)
    }
}

const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br";
const BASE_URL_ENV: &str = "WORKING_DAYS_API_URL";

/// Where and how [`BrasilApi`] sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    pub user_agent: String,
}

impl ProviderConfig {
    /// Default configuration, with the base URL taken from
    /// `WORKING_DAYS_API_URL` when that variable is set.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    fn holidays_url(&self, year: isize) -> String {
        format!("{}/api/feriados/v1/{year}", self.base_url)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// National holidays from the BrasilAPI `feriados` endpoint.
#[derive(Debug, Clone)]
pub struct BrasilApi {
    config: ProviderConfig,
    agent: ureq::Agent,
}

impl BrasilApi {
    pub fn new(config: ProviderConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.user_agent)
            .build();
        Self { config, agent }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

impl Default for BrasilApi {
    fn default() -> Self {
        Self::new(ProviderConfig::from_env())
    }
}

impl HolidayProvider for BrasilApi {
    fn fetch(&self, year: isize) -> Result<Vec<String>> {
        let url = self.config.holidays_url(year);
        debug!(%url, "requesting holidays");

        let response = self.agent.get(&url).call().map_err(|err| match err {
            ureq::Error::Status(code, _) => {
                Error::HolidayFetch(format!("{url} answered with status {code}"))
            }
            ureq::Error::Transport(transport) => Error::HolidayFetch(transport.to_string()),
        })?;
        let body = response
            .into_string()
            .map_err(|err| Error::HolidayFetch(err.to_string()))?;

        parse_holidays(&body)
    }
}

#[derive(Deserialize)]
struct ProviderHoliday {
    date: String,
}

/// Extracts the `date` of every entry in a BrasilAPI holiday array.
pub(crate) fn parse_holidays(body: &str) -> Result<Vec<String>> {
    let holidays: Vec<ProviderHoliday> =
        serde_json::from_str(body).map_err(|err| Error::HolidayFetch(err.to_string()))?;
    Ok(holidays.into_iter().map(|holiday| holiday.date).collect())
}
