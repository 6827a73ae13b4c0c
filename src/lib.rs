mod cache;
mod calendar;
mod date;
pub mod provider;

pub use cache::HolidayCache;
pub use calendar::WorkingDayCalendar;
pub use date::{Date, DateExt, Weekday};
pub use provider::{BrasilApi, HolidayProvider, ProviderConfig};

/// Error states the working day calendar might encounter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Holiday provider could not be reached or answered with a failure.
    #[error("Failed to fetch holidays: {0}")]
    HolidayFetch(String),
    /// Text is not a `YYYY-MM-DD` date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    /// Conversion to another date format is not supported.
    #[error("Date is too large for conversion")]
    DateTooLarge,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
