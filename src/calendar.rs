use tracing::{debug, info, warn};

use crate::cache::HolidayCache;
use crate::date::{Date, DateExt};
use crate::provider::{BrasilApi, HolidayProvider};
use crate::Result;

/// Month and day of São Paulo's anniversary, a municipal holiday the
/// national provider does not list.
const CITY_ANNIVERSARY: (usize, usize) = (1, 25);

/// Working day calendar for the city of São Paulo.
///
/// A day is a working day when it is neither a weekend day nor a holiday.
/// Holidays are fetched from the provider on the first query touching a year
/// and kept for the lifetime of the calendar.
#[derive(Debug)]
pub struct WorkingDayCalendar<P = BrasilApi> {
    provider: P,
    cache: HolidayCache,
}

impl WorkingDayCalendar<BrasilApi> {
    /// Calendar backed by BrasilAPI, see [`crate::ProviderConfig::from_env`].
    pub fn new() -> Self {
        Self::with_provider(BrasilApi::default())
    }
}

impl Default for WorkingDayCalendar<BrasilApi> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: HolidayProvider> WorkingDayCalendar<P> {
    pub fn with_provider(provider: P) -> Self {
        WorkingDayCalendar {
            provider,
            cache: HolidayCache::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &HolidayCache {
        &self.cache
    }

    /// Holidays of `year` as `YYYY-MM-DD` strings, including the city
    /// anniversary on January 25th.
    ///
    /// Only the first call for a year reaches the provider. A failed fetch
    /// leaves the year uncached, so the next call tries again.
    pub fn get_holidays(&mut self, year: isize) -> Result<&[String]> {
        if self.cache.contains(year) {
            debug!(year, "holidays served from cache");
        } else {
            let mut holidays = self.provider.fetch(year).inspect_err(|err| {
                warn!(year, error = %err, "holiday fetch failed");
            })?;
            let (month, day) = CITY_ANNIVERSARY;
            holidays.push(Date::from_ymd(year, month, day).to_string());

            info!(year, count = holidays.len(), "holidays cached");
            self.cache.insert(year, holidays);
        }

        Ok(self.cache.get(year).unwrap_or_default())
    }

    /// Whether `date` is neither Saturday, Sunday nor a holiday.
    ///
    /// The holidays of the date's year are loaded first, even for weekend
    /// dates.
    pub fn is_working_day(&mut self, date: impl Into<Date>) -> Result<bool> {
        let date = date.into();
        let holidays = self.get_holidays(date.year())?;

        if date.weekday().is_weekend() {
            return Ok(false);
        }

        let date = date.to_string();
        Ok(!holidays.iter().any(|holiday| *holiday == date))
    }

    /// The date `days` working days after `date`.
    ///
    /// Days are scanned one at a time from the day after `date`, so crossing
    /// into a new year loads that year's holidays. The result keeps the time
    /// of day of `date`. A `days` of zero or less returns `date` as is.
    pub fn add_working_days<D: DateExt>(&mut self, date: D, days: i64) -> Result<D> {
        if days <= 0 {
            return Ok(date);
        }

        let start: Date = date.clone().into();
        let mut current = start;
        let mut counted = 0;
        while counted < days {
            current = current.succ();
            if self.is_working_day(current)? {
                counted += 1;
            }
        }

        date.add_calendar_days((current.0 - start.0) as i64)
    }
}
