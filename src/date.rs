use std::time::Duration;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    #[inline]
    pub const fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

/// Calendar date without a time of day.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Date(
    /// Days since 1st of January, 1970. (UNIX epoch)
    pub(crate) isize,
);

impl Date {
    pub const fn from_ymd(year: isize, month: usize, day: usize) -> Self {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let y = year;
        let m = month as isize;
        let d = day as isize;

        let adjusted_year = y - if m <= 2 { 1 } else { 0 };

        let era = if adjusted_year >= 0 {
            adjusted_year / 400
        } else {
            (adjusted_year - 399) / 400
        };

        let year_of_era = adjusted_year - era * 400;
        let month_part = if m > 2 { m - 3 } else { m + 9 };
        let day_of_year = (153 * month_part + 2) / 5 + d - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        Self(era * 146097 + day_of_era - 719468)
    }

    /// Like [`Date::from_ymd`], but rejects months and days that do not exist.
    pub fn from_ymd_checked(year: isize, month: usize, day: usize) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self::from_ymd(year, month, day))
    }

    pub const fn ymd(&self) -> (isize, usize, usize) {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let z = self.0 + 719468;
        let era = (if z >= 0 { z } else { z - 146096 }) / 146097;
        let day_of_era = z - era * 146097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let month_part = (5 * day_of_year + 2) / 153;

        let day = day_of_year - (153 * month_part + 2) / 5 + 1;
        let month = if month_part < 10 { month_part + 3 } else { month_part - 9 };
        let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };

        (year, month as usize, day as usize)
    }

    /// Day of the month
    #[inline]
    pub const fn day(&self) -> usize {
        self.ymd().2
    }

    /// Month of the year
    #[inline]
    pub const fn month(&self) -> usize {
        self.ymd().1
    }

    /// Year
    #[inline]
    pub const fn year(&self) -> isize {
        self.ymd().0
    }

    pub const fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday
        Weekday::ALL[(self.0 + 3).rem_euclid(7) as usize]
    }

    /// The following calendar day.
    #[inline]
    pub const fn succ(&self) -> Self {
        Self(self.0 + 1)
    }
}

const SECONDS_IN_DAY: isize = 86400;

const fn is_leap_year(year: isize) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

const fn days_in_month(year: isize, month: usize) -> usize {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Formats as `YYYY-MM-DD`, the form the holiday provider uses.
impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

impl std::str::FromStr for Date {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidDate(s.to_owned());

        let mut parts = s.split('-');
        let year = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let month = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let day = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Date::from_ymd_checked(year, month, day).ok_or_else(invalid)
    }
}

impl TryFrom<Date> for std::time::SystemTime {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let epoch = std::time::SystemTime::UNIX_EPOCH;
        let offset = (value.0.unsigned_abs() as u64)
            .checked_mul(SECONDS_IN_DAY as u64)
            .map(Duration::from_secs)
            .ok_or(crate::Error::DateTooLarge)?;
        let time = if value.0 >= 0 {
            epoch.checked_add(offset)
        } else {
            epoch.checked_sub(offset)
        };
        time.ok_or(crate::Error::DateTooLarge)
    }
}

impl From<std::time::SystemTime> for Date {
    fn from(value: std::time::SystemTime) -> Self {
        let days = match value.duration_since(std::time::SystemTime::UNIX_EPOCH) {
            Ok(duration) => duration.as_secs() as isize / SECONDS_IN_DAY,
            Err(err) => {
                let secs = err.duration().as_secs() as isize;
                -((secs + SECONDS_IN_DAY - 1) / SECONDS_IN_DAY)
            }
        };

        Date(days)
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::NaiveDate {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let days = i32::try_from(value.0 + 719163).map_err(|_| crate::Error::DateTooLarge)?;
        chrono::NaiveDate::from_num_days_from_ce_opt(days).ok_or(crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Utc> {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let naive = chrono::NaiveDate::try_from(value)?
            .and_hms_opt(0, 0, 0)
            .ok_or(crate::Error::DateTooLarge)?;

        Ok(chrono::TimeZone::from_utc_datetime(&chrono::Utc, &naive))
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Local> {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let naive = chrono::NaiveDate::try_from(value)?
            .and_hms_opt(0, 0, 0)
            .ok_or(crate::Error::DateTooLarge)?;

        chrono::TimeZone::from_local_datetime(&chrono::Local, &naive)
            .earliest()
            .ok_or(crate::Error::DateTooLarge)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Date {
    fn from(value: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Date(value.num_days_from_ce() as isize - 719163)
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Date::from(value.date_naive())
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Local>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Local>) -> Self {
        Date::from(value.naive_local().date())
    }
}

// Julian day number of 1970-01-01.
#[cfg(feature = "time")]
const UNIX_EPOCH_JULIAN_DAY: isize = 2440588;

#[cfg(feature = "time")]
impl TryFrom<Date> for time::Date {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let julian = i32::try_from(value.0 + UNIX_EPOCH_JULIAN_DAY)
            .map_err(|_| crate::Error::DateTooLarge)?;
        time::Date::from_julian_day(julian).map_err(|_| crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "time")]
impl From<time::Date> for Date {
    #[inline]
    fn from(value: time::Date) -> Self {
        Date(value.to_julian_day() as isize - UNIX_EPOCH_JULIAN_DAY)
    }
}

/// Working day queries as methods on any supported date type.
pub trait DateExt: Into<Date> + Clone {
    /// Moves the value by whole calendar days, keeping any time of day.
    fn add_calendar_days(&self, days: i64) -> crate::Result<Self>;

    fn is_working_day<P>(&self, calendar: &mut crate::WorkingDayCalendar<P>) -> crate::Result<bool>
    where
        P: crate::HolidayProvider,
    {
        calendar.is_working_day(self.clone())
    }

    fn add_working_days<P>(
        &self,
        calendar: &mut crate::WorkingDayCalendar<P>,
        days: i64,
    ) -> crate::Result<Self>
    where
        P: crate::HolidayProvider,
    {
        calendar.add_working_days(self.clone(), days)
    }
}

impl DateExt for Date {
    fn add_calendar_days(&self, days: i64) -> crate::Result<Self> {
        isize::try_from(days)
            .ok()
            .and_then(|days| self.0.checked_add(days))
            .map(Date)
            .ok_or(crate::Error::DateTooLarge)
    }
}

impl DateExt for std::time::SystemTime {
    fn add_calendar_days(&self, days: i64) -> crate::Result<Self> {
        let offset = days
            .unsigned_abs()
            .checked_mul(SECONDS_IN_DAY as u64)
            .map(Duration::from_secs)
            .ok_or(crate::Error::DateTooLarge)?;
        let time = if days >= 0 {
            self.checked_add(offset)
        } else {
            self.checked_sub(offset)
        };
        time.ok_or(crate::Error::DateTooLarge)
    }
}

#[cfg(feature = "chrono")]
impl DateExt for chrono::NaiveDate {
    fn add_calendar_days(&self, days: i64) -> crate::Result<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.checked_add_signed(delta))
            .ok_or(crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Utc> {
    fn add_calendar_days(&self, days: i64) -> crate::Result<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.checked_add_signed(delta))
            .ok_or(crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Local> {
    // Shifts the wall clock, so a DST change in between keeps the local time.
    fn add_calendar_days(&self, days: i64) -> crate::Result<Self> {
        let naive = chrono::Duration::try_days(days)
            .and_then(|delta| self.naive_local().checked_add_signed(delta))
            .ok_or(crate::Error::DateTooLarge)?;

        chrono::TimeZone::from_local_datetime(&chrono::Local, &naive)
            .earliest()
            .ok_or(crate::Error::DateTooLarge)
    }
}

#[cfg(feature = "time")]
impl DateExt for time::Date {
    fn add_calendar_days(&self, days: i64) -> crate::Result<Self> {
        days.checked_mul(SECONDS_IN_DAY as i64)
            .map(time::Duration::seconds)
            .and_then(|delta| self.checked_add(delta))
            .ok_or(crate::Error::DateTooLarge)
    }
}
