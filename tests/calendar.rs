use std::cell::Cell;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use working_days::{
    BrasilApi, Date, DateExt, Error, HolidayProvider, ProviderConfig, Weekday, WorkingDayCalendar,
};

/// Serves the 2024 national holidays and counts requests. Fails while
/// `outages` is above zero.
#[derive(Default)]
struct National2024 {
    calls: Cell<usize>,
    outages: Cell<usize>,
}

impl National2024 {
    fn failing(times: usize) -> Self {
        Self {
            outages: Cell::new(times),
            ..Default::default()
        }
    }
}

impl HolidayProvider for National2024 {
    fn fetch(&self, year: isize) -> working_days::Result<Vec<String>> {
        self.calls.set(self.calls.get() + 1);
        if self.outages.get() > 0 {
            self.outages.set(self.outages.get() - 1);
            return Err(Error::HolidayFetch("connection reset by peer".into()));
        }
        if year != 2024 {
            return Ok(Vec::new());
        }
        Ok([
            "2024-01-01", "2024-02-13", "2024-03-29", "2024-04-21", "2024-05-01", "2024-05-30",
            "2024-09-07", "2024-10-12", "2024-11-02", "2024-11-15", "2024-11-20", "2024-12-25",
        ]
        .map(String::from)
        .to_vec())
    }
}

#[test]
fn second_lookup_is_served_from_cache() {
    let provider = National2024::default();
    let mut calendar = WorkingDayCalendar::with_provider(&provider);

    let first = calendar.get_holidays(2024).unwrap().to_vec();
    let second = calendar.get_holidays(2024).unwrap().to_vec();

    assert_eq!(first, second);
    assert_eq!(provider.calls.get(), 1);
}

#[test]
fn every_year_includes_city_anniversary() {
    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    for year in [2023, 2024, 2030] {
        let anniversary = format!("{year}-01-25");
        assert!(calendar.get_holidays(year).unwrap().contains(&anniversary));
    }
    assert_eq!(calendar.get_holidays(2024).unwrap().len(), 13);
}

#[test]
fn weekends_are_never_working_days() {
    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    let mut date = Date::from_ymd(2024, 1, 1);
    while date.year() == 2024 {
        if date.weekday().is_weekend() {
            assert!(!calendar.is_working_day(date).unwrap(), "{date}");
        }
        date = date.succ();
    }
}

#[test]
fn national_holiday_is_not_a_working_day() {
    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    assert!(!calendar.is_working_day(Date::from_ymd(2024, 1, 1)).unwrap());

    let tuesday = Date::from_ymd(2024, 1, 2);
    assert_eq!(tuesday.weekday(), Weekday::Tuesday);
    assert!(calendar.is_working_day(tuesday).unwrap());
}

#[test]
fn friday_plus_one_is_monday() {
    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    let friday = Date::from_ymd(2024, 6, 7);
    assert_eq!(friday.weekday(), Weekday::Friday);

    let next = calendar.add_working_days(friday, 1).unwrap();
    assert_eq!(next, Date::from_ymd(2024, 6, 10));
    assert_eq!(next.weekday(), Weekday::Monday);
}

#[test]
fn zero_days_returns_input() {
    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    let holiday = Date::from_ymd(2024, 12, 25);
    assert_eq!(calendar.add_working_days(holiday, 0).unwrap(), holiday);
}

#[test]
fn failed_fetch_leaves_year_uncached() {
    let provider = National2024::failing(1);
    let mut calendar = WorkingDayCalendar::with_provider(&provider);

    let err = calendar.get_holidays(2024).unwrap_err();
    assert_eq!(err, Error::HolidayFetch("connection reset by peer".into()));
    assert!(!calendar.cache().contains(2024));

    assert!(calendar.get_holidays(2024).is_ok());
    assert_eq!(provider.calls.get(), 2);
}

#[test]
fn fetch_errors_propagate_through_queries() {
    let mut calendar = WorkingDayCalendar::with_provider(National2024::failing(2));
    let saturday = Date::from_ymd(2024, 1, 6);

    assert!(matches!(
        calendar.is_working_day(saturday),
        Err(Error::HolidayFetch(_))
    ));
    assert!(matches!(
        calendar.add_working_days(saturday, 1),
        Err(Error::HolidayFetch(_))
    ));
    assert!(calendar.cache().is_empty());
}

#[test]
fn date_ext_methods() {
    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    let carnival_monday = Date::from_ymd(2024, 2, 12);

    assert!(carnival_monday.is_working_day(&mut calendar).unwrap());
    assert_eq!(
        carnival_monday.add_working_days(&mut calendar, 1).unwrap(),
        Date::from_ymd(2024, 2, 14)
    );
}

#[cfg(feature = "chrono")]
#[test]
fn chrono_dates_round_trip() {
    use chrono::NaiveDate;

    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    let tiradentes_eve = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();

    assert!(calendar.is_working_day(tiradentes_eve).unwrap());
    assert_eq!(
        calendar.add_working_days(tiradentes_eve, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 22).unwrap()
    );
}

#[cfg(feature = "chrono")]
#[test]
fn date_times_keep_their_time_of_day() {
    use chrono::{TimeZone, Utc};

    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    let friday_afternoon = Utc.with_ymd_and_hms(2024, 6, 7, 15, 30, 0).unwrap();

    assert_eq!(
        calendar.add_working_days(friday_afternoon, 0).unwrap(),
        friday_afternoon
    );
    assert_eq!(
        calendar.add_working_days(friday_afternoon, 1).unwrap(),
        Utc.with_ymd_and_hms(2024, 6, 10, 15, 30, 0).unwrap()
    );
}

#[test]
fn system_time_keeps_its_time_of_day() {
    use std::time::{Duration, SystemTime};

    let mut calendar = WorkingDayCalendar::with_provider(National2024::default());
    // 2024-06-07 (Friday) 15:30 UTC
    let friday_afternoon = SystemTime::UNIX_EPOCH + Duration::from_secs(1_717_774_200);

    assert_eq!(
        calendar.add_working_days(friday_afternoon, 1).unwrap(),
        friday_afternoon + Duration::from_secs(3 * 86_400)
    );
}

/// Serves a single request with the given status line and an empty body.
fn serve_once(status: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        )
        .unwrap();
    });

    format!("http://{address}")
}

#[test]
fn failure_status_is_a_fetch_error() {
    let base_url = serve_once("500 Internal Server Error");
    let config = ProviderConfig::default().with_base_url(base_url);
    let mut calendar = WorkingDayCalendar::with_provider(BrasilApi::new(config));

    match calendar.get_holidays(2024) {
        Err(Error::HolidayFetch(message)) => assert!(message.contains("status 500"), "{message}"),
        other => panic!("expected a fetch error, got {other:?}"),
    }
    assert!(calendar.cache().is_empty());
}

#[test]
fn unreachable_provider_is_a_fetch_error() {
    let config = ProviderConfig::default().with_base_url("http://127.0.0.1:9");
    let mut calendar = WorkingDayCalendar::with_provider(BrasilApi::new(config));

    assert!(matches!(
        calendar.get_holidays(2024),
        Err(Error::HolidayFetch(_))
    ));
    assert!(calendar.cache().is_empty());
}
