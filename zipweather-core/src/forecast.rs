use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::{
    aggregate::build_day_forecast,
    error::ForecastError,
    grouping::group_by_date,
    model::{DailySummary, DayForecast, HourlySample, Location},
};

/// Hourly and daily series for one location, as returned by a provider.
///
/// This is the entry point for display code: ask it for a day and it groups,
/// aggregates and describes that day.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    location: Location,
    hourly: Vec<HourlySample>,
    daily: Vec<DailySummary>,
}

impl Forecast {
    pub fn new(location: Location, hourly: Vec<HourlySample>, daily: Vec<DailySummary>) -> Self {
        Self {
            location,
            hourly,
            daily,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn hourly(&self) -> &[HourlySample] {
        &self.hourly
    }

    pub fn daily(&self) -> &[DailySummary] {
        &self.daily
    }

    /// Earliest date with a daily summary.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.daily.iter().map(|d| d.date).min()
    }

    /// Latest date with a daily summary.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.daily.iter().map(|d| d.date).max()
    }

    pub fn summary_for(&self, date: NaiveDate) -> Option<&DailySummary> {
        self.daily.iter().find(|d| d.date == date)
    }

    /// Forecast for `date`, or for the first forecast day when `None`.
    pub fn day_forecast(&self, date: Option<NaiveDate>) -> Result<DayForecast<'_>, ForecastError> {
        let date = match date {
            Some(date) => date,
            None => self.start_date().ok_or(ForecastError::EmptyForecast)?,
        };

        build_day_forecast(&self.location, date, &self.hourly, self.summary_for(date))
    }

    /// One result per date seen in either series, in date order.
    ///
    /// A date with hourly samples but no daily summary yields an error entry;
    /// the remaining days are still built.
    pub fn days(&self) -> Vec<(NaiveDate, Result<DayForecast<'_>, ForecastError>)> {
        let buckets = self.hourly_by_day();
        let dates: BTreeSet<NaiveDate> = self
            .daily
            .iter()
            .map(|d| d.date)
            .chain(buckets.keys().copied())
            .collect();

        dates
            .into_iter()
            .map(|date| {
                let hours = buckets.get(&date).map(Vec::as_slice).unwrap_or_default();
                let day = build_day_forecast(&self.location, date, hours, self.summary_for(date));
                if let Err(e) = &day {
                    warn!(%date, error = %e, "skipping day");
                }
                (date, day)
            })
            .collect()
    }

    /// Hourly samples bucketed by local date.
    pub fn hourly_by_day(&self) -> BTreeMap<NaiveDate, Vec<HourlySample>> {
        group_by_date(&self.hourly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn summary(d: &str, code: u8) -> DailySummary {
        DailySummary {
            date: date(d),
            high_temp_c: 20.0,
            low_temp_c: 10.0,
            weather_code: code,
            precipitation_sum_mm: 0.0,
            sunrise: None,
            sunset: None,
        }
    }

    fn forecast() -> Forecast {
        let location = Location::new(40.7, -74.0, "New York", "NY", "New York", "America/New_York");
        let hourly = vec![
            HourlySample::new(at("2025-06-02T09:00"), 18.0, 3),
            HourlySample::new(at("2025-06-01T09:00"), 14.0, 0),
            HourlySample::new(at("2025-06-01T15:00"), 22.0, 0),
            HourlySample::new(at("2025-06-03T09:00"), 16.0, 61),
        ];
        let daily = vec![summary("2025-06-02", 3), summary("2025-06-01", 0)];
        Forecast::new(location, hourly, daily)
    }

    #[test]
    fn start_and_end_dates() {
        let f = forecast();
        assert_eq!(f.start_date(), Some(date("2025-06-01")));
        assert_eq!(f.end_date(), Some(date("2025-06-02")));
    }

    #[test]
    fn default_day_is_the_first_one() {
        let f = forecast();
        let day = f.day_forecast(None).unwrap();
        assert_eq!(day.date, date("2025-06-01"));
        assert_eq!(day.high.temp_c, 22.0);
        assert_eq!(day.low.temp_c, 14.0);
        assert_eq!(day.description, "clear sky");
    }

    #[test]
    fn unknown_date_is_not_found() {
        let f = forecast();
        let err = f.day_forecast(Some(date("2025-07-01"))).unwrap_err();
        assert_eq!(err, ForecastError::NoDataForDate(date("2025-07-01")));
    }

    #[test]
    fn empty_forecast_has_no_default_day() {
        let location = Location::new(0.0, 0.0, "Null Island", "NI", "Null", "UTC");
        let f = Forecast::new(location, vec![], vec![]);
        assert_eq!(f.day_forecast(None).unwrap_err(), ForecastError::EmptyForecast);
        assert!(f.days().is_empty());
    }

    #[test]
    fn days_report_each_date_independently() {
        let f = forecast();
        let days = f.days();
        let dates: Vec<_> = days.iter().map(|(d, _)| d.to_string()).collect();
        assert_eq!(dates, ["2025-06-01", "2025-06-02", "2025-06-03"]);

        assert!(days[0].1.is_ok());
        assert!(days[1].1.is_ok());
        assert_eq!(
            days[2].1.as_ref().unwrap_err(),
            &ForecastError::NoDataForDate(date("2025-06-03"))
        );
    }
}
