//! Per-day figures derived from hourly samples.

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    error::ForecastError,
    grouping::samples_on,
    model::{
        DailySummary, DayForecast, DominantCondition, HourlySample, Location, PartOfDay,
        PartsOfDay, TempReading,
    },
    summary::{mode, summarize_samples},
};

/// An hour counts as wet above this much precipitation (mm).
pub const PRECIPITATION_THRESHOLD_MM: f64 = 0.1;

/// Number of samples with precipitation above [`PRECIPITATION_THRESHOLD_MM`].
/// A missing reading counts as dry.
pub fn precipitation_hours(samples: &[HourlySample]) -> usize {
    samples
        .iter()
        .filter(|s| s.precipitation_mm.unwrap_or(0.0) > PRECIPITATION_THRESHOLD_MM)
        .count()
}

/// Most frequent weather code among `samples`, ties going to the code seen first.
pub fn dominant_condition(samples: &[HourlySample]) -> Option<DominantCondition> {
    let winner = mode(samples.iter().map(|s| s.weather_code))?;
    let first = samples.iter().find(|s| s.weather_code == winner.value)?;

    Some(DominantCondition {
        weather_code: winner.value,
        hours: winner.count,
        first_seen: first.time,
    })
}

/// Dominant condition for each part of day. Overnight hours are ignored.
pub fn parts_of_day(samples: &[HourlySample]) -> PartsOfDay {
    let part = |part: PartOfDay| {
        let in_part: Vec<HourlySample> = samples
            .iter()
            .filter(|s| PartOfDay::of_hour(s.hour()) == Some(part))
            .copied()
            .collect();
        dominant_condition(&in_part)
    };

    PartsOfDay {
        morning: part(PartOfDay::Morning),
        afternoon: part(PartOfDay::Afternoon),
        evening: part(PartOfDay::Evening),
    }
}

/// Warmest and coldest samples as `(high, low)`. Earlier samples win ties.
pub fn temperature_extremes(samples: &[HourlySample]) -> Option<(TempReading, TempReading)> {
    let (first, rest) = samples.split_first()?;
    let mut high = first;
    let mut low = first;

    for sample in rest {
        if sample.temperature_c > high.temperature_c {
            high = sample;
        }
        if sample.temperature_c < low.temperature_c {
            low = sample;
        }
    }

    let reading = |s: &HourlySample| TempReading {
        temp_c: s.temperature_c,
        time: Some(s.time),
    };
    Some((reading(high), reading(low)))
}

/// Assemble the forecast for `date`.
///
/// `hourly` may span several days; only samples on `date` are used. Without a
/// daily summary for the date nothing is built, and without hourly samples the
/// high and low come from the summary with no time attached.
pub fn build_day_forecast<'a>(
    location: &'a Location,
    date: NaiveDate,
    hourly: &[HourlySample],
    summary: Option<&DailySummary>,
) -> Result<DayForecast<'a>, ForecastError> {
    let summary = *summary
        .filter(|s| s.date == date)
        .ok_or(ForecastError::NoDataForDate(date))?;

    let hours = samples_on(hourly, date);
    debug!(%date, samples = hours.len(), "building day forecast");

    let (high, low) = temperature_extremes(&hours).unwrap_or((
        TempReading {
            temp_c: summary.high_temp_c,
            time: None,
        },
        TempReading {
            temp_c: summary.low_temp_c,
            time: None,
        },
    ));

    let conditions = if hours.is_empty() {
        None
    } else {
        summarize_samples(&hours).ok()
    };

    Ok(DayForecast {
        date,
        location,
        summary,
        high,
        low,
        precipitation_hours: precipitation_hours(&hours),
        parts_of_day: parts_of_day(&hours),
        description: summary.description(),
        emoji: summary.emoji(),
        conditions,
        hourly: hours,
    })
}
