//! Short natural-language summaries of how a day's conditions unfold.

use crate::{error::ForecastError, model::HourlySample};

/// Share of the day one label must reach to be called "consistent".
pub const CONSISTENT_SHARE: f64 = 0.75;

/// Most frequent value in a sequence and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mode<T> {
    pub value: T,
    pub count: usize,
}

/// Mode of `items`; ties go to the value that occurs first.
pub(crate) fn mode<T: PartialEq + Copy>(items: impl IntoIterator<Item = T>) -> Option<Mode<T>> {
    let mut counts: Vec<Mode<T>> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|m| m.value == item) {
            Some(m) => m.count += 1,
            None => counts.push(Mode { value: item, count: 1 }),
        }
    }

    let mut best: Option<Mode<T>> = None;
    for candidate in counts {
        if best.is_none_or(|b| candidate.count > b.count) {
            best = Some(candidate);
        }
    }
    best
}

/// Summary windows, keyed by hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    Morning,
    Daytime,
    Evening,
}

impl Window {
    fn of_hour(hour: u32) -> Self {
        match hour {
            0..=5 => Window::Morning,
            6..=17 => Window::Daytime,
            _ => Window::Evening,
        }
    }
}

/// Summarize a day given one condition label per hour, starting at midnight.
///
/// Index `i` is treated as hour `i`; anything past index 23 counts as evening.
pub fn condition_summary<S: AsRef<str>>(labels: &[S]) -> Result<String, ForecastError> {
    summarize(
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| (u32::try_from(i).unwrap_or(u32::MAX), label.as_ref())),
    )
}

/// Summarize a day's hourly samples, using each sample's own hour of day.
///
/// Tolerates missing hours and days shorter than 24 samples.
pub fn summarize_samples(samples: &[HourlySample]) -> Result<String, ForecastError> {
    summarize(samples.iter().map(|s| (s.hour(), s.label())))
}

fn summarize<'a>(entries: impl IntoIterator<Item = (u32, &'a str)>) -> Result<String, ForecastError> {
    let entries: Vec<(Window, &str)> = entries
        .into_iter()
        .map(|(hour, label)| (Window::of_hour(hour), label))
        .collect();

    let overall =
        mode(entries.iter().map(|(_, label)| *label)).ok_or(ForecastError::EmptyConditions)?;

    if overall.count as f64 >= entries.len() as f64 * CONSISTENT_SHARE {
        return Ok(format!("Consistently {}", overall.value.to_lowercase()));
    }

    // An empty window takes the day's overall label.
    let dominant = |window: Window| {
        mode(entries.iter().filter(|(w, _)| *w == window).map(|(_, label)| *label))
            .map_or(overall.value, |m| m.value)
    };

    let morning = dominant(Window::Morning);
    let daytime = dominant(Window::Daytime);
    let evening = dominant(Window::Evening);

    let summary = if morning == daytime && daytime == evening {
        format!("Consistently {}", morning.to_lowercase())
    } else if morning != daytime && daytime == evening {
        format!("{morning} morning, becoming {}", daytime.to_lowercase())
    } else if morning == daytime {
        format!(
            "Mostly {} with {} evening",
            morning.to_lowercase(),
            evening.to_lowercase()
        )
    } else {
        format!("{morning} morning, {daytime} afternoon, {evening} evening")
    };

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn day(morning: &str, daytime: &str, evening: &str) -> Vec<String> {
        std::iter::repeat_n(morning, 6)
            .chain(std::iter::repeat_n(daytime, 12))
            .chain(std::iter::repeat_n(evening, 6))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn mostly_one_label_is_consistent() {
        let mut labels = vec!["Clear"; 20];
        labels.extend(["Cloudy"; 4]);
        assert_eq!(condition_summary(&labels).unwrap(), "Consistently clear");
    }

    #[test]
    fn morning_change_is_becoming() {
        // Evening runs 18:00-22:00, so sunny stays under the consistent share.
        let mut labels = day("Fog", "Sunny", "Sunny");
        labels.truncate(22);
        assert_eq!(condition_summary(&labels).unwrap(), "Fog morning, becoming sunny");
    }

    #[test]
    fn evening_change_is_mostly_with() {
        // 18 of 24 is exactly 0.75, so shrink the daytime share below it.
        let mut labels = day("Clear", "Clear", "Rain");
        labels[17] = "Rain".to_string();
        assert_eq!(
            condition_summary(&labels).unwrap(),
            "Mostly clear with rain evening"
        );
    }

    #[test]
    fn three_different_windows() {
        let labels = day("Fog", "Sunny", "Rain");
        assert_eq!(
            condition_summary(&labels).unwrap(),
            "Fog morning, Sunny afternoon, Rain evening"
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        let labels: [&str; 0] = [];
        assert_eq!(condition_summary(&labels), Err(ForecastError::EmptyConditions));
    }

    #[test]
    fn single_label_day() {
        assert_eq!(condition_summary(&["Overcast"]).unwrap(), "Consistently overcast");
    }

    #[test]
    fn short_day_fills_empty_windows_with_overall_label() {
        // Only morning hours: daytime and evening fall back to the overall mode.
        let labels = ["Fog", "Fog", "Rain", "Rain", "Fog"];
        assert_eq!(condition_summary(&labels).unwrap(), "Consistently fog");
    }

    #[test]
    fn summary_is_idempotent() {
        let labels = day("Fog", "Sunny", "Rain");
        assert_eq!(
            condition_summary(&labels).unwrap(),
            condition_summary(&labels).unwrap()
        );
    }

    #[test]
    fn ties_go_to_first_occurrence() {
        for _ in 0..10 {
            let m = mode(["rain", "rain", "snow", "snow"]).unwrap();
            assert_eq!(m.value, "rain");
            assert_eq!(m.count, 2);
        }
        assert_eq!(mode(["snow", "rain", "rain", "snow"]).unwrap().value, "snow");
        assert_eq!(mode(Vec::<&str>::new()), None);
    }

    #[test]
    fn samples_use_their_own_hour() {
        let base = NaiveDateTime::parse_from_str("2025-06-01T00:00", "%Y-%m-%dT%H:%M").unwrap();
        // Every third hour only: 8 samples covering the whole day.
        let samples: Vec<_> = (0..8)
            .map(|i| {
                let hour = i * 3;
                let code = if hour <= 6 { 45 } else { 0 };
                HourlySample::new(base + chrono::Duration::hours(hour), 15.0, code)
            })
            .collect();

        assert_eq!(
            summarize_samples(&samples).unwrap(),
            "Fog morning, becoming clear sky"
        );
    }
}
