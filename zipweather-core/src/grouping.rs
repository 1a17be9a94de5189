use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::HourlySample;

/// Bucket hourly samples by their local calendar date.
///
/// Input order is preserved inside each bucket. The map iterates dates in
/// ascending order no matter in which order they first appeared.
pub fn group_by_date(samples: &[HourlySample]) -> BTreeMap<NaiveDate, Vec<HourlySample>> {
    let mut days: BTreeMap<NaiveDate, Vec<HourlySample>> = BTreeMap::new();
    for sample in samples {
        days.entry(sample.date()).or_default().push(*sample);
    }
    days
}

/// Samples falling on `date`, in input order.
pub fn samples_on(samples: &[HourlySample], date: NaiveDate) -> Vec<HourlySample> {
    samples.iter().filter(|s| s.date() == date).copied().collect()
}
