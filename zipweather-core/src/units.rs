//! Unit conversion and temperature commentary.

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn millimeters_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

/// Arithmetic mean, `None` for an empty slice.
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// One-line take on an average temperature in °F.
pub fn temperature_opinion(average_f: f64) -> &'static str {
    if (70.0..=83.0).contains(&average_f) {
        "The temperature is fantastic"
    } else if (55.0..70.0).contains(&average_f) {
        "Eh.. Wear a sweater and go outside"
    } else if (40.0..55.0).contains(&average_f) {
        "It's not fantastic, but it could be a lot colder."
    } else {
        "It's either hotter than 83 or colder than 40. You could stay inside if you want"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_reference_points() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < 1e-9);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < 1e-9);
        assert!((celsius_to_fahrenheit(-40.0) + 40.0).abs() < 1e-9);
        assert!((millimeters_to_inches(25.4) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn average_of_empty_is_none() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn opinion_ranges() {
        assert_eq!(temperature_opinion(75.0), "The temperature is fantastic");
        assert_eq!(temperature_opinion(70.0), "The temperature is fantastic");
        assert_eq!(temperature_opinion(60.0), "Eh.. Wear a sweater and go outside");
        assert!(temperature_opinion(45.0).starts_with("It's not fantastic"));
        assert!(temperature_opinion(90.0).contains("hotter than 83"));
        assert!(temperature_opinion(10.0).contains("colder than 40"));
    }
}
