//! Static lookup tables for Open-Meteo (WMO) weather codes.
//!
//! Every function here is total: codes the provider does not document fall
//! through to an explicit "unknown" entry instead of failing.

/// Human-readable description and emoji for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeInfo {
    pub description: &'static str,
    pub emoji: &'static str,
}

/// Returned for any code outside the documented table.
pub const UNKNOWN: CodeInfo = CodeInfo {
    description: "unknown condition",
    emoji: "❔",
};

/// Label used when a code has no WMO name.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Coarse description and emoji for a code, grouped by condition family.
pub const fn describe(code: u8) -> CodeInfo {
    match code {
        0 => CodeInfo { description: "clear sky", emoji: "☀️" },
        1..=3 => CodeInfo { description: "partly cloudy", emoji: "🌤️" },
        45 | 48 => CodeInfo { description: "foggy", emoji: "🌫️" },
        51 | 53 | 55 => CodeInfo { description: "drizzle", emoji: "🌦️" },
        61 | 63 | 65 => CodeInfo { description: "rain", emoji: "🌧️" },
        80..=82 => CodeInfo { description: "rain showers", emoji: "🌦️" },
        56 | 57 | 66 | 67 => CodeInfo { description: "freezing rain", emoji: "❄️☔" },
        71 | 73 | 75 | 77 | 85 | 86 => CodeInfo { description: "snow", emoji: "🌨️" },
        95 => CodeInfo { description: "thunderstorm", emoji: "🌩️" },
        96 | 99 => CodeInfo { description: "thunderstorm with hail likely", emoji: "🌩️🧊" },
        _ => UNKNOWN,
    }
}

/// Fine-grained WMO condition name, used for hourly listings and day summaries.
/// See: https://open-meteo.com/en/docs#weathervariables
pub const fn label(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => UNKNOWN_LABEL,
    }
}

/// Whether the code appears in the provider's documented table.
pub fn is_known(code: u8) -> bool {
    describe(code) != UNKNOWN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total() {
        for code in 0..=u8::MAX {
            let info = describe(code);
            assert!(!info.description.is_empty());
            assert!(!info.emoji.is_empty());
            assert!(!label(code).is_empty());
        }
    }

    #[test]
    fn out_of_range_code_is_unknown() {
        assert_eq!(describe(150), UNKNOWN);
        assert_eq!(label(150), UNKNOWN_LABEL);
        assert!(!is_known(150));
    }

    #[test]
    fn families_share_descriptions() {
        assert_eq!(describe(0).description, "clear sky");
        assert_eq!(describe(2).description, "partly cloudy");
        assert_eq!(describe(48).emoji, "🌫️");
        assert_eq!(describe(57).description, "freezing rain");
        assert_eq!(describe(86).description, "snow");
        assert_eq!(describe(95).description, "thunderstorm");
        assert_eq!(describe(99).emoji, "🌩️🧊");
    }

    #[test]
    fn documented_codes_have_labels() {
        let documented = [
            0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81,
            82, 85, 86, 95, 96, 99,
        ];
        for code in documented {
            assert!(is_known(code), "code {code} should be known");
            assert_ne!(label(code), UNKNOWN_LABEL, "code {code} should have a label");
        }
    }
}
