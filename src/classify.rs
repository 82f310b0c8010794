//! Coarse temperature classification for summary responses

use serde::{Deserialize, Serialize};

/// Coarse bucket derived from a period's temperature; serialized lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureCategory {
    Cold,
    Moderate,
    Hot,
}

/// Map a temperature and its unit to a coarse category.
///
/// Units are matched case-insensitively after trimming. Anything other than
/// Fahrenheit or Celsius classifies as `Moderate`, so the function is total
/// and never fails.
#[must_use]
pub fn classify_temperature(unit: &str, temperature: i32) -> TemperatureCategory {
    match unit.trim().to_ascii_uppercase().as_str() {
        "F" => match temperature {
            ..=49 => TemperatureCategory::Cold,
            80.. => TemperatureCategory::Hot,
            _ => TemperatureCategory::Moderate,
        },
        "C" => match temperature {
            ..=9 => TemperatureCategory::Cold,
            27.. => TemperatureCategory::Hot,
            _ => TemperatureCategory::Moderate,
        },
        _ => TemperatureCategory::Moderate,
    }
}
