//! Closed vocabularies for derived shelter fields.
//!
//! Each enum is one fixed label set. The exported tables carry the
//! lowercase label returned by `as_str`, never the raw source text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel label for values no rule could classify.
pub const UNKNOWN: &str = "unknown";

/// Meteorological season of an event month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    Unknown,
}

impl Season {
    /// Buckets a calendar month (1-12); anything else is `Unknown`.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            12 | 1 | 2 => Season::Winter,
            _ => Season::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
            Season::Unknown => UNKNOWN,
        }
    }

    /// The four seasons a parsed timestamp can produce.
    pub const EXPECTED: [&'static str; 4] = ["spring", "summer", "autumn", "winter"];
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staffing shift of an event hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    /// 07:00 to 15:59
    Day,
    /// 16:00 to 23:59
    Swing,
    /// 00:00 to 06:59
    Overnight,
    Unknown,
}

impl Shift {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            7..=15 => Shift::Day,
            16..=23 => Shift::Swing,
            0..=6 => Shift::Overnight,
            _ => Shift::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Swing => "swing",
            Shift::Overnight => "overnight",
            Shift::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age bucket of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleStage {
    #[serde(rename = "juvenile")]
    Juvenile,
    #[serde(rename = "young adult")]
    YoungAdult,
    #[serde(rename = "adult")]
    Adult,
    #[serde(rename = "senior")]
    Senior,
    #[serde(rename = "unknown")]
    Unknown,
}

impl LifecycleStage {
    /// Buckets an age in years: `<1`, `[1,3)`, `[3,7)`, `>=7`.
    ///
    /// Missing or NaN ages are `Unknown`.
    pub fn from_age_years(age_yr: Option<f64>) -> Self {
        match age_yr {
            Some(age) if age < 1.0 => LifecycleStage::Juvenile,
            Some(age) if age < 3.0 => LifecycleStage::YoungAdult,
            Some(age) if age < 7.0 => LifecycleStage::Adult,
            Some(age) if age >= 7.0 => LifecycleStage::Senior,
            _ => LifecycleStage::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::Juvenile => "juvenile",
            LifecycleStage::YoungAdult => "young adult",
            LifecycleStage::Adult => "adult",
            LifecycleStage::Senior => "senior",
            LifecycleStage::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender part of the combined sex field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SexLabel {
    Female,
    Male,
    Unknown,
}

impl SexLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SexLabel::Female => "female",
            SexLabel::Male => "male",
            SexLabel::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for SexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_covers_every_month() {
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Autumn);
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(13), Season::Unknown);
        for month in 1..=12 {
            assert!(Season::EXPECTED.contains(&Season::from_month(month).as_str()));
        }
    }

    #[test]
    fn shift_boundaries() {
        assert_eq!(Shift::from_hour(0), Shift::Overnight);
        assert_eq!(Shift::from_hour(6), Shift::Overnight);
        assert_eq!(Shift::from_hour(7), Shift::Day);
        assert_eq!(Shift::from_hour(15), Shift::Day);
        assert_eq!(Shift::from_hour(16), Shift::Swing);
        assert_eq!(Shift::from_hour(23), Shift::Swing);
        assert_eq!(Shift::from_hour(24), Shift::Unknown);
    }

    #[test]
    fn lifecycle_boundaries() {
        assert_eq!(LifecycleStage::from_age_years(Some(0.5)), LifecycleStage::Juvenile);
        assert_eq!(LifecycleStage::from_age_years(Some(1.0)), LifecycleStage::YoungAdult);
        assert_eq!(LifecycleStage::from_age_years(Some(3.0)), LifecycleStage::Adult);
        assert_eq!(LifecycleStage::from_age_years(Some(7.0)), LifecycleStage::Senior);
        assert_eq!(LifecycleStage::from_age_years(None), LifecycleStage::Unknown);
        assert_eq!(LifecycleStage::from_age_years(Some(f64::NAN)), LifecycleStage::Unknown);
        assert_eq!(LifecycleStage::YoungAdult.as_str(), "young adult");
    }

    #[test]
    fn labels_serialize_as_exported() {
        let json = serde_json::to_string(&LifecycleStage::YoungAdult).unwrap();
        assert_eq!(json, "\"young adult\"");
        let json = serde_json::to_string(&Shift::Overnight).unwrap();
        assert_eq!(json, "\"overnight\"");
    }
}
