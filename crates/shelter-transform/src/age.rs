//! Free-text age parsing.

use shelter_model::LifecycleStage;

const MONTHS_PER_YEAR: f64 = 12.0;
const WEEKS_PER_YEAR: f64 = 52.1786;
const DAYS_PER_YEAR: f64 = 365.25;

/// Time unit named in an age string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeUnit {
    Months,
    Years,
    Weeks,
    Days,
}

impl AgeUnit {
    /// First unit keyword found, checked in the order months, years, weeks, days.
    pub fn detect(value: &str) -> Option<Self> {
        let value = value.to_lowercase();
        [
            ("month", AgeUnit::Months),
            ("year", AgeUnit::Years),
            ("week", AgeUnit::Weeks),
            ("day", AgeUnit::Days),
        ]
        .into_iter()
        .find(|(keyword, _)| value.contains(keyword))
        .map(|(_, unit)| unit)
    }

    pub fn to_years(self, amount: f64) -> f64 {
        match self {
            AgeUnit::Months => amount / MONTHS_PER_YEAR,
            AgeUnit::Years => amount,
            AgeUnit::Weeks => amount / WEEKS_PER_YEAR,
            AgeUnit::Days => amount / DAYS_PER_YEAR,
        }
    }
}

/// Converts `"<number> <unit>"` to years.
///
/// The number is the text before the first space; a number that does not
/// parse, or is not strictly positive, or a missing unit, gives `None`.
///
/// # Examples
///
/// ```
/// use shelter_transform::age::parse_age_years;
///
/// assert_eq!(parse_age_years("3 years"), Some(3.0));
/// assert_eq!(parse_age_years("6 months"), Some(0.5));
/// assert_eq!(parse_age_years("0 years"), None);
/// ```
pub fn parse_age_years(value: &str) -> Option<f64> {
    let value = value.trim();
    let amount: f64 = value.split(' ').next()?.parse().ok()?;
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    AgeUnit::detect(value).map(|unit| unit.to_years(amount))
}

/// Lifecycle label of an optional age in years.
pub fn lifecycle_stage(age_yr: Option<f64>) -> LifecycleStage {
    LifecycleStage::from_age_years(age_yr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_unit() {
        assert_eq!(parse_age_years("2 years"), Some(2.0));
        assert_eq!(parse_age_years("1 year"), Some(1.0));
        assert_eq!(parse_age_years("3 months"), Some(0.25));
        let weeks = parse_age_years("4 weeks").unwrap();
        assert!((weeks - 4.0 / 52.1786).abs() < 1e-12);
        let days = parse_age_years("10 days").unwrap();
        assert!((days - 10.0 / 365.25).abs() < 1e-12);
    }

    #[test]
    fn unit_keywords_ignore_case() {
        assert_eq!(parse_age_years("2 YEARS"), Some(2.0));
        assert_eq!(AgeUnit::detect("1 Month"), Some(AgeUnit::Months));
    }

    #[test]
    fn rejects_unusable_ages() {
        assert_eq!(parse_age_years(""), None);
        assert_eq!(parse_age_years("unknown"), None);
        assert_eq!(parse_age_years("-1 years"), None);
        assert_eq!(parse_age_years("0 weeks"), None);
        assert_eq!(parse_age_years("5"), None);
        assert_eq!(parse_age_years("5 decades"), None);
        assert_eq!(parse_age_years("nan years"), None);
    }

    #[test]
    fn scenario_ages_bucket_as_expected() {
        assert_eq!(lifecycle_stage(parse_age_years("3 years")), LifecycleStage::Adult);
        let ten_months = parse_age_years("10 months").unwrap();
        assert!((ten_months - 0.8333).abs() < 1e-3);
        assert_eq!(lifecycle_stage(Some(ten_months)), LifecycleStage::Juvenile);
        assert_eq!(lifecycle_stage(None), LifecycleStage::Unknown);
    }
}
