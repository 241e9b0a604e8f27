use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Age cutoff in whole days. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AgeThreshold(u32);

impl AgeThreshold {
    pub const DEFAULT_DAYS: u32 = 30;

    pub fn new(days: u32) -> Result<Self, ValidationError> {
        if days == 0 {
            return Err(ValidationError::InvalidThreshold(days.to_string()));
        }
        Ok(Self(days))
    }

    /// Coerces whatever the user typed. Leading digits are honored ("45d" → 45);
    /// non-numeric, zero or negative input falls back to the default.
    pub fn from_user_input(raw: &str) -> Self {
        let raw = raw.trim();
        let (negative, rest) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        match digits.parse::<u32>() {
            Ok(days) if days > 0 && !negative => Self(days),
            _ => Self::default(),
        }
    }

    pub fn days(&self) -> u32 {
        self.0
    }

    /// Images last pulled strictly before this instant are candidates.
    /// Saturates at the earliest representable instant.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Duration::days(i64::from(self.0)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for AgeThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

impl TryFrom<u32> for AgeThreshold {
    type Error = ValidationError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<AgeThreshold> for u32 {
    fn from(threshold: AgeThreshold) -> Self {
        threshold.0
    }
}

impl std::fmt::Display for AgeThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_input_coercion() {
        assert_eq!(AgeThreshold::from_user_input("7").days(), 7);
        assert_eq!(AgeThreshold::from_user_input(" 90 ").days(), 90);
        assert_eq!(AgeThreshold::from_user_input("45days").days(), 45);
        assert_eq!(AgeThreshold::from_user_input("").days(), 30);
        assert_eq!(AgeThreshold::from_user_input("abc").days(), 30);
        assert_eq!(AgeThreshold::from_user_input("0").days(), 30);
        assert_eq!(AgeThreshold::from_user_input("-5").days(), 30);
        assert_eq!(AgeThreshold::from_user_input("99999999999").days(), 30);
    }

    #[test]
    fn zero_days_is_rejected() {
        assert_eq!(
            AgeThreshold::new(0),
            Err(ValidationError::InvalidThreshold("0".into()))
        );
        assert!(serde_json::from_str::<AgeThreshold>("0").is_err());
        assert_eq!(serde_json::from_str::<AgeThreshold>("14").unwrap().days(), 14);
    }

    #[test]
    fn cutoff_subtracts_whole_days() {
        let now = "2024-06-30T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let cutoff = AgeThreshold::new(30).unwrap().cutoff(now);
        assert_eq!(cutoff, "2024-05-31T12:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn cutoff_saturates_for_huge_thresholds() {
        let now = "2024-06-30T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let threshold = AgeThreshold::from_user_input("100000000");
        assert_eq!(threshold.days(), 100_000_000);
        assert_eq!(threshold.cutoff(now), DateTime::<Utc>::MIN_UTC);
        assert_eq!(AgeThreshold::new(u32::MAX).unwrap().cutoff(now), DateTime::<Utc>::MIN_UTC);
    }
}
