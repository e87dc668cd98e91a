//! Value Objects

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ScholarshipError, ScholarshipResult};

// ============================================================================
// Application status
// ============================================================================

/// `pending -> processing -> completed | rejected`. A pending application may
/// also be rejected outright.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    #[display("pending")]
    Pending,
    #[display("processing")]
    Processing,
    #[display("completed")]
    Completed,
    #[display("rejected")]
    Rejected,
}

impl ApplicationStatus {
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, Processing) | (Pending, Rejected) | (Processing, Completed) | (Processing, Rejected)
        )
    }

    /// Applicants may only edit or cancel while nothing has happened yet
    pub fn is_editable(self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }

    pub fn is_final(self) -> bool {
        matches!(self, ApplicationStatus::Completed | ApplicationStatus::Rejected)
    }
}

impl FromStr for ApplicationStatus {
    type Err = ScholarshipError;

    fn from_str(s: &str) -> ScholarshipResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "processing" => Ok(ApplicationStatus::Processing),
            "completed" => Ok(ApplicationStatus::Completed),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(ScholarshipError::malformed(format!(
                "Unknown application status `{other}`"
            ))),
        }
    }
}

// ============================================================================
// Rating
// ============================================================================

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Review rating, an integer star count in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> ScholarshipResult<Self> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScholarshipError::malformed(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ScholarshipError;

    fn try_from(value: u8) -> ScholarshipResult<Self> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

// ============================================================================
// Money
// ============================================================================

/// Amount in the currency's minor unit (cents for `usd`)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MinorUnits(u64);

impl MinorUnits {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Caller-supplied price in major units. Positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> ScholarshipResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ScholarshipError::InvalidPrice)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `trunc(price * 100)`
    pub fn to_minor_units(&self) -> ScholarshipResult<MinorUnits> {
        let cents = (self.0 * 100.0).trunc();
        if cents < 1.0 || cents > u64::MAX as f64 {
            return Err(ScholarshipError::InvalidPrice);
        }
        Ok(MinorUnits(cents as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use ApplicationStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Rejected));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Processing));
        assert!(!Processing.can_transition_to(Pending));
    }

    #[test]
    fn test_status_parse_and_serde() {
        assert_eq!("Processing".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Processing);
        assert!("approved".parse::<ApplicationStatus>().is_err());
        assert_eq!(serde_json::to_string(&ApplicationStatus::Rejected).unwrap(), "\"rejected\"");
        assert!(ApplicationStatus::Completed.is_final());
        assert!(ApplicationStatus::Pending.is_editable());
        assert!(!ApplicationStatus::Processing.is_editable());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert!(Rating::new(6).is_err());
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_price_validation() {
        assert!(Price::new(10.0).is_ok());
        assert!(matches!(Price::new(0.0), Err(ScholarshipError::InvalidPrice)));
        assert!(Price::new(-5.0).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_price_to_minor_units_truncates() {
        assert_eq!(Price::new(25.0).unwrap().to_minor_units().unwrap().value(), 2500);
        assert_eq!(Price::new(19.999).unwrap().to_minor_units().unwrap().value(), 1999);
        assert_eq!(Price::new(0.01).unwrap().to_minor_units().unwrap().value(), 1);
        // Below one cent there is nothing to charge
        assert!(Price::new(0.001).unwrap().to_minor_units().is_err());
    }
}
