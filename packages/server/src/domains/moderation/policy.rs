//! Review policy - what happens when an admin decides an already-decided registration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domains::registration::models::RegistrationStatus;

/// How moderation treats registrations that are no longer pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPolicy {
    /// Every decision is written and notified, whatever the current status.
    #[default]
    Unguarded,
    /// Repeating a decision is a silent no-op; reversing one is refused.
    Guarded,
}

/// What a review should do given the current and requested status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStep {
    Apply,
    Skip,
    Conflict,
}

impl ReviewPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewPolicy::Unguarded => "unguarded",
            ReviewPolicy::Guarded => "guarded",
        }
    }

    pub fn step(&self, current: RegistrationStatus, target: RegistrationStatus) -> ReviewStep {
        match self {
            ReviewPolicy::Unguarded => ReviewStep::Apply,
            ReviewPolicy::Guarded if current == target => ReviewStep::Skip,
            ReviewPolicy::Guarded if current.is_decided() => ReviewStep::Conflict,
            ReviewPolicy::Guarded => ReviewStep::Apply,
        }
    }
}

impl fmt::Display for ReviewPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unguarded" => Ok(ReviewPolicy::Unguarded),
            "guarded" => Ok(ReviewPolicy::Guarded),
            _ => Err(anyhow::anyhow!("Invalid review policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RegistrationStatus::*;

    #[test]
    fn test_unguarded_always_applies() {
        for current in [Pending, Approved, Rejected] {
            for target in [Approved, Rejected] {
                assert_eq!(ReviewPolicy::Unguarded.step(current, target), ReviewStep::Apply);
            }
        }
    }

    #[test]
    fn test_guarded_transitions() {
        let policy = ReviewPolicy::Guarded;
        assert_eq!(policy.step(Pending, Approved), ReviewStep::Apply);
        assert_eq!(policy.step(Pending, Rejected), ReviewStep::Apply);
        assert_eq!(policy.step(Approved, Approved), ReviewStep::Skip);
        assert_eq!(policy.step(Rejected, Rejected), ReviewStep::Skip);
        assert_eq!(policy.step(Approved, Rejected), ReviewStep::Conflict);
        assert_eq!(policy.step(Rejected, Approved), ReviewStep::Conflict);
    }

    #[test]
    fn test_parse() {
        assert_eq!("guarded".parse::<ReviewPolicy>().unwrap(), ReviewPolicy::Guarded);
        assert_eq!(" Unguarded ".parse::<ReviewPolicy>().unwrap(), ReviewPolicy::Unguarded);
        assert!("strict".parse::<ReviewPolicy>().is_err());
        assert_eq!(ReviewPolicy::default(), ReviewPolicy::Unguarded);
    }
}
