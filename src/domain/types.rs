//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, trimmed
//! names, known positions) so that once a value reaches the domain layer it
//! can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::{ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is shorter or longer than allowed.
    #[error("length must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },
    /// Position is not one of the known job titles.
    #[error("unknown position: {0}")]
    UnknownPosition(String),
    /// Date string did not match the expected format.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Start of a date range is after its end.
    #[error("start date cannot be later than end date")]
    InvertedDateRange,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| TypeConstraintError::InvalidValue(s.to_string()))?;
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(EmployeeId, "Unique identifier for an employee.");

/// Range client-generated employee ids are drawn from.
pub const GENERATED_ID_RANGE: std::ops::RangeInclusive<i32> = 100..=999;

impl EmployeeId {
    /// Picks a pseudo-random id for a new employee.
    ///
    /// The remote service expects the client to choose the id. Collisions with
    /// existing records are not detected.
    pub fn generate() -> Self {
        Self(rand::random_range(GENERATED_ID_RANGE))
    }
}

macro_rules! bounded_string_newtype {
    ($name:ident, $min:expr, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Shortest accepted value, in characters.
            pub const MIN_LEN: usize = $min;
            /// Longest accepted value, in characters.
            pub const MAX_LEN: usize = $max;

            /// Constructs a trimmed value within the length bounds.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                let len = trimmed.chars().count();
                if len < Self::MIN_LEN || len > Self::MAX_LEN {
                    return Err(TypeConstraintError::InvalidLength {
                        min: Self::MIN_LEN,
                        max: Self::MAX_LEN,
                    });
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_string_newtype!(
    EmployeeName,
    2,
    100,
    "Employee display name, trimmed and 2 to 100 characters long."
);

/// Job title held by an employee.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    #[serde(rename = "CEO")]
    Ceo,
    #[serde(rename = "CTO")]
    Cto,
    #[serde(rename = "CPO")]
    Cpo,
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "Accountant")]
    Accountant,
    #[serde(rename = "Engineer")]
    Engineer,
}

impl Position {
    /// Every position in display order.
    pub const ALL: [Position; 6] = [
        Position::Ceo,
        Position::Cto,
        Position::Cpo,
        Position::Hr,
        Position::Accountant,
        Position::Engineer,
    ];

    /// Wire spelling used by the remote service.
    pub const fn as_str(self) -> &'static str {
        match self {
            Position::Ceo => "CEO",
            Position::Cto => "CTO",
            Position::Cpo => "CPO",
            Position::Hr => "HR",
            Position::Accountant => "Accountant",
            Position::Engineer => "Engineer",
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = TypeConstraintError;

    /// Accepts the wire spelling in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Position::ALL
            .into_iter()
            .find(|position| position.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TypeConstraintError::UnknownPosition(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_id_rejects_non_positive_values() {
        assert_eq!(EmployeeId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(EmployeeId::new(-5), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(EmployeeId::new(42).map(EmployeeId::get), Ok(42));
    }

    #[test]
    fn employee_id_parses_from_text() {
        assert_eq!(" 17 ".parse::<EmployeeId>(), EmployeeId::new(17));
        assert!("abc".parse::<EmployeeId>().is_err());
    }

    #[test]
    fn generated_ids_stay_in_range() {
        for _ in 0..200 {
            let id = EmployeeId::generate().get();
            assert!(GENERATED_ID_RANGE.contains(&id), "{id} out of range");
        }
    }

    #[test]
    fn employee_name_trims_and_checks_length() {
        assert_eq!(EmployeeName::new("  Jane Doe ").unwrap().as_str(), "Jane Doe");
        assert_eq!(EmployeeName::new("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(
            EmployeeName::new("J"),
            Err(TypeConstraintError::InvalidLength { min: 2, max: 100 })
        );
        assert!(EmployeeName::new("x".repeat(101)).is_err());
    }

    #[test]
    fn position_round_trips_wire_spelling() {
        let json = serde_json::to_string(&Position::Accountant).unwrap();
        assert_eq!(json, "\"Accountant\"");
        let parsed: Position = serde_json::from_str("\"HR\"").unwrap();
        assert_eq!(parsed, Position::Hr);
    }

    #[test]
    fn position_parse_ignores_case() {
        assert_eq!("engineer".parse::<Position>(), Ok(Position::Engineer));
        assert_eq!("cto".parse::<Position>(), Ok(Position::Cto));
        assert!(matches!(
            "Janitor".parse::<Position>(),
            Err(TypeConstraintError::UnknownPosition(_))
        ));
    }
}
