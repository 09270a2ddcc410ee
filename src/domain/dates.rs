//! Date conversions at the API boundary.
//!
//! The remote service exchanges dates as `MM/DD/YYYY`, while user input uses
//! ISO `YYYY-MM-DD`. Everything inside the crate works with [`NaiveDate`].

use chrono::NaiveDate;

use crate::domain::types::TypeConstraintError;

/// Format used on the wire.
pub const WIRE_DATE_FORMAT: &str = "%m/%d/%Y";
/// Format used by date inputs.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date entered by the user.
pub fn parse_input_date(value: &str) -> Result<NaiveDate, TypeConstraintError> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT)
        .map_err(|_| TypeConstraintError::InvalidDate(value.to_string()))
}

/// Parses a `MM/DD/YYYY` date received from the service.
pub fn parse_wire_date(value: &str) -> Result<NaiveDate, TypeConstraintError> {
    NaiveDate::parse_from_str(value.trim(), WIRE_DATE_FORMAT)
        .map_err(|_| TypeConstraintError::InvalidDate(value.to_string()))
}

pub fn to_wire(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

pub fn to_input(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

/// Serde adapter storing a [`NaiveDate`] as `MM/DD/YYYY`.
pub mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&super::to_wire(*date))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        super::parse_wire_date(&raw).map_err(de::Error::custom)
    }

    /// `Option<NaiveDate>` variant, used for optional query parameters.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer, de};

        pub fn serialize<S>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => s.serialize_some(&super::super::to_wire(*date)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(d)?
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| super::super::parse_wire_date(&raw).map_err(de::Error::custom))
                .transpose()
        }
    }
}
