//! # Partial Update Fields
//!
//! Update requests carry every field as a [`Patch`], which keeps three states
//! apart that a plain `Option` would merge:
//!
//! - the field was omitted from the JSON body ([`Patch::Absent`]),
//! - the field was sent as `null` ([`Patch::Clear`]),
//! - the field was sent with a value ([`Patch::Set`]).
//!
//! Request structs must mark patch fields with `#[serde(default)]` so that an
//! omitted field deserializes to `Absent`.
//!
//! Text fields keep the legacy client contract: an empty string means "not
//! supplied". Clearing an optional text field is done with `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{CollegeError, CollegeResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(value),
        }
    }

    /// Value for a field that cannot be removed; `null` is rejected.
    pub fn required(&self, field: &str) -> CollegeResult<Option<&T>> {
        match self {
            Self::Absent => Ok(None),
            Self::Clear => Err(CollegeError::Validation(format!("{field} cannot be null"))),
            Self::Set(value) => Ok(Some(value)),
        }
    }
}

impl Patch<String> {
    /// Text view with the empty-string-means-omitted rule applied.
    pub fn text(&self) -> Patch<&str> {
        match self {
            Self::Set(value) if value.is_empty() => Patch::Absent,
            Self::Set(value) => Patch::Set(value.as_str()),
            Self::Clear => Patch::Clear,
            Self::Absent => Patch::Absent,
        }
    }

    /// Text value for a required field.
    pub fn required_text(&self, field: &str) -> CollegeResult<Option<&str>> {
        match self.text() {
            Patch::Absent => Ok(None),
            Patch::Clear => Err(CollegeError::Validation(format!("{field} cannot be null"))),
            Patch::Set(value) => Ok(Some(value)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::Clear, Self::Set))
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Set(value) => serializer.serialize_some(value),
            Self::Absent | Self::Clear => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        description: Patch<String>,
        #[serde(default)]
        shift: Patch<u8>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let body: Body = serde_json::from_str(r#"{"description": null, "shift": 2}"#).unwrap();
        assert_eq!(body.name, Patch::Absent);
        assert_eq!(body.description, Patch::Clear);
        assert_eq!(body.shift, Patch::Set(2));
    }

    #[test]
    fn empty_text_reads_as_absent() {
        let body: Body = serde_json::from_str(r#"{"name": "", "description": "x"}"#).unwrap();
        assert_eq!(body.name.text(), Patch::Absent);
        assert_eq!(body.description.text(), Patch::Set("x"));
    }

    #[test]
    fn null_on_required_field_is_rejected() {
        let body: Body = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(matches!(
            body.name.required_text("name"),
            Err(CollegeError::Validation(_))
        ));
    }
}
