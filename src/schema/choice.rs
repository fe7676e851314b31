//! Closed label sets with a designated EMPTY member.
//!
//! Every enumerated field of the admission record goes through [`normalize`]:
//! sentinel inputs and values outside the label set become EMPTY, recognised
//! labels become their member. Members serialize to their label and EMPTY
//! serializes to the number `-1`.

use std::fmt::Debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Serialized form of an EMPTY member.
pub const EMPTY_CODE: i64 = -1;

/// A raw field value as it comes out of extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Text(String),
    Int(i64),
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Missing,
            Value::String(s) => RawValue::Text(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => RawValue::Text(n.to_string()),
            },
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Missing, Into::into)
    }
}

/// Raw inputs that mean "no value".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Missing,
    /// Empty or whitespace-only text.
    Blank,
    Int(i64),
    Text(&'static str),
}

impl Sentinel {
    fn matches(&self, raw: &RawValue) -> bool {
        match (self, raw) {
            (Sentinel::Missing, RawValue::Missing) => true,
            (Sentinel::Blank, RawValue::Text(s)) => s.trim().is_empty(),
            (Sentinel::Int(i), RawValue::Int(v)) => i == v,
            (Sentinel::Text(t), RawValue::Text(s)) => s.trim() == *t,
            _ => false,
        }
    }
}

pub const DEFAULT_SENTINELS: &[Sentinel] = &[
    Sentinel::Missing,
    Sentinel::Blank,
    Sentinel::Int(EMPTY_CODE),
    Sentinel::Text("-1"),
    Sentinel::Text("EMPTY"),
];

/// What a record normalization reports about non-sentinel values that match no label.
/// Such values always become EMPTY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unrecognized {
    /// Dropped after a warning.
    #[default]
    Empty,
    /// Reported next to the record with their raw text.
    Preserve,
}

impl RawValue {
    /// Trimmed text form; `None` when missing.
    pub fn text(&self) -> Option<String> {
        match self {
            RawValue::Missing => None,
            RawValue::Text(s) => Some(s.trim().to_string()),
            RawValue::Int(i) => Some(i.to_string()),
        }
    }
}

pub fn is_sentinel(raw: &RawValue, sentinels: &[Sentinel]) -> bool {
    sentinels.iter().any(|sentinel| sentinel.matches(raw))
}

pub trait Choice: Copy + Eq + Debug + 'static {
    const NAME: &'static str;
    const EMPTY: Self;
    /// All members except EMPTY.
    const MEMBERS: &'static [Self];

    fn label(self) -> &'static str;

    /// Form written to the data-capture export; the label unless overridden.
    fn export_label(self) -> &'static str {
        self.label()
    }

    /// Extra spellings accepted besides the label.
    fn alias(_text: &str) -> Option<Self> {
        None
    }

    fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    fn from_label(text: &str) -> Option<Self> {
        Self::MEMBERS.iter().copied().find(|member| member.label() == text)
    }
}

pub fn normalize<E: Choice>(raw: &RawValue, sentinels: &[Sentinel]) -> E {
    if is_sentinel(raw, sentinels) {
        return E::EMPTY;
    }
    let Some(text) = raw.text() else {
        return E::EMPTY;
    };

    match E::from_label(&text).or_else(|| E::alias(&text)) {
        Some(member) => member,
        None => {
            log::warn!("Unrecognized {} value {:?}, stored as EMPTY", E::NAME, text);
            E::EMPTY
        }
    }
}

/// Normalizes against the default sentinels.
pub fn coerce<E: Choice>(raw: impl Into<RawValue>) -> E {
    normalize(&raw.into(), DEFAULT_SENTINELS)
}

/// The value a member is exported as: its label, or `-1` for EMPTY.
pub fn export<E: Choice>(member: E) -> Value {
    if member.is_empty() {
        Value::from(EMPTY_CODE)
    } else {
        Value::from(member.export_label())
    }
}

pub fn serialize_choice<E: Choice, S: Serializer>(member: &E, serializer: S) -> Result<S::Ok, S::Error> {
    export(*member).serialize(serializer)
}

/// Never fails: anything that is not a label becomes EMPTY.
pub fn deserialize_choice<'de, E: Choice, D: Deserializer<'de>>(deserializer: D) -> Result<E, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce(&value))
}

/// Serde, `Default` (EMPTY) and `Display` (label) for a [`Choice`] type.
macro_rules! choice_serde {
    ($name:ident) => {
        impl Default for $name {
            fn default() -> Self {
                <$name as $crate::schema::choice::Choice>::EMPTY
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::schema::choice::Choice::label(*self))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::schema::choice::serialize_choice(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::schema::choice::deserialize_choice(deserializer)
            }
        }
    };
}

/// Declares a label set: `Name { Variant => "label", ... }`. An `Empty` variant labelled `-1` is added.
macro_rules! choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Empty,
        }

        impl $crate::schema::choice::Choice for $name {
            const NAME: &'static str = stringify!($name);
            const EMPTY: Self = $name::Empty;
            const MEMBERS: &'static [Self] = &[$($name::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Empty => "-1",
                }
            }
        }

        $crate::schema::choice::choice_serde!($name);
    };
}

pub(crate) use {choice, choice_serde};
