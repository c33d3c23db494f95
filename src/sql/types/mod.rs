use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// Declared type of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Integer,
    Float,
    String,
    Boolean,
}

impl Kind {
    /// Resolves a kind name as written in CREATE TABLE (case-insensitive)
    pub fn from_name(name: &str) -> Option<Kind> {
        Some(match name.to_lowercase().as_ref() {
            "integer" => Kind::Integer,
            "float" => Kind::Float,
            "string" => Kind::String,
            "boolean" => Kind::Boolean,
            _ => return None,
        })
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Boolean => "boolean",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Runtime value of a field, compared by structural equality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Column not supplied on insert
    Unset,
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl Value {
    /// Returns the kind of the value, or None if it's Unset
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Self::Unset => None,
            Self::Integer(_) => Some(Kind::Integer),
            Self::Float(_) => Some(Kind::Float),
            Self::String(_) => Some(Kind::String),
            Self::Boolean(_) => Some(Kind::Boolean),
        }
    }

    /// Kind name used in error messages; "unset" for [`Value::Unset`]
    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("unset", |k| k.to_str())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Unset => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Boolean(true) => write!(f, "TRUE"),
            Value::Boolean(false) => write!(f, "FALSE"),
        }
    }
}

/// A row maps column names to values
pub type Row = BTreeMap<String, Value>;
