use std::str::FromStr;

use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::VANILLA_NAMESPACE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Identifier is empty")]
    Empty,
    #[error("Identifier '{0}' can't be split into namespace and path")]
    MissingSeparator(String),
    #[error("Identifier '{0}' has an empty namespace or path")]
    EmptyComponent(String),
    #[error("Identifier '{0}' contains invalid character '{1}'")]
    InvalidCharacter(String, char),
}

/// A `namespace:path` key such as `minecraft:crafting_shaped` or `create:mixing`.
///
/// Parsing normalizes the input: surrounding whitespace is trimmed and the
/// whole identifier is lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    pub namespace: String,
    pub path: String,
}

impl Identifier {
    pub fn vanilla(path: &str) -> Self {
        Self {
            namespace: VANILLA_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {
        format!("{namespace}:{path}").parse()
    }

    pub fn is_vanilla(&self) -> bool {
        self.namespace == VANILLA_NAMESPACE
    }
}

const fn valid_namespace_char(ch: char) -> bool {
    matches!(ch, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

const fn valid_path_char(ch: char) -> bool {
    valid_namespace_char(ch) || ch == '/'
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(IdentifierError::Empty);
        }
        let Some((namespace, path)) = normalized.split_once(':') else {
            return Err(IdentifierError::MissingSeparator(normalized));
        };
        if namespace.is_empty() || path.is_empty() {
            return Err(IdentifierError::EmptyComponent(normalized));
        }
        if let Some(ch) = namespace.chars().find(|ch| !valid_namespace_char(*ch)) {
            return Err(IdentifierError::InvalidCharacter(normalized, ch));
        }
        // a second ':' lands in the path and is rejected here
        if let Some(ch) = path.chars().find(|ch| !valid_path_char(*ch)) {
            return Err(IdentifierError::InvalidCharacter(normalized, ch));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdentifierVisitor;

        impl Visitor<'_> for IdentifierVisitor {
            type Value = Identifier;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a valid Identifier (namespace:path)")
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(&v)
            }

            fn visit_str<E>(self, identifier: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                identifier.parse().map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_str(IdentifierVisitor)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}
