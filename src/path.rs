//! Field paths
//!
//! A field path names a property on a record: `age`, `address.city`,
//! `tags[0]`, `orders[2].lines[0].sku`. Resolution is null-tolerant: any step
//! that does not exist yields `None` instead of an error.

use std::fmt;

use serde_json::Value;

use crate::errors::{QueryError, QueryResult};

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object property
    Key(String),
    /// Array element
    Index(usize),
}

/// Parsed field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parses a dotted/indexed path.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidField` for an empty path or any character
    /// outside the path grammar.
    pub fn parse(path: &str) -> QueryResult<Self> {
        let invalid = || QueryError::InvalidField(path.to_string());

        if path.is_empty() {
            return Err(invalid());
        }

        let mut segments = Vec::new();
        for part in path.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };

            if !is_identifier(name) {
                return Err(invalid());
            }
            segments.push(PathSegment::Key(name.to_string()));

            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(invalid)?;
                let digits = &rest[1..close];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let index = digits.parse().map_err(|_| invalid())?;
                segments.push(PathSegment::Index(index));

                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid());
                }
            }
        }

        Ok(Self { segments })
    }

    /// Resolves the path against a record.
    ///
    /// Returns `None` when a property is missing, an index is out of bounds,
    /// or a step lands on a value of the wrong shape.
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(record, |current, segment| match segment {
                PathSegment::Key(key) => current.as_object()?.get(key),
                PathSegment::Index(index) => current.as_array()?.get(*index),
            })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Resolves a raw field string against a record.
///
/// Unparseable paths resolve to nothing, same as missing properties.
pub fn resolve_field<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    FieldPath::parse(field).ok()?.resolve(record)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
