//! Structural identity hashing for singleton resolution.
//!
//! The default identity of a tool instance is a SHA-256 digest over a
//! canonical encoding of its `properties` payload. Object keys are hashed
//! in sorted order, so two payloads that are structurally equal produce the
//! same identifier no matter how their keys were inserted; any leaf
//! difference changes the digest.

use std::fmt;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Identifier shared by every construction that supplies no properties.
const ABSENT_IDENTIFIER: &str = "no-properties";

/// Identifier keying singleton instances within a type's registry.
///
/// Produced by the default structural hash or by a type's own
/// `identity_of` override: a fixed constant forces one process-wide
/// instance, a natural key groups instances by selected fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier from an arbitrary key.
    ///
    /// Intended for `identity_of` overrides that derive natural keys
    /// instead of hashing the whole payload.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The constant identifier used when `properties` is absent.
    pub fn absent() -> Self {
        Self(ABSENT_IDENTIFIER.to_string())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic, key-order-insensitive structural hash of a JSON value.
///
/// # Examples
///
/// ```rust
/// use mortar_core::identity::structural_hash;
/// use serde_json::json;
///
/// let a = structural_hash(&json!({ "foo": "toto", "bar": 2 }));
/// let b = structural_hash(&json!({ "bar": 2, "foo": "toto" }));
/// let c = structural_hash(&json!({ "foo": "toto", "bar": 3 }));
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
pub fn structural_hash(value: &Value) -> Identifier {
    let mut hasher = Sha256::new();
    hash_value(value, &mut hasher);
    Identifier(format!("{:x}", hasher.finalize()))
}

/// Identity of a validated `properties` payload.
///
/// Absent payloads all map to one constant identifier; present payloads are
/// structurally hashed, so an empty object is distinct from no object.
pub fn of_properties(properties: Option<&Map<String, Value>>) -> Identifier {
    match properties {
        Some(map) => {
            let mut hasher = Sha256::new();
            hash_object(map, &mut hasher);
            Identifier(format!("{:x}", hasher.finalize()))
        }
        None => Identifier::absent(),
    }
}

// Each node is encoded as a type tag followed by length-prefixed content,
// which keeps adjacent values from colliding ("ab"+"c" vs "a"+"bc").
fn hash_value(value: &Value, hasher: &mut Sha256) {
    match value {
        Value::Null => hasher.update(b"n"),
        Value::Bool(flag) => {
            hasher.update(b"b");
            hasher.update([u8::from(*flag)]);
        }
        Value::Number(number) => {
            hasher.update(b"d");
            hash_str(&number.to_string(), hasher);
        }
        Value::String(text) => {
            hasher.update(b"s");
            hash_str(text, hasher);
        }
        Value::Array(items) => {
            hasher.update(b"a");
            hasher.update((items.len() as u64).to_le_bytes());
            for item in items {
                hash_value(item, hasher);
            }
        }
        Value::Object(map) => hash_object(map, hasher),
    }
}

fn hash_object(map: &Map<String, Value>, hasher: &mut Sha256) {
    hasher.update(b"o");
    hasher.update((map.len() as u64).to_le_bytes());

    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (key, value) in entries {
        hash_str(key, hasher);
        hash_value(value, hasher);
    }
}

fn hash_str(text: &str, hasher: &mut Sha256) {
    hasher.update((text.len() as u64).to_le_bytes());
    hasher.update(text.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equal_payloads_hash_identically() {
        let payload = json!({
            "foo": "foo",
            "bar": 111,
            "qux": { "baz": [1, 2, 3], "quuz": true },
        });

        assert_eq!(structural_hash(&payload), structural_hash(&payload.clone()));
    }

    #[test]
    fn key_order_does_not_matter() {
        let mut forward = Map::new();
        forward.insert("foo".to_string(), json!("toto"));
        forward.insert("bar".to_string(), json!(2));

        let mut reversed = Map::new();
        reversed.insert("bar".to_string(), json!(2));
        reversed.insert("foo".to_string(), json!("toto"));

        assert_eq!(
            of_properties(Some(&forward)),
            of_properties(Some(&reversed))
        );
    }

    #[test]
    fn a_changed_nested_leaf_changes_the_identifier() {
        let original = json!({
            "foo": "foo",
            "bar": 111,
            "qux": { "baz": [1, 2, 3], "quuz": true },
        });
        let mut tweaked = original.clone();
        tweaked["qux"]["quuz"] = json!(false);

        assert_ne!(structural_hash(&original), structural_hash(&tweaked));
    }

    #[test]
    fn array_order_is_significant() {
        assert_ne!(
            structural_hash(&json!({ "seq": [1, 2, 3] })),
            structural_hash(&json!({ "seq": [3, 2, 1] }))
        );
    }

    #[test]
    fn scalar_types_do_not_collide() {
        assert_ne!(
            structural_hash(&json!({ "v": 2 })),
            structural_hash(&json!({ "v": "2" }))
        );
        assert_ne!(
            structural_hash(&json!({ "v": true })),
            structural_hash(&json!({ "v": 1 }))
        );
        assert_ne!(
            structural_hash(&json!({ "v": null })),
            structural_hash(&json!({ "v": false }))
        );
    }

    #[test]
    fn absent_properties_share_one_constant_identifier() {
        assert_eq!(of_properties(None), of_properties(None));
        assert_eq!(of_properties(None), Identifier::absent());
    }

    #[test]
    fn empty_object_differs_from_absent() {
        let empty = Map::new();
        assert_ne!(of_properties(Some(&empty)), of_properties(None));
    }

    #[test]
    fn nesting_shape_is_significant() {
        assert_ne!(
            structural_hash(&json!({ "a": { "b": 1 } })),
            structural_hash(&json!({ "a.b": 1 }))
        );
    }
}
