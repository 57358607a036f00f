//! Document Fingerprints - SHA-256 Over Canonical JSON
//!
//! A fingerprint lets two parties check that an issued-document manifest
//! has not drifted: same manifest, same hash, independent of JSON key
//! ordering.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// SHA-256 of raw bytes as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Serialize to canonical JSON: keys sorted recursively, no whitespace.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Fingerprint an issued-document manifest.
pub fn compute_fingerprint<T: Serialize>(manifest: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(manifest)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_keys() {
        let obj = json!({"stamp": "TRN-0042-74", "body": "x", "id": 1});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"body":"x","id":1,"stamp":"TRN-0042-74"}"#);
    }

    #[test]
    fn key_order_does_not_change_fingerprint() {
        let a = json!({"z": 1, "a": 2, "m": {"b": 1, "a": 2}});
        let b = json!({"a": 2, "m": {"a": 2, "b": 1}, "z": 1});
        assert_eq!(compute_fingerprint(&a).unwrap(), compute_fingerprint(&b).unwrap());
    }

    #[test]
    fn fingerprint_is_stable() {
        let manifest = json!({"requestType": "TRANSCRIPT", "stamp": "TRN-0042-74"});
        let h1 = compute_fingerprint(&manifest).unwrap();
        let h2 = compute_fingerprint(&manifest).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }
}
