//! SHA-256 fingerprint of an evaluation: identical inputs give identical fingerprints.

use crate::compute::Evaluation;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Normalize JSON for hashing: sort keys and no whitespace.
pub fn normalize_for_hash(value: &serde_json::Value) -> Result<String, FingerprintError> {
    Ok(serde_json::to_string(&sort_json_keys(value))?)
}

fn sort_json_keys(v: &serde_json::Value) -> serde_json::Value {
    match v {
        serde_json::Value::Object(m) => {
            let sorted: std::collections::BTreeMap<&String, serde_json::Value> =
                m.iter().map(|(k, v)| (k, sort_json_keys(v))).collect();
            serde_json::Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), v))
                    .collect(),
            )
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(sort_json_keys).collect())
        }
        other => other.clone(),
    }
}

/// Lowercase hex SHA-256 over the normalized evaluation JSON.
pub fn evaluation_fingerprint(evaluation: &Evaluation) -> Result<String, FingerprintError> {
    let json = serde_json::to_value(evaluation)?;
    let normalized = normalize_for_hash(&json)?;
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evaluate;
    use crate::params::InputParams;

    #[test]
    fn normalize_deterministic() {
        let a = serde_json::json!({"z": 1, "a": {"y": 2, "b": 3}});
        let b = serde_json::json!({"a": {"b": 3, "y": 2}, "z": 1});
        assert_eq!(
            normalize_for_hash(&a).unwrap(),
            normalize_for_hash(&b).unwrap()
        );
    }

    #[test]
    fn fingerprint_stable_for_same_inputs() {
        let inputs = InputParams::default().to_inputs().unwrap();
        let h1 = evaluation_fingerprint(&evaluate(&inputs).unwrap()).unwrap();
        let h2 = evaluation_fingerprint(&evaluate(&inputs).unwrap()).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn fingerprint_changes_with_inputs() {
        let a = InputParams::default().to_inputs().unwrap();
        let b = InputParams {
            ltv_ratio: 50.0,
            ..Default::default()
        }
        .to_inputs()
        .unwrap();
        let ha = evaluation_fingerprint(&evaluate(&a).unwrap()).unwrap();
        let hb = evaluation_fingerprint(&evaluate(&b).unwrap()).unwrap();
        assert_ne!(ha, hb);
    }
}
