//! Labels - key/value facets attached to a service registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    pub value: String,
}

impl Label {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// An unordered set of key/value pairs.
///
/// Keys may repeat with different values (`env=prod` and `env=staging`
/// can coexist after a merge); identical pairs are kept once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Label>", into = "Vec<Label>")]
pub struct Labels(Vec<Label>);

impl Labels {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a label set from pairs, dropping exact duplicates.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut labels = Labels::new();
        for (key, value) in pairs {
            labels.insert(Label::new(key, value));
        }
        labels
    }

    /// Inserts a pair unless the identical pair is already present.
    pub fn insert(&mut self, label: Label) {
        if !self.0.contains(&label) {
            self.0.push(label);
        }
    }

    /// Returns the union of `self` and `other`.
    pub fn add(&self, other: &Labels) -> Labels {
        let mut merged = self.clone();
        for label in &other.0 {
            merged.insert(label.clone());
        }
        merged
    }

    /// Checks whether every pair of `other` is present in `self`.
    pub fn contains_all(&self, other: &Labels) -> bool {
        other.0.iter().all(|label| self.0.contains(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Label>> for Labels {
    fn from(pairs: Vec<Label>) -> Self {
        let mut labels = Labels::new();
        for label in pairs {
            labels.insert(label);
        }
        labels
    }
}

impl From<Labels> for Vec<Label> {
    fn from(labels: Labels) -> Self {
        labels.0
    }
}

/// Set equality: same pairs regardless of order.
impl PartialEq for Labels {
    fn eq(&self, other: &Self) -> bool {
        self.contains_all(other) && other.contains_all(self)
    }
}

impl Eq for Labels {}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}

/// Parses the `k1=v1,k2=v2` form used on query strings.
impl FromStr for Labels {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut labels = Labels::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                ValidationError::invalid_format("labels", format!("missing '=' in '{}'", pair))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ValidationError::invalid_format(
                    "labels",
                    format!("empty key in '{}'", pair),
                ));
            }
            labels.insert(Label::new(key, value.trim()));
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(labels: &Labels) -> Vec<Label> {
        let mut v: Vec<Label> = labels.iter().cloned().collect();
        v.sort();
        v
    }

    #[test]
    fn add_returns_union() {
        let a = Labels::from_pairs([("env", "prod")]);
        let b = Labels::from_pairs([("region", "us")]);

        let merged = a.add(&b);

        assert_eq!(merged, Labels::from_pairs([("env", "prod"), ("region", "us")]));
    }

    #[test]
    fn add_keeps_same_key_with_different_values() {
        let a = Labels::from_pairs([("env", "prod")]);
        let b = Labels::from_pairs([("env", "staging")]);

        let merged = a.add(&b);

        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn add_does_not_duplicate_identical_pairs() {
        let a = Labels::from_pairs([("env", "prod")]);
        assert_eq!(a.add(&a).len(), 1);
    }

    #[test]
    fn equality_ignores_order() {
        let a = Labels::from_pairs([("a", "1"), ("b", "2")]);
        let b = Labels::from_pairs([("b", "2"), ("a", "1")]);
        assert_eq!(a, b);
    }

    #[test]
    fn deserializing_drops_repeated_pairs() {
        let json = r#"[{"key":"a","value":"1"},{"key":"a","value":"1"}]"#;
        let labels: Labels = serde_json::from_str(json).unwrap();

        assert_eq!(labels.len(), 1);
        assert_eq!(labels, Labels::from_pairs([("a", "1")]));
    }

    #[test]
    fn equality_is_symmetric_for_deserialized_sets() {
        let json = r#"[{"key":"a","value":"1"},{"key":"a","value":"1"}]"#;
        let repeated: Labels = serde_json::from_str(json).unwrap();
        let two = Labels::from_pairs([("a", "1"), ("b", "2")]);

        assert_ne!(two, repeated);
        assert_ne!(repeated, two);
    }

    #[test]
    fn serializes_as_plain_list() {
        let labels = Labels::from_pairs([("env", "prod")]);
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"[{"key":"env","value":"prod"}]"#);
    }

    #[test]
    fn contains_all_checks_subset() {
        let set = Labels::from_pairs([("env", "prod"), ("region", "us")]);
        assert!(set.contains_all(&Labels::from_pairs([("env", "prod")])));
        assert!(set.contains_all(&Labels::new()));
        assert!(!set.contains_all(&Labels::from_pairs([("env", "dev")])));
    }

    #[test]
    fn parses_query_string_form() {
        let labels: Labels = "env=prod, region=us".parse().unwrap();
        assert_eq!(labels, Labels::from_pairs([("env", "prod"), ("region", "us")]));
        assert_eq!(labels.to_string(), "env=prod,region=us");
    }

    #[test]
    fn parses_empty_string_as_empty_set() {
        let labels: Labels = "".parse().unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn rejects_pair_without_separator() {
        let err = "env".parse::<Labels>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_empty_key() {
        assert!("=prod".parse::<Labels>().is_err());
    }

    fn arb_labels() -> impl Strategy<Value = Labels> {
        prop::collection::vec(("[a-c]", "[x-z]"), 0..6).prop_map(Labels::from_pairs)
    }

    proptest! {
        #[test]
        fn add_is_commutative(a in arb_labels(), b in arb_labels()) {
            prop_assert_eq!(sorted(&a.add(&b)), sorted(&b.add(&a)));
        }

        #[test]
        fn add_is_idempotent(a in arb_labels(), b in arb_labels()) {
            let once = a.add(&b);
            let twice = once.add(&a);
            prop_assert_eq!(sorted(&once), sorted(&twice));
        }
    }
}
