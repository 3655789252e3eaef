// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of capability-feature vars, as advertised via service discovery.
///
/// Ordered storage gives deterministic iteration, which the XEP-0115
/// verification string depends on. Equality and subset queries compare
/// feature vars only; identities and data forms live on
/// [`DiscoBundle`](crate::caps::DiscoBundle).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    features: BTreeSet<String>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        CapabilitySet::default()
    }

    /// Returns `false` if the feature was already present.
    pub fn add(&mut self, feature: impl Into<String>) -> bool {
        self.features.insert(feature.into())
    }

    /// Returns `false` if the feature was not present.
    pub fn remove(&mut self, feature: &str) -> bool {
        self.features.remove(feature)
    }

    pub fn has(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn clear(&mut self) {
        self.features.clear()
    }

    /// Iterates features in byte-wise lexicographical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    /// Union into `self`.
    pub fn extend_from(&mut self, other: &CapabilitySet) {
        self.features
            .extend(other.features.iter().cloned());
    }

    /// Difference into `self`.
    pub fn exclude(&mut self, removed: &CapabilitySet) {
        self.features
            .retain(|feature| !removed.features.contains(feature));
    }

    /// Intersection into `self`.
    pub fn intersect_with(&mut self, other: &CapabilitySet) {
        self.features
            .retain(|feature| other.features.contains(feature));
    }

    pub fn union(&self, other: &CapabilitySet) -> CapabilitySet {
        CapabilitySet {
            features: self.features.union(&other.features).cloned().collect(),
        }
    }

    pub fn intersection(&self, other: &CapabilitySet) -> CapabilitySet {
        CapabilitySet {
            features: self
                .features
                .intersection(&other.features)
                .cloned()
                .collect(),
        }
    }

    pub fn difference(&self, other: &CapabilitySet) -> CapabilitySet {
        CapabilitySet {
            features: self
                .features
                .difference(&other.features)
                .cloned()
                .collect(),
        }
    }

    /// True iff every feature in `query` is present in `self`.
    pub fn at_least(&self, query: &CapabilitySet) -> bool {
        query.features.is_subset(&self.features)
    }

    /// True iff `self` shares at least one feature with `alternatives`.
    pub fn has_one(&self, alternatives: &CapabilitySet) -> bool {
        !self.features.is_disjoint(&alternatives.features)
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        CapabilitySet {
            features: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for CapabilitySet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.features.extend(iter.into_iter().map(Into::into));
    }
}
