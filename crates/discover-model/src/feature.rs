use std::collections::HashMap;
use std::ops::Deref;

/// An unordered mapping from token to occurrence count. Every value is
/// strictly positive; there is exactly one entry per distinct token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureVector(HashMap<String, u32>);

impl FeatureVector {
    pub fn new() -> Self {
        FeatureVector(HashMap::new())
    }

    pub fn record(&mut self, token: impl Into<String>) {
        *self.0.entry(token.into()).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> HashMap<String, u32> {
        self.0
    }
}

impl Deref for FeatureVector {
    type Target = HashMap<String, u32>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<(String, u32)> for FeatureVector {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        FeatureVector(iter.into_iter().collect())
    }
}
