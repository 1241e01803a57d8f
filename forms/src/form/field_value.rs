// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::{HashMap, hash_map},
          fmt::{Display, Formatter}};

use serde::{Deserialize, Serialize};

/// The current value of one input. Text inputs, selects, radios and checked checkboxes
/// hold [`FieldValue::Text`], an unchecked checkbox holds `Flag(false)`. The default
/// value is the empty string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self { FieldValue::Text(String::new()) }
}

impl FieldValue {
    /// `true` only for the empty string sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool { matches!(self, FieldValue::Text(it) if it.is_empty()) }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(it) => Some(it.as_str()),
            FieldValue::Flag(_) => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(it) => write!(f, "{it}"),
            FieldValue::Flag(it) => write!(f, "{it}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self { FieldValue::Text(value.to_string()) }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self { FieldValue::Text(value) }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self { FieldValue::Flag(value) }
}

/// Field name to [`FieldValue`].
///
/// The [`crate::ConnectedForm`] that owns one of these keeps every declared field name
/// present at all times.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValueMap {
    inner: HashMap<String, FieldValue>,
}

impl FieldValueMap {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Every name in `field_names` mapped to the empty string.
    #[must_use]
    pub fn with_declared_fields(field_names: &[String]) -> Self {
        field_names
            .iter()
            .map(|name| (name.clone(), FieldValue::default()))
            .collect()
    }

    /// Copy every value of `overrides` over `self`. Names that `overrides` doesn't list
    /// keep their current value, names that `self` doesn't have yet are added.
    pub fn merge(&mut self, overrides: &FieldValueMap) {
        for (name, value) in overrides {
            self.inner.insert(name.clone(), value.clone());
        }
    }

    /// Put back any name in `field_names` that is missing, as the empty string.
    pub fn fill_missing(&mut self, field_names: &[String]) {
        for name in field_names {
            self.inner.entry(name.clone()).or_default();
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> { self.inner.get(name) }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.inner.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> { self.inner.remove(name) }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool { self.inner.contains_key(name) }

    #[must_use]
    pub fn len(&self) -> usize { self.inner.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    pub fn iter(&self) -> hash_map::Iter<'_, String, FieldValue> { self.inner.iter() }
}

impl<'a> IntoIterator for &'a FieldValueMap {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = hash_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter { self.inner.iter() }
}

impl<K, V> FromIterator<(K, V)> for FieldValueMap
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FieldValueMap
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from(pairs: [(K, V); N]) -> Self { pairs.into_iter().collect() }
}
