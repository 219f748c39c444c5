// ABOUTME: Rendering context and per-render field values
// ABOUTME: Carries client, order, carrier, collaborator and portal plus category-specific inputs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Contextual values shared by every script in a sector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    pub client_name: Option<String>,
    pub order_number: Option<String>,
    pub carrier: Option<String>,
    pub collaborator: Option<String>,
    pub portal: Option<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn with_order_number(mut self, number: impl Into<String>) -> Self {
        self.order_number = Some(number.into());
        self
    }

    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }

    pub fn with_collaborator(mut self, collaborator: impl Into<String>) -> Self {
        self.collaborator = Some(collaborator.into());
        self
    }

    pub fn with_portal(mut self, portal: impl Into<String>) -> Self {
        self.portal = Some(portal.into());
        self
    }

    pub fn client_name(&self) -> Option<&str> {
        non_blank(&self.client_name)
    }

    pub fn order_number(&self) -> Option<&str> {
        non_blank(&self.order_number)
    }

    pub fn carrier(&self) -> Option<&str> {
        non_blank(&self.carrier)
    }

    pub fn collaborator(&self) -> Option<&str> {
        non_blank(&self.collaborator)
    }

    pub fn portal(&self) -> Option<&str> {
        non_blank(&self.portal)
    }
}

/// Placeholder name to user-entered value for a single render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value for `name` unless it is missing or whitespace only.
    pub fn get_non_blank(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
