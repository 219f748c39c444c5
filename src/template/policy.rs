// ABOUTME: Render policy holding the configurable rule sets used by the renderer
// ABOUTME: Covers portal exception lists, fallback strings and the order sentence wording

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a portal is matched against a rule's list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "match", content = "portals", rename_all = "snake_case")]
pub enum PortalRule {
    /// Portal must equal one of the entries.
    Exact(BTreeSet<String>),
    /// Portal must contain one of the entries as a substring.
    Contains(Vec<String>),
    Never,
}

impl PortalRule {
    pub fn exact<I, S>(portals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PortalRule::Exact(portals.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, portal: &str) -> bool {
        let portal = portal.trim();
        if portal.is_empty() {
            return false;
        }
        match self {
            PortalRule::Exact(set) => set.contains(portal),
            PortalRule::Contains(needles) => needles
                .iter()
                .any(|needle| !needle.is_empty() && portal.contains(needle.as_str())),
            PortalRule::Never => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderPolicy {
    /// Portals whose greeting must end with an exclamation mark.
    pub exclamation_portals: BTreeSet<String>,

    /// Portals whose messages go out without the collaborator signature.
    pub signature_suppression: PortalRule,

    pub name_fallback: String,
    pub field_fallback: String,
    pub carrier_fallback: String,
    pub order_fallback: String,
    pub heading_order_fallback: String,

    /// Greeting prefix the exclamation rule looks for, followed by the client name.
    pub greeting: String,

    /// Sentence spliced after the first line; `{numero}` receives the order number.
    pub order_sentence: String,

    /// Bare reference line used by heading-style scripts.
    pub order_reference: String,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self {
            exclamation_portals: ["CNOVA", "CNOVA - EXTREMA", "PONTO", "CASAS BAHIA"]
                .into_iter()
                .map(String::from)
                .collect(),
            signature_suppression: PortalRule::exact([
                "AMAZON - EXTREMA",
                "AMAZON | ENGAGE LOG",
                "AMAZON DBA",
            ]),
            name_fallback: "(Nome do cliente)".to_string(),
            field_fallback: "................".to_string(),
            carrier_fallback: "-".to_string(),
            order_fallback: "...".to_string(),
            heading_order_fallback: "......".to_string(),
            greeting: "Olá, ".to_string(),
            order_sentence: "O atendimento é referente ao seu pedido de número {numero}..."
                .to_string(),
            order_reference: "O atendimento é referente ao seu pedido de número {numero}"
                .to_string(),
        }
    }
}

impl RenderPolicy {
    pub fn needs_exclamation(&self, portal: &str) -> bool {
        self.exclamation_portals.contains(portal.trim())
    }

    pub fn suppresses_signature(&self, portal: &str) -> bool {
        self.signature_suppression.matches(portal)
    }
}
