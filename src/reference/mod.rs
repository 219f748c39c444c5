// ABOUTME: Reference lists offered to agents: collaborators, carriers, portals and CRM reasons
// ABOUTME: Loaded from embedded YAML and used to flag values that are not on the lists

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::template::Sector;

pub use error::{ReferenceError, Result};

const BUILTIN_REFERENCE: &str = include_str!("../../templates/reference.yaml");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorLists {
    pub pendencia: Vec<String>,
    pub sac: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceLists {
    pub collaborators: CollaboratorLists,
    pub carriers: Vec<String>,
    pub portals: Vec<String>,
    pub crm_reasons: Vec<String>,
}

/// Which list a value was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListKind {
    Collaborators,
    Carriers,
    Portals,
    CrmReasons,
}

impl ListKind {
    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Collaborators => "collaborator",
            ListKind::Carriers => "carrier",
            ListKind::Portals => "portal",
            ListKind::CrmReasons => "CRM reason",
        }
    }
}

impl ReferenceLists {
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_REFERENCE)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut lists: ReferenceLists = serde_yaml::from_str(content)?;
        lists.normalize();
        Ok(lists)
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_yaml(&content)
    }

    /// Agents pick from sorted lists.
    fn normalize(&mut self) {
        for list in [
            &mut self.collaborators.pendencia,
            &mut self.collaborators.sac,
            &mut self.carriers,
            &mut self.portals,
            &mut self.crm_reasons,
        ] {
            list.sort();
            list.dedup();
        }
    }

    pub fn collaborators(&self, sector: Sector) -> &[String] {
        match sector {
            Sector::Pendencia => &self.collaborators.pendencia,
            Sector::Sac => &self.collaborators.sac,
        }
    }

    pub fn list(&self, kind: ListKind, sector: Sector) -> &[String] {
        match kind {
            ListKind::Collaborators => self.collaborators(sector),
            ListKind::Carriers => &self.carriers,
            ListKind::Portals => &self.portals,
            ListKind::CrmReasons => &self.crm_reasons,
        }
    }

    pub fn contains(&self, kind: ListKind, sector: Sector, value: &str) -> bool {
        self.list(kind, sector).iter().any(|v| v == value.trim())
    }

    /// Warns when a non-blank value is missing from its list. Returns whether it was found.
    pub fn check(&self, kind: ListKind, sector: Sector, value: Option<&str>) -> bool {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) if !self.contains(kind, sector, value) => {
                warn!("{} '{}' is not on the {} list", kind.label(), value, sector);
                false
            }
            _ => true,
        }
    }
}
