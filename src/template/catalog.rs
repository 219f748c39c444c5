// ABOUTME: Template catalogs: per-sector dictionaries of message categories with metadata
// ABOUTME: Loads the embedded YAML catalogs or replacement files and validates their structure

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

use super::error::{Result, TemplateError};
use super::placeholder;

/// Field slot holding the agent-typed body of a free-text category.
pub const FREE_TEXT_FIELD: &str = "mensagem";

const BUILTIN_LOGISTICS: &str = include_str!("../../templates/pendencias.yaml");
const BUILTIN_SERVICE: &str = include_str!("../../templates/sac.yaml");

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    /// Logistics-pending scripts
    Pendencia,
    /// Customer-service scripts
    Sac,
}

impl Sector {
    pub const ALL: [Sector; 2] = [Sector::Pendencia, Sector::Sac];

    /// Label written to the interaction log.
    pub fn label(&self) -> &'static str {
        match self {
            Sector::Pendencia => "Pendência",
            Sector::Sac => "SAC",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Pendência" | "Pendencia" | "pendencia" | "PENDÊNCIA" => Some(Sector::Pendencia),
            "SAC" | "sac" | "Sac" => Some(Sector::Sac),
            _ => None,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    #[default]
    Scripted,
    /// Logged without producing any text
    RegisterOnly,
    /// Body typed by the agent, catalog sign-off appended
    FreeText,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSentence {
    #[default]
    Spliced,
    #[serde(rename = "none")]
    Omitted,
    Heading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSlot {
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub optional: bool,
}

impl FieldSlot {
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub key: String,

    #[serde(default)]
    pub kind: CategoryKind,

    #[serde(default)]
    pub order_sentence: OrderSentence,

    #[serde(default)]
    pub fields: Vec<FieldSlot>,

    /// Placeholder names intentionally left in the rendered text.
    #[serde(default)]
    pub literals: Vec<String>,

    #[serde(default)]
    pub body: String,
}

impl TemplateSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSlot> {
        self.fields.iter().find(|slot| slot.name == name)
    }

    pub fn is_literal(&self, name: &str) -> bool {
        self.literals.iter().any(|l| l == name)
    }

    /// Tokens in the body that no substitution step or literal declaration covers.
    pub fn uncovered_tokens(&self) -> Vec<String> {
        placeholder::tokens(&self.body)
            .into_iter()
            .filter(|name| {
                !placeholder::is_builtin(name) && self.field(name).is_none() && !self.is_literal(name)
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| TemplateError::InvalidCategory {
            key: self.key.clone(),
            reason: reason.to_string(),
        };

        if self.key.trim().is_empty() {
            return Err(invalid("empty key"));
        }

        match self.kind {
            CategoryKind::RegisterOnly if !self.body.is_empty() => {
                Err(invalid("register-only categories must not have a body"))
            }
            CategoryKind::Scripted if self.body.trim().is_empty() => {
                Err(invalid("scripted categories need a body"))
            }
            CategoryKind::FreeText if placeholder::count(&self.body, FREE_TEXT_FIELD) == 0 => {
                Err(invalid("free-text body must contain {mensagem}"))
            }
            _ => Ok(()),
        }
    }
}

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDocument {
    pub sector: Sector,

    /// List scripted categories alphabetically ahead of the others in menus.
    #[serde(default)]
    pub sort_menu: bool,

    /// Body given to free-text categories that declare none.
    #[serde(default)]
    pub free_text_body: Option<String>,

    pub templates: Vec<TemplateSpec>,
}

/// Issue reported by [`TemplateCatalog::lint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogIssue {
    pub key: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    sector: Sector,
    templates: IndexMap<String, TemplateSpec>,
    menu: Vec<String>,
}

impl TemplateCatalog {
    /// Catalog compiled into the binary for `sector`.
    pub fn builtin(sector: Sector) -> Result<Self> {
        let source = match sector {
            Sector::Pendencia => BUILTIN_LOGISTICS,
            Sector::Sac => BUILTIN_SERVICE,
        };
        Self::from_yaml(source)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: TemplateDocument = serde_yaml::from_str(content)?;
        Self::from_document(document)
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading template catalog from {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_yaml(&content)
    }

    pub fn from_document(document: TemplateDocument) -> Result<Self> {
        let mut templates = IndexMap::new();

        for mut spec in document.templates {
            if spec.kind == CategoryKind::FreeText {
                if spec.body.is_empty() {
                    spec.body = document.free_text_body.clone().unwrap_or_default();
                }
                if spec.field(FREE_TEXT_FIELD).is_none() {
                    spec.fields.push(FieldSlot {
                        name: FREE_TEXT_FIELD.to_string(),
                        label: "Mensagem:".to_string(),
                        optional: false,
                    });
                }
            }

            spec.validate()?;

            if templates.contains_key(&spec.key) {
                return Err(TemplateError::DuplicateKey { key: spec.key });
            }
            templates.insert(spec.key.clone(), spec);
        }

        let menu = if document.sort_menu {
            let mut scripted: Vec<String> = templates
                .values()
                .filter(|s| s.kind == CategoryKind::Scripted)
                .map(|s| s.key.clone())
                .collect();
            scripted.sort();
            scripted.extend(
                templates
                    .values()
                    .filter(|s| s.kind != CategoryKind::Scripted)
                    .map(|s| s.key.clone()),
            );
            scripted
        } else {
            templates.keys().cloned().collect()
        };

        debug!(
            "Loaded {} templates for sector {}",
            templates.len(),
            document.sector
        );

        Ok(Self {
            sector: document.sector,
            templates,
            menu,
        })
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn get(&self, key: &str) -> Result<&TemplateSpec> {
        self.templates
            .get(key)
            .ok_or_else(|| TemplateError::InvalidTemplateKey {
                key: key.to_string(),
                sector: self.sector.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateSpec> {
        self.templates.values()
    }

    /// Keys in the order agents pick them from.
    pub fn menu(&self) -> &[String] {
        &self.menu
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Categories whose bodies carry tokens nothing will substitute.
    pub fn lint(&self) -> Vec<CatalogIssue> {
        self.templates
            .values()
            .filter_map(|spec| {
                let tokens = spec.uncovered_tokens();
                if tokens.is_empty() {
                    None
                } else {
                    Some(CatalogIssue {
                        key: spec.key.clone(),
                        tokens,
                    })
                }
            })
            .collect()
    }
}

/// The two disjoint dictionaries, one per sector.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    logistics: TemplateCatalog,
    service: TemplateCatalog,
}

impl CatalogSet {
    pub fn new(logistics: TemplateCatalog, service: TemplateCatalog) -> Result<Self> {
        for (catalog, expected) in [(&logistics, Sector::Pendencia), (&service, Sector::Sac)] {
            if catalog.sector() != expected {
                return Err(TemplateError::SectorMismatch {
                    expected: expected.to_string(),
                    found: catalog.sector().to_string(),
                });
            }
        }
        Ok(Self { logistics, service })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(
            TemplateCatalog::builtin(Sector::Pendencia)?,
            TemplateCatalog::builtin(Sector::Sac)?,
        )
    }

    /// Built-in catalogs, each optionally replaced by a file.
    pub async fn load(logistics: Option<&Path>, service: Option<&Path>) -> Result<Self> {
        let logistics = match logistics {
            Some(path) => TemplateCatalog::from_file(path).await?,
            None => TemplateCatalog::builtin(Sector::Pendencia)?,
        };
        let service = match service {
            Some(path) => TemplateCatalog::from_file(path).await?,
            None => TemplateCatalog::builtin(Sector::Sac)?,
        };
        Self::new(logistics, service)
    }

    pub fn for_sector(&self, sector: Sector) -> &TemplateCatalog {
        match sector {
            Sector::Pendencia => &self.logistics,
            Sector::Sac => &self.service,
        }
    }
}
