// ABOUTME: Explicitly owned per-sector agent session state
// ABOUTME: Previews the selected script and registers it to a record sink

pub mod error;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::record::{Clock, Record, RecordSink, EMPTY_MARKER};
use crate::template::{FieldValues, RenderContext, Sector, TemplateEngine};

pub use error::{Result, SessionError};

/// Choices that survive a registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    pub collaborator: Option<String>,
    pub portal: Option<String>,
    pub crm_reason: Option<String>,
    pub carrier: Option<String>,
    pub template_key: Option<String>,
}

/// Per-client inputs, cleared after a successful registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInputs {
    pub client_name: Option<String>,
    pub invoice_number: Option<String>,
    pub order_number: Option<String>,
    pub fields: FieldValues,
}

impl SessionInputs {
    pub fn is_empty(&self) -> bool {
        self.client_name.is_none()
            && self.invoice_number.is_none()
            && self.order_number.is_none()
            && self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of a successful register action.
#[derive(Debug, Clone)]
pub struct Registration {
    pub text: String,
    pub record: Record,
}

#[derive(Debug, Clone)]
pub struct Session {
    sector: Sector,
    pub selections: Selections,
    pub inputs: SessionInputs,
    last_registered: Option<String>,
}

fn text_or_marker(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(EMPTY_MARKER)
        .to_string()
}

impl Session {
    pub fn new(sector: Sector) -> Self {
        Self {
            sector,
            selections: Selections::default(),
            inputs: SessionInputs::default(),
            last_registered: None,
        }
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    /// Text from the last successful registration, kept for copying.
    pub fn last_registered(&self) -> Option<&str> {
        self.last_registered.as_deref()
    }

    pub fn context(&self) -> RenderContext {
        RenderContext {
            client_name: self.inputs.client_name.clone(),
            order_number: self.inputs.order_number.clone(),
            carrier: self.selections.carrier.clone(),
            collaborator: self.selections.collaborator.clone(),
            portal: self.selections.portal.clone(),
        }
    }

    fn template_key(&self) -> Result<&str> {
        self.selections
            .template_key
            .as_deref()
            .ok_or(SessionError::MissingSelection { what: "template" })
    }

    pub fn preview(&self, engine: &TemplateEngine) -> Result<String> {
        let key = self.template_key()?;
        Ok(engine.render(self.sector, key, &self.inputs.fields, &self.context())?)
    }

    /// Render, append one record, then clear the inputs. Inputs are kept when any step fails.
    pub async fn register(
        &mut self,
        engine: &TemplateEngine,
        sink: &dyn RecordSink,
        clock: &dyn Clock,
    ) -> Result<Registration> {
        let key = self.template_key()?.to_string();
        let collaborator = self
            .selections
            .collaborator
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(SessionError::MissingSelection {
                what: "collaborator",
            })?
            .to_string();

        let text = engine.render(self.sector, &key, &self.inputs.fields, &self.context())?;

        let record = Record {
            timestamp: clock.now(),
            sector: self.sector,
            collaborator,
            template_key: key,
            portal: text_or_marker(&self.selections.portal),
            invoice_number: self.inputs.invoice_number.clone().unwrap_or_default(),
            order_number: self.inputs.order_number.clone().unwrap_or_default(),
            crm_reason: text_or_marker(&self.selections.crm_reason),
            carrier: self.selections.carrier.clone(),
        };

        if let Err(e) = sink.append(&record).await {
            warn!("Registration failed, keeping inputs: {}", e);
            return Err(e.into());
        }

        info!(
            "Registered {} / {} for {}",
            record.sector, record.template_key, record.collaborator
        );

        self.inputs.clear();
        self.last_registered = Some(text.clone());

        Ok(Registration { text, record })
    }
}
