// ABOUTME: Template renderer turning a category, field values and context into final text
// ABOUTME: Punctuates the greeting, then resolves every placeholder in one pass around the order sentence

use tracing::debug;

use super::catalog::{
    CatalogSet, CategoryKind, OrderSentence, Sector, TemplateCatalog, TemplateSpec,
    FREE_TEXT_FIELD,
};
use super::context::{FieldValues, RenderContext};
use super::error::Result;
use super::placeholder::{self, CLIENT_NAME_SENTINEL, CLIENT_NAME_TOKENS};
use super::policy::RenderPolicy;

const ORDER_NUMBER_SLOT: &str = "{numero}";

#[derive(Debug, Clone)]
pub struct TemplateEngine {
    catalogs: CatalogSet,
    policy: RenderPolicy,
}

impl TemplateEngine {
    pub fn new(catalogs: CatalogSet, policy: RenderPolicy) -> Self {
        Self { catalogs, policy }
    }

    /// Engine over the embedded catalogs with the default policy
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(CatalogSet::builtin()?, RenderPolicy::default()))
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    pub fn catalog(&self, sector: Sector) -> &TemplateCatalog {
        self.catalogs.for_sector(sector)
    }

    pub fn policy(&self) -> &RenderPolicy {
        &self.policy
    }

    /// Render `key` from the sector's catalog. Unknown keys are the only failure.
    pub fn render(
        &self,
        sector: Sector,
        key: &str,
        fields: &FieldValues,
        context: &RenderContext,
    ) -> Result<String> {
        let spec = self.catalog(sector).get(key)?;
        Ok(self.render_spec(spec, fields, context))
    }

    pub fn render_spec(
        &self,
        spec: &TemplateSpec,
        fields: &FieldValues,
        context: &RenderContext,
    ) -> String {
        debug!("Rendering '{}' with {} field values", spec.key, fields.len());

        let raw = match spec.kind {
            CategoryKind::RegisterOnly => return String::new(),
            CategoryKind::FreeText => match fields.get_non_blank(FREE_TEXT_FIELD) {
                Some(message) => placeholder::replace(&spec.body, FREE_TEXT_FIELD, message),
                None => return String::new(),
            },
            CategoryKind::Scripted => {
                if spec.body.trim().is_empty() {
                    return String::new();
                }
                spec.body.clone()
            }
        };

        let raw = match context.portal() {
            Some(portal) if self.policy.needs_exclamation(portal) => self.punctuate_greeting(raw),
            _ => raw,
        };

        let values = Substitutions::new(&self.policy, spec, fields, context);
        let resolve = |text: &str| placeholder::substitute(text, |name| values.resolve(name));
        self.inject_order(&raw, spec.order_sentence, context.order_number(), resolve)
    }

    /// Adds `!` after the first greeting unless one is already there.
    fn punctuate_greeting(&self, text: String) -> String {
        let markers = std::iter::once(CLIENT_NAME_SENTINEL.to_string())
            .chain(CLIENT_NAME_TOKENS.iter().map(|name| placeholder::token(name)));
        let greeting = markers
            .filter_map(|marker| {
                let needle = format!("{}{}", self.policy.greeting, marker);
                text.find(&needle).map(|start| (start, start + needle.len()))
            })
            .min();
        let Some((_, end)) = greeting else {
            return text;
        };
        if text[end..].starts_with('!') {
            return text;
        }

        debug!("Adding exclamation after greeting");
        let mut out = String::with_capacity(text.len() + 1);
        out.push_str(&text[..end]);
        out.push('!');
        out.push_str(&text[end..]);
        out
    }

    /// Places the order sentence around the resolved pieces of the body.
    fn inject_order<F>(
        &self,
        text: &str,
        mode: OrderSentence,
        order: Option<&str>,
        resolve: F,
    ) -> String
    where
        F: Fn(&str) -> String,
    {
        match mode {
            OrderSentence::Omitted => resolve(text),
            OrderSentence::Spliced => {
                let number = order.unwrap_or(self.policy.order_fallback.as_str());
                let sentence = self.policy.order_sentence.replace(ORDER_NUMBER_SLOT, number);
                match text.split_once('\n') {
                    Some((first, rest)) => {
                        format!("{}\n\n{}\n{}", resolve(first), sentence, resolve(rest))
                    }
                    None => format!("{}\n\n{}", sentence, resolve(text)),
                }
            }
            OrderSentence::Heading => {
                let number = order.unwrap_or(self.policy.heading_order_fallback.as_str());
                let reference = self.policy.order_reference.replace(ORDER_NUMBER_SLOT, number);
                let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
                let rest = rest.trim();
                if rest.is_empty() {
                    format!("{}\n{}", resolve(first), reference)
                } else {
                    format!("{}\n{}\n\n{}", resolve(first), reference, resolve(rest))
                }
            }
        }
    }
}

/// Values each placeholder resolves to for one render.
struct Substitutions<'a> {
    policy: &'a RenderPolicy,
    spec: &'a TemplateSpec,
    fields: &'a FieldValues,
    name: &'a str,
    carrier: &'a str,
    signature: &'a str,
    portal: &'a str,
}

impl<'a> Substitutions<'a> {
    fn new(
        policy: &'a RenderPolicy,
        spec: &'a TemplateSpec,
        fields: &'a FieldValues,
        context: &'a RenderContext,
    ) -> Self {
        let suppressed = context
            .portal()
            .is_some_and(|portal| policy.suppresses_signature(portal));
        let signature = if suppressed {
            ""
        } else {
            context.collaborator().unwrap_or("")
        };

        Self {
            policy,
            spec,
            fields,
            name: context.client_name().unwrap_or(policy.name_fallback.as_str()),
            carrier: context.carrier().unwrap_or(policy.carrier_fallback.as_str()),
            signature,
            portal: context.portal().unwrap_or(policy.field_fallback.as_str()),
        }
    }

    fn resolve(&self, name: &str) -> Option<&'a str> {
        if CLIENT_NAME_TOKENS.contains(&name) {
            return Some(self.name);
        }
        match name {
            placeholder::CARRIER_TOKEN => Some(self.carrier),
            placeholder::COLLABORATOR_TOKEN => Some(self.signature),
            placeholder::PORTAL_TOKEN => Some(self.portal),
            _ if self.spec.field(name).is_some() => Some(
                self.fields
                    .get_non_blank(name)
                    .unwrap_or(self.policy.field_fallback.as_str()),
            ),
            _ if self.spec.is_literal(name) => None,
            _ => self.fields.get_non_blank(name),
        }
    }
}
