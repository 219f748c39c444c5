// ABOUTME: Template module for canned support messages
// ABOUTME: Provides catalogs, render policy, context types and the renderer

pub mod catalog;
pub mod context;
pub mod engine;
pub mod error;
pub mod placeholder;
pub mod policy;

pub use catalog::{
    CatalogIssue, CatalogSet, CategoryKind, FieldSlot, OrderSentence, Sector, TemplateCatalog,
    TemplateDocument, TemplateSpec, FREE_TEXT_FIELD,
};
pub use context::{FieldValues, RenderContext};
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
pub use policy::{PortalRule, RenderPolicy};
