// ABOUTME: Main library module for the scriptdesk support-message renderer
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod record;
pub mod reference;
pub mod report;
pub mod session;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use record::{BusinessClock, Clock, CsvLog, LogRow, Record, RecordSink};
pub use reference::{ListKind, ReferenceLists};
pub use report::{DashboardFilter, DashboardSummary};
pub use session::{Registration, Session};
pub use template::{FieldValues, RenderContext, RenderPolicy, Sector, TemplateCatalog, TemplateEngine};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
