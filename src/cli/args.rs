// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for scriptdesk

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::reference::ListKind;
use crate::report::ReportFormat;
use crate::template::{FieldValues, Sector};

#[derive(Parser)]
#[command(name = "scriptdesk")]
#[command(about = "Render canned customer-support messages and keep the interaction log")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List a sector's templates in menu order
    Templates {
        #[arg(short, long, value_enum, default_value = "pendencia", help = "Template sector")]
        sector: Sector,
    },

    /// Show a template's raw body and field slots
    Show {
        #[arg(help = "Template key, e.g. \"AUSENTE\"")]
        key: String,

        #[arg(short, long, value_enum, default_value = "pendencia", help = "Template sector")]
        sector: Sector,
    },

    /// Render a template without logging it
    Render(RenderArgs),

    /// Render a template and append the interaction to the log
    Register {
        #[command(flatten)]
        render: RenderArgs,

        #[arg(long, help = "Invoice number (Nota Fiscal)")]
        invoice: Option<String>,

        #[arg(long, help = "CRM reason")]
        crm_reason: Option<String>,
    },

    /// Print a reference list
    Lists {
        #[arg(value_enum, help = "List to print")]
        list: ListKind,

        #[arg(short, long, value_enum, default_value = "pendencia", help = "Sector for the collaborator list")]
        sector: Sector,
    },

    /// Summarise the interaction log
    Report {
        #[arg(long, help = "First day to include (dd/mm/YYYY or YYYY-mm-dd)")]
        from: Option<String>,

        #[arg(long, help = "Last day to include (dd/mm/YYYY or YYYY-mm-dd)")]
        to: Option<String>,

        #[arg(short, long, value_enum, help = "Only include these sectors")]
        sector: Vec<Sector>,

        #[arg(short, long, value_enum, default_value = "text", help = "Summary format")]
        format: ReportFormat,

        #[arg(long, help = "Also export the filtered rows to this CSV file")]
        export: Option<PathBuf>,
    },

    /// Restore an older CSV backup into the log
    Import {
        #[arg(help = "Backup CSV file")]
        source: PathBuf,

        #[arg(long, help = "Import even when the log already has rows")]
        force: bool,
    },

    /// Check the catalogs for placeholders nothing substitutes
    Check,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(help = "Template key, e.g. \"AUSENTE\"")]
    pub key: String,

    #[arg(short, long, value_enum, default_value = "pendencia", help = "Template sector")]
    pub sector: Sector,

    #[arg(long, help = "Client name")]
    pub client: Option<String>,

    #[arg(long, help = "Order number")]
    pub order: Option<String>,

    #[arg(long, help = "Carrier")]
    pub carrier: Option<String>,

    #[arg(long, help = "Collaborator signing the message")]
    pub collaborator: Option<String>,

    #[arg(long, help = "Sales portal")]
    pub portal: Option<String>,

    #[arg(
        short = 'F',
        long = "field",
        help = "Template field value (name=value)"
    )]
    pub fields: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse field values from name=value format
    pub fn parse_fields(fields: &[String]) -> anyhow::Result<FieldValues> {
        let mut values = FieldValues::new();

        for field in fields {
            if let Some((name, value)) = field.split_once('=') {
                let name = name.trim();
                if name.is_empty() {
                    return Err(anyhow::anyhow!("Empty field name in '{}'", field));
                }
                values.set(name, value);
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid field format '{}'. Expected 'name=value'",
                    field
                ));
            }
        }

        Ok(values)
    }
}
