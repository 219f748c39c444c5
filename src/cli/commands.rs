// ABOUTME: Command implementations for the scriptdesk CLI
// ABOUTME: Handles template listing, rendering, registration, lists, reports, import and catalog checks

use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use super::args::{Args, RenderArgs};
use super::config::Config;
use crate::record::{BusinessClock, CsvLog};
use crate::reference::{ListKind, ReferenceLists};
use crate::report::{
    self, formatter_for, parse_filter_date, DashboardFilter, DashboardSummary, ReportFormat,
    SummaryFormatter,
};
use crate::session::Session;
use crate::template::{CategoryKind, OrderSentence, RenderContext, Sector, TemplateEngine};

/// List a sector's templates in menu order
pub fn list_templates(engine: &TemplateEngine, sector: Sector) -> Result<()> {
    let catalog = engine.catalog(sector);

    println!("{} templates ({}):", sector, catalog.len());
    for key in catalog.menu() {
        let spec = catalog.get(key)?;
        match spec.kind {
            CategoryKind::Scripted => println!("  {}", key),
            CategoryKind::RegisterOnly => println!("  {}  [register only]", key),
            CategoryKind::FreeText => println!("  {}  [free text]", key),
        }
    }

    Ok(())
}

/// Show a template's body and the fields it asks for
pub fn show_template(engine: &TemplateEngine, sector: Sector, key: &str) -> Result<()> {
    let spec = engine.catalog(sector).get(key)?;

    println!("Template: {}", spec.key);
    println!("Sector: {}", sector);
    let kind = match spec.kind {
        CategoryKind::Scripted => "scripted",
        CategoryKind::RegisterOnly => "register only",
        CategoryKind::FreeText => "free text",
    };
    println!("Kind: {}", kind);
    let order = match spec.order_sentence {
        OrderSentence::Spliced => "after greeting",
        OrderSentence::Heading => "under greeting",
        OrderSentence::Omitted => "none",
    };
    println!("Order sentence: {}", order);

    if !spec.fields.is_empty() {
        println!("Fields:");
        for slot in &spec.fields {
            let optional = if slot.optional { " (optional)" } else { "" };
            println!("  {:<28} {}{}", slot.name, slot.display_label(), optional);
        }
    }

    if !spec.body.is_empty() {
        println!();
        println!("{}", spec.body);
    }

    Ok(())
}

fn check_selections(reference: &ReferenceLists, render: &RenderArgs) {
    reference.check(
        ListKind::Collaborators,
        render.sector,
        render.collaborator.as_deref(),
    );
    reference.check(ListKind::Carriers, render.sector, render.carrier.as_deref());
    reference.check(ListKind::Portals, render.sector, render.portal.as_deref());
}

fn build_context(render: &RenderArgs) -> RenderContext {
    RenderContext {
        client_name: render.client.clone(),
        order_number: render.order.clone(),
        carrier: render.carrier.clone(),
        collaborator: render.collaborator.clone(),
        portal: render.portal.clone(),
    }
}

/// Render a template to stdout without logging it
pub fn render_template(
    engine: &TemplateEngine,
    reference: &ReferenceLists,
    render: &RenderArgs,
) -> Result<()> {
    check_selections(reference, render);

    let fields = Args::parse_fields(&render.fields)?;
    let text = engine
        .render(render.sector, &render.key, &fields, &build_context(render))
        .map_err(|e| anyhow::anyhow!("Failed to render template: {}", e))?;

    if text.is_empty() {
        info!("Template '{}' produces no message text", render.key);
    } else {
        println!("{}", text);
    }

    Ok(())
}

/// Render a template and append the interaction to the log
pub async fn register_interaction(
    engine: &TemplateEngine,
    reference: &ReferenceLists,
    render: &RenderArgs,
    invoice: Option<String>,
    crm_reason: Option<String>,
    config: &Config,
) -> Result<()> {
    check_selections(reference, render);
    reference.check(ListKind::CrmReasons, render.sector, crm_reason.as_deref());

    let mut session = Session::new(render.sector);
    session.selections.template_key = Some(render.key.clone());
    session.selections.collaborator = render.collaborator.clone();
    session.selections.portal = render.portal.clone();
    session.selections.carrier = render.carrier.clone();
    session.selections.crm_reason = crm_reason;
    session.inputs.client_name = render.client.clone();
    session.inputs.order_number = render.order.clone();
    session.inputs.invoice_number = invoice;
    session.inputs.fields = Args::parse_fields(&render.fields)?;

    let clock = BusinessClock::from_name(&config.timezone)
        .map_err(|e| anyhow::anyhow!("Invalid timezone: {}", e))?;
    let log = CsvLog::new(&config.log_path);

    let registration = session
        .register(engine, &log, &clock)
        .await
        .map_err(|e| anyhow::anyhow!("Registration failed: {}", e))?;

    if !registration.text.is_empty() {
        println!("{}", registration.text);
        println!();
    }
    println!(
        "✓ Registered '{}' ({}) at {} in {}",
        registration.record.template_key,
        registration.record.sector,
        registration.record.timestamp.format("%d/%m/%Y %H:%M:%S"),
        log.path().display()
    );

    Ok(())
}

/// Print one reference list, one value per line
pub fn print_list(reference: &ReferenceLists, list: ListKind, sector: Sector) -> Result<()> {
    let values = reference.list(list, sector);
    if values.is_empty() {
        warn!("The {} list is empty", list.label());
    }
    for value in values {
        println!("{}", value);
    }
    Ok(())
}

/// Summarise the interaction log, optionally exporting the filtered rows
pub async fn generate_report(
    from: Option<String>,
    to: Option<String>,
    sectors: Vec<Sector>,
    format: ReportFormat,
    export: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let log = CsvLog::new(&config.log_path);
    info!("Generating report from log: {}", log.path().display());

    let from = from.as_deref().map(parse_filter_date).transpose()?;
    let to = to.as_deref().map(parse_filter_date).transpose()?;
    let mut filter = DashboardFilter::new().with_range(from, to)?;
    for sector in sectors {
        filter = filter.with_sector(sector);
    }

    let rows = log
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read interaction log: {}", e))?;
    let summary = DashboardSummary::build(&rows, &filter);

    let output = formatter_for(format).format(&summary)?;
    print!("{}", output);
    if format == ReportFormat::Json {
        println!();
    }

    if let Some(destination) = export {
        let count = report::export_csv(&rows, &filter, &destination).await?;
        println!("✓ Exported {} rows to {}", count, destination.display());
    }

    info!("Report generation completed");
    Ok(())
}

/// Restore an older CSV backup into the log
pub async fn import_backup(source: PathBuf, force: bool, config: &Config) -> Result<()> {
    let log = CsvLog::new(&config.log_path);
    let count = report::import_backup(&source, &log, force)
        .await
        .map_err(|e| anyhow::anyhow!("Import failed: {}", e))?;

    println!(
        "✓ Imported {} rows from {} into {}",
        count,
        source.display(),
        log.path().display()
    );
    Ok(())
}

/// Report placeholders that no rendering step would substitute
pub fn check_catalogs(engine: &TemplateEngine) -> Result<()> {
    let mut problems = 0;

    for sector in Sector::ALL {
        let catalog = engine.catalog(sector);
        let issues = catalog.lint();

        if issues.is_empty() {
            println!("✓ {} catalog: {} templates", sector, catalog.len());
            continue;
        }

        for issue in &issues {
            println!(
                "✗ {} / {}: unsubstituted {}",
                sector,
                issue.key,
                issue.tokens.join(", ")
            );
        }
        problems += issues.len();
    }

    if problems > 0 {
        return Err(anyhow::anyhow!(
            "{} templates contain placeholders nothing fills",
            problems
        ));
    }

    Ok(())
}
