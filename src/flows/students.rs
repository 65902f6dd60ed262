//! Filtered student project export across all years

use anyhow::Result;
use std::io;
use std::path::Path;

use crate::backends::fetch::Endpoint;
use crate::core::filter::{flatten, FilterCriteria};
use crate::core::paths::students_file_name;
use crate::core::prompt::{merge_criteria, Prompter};
use crate::flows::{ExportContext, Written};

/// Export one row per project accepted by `criteria`
pub fn export_students(
    ctx: &ExportContext,
    criteria: &FilterCriteria,
    output: Option<&Path>,
) -> Result<Written> {
    let organizations = ctx.source.load(Endpoint::All)?;
    if criteria.is_empty() {
        tracing::debug!("No filters set, exporting every project");
    } else {
        tracing::debug!(?criteria, "Flattening student projects");
    }
    let rows = flatten(&organizations, criteria);

    let file_name = students_file_name(criteria, ctx.render.format);
    ctx.write_records(rows, &file_name, output)
}

/// Run the students command
pub fn run_students(
    ctx: &ExportContext,
    criteria: FilterCriteria,
    interactive: bool,
    output: Option<&Path>,
) -> Result<()> {
    let criteria = if interactive {
        let prompted = Prompter::new(io::stdin().lock(), io::stderr()).prompt_filters()?;
        merge_criteria(criteria, prompted)
    } else {
        criteria
    };

    let written = export_students(ctx, &criteria, output)?;
    ctx.report(
        &written,
        &format!("Filtered {} created:", ctx.render.format.label()),
    );
    Ok(())
}
