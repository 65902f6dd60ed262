//! Organization listing for a single year

use anyhow::Result;
use std::io;
use std::path::Path;

use crate::backends::fetch::Endpoint;
use crate::core::filter::list_organizations;
use crate::core::paths::organizations_file_name;
use crate::core::prompt::Prompter;
use crate::core::util::parse_year;
use crate::flows::{ExportContext, Written};

/// Export every organization of `year`, one row each
pub fn export_organizations(
    ctx: &ExportContext,
    year: i32,
    output: Option<&Path>,
) -> Result<Written> {
    let organizations = ctx.source.load(Endpoint::Year(year))?;
    let label = year.to_string();
    let rows = list_organizations(&organizations, &label);

    let file_name = organizations_file_name(year, ctx.render.format);
    ctx.write_records(rows, &file_name, output)
}

/// Run the organizations command
pub fn run_organizations(
    ctx: &ExportContext,
    year: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let year = match year {
        Some(raw) => parse_year(raw)?,
        None => Prompter::new(io::stdin().lock(), io::stderr()).prompt_year()?,
    };

    let written = export_organizations(ctx, year, output)?;
    ctx.report(
        &written,
        &format!("{} file created:", ctx.render.format.label()),
    );
    Ok(())
}
