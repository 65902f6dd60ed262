//! Flows module - End-to-end exports
//!
//! Each flow collects its input, loads the organizations document, runs the
//! transformation and writes a single output artifact.
//!
//! Provides:
//! - organizations: per-year organization listing
//! - students: filtered student project export

pub mod organizations;
pub mod students;

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::backends::fetch::Source;
use crate::core::paths::resolve_output;
use crate::core::render::{RenderConfig, Renderer, Tabular};

/// Settings shared by every export
pub struct ExportContext {
    pub source: Source,
    pub render: RenderConfig,
    pub out_dir: PathBuf,
    /// Write rows to stdout instead of a file
    pub to_stdout: bool,
    pub quiet: bool,
}

/// Where the rows ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    Stdout { rows: usize },
    File { path: PathBuf, rows: usize },
}

impl Written {
    pub fn rows(&self) -> usize {
        match self {
            Written::Stdout { rows } | Written::File { rows, .. } => *rows,
        }
    }
}

impl ExportContext {
    /// Render `rows` to stdout or to the resolved output file
    pub fn write_records<T, I>(
        &self,
        rows: I,
        derived_name: &str,
        explicit: Option<&Path>,
    ) -> Result<Written>
    where
        T: Tabular,
        I: IntoIterator<Item = T>,
    {
        let renderer = Renderer::with_config(self.render);

        if self.to_stdout {
            let stdout = io::stdout();
            let rows = renderer.write_rows(rows, stdout.lock())?;
            tracing::info!(rows, "Wrote rows to stdout");
            return Ok(Written::Stdout { rows });
        }

        let path = resolve_output(&self.out_dir, explicit, derived_name);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        // Rows go to a sibling file first; `path` only appears once complete
        let partial = partial_path(&path);
        let file = File::create(&partial)
            .with_context(|| format!("Failed to create {}", partial.display()))?;
        let rows = match renderer.write_rows(rows, BufWriter::new(file)) {
            Ok(rows) => rows,
            Err(err) => {
                let _ = fs::remove_file(&partial);
                return Err(err).with_context(|| format!("Failed to write {}", path.display()));
            }
        };
        if let Err(err) = fs::rename(&partial, &path) {
            let _ = fs::remove_file(&partial);
            return Err(err).with_context(|| format!("Failed to write {}", path.display()));
        }

        tracing::info!(path = %path.display(), rows, "Wrote export");
        Ok(Written::File { path, rows })
    }

    /// Print the status line for a finished export
    pub fn report(&self, written: &Written, message: &str) {
        tracing::debug!(rows = written.rows(), "Export finished");
        if self.quiet {
            return;
        }
        if let Written::File { path, .. } = written {
            println!("{} {}", message.green().bold(), path.display());
        }
    }
}

/// Hidden sibling of `path` that receives rows while they are written
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}
