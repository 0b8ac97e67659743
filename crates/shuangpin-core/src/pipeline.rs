//! End-to-end run: sources → character table → rendered tables → target file.

use std::path::PathBuf;

use tracing::{debug_span, info};

use crate::aggregate::{AggregateError, Aggregator, FileStats};
use crate::emit::render;
use crate::initials::{InitialTable, InitialTableError};
use crate::settings::{Settings, SettingsError};
use crate::splice::{splice_file, SpliceError};
use crate::table::CharTable;
use crate::variant::{project, ScriptConverter, VariantError, ZhConverter};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Initials(#[from] InitialTableError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Variant(#[from] VariantError),
    #[error(transparent)]
    Splice(#[from] SpliceError),
}

/// Outcome of [`run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    pub files: Vec<(PathBuf, FileStats)>,
    pub tables: Vec<String>,
    /// Whether the target file was rewritten.
    pub changed: bool,
}

/// Tables rendered from the configured sources, before splicing.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub files: Vec<(PathBuf, FileStats)>,
    /// `(table name, lines)` in declared order.
    pub tables: Vec<(String, Vec<String>)>,
}

impl Rendered {
    /// All tables' lines back to back.
    pub fn lines(&self) -> Vec<String> {
        self.tables
            .iter()
            .flat_map(|(_, lines)| lines.iter().cloned())
            .collect()
    }
}

/// Aggregate every configured source file in order.
pub fn build_table(
    settings: &Settings,
    initials: &InitialTable,
) -> Result<(CharTable, Vec<(PathBuf, FileStats)>), PipelineError> {
    let _span = debug_span!("build_table").entered();
    let paths = settings.source_paths();
    let mut agg = Aggregator::new(initials);
    let stats = agg.add_files(&paths)?;
    let table = agg.finish();
    info!(
        "Aggregated {} glyph memberships from {} files",
        table.total(),
        paths.len()
    );
    Ok((table, paths.into_iter().zip(stats).collect()))
}

/// Aggregate and render every configured table without touching the target.
pub fn render_all(settings: &Settings) -> Result<Rendered, PipelineError> {
    let initials = InitialTable::new()?;

    // Bad profiles fail before any source is read.
    let converters = settings
        .tables
        .iter()
        .map(|t| t.converter.as_deref().map(ZhConverter::from_profile).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    let (table, files) = build_table(settings, &initials)?;

    let tables = settings
        .tables
        .iter()
        .zip(&converters)
        .map(|(t, conv)| {
            info!(
                "Rendering {} {}",
                t.name,
                conv.as_ref()
                    .map_or("without converter".to_string(), |c| format!(
                        "with converter {}",
                        c.profile()
                    ))
            );
            let converter = conv.as_ref().map(|c| c as &dyn ScriptConverter);
            let keys = project(&table, &initials, converter);
            (t.name.clone(), render(&t.name, &keys))
        })
        .collect();

    Ok(Rendered { files, tables })
}

/// Full run: render all tables and splice them into the target file.
pub fn run(settings: &Settings) -> Result<RunReport, PipelineError> {
    let rendered = render_all(settings)?;
    let target = &settings.target;
    let changed = splice_file(
        &target.path,
        &target.start_marker,
        &target.end_marker,
        &rendered.lines(),
    )?;
    Ok(RunReport {
        tables: rendered.tables.into_iter().map(|(name, _)| name).collect(),
        files: rendered.files,
        changed,
    })
}
