use std::path::{Path, PathBuf};
use std::process;

use tracing::info;

use shuangpin_core::pipeline;
use shuangpin_core::settings::{Settings, SettingsError};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Flags shared by `build` and `render`.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub config: Option<&'a str>,
    pub source_dir: Option<&'a str>,
    pub target: Option<&'a str>,
}

/// Settings from `--config` (or the built-in defaults), with command-line
/// overrides applied.
pub fn load_settings(overrides: &Overrides<'_>) -> Result<Settings, SettingsError> {
    let mut settings = match overrides.config {
        Some(path) => Settings::load(Path::new(path))?,
        None => Settings::defaults()?,
    };
    if let Some(dir) = overrides.source_dir {
        settings.sources.base_dir = PathBuf::from(dir);
    }
    if let Some(target) = overrides.target {
        settings.target.path = PathBuf::from(target);
    }
    Ok(settings)
}

pub fn build(overrides: &Overrides<'_>) {
    let settings = die!(load_settings(overrides), "Error loading settings: {}");
    info!("Target: {}", settings.target.path.display());

    let report = die!(pipeline::run(&settings), "Error: {}");
    let records: usize = report.files.iter().map(|(_, s)| s.records).sum();
    if report.changed {
        eprintln!(
            "Wrote {} table(s) from {} records to {}",
            report.tables.len(),
            records,
            settings.target.path.display()
        );
    } else {
        eprintln!("{} is up to date", settings.target.path.display());
    }
}

pub fn render(overrides: &Overrides<'_>) {
    let settings = die!(load_settings(overrides), "Error loading settings: {}");
    let rendered = die!(pipeline::render_all(&settings), "Error: {}");
    for line in rendered.lines() {
        println!("{line}");
    }
}
