//! Coordinating module for the read-extract-write pipeline.
//!
//! Each entity kind is independent: its sources and patches are read
//! concurrently, assembled, and written. A kind that cannot be read, patched
//! or written is recorded as an error in the report's [`Diagnostics`] and
//! leaves the other kinds running to completion.

use crate::config::Config;
use crate::diagnostics::{Diagnostics, Severity};
use crate::enums::EnumTable;
use crate::extract::{assemble_actions, assemble_events, assemble_game_values};
use crate::patch::{enum_overrides_from_json, Patches};
use crate::source::{read_dir_batch, read_file, SourceError, SourceProvider};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const ACTIONS_FILE: &str = "actions.json";
pub const EVENTS_FILE: &str = "events.json";
pub const GAME_VALUES_FILE: &str = "game_values.json";
/// Curated enum table in the patches directory.
pub const ENUMS_FILE: &str = "enums.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Actions,
    Events,
    GameValues,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Actions => "actions",
            EntityKind::Events => "events",
            EntityKind::GameValues => "game values",
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("invalid patch file {file}: {source}")]
    Patch {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// The file or path the failure concerns.
    pub fn subject(&self) -> String {
        match self {
            PipelineError::Source(e) => e.path().display().to_string(),
            PipelineError::Patch { file, .. } => file.clone(),
            PipelineError::Serialize { path, .. } | PipelineError::Write { path, .. } => {
                path.display().to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindReport {
    pub kind: EntityKind,
    pub entities: usize,
    pub icons: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub kinds: Vec<KindReport>,
    pub diagnostics: Diagnostics,
}

impl PipelineReport {
    pub fn kind(&self, kind: EntityKind) -> Option<&KindReport> {
        self.kinds.iter().find(|report| report.kind == kind)
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.kinds {
            writeln!(
                f,
                "{}: {} entities, {} icons",
                report.kind.label(),
                report.entities,
                report.icons
            )?;
        }
        for diagnostic in self.diagnostics.iter().filter(|d| d.severity == Severity::Error) {
            writeln!(f, "{diagnostic}")?;
        }
        write!(
            f,
            "{} errors, {} warnings",
            self.diagnostics.count(Severity::Error),
            self.diagnostics.count(Severity::Warn)
        )
    }
}

/// Output of one kind before it is folded into the run report.
struct KindOutcome {
    report: Option<KindReport>,
    diagnostics: Diagnostics,
}

impl KindOutcome {
    fn settle(
        kind: EntityKind,
        result: Result<KindReport, PipelineError>,
        mut diagnostics: Diagnostics,
    ) -> Self {
        let report = match result {
            Ok(report) => Some(report),
            Err(e) => {
                diagnostics.error(e.subject(), format!("{} extraction failed: {e}", kind.label()));
                None
            }
        };
        Self { report, diagnostics }
    }
}

/// Runs every selected kind concurrently and writes its collections.
///
/// `only` restricts the run to one kind; `None` runs all of them. Every kind
/// runs to the end whatever happens to the others, so the report always
/// covers the whole run.
pub async fn run_pipeline(
    config: &Config,
    sources: &dyn SourceProvider,
    patches: &dyn SourceProvider,
    only: Option<EntityKind>,
) -> PipelineReport {
    let selected = |kind: EntityKind| only.map_or(true, |only| only == kind);
    info!(?only, "Starting extraction pipeline");

    let (actions, events, game_values) = tokio::join!(
        async {
            if !selected(EntityKind::Actions) {
                return None;
            }
            let mut diagnostics = Diagnostics::new();
            let result = extract_actions(config, sources, patches, &mut diagnostics).await;
            Some(KindOutcome::settle(EntityKind::Actions, result, diagnostics))
        },
        async {
            if !selected(EntityKind::Events) {
                return None;
            }
            let mut diagnostics = Diagnostics::new();
            let result = extract_events(config, sources, patches, &mut diagnostics).await;
            Some(KindOutcome::settle(EntityKind::Events, result, diagnostics))
        },
        async {
            if !selected(EntityKind::GameValues) {
                return None;
            }
            let mut diagnostics = Diagnostics::new();
            let result = extract_game_values(config, sources, patches, &mut diagnostics).await;
            Some(KindOutcome::settle(EntityKind::GameValues, result, diagnostics))
        },
    );

    let mut report = PipelineReport::default();
    for outcome in [actions, events, game_values].into_iter().flatten() {
        if let Some(kind) = outcome.report {
            info!(
                kind = kind.kind.label(),
                entities = kind.entities,
                icons = kind.icons,
                "Extracted kind"
            );
            report.kinds.push(kind);
        }
        report.diagnostics.extend(outcome.diagnostics);
    }

    info!(
        errors = report.diagnostics.count(Severity::Error),
        warnings = report.diagnostics.count(Severity::Warn),
        "Pipeline finished"
    );
    report
}

async fn extract_actions(
    config: &Config,
    sources: &dyn SourceProvider,
    patches: &dyn SourceProvider,
    diagnostics: &mut Diagnostics,
) -> Result<KindReport, PipelineError> {
    let layout = &config.layout;
    let (action_files, menu_files, patch_text, enum_text) = tokio::try_join!(
        read_dir_batch(sources, &layout.actions_dir),
        read_dir_batch(sources, &layout.action_menus_dir),
        read_optional(patches, ACTIONS_FILE),
        read_optional(patches, ENUMS_FILE),
    )?;

    let action_patches = parse_patches(ACTIONS_FILE, patch_text, diagnostics)?;
    let enums = parse_enums(enum_text, diagnostics)?;

    let assembled = assemble_actions(&action_files, &menu_files, &action_patches, &enums);
    diagnostics.extend(assembled.diagnostics);

    let entities = assembled.entities.values().map(Vec::len).sum();
    write_json(&config.data_dir, ACTIONS_FILE, &assembled.entities).await?;
    write_json(&config.icons_dir, ACTIONS_FILE, &assembled.icons).await?;

    Ok(KindReport {
        kind: EntityKind::Actions,
        entities,
        icons: assembled.icons.len(),
    })
}

async fn extract_events(
    config: &Config,
    sources: &dyn SourceProvider,
    patches: &dyn SourceProvider,
    diagnostics: &mut Diagnostics,
) -> Result<KindReport, PipelineError> {
    let layout = &config.layout;
    let (triggers, menu_files, patch_text) = tokio::try_join!(
        read_file(sources, &layout.triggers_file),
        read_dir_batch(sources, &layout.trigger_menus_dir),
        read_optional(patches, EVENTS_FILE),
    )?;

    let event_patches = parse_patches(EVENTS_FILE, patch_text, diagnostics)?;

    let assembled = assemble_events(&triggers, &menu_files, &event_patches);
    diagnostics.extend(assembled.diagnostics);

    write_json(&config.data_dir, EVENTS_FILE, &assembled.entities).await?;
    write_json(&config.icons_dir, EVENTS_FILE, &assembled.icons).await?;

    Ok(KindReport {
        kind: EntityKind::Events,
        entities: assembled.entities.len(),
        icons: assembled.icons.len(),
    })
}

async fn extract_game_values(
    config: &Config,
    sources: &dyn SourceProvider,
    patches: &dyn SourceProvider,
    diagnostics: &mut Diagnostics,
) -> Result<KindReport, PipelineError> {
    let layout = &config.layout;
    let (values, menu, patch_text) = tokio::try_join!(
        read_file(sources, &layout.game_values_file),
        read_file(sources, &layout.game_values_menu_file),
        read_optional(patches, GAME_VALUES_FILE),
    )?;

    let value_patches = parse_patches(GAME_VALUES_FILE, patch_text, diagnostics)?;

    let assembled = assemble_game_values(&values, &menu, &value_patches);
    diagnostics.extend(assembled.diagnostics);

    write_json(&config.data_dir, GAME_VALUES_FILE, &assembled.entities).await?;
    write_json(&config.icons_dir, GAME_VALUES_FILE, &assembled.icons).await?;

    Ok(KindReport {
        kind: EntityKind::GameValues,
        entities: assembled.entities.len(),
        icons: assembled.icons.len(),
    })
}

/// A missing file is `None`; any other read failure is an error.
async fn read_optional(
    provider: &dyn SourceProvider,
    path: &str,
) -> Result<Option<String>, SourceError> {
    match provider.read(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn parse_patches(
    file: &str,
    text: Option<String>,
    diagnostics: &mut Diagnostics,
) -> Result<Patches, PipelineError> {
    let Some(text) = text else {
        diagnostics.warn(file, "patch file not found, applying no patches");
        return Ok(Patches::default());
    };
    let patches = Patches::from_json(&text).map_err(|source| PipelineError::Patch {
        file: file.to_string(),
        source,
    })?;
    debug!(file = file, count = patches.len(), "Loaded patches");
    Ok(patches)
}

fn parse_enums(text: Option<String>, diagnostics: &mut Diagnostics) -> Result<EnumTable, PipelineError> {
    let Some(text) = text else {
        diagnostics.warn(ENUMS_FILE, "enum table not found, using source enums only");
        return Ok(EnumTable::new());
    };
    enum_overrides_from_json(&text).map_err(|source| PipelineError::Patch {
        file: ENUMS_FILE.to_string(),
        source,
    })
}

/// Pretty JSON with a trailing newline, so reruns on the same input are byte-identical.
async fn write_json<T: Serialize>(dir: &Path, file: &str, value: &T) -> Result<(), PipelineError> {
    let path = dir.join(file);
    let mut json = serde_json::to_string_pretty(value).map_err(|source| PipelineError::Serialize {
        path: path.clone(),
        source,
    })?;
    json.push('\n');

    let write_error = |source| PipelineError::Write {
        path: path.clone(),
        source,
    };
    tokio::fs::create_dir_all(dir).await.map_err(write_error)?;
    tokio::fs::write(&path, json).await.map_err(write_error)?;
    info!(path = %path.display(), "Wrote collection");
    Ok(())
}
