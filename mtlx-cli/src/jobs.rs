//! Conversion jobs: which files to convert, where the results go, and running one job.

use mtlx_babel::convert::{convert_file, find_files, output_path_for, Direction};
use mtlx_babel::formats::json::SkippedEntry;
use mtlx_babel::{FormatError, JsonFormat};
use mtlx_config::MtlxJsonConfig;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// One input file and the file it converts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub direction: Direction,
}

impl Job {
    fn new(input: PathBuf, output_dir: Option<&Path>, direction: Direction) -> Self {
        let output = output_path_for(&input, output_dir, direction);
        Job {
            input,
            output,
            direction,
        }
    }
}

/// Nothing to convert; carries the extension that was looked for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No files found with extension \"{extension}\"")]
pub struct NoFilesFound {
    pub extension: String,
}

/// Collect the jobs for `input`.
///
/// A folder is searched recursively for `.json` files when `from_json` is set and for `.mtlx`
/// files otherwise. A single file is converted in the direction its own extension implies.
pub fn plan(
    input: &Path,
    output_dir: Option<&Path>,
    from_json: bool,
) -> Result<Vec<Job>, NoFilesFound> {
    if input.is_dir() {
        let direction = if from_json {
            Direction::JsonToXml
        } else {
            Direction::XmlToJson
        };
        let jobs: Vec<Job> = find_files(input, direction.source_extension())
            .into_iter()
            .map(|file| Job::new(file, output_dir, direction))
            .collect();
        if jobs.is_empty() {
            return Err(NoFilesFound {
                extension: direction.source_extension().to_string(),
            });
        }
        return Ok(jobs);
    }

    match Direction::from_path(input) {
        Some(direction) => Ok(vec![Job::new(input.to_path_buf(), output_dir, direction)]),
        None => Err(NoFilesFound {
            extension: input
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }),
    }
}

/// What running a job produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    /// The JSON held no elements, so no XML file was written.
    Empty,
}

/// Run one job. `skipped` counts the JSON entries the decoder left out.
///
/// Both formats come from the configured registry, chosen by the input and output extensions.
/// JSON without elements produces no XML file.
pub fn run(
    job: &Job,
    config: &MtlxJsonConfig,
    skipped: &Arc<AtomicUsize>,
) -> Result<Outcome, FormatError> {
    let counter = Arc::clone(skipped);
    let input = job.input.display().to_string();
    let read_options = config
        .json_read_options()
        .with_skip_callback(move |entry: &SkippedEntry| {
            counter.fetch_add(1, Ordering::Relaxed);
            warn!(
                file = %input,
                parent = %entry.parent,
                key = %entry.key,
                reason = ?entry.reason,
                "skipped JSON entry"
            );
        });
    let mut registry = config.format_registry();
    registry.register(JsonFormat::new(config.json_write_options(), read_options));

    let skip_empty = job.direction == Direction::JsonToXml;
    let written = convert_file(&registry, &job.input, &job.output, skip_empty)?;
    Ok(if written {
        Outcome::Written
    } else {
        Outcome::Empty
    })
}
