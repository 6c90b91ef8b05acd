//! The blame pipeline: resolve roots, extract, blame, aggregate.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::authorship::LineAuthorship;
use crate::discovery::resolve_paths;
use crate::error::{BlameError, Result};
use crate::extractor::extract;
use crate::filter::NodeFilter;
use crate::types::{BlameReport, FileBlame};

/// Knobs for a pipeline run
#[derive(Debug, Clone)]
pub struct BlameOptions {
    /// Extension of sources discovered under directory roots
    pub extension: String,
    /// Worker threads; 0 lets rayon decide
    pub jobs: usize,
}

impl Default for BlameOptions {
    fn default() -> Self {
        Self {
            extension: "py".to_string(),
            jobs: 0,
        }
    }
}

/// Attribute the declarations of a single file.
///
/// Assumes the file does not change between reading it and blaming it;
/// line numbers from the two are not cross-checked.
pub fn blame_file(path: &Path, filter: &NodeFilter, provider: &dyn LineAuthorship) -> FileBlame {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("cannot read {}: {}", path.display(), e);
            return FileBlame::new();
        }
    };

    let spans = extract(&content, filter);
    if spans.is_empty() {
        debug!("{}: no matching declarations", path.display());
        return FileBlame::new();
    }

    let authors = provider.authors_for(path);
    if authors.is_empty() {
        debug!("{}: no authorship available", path.display());
    }
    aggregate(&spans, &authors)
}

/// Run the pipeline with relative roots resolved against the current directory.
pub fn blame(
    roots: &[PathBuf],
    filter: &NodeFilter,
    provider: &dyn LineAuthorship,
    options: &BlameOptions,
) -> Result<BlameReport> {
    let cwd = std::env::current_dir()?;
    blame_in(&cwd, roots, filter, provider, options)
}

/// Run the pipeline with relative roots resolved against `base`.
///
/// Every resolved file gets a key in the report, even when nothing in it
/// could be attributed. Output order does not depend on `options.jobs`.
pub fn blame_in(
    base: &Path,
    roots: &[PathBuf],
    filter: &NodeFilter,
    provider: &dyn LineAuthorship,
    options: &BlameOptions,
) -> Result<BlameReport> {
    let files = resolve_paths(roots, &options.extension, base)?;
    info!("blaming {} files", files.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| BlameError::Internal(format!("failed to start worker pool: {}", e)))?;

    let per_file: Vec<FileBlame> = pool.install(|| {
        files
            .par_iter()
            .map(|path| blame_file(path, filter, provider))
            .collect()
    });

    let mut report = BlameReport::new();
    for (path, file_blame) in files.iter().zip(per_file) {
        report.insert(path.to_string_lossy().into_owned(), file_blame);
    }

    let attributed: usize = report.values().map(|f| f.len()).sum();
    info!("attributed {} declarations", attributed);
    Ok(report)
}
