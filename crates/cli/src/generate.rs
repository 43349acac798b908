use crate::report;
use anyhow::{Context, Result};
use eventdoc_extractor::{is_csharp_path, Extractor};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one `generate` run
#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub generated: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
}

/// Document every source file, one CSV per event source.
///
/// Per-file problems are logged and counted; only failing to prepare the
/// output directory aborts the run.
pub fn run(
    extractor: &Extractor,
    project: &Path,
    output: &Path,
    sources: &[PathBuf],
    extended: bool,
) -> Result<GenerateSummary> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let mut summary = GenerateSummary::default();
    for source in sources {
        let file_path = project.join(source);
        if !file_path.is_file() {
            log::info!(
                "Skipping EventSource document generation, as there are no files found at: {}",
                file_path.display()
            );
            summary.skipped += 1;
            continue;
        }

        log::info!("Processing file: {}", file_path.display());
        if !is_csharp_path(&file_path) {
            log::debug!("{} does not have a .cs extension", file_path.display());
        }

        match document_file(extractor, &file_path, output, extended) {
            Ok(Some(path)) => summary.generated.push(path),
            Ok(None) => {
                log::info!("Skipping Non EventSource class at: {}", source.display());
                summary.skipped += 1;
            }
            Err(err) => {
                log::error!("Failed to document {}: {err:#}", file_path.display());
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn document_file(
    extractor: &Extractor,
    file_path: &Path,
    output: &Path,
    extended: bool,
) -> Result<Option<PathBuf>> {
    let Some(document) = extractor.extract_file(file_path)? else {
        return Ok(None);
    };

    log::info!(
        "Generating EventSource documentation for EventSource: {}",
        document.name
    );

    let output_path = output.join(format!("{}.csv", sanitize_file_stem(document.file_stem())));
    report::write_csv(&output_path, &document.records, extended)?;

    log::info!(
        "EventSource documentation generated at: {}",
        output_path.display()
    );
    Ok(Some(output_path))
}

/// Replace characters that cannot appear in a file name
fn sanitize_file_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
