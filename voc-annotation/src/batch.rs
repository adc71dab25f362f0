//! Batch processing over annotation files.

use crate::{
    common::*,
    document::{AnnotationNormalizer, NormalizedDocument},
};

/// Expands the input paths into a list of annotation files.
///
/// Directories contribute their `*.xml` entries, without descending into
/// subdirectories. Other paths are kept as given.
pub fn collect_annotation_files<P>(inputs: &[P]) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
{
    let mut files = vec![];

    for input in inputs {
        let input = input.as_ref();

        if input.is_dir() {
            let dir = input
                .to_str()
                .ok_or_else(|| format_err!("non-UTF-8 path '{}'", input.display()))?;
            let pattern = Path::new(&glob::Pattern::escape(dir)).join("*.xml");
            let mut dir_files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
                .filter_ok(|path| path.is_file())
                .try_collect()?;
            dir_files.sort();

            debug!("found {} annotation files in '{}'", dir_files.len(), input.display());
            files.extend(dir_files);
        } else {
            files.push(input.to_owned());
        }
    }

    Ok(files)
}

/// Normalizes one annotation file in place.
///
/// The file is written back only if its content changed and `dry_run` is unset.
pub fn process_file<P>(
    normalizer: &AnnotationNormalizer,
    path: P,
    dry_run: bool,
) -> Result<NormalizedDocument>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to read '{}'", path.display()))?;
    let document = normalizer.normalize_document(&text);

    if document.modified && !dry_run {
        fs::write(path, &document.text)
            .with_context(|| format!("unable to write '{}'", path.display()))?;
    }

    Ok(document)
}

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files that were read and normalized.
    pub processed: usize,
    /// Files whose content changed.
    pub modified: usize,
    /// Total `<bndbox>` blocks across processed files.
    pub bndboxes: usize,
    pub failures: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Normalizes every file, logging failures and moving on to the next file.
pub fn process_files<P>(
    normalizer: &AnnotationNormalizer,
    paths: &[P],
    dry_run: bool,
) -> BatchReport
where
    P: AsRef<Path>,
{
    let mut report = BatchReport::default();

    for path in paths {
        let path = path.as_ref();

        match process_file(normalizer, path, dry_run) {
            Ok(document) => {
                report.processed += 1;
                report.bndboxes += document.bndboxes;
                if document.modified {
                    report.modified += 1;
                    info!("normalized '{}'", path.display());
                } else {
                    debug!("'{}' is already normalized", path.display());
                }
            }
            Err(err) => {
                error!("failed to process '{}': {:#}", path.display(), err);
                report.failures.push((path.to_owned(), err));
            }
        }
    }

    report
}
