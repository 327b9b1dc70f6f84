//! End-to-end deck generation: content table in, `.pptx` file out.
use crate::common::{Error, Result};
use crate::deck::assemble::assemble;
use crate::deck::content::ContentTable;
use crate::ooxml::metadata::APPLICATION_NAME;
use crate::ooxml::pptx::{MutablePresentation, TITLE_AND_CONTENT};
use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name the deck is written to unless told otherwise.
pub const DEFAULT_OUTPUT: &str = "Spring_Boot_3_Presentation.pptx";

/// Document title used when the content table has none.
pub const DEFAULT_TITLE: &str = "PowerPoint Presentation";

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Fail with [`Error::OutputExists`] and leave the file alone.
    Refuse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub output: PathBuf,
    pub layout_index: usize,
    pub overwrite: OverwritePolicy,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            layout_index: TITLE_AND_CONTENT,
            overwrite: OverwritePolicy::default(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub slide_count: usize,
    pub bytes_written: usize,
    /// Slide titles in slide order
    pub slide_titles: Vec<String>,
}

/// The step a generation run was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadingContent,
    Assembling,
    Saving,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::LoadingContent => "loading content",
            Stage::Assembling => "assembling",
            Stage::Saving => "saving",
        })
    }
}

/// A failed generation run.
#[derive(Error, Debug)]
#[error("generation failed while {stage}: {source}")]
pub struct GenerationError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

impl GenerationError {
    pub fn new(stage: Stage, source: Error) -> Self {
        Self { stage, source }
    }
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> std::result::Result<T, GenerationError>;
}

impl<T, E: Into<Error>> AtStage<T> for std::result::Result<T, E> {
    fn at(self, stage: Stage) -> std::result::Result<T, GenerationError> {
        self.map_err(|e| GenerationError::new(stage, e.into()))
    }
}

/// Load the content table from `content`, or use the built-in table, then
/// generate.
pub fn generate_from(
    content: Option<&Path>,
    options: &GenerateOptions,
) -> std::result::Result<GenerationReport, GenerationError> {
    let table = match content {
        Some(path) => ContentTable::load(path),
        None => ContentTable::builtin(),
    }
    .at(Stage::LoadingContent)?;

    generate(&table, options)
}

/// Build a deck from `table` and write it to `options.output`.
///
/// The package is fully serialized before the output file is opened, so an
/// assembly or serialization failure never leaves a partial file behind.
pub fn generate(
    table: &ContentTable,
    options: &GenerateOptions,
) -> std::result::Result<GenerationReport, GenerationError> {
    let mut pres = MutablePresentation::new();
    set_core_properties(&mut pres, table);

    assemble(table, &mut pres, options.layout_index).at(Stage::Assembling)?;

    let bytes = pres.to_bytes().at(Stage::Saving)?;
    write_output(&options.output, &bytes, options.overwrite).at(Stage::Saving)?;

    log::info!(
        "Saved {} slides to {} ({} bytes)",
        pres.slide_count(),
        options.output.display(),
        bytes.len()
    );

    Ok(GenerationReport {
        output: options.output.clone(),
        slide_count: pres.slide_count(),
        bytes_written: bytes.len(),
        slide_titles: table.iter().map(|entry| entry.title.clone()).collect(),
    })
}

fn set_core_properties(pres: &mut MutablePresentation, table: &ContentTable) {
    let now = Utc::now();
    let props = pres.core_properties_mut();
    props.title = Some(
        table
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
    );
    props.last_modified_by = Some(APPLICATION_NAME.to_string());
    props.revision = Some(1);
    props.created = Some(now);
    props.modified = Some(now);
}

fn write_output(path: &Path, bytes: &[u8], policy: OverwritePolicy) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    match policy {
        OverwritePolicy::Overwrite => {
            options.create(true).truncate(true);
        },
        OverwritePolicy::Refuse => {
            options.create_new(true);
        },
    }

    let mut file = options.open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => Error::OutputExists(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::content::SlideContent;
    use crate::ooxml::pptx::Package;
    use tempfile::TempDir;

    fn options_in(dir: &TempDir) -> GenerateOptions {
        GenerateOptions {
            output: dir.path().join(DEFAULT_OUTPUT),
            ..GenerateOptions::default()
        }
    }

    #[test]
    fn test_default_options() {
        let options = GenerateOptions::default();
        assert_eq!(options.output, PathBuf::from("Spring_Boot_3_Presentation.pptx"));
        assert_eq!(options.layout_index, 1);
        assert_eq!(options.overwrite, OverwritePolicy::Overwrite);
    }

    #[test]
    fn test_generate_sets_core_properties() {
        let dir = TempDir::new().unwrap();
        let options = options_in(&dir);
        let table = ContentTable::new(vec![SlideContent::new("Only", "body")]);

        let report = generate(&table, &options).unwrap();
        assert_eq!(report.slide_count, 1);
        assert_eq!(report.slide_titles, ["Only"]);
        assert_eq!(
            report.bytes_written as u64,
            std::fs::metadata(&options.output).unwrap().len()
        );

        let pkg = Package::open(&options.output).unwrap();
        let props = pkg.presentation().unwrap().core_properties().unwrap();
        assert_eq!(props.title.as_deref(), Some(DEFAULT_TITLE));
        assert_eq!(props.last_modified_by.as_deref(), Some("slidesmith"));
        assert_eq!(props.revision, Some(1));
        assert!(props.created.is_some());
        assert_eq!(props.created, props.modified);
    }

    #[test]
    fn test_refuse_existing_output() {
        let dir = TempDir::new().unwrap();
        let options = GenerateOptions {
            overwrite: OverwritePolicy::Refuse,
            ..options_in(&dir)
        };
        std::fs::write(&options.output, b"keep me").unwrap();

        let err = generate(&ContentTable::builtin().unwrap(), &options).unwrap_err();
        assert_eq!(err.stage, Stage::Saving);
        assert!(matches!(err.source, Error::OutputExists(_)));
        assert_eq!(std::fs::read(&options.output).unwrap(), b"keep me");
    }

    #[test]
    fn test_assembly_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let options = GenerateOptions {
            layout_index: 99,
            ..options_in(&dir)
        };

        let err = generate(&ContentTable::builtin().unwrap(), &options).unwrap_err();
        assert_eq!(err.stage, Stage::Assembling);
        assert!(!options.output.exists());
    }

    #[test]
    fn test_missing_content_file() {
        let dir = TempDir::new().unwrap();
        let options = options_in(&dir);
        let missing = dir.path().join("missing.yaml");

        let err = generate_from(Some(&missing), &options).unwrap_err();
        assert_eq!(err.stage, Stage::LoadingContent);
        assert!(err.to_string().starts_with("generation failed while loading content: "));
    }

    #[test]
    fn test_error_message() {
        let err = GenerationError::new(Stage::Saving, Error::OutputExists(PathBuf::from("deck.pptx")));
        assert_eq!(
            err.to_string(),
            "generation failed while saving: Output file already exists: deck.pptx"
        );
    }
}
