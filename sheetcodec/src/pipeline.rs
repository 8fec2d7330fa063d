//! The generation run: fetch grids, parse them, serialize each requested
//! catalog format and hand the documents to storage.
//!
//! Parsing and serializing are pure; only [`GridSource`] and
//! [`StorageAdapter`] touch the outside world. A run either stores every
//! document or returns the first error, whose [`crate::Error::stage`] says
//! which step failed.

use crate::{
    config::Config,
    error::Error,
    formats::{Document, FormatType},
    grid::{GridParser, RawSheet},
    layout::GridLayout,
    source::GridSource,
    storage::StorageAdapter,
    types::Sheet,
};

/// Where one format's document is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: FormatType,
    pub file_name: String,
    pub destination: Vec<String>,
}

impl OutputTarget {
    pub fn new(format: FormatType) -> Self {
        Self {
            format,
            file_name: format.file_name().to_string(),
            destination: format.destination(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_destination<S: Into<String>>(
        mut self,
        destination: impl IntoIterator<Item = S>,
    ) -> Self {
        self.destination = destination.into_iter().map(Into::into).collect();
        self
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Sheets that survived parsing (empty grids are not counted).
    pub sheets: usize,
    /// Stored documents as `(format, path)` pairs, path joined with `/`.
    pub documents: Vec<(FormatType, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    parser: GridParser,
    outputs: Vec<OutputTarget>,
}

impl Pipeline {
    pub fn new(layout: GridLayout) -> Self {
        Self {
            parser: GridParser::new(layout),
            outputs: Vec::new(),
        }
    }

    /// Builds a pipeline producing `formats` with the layout and output
    /// overrides from `config`.
    pub fn from_config(config: &Config, formats: &[FormatType]) -> Self {
        let mut pipeline = Self::new(config.layout.clone());
        for &format in formats {
            pipeline = pipeline.with_output(
                OutputTarget::new(format)
                    .with_file_name(config.file_name(format))
                    .with_destination(config.destination(format)),
            );
        }
        pipeline
    }

    pub fn with_output(mut self, target: OutputTarget) -> Self {
        self.outputs.push(target);
        self
    }

    /// Adds a format stored under its default name and destination.
    pub fn with_format(self, format: FormatType) -> Self {
        self.with_output(OutputTarget::new(format))
    }

    pub fn outputs(&self) -> &[OutputTarget] {
        &self.outputs
    }

    pub fn parser(&self) -> &GridParser {
        &self.parser
    }

    /// Fetches and parses every sheet of the source.
    pub fn parse<S: GridSource + ?Sized>(&self, source: &S) -> Result<Vec<Sheet>, Error> {
        let raw_sheets = source.fetch_sheets()?;
        tracing::debug!("Fetched {} sheet(s)", raw_sheets.len());
        self.parser.parse_all(raw_sheets)
    }

    /// Serializes every configured output, without storing anything.
    pub fn render(&self, sheets: &[Sheet]) -> Result<Vec<(OutputTarget, String)>, Error> {
        self.outputs
            .iter()
            .map(|target| {
                let content = generate(sheets, target.format)?.render()?;
                Ok::<_, Error>((target.clone(), content))
            })
            .collect()
    }

    /// Runs fetch, parse, serialize and store.
    ///
    /// All documents are serialized before the first one is stored, so a
    /// serialization failure stores nothing.
    pub fn run<S, T>(&self, source: &S, storage: &T) -> Result<RunReport, Error>
    where
        S: GridSource + ?Sized,
        T: StorageAdapter + ?Sized,
    {
        let sheets = self.parse(source)?;
        let rendered = self.render(&sheets)?;

        let mut report = RunReport {
            sheets: sheets.len(),
            documents: Vec::with_capacity(rendered.len()),
        };
        for (target, content) in rendered {
            storage.store(
                &content,
                &target.file_name,
                target.mime_type(),
                &target.destination,
            )?;
            let mut path = target.destination.clone();
            path.push(target.file_name.clone());
            report.documents.push((target.format, path.join("/")));
        }

        tracing::info!(
            "Generated {} document(s) from {} sheet(s)",
            report.documents.len(),
            report.sheets
        );
        Ok(report)
    }
}

/// Serializes parsed sheets into one document of `format`.
pub fn generate(sheets: &[Sheet], format: FormatType) -> Result<Document, Error> {
    format.serialize(sheets)
}

/// Parses raw grids with the default layout and renders them as `format`.
pub fn convert_grids(raw_sheets: Vec<RawSheet>, format: FormatType) -> Result<String, Error> {
    let sheets = GridParser::default().parse_all(raw_sheets)?;
    generate(&sheets, format)?.render()
}
