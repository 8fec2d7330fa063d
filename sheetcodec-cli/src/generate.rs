use sheetcodec::{
    Config, DelimitedSource, Error, FileSystemStorage, FormatType, MemoryStorage, Pipeline,
    config::DEFAULT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: Vec<PathBuf>,
    pub output: PathBuf,
    pub formats: Vec<FormatType>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
}

/// Loads the explicit config file, or `sheetcodec.toml` from the working
/// directory when it exists.
pub fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            Config::load(path)
        }
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            tracing::debug!("Loading config from ./{}", DEFAULT_CONFIG_FILE);
            Config::load(DEFAULT_CONFIG_FILE)
        }
        None => {
            tracing::debug!("No config file, using the default layout");
            Ok(Config::default())
        }
    }
}

pub fn run_generate_command(options: GenerateOptions) -> Result<(), Error> {
    let config = load_config(options.config.as_deref())?;
    let pipeline = Pipeline::from_config(&config, &options.formats);
    let source = DelimitedSource::new(&options.input);

    if options.dry_run {
        tracing::info!("Dry run, nothing is written under {}", options.output.display());
        let storage = MemoryStorage::new();
        pipeline.run(&source, &storage)?;
        for document in storage.documents() {
            println!("==> {} ({}) <==", document.path(), document.mime_type);
            print!("{}", document.content);
        }
        return Ok(());
    }

    let storage = FileSystemStorage::new(&options.output);
    let report = pipeline.run(&source, &storage)?;
    println!(
        "✅ Generated {} catalog(s) from {} sheet(s)",
        report.documents.len(),
        report.sheets
    );
    for (format, path) in &report.documents {
        println!("  {} → {}", format, options.output.join(path).display());
    }
    Ok(())
}
