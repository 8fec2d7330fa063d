use sheetcodec::{DelimitedSource, Error, Pipeline, Sheet};
use std::path::PathBuf;

use crate::generate::load_config;

const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub input: Vec<PathBuf>,
    pub lang: Option<String>,
    pub json: bool,
    pub config: Option<PathBuf>,
}

pub fn run_view_command(options: ViewOptions) -> Result<(), Error> {
    let config = load_config(options.config.as_deref())?;
    let sheets = Pipeline::from_config(&config, &[]).parse(&DelimitedSource::new(&options.input))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&sheets)?);
        return Ok(());
    }

    if sheets.is_empty() {
        eprintln!("No sheets found");
        return Ok(());
    }

    for sheet in &sheets {
        print_sheet(sheet, options.lang.as_deref());
    }
    Ok(())
}

fn print_sheet(sheet: &Sheet, lang_filter: Option<&str>) {
    println!("\n=== Sheet {} ===", sheet.name());
    println!("Rows: {}", sheet.row_count());

    for (index, column) in sheet.columns().iter().enumerate() {
        if lang_filter.is_some_and(|lang| lang != column.language_code()) {
            continue;
        }
        let role = if index == 0 { " (source)" } else { "" };
        println!(
            "\n  [{}] {} / {}{}",
            column.language_code(),
            column.language(),
            column.language_name(),
            role
        );

        for string in column.strings() {
            if !string.has_key() {
                continue;
            }
            println!("    {} = {}", string.key(), preview(string.value()));
            if !string.comment().is_empty() {
                println!("      # {}", string.comment());
            }
        }
    }
}

fn preview(value: &str) -> String {
    match value.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}
