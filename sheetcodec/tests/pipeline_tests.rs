use indoc::indoc;
use sheetcodec::formats::{AndroidXmlFormat, StringCatalogFormat};
use sheetcodec::traits::{CatalogReader, CatalogSerializer};
use sheetcodec::{
    DelimitedSource, FileSystemStorage, FormatType, GridLayout, GridParser, MemorySource,
    MemoryStorage, Pipeline, RawSheet, Stage, convert_grids,
};
use std::fs;

fn header_rows(codes: &[&str]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![String::new()]; 6];
    for code in codes {
        rows[0].push(format!("Language {}", code));
        rows[1].push(code.to_string());
        rows[2].push(format!("Language {} (long)", code));
        for row in rows.iter_mut().skip(3) {
            row.push(String::new());
        }
    }
    rows
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

fn well_formed_sheet() -> RawSheet {
    let mut rows = header_rows(&["en", "fr"]);
    rows.push(row(&["", "title", "Titre"]));
    rows.push(row(&["", "subtitle", "Sous-titre"]));
    rows.push(row(&["", "footer", "Pied de page"]));
    RawSheet::new("Main", rows)
}

#[test]
fn test_well_formed_grid_produces_three_entries_per_format() {
    let sheets = GridParser::default()
        .parse_all(vec![well_formed_sheet()])
        .unwrap();

    let android = AndroidXmlFormat::from_sheets(&sheets).unwrap();
    assert_eq!(android.strings.len(), 3);
    for entry in &android.strings {
        assert_eq!(entry.translations.len(), 1);
        assert_eq!(entry.translations[0].qualifier, "locale/fr");
    }

    let catalog = StringCatalogFormat::from_sheets(&sheets).unwrap();
    assert_eq!(catalog.strings.len(), 3);
    for item in catalog.strings.values() {
        assert_eq!(item.localizations.len(), 1);
        assert!(item.localizations.contains_key("fr"));
    }
}

#[test]
fn test_empty_grid_contributes_no_sheet() {
    let sheets = GridParser::default()
        .parse_all(vec![RawSheet::new("Nothing", Vec::new()), well_formed_sheet()])
        .unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].name(), "Main");

    let xml = convert_grids(vec![RawSheet::new("Nothing", Vec::new())], FormatType::AndroidXml)
        .unwrap();
    assert!(!xml.contains("<string"));
}

#[test]
fn test_overflow_rows_are_excluded_from_both_catalogs() {
    // Keys come from column 2, which ends a row before column 1.
    let layout = GridLayout::new().with_key_source_column(2);
    let mut rows = header_rows(&["de", "en"]);
    rows.push(row(&["", "Eins", "one"]));
    rows.push(row(&["", "Zwei"]));

    let sheets = GridParser::new(layout)
        .parse_all(vec![RawSheet::new("Ragged", rows)])
        .unwrap();
    let de = &sheets[0].columns()[0];
    assert_eq!(de.strings()[1].key(), "");
    assert_eq!(de.strings()[1].value(), "Zwei");

    let android = AndroidXmlFormat::from_sheets(&sheets).unwrap();
    assert_eq!(android.strings.len(), 1);
    assert!(!android.render().unwrap().contains("Zwei"));

    let catalog = StringCatalogFormat::from_sheets(&sheets).unwrap();
    assert_eq!(catalog.strings.keys().collect::<Vec<_>>(), vec!["one"]);
}

#[test]
fn test_comment_is_attached_once_across_languages() {
    let mut rows = header_rows(&["en", "fr", "de", "es"]);
    rows.push(row(&["Button on the home screen", "start", "Démarrer", "Start", "Iniciar"]));
    rows.push(row(&["", "stop", "Arrêter", "Stopp", "Detener"]));
    let sheets = GridParser::default()
        .parse_all(vec![RawSheet::new("Main", rows)])
        .unwrap();

    let catalog = StringCatalogFormat::from_sheets(&sheets).unwrap();
    let start = catalog.get("start").unwrap();
    assert_eq!(start.comment.as_deref(), Some("Button on the home screen"));
    assert_eq!(start.localizations.len(), 3);

    let json = catalog.render().unwrap();
    assert_eq!(json.matches("Button on the home screen").count(), 1);
}

#[test]
fn test_comment_marker_rows_never_become_translations() {
    let mut rows = header_rows(&["en", "fr"]);
    rows.push(row(&["", "// Section: Settings", "// Section : Réglages"]));
    rows.push(row(&["", "volume", "// TODO"]));
    rows.push(row(&["", "brightness", "Luminosité"]));
    rows.push(row(&["", "", ""]));
    let sheets = GridParser::default()
        .parse_all(vec![RawSheet::new("Settings", rows)])
        .unwrap();

    let android = AndroidXmlFormat::from_sheets(&sheets).unwrap();
    assert!(android.find("// Section: Settings").is_none());
    assert!(android.find("volume").unwrap().translations.is_empty());
    assert_eq!(
        android.find("brightness").unwrap().translation("fr"),
        Some("Luminosité")
    );

    let catalog = StringCatalogFormat::from_sheets(&sheets).unwrap();
    assert!(catalog.get("volume").unwrap().localizations.is_empty());
    assert!(catalog.get("// Section: Settings").unwrap().localizations.is_empty());
}

#[test]
fn test_two_sheets_share_one_catalog() {
    let mut onboarding = header_rows(&["en", "fr"]);
    onboarding.push(row(&["", "next", "Suivant"]));
    onboarding.push(row(&["", "skip", "Passer"]));
    let mut settings = header_rows(&["en-GB", "fr"]);
    settings.push(row(&["", "next", "Continuer"]));
    settings.push(row(&["", "save", "Enregistrer"]));

    let source = MemorySource::new(vec![
        RawSheet::new("Onboarding", onboarding),
        RawSheet::new("Settings", settings),
    ]);
    let storage = MemoryStorage::new();
    let report = Pipeline::default()
        .with_format(FormatType::AndroidXml)
        .with_format(FormatType::StringCatalog)
        .run(&source, &storage)
        .unwrap();
    assert_eq!(report.sheets, 2);

    let documents = storage.documents();
    let android = AndroidXmlFormat::from_str(&documents[0].content).unwrap();
    assert_eq!(android.strings.len(), 3);
    assert_eq!(android.find("next").unwrap().translation("fr"), Some("Continuer"));

    let catalog = StringCatalogFormat::from_str(&documents[1].content).unwrap();
    assert_eq!(catalog.source_language, "en-GB");
    assert_eq!(catalog.strings.len(), 3);
    assert_eq!(catalog.get("next").unwrap().value("fr"), Some("Continuer"));
}

#[test]
fn test_run_from_csv_directory_to_file_system() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("Main.csv"),
        indoc! {"
            ,English,Spanish
            ,en,es
            ,English (US),Español
            ,,
            ,,
            ,,
            Greeting on the home screen,hello,Hola
            ,bye,Adiós
        "},
    )
    .unwrap();

    let pipeline = Pipeline::default()
        .with_format(FormatType::AndroidXml)
        .with_format(FormatType::StringCatalog);
    let report = pipeline
        .run(
            &DelimitedSource::new([input.path()]),
            &FileSystemStorage::new(output.path()),
        )
        .unwrap();
    assert_eq!(report.documents.len(), 2);

    let xml_path = output.path().join("Translations/Android/strings.xml");
    let android = AndroidXmlFormat::read_from(&xml_path).unwrap();
    assert_eq!(android.find("bye").unwrap().translation("es"), Some("Adiós"));

    let json_path = output.path().join("Translations/iOS/Localization.json");
    let catalog = StringCatalogFormat::read_from(&json_path).unwrap();
    assert_eq!(
        catalog.get("hello").unwrap().comment.as_deref(),
        Some("Greeting on the home screen")
    );
}

#[test]
fn test_malformed_sheet_aborts_run_before_storing() {
    let narrow = vec![row(&["English"]), row(&["en"]), row(&["English (US)"])];

    let storage = MemoryStorage::new();
    let err = Pipeline::default()
        .with_format(FormatType::AndroidXml)
        .run(
            &MemorySource::new(vec![well_formed_sheet(), RawSheet::new("Narrow", narrow)]),
            &storage,
        )
        .unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert!(err.to_string().contains("Narrow"));
    assert!(storage.documents().is_empty());
}
