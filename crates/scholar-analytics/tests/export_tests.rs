//! Export tests across the store, filter and renderers.

use scholar_analytics::export::export_papers;
use scholar_analytics::models::ExportFormat;
use scholar_analytics::{FilterCriteria, Paper, RecordStore};

fn store() -> RecordStore {
    RecordStore::new(vec![
        Paper::new(1, "Graph Algorithms", &["Ada Lovelace", "Bob Smith"], 2020, "ICML", 10)
            .with_url("https://example.org/1"),
        Paper::new("doi:10.1/2", "=HYPERLINK(\"x\")", &["Cy Young"], 2021, "KDD", 3),
        Paper::new(3, "Line\nBreak", &["Ada Lovelace"], 2021, "ICML", 0),
    ])
}

#[test]
fn test_json_export_reloads_into_equal_store() {
    let original = store();
    let json = export_papers(original.papers(), ExportFormat::Json).unwrap();
    let reloaded = RecordStore::from_json_str(&json).unwrap();

    assert_eq!(reloaded.papers(), original.papers());
    assert_ne!(reloaded.version(), original.version());
}

#[test]
fn test_export_respects_filter() {
    let store = store();
    let papers = store.filter(&FilterCriteria::new().venues(["ICML"])).unwrap();
    let csv = export_papers(&papers, ExportFormat::Csv).unwrap();

    assert!(csv.contains("Graph Algorithms"));
    assert!(!csv.contains("HYPERLINK"));
}

#[test]
fn test_csv_neutralizes_formula_titles() {
    let csv = export_papers(store().papers(), ExportFormat::Csv).unwrap();

    assert!(csv.contains("doi:10.1/2,\"'=HYPERLINK(\"\"x\"\")\",Cy Young,2021,KDD,3,\n"));
}

#[test]
fn test_ris_titles_stay_on_one_line() {
    let ris = export_papers(store().papers(), ExportFormat::Ris).unwrap();

    assert!(ris.contains("TI  - Line Break\n"));
    assert_eq!(ris.matches("TY  - JOUR").count(), 3);
    assert!(ris.contains("ID  - doi:10.1/2\n"));
}

#[test]
fn test_bibtex_disambiguates_same_author_year() {
    let store = RecordStore::new(vec![
        Paper::new(1, "One", &["Ada Lovelace"], 2021, "ICML", 1),
        Paper::new(2, "Two", &["Ada Lovelace"], 2021, "ICML", 2),
    ]);
    let bib = export_papers(store.papers(), ExportFormat::Bibtex).unwrap();

    assert!(bib.contains("@article{Lovelace2021,"));
    assert!(bib.contains("@article{Lovelace2021a,"));
}

#[test]
fn test_every_format_handles_empty_selection() {
    for format in ExportFormat::ALL {
        let output = export_papers(&[], format).unwrap();
        match format {
            ExportFormat::Csv => assert_eq!(output, "id,title,authors,year,venue,citations,url\n"),
            ExportFormat::Json => assert_eq!(output, "[]"),
            ExportFormat::Bibtex | ExportFormat::Ris => assert!(output.is_empty()),
        }
    }
}
