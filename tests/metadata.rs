mod common;

use assert_matches::assert_matches;

use driams_loader::domain::MissingPolicy;
use driams_loader::encoding::{DriamsLabelEncoder, LabelEncoder};
use driams_loader::error::DriamsError;
use driams_loader::metadata::load_metadata;
use driams_loader::table::{Cell, Label, MetadataTable};

use common::{CLEAN_CSV, Fixture, SA};

const BOTH: [&str; 2] = ["Ciprofloxacin", "Penicillin"];

fn clean_table(fixture: &Fixture) -> camino::Utf8PathBuf {
    fixture.write("clean.csv", CLEAN_CSV);
    fixture.path("clean.csv")
}

fn load(
    fixture: &Fixture,
    antibiotics: &[&str],
    encoder: Option<&dyn LabelEncoder>,
    missing: MissingPolicy,
) -> MetadataTable {
    load_metadata(&clean_table(fixture), SA, antibiotics, encoder, missing).unwrap()
}

#[test]
fn projects_descriptive_then_requested_columns() {
    let fixture = Fixture::new();
    let table = load(&fixture, &["Penicillin"], None, MissingPolicy::Keep);

    assert_eq!(
        table.columns(),
        ["code", "bruker_organism_best_match", "species", "Penicillin"]
    );
    assert_eq!(table.codes(), vec!["A1", "A2", "A4", "A5", "A6"]);
}

#[test]
fn bare_antibiotic_name_is_accepted() {
    let fixture = Fixture::new();
    let path = clean_table(&fixture);
    let table = load_metadata(&path, SA, "Ciprofloxacin", None, MissingPolicy::Keep).unwrap();
    assert_eq!(table.label_columns(), vec!["Ciprofloxacin"]);
}

#[test]
fn dash_is_read_as_missing() {
    let fixture = Fixture::new();
    let table = load(&fixture, &BOTH, None, MissingPolicy::Keep);
    assert_eq!(table.cell(1, "Penicillin"), Some(&Cell::Missing));
    assert_eq!(table.cell(1, "Ciprofloxacin"), Some(&Cell::Text("R(1)".into())));
}

#[test]
fn keep_retains_every_species_row() {
    let fixture = Fixture::new();
    let encoder = DriamsLabelEncoder::new();
    let table = load(&fixture, &BOTH, Some(&encoder), MissingPolicy::Keep);
    assert_eq!(table.row_count(), 5);
}

#[test]
fn remove_if_all_missing_keeps_partially_labelled_rows() {
    let fixture = Fixture::new();
    let encoder = DriamsLabelEncoder::new();
    let table = load(&fixture, &BOTH, Some(&encoder), MissingPolicy::RemoveIfAllMissing);

    assert_eq!(table.codes(), vec!["A1", "A4", "A5"]);
    for row in 0..table.row_count() {
        let labelled = BOTH
            .iter()
            .filter(|column| !table.cell(row, column).unwrap().is_missing())
            .count();
        assert!(labelled > 0);
    }
}

#[test]
fn remove_if_any_missing_keeps_fully_labelled_rows() {
    let fixture = Fixture::new();
    let encoder = DriamsLabelEncoder::new();
    let table = load(&fixture, &BOTH, Some(&encoder), MissingPolicy::RemoveIfAnyMissing);

    assert_eq!(table.codes(), vec!["A1"]);
    assert_eq!(table.cell(0, "Ciprofloxacin"), Some(&Cell::Label(Label::Susceptible)));
    assert_eq!(table.cell(0, "Penicillin"), Some(&Cell::Label(Label::Resistant)));
}

#[test]
fn encoding_runs_before_missing_value_handling() {
    let fixture = Fixture::new();
    let encoder = DriamsLabelEncoder::new();

    let raw = load(&fixture, &["Ciprofloxacin"], None, MissingPolicy::RemoveIfAllMissing);
    assert_eq!(raw.codes(), vec!["A1", "A2", "A5"]);

    let encoded = load(
        &fixture,
        &["Ciprofloxacin"],
        Some(&encoder),
        MissingPolicy::RemoveIfAllMissing,
    );
    assert_eq!(encoded.codes(), vec!["A1"]);
    assert_eq!(encoded.cell(0, "Ciprofloxacin"), Some(&Cell::Label(Label::Susceptible)));
}

#[test]
fn two_row_scenario() {
    let fixture = Fixture::new();
    fixture.write(
        "small.csv",
        "code,bruker_organism_best_match,species,Cipro\nA1,Sa,Sa,S\nA2,Sa,Sa,R(1)\n",
    );
    let encoder = DriamsLabelEncoder::new();
    let table = load_metadata(
        &fixture.path("small.csv"),
        "Sa",
        ["Cipro"],
        Some(&encoder),
        MissingPolicy::RemoveIfAllMissing,
    )
    .unwrap();

    assert_eq!(table.codes(), vec!["A1"]);
    assert_eq!(table.cell(0, "Cipro").and_then(Cell::as_label), Some(Label::Susceptible));
}

#[test]
fn encoder_leaves_descriptive_columns_alone() {
    let fixture = Fixture::new();
    fixture.write(
        "odd.csv",
        "code,bruker_organism_best_match,species,Cipro\nS,R,Sa,I\n",
    );
    let encoder = DriamsLabelEncoder::new();
    let table = load_metadata(
        &fixture.path("odd.csv"),
        "Sa",
        "Cipro",
        Some(&encoder),
        MissingPolicy::Keep,
    )
    .unwrap();

    assert_eq!(table.cell(0, "code"), Some(&Cell::Text("S".into())));
    assert_eq!(
        table.cell(0, "bruker_organism_best_match"),
        Some(&Cell::Text("R".into()))
    );
    assert_eq!(table.cell(0, "Cipro"), Some(&Cell::Label(Label::Resistant)));
}

#[test]
fn unrecognised_tokens_stay_explicitly_unmapped() {
    let fixture = Fixture::new();
    fixture.write(
        "unmapped.csv",
        "code,bruker_organism_best_match,species,Cipro\nA1,Sa,Sa,positive\n",
    );
    let encoder = DriamsLabelEncoder::new();
    let table = load_metadata(
        &fixture.path("unmapped.csv"),
        "Sa",
        "Cipro",
        Some(&encoder),
        MissingPolicy::RemoveIfAnyMissing,
    )
    .unwrap();

    assert_eq!(table.cell(0, "Cipro"), Some(&Cell::Unmapped("positive".into())));
}

#[test]
fn unknown_antibiotic_is_an_error() {
    let fixture = Fixture::new();
    let err = load_metadata(
        &clean_table(&fixture),
        SA,
        "Colistin",
        None,
        MissingPolicy::Keep,
    )
    .unwrap_err();
    assert_matches!(err, DriamsError::UnknownColumn { column, .. } if column == "Colistin");
}

#[test]
fn empty_antibiotic_list_is_an_error() {
    let fixture = Fixture::new();
    let err = load_metadata(
        &clean_table(&fixture),
        SA,
        Vec::<String>::new(),
        None,
        MissingPolicy::Keep,
    )
    .unwrap_err();
    assert_matches!(err, DriamsError::CallerContract(_));
}

#[test]
fn invalid_policy_name_is_an_error() {
    let err = "remove_some".parse::<MissingPolicy>().unwrap_err();
    assert_matches!(err, DriamsError::CallerContract(_));
}

#[test]
fn unknown_species_yields_empty_table() {
    let fixture = Fixture::new();
    let table = load_metadata(
        &clean_table(&fixture),
        "Klebsiella pneumoniae",
        BOTH,
        None,
        MissingPolicy::Keep,
    )
    .unwrap();
    assert!(table.is_empty());
}

#[test]
fn missing_identifier_table_is_reported() {
    let fixture = Fixture::new();
    let err = load_metadata(
        &fixture.path("absent.csv"),
        SA,
        BOTH,
        None,
        MissingPolicy::Keep,
    )
    .unwrap_err();
    assert_matches!(err, DriamsError::Filesystem(_));
}
