use camino::Utf8Path;
use tracing::debug;

use crate::domain::{AntibioticSelection, DESCRIPTIVE_COLUMNS, MissingPolicy};
use crate::encoding::LabelEncoder;
use crate::error::DriamsError;
use crate::table::{Cell, MetadataTable};

/// Encoding runs before row pruning: inconclusive calls become missing values.
pub fn load_metadata(
    path: &Utf8Path,
    species: &str,
    antibiotics: impl Into<AntibioticSelection>,
    encoder: Option<&dyn LabelEncoder>,
    missing: MissingPolicy,
) -> Result<MetadataTable, DriamsError> {
    let selection: AntibioticSelection = antibiotics.into();
    let antibiotics = selection.validated()?;

    let table = MetadataTable::from_csv_path(path)?;
    debug!(path = %path, rows = table.row_count(), "read identifier table");

    select_species(&table, species)
        .and_then(|table| project(&table, antibiotics))
        .and_then(|table| match encoder {
            Some(encoder) => encoder.transform(&table),
            None => Ok(table),
        })
        .map(|table| {
            let pruned = apply_missing_policy(&table, antibiotics, missing);
            debug!(
                species,
                policy = %missing,
                before = table.row_count(),
                after = pruned.row_count(),
                "applied missing-value policy"
            );
            pruned
        })
}

fn select_species(table: &MetadataTable, species: &str) -> Result<MetadataTable, DriamsError> {
    let idx = table
        .column_index("species")
        .ok_or_else(|| unknown_column(table, "species"))?;
    let selected =
        table.filter_rows(|row| matches!(&row[idx], Cell::Text(value) if value == species));
    debug!(species, rows = selected.row_count(), "filtered by species");
    Ok(selected)
}

fn project(table: &MetadataTable, antibiotics: &[String]) -> Result<MetadataTable, DriamsError> {
    let columns: Vec<&str> = DESCRIPTIVE_COLUMNS
        .iter()
        .copied()
        .chain(antibiotics.iter().map(String::as_str))
        .collect();
    table.select(&columns)
}

pub fn apply_missing_policy(
    table: &MetadataTable,
    antibiotics: &[String],
    policy: MissingPolicy,
) -> MetadataTable {
    if policy == MissingPolicy::Keep {
        return table.clone();
    }
    let indices: Vec<usize> = antibiotics
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    table.filter_rows(|row| {
        let missing = indices.iter().filter(|&&idx| row[idx].is_missing()).count();
        policy.retains(missing, indices.len())
    })
}

fn unknown_column(table: &MetadataTable, column: &str) -> DriamsError {
    DriamsError::UnknownColumn {
        column: column.to_string(),
        path: table
            .source()
            .map(Utf8Path::to_path_buf)
            .unwrap_or_else(|| "<memory>".into()),
    }
}
