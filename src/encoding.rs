use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::domain::DESCRIPTIVE_COLUMNS;
use crate::error::DriamsError;
use crate::table::{Cell, Label, MetadataTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Class(Label),
    Unknown,
    Unmapped,
}

pub trait LabelEncoder {
    fn encode(&self, raw: &str) -> Encoding;

    fn transform(&self, table: &MetadataTable) -> Result<MetadataTable, DriamsError>;
}

#[derive(Debug, Clone)]
pub struct MappingEncoder {
    vocabulary: HashMap<String, Encoding>,
    ignore: Vec<String>,
}

impl MappingEncoder {
    pub fn new<I>(vocabulary: I, ignore: &[&str]) -> Self
    where
        I: IntoIterator<Item = (String, Encoding)>,
    {
        Self {
            vocabulary: vocabulary.into_iter().collect(),
            ignore: ignore.iter().map(|column| column.to_string()).collect(),
        }
    }

    pub fn ignored_columns(&self) -> &[String] {
        &self.ignore
    }
}

impl LabelEncoder for MappingEncoder {
    fn encode(&self, raw: &str) -> Encoding {
        self.vocabulary
            .get(raw)
            .copied()
            .unwrap_or(Encoding::Unmapped)
    }

    fn transform(&self, table: &MetadataTable) -> Result<MetadataTable, DriamsError> {
        let skip: Vec<&str> = self.ignore.iter().map(String::as_str).collect();
        let mut unmapped: BTreeMap<String, usize> = BTreeMap::new();

        let encoded = table.map_cells(&skip, |column, cell| match cell {
            Cell::Text(raw) => match self.encode(raw) {
                Encoding::Class(label) => Cell::Label(label),
                Encoding::Unknown => Cell::Missing,
                Encoding::Unmapped => {
                    *unmapped.entry(column.to_string()).or_default() += 1;
                    Cell::Unmapped(raw.clone())
                }
            },
            other => other.clone(),
        });

        for (column, count) in &unmapped {
            warn!(column = %column, count, "label values outside the encoding vocabulary");
        }
        Ok(encoded)
    }
}

#[derive(Debug, Clone)]
pub struct DriamsLabelEncoder {
    inner: MappingEncoder,
}

impl DriamsLabelEncoder {
    pub const RESISTANT: [&'static str; 2] = ["R", "I"];
    pub const SUSCEPTIBLE: [&'static str; 1] = ["S"];
    pub const UNKNOWN: [&'static str; 7] = [
        "R(1)",
        "L(1)",
        "I(1)",
        "I(1), S(1)",
        "R(1), I(1)",
        "R(1), S(1)",
        "R(1), I(1), S(1)",
    ];

    pub fn new() -> Self {
        let vocabulary = Self::RESISTANT
            .iter()
            .map(|token| (token.to_string(), Encoding::Class(Label::Resistant)))
            .chain(
                Self::SUSCEPTIBLE
                    .iter()
                    .map(|token| (token.to_string(), Encoding::Class(Label::Susceptible))),
            )
            .chain(
                Self::UNKNOWN
                    .iter()
                    .map(|token| (token.to_string(), Encoding::Unknown)),
            );
        Self {
            inner: MappingEncoder::new(vocabulary, &DESCRIPTIVE_COLUMNS),
        }
    }
}

impl Default for DriamsLabelEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelEncoder for DriamsLabelEncoder {
    fn encode(&self, raw: &str) -> Encoding {
        self.inner.encode(raw)
    }

    fn transform(&self, table: &MetadataTable) -> Result<MetadataTable, DriamsError> {
        self.inner.transform(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driams_vocabulary() {
        let encoder = DriamsLabelEncoder::new();
        assert_eq!(encoder.encode("R"), Encoding::Class(Label::Resistant));
        assert_eq!(encoder.encode("I"), Encoding::Class(Label::Resistant));
        assert_eq!(encoder.encode("S"), Encoding::Class(Label::Susceptible));
        assert_eq!(encoder.encode("R(1), I(1)"), Encoding::Unknown);
        assert_eq!(encoder.encode("L(1)"), Encoding::Unknown);
        assert_eq!(encoder.encode("positive"), Encoding::Unmapped);
        assert_eq!(encoder.encode(" S "), Encoding::Unmapped);
    }
}
