use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DriamsError;

pub const DESCRIPTIVE_COLUMNS: [&str; 3] = ["code", "bruker_organism_best_match", "species"];

pub fn is_descriptive(column: &str) -> bool {
    DESCRIPTIVE_COLUMNS.contains(&column)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    #[default]
    #[value(name = "remove_if_all_missing")]
    RemoveIfAllMissing,
    #[value(name = "remove_if_any_missing")]
    RemoveIfAnyMissing,
    #[value(name = "keep")]
    Keep,
}

impl MissingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingPolicy::RemoveIfAllMissing => "remove_if_all_missing",
            MissingPolicy::RemoveIfAnyMissing => "remove_if_any_missing",
            MissingPolicy::Keep => "keep",
        }
    }

    pub fn retains(&self, missing: usize, total: usize) -> bool {
        match self {
            MissingPolicy::RemoveIfAllMissing => missing != total,
            MissingPolicy::RemoveIfAnyMissing => missing == 0,
            MissingPolicy::Keep => true,
        }
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MissingPolicy {
    type Err = DriamsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "remove_if_all_missing" => Ok(MissingPolicy::RemoveIfAllMissing),
            "remove_if_any_missing" => Ok(MissingPolicy::RemoveIfAnyMissing),
            "keep" => Ok(MissingPolicy::Keep),
            other => Err(DriamsError::CallerContract(format!(
                "unknown missing-value policy '{other}', expected one of \
                 remove_if_all_missing, remove_if_any_missing, keep"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpectraKind {
    Raw,
    #[default]
    Preprocessed,
}

impl SpectraKind {
    pub const ALL: [SpectraKind; 2] = [SpectraKind::Raw, SpectraKind::Preprocessed];

    pub fn from_raw_flag(load_raw: bool) -> Self {
        if load_raw {
            SpectraKind::Raw
        } else {
            SpectraKind::Preprocessed
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            SpectraKind::Raw => "raw",
            SpectraKind::Preprocessed => "preprocessed",
        }
    }
}

impl fmt::Display for SpectraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AntibioticSelection(Vec<String>);

impl AntibioticSelection {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn validated(&self) -> Result<&[String], DriamsError> {
        if self.0.is_empty() {
            return Err(DriamsError::CallerContract(
                "at least one antibiotic must be requested".to_string(),
            ));
        }
        for (idx, name) in self.0.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(DriamsError::CallerContract(
                    "antibiotic names must not be empty".to_string(),
                ));
            }
            if is_descriptive(name) {
                return Err(DriamsError::CallerContract(format!(
                    "'{name}' is a descriptive column, not an antibiotic"
                )));
            }
            if self.0[..idx].contains(name) {
                return Err(DriamsError::CallerContract(format!(
                    "antibiotic '{name}' requested more than once"
                )));
            }
        }
        Ok(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for AntibioticSelection {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for AntibioticSelection {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for AntibioticSelection {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for AntibioticSelection {
    fn from(value: Vec<&str>) -> Self {
        Self::new(value)
    }
}

impl From<&[&str]> for AntibioticSelection {
    fn from(value: &[&str]) -> Self {
        Self::new(value.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for AntibioticSelection {
    fn from(value: [&str; N]) -> Self {
        Self::new(value)
    }
}
