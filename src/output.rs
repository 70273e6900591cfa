use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::dataset::Dataset;
use crate::validate::SiteCheck;

#[derive(Debug, Clone, Serialize)]
pub struct SitesResult {
    pub root: String,
    pub sites: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearsResult {
    pub site: String,
    pub years: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AntibioticsResult {
    pub site: String,
    pub antibiotics: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    pub sites: Vec<SiteReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub site: String,
    pub valid: bool,
    pub check: SiteCheck,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadResult {
    pub site: String,
    pub year: String,
    pub species: String,
    pub spectra: String,
    pub n_samples: usize,
    pub is_multitask: bool,
    pub label_columns: Vec<String>,
    pub missing_label_counts: BTreeMap<String, usize>,
    pub class_ratios: BTreeMap<String, Option<f64>>,
    pub samples: Vec<SampleSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary {
    pub code: String,
    pub peaks: usize,
}

impl LoadResult {
    pub fn summarize(
        site: &str,
        year: &str,
        species: &str,
        spectra: &str,
        dataset: &Dataset,
    ) -> Self {
        Self {
            site: site.to_string(),
            year: year.to_string(),
            species: species.to_string(),
            spectra: spectra.to_string(),
            n_samples: dataset.n_samples(),
            is_multitask: dataset.is_multitask(),
            label_columns: dataset
                .label_columns()
                .into_iter()
                .map(str::to_string)
                .collect(),
            missing_label_counts: dataset.missing_label_counts(),
            class_ratios: dataset.class_ratios(),
            samples: dataset
                .iter()
                .map(|(code, spectrum)| SampleSummary {
                    code: code.to_string(),
                    peaks: spectrum.len(),
                })
                .collect(),
        }
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_sites(result: &SitesResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_years(result: &YearsResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_antibiotics(result: &AntibioticsResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_validate(result: &ValidateResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_load(result: &LoadResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
