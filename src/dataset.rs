use std::collections::BTreeMap;

use camino::Utf8Path;
use tracing::{debug, info};

use crate::domain::{AntibioticSelection, MissingPolicy, SpectraKind};
use crate::encoding::LabelEncoder;
use crate::error::DriamsError;
use crate::metadata::load_metadata;
use crate::spectrum::Spectrum;
use crate::store::PathStore;
use crate::table::{Label, MetadataTable};

#[derive(Debug, Clone)]
pub struct Dataset {
    spectra: Vec<Spectrum>,
    metadata: MetadataTable,
}

impl Dataset {
    pub fn new(spectra: Vec<Spectrum>, metadata: MetadataTable) -> Result<Self, DriamsError> {
        if spectra.len() != metadata.row_count() {
            return Err(DriamsError::ShapeMismatch {
                spectra: spectra.len(),
                rows: metadata.row_count(),
            });
        }
        Ok(Self { spectra, metadata })
    }

    pub fn spectra(&self) -> &[Spectrum] {
        &self.spectra
    }

    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    pub fn n_samples(&self) -> usize {
        self.metadata.row_count()
    }

    pub fn label_columns(&self) -> Vec<&str> {
        self.metadata.label_columns()
    }

    pub fn is_multitask(&self) -> bool {
        self.label_columns().len() > 1
    }

    pub fn codes(&self) -> Vec<&str> {
        self.metadata.codes()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Spectrum)> + '_ {
        self.metadata.codes().into_iter().zip(self.spectra.iter())
    }

    pub fn missing_label_counts(&self) -> BTreeMap<String, usize> {
        self.label_columns()
            .into_iter()
            .map(|column| {
                let missing = self.metadata.missing_count(column).unwrap_or(0);
                (column.to_string(), missing)
            })
            .collect()
    }

    pub fn class_ratios(&self) -> BTreeMap<String, Option<f64>> {
        self.label_columns()
            .into_iter()
            .map(|column| {
                let (resistant, encoded) = self
                    .metadata
                    .column(column)
                    .into_iter()
                    .flatten()
                    .filter_map(|cell| cell.as_label())
                    .fold((0usize, 0usize), |(resistant, total), label| {
                        (resistant + usize::from(label == Label::Resistant), total + 1)
                    });
                let ratio = (encoded > 0).then(|| resistant as f64 / encoded as f64);
                (column.to_string(), ratio)
            })
            .collect()
    }

    pub fn label_matrix(&self) -> Vec<Vec<Option<f64>>> {
        let indices: Vec<usize> = self
            .label_columns()
            .into_iter()
            .filter_map(|column| self.metadata.column_index(column))
            .collect();
        self.metadata
            .rows()
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&idx| row[idx].as_label().map(|label| f64::from(label.value())))
                    .collect()
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct DatasetRequest<'a> {
    pub site: String,
    pub year: String,
    pub species: String,
    pub antibiotics: AntibioticSelection,
    pub encoder: Option<&'a dyn LabelEncoder>,
    pub missing: MissingPolicy,
    pub spectra: SpectraKind,
}

impl<'a> DatasetRequest<'a> {
    pub fn new(
        site: impl Into<String>,
        year: impl Into<String>,
        species: impl Into<String>,
        antibiotics: impl Into<AntibioticSelection>,
    ) -> Self {
        Self {
            site: site.into(),
            year: year.into(),
            species: species.into(),
            antibiotics: antibiotics.into(),
            encoder: None,
            missing: MissingPolicy::default(),
            spectra: SpectraKind::default(),
        }
    }

    pub fn encoder(mut self, encoder: &'a dyn LabelEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn missing_policy(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    pub fn raw(mut self, load_raw: bool) -> Self {
        self.spectra = SpectraKind::from_raw_flag(load_raw);
        self
    }
}

/// A retained row without its spectrum file fails the whole load with
/// [`DriamsError::FileAccess`]; rows are never dropped to hide it.
pub fn load_dataset(
    root: &Utf8Path,
    request: &DatasetRequest<'_>,
) -> Result<Dataset, DriamsError> {
    let store = PathStore::new(root);
    let id_file = store.id_table_path(&request.site, &request.year);

    let metadata = load_metadata(
        &id_file,
        &request.species,
        request.antibiotics.clone(),
        request.encoder,
        request.missing,
    )?;

    let mut spectra = Vec::with_capacity(metadata.row_count());
    for code in metadata.codes() {
        let path = store.spectrum_path(&request.site, request.spectra, &request.year, code);
        if code.is_empty() || !path.as_std_path().is_file() {
            return Err(DriamsError::FileAccess {
                code: code.to_string(),
                path,
            });
        }
        spectra.push(Spectrum::from_path(&path)?);
        debug!(code, path = %path, "loaded spectrum");
    }

    let dataset = Dataset::new(spectra, metadata)?;
    info!(
        site = %request.site,
        year = %request.year,
        species = %request.species,
        spectra = %request.spectra,
        samples = dataset.n_samples(),
        "loaded dataset"
    );
    Ok(dataset)
}
