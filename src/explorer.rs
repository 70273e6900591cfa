use std::collections::BTreeMap;

use tracing::debug;

use crate::error::DriamsError;
use crate::store::{PathStore, list_subdirs};
use crate::table::read_csv;
use crate::validate::{SiteCheck, SiteValidator};

pub const PLACEHOLDER_MARKER: &str = "Unnamed";

#[derive(Debug, Clone)]
pub struct DatasetExplorer {
    store: PathStore,
    validator: SiteValidator,
}

impl DatasetExplorer {
    pub fn new(store: PathStore) -> Self {
        Self {
            store,
            validator: SiteValidator::new(),
        }
    }

    pub fn with_validator(store: PathStore, validator: SiteValidator) -> Self {
        Self { store, validator }
    }

    pub fn store(&self) -> &PathStore {
        &self.store
    }

    pub fn available_sites(&self) -> Result<Vec<String>, DriamsError> {
        list_subdirs(self.store.root())
    }

    pub fn available_years(&self, site: &str) -> Result<Vec<String>, DriamsError> {
        list_subdirs(&self.store.id_dir(site))
    }

    pub fn available_antibiotics(
        &self,
        site: &str,
        year: &str,
    ) -> Result<Vec<String>, DriamsError> {
        let path = self.store.id_table_path(site, year);
        let table = read_csv(&path)?;
        let mut antibiotics: Vec<String> = table
            .headers
            .into_iter()
            .filter(|column| is_antibiotic_column(column))
            .collect();
        antibiotics.sort();
        debug!(site, year, count = antibiotics.len(), "listed antibiotics");
        Ok(antibiotics)
    }

    pub fn available_antibiotics_by_year(
        &self,
        site: &str,
    ) -> Result<BTreeMap<String, Vec<String>>, DriamsError> {
        self.available_years(site)?
            .into_iter()
            .map(|year| {
                let antibiotics = self.available_antibiotics(site, &year)?;
                Ok((year, antibiotics))
            })
            .collect()
    }

    pub fn check_site(&self, site: &str) -> SiteCheck {
        self.validator.check_site(&self.store.site_dir(site))
    }

    pub fn is_site_valid(&self, site: &str) -> bool {
        self.check_site(site).is_valid()
    }
}

pub fn is_antibiotic_column(column: &str) -> bool {
    column.chars().next().is_some_and(char::is_uppercase) && !column.contains(PLACEHOLDER_MARKER)
}
