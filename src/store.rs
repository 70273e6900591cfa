use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::domain::SpectraKind;
use crate::error::DriamsError;

pub const ID_DIR: &str = "id";

/// Resolves every path of the DRIAMS layout below a single root:
///
/// ```text
/// <root>/<site>/id/<year>/<year>_clean.csv
/// <root>/<site>/{raw,preprocessed}/<year>/<code>.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStore {
    root: Utf8PathBuf,
}

impl PathStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn site_dir(&self, site: &str) -> Utf8PathBuf {
        self.root.join(site)
    }

    pub fn id_dir(&self, site: &str) -> Utf8PathBuf {
        self.site_dir(site).join(ID_DIR)
    }

    pub fn id_table_path(&self, site: &str, year: &str) -> Utf8PathBuf {
        self.id_dir(site).join(year).join(format!("{year}_clean.csv"))
    }

    pub fn spectra_dir(&self, site: &str, kind: SpectraKind, year: &str) -> Utf8PathBuf {
        self.site_dir(site).join(kind.dir_name()).join(year)
    }

    pub fn spectrum_path(
        &self,
        site: &str,
        kind: SpectraKind,
        year: &str,
        code: &str,
    ) -> Utf8PathBuf {
        self.spectra_dir(site, kind, year).join(format!("{code}.txt"))
    }
}

pub fn list_subdirs(dir: &Utf8Path) -> Result<Vec<String>, DriamsError> {
    let entries = fs::read_dir(dir.as_std_path())
        .map_err(|err| DriamsError::Filesystem(format!("read dir {dir}: {err}")))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|err| DriamsError::Filesystem(format!("read dir {dir}: {err}")))?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => {
                return Err(DriamsError::Filesystem(format!(
                    "non UTF-8 entry {name:?} in {dir}"
                )));
            }
        }
    }
    names.sort();
    Ok(names)
}
