#![allow(dead_code)]

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub const SITE: &str = "DRIAMS-A";
pub const YEAR: &str = "2015";
pub const SA: &str = "Staphylococcus aureus";

/// Identifier table with one row per interesting label situation.
pub const CLEAN_CSV: &str = "\
code,bruker_organism_best_match,species,laboratory_species,Ciprofloxacin,Penicillin,Unnamed: 7
A1,Staphylococcus aureus,Staphylococcus aureus,S. aureus,S,R,
A2,Staphylococcus aureus,Staphylococcus aureus,S. aureus,R(1),-,
A3,Escherichia coli,Escherichia coli,E. coli,R,S,
A4,Staphylococcus aureus,Staphylococcus aureus,S. aureus,-,I,
A5,Staphylococcus aureus,Staphylococcus aureus,S. aureus,\"R(1), I(1)\",S,
A6,Staphylococcus aureus,Staphylococcus aureus,S. aureus,-,-,
";

pub struct Fixture {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        Self { _temp: temp, root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.path(relative).as_std_path()).unwrap();
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap().as_std_path()).unwrap();
        fs::write(path.as_std_path(), content).unwrap();
    }

    pub fn id_table(&self, site: &str, year: &str, content: &str) {
        self.write(&format!("{site}/id/{year}/{year}_clean.csv"), content);
    }

    pub fn spectrum(&self, site: &str, kind: &str, year: &str, code: &str, content: &str) {
        self.write(&format!("{site}/{kind}/{year}/{code}.txt"), content);
    }

    /// Site with the standard identifier table and a preprocessed spectrum
    /// for every code in it.
    pub fn standard_site(&self) {
        self.id_table(SITE, YEAR, CLEAN_CSV);
        for (idx, code) in ["A1", "A2", "A3", "A4", "A5", "A6"].iter().enumerate() {
            self.spectrum(SITE, "preprocessed", YEAR, code, &spectrum_text(idx + 1));
        }
    }
}

/// Spectrum whose first mass encodes `marker`, so tests can tell files apart.
pub fn spectrum_text(marker: usize) -> String {
    format!(
        "# processed spectrum\nmass intensity\n{}.0 0.5\n{}.0 0.25\n",
        2000 + marker,
        3000 + marker
    )
}
