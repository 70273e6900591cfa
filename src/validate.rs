use std::fmt;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::debug;

use crate::domain::SpectraKind;
use crate::store::{ID_DIR, list_subdirs};
use crate::table::read_csv;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum IdFileProblem {
    Missing,
    Unparseable(String),
    MissingCodeColumn,
}

/// Outcome of validating a site. Only `Valid` is accepted; every other
/// variant names the first layout rule the site broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SiteCheck {
    Valid,
    SiteUnreadable {
        reason: String,
    },
    MissingIdDirectory,
    MissingSpectra,
    NoSpecimens,
    FileCountMismatch {
        directories: usize,
        files: usize,
    },
    InvalidIdFile {
        path: Utf8PathBuf,
        problem: IdFileProblem,
    },
}

impl SiteCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, SiteCheck::Valid)
    }
}

impl fmt::Display for SiteCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteCheck::Valid => write!(f, "valid"),
            SiteCheck::SiteUnreadable { reason } => write!(f, "site unreadable: {reason}"),
            SiteCheck::MissingIdDirectory => write!(f, "no `id` directory"),
            SiteCheck::MissingSpectra => {
                write!(f, "neither `raw` nor `preprocessed` directory present")
            }
            SiteCheck::NoSpecimens => write!(f, "`id` directory holds no specimens"),
            SiteCheck::FileCountMismatch { directories, files } => write!(
                f,
                "{directories} identifier directories but {files} identifier files"
            ),
            SiteCheck::InvalidIdFile { path, problem } => match problem {
                IdFileProblem::Missing => write!(f, "{path}: file missing"),
                IdFileProblem::Unparseable(reason) => write!(f, "{path}: {reason}"),
                IdFileProblem::MissingCodeColumn => write!(f, "{path}: no `code` column"),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SiteValidator {
    require_specimens: bool,
}

impl SiteValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_specimens(mut self, required: bool) -> Self {
        self.require_specimens = required;
        self
    }

    pub fn is_site_valid(&self, site_dir: &Utf8Path) -> bool {
        self.check_site(site_dir).is_valid()
    }

    pub fn check_site(&self, site_dir: &Utf8Path) -> SiteCheck {
        let outcome = self.check_layout(site_dir);
        debug!(site = %site_dir, outcome = %outcome, "checked site");
        outcome
    }

    fn check_layout(&self, site_dir: &Utf8Path) -> SiteCheck {
        let dirs = match list_subdirs(site_dir) {
            Ok(dirs) => dirs,
            Err(err) => {
                return SiteCheck::SiteUnreadable {
                    reason: err.to_string(),
                };
            }
        };

        if !dirs.iter().any(|dir| dir == ID_DIR) {
            return SiteCheck::MissingIdDirectory;
        }
        let has_spectra = SpectraKind::ALL
            .iter()
            .any(|kind| dirs.iter().any(|dir| dir == kind.dir_name()));
        if !has_spectra {
            return SiteCheck::MissingSpectra;
        }

        self.check_id_files(&site_dir.join(ID_DIR))
    }

    pub fn check_id_files(&self, id_dir: &Utf8Path) -> SiteCheck {
        let tree = match walk_id_tree(id_dir) {
            Ok(tree) => tree,
            Err(reason) => return SiteCheck::SiteUnreadable { reason },
        };

        if tree.directories != tree.files.len() {
            return SiteCheck::FileCountMismatch {
                directories: tree.directories,
                files: tree.files.len(),
            };
        }
        if self.require_specimens && tree.directories == 0 {
            return SiteCheck::NoSpecimens;
        }

        for path in tree.files {
            if let Err(problem) = check_id_file(&path) {
                return SiteCheck::InvalidIdFile { path, problem };
            }
        }
        SiteCheck::Valid
    }
}

pub fn check_id_file(path: &Utf8Path) -> Result<(), IdFileProblem> {
    if !path.as_std_path().is_file() {
        return Err(IdFileProblem::Missing);
    }
    let table = read_csv(path).map_err(|err| IdFileProblem::Unparseable(err.to_string()))?;
    if !table.headers.iter().any(|header| header == "code") {
        return Err(IdFileProblem::MissingCodeColumn);
    }
    Ok(())
}

struct IdTree {
    directories: usize,
    files: Vec<Utf8PathBuf>,
}

fn walk_id_tree(root: &Utf8Path) -> Result<IdTree, String> {
    let mut directories = 0;
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(dir.as_std_path()).map_err(|err| format!("{dir}: {err}"))?;
        for entry in entries {
            let entry = entry.map_err(|err| format!("{dir}: {err}"))?;
            let path = Utf8PathBuf::from_path_buf(entry.path())
                .map_err(|path| format!("non UTF-8 path {}", path.display()))?;
            if path.as_std_path().is_dir() {
                directories += 1;
                stack.push(path);
            } else if !path.file_name().is_some_and(|name| name.starts_with('.')) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(IdTree { directories, files })
}
