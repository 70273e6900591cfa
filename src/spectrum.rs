use std::fs;
use std::io;

use camino::Utf8Path;

use crate::error::DriamsError;

pub const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    mass: Vec<f64>,
    intensity: Vec<f64>,
}

impl Spectrum {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (mass, intensity) = pairs.into_iter().unzip();
        Self { mass, intensity }
    }

    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    pub fn peaks(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mass.iter().copied().zip(self.intensity.iter().copied())
    }

    /// Blank lines and `#` comments are skipped. A first data line with two
    /// non-numeric fields is a column header; any other bad line is an error.
    pub fn parse(content: &str, path: &Utf8Path) -> Result<Self, DriamsError> {
        let mut pairs = Vec::new();
        let mut seen_data = false;

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
                continue;
            }
            let first_data = !seen_data;
            seen_data = true;

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            let parsed = match fields.as_slice() {
                [mass, intensity] => {
                    Some((mass.parse::<f64>().ok(), intensity.parse::<f64>().ok()))
                }
                _ => None,
            };
            match parsed {
                Some((Some(mass), Some(intensity))) => pairs.push((mass, intensity)),
                Some((None, None)) if first_data => continue,
                _ => {
                    return Err(DriamsError::parse(
                        path,
                        format!(
                            "line {}: expected two numeric columns, got '{trimmed}'",
                            line_no + 1
                        ),
                    ));
                }
            }
        }

        Ok(Self::from_pairs(pairs))
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, DriamsError> {
        let content = fs::read_to_string(path.as_std_path()).map_err(|err| match err.kind() {
            io::ErrorKind::InvalidData => DriamsError::parse(path, err.to_string()),
            _ => DriamsError::Filesystem(format!("read {path}: {err}")),
        })?;
        Self::parse(&content, path)
    }
}
