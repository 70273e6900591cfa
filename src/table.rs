use camino::{Utf8Path, Utf8PathBuf};

use crate::domain::is_descriptive;
use crate::error::DriamsError;

pub const MISSING_MARKER: &str = "-";

pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Susceptible,
    Resistant,
}

impl Label {
    pub fn value(&self) -> u8 {
        match self {
            Label::Susceptible => 0,
            Label::Resistant => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Missing,
    Text(String),
    Label(Label),
    Unmapped(String),
}

impl Cell {
    pub fn from_token(token: &str) -> Self {
        if token == MISSING_MARKER || NA_TOKENS.contains(&token) {
            Cell::Missing
        } else {
            Cell::Text(token.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) | Cell::Unmapped(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<Label> {
        match self {
            Cell::Label(label) => Some(*label),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

pub fn read_csv(path: &Utf8Path) -> Result<RawTable, DriamsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path.as_std_path())
        .map_err(|err| DriamsError::Filesystem(format!("open {path}: {err}")))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| DriamsError::parse(path, err.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(DriamsError::parse(path, "no columns to parse"));
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|err| DriamsError::parse(path, err.to_string()))?;
        if record.len() > headers.len() {
            return Err(DriamsError::parse(
                path,
                format!(
                    "row {}: expected {} fields, saw {}",
                    row_no + 1,
                    headers.len(),
                    record.len()
                ),
            ));
        }
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        fields.resize(headers.len(), String::new());
        records.push(fields);
    }

    Ok(RawTable { headers, records })
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    source: Option<Utf8PathBuf>,
}

impl MetadataTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, DriamsError> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(DriamsError::CallerContract(format!(
                "row {idx} has {} cells for {} columns",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self {
            columns,
            rows,
            source: None,
        })
    }

    pub fn from_csv_path(path: &Utf8Path) -> Result<Self, DriamsError> {
        let raw = read_csv(path)?;
        let rows = raw
            .records
            .iter()
            .map(|record| record.iter().map(|token| Cell::from_token(token)).collect())
            .collect();
        Ok(Self {
            columns: raw.headers,
            rows,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source(&self) -> Option<&Utf8Path> {
        self.source.as_deref()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[idx])
    }

    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn label_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|column| !is_descriptive(column))
            .collect()
    }

    pub fn codes(&self) -> Vec<&str> {
        match self.column_index("code") {
            Some(idx) => self
                .rows
                .iter()
                .map(|row| row[idx].as_text().unwrap_or(""))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&[Cell]) -> bool,
    {
        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
            source: self.source.clone(),
        }
    }

    pub fn select(&self, columns: &[&str]) -> Result<Self, DriamsError> {
        let indices = columns
            .iter()
            .map(|column| {
                self.column_index(column)
                    .ok_or_else(|| DriamsError::UnknownColumn {
                        column: column.to_string(),
                        path: self
                            .source
                            .clone()
                            .unwrap_or_else(|| Utf8PathBuf::from("<memory>")),
                    })
            })
            .collect::<Result<Vec<_>, DriamsError>>()?;

        Ok(Self {
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
                .collect(),
            source: self.source.clone(),
        })
    }

    pub fn map_cells<F>(&self, skip: &[&str], mut map: F) -> Self
    where
        F: FnMut(&str, &Cell) -> Cell,
    {
        let targets: Vec<bool> = self
            .columns
            .iter()
            .map(|column| !skip.contains(&column.as_str()))
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(idx, cell)| {
                        if targets[idx] {
                            map(&self.columns[idx], cell)
                        } else {
                            cell.clone()
                        }
                    })
                    .collect()
            })
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
            source: self.source.clone(),
        }
    }

    pub fn missing_count(&self, column: &str) -> Option<usize> {
        self.column(column)
            .map(|cells| cells.filter(|cell| cell.is_missing()).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetadataTable {
        MetadataTable::new(
            vec!["code".into(), "species".into(), "Penicillin".into()],
            vec![
                vec![
                    Cell::Text("A1".into()),
                    Cell::Text("Sa".into()),
                    Cell::Missing,
                ],
                vec![
                    Cell::Text("A2".into()),
                    Cell::Text("Ec".into()),
                    Cell::Text("R".into()),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn missing_tokens() {
        assert!(Cell::from_token("-").is_missing());
        assert!(Cell::from_token("").is_missing());
        assert!(Cell::from_token("NaN").is_missing());
        assert_eq!(Cell::from_token("R(1)"), Cell::Text("R(1)".into()));
    }

    #[test]
    fn select_reorders_columns() {
        let table = sample().select(&["Penicillin", "code"]).unwrap();
        assert_eq!(table.columns(), ["Penicillin", "code"]);
        assert_eq!(table.cell(1, "Penicillin"), Some(&Cell::Text("R".into())));
    }

    #[test]
    fn select_unknown_column() {
        let err = sample().select(&["Colistin"]).unwrap_err();
        assert!(matches!(err, DriamsError::UnknownColumn { column, .. } if column == "Colistin"));
    }

    #[test]
    fn ragged_rows_rejected() {
        let result = MetadataTable::new(vec!["code".into()], vec![vec![]]);
        assert!(matches!(result, Err(DriamsError::CallerContract(_))));
    }

    #[test]
    fn label_columns_skip_descriptive() {
        assert_eq!(sample().label_columns(), vec!["Penicillin"]);
        assert_eq!(sample().missing_count("Penicillin"), Some(1));
    }
}
