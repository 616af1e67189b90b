//! Disease lookup table.
//!
//! Static reference data loaded once from CSV. Rows are keyed by the
//! lowercased `disease` column so lookups are case-insensitive and O(1).
//! When a label appears more than once, the first row in file order wins.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classifier::DiseaseLabel;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Cannot read dataset {}: {source}", path.display())]
    Open { path: PathBuf, source: csv::Error },
    #[error("Malformed dataset row: {0}")]
    Row(#[from] csv::Error),
    #[error("Dataset is missing the required `disease` column")]
    MissingDiseaseColumn,
}

/// One reference row. Optional fields are `None` when the column is
/// absent or the cell is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseRecord {
    pub disease: String,
    pub minor_disease: Option<String>,
    pub precautions: Option<String>,
    pub medicines: Option<String>,
}

/// A CSV row as written. Datasets name the medicines column either
/// `medicines` or `medicine`; when both are present `medicines` wins.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    disease: String,
    #[serde(default, deserialize_with = "non_empty")]
    minor_disease: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    precautions: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    medicines: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    medicine: Option<String>,
}

impl From<DatasetRow> for DiseaseRecord {
    fn from(row: DatasetRow) -> Self {
        Self {
            disease: row.disease,
            minor_disease: row.minor_disease,
            precautions: row.precautions,
            medicines: row.medicines.or(row.medicine),
        }
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

/// Short rows are allowed; absent trailing cells read as empty.
fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.flexible(true).trim(csv::Trim::All);
    builder
}

#[derive(Debug, Default)]
pub struct DiseaseTable {
    records: HashMap<String, DiseaseRecord>,
}

impl DiseaseTable {
    /// Load the table from a CSV file on disk.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let reader = reader_builder()
            .from_path(path)
            .map_err(|source| DatasetError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        let table = Self::from_csv(reader)?;

        tracing::info!(
            path = %path.display(),
            diseases = table.len(),
            "Disease dataset loaded"
        );
        Ok(table)
    }

    /// Build the table from any CSV source with a header row.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, DatasetError> {
        Self::from_csv(reader_builder().from_reader(source))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let has_disease = reader.headers()?.iter().any(|h| h == "disease");
        if !has_disease {
            return Err(DatasetError::MissingDiseaseColumn);
        }

        let mut rows = Vec::new();
        for row in reader.deserialize::<DatasetRow>() {
            rows.push(DiseaseRecord::from(row?));
        }
        Ok(Self::from_records(rows))
    }

    /// Index records by lowercased disease label; first occurrence wins.
    pub fn from_records(rows: impl IntoIterator<Item = DiseaseRecord>) -> Self {
        let mut records = HashMap::new();
        let mut duplicates = 0usize;

        for mut record in rows {
            record.disease = record.disease.trim().to_string();
            if record.disease.is_empty() {
                continue;
            }
            let key = record.disease.to_lowercase();
            if records.contains_key(&key) {
                duplicates += 1;
                continue;
            }
            records.insert(key, record);
        }

        if duplicates > 0 {
            tracing::warn!(duplicates, "Dataset has repeated disease labels; kept first");
        }
        Self { records }
    }

    /// Case-insensitive exact match on the disease label.
    pub fn lookup(&self, label: &DiseaseLabel) -> Option<&DiseaseRecord> {
        self.records.get(&label.as_str().trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const DATASET_CSV: &str = "\
text,disease,minor_disease,precautions,medicine
\"fever and cough\",flu,Common Cold,Rest,Paracetamol
\"throbbing head\",Migraine,Tension Headache,Avoid bright light,Ibuprofen
\"sneezing\",FLU,Duplicate,Ignore,Ignore
";

    fn table() -> DiseaseTable {
        DiseaseTable::from_reader(DATASET_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = table();
        let record = table.lookup(&DiseaseLabel::new("Flu")).unwrap();
        assert_eq!(record.minor_disease.as_deref(), Some("Common Cold"));
        assert_eq!(record.precautions.as_deref(), Some("Rest"));
        assert_eq!(record.medicines.as_deref(), Some("Paracetamol"));

        assert!(table.lookup(&DiseaseLabel::new("MIGRAINE")).is_some());
    }

    #[test]
    fn first_duplicate_wins() {
        let table = table();
        assert_eq!(table.len(), 2);
        let record = table.lookup(&DiseaseLabel::new("flu")).unwrap();
        assert_eq!(record.disease, "flu");
        assert_eq!(record.minor_disease.as_deref(), Some("Common Cold"));
    }

    #[test]
    fn absent_label_is_none() {
        assert!(table().lookup(&DiseaseLabel::new("Measles")).is_none());
    }

    #[test]
    fn medicines_header_accepted() {
        let csv = "disease,medicines\nFlu,Oseltamivir\n";
        let table = DiseaseTable::from_reader(csv.as_bytes()).unwrap();
        let record = table.lookup(&DiseaseLabel::new("flu")).unwrap();
        assert_eq!(record.medicines.as_deref(), Some("Oseltamivir"));
    }

    #[test]
    fn both_medicine_headers_prefer_medicines() {
        let csv = "disease,medicine,medicines\nFlu,Aspirin,Oseltamivir\nCold,Zinc,\n";
        let table = DiseaseTable::from_reader(csv.as_bytes()).unwrap();
        let flu = table.lookup(&DiseaseLabel::new("flu")).unwrap();
        assert_eq!(flu.medicines.as_deref(), Some("Oseltamivir"));
        let cold = table.lookup(&DiseaseLabel::new("cold")).unwrap();
        assert_eq!(cold.medicines.as_deref(), Some("Zinc"));
    }

    #[test]
    fn short_rows_fill_missing_cells_with_none() {
        let csv = "disease,minor_disease,precautions,medicine\n\
                   Flu,Cold,Rest,Paracetamol\n\
                   Migraine,Tension\n";
        let table = DiseaseTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let record = table.lookup(&DiseaseLabel::new("migraine")).unwrap();
        assert_eq!(record.minor_disease.as_deref(), Some("Tension"));
        assert_eq!(record.precautions, None);
        assert_eq!(record.medicines, None);
    }

    #[test]
    fn padded_headers_are_matched() {
        let csv = "disease , minor_disease,precautions\nFlu,Cold,Rest\n";
        let table = DiseaseTable::from_reader(csv.as_bytes()).unwrap();
        let record = table.lookup(&DiseaseLabel::new("flu")).unwrap();
        assert_eq!(record.minor_disease.as_deref(), Some("Cold"));
        assert_eq!(record.precautions.as_deref(), Some("Rest"));
    }

    #[test]
    fn missing_columns_and_empty_cells_are_none() {
        let csv = "disease,precautions\nFlu,\n";
        let table = DiseaseTable::from_reader(csv.as_bytes()).unwrap();
        let record = table.lookup(&DiseaseLabel::new("flu")).unwrap();
        assert_eq!(record.minor_disease, None);
        assert_eq!(record.precautions, None);
        assert_eq!(record.medicines, None);
    }

    #[test]
    fn blank_disease_rows_skipped() {
        let csv = "disease,minor_disease\n,Orphan\n  Flu  ,Cold\n";
        let table = DiseaseTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&DiseaseLabel::new("flu")).unwrap().disease, "Flu");
    }

    #[test]
    fn missing_disease_column_rejected() {
        let csv = "label,minor_disease\nFlu,Cold\n";
        let err = DiseaseTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingDiseaseColumn));
    }

    #[test]
    fn missing_file_is_open_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = DiseaseTable::load(&tmp.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Open { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("diseases.csv");
        std::fs::write(&path, DATASET_CSV).unwrap();
        let table = DiseaseTable::load(&path).unwrap();
        assert!(!table.is_empty());
    }
}
