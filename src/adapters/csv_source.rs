use crate::domain::model::{Coordinates, LocationRecord};
use crate::utils::error::{LocatorError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CandidateRow {
    town: String,
    county: Option<String>,
    region: Option<String>,
    postcode: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl CandidateRow {
    fn into_record(self, row: usize) -> Result<LocationRecord> {
        let coordinates = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                Some(Coordinates::new(latitude, longitude).map_err(|e| {
                    LocatorError::ProcessingError {
                        message: format!("row {}: {}", row, e),
                    }
                })?)
            }
            (None, None) => None,
            _ => {
                return Err(LocatorError::ProcessingError {
                    message: format!("row {}: latitude and longitude must be given together", row),
                })
            }
        };

        Ok(LocationRecord {
            town: self.town,
            county: non_empty(self.county),
            region: non_empty(self.region),
            postcode: non_empty(self.postcode),
            coordinates,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reads candidates from CSV with header `town,county,region,postcode,latitude,longitude`.
pub fn read_locations<R: Read>(reader: R) -> Result<Vec<LocationRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<CandidateRow>().enumerate() {
        // header is line 1
        records.push(row?.into_record(index + 2)?);
    }
    Ok(records)
}

pub fn load_locations<P: AsRef<Path>>(path: P) -> Result<Vec<LocationRecord>> {
    let file = std::fs::File::open(&path)?;
    let records = read_locations(file)?;
    tracing::debug!(
        "Loaded {} candidate locations from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_mixed_rows() {
        let data = "\
town,county,region,postcode,latitude,longitude
Brighton,East Sussex,South East,BN1 1AA,50.8225,-0.1372
Leeds,West Yorkshire,,LS1 1UR,,
";
        let records = read_locations(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].town, "Brighton");
        assert_eq!(
            records[0].coordinates,
            Some(Coordinates {
                latitude: 50.8225,
                longitude: -0.1372
            })
        );
        assert_eq!(records[1].region, None);
        assert_eq!(records[1].postcode.as_deref(), Some("LS1 1UR"));
        assert_eq!(records[1].coordinates, None);
    }

    #[test]
    fn test_half_coordinates_rejected() {
        let data = "\
town,county,region,postcode,latitude,longitude
Leeds,,,LS1 1UR,53.8,
";
        let err = read_locations(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let data = "\
town,county,region,postcode,latitude,longitude
Nowhere,,,,95.0,0.0
";
        assert!(matches!(
            read_locations(data.as_bytes()),
            Err(LocatorError::ProcessingError { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"town,county,region,postcode,latitude,longitude\nYork,,,YO1 7HH,53.96,-1.08\n")
            .unwrap();

        let records = load_locations(temp_file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].town, "York");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_locations("/definitely/not/here.csv"),
            Err(LocatorError::IoError(_))
        ));
    }
}
