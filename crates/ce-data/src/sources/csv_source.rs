use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ce_core::{Attribute, CountyId, CountyRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::config::NullConfig;
use crate::DataError;

/// Column holding the county identifier
pub const ID_COLUMN: &str = "cnty_fips";

/// Column holding the county display name
pub const NAME_COLUMN: &str = "display_name";

/// Load county records from a CSV file
pub fn load_records(path: &Path, null_config: &NullConfig) -> Result<Vec<CountyRecord>, DataError> {
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file), null_config)?;
    info!("Loaded {} county records from {:?}", records.len(), path);
    Ok(records)
}

/// Parse county records from CSV text, keeping source order
pub fn read_records<R: Read>(reader: R, null_config: &NullConfig) -> Result<Vec<CountyRecord>, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let id_idx = column_index(&headers, ID_COLUMN)?;
    let name_idx = column_index(&headers, NAME_COLUMN)?;

    let mut attribute_idx = [0usize; 6];
    for attribute in Attribute::ALL {
        attribute_idx[attribute.index()] = column_index(&headers, attribute.column())?;
    }

    let mut records = Vec::new();
    let mut missing_cells = 0usize;

    for (row, result) in csv_reader.records().enumerate() {
        let row_data = result?;

        let raw_id = row_data.get(id_idx).unwrap_or_default();
        if raw_id.trim().is_empty() {
            warn!("Skipping row {} without a county id", row + 1);
            continue;
        }

        let values = attribute_idx.map(|idx| null_config.parse_number(row_data.get(idx).unwrap_or_default()));
        missing_cells += values.iter().filter(|v| v.is_nan()).count();

        records.push(CountyRecord::new(
            CountyId::normalized(raw_id),
            row_data.get(name_idx).unwrap_or_default().trim(),
            values,
        ));
    }

    if missing_cells > 0 {
        info!("{} attribute cells are missing and will render as no data", missing_cells);
    }

    Ok(records)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "cnty_fips,display_name,Poverty_Value,MHI_value,Food_Stamp_Value,Obesity_Value,Physical_Inactivity_Value,Unemployment_Value";

    #[test]
    fn test_parses_rows_in_source_order() {
        let csv = format!(
            "{}\n1001,\"Autauga County, AL\",13.7,58786,11.1,33.0,28.1,3.9\n06037,\"Los Angeles County, CA\",14.9,68044,8.6,21.0,18.5,4.7\n",
            HEADER
        );
        let records = read_records(csv.as_bytes(), &NullConfig::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_str(), "01001");
        assert_eq!(records[0].display_name, "Autauga County, AL");
        assert_eq!(records[0].value(Attribute::MedianHouseholdIncome), 58786.0);
        assert_eq!(records[1].id.as_str(), "06037");
        assert_eq!(records[1].value(Attribute::Unemployment), 4.7);
    }

    #[test]
    fn test_missing_cells_become_nan() {
        let csv = format!("{}\n01001,Autauga,,58786,N/A,33.0,bad,3.9\n", HEADER);
        let records = read_records(csv.as_bytes(), &NullConfig::default()).unwrap();

        let record = &records[0];
        assert_eq!(record.value_opt(Attribute::Poverty), None);
        assert_eq!(record.value_opt(Attribute::FoodStamp), None);
        assert_eq!(record.value_opt(Attribute::PhysicalInactivity), None);
        assert_eq!(record.value_opt(Attribute::Obesity), Some(33.0));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "cnty_fips,display_name,Poverty_Value\n01001,Autauga,13.7\n";
        let err = read_records(csv.as_bytes(), &NullConfig::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "MHI_value"));
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let csv = format!("{}\n,Nowhere,1,2,3,4,5,6\n01003,Baldwin,1,2,3,4,5,6\n", HEADER);
        let records = read_records(csv.as_bytes(), &NullConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "01003");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "state,cnty_fips,display_name,Poverty_Value,MHI_value,Food_Stamp_Value,Obesity_Value,Physical_Inactivity_Value,Unemployment_Value\nAL,01001,Autauga,1,2,3,4,5,6\n";
        let records = read_records(csv.as_bytes(), &NullConfig::default()).unwrap();
        assert_eq!(records[0].value(Attribute::Poverty), 1.0);
        assert_eq!(records[0].value(Attribute::Unemployment), 6.0);
    }
}
