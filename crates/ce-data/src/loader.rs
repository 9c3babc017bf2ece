//! Asynchronous loading of both sources

use tracing::info;

use crate::config::LoadConfig;
use crate::sources::{load_boundaries, load_records};
use crate::store::Dataset;
use crate::DataError;

/// Read the tabular and boundary sources concurrently and join them.
///
/// Fails as a whole if either source fails; nothing is retried.
pub async fn load_dataset(config: LoadConfig) -> Result<Dataset, DataError> {
    info!("Loading {:?} and {:?}", config.data_path, config.boundaries_path);

    let records_task = tokio::task::spawn_blocking({
        let path = config.data_path.clone();
        let null_config = config.null_config.clone();
        move || load_records(&path, &null_config)
    });
    let boundaries_task = tokio::task::spawn_blocking({
        let path = config.boundaries_path.clone();
        let object = config.topology_object.clone();
        move || load_boundaries(&path, &object)
    });

    let (records, boundaries) = tokio::try_join!(flatten(records_task), flatten(boundaries_task))?;

    Ok(Dataset::new(records, boundaries))
}

async fn flatten<T>(handle: tokio::task::JoinHandle<Result<T, DataError>>) -> Result<T, DataError> {
    handle.await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use ce_core::{Attribute, CountyId};
    use std::fs;
    use tempfile::tempdir;

    const CSV: &str = "cnty_fips,display_name,Poverty_Value,MHI_value,Food_Stamp_Value,Obesity_Value,Physical_Inactivity_Value,Unemployment_Value\n\
01001,Autauga,10,50000,8,30,25,4\n\
01003,Baldwin,20,60000,,31,26,6\n";

    const TOPOLOGY: &str = r#"{
        "type": "Topology",
        "arcs": [[[0, 0], [1, 0], [1, 1], [0, 0]], [[2, 0], [3, 0], [3, 1], [2, 0]]],
        "objects": { "counties": { "type": "GeometryCollection", "geometries": [
            { "type": "Polygon", "id": "01001", "arcs": [[0]] },
            { "type": "Polygon", "id": "01003", "arcs": [[1]] }
        ] } }
    }"#;

    #[tokio::test]
    async fn test_loads_and_joins_both_sources() {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("data.csv");
        let boundaries_path = dir.path().join("counties.json");
        fs::write(&data_path, CSV).unwrap();
        fs::write(&boundaries_path, TOPOLOGY).unwrap();

        let dataset = load_dataset(LoadConfig::new(&data_path, &boundaries_path)).await.unwrap();

        assert_eq!(dataset.records().len(), 2);
        assert_eq!(dataset.features().len(), 2);
        assert_eq!(dataset.features()[1].value(Attribute::Poverty), Some(20.0));
        assert_eq!(dataset.features()[1].value(Attribute::FoodStamp), None);
        assert!(dataset.record(&CountyId::new("01001")).is_some());
    }

    #[tokio::test]
    async fn test_missing_source_fails_the_load() {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("data.csv");
        fs::write(&data_path, CSV).unwrap();

        let result = load_dataset(LoadConfig::new(&data_path, dir.path().join("missing.json"))).await;
        assert!(matches!(result, Err(DataError::Io(_))));
    }
}
