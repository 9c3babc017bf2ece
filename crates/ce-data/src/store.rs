//! Loaded dataset and the boundary/attribute join

use ahash::AHashMap;
use ce_core::{Attribute, CountyId, CountyRecord};
use geo_types::MultiPolygon;
use tracing::{info, warn};

/// A county boundary in lon/lat degrees, as read from the boundary source
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub id: CountyId,
    pub geometry: MultiPolygon<f64>,
}

/// A boundary joined with a copy of its county record
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFeature {
    pub id: CountyId,
    pub geometry: MultiPolygon<f64>,
    /// `None` when the tabular source has no row for this boundary
    pub record: Option<CountyRecord>,
}

impl EnrichedFeature {
    /// Attribute value, `None` when missing or unmatched
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        self.record.as_ref()?.value_opt(attribute)
    }

    /// Name for tooltips, falling back to the id
    pub fn display_name(&self) -> &str {
        self.record
            .as_ref()
            .map(|record| record.display_name.as_str())
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Join boundaries with records by id, keeping boundary order
pub fn join_features(features: Vec<BoundaryFeature>, records: &[CountyRecord]) -> Vec<EnrichedFeature> {
    let by_id: AHashMap<&CountyId, &CountyRecord> = records.iter().map(|r| (&r.id, r)).collect();

    let mut unmatched = 0usize;
    let joined: Vec<EnrichedFeature> = features
        .into_iter()
        .map(|feature| {
            let record = by_id.get(&feature.id).map(|r| (*r).clone());
            if record.is_none() {
                unmatched += 1;
            }
            EnrichedFeature {
                id: feature.id,
                geometry: feature.geometry,
                record,
            }
        })
        .collect();

    if unmatched > 0 {
        warn!("{} of {} boundaries have no matching county record", unmatched, joined.len());
    }

    joined
}

/// Immutable county records plus joined boundaries
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CountyRecord>,
    features: Vec<EnrichedFeature>,
    index: AHashMap<CountyId, usize>,
}

impl Dataset {
    /// Build the dataset, performing the one-time attribute join
    pub fn new(records: Vec<CountyRecord>, boundaries: Vec<BoundaryFeature>) -> Self {
        let features = join_features(boundaries, &records);

        let mut index = AHashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                warn!("Duplicate county id {}, keeping the last row", record.id);
            }
        }

        info!("Dataset ready: {} records, {} boundaries", records.len(), features.len());

        Self {
            records,
            features,
            index,
        }
    }

    /// Records in source order
    pub fn records(&self) -> &[CountyRecord] {
        &self.records
    }

    pub fn features(&self) -> &[EnrichedFeature] {
        &self.features
    }

    pub fn record(&self, id: &CountyId) -> Option<&CountyRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
