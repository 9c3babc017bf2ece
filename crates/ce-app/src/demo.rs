//! Synthetic dataset for running without input files
//!
//! A 12x8 grid of square "counties" over the contiguous United States with
//! seeded attribute values. Poverty rises towards the south-east, and the
//! other attributes follow it with noise so the linked views show structure.

use ce_core::{CountyId, CountyRecord};
use ce_data::{BoundaryFeature, Dataset};
use geo_types::{polygon, MultiPolygon};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEMO_SEED: u64 = 42;

const COLUMNS: usize = 12;
const ROWS: usize = 8;
const WEST: f64 = -124.7;
const EAST: f64 = -67.0;
const SOUTH: f64 = 25.1;
const NORTH: f64 = 49.4;
const MISSING_RATE: f64 = 0.04;

pub fn demo_dataset(seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let width = (EAST - WEST) / COLUMNS as f64;
    let height = (NORTH - SOUTH) / ROWS as f64;

    let mut records = Vec::with_capacity(COLUMNS * ROWS);
    let mut boundaries = Vec::with_capacity(COLUMNS * ROWS);

    for row in 0..ROWS {
        for col in 0..COLUMNS {
            let id = CountyId::new(format!("{:02}{:03}", 60 + row, 1 + 2 * col));
            let name = format!("Demo County {}-{}", row + 1, col + 1);

            let lon = WEST + col as f64 * width;
            let lat = SOUTH + row as f64 * height;
            boundaries.push(BoundaryFeature {
                id: id.clone(),
                geometry: MultiPolygon::new(vec![polygon![
                    (x: lon, y: lat),
                    (x: lon + width, y: lat),
                    (x: lon + width, y: lat + height),
                    (x: lon, y: lat + height),
                    (x: lon, y: lat),
                ]]),
            });

            let east = col as f64 / (COLUMNS - 1) as f64;
            let south = 1.0 - row as f64 / (ROWS - 1) as f64;
            let hardship = 0.5 * east + 0.5 * south;

            let poverty = 6.0 + 22.0 * hardship + rng.gen_range(-3.0..3.0);
            let values = [
                poverty,
                95_000.0 - 1_800.0 * poverty + rng.gen_range(-8_000.0..8_000.0),
                0.6 * poverty + rng.gen_range(-2.0..2.0),
                24.0 + 14.0 * hardship + rng.gen_range(-3.0..3.0),
                18.0 + 16.0 * hardship + rng.gen_range(-3.0..3.0),
                2.5 + 0.25 * poverty + rng.gen_range(-1.0..1.0),
            ]
            .map(|value| if rng.gen_bool(MISSING_RATE) { f64::NAN } else { value });

            records.push(CountyRecord::new(id, name, values));
        }
    }

    Dataset::new(records, boundaries)
}
