//! County records and the attributes they carry

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of a county FIPS code
const FIPS_WIDTH: usize = 5;

/// Identifier shared by tabular records and boundary features
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountyId(String);

impl CountyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize a raw identifier so both sources agree on the join key.
    ///
    /// Surrounding whitespace is dropped and purely numeric ids shorter than
    /// a FIPS code are left-padded with zeros (`1001` becomes `01001`).
    pub fn normalized(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty()
            && trimmed.len() < FIPS_WIDTH
            && trimmed.bytes().all(|b| b.is_ascii_digit())
        {
            Self(format!("{:0>width$}", trimmed, width = FIPS_WIDTH))
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The six socioeconomic attributes of a county
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Poverty,
    MedianHouseholdIncome,
    FoodStamp,
    Obesity,
    PhysicalInactivity,
    Unemployment,
}

impl Attribute {
    /// All attributes in dropdown and radar-axis order
    pub const ALL: [Attribute; 6] = [
        Attribute::Poverty,
        Attribute::MedianHouseholdIncome,
        Attribute::FoodStamp,
        Attribute::Obesity,
        Attribute::PhysicalInactivity,
        Attribute::Unemployment,
    ];

    /// Column name in the tabular source
    pub fn column(self) -> &'static str {
        match self {
            Attribute::Poverty => "Poverty_Value",
            Attribute::MedianHouseholdIncome => "MHI_value",
            Attribute::FoodStamp => "Food_Stamp_Value",
            Attribute::Obesity => "Obesity_Value",
            Attribute::PhysicalInactivity => "Physical_Inactivity_Value",
            Attribute::Unemployment => "Unemployment_Value",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Poverty => "Poverty Value",
            Attribute::MedianHouseholdIncome => "MHI value",
            Attribute::FoodStamp => "Food Stamp Value",
            Attribute::Obesity => "Obesity Value",
            Attribute::PhysicalInactivity => "Physical Inactivity Value",
            Attribute::Unemployment => "Unemployment Value",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up an attribute by its source column name
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.column() == column)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One county row. Missing values are stored as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyRecord {
    pub id: CountyId,
    pub display_name: String,
    values: [f64; 6],
}

impl CountyRecord {
    pub fn new(id: CountyId, display_name: impl Into<String>, values: [f64; 6]) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            values,
        }
    }

    /// Raw value, NaN when missing
    pub fn value(&self, attribute: Attribute) -> f64 {
        self.values[attribute.index()]
    }

    /// Value, `None` when missing
    pub fn value_opt(&self, attribute: Attribute) -> Option<f64> {
        let value = self.value(attribute);
        (!value.is_nan()).then_some(value)
    }

    pub fn values(&self) -> &[f64; 6] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_normalization_pads_numeric_ids() {
        assert_eq!(CountyId::normalized("1001").as_str(), "01001");
        assert_eq!(CountyId::normalized(" 06037 ").as_str(), "06037");
        assert_eq!(CountyId::normalized("48201").as_str(), "48201");
        assert_eq!(CountyId::normalized("A12").as_str(), "A12");
    }

    #[test]
    fn test_attribute_columns_round_trip() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_column(attribute.column()), Some(attribute));
        }
        assert_eq!(Attribute::from_column("Population"), None);
        assert_eq!(Attribute::MedianHouseholdIncome.label(), "MHI value");
    }

    #[test]
    fn test_missing_value_is_not_zero() {
        let record = CountyRecord::new(
            CountyId::new("01001"),
            "Autauga County, AL",
            [10.0, f64::NAN, 0.0, 30.0, 25.0, 4.0],
        );
        assert_eq!(record.value_opt(Attribute::Poverty), Some(10.0));
        assert_eq!(record.value_opt(Attribute::MedianHouseholdIncome), None);
        assert_eq!(record.value_opt(Attribute::FoodStamp), Some(0.0));
        assert!(record.value(Attribute::MedianHouseholdIncome).is_nan());
    }

    #[test]
    fn test_attribute_deserializes_from_variant_name() {
        let attribute: Attribute = serde_json::from_str("\"Unemployment\"").unwrap();
        assert_eq!(attribute, Attribute::Unemployment);
    }
}
