use polars::prelude::{DataType, Field, Schema};
use serde::Deserialize;

/// Number of fields in every Cleveland record.
pub const WIDTH: usize = 14;

/// Column names from the dataset description, in file order.
pub const COLUMNS: [&str; WIDTH] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal", "target",
];

/// Tokens read as a missing value in addition to the sentinel. Empty cells
/// are always missing.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One cleaned row of the cleveland output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeartRecord {
    pub age: f64,
    pub sex: f64,
    pub cp: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: f64,
    pub restecg: f64,
    pub thalach: f64,
    pub exang: f64,
    pub oldpeak: f64,
    pub slope: f64,
    pub ca: f64,
    pub thal: f64,
    pub target: f64,
}

impl HeartRecord {
    pub fn clean_schema() -> Schema {
        Schema::from_iter(
            COLUMNS
                .iter()
                .map(|name| Field::new(name, DataType::Float64)),
        )
    }

    pub fn values(&self) -> [f64; WIDTH] {
        [
            self.age,
            self.sex,
            self.cp,
            self.trestbps,
            self.chol,
            self.fbs,
            self.restecg,
            self.thalach,
            self.exang,
            self.oldpeak,
            self.slope,
            self.ca,
            self.thal,
            self.target,
        ]
    }
}
