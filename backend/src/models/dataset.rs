//! Generated datasets and their CSV rendering

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::Metadata;

/// One sample of a synthetic curve: (independent, dependent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<DataPoint> for (f64, f64) {
    fn from(point: DataPoint) -> Self {
        (point.x, point.y)
    }
}

/// Number of decimals written for each column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precision {
    pub x: usize,
    pub y: usize,
}

impl Precision {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A complete lab dataset
///
/// # Example
/// ```
/// use cek_labs_core::models::{DataPoint, Dataset, Metadata, Precision};
///
/// let dataset = Dataset::new(
///     ["X", "Y"],
///     vec![DataPoint::new(1.0, 2.5), DataPoint::new(2.0, 4.75)],
///     Precision::new(1, 2),
///     Metadata::new(),
/// );
/// assert_eq!(dataset.to_csv(), "1.0,2.50\n2.0,4.75\n");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: [String; 2],
    points: Vec<DataPoint>,
    precision: Precision,
    metadata: Metadata,
}

impl Dataset {
    pub fn new(
        columns: [&str; 2],
        points: Vec<DataPoint>,
        precision: Precision,
        metadata: Metadata,
    ) -> Self {
        Self {
            columns: columns.map(str::to_string),
            points,
            precision,
            metadata,
        }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&DataPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&DataPoint> {
        self.points.last()
    }

    pub fn columns(&self) -> [&str; 2] {
        [self.columns[0].as_str(), self.columns[1].as_str()]
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Header-less CSV body: one `x,y` row per point, each ending in `\n`
    pub fn to_csv(&self) -> String {
        let Precision { x: px, y: py } = self.precision;
        self.points
            .iter()
            .map(|p| format!("{:.px$},{:.py$}\n", p.x, p.y, px = px, py = py))
            .collect()
    }

    /// Full data file as a string: column header, rows, then `# Key = value` metadata
    pub fn to_csv_document(&self) -> String {
        let mut doc = format!("{},{}\n", self.columns[0], self.columns[1]);
        doc.push_str(&self.to_csv());
        doc.push_str(&self.metadata.to_comment_lines());
        doc
    }

    /// SHA-256 hex digest of [`to_csv`](Self::to_csv)
    ///
    /// Lets an instructor check that a submitted file matches what the
    /// student's ID generates.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_csv().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
