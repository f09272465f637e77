//! CSV loading for the bundled classification datasets.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Optional header row (a first row with no numeric cell is skipped)
//! - Double-quoted fields with embedded commas are handled correctly
//!
//! Row layouts:
//! - iris — four measurements, then the species name
//! - wine — the class number, then thirteen measurements

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::labels::{ClassLabel, IrisSpecies, WineClass};
use crate::error::{NetError, Result};

pub const IRIS_FEATURES: usize = 4;
pub const WINE_FEATURES: usize = 13;

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Feature rows paired with their labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<L> {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<L>,
}

impl<L: ClassLabel> Dataset<L> {
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<L>) -> Result<Dataset<L>> {
        if features.len() != labels.len() {
            return Err(NetError::shape("dataset labels", features.len(), labels.len()));
        }
        Ok(Dataset { features, labels })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// One-hot target vector for every label.
    pub fn targets(&self) -> Result<Vec<Vec<f64>>> {
        self.labels.iter()
            .map(|l| l.one_hot().ok_or_else(|| NetError::shape("one-hot class index", L::CLASSES, l.index())))
            .collect()
    }

    /// Reorders rows, keeping each row with its label.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        self.features = order.iter().map(|&i| self.features[i].clone()).collect();
        self.labels = order.iter().map(|&i| self.labels[i].clone()).collect();
    }

    /// Splits into the first `train_len` rows and the rest.
    pub fn split(mut self, train_len: usize) -> Result<(Dataset<L>, Dataset<L>)> {
        if train_len > self.len() {
            return Err(NetError::shape("train split", self.len(), train_len));
        }
        let rest_features = self.features.split_off(train_len);
        let rest_labels = self.labels.split_off(train_len);
        Ok((self, Dataset { features: rest_features, labels: rest_labels }))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn load_iris<P: AsRef<Path>>(path: P) -> Result<Dataset<IrisSpecies>> {
    parse_iris(&std::fs::read_to_string(path)?)
}

pub fn load_wine<P: AsRef<Path>>(path: P) -> Result<Dataset<WineClass>> {
    parse_wine(&std::fs::read_to_string(path)?)
}

/// Parses iris rows: `sepal_l,sepal_w,petal_l,petal_w,species`.
pub fn parse_iris(text: &str) -> Result<Dataset<IrisSpecies>> {
    parse_rows(text, |cells, line| {
        expect_columns(cells, IRIS_FEATURES + 1, line)?;
        let features = parse_floats(&cells[..IRIS_FEATURES], line)?;
        let species = cells[IRIS_FEATURES].parse::<IrisSpecies>()
            .map_err(|message| NetError::Parse { line, message })?;
        Ok((features, species))
    })
}

/// Parses wine rows: `class,f1,..,f13`.
pub fn parse_wine(text: &str) -> Result<Dataset<WineClass>> {
    parse_rows(text, |cells, line| {
        expect_columns(cells, WINE_FEATURES + 1, line)?;
        let class = cells[0].parse::<WineClass>()
            .map_err(|message| NetError::Parse { line, message })?;
        let features = parse_floats(&cells[1..], line)?;
        Ok((features, class))
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn parse_rows<L, F>(text: &str, parse_row: F) -> Result<Dataset<L>>
where
    L: ClassLabel,
    F: Fn(&[String], usize) -> Result<(Vec<f64>, L)>,
{
    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut first = true;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells = parse_csv_row(line);
        if std::mem::take(&mut first) && is_header(&cells) {
            continue;
        }

        let (row, label) = parse_row(&cells, line_no)?;
        features.push(row);
        labels.push(label);
    }

    Dataset::new(features, labels)
}

/// Returns `true` if no cell of the row is numeric.
fn is_header(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim().parse::<f64>().is_err())
}

fn expect_columns(cells: &[String], expected: usize, line: usize) -> Result<()> {
    if cells.len() != expected {
        return Err(NetError::Parse {
            line,
            message: format!("expected {} columns, got {}", expected, cells.len()),
        });
    }
    Ok(())
}

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Escaped quote inside quoted field.
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Parses a slice of string cells as `f64`, returning an error with line info on failure.
fn parse_floats(cells: &[String], line: usize) -> Result<Vec<f64>> {
    cells.iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| NetError::Parse {
                line,
                message: format!("'{}' is not a valid number", c.trim()),
            })
        })
        .collect()
}
