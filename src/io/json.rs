//! Read/write fit results and interval outputs as JSON.
//!
//! JSON is the portable hand-off format between a solver run and later
//! interval computation or plotting. The Jacobian is stored in nalgebra's
//! serde layout.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{FitResult, IntervalBounds, PredictionBand};
use crate::error::{Error, Result};

/// Read a fit result, validating shapes and finiteness.
pub fn read_fit_result(path: &Path) -> Result<FitResult> {
    let fit: FitResult = read_json(path)?;
    fit.validate()?;
    Ok(fit)
}

pub fn write_fit_result(path: &Path, fit: &FitResult) -> Result<()> {
    write_json(path, fit)
}

pub fn write_intervals(path: &Path, bounds: &IntervalBounds) -> Result<()> {
    write_json(path, bounds)
}

pub fn read_intervals(path: &Path) -> Result<IntervalBounds> {
    read_json(path)
}

pub fn write_band(path: &Path, band: &PredictionBand) -> Result<()> {
    write_json(path, band)
}

pub fn read_band(path: &Path) -> Result<PredictionBand> {
    read_json(path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::Io(format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .map_err(|e| Error::Json(format!("Failed to write '{}': {e}", path.display())))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .map_err(|e| Error::Io(format!("Failed to open '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::Json(format!("Invalid JSON in '{}': {e}", path.display())))
}
