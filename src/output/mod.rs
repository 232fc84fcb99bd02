pub mod csv;
pub mod xlsx;
pub mod text;
pub mod json;

use crate::args::{Config, OutputFormat};
use crate::assigner::{Assignment, Placement};
use crate::composition::Composition;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub enum Cell {
    String(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    Stdout,
    File(String),
}

pub fn output_assignment(config: &Config, assignment: &Assignment) -> Result<()> {
    create_output_dir(config)?;
    match (config.output_format, &config.output) {
        (OutputFormat::Text, _) => text::output_assignment(config, assignment),
        (OutputFormat::Json, Output::File(path)) => json::output_assignment(config, path, assignment),
        (OutputFormat::CSV, Output::File(path)) => csv::output_rows(path, &assignment_headers(config), &assignment_rows(config, assignment)),
        (OutputFormat::XLSX, Output::File(path)) => xlsx::output_rows(path, &assignment_headers(config), &assignment_rows(config, assignment)),
        (format, Output::Stdout) => Err(Error::UnsupportedOutput(format!("{} output requires an output file", format))),
    }
}

pub fn output_compositions(config: &Config, compositions: &[Composition]) -> Result<()> {
    create_output_dir(config)?;
    match (config.output_format, &config.output) {
        (OutputFormat::Text, _) => text::output_compositions(config, compositions),
        (OutputFormat::Json, Output::File(path)) => json::output_compositions(path, compositions),
        (OutputFormat::CSV, Output::File(path)) => csv::output_rows(path, &composition_headers(), &composition_rows(compositions)),
        (OutputFormat::XLSX, Output::File(path)) => xlsx::output_rows(path, &composition_headers(), &composition_rows(compositions)),
        (format, Output::Stdout) => Err(Error::UnsupportedOutput(format!("{} output requires an output file", format))),
    }
}

// Create the output directory for paths with a parent if it does not exist
fn create_output_dir(config: &Config) -> Result<()> {
    if let Output::File(path) = &config.output {
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn assignment_headers(config: &Config) -> Vec<String> {
    let mut headers = vec!["destination".to_string(), "group".to_string(), "driver".to_string(), "score".to_string(), "placement".to_string()];
    if config.options.include_compositions {
        headers.push("destination_size".to_string());
        headers.push("destination_vowels".to_string());
        headers.push("destination_consonants".to_string());
        headers.push("driver_size".to_string());
        headers.push("driver_vowels".to_string());
        headers.push("driver_consonants".to_string());
    }
    headers
}

// One row per destination in processing order. Destinations without a driver
// and drivers never selected are only listed with include-unassigned.
fn assignment_rows(config: &Config, assignment: &Assignment) -> Vec<Vec<Cell>> {
    let mut rows: Vec<Vec<Cell>> = assignment
        .placements
        .iter()
        .filter(|placement| placement.driver.is_some() || config.options.include_unassigned)
        .map(|placement| placement_row(config, placement))
        .collect();
    if config.options.include_unassigned {
        for driver in &assignment.unused_drivers {
            let mut row = vec![
                Cell::String("".to_string()),
                Cell::String("".to_string()),
                Cell::String(driver.value.clone()),
                Cell::Number(0.0),
                Cell::String("Unused".to_string()),
            ];
            if config.options.include_compositions {
                row.extend(empty_composition_cells());
                row.extend(composition_cells(driver));
            }
            rows.push(row);
        }
    }
    rows
}

fn placement_row(config: &Config, placement: &Placement) -> Vec<Cell> {
    let driver_value = placement.driver.as_ref().map(|driver| driver.value.clone()).unwrap_or_default();
    let mut row = vec![
        Cell::String(placement.destination.value.clone()),
        Cell::String(placement.group.to_string()),
        Cell::String(driver_value),
        Cell::Number(placement.score),
        Cell::String(placement.stat.to_string()),
    ];
    if config.options.include_compositions {
        row.extend(composition_cells(&placement.destination));
        match &placement.driver {
            Some(driver) => row.extend(composition_cells(driver)),
            None => row.extend(empty_composition_cells()),
        }
    }
    row
}

fn composition_cells(composition: &Composition) -> Vec<Cell> {
    vec![
        Cell::Number(composition.size as f64),
        Cell::Number(composition.vowels as f64),
        Cell::Number(composition.consonants as f64),
    ]
}

fn empty_composition_cells() -> Vec<Cell> {
    vec![Cell::String("".to_string()), Cell::String("".to_string()), Cell::String("".to_string())]
}

fn composition_headers() -> Vec<String> {
    vec!["value".to_string(), "size".to_string(), "vowels".to_string(), "consonants".to_string()]
}

fn composition_rows(compositions: &[Composition]) -> Vec<Vec<Cell>> {
    compositions
        .iter()
        .map(|composition| {
            let mut row = vec![Cell::String(composition.value.clone())];
            row.extend(composition_cells(composition));
            row
        })
        .collect()
}
