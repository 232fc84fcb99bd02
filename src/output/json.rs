use crate::args::Config;
use crate::assigner::{Assignment, Group, PlacementStat};
use crate::composition::Composition;
use crate::error::Result;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonAssignment<'a> {
    suitable_score: f64,
    mapping: &'a IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placements: Option<Vec<JsonPlacement<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unassigned_destinations: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unused_drivers: Option<Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
struct JsonPlacement<'a> {
    group: Group,
    destination: &'a Composition,
    driver: Option<&'a Composition>,
    score: f64,
    placement: PlacementStat,
}

pub fn output_assignment(config: &Config, path: &str, assignment: &Assignment) -> Result<()> {
    let document = build_document(config, assignment);
    write_json_file(path, &document)
}

pub fn output_compositions(path: &str, compositions: &[Composition]) -> Result<()> {
    write_json_file(path, &compositions)
}

fn build_document<'a>(config: &Config, assignment: &'a Assignment) -> JsonAssignment<'a> {
    let mut document = JsonAssignment {
        suitable_score: assignment.result.suitable_score,
        mapping: &assignment.result.mapping,
        placements: None,
        unassigned_destinations: None,
        unused_drivers: None,
    };
    if config.options.include_compositions {
        document.placements = Some(
            assignment
                .placements
                .iter()
                .map(|placement| JsonPlacement {
                    group: placement.group,
                    destination: &placement.destination,
                    driver: placement.driver.as_ref(),
                    score: placement.score,
                    placement: placement.stat,
                })
                .collect(),
        );
    }
    if config.options.include_unassigned {
        document.unassigned_destinations = Some(
            assignment
                .placements
                .iter()
                .filter(|placement| placement.driver.is_none())
                .map(|placement| placement.destination.value.as_str())
                .collect(),
        );
        document.unused_drivers = Some(assignment.unused_drivers.iter().map(|driver| driver.value.as_str()).collect());
    }
    document
}

fn write_json_file<T: Serialize + ?Sized>(path: &str, value: &T) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
