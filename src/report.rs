use crate::args::Config;
use crate::assigner::{Assignment, AssignmentStatistics, PlacementStat};
use crate::error::Result;
use crate::output::Output;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Serialize, Deserialize, Debug)]
struct JsonReport {
    destinations_file: String,
    drivers_file: String,
    output: Output,
    output_format: String,
    options: JsonReportConfigOptions,
    stats: JsonAssignmentStatistics,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonAssignmentStatistics {
    suitable_score: f64,
    number_of_destinations: usize,
    even_destinations: usize,
    odd_destinations: usize,
    number_of_drivers: usize,
    pooled_drivers: usize,
    collapsed_drivers: usize,
    unused_drivers: usize,
    placement_types: FxHashMap<String, usize>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonReportConfigOptions {
    include_unassigned: bool,
    include_compositions: bool,
    score_precision: Option<usize>,
}

// Reports are only written next to an output file, never for stdout.
// For output "result.csv" this gives "result-report.json" and "result-report.md".
pub fn output_report(config: &Config, destinations_file: &str, drivers_file: &str, assignment: &Assignment) -> Result<()> {
    let Output::File(filename) = &config.output else {
        return Ok(());
    };
    let stem = report_stem(filename);

    let report = json_report(config, destinations_file, drivers_file, assignment);
    let mut report_file = std::fs::File::create(format!("{}-report.json", stem))?;
    report_file.write_all(serde_json::to_string_pretty(&report)?.as_bytes())?;

    let markdown = create_markdown(config, destinations_file, drivers_file, assignment);
    let mut report_file = std::fs::File::create(format!("{}-report.md", stem))?;
    report_file.write_all(markdown.as_bytes())?;
    Ok(())
}

// Strip the extension so that filename.csv or filename.txt becomes filename.
// Dots in directory names are left alone.
fn report_stem(filename: &str) -> String {
    let path = std::path::Path::new(filename);
    match path.extension() {
        Some(_) => path.with_extension("").to_string_lossy().to_string(),
        None => filename.to_string(),
    }
}

fn json_report(config: &Config, destinations_file: &str, drivers_file: &str, assignment: &Assignment) -> JsonReport {
    let statistics = &assignment.statistics;
    let mut placement_types = FxHashMap::default();
    for (key, value) in &statistics.placement_types {
        placement_types.insert(key.to_string(), *value);
    }
    JsonReport {
        destinations_file: destinations_file.to_string(),
        drivers_file: drivers_file.to_string(),
        output: config.output.clone(),
        output_format: config.output_format.to_string(),
        options: JsonReportConfigOptions {
            include_unassigned: config.options.include_unassigned,
            include_compositions: config.options.include_compositions,
            score_precision: config.options.score_precision,
        },
        stats: JsonAssignmentStatistics {
            suitable_score: assignment.result.suitable_score,
            number_of_destinations: statistics.number_of_destinations,
            even_destinations: statistics.even_destinations,
            odd_destinations: statistics.odd_destinations,
            number_of_drivers: statistics.number_of_drivers,
            pooled_drivers: statistics.pooled_drivers,
            collapsed_drivers: statistics.collapsed_drivers,
            unused_drivers: statistics.unused_drivers,
            placement_types,
        },
    }
}

fn table_row(markdown: &mut String, field: &str, value: impl std::fmt::Display) {
    markdown.push_str(&format!("| {} | {} |\n", field, value));
}

fn create_markdown(config: &Config, destinations_file: &str, drivers_file: &str, assignment: &Assignment) -> String {
    let statistics = &assignment.statistics;
    let mut markdown = String::new();
    markdown.push_str("# Report\n\n");
    markdown.push_str("## Data\n\n");
    table_row(&mut markdown, "Field", "Value");
    markdown.push_str("| --- | --- |\n");
    table_row(&mut markdown, "destinations file", destinations_file);
    table_row(&mut markdown, "drivers file", drivers_file);
    if let Output::File(filename) = &config.output {
        table_row(&mut markdown, "output file", filename);
    } else {
        table_row(&mut markdown, "output file", "stdout");
    }
    table_row(&mut markdown, "output format", config.output_format);
    markdown.push('\n');

    markdown.push_str("## Options\n\n");
    table_row(&mut markdown, "Option", "Value");
    markdown.push_str("| --- | --- |\n");
    table_row(&mut markdown, "include_unassigned", config.options.include_unassigned);
    table_row(&mut markdown, "include_compositions", config.options.include_compositions);
    table_row(&mut markdown, "score_precision", config.options.score_precision.map_or("none".to_string(), |p| p.to_string()));
    markdown.push('\n');

    markdown.push_str("## Statistics\n\n");
    table_row(&mut markdown, "Field", "Value");
    markdown.push_str("| --- | --- |\n");
    table_row(&mut markdown, "Suitable score", config.options.format_score(assignment.result.suitable_score));
    table_row(&mut markdown, "Number of destinations", statistics.number_of_destinations);
    table_row(&mut markdown, "Even destinations", statistics.even_destinations);
    table_row(&mut markdown, "Odd destinations", statistics.odd_destinations);
    table_row(&mut markdown, "Number of drivers", statistics.number_of_drivers);
    if statistics.collapsed_drivers > 0 {
        table_row(&mut markdown, "Duplicate drivers collapsed", statistics.collapsed_drivers);
    }
    placement_rows(&mut markdown, statistics);
    table_row(&mut markdown, "Unused drivers", statistics.unused_drivers);
    cmdline_to_run(&mut markdown, config, destinations_file, drivers_file);
    markdown
}

fn placement_rows(markdown: &mut String, statistics: &AssignmentStatistics) {
    for (stat, label) in [
        (PlacementStat::Bonus, "Assigned with bonus"),
        (PlacementStat::Base, "Assigned at base score"),
        (PlacementStat::NoDriver, "Destinations without driver"),
    ] {
        if statistics.placement_stat(stat) > 0 {
            table_row(markdown, label, statistics.placement_stat(stat));
            table_row(markdown, &format!("{} percentage", label), format!("{:.2}", statistics.placement_stat_percent(stat)));
        }
    }
}

// Replicate a cargo run command line from the config
fn cmdline_to_run(markdown: &mut String, config: &Config, destinations_file: &str, drivers_file: &str) {
    let command = format!("-c {}", config.cmd);
    let destinations = format!("-d {}", destinations_file);
    let drivers = format!("-r {}", drivers_file);
    let output = match &config.output {
        Output::Stdout => "".to_string(),
        Output::File(filename) => format!("-o {}", filename),
    };
    let output_format = format!("-F {}", config.output_format);
    let include_unassigned = if config.options.include_unassigned { "-O include-unassigned".to_string() } else { "".to_string() };
    let include_compositions = if config.options.include_compositions { "-O include-compositions".to_string() } else { "".to_string() };
    let score_precision = config.options.score_precision.map_or("".to_string(), |x| format!("-O score-precision={}", x));
    let verbose = if config.verbose { "-v".to_string() } else { "".to_string() };
    let combined_options = [command, destinations, drivers, output, output_format, include_unassigned, include_compositions, score_precision, verbose];
    let options = combined_options.iter().filter(|x| !x.is_empty()).cloned().collect::<Vec<String>>().join(" ");
    markdown.push('\n');
    markdown.push_str("## Command line\n\n");
    markdown.push_str(&format!("```\ncargo run --release -- {}\n```\n", options));
}
