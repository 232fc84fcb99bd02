use std::io::Write;
use crate::args::Config;
use crate::assigner::Assignment;
use crate::composition::Composition;
use crate::error::Result;
use crate::output::Output;

fn writer(config: &Config) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match &config.output {
        Output::Stdout => Box::new(std::io::stdout()),
        Output::File(filename) => {
            let file = std::fs::File::create(filename)?;
            Box::new(std::io::BufWriter::new(file))
        }
    };
    Ok(writer)
}

pub fn output_assignment(config: &Config, assignment: &Assignment) -> Result<()> {
    let mut writer = writer(config)?;
    write_assignment(config, &mut writer, assignment)?;
    writer.flush()?;
    Ok(())
}

pub fn output_compositions(config: &Config, compositions: &[Composition]) -> Result<()> {
    let mut writer = writer(config)?;
    write_compositions(&mut writer, compositions)?;
    writer.flush()?;
    Ok(())
}

fn write_assignment(config: &Config, output: &mut dyn Write, assignment: &Assignment) -> Result<()> {
    let result = &assignment.result;
    writeln!(output, "Suitable score: {}", config.options.format_score(result.suitable_score))?;
    writeln!(output, "Mapping:")?;
    for (driver, destination) in &result.mapping {
        writeln!(output, "  {} => {}", driver, destination)?;
    }
    if config.options.include_compositions {
        writeln!(output, "Placements:")?;
        for placement in &assignment.placements {
            let driver = match &placement.driver {
                Some(driver) => format!("{} {}", driver.value, composition_summary(driver)),
                None => "-".to_string(),
            };
            writeln!(
                output,
                "  [{}] {} {} <= {}: {} ({})",
                placement.group,
                placement.destination.value,
                composition_summary(&placement.destination),
                driver,
                config.options.format_score(placement.score),
                placement.stat
            )?;
        }
    }
    if config.options.include_unassigned {
        writeln!(output, "Destinations without driver:")?;
        for placement in assignment.placements.iter().filter(|placement| placement.driver.is_none()) {
            writeln!(output, "  {}", placement.destination.value)?;
        }
        writeln!(output, "Unused drivers:")?;
        for driver in &assignment.unused_drivers {
            writeln!(output, "  {}", driver.value)?;
        }
    }
    Ok(())
}

fn composition_summary(composition: &Composition) -> String {
    format!("(size {}, vowels {}, consonants {})", composition.size, composition.vowels, composition.consonants)
}

fn write_compositions(output: &mut dyn Write, compositions: &[Composition]) -> Result<()> {
    for composition in compositions {
        writeln!(output, "{:?}: {}", composition.value, composition_summary(composition))?;
    }
    Ok(())
}
