use crate::args::Config;
use crate::assigner;
use crate::composition;
use crate::error::Result;
use crate::input;
use crate::output;
use crate::report;
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Cmd {
    Assign,
    Analyze,
}

impl Cmd {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Cmd::Assign => assign(config),
            Cmd::Analyze => analyze(config),
        }
    }
}

impl Display for Cmd {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Cmd::Assign => write!(f, "assign"),
            Cmd::Analyze => write!(f, "analyze"),
        }
    }
}

fn assign(config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let (destinations_file, drivers_file) = input::resolve_paths(
        config.destinations.clone(),
        config.drivers.clone(),
        &mut stdin.lock(),
    )?;
    let destinations = input::read_lines(&destinations_file)?;
    let drivers = input::read_lines(&drivers_file)?;
    let assignment = assigner::assign(&destinations, &drivers);
    output::output_assignment(config, &assignment)?;
    report::output_report(config, &destinations_file, &drivers_file, &assignment)
}

fn analyze(config: &Config) -> Result<()> {
    let path = config.input.clone().unwrap_or_default();
    let compositions: Vec<_> = input::read_lines(&path)?
        .iter()
        .map(|line| composition::analyze(line))
        .collect();
    output::output_compositions(config, &compositions)
}
