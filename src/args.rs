use clap::Parser;
use crate::cmd::Cmd;
use crate::error::{Error, Result};
use crate::output::Output;
use std::fmt::{self, Display, Formatter};

#[derive(Parser, Debug)]
#[command(name = "shipment-matcher", version, about = "Greedy assignment of drivers to destinations")]
pub struct Args {
    /// Command to run: Available commands:
    /// 'assign', 'analyze' (Default: 'assign')
    #[clap(short = 'c', long = "command")]
    command: Option<String>,
    /// File with one destination per line, used with 'assign'.
    /// Read as a path from stdin if not given.
    #[clap(short = 'd', long = "destinations")]
    destinations: Option<String>,
    /// File with one driver per line, used with 'assign'.
    /// Read as a path from stdin if not given.
    #[clap(short = 'r', long = "drivers")]
    drivers: Option<String>,
    /// Input. File to analyze with 'analyze', one entry per line.
    #[clap(short = 'i', long = "input")]
    input: Option<String>,
    /// Output. File to write output to. Defaults to stdout.
    #[clap(short = 'o', long = "output")]
    output: Option<String>,
    /// Output format. Available formats: 'text', 'json', 'csv', 'xlsx'
    /// [Defaults to 'text']
    #[clap(short = 'F', long = "output-format")]
    output_format: Option<String>,
    /// Print verbose output
    #[clap(short = 'v', long = "verbose")]
    verbose: bool,
    /// Options. Extra options, for example '-O include-unassigned' or '-O score-precision=2'
    #[clap(short = 'O', long = "option")]
    options: Vec<String>,
}

#[derive(Debug)]
pub struct Config {
    pub cmd: Cmd,
    pub destinations: Option<String>,
    pub drivers: Option<String>,
    pub input: Option<String>,
    pub output: Output,
    pub output_format: OutputFormat,
    pub verbose: bool,
    pub options: ConfigOptions,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    pub include_unassigned: bool,
    pub include_compositions: bool,
    pub score_precision: Option<usize>,
}

impl ConfigOptions {
    fn option_name(s: &str) -> &str {
        s.split('=').next().unwrap_or("")
    }

    fn option_value(s: &str) -> Result<&str> {
        s.split_once('=')
            .map(|(_, value)| value)
            .ok_or_else(|| Error::InvalidOption(format!("{} requires a value", s)))
    }

    fn usize_option(s: &str) -> Result<usize> {
        let value = Self::option_value(s)?;
        value
            .parse::<usize>()
            .map_err(|_| Error::InvalidOption(format!("{} is not a valid number in {}", value, s)))
    }

    pub fn format_score(&self, score: f64) -> String {
        match self.score_precision {
            Some(precision) => format!("{:.*}", precision, score),
            None => score.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    CSV,
    XLSX,
}

impl TryFrom<&str> for OutputFormat {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::CSV),
            "xlsx" => Ok(OutputFormat::XLSX),
            _ => Err(Error::UnsupportedOutput(format!("unknown output format '{}'", s))),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::CSV => write!(f, "csv"),
            OutputFormat::XLSX => write!(f, "xlsx"),
        }
    }
}

impl Config {
    pub fn new() -> Result<Config> {
        Config::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Config> {
        let options = parse_options(&args)?;
        parse_command(args, options)
    }
}

fn parse_options(args: &Args) -> Result<ConfigOptions> {
    let mut options = ConfigOptions::default();
    for option in &args.options {
        match ConfigOptions::option_name(option) {
            "include-unassigned" => options.include_unassigned = true,
            "include-compositions" => options.include_compositions = true,
            "score-precision" => options.score_precision = Some(ConfigOptions::usize_option(option)?),
            _ => return Err(Error::UnknownOption(option.clone())),
        }
    }
    Ok(options)
}

fn parse_command(args: Args, options: ConfigOptions) -> Result<Config> {
    let command = args.command.clone().unwrap_or("assign".to_string());
    let cmd = match command.as_str() {
        "assign" => Cmd::Assign,
        "analyze" => Cmd::Analyze,
        _ => return Err(Error::UnknownCommand(command)),
    };
    if let Cmd::Analyze = cmd {
        if args.input.is_none() {
            return Err(Error::MissingInput("input file is required for analyze command".to_string()));
        }
    }
    let output = match args.output {
        Some(filename) => Output::File(filename),
        None => Output::Stdout,
    };
    let output_format = match &args.output_format {
        Some(format) => OutputFormat::try_from(format.as_str())?,
        None => OutputFormat::Text,
    };
    // Only text can be written to stdout
    if output_format != OutputFormat::Text && output == Output::Stdout {
        return Err(Error::UnsupportedOutput(format!("{} output requires an output file (-o)", output_format)));
    }
    Ok(Config {
        cmd,
        destinations: args.destinations,
        drivers: args.drivers,
        input: args.input,
        output,
        output_format,
        verbose: args.verbose,
        options,
    })
}
