use crate::error::{Error, Result};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};

// Resolve the two input paths. Paths given on the command line win, anything
// missing is read from `reader` one line at a time (destinations first).
pub fn resolve_paths(destinations: Option<String>, drivers: Option<String>, reader: &mut dyn BufRead) -> Result<(String, String)> {
    let destinations = match destinations {
        Some(path) => path,
        None => read_path(reader, "destinations")?,
    };
    let drivers = match drivers {
        Some(path) => path,
        None => read_path(reader, "drivers")?,
    };
    Ok((destinations, drivers))
}

fn read_path(reader: &mut dyn BufRead, name: &str) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::MissingInput(format!("no path given for {} file", name)));
    }
    Ok(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string())
}

// One entry per line. Blank lines are kept, the final newline does not add an
// empty entry.
pub fn read_lines(path: &str) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| Error::FileRead {
        path: path.to_string(),
        source,
    })?;
    let lines = parse_lines(BufReader::new(file)).map_err(|source| Error::FileRead {
        path: path.to_string(),
        source,
    })?;
    info!("Read {} lines from {}", lines.len(), path);
    Ok(lines)
}

fn parse_lines(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    reader.lines().collect()
}
