use std::fs::File;
use std::io::{BufWriter, Write};
use crate::error::Result;
use crate::output::Cell;

// Tab separated, one header line followed by the rows
pub fn output_rows(path: &str, headers: &[String], rows: &[Vec<Cell>]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, headers, rows)?;
    writer.flush()?;
    Ok(())
}

fn write_rows(output: &mut dyn Write, headers: &[String], rows: &[Vec<Cell>]) -> Result<()> {
    writeln!(output, "{}", headers.join("\t"))?;
    for row in rows {
        output_csv_row(output, row)?;
    }
    Ok(())
}

fn output_csv_row(output: &mut dyn Write, row: &[Cell]) -> Result<()> {
    let row_str = row.iter().map(|cell| match cell {
        // Tabs and newlines inside a value would break the row
        Cell::String(s) => s.replace(['\t', '\n', '\r'], " "),
        Cell::Number(n) => n.to_string(),
    }).collect::<Vec<String>>().join("\t");
    writeln!(output, "{}", row_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_tab_separated_rows() {
        let headers = vec!["destination".to_string(), "score".to_string()];
        let rows = vec![
            vec![Cell::String("ab".to_string()), Cell::Number(2.25)],
            vec![Cell::String("a\tb".to_string()), Cell::Number(3.0)],
        ];
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &headers, &rows).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "destination\tscore\nab\t2.25\na b\t3\n");
    }
}
