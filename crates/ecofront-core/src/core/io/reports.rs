use super::TableError;
use super::table::create_file;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Writes grouped contributions (waterfall shape): `Group, Score`.
pub fn write_waterfall<W: Write>(
    writer: W,
    groups: &BTreeMap<String, f64>,
) -> Result<(), TableError> {
    write_pairs(writer, "Group", groups.iter().map(|(k, v)| (k.as_str(), *v)))
}

/// Writes per-process contributions (bar shape): `Process, Score`.
pub fn write_bar<W: Write>(writer: W, processes: &[(String, f64)]) -> Result<(), TableError> {
    write_pairs(
        writer,
        "Process",
        processes.iter().map(|(k, v)| (k.as_str(), *v)),
    )
}

pub fn write_waterfall_to_path(
    path: &Path,
    groups: &BTreeMap<String, f64>,
) -> Result<(), TableError> {
    write_waterfall(create_file(path)?, groups)
}

pub fn write_bar_to_path(path: &Path, processes: &[(String, f64)]) -> Result<(), TableError> {
    write_bar(create_file(path)?, processes)
}

fn write_pairs<'a, W, I>(writer: W, label: &str, rows: I) -> Result<(), TableError>
where
    W: Write,
    I: Iterator<Item = (&'a str, f64)>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([label, "Score"])?;
    for (name, score) in rows {
        csv_writer.write_record([name, score.to_string().as_str()])?;
    }
    csv_writer.flush().map_err(|e| TableError::Csv(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waterfall_rows_follow_group_order() {
        let groups = BTreeMap::from([("Energy".to_string(), 2.5), ("Chemicals".to_string(), -1.0)]);
        let mut buffer = Vec::new();
        write_waterfall(&mut buffer, &groups).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "Group,Score\nChemicals,-1\nEnergy,2.5\n");
    }

    #[test]
    fn bar_rows_keep_ranking_order() {
        let processes = vec![("enzyme".to_string(), 20.0), ("grid".to_string(), 12.5)];
        let mut buffer = Vec::new();
        write_bar(&mut buffer, &processes).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "Process,Score\nenzyme,20\ngrid,12.5\n");
    }
}
