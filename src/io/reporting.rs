// src/io/reporting.rs

use crate::error::Result;
use crate::scenario::comparison::ComparisonRow;
use crate::simulation::engine::DayRecord;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes one CSV row per simulated day: arrivals, service outcomes and the
/// closing queue length. Columns follow the [`DayRecord`] fields.
pub fn write_day_log(file_path: impl AsRef<Path>, data: &[DayRecord]) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!(rows = data.len(), path = %path.display(), "exported day log");
    Ok(())
}

/// Writes the scenario comparison table to any writer.
///
/// Non-numeric fields are quoted, so the scenario name column is always
/// quoted. Undefined metrics are written as empty fields.
pub fn write_comparison_to<W: Write>(writer: W, rows: &[ComparisonRow]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(writer);

    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the scenario comparison table to a CSV file.
pub fn write_comparison(file_path: impl AsRef<Path>, rows: &[ComparisonRow]) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_comparison_to(file, rows)?;

    info!(rows = rows.len(), path = %path.display(), "exported comparison");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::comparison::{compare, Scenario};
    use crate::scenario::cost::CostModel;
    use crate::simulation::config::SimulationParameters;
    use crate::simulation::engine::WaitlistSimulation;

    #[test]
    fn test_day_log_has_one_row_per_day() {
        let mut sim = WaitlistSimulation::new(SimulationParameters {
            days: 25,
            ..SimulationParameters::default()
        });
        sim.run();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("days.csv");
        write_day_log(&path, &sim.history).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("day"));
        assert_eq!(headers.get(9), Some("queue_size"));
        assert_eq!(reader.records().count(), 25);
    }

    #[test]
    fn test_comparison_quotes_scenario_name() {
        let rows = compare(
            &[Scenario::new("Baseline", SimulationParameters::default())],
            &CostModel::default(),
        )
        .unwrap();

        let mut buf = Vec::new();
        write_comparison_to(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "\"scenario\",\"utilisation\",\"median_wait\",\"p90_wait\",\
                 \"within_28\",\"cost_per_week_reduction\""
            )
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Baseline\",1.0,20,31,"), "row was {row}");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_comparison_file_export() {
        let rows = compare(
            &[
                Scenario::new("Baseline", SimulationParameters::default()),
                Scenario::new(
                    "Plus four",
                    SimulationParameters {
                        capacity_per_day: 20.0,
                        ..SimulationParameters::default()
                    },
                ),
            ],
            &CostModel::default(),
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comparison.csv");
        write_comparison(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let names: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Baseline", "Plus four"]);
    }
}
