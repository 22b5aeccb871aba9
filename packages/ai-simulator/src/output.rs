//! Output writers for simulation results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{CsvSummaryRow, GameMetrics};
use crate::types::OutputFormat;

type Sink = Box<dyn Write + Send>;

fn open_sink(path: &Path, compress: bool) -> Result<Sink, Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    Ok(if compress {
        Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
    } else {
        Box::new(BufWriter::new(file))
    })
}

pub struct OutputWriter {
    jsonl: Option<(Sink, PathBuf)>,
    csv: (csv::Writer<Sink>, PathBuf),
}

impl OutputWriter {
    pub fn new(
        output_dir: &str,
        format: OutputFormat,
        compress: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");
        let suffix = if compress { ".gz" } else { "" };

        let jsonl = match format {
            OutputFormat::Jsonl => {
                let path = dir.join(format!("simulation_{timestamp}.jsonl{suffix}"));
                Some((open_sink(&path, compress)?, path))
            }
            OutputFormat::Csv => None,
        };

        let csv_path = dir.join(format!("simulation_{timestamp}_summary.csv{suffix}"));
        let csv_writer = csv::Writer::from_writer(open_sink(&csv_path, compress)?);

        Ok(Self {
            jsonl,
            csv: (csv_writer, csv_path),
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        if let Some((writer, _)) = self.jsonl.as_mut() {
            serde_json::to_writer(&mut *writer, metrics)?;
            writeln!(writer)?;
        }
        self.csv.0.serialize(CsvSummaryRow::from(metrics))?;
        Ok(())
    }

    pub fn output_paths(&self) -> (Option<&PathBuf>, &PathBuf) {
        (self.jsonl.as_ref().map(|(_, p)| p), &self.csv.1)
    }

    /// Flush everything; gzip streams are finalized when the writers drop.
    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some((writer, _)) = self.jsonl.as_mut() {
            writer.flush()?;
        }
        self.csv.0.flush()?;
        Ok(())
    }
}
