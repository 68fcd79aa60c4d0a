//! FileOutput - appends responses to daily JSON lines files

use chrono::{NaiveDate, Utc};
use contracts::{ContractError, ResponseEvent, ResponseOutput};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, error, instrument};

/// Configuration for FileOutput
#[derive(Debug, Clone)]
pub struct FileOutputConfig {
    /// Base output directory
    pub base_path: PathBuf,
}

impl FileOutputConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./responses"));

        Self { base_path }
    }
}

/// Output that writes one JSON document per line, one file per UTC day
pub struct FileOutput {
    name: String,
    config: FileOutputConfig,
    current: Option<(NaiveDate, BufWriter<File>)>,
}

impl FileOutput {
    /// Create a new FileOutput
    pub fn new(name: impl Into<String>, config: FileOutputConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            config,
            current: None,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let config = FileOutputConfig::from_params(params);
        Self::new(name, config)
    }

    /// Path of the file for `date`
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.config
            .base_path
            .join(format!("responses-{}.jsonl", date.format("%Y-%m-%d")))
    }

    fn writer_for_today(&mut self) -> std::io::Result<&mut BufWriter<File>> {
        let today = Utc::now().date_naive();
        let stale = !matches!(self.current, Some((date, _)) if date == today);

        if stale {
            if let Some((_, mut previous)) = self.current.take() {
                previous.flush()?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.path_for(today))?;
            self.current = Some((today, BufWriter::new(file)));
        }

        match self.current.as_mut() {
            Some((_, writer)) => Ok(writer),
            None => Err(std::io::Error::other("response file not open")),
        }
    }

    fn append_line(&mut self, event: &ResponseEvent) -> std::io::Result<()> {
        let line = serde_json::to_string(event)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let writer = self.writer_for_today()?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }

    fn persist_response(&mut self, event: &ResponseEvent) -> Result<(), ContractError> {
        self.append_line(event).map_err(|e| {
            error!(output = %self.name, corr_id = %event.corr_id(), error = %e, "Write failed");
            ContractError::output_write(&self.name, e.to_string())
        })
    }
}

impl ResponseOutput for FileOutput {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_output_write",
        skip(self, event),
        fields(output = %self.name, corr_id = %event.corr_id())
    )]
    async fn write(&mut self, event: &ResponseEvent) -> Result<(), ContractError> {
        self.persist_response(event)
    }

    #[instrument(name = "file_output_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        if let Some((_, writer)) = self.current.as_mut() {
            writer
                .flush()
                .map_err(|e| ContractError::output_write(&self.name, e.to_string()))?;
        }
        Ok(())
    }

    #[instrument(name = "file_output_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        self.flush().await?;
        self.current = None;
        debug!(output = %self.name, "FileOutput closed");
        Ok(())
    }
}
