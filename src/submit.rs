//! Submission sinks
//!
//! A sink receives the finished record once the last step validates. The
//! wizard guarantees it is called at most once per successful submission.

use crate::error::{Error, Result};
use crate::record::OnboardingRecord;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Receiver of the finished onboarding record
pub trait SubmissionSink: Debug {
    /// Accept the record
    fn submit(&mut self, record: &OnboardingRecord) -> Result<()>;
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for Box<S> {
    fn submit(&mut self, record: &OnboardingRecord) -> Result<()> {
        (**self).submit(record)
    }
}

/// Logs the record as a structured event
#[derive(Debug, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, record: &OnboardingRecord) -> Result<()> {
        let payload = serde_json::to_string(record)?;
        info!(%payload, "Onboarding record submitted");
        Ok(())
    }
}

/// Submission payload written to disk
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEnvelope<'a> {
    pub submitted_at: DateTime<Local>,
    pub record: &'a OnboardingRecord,
}

/// Writes the record as pretty JSON to a file
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Target file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubmissionSink for JsonFileSink {
    fn submit(&mut self, record: &OnboardingRecord) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Submission(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let envelope = SubmissionEnvelope {
            submitted_at: Local::now(),
            record,
        };
        let content = serde_json::to_string_pretty(&envelope)?;
        fs::write(&self.path, content).map_err(|e| {
            Error::Submission(format!(
                "Failed to write '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        info!(path = %self.path.display(), "Onboarding record written");
        Ok(())
    }
}

/// Keeps submitted records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    submissions: Vec<OnboardingRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records received so far
    pub fn submissions(&self) -> &[OnboardingRecord] {
        &self.submissions
    }
}

impl SubmissionSink for MemorySink {
    fn submit(&mut self, record: &OnboardingRecord) -> Result<()> {
        self.submissions.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_record() -> OnboardingRecord {
        OnboardingRecord {
            first_name: "Ada".to_string(),
            bank_name: "Access Bank".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_json_file_sink_writes_envelope() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("driver.json");
        let mut sink = JsonFileSink::new(&path);

        sink.submit(&sample_record()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["record"]["firstName"], "Ada");
        assert_eq!(json["record"]["bankName"], "Access Bank");
        assert!(json["submittedAt"].is_string());
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.submit(&sample_record()).unwrap();
        assert_eq!(sink.submissions().len(), 1);
        assert_eq!(sink.submissions()[0].first_name, "Ada");
    }

    #[test]
    fn test_boxed_sink_delegates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("driver.json");
        let mut sink: Box<dyn SubmissionSink> = Box::new(JsonFileSink::new(&path));
        sink.submit(&sample_record()).unwrap();
        assert!(path.exists());
    }
}
