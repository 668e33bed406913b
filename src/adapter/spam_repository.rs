use std::{fs::OpenOptions, io::Write, path::PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::application::{AuditEntry, AuditSink};

/// Append-only audit log, one JSON object per line.
#[derive(Clone, Debug)]
pub struct FileAuditSink {
    log_path: PathBuf,
}

impl FileAuditSink {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn append(&self, entry: AuditEntry) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        file.write_all(line.as_bytes())?;
        debug!("Audit entry appended to {}", self.log_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod spam_repository_test {
    use super::*;
    use crate::application::SpamRecord;

    #[tokio::test]
    async fn should_append_entries_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("spam_log.json");
        let sink = FileAuditSink::new(log_path.clone());

        sink.append(AuditEntry::SpamRecord(SpamRecord {
            timestamp: 1,
            sender: String::from("Ivan Ivanov"),
            message: String::from("Earn $500/day! Message me now"),
        }))
        .await
        .unwrap();
        sink.append(AuditEntry::ClassificationFailed {
            chat_id: -100500,
            message_id: 42,
            reason: String::from("ollama is unreachable"),
        })
        .await
        .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: AuditEntry = serde_json::from_str(lines[0]).unwrap();
        match first {
            AuditEntry::SpamRecord(record) => {
                assert_eq!(record.sender, "Ivan Ivanov");
                assert_eq!(record.timestamp, 1);
            }
            entry => panic!("Unexpected audit entry {:?}", entry),
        }
        let second: AuditEntry = serde_json::from_str(lines[1]).unwrap();
        assert!(matches!(second, AuditEntry::ClassificationFailed { .. }));
    }
}
