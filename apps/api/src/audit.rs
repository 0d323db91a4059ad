//! Audit trail: append-only JSON lines recording every scoring decision, per-resume
//! error and batch summary. Texts are never stored, only their truncated SHA-256.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::error;
use uuid::Uuid;

use crate::matching::{JobRequirement, ScoreRecord};
use crate::shortlist::BatchSummary;

/// Hex characters kept from the SHA-256 digest.
pub const HASH_PREFIX_LEN: usize = 16;

pub fn hash_text(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex.truncate(HASH_PREFIX_LEN);
    hex
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    ScoringDecision {
        timestamp: DateTime<Utc>,
        batch_id: Uuid,
        resume_name: String,
        jd_hash: String,
        resume_hash: String,
        final_score: f64,
        match_ratio: f64,
        skill_match: String,
        experience_match: String,
        jd_similarity: f64,
        initiative_score: f64,
        matched_skills: Vec<String>,
        missing_skills: Vec<String>,
        required_skills_count: usize,
        min_experience_required: u32,
    },
    Error {
        timestamp: DateTime<Utc>,
        batch_id: Uuid,
        resume_name: String,
        error: String,
    },
    BatchSummary {
        timestamp: DateTime<Utc>,
        batch_id: Uuid,
        total_resumes: usize,
        successful: usize,
        failed: usize,
        /// Percentage, two decimals. 0 for an empty batch.
        success_rate: f64,
    },
}

impl AuditEvent {
    pub fn scoring_decision(
        batch_id: Uuid,
        resume_name: &str,
        jd_text: &str,
        resume_text: &str,
        record: &ScoreRecord,
        job: &JobRequirement,
    ) -> Self {
        let display = record.display();
        AuditEvent::ScoringDecision {
            timestamp: Utc::now(),
            batch_id,
            resume_name: resume_name.to_string(),
            jd_hash: hash_text(jd_text),
            resume_hash: hash_text(resume_text),
            final_score: record.final_score,
            match_ratio: record.match_ratio,
            skill_match: display.skill_match,
            experience_match: display.experience_match,
            jd_similarity: record.jd_similarity,
            initiative_score: record.initiative_score,
            matched_skills: record.matched_skills.clone(),
            missing_skills: record.missing_skills.clone(),
            required_skills_count: job.required_skills.len(),
            min_experience_required: job.min_experience_years,
        }
    }

    pub fn error(batch_id: Uuid, resume_name: &str, message: &str) -> Self {
        AuditEvent::Error {
            timestamp: Utc::now(),
            batch_id,
            resume_name: resume_name.to_string(),
            error: message.to_string(),
        }
    }

    pub fn batch_summary(batch_id: Uuid, summary: &BatchSummary) -> Self {
        AuditEvent::BatchSummary {
            timestamp: Utc::now(),
            batch_id,
            total_resumes: summary.total,
            successful: summary.successful,
            failed: summary.failed,
            success_rate: summary.success_rate,
        }
    }
}

/// Append-only JSONL writer. Appends are serialized through a mutex so concurrent
/// requests never interleave lines.
pub struct AuditLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl AuditLog {
    /// Opens (creating if needed) the log file and its parent directory.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, event: &AuditEvent) -> std::io::Result<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let mut file = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("audit log mutex poisoned"))?;
        file.write_all(line.as_bytes())?;
        file.flush()
    }

    /// Like `append`, but a failed write is logged and swallowed. Auditing never
    /// fails a scoring request.
    pub fn record(&self, event: &AuditEvent) {
        if let Err(e) = self.append(event) {
            error!(path = %self.path.display(), error = %e, "Failed to write audit event");
        }
    }
}
