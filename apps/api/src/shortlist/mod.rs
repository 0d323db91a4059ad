//! Shortlisting: ranks a batch of resumes against one job description.
//!
//! `pipeline` holds the synchronous scoring core; `handlers` exposes it over HTTP,
//! adds explanations and writes the audit trail.

pub mod handlers;
pub mod pipeline;

pub use pipeline::{
    BatchOutcome, BatchSummary, PipelineError, ResumeFailure, ResumeInput, Shortlister,
};
