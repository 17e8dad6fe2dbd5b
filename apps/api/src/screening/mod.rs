//! Screening a batch of resumes against one job description: the concurrent
//! pipeline, ranking and shortlist, CSV summary, per-candidate report and the
//! HTTP handlers that expose them.

pub mod batch;
pub mod export;
pub mod handlers;
pub mod ranking;
pub mod report;
