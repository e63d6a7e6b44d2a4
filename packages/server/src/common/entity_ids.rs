//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{ImportRunId, JobId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let job_id: JobId = JobId::new();
//! let run_id: ImportRunId = ImportRunId::new();
//!
//! // This would be a compile error:
//! // let wrong: ImportRunId = job_id;
//! ```

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Job entities (imported job listings).
pub struct ImportedJob;

/// Marker type for ImportRun entities (batch import audit logs).
pub struct JobImportRun;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Job entities.
pub type JobId = Id<ImportedJob>;

/// Typed ID for ImportRun entities.
pub type ImportRunId = Id<JobImportRun>;
