//! Workspace cache for materialized projects
//!
//! Every source file gets its own workspace directory under a shared root,
//! named after the file and a hash of its directory. The workspace holds a
//! copy of the source, the generated project file and a cache record with
//! the fingerprint of the source that produced them.
//!
//! # Consistency
//!
//! A cache record with fingerprint F means the project and source copy in
//! that workspace were generated from content fingerprinted as F. The record
//! is removed before regenerating and written back last, so an interrupted
//! regeneration always leads to another one on the next run.
//!
//! # Fingerprints
//!
//! Fingerprints are non-cryptographic (XXH3) and cover at most a configured
//! prefix of the file. Edits past that prefix are invisible to the cache.

pub mod fingerprint;
pub mod record;
pub mod workspace;

pub use fingerprint::{fingerprint, fingerprint_sampled, Fingerprint};
pub use record::CacheRecord;
pub use workspace::{workspace_id, Workspace};
