//! jobboard-remote
//!
//! Talks to the job board backend: maps its job payloads onto `JobRecord`
//! (`mapping`), builds listing queries (`query`) and exposes the API as a
//! `RecordSource` over an abstract GET transport (`source`).
pub mod mapping;
pub mod query;
pub mod source;

pub use mapping::ApiJob;
pub use query::QueryBuilder;
pub use source::{DrfSource, Transport};
