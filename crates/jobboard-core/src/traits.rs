use std::future::Future;

use crate::error::Result;
use crate::types::{Fetched, JobId, JobRecord, SearchParams};

/// Where job records come from: a local snapshot or a remote backend.
///
/// One request per call; no retry or cancellation happens at this layer and a
/// failure is returned to the caller as is.
pub trait RecordSource: Send + Sync {
    fn fetch(&self, params: &SearchParams) -> impl Future<Output = Result<Fetched>> + Send;
    fn fetch_one(&self, id: JobId) -> impl Future<Output = Result<Option<JobRecord>>> + Send;
}
