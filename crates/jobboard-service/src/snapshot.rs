use jobboard_core::error::Result;
use jobboard_core::traits::RecordSource;
use jobboard_core::types::{Fetched, JobId, JobRecord, SearchParams};

/// Serves a fixed set of records, leaving matching and paging to the caller.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    records: Vec<JobRecord>,
}

impl SnapshotSource {
    pub fn new(records: Vec<JobRecord>) -> Self { Self { records } }
}

impl RecordSource for SnapshotSource {
    async fn fetch(&self, _params: &SearchParams) -> Result<Fetched> { Ok(Fetched::Candidates(self.records.clone())) }

    async fn fetch_one(&self, id: JobId) -> Result<Option<JobRecord>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}
