// src/crawl/progress.rs
// =============================================================================
// Live progress reporting.
//
// The crawler calls a Progress implementation synchronously, once per checked
// link and once per page it failed to fetch, before it moves on. The caller
// owns whatever state it keeps (a counter, a log, a progress bar); the engine
// never looks at it.
//
// Any FnMut(&LinkRecord) closure works as a Progress that only cares about
// checked links:
//
//   let mut seen = Vec::new();
//   crawler.run(&mut |record: &LinkRecord| seen.push(record.url.clone())).await;
// =============================================================================

use super::record::LinkRecord;

pub trait Progress {
    /// A link was checked and its record appended to the results
    fn link_checked(&mut self, record: &LinkRecord);

    /// A page could not be fetched; `record` carries the "PAGE ERROR" note
    fn page_failed(&mut self, _record: &LinkRecord) {}
}

impl<F> Progress for F
where
    F: FnMut(&LinkRecord),
{
    fn link_checked(&mut self, record: &LinkRecord) {
        self(record)
    }
}

// Progress that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn link_checked(&mut self, _record: &LinkRecord) {}
}
