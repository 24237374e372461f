//! Record sink trait
//!
//! The crawl controller only knows this interface; the CSV implementation
//! lives next door and tests can substitute their own.

use crate::extract::ListingRecord;
use crate::SinkError;

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Row-oriented destination for validated listing records.
///
/// Implementations write their fixed header when they are constructed.
/// `flush` is called at progress intervals and at the end of the run, so a
/// crawl aborted between fetches still leaves every appended row readable.
pub trait RecordSink {
    /// Appends one validated record as a row.
    fn append(&mut self, record: &ListingRecord) -> SinkResult<()>;

    /// Makes all appended rows durable.
    fn flush(&mut self) -> SinkResult<()>;
}
