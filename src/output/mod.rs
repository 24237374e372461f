//! Output handling: the record sink trait and its CSV implementation

mod csv_sink;
mod traits;

pub use csv_sink::CsvSink;
pub use traits::{RecordSink, SinkResult};
