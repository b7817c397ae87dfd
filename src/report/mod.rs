pub mod csv;

pub use csv::{CsvFileSink, ResultSink};
