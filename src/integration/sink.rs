//! Per-frame result sinks.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SinkError;
use crate::integration::FrameResult;

/// One row of the exported track: `frame,x,y,visible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub frame: u64,
    pub x: i32,
    pub y: i32,
    /// 1 when visible, 0 otherwise.
    pub visible: u8,
}

impl From<&FrameResult> for TrackRecord {
    fn from(result: &FrameResult) -> Self {
        Self {
            frame: result.frame,
            x: result.output.x,
            y: result.output.y,
            visible: result.output.visible as u8,
        }
    }
}

/// Destination for per-frame tracking results.
pub trait ResultSink {
    fn record(&mut self, result: &FrameResult) -> Result<(), SinkError>;

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes results as CSV with a `frame,x,y,visible` header.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn record(&mut self, result: &FrameResult) -> Result<(), SinkError> {
        self.writer.serialize(TrackRecord::from(result))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl ResultSink for Vec<TrackRecord> {
    fn record(&mut self, result: &FrameResult) -> Result<(), SinkError> {
        self.push(TrackRecord::from(result));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Point, TrackOutput};

    #[test]
    fn test_csv_rows() {
        let mut sink = CsvSink::from_writer(Vec::new());
        sink.record(&FrameResult {
            frame: 0,
            candidate: None,
            output: TrackOutput::HIDDEN,
        })
        .unwrap();
        sink.record(&FrameResult {
            frame: 1,
            candidate: Some(Point::new(12, 34)),
            output: TrackOutput::visible_at(Point::new(12, 34)),
        })
        .unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(text, "frame,x,y,visible\n0,-1,-1,0\n1,12,34,1\n");
    }
}
