// src/engine.rs
//! The segmented copy engine.
//!
//! Reads the source exactly once, front to back, and writes it out as one
//! file per plan segment. The cursor position is checked against the next
//! unprocessed boundary before any copying; crossing a boundary flushes and
//! closes the open segment and opens the next one. Read-side and write-side
//! staging are independent, so reads and writes stay large no matter where
//! the boundaries fall.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::buffer::{ReadBuffer, WriteBuffer, DEFAULT_BUFFER_CAPACITY};
use crate::error::{Result, SplitError};
use crate::naming::{SegmentNamer, DEFAULT_NAME_TEMPLATE};
use crate::plan::SplitPlan;

/// Outcome of a completed split run.
#[derive(Debug, Clone)]
pub struct SplitSummary {
    /// Bytes copied out of the source.
    pub bytes_copied: u64,
    /// Source size according to the plan's final boundary.
    pub source_size: u64,
    /// Paths of the segment files written, in generation order.
    pub segments: Vec<PathBuf>,
}

/// Write side of the copy loop: the current output handle, its staging
/// buffer, and the namer producing the next segment path.
///
/// Exactly one segment file is open at a time; its lifetime spans from one
/// boundary crossing to the next.
struct SegmentSink {
    namer: SegmentNamer,
    buffer: WriteBuffer,
    current: Option<File>,
    opened: Vec<PathBuf>,
}

impl SegmentSink {
    fn new(namer: SegmentNamer, capacity: usize, segment_count: usize) -> Self {
        SegmentSink {
            namer,
            buffer: WriteBuffer::with_capacity(capacity),
            current: None,
            opened: Vec::with_capacity(segment_count),
        }
    }

    fn space(&self) -> usize {
        self.buffer.space()
    }

    fn is_full(&self) -> bool {
        self.buffer.is_full()
    }

    fn push(&mut self, bytes: &[u8]) {
        self.buffer.push(bytes);
    }

    /// Flush the staged bytes to the open segment.
    fn drain(&mut self) -> Result<()> {
        if let Some(file) = self.current.as_mut() {
            self.buffer.flush_to(file)?;
        }
        Ok(())
    }

    /// Close the open segment (flushing its remaining bytes) and open the
    /// next one from the namer.
    fn rotate(&mut self) -> Result<()> {
        self.drain()?;
        self.current = None;

        let path = self.namer.next_path();
        info!("Opening {}", path.display());
        let file = File::create(&path).map_err(|source| SplitError::CreateSegment {
            path: path.clone(),
            source,
        })?;
        self.opened.push(path);
        self.current = Some(file);
        Ok(())
    }

    /// Flush and close the last segment, yielding every path written.
    fn finish(mut self) -> Result<Vec<PathBuf>> {
        self.drain()?;
        self.current = None;
        Ok(self.opened)
    }
}

/// Streaming splitter configured with an output name template and a staging
/// buffer capacity.
///
/// # Example
///
/// ```no_run
/// use bsplit_rs::{SplitEngine, SplitPlan};
///
/// fn main() -> bsplit_rs::Result<()> {
///     let size = std::fs::metadata("image.bin")?.len();
///     let plan = SplitPlan::from_spec("1000000:2000000", size);
///
///     let summary = SplitEngine::new()
///         .with_name_template("image-%02d.part")
///         .run("image.bin", &plan)?;
///
///     println!("{} bytes into {} segments", summary.bytes_copied, summary.segments.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SplitEngine {
    name_template: String,
    buffer_capacity: usize,
}

impl SplitEngine {
    pub fn new() -> Self {
        SplitEngine {
            name_template: DEFAULT_NAME_TEMPLATE.to_string(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Override the output filename template (see [`SegmentNamer`]).
    pub fn with_name_template(mut self, template: impl Into<String>) -> Self {
        self.name_template = template.into();
        self
    }

    /// Override the staging buffer capacity.
    ///
    /// Affects I/O call granularity only; segment contents are identical
    /// for any capacity.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Copy `source` into one file per plan segment.
    ///
    /// Every source byte lands in exactly one segment, in order. Boundaries
    /// at or past the end of the source (and repeated boundaries) produce
    /// empty segments, so the run always writes
    /// [`segment_count`](SplitPlan::segment_count) files.
    pub fn run(&self, source: impl AsRef<Path>, plan: &SplitPlan) -> Result<SplitSummary> {
        if self.buffer_capacity == 0 {
            return Err(SplitError::ZeroCapacity);
        }

        let source_path = source.as_ref();
        let mut reader = File::open(source_path).map_err(|source| SplitError::OpenSource {
            path: source_path.to_path_buf(),
            source,
        })?;

        let boundaries = plan.boundaries();
        let last = boundaries.len() - 1;
        let size = plan.end();

        let mut read_buf = ReadBuffer::with_capacity(self.buffer_capacity);
        let mut sink = SegmentSink::new(
            SegmentNamer::new(&self.name_template),
            self.buffer_capacity,
            plan.segment_count(),
        );

        let mut pos: u64 = 0;
        let mut boundary_index = 0;

        while pos < size {
            // At most one boundary action per iteration, so equal
            // consecutive boundaries come out as empty segments.
            if boundary_index < last && pos >= boundaries[boundary_index] {
                sink.rotate()?;
                boundary_index += 1;
            }

            if read_buf.is_drained() {
                let want = (size - pos).min(read_buf.capacity() as u64) as usize;
                if read_buf.refill(&mut reader, want)? == 0 {
                    return Err(SplitError::SourceTruncated {
                        expected: size,
                        actual: pos,
                    });
                }
            }

            if sink.is_full() {
                sink.drain()?;
            }

            let until_boundary = boundaries[boundary_index].saturating_sub(pos);
            let chunk = (read_buf.remaining() as u64)
                .min(sink.space() as u64)
                .min(until_boundary) as usize;

            sink.push(read_buf.chunk(chunk));
            read_buf.advance(chunk);
            pos += chunk as u64;
        }

        // Boundaries at or past the end of the source still get their
        // segments, keeping the file count equal to the plan's intervals.
        while boundary_index < last {
            sink.rotate()?;
            boundary_index += 1;
        }

        debug!(bytes = pos, segments = plan.segment_count(), "copy complete");

        let segments = sink.finish()?;

        Ok(SplitSummary {
            bytes_copied: pos,
            source_size: size,
            segments,
        })
    }
}

impl Default for SplitEngine {
    fn default() -> Self {
        SplitEngine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_rejected() {
        let plan = SplitPlan::from_spec("1", 2);
        let result = SplitEngine::new()
            .with_buffer_capacity(0)
            .run("does-not-matter", &plan);
        assert!(matches!(result, Err(SplitError::ZeroCapacity)));
    }

    #[test]
    fn test_missing_source_reports_path() {
        let plan = SplitPlan::from_spec("1", 2);
        let result = SplitEngine::new().run("no/such/file.bin", &plan);
        match result {
            Err(SplitError::OpenSource { path, .. }) => {
                assert_eq!(path, PathBuf::from("no/such/file.bin"));
            }
            other => panic!("expected OpenSource error, got {other:?}"),
        }
    }
}
