//! Splitting a spatial extent into disjoint worker ranges.

use crate::error::FilterError;

/// A half-open interval `[start, end)` of rows assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRange {
    /// First row of the range.
    pub start: usize,
    /// One past the last row of the range.
    pub end: usize,
}

impl PartitionRange {
    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no rows.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, extent)` into at most `workers` contiguous disjoint ranges.
///
/// Each worker gets `extent / workers` rows; the last range absorbs the
/// remainder of the integer division. A worker count larger than the extent
/// is clamped to it, so no empty ranges are ever produced. An extent of zero
/// partitions to nothing.
///
/// # Errors
///
/// Returns [`FilterError::InvalidWorkerCount`] if `workers` is zero.
pub fn partition(extent: usize, workers: usize) -> Result<Vec<PartitionRange>, FilterError> {
    if workers == 0 {
        return Err(FilterError::InvalidWorkerCount(0));
    }
    if extent == 0 {
        return Ok(Vec::new());
    }

    let workers = workers.min(extent);
    let step = extent / workers;

    let mut ranges: Vec<PartitionRange> = (0..workers)
        .map(|i| PartitionRange {
            start: i * step,
            end: (i + 1) * step,
        })
        .collect();

    if let Some(last) = ranges.last_mut() {
        last.end = extent;
    }

    Ok(ranges)
}
