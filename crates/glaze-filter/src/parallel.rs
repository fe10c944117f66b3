//! Fork-join dispatch of row partitions.
//!
//! Every filter invocation builds its own join state: a thread pool sized to
//! the resolved worker count is created for the call, one task per partition
//! is spawned in its scope, and the scope join is the barrier. Nothing is
//! shared process-wide, so concurrent independent filter invocations cannot
//! race on each other's completion.

use crate::error::FilterError;
use crate::partition::{partition, PartitionRange};

/// How a filter invocation schedules its partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// One worker per available CPU core.
    #[default]
    Auto,

    /// Run sequentially on the calling thread.
    Serial,

    /// Fork exactly `n` workers.
    Workers(usize),
}

impl ExecutionStrategy {
    /// Resolve the worker count for this strategy.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidWorkerCount`] for `Workers(0)`.
    pub fn worker_count(&self) -> Result<usize, FilterError> {
        match *self {
            ExecutionStrategy::Serial => Ok(1),
            ExecutionStrategy::Auto => Ok(std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)),
            ExecutionStrategy::Workers(0) => Err(FilterError::InvalidWorkerCount(0)),
            ExecutionStrategy::Workers(n) => Ok(n),
        }
    }
}

/// Run `f` over disjoint row partitions of `dst`.
///
/// `dst` is split into per-partition chunks of whole rows (`row_stride`
/// values per row), so each worker owns its output range exclusively while
/// the shared source stays behind `&`. The call returns only after every
/// partition has joined; a panicking worker propagates out of the scope and
/// fails the whole call rather than silently losing its partition.
pub(crate) fn dispatch_rows<T, F>(
    dst: &mut [T],
    row_stride: usize,
    rows: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), FilterError>
where
    T: Send,
    F: Fn(PartitionRange, &mut [T]) + Send + Sync,
{
    let workers = strategy.worker_count()?;
    let ranges = partition(rows, workers)?;

    if ranges.len() <= 1 {
        for range in ranges {
            f(range, &mut dst[range.start * row_stride..range.end * row_stride]);
        }
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(ranges.len())
        .build()
        .map_err(|e| FilterError::ThreadPoolBuild(e.to_string()))?;

    let f = &f;
    pool.scope(|s| {
        let mut rest = &mut dst[..];
        for range in ranges {
            let (chunk, tail) = rest.split_at_mut(range.len() * row_stride);
            rest = tail;
            s.spawn(move |_| f(range, chunk));
        }
    });

    Ok(())
}
