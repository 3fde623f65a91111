use std::time::Instant;

use log::{info, trace};

use crate::{
    conv::{self, ConvolutionDescription},
    error::ConvolutionResult,
    Channels, ConvolutionError, Filter, FilterBank,
};

/// Fixed-size pool of scoped worker threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreadPool {
    threads: usize,
}

impl Default for ThreadPool {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

impl ThreadPool {
    pub fn new(threads: usize) -> ConvolutionResult<Self> {
        let mut pool = Self::default();
        pool.set_threads(threads)?;
        Ok(pool)
    }

    pub fn set_threads(&mut self, threads: usize) -> ConvolutionResult<()> {
        if threads == 0 {
            return Err(ConvolutionError::InvalidThreadCount);
        }

        self.threads = threads;
        Ok(())
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Splits `0..size` into one contiguous chunk per worker and calls
    /// `workload_chunk(thread, start_idx, chunk_size)` on each.
    fn workload_chunks<T, F>(&self, size: usize, workload_chunk: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize, usize, usize) -> T + Sync,
    {
        let threads = self.threads.min(size).max(1);
        let chunk_size = size.div_ceil(threads);

        if threads == 1 {
            return vec![workload_chunk(0, 0, size)];
        }

        std::thread::scope(|s| {
            let mut covered = 0;
            let mut handles = Vec::with_capacity(threads);

            for thread in 0..threads {
                let this_chunk_size = chunk_size.min(size - covered);

                let start_idx = covered;
                covered += this_chunk_size;
                assert!(covered <= size);

                let workload_chunk = &workload_chunk;
                handles.push(s.spawn(move || workload_chunk(thread, start_idx, this_chunk_size)));
            }

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        })
    }

    /// Evaluates `single_workload(idx)` for every `idx` in `0..size`, the
    /// result for `idx` lands in slot `idx` whichever worker ran it.
    pub fn map_indexed<T, F>(&self, size: usize, single_workload: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        let chunks = self.workload_chunks(size, |thread, start_idx, this_chunk_size| {
            trace!("worker {thread} takes tasks {start_idx}..{}", start_idx + this_chunk_size);
            (start_idx..start_idx + this_chunk_size).map(|idx| (idx, single_workload(idx))).collect::<Vec<_>>()
        });

        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(size).collect();

        for (idx, result) in chunks.into_iter().flatten() {
            slots[idx] = Some(result);
        }

        slots.into_iter().flatten().collect()
    }
}

/// Convolves every channel with `filter` using same-size padding.
pub fn apply_filter(channels: &Channels, filter: &Filter, stride: usize) -> ConvolutionResult<Channels> {
    let desc = ConvolutionDescription::same(channels.shape(), filter, stride)?;
    channels.try_map(|channel| conv::convolve_with(&desc, channel, filter))
}

/// Applies each filter of the bank to all channels, one task per filter.
///
/// Output `i` always belongs to filter `i`. On failure the error of the
/// lowest failing filter index is returned.
pub fn apply_filters(
    pool: &ThreadPool,
    channels: &Channels,
    filters: &FilterBank,
    stride: usize,
) -> ConvolutionResult<Vec<Channels>> {
    if filters.is_empty() {
        return Err(ConvolutionError::EmptyFilterBank);
    }

    info!("applying {} filters to {} channels on {} threads", filters.len(), channels.shape(), pool.threads());
    let timer = Instant::now();

    let results = pool.map_indexed(filters.len(), |idx| {
        let filter = &filters.as_slice()[idx];
        trace!("filter {idx}: size {}", filter.size());
        apply_filter(channels, filter, stride)
    });

    let outputs = results.into_iter().collect::<ConvolutionResult<Vec<_>>>()?;

    info!("applied {} filters in {:.3}s", outputs.len(), timer.elapsed().as_secs_f32());

    Ok(outputs)
}
