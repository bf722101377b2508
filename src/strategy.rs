//! Evaluation strategies for running a [`Collector`].
//!
//! Run with: PEOPLE_COLLECTORS_STRATEGY=chunked:3 cargo run

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::collector::Collector;
use crate::config::ConfigError;

/// How a collector is driven over its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One container, elements in order.
    Sequential,
    /// Rayon work stealing: `fold` per split, `reduce` with the combiner.
    #[default]
    Parallel,
    /// At most `n` contiguous chunks, merged pairwise until one remains.
    Chunked(usize),
}

impl Strategy {
    pub fn collect<T, C>(self, items: Vec<T>, collector: &C) -> C::Output
    where
        T: Send,
        C: Collector<T> + Sync,
        C::Container: Send,
    {
        match self {
            Strategy::Sequential => collector.collect(items),
            Strategy::Parallel => collect_parallel(items, collector),
            Strategy::Chunked(chunks) => collect_chunked(items, chunks, collector),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Sequential => write!(f, "sequential"),
            Strategy::Parallel => write!(f, "parallel"),
            Strategy::Chunked(chunks) => write!(f, "chunked:{}", chunks),
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    /// Accepts `sequential`, `parallel`, `chunked` (one chunk per CPU) and
    /// `chunked:<n>`, ignoring case and surrounding whitespace.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "sequential" => Ok(Strategy::Sequential),
            "parallel" => Ok(Strategy::Parallel),
            "chunked" => Ok(Strategy::Chunked(num_cpus::get())),
            other => match other.strip_prefix("chunked:") {
                Some(count) => match count.trim().parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Strategy::Chunked(n)),
                    _ => Err(ConfigError::InvalidChunkCount {
                        value: count.trim().to_string(),
                    }),
                },
                None => Err(ConfigError::InvalidStrategy {
                    value: raw.trim().to_string(),
                }),
            },
        }
    }
}

/// Fold each rayon split into its own container, then reduce them.
pub fn collect_parallel<T, C>(items: Vec<T>, collector: &C) -> C::Output
where
    T: Send,
    C: Collector<T> + Sync,
    C::Container: Send,
{
    let container = items
        .into_par_iter()
        .fold(
            || collector.supply(),
            |mut container, item| {
                collector.accumulate(&mut container, item);
                container
            },
        )
        .reduce(|| collector.supply(), |left, right| collector.combine(left, right));
    collector.finish(container)
}

/// Split into at most `chunks` contiguous chunks, accumulate each on the
/// rayon pool, then merge adjacent containers pairwise.
pub fn collect_chunked<T, C>(items: Vec<T>, chunks: usize, collector: &C) -> C::Output
where
    T: Send,
    C: Collector<T> + Sync,
    C::Container: Send,
{
    let chunk_len = items.len().div_ceil(chunks.max(1)).max(1);
    let split: Vec<Vec<T>> = items
        .into_iter()
        .chunks(chunk_len)
        .into_iter()
        .map(|chunk| chunk.collect())
        .collect();
    debug!(chunks = split.len(), chunk_len, "accumulating chunks");

    let mut partials: Vec<C::Container> = split
        .into_par_iter()
        .map(|chunk| {
            let mut container = collector.supply();
            for item in chunk {
                collector.accumulate(&mut container, item);
            }
            container
        })
        .collect();

    let mut round = 0;
    while partials.len() > 1 {
        round += 1;
        debug!(round, containers = partials.len(), "merging containers");
        partials = merge_pairwise::<T, C>(collector, partials);
    }

    let container = match partials.pop() {
        Some(container) => container,
        None => collector.supply(),
    };
    collector.finish(container)
}

/// One merge round: (0, 1), (2, 3), ... with an odd tail carried over.
fn merge_pairwise<T, C>(collector: &C, partials: Vec<C::Container>) -> Vec<C::Container>
where
    C: Collector<T>,
{
    let mut merged = Vec::with_capacity(partials.len().div_ceil(2));
    let mut partials = partials.into_iter();
    while let Some(left) = partials.next() {
        match partials.next() {
            Some(right) => merged.push(collector.combine(left, right)),
            None => merged.push(left),
        }
    }
    merged
}
