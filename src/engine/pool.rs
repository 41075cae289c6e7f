// src/engine/pool.rs
//
// Global thread pool for batch composition.
//
// One pool is built lazily on first use and reused for every batch; building
// a pool per call costs far more than the work for small batches. Thread count
// follows std::thread::available_parallelism() (which respects cgroup quotas).
// If the dedicated pool cannot be built, batches run on rayon's global pool.

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::OnceLock;
use tracing::warn;

/// Minimum number of worker threads.
const MIN_THREADS: usize = 1;

static GLOBAL_POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

fn thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(MIN_THREADS)
        .max(MIN_THREADS)
}

/// The shared pool, or `None` when it could not be created.
pub(crate) fn global_pool() -> Option<&'static ThreadPool> {
    GLOBAL_POOL
        .get_or_init(|| {
            ThreadPoolBuilder::new()
                .num_threads(thread_count())
                .thread_name(|i| format!("collage-worker-{i}"))
                .build()
                .map_err(|e| {
                    warn!(target: "collage::compose", error = %e, "falling back to rayon global pool");
                })
                .ok()
        })
        .as_ref()
}

/// Run `op` inside the shared pool so its parallel iterators use it.
pub(crate) fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match global_pool() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}
