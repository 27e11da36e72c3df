//! Processing many workout records at once.
//!
//! Records share no state, so they are spread over a small pool of scoped
//! worker threads. Results come back in input order.

use crate::core::assemble::{MergeOptions, Track, TrackAssembler};
use crate::core::error::MergeError;
use crate::record::RawRecord;
use crossbeam_channel::unbounded;
use tracing::debug;

/// Default worker count: one per available core.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Assemble every record, using up to `workers` threads.
///
/// With `workers <= 1` everything runs on the calling thread.
pub fn process_batch(
    records: &[RawRecord],
    options: &MergeOptions,
    workers: usize,
) -> Vec<Result<Track, MergeError>> {
    let assembler = TrackAssembler::new(*options);
    let workers = workers.min(records.len());

    if workers <= 1 {
        return records.iter().map(|r| assembler.assemble(r)).collect();
    }
    debug!(records = records.len(), workers, "Processing batch");

    let (job_tx, job_rx) = unbounded::<(usize, &RawRecord)>();
    let (result_tx, result_rx) = unbounded();

    for job in records.iter().enumerate() {
        // Receiver is alive until the end of this function.
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let assembler = &assembler;
            scope.spawn(move || {
                for (index, record) in job_rx.iter() {
                    let _ = result_tx.send((index, assembler.assemble(record)));
                }
            });
        }
    });
    drop(result_tx);

    let mut results: Vec<Option<Result<Track, MergeError>>> =
        (0..records.len()).map(|_| None).collect();
    for (index, result) in result_rx.iter() {
        results[index] = Some(result);
    }
    results.into_iter().flatten().collect()
}
