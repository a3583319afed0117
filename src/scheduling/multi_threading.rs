//! Multi-threaded back-end of the classification

use crate::{error::Result, scheduling::EVENT_BATCH_SIZE, tally::ClassificationTally};
use rayon::prelude::*;

/// Classify events in multi-threaded mode
///
/// Each batch of events is classified by a rayon task. The per-batch tallies
/// are merged in batch order once every task is done, and the error reported
/// on failure is that of the first failing batch.
///
pub fn run_classification_impl<S: Sync>(
    events: &[S],
    classify_batch: impl Send + Sync + Fn(&[S]) -> Result<ClassificationTally>,
) -> Result<ClassificationTally> {
    let batch_results = events
        .par_chunks(EVENT_BATCH_SIZE)
        .map(|batch| classify_batch(batch))
        .collect::<Vec<_>>();

    let mut accumulator = ClassificationTally::new();
    for result in batch_results {
        accumulator.merge(result?);
    }
    Ok(accumulator)
}
