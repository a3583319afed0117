//! Sequential back-end of the classification

use crate::{error::Result, scheduling::EVENT_BATCH_SIZE, tally::ClassificationTally};

/// Classify events in sequential mode
///
/// We use batched logic even in sequential mode, in order to achieve
/// reproducibility with respect to multi-threaded runs.
///
pub fn run_classification_impl<S>(
    events: &[S],
    classify_batch: impl Fn(&[S]) -> Result<ClassificationTally>,
) -> Result<ClassificationTally> {
    events
        .chunks(EVENT_BATCH_SIZE)
        .try_fold(ClassificationTally::new(), |mut accumulator, batch| {
            accumulator.merge(classify_batch(batch)?);
            Ok(accumulator)
        })
}
