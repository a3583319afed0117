//! This module takes care of scheduling the classification work, encapsulating
//! use of multiple threads

#[cfg(not(feature = "multi-threading"))]
mod sequential;
#[cfg(feature = "multi-threading")]
mod multi_threading;

use crate::{
    error::Result,
    numeric::{units::GEV, Float},
    select::{is_dalitz, Classifier},
    source::{EventSource, TRUTH_PARTICLES_KEY},
    tally::ClassificationTally,
};
use tracing::info;

/// Size of the classified event batches
///
/// Events are grouped in batches so that multi-threaded runs only synchronize
/// once per batch, and merge the per-batch tallies in the same order as a
/// sequential run would.
///
const EVENT_BATCH_SIZE: usize = 1_000;

impl Classifier<'_> {
    /// Classify a sequence of events in the manner that was configured at
    /// build time, and tally the size of each truth group
    ///
    /// Jets are selected with the configured `jet_pt_cut`. Stops at the first
    /// event that cannot be classified.
    ///
    pub fn classify_events<S: EventSource + Sync>(
        &self,
        events: &[S],
    ) -> Result<ClassificationTally> {
        let jet_pt_cut = self.config().jet_pt_cut;
        info!(
            num_events = events.len(),
            jet_pt_cut = jet_pt_cut / GEV,
            "Started classifying events"
        );
        let classify_batch = |batch: &[S]| self.classify_batch(batch, jet_pt_cut);

        let tally = {
            // ...in sequential mode
            #[cfg(not(feature = "multi-threading"))]
            {
                sequential::run_classification_impl(events, classify_batch)?
            }

            // ...in multi-threaded mode
            #[cfg(feature = "multi-threading")]
            {
                multi_threading::run_classification_impl(events, classify_batch)?
            }
        };

        info!(
            events = tally.events,
            dalitz_events = tally.dalitz_events,
            jets = tally.jets,
            "Finished classifying events"
        );
        Ok(tally)
    }

    /// Classify one batch of events
    fn classify_batch<S: EventSource>(
        &self,
        batch: &[S],
        jet_pt_cut: Float,
    ) -> Result<ClassificationTally> {
        let mut tally = ClassificationTally::new();
        for event in batch {
            let groups = self.identify_event(event, jet_pt_cut)?;
            let dalitz = event
                .truth_particles(TRUTH_PARTICLES_KEY)
                .map_or(false, is_dalitz);
            tally.integrate(&groups, dalitz);
        }
        Ok(tally)
    }
}
