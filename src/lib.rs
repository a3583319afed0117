//! Truth classifier: Monte Carlo truth record classification
//!
//!
//! # Introduction (for the physicist)
//!
//! Simulated collision events carry a "truth" record of every particle that
//! the event generator produced, along with the jets clustered from them. This
//! crate sorts that record into the categories that analyses care about:
//! prompt photons, electrons and muons, hadrons and their decay products,
//! Higgs decay products, heavy flavour hadrons, and b-, c- or light jets after
//! removing the jets which are really photons or electrons.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The truth record of an event is a flat container of particles, linked to
//! each other by parent/child indices (`particle`). Classification is done by
//! predicates which walk up this decay graph (`ancestry`, `select`), then
//! assembled into per-event groups (`identify`). Groups are vectors of handles
//! into the input containers, nothing is copied.
//!
//! Decay graphs come from external files, so they are validated when the
//! container is built, and walks through them are bounded. Malformed input is
//! reported as a `ClassifyError` instead of crashing.
//!
//! Many events can be classified at once (`scheduling`), in parallel if the
//! `multi-threading` feature is enabled, and the group sizes tallied.

#![warn(missing_docs)]

pub mod ancestry;
pub mod config;
pub mod error;
pub mod identify;
pub mod isolation;
pub mod momentum;
pub mod numeric;
pub mod output;
pub mod particle;
pub mod pid;
mod scheduling;
pub mod select;
pub mod source;
pub mod tally;

#[cfg(test)]
mod testing;

pub use crate::{
    config::Configuration,
    error::{ClassifyError, Result},
    identify::{JetFlavour, TruthParticleGroups},
    particle::{DecayGraphBuilder, ParticleRef, TruthJet, TruthParticle, TruthParticles},
    select::Classifier,
    source::{EventSource, TruthEvent},
    tally::ClassificationTally,
};
