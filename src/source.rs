//! Access to the truth collections of an event
//!
//! Reading events from files is left to the caller's framework, which only
//! needs to expose its named particle and jet containers through the
//! `EventSource` trait.

use crate::{
    error::{ClassifyError, Result},
    identify::TruthParticleGroups,
    numeric::Float,
    particle::{TruthJet, TruthParticles},
    select::Classifier,
};
use std::collections::HashMap;

/// Name of the truth particle container
pub const TRUTH_PARTICLES_KEY: &str = "TruthParticle";

/// Name of the truth jet container
pub const TRUTH_JETS_KEY: &str = "AntiKt4TruthJets";

/// Read-only access to the named truth containers of one event
pub trait EventSource {
    /// Truth particle container with a certain name, if available
    fn truth_particles(&self, key: &str) -> Option<&TruthParticles>;

    /// Truth jet container with a certain name, if available
    fn truth_jets(&self, key: &str) -> Option<&[TruthJet]>;
}

/// In-memory event, holding any number of named containers
#[derive(Clone, Debug, Default)]
pub struct TruthEvent {
    particles: HashMap<String, TruthParticles>,
    jets: HashMap<String, Vec<TruthJet>>,
}
//
impl TruthEvent {
    /// Event with the standard truth particle and jet containers
    pub fn new(particles: TruthParticles, jets: Vec<TruthJet>) -> Self {
        Self::default()
            .with_particles(TRUTH_PARTICLES_KEY, particles)
            .with_jets(TRUTH_JETS_KEY, jets)
    }

    /// Add or replace a truth particle container
    pub fn with_particles(mut self, key: &str, particles: TruthParticles) -> Self {
        self.particles.insert(key.to_owned(), particles);
        self
    }

    /// Add or replace a truth jet container
    pub fn with_jets(mut self, key: &str, jets: Vec<TruthJet>) -> Self {
        self.jets.insert(key.to_owned(), jets);
        self
    }
}
//
impl EventSource for TruthEvent {
    fn truth_particles(&self, key: &str) -> Option<&TruthParticles> {
        self.particles.get(key)
    }

    fn truth_jets(&self, key: &str) -> Option<&[TruthJet]> {
        self.jets.get(key).map(Vec::as_slice)
    }
}

impl Classifier<'_> {
    /// Fetch the standard truth containers of an event and identify its
    /// truth-level physics objects
    ///
    /// A non-positive `jet_pt_cut` disables the jet pt cut.
    ///
    pub fn identify_event<'ev, S: EventSource + ?Sized>(
        &self,
        event: &'ev S,
        jet_pt_cut: Float,
    ) -> Result<TruthParticleGroups<'ev>> {
        const OPERATION: &str = "identify_event";
        let particles = event.truth_particles(TRUTH_PARTICLES_KEY).ok_or_else(|| {
            ClassifyError::MissingCollection {
                operation: OPERATION,
                collection: TRUTH_PARTICLES_KEY.to_owned(),
            }
        })?;
        let jets = event
            .truth_jets(TRUTH_JETS_KEY)
            .ok_or_else(|| ClassifyError::MissingCollection {
                operation: OPERATION,
                collection: TRUTH_JETS_KEY.to_owned(),
            })?;
        self.identify_truth_particles(particles, jets, jet_pt_cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Configuration,
        testing::{jet, stable_at},
    };
    use pretty_assertions::assert_eq;

    fn particles() -> TruthParticles {
        TruthParticles::new(vec![
            stable_at(22, 1, 50., 0., 0.),
            stable_at(211, 2, 10., 1., 1.),
        ])
        .unwrap()
    }

    #[test]
    fn standard_containers() {
        let event = TruthEvent::new(particles(), vec![jet(30., 0., 0.2), jet(30., 2., 2.)]);
        let cfg = Configuration::default();
        let groups = Classifier::new(&cfg).identify_event(&event, 0.).unwrap();
        assert_eq!(groups.photons.len(), 1);
        assert_eq!(groups.hadrons.len(), 1);
        assert_eq!(groups.jets, vec![&event.truth_jets(TRUTH_JETS_KEY).unwrap()[1]]);
    }

    #[test]
    fn missing_containers() {
        let cfg = Configuration::default();
        let classifier = Classifier::new(&cfg);

        let no_jets = TruthEvent::default().with_particles(TRUTH_PARTICLES_KEY, particles());
        assert_eq!(
            classifier.identify_event(&no_jets, 0.).unwrap_err(),
            ClassifyError::MissingCollection {
                operation: "identify_event",
                collection: "AntiKt4TruthJets".to_owned(),
            }
        );

        // Containers are looked up by name
        let misnamed = TruthEvent::default()
            .with_particles("TruthParticles", particles())
            .with_jets(TRUTH_JETS_KEY, Vec::new());
        let err = classifier.identify_event(&misnamed, 0.).unwrap_err();
        assert_eq!(
            err.to_string(),
            "identify_event: cannot access TruthParticle (probably not saved in input sample)"
        );
    }

    #[test]
    fn works_through_trait_objects() {
        let event = TruthEvent::new(particles(), Vec::new());
        let source: &dyn EventSource = &event;
        let cfg = Configuration::default();
        let groups = Classifier::new(&cfg).identify_event(source, 0.).unwrap();
        assert!(groups.jets.is_empty());
    }
}
