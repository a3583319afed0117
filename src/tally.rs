//! This module allows integrating classification results across many events

use crate::{identify::TruthParticleGroups, numeric::Float};

/// Number of objects found in each truth group, summed over events
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassificationTally {
    /// Number of classified events
    pub events: usize,

    /// Number of events with a Higgs Dalitz decay
    pub dalitz_events: usize,

    // ### PARTICLE GROUPS ###
    /// Prompt photons
    pub photons: usize,

    /// Prompt electrons
    pub electrons: usize,

    /// Prompt muons
    pub muons: usize,

    /// Other final state particles
    pub hadrons: usize,

    /// Prompt photons from Higgs decays
    pub photons_from_higgs: usize,

    /// Final state particles from Higgs decays
    pub higgs_decay: usize,

    /// b-hadrons
    pub b_hadrons: usize,

    /// c-hadrons
    pub d_hadrons: usize,

    /// Muons from b-hadron decays
    pub muons_from_bs: usize,

    // ### JET GROUPS ###
    /// Jets passing the pt cut and overlap removal
    pub jets: usize,

    /// b-jets
    pub b_jets: usize,

    /// c-jets
    pub c_jets: usize,

    /// Light jets
    pub light_jets: usize,
}
//
impl ClassificationTally {
    /// Prepare for results integration
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate the classification of one event
    pub fn integrate(&mut self, groups: &TruthParticleGroups, dalitz: bool) {
        self.events += 1;
        self.dalitz_events += usize::from(dalitz);
        self.photons += groups.photons.len();
        self.electrons += groups.electrons.len();
        self.muons += groups.muons.len();
        self.hadrons += groups.hadrons.len();
        self.photons_from_higgs += groups.photons_from_higgs.len();
        self.higgs_decay += groups.higgs_decay.len();
        self.b_hadrons += groups.b_hadrons.len();
        self.d_hadrons += groups.d_hadrons.len();
        self.muons_from_bs += groups.muons_from_bs.len();
        self.jets += groups.jets.len();
        self.b_jets += groups.b_jets.len();
        self.c_jets += groups.c_jets.len();
        self.light_jets += groups.light_jets.len();
    }

    /// Integrate results from another tally
    pub fn merge(&mut self, other: ClassificationTally) {
        self.events += other.events;
        self.dalitz_events += other.dalitz_events;
        self.photons += other.photons;
        self.electrons += other.electrons;
        self.muons += other.muons;
        self.hadrons += other.hadrons;
        self.photons_from_higgs += other.photons_from_higgs;
        self.higgs_decay += other.higgs_decay;
        self.b_hadrons += other.b_hadrons;
        self.d_hadrons += other.d_hadrons;
        self.muons_from_bs += other.muons_from_bs;
        self.jets += other.jets;
        self.b_jets += other.b_jets;
        self.c_jets += other.c_jets;
        self.light_jets += other.light_jets;
    }

    /// Average of some count over the classified events (0 if there are none)
    pub fn per_event(&self, count: usize) -> Float {
        if self.events == 0 {
            0.
        } else {
            count as Float / self.events as Float
        }
    }
}
