//! Identification of all the truth-level physics objects of an event
//!
//! Final state particles are split into prompt photons, electrons and muons,
//! with everything else lumped together as hadrons. Jets which overlap with a
//! prompt photon or electron are discarded, the others are labelled b, c or
//! light depending on the heavy flavour hadrons found around them.

use crate::{
    error::Result,
    momentum::{delta_r_rapidity, FourMomentum},
    numeric::{units::GEV, Float},
    particle::{ParticleRef, TruthJet, TruthParticles},
    select::{b_hadrons, d_hadrons, Classifier},
};
use std::fmt;
use tracing::{debug, trace};

/// Flavour label of a truth jet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JetFlavour {
    /// Close to a b-hadron
    Bottom,

    /// Close to a c-hadron, but not to a b-hadron
    Charm,

    /// Neither
    Light,
}

/// Truth-level physics objects of an event
///
/// All groups refer to the particles and jets of the classified event, in
/// event order.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TruthParticleGroups<'ev> {
    /// Prompt final state photons
    pub photons: Vec<ParticleRef<'ev>>,

    /// Prompt final state electrons
    pub electrons: Vec<ParticleRef<'ev>>,

    /// Prompt final state muons
    pub muons: Vec<ParticleRef<'ev>>,

    /// All other final state particles
    pub hadrons: Vec<ParticleRef<'ev>>,

    /// Prompt photons from Higgs decays
    pub photons_from_higgs: Vec<ParticleRef<'ev>>,

    /// Final state particles from Higgs decays
    pub higgs_decay: Vec<ParticleRef<'ev>>,

    /// All b-hadrons
    pub b_hadrons: Vec<ParticleRef<'ev>>,

    /// All c-hadrons
    pub d_hadrons: Vec<ParticleRef<'ev>>,

    /// Final state muons from b-hadron decays
    pub muons_from_bs: Vec<ParticleRef<'ev>>,

    /// Jets which pass the pt cut and overlap removal
    pub jets: Vec<&'ev TruthJet>,

    /// b-labelled subset of `jets`
    pub b_jets: Vec<&'ev TruthJet>,

    /// c-labelled subset of `jets`
    pub c_jets: Vec<&'ev TruthJet>,

    /// Light subset of `jets`
    pub light_jets: Vec<&'ev TruthJet>,
}

impl fmt::Display for TruthParticleGroups<'_> {
    /// Summary of the number of objects in each group
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Identified truth particles:")?;
        writeln!(f, "  {} photons", self.photons.len())?;
        writeln!(
            f,
            "  {} electrons, {} muons",
            self.electrons.len(),
            self.muons.len()
        )?;
        writeln!(f, "  {} photons from Higgs", self.photons_from_higgs.len())?;
        writeln!(
            f,
            "  {} B- and {} D-hadrons",
            self.b_hadrons.len(),
            self.d_hadrons.len()
        )?;
        writeln!(f, "  {} muons from B-hadrons", self.muons_from_bs.len())?;
        writeln!(f, "  {} jets, of which", self.jets.len())?;
        write!(
            f,
            "  {} b-, {} c- and {} light jets",
            self.b_jets.len(),
            self.c_jets.len(),
            self.light_jets.len()
        )
    }
}

/// Distance from a jet to the closest of a set of particles, in the
/// rapidity-azimuth plane (infinite if there is no particle)
pub fn min_delta_r(jet: &TruthJet, particles: &[ParticleRef]) -> Float {
    particles
        .iter()
        .map(|particle| delta_r_rapidity(jet, particle))
        .fold(Float::INFINITY, Float::min)
}

impl Classifier<'_> {
    /// Decide whether a jet survives the pt cut and the overlap removal
    fn keep_jet(
        &self,
        jet: &TruthJet,
        photons: &[ParticleRef],
        electrons: &[ParticleRef],
        jet_pt_cut: Float,
    ) -> bool {
        let overlap_dr = self.config().overlap_dr;
        if jet_pt_cut > 0. && jet.pt() < jet_pt_cut {
            trace!(pt = jet.pt() / GEV, "Dropped jet below pt cut");
            false
        } else if min_delta_r(jet, photons) < overlap_dr {
            trace!(pt = jet.pt() / GEV, "Dropped jet overlapping with a photon");
            false
        } else if min_delta_r(jet, electrons) < overlap_dr {
            trace!(pt = jet.pt() / GEV, "Dropped jet overlapping with an electron");
            false
        } else {
            true
        }
    }

    /// Remove the jets which fail the pt cut or overlap with a prompt photon
    /// or electron, keeping the others in order
    ///
    /// A non-positive `jet_pt_cut` disables the pt cut.
    ///
    pub fn remove_truth_overlap(
        &self,
        photons: &[ParticleRef],
        electrons: &[ParticleRef],
        jets: &mut Vec<&TruthJet>,
        jet_pt_cut: Float,
    ) {
        jets.retain(|jet| self.keep_jet(jet, photons, electrons, jet_pt_cut));
    }

    /// Label a jet from the heavy flavour hadrons around it
    ///
    /// b-hadrons take precedence over c-hadrons.
    ///
    pub fn jet_flavour(
        &self,
        jet: &TruthJet,
        b_hadrons: &[ParticleRef],
        d_hadrons: &[ParticleRef],
    ) -> JetFlavour {
        let flavour_dr = self.config().flavour_dr;
        if min_delta_r(jet, b_hadrons) < flavour_dr {
            JetFlavour::Bottom
        } else if min_delta_r(jet, d_hadrons) < flavour_dr {
            JetFlavour::Charm
        } else {
            JetFlavour::Light
        }
    }

    /// Identify all truth-level physics objects of an event
    ///
    /// A non-positive `jet_pt_cut` disables the jet pt cut.
    ///
    pub fn identify_truth_particles<'ev>(
        &self,
        particles: &'ev TruthParticles,
        jets: &'ev [TruthJet],
        jet_pt_cut: Float,
    ) -> Result<TruthParticleGroups<'ev>> {
        let mut groups = TruthParticleGroups {
            photons: self.good_truth_photons(particles)?,
            electrons: self.good_truth_electrons(particles)?,
            muons: self.good_truth_muons(particles)?,
            hadrons: self.hadrons_and_their_decay(particles)?,
            photons_from_higgs: self.photons_from_higgs(particles)?,
            higgs_decay: self.higgs_decay_products(particles)?,
            b_hadrons: b_hadrons(particles, None),
            d_hadrons: d_hadrons(particles, None),
            muons_from_bs: self.muons_from_bs(particles)?,
            ..TruthParticleGroups::default()
        };

        // Only hard enough hadrons are used for jet labelling
        let hadron_pt_min = Some(self.config().flavour_hadron_pt_min);
        let labelling_bs = b_hadrons(particles, hadron_pt_min);
        let labelling_ds = d_hadrons(particles, hadron_pt_min);

        for jet in jets {
            if !self.keep_jet(jet, &groups.photons, &groups.electrons, jet_pt_cut) {
                continue;
            }
            groups.jets.push(jet);
            match self.jet_flavour(jet, &labelling_bs, &labelling_ds) {
                JetFlavour::Bottom => groups.b_jets.push(jet),
                JetFlavour::Charm => groups.c_jets.push(jet),
                JetFlavour::Light => groups.light_jets.push(jet),
            }
        }

        debug!(
            photons = groups.photons.len(),
            electrons = groups.electrons.len(),
            muons = groups.muons.len(),
            hadrons = groups.hadrons.len(),
            jets = groups.jets.len(),
            b_jets = groups.b_jets.len(),
            c_jets = groups.c_jets.len(),
            "Identified truth particles"
        );
        Ok(groups)
    }
}
