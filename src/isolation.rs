//! Generator-level isolation of final state particles
//!
//! The isolation of a particle is the transverse energy carried by the other
//! final state particles in a cone around it. Collections hold at most a few
//! hundred particles per event, so the cone is filled by a linear scan.

use crate::{
    momentum::{delta_r, FourMomentum, Momentum, X, Y},
    numeric::{units::GEV, Float},
    particle::{ParticleRef, TruthParticles},
    pid,
    select::{is_stable, Classifier},
};

/// Definition of the isolation cone
#[derive(Clone, Debug, PartialEq)]
pub struct IsolationCone {
    /// Radius of the cone in the pseudorapidity-azimuth plane
    pub radius: Float,

    /// Only count charged particles
    pub charged_only: bool,

    /// Absolute species codes of the particles which should not be counted
    pub ignored_species: Vec<u32>,

    /// Only count particles with at least this transverse momentum (MeV)
    pub pt_cut: Option<Float>,
}
//
impl IsolationCone {
    /// Cone of a given radius which counts every final state particle
    pub fn new(radius: Float) -> Self {
        Self {
            radius,
            charged_only: false,
            ignored_species: Vec::new(),
            pt_cut: None,
        }
    }

    /// Only count charged particles
    pub fn charged_only(mut self) -> Self {
        self.charged_only = true;
        self
    }

    /// Do not count particles of these species (sign is ignored)
    pub fn ignoring(mut self, species: impl IntoIterator<Item = i32>) -> Self {
        self.ignored_species
            .extend(species.into_iter().map(i32::unsigned_abs));
        self
    }

    /// Only count particles above a transverse momentum threshold (MeV)
    pub fn with_pt_cut(mut self, pt_cut: Float) -> Self {
        self.pt_cut = Some(pt_cut);
        self
    }
}
//
impl Default for IsolationCone {
    /// The usual generator-level isolation: ΔR < 0.2, particles above 1 GeV,
    /// muons and neutrinos do not count since they leave no energy in the
    /// calorimeters
    fn default() -> Self {
        Self::new(0.2)
            .ignoring([
                pid::MUON,
                pid::ELECTRON_NEUTRINO,
                pid::MUON_NEUTRINO,
                pid::TAU_NEUTRINO,
            ])
            .with_pt_cut(1. * GEV)
    }
}

/// Transverse energy of the other final state particles around a particle
///
/// If the particle is a copy, the original record is the one which gets
/// excluded from the sum. When the transverse momenta of the particles in the
/// cone exactly cancel out, the isolation is zero.
///
pub fn truth_isolation(
    particle: ParticleRef,
    particles: &TruthParticles,
    cone: &IsolationCone,
) -> Float {
    let target = particle.original();
    let sum = particles
        .iter()
        .filter(|p| p.barcode != target.barcode)
        .filter(|p| is_stable(p))
        .filter(|p| delta_r(p, &target) < cone.radius)
        .filter(|p| !cone.charged_only || p.three_charge != 0)
        .filter(|p| !cone.ignored_species.contains(&p.abs_pdg_id()))
        .filter(|p| cone.pt_cut.map_or(true, |cut| cut <= 0. || p.pt() >= cut))
        .fold(Momentum::zeros(), |sum, p| sum + p.p4());
    if sum[X] == 0. && sum[Y] == 0. {
        0.
    } else {
        sum.et()
    }
}

impl Classifier<'_> {
    /// Isolation of a particle, using the configured isolation cone
    pub fn truth_isolation(&self, particle: ParticleRef, particles: &TruthParticles) -> Float {
        truth_isolation(particle, particles, &self.config().isolation)
    }
}
