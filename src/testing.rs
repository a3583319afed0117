//! Shorthands for building small events in tests

use crate::{
    momentum::{from_pt_eta_phi_m, Momentum},
    numeric::{units::GEV, Float},
    particle::{TruthJet, TruthParticle},
};

/// Status code of intermediate generator records
pub const DECAYED: i32 = 2;

/// Massless momentum, with transverse momentum in GeV
pub fn p4(pt_gev: Float, eta: Float, phi: Float) -> Momentum {
    from_pt_eta_phi_m(pt_gev * GEV, eta, phi, 0.)
}

/// Final state particle at rest
pub fn stable(pdg_id: i32, barcode: i32) -> TruthParticle {
    TruthParticle::new(pdg_id, 1, barcode, Momentum::zeros())
}

/// Final state particle flying in some direction
pub fn stable_at(pdg_id: i32, barcode: i32, pt_gev: Float, eta: Float, phi: Float) -> TruthParticle {
    TruthParticle::new(pdg_id, 1, barcode, p4(pt_gev, eta, phi))
}

/// Intermediate particle at rest
pub fn decayed(pdg_id: i32, barcode: i32) -> TruthParticle {
    TruthParticle::new(pdg_id, DECAYED, barcode, Momentum::zeros())
}

/// Intermediate particle flying in some direction
pub fn decayed_at(
    pdg_id: i32,
    barcode: i32,
    pt_gev: Float,
    eta: Float,
    phi: Float,
) -> TruthParticle {
    TruthParticle::new(pdg_id, DECAYED, barcode, p4(pt_gev, eta, phi))
}

/// Massless jet
pub fn jet(pt_gev: Float, eta: Float, phi: Float) -> TruthJet {
    TruthJet::new(p4(pt_gev, eta, phi))
}
