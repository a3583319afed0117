//! This module implements some domain-specific 4-momentum handling logic.

use crate::numeric::{
    floats::consts::{PI, TAU},
    Float,
};
use nalgebra::SVector;
use prefix_num_ops::real::*;

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// (Pseudo)rapidity reported for momenta that are parallel to the beam axis
const BEAM_AXIS_RAPIDITY: Float = 1e10;

/// Build a 4-momentum from its cartesian components
pub fn from_cartesian(px: Float, py: Float, pz: Float, e: Float) -> Momentum {
    Momentum::new(px, py, pz, e)
}

/// Build a 4-momentum from transverse momentum, pseudorapidity, azimuth and
/// mass, the usual collider coordinates
pub fn from_pt_eta_phi_m(pt: Float, eta: Float, phi: Float, m: Float) -> Momentum {
    let px = pt * cos(phi);
    let py = pt * sin(phi);
    let pz = pt * sinh(eta);
    let e = sqrt(px * px + py * py + pz * pz + m * m);
    Momentum::new(px, py, pz, e)
}

/// Collider kinematics of anything that carries a 4-momentum
pub trait FourMomentum {
    /// Access the underlying 4-momentum
    fn p4(&self) -> &Momentum;

    /// Transverse momentum
    fn pt(&self) -> Float {
        let p = self.p4();
        sqrt(p[X] * p[X] + p[Y] * p[Y])
    }

    /// Azimuthal angle, in ]-π, π]
    fn phi(&self) -> Float {
        let p = self.p4();
        if p[X] == 0. && p[Y] == 0. {
            0.
        } else {
            atan2(p[Y], p[X])
        }
    }

    /// Pseudorapidity
    fn eta(&self) -> Float {
        let pt = self.pt();
        let pz = self.p4()[Z];
        if pt > 0. {
            asinh(pz / pt)
        } else if pz == 0. {
            0.
        } else {
            signum(pz) * BEAM_AXIS_RAPIDITY
        }
    }

    /// Rapidity
    fn rapidity(&self) -> Float {
        let p = self.p4();
        let (pz, e) = (p[Z], p[E]);
        if e > abs(pz) {
            0.5 * ln((e + pz) / (e - pz))
        } else if pz == 0. {
            0.
        } else {
            signum(pz) * BEAM_AXIS_RAPIDITY
        }
    }

    /// Invariant mass (negative for space-like momenta)
    fn mass(&self) -> Float {
        let p = self.p4();
        let m2 = p[E] * p[E] - p.fixed_rows::<3>(X).norm_squared();
        if m2 < 0. {
            -sqrt(-m2)
        } else {
            sqrt(m2)
        }
    }

    /// Transverse energy, carrying the sign of the energy
    fn et(&self) -> Float {
        let p = self.p4();
        let pt2 = p[X] * p[X] + p[Y] * p[Y];
        let p2 = pt2 + p[Z] * p[Z];
        if p2 == 0. {
            0.
        } else {
            p[E] * sqrt(pt2 / p2)
        }
    }
}

impl FourMomentum for Momentum {
    fn p4(&self) -> &Momentum {
        self
    }
}

/// Azimuthal separation of two directions, folded into ]-π, π]
pub fn delta_phi(phi1: Float, phi2: Float) -> Float {
    let dphi = (phi1 - phi2) % TAU;
    if dphi > PI {
        dphi - TAU
    } else if dphi <= -PI {
        dphi + TAU
    } else {
        dphi
    }
}

/// Angular distance in the pseudorapidity-azimuth plane
pub fn delta_r(a: &impl FourMomentum, b: &impl FourMomentum) -> Float {
    let deta = a.eta() - b.eta();
    let dphi = delta_phi(a.phi(), b.phi());
    sqrt(deta * deta + dphi * dphi)
}

/// Angular distance in the rapidity-azimuth plane, as used for jets
pub fn delta_r_rapidity(a: &impl FourMomentum, b: &impl FourMomentum) -> Float {
    let dy = a.rapidity() - b.rapidity();
    let dphi = delta_phi(a.phi(), b.phi());
    sqrt(dy * dy + dphi * dphi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Float, b: Float) -> bool {
        abs(a - b) < 1e-4
    }

    #[test]
    fn collider_coordinates_round_trip() {
        let p = from_pt_eta_phi_m(25., 1.2, -2.0, 0.);
        assert!(close(p.pt(), 25.));
        assert!(close(p.eta(), 1.2));
        assert!(close(p.phi(), -2.0));
        assert!(close(p.mass(), 0.));
        // Massless particles have identical rapidity and pseudorapidity
        assert!(close(p.rapidity(), p.eta()));
    }

    #[test]
    fn massive_rapidity_is_smaller_than_eta() {
        let p = from_pt_eta_phi_m(10., 2.0, 0.3, 5.);
        assert!(close(p.mass(), 5.));
        assert!(p.rapidity() < p.eta());
    }

    #[test]
    fn beam_axis_momenta() {
        let p = from_cartesian(0., 0., 50., 50.);
        assert_eq!(p.pt(), 0.);
        assert_eq!(p.phi(), 0.);
        assert_eq!(p.eta(), BEAM_AXIS_RAPIDITY);
        assert_eq!(p.rapidity(), BEAM_AXIS_RAPIDITY);
        assert_eq!(p.et(), 0.);
        assert_eq!(from_cartesian(0., 0., 0., 0.).eta(), 0.);
    }

    #[test]
    fn transverse_energy() {
        let p = from_cartesian(3., 4., 0., 7.);
        assert!(close(p.et(), 7.));
        let p = from_cartesian(3., 0., 4., 10.);
        assert!(close(p.et(), 6.));
    }

    #[test]
    fn azimuth_wraps_around() {
        assert!(close(delta_phi(3.0, -3.0), 6.0 - TAU));
        assert!(close(delta_phi(-3.0, 3.0), TAU - 6.0));
        assert!(close(delta_phi(0.5, 0.2), 0.3));
        assert!(close(delta_phi(PI, -PI), 0.));
    }

    #[test]
    fn angular_distances() {
        let a = from_pt_eta_phi_m(10., 0.5, 3.0, 0.);
        let b = from_pt_eta_phi_m(40., 0.2, -3.0, 0.);
        let expected = sqrt(0.09 + (TAU - 6.0) * (TAU - 6.0));
        assert!(close(delta_r(&a, &b), expected));
        assert!(close(delta_r_rapidity(&a, &b), expected));
        assert_eq!(delta_r(&a, &a), 0.);
    }
}
