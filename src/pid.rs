//! Particle species, as encoded by the PDG Monte Carlo numbering scheme
//!
//! A PDG code is a signed integer whose decimal digits encode the quark
//! content and quantum numbers of a particle (negative codes are the matching
//! antiparticles). Reading from the right, the digits are n_J, n_q3, n_q2,
//! n_q1, n_L, n_r and n. Hadrons are recognized from their quark digits, the
//! fundamental particles have dedicated codes.

/// Photon
pub const PHOTON: i32 = 22;

/// Electron (positron is -11)
pub const ELECTRON: i32 = 11;

/// Electron neutrino
pub const ELECTRON_NEUTRINO: i32 = 12;

/// Muon
pub const MUON: i32 = 13;

/// Muon neutrino
pub const MUON_NEUTRINO: i32 = 14;

/// Tau lepton
pub const TAU: i32 = 15;

/// Tau neutrino
pub const TAU_NEUTRINO: i32 = 16;

/// Z⁰ boson
pub const Z0: i32 = 23;

/// Standard Model Higgs boson
pub const HIGGS: i32 = 25;

/// Lightest neutralino, the usual dark matter candidate in simulation
pub const NEUTRALINO_1: i32 = 1_000_022;

/// Codes whose three digits after the last one identify quarks
const D_QUARK: u32 = 1;
const C_QUARK: u32 = 4;
const B_QUARK: u32 = 5;

// Digit locations, counted from the right starting at 1
const NJ: u32 = 1;
const NQ3: u32 = 2;
const NQ2: u32 = 3;
const NQ1: u32 = 4;

/// Extract one decimal digit of a PDG code
fn digit(location: u32, pdg_id: i32) -> u32 {
    (pdg_id.unsigned_abs() / 10_u32.pow(location - 1)) % 10
}

/// Anything beyond the seven standard digits (nuclei, generator specific)
fn extra_bits(pdg_id: i32) -> u32 {
    pdg_id.unsigned_abs() / 10_000_000
}

/// Code of a fundamental particle (no quark digits), or 0
fn fundamental_id(pdg_id: i32) -> u32 {
    if extra_bits(pdg_id) > 0 {
        return 0;
    }
    if digit(NQ2, pdg_id) == 0 && digit(NQ1, pdg_id) == 0 {
        pdg_id.unsigned_abs() % 10_000
    } else {
        0
    }
}

/// Truth that this code describes a meson
pub fn is_meson(pdg_id: i32) -> bool {
    if extra_bits(pdg_id) > 0 {
        return false;
    }
    let aid = pdg_id.unsigned_abs();
    // K⁰_L, K⁰_S and the historical K⁰ code don't follow the digit scheme
    if aid == 130 || aid == 310 || aid == 210 {
        return true;
    }
    if aid <= 100 {
        return false;
    }
    if digit(NQ1, pdg_id) == 0
        && digit(NQ2, pdg_id) != 0
        && digit(NQ3, pdg_id) != 0
        && digit(NJ, pdg_id) > 0
    {
        // Quarkonia are their own antiparticle, so they have no negative code
        return !(digit(NQ3, pdg_id) == digit(NQ2, pdg_id) && pdg_id < 0);
    }
    false
}

/// Truth that this code describes a baryon
pub fn is_baryon(pdg_id: i32) -> bool {
    if extra_bits(pdg_id) > 0 {
        return false;
    }
    let aid = pdg_id.unsigned_abs();
    if aid <= 100 {
        return false;
    }
    if (1..=100).contains(&fundamental_id(pdg_id)) {
        return false;
    }
    // Old-style neutron and proton codes
    if aid == 2110 || aid == 2210 {
        return true;
    }
    digit(NQ1, pdg_id) != 0
        && digit(NQ2, pdg_id) != 0
        && digit(NQ3, pdg_id) != 0
        && digit(NJ, pdg_id) > 0
}

/// Truth that this code describes a hadron
pub fn is_hadron(pdg_id: i32) -> bool {
    is_meson(pdg_id) || is_baryon(pdg_id)
}

/// Truth that a hadron code contains a certain quark flavour
fn has_quark(pdg_id: i32, quark: u32) -> bool {
    [NQ1, NQ2, NQ3]
        .iter()
        .any(|&location| digit(location, pdg_id) == quark)
}

/// Truth that this code describes a b-hadron
pub fn is_bottom_hadron(pdg_id: i32) -> bool {
    is_hadron(pdg_id) && has_quark(pdg_id, B_QUARK)
}

/// Truth that this code describes a c-hadron
///
/// Hadrons are named after their heaviest quark, so a B_c is a b-hadron and
/// not a c-hadron.
///
pub fn is_charm_hadron(pdg_id: i32) -> bool {
    is_hadron(pdg_id) && has_quark(pdg_id, C_QUARK) && !has_quark(pdg_id, B_QUARK)
}

/// Truth that this code describes a (neutral or charged) Higgs boson
pub fn is_higgs(pdg_id: i32) -> bool {
    pdg_id == HIGGS || matches!(pdg_id.unsigned_abs(), 35 | 36 | 37)
}

/// Truth that this code describes a Z⁰ boson
pub fn is_z(pdg_id: i32) -> bool {
    pdg_id == Z0
}

/// Truth that this code describes a photon
pub fn is_photon(pdg_id: i32) -> bool {
    pdg_id == PHOTON
}

/// Truth that this code describes an electron or positron
pub fn is_electron(pdg_id: i32) -> bool {
    pdg_id.unsigned_abs() == ELECTRON as u32
}

/// Truth that this code describes a muon
pub fn is_muon(pdg_id: i32) -> bool {
    pdg_id.unsigned_abs() == MUON as u32
}

/// Truth that this code describes a tau lepton
pub fn is_tau(pdg_id: i32) -> bool {
    pdg_id.unsigned_abs() == TAU as u32
}

/// Truth that this code describes a neutrino
pub fn is_neutrino(pdg_id: i32) -> bool {
    matches!(pdg_id.unsigned_abs(), 12 | 14 | 16)
}

/// Three times the electric charge of a quark flavour
fn quark_three_charge(quark: u32) -> i32 {
    if quark % 2 == D_QUARK % 2 {
        -1
    } else {
        2
    }
}

/// Three times the electric charge of the particle with this code
///
/// Unknown and exotic codes are reported as neutral.
///
pub fn three_charge(pdg_id: i32) -> i32 {
    let aid = pdg_id.unsigned_abs();
    let charge = match aid {
        1..=8 => quark_three_charge(aid),
        11 | 13 | 15 | 17 => -3,
        24 | 37 => 3,
        130 | 310 | 210 => 0,
        _ if is_meson(pdg_id) => {
            let (q2, q3) = (digit(NQ2, pdg_id), digit(NQ3, pdg_id));
            // Mesons list the quark first, except when it is down-type
            if q2 == 3 || q2 == 5 {
                quark_three_charge(q3) - quark_three_charge(q2)
            } else {
                quark_three_charge(q2) - quark_three_charge(q3)
            }
        }
        _ if is_baryon(pdg_id) => [NQ1, NQ2, NQ3]
            .iter()
            .map(|&location| quark_three_charge(digit(location, pdg_id)))
            .sum(),
        _ => 0,
    };
    if pdg_id < 0 {
        -charge
    } else {
        charge
    }
}
