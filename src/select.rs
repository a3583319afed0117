//! Classification predicates and the selections built on top of them
//!
//! Predicates decide whether a single truth particle belongs to a category,
//! selections apply them to a whole event and return the matching particles
//! in event order. The predicates that need to walk the decay graph live on
//! `Classifier`, which knows how far such walks may go.

use crate::{
    ancestry,
    config::Configuration,
    error::Result,
    momentum::{FourMomentum, Momentum},
    numeric::Float,
    particle::{ParticleRef, TruthParticle, TruthParticles},
    pid,
};

/// Generator status of final state particles
pub const STABLE_STATUS: i32 = 1;

/// Barcodes from this one on are reserved for simulation-level particles
pub const STABLE_BARCODE_LIMIT: i32 = 200_000;

/// Generator statuses of the Higgs record that decays in Dalitz events
const DALITZ_HIGGS_STATUSES: [i32; 2] = [62, 52];

/// Truth that the particle is a final state generator particle
pub fn is_stable(particle: &TruthParticle) -> bool {
    particle.status == STABLE_STATUS && particle.barcode < STABLE_BARCODE_LIMIT
}

/// Truth that the particle is the last copy of a Higgs boson, the one that
/// actually decays
pub fn is_final_higgs(particle: ParticleRef) -> bool {
    pid::is_higgs(particle.pdg_id)
        && particle
            .child(0)
            .map_or(false, |child| !pid::is_higgs(child.pdg_id))
}

/// Truth that the event contains a Higgs Dalitz decay (H → γ* → ...)
///
/// These events are recognized by a virtual photon among the first two decay
/// products of the decaying Higgs boson.
///
pub fn is_dalitz(particles: &TruthParticles) -> bool {
    let is_virtual_photon = |child: Option<ParticleRef>| {
        child.map_or(false, |c| pid::is_photon(c.pdg_id) && c.status != STABLE_STATUS)
    };
    particles.iter().any(|particle| {
        particle.abs_pdg_id() == pid::HIGGS as u32
            && DALITZ_HIGGS_STATUSES.contains(&particle.status)
            && particle.num_children() >= 2
            && (is_virtual_photon(particle.child(0)) || is_virtual_photon(particle.child(1)))
    })
}

/// Truth that the particle is a final state dark matter candidate
pub fn is_good_truth_dark_matter(particle: &TruthParticle) -> bool {
    particle.status == STABLE_STATUS && particle.abs_pdg_id() == pid::NEUTRALINO_1 as u32
}

/// Select the particles which pass an infallible predicate
fn filter<'ev>(
    particles: &'ev TruthParticles,
    mut keep: impl FnMut(ParticleRef<'ev>) -> bool,
) -> Vec<ParticleRef<'ev>> {
    particles.iter().filter(|&particle| keep(particle)).collect()
}

/// Select the particles which pass a predicate that walks the decay graph
fn try_filter<'ev>(
    particles: &'ev TruthParticles,
    mut keep: impl FnMut(ParticleRef<'ev>) -> Result<bool>,
) -> Result<Vec<ParticleRef<'ev>>> {
    let mut selected = Vec::new();
    for particle in particles.iter() {
        if keep(particle)? {
            selected.push(particle);
        }
    }
    Ok(selected)
}

/// Hadron selection with an optional strict transverse momentum threshold
fn hadrons_above(
    particles: &TruthParticles,
    species: impl Fn(i32) -> bool,
    pt_cut: Option<Float>,
) -> Vec<ParticleRef<'_>> {
    filter(particles, |particle| {
        species(particle.pdg_id) && pt_cut.map_or(true, |cut| particle.pt() > cut)
    })
}

/// All b-hadrons of the event, whatever their generator status
pub fn b_hadrons(particles: &TruthParticles, pt_cut: Option<Float>) -> Vec<ParticleRef<'_>> {
    hadrons_above(particles, pid::is_bottom_hadron, pt_cut)
}

/// All c-hadrons of the event, whatever their generator status
pub fn d_hadrons(particles: &TruthParticles, pt_cut: Option<Float>) -> Vec<ParticleRef<'_>> {
    hadrons_above(particles, pid::is_charm_hadron, pt_cut)
}

/// Last copy of every Higgs boson of the event
pub fn final_higgs_bosons(particles: &TruthParticles) -> Vec<ParticleRef<'_>> {
    filter(particles, is_final_higgs)
}

/// Final state dark matter candidates
pub fn good_truth_dark_matter(particles: &TruthParticles) -> Vec<ParticleRef<'_>> {
    filter(particles, |particle| is_good_truth_dark_matter(&particle))
}

/// Sum of the 4-momenta of all stable particles
///
/// For a complete event, this is the center-of-mass 4-momentum of the
/// collision. Any difference points at particles missing from the record.
///
pub fn stable_momentum_sum(particles: &TruthParticles) -> Momentum {
    particles
        .iter()
        .filter(|particle| is_stable(particle))
        .fold(Momentum::zeros(), |sum, particle| sum + particle.p4())
}

/// Truth particle classifier
///
/// Holds the configuration which the classification operations depend on.
///
#[derive(Clone, Copy, Debug)]
pub struct Classifier<'cfg> {
    cfg: &'cfg Configuration,
}
//
impl<'cfg> Classifier<'cfg> {
    /// Set up a classifier
    pub fn new(cfg: &'cfg Configuration) -> Self {
        Self { cfg }
    }

    /// Configuration in use
    pub fn config(&self) -> &'cfg Configuration {
        self.cfg
    }

    // ### ANCESTRY ###

    /// Truth that the particle is a Higgs boson or descends from one
    pub fn is_from_higgs(&self, particle: ParticleRef) -> Result<bool> {
        ancestry::is_from_higgs(particle, self.cfg.max_ancestry_depth)
    }

    /// Truth that the particle is a Z⁰ boson or descends from one
    pub fn is_from_z(&self, particle: ParticleRef) -> Result<bool> {
        ancestry::is_from_z(particle, self.cfg.max_ancestry_depth)
    }

    /// Truth that the particle is a b-hadron or descends from one
    pub fn is_from_b_hadron(&self, particle: ParticleRef) -> Result<bool> {
        ancestry::is_from_b_hadron(particle, self.cfg.max_ancestry_depth)
    }

    /// Truth that the particle neither is nor comes from a hadron
    pub fn not_from_hadron(&self, particle: ParticleRef) -> Result<bool> {
        ancestry::not_from_hadron(particle, self.cfg.max_ancestry_depth)
    }

    /// Stable particles at the end of this particle's decay tree
    pub fn stable_decay_products<'ev>(
        &self,
        particle: ParticleRef<'ev>,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        ancestry::stable_decay_products(particle, self.cfg.max_ancestry_depth)
    }

    // ### PREDICATES ###

    /// Stable particle of a given species which is not a hadron decay product
    fn is_good_truth(&self, particle: ParticleRef, species: impl Fn(i32) -> bool) -> Result<bool> {
        Ok(is_stable(&particle) && species(particle.pdg_id) && self.not_from_hadron(particle)?)
    }

    /// Truth that this is a prompt final state photon
    pub fn is_good_truth_photon(&self, particle: ParticleRef) -> Result<bool> {
        self.is_good_truth(particle, pid::is_photon)
    }

    /// Truth that this is a prompt final state electron
    pub fn is_good_truth_electron(&self, particle: ParticleRef) -> Result<bool> {
        self.is_good_truth(particle, pid::is_electron)
    }

    /// Truth that this is a prompt final state muon
    pub fn is_good_truth_muon(&self, particle: ParticleRef) -> Result<bool> {
        self.is_good_truth(particle, pid::is_muon)
    }

    /// Truth that this is a final state electron or muon from a Z⁰ decay
    pub fn is_z_decay_lepton(&self, particle: ParticleRef) -> Result<bool> {
        Ok(is_stable(&particle)
            && (pid::is_electron(particle.pdg_id) || pid::is_muon(particle.pdg_id))
            && self.is_from_z(particle)?)
    }

    // ### SELECTIONS ###

    /// Prompt final state photons
    pub fn good_truth_photons<'ev>(
        &self,
        particles: &'ev TruthParticles,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        try_filter(particles, |p| self.is_good_truth_photon(p))
    }

    /// Prompt final state electrons
    pub fn good_truth_electrons<'ev>(
        &self,
        particles: &'ev TruthParticles,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        try_filter(particles, |p| self.is_good_truth_electron(p))
    }

    /// Prompt final state muons
    pub fn good_truth_muons<'ev>(
        &self,
        particles: &'ev TruthParticles,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        try_filter(particles, |p| self.is_good_truth_muon(p))
    }

    /// Final state electrons and muons from Z⁰ decays
    pub fn z_decay_leptons<'ev>(
        &self,
        particles: &'ev TruthParticles,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        try_filter(particles, |p| self.is_z_decay_lepton(p))
    }

    /// Prompt final state photons which descend from a Higgs boson
    pub fn photons_from_higgs<'ev>(
        &self,
        particles: &'ev TruthParticles,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        try_filter(particles, |p| {
            Ok(self.is_good_truth_photon(p)? && self.is_from_higgs(p)?)
        })
    }

    /// Final state particles which descend from a Higgs boson
    pub fn higgs_decay_products<'ev>(
        &self,
        particles: &'ev TruthParticles,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        try_filter(particles, |p| Ok(is_stable(&p) && self.is_from_higgs(p)?))
    }

    /// Final state muons which descend from a b-hadron
    pub fn muons_from_bs<'ev>(
        &self,
        particles: &'ev TruthParticles,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        try_filter(particles, |p| {
            Ok(is_stable(&p) && pid::is_muon(p.pdg_id) && self.is_from_b_hadron(p)?)
        })
    }

    /// Final state particles which are neither prompt photons, nor prompt
    /// electrons, nor prompt muons
    pub fn hadrons_and_their_decay<'ev>(
        &self,
        particles: &'ev TruthParticles,
    ) -> Result<Vec<ParticleRef<'ev>>> {
        try_filter(particles, |p| {
            Ok(is_stable(&p)
                && !self.is_good_truth_photon(p)?
                && !self.is_good_truth_electron(p)?
                && !self.is_good_truth_muon(p)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        momentum::{from_cartesian, E, X},
        numeric::units::GEV,
        particle::DecayGraphBuilder,
        testing::{decayed, decayed_at, stable, stable_at},
    };
    use pretty_assertions::assert_eq;

    fn barcodes(particles: &[ParticleRef]) -> Vec<i32> {
        particles.iter().map(|p| p.barcode).collect()
    }

    #[test]
    fn stability() {
        for status in [0, 1, 2, 3, 62] {
            for barcode in [1, 199_999, 200_000, 200_001] {
                let particle = TruthParticle::new(22, status, barcode, Momentum::zeros());
                assert_eq!(
                    is_stable(&particle),
                    status == 1 && barcode < 200_000,
                    "status {status}, barcode {barcode}"
                );
            }
        }
    }

    #[test]
    fn good_truth_leptons_and_photons() {
        let mut builder = DecayGraphBuilder::new();
        let z = builder.add(decayed(23, 1));
        let electron = builder.add(stable(11, 2));
        let positron = builder.add(stable(-11, 3));
        let pion = builder.add(decayed(111, 4));
        let pion_photon = builder.add(stable(22, 5));
        let prompt_photon = builder.add(stable(22, 6));
        let muon = builder.add(stable(13, 7));
        let geant_muon = builder.add(stable(13, 200_007));
        builder
            .link(z, electron)
            .link(z, positron)
            .link(pion, pion_photon);
        let particles = builder.build().unwrap();
        let cfg = Configuration::default();
        let classifier = Classifier::new(&cfg);
        let get = |index| particles.get(index).unwrap();

        assert!(classifier.is_good_truth_electron(get(electron)).unwrap());
        assert!(classifier.is_good_truth_electron(get(positron)).unwrap());
        assert!(!classifier.is_good_truth_electron(get(muon)).unwrap());
        assert!(classifier.is_good_truth_photon(get(prompt_photon)).unwrap());
        assert!(!classifier.is_good_truth_photon(get(pion_photon)).unwrap());
        assert!(classifier.is_good_truth_muon(get(muon)).unwrap());
        assert!(!classifier.is_good_truth_muon(get(geant_muon)).unwrap());

        assert_eq!(
            barcodes(&classifier.good_truth_electrons(&particles).unwrap()),
            vec![2, 3]
        );
        assert_eq!(
            barcodes(&classifier.good_truth_photons(&particles).unwrap()),
            vec![6]
        );
        assert_eq!(
            barcodes(&classifier.good_truth_muons(&particles).unwrap()),
            vec![7]
        );
        assert_eq!(
            barcodes(&classifier.z_decay_leptons(&particles).unwrap()),
            vec![2, 3]
        );
        assert_eq!(
            barcodes(&classifier.hadrons_and_their_decay(&particles).unwrap()),
            vec![5]
        );
    }

    #[test]
    fn higgs_selections() {
        let mut builder = DecayGraphBuilder::new();
        let higgs = builder.add(decayed(25, 1));
        let higgs_copy = builder.add(decayed(25, 2));
        let photon1 = builder.add(stable(22, 3));
        let photon2 = builder.add(stable(22, 4));
        let b_meson = builder.add(decayed(511, 5));
        let b_muon = builder.add(stable(13, 6));
        let b_pion = builder.add(stable(211, 7));
        builder
            .chain(&[higgs, higgs_copy, photon1])
            .link(higgs_copy, photon2)
            .link(b_meson, b_muon)
            .link(b_meson, b_pion);
        let particles = builder.build().unwrap();
        let cfg = Configuration::default();
        let classifier = Classifier::new(&cfg);

        assert!(!is_final_higgs(particles.get(higgs).unwrap()));
        assert!(is_final_higgs(particles.get(higgs_copy).unwrap()));
        assert!(!is_final_higgs(particles.get(photon1).unwrap()));
        assert_eq!(barcodes(&final_higgs_bosons(&particles)), vec![2]);
        assert_eq!(
            barcodes(&classifier.photons_from_higgs(&particles).unwrap()),
            vec![3, 4]
        );
        assert_eq!(
            barcodes(&classifier.higgs_decay_products(&particles).unwrap()),
            vec![3, 4]
        );
        assert_eq!(
            barcodes(&classifier.muons_from_bs(&particles).unwrap()),
            vec![6]
        );
        assert_eq!(
            barcodes(&classifier.stable_decay_products(particles.get(higgs).unwrap()).unwrap()),
            vec![3, 4]
        );
    }

    #[test]
    fn childless_higgs_is_not_final() {
        let particles = TruthParticles::new(vec![decayed(25, 1)]).unwrap();
        assert!(!is_final_higgs(particles.get(0).unwrap()));
    }

    #[test]
    fn dalitz_decays() {
        let dalitz_event = |higgs_status: i32, photon_status: i32, photon_position: usize| {
            let mut builder = DecayGraphBuilder::new();
            let mut higgs = decayed(25, 1);
            higgs.status = higgs_status;
            let higgs = builder.add(higgs);
            let mut photon = decayed(22, 2);
            photon.status = photon_status;
            let mut children = vec![decayed(11, 3), decayed(-11, 4)];
            children.insert(photon_position, photon);
            for child in children {
                let child = builder.add(child);
                builder.link(higgs, child);
            }
            is_dalitz(&builder.build().unwrap())
        };
        assert!(dalitz_event(62, 2, 0));
        assert!(dalitz_event(52, 2, 1));
        assert!(!dalitz_event(62, 2, 2));
        assert!(!dalitz_event(62, 1, 0));
        assert!(!dalitz_event(22, 2, 0));

        // Needs at least two children
        let mut builder = DecayGraphBuilder::new();
        let mut higgs = decayed(25, 1);
        higgs.status = 62;
        let higgs = builder.add(higgs);
        let photon = builder.add(decayed(22, 2));
        builder.link(higgs, photon);
        assert!(!is_dalitz(&builder.build().unwrap()));
    }

    #[test]
    fn heavy_flavour_hadrons() {
        let particles = TruthParticles::new(vec![
            decayed_at(511, 1, 4., 0., 0.),
            decayed_at(-521, 2, 5., 0., 0.),
            decayed_at(5122, 3, 20., 0., 0.),
            decayed_at(421, 4, 12., 0., 0.),
            decayed_at(541, 5, 30., 0., 0.),
            stable_at(211, 6, 50., 0., 0.),
        ])
        .unwrap();
        assert_eq!(barcodes(&b_hadrons(&particles, None)), vec![1, 2, 3, 5]);
        // The cut is strict
        assert_eq!(barcodes(&b_hadrons(&particles, Some(5. * GEV))), vec![3, 5]);
        assert_eq!(barcodes(&d_hadrons(&particles, None)), vec![4]);
        assert!(d_hadrons(&particles, Some(15. * GEV)).is_empty());
    }

    #[test]
    fn dark_matter() {
        let particles = TruthParticles::new(vec![
            stable(1_000_022, 1),
            decayed(1_000_022, 2),
            stable(1_000_022, 250_000),
            stable(12, 4),
        ])
        .unwrap();
        // The barcode convention does not apply to dark matter
        assert_eq!(barcodes(&good_truth_dark_matter(&particles)), vec![1, 250_000]);
    }

    #[test]
    fn momentum_sum_only_counts_stable_particles() {
        let particles = TruthParticles::new(vec![
            TruthParticle::new(11, 1, 1, from_cartesian(10., 5., 3., 20.)),
            TruthParticle::new(-11, 1, 2, from_cartesian(-10., -5., 1., 20.)),
            TruthParticle::new(23, 2, 3, from_cartesian(0., 0., 4., 40.)),
        ])
        .unwrap();
        let sum = stable_momentum_sum(&particles);
        assert_eq!(sum[X], 0.);
        assert_eq!(sum, from_cartesian(0., 0., 4., 40.));
        assert_eq!(sum[E], 40.);
    }
}
