//! This module defines the properties and storage of truth particles and jets
//!
//! Truth records belong to the event that they were read from. Particles are
//! stored in an immutable per-event container, and refer to their parents and
//! children in the decay graph by index into that container. Classification
//! results are lists of lightweight handles into these containers, so physics
//! records are never copied around.

use crate::{
    error::{ClassifyError, Result},
    momentum::{FourMomentum, Momentum},
    pid,
};
use std::{fmt, ops::Deref};

/// Generator-level particle record
#[derive(Clone, Debug, PartialEq)]
pub struct TruthParticle {
    /// Species code (PDG numbering scheme)
    pub pdg_id: i32,

    /// Lifecycle code from the event generator (1 means final state)
    pub status: i32,

    /// Unique identifier of this particle within the event
    pub barcode: i32,

    /// Three times the electric charge
    pub three_charge: i32,

    /// 4-momentum (MeV)
    pub p4: Momentum,

    /// Indices of the production ancestors, in generator order
    pub parents: Vec<usize>,

    /// Indices of the decay products, in generator order
    pub children: Vec<usize>,

    /// Index of the particle that this record was shallow-copied from, if any
    pub original: Option<usize>,
}
//
impl TruthParticle {
    /// Build a particle with no decay graph links
    ///
    /// The electric charge is deduced from the species code, use
    /// `with_three_charge` to override it.
    ///
    pub fn new(pdg_id: i32, status: i32, barcode: i32, p4: Momentum) -> Self {
        Self {
            pdg_id,
            status,
            barcode,
            three_charge: pid::three_charge(pdg_id),
            p4,
            parents: Vec::new(),
            children: Vec::new(),
            original: None,
        }
    }

    /// Override the electric charge of this particle
    pub fn with_three_charge(mut self, three_charge: i32) -> Self {
        self.three_charge = three_charge;
        self
    }

    /// Mark this particle as a copy of the particle at index `original`
    pub fn with_original(mut self, original: usize) -> Self {
        self.original = Some(original);
        self
    }

    /// Absolute value of the species code
    pub fn abs_pdg_id(&self) -> u32 {
        self.pdg_id.unsigned_abs()
    }
}

impl FourMomentum for TruthParticle {
    fn p4(&self) -> &Momentum {
        &self.p4
    }
}

/// Immutable container of the truth particles of one event
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TruthParticles(Vec<TruthParticle>);
//
impl TruthParticles {
    /// Build a particle container, checking that all links are valid
    pub fn new(particles: Vec<TruthParticle>) -> Result<Self> {
        let len = particles.len();
        let check = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(ClassifyError::DanglingLink {
                    operation: "TruthParticles::new",
                    index,
                    len,
                })
            }
        };
        for particle in &particles {
            for &index in particle.parents.iter().chain(&particle.children) {
                check(index)?;
            }
            if let Some(index) = particle.original {
                check(index)?;
            }
        }
        Ok(Self(particles))
    }

    /// Number of particles in the event
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Truth that the event holds no particle
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Handle to the particle at a given index, if any
    pub fn get(&self, index: usize) -> Option<ParticleRef<'_>> {
        (index < self.len()).then_some(ParticleRef {
            container: self,
            index,
        })
    }

    /// Iterate over all particles, in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = ParticleRef<'_>> + ExactSizeIterator {
        (0..self.len()).map(move |index| ParticleRef {
            container: self,
            index,
        })
    }
}

/// Handle to a particle inside of its event's container
///
/// Dereferences to the underlying `TruthParticle`, and gives access to the
/// rest of the decay graph.
///
#[derive(Clone, Copy)]
pub struct ParticleRef<'ev> {
    container: &'ev TruthParticles,
    index: usize,
}
//
impl<'ev> ParticleRef<'ev> {
    /// Position of the particle inside of its container
    pub fn index(&self) -> usize {
        self.index
    }

    /// Access the particle record with the lifetime of the container
    pub fn particle(&self) -> &'ev TruthParticle {
        &self.container.0[self.index]
    }

    /// Handle to another particle of the same event
    ///
    /// Links are checked when the container is built, so this cannot fail.
    ///
    fn sibling(&self, index: usize) -> ParticleRef<'ev> {
        ParticleRef {
            container: self.container,
            index,
        }
    }

    /// Number of production ancestors
    pub fn num_parents(&self) -> usize {
        self.particle().parents.len()
    }

    /// Number of decay products
    pub fn num_children(&self) -> usize {
        self.particle().children.len()
    }

    /// n-th production ancestor, if any
    pub fn parent(&self, n: usize) -> Option<ParticleRef<'ev>> {
        let index = *self.particle().parents.get(n)?;
        Some(self.sibling(index))
    }

    /// n-th decay product, if any
    pub fn child(&self, n: usize) -> Option<ParticleRef<'ev>> {
        let index = *self.particle().children.get(n)?;
        Some(self.sibling(index))
    }

    /// Iterate over production ancestors
    pub fn parents(
        &self,
    ) -> impl DoubleEndedIterator<Item = ParticleRef<'ev>> + ExactSizeIterator + 'ev {
        let this = *self;
        self.particle()
            .parents
            .iter()
            .map(move |&index| this.sibling(index))
    }

    /// Iterate over decay products
    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = ParticleRef<'ev>> + ExactSizeIterator + 'ev {
        let this = *self;
        self.particle()
            .children
            .iter()
            .map(move |&index| this.sibling(index))
    }

    /// Particle that this record was copied from, or the record itself
    pub fn original(&self) -> ParticleRef<'ev> {
        match self.particle().original {
            Some(index) => self.sibling(index),
            None => *self,
        }
    }
}

impl Deref for ParticleRef<'_> {
    type Target = TruthParticle;

    fn deref(&self) -> &TruthParticle {
        self.particle()
    }
}

impl FourMomentum for ParticleRef<'_> {
    fn p4(&self) -> &Momentum {
        &self.particle().p4
    }
}

impl PartialEq for ParticleRef<'_> {
    /// Handles are equal when they designate the same particle of the same
    /// container
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.container, other.container) && self.index == other.index
    }
}
//
impl Eq for ParticleRef<'_> {}

impl fmt::Debug for ParticleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let particle = self.particle();
        f.debug_struct("ParticleRef")
            .field("index", &self.index)
            .field("pdg_id", &particle.pdg_id)
            .field("status", &particle.status)
            .field("barcode", &particle.barcode)
            .finish()
    }
}

/// Incremental construction of a particle container and its decay graph
///
/// Parent and child links are always recorded on both ends, in the order in
/// which `link` is called.
///
#[derive(Debug, Default)]
pub struct DecayGraphBuilder {
    particles: Vec<TruthParticle>,
    links: Vec<(usize, usize)>,
}
//
impl DecayGraphBuilder {
    /// Start with an empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a particle, returning its index in the final container
    pub fn add(&mut self, particle: TruthParticle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Record that `child` was produced by `parent`
    pub fn link(&mut self, parent: usize, child: usize) -> &mut Self {
        self.links.push((parent, child));
        self
    }

    /// Record a decay chain, each particle being produced by the previous one
    pub fn chain(&mut self, indices: &[usize]) -> &mut Self {
        for pair in indices.windows(2) {
            self.link(pair[0], pair[1]);
        }
        self
    }

    /// Apply the recorded links and build the container
    pub fn build(self) -> Result<TruthParticles> {
        let Self {
            mut particles,
            links,
        } = self;
        let len = particles.len();
        for (parent, child) in links {
            for index in [parent, child] {
                if index >= len {
                    return Err(ClassifyError::DanglingLink {
                        operation: "DecayGraphBuilder::build",
                        index,
                        len,
                    });
                }
            }
            particles[parent].children.push(child);
            particles[child].parents.push(parent);
        }
        TruthParticles::new(particles)
    }
}

/// Generator-level jet, built from stable truth particles
#[derive(Clone, Debug, PartialEq)]
pub struct TruthJet {
    /// 4-momentum (MeV)
    pub p4: Momentum,
}
//
impl TruthJet {
    /// Build a jet from its 4-momentum
    pub fn new(p4: Momentum) -> Self {
        Self { p4 }
    }
}

impl FourMomentum for TruthJet {
    fn p4(&self) -> &Momentum {
        &self.p4
    }
}
