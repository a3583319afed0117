//! Walks through the decay graph of an event
//!
//! Ancestry questions ("was this photon produced in a Higgs decay?") are
//! answered by walking up the chain of *first* parents. Generators record
//! radiative corrections as successive copies of the same particle, each the
//! first parent of the next, so this follows the production history without
//! branching.
//!
//! Decay graphs come from external files and nothing guarantees that they are
//! acyclic, so every walk is bounded by a maximal number of steps.

use crate::{
    error::{ClassifyError, Result},
    particle::ParticleRef,
    pid,
    select::is_stable,
};
use tracing::warn;

/// Default bound on the length of decay graph walks
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// What a walk should do after inspecting a particle
enum Step<'ev> {
    /// Stop with the provided answer
    Done(bool),

    /// Carry on with this ancestor
    Up(ParticleRef<'ev>),
}

/// Walk up the decay graph until `step` produces an answer
fn walk_up<'ev>(
    start: ParticleRef<'ev>,
    max_depth: usize,
    operation: &'static str,
    mut step: impl FnMut(ParticleRef<'ev>) -> Step<'ev>,
) -> Result<bool> {
    let mut current = start;
    for _ in 0..=max_depth {
        match step(current) {
            Step::Done(answer) => return Ok(answer),
            Step::Up(ancestor) => current = ancestor,
        }
    }
    Err(too_deep(operation, start, max_depth))
}

/// Report a walk that did not terminate in time
fn too_deep(operation: &'static str, start: ParticleRef, max_depth: usize) -> ClassifyError {
    warn!(
        operation,
        barcode = start.barcode,
        max_depth,
        "Decay graph walk did not terminate"
    );
    ClassifyError::AncestryTooDeep {
        operation,
        barcode: start.barcode,
        max_depth,
    }
}

/// Truth that the particle or one of its first-parent ancestors has a species
/// code matching `species`
fn is_from(
    particle: ParticleRef,
    max_depth: usize,
    operation: &'static str,
    species: impl Fn(i32) -> bool,
) -> Result<bool> {
    walk_up(particle, max_depth, operation, |current| {
        if species(current.pdg_id) {
            Step::Done(true)
        } else {
            match current.parent(0) {
                Some(parent) => Step::Up(parent),
                None => Step::Done(false),
            }
        }
    })
}

/// Truth that the particle is a Higgs boson or descends from one
pub fn is_from_higgs(particle: ParticleRef, max_depth: usize) -> Result<bool> {
    is_from(particle, max_depth, "is_from_higgs", pid::is_higgs)
}

/// Truth that the particle is a Z⁰ boson or descends from one
pub fn is_from_z(particle: ParticleRef, max_depth: usize) -> Result<bool> {
    is_from(particle, max_depth, "is_from_z", pid::is_z)
}

/// Truth that the particle is a b-hadron or descends from one
pub fn is_from_b_hadron(particle: ParticleRef, max_depth: usize) -> Result<bool> {
    is_from(particle, max_depth, "is_from_b_hadron", pid::is_bottom_hadron)
}

/// Truth that the particle is not a hadron, nor a hadron decay product
///
/// Copies of the particle and tau leptons are looked through, so a photon
/// radiated by a tau which comes from a hadron decay is still considered to
/// come from that hadron.
///
pub fn not_from_hadron(particle: ParticleRef, max_depth: usize) -> Result<bool> {
    walk_up(particle, max_depth, "not_from_hadron", |current| {
        if pid::is_hadron(current.pdg_id) {
            return Step::Done(false);
        }
        let Some(parent) = current.parent(0) else {
            return Step::Done(true);
        };
        if pid::is_hadron(parent.pdg_id) {
            Step::Done(false)
        } else if pid::is_tau(parent.pdg_id) || parent.pdg_id == current.pdg_id {
            Step::Up(parent)
        } else {
            Step::Done(true)
        }
    })
}

/// Collect the stable particles at the end of a particle's decay tree
///
/// A stable particle is its own decay product. Otherwise, the children are
/// explored depth-first, in generator order.
///
pub fn stable_decay_products(
    particle: ParticleRef<'_>,
    max_depth: usize,
) -> Result<Vec<ParticleRef<'_>>> {
    let mut products = Vec::new();
    let mut stack = vec![(particle, 0)];
    while let Some((current, depth)) = stack.pop() {
        if is_stable(&current) {
            products.push(current);
            continue;
        }
        if current.num_children() > 0 && depth >= max_depth {
            return Err(too_deep("stable_decay_products", particle, max_depth));
        }
        // Reversed so that the first child is explored first
        stack.extend(current.children().rev().map(|child| (child, depth + 1)));
    }
    Ok(products)
}
