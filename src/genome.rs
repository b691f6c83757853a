//! Fixed-length steering genomes and the operators that recombine them.

use crate::{
    constants::{ROCKETRY_GENE_MAX, ROCKETRY_GENE_MIN, ROCKETRY_GENOME_LENGTH},
    random::{EvolutionEvent, Happens},
};
use rand::RngCore;
use rand_distr::{Distribution, Uniform};

/// One steering instruction: degrees added to the heading on the tick it
/// fires.
pub type Gene = i8;

/// An ordered run of [ROCKETRY_GENOME_LENGTH] steering instructions.
///
/// The length is invariant for the life of a run, and every gene stays
/// inside [ROCKETRY_GENE_MIN ..= ROCKETRY_GENE_MAX] through creation,
/// crossover, and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome(Vec<Gene>);

impl Genome {
    /// A full-length genome of uniform gene draws.
    pub fn random(rng: &mut impl RngCore) -> Self {
        let span = gene_span();
        Self(
            (0..ROCKETRY_GENOME_LENGTH)
                .map(|_| span.sample(rng))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn genes(&self) -> &[Gene] {
        &self.0
    }

    /// The instruction for a given tick. Indexing is periodic, so any
    /// monotone tick counter selects genes regardless of how the boundary
    /// clock paces it.
    #[inline]
    pub fn gene_at(&self, tick: usize) -> Gene {
        self.0[tick % self.0.len()]
    }

    /// Single-point splice with `other` at `split` (`0..=len` inclusive):
    /// the first child leads with our genes, the second with the other
    /// parent's, each completed by the opposite tail.
    pub fn cross(&self, other: &Self, split: usize) -> (Self, Self) {
        let (l, r) = (&self.0, &other.0);
        let mut first = Vec::with_capacity(l.len());
        first.extend_from_slice(&l[..split]);
        first.extend_from_slice(&r[split..]);
        let mut second = Vec::with_capacity(r.len());
        second.extend_from_slice(&r[..split]);
        second.extend_from_slice(&l[split..]);
        (Self(first), Self(second))
    }

    /// Sweep the genome, judging every position independently for a
    /// [EvolutionEvent::MutateGene] redraw.
    pub fn mutate(&mut self, rng: &mut (impl RngCore + Happens)) {
        let span = gene_span();
        for gene in self.0.iter_mut() {
            if rng.happens(EvolutionEvent::MutateGene) {
                *gene = span.sample(rng);
            }
        }
    }
}

fn gene_span() -> Uniform<Gene> {
    Uniform::new_inclusive(ROCKETRY_GENE_MIN, ROCKETRY_GENE_MAX).expect("static gene bounds")
}
