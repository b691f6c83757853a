//! Selection, crossover, and mutation: how one generation's fleet becomes
//! the next.

use crate::{
    constants::ROCKETRY_ELITE_FRACTION,
    random::{EvolutionEvent, Happens},
    rocket::{Rocket, RocketFactory},
};
use rand::{Rng, RngCore};
use tracing::debug;

/// Breeding failures. Crossover needs two distinct elites to draw a parent
/// pair; a fleet too small to yield them fails the whole breeding event.
#[derive(Debug, thiserror::Error)]
pub enum BreedError {
    #[error("elite pool of {0} is too small to draw a crossover pair")]
    DegenerateElite(usize),
}

/// Rank the fleet by fitness and keep the top fifth.
///
/// The sort is stable and descending, so equally fit rockets keep their
/// fleet order; unevaluated rockets rank below every scored one. The elite
/// count is `⌊0.2 · N⌋`.
pub fn selection(mut rockets: Vec<Rocket>, rng: &mut (impl RngCore + Happens)) -> Vec<Rocket> {
    rockets.sort_by(|l, r| {
        let (l, r) = (l.fitness.unwrap_or(f64::MIN), r.fitness.unwrap_or(f64::MIN));
        r.partial_cmp(&l).unwrap_or(core::cmp::Ordering::Equal)
    });

    let elite = (ROCKETRY_ELITE_FRACTION * rockets.len() as f64) as usize;

    if rng.happens(EvolutionEvent::DuplicateWorst) {
        // the echoed pair lands past the elite cutoff and is dropped with
        // the rest of the tail; diagnostic only
        let tail: Vec<_> = rockets.iter().rev().take(2).map(|r| r.id).collect();
        debug!(?tail, "selection: duplicating the two least-fit rockets");
    }

    rockets.truncate(elite);
    rockets
}

/// Two distinct members of `pool`: the first uniform over the whole pool,
/// the second uniform over everything else.
fn distinct_pair<'a, T>(pool: &'a [T], rng: &mut impl RngCore) -> Option<(&'a T, &'a T)> {
    if pool.len() < 2 {
        return None;
    }
    let l = rng.random_range(0..pool.len());
    let mut r = rng.random_range(0..pool.len() - 1);
    if r >= l {
        r += 1;
    }
    Some((&pool[l], &pool[r]))
}

/// Refill the pool toward `target` by splicing random elite pairs.
///
/// Children arrive in complementary pairs, so the result holds
/// `E + 2·⌊(target − E)/2⌋` rockets, one short of `target` whenever the
/// remainder is odd. The undershoot carries into following generations
/// rather than being corrected here.
pub fn crossover(
    mut elites: Vec<Rocket>,
    target: usize,
    factory: &mut RocketFactory,
    rng: &mut impl RngCore,
) -> Result<Vec<Rocket>, BreedError> {
    if elites.len() < 2 {
        return Err(BreedError::DegenerateElite(elites.len()));
    }

    let pairs = target.saturating_sub(elites.len()) / 2;
    let mut offspring = Vec::with_capacity(pairs * 2);
    for _ in 0..pairs {
        let (mother, father) = distinct_pair(&elites, rng).expect("two or more elites");
        let split = rng.random_range(0..=mother.genome.len());
        let (first, second) = mother.genome.cross(&father.genome, split);
        offspring.push(factory.spawn_with(first));
        offspring.push(factory.spawn_with(second));
    }

    elites.extend(offspring);
    Ok(elites)
}

/// Sweep mutation over the whole pool in place; elites are not exempt.
pub fn mutation(rockets: &mut [Rocket], rng: &mut (impl RngCore + Happens)) {
    for rocket in rockets.iter_mut() {
        rocket.genome.mutate(rng);
    }
}

/// The full pipeline: rank and keep the elite fifth, refill by splicing
/// elite pairs, then sweep mutation over the result. The old fleet is
/// consumed outright before the new pool exists; no stage mutates across
/// another's boundary.
pub fn reproduce(
    rockets: Vec<Rocket>,
    target: usize,
    factory: &mut RocketFactory,
    rng: &mut (impl RngCore + Happens),
) -> Result<Vec<Rocket>, BreedError> {
    let elites = selection(rockets, rng);
    let mut pool = crossover(elites, target, factory, rng)?;
    mutation(&mut pool, rng);
    Ok(pool)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        constants::{ROCKETRY_GENE_MAX, ROCKETRY_GENE_MIN, ROCKETRY_GENOME_LENGTH},
        random::{ProbBinding, ProbStatic},
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn happens(seed: u64) -> ProbBinding<ProbStatic, StdRng> {
        ProbBinding::new(ProbStatic::default(), StdRng::seed_from_u64(seed))
    }

    /// A fleet of `count` rockets whose fitness equals their spawn index.
    fn fleet(count: usize, factory: &mut RocketFactory) -> Vec<Rocket> {
        let mut rng = StdRng::seed_from_u64(99);
        (0..count)
            .map(|idx| {
                let mut rocket = factory.spawn(&mut rng);
                rocket.fitness = Some(idx as f64);
                rocket
            })
            .collect()
    }

    #[test]
    fn test_selection_keeps_floor_fifth() {
        for (count, elite) in [(10, 2), (100, 20), (101, 20), (104, 20), (9, 1), (4, 0)] {
            let mut factory = RocketFactory::new();
            let picked = selection(fleet(count, &mut factory), &mut happens(0));
            assert_eq!(elite, picked.len(), "fleet of {count}");
        }
    }

    #[test]
    fn test_selection_ranks_descending() {
        let mut factory = RocketFactory::new();
        let picked = selection(fleet(100, &mut factory), &mut happens(1));
        let scores: Vec<f64> = picked.iter().map(|r| r.fitness.unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        // the best rocket scored 99
        assert_eq!(Some(99.0), picked[0].fitness);
    }

    #[test]
    fn test_selection_stable_on_ties() {
        let mut factory = RocketFactory::new();
        let mut rockets = fleet(10, &mut factory);
        for rocket in rockets.iter_mut() {
            rocket.fitness = Some(1.0);
        }
        let ids: Vec<_> = rockets.iter().map(|r| r.id).collect();
        let picked = selection(rockets, &mut happens(2));
        assert_eq!(&ids[..2], &picked.iter().map(|r| r.id).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn test_selection_unevaluated_ranks_last() {
        let mut factory = RocketFactory::new();
        let mut rockets = fleet(10, &mut factory);
        let unevaluated = rockets[9].id;
        rockets[9].fitness = None;
        let picked = selection(rockets, &mut happens(3));
        assert!(picked.iter().all(|r| r.id != unevaluated));
    }

    #[test]
    fn test_duplicate_worst_is_a_no_op() {
        let mut factory = RocketFactory::new();
        let rockets = fleet(20, &mut factory);
        let mut never = ProbBinding::new(
            ProbStatic::default().with_overrides(&[(EvolutionEvent::DuplicateWorst, 0)]),
            StdRng::seed_from_u64(4),
        );
        let mut always = ProbBinding::new(
            ProbStatic::default().with_overrides(&[(EvolutionEvent::DuplicateWorst, u64::MAX)]),
            StdRng::seed_from_u64(4),
        );
        let quiet = selection(rockets.clone(), &mut never);
        let loud = selection(rockets, &mut always);
        assert_eq!(
            quiet.iter().map(|r| r.id).collect::<Vec<_>>(),
            loud.iter().map(|r| r.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_distinct_pair_never_aliases() {
        let pool: Vec<usize> = (0..5).collect();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1_000 {
            let (l, r) = distinct_pair(&pool, &mut rng).unwrap();
            assert_ne!(l, r);
        }
        assert!(distinct_pair(&pool[..1], &mut rng).is_none());
    }

    #[test]
    fn test_crossover_sizes() {
        // target 100 from 20 elites refills exactly; 101 drifts one short
        for (target, expected) in [(100, 100), (101, 100), (102, 102), (20, 20)] {
            let mut factory = RocketFactory::new();
            let elites = selection(fleet(100, &mut factory), &mut happens(6));
            let pool = crossover(elites, target, &mut factory, &mut happens(7)).unwrap();
            assert_eq!(expected, pool.len(), "target {target}");
        }
    }

    #[test]
    fn test_crossover_children_are_factory_fresh() {
        let mut factory = RocketFactory::new();
        let elites = selection(fleet(100, &mut factory), &mut happens(8));
        let elite_ids: Vec<_> = elites.iter().map(|r| r.id).collect();
        let pool = crossover(elites, 100, &mut factory, &mut happens(9)).unwrap();
        for child in pool.iter().skip(elite_ids.len()) {
            assert!(child.id > *elite_ids.iter().max().unwrap());
            assert_eq!(None, child.fitness);
            assert_eq!(ROCKETRY_GENOME_LENGTH, child.genome.len());
        }
    }

    #[test]
    fn test_crossover_degenerate_elites() {
        for count in [0, 1] {
            let mut factory = RocketFactory::new();
            let elites = fleet(count, &mut factory);
            match crossover(elites, 10, &mut factory, &mut happens(10)) {
                Err(BreedError::DegenerateElite(n)) => assert_eq!(count, n),
                other => panic!("expected DegenerateElite, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_reproduce_population_arithmetic() {
        // N=100: E=20, offspring 80, exact refill. N=101: one short.
        for (count, expected) in [(100, 100), (101, 100), (10, 10), (11, 10)] {
            let mut factory = RocketFactory::new();
            let rockets = fleet(count, &mut factory);
            let pool = reproduce(rockets, count, &mut factory, &mut happens(11)).unwrap();
            assert_eq!(expected, pool.len(), "fleet of {count}");
        }
    }

    #[test]
    fn test_reproduce_degenerate_fleet() {
        // a fleet of 5 yields a single elite, which cannot pair
        let mut factory = RocketFactory::new();
        let rockets = fleet(5, &mut factory);
        assert!(matches!(
            reproduce(rockets, 5, &mut factory, &mut happens(12)),
            Err(BreedError::DegenerateElite(1))
        ));
    }

    #[test]
    fn test_reproduce_gene_invariants_hold() {
        let mut factory = RocketFactory::new();
        let rockets = fleet(50, &mut factory);
        let pool = reproduce(rockets, 50, &mut factory, &mut happens(13)).unwrap();
        assert_eq!(50, pool.len());
        for rocket in &pool {
            assert_eq!(ROCKETRY_GENOME_LENGTH, rocket.genome.len());
            assert!(rocket
                .genome
                .genes()
                .iter()
                .all(|gene| (ROCKETRY_GENE_MIN..=ROCKETRY_GENE_MAX).contains(gene)));
        }
    }

    #[test]
    fn test_mutation_reaches_elites() {
        let mut factory = RocketFactory::new();
        let rockets = fleet(10, &mut factory);
        let champion = rockets[9].clone();
        let mut forced = ProbBinding::new(
            ProbStatic::default().with_overrides(&[(EvolutionEvent::MutateGene, u64::MAX)]),
            StdRng::seed_from_u64(14),
        );
        let pool = reproduce(rockets, 10, &mut factory, &mut forced).unwrap();
        // the champion is retained as an elite but its genome is not protected
        let retained = pool.iter().find(|r| r.id == champion.id).unwrap();
        assert_ne!(champion.genome, retained.genome);
    }
}
