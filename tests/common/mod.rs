#![allow(dead_code)]

use clause_core::{
    context::Context,
    structures::literal::{CLiteral, IntLiteral, Literal},
};
use rand::Rng;
use rand_core::{impls, RngCore, SeedableRng};

/// A minimal PCG32, so randomised workloads are reproducible from a seed.
#[derive(Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = ((old_state >> 18) ^ old_state) >> 27;
        let rot = (old_state >> 59) as u32;
        (xorshifted as u32).rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        const INCREMENT: u64 = 1442695040888963407;
        Self {
            state: u64::from_le_bytes(seed).wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A context with the given count of atoms.
pub fn context_with_atoms(count: usize) -> Context {
    let mut the_context = Context::default();
    for _ in 0..count {
        assert!(the_context.fresh_atom().is_ok());
    }
    the_context
}

/// Literals from their DIMACS form.
pub fn lits(ints: &[IntLiteral]) -> Vec<CLiteral> {
    ints.iter().map(|int| int.canonical()).collect()
}

/// A clause of `size` literals over distinct atoms below `atoms`.
pub fn random_clause(rng: &mut impl Rng, atoms: u32, size: usize) -> Vec<CLiteral> {
    let mut clause: Vec<CLiteral> = Vec::with_capacity(size);
    while clause.len() < size {
        let atom = rng.random_range(0..atoms);
        if clause.iter().any(|literal| literal.atom() == atom) {
            continue;
        }
        clause.push(CLiteral::new(atom, rng.random_bool(0.5)));
    }
    clause
}

/// Every valuation of the given count of (outer) atoms, as a vector of values.
pub fn all_valuations(atoms: usize) -> impl Iterator<Item = Vec<Option<bool>>> {
    (0..1_u32 << atoms).map(move |bits| (0..atoms).map(|atom| Some(bits & (1 << atom) != 0)).collect())
}

/// Whether some literal of the clause is true on the valuation.
pub fn satisfies(valuation: &[Option<bool>], clause: &[CLiteral]) -> bool {
    clause
        .iter()
        .any(|literal| valuation[literal.atom() as usize] == Some(literal.polarity()))
}
