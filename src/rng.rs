use rand_core::RngCore;

/// A small, seedable pseudo-random generator for targets without a hardware RNG.
///
/// Channel selection only needs uniform draws, any [`RngCore`] may be used instead.
#[derive(Clone)]
pub struct Prng(fastrand::Rng);

impl Prng {
    pub fn new(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        self.0.u32(..)
    }

    fn next_u64(&mut self) -> u64 {
        self.0.u64(..)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Uniform draw in `0..n`. `n` must not be zero.
pub(crate) fn random_below<RNG: RngCore>(rng: &mut RNG, n: usize) -> usize {
    (rng.next_u32() as usize) % n
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prng_is_deterministic() {
        let mut a = Prng::new(42);
        let mut b = Prng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn random_below_stays_in_range() {
        let mut rng = Prng::new(7);
        for n in 1..40 {
            assert!(random_below(&mut rng, n) < n);
        }
    }
}
