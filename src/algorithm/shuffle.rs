use crate::io::error::{Result, invalid_parameter};
use rand::{CryptoRng, Rng, SeedableRng, rngs::StdRng};

/// Permute `items` in place with `passes` consecutive Fisher–Yates shuffles
///
/// Every index is drawn uniformly from a cryptographically strong generator so
/// orderings stay unbiased across many collection generations. Each pass is a
/// complete, independent shuffle.
///
/// # Errors
///
/// Returns an invalid parameter error if `passes` is zero
pub fn shuffle<T, R>(items: &mut [T], passes: usize, rng: &mut R) -> Result<()>
where
    R: Rng + CryptoRng,
{
    if passes < 1 {
        return Err(invalid_parameter(
            "passes",
            &passes,
            &"should be more than or equal to 1",
        ));
    }

    if items.len() < 2 {
        return Ok(());
    }

    for _ in 0..passes {
        for index in (1..items.len()).rev() {
            let swap_with = rng.random_range(0..=index);
            items.swap(index, swap_with);
        }
    }

    Ok(())
}

/// Owned-sequence form of [`shuffle`]
///
/// # Errors
///
/// Returns an invalid parameter error if `passes` is zero
pub fn shuffled<T, R>(mut items: Vec<T>, passes: usize, rng: &mut R) -> Result<Vec<T>>
where
    R: Rng + CryptoRng,
{
    shuffle(&mut items, passes, rng)?;
    Ok(items)
}

/// Cryptographically strong generator, reproducible when a seed is given
///
/// Without a seed the generator is keyed from operating system entropy.
pub fn secure_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}
