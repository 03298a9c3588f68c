//! Modular arithmetic: extended GCD, modular inverse, CRT reconstruction.
//!
//! Pure functions with no shared state. The engine only ever calls these
//! with the prime moduli 3, 5 and 7, but the functions are general.

use crate::error::{CoreError, CoreResult};

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a * x + b * y == g` where `g = gcd(a, b)`.
#[must_use]
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    if a == 0 {
        (b, 0, 1)
    } else {
        let (g, x, y) = extended_gcd(b % a, a);
        (g, y - (b / a) * x, x)
    }
}

/// Modular multiplicative inverse of `a` modulo `m`.
///
/// # Errors
///
/// Returns [`CoreError::NoInverse`] when `gcd(a, m) != 1`. With prime
/// moduli this only happens when `a` is a multiple of the modulus.
pub fn mod_inverse(a: i64, m: i64) -> CoreResult<i64> {
    let (g, x, _) = extended_gcd(a.rem_euclid(m), m);
    if g != 1 {
        return Err(CoreError::NoInverse {
            value: a,
            modulus: m,
        });
    }
    Ok(x.rem_euclid(m))
}

/// Solves a system of simultaneous congruences by CRT reconstruction.
///
/// Returns the smallest non-negative `x` with `x ≡ remainders[i]
/// (mod moduli[i])` for all `i`. The solution is unique modulo the
/// product of the moduli, which must be pairwise coprime.
///
/// # Errors
///
/// Returns [`CoreError::NoInverse`] if the moduli are not pairwise
/// coprime (some partial product then has no inverse).
pub fn crt_solve(remainders: &[i64], moduli: &[i64]) -> CoreResult<i64> {
    let product: i64 = moduli.iter().product();

    let mut solution = 0i64;
    for (&r, &m) in remainders.iter().zip(moduli) {
        let partial = product / m;
        let inverse = mod_inverse(partial, m)?;
        solution += r * partial * inverse;
    }

    Ok(solution.rem_euclid(product))
}
