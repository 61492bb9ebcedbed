//! Number theory helpers

/// Result of the extended Euclidean algorithm: `a * x + b * y = gcd`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedGcd {
    pub gcd: i128,
    pub x: i128,
    pub y: i128,
}

/// Extended Euclidean algorithm over `i128`
pub fn extended_gcd(a: i128, b: i128) -> ExtendedGcd {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1, 0);
    let (mut old_t, mut t) = (0, 1);

    while r != 0 {
        let q = old_r.div_euclid(r);
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }

    ExtendedGcd {
        gcd: old_r,
        x: old_s,
        y: old_t,
    }
}

/// Solve the system `t ≡ residue (mod modulus)` for every pair.
///
/// Returns the smallest non-negative solution together with the combined
/// modulus, or `None` when the congruences are inconsistent.
pub fn chinese_remainder(congruences: &[(i128, i128)]) -> Option<(i128, i128)> {
    congruences
        .iter()
        .try_fold((0i128, 1i128), |(acc, modulus), &(residue, m)| {
            let ExtendedGcd { gcd, x, .. } = extended_gcd(modulus, m);
            let diff = residue - acc;
            if diff.rem_euclid(gcd) != 0 {
                return None;
            }
            let lcm = modulus / gcd * m;
            let step = (diff / gcd * x).rem_euclid(m / gcd);
            Some(((acc + modulus * step).rem_euclid(lcm), lcm))
        })
}

/// `base^exp mod modulus` by square-and-multiply
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let modulus = modulus as u128;
    let mut result: u128 = 1;
    let mut b = base as u128 % modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % modulus;
        }
        b = b * b % modulus;
        exp >>= 1;
    }
    result as u64
}
