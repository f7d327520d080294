// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Arithmetic in GF(257).
//!
//! 257 is the smallest prime above the byte range, so every byte is a field
//! element. The value 256 is excluded from share pixels by the splitter.

/// The field modulus.
pub const PRIME: u32 = 257;

/// Multiplicative inverses mod 257. Index 0 has no inverse and holds 0.
pub const MOD_INVERSE: [u16; PRIME as usize] = [
    0, 1, 129, 86, 193, 103, 43, 147, 225, 200, 180, 187, 150, 178, 202, 120,
    241, 121, 100, 230, 90, 49, 222, 190, 75, 72, 89, 238, 101, 195, 60, 199,
    249, 148, 189, 235, 50, 132, 115, 145, 45, 163, 153, 6, 111, 40, 95, 175,
    166, 21, 36, 126, 173, 97, 119, 243, 179, 248, 226, 61, 30, 59, 228, 102,
    253, 87, 74, 234, 223, 149, 246, 181, 25, 169, 66, 24, 186, 247, 201, 244,
    151, 165, 210, 96, 205, 127, 3, 65, 184, 26, 20, 209, 176, 152, 216, 46, 83,
    53, 139, 135, 18, 28, 63, 5, 215, 164, 177, 245, 188, 224, 250, 44, 218,
    116, 124, 38, 113, 134, 159, 54, 15, 17, 158, 140, 114, 220, 51, 85, 255, 2,
    172, 206, 37, 143, 117, 99, 240, 242, 203, 98, 123, 144, 219, 133, 141, 39,
    213, 7, 33, 69, 12, 80, 93, 42, 252, 194, 229, 239, 122, 118, 204, 174, 211,
    41, 105, 81, 48, 237, 231, 73, 192, 254, 130, 52, 161, 47, 92, 106, 13, 56,
    10, 71, 233, 191, 88, 232, 76, 11, 108, 34, 23, 183, 170, 4, 155, 29, 198,
    227, 196, 31, 9, 78, 14, 138, 160, 84, 131, 221, 236, 91, 82, 162, 217, 146,
    251, 104, 94, 212, 112, 142, 125, 207, 22, 68, 109, 8, 58, 197, 62, 156, 19,
    168, 185, 182, 67, 35, 208, 167, 27, 157, 136, 16, 137, 55, 79, 107, 70, 77,
    57, 32, 110, 214, 154, 64, 171, 128, 256,
];

/// Inverse of a non-zero residue, `None` for 0.
#[inline]
pub fn inverse(a: u32) -> Option<u32> {
    match MOD_INVERSE[(a % PRIME) as usize] {
        0 => None,
        inv => Some(u32::from(inv)),
    }
}

/// Evaluate `coeffs[0] + coeffs[1]*x + ... ` mod 257 (Horner, widened sum).
#[inline]
pub fn eval_poly(coeffs: &[u8], x: u32) -> u32 {
    let x = u64::from(x % PRIME);
    coeffs
        .iter()
        .rev()
        .fold(0u64, |acc, &c| (acc * x + u64::from(c)) % u64::from(PRIME)) as u32
}

/// `x^0, x^1, ..., x^(k-1)` mod 257.
pub fn powers(x: u32, k: usize) -> Vec<u32> {
    let x = x % PRIME;
    let mut out = Vec::with_capacity(k);
    let mut p = 1u32;
    for _ in 0..k {
        out.push(p);
        p = p * x % PRIME;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_table_is_correct() {
        for a in 1..PRIME {
            let inv = inverse(a).unwrap();
            assert_eq!(a * inv % PRIME, 1, "a={a}");
        }
        assert_eq!(inverse(0), None);
        assert_eq!(inverse(PRIME), None);
    }

    #[test]
    fn eval_matches_naive_sum() {
        let coeffs = [177u8, 44, 227, 62];
        for x in 1..=10u32 {
            let naive: u64 = coeffs
                .iter()
                .enumerate()
                .map(|(r, &c)| u64::from(c) * u64::from(x).pow(r as u32))
                .sum();
            assert_eq!(u64::from(eval_poly(&coeffs, x)), naive % 257);
        }
    }

    #[test]
    fn eval_does_not_overflow_for_large_x() {
        let coeffs = [255u8; 64];
        assert!(eval_poly(&coeffs, 256) < PRIME);
    }

    #[test]
    fn powers_mod_prime() {
        assert_eq!(powers(3, 4), vec![1, 3, 9, 27]);
        assert_eq!(powers(256, 3), vec![1, 256, 1]);
    }
}
