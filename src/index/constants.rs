/// Alphabet for the two leading characters of a zone code
pub const H_KEY: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Half the projected globe width
pub const H_BASE: f64 = 20037508.34;

/// Skew of the hex lattice, tan(30°)
pub(crate) const H_K: f64 = 0.5773502691896257;

/// Number of base-9 digit values folded into each prefix letter
pub(crate) const PREFIX_RADIX: u32 = 30;

/// Largest prefix value an encoder can emit ("888" read in base 10)
pub(crate) const MAX_PREFIX: u32 = 888;

/// Maximum level
pub const MAX_LEVEL: u8 = 15;

#[inline]
pub(crate) const fn pow3(exp: u32) -> i64 {
    3_i64.pow(exp)
}
