//! # GF(2^8)
//!
//! Binary extension field with reduction polynomial
//! x^8 + x^4 + x^3 + x^2 + 1 (0x11D) and generator 2. Multiplication and
//! inversion go through log/exp tables built at compile time.

use std::ops::{Add, Div, Mul, Sub};

/// Reduction polynomial.
pub const POLYNOMIAL: u16 = 0x11D;

/// Number of distinct field elements.
pub const FIELD_SIZE: usize = 256;

const fn build_tables() -> ([u8; 512], [u8; 256]) {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= POLYNOMIAL;
        }
        i += 1;
    }
    // doubled so a sum of two logs never needs a reduction
    while i < 512 {
        exp[i] = exp[i - 255];
        i += 1;
    }
    (exp, log)
}

const TABLES: ([u8; 512], [u8; 256]) = build_tables();
static EXP: [u8; 512] = TABLES.0;
static LOG: [u8; 256] = TABLES.1;

/// Element of GF(2^8).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gf256(u8);

impl Gf256 {
    /// Zero element.
    pub const ZERO: Self = Self(0);

    /// One element.
    pub const ONE: Self = Self(1);

    /// Wrap a byte.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Raw byte.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Check if zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn inverse(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        Some(Self(EXP[255 - LOG[self.0 as usize] as usize]))
    }

    /// Exponentiation by squaring.
    pub fn pow(self, mut exp: u32) -> Self {
        let mut base = self;
        let mut result = Self::ONE;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            exp >>= 1;
        }
        result
    }
}

impl Add for Gf256 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Sub for Gf256 {
    type Output = Self;

    // characteristic 2: subtraction is addition
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for Gf256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Self::ZERO;
        }
        Self(EXP[LOG[self.0 as usize] as usize + LOG[rhs.0 as usize] as usize])
    }
}

impl Div for Gf256 {
    type Output = Option<Self>;

    fn div(self, rhs: Self) -> Option<Self> {
        rhs.inverse().map(|inv| self * inv)
    }
}

/// `acc[i] ^= coeff * src[i]` for every byte.
pub fn mul_add_slice(acc: &mut [u8], src: &[u8], coeff: Gf256) {
    if coeff.is_zero() {
        return;
    }
    let log_c = LOG[coeff.0 as usize] as usize;
    for (a, s) in acc.iter_mut().zip(src) {
        if *s != 0 {
            *a ^= EXP[LOG[*s as usize] as usize + log_c];
        }
    }
}
