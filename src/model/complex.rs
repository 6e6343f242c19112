// Copyright 2024 Popo Utility Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Complex numbers produced by fractional powers of negative bases and `j` literals

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Complex number with f64 parts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex {
    /// Create a complex number
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Complex number with zero imaginary part
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Magnitude
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Phase angle
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Both parts are zero
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// Both parts are finite
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// Division; `None` when the divisor is zero
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        // Smith's algorithm keeps intermediate values in range
        let (a, b, c, d) = (self.re, self.im, rhs.re, rhs.im);
        if c.abs() >= d.abs() {
            let ratio = d / c;
            let denom = c + d * ratio;
            Some(Self::new((a + b * ratio) / denom, (b - a * ratio) / denom))
        } else {
            let ratio = c / d;
            let denom = c * ratio + d;
            Some(Self::new((a * ratio + b) / denom, (b * ratio - a) / denom))
        }
    }

    /// `self ** exponent` in polar form; `None` for zero raised to a negative
    /// or complex power
    pub fn checked_pow(self, exponent: Self) -> Option<Self> {
        if exponent.is_zero() {
            return Some(Self::real(1.0));
        }
        if self.is_zero() {
            if exponent.im != 0.0 || exponent.re < 0.0 {
                return None;
            }
            return Some(Self::default());
        }
        let magnitude = self.abs();
        let angle = self.arg();
        let mut length = magnitude.powf(exponent.re);
        let mut phase = angle * exponent.re;
        if exponent.im != 0.0 {
            length /= (angle * exponent.im).exp();
            phase += exponent.im * magnitude.ln();
        }
        Some(Self::new(length * phase.cos(), length * phase.sin()))
    }

    /// Integer power by repeated squaring; `None` for zero raised to a
    /// negative power
    pub fn checked_powi(self, exponent: i32) -> Option<Self> {
        let mut result = Self::real(1.0);
        let mut base = self;
        let mut n = exponent.unsigned_abs();
        while n > 0 {
            if n & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            n >>= 1;
        }
        if exponent < 0 {
            Self::real(1.0).checked_div(result)
        } else {
            Some(result)
        }
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "({}-{}j)", self.re, -self.im)
        } else {
            write!(f, "({}+{}j)", self.re, self.im)
        }
    }
}
