//! Congestion-dependent feerate curve
//!
//! Putting timeout-tree leaves on-chain competes with ordinary traffic for
//! block space. With a fraction `x` of every block devoted to leaves, the
//! feerate paid is modelled as `base / (1 - x)^exponent`.

use serde::{Deserialize, Serialize};

/// Block size in vbytes
pub const BLOCKSIZE_VBYTES: f64 = 4_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeerateCurve {
    /// Feerate (sat/vB) when no block space goes to leaves
    pub base: f64,
    /// Growth exponent as leaves crowd out other transactions
    pub exponent: f64,
}

impl FeerateCurve {
    pub fn new(base: f64, exponent: f64) -> Self {
        Self { base, exponent }
    }

    /// Feerate with fraction `x` of each block used by leaves
    pub fn at(&self, x: f64) -> f64 {
        self.base / (1.0 - x).powf(self.exponent)
    }

    /// Derivative of the feerate with respect to `x`
    pub fn derivative(&self, x: f64) -> f64 {
        self.base * self.exponent / (1.0 - x).powf(self.exponent + 1.0)
    }
}
