use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};
use thiserror::Error as ThisError;

///
/// Float64
///
/// Finite f64 only; -0.0 canonically stored as 0.0
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Display, Serialize)]
pub struct Float64(f64);

impl Float64 {
    /// Fallible constructor that rejects non-finite values and normalizes -0.0.
    #[must_use]
    pub fn try_new(v: f64) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }

        // canonicalize -0.0 to 0.0 so Eq/Hash/Ord are consistent
        Some(Self(if v == 0.0 { 0.0 } else { v }))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Whether this value carries no fractional part.
    #[must_use]
    pub fn is_integral(self) -> bool {
        self.0.fract() == 0.0
    }
}

///
/// NonFiniteFloatError
///

#[derive(Debug, ThisError)]
#[error("non-finite float64 value")]
pub struct NonFiniteFloatError;

impl TryFrom<f64> for Float64 {
    type Error = NonFiniteFloatError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::try_new(v).ok_or(NonFiniteFloatError)
    }
}

impl From<i32> for Float64 {
    fn from(n: i32) -> Self {
        Self(f64::from(n))
    }
}

impl Eq for Float64 {}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Finite-only invariant makes total_cmp and partial_cmp agree.
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl<'de> Deserialize<'de> for Float64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Self::try_new(v).ok_or_else(|| serde::de::Error::custom("non-finite float64"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite() {
        assert!(Float64::try_new(f64::NAN).is_none());
        assert!(Float64::try_new(f64::INFINITY).is_none());
        assert!(Float64::try_new(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn canonicalizes_negative_zero() {
        let neg = Float64::try_new(-0.0).unwrap();
        let pos = Float64::try_new(0.0).unwrap();

        assert_eq!(neg, pos);
        assert_eq!(neg.get().to_bits(), pos.get().to_bits());
    }

    #[test]
    fn orders_totally() {
        let a = Float64::try_new(-1.5).unwrap();
        let b = Float64::try_new(0.0).unwrap();
        let c = Float64::try_new(2.25).unwrap();

        assert!(a < b && b < c);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn integral_detection() {
        assert!(Float64::try_new(3.0).unwrap().is_integral());
        assert!(!Float64::try_new(3.5).unwrap().is_integral());
    }
}
