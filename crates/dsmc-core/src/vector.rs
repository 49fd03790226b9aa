//! Minimal 3-vector and symmetric-tensor math.
//!
//! `Vec3` uses `f64` throughout: parcel velocities span several orders of
//! magnitude and the collision energy balance is checked to ~1e-9 relative,
//! which single precision cannot hold over long runs.
//!
//! Only the operations the engine actually needs are implemented; this is
//! deliberately not a general linear-algebra layer.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// ── Vec3 ─────────────────────────────────────────────────────────────────────

/// A Cartesian 3-vector (position, velocity, heat flux, …).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Squared magnitude — cheaper than `magnitude` when only comparing.
    #[inline]
    pub fn mag_sqr(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.mag_sqr().sqrt()
    }

    /// Unit vector in the direction of `self`; `ZERO` stays `ZERO`.
    pub fn normalized(self) -> Vec3 {
        let m = self.magnitude();
        if m > 0.0 { self * (1.0 / m) } else { Vec3::ZERO }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6e}, {:.6e}, {:.6e})", self.x, self.y, self.z)
    }
}

// ── SymmTensor3 ──────────────────────────────────────────────────────────────

/// A symmetric rank-2 tensor (six independent components), used for the
/// stress tensor in the Chapman–Enskog distribution.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymmTensor3 {
    pub xx: f64,
    pub xy: f64,
    pub xz: f64,
    pub yy: f64,
    pub yz: f64,
    pub zz: f64,
}

impl SymmTensor3 {
    pub const ZERO: SymmTensor3 =
        SymmTensor3 { xx: 0.0, xy: 0.0, xz: 0.0, yy: 0.0, yz: 0.0, zz: 0.0 };

    #[inline]
    pub fn trace(self) -> f64 {
        self.xx + self.yy + self.zz
    }

    /// Double contraction `v · T · v` — the quadratic form used by the
    /// Chapman–Enskog perturbation.
    #[inline]
    pub fn quadratic_form(self, v: Vec3) -> f64 {
        self.xx * v.x * v.x
            + self.yy * v.y * v.y
            + self.zz * v.z * v.z
            + 2.0 * (self.xy * v.x * v.y + self.xz * v.x * v.z + self.yz * v.y * v.z)
    }

    /// Frobenius norm, counting off-diagonal terms twice.
    pub fn norm(self) -> f64 {
        (self.xx * self.xx
            + self.yy * self.yy
            + self.zz * self.zz
            + 2.0 * (self.xy * self.xy + self.xz * self.xz + self.yz * self.yz))
            .sqrt()
    }
}

impl Mul<f64> for SymmTensor3 {
    type Output = SymmTensor3;
    fn mul(self, s: f64) -> SymmTensor3 {
        SymmTensor3 {
            xx: self.xx * s,
            xy: self.xy * s,
            xz: self.xz * s,
            yy: self.yy * s,
            yz: self.yz * s,
            zz: self.zz * s,
        }
    }
}
