use std::ops::{Add, AddAssign, Index, Mul, Neg, Sub};

use crate::foundation::error::{PibError, PibResult};

/// Two component value used for every position and size in the layout registry.
///
/// Arithmetic accepts anything convertible into a vector: another vector, an `(x, y)` pair, a
/// two element array, or a scalar which is broadcast to both components. Values are copied on
/// every operation, so a position read from a layout can be adjusted freely without touching the
/// layout itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

/// Shorthand constructor for integer layout constants.
pub const fn v2(x: i32, y: i32) -> Vector2 {
    Vector2 {
        x: x as f64,
        y: y as f64,
    }
}

impl Vector2 {
    /// Number of components.
    pub const LEN: usize = 2;

    /// Build a vector from two components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Always [`Vector2::LEN`].
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        Self::LEN
    }

    /// Checked component access (`0` is x, `1` is y).
    pub fn get(&self, index: usize) -> PibResult<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(PibError::IndexOutOfRange {
                index,
                len: Self::LEN,
            }),
        }
    }

    /// Copy of `self` with one component replaced.
    pub fn with(self, index: usize, value: f64) -> PibResult<Self> {
        match index {
            0 => Ok(Self { x: value, ..self }),
            1 => Ok(Self { y: value, ..self }),
            _ => Err(PibError::IndexOutOfRange {
                index,
                len: Self::LEN,
            }),
        }
    }

    /// Integer view truncated toward zero, used for pixel addressing.
    pub fn i(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    /// Component-wise floor division by an integer, matching how layout offsets are derived.
    pub fn div_floor(self, rhs: i32) -> Self {
        let d = f64::from(rhs);
        Self {
            x: (self.x / d).floor(),
            y: (self.y / d).floor(),
        }
    }
}

impl From<(i32, i32)> for Vector2 {
    fn from((x, y): (i32, i32)) -> Self {
        v2(x, y)
    }
}

impl From<(u32, u32)> for Vector2 {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[i32; 2]> for Vector2 {
    fn from([x, y]: [i32; 2]) -> Self {
        v2(x, y)
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<i32> for Vector2 {
    fn from(v: i32) -> Self {
        v2(v, v)
    }
}

impl From<f64> for Vector2 {
    fn from(v: f64) -> Self {
        Self::new(v, v)
    }
}

impl<T: Into<Vector2>> Add<T> for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: T) -> Vector2 {
        let rhs = rhs.into();
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Into<Vector2>> AddAssign<T> for Vector2 {
    fn add_assign(&mut self, rhs: T) {
        *self = *self + rhs;
    }
}

impl<T: Into<Vector2>> Sub<T> for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: T) -> Vector2 {
        let rhs = rhs.into();
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Into<Vector2>> Mul<T> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: T) -> Vector2 {
        let rhs = rhs.into();
        Vector2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// Panics on any index other than `0` or `1`; use [`Vector2::get`] for a checked read.
impl Index<usize> for Vector2 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2 index {index} out of range for length 2"),
        }
    }
}

pub(crate) fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
