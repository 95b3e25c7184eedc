//! Hex geometry with cube coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Cube hex coordinates, `q + r + s == 0`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

/// Direction vectors in cube coordinates, counter-clockwise from east
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
pub const DIRECTIONS: [Hex; 6] = [
    Hex { q: 1, r: 0, s: -1 },  // E
    Hex { q: 1, r: -1, s: 0 },  // NE
    Hex { q: 0, r: -1, s: 1 },  // NW
    Hex { q: -1, r: 0, s: 1 },  // W
    Hex { q: -1, r: 1, s: 0 },  // SW
    Hex { q: 0, r: 1, s: -1 },  // SE
];

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0, s: 0 };

    pub fn new(q: i32, r: i32, s: i32) -> Self {
        debug_assert_eq!(q + r + s, 0, "cube coordinates must sum to zero");
        Self { q, r, s }
    }

    /// Whether `q + r + s == 0` holds (deserialized values are unchecked)
    pub fn is_valid(&self) -> bool {
        self.q as i64 + self.r as i64 + self.s as i64 == 0
    }

    /// Build from axial coordinates, deriving `s`
    pub const fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub fn scale(self, k: i32) -> Hex {
        Hex::new(self.q * k, self.r * k, self.s * k)
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(self, direction: usize) -> Hex {
        self + DIRECTIONS[direction % 6]
    }

    /// All six neighbors in direction order
    pub fn neighbors(self) -> [Hex; 6] {
        DIRECTIONS.map(|d| self + d)
    }

    /// Distance between two hexes
    pub fn distance(self, other: Hex) -> i32 {
        let d = self - other;
        (d.q.abs() + d.r.abs() + d.s.abs()) / 2
    }

    /// Hexes at exactly `radius` from `center`, walked counter-clockwise
    /// starting from the south-west corner.
    pub fn ring(center: Hex, radius: u32) -> Vec<Hex> {
        if radius == 0 {
            return vec![center];
        }
        let radius = radius as i32;
        let mut results = Vec::with_capacity(6 * radius as usize);
        let mut hex = center + DIRECTIONS[4].scale(radius);
        for side in 0..6 {
            for _ in 0..radius {
                results.push(hex);
                hex = hex.neighbor(side);
            }
        }
        results
    }

    /// Rings `r0..r1` around `center`, innermost first
    pub fn disk(center: Hex, r0: u32, r1: u32) -> Vec<Hex> {
        (r0..r1).flat_map(|radius| Hex::ring(center, radius)).collect()
    }

    /// Hexes on the straight line from `a` to `b`, both ends included.
    ///
    /// Samples the cube-space segment `distance + 1` times and rounds each
    /// sample with [`Hex::round`].
    pub fn line(a: Hex, b: Hex) -> Vec<Hex> {
        let n = a.distance(b);
        if n == 0 {
            return vec![a];
        }
        (0..=n)
            .map(|i| {
                let t = i as f64 / n as f64;
                Hex::round(
                    lerp(a.q, b.q, t),
                    lerp(a.r, b.r, t),
                    lerp(a.s, b.s, t),
                )
            })
            .collect()
    }

    /// Round fractional cube coordinates to the nearest hex.
    ///
    /// The component with the largest rounding error is rebuilt from the other
    /// two; ties prefer q, then r, then s. Halves round toward +inf.
    pub fn round(fq: f64, fr: f64, fs: f64) -> Hex {
        let mut q = (fq + 0.5).floor();
        let mut r = (fr + 0.5).floor();
        let mut s = (fs + 0.5).floor();

        let dq = (q - fq).abs();
        let dr = (r - fr).abs();
        let ds = (s - fs).abs();

        if dq >= dr && dq >= ds {
            q = -r - s;
        } else if dr >= ds {
            r = -q - s;
        } else {
            s = -q - r;
        }

        Hex::new(q as i32, r as i32, s as i32)
    }
}

fn lerp(a: i32, b: i32, t: f64) -> f64 {
    a as f64 + (b - a) as f64 * t
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r, self.s + other.s)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex::new(self.q - other.q, self.r - other.r, self.s - other.s)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}
