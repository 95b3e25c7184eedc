//! Hex to pixel conversion for hosts that draw the board

use serde::{Deserialize, Serialize};

use crate::hex::Hex;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A point in screen space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which way the hexagons point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Pointy,
    Flat,
}

impl Orientation {
    /// Forward matrix (f0..f3), inverse matrix (b0..b3), first corner angle
    fn matrix(self) -> ([f64; 4], [f64; 4], f64) {
        match self {
            Orientation::Pointy => (
                [SQRT_3, SQRT_3 / 2.0, 0.0, 1.5],
                [SQRT_3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0],
                0.5,
            ),
            Orientation::Flat => (
                [1.5, 0.0, SQRT_3 / 2.0, SQRT_3],
                [2.0 / 3.0, 0.0, -1.0 / 3.0, SQRT_3 / 3.0],
                0.0,
            ),
        }
    }
}

/// Screen placement of the board
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub orientation: Orientation,
    /// Hex radius (center to corner) in pixels
    pub size: f64,
    /// Pixel position of the origin hex
    pub origin: Point,
}

impl Layout {
    pub fn new(orientation: Orientation, size: f64, origin: Point) -> Self {
        Self { orientation, size, origin }
    }

    /// Pixel center of a hex
    pub fn hex_to_pixel(&self, hex: Hex) -> Point {
        let (f, _, _) = self.orientation.matrix();
        let (q, r) = (hex.q as f64, hex.r as f64);
        Point::new(
            (f[0] * q + f[1] * r) * self.size + self.origin.x,
            (f[2] * q + f[3] * r) * self.size + self.origin.y,
        )
    }

    /// Hex under a pixel
    pub fn pixel_to_hex(&self, point: Point) -> Hex {
        let (_, b, _) = self.orientation.matrix();
        let px = (point.x - self.origin.x) / self.size;
        let py = (point.y - self.origin.y) / self.size;
        let q = b[0] * px + b[1] * py;
        let r = b[2] * px + b[3] * py;
        Hex::round(q, r, -q - r)
    }

    /// The six polygon vertices of a hex, for drawing
    pub fn polygon_corners(&self, hex: Hex) -> [Point; 6] {
        let (_, _, start_angle) = self.orientation.matrix();
        let center = self.hex_to_pixel(hex);
        std::array::from_fn(|i| {
            let angle = 2.0 * std::f64::consts::PI * (start_angle + i as f64) / 6.0;
            Point::new(
                center.x + self.size * angle.cos(),
                center.y + self.size * angle.sin(),
            )
        })
    }
}
