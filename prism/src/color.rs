use std::ops::{Add, Mul, Sub};

use crate::equal;

/// Colors are unbounded; channels only get clamped when written out.
#[derive(Debug, Default, Clone, Copy)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    pub fn white() -> Self {
        Self::new(1., 1., 1.)
    }

    /// Alias for Color::default().
    pub fn black() -> Self {
        Self::default()
    }

    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let scale = |channel: u8| channel as f64 / 255.;
        Self::new(scale(red), scale(green), scale(blue))
    }

    /// Scales each channel to 0-255, clamping anything out of range.
    pub fn to_rgb(&self) -> [u8; 3] {
        let scale = |channel: f64| (channel * 255.).round().clamp(0., 255.) as u8;
        [scale(self.red), scale(self.green), scale(self.blue)]
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        equal(self.red, other.red) && equal(self.green, other.green) && equal(self.blue, other.blue)
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.red + other.red,
            self.green + other.green,
            self.blue + other.blue,
        )
    }
}

impl Sub for Color {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.red - other.red,
            self.green - other.green,
            self.blue - other.blue,
        )
    }
}

impl Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.red * rhs, self.green * rhs, self.blue * rhs)
    }
}

/// Hadamard (channel-wise) product.
impl Mul<Self> for Color {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(
            self.red * other.red,
            self.green * other.green,
            self.blue * other.blue,
        )
    }
}
