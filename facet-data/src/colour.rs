//! RGBA colour tags attached to CSG partitions.

use std::fmt;
use tracing::warn;

/// A linear RGBA colour with every component in the 0-1 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Colour used for geometry that appears before any colour directive.
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);

    /// Create a colour, clamping each component into 0-1.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a].map(|c| c.clamp(0.0, 1.0)))
    }

    /// Build a colour from the values of a `color([...])` directive.
    ///
    /// Accepts three components (alpha defaults to 1.0) or four. Returns
    /// `None` for any other arity.
    pub fn from_components(values: &[f32]) -> Option<Self> {
        let (r, g, b, a) = match *values {
            [r, g, b] => (r, g, b, 1.0),
            [r, g, b, a] => (r, g, b, a),
            _ => return None,
        };
        if [r, g, b, a].iter().any(|c| !(0.0..=1.0).contains(c)) {
            warn!("Colour {:?} outside 0-1, clamping", values);
        }
        Some(Self::new(r, g, b, a))
    }

    /// Components as an array, in glTF `baseColorFactor` order.
    pub fn to_array(self) -> [f32; 4] {
        self.0
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "[{}, {}, {}, {}]", r, g, b, a)
    }
}
