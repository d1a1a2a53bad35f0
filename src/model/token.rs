//! OCR token and geometry types.

use serde::{Deserialize, Serialize};

/// A point in image coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A four-point polygon around a token.
///
/// Points are ordered top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Corner points
    pub points: [Point; 4],
}

impl BoundingBox {
    /// Create a bounding box from explicit corner points.
    pub fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Build the polygon of an axis-aligned rectangle.
    pub fn from_rect(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            points: [
                Point::new(x_min, y_min),
                Point::new(x_max, y_min),
                Point::new(x_max, y_max),
                Point::new(x_min, y_max),
            ],
        }
    }

    /// Mean of the four y coordinates.
    pub fn y_center(&self) -> f64 {
        self.points.iter().map(|p| p.y).sum::<f64>() / self.points.len() as f64
    }

    /// Leftmost x coordinate.
    pub fn x_left(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.x)
            .fold(f64::INFINITY, f64::min)
    }

    /// Rightmost x coordinate.
    pub fn x_right(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// A single OCR-recognized text fragment that survived normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Cleaned text
    pub text: String,
    /// Polygon around the text
    pub bbox: BoundingBox,
    /// Recognition confidence in [0, 1]
    pub confidence: f64,
}

impl Token {
    /// Create a new token.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, confidence: f64) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence,
        }
    }

    /// Vertical center of the token.
    pub fn y_center(&self) -> f64 {
        self.bbox.y_center()
    }
}
