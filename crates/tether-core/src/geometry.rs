//! Geometric primitives for the layout simulation.
//!
//! This module provides the small amount of vector math the force simulation
//! and the renderer need.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate, also used as a displacement or force vector
//! - [`Bounds`] - An axis-aligned bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Layout coordinates follow the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! During a simulation coordinates are unconstrained. After normalization every
//! coordinate lies in the unit square `[0, 1] × [0, 1]`.

use serde::{Deserialize, Serialize};

/// A 2D point in layout coordinate space.
///
/// Points use `f64` coordinates. The same type doubles as a displacement and
/// a force vector inside the simulation.
///
/// # Examples
///
/// ```
/// # use tether_core::geometry::Point;
/// let a = Point::new(3.0, 4.0);
/// let b = Point::new(1.0, 1.0);
///
/// let delta = a.sub_point(b);
/// assert_eq!(delta.x(), 2.0);
/// assert_eq!(delta.y(), 3.0);
///
/// assert_eq!(a.hypot(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Checks that neither coordinate is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the Euclidean length of the vector from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Calculates the Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tether_core::geometry::Point;
    /// let force = Point::new(0.2, -0.4);
    ///
    /// let damped = force.scale(0.5);
    /// assert_eq!(damped.x(), 0.1);
    /// assert_eq!(damped.y(), -0.2);
    /// ```
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the vector rescaled so its length does not exceed `max_length`.
    ///
    /// Vectors already within the limit are returned unchanged. A vector longer
    /// than the limit keeps its direction and gets a length of exactly
    /// `max_length`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tether_core::geometry::Point;
    /// let step = Point::new(3.0, 4.0).clamp_length(1.0);
    /// assert!((step.hypot() - 1.0).abs() < 1e-12);
    ///
    /// let small = Point::new(0.1, 0.0).clamp_length(1.0);
    /// assert_eq!(small, Point::new(0.1, 0.0));
    /// ```
    pub fn clamp_length(self, max_length: f64) -> Self {
        let length = self.hypot();
        if length > max_length {
            self.scale(max_length / length)
        } else {
            self
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a zero-sized bounds located at `point`
    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Computes the smallest bounds containing every point.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tether_core::geometry::{Bounds, Point};
    /// let points = [Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, 4.0)];
    /// let bounds = Bounds::from_points(points).unwrap();
    ///
    /// assert_eq!(bounds.min_x(), -2.0);
    /// assert_eq!(bounds.max_x(), 4.0);
    /// assert_eq!(bounds.height(), 2.0);
    ///
    /// assert!(Bounds::from_points(std::iter::empty()).is_none());
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, |acc, point| acc.include(point)))
    }

    /// Returns the bounds grown to contain `point`
    pub fn include(self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }
}
