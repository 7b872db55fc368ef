//! Plain geometry types shared by the parser, layout and hit testing.
//!
//! Coordinates follow the layout convention: origin at the top-left of the
//! render box, x grows to the right and y grows downwards.

use serde::{Deserialize, Serialize};

/// Represents a 2D point in layout-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a point at the origin.
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn shift_along(&mut self, axis: Axis, delta: f32) {
        match axis {
            Axis::X => self.x += delta,
            Axis::Y => self.y += delta,
        }
    }
}

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Extent along the given axis (width for X, height for Y).
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Axis-aligned rectangle in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self {
            origin: Point::zero(),
            size,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn mid_x(&self) -> f32 {
        self.origin.x + self.size.width * 0.5
    }

    pub fn mid_y(&self) -> f32 {
        self.origin.y + self.size.height * 0.5
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Start coordinate along `axis`.
    pub fn start(&self, axis: Axis) -> f32 {
        self.origin.along(axis)
    }

    /// End coordinate along `axis`.
    pub fn end(&self, axis: Axis) -> f32 {
        self.start(axis) + self.extent(axis)
    }

    /// Length along `axis`.
    pub fn extent(&self, axis: Axis) -> f32 {
        self.size.along(axis)
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Copy of this rectangle moved by `(dx, dy)`.
    pub fn shift(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.origin.x + dx, self.origin.y + dy, self.size.width, self.size.height)
    }

    /// Copy of this rectangle moved by `delta` along `axis`.
    pub fn shift_along(&self, axis: Axis, delta: f32) -> Self {
        match axis {
            Axis::X => self.shift(delta, 0.0),
            Axis::Y => self.shift(0.0, delta),
        }
    }

    /// Half-open containment test for a point.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Returns `true` if `other` lies fully inside this rectangle.
    ///
    /// A small tolerance absorbs the rounding of accumulated advances.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPSILON: f32 = 1e-3;
        other.min_x() >= self.min_x() - EPSILON
            && other.min_y() >= self.min_y() - EPSILON
            && other.max_x() <= self.max_x() + EPSILON
            && other.max_y() <= self.max_y() + EPSILON
    }
}

/// One of the two layout axes.
///
/// Horizontal text advances along X and stacks lines along Y; vertical text
/// advances along Y and stacks lines along X.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// 2x3 affine transform, `[a b c d tx ty]` in the usual column convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Prepend a scale: input points are scaled before this transform applies.
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self {
            a: self.a * sx,
            b: self.b * sx,
            c: self.c * sy,
            d: self.d * sy,
            tx: self.tx,
            ty: self.ty,
        }
    }

    /// Prepend a rotation by `angle` radians: input points are rotated first.
    pub fn rotated(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: cos * self.a + sin * self.c,
            b: cos * self.b + sin * self.d,
            c: -sin * self.a + cos * self.c,
            d: -sin * self.b + cos * self.d,
            tx: self.tx,
            ty: self.ty,
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }
}
