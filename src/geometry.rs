//! Board geometry primitives.
//!
//! All coordinates are millimetres in the KiCad board frame: origin at the
//! top-left corner, +X to the right and +Y **down**. Angles follow the same
//! convention: 0° points along +X, 90° along +Y, and positive angles turn
//! clockwise on screen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::error::{BoardError, BoardResult};

/// Tolerance used when comparing computed coordinates.
pub const EPSILON: f64 = 1e-9;

/// A 2D point (mm).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns true if both coordinates are within `tolerance` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Physical pad size (mm) as emitted in the board frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Extent along X (mm).
    pub width: f64,
    /// Extent along Y (mm).
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Creates a square or circular size.
    #[must_use]
    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    /// Returns the size with its two dimensions exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Placement rotation. Only quarter turns are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// 0°.
    #[default]
    R0,
    /// 90° clockwise.
    R90,
    /// 180°.
    R180,
    /// 270° clockwise.
    R270,
}

impl Rotation {
    /// All supported rotations in ascending order.
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// Parses a rotation from whole degrees, normalising negative and
    /// multi-turn values (e.g. `-90` and `450` are accepted).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidGeometry`] if `degrees` is not a multiple of 90.
    pub fn from_degrees(degrees: i32) -> BoardResult<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::R0),
            90 => Ok(Self::R90),
            180 => Ok(Self::R180),
            270 => Ok(Self::R270),
            _ => Err(BoardError::invalid_geometry(format!(
                "rotation {degrees}° is not one of 0/90/180/270"
            ))),
        }
    }

    /// Angle in whole degrees (0, 90, 180 or 270).
    #[must_use]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// The rotation that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::R0 => Self::R0,
            Self::R90 => Self::R270,
            Self::R180 => Self::R180,
            Self::R270 => Self::R90,
        }
    }

    /// True for 90° and 270°, where X and Y extents trade places.
    #[must_use]
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Self::R90 | Self::R270)
    }

    /// Exact `(sin, cos)` for the rotation angle.
    ///
    /// Quarter turns are tabulated so that rotated coordinates carry no
    /// trigonometric rounding noise into the emitted file.
    const fn sin_cos(self) -> (f64, f64) {
        match self {
            Self::R0 => (0.0, 1.0),
            Self::R90 => (1.0, 0.0),
            Self::R180 => (0.0, -1.0),
            Self::R270 => (-1.0, 0.0),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Maps a footprint-local offset to board coordinates.
///
/// KiCad footprint rotation, board frame:
///
/// ```text
/// board_x = origin_x + local_x·cos θ + local_y·sin θ
/// board_y = origin_y − local_x·sin θ + local_y·cos θ
/// ```
///
/// # Examples
///
/// ```
/// use mixtee_pcb::geometry::{rotate_point, Point, Rotation};
///
/// let p = rotate_point(Point::new(25.0, 4.0), Point::new(-0.8, 0.0), Rotation::R90);
/// assert!(p.approx_eq(Point::new(25.0, 4.8), 1e-9));
/// ```
#[must_use]
pub fn rotate_point(origin: Point, local: Point, rotation: Rotation) -> Point {
    let (sin, cos) = rotation.sin_cos();
    Point::new(
        origin.x + local.x * cos + local.y * sin,
        origin.y - local.x * sin + local.y * cos,
    )
}

/// One piece of a board outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Straight edge.
    Line {
        /// Start point.
        start: Point,
        /// End point.
        end: Point,
    },
    /// Circular arc given by three points on the circle.
    Arc {
        /// Start point.
        start: Point,
        /// Point at the angular midpoint of the arc.
        mid: Point,
        /// End point.
        end: Point,
    },
}

impl Segment {
    /// Start point of the segment.
    #[must_use]
    pub const fn start(&self) -> Point {
        match self {
            Self::Line { start, .. } | Self::Arc { start, .. } => *start,
        }
    }

    /// End point of the segment.
    #[must_use]
    pub const fn end(&self) -> Point {
        match self {
            Self::Line { end, .. } | Self::Arc { end, .. } => *end,
        }
    }

    /// True for arc segments.
    #[must_use]
    pub const fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }
}

/// A quarter-circle corner: centre plus `(start, end)` angles in degrees.
struct Corner {
    centre: Point,
    start_deg: f64,
    end_deg: f64,
}

impl Corner {
    fn point_at(&self, radius: f64, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(self.centre.x + radius * cos, self.centre.y + radius * sin)
    }

    fn arc(&self, radius: f64) -> Segment {
        Segment::Arc {
            start: self.point_at(radius, self.start_deg),
            mid: self.point_at(radius, (self.start_deg + self.end_deg) / 2.0),
            end: self.point_at(radius, self.end_deg),
        }
    }
}

/// Builds a closed rounded-rectangle outline anchored at the origin.
///
/// The result is traversed clockwise (on screen) starting with the top edge:
/// top edge, top-right arc, right edge, bottom-right arc, bottom edge,
/// bottom-left arc, left edge, top-left arc. Each segment starts where the
/// previous one ends and the last one ends at the first one's start.
///
/// # Errors
///
/// Returns [`BoardError::InvalidGeometry`] if a dimension is not positive or
/// if `corner_radius` is not strictly between 0 and `min(width, height) / 2`.
pub fn rounded_rectangle_outline(
    width: f64,
    height: f64,
    corner_radius: f64,
) -> BoardResult<Vec<Segment>> {
    if !(width > 0.0 && height > 0.0) {
        return Err(BoardError::invalid_geometry(format!(
            "board dimensions must be positive, got {width} x {height}"
        )));
    }
    if !(corner_radius > 0.0 && corner_radius < width.min(height) / 2.0) {
        return Err(BoardError::invalid_geometry(format!(
            "corner radius {corner_radius} must be in (0, {}) for a {width} x {height} board",
            width.min(height) / 2.0
        )));
    }

    let (w, h, r) = (width, height, corner_radius);

    let top_left = Corner {
        centre: Point::new(r, r),
        start_deg: 180.0,
        end_deg: 270.0,
    };
    let top_right = Corner {
        centre: Point::new(w - r, r),
        start_deg: 270.0,
        end_deg: 360.0,
    };
    let bottom_right = Corner {
        centre: Point::new(w - r, h - r),
        start_deg: 0.0,
        end_deg: 90.0,
    };
    let bottom_left = Corner {
        centre: Point::new(r, h - r),
        start_deg: 90.0,
        end_deg: 180.0,
    };

    Ok(vec![
        Segment::Line {
            start: Point::new(r, 0.0),
            end: Point::new(w - r, 0.0),
        },
        top_right.arc(r),
        Segment::Line {
            start: Point::new(w, r),
            end: Point::new(w, h - r),
        },
        bottom_right.arc(r),
        Segment::Line {
            start: Point::new(w - r, h),
            end: Point::new(r, h),
        },
        bottom_left.arc(r),
        Segment::Line {
            start: Point::new(0.0, h - r),
            end: Point::new(0.0, r),
        },
        top_left.arc(r),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle_of(centre: Point, p: Point) -> f64 {
        (p.y - centre.y).atan2(p.x - centre.x).to_degrees()
    }

    #[test]
    fn rotation_from_degrees_normalises() {
        assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::R0);
        assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::R270);
        assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::R90);
        assert!(Rotation::from_degrees(45).is_err());
    }

    #[test]
    fn rotate_zero_is_translation() {
        let p = rotate_point(Point::new(10.0, 20.0), Point::new(1.5, -2.0), Rotation::R0);
        assert!(p.approx_eq(Point::new(11.5, 18.0), EPSILON));
    }

    #[test]
    fn rotate_quarter_turns_of_unit_x() {
        let origin = Point::default();
        let unit = Point::new(1.0, 0.0);
        assert!(rotate_point(origin, unit, Rotation::R90).approx_eq(Point::new(0.0, -1.0), EPSILON));
        assert!(rotate_point(origin, unit, Rotation::R180).approx_eq(Point::new(-1.0, 0.0), EPSILON));
        assert!(rotate_point(origin, unit, Rotation::R270).approx_eq(Point::new(0.0, 1.0), EPSILON));
    }

    #[test]
    fn rotate_quarter_turns_of_unit_y() {
        let origin = Point::default();
        let unit = Point::new(0.0, 1.0);
        assert!(rotate_point(origin, unit, Rotation::R90).approx_eq(Point::new(1.0, 0.0), EPSILON));
        assert!(rotate_point(origin, unit, Rotation::R270).approx_eq(Point::new(-1.0, 0.0), EPSILON));
    }

    #[test]
    fn rotate_then_inverse_round_trips() {
        let local = Point::new(3.25, -7.5);
        for rotation in Rotation::ALL {
            let once = rotate_point(Point::default(), local, rotation);
            let back = rotate_point(Point::default(), once, rotation.inverse());
            assert!(back.approx_eq(local, EPSILON), "{rotation}");
        }
    }

    #[test]
    fn outline_rejects_oversized_radius() {
        assert!(rounded_rectangle_outline(10.0, 4.0, 2.0).is_err());
        assert!(rounded_rectangle_outline(10.0, 4.0, 0.0).is_err());
        assert!(rounded_rectangle_outline(0.0, 4.0, 1.0).is_err());
        assert!(rounded_rectangle_outline(10.0, 4.0, 1.99).is_ok());
    }

    #[test]
    fn outline_arcs_have_expected_angles() {
        let segments = rounded_rectangle_outline(40.0, 30.0, 2.0).unwrap();
        let centres = [
            Point::new(38.0, 2.0),
            Point::new(38.0, 28.0),
            Point::new(2.0, 28.0),
            Point::new(2.0, 2.0),
        ];
        let arcs: Vec<_> = segments.iter().filter(|s| s.is_arc()).collect();
        assert_eq!(arcs.len(), 4);

        let mut total = 0.0;
        for (arc, centre) in arcs.iter().zip(centres) {
            let Segment::Arc { start, mid, end } = arc else {
                unreachable!()
            };
            assert!((start.distance_to(centre) - 2.0).abs() < 1e-9);
            assert!((mid.distance_to(centre) - 2.0).abs() < 1e-9);
            assert!((end.distance_to(centre) - 2.0).abs() < 1e-9);
            let sweep = (angle_of(centre, *end) - angle_of(centre, *start)).rem_euclid(360.0);
            assert!((sweep - 90.0).abs() < 1e-9);
            total += sweep;
        }
        assert!((total - 360.0).abs() < 1e-9);
    }
}
