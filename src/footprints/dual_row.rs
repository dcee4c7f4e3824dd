//! Dual-row gull-wing ICs (SOIC).
//!
//! Pin numbering is the usual dual-inline serpentine: pins `1..=N/2` run
//! down the left column top to bottom, pins `N/2+1..=N` run up the right
//! column bottom to top.
//!
//! ```text
//!    1 ▪      ▪ N
//!    2 ▪      ▪ N-1
//!      ⋮      ⋮
//!  N/2 ▪      ▪ N/2+1
//! ```
//!
//! Pad sizes are written in board axes, so at 90°/270° the length and width
//! are swapped to keep the narrow side along the pin pitch.

use crate::footprints::{
    Archetype, FootprintTemplate, Label, PadShape, PadTemplate, Side, SilkLine,
};
use crate::geometry::{Point, Rotation, Size};

/// A dual-row SOIC package.
#[derive(Debug, Clone, PartialEq)]
pub struct DualRowIc {
    footprint: String,
    value: String,
    pins: u32,
    pitch: f64,
    /// Centre-to-centre distance between the two pad columns (mm).
    row_spacing: f64,
    /// Pad extent perpendicular to the row.
    pad_length: f64,
    /// Pad extent along the row.
    pad_width: f64,
    body_half_width: f64,
}

impl DualRowIc {
    /// SOIC-28 wide body (7.5 x 17.9 mm, 1.27 mm pitch).
    #[must_use]
    pub fn soic28w(value: impl Into<String>) -> Self {
        Self {
            footprint: "Package_SO:SOIC-28W_7.5x17.9mm_P1.27mm".to_string(),
            value: value.into(),
            pins: 28,
            pitch: 1.27,
            row_spacing: 8.89,
            pad_length: 1.55,
            pad_width: 0.6,
            body_half_width: 3.75,
        }
    }

    /// Distance from the first to the last pin of one column (mm).
    fn column_span(&self) -> f64 {
        f64::from(self.pins / 2 - 1) * self.pitch
    }

    /// Local position of pin `pin` (1-based).
    ///
    /// Returns `None` for pins outside `1..=N`.
    #[must_use]
    pub fn pin_position(&self, pin: u32) -> Option<Point> {
        let per_side = self.pins / 2;
        if pin == 0 || pin > self.pins {
            return None;
        }
        let half_span = self.column_span() / 2.0;
        let half_rows = self.row_spacing / 2.0;
        let p = if pin <= per_side {
            Point::new(-half_rows, -half_span + f64::from(pin - 1) * self.pitch)
        } else {
            Point::new(half_rows, half_span - f64::from(pin - per_side - 1) * self.pitch)
        };
        Some(p)
    }

    /// Pad size in board axes for `rotation`.
    #[must_use]
    pub fn pad_size(&self, rotation: Rotation) -> Size {
        let size = Size::new(self.pad_length, self.pad_width);
        if rotation.is_quarter_turn() {
            size.swapped()
        } else {
            size
        }
    }
}

impl Archetype for DualRowIc {
    fn template(&self, rotation: Rotation) -> FootprintTemplate {
        let size = self.pad_size(rotation);
        let shape = PadShape::RoundRect { ratio: 0.25 };
        let pads = (1..=self.pins)
            .filter_map(|pin| {
                self.pin_position(pin)
                    .map(|p| PadTemplate::smd(pin.to_string(), p.x, p.y, size, shape))
            })
            .collect();

        let half_w = self.body_half_width;
        let half_h = self.column_span() / 2.0 + 0.5;

        FootprintTemplate {
            footprint: self.footprint.clone(),
            value: self.value.clone(),
            side: Side::Front,
            reference_label: Label::new(0.0, -half_h - 1.5, 1.0, 0.15),
            value_label: Label::new(0.0, half_h + 1.5, 1.0, 0.15),
            pads,
            silkscreen: SilkLine::rectangle(-half_w, -half_h, half_w, half_h),
            silk_width: 0.15,
        }
    }
}
