//! JST-PH vertical through-hole headers (B*B-PH-K-S).
//!
//! Pins on a 2 mm pitch along +X, pin 1 at the origin.

use crate::footprints::{Archetype, FootprintTemplate, Label, PadTemplate, Side, SilkLine};
use crate::geometry::Rotation;

const PITCH: f64 = 2.0;
const PAD_DIAMETER: f64 = 1.75;
const DRILL: f64 = 0.8;

/// A single-row JST-PH header with `pins` positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JstPh {
    pins: u32,
}

impl JstPh {
    /// Creates a header with `pins` positions (at least one).
    #[must_use]
    pub const fn new(pins: u32) -> Self {
        Self {
            pins: if pins == 0 { 1 } else { pins },
        }
    }

    /// Distance from pin 1 to the last pin (mm).
    #[must_use]
    pub fn span(&self) -> f64 {
        f64::from(self.pins - 1) * PITCH
    }
}

impl Archetype for JstPh {
    fn template(&self, _rotation: Rotation) -> FootprintTemplate {
        let n = self.pins;
        let span = self.span();
        let pads = (0..n)
            .map(|i| {
                PadTemplate::through_hole(
                    (i + 1).to_string(),
                    f64::from(i) * PITCH,
                    0.0,
                    PAD_DIAMETER,
                    DRILL,
                )
            })
            .collect();

        FootprintTemplate {
            footprint: format!("Connector_JST:JST_PH_B{n}B-PH-K_1x{n:02}_P2.00mm_Vertical"),
            value: format!("B{n}B-PH-K-S"),
            side: Side::Front,
            reference_label: Label::new(span / 2.0, -2.5, 1.0, 0.15),
            value_label: Label::new(span / 2.0, 3.0, 1.0, 0.15),
            pads,
            silkscreen: SilkLine::rectangle(-1.25, -1.6, span + 1.25, 4.4),
            silk_width: 0.12,
        }
    }
}
