//! Switchcraft 112BPC 1/4" TS jack.
//!
//! Origin is the bushing centre. The barrel extends towards local -X, so a
//! 90° placement points it towards +Y (the bottom board edge).

use crate::footprints::{Archetype, FootprintTemplate, Label, PadTemplate, Side, SilkLine};
use crate::geometry::Rotation;

/// Tip pad name.
pub const TIP: &str = "T";
/// Sleeve pad name.
pub const SLEEVE: &str = "S";

const PAD_DIAMETER: f64 = 2.4;
const DRILL: f64 = 1.3;

/// Switchcraft 112BPC jack (two through-hole pads).
#[derive(Debug, Clone, Copy, Default)]
pub struct Switchcraft112Bpc;

impl Archetype for Switchcraft112Bpc {
    fn template(&self, _rotation: Rotation) -> FootprintTemplate {
        FootprintTemplate {
            footprint: "mixtee-footprints:Switchcraft_112BPC".to_string(),
            value: "112BPC".to_string(),
            side: Side::Front,
            reference_label: Label::new(0.0, -8.5, 1.0, 0.15),
            value_label: Label::new(0.0, 12.5, 1.0, 0.15),
            pads: vec![
                PadTemplate::through_hole(TIP, 17.78, 0.0, PAD_DIAMETER, DRILL),
                PadTemplate::through_hole(SLEEVE, 11.43, 7.62, PAD_DIAMETER, DRILL),
            ],
            silkscreen: SilkLine::rectangle(-4.0, -6.35, 22.0, 10.0),
            silk_width: 0.12,
        }
    }
}
