//! Kailh Choc V1 hotswap socket (CPG135001S30).

use crate::footprints::{Archetype, FootprintTemplate, Label, PadShape, PadTemplate, Side};
use crate::geometry::{Rotation, Size};

/// Column-side contact.
pub const PAD_1: &str = "1";
/// Diode-side contact.
pub const PAD_2: &str = "2";

/// Choc V1 hotswap socket, origin at the switch centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChocHotswap {
    mounting_holes: bool,
}

impl ChocHotswap {
    /// Socket without the NPTH mounting holes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mounting_holes: false,
        }
    }

    /// Socket with the centre post and the two side peg holes.
    #[must_use]
    pub const fn with_mounting_holes() -> Self {
        Self {
            mounting_holes: true,
        }
    }
}

impl Archetype for ChocHotswap {
    fn template(&self, _rotation: Rotation) -> FootprintTemplate {
        let size = Size::new(2.55, 2.5);
        let shape = PadShape::RoundRect { ratio: 0.15 };
        let mut pads = vec![
            PadTemplate::smd(PAD_1, 0.0, -5.9, size, shape),
            PadTemplate::smd(PAD_2, 5.0, -3.8, size, shape),
        ];
        if self.mounting_holes {
            pads.push(PadTemplate::mounting_hole(0.0, 0.0, 3.2));
            pads.push(PadTemplate::mounting_hole(-5.22, 0.0, 1.7));
            pads.push(PadTemplate::mounting_hole(5.22, 0.0, 1.7));
        }

        FootprintTemplate {
            footprint: "mixtee-footprints:Kailh_Choc_V1_Hotswap".to_string(),
            value: "CPG135001S30".to_string(),
            side: Side::Front,
            reference_label: Label::new(0.0, -8.5, 0.8, 0.12),
            value_label: Label::new(0.0, 3.0, 0.8, 0.12),
            pads,
            silkscreen: Vec::new(),
            silk_width: 0.12,
        }
    }
}
