//! Two-terminal surface-mount parts.
//!
//! Covers the diode packages (SOD-323, SOD-123) and the 0603 chip capacitor.
//! Pad 1 sits at -X, pad 2 at +X. For diodes pad 1 is the cathode.
//!
//! These pads carry the footprint rotation in their own `at` record, so
//! their sizes stay in the package frame at every rotation.

use crate::footprints::{
    Archetype, FootprintTemplate, Label, PadShape, PadTemplate, Side, SilkLine,
};
use crate::geometry::{Rotation, Size};

/// Cathode pad of a diode package.
pub const CATHODE: &str = "1";
/// Anode pad of a diode package.
pub const ANODE: &str = "2";

const ROUNDRECT_RATIO: f64 = 0.25;

/// Package variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipPackage {
    /// SOD-323 diode.
    Sod323,
    /// SOD-123 diode.
    Sod123,
    /// 0603 (1608 metric) capacitor.
    C0603,
}

impl ChipPackage {
    /// Library identifier.
    #[must_use]
    pub const fn footprint(self) -> &'static str {
        match self {
            Self::Sod323 => "Diode_SMD:D_SOD-323",
            Self::Sod123 => "Diode_SMD:D_SOD-123",
            Self::C0603 => "Capacitor_SMD:C_0603_1608Metric",
        }
    }

    /// Pad centre distance from origin along X (mm).
    const fn pad_offset(self) -> f64 {
        match self {
            Self::Sod323 | Self::Sod123 => 1.1,
            Self::C0603 => 0.8,
        }
    }

    const fn pad_size(self) -> Size {
        match self {
            Self::Sod323 => Size::new(1.0, 0.6),
            Self::Sod123 => Size::new(1.0, 0.7),
            Self::C0603 => Size::new(0.9, 1.0),
        }
    }

    /// Diodes get a three-sided body outline with the open end at the anode.
    fn silkscreen(self) -> Vec<SilkLine> {
        match self {
            Self::Sod323 | Self::Sod123 => vec![
                SilkLine::new(-1.8, -0.6, 1.8, -0.6),
                SilkLine::new(-1.8, 0.6, 1.8, 0.6),
                SilkLine::new(-1.8, -0.6, -1.8, 0.6),
            ],
            Self::C0603 => Vec::new(),
        }
    }
}

/// Reference/value text placement for small parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    /// Distance of both labels from the body centre line (mm).
    pub offset: f64,
    /// Font size (mm).
    pub font_size: f64,
    /// Stroke thickness (mm).
    pub thickness: f64,
}

impl LabelStyle {
    /// Creates a label style.
    #[must_use]
    pub const fn new(offset: f64, font_size: f64, thickness: f64) -> Self {
        Self {
            offset,
            font_size,
            thickness,
        }
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::new(1.5, 0.8, 0.12)
    }
}

/// A two-terminal SMD part.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoTerminal {
    package: ChipPackage,
    value: String,
    side: Side,
    labels: LabelStyle,
}

impl TwoTerminal {
    /// Creates a part on the front side with default labels.
    #[must_use]
    pub fn new(package: ChipPackage, value: impl Into<String>) -> Self {
        Self {
            package,
            value: value.into(),
            side: Side::Front,
            labels: LabelStyle::default(),
        }
    }

    /// SOD-323 diode.
    #[must_use]
    pub fn sod323(value: impl Into<String>) -> Self {
        Self::new(ChipPackage::Sod323, value)
    }

    /// SOD-123 diode.
    #[must_use]
    pub fn sod123(value: impl Into<String>) -> Self {
        Self::new(ChipPackage::Sod123, value)
    }

    /// 0603 capacitor.
    #[must_use]
    pub fn c0603(value: impl Into<String>) -> Self {
        Self::new(ChipPackage::C0603, value)
    }

    /// Mounts the part on `side`.
    #[must_use]
    pub const fn on_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Overrides the label style.
    #[must_use]
    pub const fn with_labels(mut self, labels: LabelStyle) -> Self {
        self.labels = labels;
        self
    }
}

impl Archetype for TwoTerminal {
    fn template(&self, _rotation: Rotation) -> FootprintTemplate {
        let pkg = self.package;
        let dx = pkg.pad_offset();
        let shape = PadShape::RoundRect {
            ratio: ROUNDRECT_RATIO,
        };
        let LabelStyle {
            offset,
            font_size,
            thickness,
        } = self.labels;

        FootprintTemplate {
            footprint: pkg.footprint().to_string(),
            value: self.value.clone(),
            side: self.side,
            reference_label: Label::new(0.0, -offset, font_size, thickness),
            value_label: Label::new(0.0, offset, font_size, thickness),
            pads: vec![
                PadTemplate::smd("1", -dx, 0.0, pkg.pad_size(), shape).rotated_with_footprint(),
                PadTemplate::smd("2", dx, 0.0, pkg.pad_size(), shape).rotated_with_footprint(),
            ],
            silkscreen: pkg.silkscreen(),
            silk_width: 0.12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_sizes_do_not_swap() {
        let cap = TwoTerminal::c0603("100nF");
        let flat = cap.template(Rotation::R0);
        let turned = cap.template(Rotation::R90);
        assert_eq!(flat.pads[0].size, turned.pads[0].size);
        assert!(turned.pads.iter().all(|p| p.follows_rotation));
    }

    #[test]
    fn diode_has_outline_and_capacitor_does_not() {
        assert_eq!(TwoTerminal::sod123("1N4148").template(Rotation::R0).silkscreen.len(), 3);
        assert!(TwoTerminal::c0603("100nF").template(Rotation::R0).silkscreen.is_empty());
    }

    #[test]
    fn back_side_part_keeps_side() {
        let cap = TwoTerminal::c0603("100nF").on_side(Side::Back);
        assert_eq!(cap.template(Rotation::R0).side, Side::Back);
    }
}
