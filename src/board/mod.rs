//! Board assembly.
//!
//! [`assemble`] combines the outline, the component placements, copper fill
//! zones and free text into a [`BoardDocument`]. Assembly only validates
//! references (nets, designators, zone geometry); it performs no clearance
//! or collision checks.

pub mod error;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::footprints::ComponentPlacement;
use crate::geometry::{rounded_rectangle_outline, Point, Segment, EPSILON};
use crate::nets::{NetCode, NetRegistry, UNCONNECTED};

pub use error::{BoardError, BoardResult};

/// Physical board parameters (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardSpec {
    /// Board width along X.
    pub width: f64,
    /// Board height along Y.
    pub height: f64,
    /// Outline corner radius.
    pub corner_radius: f64,
    /// Minimum copper-to-edge distance the layout was drawn for.
    pub edge_clearance: f64,
}

impl BoardSpec {
    /// Creates a board spec.
    #[must_use]
    pub const fn new(width: f64, height: f64, corner_radius: f64, edge_clearance: f64) -> Self {
        Self {
            width,
            height,
            corner_radius,
            edge_clearance,
        }
    }

    /// Outline segments for this board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidGeometry`] if the corner radius does not
    /// fit the board.
    pub fn outline(&self) -> BoardResult<Vec<Segment>> {
        rounded_rectangle_outline(self.width, self.height, self.corner_radius)
    }

    /// The full board rectangle, clockwise from the origin.
    #[must_use]
    pub fn rectangle(&self) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
    }

    /// True if `p` lies inside or on the board rectangle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        (-EPSILON..=self.width + EPSILON).contains(&p.x)
            && (-EPSILON..=self.height + EPSILON).contains(&p.y)
    }
}

/// Zone fill parameters (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneFill {
    /// Hatch edge pitch of the zone border.
    pub hatch_edge: f64,
    /// Clearance to pads of other nets.
    pub pad_clearance: f64,
    /// Minimum copper width.
    pub min_thickness: f64,
    /// Thermal relief gap.
    pub thermal_gap: f64,
    /// Thermal relief spoke width.
    pub thermal_bridge_width: f64,
}

impl Default for ZoneFill {
    fn default() -> Self {
        Self {
            hatch_edge: 0.5,
            pad_clearance: 0.2,
            min_thickness: 0.25,
            thermal_gap: 0.5,
            thermal_bridge_width: 0.5,
        }
    }
}

/// A filled copper region tied to one net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopperZone {
    /// Net the zone belongs to.
    pub net: NetCode,
    /// Copper layer name.
    pub layer: String,
    /// Polygon vertices in board coordinates.
    pub polygon: Vec<Point>,
    /// Fill settings.
    pub fill: ZoneFill,
}

impl CopperZone {
    /// A zone covering the whole board rectangle.
    #[must_use]
    pub fn board_fill(spec: &BoardSpec, net: NetCode, layer: impl Into<String>) -> Self {
        Self::with_polygon(net, layer, spec.rectangle())
    }

    /// A zone with a caller-supplied polygon.
    #[must_use]
    pub fn with_polygon(net: NetCode, layer: impl Into<String>, polygon: Vec<Point>) -> Self {
        Self {
            net,
            layer: layer.into(),
            polygon,
            fill: ZoneFill::default(),
        }
    }
}

/// Free silkscreen text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    /// Text content.
    pub text: String,
    /// Anchor in board coordinates.
    pub at: Point,
    /// Layer name.
    pub layer: String,
    /// Font height and width (mm).
    pub font_size: f64,
    /// Stroke thickness (mm).
    pub thickness: f64,
}

impl TextAnnotation {
    /// Front silkscreen text with 0.15 mm strokes.
    #[must_use]
    pub fn silkscreen(text: impl Into<String>, at: Point, font_size: f64) -> Self {
        Self {
            text: text.into(),
            at,
            layer: "F.SilkS".to_string(),
            font_size,
            thickness: 0.15,
        }
    }
}

/// A fully assembled board, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardDocument {
    /// Board parameters.
    pub spec: BoardSpec,
    /// Outline, clockwise from the top edge.
    pub outline: Vec<Segment>,
    /// Net table.
    pub nets: NetRegistry,
    /// Components in emission order.
    pub placements: Vec<ComponentPlacement>,
    /// Copper fills.
    pub zones: Vec<CopperZone>,
    /// Free text.
    pub texts: Vec<TextAnnotation>,
}

impl BoardDocument {
    /// Total number of pads across all placements.
    #[must_use]
    pub fn pad_count(&self) -> usize {
        self.placements.iter().map(|p| p.pads.len()).sum()
    }

    /// Groups pads by net.
    #[must_use]
    pub fn connectivity(&self) -> ConnectivityReport {
        let mut pads_per_net: BTreeMap<NetCode, Vec<String>> = self
            .nets
            .iter()
            .filter(|(code, _)| *code != UNCONNECTED)
            .map(|(code, _)| (code, Vec::new()))
            .collect();
        let mut unconnected = 0;

        for placement in &self.placements {
            for pad in placement.pads.iter().filter(|p| p.kind.is_electrical()) {
                if pad.net == UNCONNECTED {
                    unconnected += 1;
                    continue;
                }
                pads_per_net
                    .entry(pad.net)
                    .or_default()
                    .push(format!("{}.{}", placement.reference, pad.name));
            }
        }

        let nets = pads_per_net
            .into_iter()
            .map(|(code, pads)| NetUsage {
                code,
                name: self.nets.resolve(code).unwrap_or_default().to_string(),
                pads,
            })
            .collect();

        ConnectivityReport { nets, unconnected }
    }
}

/// Pads attached to one named net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetUsage {
    /// Net code.
    pub code: NetCode,
    /// Net name.
    pub name: String,
    /// `REF.PAD` for every pad on the net, in placement order.
    pub pads: Vec<String>,
}

/// Pad-per-net statistics for an assembled board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// One entry per named net, ascending by code.
    pub nets: Vec<NetUsage>,
    /// Electrical pads left on the unconnected net.
    pub unconnected: usize,
}

impl ConnectivityReport {
    /// Named nets with fewer than two pads.
    pub fn dangling(&self) -> impl Iterator<Item = &NetUsage> {
        self.nets.iter().filter(|n| n.pads.len() < 2)
    }

    /// Logs a warning for every dangling net.
    pub fn log_findings(&self) {
        for net in self.dangling() {
            tracing::warn!(
                code = net.code,
                net = %net.name,
                pads = net.pads.len(),
                "Net has fewer than two pads"
            );
        }
    }
}

/// Assembles a board.
///
/// # Errors
///
/// - [`BoardError::InvalidGeometry`] if the corner radius does not fit, or a
///   zone polygon has fewer than three vertices or leaves the board
/// - [`BoardError::DuplicateReference`] if two placements share a designator
/// - [`BoardError::UnknownNet`] if a pad or zone uses an unregistered net
/// - [`BoardError::NetNameMismatch`] if a pad was placed against a net table
///   that names its code differently
pub fn assemble(
    spec: BoardSpec,
    nets: NetRegistry,
    placements: Vec<ComponentPlacement>,
    zones: Vec<CopperZone>,
    texts: Vec<TextAnnotation>,
) -> BoardResult<BoardDocument> {
    let outline = spec.outline()?;

    let mut seen = HashSet::new();
    for placement in &placements {
        if !seen.insert(placement.reference.as_str()) {
            return Err(BoardError::duplicate_reference(&placement.reference));
        }
        for pad in &placement.pads {
            let context = || format!("{} pad {}", placement.reference, pad.name);
            let expected = nets
                .resolve(pad.net)
                .map_err(|e| e.referenced_by(context()))?;
            if expected != pad.net_name {
                return Err(BoardError::NetNameMismatch {
                    code: pad.net,
                    expected: expected.to_string(),
                    found: pad.net_name.clone(),
                    context: context(),
                });
            }
        }
    }

    for zone in &zones {
        if !nets.contains(zone.net) {
            return Err(BoardError::unknown_net(zone.net)
                .referenced_by(format!("zone on {}", zone.layer)));
        }
        if zone.polygon.len() < 3 {
            return Err(BoardError::invalid_geometry(format!(
                "zone on {} has {} vertices, need at least 3",
                zone.layer,
                zone.polygon.len()
            )));
        }
        if let Some(p) = zone.polygon.iter().find(|p| !spec.contains(**p)) {
            return Err(BoardError::invalid_geometry(format!(
                "zone vertex ({}, {}) lies outside the {} x {} board",
                p.x, p.y, spec.width, spec.height
            )));
        }
    }

    tracing::info!(
        width = spec.width,
        height = spec.height,
        components = placements.len(),
        nets = nets.named_count(),
        zones = zones.len(),
        "Assembled board"
    );

    Ok(BoardDocument {
        spec,
        outline,
        nets,
        placements,
        zones,
        texts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprints::chip::TwoTerminal;
    use crate::footprints::place;
    use crate::geometry::Rotation;
    use crate::nets::PadNets;

    fn registry() -> NetRegistry {
        let mut reg = NetRegistry::new();
        reg.register(1, "VCC").unwrap();
        reg.register(2, "GND").unwrap();
        reg
    }

    fn cap(reference: &str, nets: &PadNets, reg: &NetRegistry) -> ComponentPlacement {
        place(
            &TwoTerminal::c0603("100nF"),
            reference,
            Point::new(5.0, 5.0),
            Rotation::R0,
            nets,
            reg,
        )
        .unwrap()
    }

    fn spec() -> BoardSpec {
        BoardSpec::new(20.0, 10.0, 1.0, 0.3)
    }

    #[test]
    fn assembles_valid_board() {
        let reg = registry();
        let nets = PadNets::new().with("1", 1).with("2", 2);
        let doc = assemble(
            spec(),
            reg.clone(),
            vec![cap("C1", &nets, &reg), cap("C2", &nets, &reg)],
            vec![CopperZone::board_fill(&spec(), 2, "B.Cu")],
            vec![TextAnnotation::silkscreen("T", Point::new(10.0, 12.0), 1.0)],
        )
        .unwrap();
        assert_eq!(doc.outline.len(), 8);
        assert_eq!(doc.pad_count(), 4);
        assert_eq!(doc.connectivity().dangling().count(), 0);
    }

    #[test]
    fn duplicate_reference_is_rejected() {
        let reg = registry();
        let nets = PadNets::new();
        let err = assemble(
            spec(),
            reg.clone(),
            vec![cap("C1", &nets, &reg), cap("C1", &nets, &reg)],
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::DuplicateReference { ref reference } if reference == "C1"));
    }

    #[test]
    fn placement_from_other_registry_is_rejected() {
        let mut wide = registry();
        wide.register(3, "EXTRA").unwrap();
        let placement = cap("C1", &PadNets::new().with("1", 3), &wide);
        let err = assemble(spec(), registry(), vec![placement], Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, BoardError::UnknownNet { code: 3, .. }));
    }

    #[test]
    fn placement_with_renamed_net_is_rejected() {
        let placement = cap("C1", &PadNets::new().with("1", 1), &registry());
        let mut renamed = NetRegistry::new();
        renamed.register(1, "GND").unwrap();
        let err = assemble(spec(), renamed, vec![placement], Vec::new(), Vec::new()).unwrap_err();
        match err {
            BoardError::NetNameMismatch {
                code,
                expected,
                found,
                context,
            } => {
                assert_eq!(code, 1);
                assert_eq!(expected, "GND");
                assert_eq!(found, "VCC");
                assert_eq!(context, "C1 pad 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zone_net_must_exist() {
        let err = assemble(
            spec(),
            registry(),
            Vec::new(),
            vec![CopperZone::board_fill(&spec(), 9, "B.Cu")],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::UnknownNet { code: 9, .. }));
    }

    #[test]
    fn zone_must_stay_on_board() {
        let polygon = vec![
            Point::new(0.0, 0.0),
            Point::new(25.0, 0.0),
            Point::new(25.0, 10.0),
        ];
        let err = assemble(
            spec(),
            registry(),
            Vec::new(),
            vec![CopperZone::with_polygon(2, "B.Cu", polygon)],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::InvalidGeometry { .. }));
    }

    #[test]
    fn oversized_radius_is_rejected() {
        let spec = BoardSpec::new(20.0, 10.0, 5.0, 0.3);
        let err = assemble(spec, registry(), Vec::new(), Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, BoardError::InvalidGeometry { .. }));
    }

    #[test]
    fn connectivity_flags_single_pad_nets() {
        let reg = registry();
        let placement = cap("C1", &PadNets::new().with("1", 1), &reg);
        let doc = assemble(spec(), reg, vec![placement], Vec::new(), Vec::new()).unwrap();
        let report = doc.connectivity();
        let dangling: Vec<_> = report.dangling().map(|n| n.name.as_str()).collect();
        assert_eq!(dangling, vec!["VCC", "GND"]);
        assert_eq!(report.unconnected, 1);
        assert_eq!(report.nets[0].pads, vec!["C1.1".to_string()]);
    }
}
