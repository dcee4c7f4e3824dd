//! Footprint archetypes and placement.
//!
//! An [`Archetype`] describes one physical part family: its pads in the
//! footprint's local frame, its silkscreen outline and its label metadata.
//! [`place`] turns an archetype plus a position, rotation and pad-to-net
//! assignment into a [`ComponentPlacement`] whose pads carry board
//! coordinates and resolved nets.
//!
//! # Families
//!
//! - [`jack`] - Switchcraft 112BPC 1/4" jack
//! - [`chip`] - two-terminal SMD parts (SOD-323, SOD-123, 0603)
//! - [`connector`] - JST-PH single-row vertical headers
//! - [`dual_row`] - SOIC dual-row ICs with serpentine pin numbering
//! - [`led`] - WS2812B-2020 addressable LEDs
//! - [`switch`] - Kailh Choc V1 hotswap sockets

pub mod chip;
pub mod connector;
pub mod dual_row;
pub mod jack;
pub mod led;
pub mod switch;

use serde::{Deserialize, Serialize};

use crate::board::error::{BoardError, BoardResult};
use crate::geometry::{rotate_point, Point, Rotation, Size};
use crate::nets::{NetCode, NetRegistry, PadNets};

/// Board side a footprint is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Top side (F.*).
    #[default]
    Front,
    /// Bottom side (B.*).
    Back,
}

impl Side {
    /// Copper layer name.
    #[must_use]
    pub const fn copper(self) -> &'static str {
        match self {
            Self::Front => "F.Cu",
            Self::Back => "B.Cu",
        }
    }

    /// Solder mask layer name.
    #[must_use]
    pub const fn mask(self) -> &'static str {
        match self {
            Self::Front => "F.Mask",
            Self::Back => "B.Mask",
        }
    }

    /// Silkscreen layer name.
    #[must_use]
    pub const fn silkscreen(self) -> &'static str {
        match self {
            Self::Front => "F.SilkS",
            Self::Back => "B.SilkS",
        }
    }

    /// Fabrication layer name.
    #[must_use]
    pub const fn fabrication(self) -> &'static str {
        match self {
            Self::Front => "F.Fab",
            Self::Back => "B.Fab",
        }
    }
}

/// Copper shape of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Plain rectangle.
    Rect,
    /// Rectangle with rounded corners; `ratio` is radius / smaller side.
    RoundRect {
        /// Corner radius ratio (0.0-0.5).
        ratio: f64,
    },
    /// Circle.
    Circle,
}

/// Mounting technology of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadKind {
    /// Surface-mount pad on the footprint's side.
    Smd,
    /// Plated through-hole pad.
    ThroughHole {
        /// Drill diameter (mm).
        drill: f64,
    },
    /// Non-plated mechanical hole; never carries a net.
    NonPlated {
        /// Drill diameter (mm).
        drill: f64,
    },
}

impl PadKind {
    /// True if the pad can be assigned a net.
    #[must_use]
    pub const fn is_electrical(self) -> bool {
        !matches!(self, Self::NonPlated { .. })
    }
}

/// A pad in the footprint's local (unrotated) frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadTemplate {
    /// Pad name ("1", "T", …). Empty for mechanical holes.
    pub name: String,
    /// Offset from the footprint origin (mm).
    pub offset: Point,
    /// Size as it must appear in the board file for the chosen rotation.
    pub size: Size,
    /// Copper shape.
    pub shape: PadShape,
    /// Mounting technology.
    pub kind: PadKind,
    /// Whether the pad record carries the footprint rotation as its own angle.
    pub follows_rotation: bool,
}

impl PadTemplate {
    /// Creates a surface-mount pad.
    #[must_use]
    pub fn smd(name: impl Into<String>, x: f64, y: f64, size: Size, shape: PadShape) -> Self {
        Self {
            name: name.into(),
            offset: Point::new(x, y),
            size,
            shape,
            kind: PadKind::Smd,
            follows_rotation: false,
        }
    }

    /// Creates a round plated through-hole pad.
    #[must_use]
    pub fn through_hole(name: impl Into<String>, x: f64, y: f64, diameter: f64, drill: f64) -> Self {
        Self {
            name: name.into(),
            offset: Point::new(x, y),
            size: Size::square(diameter),
            shape: PadShape::Circle,
            kind: PadKind::ThroughHole { drill },
            follows_rotation: false,
        }
    }

    /// Creates a non-plated round hole.
    #[must_use]
    pub fn mounting_hole(x: f64, y: f64, drill: f64) -> Self {
        Self {
            name: String::new(),
            offset: Point::new(x, y),
            size: Size::square(drill),
            shape: PadShape::Circle,
            kind: PadKind::NonPlated { drill },
            follows_rotation: false,
        }
    }

    /// Marks the pad as carrying the footprint rotation.
    #[must_use]
    pub const fn rotated_with_footprint(mut self) -> Self {
        self.follows_rotation = true;
        self
    }
}

/// A straight silkscreen stroke in the footprint's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilkLine {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl SilkLine {
    /// Creates a new stroke.
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    /// Closed rectangle from two opposite corners, drawn clockwise from the
    /// top-left corner.
    #[must_use]
    pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Self> {
        vec![
            Self::new(x1, y1, x2, y1),
            Self::new(x2, y1, x2, y2),
            Self::new(x2, y2, x1, y2),
            Self::new(x1, y2, x1, y1),
        ]
    }
}

/// Position and font of a footprint text property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Offset from the footprint origin (mm).
    pub at: Point,
    /// Font height and width (mm).
    pub font_size: f64,
    /// Stroke thickness (mm).
    pub thickness: f64,
}

impl Label {
    /// Creates a label.
    #[must_use]
    pub const fn new(x: f64, y: f64, font_size: f64, thickness: f64) -> Self {
        Self {
            at: Point::new(x, y),
            font_size,
            thickness,
        }
    }
}

/// Everything an archetype contributes to a placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintTemplate {
    /// Library identifier (`lib:name`).
    pub footprint: String,
    /// Value text.
    pub value: String,
    /// Mounting side.
    pub side: Side,
    /// Reference designator label.
    pub reference_label: Label,
    /// Value label.
    pub value_label: Label,
    /// Pads in declaration order.
    pub pads: Vec<PadTemplate>,
    /// Silkscreen outline.
    pub silkscreen: Vec<SilkLine>,
    /// Silkscreen stroke width (mm).
    pub silk_width: f64,
}

/// A component family with a fixed pad layout.
pub trait Archetype {
    /// Footprint for a placement at `rotation`.
    ///
    /// Rotation is passed in because some families emit pad sizes in board
    /// axes and must swap them on quarter turns.
    fn template(&self, rotation: Rotation) -> FootprintTemplate;
}

/// A pad after placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPad {
    /// Pad name.
    pub name: String,
    /// Offset in the footprint frame (what the board file stores).
    pub local: Point,
    /// Absolute board position.
    pub position: Point,
    /// Size as emitted.
    pub size: Size,
    /// Copper shape.
    pub shape: PadShape,
    /// Mounting technology.
    pub kind: PadKind,
    /// Explicit pad angle, if the pad follows the footprint rotation.
    pub angle: Option<Rotation>,
    /// Net code ([`crate::nets::UNCONNECTED`] for mechanical holes).
    pub net: NetCode,
    /// Resolved net name.
    pub net_name: String,
}

/// A component placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentPlacement {
    /// Reference designator, unique per board.
    pub reference: String,
    /// Library identifier.
    pub footprint: String,
    /// Value text.
    pub value: String,
    /// Mounting side.
    pub side: Side,
    /// Footprint origin in board coordinates.
    pub origin: Point,
    /// Footprint rotation.
    pub rotation: Rotation,
    /// Reference designator label.
    pub reference_label: Label,
    /// Value label.
    pub value_label: Label,
    /// Placed pads in archetype declaration order.
    pub pads: Vec<PlacedPad>,
    /// Silkscreen outline in the footprint frame.
    pub silkscreen: Vec<SilkLine>,
    /// Silkscreen stroke width (mm).
    pub silk_width: f64,
}

impl ComponentPlacement {
    /// Finds a pad by name.
    #[must_use]
    pub fn pad(&self, name: &str) -> Option<&PlacedPad> {
        self.pads.iter().find(|p| p.name == name)
    }
}

/// Places an archetype on the board.
///
/// Every electrical pad takes its net from `nets` (unconnected when absent)
/// and resolves the name through `registry`.
///
/// # Errors
///
/// - [`BoardError::UnknownPad`] if `nets` names a pad the archetype lacks
/// - [`BoardError::UnknownNet`] if a pad's net code is not registered
pub fn place(
    archetype: &dyn Archetype,
    reference: impl Into<String>,
    origin: Point,
    rotation: Rotation,
    nets: &PadNets,
    registry: &NetRegistry,
) -> BoardResult<ComponentPlacement> {
    let reference = reference.into();
    let template = archetype.template(rotation);

    for name in nets.pad_names() {
        let known = template
            .pads
            .iter()
            .any(|p| p.kind.is_electrical() && p.name == name);
        if !known {
            return Err(BoardError::unknown_pad(&reference, &template.footprint, name));
        }
    }

    let pads = template
        .pads
        .into_iter()
        .map(|pad| {
            let net = if pad.kind.is_electrical() {
                nets.net_for(&pad.name)
            } else {
                crate::nets::UNCONNECTED
            };
            let net_name = registry
                .resolve(net)
                .map_err(|e| e.referenced_by(format!("{reference} pad {}", pad.name)))?
                .to_string();
            Ok(PlacedPad {
                position: rotate_point(origin, pad.offset, rotation),
                local: pad.offset,
                angle: pad.follows_rotation.then_some(rotation),
                name: pad.name,
                size: pad.size,
                shape: pad.shape,
                kind: pad.kind,
                net,
                net_name,
            })
        })
        .collect::<BoardResult<Vec<_>>>()?;

    tracing::debug!(
        reference = %reference,
        footprint = %template.footprint,
        x = origin.x,
        y = origin.y,
        rotation = rotation.degrees(),
        pads = pads.len(),
        "Placed component"
    );

    Ok(ComponentPlacement {
        reference,
        footprint: template.footprint,
        value: template.value,
        side: template.side,
        origin,
        rotation,
        reference_label: template.reference_label,
        value_label: template.value_label,
        pads,
        silkscreen: template.silkscreen,
        silk_width: template.silk_width,
    })
}
