//! `.kicad_pcb` board document emitter.
//!
//! [`build`] turns a [`BoardDocument`] into an S-expression tree and
//! [`emit`] renders it. Apart from the identifiers drawn from the injected
//! [`IdSource`], the output is a pure function of the document.

use crate::board::{BoardDocument, CopperZone, TextAnnotation};
use crate::footprints::{ComponentPlacement, Label, PadKind, PadShape, PlacedPad, SilkLine};
use crate::geometry::{Point, Segment};
use crate::kicad::ids::IdSource;
use crate::kicad::sexpr::Node;

/// File format version written to the header.
pub const FORMAT_VERSION: u32 = 20_240_108;

/// Board outline layer.
pub const EDGE_CUTS: &str = "Edge.Cuts";

const OUTLINE_WIDTH: f64 = 0.05;
const BOARD_THICKNESS: f64 = 1.6;

/// The fixed two-layer stack-up: `(id, canonical name, type, user name)`.
const LAYERS: &[(u32, &str, &str, Option<&str>)] = &[
    (0, "F.Cu", "signal", None),
    (31, "B.Cu", "signal", None),
    (32, "B.Adhes", "user", Some("B.Adhesive")),
    (33, "F.Adhes", "user", Some("F.Adhesive")),
    (34, "B.Paste", "user", None),
    (35, "F.Paste", "user", None),
    (36, "B.SilkS", "user", Some("B.Silkscreen")),
    (37, "F.SilkS", "user", Some("F.Silkscreen")),
    (38, "B.Mask", "user", Some("B.Mask")),
    (39, "F.Mask", "user", Some("F.Mask")),
    (40, "Dwgs.User", "user", Some("User.Drawings")),
    (41, "Cmts.User", "user", Some("User.Comments")),
    (42, "Eco1.User", "user", Some("User.Eco1")),
    (43, "Eco2.User", "user", Some("User.Eco2")),
    (44, EDGE_CUTS, "user", None),
    (45, "Margin", "user", None),
    (46, "B.CrtYd", "user", Some("B.Courtyard")),
    (47, "F.CrtYd", "user", Some("F.Courtyard")),
    (48, "B.Fab", "user", Some("B.Fabrication")),
    (49, "F.Fab", "user", Some("F.Fabrication")),
    (50, "User.1", "user", None),
    (51, "User.2", "user", None),
    (52, "User.3", "user", None),
    (53, "User.4", "user", None),
    (54, "User.5", "user", None),
    (55, "User.6", "user", None),
    (56, "User.7", "user", None),
    (57, "User.8", "user", None),
    (58, "User.9", "user", None),
];

/// Plot settings, written verbatim.
const PLOT_PARAMS: &[(&str, &str)] = &[
    ("layerselection", "0x00010fc_ffffffff"),
    ("plot_on_all_layers_selection", "0x0000000_00000000"),
    ("disableapertmacros", "no"),
    ("usegerberextensions", "no"),
    ("usegerberattributes", "yes"),
    ("usegerberadvancedattributes", "yes"),
    ("creategerberjobfile", "yes"),
    ("dashed_line_dash_ratio", "12.000000"),
    ("dashed_line_gap_ratio", "3.000000"),
    ("svgprecision", "4"),
    ("plotframeref", "no"),
    ("viasonmask", "no"),
    ("mode", "1"),
    ("useauxorigin", "no"),
    ("hpglpennumber", "1"),
    ("hpglpenspeed", "20"),
    ("hpglpendiameter", "15.000000"),
    ("pdf_front_fp_property_popups", "yes"),
    ("pdf_back_fp_property_popups", "yes"),
    ("pdf_metadata", "yes"),
    ("outputformat", "1"),
    ("mirror", "no"),
    ("drillshape", "1"),
    ("scaleselection", "1"),
];

/// Renders `doc` as a board file.
#[must_use]
pub fn emit(doc: &BoardDocument, generator: &str, ids: &mut dyn IdSource) -> String {
    build(doc, generator, ids).render()
}

/// Builds the board file tree.
#[must_use]
pub fn build(doc: &BoardDocument, generator: &str, ids: &mut dyn IdSource) -> Node {
    let mut root = Node::block("kicad_pcb")
        .child(Node::new("version").number(f64::from(FORMAT_VERSION)))
        .child(Node::new("generator").text(generator))
        .child(Node::new("generator_version").text("1.0"))
        .child(
            Node::block("general")
                .child(Node::new("thickness").number(BOARD_THICKNESS))
                .child(Node::new("legacy_teardrops").symbol("no")),
        )
        .child(Node::new("paper").text("A4"))
        .child(layers())
        .child(setup());

    for (code, name) in doc.nets.iter() {
        root.push(Node::new("net").number(f64::from(code)).text(name));
    }
    for segment in &doc.outline {
        root.push(outline_segment(segment, ids));
    }
    for placement in &doc.placements {
        root.push(footprint(placement, ids));
    }
    for zone in &doc.zones {
        let name = doc.nets.resolve(zone.net).unwrap_or_default();
        root.push(copper_zone(zone, name, ids));
    }
    for text in &doc.texts {
        root.push(board_text(text, ids));
    }
    root
}

fn xy(name: &str, p: Point) -> Node {
    Node::new(name).number(p.x).number(p.y)
}

fn uuid(ids: &mut dyn IdSource) -> Node {
    Node::new("uuid").text(ids.next_id())
}

fn layer(name: &str) -> Node {
    Node::new("layer").text(name)
}

fn stroke(width: f64) -> Node {
    Node::new("stroke")
        .child(Node::new("width").number(width))
        .child(Node::new("type").symbol("solid"))
}

fn font(size: f64, thickness: f64) -> Node {
    Node::new("font")
        .child(Node::new("size").number(size).number(size))
        .child(Node::new("thickness").number(thickness))
}

fn layers() -> Node {
    Node::block("layers").children(LAYERS.iter().map(|(id, name, kind, user)| {
        let entry = Node::new(id.to_string()).text(*name).symbol(*kind);
        match user {
            Some(user) => entry.text(*user),
            None => entry,
        }
    }))
}

fn setup() -> Node {
    let plot = Node::block("pcbplotparams")
        .children(
            PLOT_PARAMS
                .iter()
                .map(|(key, value)| Node::new(*key).symbol(*value)),
        )
        .child(Node::new("outputdirectory").text(""));

    Node::block("setup")
        .child(Node::new("pad_to_mask_clearance").number(0.0))
        .child(Node::new("allow_soldermask_bridges_in_footprints").symbol("no"))
        .child(plot)
}

fn outline_segment(segment: &Segment, ids: &mut dyn IdSource) -> Node {
    let node = match *segment {
        Segment::Line { start, end } => Node::new("gr_line")
            .child(xy("start", start))
            .child(xy("end", end)),
        Segment::Arc { start, mid, end } => Node::new("gr_arc")
            .child(xy("start", start))
            .child(xy("mid", mid))
            .child(xy("end", end)),
    };
    node.child(layer(EDGE_CUTS))
        .child(stroke(OUTLINE_WIDTH))
        .child(uuid(ids))
}

fn property(
    key: &str,
    value: &str,
    label: &Label,
    rotation: f64,
    layer_name: &str,
    hidden: bool,
    ids: &mut dyn IdSource,
) -> Node {
    let mut effects = Node::new("effects").child(font(label.font_size, label.thickness));
    if hidden {
        effects = effects.symbol("hide");
    }
    Node::new("property")
        .text(key)
        .text(value)
        .child(xy("at", label.at).number(rotation))
        .child(layer(layer_name))
        .child(uuid(ids))
        .child(effects)
}

fn footprint(placement: &ComponentPlacement, ids: &mut dyn IdSource) -> Node {
    let side = placement.side;
    let rotation = f64::from(placement.rotation.degrees());
    let hidden_label = Label::new(0.0, 0.0, 1.0, 0.15);

    let mut node = Node::block("footprint")
        .text(&placement.footprint)
        .child(layer(side.copper()))
        .child(uuid(ids))
        .child(xy("at", placement.origin).number(rotation));

    node.push(property(
        "Reference",
        &placement.reference,
        &placement.reference_label,
        rotation,
        side.silkscreen(),
        false,
        ids,
    ));
    node.push(property(
        "Value",
        &placement.value,
        &placement.value_label,
        rotation,
        side.fabrication(),
        false,
        ids,
    ));
    node.push(property(
        "Footprint",
        &placement.footprint,
        &hidden_label,
        rotation,
        side.fabrication(),
        true,
        ids,
    ));

    for pad in &placement.pads {
        node.push(pad_node(pad, placement, ids));
    }
    for line in &placement.silkscreen {
        node.push(silk_line(line, placement.silk_width, side.silkscreen(), ids));
    }
    node
}

fn pad_node(pad: &PlacedPad, placement: &ComponentPlacement, ids: &mut dyn IdSource) -> Node {
    let side = placement.side;
    let (kind, layers): (&str, [&str; 2]) = match pad.kind {
        PadKind::Smd => ("smd", [side.copper(), side.mask()]),
        PadKind::ThroughHole { .. } => ("thru_hole", ["*.Cu", "*.Mask"]),
        PadKind::NonPlated { .. } => ("np_thru_hole", ["*.Cu", "*.Mask"]),
    };
    let shape = match pad.shape {
        PadShape::Rect => "rect",
        PadShape::RoundRect { .. } => "roundrect",
        PadShape::Circle => "circle",
    };

    let mut at = xy("at", pad.local);
    if let Some(angle) = pad.angle {
        at = at.number(f64::from(angle.degrees()));
    }

    let mut node = Node::new("pad")
        .text(&pad.name)
        .symbol(kind)
        .symbol(shape)
        .child(at)
        .child(Node::new("size").number(pad.size.width).number(pad.size.height));

    if let PadKind::ThroughHole { drill } | PadKind::NonPlated { drill } = pad.kind {
        node = node.child(Node::new("drill").number(drill));
    }
    node = node.child(Node::new("layers").text(layers[0]).text(layers[1]));
    if let PadShape::RoundRect { ratio } = pad.shape {
        node = node.child(Node::new("roundrect_rratio").number(ratio));
    }
    if pad.kind.is_electrical() {
        node = node.child(Node::new("net").number(f64::from(pad.net)).text(&pad.net_name));
    }
    node.child(uuid(ids))
}

fn silk_line(line: &SilkLine, width: f64, layer_name: &str, ids: &mut dyn IdSource) -> Node {
    Node::new("fp_line")
        .child(xy("start", line.start))
        .child(xy("end", line.end))
        .child(stroke(width))
        .child(layer(layer_name))
        .child(uuid(ids))
}

fn copper_zone(zone: &CopperZone, net_name: &str, ids: &mut dyn IdSource) -> Node {
    let fill = zone.fill;
    let pts = Node::new("pts").children(zone.polygon.iter().map(|p| xy("xy", *p)));

    Node::block("zone")
        .child(Node::new("net").number(f64::from(zone.net)))
        .child(Node::new("net_name").text(net_name))
        .child(layer(&zone.layer))
        .child(uuid(ids))
        .child(Node::new("hatch").symbol("edge").number(fill.hatch_edge))
        .child(Node::new("connect_pads").child(Node::new("clearance").number(fill.pad_clearance)))
        .child(Node::new("min_thickness").number(fill.min_thickness))
        .child(
            Node::new("fill")
                .symbol("yes")
                .child(Node::new("thermal_gap").number(fill.thermal_gap))
                .child(Node::new("thermal_bridge_width").number(fill.thermal_bridge_width)),
        )
        .child(Node::block("polygon").child(pts))
}

fn board_text(text: &TextAnnotation, ids: &mut dyn IdSource) -> Node {
    Node::block("gr_text")
        .text(&text.text)
        .child(xy("at", text.at))
        .child(layer(&text.layer))
        .child(uuid(ids))
        .child(Node::new("effects").child(font(text.font_size, text.thickness)))
}
