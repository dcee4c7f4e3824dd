//! Geometry and placement properties checked through the public API.

use mixtee_pcb::board::BoardSpec;
use mixtee_pcb::footprints::chip::TwoTerminal;
use mixtee_pcb::footprints::dual_row::DualRowIc;
use mixtee_pcb::footprints::{place, Archetype};
use mixtee_pcb::geometry::{rotate_point, rounded_rectangle_outline, Point, Rotation, Segment};
use mixtee_pcb::nets::{NetRegistry, PadNets};

const TOLERANCE: f64 = 1e-9;

/// Angle of `p` around `centre`, in degrees within [0, 360).
fn angle_deg(centre: Point, p: Point) -> f64 {
    (p.y - centre.y).atan2(p.x - centre.x).to_degrees().rem_euclid(360.0)
}

/// Sweep of a three-point arc whose centre is known.
fn sweep_deg(centre: Point, start: Point, end: Point) -> f64 {
    let sweep = angle_deg(centre, end) - angle_deg(centre, start);
    if sweep <= 0.0 {
        sweep + 360.0
    } else {
        sweep
    }
}

// =============================================================================
// Outline
// =============================================================================

#[test]
fn outline_is_a_closed_loop() {
    for (w, h, r) in [(80.0, 20.0, 1.0), (72.0, 80.0, 1.0), (10.0, 4.0, 1.9)] {
        let outline = rounded_rectangle_outline(w, h, r).unwrap();
        assert_eq!(outline.len(), 8);
        for (i, segment) in outline.iter().enumerate() {
            let next = &outline[(i + 1) % outline.len()];
            assert!(
                segment.end().approx_eq(next.start(), TOLERANCE),
                "segment {i} does not meet segment {}",
                (i + 1) % outline.len()
            );
        }
    }
}

#[test]
fn outline_arcs_turn_a_full_circle() {
    let (w, h, r) = (72.0, 80.0, 1.0);
    let outline = rounded_rectangle_outline(w, h, r).unwrap();
    let centres = [
        Point::new(w - r, r),
        Point::new(w - r, h - r),
        Point::new(r, h - r),
        Point::new(r, r),
    ];

    let arcs: Vec<_> = outline.iter().filter(|s| s.is_arc()).collect();
    assert_eq!(arcs.len(), 4);

    let total: f64 = arcs
        .iter()
        .zip(centres)
        .map(|(arc, centre)| match arc {
            Segment::Arc { start, mid, end } => {
                assert!((mid.distance_to(centre) - r).abs() < TOLERANCE);
                sweep_deg(centre, *start, *end)
            }
            Segment::Line { .. } => unreachable!(),
        })
        .sum();
    assert!((total - 360.0).abs() < 1e-6);
}

#[test]
fn daughter_board_outline_starts_on_top_edge() {
    let outline = BoardSpec::new(80.0, 20.0, 1.0, 0.3).outline().unwrap();
    assert_eq!(outline.iter().filter(|s| s.is_arc()).count(), 4);
    assert_eq!(outline.iter().filter(|s| !s.is_arc()).count(), 4);
    assert_eq!(
        outline[0],
        Segment::Line {
            start: Point::new(1.0, 0.0),
            end: Point::new(79.0, 0.0),
        }
    );
}

#[test]
fn outline_rejects_oversized_radius() {
    assert!(rounded_rectangle_outline(10.0, 4.0, 2.0).is_err());
    assert!(rounded_rectangle_outline(10.0, 4.0, 0.0).is_err());
    assert!(rounded_rectangle_outline(-1.0, 4.0, 0.5).is_err());
}

// =============================================================================
// Rotation
// =============================================================================

#[test]
fn rotation_round_trip_restores_local_offset() {
    let origin = Point::new(12.5, -3.25);
    let local = Point::new(1.7, -0.45);
    for rotation in Rotation::ALL {
        let board = rotate_point(origin, local, rotation);
        let back = rotate_point(
            Point::new(0.0, 0.0),
            Point::new(board.x - origin.x, board.y - origin.y),
            rotation.inverse(),
        );
        assert!(back.approx_eq(local, TOLERANCE), "rotation {rotation}");
    }
}

#[test]
fn rotation_preserves_distance_from_origin() {
    let origin = Point::new(36.0, 73.0);
    let local = Point::new(-4.445, -8.255);
    let expected = origin.distance_to(origin.offset(local.x, local.y));
    for rotation in Rotation::ALL {
        let p = rotate_point(origin, local, rotation);
        assert!((p.distance_to(origin) - expected).abs() < TOLERANCE);
    }
}

#[test]
fn only_quarter_turn_angles_are_accepted() {
    assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::R270);
    assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::R270);
    assert!(Rotation::from_degrees(45).is_err());
}

// =============================================================================
// Placement
// =============================================================================

fn capacitor_at(rotation: Rotation) -> (Point, Point) {
    let mut registry = NetRegistry::new();
    registry.register(1, "+5VA").unwrap();
    registry.register(2, "GND").unwrap();
    let nets = PadNets::new().with("1", 1).with("2", 2);
    let cap = place(
        &TwoTerminal::c0603("100nF"),
        "C1",
        Point::new(25.0, 4.0),
        rotation,
        &nets,
        &registry,
    )
    .unwrap();
    (
        cap.pad("1").unwrap().position,
        cap.pad("2").unwrap().position,
    )
}

#[test]
fn chip_capacitor_unrotated() {
    let (p1, p2) = capacitor_at(Rotation::R0);
    assert!(p1.approx_eq(Point::new(24.2, 4.0), TOLERANCE));
    assert!(p2.approx_eq(Point::new(25.8, 4.0), TOLERANCE));
}

#[test]
fn chip_capacitor_quarter_turn() {
    let (p1, p2) = capacitor_at(Rotation::R90);
    assert!(p1.approx_eq(Point::new(25.0, 4.8), TOLERANCE));
    assert!(p2.approx_eq(Point::new(25.0, 3.2), TOLERANCE));
}

#[test]
fn soic_pad_size_follows_rotation() {
    let ic = DualRowIc::soic28w("MCP23017");
    let upright = ic.template(Rotation::R0);
    let turned = ic.template(Rotation::R90);
    let a = upright.pads[0].size;
    let b = turned.pads[0].size;
    assert!((a.width - b.height).abs() < TOLERANCE);
    assert!((a.height - b.width).abs() < TOLERANCE);
}

#[test]
fn soic_rows_face_each_other() {
    let ic = DualRowIc::soic28w("MCP23017");
    let p1 = ic.pin_position(1).unwrap();
    let p28 = ic.pin_position(28).unwrap();
    assert!((p1.y - p28.y).abs() < TOLERANCE);
    assert!((p28.x - p1.x - 8.89).abs() < TOLERANCE);
    assert!(ic.pin_position(0).is_none());
    assert!(ic.pin_position(29).is_none());
}
