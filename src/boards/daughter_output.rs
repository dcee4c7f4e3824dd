//! MIXTEE daughter/output board: four 1/4" input jacks with ESD clamps.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────────┐ y=0
//!  │                 J5 (JST-PH)   C1                             │
//!  │     D1          D2          D3          D4                   │
//!  │     J1          J2          J3          J4    (jack pads)    │
//!  └──────────────────────────────────────────────────────────────┘ y=20
//!  x=0         jack barrels exit through the bottom edge      x=80
//! ```
//!
//! Each jack tip feeds one analog input net; a BAT54 from the net to +5VA
//! clamps positive overshoot. J5 carries the four inputs, +5VA and GND to
//! the main board.

use crate::board::{assemble, BoardResult, BoardSpec, CopperZone, TextAnnotation};
use crate::boards::BoardDesign;
use crate::footprints::chip::{TwoTerminal, ANODE, CATHODE};
use crate::footprints::connector::JstPh;
use crate::footprints::jack::{Switchcraft112Bpc, SLEEVE, TIP};
use crate::footprints::{place, ComponentPlacement};
use crate::geometry::{Point, Rotation};
use crate::kicad::{DesignRules, NetClass};
use crate::nets::{NetRegistry, PadNets};

/// Output file stem.
pub const PROJECT_NAME: &str = "mixtee-daughter-output";

/// Generator tag in the board header.
pub const GENERATOR: &str = "mixtee_gen_pcb";

/// 80 x 20 mm, 1 mm corners, 0.3 mm copper-to-edge.
pub const SPEC: BoardSpec = BoardSpec::new(80.0, 20.0, 1.0, 0.3);

const JACK_PITCH: f64 = 20.0;
const JACK_X0: f64 = 10.0;
/// Bushing centre sits on the bottom edge.
const JACK_Y: f64 = 20.0;

const DIODE_Y: f64 = 5.5;
const DIODE_DX: f64 = 2.0;

const CAP_AT: Point = Point::new(25.0, 4.0);
const CONN_AT: Point = Point::new(35.0, 1.5);

/// Net codes.
pub mod net {
    use crate::nets::NetCode;

    /// Analog supply.
    pub const VA5: NetCode = 1;
    /// Analog inputs 1-4.
    pub const AIN: [NetCode; 4] = [2, 3, 4, 5];
    /// Ground.
    pub const GND: NetCode = 6;
}

fn registry() -> BoardResult<NetRegistry> {
    let mut reg = NetRegistry::new();
    reg.register(net::VA5, "+5VA")?;
    for (i, &code) in net::AIN.iter().enumerate() {
        reg.register(code, format!("AIN{}", i + 1))?;
    }
    reg.register(net::GND, "GND")?;
    Ok(reg)
}

fn channel_x(channel: u32) -> f64 {
    JACK_X0 + JACK_PITCH * f64::from(channel)
}

fn placements(reg: &NetRegistry) -> BoardResult<Vec<ComponentPlacement>> {
    let mut out = Vec::new();
    let jack = Switchcraft112Bpc;
    let clamp = TwoTerminal::sod323("BAT54");

    // Barrels point down: local -X maps to board +Y at 90°.
    for (i, &ain) in (0u32..).zip(net::AIN.iter()) {
        let nets = PadNets::new().with(TIP, ain).with(SLEEVE, net::GND);
        out.push(place(
            &jack,
            format!("J{}", i + 1),
            Point::new(channel_x(i), JACK_Y),
            Rotation::R90,
            &nets,
            reg,
        )?);
    }

    for (i, &ain) in (0u32..).zip(net::AIN.iter()) {
        let nets = PadNets::new().with(CATHODE, net::VA5).with(ANODE, ain);
        out.push(place(
            &clamp,
            format!("D{}", i + 1),
            Point::new(channel_x(i) + DIODE_DX, DIODE_Y),
            Rotation::R0,
            &nets,
            reg,
        )?);
    }

    out.push(place(
        &TwoTerminal::c0603("100nF"),
        "C1",
        CAP_AT,
        Rotation::R0,
        &PadNets::new().with("1", net::VA5).with("2", net::GND),
        reg,
    )?);

    let conn_nets: PadNets = net::AIN
        .iter()
        .chain(&[net::VA5, net::GND])
        .enumerate()
        .map(|(i, &code)| ((i + 1).to_string(), code))
        .collect();
    out.push(place(
        &JstPh::new(6),
        "J5",
        CONN_AT,
        Rotation::R0,
        &conn_nets,
        reg,
    )?);

    Ok(out)
}

/// Project-file rules: default, analog audio and power classes.
#[must_use]
pub fn rules() -> DesignRules {
    DesignRules {
        net_classes: vec![
            NetClass::default_class(),
            NetClass::new("Audio_Analog", 0.25, 0.3, 0.6, 0.3),
            NetClass::power(),
        ],
        ..DesignRules::default()
    }
}

/// Builds the daughter/output board.
///
/// # Errors
///
/// Propagates net registration, placement and assembly errors.
pub fn design() -> BoardResult<BoardDesign> {
    let reg = registry()?;
    let placements = placements(&reg)?;
    let zone = CopperZone::board_fill(&SPEC, net::GND, "B.Cu");
    let title = TextAnnotation::silkscreen(
        "MIXTEE Daughter/Output",
        Point::new(SPEC.width / 2.0, SPEC.height + 2.0),
        1.5,
    );

    let document = assemble(SPEC, reg, placements, vec![zone], vec![title])?;
    Ok(BoardDesign {
        project_name: PROJECT_NAME,
        generator: GENERATOR,
        document,
        rules: rules(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jack_pads_land_inside_board() {
        let design = design().unwrap();
        let j1 = &design.document.placements[0];
        assert_eq!(j1.reference, "J1");
        let tip = j1.pad(TIP).unwrap();
        let sleeve = j1.pad(SLEEVE).unwrap();
        assert!(tip.position.approx_eq(Point::new(10.0, 2.22), 1e-9));
        assert!(sleeve.position.approx_eq(Point::new(17.62, 8.57), 1e-9));
        assert_eq!(tip.net_name, "AIN1");
        assert_eq!(sleeve.net_name, "GND");
    }

    #[test]
    fn connector_pinout() {
        let design = design().unwrap();
        let j5 = design
            .document
            .placements
            .iter()
            .find(|p| p.reference == "J5")
            .unwrap();
        let names: Vec<_> = j5.pads.iter().map(|p| p.net_name.as_str()).collect();
        assert_eq!(names, vec!["AIN1", "AIN2", "AIN3", "AIN4", "+5VA", "GND"]);
    }

    #[test]
    fn every_named_net_has_two_pads() {
        let design = design().unwrap();
        assert_eq!(design.document.connectivity().dangling().count(), 0);
        assert_eq!(design.document.placements.len(), 10);
    }
}
