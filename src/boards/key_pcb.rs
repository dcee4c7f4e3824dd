//! MIXTEE key PCB: a 4x4 Choc keypad with per-key RGB LEDs.
//!
//! ```text
//!  ┌────────────────────────────────────────┐ y=0
//!  │  SW1     SW2     SW3     SW4           │
//!  │  SW5     SW6     SW7     SW8           │
//!  │  SW9     SW10    SW11    SW12          │
//!  │  SW13    SW14    SW15    SW16          │
//!  │  J1          C17 U1                    │
//!  └────────────────────────────────────────┘ y=80
//!  x=0                                  x=72
//! ```
//!
//! The matrix is scanned by an MCP23017: port A reads the columns, port B
//! drives the rows, and a 1N4148 per key (cathode to the row) blocks
//! ghosting. The WS2812B chain snakes through the grid row by row so
//! neighbouring LEDs stay adjacent.

use crate::board::{assemble, BoardError, BoardResult, BoardSpec, CopperZone, TextAnnotation};
use crate::boards::BoardDesign;
use crate::footprints::chip::{LabelStyle, TwoTerminal, ANODE, CATHODE};
use crate::footprints::connector::JstPh;
use crate::footprints::dual_row::DualRowIc;
use crate::footprints::led::Ws2812b2020;
use crate::footprints::switch::{ChocHotswap, PAD_1, PAD_2};
use crate::footprints::{place, ComponentPlacement};
use crate::geometry::{Point, Rotation};
use crate::kicad::DesignRules;
use crate::nets::{DaisyChain, NetCode, NetRegistry, PadNets};

/// Output file stem.
pub const PROJECT_NAME: &str = "mixtee-key-pcb";

/// Generator tag in the board header.
pub const GENERATOR: &str = "mixtee_gen_key_pcb";

/// 72 x 80 mm: the 72 mm key grid plus an 8 mm strip for U1 and J1.
pub const SPEC: BoardSpec = BoardSpec::new(72.0, 80.0, 1.0, 0.3);

/// Key grid dimensions.
pub const GRID_COLS: usize = 4;
/// Key grid dimensions.
pub const GRID_ROWS: usize = 4;
const PITCH: f64 = 18.0;
const GRID_ORIGIN: Point = Point::new(9.0, 9.0);

/// LED chain order by switch number: left to right on even rows, right to
/// left on odd rows.
pub const CHAIN_ORDER: [usize; 16] = [1, 2, 3, 4, 8, 7, 6, 5, 9, 10, 11, 12, 16, 15, 14, 13];

const LED_OFFSET: (f64, f64) = (0.0, 3.5);
const CAP_OFFSET: (f64, f64) = (-3.0, 3.5);
const DIODE_OFFSET: (f64, f64) = (7.0, -1.0);
/// Last column diodes turn 90° to stay clear of the right edge.
const EDGE_DIODE_OFFSET: (f64, f64) = (5.0, 2.0);

const MCP_AT: Point = Point::new(36.0, 73.0);
const MCP_CAP_AT: Point = Point::new(28.0, 73.0);
const CONN_AT: Point = Point::new(5.0, 75.0);

/// Net codes.
pub mod net {
    use crate::nets::NetCode;

    /// Ground.
    pub const GND: NetCode = 1;
    /// 5 V supply for LEDs and U1.
    pub const V5: NetCode = 2;
    /// I2C data.
    pub const SDA: NetCode = 3;
    /// I2C clock.
    pub const SCL: NetCode = 4;
    /// U1 interrupt output (INTA).
    pub const INT: NetCode = 5;
    /// External LED data input; chain links follow at `NEO_DIN + 1`.
    pub const NEO_DIN: NetCode = 6;
    /// First LED link net, `NEO_D0`.
    pub const NEO_LINK_FIRST: NetCode = 7;
    /// `COL0`; columns 1-3 follow.
    pub const COL_FIRST: NetCode = 22;
    /// `ROW0`; rows 1-3 follow.
    pub const ROW_FIRST: NetCode = 26;
    /// `SW{n}_D` is `SW_DIODE_FIRST + n - 1`.
    pub const SW_DIODE_FIRST: NetCode = 30;
}

/// MCP23017 pins that carry a net. Unlisted pins are left unconnected.
const MCP_PINS: &[(u32, NetCode)] = &[
    // GPB0-3: rows
    (1, net::ROW_FIRST),
    (2, net::ROW_FIRST + 1),
    (3, net::ROW_FIRST + 2),
    (4, net::ROW_FIRST + 3),
    (9, net::V5),   // VDD
    (10, net::GND), // VSS
    (12, net::SCL),
    (13, net::SDA),
    // A0-A2 low: address 0x20
    (15, net::GND),
    (16, net::GND),
    (17, net::GND),
    (18, net::V5), // RESET
    (20, net::INT), // INTA
    // GPA0-3: columns
    (21, net::COL_FIRST),
    (22, net::COL_FIRST + 1),
    (23, net::COL_FIRST + 2),
    (24, net::COL_FIRST + 3),
];

/// One key position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Key {
    /// Switch number, 1-based.
    n: usize,
    row: usize,
    col: usize,
    centre: Point,
}

impl Key {
    #[allow(clippy::cast_precision_loss)]
    fn all() -> impl Iterator<Item = Self> {
        (0..GRID_ROWS * GRID_COLS).map(|i| {
            let (row, col) = (i / GRID_COLS, i % GRID_COLS);
            Self {
                n: i + 1,
                row,
                col,
                centre: GRID_ORIGIN.offset(PITCH * col as f64, PITCH * row as f64),
            }
        })
    }

    fn at(&self, (dx, dy): (f64, f64)) -> Point {
        self.centre.offset(dx, dy)
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn code(base: NetCode, offset: usize) -> NetCode {
    base + offset as NetCode
}

const fn col_net(col: usize) -> NetCode {
    code(net::COL_FIRST, col)
}

const fn row_net(row: usize) -> NetCode {
    code(net::ROW_FIRST, row)
}

const fn junction_net(n: usize) -> NetCode {
    code(net::SW_DIODE_FIRST, n - 1)
}

/// The LED chain, shared by net registration and LED placement.
///
/// # Errors
///
/// Returns [`BoardError::InvalidChain`] if [`CHAIN_ORDER`]
/// repeats a key.
pub fn led_chain() -> BoardResult<DaisyChain> {
    DaisyChain::new(&CHAIN_ORDER, net::NEO_DIN, net::NEO_LINK_FIRST, "NEO_D")
}

fn registry(chain: &DaisyChain) -> BoardResult<NetRegistry> {
    let mut reg = NetRegistry::new();
    reg.register(net::GND, "GND")?;
    reg.register(net::V5, "5V")?;
    reg.register(net::SDA, "SDA")?;
    reg.register(net::SCL, "SCL")?;
    reg.register(net::INT, "INT")?;
    reg.register(net::NEO_DIN, "NEO_DIN")?;
    chain.register_links(&mut reg)?;
    for i in 0..GRID_COLS {
        reg.register(col_net(i), format!("COL{i}"))?;
    }
    for i in 0..GRID_ROWS {
        reg.register(row_net(i), format!("ROW{i}"))?;
    }
    for key in Key::all() {
        reg.register(junction_net(key.n), format!("SW{}_D", key.n))?;
    }
    Ok(reg)
}

fn placements(reg: &NetRegistry, chain: &DaisyChain) -> BoardResult<Vec<ComponentPlacement>> {
    let mut out = Vec::new();
    let switch = ChocHotswap::new();
    let led = Ws2812b2020;
    let small_labels = LabelStyle::new(1.5, 0.6, 0.1);
    let cap = TwoTerminal::c0603("100nF").with_labels(LabelStyle::new(1.3, 0.6, 0.1));
    let diode = TwoTerminal::sod123("1N4148").with_labels(small_labels);

    for key in Key::all() {
        let nets = PadNets::new()
            .with(PAD_1, col_net(key.col))
            .with(PAD_2, junction_net(key.n));
        out.push(place(&switch, format!("SW{}", key.n), key.centre, Rotation::R0, &nets, reg)?);
    }

    for key in Key::all() {
        let link = chain.link_for(key.n).ok_or_else(|| {
            BoardError::invalid_chain(format!("LED{} is missing from the LED chain", key.n))
        })?;
        let nets = Ws2812b2020::pad_nets(link, net::GND, net::V5);
        out.push(place(&led, format!("LED{}", key.n), key.at(LED_OFFSET), Rotation::R0, &nets, reg)?);
    }

    for key in Key::all() {
        let nets = PadNets::new().with("1", net::V5).with("2", net::GND);
        out.push(place(&cap, format!("C{}", key.n), key.at(CAP_OFFSET), Rotation::R0, &nets, reg)?);
    }

    for key in Key::all() {
        let (at, rotation) = if key.col == GRID_COLS - 1 {
            (key.at(EDGE_DIODE_OFFSET), Rotation::R90)
        } else {
            (key.at(DIODE_OFFSET), Rotation::R0)
        };
        let nets = PadNets::new()
            .with(CATHODE, row_net(key.row))
            .with(ANODE, junction_net(key.n));
        out.push(place(&diode, format!("D{}", key.n), at, rotation, &nets, reg)?);
    }

    let mcp_nets: PadNets = MCP_PINS
        .iter()
        .map(|&(pin, net_code)| (pin.to_string(), net_code))
        .collect();
    out.push(place(
        &DualRowIc::soic28w("MCP23017"),
        "U1",
        MCP_AT,
        Rotation::R90,
        &mcp_nets,
        reg,
    )?);

    out.push(place(
        &cap,
        "C17",
        MCP_CAP_AT,
        Rotation::R0,
        &PadNets::new().with("1", net::V5).with("2", net::GND),
        reg,
    )?);

    let conn_nets: PadNets = [net::NEO_DIN, net::SDA, net::SCL, net::INT, net::V5, net::GND]
        .into_iter()
        .enumerate()
        .map(|(i, net_code)| ((i + 1).to_string(), net_code))
        .collect();
    out.push(place(&JstPh::new(6), "J1", CONN_AT, Rotation::R0, &conn_nets, reg)?);

    Ok(out)
}

/// Builds the key PCB.
///
/// # Errors
///
/// Propagates net registration, placement and assembly errors.
pub fn design() -> BoardResult<BoardDesign> {
    let chain = led_chain()?;
    let reg = registry(&chain)?;
    let placements = placements(&reg, &chain)?;
    let zone = CopperZone::board_fill(&SPEC, net::GND, "B.Cu");
    let title = TextAnnotation::silkscreen(
        "MIXTEE Key PCB",
        Point::new(SPEC.width / 2.0, SPEC.height - 2.5),
        1.2,
    );

    let document = assemble(SPEC, reg, placements, vec![zone], vec![title])?;
    Ok(BoardDesign {
        project_name: PROJECT_NAME,
        generator: GENERATOR,
        document,
        rules: DesignRules::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprints::led::{DIN, DOUT};

    fn find<'a>(design: &'a BoardDesign, reference: &str) -> &'a ComponentPlacement {
        design
            .document
            .placements
            .iter()
            .find(|p| p.reference == reference)
            .unwrap()
    }

    #[test]
    fn net_table_bands() {
        let design = design().unwrap();
        let nets = &design.document.nets;
        assert_eq!(nets.named_count(), 45);
        assert_eq!(nets.resolve(7).unwrap(), "NEO_D0");
        assert_eq!(nets.resolve(21).unwrap(), "NEO_D14");
        assert_eq!(nets.resolve(22).unwrap(), "COL0");
        assert_eq!(nets.resolve(29).unwrap(), "ROW3");
        assert_eq!(nets.resolve(45).unwrap(), "SW16_D");
    }

    #[test]
    fn component_counts() {
        let design = design().unwrap();
        let summary = design.summary();
        assert_eq!(summary.component_count(), 67);
        assert_eq!(summary.components["SW"], 16);
        assert_eq!(summary.components["LED"], 16);
        assert_eq!(summary.components["C"], 17);
        assert_eq!(summary.components["D"], 16);
        assert!(summary.dangling_nets.is_empty());
    }

    #[test]
    fn led_chain_is_wired_in_serpentine_order() {
        let design = design().unwrap();
        let first = find(&design, "LED1");
        assert_eq!(first.pad(DIN).unwrap().net_name, "NEO_DIN");
        assert_eq!(first.pad(DOUT).unwrap().net_name, "NEO_D0");
        // LED4 feeds LED8 at the end of the first row.
        assert_eq!(
            find(&design, "LED4").pad(DOUT).unwrap().net,
            find(&design, "LED8").pad(DIN).unwrap().net
        );
        assert_eq!(find(&design, "LED13").pad(DOUT).unwrap().net, 0);
    }

    #[test]
    fn key_left_out_of_led_chain_is_rejected() {
        let short_order = &CHAIN_ORDER[..15];
        let chain =
            DaisyChain::new(short_order, net::NEO_DIN, net::NEO_LINK_FIRST, "NEO_D").unwrap();
        let reg = registry(&chain).unwrap();
        let err = placements(&reg, &chain).unwrap_err();
        assert!(matches!(err, BoardError::InvalidChain { .. }));
        assert!(err.to_string().contains("LED13"));
    }

    #[test]
    fn last_column_diodes_are_rotated() {
        let design = design().unwrap();
        let d4 = find(&design, "D4");
        assert_eq!(d4.rotation, Rotation::R90);
        assert!(d4.origin.approx_eq(Point::new(68.0, 11.0), 1e-9));
        let d1 = find(&design, "D1");
        assert_eq!(d1.rotation, Rotation::R0);
        assert!(d1.origin.approx_eq(Point::new(16.0, 8.0), 1e-9));
        assert_eq!(d1.pad(CATHODE).unwrap().net_name, "ROW0");
        assert_eq!(d1.pad(ANODE).unwrap().net_name, "SW1_D");
    }

    #[test]
    fn expander_pinout() {
        let design = design().unwrap();
        let u1 = find(&design, "U1");
        assert_eq!(u1.pad("1").unwrap().net_name, "ROW0");
        assert_eq!(u1.pad("13").unwrap().net_name, "SDA");
        assert_eq!(u1.pad("20").unwrap().net_name, "INT");
        assert_eq!(u1.pad("24").unwrap().net_name, "COL3");
        assert_eq!(u1.pad("28").unwrap().net, 0);
        assert!((u1.pad("1").unwrap().size.width - 0.6).abs() < 1e-9);
    }
}
