//! WS2812B-2020 addressable LED (2 x 2 mm).
//!
//! Pin layout, top view:
//!
//! ```text
//!  1 DOUT ▪   ▪ 4 DIN
//!  2 GND  ▪   ▪ 3 VDD
//! ```

use crate::footprints::{Archetype, FootprintTemplate, Label, PadShape, PadTemplate, Side, SilkLine};
use crate::geometry::{Rotation, Size};
use crate::nets::{ChainLink, NetCode, PadNets};

/// Data output pad.
pub const DOUT: &str = "1";
/// Ground pad.
pub const GND: &str = "2";
/// Supply pad.
pub const VDD: &str = "3";
/// Data input pad.
pub const DIN: &str = "4";

/// WS2812B-2020 LED.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ws2812b2020;

impl Ws2812b2020 {
    /// Pad assignment for one chained instance.
    #[must_use]
    pub fn pad_nets(link: &ChainLink, ground: NetCode, supply: NetCode) -> PadNets {
        PadNets::new()
            .with(DOUT, link.data_out)
            .with(GND, ground)
            .with(VDD, supply)
            .with(DIN, link.data_in)
    }
}

impl Archetype for Ws2812b2020 {
    fn template(&self, _rotation: Rotation) -> FootprintTemplate {
        let size = Size::new(0.5, 0.55);
        FootprintTemplate {
            footprint: "LED_SMD:WS2812B-2020".to_string(),
            value: "WS2812B-2020".to_string(),
            side: Side::Front,
            reference_label: Label::new(0.0, -1.5, 0.6, 0.1),
            value_label: Label::new(0.0, 1.5, 0.6, 0.1),
            pads: vec![
                PadTemplate::smd(DOUT, -0.65, -0.475, size, PadShape::Rect),
                PadTemplate::smd(GND, -0.65, 0.475, size, PadShape::Rect),
                PadTemplate::smd(VDD, 0.65, 0.475, size, PadShape::Rect),
                PadTemplate::smd(DIN, 0.65, -0.475, size, PadShape::Rect),
            ],
            silkscreen: SilkLine::rectangle(-1.1, -1.1, 1.1, 1.1),
            silk_width: 0.12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nets::DaisyChain;

    #[test]
    fn pad_nets_follow_chain_link() {
        let chain = DaisyChain::new(&[3, 1], 6, 7, "NEO_D").unwrap();
        let first = Ws2812b2020::pad_nets(&chain.links()[0], 1, 2);
        let second = Ws2812b2020::pad_nets(&chain.links()[1], 1, 2);
        assert_eq!(first.net_for(DIN), 6);
        assert_eq!(first.net_for(DOUT), second.net_for(DIN));
        assert_eq!(second.net_for(DOUT), 0);
        assert_eq!(second.net_for(VDD), 2);
    }
}
