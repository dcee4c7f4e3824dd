//! mixtee-pcb: KiCad board generator for the MIXTEE daughter boards
//!
//! This library describes two small boards entirely in code and renders them
//! as KiCad 8 project files:
//!
//! - **Daughter/output board**: 80 x 20 mm, four 1/4" jacks with Schottky
//!   clamps and a JST-PH link to the main board
//! - **Key PCB**: 72 x 80 mm, a 4x4 grid of Choc switches with addressable
//!   LEDs, scanned by an MCP23017 I/O expander
//!
//! # Architecture
//!
//! Board construction is pure. Geometry, nets and footprints are assembled
//! into a validated [`board::BoardDocument`], which the [`kicad`] module
//! serialises. Files are only written once every document has rendered.
//!
//! # Modules
//!
//! - [`geometry`]: Points, rotation and board outlines
//! - [`nets`]: Net registry, pad assignments and LED daisy chains
//! - [`footprints`]: Footprint archetypes and component placement
//! - [`board`]: Board assembly, validation and connectivity checks
//! - [`kicad`]: `.kicad_pcb`, `.kicad_pro` and `fp-lib-table` output
//! - [`boards`]: The two MIXTEE boards and the generation pipeline
//! - [`config`]: Configuration loading, validation and its error type

pub mod board;
pub mod boards;
pub mod config;
pub mod footprints;
pub mod geometry;
pub mod kicad;
pub mod nets;
