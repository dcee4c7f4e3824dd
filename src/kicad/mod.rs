//! KiCad file emission.
//!
//! - [`sexpr`] - S-expression tree and renderer
//! - [`pcb`] - `.kicad_pcb` board document
//! - [`project`] - `.kicad_pro` project settings (JSON)
//! - [`lib_table`] - `fp-lib-table` footprint library table
//! - [`ids`] - element identifier sources

pub mod ids;
pub mod lib_table;
pub mod pcb;
pub mod project;
pub mod sexpr;

pub use ids::{IdSource, RandomIds, SequentialIds};
pub use lib_table::{emit_lib_table, FootprintLibrary};
pub use pcb::emit;
pub use project::{emit_project_settings, DesignRules, NetClass};
