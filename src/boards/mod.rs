//! The MIXTEE boards and the generation pipeline.
//!
//! Each board module exposes a `design()` function that builds its
//! [`BoardDesign`] from compile-time constants. [`generate`] renders all three
//! output documents into memory; [`write_outputs`] then writes them. Nothing
//! touches the filesystem until every document has rendered.

pub mod daughter_output;
pub mod key_pcb;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::board::{BoardDocument, BoardError, BoardResult};
use crate::kicad::{self, DesignRules, FootprintLibrary, IdSource};

/// Output file name of the footprint library table.
pub const LIB_TABLE_FILE: &str = "fp-lib-table";

/// The boards this crate knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    /// 80 x 20 mm jack board.
    DaughterOutput,
    /// 72 x 80 mm 4x4 keypad.
    KeyPcb,
}

impl BoardKind {
    /// Every board, in a fixed order.
    pub const ALL: [Self; 2] = [Self::DaughterOutput, Self::KeyPcb];

    /// Project name, used as the output file stem.
    #[must_use]
    pub const fn project_name(self) -> &'static str {
        match self {
            Self::DaughterOutput => daughter_output::PROJECT_NAME,
            Self::KeyPcb => key_pcb::PROJECT_NAME,
        }
    }

    /// Builds the board.
    ///
    /// # Errors
    ///
    /// Returns any validation error raised while assembling the board.
    pub fn design(self) -> BoardResult<BoardDesign> {
        match self {
            Self::DaughterOutput => daughter_output::design(),
            Self::KeyPcb => key_pcb::design(),
        }
    }
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.project_name())
    }
}

/// An assembled board plus the metadata needed to emit it.
#[derive(Debug, Clone)]
pub struct BoardDesign {
    /// Project name (output file stem).
    pub project_name: &'static str,
    /// Generator tag written to the board header.
    pub generator: &'static str,
    /// The assembled board.
    pub document: BoardDocument,
    /// Project-file design rules.
    pub rules: DesignRules,
}

impl BoardDesign {
    /// Board file name.
    #[must_use]
    pub fn pcb_file_name(&self) -> String {
        format!("{}.kicad_pcb", self.project_name)
    }

    /// Project file name.
    #[must_use]
    pub fn project_file_name(&self) -> String {
        format!("{}.kicad_pro", self.project_name)
    }

    /// Counts and findings for the console summary.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let doc = &self.document;
        let mut components: BTreeMap<String, usize> = BTreeMap::new();
        for placement in &doc.placements {
            let prefix: String = placement
                .reference
                .chars()
                .take_while(char::is_ascii_alphabetic)
                .collect();
            *components.entry(prefix).or_default() += 1;
        }
        let connectivity = doc.connectivity();

        Summary {
            project_name: self.project_name,
            width: doc.spec.width,
            height: doc.spec.height,
            components,
            named_nets: doc.nets.named_count(),
            pads: doc.pad_count(),
            unconnected_pads: connectivity.unconnected,
            dangling_nets: connectivity.dangling().map(|n| n.name.clone()).collect(),
        }
    }
}

/// Human-readable board statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Project name.
    pub project_name: &'static str,
    /// Board width (mm).
    pub width: f64,
    /// Board height (mm).
    pub height: f64,
    /// Component count per reference prefix.
    pub components: BTreeMap<String, usize>,
    /// Named nets (excluding net 0).
    pub named_nets: usize,
    /// Total pads.
    pub pads: usize,
    /// Electrical pads on net 0.
    pub unconnected_pads: usize,
    /// Named nets with fewer than two pads.
    pub dangling_nets: Vec<String>,
}

impl Summary {
    /// Total component count.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.values().sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board: {}", self.project_name)?;
        writeln!(f, "Dimensions: {} x {} mm", self.width, self.height)?;
        let breakdown: Vec<String> = self
            .components
            .iter()
            .map(|(prefix, n)| format!("{n} {prefix}"))
            .collect();
        writeln!(
            f,
            "Components: {} ({})",
            self.component_count(),
            breakdown.join(", ")
        )?;
        writeln!(
            f,
            "Nets: {} named ({} including unconnected)",
            self.named_nets,
            self.named_nets + 1
        )?;
        write!(
            f,
            "Pads: {} ({} unconnected)",
            self.pads, self.unconnected_pads
        )?;
        if !self.dangling_nets.is_empty() {
            write!(f, "\nSingle-pad nets: {}", self.dangling_nets.join(", "))?;
        }
        Ok(())
    }
}

/// A rendered output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// File name inside the output directory.
    pub file_name: String,
    /// Full file contents.
    pub contents: String,
}

/// Renders the board, project and library-table documents.
///
/// # Errors
///
/// Returns [`BoardError::Serialization`] if the project file cannot be
/// encoded.
pub fn generate(
    design: &BoardDesign,
    library: &FootprintLibrary,
    ids: &mut dyn IdSource,
) -> BoardResult<Vec<OutputFile>> {
    design.document.connectivity().log_findings();

    let pcb = kicad::emit(&design.document, design.generator, ids);
    let project_file = design.project_file_name();
    let project = kicad::emit_project_settings(&design.rules, &project_file)?;
    let table = kicad::emit_lib_table(std::slice::from_ref(library));

    Ok(vec![
        OutputFile {
            file_name: design.pcb_file_name(),
            contents: pcb,
        },
        OutputFile {
            file_name: project_file,
            contents: project,
        },
        OutputFile {
            file_name: LIB_TABLE_FILE.to_string(),
            contents: table,
        },
    ])
}

/// Writes rendered documents into `dir`, creating it if needed.
///
/// Stops at the first failure.
///
/// # Errors
///
/// Returns [`BoardError::FileWrite`] if the directory or a file cannot be
/// written.
pub fn write_outputs(files: &[OutputFile], dir: &Path) -> BoardResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| BoardError::file_write(dir, e))?;

    files
        .iter()
        .map(|file| {
            let path = dir.join(&file.file_name);
            std::fs::write(&path, &file.contents)
                .map_err(|e| BoardError::file_write(&path, e))?;
            tracing::info!(path = %path.display(), bytes = file.contents.len(), "Wrote file");
            Ok(path)
        })
        .collect()
}
