//! `.kicad_pro` project settings.
//!
//! The project file is descriptive metadata for the CAD tool: drawing
//! defaults, minimum design rules and net classes. Nothing in this crate
//! reads it back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::error::BoardResult;

/// Drawing defaults (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignDefaults {
    /// Edge.Cuts stroke.
    pub board_outline_line_width: f64,
    /// Copper graphic stroke.
    pub copper_line_width: f64,
    /// Copper text width.
    pub copper_text_size_h: f64,
    /// Copper text height.
    pub copper_text_size_v: f64,
    /// Copper text stroke.
    pub copper_text_thickness: f64,
    /// Stroke on the remaining layers.
    pub other_line_width: f64,
    /// Silkscreen stroke.
    pub silk_line_width: f64,
    /// Silkscreen text width.
    pub silk_text_size_h: f64,
    /// Silkscreen text height.
    pub silk_text_size_v: f64,
    /// Silkscreen text stroke.
    pub silk_text_thickness: f64,
}

impl Default for DesignDefaults {
    fn default() -> Self {
        Self {
            board_outline_line_width: 0.05,
            copper_line_width: 0.2,
            copper_text_size_h: 1.5,
            copper_text_size_v: 1.5,
            copper_text_thickness: 0.3,
            other_line_width: 0.1,
            silk_line_width: 0.12,
            silk_text_size_h: 1.0,
            silk_text_size_v: 1.0,
            silk_text_thickness: 0.15,
        }
    }
}

/// Minimum manufacturable dimensions (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleMinimums {
    /// Copper to copper.
    pub min_clearance: f64,
    /// Narrowest track.
    pub min_track_width: f64,
    /// Narrowest via ring.
    pub min_via_annular_width: f64,
    /// Smallest via.
    pub min_via_diameter: f64,
}

impl Default for RuleMinimums {
    fn default() -> Self {
        Self {
            min_clearance: 0.15,
            min_track_width: 0.15,
            min_via_annular_width: 0.15,
            min_via_diameter: 0.6,
        }
    }
}

/// A named net class with routing defaults (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetClass {
    /// Class name shown in the board setup.
    pub name: String,
    /// Clearance to other nets.
    pub clearance: f64,
    /// Default track width.
    pub track_width: f64,
    /// Default via pad diameter.
    pub via_diameter: f64,
    /// Default via drill.
    pub via_drill: f64,
}

impl NetClass {
    /// Creates a net class.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        clearance: f64,
        track_width: f64,
        via_diameter: f64,
        via_drill: f64,
    ) -> Self {
        Self {
            name: name.into(),
            clearance,
            track_width,
            via_diameter,
            via_drill,
        }
    }

    /// The catch-all class.
    #[must_use]
    pub fn default_class() -> Self {
        Self::new("Default", 0.2, 0.25, 0.6, 0.3)
    }

    /// Supply rails.
    #[must_use]
    pub fn power() -> Self {
        Self::new("Power", 0.2, 0.5, 0.8, 0.4)
    }
}

/// Everything the project file carries for one board.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignRules {
    /// Drawing defaults.
    pub defaults: DesignDefaults,
    /// Rule minimums.
    pub rules: RuleMinimums,
    /// Net classes in file order.
    pub net_classes: Vec<NetClass>,
}

impl Default for DesignRules {
    fn default() -> Self {
        Self {
            defaults: DesignDefaults::default(),
            rules: RuleMinimums::default(),
            net_classes: vec![NetClass::default_class(), NetClass::power()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProjectFile {
    board: BoardSection,
    meta: Meta,
    net_settings: NetSettings,
    schematic: SchematicSection,
    sheets: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BoardSection {
    design_settings: DesignSettings,
    layer_presets: Vec<serde_json::Value>,
    layer_pairs: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DesignSettings {
    defaults: DesignDefaults,
    rules: RuleMinimums,
}

#[derive(Debug, Serialize, Deserialize)]
struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct NetSettings {
    classes: Vec<NetClass>,
    net_colors: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SchematicSection {
    drawing: serde_json::Map<String, serde_json::Value>,
    meta: Meta,
}

/// Renders the project file for `filename` (e.g. `board.kicad_pro`).
///
/// # Errors
///
/// Returns [`crate::board::BoardError::Serialization`] if JSON encoding fails.
pub fn emit_project_settings(rules: &DesignRules, filename: &str) -> BoardResult<String> {
    let file = ProjectFile {
        board: BoardSection {
            design_settings: DesignSettings {
                defaults: rules.defaults,
                rules: rules.rules,
            },
            layer_presets: Vec::new(),
            layer_pairs: Vec::new(),
        },
        meta: Meta {
            filename: Some(filename.to_string()),
            version: 1,
        },
        net_settings: NetSettings {
            classes: rules.net_classes.clone(),
            net_colors: BTreeMap::new(),
        },
        schematic: SchematicSection {
            drawing: serde_json::Map::new(),
            meta: Meta {
                filename: None,
                version: 1,
            },
        },
        sheets: Vec::new(),
    };
    let mut text = serde_json::to_string_pretty(&file)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_structure() {
        let mut rules = DesignRules::default();
        rules
            .net_classes
            .insert(1, NetClass::new("Audio_Analog", 0.25, 0.3, 0.6, 0.3));
        let text = emit_project_settings(&rules, "board.kicad_pro").unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["meta"]["filename"], "board.kicad_pro");
        assert_eq!(json["meta"]["version"], 1);
        assert_eq!(json["schematic"]["meta"]["version"], 1);
        assert!(json["schematic"]["meta"].get("filename").is_none());
        assert_eq!(
            json["board"]["design_settings"]["defaults"]["board_outline_line_width"],
            0.05
        );
        assert_eq!(json["board"]["design_settings"]["rules"]["min_via_diameter"], 0.6);
        let names: Vec<_> = json["net_settings"]["classes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Default", "Audio_Analog", "Power"]);
        assert!(json["sheets"].as_array().unwrap().is_empty());
    }

    #[test]
    fn project_output_is_stable() {
        let rules = DesignRules::default();
        assert_eq!(
            emit_project_settings(&rules, "a.kicad_pro").unwrap(),
            emit_project_settings(&rules, "a.kicad_pro").unwrap()
        );
    }
}
