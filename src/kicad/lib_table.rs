//! `fp-lib-table` project footprint-library table.

use crate::kicad::sexpr::Node;

/// Table format version.
const TABLE_VERSION: f64 = 7.0;

/// One footprint library entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootprintLibrary {
    /// Nickname used in `lib:footprint` identifiers.
    pub name: String,
    /// Library directory, usually relative to `${KIPRJMOD}`.
    pub uri: String,
}

impl FootprintLibrary {
    /// Creates a library entry.
    #[must_use]
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
        }
    }
}

/// Renders a table listing `libraries`.
#[must_use]
pub fn emit_lib_table(libraries: &[FootprintLibrary]) -> String {
    Node::block("fp_lib_table")
        .child(Node::new("version").number(TABLE_VERSION))
        .children(libraries.iter().map(|lib| {
            Node::new("lib")
                .child(Node::new("name").text(&lib.name))
                .child(Node::new("type").text("KiCad"))
                .child(Node::new("uri").text(&lib.uri))
                .child(Node::new("options").text(""))
                .child(Node::new("descr").text(""))
        }))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_library_table() {
        let lib = FootprintLibrary::new(
            "mixtee-footprints",
            "${KIPRJMOD}/../lib/mixtee-footprints.pretty",
        );
        assert_eq!(
            emit_lib_table(&[lib]),
            "(fp_lib_table\n  (version 7)\n  (lib (name \"mixtee-footprints\") (type \"KiCad\") \
             (uri \"${KIPRJMOD}/../lib/mixtee-footprints.pretty\") (options \"\") (descr \"\"))\n)\n"
        );
    }
}
