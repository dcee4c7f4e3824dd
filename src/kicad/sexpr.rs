//! S-expression document tree.
//!
//! Emitters build a [`Node`] tree first and render it in a separate pass.
//! A node is either *inline* (everything on one line) or a *block* (each
//! child list on its own indented line, closing paren on its own line):
//!
//! ```text
//! (footprint "Diode_SMD:D_SOD-323"
//!   (layer "F.Cu")
//!   (at 12 5.5 0)
//! )
//! ```

/// Number of spaces per nesting level.
const INDENT: usize = 2;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// Bare token (`smd`, `yes`, `0x00010fc_ffffffff`).
    Symbol(String),
    /// Quoted string.
    Text(String),
    /// Decimal number, rendered with [`format_number`].
    Number(f64),
}

impl Atom {
    fn render(&self, out: &mut String) {
        match self {
            Self::Symbol(s) => out.push_str(s),
            Self::Text(s) => out.push_str(&quote(s)),
            Self::Number(n) => out.push_str(&format_number(*n)),
        }
    }
}

/// One element of a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Leaf value.
    Atom(Atom),
    /// Nested list.
    List(Node),
}

/// A named list `(name item...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    items: Vec<Item>,
    block: bool,
}

impl Node {
    /// Creates an inline node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            block: false,
        }
    }

    /// Creates a block node.
    #[must_use]
    pub fn block(name: impl Into<String>) -> Self {
        Self {
            block: true,
            ..Self::new(name)
        }
    }

    /// Appends a bare symbol.
    #[must_use]
    pub fn symbol(mut self, s: impl Into<String>) -> Self {
        self.items.push(Item::Atom(Atom::Symbol(s.into())));
        self
    }

    /// Appends a quoted string.
    #[must_use]
    pub fn text(mut self, s: impl Into<String>) -> Self {
        self.items.push(Item::Atom(Atom::Text(s.into())));
        self
    }

    /// Appends a number.
    #[must_use]
    pub fn number(mut self, n: f64) -> Self {
        self.items.push(Item::Atom(Atom::Number(n)));
        self
    }

    /// Appends a child list.
    #[must_use]
    pub fn child(mut self, node: Self) -> Self {
        self.push(node);
        self
    }

    /// Appends several child lists.
    #[must_use]
    pub fn children(mut self, nodes: impl IntoIterator<Item = Self>) -> Self {
        self.items.extend(nodes.into_iter().map(Item::List));
        self
    }

    /// Appends a child list in place.
    pub fn push(&mut self, node: Self) {
        self.items.push(Item::List(node));
    }

    /// List name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child lists in order.
    pub fn nodes(&self) -> impl Iterator<Item = &Self> {
        self.items.iter().filter_map(|item| match item {
            Item::List(node) => Some(node),
            Item::Atom(_) => None,
        })
    }

    /// Leaf values in order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.items.iter().filter_map(|item| match item {
            Item::Atom(atom) => Some(atom),
            Item::List(_) => None,
        })
    }

    /// First child list called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        self.nodes().find(|n| n.name == name)
    }

    /// Every child list called `name`.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.nodes().filter(move |n| n.name == name)
    }

    /// Renders the tree, terminated by a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out.push('\n');
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push('(');
        out.push_str(&self.name);

        if !self.block {
            for item in &self.items {
                out.push(' ');
                match item {
                    Item::Atom(atom) => atom.render(out),
                    Item::List(node) => node.render_into(out, depth),
                }
            }
            out.push(')');
            return;
        }

        let pad = " ".repeat((depth + 1) * INDENT);
        let mut broke_line = false;
        for item in &self.items {
            match item {
                Item::Atom(atom) if !broke_line => {
                    out.push(' ');
                    atom.render(out);
                }
                Item::Atom(atom) => {
                    out.push('\n');
                    out.push_str(&pad);
                    atom.render(out);
                }
                Item::List(node) => {
                    out.push('\n');
                    out.push_str(&pad);
                    node.render_into(out, depth + 1);
                    broke_line = true;
                }
            }
        }
        out.push('\n');
        out.push_str(&" ".repeat(depth * INDENT));
        out.push(')');
    }
}

/// Formats a coordinate: at most four decimals, no trailing zeros, no `-0`.
///
/// ```
/// use mixtee_pcb::kicad::sexpr::format_number;
///
/// assert_eq!(format_number(2.0), "2");
/// assert_eq!(format_number(0.29289321881), "0.2929");
/// assert_eq!(format_number(-0.00001), "0");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Quotes and escapes a string.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
