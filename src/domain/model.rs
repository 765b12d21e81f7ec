//! Domain entities: the finger module set and XML element payloads

use std::fmt;

use clap::ValueEnum;

/// Namespace used by the xacro macro language.
pub const XACRO_NS: &str = "http://ros.org/wiki/xacro";

/// Attribute name carrying the module instance a node belongs to.
pub const PREFIX_ATTR: &str = "prefix";

/// Closed set of finger modules in the hand description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Little,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Little => "little",
        }
    }

    /// Prefix that marks a node as part of this finger's module subtree,
    /// e.g. `ring_module` matches `ring_module_1`, `ring_module_1_tip`, ...
    pub fn module_prefix(&self) -> String {
        format!("{}_module", self.label())
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Single XML attribute as written in the source, plus its resolved
/// namespace URI (resolved at parse time, `None` for unprefixed names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name exactly as written, e.g. `xacro:prefix`
    pub name: String,
    /// Resolved namespace URI, if the name is bound to one
    pub namespace: Option<String>,
    pub value: String,
}

impl Attribute {
    /// Name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }
}

/// XML element payload stored in the document arena.
///
/// Text handling follows the lxml model: `text` is content before the
/// first child, `tail` is content after this element's closing tag.
/// Keeping both un-trimmed lets surviving nodes round-trip byte-faithfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag qname as written, prefix included
    pub name: String,
    /// Attributes in source order
    pub attributes: Vec<Attribute>,
    pub text: Option<String>,
    pub tail: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attribute value by exact qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Module prefix attribute value.
    ///
    /// The xacro-namespaced `prefix` wins; the plain `prefix` is consulted
    /// only when no namespaced one exists. Absence is a normal case.
    pub fn module_prefix(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(XACRO_NS) && a.local_name() == PREFIX_ATTR)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find(|a| a.namespace.is_none() && a.name == PREFIX_ATTR)
            })
            .map(|a| a.value.as_str())
    }

    /// True when the module prefix marks this element as part of `finger`'s
    /// module.
    pub fn belongs_to(&self, finger: Finger) -> bool {
        self.module_prefix()
            .map(|p| p.starts_with(&finger.module_prefix()))
            .unwrap_or(false)
    }
}
