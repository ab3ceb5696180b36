//! Annotation usage targets.

use std::fmt;

/// The kind of declaration an annotation is permitted to decorate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Valid on any declaration kind.
    All,
    /// Valid on type declarations.
    Class,
    /// Valid on methods.
    Method,
    /// Valid on free functions.
    Function,
    /// Valid on properties.
    Property,
    /// Valid inside another annotation's argument list.
    Annotation,
}

impl Target {
    /// The full closed set of targets.
    pub const ALL_TARGETS: [Self; 6] = [
        Self::All,
        Self::Class,
        Self::Method,
        Self::Function,
        Self::Property,
        Self::Annotation,
    ];

    /// Returns the lowercase literal for this target.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Class => "class",
            Self::Method => "method",
            Self::Function => "function",
            Self::Property => "property",
            Self::Annotation => "annotation",
        }
    }

    /// Parses a target from its lowercase literal.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "class" => Some(Self::Class),
            "method" => Some(Self::Method),
            "function" => Some(Self::Function),
            "property" => Some(Self::Property),
            "annotation" => Some(Self::Annotation),
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
