//! Module containing functionality related to BSON regular expressions.

use std::fmt;

/// An uninterpreted BSON regular expression: a pattern plus flag characters.
///
/// Compiling this into a host regex engine is a convenience layered on top of
/// the wire contract and is out of scope for this codec; decode always
/// produces this raw form.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Regex {
    /// The regular expression pattern.
    pub pattern: String,

    /// Flag characters, in the canonical alphabetical order `i l m s u x`.
    pub options: String,
}

impl Regex {
    /// Constructs a new `Regex` from a pattern and flag string. The flag
    /// string is not reordered or validated here; [`crate::encoder`] emits
    /// the canonical flag set via [`RegexFlags`] when building one from
    /// scratch.
    pub fn new(pattern: impl Into<String>, options: impl Into<String>) -> Self {
        Regex {
            pattern: pattern.into(),
            options: options.into(),
        }
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.options)
    }
}

/// The canonical flag set a BSON regex may carry, in the fixed wire order
/// `i l m s u x`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct RegexFlags {
    pub ignore_case: bool,
    pub locale: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub verbose: bool,
}

impl RegexFlags {
    /// Renders this flag set into the canonical on-wire string.
    pub fn to_options_string(self) -> String {
        let mut s = String::new();
        if self.ignore_case {
            s.push('i');
        }
        if self.locale {
            s.push('l');
        }
        if self.multiline {
            s.push('m');
        }
        if self.dot_all {
            s.push('s');
        }
        if self.unicode {
            s.push('u');
        }
        if self.verbose {
            s.push('x');
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_render_in_canonical_order() {
        let flags = RegexFlags {
            ignore_case: true,
            multiline: true,
            ..Default::default()
        };
        assert_eq!(flags.to_options_string(), "im");
    }

    #[test]
    fn all_flags_render_in_canonical_order() {
        let flags = RegexFlags {
            ignore_case: true,
            locale: true,
            multiline: true,
            dot_all: true,
            unicode: true,
            verbose: true,
        };
        assert_eq!(flags.to_options_string(), "ilmsux");
    }
}
