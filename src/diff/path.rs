//! Traversal paths and their canonical textual rendering.
//!
//! A [`Path`] records how the comparator got from the root of a value to a
//! differing node. Rendering follows Go-style selector notation:
//!
//! | step                      | renders as            |
//! |---------------------------|-----------------------|
//! | `MapKey("Dock")`          | `.Dock`               |
//! | `MapKey("com.apple.x")`   | `["com.apple.x"]`     |
//! | `SequenceIndex(3)`        | `[3]`                 |
//! | run of N `Indirection`    | `(***...)` around the rest of the path |
//! | `TypeNarrowing(_)`        | nothing               |
//!
//! An indirection run directly followed by a map key counts one level fewer
//! (key access dereferences implicitly), and a run at the very end of the
//! path renders nothing at all.

use crate::model::ValueKind;
use std::fmt;

/// One step of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    MapKey(String),
    SequenceIndex(usize),
    /// Following an optional or pointer-like layer
    Indirection,
    /// The node was inspected as this concrete kind; never rendered
    TypeNarrowing(ValueKind),
}

/// Ordered steps from the diff root to a node. Empty means the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    pub fn pop(&mut self) -> Option<PathStep> {
        self.steps.pop()
    }

    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Render the canonical location string.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Render a path; see the module docs for the grammar.
#[must_use]
pub fn render(path: &Path) -> String {
    path.render()
}

enum Segment<'a> {
    Key(&'a str),
    Index(usize),
    Close,
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Opening markers are written innermost-last; everything else in
        // traversal order after them.
        let mut prefixes: Vec<usize> = Vec::new();
        let mut segments: Vec<Segment<'_>> = Vec::with_capacity(self.steps.len());
        let mut indirections = 0usize;

        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Indirection => {
                    indirections += 1;
                    match self.steps.get(i + 1) {
                        Some(PathStep::Indirection) => continue,
                        Some(PathStep::MapKey(_)) => indirections -= 1,
                        None => indirections = 0,
                        Some(_) => {}
                    }
                    if indirections > 0 {
                        prefixes.push(indirections);
                        segments.push(Segment::Close);
                    }
                    indirections = 0;
                }
                PathStep::TypeNarrowing(_) => {}
                PathStep::MapKey(key) => segments.push(Segment::Key(key)),
                PathStep::SequenceIndex(idx) => segments.push(Segment::Index(*idx)),
            }
        }

        for depth in prefixes.iter().rev() {
            f.write_str("(")?;
            for _ in 0..*depth {
                f.write_str("*")?;
            }
        }
        for segment in &segments {
            match segment {
                Segment::Key(key) if is_plain_key(key) => write!(f, ".{key}")?,
                Segment::Key(key) => write!(f, "[{key:?}]")?,
                Segment::Index(idx) => write!(f, "[{idx}]")?,
                Segment::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

/// Keys that can be written after a `.` without ambiguity.
fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
