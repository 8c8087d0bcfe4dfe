//! Positioned fragments of generated text
//!
//! A [`Fragment`] is a list of chunks, either literal text or nested fragments, optionally
//! tagged with the source position of the AST node that produced it. Fragments nest the same
//! way the AST does. [`Fragment::flatten`] concatenates the text and records where each
//! positioned piece landed in the output.
//!
//! Mappings are recorded:
//!
//! - whenever text from a different fragment than the previous text starts (a fragment
//!   boundary),
//! - at the start of every new generated line inside positioned text,
//! - as a generated-only entry when unpositioned text follows positioned text, closing the
//!   previous mapping.

use serde::Serialize;

use crate::sqlfluent::ast::range::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Text(String),
    Fragment(Fragment),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    origin: Option<Position>,
    chunks: Vec<Chunk>,
}

/// A generated position and the source position it came from, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mapping {
    pub generated: Position,
    pub original: Option<Position>,
}

/// Output of [`Fragment::flatten`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlatOutput {
    pub text: String,
    pub mappings: Vec<Mapping>,
}

impl Fragment {
    /// A fragment produced by the node starting at `origin`
    pub fn new(origin: Position) -> Self {
        Self {
            origin: Some(origin),
            chunks: Vec::new(),
        }
    }

    /// A fragment that maps to no source position
    pub fn unpositioned() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn child(mut self, fragment: Fragment) -> Self {
        self.push(fragment);
        self
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.chunks.push(Chunk::Text(text.into()));
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.chunks.push(Chunk::Fragment(fragment));
    }

    /// True when no text is produced by this fragment or any fragment below it
    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|chunk| match chunk {
            Chunk::Text(text) => text.is_empty(),
            Chunk::Fragment(fragment) => fragment.is_empty(),
        })
    }

    /// Concatenated text, without mappings
    pub fn to_text(&self) -> String {
        self.flatten().text
    }

    pub fn flatten(&self) -> FlatOutput {
        let mut flattener = Flattener::default();
        flattener.walk(self);
        FlatOutput {
            text: flattener.text,
            mappings: flattener.mappings,
        }
    }
}

#[derive(Default)]
struct Flattener {
    text: String,
    line: usize,
    column: usize,
    mappings: Vec<Mapping>,
    next_id: usize,
    /// Fragment id of the previous text chunk, cleared after a line break
    last_fragment: Option<usize>,
    mapping_active: bool,
}

impl Flattener {
    fn walk(&mut self, fragment: &Fragment) {
        let id = self.next_id;
        self.next_id += 1;

        for chunk in &fragment.chunks {
            match chunk {
                Chunk::Text(text) => self.emit(id, fragment.origin, text),
                Chunk::Fragment(child) => self.walk(child),
            }
        }
    }

    fn generated(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn record(&mut self, original: Option<Position>) {
        let mapping = Mapping {
            generated: self.generated(),
            original,
        };
        match self.mappings.last_mut() {
            Some(last) if last.generated == mapping.generated => *last = mapping,
            _ => self.mappings.push(mapping),
        }
        self.mapping_active = original.is_some();
    }

    fn emit(&mut self, id: usize, origin: Option<Position>, text: &str) {
        if text.is_empty() {
            return;
        }

        if self.last_fragment != Some(id) {
            match origin {
                Some(_) => self.record(origin),
                None if self.mapping_active => self.record(None),
                None => {}
            }
        }
        self.last_fragment = Some(id);

        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            self.text.push(ch);
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
                if chars.peek().is_none() {
                    self.last_fragment = None;
                    self.mapping_active = false;
                } else if origin.is_some() {
                    self.record(origin);
                }
            } else {
                self.column += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_concatenation() {
        let fragment = Fragment::new(Position::new(0, 0))
            .text("a")
            .child(Fragment::new(Position::new(0, 5)).text("b"))
            .text("c");
        assert_eq!(fragment.to_text(), "abc");
    }

    #[test]
    fn test_mapping_at_each_boundary() {
        let fragment = Fragment::new(Position::new(0, 0))
            .text("ab")
            .child(Fragment::new(Position::new(0, 9)).text("cd"))
            .text("ef");
        let mappings = fragment.flatten().mappings;
        assert_eq!(
            mappings,
            vec![
                Mapping {
                    generated: Position::new(0, 0),
                    original: Some(Position::new(0, 0)),
                },
                Mapping {
                    generated: Position::new(0, 2),
                    original: Some(Position::new(0, 9)),
                },
                Mapping {
                    generated: Position::new(0, 4),
                    original: Some(Position::new(0, 0)),
                },
            ]
        );
    }

    #[test]
    fn test_mapping_at_new_lines() {
        let fragment = Fragment::new(Position::new(2, 3)).text("one\ntwo\n").text("three");
        let generated: Vec<Position> = fragment
            .flatten()
            .mappings
            .iter()
            .map(|mapping| mapping.generated)
            .collect();
        assert_eq!(
            generated,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_unpositioned_text_closes_mapping() {
        let fragment = Fragment::unpositioned()
            .text("head ")
            .child(Fragment::new(Position::new(1, 0)).text("x"))
            .text(" tail");
        let mappings = fragment.flatten().mappings;
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].original, Some(Position::new(1, 0)));
        assert_eq!(mappings[0].generated, Position::new(0, 5));
        assert_eq!(mappings[1].original, None);
        assert_eq!(mappings[1].generated, Position::new(0, 6));
    }

    #[test]
    fn test_empty_fragments_produce_nothing() {
        let fragment = Fragment::new(Position::new(0, 0)).child(Fragment::new(Position::new(1, 1)));
        assert!(fragment.is_empty());
        let output = fragment.flatten();
        assert!(output.text.is_empty());
        assert!(output.mappings.is_empty());
    }
}
