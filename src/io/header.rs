//! # Headers
//!
//! A header(-line) for a graph file is defined by a series of whitespace separated tokens
//! stating the size of the graph and optionally some fixed markers.
//!
//! The slot-list format defaults to the plain header `"{n} {m}"` where `n` is the size of the
//! slot table and `m` the number of edges.

use itertools::Itertools;
use smallvec::{SmallVec, smallvec};

use super::*;

/// Defining a single token in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderToken {
    /// Ignore entry
    Any,
    /// Match entry to str
    Str(String),
    /// Parse number of slots
    NumSlots,
    /// Parse number of edges
    NumEdges,
    /// Ensure that there are no more entries
    End,
    /// Ignore all further entries
    Rest,
}

impl HeaderToken {
    /// When writing a header, this is the representation for HeaderToken::Any
    fn any_string() -> String {
        "0".to_string()
    }
}

/// Defines the complete format of the header.
///
/// Use the Builder-Pattern to define the format. A header in the style of the DIMACS/Pace
/// formats can be defined via
/// ```
/// use lgraphs::io::Header;
///
/// let format = Header::builder()
///     .str("p").str("ladder").number_of_slots().number_of_edges().end();
/// assert_eq!(format.parse_header("p ladder 5 4").unwrap(), (5, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFormat<
    // Set to *true* if the position for number of slots was set
    const SLOTS_SET: bool = false,
    // Set to *true* if the position for number of edges was set
    const EDGES_SET: bool = false,
    // Set to *true* if `SLOTS_SET = true & EDGES_SET = true` and
    // the last entry matches `HeaderToken::End | HeaderToken::Rest`
    const END: bool = false,
>(SmallVec<[HeaderToken; 6]>);

/// A header is defined as a format that satisfies all prerequisites.
pub type Header = HeaderFormat<true, true, true>;

impl Default for HeaderFormat<true, true, true> {
    /// The plain `"{n} {m}"` header
    fn default() -> Self {
        Self(smallvec![
            HeaderToken::NumSlots,
            HeaderToken::NumEdges,
            HeaderToken::End,
        ])
    }
}

impl Header {
    /// Starts a new empty format
    pub fn builder() -> HeaderFormat<false, false, false> {
        HeaderFormat(smallvec![])
    }

    /// Creates a new HeaderFormat in the Pace-Style `p {problem} {n} {m}`
    pub fn new_problem<S: Into<String>>(problem: S) -> Self {
        Self(smallvec![
            HeaderToken::Str("p".to_string()),
            HeaderToken::Str(problem.into()),
            HeaderToken::NumSlots,
            HeaderToken::NumEdges,
            HeaderToken::End,
        ])
    }

    /// Tries to parse a header line and extract the number of slots and edges.
    pub fn parse_header(&self, line: &str) -> Result<(usize, NumEdges)> {
        let mut number_of_slots = 0;
        let mut number_of_edges = 0;

        let mut parts = line.split_whitespace();

        for token in &self.0 {
            match token {
                HeaderToken::Any => {
                    raise_error_unless!(
                        parts.next().is_some(),
                        ErrorKind::InvalidData,
                        "Header is shorter than expected"
                    );
                }
                HeaderToken::Str(p) => {
                    raise_error_unless!(
                        parts.next() == Some(p.as_str()),
                        ErrorKind::InvalidData,
                        "Invalid header found"
                    );
                }
                HeaderToken::NumSlots => {
                    number_of_slots = parse_next_value!(parts, "Header>Number of slots");
                }
                HeaderToken::NumEdges => {
                    number_of_edges = parse_next_value!(parts, "Header>Number of edges");
                }
                // We don't care about the rest
                HeaderToken::Rest => break,
                HeaderToken::End => {
                    raise_error_unless!(
                        parts.next().is_none(),
                        ErrorKind::InvalidData,
                        "Header is longer than expected"
                    );
                }
            }
        }

        Ok((number_of_slots, number_of_edges))
    }

    /// Writes the header for a graph with `n` slots and `m` edges
    pub fn write_header<W: Write>(&self, writer: &mut W, n: usize, m: NumEdges) -> Result<()> {
        let header_str = self
            .0
            .iter()
            .filter_map(|token| match token {
                HeaderToken::Any => Some(HeaderToken::any_string()),
                HeaderToken::Str(s) => Some(s.to_string()),
                HeaderToken::NumSlots => Some(n.to_string()),
                HeaderToken::NumEdges => Some(m.to_string()),
                HeaderToken::End | HeaderToken::Rest => None,
            })
            .collect_vec();
        writeln!(writer, "{}", header_str.join(" "))?;

        Ok(())
    }
}

impl<const SLOTS_SET: bool, const EDGES_SET: bool> HeaderFormat<SLOTS_SET, EDGES_SET, false> {
    /// Pushes a token that can be ignored onto the stack
    pub fn any(mut self) -> Self {
        self.0.push(HeaderToken::Any);
        self
    }

    /// Pushes a token that should match a string onto the stack
    pub fn str<S: Into<String>>(mut self, s: S) -> Self {
        self.0.push(HeaderToken::Str(s.into()));
        self
    }
}

impl<const EDGES_SET: bool> HeaderFormat<false, EDGES_SET, false> {
    /// Adds the number of slots token onto the stack
    pub fn number_of_slots(mut self) -> HeaderFormat<true, EDGES_SET, false> {
        self.0.push(HeaderToken::NumSlots);
        HeaderFormat(self.0)
    }
}

impl<const SLOTS_SET: bool> HeaderFormat<SLOTS_SET, false, false> {
    /// Adds the number of edges token onto the stack
    pub fn number_of_edges(mut self) -> HeaderFormat<SLOTS_SET, true, false> {
        self.0.push(HeaderToken::NumEdges);
        HeaderFormat(self.0)
    }
}

impl HeaderFormat<true, true, false> {
    /// Marks the header as finished ensuring that no further tokens follow
    pub fn end(mut self) -> HeaderFormat<true, true, true> {
        self.0.push(HeaderToken::End);
        HeaderFormat(self.0)
    }

    /// Marks the header as finished ignoring all further tokens
    pub fn ignore_rest(mut self) -> HeaderFormat<true, true, true> {
        self.0.push(HeaderToken::Rest);
        HeaderFormat(self.0)
    }
}
