/*!
# IO

Utilities for reading and writing labelled graphs.

## Formats

- **SlotList** (read & write): a header `n m` followed by one line per live slot `i label`
  and one line per edge `i label j` with `j > i`. Reading restores the exact slot layout,
  including vacated slots. See [`slot_list`] for details.
- **Dot** (write only): the [DOT language](https://graphviz.org/doc/info/lang.html) of
  [GraphViz](https://graphviz.org/), with labels as node identifiers.

## Traits

To generalize over reading/writing:
- [`GraphReader`] and [`GraphWriter`] are implemented by readers and writers for a specific format.
- [`GraphRead`] and [`GraphWrite`] abstract over reading/writing using a given [`FileFormat`].
*/

pub mod dot;
pub mod header;
pub mod slot_list;

use std::{
    fmt::Display,
    fs::File,
    hash::Hash,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Result, Write},
    path::Path,
    str::FromStr,
};

use crate::prelude::*;

pub use dot::*;
pub use header::*;
pub use slot_list::*;

/// Identifier for a graph file format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// DOT language of GraphViz
    Dot,
    /// Slot-list dump format
    SlotList,
}

impl FromStr for FileFormat {
    type Err = std::io::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dot" => Ok(FileFormat::Dot),
            "slotlist" | "slot_list" => Ok(FileFormat::SlotList),
            _ => Err(io_error!(
                ErrorKind::InvalidInput,
                format!("Unknown FileFormat: {s}")
            )),
        }
    }
}

/// Trait for types that can read graphs in a specific format.
pub trait GraphReader<G> {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a graph in the expected format.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write graphs in a specific format.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails or the graph cannot be represented in the format.
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_graph(graph, BufWriter::new(File::create(path)?))
    }
}

/// Trait for reading graphs when only a [`FileFormat`] is known.
pub trait GraphRead: Sized {
    /// Reads a graph from the given reader according to the specified [`FileFormat`].
    ///
    /// # Errors
    /// Returns an error if the format cannot be read or the input does not match it.
    fn try_from_reader<R>(reader: R, format: FileFormat) -> Result<Self>
    where
        R: BufRead;

    /// Reads a graph from the given file according to the specified [`FileFormat`].
    fn try_from_file<P>(path: P, format: FileFormat) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::try_from_reader(BufReader::new(File::open(path)?), format)
    }
}

impl<T, Nbs> GraphRead for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone + FromStr,
    Nbs: Neighborhood,
{
    fn try_from_reader<R>(reader: R, format: FileFormat) -> Result<Self>
    where
        R: BufRead,
    {
        match format {
            FileFormat::SlotList => Self::try_read_slot_list(reader),
            _ => Err(io_error!(
                ErrorKind::InvalidInput,
                format!("{format:?} does not support GraphRead")
            )),
        }
    }
}

/// Trait for writing graphs when only a [`FileFormat`] is known.
pub trait GraphWrite {
    /// Writes the graph to the given writer according to the specified [`FileFormat`].
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_to_writer<W>(&self, writer: W, format: FileFormat) -> Result<()>
    where
        W: Write;

    /// Writes the graph to the given file according to the specified [`FileFormat`].
    fn try_write_to_file<P>(&self, path: P, format: FileFormat) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_to_writer(BufWriter::new(File::create(path)?), format)
    }
}

impl<T, Nbs> GraphWrite for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone + Display,
    Nbs: Neighborhood,
{
    fn try_write_to_writer<W>(&self, writer: W, format: FileFormat) -> Result<()>
    where
        W: Write,
    {
        match format {
            FileFormat::SlotList => self.try_write_slot_list(writer),
            FileFormat::Dot => self.try_write_dot(writer),
        }
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next value in an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let Some(next) = $iterator.next() else {
            return Err(io_error!(
                ErrorKind::InvalidData,
                format!("Premature end of line when parsing {}.", $name)
            ));
        };

        match next.parse() {
            Ok(value) => value,
            Err(_) => {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("Invalid value found. Cannot parse {}.", $name)
                ));
            }
        }
    }};
}

use io_error;
use parse_next_value;
use raise_error_unless;
