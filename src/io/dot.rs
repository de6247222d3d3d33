//! # Dot
//!
//! The Dot-Format is a very extensive format used by [GraphViz](https://graphviz.org/) to allow
//! for detailed visualizations. We only use basic functionality to draw (colored) vertices and
//! edges. Vertices are identified by their quoted labels, so every label type implementing
//! [`Display`] can be drawn.
//!
//! For example, drawing a graph where a shortest path from `"A"` to `"D"` is highlighted in red
//! can be achieved via
//! ```
//! use lgraphs::{prelude::*, io::*};
//!
//! let graph: LabelledGraph<&str> = [("A", "B"), ("B", "C"), ("C", "D"), ("A", "E")]
//!     .into_iter()
//!     .collect();
//! let path = graph.full_path(&"A", &"D").unwrap().unwrap();
//!
//! let mut out = Vec::new();
//! DotWriter::new()
//!     .highlight_color(DotColor::Red)
//!     .try_write_graph_with_path(&graph, &path, &mut out)
//!     .unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("\"A\"--\"B\"[color=red];"));
//! ```
//!
//! Note that for vertices, the latest coloring is the one that will be applied in a visualizer,
//! whereas for edges, each new colored edge adds another edge to the graph. The writer therefore
//! leaves highlighted edges out of the uncolored edge list.
use std::{fmt::Display, io::Write};

use fxhash::FxHashSet;
use itertools::Itertools;

use super::*;

/// A writer for the Dot-Format
#[derive(Debug, Clone)]
pub struct DotWriter {
    /// Color used for highlighted vertices and edges
    highlight: DotColor,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self {
            highlight: DotColor::Red,
        }
    }
}

impl DotWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the color used by [`DotWriter::try_write_graph_with_path`] (red by default)
    pub fn highlight_color(mut self, color: DotColor) -> Self {
        self.highlight = color;
        self
    }

    /// Writes the opening brackets of the graph
    pub fn start_graph<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "graph {{")
    }

    /// Formats a label as a quoted DOT identifier
    fn format_vertex<T: Display>(&self, label: &T) -> String {
        let mut quoted = String::from("\"");
        for c in label.to_string().chars() {
            match c {
                '"' => quoted.push_str("\\\""),
                '\\' => quoted.push_str("\\\\"),
                '\n' => quoted.push_str("\\n"),
                c => quoted.push(c),
            }
        }
        quoted.push('"');
        quoted
    }

    /// Writes a list of (optionally colored) vertices to `writer`
    pub fn write_vertices<'a, W, T, I>(
        &self,
        writer: &mut W,
        vertices: I,
        color: Option<DotColor>,
    ) -> Result<()>
    where
        W: Write,
        T: Display + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let style = if let Some(c) = color {
            &format!("[style=filled, color={c}]")
        } else {
            ""
        };

        for label in vertices {
            write!(writer, "{}{style};", self.format_vertex(label))?;
        }
        writeln!(writer)
    }

    /// Writes an iterator of edges to `writer`, colored if `color` is given
    pub fn write_edges<'a, W, T, I>(
        &self,
        writer: &mut W,
        edges: I,
        color: Option<DotColor>,
    ) -> Result<()>
    where
        W: Write,
        T: Display + 'a,
        I: IntoIterator<Item = (&'a T, &'a T)>,
    {
        let edge_color = if let Some(c) = color {
            &format!("[color={c}]")
        } else {
            ""
        };

        for (u, v) in edges {
            write!(
                writer,
                "{}--{}{edge_color};",
                self.format_vertex(u),
                self.format_vertex(v)
            )?;
        }
        writeln!(writer)
    }

    /// Closes the Dot-Graph, thus finishing the graph
    pub fn finish_graph<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "}}")
    }

    /// Writes the whole graph and highlights a walk through it.
    ///
    /// `path` is a sequence of labels as returned by
    /// [`LabelledGraph::full_path`](crate::repr::LabelledGraph::full_path). Its vertices and all
    /// consecutive pairs that are edges of `graph` are drawn in the highlight color.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::InvalidInput`] if `path` contains a label that is not a vertex.
    pub fn try_write_graph_with_path<T, Nbs, W>(
        &self,
        graph: &LabelledGraph<T, Nbs>,
        path: &[T],
        mut writer: W,
    ) -> Result<()>
    where
        T: Eq + Hash + Clone + Display,
        Nbs: Neighborhood,
        W: Write,
    {
        let mut on_path: FxHashSet<SlotEdge> = FxHashSet::default();
        let mut path_slots = Vec::with_capacity(path.len());
        for label in path {
            let slot = graph.slot_of(label).ok_or(io_error!(
                ErrorKind::InvalidInput,
                format!("Path vertex {label} is not part of the graph")
            ))?;
            path_slots.push(slot);
        }
        for (&u, &v) in path_slots.iter().tuple_windows() {
            if graph.has_edge(u, v) {
                on_path.insert(SlotEdge(u, v).normalized());
            }
        }

        self.start_graph(&mut writer)?;
        self.write_vertices(&mut writer, graph.vertices(), None)?;
        self.write_edges(
            &mut writer,
            graph
                .edges(true)
                .filter(|e| !on_path.contains(e))
                .map(|SlotEdge(u, v)| (graph.label(u), graph.label(v))),
            None,
        )?;
        self.write_vertices(&mut writer, path, Some(self.highlight))?;
        self.write_edges(
            &mut writer,
            on_path
                .iter()
                .sorted_unstable()
                .map(|&SlotEdge(u, v)| (graph.label(u), graph.label(v))),
            Some(self.highlight),
        )?;
        self.finish_graph(&mut writer)
    }
}

impl<T, Nbs> GraphWriter<LabelledGraph<T, Nbs>> for DotWriter
where
    T: Eq + Hash + Clone + Display,
    Nbs: Neighborhood,
{
    fn try_write_graph<W>(&self, graph: &LabelledGraph<T, Nbs>, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        self.start_graph(&mut writer)?;
        self.write_vertices(&mut writer, graph.vertices(), None)?;
        self.write_edges(&mut writer, graph.edge_values(), None)?;
        self.finish_graph(&mut writer)
    }
}

/// Trait for writing a graph to a writer in the Dot-Format.
/// Shorthand for default settings.
pub trait DotWrite {
    /// Tries to write the graph to a writer
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write;

    /// Tries to write the graph to a file
    fn try_write_dot_file<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_dot(writer)
    }
}

impl<T, Nbs> DotWrite for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone + Display,
    Nbs: Neighborhood,
{
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        DotWriter::default().try_write_graph(self, writer)
    }
}

impl Display for DotColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

/// A selection of the colors permitted in Svg-Dot, see
/// `https://graphviz.gitlab.io/doc/info/colors.html#svg`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DotColor {
    Black,
    Blue,
    Gray,
    Green,
    Orange,
    Purple,
    Red,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_plain_graph() {
        let mut graph = LabelledGraph::new();
        graph.add_edge("A", "B").unwrap();
        graph.add_edge("B", "C").unwrap();
        graph.add_vertex("D").unwrap();

        let mut out = Vec::new();
        graph.try_write_dot(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "graph {\n\"A\";\"B\";\"C\";\"D\";\n\"A\"--\"B\";\"B\"--\"C\";\n}\n"
        );
    }

    #[test]
    fn labels_are_escaped() {
        let writer = DotWriter::new();
        assert_eq!(writer.format_vertex(&"say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(writer.format_vertex(&"a\\b"), "\"a\\\\b\"");
        assert_eq!(writer.format_vertex(&42), "\"42\"");
    }

    #[test]
    fn highlighted_path() {
        let graph: LabelledGraph<u32> = [(1, 2), (2, 3), (1, 4)].into_iter().collect();

        let mut out = Vec::new();
        DotWriter::new()
            .highlight_color(DotColor::Blue)
            .try_write_graph_with_path(&graph, &[1, 2, 3], &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "graph {\n\
             \"1\";\"2\";\"3\";\"4\";\n\
             \"1\"--\"4\";\n\
             \"1\"[style=filled, color=blue];\"2\"[style=filled, color=blue];\"3\"[style=filled, color=blue];\n\
             \"1\"--\"2\"[color=blue];\"2\"--\"3\"[color=blue];\n\
             }\n"
        );
    }

    #[test]
    fn highlighted_path_with_unknown_vertex() {
        let graph: LabelledGraph<u32> = [(1, 2)].into_iter().collect();
        let err = DotWriter::new()
            .try_write_graph_with_path(&graph, &[1, 5], Vec::<u8>::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
