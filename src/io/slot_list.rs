//! # SlotList
//!
//! The SlotList-Format dumps a [`LabelledGraph`] together with its slot layout:
//! ```text
//! {n} {m}
//! {i} {label_i}
//! {i} {label_i} {j}
//! {k}
//! ...
//! ```
//! The header states the size `n` of the slot table (vacated slots included) and the number `m`
//! of edges. Then, for every slot in ascending order, there is either
//! - a vertex line `i label_i` followed by one edge line `i label_i j` for every neighbor
//!   `j > i` in neighborhood order, if slot `i` is live, or
//! - a single line `k` if slot `k` is vacated.
//!
//! Labels are written via [`Display`] and read via [`FromStr`]. A label that renders empty or
//! contains whitespace cannot be written. Reading restores every label at its slot and requires
//! each of the `n` slots to be declared, so the size of the result is bounded by the input.

use std::{
    collections::hash_map::Entry,
    fmt::Display,
    fs::File,
    hash::Hash,
    io::{BufRead, BufWriter, ErrorKind, Write},
    path::Path,
};

use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::debug;

use super::*;

/// A GraphReader for the SlotList-Format
#[derive(Debug, Clone)]
pub struct SlotListReader {
    /// HeaderFormat
    header: Header,
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for SlotListReader {
    fn default() -> Self {
        Self {
            header: Header::default(),
            comment_identifier: "c".to_string(),
        }
    }
}

impl SlotListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the header format
    pub fn header_format(mut self, format: Header) -> SlotListReader {
        self.header = format;
        self
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> SlotListReader {
        self.comment_identifier = c.into();
        self
    }

    /// Returns the next line that is neither blank nor a comment, or `None` at the end of input
    fn next_data_line<R: BufRead>(&self, lines: &mut std::io::Lines<R>) -> Result<Option<String>> {
        for line in lines {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty()
                || (!self.comment_identifier.is_empty()
                    && trimmed.starts_with(self.comment_identifier.as_str()))
            {
                continue;
            }
            return Ok(Some(line));
        }
        Ok(None)
    }
}

impl<T, Nbs> GraphReader<LabelledGraph<T, Nbs>> for SlotListReader
where
    T: Eq + Hash + Clone + FromStr,
    Nbs: Neighborhood,
{
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<LabelledGraph<T, Nbs>> {
        let mut lines = reader.lines();

        let header = self
            .next_data_line(&mut lines)?
            .ok_or(io_error!(ErrorKind::NotFound, "Header not found"))?;
        let (n, m) = self.header.parse_header(&header)?;
        raise_error_unless!(
            n <= INVALID_SLOT as usize,
            ErrorKind::InvalidData,
            format!("Header declares {n} slots which exceeds the slot space")
        );

        // `None` marks a declared vacated slot
        let mut labels: FxHashMap<Slot, Option<T>> = FxHashMap::default();
        let mut edges: Vec<SlotEdge> = Vec::new();

        while let Some(line) = self.next_data_line(&mut lines)? {
            let mut parts = line.split_whitespace();

            let u: Slot = parse_next_value!(parts, "Slot");
            raise_error_unless!(
                (u as usize) < n,
                ErrorKind::InvalidData,
                format!("Slot {u} is out of range for {n} slots")
            );

            let label: Option<T> = match parts.next() {
                Some(token) => Some(token.parse().map_err(|_| {
                    io_error!(
                        ErrorKind::InvalidData,
                        "Invalid value found. Cannot parse Label."
                    )
                })?),
                None => None,
            };
            let v: Option<Slot> = match parts.next() {
                Some(token) => Some(token.parse().map_err(|_| {
                    io_error!(
                        ErrorKind::InvalidData,
                        "Invalid value found. Cannot parse Neighbor slot."
                    )
                })?),
                None => None,
            };
            raise_error_unless!(
                parts.next().is_none(),
                ErrorKind::InvalidData,
                format!("Too many tokens in line: {line}")
            );

            match labels.entry(u) {
                Entry::Occupied(entry) => raise_error_unless!(
                    *entry.get() == label,
                    ErrorKind::InvalidData,
                    format!("Slot {u} carries conflicting labels")
                ),
                Entry::Vacant(entry) => {
                    entry.insert(label);
                }
            }

            if let Some(v) = v {
                raise_error_unless!(
                    (v as usize) < n,
                    ErrorKind::InvalidData,
                    format!("Slot {v} is out of range for {n} slots")
                );
                let edge = SlotEdge(u, v);
                raise_error_unless!(
                    !edge.is_loop(),
                    ErrorKind::InvalidData,
                    format!("Self-loop at slot {u}")
                );
                edges.push(edge.normalized());
            }
        }

        raise_error_unless!(
            labels.len() == n,
            ErrorKind::InvalidData,
            format!("Header declares {n} slots but {} were found", labels.len())
        );

        edges.sort_unstable();
        edges.dedup();
        raise_error_unless!(
            edges.len() == m,
            ErrorKind::InvalidData,
            format!("Header declares {m} edges but {} were found", edges.len())
        );

        if let Some(SlotEdge(u, v)) = edges
            .iter()
            .find(|SlotEdge(u, v)| {
                !matches!(labels.get(u), Some(Some(_))) || !matches!(labels.get(v), Some(Some(_)))
            })
        {
            return Err(io_error!(
                ErrorKind::InvalidData,
                format!("Edge {{{u}, {v}}} references a slot without label")
            ));
        }

        let labels = labels
            .into_iter()
            .filter_map(|(u, label)| Some((u, label?)))
            .sorted_unstable_by_key(|(u, _)| *u)
            .collect_vec();
        let graph = LabelledGraph::from_layout(n, labels, edges)
            .ok_or(io_error!(ErrorKind::InvalidData, "Labels are not unique"))?;

        debug!(
            slots = n,
            vertices = graph.number_of_vertices(),
            edges = m,
            "read slot list"
        );
        Ok(graph)
    }
}

/// Trait for creating graphs from a SlotListReader.
/// Used as shorthand for default SlotListReader settings
pub trait SlotListRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_slot_list<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_slot_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_slot_list(BufReader::new(File::open(path)?))
    }
}

impl<T, Nbs> SlotListRead for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone + FromStr,
    Nbs: Neighborhood,
{
    fn try_read_slot_list<R: BufRead>(reader: R) -> Result<Self> {
        SlotListReader::default().try_read_graph(reader)
    }
}

/// A writer for the SlotList-Format
#[derive(Debug, Clone, Default)]
pub struct SlotListWriter {
    /// HeaderFormat
    header: Header,
}

impl SlotListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the header format
    pub fn header_format(mut self, format: Header) -> SlotListWriter {
        self.header = format;
        self
    }
}

impl<T, Nbs> GraphWriter<LabelledGraph<T, Nbs>> for SlotListWriter
where
    T: Eq + Hash + Clone + Display,
    Nbs: Neighborhood,
{
    fn try_write_graph<W: Write>(
        &self,
        graph: &LabelledGraph<T, Nbs>,
        mut writer: W,
    ) -> Result<()> {
        self.header
            .write_header(&mut writer, graph.vertex_count(), graph.edge_count())?;

        for u in 0..graph.vertex_count() as Slot {
            let Some(label) = graph.value_of(u) else {
                writeln!(writer, "{u}")?;
                continue;
            };

            let label = label.to_string();
            raise_error_unless!(
                !label.is_empty() && !label.contains(char::is_whitespace),
                ErrorKind::InvalidInput,
                format!("Label of slot {u} is empty or contains whitespace")
            );

            writeln!(writer, "{u} {label}")?;
            for v in graph.neighbors_of(u).filter(|&v| v > u) {
                writeln!(writer, "{u} {label} {v}")?;
            }
        }

        writer.flush()?;
        debug!(
            slots = graph.vertex_count(),
            edges = graph.edge_count(),
            "wrote slot list"
        );
        Ok(())
    }
}

/// Trait for writing a graph to a writer in the SlotList-Format.
/// Shorthand for default settings.
pub trait SlotListWrite {
    /// Tries to write the graph to a writer
    fn try_write_slot_list<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_slot_list_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_slot_list(writer)
    }
}

impl<T, Nbs> SlotListWrite for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone + Display,
    Nbs: Neighborhood,
{
    fn try_write_slot_list<W: Write>(&self, writer: W) -> Result<()> {
        SlotListWriter::default().try_write_graph(self, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string<T>(graph: &LabelledGraph<T>) -> String
    where
        T: Eq + Hash + Clone + Display,
    {
        let mut out = Vec::new();
        graph.try_write_slot_list(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn read_from_str<T>(input: &str) -> Result<LabelledGraph<T>>
    where
        T: Eq + Hash + Clone + FromStr,
    {
        LabelledGraph::try_read_slot_list(input.as_bytes())
    }

    #[test]
    fn write_format() {
        let mut graph = LabelledGraph::new();
        graph.add_edge("A", "B").unwrap();
        graph.add_edge("B", "C").unwrap();
        graph.add_edge("A", "C").unwrap();
        graph.add_vertex("D").unwrap();

        assert_eq!(
            write_to_string(&graph),
            "4 3\n0 A\n0 A 1\n0 A 2\n1 B\n1 B 2\n2 C\n3 D\n"
        );
    }

    #[test]
    fn round_trip_keeps_layout() {
        let mut graph: LabelledGraph<String> = [("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        graph.add_vertex("e".to_string()).unwrap();
        graph.remove_vertex(&"b".to_string()).unwrap();

        let text = write_to_string(&graph);
        let read: LabelledGraph<String> = read_from_str(&text).unwrap();

        assert_eq!(read, graph);
        assert_eq!(read.vertex_count(), graph.vertex_count());
        assert_eq!(read.edge_count(), 2);
        for (slot, label) in graph.registry().iter() {
            assert_eq!(read.slot_of(label), Some(slot));
        }
        assert_eq!(read.registry().vacated().collect_vec(), vec![1]);
        assert_eq!(write_to_string(&read), text);
    }

    #[test]
    fn read_skips_comments_and_blank_lines() {
        let input = "c a comment\n\n3 2\nc another\n0 10\n0 10 1\n1 11 2\n2 12\n";
        let graph: LabelledGraph<u32> = read_from_str(input).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_edge(&10, &11));
        assert!(graph.is_edge(&11, &12));
        assert_eq!(graph.slot_of(&12), Some(2));
    }

    #[test]
    fn read_rejects_invalid_input() {
        let cases = [
            ("", ErrorKind::NotFound),
            ("2 1\n0 a\n1 b\n", ErrorKind::InvalidData),
            ("2 0\n0 a\n2 b\n", ErrorKind::InvalidData),
            ("2 0\n0 a\n0 b\n", ErrorKind::InvalidData),
            ("2 0\n0 a\n1 a\n", ErrorKind::InvalidData),
            ("2 1\n0 a 0\n", ErrorKind::InvalidData),
            ("2 1\n0 a 1\n", ErrorKind::InvalidData),
            ("2 1\n0 a 1 7\n1 b\n", ErrorKind::InvalidData),
            ("2 1\n0 a x\n1 b\n", ErrorKind::InvalidData),
            ("x 1\n", ErrorKind::InvalidData),
            ("2 1\n0\n", ErrorKind::InvalidData),
            ("3 0\n0 a\n2 c\n", ErrorKind::InvalidData),
            ("2 0\n0 a\n0\n", ErrorKind::InvalidData),
            ("2 1\n0 a 1\n1\n", ErrorKind::InvalidData),
        ];

        for (input, kind) in cases {
            let err = read_from_str::<String>(input).unwrap_err();
            assert_eq!(err.kind(), kind, "input: {input:?}");
        }
    }

    #[test]
    fn read_rejects_oversized_headers() {
        let inputs = [
            format!("1 {}\n0 a\n", usize::MAX),
            format!("{} 0\n", INVALID_SLOT),
            format!("{} 0\n0 a\n", INVALID_SLOT),
            format!("{} 0\n", INVALID_SLOT as usize + 1),
        ];

        for input in inputs {
            let err = read_from_str::<String>(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidData, "input: {input:?}");
        }
    }

    #[test]
    fn vacated_slots_round_trip() {
        let graph: LabelledGraph<String> = read_from_str("3 0\n0 a\n1\n2\n").unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.number_of_vertices(), 1);
        assert_eq!(graph.registry().vacated().collect_vec(), vec![1, 2]);

        let mut graph: LabelledGraph<u32> = [(1, 2), (2, 3)].into_iter().collect();
        graph.remove_vertex(&3).unwrap();
        let text = write_to_string(&graph);
        assert_eq!(text, "3 1\n0 1\n0 1 1\n1 2\n2\n");

        let read: LabelledGraph<u32> = read_from_str(&text).unwrap();
        assert_eq!(read, graph);
        assert_eq!(read.vertex_count(), 3);
        assert_eq!(read.registry().vacated().collect_vec(), vec![2]);
    }

    #[test]
    fn read_accepts_reverse_and_duplicate_edge_lines() {
        let graph: LabelledGraph<String> = read_from_str("2 1\n0 a 1\n1 b 0\n").unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.is_edge(&"a".to_string(), &"b".to_string()));
    }

    #[test]
    fn write_rejects_whitespace_labels() {
        let mut graph = LabelledGraph::new();
        graph.add_edge("two words", "x").unwrap();

        let err = graph.try_write_slot_list(Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn custom_header_round_trip() {
        let header = Header::new_problem("ladder");
        let graph: LabelledGraph<u32> = [(1, 2), (2, 3)].into_iter().collect();

        let mut out = Vec::new();
        SlotListWriter::new()
            .header_format(header.clone())
            .try_write_graph(&graph, &mut out)
            .unwrap();
        assert!(out.starts_with(b"p ladder 3 2\n"));

        let read: LabelledGraph<u32> = SlotListReader::new()
            .header_format(header)
            .comment_identifier("#")
            .try_read_graph(out.as_slice())
            .unwrap();
        assert_eq!(read, graph);
    }
}
