//! World-definition parser.
//!
//! Each non-empty line reads `<city> [<direction>=<city>]*`, tokens separated
//! by whitespace. Later tokens for the same direction overwrite earlier ones
//! and a target that was never declared is created with no links of its own.

use crate::error::{InvasionError, InvasionResult};
use crate::graph::{CityGraph, Direction};
use std::io::BufRead;

/// Parses a world definition from a reader.
///
/// Any malformed line aborts the whole parse; no partial graph is returned.
pub fn parse_graph<R: BufRead>(reader: R) -> InvasionResult<CityGraph> {
    let mut graph = CityGraph::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        parse_line(&mut graph, index + 1, &line)?;
    }

    Ok(graph)
}

/// Parses a world definition held in memory.
pub fn parse_str(input: &str) -> InvasionResult<CityGraph> {
    parse_graph(input.as_bytes())
}

fn parse_line(graph: &mut CityGraph, line_no: usize, line: &str) -> InvasionResult<()> {
    let mut tokens = line.split_whitespace();
    let Some(source) = tokens.next() else {
        return Ok(());
    };
    if source.contains('=') {
        return Err(InvasionError::MalformedInput {
            line: line_no,
            token: source.to_string(),
        });
    }
    graph.add_city(source);

    for token in tokens {
        let malformed = || InvasionError::MalformedInput {
            line: line_no,
            token: token.to_string(),
        };
        let (direction, target) = token.split_once('=').ok_or_else(malformed)?;
        if direction.is_empty() || target.is_empty() || target.contains('=') {
            return Err(malformed());
        }
        let direction: Direction =
            direction
                .parse()
                .map_err(|_| InvasionError::InvalidDirection {
                    line: line_no,
                    token: direction.to_string(),
                })?;
        graph.add_link(source, direction, target);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple_lines() {
        let graph = parse_str("A north=B\n   B south=C\n").unwrap();

        assert_eq!(graph.city_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(graph.link("A", Direction::North), Some("B"));
        assert_eq!(graph.link("B", Direction::South), Some("C"));
        assert_eq!(graph.link_count(), 2);
    }

    #[test]
    fn test_parse_empty_input() {
        let graph = parse_str("").unwrap();
        assert!(graph.is_empty());

        let graph = parse_str("\n  \n\t\n").unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_duplicate_direction_overwrites() {
        let graph = parse_str("A north=B north=C").unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.link("A", Direction::North), Some("C"));
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn test_target_declared_later_keeps_links() {
        let graph = parse_str("A east=B\nB west=A").unwrap();
        assert_eq!(graph.link("B", Direction::West), Some("A"));
    }

    #[test]
    fn test_directions_case_insensitive() {
        let graph = parse_str("A North=B").unwrap();
        assert_eq!(graph.link("A", Direction::North), Some("B"));
    }

    #[test]
    fn test_invalid_direction() {
        let err = parse_str("A north=B asd=C").unwrap_err();
        assert!(matches!(
            err,
            InvasionError::InvalidDirection { line: 1, ref token } if token == "asd"
        ));
    }

    #[test]
    fn test_malformed_token() {
        let err = parse_str("this is not a valid destination string").unwrap_err();
        assert!(matches!(
            err,
            InvasionError::MalformedInput { line: 1, ref token } if token == "is"
        ));

        assert!(matches!(
            parse_str("A\nB north=").unwrap_err(),
            InvasionError::MalformedInput { line: 2, .. }
        ));
        assert!(matches!(
            parse_str("north=B").unwrap_err(),
            InvasionError::MalformedInput { .. }
        ));
    }
}
