//! World formatter: writes the surviving map back in the input notation.

use crate::graph::CityGraph;

/// Printed when no intact city has a live outgoing link.
pub const NO_ENTRY_POINTS: &str = "No entry-point cities left";

/// Formats one line per intact city that still has a live outgoing link.
///
/// Lines follow city-name order and links follow direction order. Destroyed
/// cities and cities without printable links are omitted.
pub fn format_lines(graph: &CityGraph) -> Vec<String> {
    graph
        .cities()
        .filter(|city| !city.is_destroyed())
        .filter_map(|city| {
            let links = graph.live_links_of(city);
            if links.is_empty() {
                return None;
            }
            let mut line = city.name().to_string();
            for (direction, target) in links {
                line.push(' ');
                line.push_str(direction.name());
                line.push('=');
                line.push_str(target);
            }
            Some(line)
        })
        .collect()
}

/// Formats the whole map, or [`NO_ENTRY_POINTS`] if nothing qualifies.
pub fn format_world(graph: &CityGraph) -> String {
    let lines = format_lines(graph);
    if lines.is_empty() {
        NO_ENTRY_POINTS.to_string()
    } else {
        lines.join("\n")
    }
}
