//! Movement resolution: follow a random live link or get stuck.

use crate::error::InvasionResult;
use crate::graph::Direction;
use crate::world::World;
use invasion_env::{AgentId, ChoiceSource};

/// Outcome of one alien's movement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// The alien followed a live link.
    Moved {
        /// City the alien left
        from: String,
        /// City the alien arrived in
        to: String,
        /// Link that was followed
        direction: Direction,
    },
    /// No live outgoing link; the alien stays where it is.
    Stuck {
        /// City the alien is stuck in
        city: String,
        /// True if the alien was not flagged stuck before this attempt
        newly: bool,
    },
}

impl Move {
    /// City the alien is in after the attempt.
    pub fn destination(&self) -> &str {
        match self {
            Move::Moved { to, .. } => to,
            Move::Stuck { city, .. } => city,
        }
    }
}

/// Resolves the move of alien `id` for this round.
///
/// The live links of the alien's city are evaluated on every call, so an
/// alien is never cached as stuck. A successful move is applied immediately
/// and is visible to collision detection later in the same round.
pub fn resolve_move<R: ChoiceSource>(
    world: &mut World,
    id: AgentId,
    source: &mut R,
) -> InvasionResult<Move> {
    let current = world.location(id)?.to_string();
    let options: Vec<(Direction, String)> = world
        .graph()
        .live_links(&current)?
        .into_iter()
        .map(|(direction, target)| (direction, target.to_string()))
        .collect();

    match source.pick(&options) {
        None => {
            let newly = world.registry_mut().mark_stuck(id)?;
            Ok(Move::Stuck {
                city: current,
                newly,
            })
        }
        Some((direction, target)) => {
            let registry = world.registry_mut();
            registry.clear_stuck(id)?;
            registry.relocate(id, target)?;
            Ok(Move::Moved {
                from: current,
                to: target.clone(),
                direction: *direction,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CityGraph;
    use crate::registry::AgentRegistry;
    use invasion_env::ScriptedSource;

    fn world(links: &[(&str, Direction, &str)], extra: &[&str], start: &str) -> World {
        let mut graph = CityGraph::new();
        for (source, direction, target) in links {
            graph.add_link(source, *direction, target);
        }
        for name in extra {
            graph.add_city(name);
        }
        World::new(graph, AgentRegistry::from_positions([start]))
    }

    #[test]
    fn test_moves_along_only_link() {
        let mut w = world(
            &[("A", Direction::North, "B"), ("B", Direction::South, "A")],
            &[],
            "A",
        );
        let mv = resolve_move(&mut w, AgentId(0), &mut ScriptedSource::new([0])).unwrap();

        assert_eq!(
            mv,
            Move::Moved {
                from: "A".into(),
                to: "B".into(),
                direction: Direction::North
            }
        );
        assert_eq!(w.location(AgentId(0)).unwrap(), "B");
        assert_eq!(w.stuck_agent_count(), 0);
    }

    #[test]
    fn test_choice_follows_direction_order() {
        let mut w = world(
            &[
                ("A", Direction::West, "W"),
                ("A", Direction::North, "N"),
                ("A", Direction::East, "E"),
            ],
            &[],
            "A",
        );
        // live links ordered north, east, west
        let mv = resolve_move(&mut w, AgentId(0), &mut ScriptedSource::new([2])).unwrap();
        assert_eq!(mv.destination(), "W");
    }

    #[test]
    fn test_isolated_city_marks_stuck() {
        let mut w = world(&[], &["A"], "A");
        let mv = resolve_move(&mut w, AgentId(0), &mut ScriptedSource::default()).unwrap();

        assert_eq!(mv, Move::Stuck { city: "A".into(), newly: true });
        assert_eq!(w.location(AgentId(0)).unwrap(), "A");
        assert_eq!(w.stuck_agent_count(), 1);

        // Re-evaluated each round but counted once
        let again = resolve_move(&mut w, AgentId(0), &mut ScriptedSource::default()).unwrap();
        assert_eq!(again, Move::Stuck { city: "A".into(), newly: false });
        assert_eq!(w.stuck_agent_count(), 1);
    }

    #[test]
    fn test_cannot_move_onto_destroyed_city() {
        let mut w = world(&[("A", Direction::North, "D")], &[], "A");
        w.graph_mut().destroy_cities(&["D"]).unwrap();

        let mv = resolve_move(&mut w, AgentId(0), &mut ScriptedSource::new([0])).unwrap();

        assert!(matches!(mv, Move::Stuck { .. }));
        assert_eq!(w.location(AgentId(0)).unwrap(), "A");
    }

    #[test]
    fn test_moving_clears_stuck_flag() {
        let mut w = world(&[("A", Direction::North, "B")], &[], "A");
        w.registry_mut().mark_stuck(AgentId(0)).unwrap();

        resolve_move(&mut w, AgentId(0), &mut ScriptedSource::new([0])).unwrap();

        assert_eq!(w.stuck_agent_count(), 0);
    }

    #[test]
    fn test_unknown_alien() {
        let mut w = world(&[], &["A"], "A");
        let result = resolve_move(&mut w, AgentId(3), &mut ScriptedSource::default());
        assert!(result.unwrap_err().is_not_found());
    }
}
