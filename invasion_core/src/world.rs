//! World - the city graph plus the aliens roaming it.

use crate::error::{InvasionError, InvasionResult};
use crate::formatter;
use crate::graph::CityGraph;
use crate::registry::AgentRegistry;
use invasion_env::{AgentId, ChoiceSource};
use tracing::debug;

/// Container for the complete simulation state.
///
/// Built once before the first round, mutated in place by the engine and
/// frozen once a terminal status is reached.
#[derive(Debug, Clone, Default)]
pub struct World {
    /// Cities and links
    graph: CityGraph,

    /// Alive aliens
    registry: AgentRegistry,
}

impl World {
    /// Creates a world from an existing graph and registry.
    ///
    /// Every alien in `registry` is expected to sit in a city of `graph`.
    pub fn new(graph: CityGraph, registry: AgentRegistry) -> Self {
        Self { graph, registry }
    }

    /// Deploys `count` aliens on uniformly chosen cities of `graph`.
    ///
    /// Cities are drawn from the name-ordered city list, so a given source
    /// sequence always yields the same placement.
    pub fn deploy<R: ChoiceSource>(
        graph: CityGraph,
        count: usize,
        source: &mut R,
    ) -> InvasionResult<Self> {
        if count > 0 && graph.is_empty() {
            return Err(InvasionError::EmptyWorld { requested: count });
        }

        let names: Vec<String> = graph.city_names().map(str::to_string).collect();
        let mut registry = AgentRegistry::new();

        for _ in 0..count {
            let Some(city) = source.pick(&names) else {
                return Err(InvasionError::EmptyWorld { requested: count });
            };
            let id = registry.deploy(city.clone());
            debug!("Alien {} is located at {}", id, city);
        }

        Ok(Self::new(graph, registry))
    }

    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut CityGraph {
        &mut self.graph
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AgentRegistry {
        &mut self.registry
    }

    /// Name of the city an alive alien is in.
    pub fn location(&self, id: AgentId) -> InvasionResult<&str> {
        self.registry.agent(id).map(|alien| alien.city())
    }

    pub fn active_agent_count(&self) -> usize {
        self.registry.active_count()
    }

    pub fn stuck_agent_count(&self) -> usize {
        self.registry.stuck_count()
    }

    pub fn destroyed_agent_count(&self) -> usize {
        self.registry.destroyed_count()
    }

    /// Serializes the surviving map in the input format.
    pub fn formatted(&self) -> String {
        formatter::format_world(&self.graph)
    }
}

impl std::fmt::Display for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Direction;
    use invasion_env::{ScriptedSource, SeededSource};

    fn three_cities() -> CityGraph {
        let mut graph = CityGraph::new();
        graph.add_link("Bar", Direction::North, "Foo");
        graph.add_link("Foo", Direction::South, "Qux");
        graph
    }

    #[test]
    fn test_deploy_places_every_alien() {
        let mut source = SeededSource::new(42);
        let world = World::deploy(three_cities(), 25, &mut source).unwrap();

        assert_eq!(world.active_agent_count(), 25);
        assert_eq!(world.stuck_agent_count(), 0);
        for alien in world.registry().aliens() {
            assert!(world.graph().contains(alien.city()));
        }
    }

    #[test]
    fn test_deploy_uses_name_order() {
        // Cities sorted: Bar, Foo, Qux
        let mut source = ScriptedSource::new([2, 0, 1]);
        let world = World::deploy(three_cities(), 3, &mut source).unwrap();

        assert_eq!(world.location(AgentId(0)).unwrap(), "Qux");
        assert_eq!(world.location(AgentId(1)).unwrap(), "Bar");
        assert_eq!(world.location(AgentId(2)).unwrap(), "Foo");
    }

    #[test]
    fn test_deploy_on_empty_graph() {
        let mut source = SeededSource::new(1);
        let result = World::deploy(CityGraph::new(), 2, &mut source);
        assert!(matches!(result, Err(InvasionError::EmptyWorld { requested: 2 })));

        let world = World::deploy(CityGraph::new(), 0, &mut source).unwrap();
        assert_eq!(world.active_agent_count(), 0);
    }

    #[test]
    fn test_deploy_is_reproducible() {
        let a = World::deploy(three_cities(), 10, &mut SeededSource::new(9)).unwrap();
        let b = World::deploy(three_cities(), 10, &mut SeededSource::new(9)).unwrap();

        let cities_a: Vec<&str> = a.registry().aliens().map(|x| x.city()).collect();
        let cities_b: Vec<&str> = b.registry().aliens().map(|x| x.city()).collect();
        assert_eq!(cities_a, cities_b);
    }
}
