//! Alien registry: active and stuck aliens, and city occupancy.

use crate::error::{InvasionError, InvasionResult};
use invasion_env::AgentId;
use std::collections::{BTreeMap, BTreeSet};

/// A deployed alien.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alien {
    /// Identifier assigned at deployment
    id: AgentId,

    /// Name of the city the alien is currently in
    city: String,

    /// No live outgoing link from `city` at last evaluation
    stuck: bool,
}

impl Alien {
    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck
    }
}

/// Owns every alien that is still alive.
///
/// Destroyed aliens are dropped from both the active map and the stuck set;
/// only their count is retained. The stuck set is always a subset of the
/// active map.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    /// Alive aliens by id
    active: BTreeMap<AgentId, Alien>,

    /// Ids of alive aliens currently stuck
    stuck: BTreeSet<AgentId>,

    /// Total number of aliens ever deployed
    deployed: usize,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry with one alien per city name, ids assigned in order.
    pub fn from_positions<I, S>(positions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for city in positions {
            registry.deploy(city);
        }
        registry
    }

    /// Deploys a new alien in `city` and returns its id.
    pub fn deploy(&mut self, city: impl Into<String>) -> AgentId {
        let id = AgentId(self.deployed as u32);
        self.deployed += 1;
        self.active.insert(
            id,
            Alien {
                id,
                city: city.into(),
                stuck: false,
            },
        );
        id
    }

    /// Looks up an alive alien.
    pub fn agent(&self, id: AgentId) -> InvasionResult<&Alien> {
        self.active.get(&id).ok_or(InvasionError::AgentNotFound(id))
    }

    fn agent_mut(&mut self, id: AgentId) -> InvasionResult<&mut Alien> {
        self.active.get_mut(&id).ok_or(InvasionError::AgentNotFound(id))
    }

    /// Returns true if the alien is still alive.
    pub fn contains(&self, id: AgentId) -> bool {
        self.active.contains_key(&id)
    }

    /// Ids of the aliens located in `city`, ascending.
    pub fn agents_at(&self, city: &str) -> Vec<AgentId> {
        self.active
            .values()
            .filter(|alien| alien.city == city)
            .map(Alien::id)
            .collect()
    }

    /// Ids of every alive alien, ascending.
    pub fn active_ids(&self) -> Vec<AgentId> {
        self.active.keys().copied().collect()
    }

    /// Alive aliens in id order.
    pub fn aliens(&self) -> impl Iterator<Item = &Alien> {
        self.active.values()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn stuck_count(&self) -> usize {
        self.stuck.len()
    }

    pub fn deployed_count(&self) -> usize {
        self.deployed
    }

    pub fn destroyed_count(&self) -> usize {
        self.deployed - self.active.len()
    }

    /// Removes (destroys) a set of aliens.
    ///
    /// Repeated ids in `ids` count once. If any id is not alive, nothing is
    /// removed. Returns the removed ids, ascending.
    pub fn remove(&mut self, ids: &[AgentId]) -> InvasionResult<Vec<AgentId>> {
        let unique: BTreeSet<AgentId> = ids.iter().copied().collect();
        if let Some(missing) = unique.iter().find(|id| !self.active.contains_key(id)) {
            return Err(InvasionError::AgentNotFound(*missing));
        }
        for id in &unique {
            self.active.remove(id);
            self.stuck.remove(id);
        }
        Ok(unique.into_iter().collect())
    }

    /// Flags an alien as stuck. Returns true if it was not stuck before.
    pub fn mark_stuck(&mut self, id: AgentId) -> InvasionResult<bool> {
        self.agent_mut(id)?.stuck = true;
        Ok(self.stuck.insert(id))
    }

    /// Clears the stuck flag. Returns true if the alien was stuck.
    pub fn clear_stuck(&mut self, id: AgentId) -> InvasionResult<bool> {
        self.agent_mut(id)?.stuck = false;
        Ok(self.stuck.remove(&id))
    }

    /// Moves an alien to `city`, returning the city it left.
    pub fn relocate(&mut self, id: AgentId, city: &str) -> InvasionResult<String> {
        let alien = self.agent_mut(id)?;
        Ok(std::mem::replace(&mut alien.city, city.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_assigns_sequential_ids() {
        let registry = AgentRegistry::from_positions(["A", "B", "A"]);
        assert_eq!(registry.active_ids(), vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(registry.deployed_count(), 3);
        assert_eq!(registry.agent(AgentId(1)).unwrap().city(), "B");
    }

    #[test]
    fn test_agents_at() {
        let registry = AgentRegistry::from_positions(["A", "B", "A"]);
        assert_eq!(registry.agents_at("A"), vec![AgentId(0), AgentId(2)]);
        assert!(registry.agents_at("C").is_empty());
    }

    #[test]
    fn test_remove_updates_counts() {
        let mut registry = AgentRegistry::from_positions(["A", "B", "C"]);
        registry.mark_stuck(AgentId(1)).unwrap();

        let removed = registry.remove(&[AgentId(1), AgentId(1), AgentId(2)]).unwrap();

        assert_eq!(removed, vec![AgentId(1), AgentId(2)]);
        assert_eq!(registry.active_count(), 1);
        assert_eq!(registry.stuck_count(), 0);
        assert_eq!(registry.destroyed_count(), 2);
        assert_eq!(registry.active_count() + registry.destroyed_count(), 3);
    }

    #[test]
    fn test_remove_missing_id_is_atomic() {
        let mut registry = AgentRegistry::from_positions(["A", "B"]);
        let result = registry.remove(&[AgentId(0), AgentId(9)]);
        assert!(matches!(result, Err(InvasionError::AgentNotFound(AgentId(9)))));
        assert_eq!(registry.active_count(), 2);

        registry.remove(&[AgentId(0)]).unwrap();
        assert!(registry.remove(&[AgentId(0)]).is_err());
    }

    #[test]
    fn test_stuck_is_a_set() {
        let mut registry = AgentRegistry::from_positions(["A"]);
        assert!(registry.mark_stuck(AgentId(0)).unwrap());
        assert!(!registry.mark_stuck(AgentId(0)).unwrap());
        assert_eq!(registry.stuck_count(), 1);
        assert!(registry.agent(AgentId(0)).unwrap().is_stuck());

        assert!(registry.clear_stuck(AgentId(0)).unwrap());
        assert_eq!(registry.stuck_count(), 0);
        assert!(!registry.agent(AgentId(0)).unwrap().is_stuck());
    }

    #[test]
    fn test_relocate() {
        let mut registry = AgentRegistry::from_positions(["A"]);
        let left = registry.relocate(AgentId(0), "B").unwrap();
        assert_eq!(left, "A");
        assert_eq!(registry.agent(AgentId(0)).unwrap().city(), "B");
        assert!(registry.relocate(AgentId(5), "B").is_err());
    }
}
