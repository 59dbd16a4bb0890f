//! Collision resolution: two landings on one city in the same round.

use crate::error::InvasionResult;
use crate::world::World;
use invasion_env::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fight that destroyed a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fight {
    /// City that was destroyed
    pub city: String,

    /// The first lander and the alien that joined it
    pub attackers: (AgentId, AgentId),

    /// Every alien that was in the city when it was destroyed
    pub casualties: Vec<AgentId>,
}

/// Tracks which city each alien landed in during the current round.
///
/// Only landings recorded through this resolver can trigger a fight; a
/// resident alien that has not been processed yet does not.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    /// City name -> first alien that landed there this round
    visitors: HashMap<String, AgentId>,
}

impl CollisionResolver {
    /// Creates a resolver for a fresh round.
    pub fn new() -> Self {
        Self::default()
    }

    /// First alien that landed in `city` this round, if any is still recorded.
    pub fn visitor(&self, city: &str) -> Option<AgentId> {
        self.visitors.get(city).copied()
    }

    /// Records that alien `id` landed in its current city.
    ///
    /// If another alien already landed there this round, the city is
    /// destroyed together with every alien located in it, and the visitor
    /// entry is cleared.
    pub fn record_landing(
        &mut self,
        world: &mut World,
        id: AgentId,
    ) -> InvasionResult<Option<Fight>> {
        let city = world.location(id)?.to_string();

        let Some(first) = self.visitors.remove(&city) else {
            self.visitors.insert(city, id);
            return Ok(None);
        };

        let present = world.registry().agents_at(&city);
        world.graph_mut().destroy_cities(&[city.as_str()])?;
        let casualties = world.registry_mut().remove(&present)?;

        Ok(Some(Fight {
            city,
            attackers: (first, id),
            casualties,
        }))
    }
}
