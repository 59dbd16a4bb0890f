//! City graph: cities, directed links and destruction flags.
//!
//! Cities are addressed by name everywhere; links store the target's name
//! rather than a reference so a city can be destroyed while aliens and links
//! still point at it. Destruction is a soft delete: the city stays in the
//! graph and is filtered out lazily when links are traversed.

use crate::error::{InvasionError, InvasionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compass direction of a link.
///
/// The declaration order is the traversal order for live links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in traversal order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the lower-case token used in the world format.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "east" => Ok(Direction::East),
            "south" => Ok(Direction::South),
            "west" => Ok(Direction::West),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// A city in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    name: String,
    destroyed: bool,
}

impl City {
    /// Creates a new, intact city.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destroyed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// The directed city graph.
///
/// Both maps are ordered so every traversal (deployment, formatting, live
/// link enumeration) is reproducible.
#[derive(Debug, Clone, Default)]
pub struct CityGraph {
    /// City name -> city record
    cities: BTreeMap<String, City>,

    /// Source name -> (direction -> target name)
    links: BTreeMap<String, BTreeMap<Direction, String>>,
}

impl CityGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a city if it is not already known. Returns true if it was inserted.
    pub fn add_city(&mut self, name: &str) -> bool {
        if self.cities.contains_key(name) {
            return false;
        }
        self.cities.insert(name.to_string(), City::new(name));
        true
    }

    /// Adds (or overwrites) the link `source --direction--> target`.
    ///
    /// Missing cities on either end are created. Returns the previous target
    /// for that direction, if any.
    pub fn add_link(&mut self, source: &str, direction: Direction, target: &str) -> Option<String> {
        self.add_city(source);
        self.add_city(target);
        self.links
            .entry(source.to_string())
            .or_default()
            .insert(direction, target.to_string())
    }

    /// Looks up a city by name.
    pub fn city(&self, name: &str) -> InvasionResult<&City> {
        self.cities.get(name).ok_or_else(|| InvasionError::city(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    /// Returns whether the named city is destroyed.
    pub fn is_destroyed(&self, name: &str) -> InvasionResult<bool> {
        self.city(name).map(City::is_destroyed)
    }

    /// Soft-deletes every named city.
    ///
    /// Already destroyed cities are left as they are. If any name is unknown
    /// nothing is destroyed.
    pub fn destroy_cities<S: AsRef<str>>(&mut self, names: &[S]) -> InvasionResult<()> {
        if let Some(missing) = names.iter().find(|n| !self.contains(n.as_ref())) {
            return Err(InvasionError::city(missing.as_ref()));
        }
        for name in names {
            if let Some(city) = self.cities.get_mut(name.as_ref()) {
                city.destroyed = true;
            }
        }
        Ok(())
    }

    /// Enumerates the live outgoing links of a city, in direction order.
    ///
    /// A link is live iff its target is not destroyed. The state of the
    /// source city itself is not considered.
    pub fn live_links(&self, name: &str) -> InvasionResult<Vec<(Direction, &str)>> {
        let city = self.city(name)?;
        Ok(self.live_links_of(city))
    }

    /// Live links of a city already held by the caller; cannot fail.
    pub fn live_links_of(&self, city: &City) -> Vec<(Direction, &str)> {
        let Some(links) = self.links.get(city.name()) else {
            return Vec::new();
        };
        links
            .iter()
            .filter(|(_, target)| {
                self.cities
                    .get(target.as_str())
                    .is_some_and(|city| !city.destroyed)
            })
            .map(|(direction, target)| (*direction, target.as_str()))
            .collect()
    }

    /// Returns the raw target of a link, destroyed or not.
    pub fn link(&self, source: &str, direction: Direction) -> Option<&str> {
        self.links
            .get(source)
            .and_then(|links| links.get(&direction))
            .map(String::as_str)
    }

    /// All cities in name order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// All city names in name order.
    pub fn city_names(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    /// Names of destroyed cities, in name order.
    pub fn destroyed_cities(&self) -> Vec<&str> {
        self.cities
            .values()
            .filter(|city| city.destroyed)
            .map(City::name)
            .collect()
    }

    /// Number of cities, destroyed ones included.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Number of declared links, live or not.
    pub fn link_count(&self) -> usize {
        self.links.values().map(BTreeMap::len).sum()
    }
}
