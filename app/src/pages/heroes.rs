//! In-memory hero list for the demo list and detail pages

use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    pub name: String,
}

const HEROES: &[(u32, &str)] = &[
    (12, "Dr. Nice"),
    (13, "Bombasto"),
    (14, "Celeritas"),
    (15, "Magneta"),
    (16, "RubberMan"),
    (17, "Dynama"),
    (18, "Dr. IQ"),
    (19, "Magma"),
    (20, "Tornado"),
];

#[derive(Debug, Clone)]
pub struct HeroService {
    heroes: Arc<[Hero]>,
}

impl Default for HeroService {
    fn default() -> Self {
        Self::new(
            HEROES
                .iter()
                .map(|(id, name)| Hero { id: *id, name: name.to_string() })
                .collect(),
        )
    }
}

impl HeroService {
    pub fn new(heroes: Vec<Hero>) -> Self {
        Self { heroes: Arc::from(heroes) }
    }

    pub fn heroes(&self) -> Vec<Hero> {
        self.heroes.to_vec()
    }

    pub fn hero(&self, id: u32) -> Option<Hero> {
        self.heroes.iter().find(|h| h.id == id).cloned()
    }

    /// Case-insensitive name search; a blank term matches nothing
    pub fn search(&self, term: &str) -> Vec<Hero> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        self.heroes
            .iter()
            .filter(|h| h.name.to_lowercase().contains(&term))
            .cloned()
            .collect()
    }
}
