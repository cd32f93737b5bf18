use std::collections::HashMap;

use crate::ecs::components::{LayoutScheme, SpriteLayout};
use crate::error::PetError;
use crate::sprite::ResourceId;

/// Static description of a pet that can be spawned.
#[derive(Debug, Clone)]
pub struct PetDefinition {
    pub id: String,
    pub name: String,
    pub layout: SpriteLayout,
}

impl PetDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        resource: ResourceId,
        cols: u32,
        rows: u32,
        scheme: LayoutScheme,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layout: SpriteLayout {
                resource,
                cols,
                rows,
                scheme,
            },
        }
    }
}

/// Registry of pet definitions keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pets: HashMap<String, PetDefinition>,
    /// Registration order, for menus.
    order: Vec<String>,
}

impl Roster {
    /// Empty roster; see [`Roster::builtin`] for the bundled pets.
    pub fn new() -> Self {
        Self::default()
    }

    /// The three pets that ship with the app.
    pub fn builtin() -> Self {
        let mut roster = Self::new();
        for def in [
            PetDefinition::new("cat_01", "Purple Cat", ResourceId(1), 4, 4, LayoutScheme::Legacy4Row),
            PetDefinition::new("dog_01", "Blue Dog", ResourceId(2), 4, 4, LayoutScheme::Legacy4Row),
            PetDefinition::new("man_01", "Little Man", ResourceId(3), 4, 7, LayoutScheme::SevenRow),
        ] {
            // Ids above are distinct.
            let _ = roster.register(def);
        }
        roster
    }

    pub fn register(&mut self, def: PetDefinition) -> Result<(), PetError> {
        if self.pets.contains_key(&def.id) {
            return Err(PetError::DuplicatePet(def.id));
        }
        self.order.push(def.id.clone());
        self.pets.insert(def.id.clone(), def);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PetDefinition> {
        self.pets.get(id)
    }

    pub fn layout(&self, id: &str) -> Result<SpriteLayout, PetError> {
        self.get(id)
            .map(|def| def.layout)
            .ok_or_else(|| PetError::UnknownPet(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PetDefinition> {
        self.order.iter().filter_map(|id| self.pets.get(id))
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}
