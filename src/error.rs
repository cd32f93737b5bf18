//! Errors for the fallible edges of the engine: roster lookups and sprite
//! sheet loading. The tick path itself never fails.

use crate::sprite::ResourceId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PetError {
    #[error("Unknown pet id: {0}")]
    UnknownPet(String),

    #[error("Pet id already registered: {0}")]
    DuplicatePet(String),

    #[error("Sprite sheet {resource:?} is {width}x{height} but has {len} bytes of RGBA data")]
    SheetSize {
        resource: ResourceId,
        width: u32,
        height: u32,
        len: usize,
    },

    #[error("Failed to load sprite sheet {0:?}: {1}")]
    SheetLoad(ResourceId, String),

    #[error("Pet entity no longer exists")]
    NoSuchEntity,
}
