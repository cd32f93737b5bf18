//! Desktop pet engine: sprite pets that walk, climb, jump and fall inside the
//! host's usable screen rectangle.
//!
//! The host owns windows, input and drawing. It feeds the engine bounds and
//! pointer events, calls [`Simulation::step`] on a fixed cadence (see
//! [`TickDriver`]) and draws the [`PetInstance`]s that come back.

pub mod config;
pub mod debug;
pub mod driver;
pub mod ecs;
pub mod error;
pub mod pet;
pub mod render;
pub mod settings;
pub mod sim;
pub mod spatial;
pub mod sprite;

pub use config::{EngineConfig, TransitionTuning};
pub use driver::TickDriver;
pub use error::PetError;
pub use render::instance::PetInstance;
pub use settings::{PetSettings, SpeedPreset};
pub use sim::{PetView, Simulation};
pub use spatial::Bounds;
