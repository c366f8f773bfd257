mod error;
mod grid;
mod sprites;
mod world_state;

pub use error::StateError;
pub use grid::{Cell, Grid, SHELTER_INITIAL_ENERGY};
pub use sprites::{
    EntityId, Minion, MinionKind, MinionState, PLAYER_INITIAL_HEALTH, Player, Slasher, Sprite,
    Wanderer,
};
pub use world_state::{Rules, Shelter, WorldState};
