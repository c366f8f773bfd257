mod default_observer;
mod game_observer;
mod pathfinding;
mod types;

pub use default_observer::DefaultObserver;
pub use game_observer::GameObserver;
pub use pathfinding::{INFINITE_DISTANCE, PathFinder};
pub use types::{Point, Vector};
