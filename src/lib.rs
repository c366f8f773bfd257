pub mod config;
pub mod game;
pub mod infra;
pub mod planners;
pub mod state;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use game::{Game, GameOutcome};
pub use infra::{PathFinder, Point, Vector};
pub use planners::explorator::{Command, Explorator, Solution, SurvivalExecutor, WorldSimulator};
pub use state::{Grid, WorldState};
