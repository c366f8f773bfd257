use std::time::Duration;

use crate::planners::explorator::Command;
use crate::state::WorldState;

/// Trait for observing game events during execution
pub trait GameObserver {
    /// Called once before the first turn
    fn on_game_start(&mut self, world: &WorldState);

    /// Called after each turn with the command played and the world it produced
    fn on_turn(&mut self, world: &WorldState, command: Command, elapsed: Duration);

    /// Called when the game finishes
    fn on_game_finished(&mut self, world: &WorldState);
}
