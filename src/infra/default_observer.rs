use std::time::Duration;

use tracing::{debug, info};

use crate::infra::GameObserver;
use crate::planners::explorator::Command;
use crate::state::WorldState;

pub struct DefaultObserver;

impl GameObserver for DefaultObserver {
    fn on_game_start(&mut self, world: &WorldState) {
        info!("Game started");
        info!("- map size: {}x{}", world.grid.width, world.grid.height);
        info!(
            "- sanity loss: {} alone, {} grouped",
            world.rules.sanity_loss_lonely, world.rules.sanity_loss_group
        );
        info!("- shelters: {}", world.shelters.len());
    }

    fn on_turn(&mut self, world: &WorldState, command: Command, elapsed: Duration) {
        info!(
            "turn: {}, pos: ({}, {}), health: {}, command: {:?}, took {:.2}ms",
            world.turn,
            world.my_player.position.x,
            world.my_player.position.y,
            world.my_player.health,
            command,
            elapsed.as_secs_f64() * 1000.0
        );
        debug!("\n{}", world.draw_ascii_map());
    }

    fn on_game_finished(&mut self, world: &WorldState) {
        info!(
            "Game finished after {} turns with health {}",
            world.turn, world.my_player.health
        );
    }
}
