use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::infra::{GameObserver, Point};
use crate::planners::explorator::{Command, Explorator, SurvivalExecutor, WorldSimulator};
use crate::state::{EntityId, Minion, MinionState, Sprite, Wanderer, WorldState};

/// Turns slower than this would be forfeited by a real referee.
const TURN_HARD_LIMIT: Duration = Duration::from_millis(50);

/// Spawned wanderers appear within this distance of my player, but not adjacent.
const SPAWN_MIN_DISTANCE: i32 = 3;
const SPAWN_MAX_DISTANCE: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub turns: u32,
    pub final_health: i32,
    pub survived: bool,
}

/// Self-play loop: the simulator stands in for the referee and the game plays
/// the role of the turn update loop.
pub struct Game {
    world: WorldState,
    executor: SurvivalExecutor,
    config: EngineConfig,
    rng: StdRng,
    observer: Box<dyn GameObserver>,
    next_wanderer_id: EntityId,
}

impl Game {
    pub fn new(
        world: WorldState,
        config: EngineConfig,
        observer: impl GameObserver + 'static,
    ) -> Self {
        let next_wanderer_id = world
            .all_players()
            .map(|p| p.id)
            .chain(world.minions().map(|m| m.id()))
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            executor: SurvivalExecutor::new(Explorator::from_config(&config)),
            rng: StdRng::seed_from_u64(config.seed),
            world,
            config,
            observer: Box::new(observer),
            next_wanderer_id,
        }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn run(&mut self) -> GameOutcome {
        self.observer.on_game_start(&self.world);

        while self.world.turn < self.config.turn_limit && self.world.my_player.health > 0 {
            self.play_turn();
        }

        self.observer.on_game_finished(&self.world);
        GameOutcome {
            turns: self.world.turn,
            final_health: self.world.my_player.health,
            survived: self.world.my_player.health > 0,
        }
    }

    pub fn play_turn(&mut self) -> Command {
        let tick_start = Instant::now();

        let command = self.executor.decide(&self.world);
        let destination = match command {
            Command::Move(destination) => destination,
            Command::Wait | Command::Plan | Command::Light => self.world.my_player.position,
        };

        let spawning: HashSet<EntityId> = self
            .world
            .wanderers
            .iter()
            .filter(|w| w.state == MinionState::Spawning)
            .map(|w| w.id)
            .collect();

        let mut next = WorldSimulator::simulate(&self.world, destination);
        let life_time = next.rules.wanderer_life_time;
        for wanderer in next
            .wanderers
            .iter_mut()
            .filter(|w| w.state == MinionState::Wandering && spawning.contains(&w.id))
        {
            wanderer.remaining_time = life_time;
        }

        let retired = next.retire_expired_wanderers();
        if retired > 0 {
            tracing::debug!(retired, "Wanderers faded away");
        }
        next.turn += 1;
        self.world = next;

        let interval = self.config.wanderer_spawn_interval;
        if interval > 0 && self.world.turn % interval == 0 {
            self.spawn_wanderer();
        }

        let tick_duration = tick_start.elapsed();
        if tick_duration > TURN_HARD_LIMIT {
            tracing::warn!(
                "Turn {} took {:.2}ms (command: {:?})",
                self.world.turn,
                tick_duration.as_secs_f64() * 1000.0,
                command
            );
        }
        self.observer.on_turn(&self.world, command, tick_duration);

        command
    }

    fn spawn_wanderer(&mut self) {
        let player = self.world.my_player.position;
        let candidates: Vec<Point> = self
            .world
            .grid
            .iter()
            .filter(|(_, cell)| !cell.is_wall())
            .map(|(pos, _)| pos)
            .filter(|pos| {
                let distance = pos.distance(&player);
                (SPAWN_MIN_DISTANCE..=SPAWN_MAX_DISTANCE).contains(&distance)
            })
            .collect();

        if candidates.is_empty() {
            tracing::debug!("No free cell to spawn a wanderer");
            return;
        }

        let position = candidates[self.rng.random_range(0..candidates.len())];
        let wanderer = Wanderer::new(
            self.next_wanderer_id,
            position,
            self.world.rules.wanderer_spawn_time,
        )
        .with_target(self.world.my_player.id);
        tracing::debug!(id = wanderer.id, x = position.x, y = position.y, "Wanderer spawned");

        self.next_wanderer_id += 1;
        self.world.insert_minion(Minion::Wanderer(wanderer));
    }
}
