use crate::infra::{PathFinder, Point};
use crate::state::{MinionState, Wanderer, WorldState};

use super::explorator::{Explorator, Solution};

pub const HEAL_DURATION: u32 = 5;
pub const LIGHT_DURATION: u32 = 3;
pub const HEALTH_PACKS: u32 = 2;
pub const LIGHTS: u32 = 3;

/// Below this health a stationary player uses a health pack.
const HEAL_THRESHOLD: i32 = 220;
/// Below this health a single attacking wanderer is enough to light a torch.
const LOW_HEALTH: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Wait,
    Move(Point),
    /// Use a health pack.
    Plan,
    /// Light a torch.
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Effect {
    remaining_uses: u32,
    activated_turn: Option<u32>,
    duration: u32,
}

impl Effect {
    fn new(uses: u32, duration: u32) -> Self {
        Self {
            remaining_uses: uses,
            activated_turn: None,
            duration,
        }
    }

    fn is_active(&self) -> bool {
        self.activated_turn.is_some()
    }

    fn expire(&mut self, turn: u32) {
        if self
            .activated_turn
            .is_some_and(|activated| turn > activated + self.duration)
        {
            self.activated_turn = None;
        }
    }

    fn activate(&mut self, turn: u32) {
        self.remaining_uses -= 1;
        self.activated_turn = Some(turn);
    }
}

/// Turns the best search result into this turn's command, spending health
/// packs and torches when the plan is to stay put.
pub struct SurvivalExecutor {
    explorator: Explorator,
    heal: Effect,
    light: Effect,
    last_solution: Option<Solution>,
}

impl SurvivalExecutor {
    pub fn new(explorator: Explorator) -> Self {
        Self {
            explorator,
            heal: Effect::new(HEALTH_PACKS, HEAL_DURATION),
            light: Effect::new(LIGHTS, LIGHT_DURATION),
            last_solution: None,
        }
    }

    pub fn health_packs(&self) -> u32 {
        self.heal.remaining_uses
    }

    pub fn lights(&self) -> u32 {
        self.light.remaining_uses
    }

    pub fn last_solution(&self) -> Option<&Solution> {
        self.last_solution.as_ref()
    }

    pub fn decide(&mut self, world: &WorldState) -> Command {
        self.heal.expire(world.turn);
        self.light.expire(world.turn);

        let solution = self.explorator.generate_best_solution(world);
        let destination = solution.first_step();
        self.last_solution = Some(solution);

        self.choose_command(world, destination)
    }

    fn choose_command(&mut self, world: &WorldState, destination: Option<Point>) -> Command {
        let player = &world.my_player;

        match destination {
            Some(destination) if destination != player.position => {
                tracing::debug!(x = destination.x, y = destination.y, "Move");
                Command::Move(destination)
            }
            _ => {
                let no_effect = !self.heal.is_active() && !self.light.is_active();
                let attacking = attacking_wanderers(world).len();

                if player.health < HEAL_THRESHOLD && no_effect && self.heal.remaining_uses > 0 {
                    tracing::info!(health = player.health, "Using health pack");
                    self.heal.activate(world.turn);
                    Command::Plan
                } else if (attacking >= 2 || (attacking > 0 && player.health < LOW_HEALTH))
                    && no_effect
                    && self.light.remaining_uses > 0
                {
                    tracing::info!(attacking, "Lighting torch");
                    self.light.activate(world.turn);
                    Command::Light
                } else {
                    tracing::debug!("Wait");
                    Command::Wait
                }
            }
        }
    }
}

/// Active wanderers hunting my position from a medium range.
fn attacking_wanderers(world: &WorldState) -> Vec<&Wanderer> {
    let player = &world.my_player;
    let mut attacking: Vec<&Wanderer> = world
        .wanderers
        .iter()
        .filter(|wanderer| {
            wanderer
                .target
                .and_then(|target| world.player(target))
                .is_some_and(|target| target.position == player.position)
        })
        .filter(|wanderer| wanderer.state != MinionState::Spawning)
        .filter(|wanderer| wanderer.remaining_time > 3)
        .filter(|wanderer| {
            let distance = PathFinder::real_distance_between(&world.grid, player, *wanderer);
            distance > 2 && distance < 10
        })
        .collect();
    attacking.sort_by_key(|wanderer| wanderer.position.distance(&player.position));
    attacking
}
