use std::collections::HashSet;
use std::sync::Arc;

use crate::infra::{PathFinder, Point};
use crate::state::{EntityId, MinionState, WorldState};

pub const WANDERER_DAMAGE: i32 = 20;
pub const SLASHER_DAMAGE: i32 = 20;
pub const SHELTER_HEAL: i32 = 5;

/// Players closer than this drain sanity at the group rate.
const GROUP_RANGE: i32 = 2;
/// Wanderers farther than this from my player are left untouched.
const WANDERER_SIMULATION_RANGE: i32 = 5;

const STALKING_TURNS: i32 = 2;
const RUSHING_TURNS: i32 = 1;
const STUNNED_TURNS: i32 = 6;

/// Replays one full turn of game rules for a hypothesized move of my player.
pub struct WorldSimulator;

impl WorldSimulator {
    /// Returns the next world; `world` itself is never modified.
    ///
    /// # Panics
    ///
    /// If `destination` is a wall, off the grid, or more than one step away
    /// from my player.
    /// Candidate generation is responsible for only proposing legal moves.
    pub fn simulate(world: &WorldState, destination: Point) -> WorldState {
        let mut next = world.clone();

        Self::simulate_my_player_move(&mut next, destination);
        Self::simulate_other_players(&mut next);
        Self::simulate_wanderers(&mut next);
        Self::simulate_slashers(&mut next);
        Self::simulate_shelters(world, &mut next);

        next
    }

    fn sanity_loss(world: &WorldState, position: Point, player_id: EntityId) -> i32 {
        let grouped = world
            .all_players()
            .filter(|player| player.id != player_id)
            .any(|player| player.position.distance(&position) <= GROUP_RANGE);
        if grouped {
            world.rules.sanity_loss_group
        } else {
            world.rules.sanity_loss_lonely
        }
    }

    fn simulate_my_player_move(world: &mut WorldState, destination: Point) {
        let origin = world.my_player.position;
        if origin.distance(&destination) > 1 || !world.grid.is_walkable(&destination) {
            panic!(
                "illegal move for player {} from ({}, {}) to ({}, {})",
                world.my_player.id, origin.x, origin.y, destination.x, destination.y
            );
        }

        world.my_player.position = destination;
        let loss = Self::sanity_loss(world, destination, world.my_player.id);
        world.my_player.health -= loss;

        if world
            .shelter_at(destination)
            .is_some_and(|shelter| shelter.energy > 0)
        {
            world.my_player.health += SHELTER_HEAL;
        }
    }

    fn simulate_other_players(world: &mut WorldState) {
        let losses: Vec<i32> = world
            .other_players
            .iter()
            .map(|player| Self::sanity_loss(world, player.position, player.id))
            .collect();

        for (player, loss) in world.other_players.iter_mut().zip(losses) {
            player.health -= loss;
        }
    }

    fn simulate_wanderers(world: &mut WorldState) {
        let grid = Arc::clone(&world.grid);
        let player_position = world.my_player.position;
        // Ids that count as "my player" for a wanderer's target.
        let my_ids: HashSet<EntityId> = world
            .all_players()
            .filter(|player| {
                player.id == world.my_player.id || player.position == player_position
            })
            .map(|player| player.id)
            .collect();

        let mut damage = 0;
        world.wanderers.retain_mut(|wanderer| {
            if wanderer.position.distance(&player_position) > WANDERER_SIMULATION_RANGE {
                return true;
            }

            if wanderer.state == MinionState::Spawning {
                wanderer.remaining_time -= 1;
                if wanderer.remaining_time == 0 {
                    wanderer.state = MinionState::Wandering;
                }
                return true;
            }

            if wanderer.position == player_position {
                tracing::trace!(wanderer = wanderer.id, "Wanderer already on player");
                damage += WANDERER_DAMAGE;
                return false;
            }

            if wanderer.position.is_adjacent(&player_position) {
                wanderer.position = player_position;
            } else if wanderer.target.is_some_and(|target| my_ids.contains(&target)) {
                let step = PathFinder::find_path(&grid, wanderer.position, player_position)
                    .and_then(|path| path.first().copied());
                if let Some(step) = step {
                    wanderer.position = step;
                }
            }

            if wanderer.position == player_position {
                tracing::trace!(wanderer = wanderer.id, "Wanderer caught player");
                damage += WANDERER_DAMAGE;
                return false;
            }

            wanderer.remaining_time -= 1;
            true
        });

        world.my_player.health -= damage;
    }

    fn simulate_slashers(world: &mut WorldState) {
        let grid = Arc::clone(&world.grid);
        let player_position = world.my_player.position;
        let in_sight =
            |position: Point| PathFinder::direct_line_path(&grid, player_position, position);

        let mut damage = 0;
        for slasher in world.slashers.iter_mut() {
            if slasher.state == MinionState::Stalking && in_sight(slasher.position) {
                slasher.target_position = player_position;
            }

            slasher.state_turn_remaining -= 1;

            // A rush always resolves within the turn.
            if slasher.state == MinionState::Rushing {
                slasher.state_turn_remaining = 0;
            }

            if slasher.state == MinionState::Wandering && in_sight(slasher.position) {
                slasher.target_position = player_position;
                slasher.state = MinionState::Stalking;
                slasher.state_turn_remaining = STALKING_TURNS;
            } else if slasher.state_turn_remaining == 0 {
                match slasher.state {
                    MinionState::Spawning | MinionState::Stalking => {
                        slasher.state = MinionState::Rushing;
                        slasher.state_turn_remaining = RUSHING_TURNS;
                    }
                    MinionState::Rushing => {
                        // Out of sight: stays rushing and retries next turn.
                        if in_sight(slasher.position) {
                            slasher.position = slasher.target_position;
                            damage += SLASHER_DAMAGE;
                            slasher.state = MinionState::Stunned;
                            slasher.state_turn_remaining = STUNNED_TURNS;
                        }
                    }
                    MinionState::Stunned => slasher.state = MinionState::Wandering,
                    MinionState::Wandering => {}
                }
            }

            tracing::trace!(
                slasher = slasher.id,
                state = ?slasher.state,
                remaining = slasher.state_turn_remaining,
                "Slasher updated"
            );
        }

        world.my_player.health -= damage;
    }

    /// Occupancy is read from the world as it was before the move.
    fn simulate_shelters(before: &WorldState, world: &mut WorldState) {
        for shelter in world.shelters.iter_mut() {
            let occupants = before
                .all_players()
                .filter(|player| player.position == shelter.position)
                .count() as i32;
            shelter.energy -= occupants;
        }
    }
}
