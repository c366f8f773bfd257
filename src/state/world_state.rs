use std::collections::HashSet;
use std::sync::Arc;

use crate::infra::Point;

use super::error::StateError;
use super::grid::Grid;
use super::sprites::{EntityId, Minion, MinionState, Player, Slasher, Sprite, Wanderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shelter {
    pub position: Point,
    pub energy: i32,
}

/// Per-game rule constants sent with the initial snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub sanity_loss_lonely: i32,
    pub sanity_loss_group: i32,
    pub wanderer_spawn_time: i32,
    pub wanderer_life_time: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            sanity_loss_lonely: 3,
            sanity_loss_group: 1,
            wanderer_spawn_time: 3,
            wanderer_life_time: 40,
        }
    }
}

/// Snapshot of every dynamic entity at a turn boundary. Cloning copies all
/// entities and shares the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldState {
    pub grid: Arc<Grid>,
    pub my_player: Player,
    pub other_players: Vec<Player>,
    pub wanderers: Vec<Wanderer>,
    pub slashers: Vec<Slasher>,
    pub shelters: Vec<Shelter>,
    pub rules: Rules,
    pub turn: u32,
}

impl WorldState {
    pub fn new(grid: Arc<Grid>, my_player: Player, rules: Rules) -> Self {
        let shelters = grid
            .shelter_positions()
            .into_iter()
            .map(|(position, energy)| Shelter { position, energy })
            .collect();
        Self {
            grid,
            my_player,
            other_players: Vec::new(),
            wanderers: Vec::new(),
            slashers: Vec::new(),
            shelters,
            rules,
            turn: 0,
        }
    }

    pub fn with_other_players(mut self, players: Vec<Player>) -> Self {
        self.other_players = players;
        self
    }

    pub fn with_minions(mut self, minions: impl IntoIterator<Item = Minion>) -> Self {
        for minion in minions {
            self.insert_minion(minion);
        }
        self
    }

    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.other_players
            .iter()
            .chain(std::iter::once(&self.my_player))
    }

    pub fn player(&self, id: EntityId) -> Option<&Player> {
        self.all_players().find(|player| player.id == id)
    }

    /// Adds a minion, replacing any minion of the same kind and id.
    pub fn insert_minion(&mut self, minion: Minion) {
        match minion {
            Minion::Wanderer(wanderer) => {
                match self.wanderers.iter_mut().find(|w| w.id == wanderer.id) {
                    Some(existing) => *existing = wanderer,
                    None => self.wanderers.push(wanderer),
                }
            }
            Minion::Slasher(slasher) => {
                match self.slashers.iter_mut().find(|s| s.id == slasher.id) {
                    Some(existing) => *existing = slasher,
                    None => self.slashers.push(slasher),
                }
            }
        }
    }

    pub fn minions(&self) -> impl Iterator<Item = Minion> + '_ {
        self.wanderers
            .iter()
            .cloned()
            .map(Minion::Wanderer)
            .chain(self.slashers.iter().cloned().map(Minion::Slasher))
    }

    pub fn shelter_at(&self, position: Point) -> Option<&Shelter> {
        self.shelters.iter().find(|shelter| shelter.position == position)
    }

    /// True if the wanderer is locked on my player, by id or by position.
    pub fn targets_my_player(&self, wanderer: &Wanderer) -> bool {
        match wanderer.target {
            Some(target) if target == self.my_player.id => true,
            Some(target) => self
                .player(target)
                .is_some_and(|player| player.position == self.my_player.position),
            None => false,
        }
    }

    pub fn record_yell(&mut self, launcher: EntityId, target: EntityId) {
        if target == self.my_player.id {
            tracing::debug!(launcher, "Yelled at by another player");
            self.my_player.yelled_by.insert(launcher);
        }
    }

    /// Drops wanderers whose lifetime ran out. The simulator only counts down.
    pub fn retire_expired_wanderers(&mut self) -> usize {
        let before = self.wanderers.len();
        self.wanderers.retain(|wanderer| {
            wanderer.state == MinionState::Spawning || wanderer.remaining_time > 0
        });
        before - self.wanderers.len()
    }

    pub fn validate(&self) -> Result<(), StateError> {
        let mut player_ids = HashSet::new();
        for player in self.all_players() {
            if !player_ids.insert(player.id) {
                return Err(StateError::DuplicateEntity {
                    kind: "player",
                    id: player.id,
                });
            }
        }

        let mut minion_ids = HashSet::new();
        for minion in self.minions() {
            if !minion_ids.insert((minion.kind(), minion.id())) {
                return Err(StateError::DuplicateEntity {
                    kind: minion.kind().name(),
                    id: minion.id(),
                });
            }
        }

        let positions = self
            .all_players()
            .map(|p| (p.id, p.position))
            .chain(self.minions().map(|m| (m.id(), m.position())));
        for (id, position) in positions {
            if self.grid.is_wall(position) {
                return Err(StateError::EntityInWall { id, position });
            }
        }

        Ok(())
    }

    pub fn draw_ascii_map(&self) -> String {
        let mut rows: Vec<Vec<char>> = (0..self.grid.height)
            .map(|y| self.grid.row_symbols(y))
            .collect();

        let mut overlay = |pos: Point, symbol: char| {
            if self.grid.in_bounds(&pos) {
                rows[pos.y as usize][pos.x as usize] = symbol;
            }
        };
        for wanderer in &self.wanderers {
            overlay(wanderer.position, 'W');
        }
        for slasher in &self.slashers {
            overlay(slasher.position, 'S');
        }
        for player in &self.other_players {
            overlay(player.position, 'P');
        }
        overlay(self.my_player.position, 'M');

        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldState {
        let grid = Arc::new(Grid::from_ascii(&["#####", "#..U#", "#...#", "#####"]).unwrap());
        WorldState::new(grid, Player::new(0, Point::new(1, 1)), Rules::default())
            .with_other_players(vec![Player::new(1, Point::new(2, 2))])
    }

    #[test]
    fn test_shelters_copied_from_grid() {
        let world = world();
        assert_eq!(
            world.shelters,
            vec![Shelter {
                position: Point::new(3, 1),
                energy: 10
            }]
        );
        assert!(world.shelter_at(Point::new(3, 1)).is_some());
    }

    #[test]
    fn test_insert_minion_replaces_same_id() {
        let mut world = world();
        world.insert_minion(Minion::Wanderer(Wanderer::new(5, Point::new(1, 2), 3)));
        world.insert_minion(Minion::Wanderer(
            Wanderer::new(5, Point::new(2, 1), 2).with_state(MinionState::Wandering),
        ));
        world.insert_minion(Minion::Slasher(Slasher::new(5, Point::new(3, 2), 5)));
        assert_eq!(world.wanderers.len(), 1);
        assert_eq!(world.wanderers[0].position, Point::new(2, 1));
        assert_eq!(world.slashers.len(), 1);
        assert_eq!(world.minions().count(), 2);
        assert!(world.validate().is_ok());
    }

    #[test]
    fn test_targets_my_player_by_id_or_position() {
        let mut world = world();
        let by_id = Wanderer::new(1, Point::new(3, 2), 0).with_target(0);
        let by_other = Wanderer::new(2, Point::new(3, 2), 0).with_target(1);
        let untargeted = Wanderer::new(3, Point::new(3, 2), 0);
        assert!(world.targets_my_player(&by_id));
        assert!(!world.targets_my_player(&by_other));
        assert!(!world.targets_my_player(&untargeted));

        world.other_players[0].position = world.my_player.position;
        assert!(world.targets_my_player(&by_other));
    }

    #[test]
    fn test_record_yell_only_for_my_player() {
        let mut world = world();
        world.record_yell(1, 0);
        world.record_yell(0, 1);
        assert_eq!(world.my_player.yelled_by.iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_retire_expired_wanderers() {
        let mut world = world().with_minions([
            Minion::Wanderer(Wanderer::new(1, Point::new(1, 2), 0)),
            Minion::Wanderer(
                Wanderer::new(2, Point::new(2, 1), 0).with_state(MinionState::Wandering),
            ),
            Minion::Wanderer(
                Wanderer::new(3, Point::new(3, 2), 4).with_state(MinionState::Wandering),
            ),
        ]);
        assert_eq!(world.retire_expired_wanderers(), 1);
        let ids: Vec<_> = world.wanderers.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_validate_rejects_bad_entities() {
        let mut world = world();
        world.other_players.push(Player::new(1, Point::new(2, 1)));
        assert_eq!(
            world.validate(),
            Err(StateError::DuplicateEntity { kind: "player", id: 1 })
        );

        let world =
            self::world().with_minions([Minion::Slasher(Slasher::new(9, Point::new(0, 0), 5))]);
        assert_eq!(
            world.validate(),
            Err(StateError::EntityInWall {
                id: 9,
                position: Point::new(0, 0)
            })
        );
    }

    #[test]
    fn test_draw_ascii_map() {
        let world = world().with_minions([Minion::Wanderer(Wanderer::new(4, Point::new(3, 2), 3))]);
        assert_eq!(world.draw_ascii_map(), "#####\n#M.U#\n#.PW#\n#####");
    }
}
