use crate::state::{Sprite, WorldState};

use super::explorator::Solution;

/// Sum of distances between my player and every wanderer locked on it.
pub fn hunting_wanderer_distance(world: &WorldState) -> i32 {
    world
        .wanderers
        .iter()
        .filter(|wanderer| world.targets_my_player(wanderer))
        .map(|wanderer| wanderer.distance_to(&world.my_player))
        .sum()
}

/// Highest final health first; among those, hunting wanderers as far away as
/// possible. Remaining ties keep the earliest enumerated solution.
pub fn select_best(solutions: Vec<Solution>) -> Option<Solution> {
    let max_health = solutions
        .iter()
        .map(|solution| solution.world.my_player.health)
        .max()?;
    tracing::debug!(max_health, candidates = solutions.len(), "Max expected health");

    let mut best: Option<(i32, Solution)> = None;
    for solution in solutions
        .into_iter()
        .filter(|solution| solution.world.my_player.health == max_health)
    {
        let score = hunting_wanderer_distance(&solution.world);
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            best = Some((score, solution));
        }
    }

    best.map(|(_, solution)| solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Point;
    use crate::state::{Grid, Minion, MinionState, Player, Rules, Wanderer};
    use std::sync::Arc;

    fn leaf(player: Point, health: i32, wanderer: Point, path: Vec<Point>) -> Solution {
        let grid = Arc::new(Grid::from_ascii(&[".........."; 10]).unwrap());
        let my_player = Player::new(0, player).with_health(health);
        let world = WorldState::new(grid, my_player, Rules::default()).with_minions([
            Minion::Wanderer(
                Wanderer::new(1, wanderer, 30)
                    .with_state(MinionState::Wandering)
                    .with_target(0),
            ),
        ]);
        Solution { world, path }
    }

    #[test]
    fn test_equal_health_prefers_distant_wanderers() {
        let near = leaf(Point::new(5, 5), 230, Point::new(5, 7), vec![Point::new(5, 5)]);
        let far = leaf(Point::new(2, 2), 230, Point::new(5, 5), vec![Point::new(2, 2)]);
        assert_eq!(hunting_wanderer_distance(&near.world), 2);
        assert_eq!(hunting_wanderer_distance(&far.world), 6);

        let best = select_best(vec![near, far]).unwrap();
        assert_eq!(best.path, vec![Point::new(2, 2)]);
    }

    #[test]
    fn test_health_beats_distance() {
        let healthy = leaf(Point::new(5, 5), 231, Point::new(5, 6), vec![Point::new(5, 5)]);
        let far = leaf(Point::new(0, 0), 230, Point::new(9, 9), vec![Point::new(0, 0)]);
        let best = select_best(vec![far, healthy]).unwrap();
        assert_eq!(best.path, vec![Point::new(5, 5)]);
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let first = leaf(Point::new(1, 1), 230, Point::new(1, 3), vec![Point::new(1, 1)]);
        let second = leaf(Point::new(4, 4), 230, Point::new(4, 6), vec![Point::new(4, 4)]);
        let best = select_best(vec![first, second]).unwrap();
        assert_eq!(best.path, vec![Point::new(1, 1)]);
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn test_untargeted_wanderers_do_not_count() {
        let mut solution = leaf(Point::new(1, 1), 230, Point::new(1, 5), vec![]);
        solution.world.wanderers[0].target = None;
        assert_eq!(hunting_wanderer_distance(&solution.world), 0);
    }
}
