use std::collections::BTreeSet;
use std::str::FromStr;

use crate::infra::Point;

use super::error::StateError;

pub type EntityId = i32;

pub const PLAYER_INITIAL_HEALTH: i32 = 250;

/// Anything with an identity and a position on the grid.
pub trait Sprite {
    fn id(&self) -> EntityId;
    fn position(&self) -> Point;

    fn distance_to(&self, other: &impl Sprite) -> i32
    where
        Self: Sized,
    {
        self.position().distance(&other.position())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: EntityId,
    pub position: Point,
    pub health: i32,
    /// Ids of players that yelled at this one.
    pub yelled_by: BTreeSet<EntityId>,
}

impl Player {
    pub fn new(id: EntityId, position: Point) -> Self {
        Self {
            id,
            position,
            health: PLAYER_INITIAL_HEALTH,
            yelled_by: BTreeSet::new(),
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }
}

impl Sprite for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinionState {
    Spawning,
    Wandering,
    Stalking,
    Rushing,
    Stunned,
}

impl MinionState {
    pub fn id(&self) -> i32 {
        match self {
            MinionState::Spawning => 0,
            MinionState::Wandering => 1,
            MinionState::Stalking => 2,
            MinionState::Rushing => 3,
            MinionState::Stunned => 4,
        }
    }
}

impl TryFrom<i32> for MinionState {
    type Error = StateError;

    fn try_from(state_id: i32) -> Result<Self, Self::Error> {
        match state_id {
            0 => Ok(MinionState::Spawning),
            1 => Ok(MinionState::Wandering),
            2 => Ok(MinionState::Stalking),
            3 => Ok(MinionState::Rushing),
            4 => Ok(MinionState::Stunned),
            other => Err(StateError::UnknownMinionState(other)),
        }
    }
}

/// Slow chaser. `remaining_time` counts down the spawn delay, then the lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wanderer {
    pub id: EntityId,
    pub position: Point,
    pub state: MinionState,
    pub remaining_time: i32,
    /// Player id, resolved through the owning world state.
    pub target: Option<EntityId>,
}

impl Wanderer {
    pub fn new(id: EntityId, position: Point, remaining_time: i32) -> Self {
        Self {
            id,
            position,
            state: MinionState::Spawning,
            remaining_time,
            target: None,
        }
    }

    pub fn with_state(mut self, state: MinionState) -> Self {
        self.state = state;
        self
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }
}

impl Sprite for Wanderer {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }
}

/// Line-of-sight hunter cycling through spawn, wander, stalk, rush and stun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slasher {
    pub id: EntityId,
    pub position: Point,
    pub state: MinionState,
    pub state_turn_remaining: i32,
    pub target_position: Point,
}

impl Slasher {
    pub fn new(id: EntityId, position: Point, state_turn_remaining: i32) -> Self {
        Self {
            id,
            position,
            state: MinionState::Spawning,
            state_turn_remaining,
            target_position: position,
        }
    }

    pub fn with_state(mut self, state: MinionState) -> Self {
        self.state = state;
        self
    }

    pub fn with_target_position(mut self, target_position: Point) -> Self {
        self.target_position = target_position;
        self
    }
}

impl Sprite for Slasher {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinionKind {
    Wanderer,
    Slasher,
}

impl MinionKind {
    pub fn name(&self) -> &'static str {
        match self {
            MinionKind::Wanderer => "wanderer",
            MinionKind::Slasher => "slasher",
        }
    }
}

impl FromStr for MinionKind {
    type Err = StateError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "WANDERER" => Ok(MinionKind::Wanderer),
            "SLASHER" => Ok(MinionKind::Slasher),
            other => Err(StateError::UnknownEntityKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Minion {
    Wanderer(Wanderer),
    Slasher(Slasher),
}

impl Minion {
    pub fn kind(&self) -> MinionKind {
        match self {
            Minion::Wanderer(_) => MinionKind::Wanderer,
            Minion::Slasher(_) => MinionKind::Slasher,
        }
    }

    pub fn state(&self) -> MinionState {
        match self {
            Minion::Wanderer(wanderer) => wanderer.state,
            Minion::Slasher(slasher) => slasher.state,
        }
    }
}

impl Sprite for Minion {
    fn id(&self) -> EntityId {
        match self {
            Minion::Wanderer(wanderer) => wanderer.id,
            Minion::Slasher(slasher) => slasher.id,
        }
    }

    fn position(&self) -> Point {
        match self {
            Minion::Wanderer(wanderer) => wanderer.position,
            Minion::Slasher(slasher) => slasher.position,
        }
    }
}
