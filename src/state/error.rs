use std::error::Error;
use std::fmt;

use crate::infra::Point;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    UnknownMinionState(i32),
    UnknownEntityKind(String),
    EmptyGrid,
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    DuplicateEntity {
        kind: &'static str,
        id: i32,
    },
    EntityInWall {
        id: i32,
        position: Point,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateError::UnknownMinionState(state_id) => {
                write!(formatter, "Unknown minion state id {}", state_id)
            }
            StateError::UnknownEntityKind(kind) => {
                write!(formatter, "Unknown entity kind '{}'", kind)
            }
            StateError::EmptyGrid => write!(formatter, "Grid has no cells"),
            StateError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                formatter,
                "Grid row {} has {} cells, expected {}",
                row, found, expected
            ),
            StateError::DuplicateEntity { kind, id } => {
                write!(formatter, "Duplicate {} id {}", kind, id)
            }
            StateError::EntityInWall { id, position } => write!(
                formatter,
                "Entity {} placed on a wall at ({}, {})",
                id, position.x, position.y
            ),
        }
    }
}

impl Error for StateError {}
