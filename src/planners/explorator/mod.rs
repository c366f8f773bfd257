mod evaluator;
mod executor;
#[allow(clippy::module_inception)]
mod explorator;
mod simulator;

pub use evaluator::{hunting_wanderer_distance, select_best};
pub use executor::{Command, SurvivalExecutor};
pub use explorator::{Explorator, Solution};
pub use simulator::{SHELTER_HEAL, SLASHER_DAMAGE, WANDERER_DAMAGE, WorldSimulator};
