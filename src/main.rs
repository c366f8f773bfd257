use std::sync::Arc;

use dotenv::dotenv;
use kutulu_bot::infra::DefaultObserver;
use kutulu_bot::state::{Minion, MinionState, Player, Rules, Slasher};
use kutulu_bot::{EngineConfig, Game, Grid, Point, WorldState};
use time::format_description;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const ARENA: [&str; 11] = [
    "###############",
    "#.....#.#.....#",
    "#.###.....###.#",
    "#.#U.......U#.#",
    "#...#.###.#...#",
    "#.#...#w#...#.#",
    "#...#.###.#...#",
    "#.#U.......U#.#",
    "#.###.....###.#",
    "#.....#.#.....#",
    "###############",
];

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kutulu_bot=debug,info"));
    let timer = UtcTime::new(format_description::parse(
        "[hour]:[minute]:[second].[subsecond digits:3]",
    )?);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .with_timer(timer)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn initial_world() -> Result<WorldState, Box<dyn std::error::Error>> {
    let grid = Arc::new(Grid::from_ascii(&ARENA)?);
    let world = WorldState::new(grid, Player::new(0, Point::new(7, 3)), Rules::default())
        .with_other_players(vec![
            Player::new(1, Point::new(1, 1)),
            Player::new(2, Point::new(13, 9)),
        ])
        .with_minions([
            Minion::Slasher(Slasher::new(10, Point::new(1, 9), 5)),
            Minion::Slasher(
                Slasher::new(11, Point::new(13, 1), 3).with_state(MinionState::Wandering),
            ),
        ]);
    world.validate()?;
    Ok(world)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging()?;

    let config = EngineConfig::from_env();
    tracing::info!(?config, "Engine configuration");

    let mut game = Game::new(initial_world()?, config, DefaultObserver);
    let outcome = game.run();

    tracing::info!(
        turns = outcome.turns,
        final_health = outcome.final_health,
        survived = outcome.survived,
        "Done"
    );
    Ok(())
}
