use database::{DatabaseGenerator, DatabaseLoader};
use engine::Tournament;
use env_logger::Env;
use log::info;
use std::env;
use std::sync::Arc;
use web::{DEFAULT_PORT, LeagueAppData, LeagueServer};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let port = match env::var("LEAGUE_PORT") {
        Ok(value) => value.parse::<u16>()?,
        Err(_) => DEFAULT_PORT,
    };

    let seed = env::var("LEAGUE_SEED").map_or(true, |value| value != "false");

    let tournament = Tournament::in_memory();

    if seed {
        let database = DatabaseLoader::load()?;
        let summary = DatabaseGenerator::generate(&database, &tournament)?;

        info!("seed applied: {} teams in the table", summary.teams);
    } else {
        info!("starting with an empty league");
    }

    let data = LeagueAppData {
        tournament: Arc::new(tournament),
    };

    LeagueServer::new(data).run(port).await?;

    Ok(())
}
