use std::time::Instant;

use anyhow::{Context, Result};
use weather_map::{Config, Mode, Tenths, process_file};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    log::debug!("{:?}", config);

    let start = Instant::now();

    let rendered = match config.mode {
        Mode::Fixed => process_file::<Tenths, _>(&config.path, config.buffer_capacity)
            .map(|map| map.to_string()),
        Mode::Float => process_file::<f64, _>(&config.path, config.buffer_capacity)
            .map(|map| map.to_string()),
    }
    .with_context(|| format!("failed to process {}", config.path.display()))?;

    let elapsed = start.elapsed();

    println!("{rendered}");
    println!("Processing took {:.3}s", elapsed.as_secs_f64());

    Ok(())
}
