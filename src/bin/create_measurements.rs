use std::env;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use rand::Rng;
use rand_distr::{Distribution, Normal};

const BUILTIN_STATIONS: &[(&str, f64)] = &[
    ("Abha", 18.0),
    ("Abidjan", 26.0),
    ("Accra", 26.4),
    ("Addis Ababa", 16.0),
    ("Anchorage", 2.8),
    ("Bulawayo", 18.9),
    ("Bāgepalli", 24.1),
    ("Cracow", 8.6),
    ("Dikson", -11.1),
    ("Hamburg", 9.7),
    ("Istanbul", 13.9),
    ("Konibodom", 14.1),
    ("Lima", 19.6),
    ("Palembang", 27.3),
    ("Roseau", 26.2),
    ("San Francisco", 14.6),
    ("St. John's", 5.0),
    ("Yakutsk", -8.8),
    ("Zürich", 9.3),
    ("Ürümqi", 7.4),
];

#[derive(Debug)]
struct Station {
    name: String,
    distribution: Normal<f64>,
}

impl Station {
    fn new(name: &str, mean: f64) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            distribution: Normal::new(mean, 10.0)
                .with_context(|| format!("no normal distribution for {name}"))?,
        })
    }

    fn sample(&self, rng: &mut impl Rng) -> f64 {
        self.distribution.sample(rng).clamp(-99.9, 99.9)
    }
}

impl FromStr for Station {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, mean) = s
            .split_once(';')
            .ok_or_else(|| anyhow!("expected `name;mean`, got {s:?}"))?;
        let mean: f64 = mean
            .trim()
            .parse()
            .with_context(|| format!("bad mean temperature in {s:?}"))?;
        Station::new(name, mean)
    }
}

fn load_stations(path: Option<String>) -> Result<Vec<Station>> {
    let Some(path) = path else {
        return BUILTIN_STATIONS
            .iter()
            .map(|&(name, mean)| Station::new(name, mean))
            .collect();
    };

    let stations: Vec<Station> = fs::read_to_string(&path)
        .with_context(|| format!("could not read {path}"))?
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| line.parse::<Station>())
        .collect::<Result<_>>()?;

    if stations.is_empty() {
        return Err(anyhow!("{path} lists no stations"));
    }

    Ok(stations)
}

/// Writes `<count>` random records to stdout, optionally drawing station
/// names and mean temperatures from a `name;mean` file.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let count: u64 = args
        .next()
        .context("usage: create_measurements <count> [stations.csv]")?
        .replace('_', "")
        .parse()
        .context("count must be an integer")?;

    let stations = load_stations(args.next())?;
    log::info!("writing {count} records for {} stations", stations.len());

    let mut rng = rand::rng();
    let mut out = BufWriter::new(io::stdout().lock());

    for _ in 0..count {
        let station = &stations[rng.random_range(0..stations.len())];
        let temp = station.sample(&mut rng);
        writeln!(out, "{};{:.1}", station.name, temp)?;
    }

    out.flush()?;

    Ok(())
}
