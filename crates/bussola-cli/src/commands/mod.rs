pub mod checkin;
pub mod config;
pub mod experiment;
pub mod nav;
pub mod onboarding;
pub mod priority;
pub mod reset;
pub mod stats;
pub mod status;
pub mod user;

use bussola_core::{Config, EnergyReading, Store};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Store over the data directory, configured from `config.toml`.
pub fn open_store() -> Result<Store, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = Store::open_default(config)?;
    tracing::debug!(user = %store.data().user.id, page = %store.page(), "store opened");
    Ok(store)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse `"f,m,e"` or a single value applied to all three axes.
pub fn parse_energy(raw: &str) -> Result<EnergyReading, Box<dyn std::error::Error>> {
    let values: Vec<u8> = raw
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid energy '{raw}': {e}"))?;
    let reading = match values.as_slice() {
        [level] => EnergyReading::uniform(*level)?,
        [fisica, mental, emocional] => EnergyReading::new(*fisica, *mental, *emocional)?,
        _ => return Err(format!("energy takes 1 or 3 values, got '{raw}'").into()),
    };
    Ok(reading)
}

/// Resolve an explicit check-in id or fall back to today's check-in.
pub fn resolve_checkin(store: &Store, id: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(id) = id {
        return Ok(id);
    }
    store
        .today_checkin()
        .map(|c| c.id.clone())
        .ok_or_else(|| "no check-in today; run `bussola checkin morning` first".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_accepts_one_or_three_values() {
        assert_eq!(parse_energy("4").unwrap(), EnergyReading::uniform(4).unwrap());
        assert_eq!(parse_energy("1, 2,3").unwrap(), EnergyReading::new(1, 2, 3).unwrap());
        assert!(parse_energy("1,2").is_err());
        assert!(parse_energy("6").is_err());
        assert!(parse_energy("x").is_err());
    }
}
