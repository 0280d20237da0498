//! Real-time playback: print the sea, wait, advance a day, repeat.

use anyhow::Result;
use sea_core::RunConfig;
use sea_world::{RunSummary, Sea};
use std::io::Write;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

/// Play the sea until a species dies out or `max_days` pass, writing the
/// rendered sea to `out` before the first day and after every day.
pub async fn play<W: Write>(sea: &mut Sea, config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    let delay = Duration::from_millis(config.day_delay_ms);
    info!(
        max_days = config.max_days,
        day_delay_ms = config.day_delay_ms,
        "Starting playback"
    );

    writeln!(out, "{}", sea)?;
    let mut history = vec![sea.census()];

    for _ in 0..config.max_days {
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            sleep(delay).await;
        }

        let stats = sea.advance_one_day();
        history.push(stats.census);
        writeln!(out, "{}", sea)?;
        out.flush()?;

        crate::record_gauge!("population_predators", stats.census.predators, day => stats.day);
        crate::record_gauge!("population_victims", stats.census.victims, day => stats.day);
        if stats.births > 0 {
            crate::record_counter!("births", stats.births, day => stats.day);
        }
        debug!(
            day = stats.day,
            feedings = stats.feedings,
            starvations = stats.starvations,
            "Day played"
        );

        if let Some(extinction) = stats.census.extinction() {
            info!(day = stats.day, ?extinction, "Species died out");
            break;
        }
    }

    Ok(RunSummary::from_history(history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sea_core::{Extinction, SeaConfig};
    use sea_world::RunOutcome;

    fn run_config(sea: SeaConfig, max_days: u64) -> RunConfig {
        RunConfig {
            sea,
            max_days,
            day_delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_playback_prints_every_day() {
        let config = run_config(SeaConfig::default(), 3);
        let mut sea = Sea::with_rng(config.sea.clone(), ChaCha8Rng::seed_from_u64(4)).unwrap();
        let mut out = Vec::new();

        let summary = play(&mut sea, &config, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        // Default sea cannot lose its only predator or all ten victims in
        // three days.
        assert_eq!(summary.days, 3);
        assert_eq!(summary.outcome, RunOutcome::BudgetExhausted);
        assert_eq!(text.matches("Victims: ").count(), 4);
    }

    #[tokio::test]
    async fn test_playback_stops_on_extinction() {
        let sea_config = SeaConfig {
            predators: 0,
            ..Default::default()
        };
        let config = run_config(sea_config, 25);
        let mut sea = Sea::with_rng(config.sea.clone(), ChaCha8Rng::seed_from_u64(4)).unwrap();
        let mut out = Vec::new();

        let summary = play(&mut sea, &config, &mut out).await.unwrap();
        assert_eq!(summary.days, 1);
        assert_eq!(summary.outcome, RunOutcome::Extinct(Extinction::Predators));
        assert_eq!(String::from_utf8(out).unwrap().matches("Victims: ").count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_waits_between_days() {
        let mut config = run_config(SeaConfig::default(), 2);
        config.day_delay_ms = 1_000;
        let mut sea = Sea::with_rng(config.sea.clone(), ChaCha8Rng::seed_from_u64(8)).unwrap();
        let mut out = Vec::new();

        let started = tokio::time::Instant::now();
        play(&mut sea, &config, &mut out).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
