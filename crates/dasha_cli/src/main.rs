use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use dasha_time::{CivilTime, SECONDS_PER_DAY, TimeError, UtcOffset, format_local, jd_from_local};
use dasha_vedic::DashaError;
use dasha_vedic::dasha::{
    DashaConfig, DashaLevel, SubtreeRequest, dasha_cycle, dasha_records, resolve_birth_lord,
    vimshottari_report,
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod render;

use render::{ActivePeriod, chain_text, records_text, report_text};

/// Julian Day of the Unix epoch, 1970-01-01 00:00 UT.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

#[derive(Parser)]
#[command(name = "dasha", about = "Vimshottari dasha period calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Nakshatra and starting Mahadasha from the Moon's sidereal longitude
    Nakshatra {
        /// Moon sidereal ecliptic longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        moon_lon: f64,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Mahadasha sequence for a birth
    Mahadashas {
        /// Local birth time (YYYY-MM-DD HH:MM[:SS] or YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        birth: String,
        /// UTC offset of the birth time in hours (e.g. 5.5)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        tz: f64,
        /// Moon sidereal ecliptic longitude at birth in degrees
        #[arg(long, allow_hyphen_values = true)]
        moon_lon: f64,
        /// Levels to expand (1 = Mahadashas only, max 6)
        #[arg(long, default_value = "1")]
        depth: i32,
        #[arg(long)]
        json: bool,
    },
    /// Sub-periods of one period, given its bounds and lord
    Subtree {
        /// Period start, Julian Day UT
        #[arg(long)]
        start_jd: f64,
        /// Period end, Julian Day UT
        #[arg(long)]
        end_jd: f64,
        /// Ruling lord (English or Sanskrit name)
        #[arg(long)]
        lord: String,
        #[arg(long, default_value = "1")]
        depth: i32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        tz: f64,
        #[arg(long)]
        json: bool,
    },
    /// Active periods at an instant (default: now)
    Current {
        #[arg(long)]
        birth: String,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        tz: f64,
        #[arg(long, allow_hyphen_values = true)]
        moon_lon: f64,
        /// Local query time, same format and offset as --birth
        #[arg(long)]
        at: Option<String>,
        /// Levels to resolve (max 6)
        #[arg(long, default_value = "3")]
        depth: i32,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Dasha(#[from] DashaError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("system clock is before 1970")]
    Clock,
}

/// Install the stderr subscriber. `RUST_LOG` filters; `LOG_FORMAT=json`
/// switches to structured output.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "dasha_cli=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn parse_local(s: &str, offset: UtcOffset) -> Result<f64, TimeError> {
    let civil: CivilTime = s.parse()?;
    Ok(jd_from_local(&civil, offset))
}

fn now_jd() -> Result<f64, CliError> {
    let since = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| CliError::Clock)?;
    Ok(UNIX_EPOCH_JD + since.as_secs_f64() / SECONDS_PER_DAY)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn run(command: Commands) -> Result<String, CliError> {
    match command {
        Commands::Nakshatra { moon_lon, json } => {
            // Reference instant does not affect the nakshatra or the lord.
            let ctx = resolve_birth_lord(moon_lon, 0.0)?;
            if json {
                return to_json(&serde_json::json!({
                    "moon_sid_deg": ctx.moon_longitude_deg,
                    "nakshatra_index": ctx.nakshatra_index,
                    "nakshatra_name": ctx.nakshatra_name(),
                    "nakshatra_fraction": ctx.fraction_elapsed,
                    "start_lord": ctx.start_lord,
                    "elapsed_years": ctx.elapsed_years,
                    "balance_years": ctx.balance_years(),
                }));
            }
            Ok(format!(
                "{} (index {}) - {:.4} elapsed\nStarting lord: {} ({}), {:.4} y elapsed, {:.4} y balance\n",
                ctx.nakshatra_name(),
                ctx.nakshatra_index,
                ctx.fraction_elapsed,
                ctx.start_lord,
                ctx.start_lord.sanskrit_name(),
                ctx.elapsed_years,
                ctx.balance_years(),
            ))
        }

        Commands::Mahadashas {
            birth,
            tz,
            moon_lon,
            depth,
            json,
        } => {
            let offset = UtcOffset::from_hours(tz)?;
            let birth_jd = parse_local(&birth, offset)?;
            debug!(birth_jd, tz, "parsed birth time");
            let config = DashaConfig::default().with_depth(depth).with_offset(offset);
            let report = vimshottari_report(moon_lon, birth_jd, &config)?;
            info!(
                nakshatra = report.nakshatra_name.as_str(),
                lord = report.start_lord.name(),
                depth = config.max_depth,
                "computed mahadashas"
            );
            if json {
                to_json(&report)
            } else {
                Ok(report_text(&report))
            }
        }

        Commands::Subtree {
            start_jd,
            end_jd,
            lord,
            depth,
            tz,
            json,
        } => {
            let request = SubtreeRequest {
                start_jd,
                end_jd,
                tz_hours: tz,
                depth,
                lord,
            };
            let children = request.resolve()?;
            info!(
                lord = request.lord.as_str(),
                depth,
                periods = children.len(),
                "expanded subtree"
            );
            if json {
                to_json(&children)
            } else {
                Ok(records_text(&children, None))
            }
        }

        Commands::Current {
            birth,
            tz,
            moon_lon,
            at,
            depth,
            json,
        } => {
            let offset = UtcOffset::from_hours(tz)?;
            let birth_jd = parse_local(&birth, offset)?;
            let query_jd = match at {
                Some(s) => parse_local(&s, offset)?,
                None => now_jd()?,
            };
            let cycle = dasha_cycle(moon_lon, birth_jd, 1)?;
            let snapshot = cycle.active_at(query_jd, depth)?;
            info!(
                query_jd,
                levels = snapshot.periods.len(),
                "resolved active periods"
            );

            let records = dasha_records(&snapshot.periods, offset)?;
            let chain: Vec<ActivePeriod> = records
                .into_iter()
                .enumerate()
                .filter_map(|(i, rec)| {
                    DashaLevel::from_depth(i as i32 + 1).map(|level| ActivePeriod::new(level, rec))
                })
                .collect();
            if json {
                return to_json(&chain);
            }
            let header = format!("Active periods at {}\n", format_local(query_jd, offset)?);
            if chain.is_empty() {
                Ok(format!("{header}(outside the 120-year cycle)\n"))
            } else {
                Ok(header + &chain_text(&chain))
            }
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_local_applies_offset() {
        let ist = UtcOffset::from_hours(5.5).unwrap();
        let jd = parse_local("2000-01-01 17:30:00", ist).unwrap();
        assert!((jd - 2_451_545.0).abs() < 1e-9);
        assert!(parse_local("yesterday", ist).is_err());
    }

    #[test]
    fn nakshatra_text() {
        let out = run(Commands::Nakshatra {
            moon_lon: 0.0,
            json: false,
        })
        .unwrap();
        assert!(out.starts_with("Ashwini (index 0)"));
        assert!(out.contains("Starting lord: Ketu (Ketu)"));
    }

    #[test]
    fn subtree_unknown_lord_fails() {
        let err = run(Commands::Subtree {
            start_jd: 2_451_545.0,
            end_jd: 2_452_545.0,
            lord: "Pluto".to_string(),
            depth: 1,
            tz: 0.0,
            json: false,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown dasha lord 'Pluto'");
    }

    #[test]
    fn current_outside_cycle() {
        let out = run(Commands::Current {
            birth: "2000-01-01 12:00".to_string(),
            tz: 0.0,
            moon_lon: 0.0,
            at: Some("1990-01-01 00:00".to_string()),
            depth: 3,
            json: false,
        })
        .unwrap();
        assert!(out.contains("outside the 120-year cycle"));
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_jd().unwrap() > 2_458_849.5);
    }
}
