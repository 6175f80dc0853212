//! Florence Financial Impact command line
//!
//! Thin presentation adapter over `flo_finance_core`: list and resolve
//! health systems or hospitals, then show the savings estimate (or the
//! RN need alone for promotional records).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flo_finance_core::{
    parse_currency, parse_fte, DisplayProjection, EditOutcome, EstimateBranch, EstimateInputs,
    EstimatorConfig, FinanceModel, InputSession, ReferenceCache, Selection,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;

#[derive(Parser)]
#[command(name = "flo-finance")]
#[command(about = "Estimate savings from replacing agency nurses with Florence placements")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Health systems CSV (overrides config)
    #[arg(long, global = true)]
    organizations: Option<PathBuf>,

    /// Hospitals CSV (overrides config)
    #[arg(long, global = true)]
    facilities: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Rate and need overrides, given as the text a user would type
#[derive(clap::Args, Debug, Default)]
struct Overrides {
    /// Staff labor rate, e.g. "$45.00"
    #[arg(long)]
    staff_rate: Option<String>,

    /// Agency labor rate, e.g. "$90.00"
    #[arg(long)]
    agency_rate: Option<String>,

    /// Estimated RN need (FTE)
    #[arg(long)]
    rn_need: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List health system names
    Systems,

    /// List states that have hospitals
    States,

    /// List hospital names in a state
    Hospitals {
        #[arg(long)]
        state: String,
    },

    /// Show a health system and its estimate
    System {
        name: String,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Show a hospital and its estimate
    Hospital {
        name: String,

        /// Restrict the lookup to one state
        #[arg(long)]
        state: Option<String>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Compute savings directly from rates and need
    Savings {
        #[arg(long)]
        staff_rate: String,

        #[arg(long)]
        agency_rate: String,

        #[arg(long)]
        rn_need: String,
    },
}

fn main() -> ExitCode {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,flo_finance_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<EstimatorConfig> {
    let mut config = match &cli.config {
        Some(path) => EstimatorConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => EstimatorConfig::default(),
    };

    if let Some(path) = &cli.organizations {
        config.data.organizations = path.clone();
    }
    if let Some(path) = &cli.facilities {
        config.data.facilities = path.clone();
    }

    Ok(config)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let model = &config.finance;

    // Tables are read on the first lookup, so `savings` never touches them
    let cache = ReferenceCache::from_paths(&config.data);
    let selector = || cache.selector().context("Failed to load reference data");

    match &cli.command {
        Commands::Systems => output::names(&selector()?.list_organization_names(), cli.json),
        Commands::States => {
            let states: Vec<&str> = selector()?.list_states().into_iter().collect();
            output::names(&states, cli.json)
        }
        Commands::Hospitals { state } => {
            output::names(&selector()?.list_facility_names(state), cli.json)
        }
        Commands::System { name, overrides } => {
            let selection = selector()?.resolve_organization(name)?;
            show(&selection, overrides, model, cli.json)
        }
        Commands::Hospital {
            name,
            state,
            overrides,
        } => {
            let selector = selector()?;
            let selection = match state {
                Some(state) => selector.resolve_facility_in_state(state, name),
                None => selector.resolve_facility(name),
            }?;
            show(&selection, overrides, model, cli.json)
        }
        Commands::Savings {
            staff_rate,
            agency_rate,
            rn_need,
        } => {
            let inputs = EstimateInputs {
                staff_rate: parse_currency(staff_rate).context("Invalid --staff-rate")?,
                agency_rate: parse_currency(agency_rate).context("Invalid --agency-rate")?,
                rn_need: parse_fte(rn_need).context("Invalid --rn-need")?,
            };
            let estimate = EstimateBranch::Comparison.evaluate(&inputs, model);
            output::estimate_only(&estimate, cli.json)
        }
    }
}

fn show<R>(
    selection: &Selection<'_, R>,
    overrides: &Overrides,
    model: &FinanceModel,
    json: bool,
) -> Result<()>
where
    R: DisplayProjection,
    R::Summary: output::SummaryLines,
{
    let mut session = InputSession::from_selection(selection);
    apply_overrides(&mut session, overrides);

    let estimate = session.estimate(model);
    output::selection(&selection.summary, &estimate, json)
}

fn apply_overrides(session: &mut InputSession, overrides: &Overrides) {
    let edits: [(&str, Option<&String>, fn(&mut InputSession, &str) -> EditOutcome); 3] = [
        ("staff-rate", overrides.staff_rate.as_ref(), InputSession::edit_staff_rate),
        ("agency-rate", overrides.agency_rate.as_ref(), InputSession::edit_agency_rate),
        ("rn-need", overrides.rn_need.as_ref(), InputSession::edit_rn_need),
    ];

    for (flag, text, edit) in edits {
        if let Some(text) = text {
            if edit(session, text) == EditOutcome::KeptPrevious {
                tracing::warn!(flag, input = %text, "Could not read override, using record default");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general_health() -> InputSession {
        InputSession::new(
            EstimateInputs {
                staff_rate: 4_500,
                agency_rate: 9_000,
                rn_need: 12.5,
            },
            EstimateBranch::Comparison,
        )
    }

    fn overrides(staff: Option<&str>, agency: Option<&str>, need: Option<&str>) -> Overrides {
        Overrides {
            staff_rate: staff.map(str::to_string),
            agency_rate: agency.map(str::to_string),
            rn_need: need.map(str::to_string),
        }
    }

    #[test]
    fn test_unreadable_override_keeps_record_default() {
        let mut session = general_health();
        apply_overrides(&mut session, &overrides(Some("cheap"), Some("$95.00"), Some("1e308")));

        assert_eq!(session.inputs().staff_rate, 4_500);
        assert_eq!(session.inputs().agency_rate, 9_500);
        assert_eq!(session.inputs().rn_need, 12.5);
    }

    #[test]
    fn test_no_overrides_leaves_defaults() {
        let mut session = general_health();
        apply_overrides(&mut session, &Overrides::default());
        assert_eq!(session, general_health());
    }

    #[test]
    fn test_override_flags_parse() {
        let cli = Cli::try_parse_from([
            "flo-finance",
            "--json",
            "system",
            "General Health System",
            "--staff-rate",
            "$50.00",
            "--rn-need",
            "10",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::System { name, overrides } => {
                assert_eq!(name, "General Health System");
                assert_eq!(overrides.staff_rate.as_deref(), Some("$50.00"));
                assert_eq!(overrides.agency_rate, None);
                assert_eq!(overrides.rn_need.as_deref(), Some("10"));
            }
            _ => panic!("expected system subcommand"),
        }
    }
}
