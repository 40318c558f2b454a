//! Main entry point for the rotation binary
//!
//! Wires the YAML store into the runner and maps run outcomes to exit codes.

use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use rotation::{
    ExtendTarget, ExtensionState, RotationError, RotationRunner, services::YamlRotationStore,
};
use shared::{CommandId, RotationConfig, command_debug, config, logging};

/// Exit code when extension stopped early for lack of eligible members
const EXIT_INSUFFICIENT_MEMBERS: u8 = 2;
/// Exit code when `status --check` finds the schedule running short
const EXIT_RUNNING_SHORT: u8 = 3;

/// Keeps the security on-call rotation schedule fair and populated
#[derive(Parser)]
#[command(name = "rotation")]
#[command(about = "Extends and inspects the on-call rotation schedule")]
pub struct Args {
    /// Path to the rotation YAML file
    #[arg(long, global = true, env = "ROTATION_FILE", default_value = config::DEFAULT_ROTATION_FILE)]
    pub rotation_file: PathBuf,

    /// Path to the rotation members YAML file
    #[arg(long, global = true, env = "ROTATION_MEMBERS_FILE", default_value = config::DEFAULT_MEMBERS_FILE)]
    pub rotation_members_file: PathBuf,

    /// Length of each rotation in weeks
    #[arg(long, global = true, env = "ROTATION_LENGTH_WEEKS", default_value_t = config::DEFAULT_ROTATION_LENGTH_WEEKS)]
    pub rotation_length_weeks: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Append future rotations to the schedule
    Extend(ExtendArgs),
    /// Show who is on call and whether the schedule needs extending
    Status(StatusArgs),
    /// Check that the members and rotation files load and agree
    Verify,
}

#[derive(ClapArgs)]
pub struct ExtendArgs {
    /// Number of people per rotation
    #[arg(long, env = "ROTATION_PEOPLE_PER_ROTATION", default_value_t = config::DEFAULT_PEOPLE_PER_ROTATION)]
    pub people_per_rotation: usize,

    /// Number of immediately preceding rotations a member sits out
    #[arg(long, env = "ROTATION_NO_REPEAT_WINDOW", default_value_t = config::DEFAULT_NO_REPEAT_WINDOW)]
    pub no_repeat_window: usize,

    /// Number of rotations to add
    #[arg(long, conflicts_with = "ensure_weeks")]
    pub num_rotations: Option<usize>,

    /// Ensure the schedule covers at least this many weeks into the future
    #[arg(long, env = "ROTATION_ENSURE_WEEKS")]
    pub ensure_weeks: Option<u32>,

    /// Print the new rotation file to stdout instead of overwriting it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs)]
pub struct StatusArgs {
    /// Instant to evaluate (RFC 3339), defaults to now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Exit non-zero when the schedule is running short
    #[arg(long)]
    pub check: bool,

    /// Days before the final rotation start at which the schedule counts as running short
    #[arg(long, default_value_t = config::DEFAULT_NAG_WINDOW_DAYS)]
    pub nag_window_days: u32,
}

impl Args {
    fn command_id(&self) -> CommandId {
        match self.command {
            Command::Extend(_) => CommandId::Extend,
            Command::Status(_) => CommandId::Status,
            Command::Verify => CommandId::Verify,
        }
    }

    fn to_config(&self) -> RotationConfig {
        let mut config = RotationConfig {
            rotation_file: self.rotation_file.clone(),
            members_file: self.rotation_members_file.clone(),
            rotation_length_weeks: self.rotation_length_weeks,
            ..RotationConfig::default()
        };
        match &self.command {
            Command::Extend(extend) => {
                config.people_per_rotation = extend.people_per_rotation;
                config.no_repeat_window = extend.no_repeat_window;
                if let Some(weeks) = extend.ensure_weeks {
                    config.horizon_weeks = weeks;
                }
            }
            Command::Status(status) => config.nag_window_days = status.nag_window_days,
            Command::Verify => {}
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Environment overrides for the flags above may live in .env
    let _ = dotenv::dotenv();
    let args = Args::parse();

    let command = CommandId::init(args.command_id());
    logging::init_tracing_with_level(Some(&args.log_level));

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            logging::log_error(command, "Rotation command", &err);
            if let Some(RotationError::MalformedInput(cause)) = err.downcast_ref::<RotationError>() {
                if cause.is_malformed_input() {
                    eprintln!("Fix the members or rotation file by hand, then rerun.");
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = args.to_config();
    let store = YamlRotationStore::from_config(&config);
    let runner = RotationRunner::new(config.clone(), store)?;
    let now = Utc::now();

    logging::log_startup(CommandId::current(), &format!("rotation {}", CommandId::current()));
    command_debug!(CommandId::current(), "Configuration: {:?}", config);

    match args.command {
        Command::Extend(extend) => {
            let target = match extend.num_rotations {
                Some(count) => ExtendTarget::Count(count),
                None => ExtendTarget::Horizon(config.horizon()),
            };

            let report = runner.extend(now, target, extend.dry_run).await?;

            // stdout holds nothing but the document on a dry run
            if extend.dry_run {
                logging::log_progress(
                    CommandId::current(),
                    "Dry run",
                    "not writing to file; would have written:",
                );
                print!("{}", report.rotation_file().to_yaml_str()?);
            } else {
                for slot in report.extension.appended_slots() {
                    let names: Vec<&str> = slot.members.iter().map(|m| m.as_str()).collect();
                    println!("{}  {}", slot.start.format("%Y-%m-%d"), names.join(", "));
                }
            }

            if let ExtensionState::Aborted(shortfall) = &report.extension.state {
                eprintln!("{shortfall}");
                eprintln!("Edit the members or rotation file to resolve this, then rerun.");
                return Ok(ExitCode::from(EXIT_INSUFFICIENT_MEMBERS));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Status(status_args) => {
            let at = status_args.at.unwrap_or(now);
            let status = runner.status(at).await?;

            match &status.current {
                Some(slot) => {
                    let names: Vec<&str> = status.on_call().iter().map(|m| m.as_str()).collect();
                    println!(
                        "On call {} -> {}: {}",
                        slot.start.format("%Y-%m-%d"),
                        slot.end.format("%Y-%m-%d"),
                        names.join(", ")
                    );
                }
                None => println!("No rotation covers {}", at.to_rfc3339()),
            }
            match status.final_start {
                Some(final_start) => println!(
                    "Last rotation starts {} ({} days away)",
                    final_start.to_rfc3339(),
                    status.time_until_final_start().map_or(0, |left| left.num_days())
                ),
                None => println!("No rotations are scheduled"),
            }

            if status.running_short {
                println!("The rotation schedule is running short; run `rotation extend`.");
                if status_args.check {
                    return Ok(ExitCode::from(EXIT_RUNNING_SHORT));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify => {
            let report = runner.verify(now).await?;
            logging::log_success(
                CommandId::current(),
                &format!(
                    "Parsed {} members and {} rotations",
                    report.members, report.rotations
                ),
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
