use anyhow::Result;
use switchgear_panel::{command::Command, config::Config, panel::Panel, telemetry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::sleep;
use tracing::{info, warn};

/// Stdin driver for the panel. Reads one command word per line, forwards it
/// to the command surface, and paces the finish phases: after a successful
/// close or trip initiation it waits the configured travel/operate time and
/// issues the matching finish, and it drops the K1 pulse after the configured
/// pulse duration. All timing lives here, never in the core.
#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;
    info!(
        close_travel_ms = cfg.timing.close_travel_ms,
        trip_operate_ms = cfg.timing.trip_operate_ms,
        k1_pulse_ms = cfg.timing.k1_pulse_ms,
        "starting incomer panel driver"
    );

    let mut panel = Panel::new();
    print_help();
    print_snapshot(&panel)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = telemetry::shutdown_signal() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "quit" {
                    break;
                }
                match Command::parse(trimmed) {
                    Some(cmd) => {
                        run_command(&mut panel, cmd, &cfg).await;
                        print_snapshot(&panel)?;
                    }
                    None => warn!(line = trimmed, "unrecognized command, ignoring"),
                }
            }
        }
    }

    info!("driver exiting");
    Ok(())
}

async fn run_command(panel: &mut Panel, cmd: Command, cfg: &Config) {
    match &cmd {
        Command::ToggleK1 => {
            let close_started = panel.execute(&cmd);
            if close_started {
                sleep(cfg.timing.close_travel()).await;
                panel.execute(&Command::FinishClose);
            }
            if panel.snapshot().remote_close_command_active {
                sleep(cfg.timing.k1_pulse()).await;
                panel.execute(&Command::EndK1Pulse);
            }
        }
        Command::InitiateDirectTrip { source, .. } => {
            if panel.execute(&cmd) {
                sleep(cfg.timing.trip_operate()).await;
                panel.execute(&Command::FinishDirectTrip { source: *source });
            }
        }
        Command::InitiateProtectionTrip => {
            if panel.execute(&cmd) {
                sleep(cfg.timing.trip_operate()).await;
                panel.execute(&Command::FinishProtectionTrip);
            }
        }
        _ => {
            panel.execute(&cmd);
        }
    }
}

fn print_snapshot(panel: &Panel) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&panel.snapshot())?);
    Ok(())
}

fn print_help() {
    println!(
        "commands: k1 | trip <manual|remote|kt|sync|uv|bf> [label] | prot-trip | \
         reset-k86 | dc | tc | service | earth | busv | coupler | reset | quit"
    );
}
