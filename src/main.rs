use clap::{Arg, Command};
use std::error::Error;
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};

use ftpmirror::logging::init_tracing;
use ftpmirror::{
	default_settings_path, load_settings, save_settings, EventSink, GlobalConfig, SyncController,
	UiEvent,
};

fn settings_path(matches: &clap::ArgMatches) -> Result<PathBuf, Box<dyn Error>> {
	match matches.get_one::<String>("settings") {
		Some(path) => Ok(PathBuf::from(path)),
		None => Ok(default_settings_path()?),
	}
}

fn render(event: &UiEvent) {
	if let UiEvent::Log(log) = event {
		println!("{} [{}] {}", log.time, log.level, log.msg);
	}
}

/// Run the sync service until interrupted.
///
/// SIGUSR1 plays the part of the tray toggle: it requests a start/stop
/// flip, and this caller tracks which of the two is due.
async fn watch(config: GlobalConfig) -> Result<(), Box<dyn Error>> {
	let (events, mut rx) = EventSink::channel();
	let mut controller = SyncController::new(events.clone());
	let mut usr1 = signal(SignalKind::user_defined1())?;

	let mut running = controller.start(config.clone()).await.is_ok();
	if !running {
		while let Ok(event) = rx.try_recv() {
			render(&event);
		}
		return Err("Could not start sync service".into());
	}

	loop {
		tokio::select! {
			Some(event) = rx.recv() => {
				render(&event);
				match event {
					UiEvent::SyncError => running = false,
					UiEvent::ToggleSyncRequest => {
						if running {
							controller.stop().await;
							running = false;
						} else {
							running = controller.start(config.clone()).await.is_ok();
						}
					}
					_ => {}
				}
			}

			_ = usr1.recv() => {
				events.send(UiEvent::ToggleSyncRequest);
			}

			_ = tokio::signal::ctrl_c() => {
				controller.stop().await;
				while let Ok(event) = rx.try_recv() {
					render(&event);
				}
				break;
			}
		}
	}

	Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
	init_tracing();

	let matches = Command::new("ftpmirror")
		.version("0.1.0")
		.about("Mirrors local project folders to an FTP server")
		.subcommand_required(true)
		.arg(
			Arg::new("settings")
				.short('s')
				.long("settings")
				.value_name("FILE")
				.help("Settings file (default: ~/.ftpmirror/settings.json)"),
		)
		.subcommand(Command::new("watch").about("Watch configured projects and mirror changes"))
		.subcommand(Command::new("config").about("Print the active configuration"))
		.subcommand(Command::new("init").about("Write a default settings file"))
		.get_matches();

	let path = settings_path(&matches)?;

	if matches.subcommand_matches("watch").is_some() {
		let config = load_settings(&path)?;
		watch(config).await?;
	} else if matches.subcommand_matches("config").is_some() {
		let config = load_settings(&path)?;
		println!("{}", serde_json::to_string_pretty(&config)?);
	} else if matches.subcommand_matches("init").is_some() {
		if path.exists() {
			return Err(format!("{} already exists", path.display()).into());
		}
		save_settings(&path, &GlobalConfig::default())?;
		println!("Wrote {}", path.display());
	}

	Ok(())
}

// vim: ts=4
