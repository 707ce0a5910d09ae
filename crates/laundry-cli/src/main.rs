//! Main entry point for the laundry tracker CLI.
//!
//! This binary drives the order lifecycle against a remote order store: it
//! creates orders, lists the stage-scoped queues, advances a selected order
//! one stage forward (notifying the customer afterwards), and shows the
//! aggregate status. It uses a modular architecture with pluggable store and
//! notification implementations.

use clap::{Parser, Subcommand};
use laundry_config::Config;
use laundry_core::{Tracker, TrackerBuilder, TrackerFactories};
use laundry_types::{search_candidates, Order, OrderStage};
use std::path::PathBuf;

/// Command-line arguments for the laundry tracker.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml", env = "LAUNDRY_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

/// Order lifecycle operations.
#[derive(Subcommand, Debug)]
enum Command {
	/// Create a new order from a customer name and phone number
	Add {
		/// Customer display name
		#[arg(long)]
		name: String,
		/// Phone number; the configured country prefix is prepended unless
		/// the number already starts with it
		#[arg(long)]
		phone: String,
	},
	/// List contact candidates from the configured contacts file
	Contacts {
		/// Case-insensitive name filter
		#[arg(long, default_value = "")]
		search: String,
	},
	/// List orders currently in work
	InWork,
	/// List orders ready for delivery
	Ready,
	/// Advance an in-work order to ready for delivery
	MarkReady {
		/// Id of the order, as shown by in-work
		id: String,
	},
	/// Advance a ready-for-delivery order to delivered
	MarkDelivered {
		/// Id of the order, as shown by ready
		id: String,
	},
	/// Show every stage at once, including delivered history
	Status,
}

#[tokio::main]
async fn main() {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	if let Err(e) = run(args).await {
		eprintln!("Error: {}", e);
		std::process::exit(1);
	}
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
	let config = match args.config.to_str() {
		Some(path) => Config::from_file(path).await?,
		None => return Err("configuration path is not valid UTF-8".into()),
	};
	let tracker = build_tracker(config)?;

	match args.command {
		Command::Add { name, phone } => {
			let request = tracker.intake().submit(&name, &phone).await?;
			println!("Created order for {} ({})", request.name, request.phone);
		}
		Command::Contacts { search } => {
			let candidates = tracker.contacts().await?;
			let hits = search_candidates(&candidates, &search);
			if hits.is_empty() {
				println!("No matching contacts");
			}
			for candidate in hits {
				println!(
					"{}\t{}",
					candidate.name,
					candidate.primary_phone().unwrap_or("-")
				);
			}
		}
		Command::InWork => {
			list_stage(&tracker, OrderStage::InWork).await?;
		}
		Command::Ready => {
			list_stage(&tracker, OrderStage::ReadyForDelivery).await?;
		}
		Command::MarkReady { id } => {
			advance(&tracker, OrderStage::InWork, &id).await?;
		}
		Command::MarkDelivered { id } => {
			advance(&tracker, OrderStage::ReadyForDelivery, &id).await?;
		}
		Command::Status => {
			let status = tracker.status().await?;
			print_section("In work", &status.in_work);
			print_section("Ready for delivery", &status.ready_for_delivery);
			print_section("Delivered", &status.history);
		}
	}

	Ok(())
}

async fn list_stage(tracker: &Tracker, stage: OrderStage) -> Result<(), Box<dyn std::error::Error>> {
	let mut screen = tracker.screen(stage)?;
	let orders = screen.load().await?;
	if orders.is_empty() {
		println!("No orders in stage {}", stage);
	}
	for order in orders {
		println!("{}\t{}\t{}", order.id, order.name, order.phone);
	}
	Ok(())
}

/// Selects `id` on the screen for `stage` and advances it one stage forward.
async fn advance(
	tracker: &Tracker,
	stage: OrderStage,
	id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut screen = tracker.screen(stage)?;
	screen.load().await?;
	screen.toggle_select(id)?;
	let outcome = screen.advance().await?;

	println!(
		"Order {} ({}) is now {}",
		outcome.order.id, outcome.order.name, outcome.stage
	);
	if !outcome.notified {
		println!("Warning: customer notification failed");
	}
	Ok(())
}

fn print_section(title: &str, orders: &[Order]) {
	println!("{} ({})", title, orders.len());
	for order in orders {
		println!("  {}\t{}\t{}", order.id, order.name, order.phone);
	}
}

/// Builds the tracker with all registered implementations.
///
/// Wires up the concrete implementations for:
/// - Store backends (e.g., the remote HTTP store, in-memory)
/// - Notification backends (e.g., SMS composer URI, log only)
fn build_tracker(config: Config) -> Result<Tracker, Box<dyn std::error::Error>> {
	let builder = TrackerBuilder::new(config);

	let store_factories = laundry_store::get_all_implementations()
		.into_iter()
		.map(|(name, factory)| (name.to_string(), factory))
		.collect();

	let notify_factories = laundry_notify::get_all_implementations()
		.into_iter()
		.map(|(name, factory)| (name.to_string(), factory))
		.collect();

	let factories = TrackerFactories {
		store_factories,
		notify_factories,
	};

	Ok(builder.build(factories)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const MEMORY_CONFIG: &str = r#"
		[store]
		primary = "memory"

		[store.implementations.memory]

		[notify]
		primary = "log"

		[notify.implementations.log]
	"#;

	fn tracker() -> Tracker {
		build_tracker(MEMORY_CONFIG.parse().unwrap()).unwrap()
	}

	#[test]
	fn args_parse_subcommands() {
		let args = Args::parse_from(["laundry", "add", "--name", "Asha", "--phone", "9876543210"]);
		assert!(matches!(args.command, Command::Add { .. }));
		assert_eq!(args.config, PathBuf::from("config.toml"));

		let args = Args::parse_from(["laundry", "--config", "other.toml", "mark-ready", "1"]);
		assert!(matches!(args.command, Command::MarkReady { ref id } if id == "1"));
		assert_eq!(args.config, PathBuf::from("other.toml"));
	}

	#[test]
	fn build_tracker_registers_all_implementations() {
		// Every registered backend name must be buildable from an empty or
		// minimal section.
		assert!(build_tracker(MEMORY_CONFIG.parse().unwrap()).is_ok());
	}

	#[tokio::test]
	async fn mark_ready_flow_moves_order_between_queues() {
		let tracker = tracker();
		tracker.intake().submit("Asha", "9876543210").await.unwrap();

		let mut in_work = tracker.screen(OrderStage::InWork).unwrap();
		let id = in_work.load().await.unwrap()[0].id.clone();
		advance(&tracker, OrderStage::InWork, &id).await.unwrap();

		let mut ready = tracker.screen(OrderStage::ReadyForDelivery).unwrap();
		let orders = ready.load().await.unwrap();
		assert_eq!(orders.len(), 1);
		assert_eq!(orders[0].id, id);
	}

	#[tokio::test]
	async fn advance_with_unknown_id_fails() {
		let tracker = tracker();
		assert!(advance(&tracker, OrderStage::InWork, "999").await.is_err());
	}

	#[tokio::test]
	async fn run_status_against_file_config() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(MEMORY_CONFIG.as_bytes()).unwrap();

		let args = Args::parse_from([
			"laundry",
			"--config",
			file.path().to_str().unwrap(),
			"status",
		]);
		run(args).await.unwrap();
	}
}
