use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hotel_desk::clients::{ClientError, HotelApi, RoomFilter};
use hotel_desk::config::{self, Config};
use hotel_desk::controller::{
    ActionOutcome, AssumeYes, Confirmation, TerminalPrompt, ViewController,
};
use hotel_desk::models::BookingStatus;
use hotel_desk::render;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hotel-desk", version, about = "Hotel room reservation desk")]
struct Cli {
    /// Base URL of the reservation API
    #[arg(long, env = "HOTEL_API_URL", default_value = config::DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "HOTEL_API_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Seconds a success or error message stays visible
    #[arg(long, env = "HOTEL_MESSAGE_TTL_SECS", default_value_t = config::DEFAULT_MESSAGE_TTL_SECS)]
    message_ttl_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load everything and show the dashboard (default)
    Dashboard,
    /// Book 1 to 5 rooms
    Book {
        #[arg(allow_negative_numbers = true)]
        rooms: i64,
    },
    /// Fill 30-80% of the hotel with random bookings
    Random,
    /// Remove all bookings
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Cancel a booking by reference
    Cancel { reference: String },
    /// Show one booking
    Booking { reference: String },
    /// List bookings
    Bookings {
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    /// List rooms
    Rooms {
        #[arg(long)]
        floor: Option<u32>,
        #[arg(long)]
        booked: Option<bool>,
    },
    /// List free rooms
    Available,
    /// List the rooms on one floor
    Floor { floor: u32 },
    /// Show one room
    Room { number: u32 },
    /// Booking and room statistics
    Stats,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new(&self.api_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_message_ttl(Duration::from_secs(self.message_ttl_secs))
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so rendered views on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "hotel_desk=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    info!(api_url = %config.api_url, "Hotel desk starting");

    let api = HotelApi::new(config.api_url.clone(), config.request_timeout)
        .context("Failed to create API client")?;

    let command = cli.command.unwrap_or(Command::Dashboard);
    let confirmation: Arc<dyn Confirmation> = match &command {
        Command::Reset { yes: true } => Arc::new(AssumeYes),
        _ => Arc::new(TerminalPrompt),
    };
    let controller = ViewController::new(Arc::new(api.clone()), confirmation)
        .with_message_ttl(config.message_ttl);

    match command {
        Command::Dashboard => {
            let outcome = controller.initialize().await;
            Ok(show(&controller, outcome))
        }
        Command::Book { rooms } => {
            controller.initialize().await;
            let outcome = controller.create_booking(rooms).await;
            Ok(show(&controller, outcome))
        }
        Command::Random => {
            controller.initialize().await;
            let outcome = controller.generate_random_occupancy().await;
            Ok(show(&controller, outcome))
        }
        Command::Reset { .. } => {
            let outcome = controller.reset_bookings().await;
            if outcome == ActionOutcome::Declined {
                println!("Reset cancelled");
                return Ok(ExitCode::SUCCESS);
            }
            Ok(show(&controller, outcome))
        }
        Command::Cancel { reference } => {
            let outcome = controller.cancel_booking(&reference).await;
            Ok(show(&controller, outcome))
        }
        Command::Booking { reference } => {
            let response = api.bookings.get_booking_by_reference(&reference).await;
            let booking = report(response)?.data.booking;
            controller.view_booking_details(booking);
            if let Some(booking) = controller.snapshot().selected_booking {
                print!("{}", render::booking_details(&booking));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Bookings { status } => {
            let list = report(api.bookings.get_all_bookings(status).await)?.data;
            print!("{}", render::bookings(&list.bookings));
            Ok(ExitCode::SUCCESS)
        }
        Command::Rooms { floor, booked } => {
            let filter = RoomFilter {
                floor,
                is_booked: booked,
            };
            let list = report(api.rooms.get_all_rooms(&filter).await)?.data;
            print!("{}", render::rooms(&list.rooms));
            Ok(ExitCode::SUCCESS)
        }
        Command::Available => {
            let list = report(api.rooms.get_available_rooms().await)?.data;
            print!("{}", render::rooms(&list.rooms));
            Ok(ExitCode::SUCCESS)
        }
        Command::Floor { floor } => {
            let list = report(api.rooms.get_rooms_by_floor(floor).await)?.data;
            println!("Floor {}", list.floor);
            print!("{}", render::rooms(&list.rooms));
            Ok(ExitCode::SUCCESS)
        }
        Command::Room { number } => {
            let detail = report(api.rooms.get_room_by_number(number).await)?.data;
            print!("{}", render::room(&detail.room));
            Ok(ExitCode::SUCCESS)
        }
        Command::Stats => {
            let stats = controller
                .booking_stats()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print!("{}", render::stats(&stats));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show(controller: &ViewController, outcome: ActionOutcome) -> ExitCode {
    print!("{}", render::dashboard(&controller.snapshot()));
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Turn a client failure into its user-facing message
fn report<T>(result: Result<T, ClientError>) -> Result<T> {
    result.map_err(|e| anyhow::anyhow!(e.user_message()))
}
