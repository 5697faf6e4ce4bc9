use clap::{Parser, Subcommand};
use decision_wheel::config::{self, Config};
use decision_wheel::wheel::theme::HexColor;
use decision_wheel::wheel::{OptionId, Point, WheelStore, render_svg};
use decision_wheel::{JsonFileRepository, WheelEvent};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

const MARGIN: f64 = 24.0;

#[derive(Parser, Debug)]
#[command(name = "wheelctl", version, about, long_about = None)]
struct Cli {
    /// Where saved options and the wheel are kept (defaults to the user data directory)
    #[arg(short = 's', long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// List saved options, marking the ones on the wheel
    List,
    /// Save a new option
    Add { text: String },
    /// Delete a saved option (also takes it off the wheel)
    Delete { id: u64 },
    /// Put a saved option on the wheel
    Put { id: u64 },
    /// Take an option off the wheel
    Take { id: u64 },
    /// Take everything off the wheel
    Clear,
    /// Print the segment layout of the current wheel
    Segments,
    /// Write the wheel as SVG to stdout
    Render {
        /// Turn the pointer clockwise by this many degrees
        #[arg(short = 'p', long)]
        pointer: Option<f64>,
    },
    /// Spin the wheel and announce the winner
    Spin {
        /// Do not wait for the spin animation to finish
        #[arg(long)]
        no_wait: bool,
    },
    /// Write the default config file if there is none
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = config::load_or_default();
    let repository = match cli.store {
        Some(path) => JsonFileRepository::new(path),
        None => JsonFileRepository::open_default()?,
    };
    log::debug!("Using wheel data at {}", repository.path().display());

    let mut store = WheelStore::load(repository, config.spin.clone())?
        .with_observer(|event: &WheelEvent| {
            if let WheelEvent::WinnerShown(winner) = event {
                println!("🎉 {} 🎉", winner.text);
            }
        });

    run(&mut store, &config, cli.command)
}

fn run(store: &mut WheelStore, config: &Config, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::List => {
            for option in store.options() {
                let marker = if store.is_on_wheel(option.id) { "*" } else { " " };
                println!("{marker} {:>4}  {}", option.id, option.text);
            }
        }
        Commands::Add { text } => {
            let option = store.create_option(&text)?;
            println!("{}", option.id);
        }
        Commands::Delete { id } => store.delete_option(OptionId::from(id)),
        Commands::Put { id } => store.add_to_wheel(OptionId::from(id))?,
        Commands::Take { id } => store.remove_from_wheel(OptionId::from(id))?,
        Commands::Clear => store.clear_wheel()?,
        Commands::Segments => {
            let radius = config.render.radius;
            let center = Point::new(radius + MARGIN, radius + MARGIN);
            for seg in store.segments(center, radius, &config.render.colors()) {
                println!(
                    "{:>4}  {:>6.1}..{:<6.1} {}  {:<5}  {}",
                    seg.id,
                    seg.start_deg,
                    seg.end_deg,
                    HexColor(seg.color),
                    seg.label_tone,
                    seg.label
                );
            }
        }
        Commands::Render { pointer } => {
            let radius = config.render.radius;
            let center = Point::new(radius + MARGIN, radius + MARGIN);
            let segments = store.segments(center, radius, &config.render.colors());
            if segments.is_empty() {
                anyhow::bail!("Put at least two options on the wheel first.");
            }
            print!("{}", render_svg(&segments, center, radius, pointer));
        }
        Commands::Spin { no_wait } => spin(store, no_wait)?,
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn spin(store: &mut WheelStore, no_wait: bool) -> anyhow::Result<()> {
    let result = store.start_spin()?;
    println!(
        "Spinning... {} turns, landing at {}°",
        result.rotations, result.final_angle_deg
    );

    // stands in for the animation
    if !no_wait {
        thread::sleep(Duration::from_millis(result.duration_ms));
    }

    store.complete_spin(result.winner_index)?;
    store.dismiss_winner();
    Ok(())
}
