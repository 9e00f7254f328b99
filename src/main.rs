use clap::{Parser, Subcommand};
use spinwheel::config::{self, WheelConfig};
use spinwheel::scheduler::MonotonicClock;
use spinwheel::sys::runtime;
use spinwheel::wheel::{ItemLabel, Wheel};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "spinwheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Comma-separated item labels (overrides the config file)
    #[arg(short = 'i', long, value_delimiter = ',')]
    items: Vec<String>,

    /// Width of the wheel's bounding box
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// Height of the wheel's bounding box
    #[arg(long, default_value_t = 400.0)]
    height: f64,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Spin the wheel and print where it lands
    Spin {
        /// Peak rotation per tick, in degrees; negative spins counter-clockwise
        #[arg(long, allow_hyphen_values = true)]
        max_angle: Option<f64>,
        #[arg(long)]
        duration_ms: Option<u64>,
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Print the segment layout at rest
    Layout,
    /// Write the default config file
    InitConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = config::load_or_default();
    if !cli.items.is_empty() {
        config.items = cli.items.iter().map(ItemLabel::new).collect();
    }

    match cli.command.clone().unwrap_or(Commands::Spin {
        max_angle: None,
        duration_ms: None,
        interval_ms: None,
    }) {
        Commands::Spin {
            max_angle,
            duration_ms,
            interval_ms,
        } => {
            let max_angle = max_angle.unwrap_or(config.spin.max_angle);
            let duration = duration_ms.map_or(config.spin.duration, Duration::from_millis);
            let interval = interval_ms.map_or(config.spin.interval, Duration::from_millis);
            spin(&cli, &config, max_angle, duration, interval).await
        }
        Commands::Layout => print_layout(&cli, &config),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn build_wheel(cli: &Cli, config: &WheelConfig) -> anyhow::Result<Wheel<MonotonicClock>> {
    if config.items.is_empty() {
        anyhow::bail!("No items to put on the wheel. Pass --items or run `spinwheel init-config`.");
    }

    let mut wheel = Wheel::from_config(config, MonotonicClock::default());
    wheel.set_bounds(cli.width, cli.height);
    if wheel.circle().is_none() {
        anyhow::bail!("Invalid wheel size {}x{}", cli.width, cli.height);
    }
    Ok(wheel)
}

async fn spin(
    cli: &Cli,
    config: &WheelConfig,
    max_angle: f64,
    duration: Duration,
    interval: Duration,
) -> anyhow::Result<()> {
    let mut wheel = build_wheel(cli, config)?;

    let (tx, rx) = async_channel::unbounded();
    let logger = runtime::spawn_event_logger(rx);
    wheel.subscribe(tx);

    wheel.spin(max_angle, duration, interval)?;
    runtime::drive(&mut wheel, interval).await;

    drop(wheel);
    match logger.await? {
        Some(item) => println!("{}", item),
        None => anyhow::bail!("The wheel stopped without a selection"),
    }
    Ok(())
}

fn print_layout(cli: &Cli, config: &WheelConfig) -> anyhow::Result<()> {
    let wheel = build_wheel(cli, config)?;
    let layout = wheel
        .layout()
        .ok_or_else(|| anyhow::anyhow!("Wheel has no geometry"))?;

    for segment in &layout.segments {
        println!(
            "{:>3}  {:<16} {:>7.2}..{:<7.2} {}  anchor=({}, {})",
            segment.index,
            segment.label,
            segment.start_angle,
            segment.start_angle + segment.sweep,
            segment.color,
            segment.anchor.x,
            segment.anchor.y
        );
    }
    if let Some(item) = wheel.selected() {
        println!("selected: {}", item);
    }
    Ok(())
}
