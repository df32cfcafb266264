#[cfg(windows)]
mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};

use frameless_core::{MatchType, Preset};

#[derive(Parser)]
#[command(
    name = "frameless",
    version,
    about = "Pin borderless windows to a display, size and offset"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg_attr(not(windows), allow(dead_code))]
enum Commands {
    /// Create the default configuration file
    Init,
    /// List windows that can be picked for a profile
    List {
        /// Include windows without a caption or border
        #[arg(long)]
        all: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List attached displays
    Monitors {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Save a new profile for a live window
    Add(AddArgs),
    /// Show which window each saved profile currently refers to
    Resolve,
    /// Watch the window list and report profile changes until Ctrl+C
    Run,
    /// Show whether an instance is running
    Status,
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// Watch window events in real time
    Events,
}

#[derive(Args)]
#[cfg_attr(not(windows), allow(dead_code))]
struct AddArgs {
    /// Window handle as printed by `frameless list` (e.g. 0x1A2B)
    #[arg(long, value_parser = parse_handle)]
    handle: usize,
    /// Display number (1 = first display)
    #[arg(long)]
    monitor: Option<u32>,
    /// What the profile matches on
    #[arg(long = "match", value_enum)]
    match_type: Option<MatchArg>,
    /// Start from a preset placement
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    /// Horizontal offset from the display's left edge
    #[arg(long, allow_negative_numbers = true)]
    x: Option<i32>,
    /// Vertical offset from the display's top edge
    #[arg(long, allow_negative_numbers = true)]
    y: Option<i32>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    height: Option<i32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MatchArg {
    Title,
    Executable,
}

impl From<MatchArg> for MatchType {
    fn from(m: MatchArg) -> Self {
        match m {
            MatchArg::Title => MatchType::Title,
            MatchArg::Executable => MatchType::Executable,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    HalfLeft,
    HalfRight,
    Full,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::HalfLeft => Preset::HalfLeft,
            PresetArg::HalfRight => Preset::HalfRight,
            PresetArg::Full => Preset::Full,
        }
    }
}

/// Parses a window handle in hex (`0x` prefix optional).
fn parse_handle(s: &str) -> Result<usize, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    match usize::from_str_radix(digits, 16) {
        Ok(0) => Err("handle must not be zero".into()),
        Ok(handle) => Ok(handle),
        Err(e) => Err(format!("invalid handle '{s}': {e}")),
    }
}

#[cfg(windows)]
fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::List { all, json } => commands::list::execute(all, json),
        Commands::Monitors { json } => commands::monitors::execute(json),
        Commands::Add(args) => commands::add::execute(&args),
        Commands::Resolve => commands::resolve::execute(),
        Commands::Run => commands::run::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Debug { command } => match command {
            DebugCommands::Events => commands::debug::events::execute(),
        },
    }
}

#[cfg(not(windows))]
fn main() {
    let _ = Cli::parse();
    eprintln!("Error: frameless only supports Windows; this command is unsupported here.");
    std::process::exit(1);
}
