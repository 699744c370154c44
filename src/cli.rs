use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "touchquirk",
    about = "DMI-matched touchscreen quirks - property injection and embedded firmware verification",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output as JSON instead of formatted tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this config file instead of the system and user files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read sysfs from this directory instead of /
    #[arg(long, global = true)]
    pub sysfs_root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the DMI identity and the quirk it selects
    Identify,

    /// List built-in quirk rules in evaluation order
    List,

    /// Check a firmware blob against the expected descriptor
    Verify {
        /// Firmware file to check
        file: PathBuf,

        /// Use this rule's descriptor instead of the one matched for this machine
        #[arg(long)]
        rule: Option<String>,
    },

    /// Find an embedded firmware copy in a memory or flash dump
    Extract {
        /// Dump to search
        dump: PathBuf,

        /// Write the extracted firmware here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use this rule's descriptor instead of the one matched for this machine
        #[arg(long)]
        rule: Option<String>,
    },

    /// Match this machine and attach properties to the touchscreen when it is enumerated
    Inject {
        /// Log the properties instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Directory receiving the property files
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Capture the DMI and I2C sysfs state as a JSON snapshot
    Snapshot {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (auto-detected if omitted)
        shell: Option<Shell>,
    },
}

/// Print shell completions to stdout.
pub fn print_completions(shell: Option<Shell>) {
    let shell = shell.or_else(Shell::from_env).unwrap_or_else(|| {
        eprintln!(
            "Could not detect shell. Specify one: touchquirk completions bash|zsh|fish|elvish|powershell"
        );
        std::process::exit(1);
    });
    clap_complete::generate(
        shell,
        &mut Cli::command(),
        "touchquirk",
        &mut std::io::stdout(),
    );
}
