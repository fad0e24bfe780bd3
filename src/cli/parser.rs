use clap::{Parser, Subcommand};

/// Command-line interface definition for wfhtracker
/// CLI application to record where you worked each day, using SQLite
#[derive(Parser)]
#[command(
    name = "wfhtracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record each working day as home (WFH) or office, with automatic office detection via Wi-Fi",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use an alternate configuration file
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Record where you work today (or on --date)
    Set {
        /// wfh (home, remote, h, r) or office (o)
        action: String,

        #[arg(long = "date", value_name = "YYYY-MM-DD", help = "Day to record (default: today)")]
        date: Option<String>,
    },

    /// Show today's choice and the WFH days of this and last month
    Status,

    /// Show WFH count and days for a month
    Summary {
        #[arg(
            long = "month",
            value_name = "YYYY-MM",
            help = "Month to summarize (default: current and previous month)"
        )]
        month: Option<String>,

        #[arg(long = "json", help = "Print the summary as JSON")]
        json: bool,

        #[arg(long = "all", help = "List every recorded day, not only WFH days")]
        all: bool,
    },

    /// Run one automatic office check now
    Check,

    /// Keep running: check for the office network periodically and accept
    /// wfh/office/status/quit on stdin
    Watch {
        #[arg(
            long = "interval",
            value_name = "MINUTES",
            help = "Minutes between office checks (default from config)"
        )]
        interval: Option<u64>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Inspect and maintain the database
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}
