use crate::core::timeline::FilterInput;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for bookinglog
/// Decode, filter and group the booking system's audit trail
#[derive(Parser)]
#[command(
    name = "bookinglog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Decode, search and group the free-text audit trail of a booking system",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print diagnostics to stderr (RUST_LOG overrides the level)
    #[arg(global = true, long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fetch range plus in-memory filters, shared by `timeline` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(
        long,
        short = 'r',
        value_name = "RANGE",
        help = "Created-at range: YYYY, YYYY-MM, YYYY-MM-DD or two joined by ':'"
    )]
    pub range: Option<String>,

    #[arg(long = "op", help = "Operation: create, update, delete or schedule")]
    pub op: Option<String>,

    #[arg(
        long = "date",
        short = 'd',
        help = "Booking date, e.g. 0403, 4/3, 2025/4/3 or 2025-04-03"
    )]
    pub date: Option<String>,

    #[arg(
        long = "filled-by",
        help = "Person who filled in the form; the configured sentinel selects unsigned entries"
    )]
    pub filled_by: Option<String>,

    #[arg(long = "query", short = 'q', help = "Case-insensitive free-text search")]
    pub query: Option<String>,
}

impl FilterArgs {
    pub fn as_input(&self) -> FilterInput<'_> {
        FilterInput {
            range: self.range.as_deref(),
            op: self.op.as_deref(),
            date: self.date.as_deref(),
            filled_by: self.filled_by.as_deref(),
            query: self.query.as_deref(),
        }
    }
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

    /// Append one raw audit row
    Record {
        /// Free-text details exactly as the booking system wrote them
        details: String,

        #[arg(long, help = "create, update or delete")]
        action: String,

        #[arg(long, default_value = "bookings", help = "bookings or coach_assignment")]
        domain: String,

        #[arg(long = "actor", help = "Account that performed the mutation")]
        actor: Option<String>,

        #[arg(
            long = "at",
            help = "Creation time (RFC 3339 or YYYY-MM-DD HH:MM); defaults to now"
        )]
        at: Option<String>,
    },

    /// Import raw audit rows from CSV (created_at,actor_email,action,domain,details)
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Decode one audit line and print its fields
    Decode {
        details: String,

        #[arg(long)]
        json: bool,
    },

    /// Show decoded audit entries grouped by day
    Timeline {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        json: bool,
    },

    /// Record or list coach time off
    Timeoff {
        #[arg(long, requires_all = ["coach", "start", "end"], help = "Add a time-off range")]
        add: bool,

        #[arg(long)]
        coach: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        start: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        end: Option<String>,

        #[arg(long)]
        reason: Option<String>,

        #[arg(long, conflicts_with = "add")]
        json: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        /// Only the last N rows
        #[arg(long, value_name = "N", requires = "print")]
        tail: Option<usize>,
    },

    /// Export decoded audit entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
