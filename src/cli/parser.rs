use crate::models::SessionState;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rWorklog
#[derive(Parser)]
#[command(
    name = "rworklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track daily work sessions: start, breaks and end, stored as a JSON document",
    long_about = None
)]
pub struct Cli {
    /// Override the data file path (useful for tests or a shared file)
    #[arg(global = true, long = "data")]
    pub data: Option<String>,

    /// User id the event is issued by (default: $RWORKLOG_USER, then $USER)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Pretend the current instant is this timestamp (or time of day)
    #[arg(global = true, long = "at", hide = true)]
    pub at: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the data file
    Init,

    /// Show or check the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Start today's work session
    Start {
        /// Display name used in messages
        #[arg(long = "name")]
        name: Option<String>,
    },

    /// Show where today's session stands
    Resume,

    /// Begin a break
    Break {
        #[arg(
            long = "issued-for",
            value_parser = parse_state,
            help = "State the control was shown for (started, on_break); stale controls are rejected"
        )]
        issued_for: Option<SessionState>,
    },

    /// End the current break
    BreakEnd {
        #[arg(long = "issued-for", value_parser = parse_state)]
        issued_for: Option<SessionState>,
    },

    /// End today's work session
    End {
        #[arg(long = "issued-for", value_parser = parse_state)]
        issued_for: Option<SessionState>,
    },

    /// Show the work log for a date
    View {
        #[arg(long = "date", help = "Date to view (YYYY-MM-DD, default is today)")]
        date: Option<String>,
    },

    /// List every day the user has a record for
    List,

    /// Administrative commands (require the admin role)
    Admin {
        /// Roles held by the requester, comma separated
        #[arg(long = "roles", value_delimiter = ',', required = true)]
        roles: Vec<String>,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Delete a user's record for one date
    Delete {
        #[arg(long = "target")]
        target: String,
        #[arg(long = "date", help = "Date to delete (YYYY-MM-DD)")]
        date: String,
    },

    /// Modify one field of a user's record
    Modify {
        #[arg(long = "target")]
        target: String,
        #[arg(long = "date", help = "Date to modify (YYYY-MM-DD)")]
        date: String,
        #[arg(long = "field", help = "start, end, break-N-start or break-N-end")]
        field: String,
        #[arg(
            long = "value",
            allow_hyphen_values = true,
            help = "New value (e.g. 2025-06-07T14:30:00Z or 2:28:40 am)"
        )]
        value: String,
    },

    /// Show a user's record for one date
    Show {
        #[arg(long = "target")]
        target: String,
        #[arg(long = "date", help = "Date to show (YYYY-MM-DD)")]
        date: String,
    },
}

fn parse_state(s: &str) -> Result<SessionState, String> {
    SessionState::from_input(s)
        .ok_or_else(|| format!("unknown state '{}': use not_started, started, on_break or ended", s))
}
