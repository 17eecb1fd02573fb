use crate::render::ColorMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// travelog — travel journal client
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and keep the session for later commands
    Login {
        #[arg(long, short)]
        email: String,
        #[arg(long, short)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(long, short)]
        name: String,
        #[arg(long, short)]
        email: String,
        #[arg(long, short)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Drop a pin and add a new entry there
    Add {
        title: String,
        /// The entry's text
        #[arg(long, short)]
        description: String,
        /// Latitude of the pin
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude of the pin
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Photo/video file to attach; repeat for more than one
        #[arg(long = "media", short)]
        media: Vec<PathBuf>,
    },
    /// List your entries
    List {
        /// Show the archive instead of active entries
        #[arg(long, short)]
        archived: bool,
    },
    /// The newest entries across the site
    Recent {
        /// How many to show (config `recent_limit` by default)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Show one entry in full
    Show { id: String },
    /// Move an entry to the archive
    Archive { id: String },
    /// Bring an archived entry back
    Restore { id: String },
    /// Permanently delete an archived entry
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Change an entry's title, description or pin
    Edit {
        id: String,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
        /// New latitude; requires --lng
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,
        /// New longitude; requires --lat
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,
    },
    /// Attach media to, or remove media from, an entry
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },
    /// Upload a new profile picture
    Avatar { file: PathBuf },
    /// Show or change the dark-mode preference
    Theme {
        #[arg(value_enum)]
        set: Option<ThemeArg>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MediaAction {
    /// Upload files onto an existing entry
    Add {
        id: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove one media item by its id
    Rm { id: String, media_id: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
    Toggle,
}
