//! Now-Playing Widget Backend Library
//!
//! This library backs a web-embedded "now playing" widget: it reports the
//! listener's current and recently played Spotify tracks and relays playback
//! transport commands issued from the browser. The one stateful piece is the
//! access-token cache in Redis; everything else is a thin authenticated
//! pass-through to the Spotify Web API.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the widget endpoints and the OAuth callback
//! - `cache` - Access-token store abstraction and its Redis implementation
//! - `config` - Environment-backed configuration and endpoint constants
//! - `server` - Router construction and serve loops
//! - `spotify` - Token cache and playback facade against the Spotify Web API
//! - `types` - Wire types for upstream responses and the widget contract
//! - `utils` - Small helpers (Basic auth header, state parameter)

pub mod api;
pub mod cache;
pub mod config;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable startup failures; request handlers log with
/// [`warning!`] and answer with a degraded response instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
