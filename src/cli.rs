use crate::session::SessionConfig;
use clap::Parser;

/// Word-guessing game client options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Server port (defaults to 27993, or 27994 with TLS)
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Encrypt the connection with TLS
    #[arg(short = 's', long = "tls")]
    pub tls: bool,

    /// Path to a newline-delimited word list (embedded list otherwise)
    #[arg(short = 'w', long = "wordlist")]
    pub wordlist: Option<String>,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Server hostname
    pub hostname: String,

    /// Username sent in the hello message
    pub username: String,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    /// Connection parameters for the session layer.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            host: self.hostname.clone(),
            port: self.port,
            tls: self.tls,
            username: self.username.clone(),
        }
    }
}
