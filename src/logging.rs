// Logging setup. Stdout is reserved for the result token, so every log
// line goes to stderr.

use env_logger::{Builder, Env, Target};

/// Initialize env_logger. An explicit RUST_LOG wins; otherwise verbosity
/// comes from the -v flag count.
pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .init();
}
