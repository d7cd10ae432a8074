//! Output formatting utilities

use console::{style, Style};

use snapdeploy_snap::{DeployEvent, DeployReporter};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Style for channel names
pub fn channel_style() -> Style {
    Style::new().yellow()
}

/// Reports deployment progress on the terminal
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl DeployReporter for ConsoleReporter {
    fn report(&self, event: &DeployEvent) {
        match event {
            DeployEvent::Log(message) => {
                let message = message.trim_end();
                if !message.is_empty() {
                    info(message);
                }
            }
            DeployEvent::FoldStarted(name) => println!("{}", header(name)),
            DeployEvent::FoldFinished { name, success: true } => success(&format!("{} done", name)),
            DeployEvent::FoldFinished { name, success: false } => {
                error(&format!("{} failed", name))
            }
        }
    }
}
