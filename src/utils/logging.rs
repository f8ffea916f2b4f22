use colored::Colorize;
use std::fmt::Display;

/// Prints a diagnostic line to stderr when verbose output is enabled.
pub fn verbose(enabled: bool, message: impl Display) {
    if enabled {
        eprintln!("{} {}", "[VERBOSE]".dimmed(), message);
    }
}

/// Reports an operational failure that does not stop the process.
pub fn report_failure(error: impl Display) {
    eprintln!("{}", error.to_string().red());
}

/// Echoes a command line before it is executed.
pub fn announce_command(program: &str, args: &[String]) {
    let line = if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    };
    println!("{} {}", "Command:".cyan(), line.cyan());
}
