//! Config validation CLI tool
//!
//! Validates a fencewatch configuration file and reports any errors.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: validate-config <config-file>");
            eprintln!();
            eprintln!("Validates a fencewatch configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config config.example.toml");
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match fencewatch_config::load_config(&config_path) {
        Ok(settings) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", fencewatch_config::CURRENT_CONFIG_VERSION);
            println!("  Source: {}", settings.source.base_url);
            println!(
                "  Mail: {} -> {} recipient(s) via {}:{}",
                settings.mail.sender,
                settings.mail.recipients.len(),
                settings.mail.smtp_host,
                settings.mail.smtp_port
            );
            println!(
                "  Cadence: poll every {}s, run for {}s",
                settings.monitor.poll_interval.as_secs(),
                settings.monitor.run_duration.as_secs()
            );
            println!("  Subjects: {}", settings.roster.len());

            if !settings.roster.is_empty() {
                println!();
                println!("Roster:");
                for subject in &settings.roster {
                    match &subject.label {
                        Some(label) => println!("  - {}: {}", subject.id, label),
                        None => println!("  - {}", subject.id),
                    }
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                fencewatch_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                fencewatch_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                fencewatch_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                fencewatch_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        fencewatch_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
