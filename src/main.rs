use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, Command};

use viewport_scroll::commands::browse::handle_browse;
use viewport_scroll::commands::config::handle_config;
use viewport_scroll::commands::show::handle_show;
use viewport_scroll::logging::{init_logging, install_panic_hook, log_error};

fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .help("JSON user list ({\"results\": [...]}); falls back to env and config")
        .value_parser(value_parser!(PathBuf))
        .index(1)
}

fn main() {
    let app = Command::new("viewport-scroll")
        .about("Browse a user directory with viewport-triggered paging")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("browse")
                .about("Open the interactive user list")
                .arg(file_arg())
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .short('n')
                        .value_name("N")
                        .help("Users appended each time the end of the list comes into view")
                        .value_parser(value_parser!(usize))
                )
        )
        .subcommand(
            Command::new("show")
                .about("Print normalized users")
                .arg(file_arg())
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .value_name("N")
                        .help("Skip the first N users")
                        .value_parser(value_parser!(usize))
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('l')
                        .value_name("N")
                        .help("Print at most N users (defaults to the page size)")
                        .value_parser(value_parser!(usize))
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print as JSON")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("detail")
                        .long("detail")
                        .help("Print every field of each user")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("json")
                )
        )
        .subcommand(
            Command::new("config")
                .about("View or change saved settings")
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show current settings")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("users-file")
                        .long("users-file")
                        .value_name("PATH")
                        .help("Default users file")
                        .value_parser(value_parser!(PathBuf))
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_name("N")
                        .help("Default page size")
                        .value_parser(value_parser!(usize))
                )
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .value_name("RATIO")
                        .help("Visibility ratio that counts as a crossing (repeatable, 0.0-1.0)")
                        .value_parser(value_parser!(f32))
                        .action(ArgAction::Append)
                )
        );

    let matches = app.get_matches();

    if let Err(e) = init_logging() {
        eprintln!("Warning: could not initialize logging: {}", e);
    }
    install_panic_hook();

    let result = match matches.subcommand() {
        Some(("browse", sub_matches)) => handle_browse(sub_matches),
        Some(("show", sub_matches)) => handle_show(sub_matches),
        Some(("config", sub_matches)) => handle_config(sub_matches),
        _ => {
            eprintln!("Unknown command. Use 'viewport-scroll --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        log_error(&format!("Command failed: {}", e));
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
