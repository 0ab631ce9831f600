pub mod descope;
pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_SERVER: &str = "server";
pub const CMD_SYNC: &str = "sync";

pub const ARG_DSN: &str = "dsn";
pub const ARG_PORT: &str = "port";

pub const DEFAULT_PORT: u16 = 5002;

fn with_dsn(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_DSN)
            .short('d')
            .long(ARG_DSN)
            .help("Database connection string")
            .env("USERDASH_DSN")
            .required(true),
    )
}

fn server() -> Command {
    with_dsn(
        Command::new(CMD_SERVER)
            .about("Serve the paginated users API")
            .arg(
                Arg::new(ARG_PORT)
                    .short('p')
                    .long(ARG_PORT)
                    .help("Port to listen on")
                    .default_value("5002")
                    .env("USERDASH_PORT")
                    .value_parser(clap::value_parser!(u16)),
            ),
    )
}

fn sync() -> Command {
    let command = Command::new(CMD_SYNC).about("Synchronize users from Descope into the database");
    descope::with_args(with_dsn(command))
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("userdash")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(server())
        .subcommand(sync());

    logging::with_args(command)
}
