use clap::{Arg, Command};

pub const ARG_PROJECT_ID: &str = "descope-project-id";
pub const ARG_MANAGEMENT_KEY: &str = "descope-management-key";
pub const ARG_BASE_URL: &str = "descope-base-url";
pub const ARG_PAGE_SIZE: &str = "page-size";

pub const DEFAULT_BASE_URL: &str = "https://api.descope.com";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PROJECT_ID)
                .long(ARG_PROJECT_ID)
                .help("Descope project id")
                .env("USERDASH_DESCOPE_PROJECT_ID")
                .required(true),
        )
        .arg(
            Arg::new(ARG_MANAGEMENT_KEY)
                .long(ARG_MANAGEMENT_KEY)
                .help("Descope management key")
                .env("USERDASH_DESCOPE_MANAGEMENT_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_BASE_URL)
                .long(ARG_BASE_URL)
                .help("Descope API base URL")
                .default_value(DEFAULT_BASE_URL)
                .env("USERDASH_DESCOPE_BASE_URL"),
        )
        .arg(
            Arg::new(ARG_PAGE_SIZE)
                .long(ARG_PAGE_SIZE)
                .help("Users requested per Descope search page")
                .default_value("100")
                .env("USERDASH_DESCOPE_PAGE_SIZE")
                .value_parser(clap::value_parser!(u32).range(1..=1000)),
        )
}
