//! Command-line surface of the provisioning command.

use clap::{Parser, ValueEnum};

use crate::db::RequestStatus;

pub const DEFAULT_REASON: &str = "Generated by management job create_api_request";
pub const DEFAULT_WEBSITE: &str = "www.test-edx-example-website.edu";

/// Accepted values for `--status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    Denied,
    Approved,
}

impl From<StatusArg> for RequestStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => RequestStatus::Pending,
            StatusArg::Denied => RequestStatus::Denied,
            StatusArg::Approved => RequestStatus::Approved,
        }
    }
}

/// Create an ApiAccessRequest for the given user
#[derive(Parser, Debug)]
#[command(name = "create_api_access_request")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    DATABASE_URL    Database URL (default: sqlite:./api_access_admin.db)
    SITE_ID         Id of the current site (default: 1)
    RUST_LOG        Log filter (default: api_access_admin=info)
"#)]
pub struct Cli {
    /// Username of the user the request is created for
    pub username: String,

    /// Create ApiAccessConfig if it does not exist
    #[arg(long)]
    pub create_config: bool,

    /// Status of the created ApiAccessRequest
    #[arg(long, value_enum, default_value_t = StatusArg::Approved)]
    pub status: StatusArg,

    /// Reason that the ApiAccessRequest is being created
    #[arg(long, default_value = DEFAULT_REASON)]
    pub reason: String,

    /// Website associated with the user of the created ApiAccessRequest
    #[arg(long, default_value = DEFAULT_WEBSITE)]
    pub website: String,
}
