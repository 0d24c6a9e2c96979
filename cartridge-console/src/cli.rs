//! Command-line schema
//!
//! Every global flag has a `CARTRIDGE_*` environment fallback; `.env` is
//! loaded before parsing so it sits between the defaults and the real
//! environment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shared::models::{CartridgeColor, CartridgeStatus, OperationType, Role};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_DIR: &str = "./.cartridge-console";
pub const DEFAULT_EXPORT_DIR: &str = ".";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "cartridge-console")]
#[command(about = "Консоль учёта картриджей")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the accounting API
    #[arg(long, global = true, env = "CARTRIDGE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory holding the remembered session
    #[arg(long, global = true, env = "CARTRIDGE_SESSION_DIR", default_value = DEFAULT_SESSION_DIR)]
    pub session_dir: PathBuf,

    /// Where exported workbooks are saved
    #[arg(long, global = true, env = "CARTRIDGE_EXPORT_DIR", default_value = DEFAULT_EXPORT_DIR)]
    pub export_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "CARTRIDGE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Log level (RUST_LOG overrides)
    #[arg(long, global = true, env = "CARTRIDGE_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Enables daily rotating file logs
    #[arg(long, global = true, env = "CARTRIDGE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
        /// Keep the session for this run only
        #[arg(long)]
        no_remember: bool,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Stock counts per status
    Dashboard,
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Cartridges(CartridgesCommand),
    #[command(subcommand)]
    Locations(LocationsCommand),
    #[command(subcommand)]
    Operations(OperationsCommand),
    /// Download spreadsheet reports
    #[command(subcommand)]
    Export(ExportCommand),
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    pub username: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub full_name: String,
    #[arg(long, default_value = "OBJECT_USER")]
    pub role: Role,
}

/// Page shown by list commands and after mutations
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ConfirmArgs {
    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

// ========== Users ==========

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Substring of login or full name
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    Show {
        id: String,
    },
    Create {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, default_value = "OBJECT_USER")]
        role: Role,
        #[command(flatten)]
        page: PageArgs,
    },
    Update {
        id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        enabled: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
    Delete {
        id: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    Enable {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    Disable {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    Password {
        id: String,
        #[arg(long)]
        new_password: String,
    },
    /// Whether a login is taken
    Exists {
        username: String,
    },
}

// ========== Cartridges ==========

/// Optional cartridge attributes shared by create and update
#[derive(Args, Debug, Clone, Default)]
pub struct CartridgeFields {
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub resource_pages: Option<i32>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub part_number: Option<String>,
    #[arg(long)]
    pub color: Option<CartridgeColor>,
    #[arg(long)]
    pub compatible_printers: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CartridgesCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        serial_number: Option<String>,
        #[arg(long)]
        status: Option<CartridgeStatus>,
        /// Send model and serial filters to the search endpoint
        #[arg(long)]
        server_filter: bool,
    },
    Show {
        id: String,
    },
    /// Look up by serial number
    Serial {
        serial_number: String,
    },
    Create {
        #[arg(long)]
        model: String,
        #[arg(long, default_value = "IN_STOCK")]
        status: CartridgeStatus,
        #[command(flatten)]
        fields: CartridgeFields,
        #[command(flatten)]
        page: PageArgs,
    },
    Update {
        id: String,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        status: Option<CartridgeStatus>,
        #[command(flatten)]
        fields: CartridgeFields,
        #[command(flatten)]
        page: PageArgs,
    },
    Delete {
        id: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    ByStatus {
        status: CartridgeStatus,
    },
    ByLocation {
        location_id: String,
    },
}

// ========== Locations ==========

#[derive(Args, Debug, Clone, Default)]
pub struct LocationFields {
    #[arg(long)]
    pub cabinet: Option<String>,
    #[arg(long)]
    pub contact_person: Option<String>,
    #[arg(long)]
    pub contact_phone: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum LocationsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Send filters to the search endpoint
        #[arg(long)]
        server_filter: bool,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[command(flatten)]
        fields: LocationFields,
        #[command(flatten)]
        page: PageArgs,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[command(flatten)]
        fields: LocationFields,
        #[command(flatten)]
        page: PageArgs,
    },
    Delete {
        id: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    Activate {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    Deactivate {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Active locations only
    Active,
}

// ========== Operations ==========

#[derive(Subcommand, Debug)]
pub enum OperationsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long = "type")]
        operation_type: Option<OperationType>,
        #[arg(long)]
        cartridge: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Passed to the server as-is
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Send filters to the search endpoint; required for date filters
        #[arg(long)]
        server_filter: bool,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long = "type")]
        operation_type: OperationType,
        #[arg(long)]
        cartridge: String,
        #[arg(long, default_value_t = 1)]
        count: i32,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    ByCartridge {
        cartridge_id: String,
    },
    ByLocation {
        location_id: String,
    },
    ByType {
        operation_type: OperationType,
    },
    ByUser {
        user_id: String,
    },
    ByDate {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}

// ========== Export ==========

#[derive(Subcommand, Debug)]
pub enum ExportCommand {
    Cartridges {
        #[arg(long)]
        status: Option<CartridgeStatus>,
        #[arg(long)]
        model: Option<String>,
    },
    Operations {
        #[arg(long = "type")]
        operation_type: Option<OperationType>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    Users,
    Locations,
    All,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_schema_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "cartridge-console",
            "cartridges",
            "list",
            "--page",
            "3",
            "--status",
            "IN_USE",
            "--server-filter",
        ])
        .unwrap();
        match cli.command {
            Command::Cartridges(CartridgesCommand::List {
                page,
                status,
                server_filter,
                model,
                ..
            }) => {
                assert_eq!(page.page, 3);
                assert_eq!(status, Some(CartridgeStatus::InUse));
                assert!(server_filter);
                assert_eq!(model, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cartridge-console",
            "locations",
            "delete",
            "l1",
            "--yes",
            "--api-url",
            "http://api.local:9000",
        ])
        .unwrap();
        assert_eq!(cli.global.api_url, "http://api.local:9000");
        assert!(matches!(
            cli.command,
            Command::Locations(LocationsCommand::Delete { confirm: ConfirmArgs { yes: true }, .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_enum_value() {
        let result = Cli::try_parse_from([
            "cartridge-console",
            "operations",
            "by-type",
            "LOAN",
        ]);
        assert!(result.is_err());
    }
}
