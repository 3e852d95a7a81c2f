//! CLI argument definitions for `salesdb`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sales_model::{DEFAULT_STORE_PATH, Table};
use sales_query::DEFAULT_PREVIEW_ROWS;

#[derive(Parser)]
#[command(
    name = "salesdb",
    version,
    about = "Normalize a sales extract into SQLite and run analytical queries",
    long_about = "Normalize a tab-separated sales extract into six related SQLite tables\n\
                  (Region, Country, Customer, ProductCategory, Product, OrderDetail)\n\
                  and run the built-in analytical queries against the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow customer names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the normalized store from an extract.
    Normalize(NormalizeArgs),

    /// Run one of the built-in queries.
    Query(QueryArgs),

    /// List the built-in queries.
    Queries,

    /// List customer names accepted by customer-scoped queries.
    Customers(StoreArgs),

    /// Show the first rows of every table, or of one table.
    Preview(PreviewArgs),

    /// Run read-only SQL against the store.
    Sql(SqlArgs),

    /// Count rows whose foreign keys do not resolve.
    Check(StoreArgs),
}

#[derive(Args)]
pub struct StoreArgs {
    /// SQLite store file.
    #[arg(long = "store", value_name = "PATH", default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Tab-separated extract with one header line.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Keep an existing store instead of rebuilding it.
    #[arg(long = "no-rebuild")]
    pub no_rebuild: bool,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Query name (see `salesdb queries`).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// "First Last" name for customer-scoped queries.
    #[arg(long = "customer", value_name = "NAME")]
    pub customer: Option<String>,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Print the SQL and its parameters before the result.
    #[arg(long = "show-sql")]
    pub show_sql: bool,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Rows per table.
    #[arg(long = "limit", value_name = "N", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub limit: usize,

    /// Only this table (case-insensitive, e.g. `orderdetail`).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<Table>,
}

#[derive(Args)]
pub struct SqlArgs {
    /// Statement to run; writes are rejected.
    #[arg(value_name = "SQL")]
    pub sql: String,

    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_query_defaults() {
        let cli = Cli::try_parse_from(["salesdb", "query", "customer-order-detail", "--customer", "Jane Doe"])
            .unwrap();
        let Command::Query(args) = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(args.customer.as_deref(), Some("Jane Doe"));
        assert_eq!(args.store.store, PathBuf::from(DEFAULT_STORE_PATH));
        assert!(args.format == OutputFormatArg::Table);
        assert!(!args.show_sql);
    }

    #[test]
    fn test_normalize_flags() {
        let cli = Cli::try_parse_from([
            "salesdb",
            "normalize",
            "data.txt",
            "--store",
            "out.db",
            "--no-rebuild",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Normalize(args) = cli.command else {
            panic!("expected normalize command");
        };
        assert_eq!(args.source, PathBuf::from("data.txt"));
        assert_eq!(args.store.store, PathBuf::from("out.db"));
        assert!(args.no_rebuild);
        assert!(args.format == OutputFormatArg::Json);
    }

    #[test]
    fn test_preview_table_parses_case_insensitively() {
        let cli = Cli::try_parse_from(["salesdb", "preview", "--table", "orderdetail", "--limit", "3"])
            .unwrap();
        let Command::Preview(args) = cli.command else {
            panic!("expected preview command");
        };
        assert_eq!(args.table, Some(Table::OrderDetail));
        assert_eq!(args.limit, 3);
    }

    #[test]
    fn test_preview_rejects_unknown_table() {
        let result = Cli::try_parse_from(["salesdb", "preview", "--table", "Orders"]);
        assert!(result.is_err());
    }
}
