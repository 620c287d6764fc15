//! Command line and environment configuration.

use std::time::Duration;

use clap::{Args, Parser, ValueEnum};
use datatable::ExportFormat;
use erp_lib::ErpClient;
use erp_lib::auth::StaticTokenProvider;
use erp_lib::error::ApiError;
use log::LevelFilter;

use crate::screen::ScreenOptions;

/// Connection and runtime settings, read from flags or the environment.
///
/// A `.env` file in the working directory is loaded before parsing.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Base URL of the ERP API
    #[arg(long, env = "ERP_BASE_URL")]
    pub base_url: String,

    /// Bearer token for the API
    #[arg(long, env = "ERP_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Request timeout in seconds
    #[arg(long, env = "ERP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Rows per page
    #[arg(long, env = "ERP_PAGE_SIZE", default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: u16,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "ERP_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the REST client.
    pub fn client(&self) -> Result<ErpClient, ApiError> {
        ErpClient::builder()
            .url(&self.base_url)
            .token_provider(StaticTokenProvider::new(self.token.clone()))
            .timeout(self.timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()
    }

    pub fn screen_options(&self) -> ScreenOptions {
        ScreenOptions {
            page_size: usize::from(self.page_size),
            ..ScreenOptions::default()
        }
    }
}

/// Screens reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScreenName {
    Parts,
    Operations,
    JobOrders,
    Overtime,
    PurchaseRequests,
    Suppliers,
    PaymentTerms,
}

impl ScreenName {
    /// Name of the matching screen definition.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenName::Parts => "parts",
            ScreenName::Operations => "operations",
            ScreenName::JobOrders => "job-orders",
            ScreenName::Overtime => "overtime",
            ScreenName::PurchaseRequests => "purchase-requests",
            ScreenName::Suppliers => "suppliers",
            ScreenName::PaymentTerms => "payment-terms",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportArg {
    Csv,
    Json,
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Csv => ExportFormat::Csv,
            ExportArg::Json => ExportFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "erp-admin")]
#[command(about = "Browse ERP list screens from the terminal", long_about = None)]
pub struct Cli {
    /// Screen to open
    #[arg(value_enum)]
    pub screen: ScreenName,

    /// Page to load
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Sort by a column field
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Filter input as `id=value`, e.g. `--filter job-no-filter=001-23`
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Print the page as CSV or JSON instead of a table
    #[arg(long, value_enum)]
    pub export: Option<ExportArg>,

    #[command(flatten)]
    pub settings: Settings,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected id=value, got '{}'", s))?;
    let id = id.trim();
    if id.is_empty() {
        return Err("filter id cannot be empty".to_string());
    }
    Ok((id.to_string(), value.to_string()))
}
