//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::application::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::infrastructure::connectivity::DEFAULT_PROBE_ADDRESS;
use crate::infrastructure::pexels::PEXELS_API_BASE;

pub(super) const APP_NAME: &str = "photogrid";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "devomo";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Photo API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Paging and grid layout.
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Reachability probing.
    #[serde(default)]
    pub connectivity: ConnectivityConfig,

    /// Card image loading and caching.
    #[serde(default)]
    pub images: ImagesConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Photo API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Pexels API key. Usually supplied through `PEXELS_API_KEY` instead.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Paging and grid layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Photos requested per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Remaining items below the selection that trigger loading the next page.
    #[serde(default = "default_prefetch_threshold")]
    pub prefetch_threshold: usize,

    /// Grid columns.
    #[serde(default = "default_columns")]
    pub columns: u16,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            prefetch_threshold: default_prefetch_threshold(),
            columns: default_columns(),
        }
    }
}

/// Reachability probing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    /// `host:port` probed with a TCP connect.
    #[serde(default = "default_probe_address")]
    pub probe_address: String,

    /// Seconds between probes of the change feed.
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,

    /// Connect timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl ConnectivityConfig {
    /// Returns the probe interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs)
    }

    /// Returns the connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_address: default_probe_address(),
            probe_interval_secs: default_probe_interval_secs(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

/// Card image loading and caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Decoded images kept in memory.
    #[serde(default = "default_memory_cache_size")]
    pub memory_cache_size: usize,

    /// Upper bound of the on-disk image cache in megabytes.
    #[serde(default = "default_disk_cache_mb")]
    pub disk_cache_mb: u64,

    /// Parallel image downloads.
    #[serde(default = "default_max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,
}

impl ImagesConfig {
    /// Returns the disk cache bound in bytes.
    #[must_use]
    pub const fn disk_cache_bytes(&self) -> u64 {
        self.disk_cache_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            memory_cache_size: default_memory_cache_size(),
            disk_cache_mb: default_disk_cache_mb(),
            max_concurrent_downloads: default_max_concurrent_downloads(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Notification duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
        }
    }
}

/// Theme mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light mode (default).
    #[default]
    Light,
    /// Dark mode.
    Dark,
}

impl ThemeMode {
    /// Returns the mode for a dark-theme flag.
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    /// Returns true for dark mode.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Dark => write!(f, "Dark"),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,

    /// Mode used until the user toggles it for the first time.
    #[serde(default)]
    pub mode: ThemeMode,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
            mode: ThemeMode::default(),
        }
    }
}

fn default_base_url() -> String {
    PEXELS_API_BASE.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

const fn default_prefetch_threshold() -> usize {
    5
}

const fn default_columns() -> u16 {
    2
}

fn default_probe_address() -> String {
    DEFAULT_PROBE_ADDRESS.to_string()
}

const fn default_probe_interval_secs() -> u64 {
    5
}

const fn default_probe_timeout_ms() -> u64 {
    2000
}

const fn default_memory_cache_size() -> usize {
    64
}

const fn default_disk_cache_mb() -> u64 {
    200
}

const fn default_max_concurrent_downloads() -> usize {
    4
}

const fn default_notification_duration() -> u64 {
    5
}

fn default_accent_color() -> String {
    "Cyan".to_string()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_key) = args.api_key {
            self.api.api_key = Some(api_key);
        }
        if let Some(base_url) = args.base_url {
            self.api.base_url = base_url;
        }
        if let Some(per_page) = args.per_page {
            self.gallery.per_page = per_page;
        }
    }

    /// Pulls hand-edited values back into the ranges the CLI accepts.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.gallery.per_page = self.gallery.per_page.clamp(1, MAX_PER_PAGE);
        self.gallery.columns = self.gallery.columns.max(1);
        self.connectivity.probe_interval_secs = self.connectivity.probe_interval_secs.max(1);
        self.connectivity.probe_timeout_ms = self.connectivity.probe_timeout_ms.max(1);
        self.images.memory_cache_size = self.images.memory_cache_size.max(1);
        self.images.max_concurrent_downloads = self.images.max_concurrent_downloads.max(1);
        self
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("photogrid.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}
