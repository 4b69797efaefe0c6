use chrono_tz::Tz;

/// Default business timezone for receipt and report timestamps
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://markit.co.in";

/// Print server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT (or PORT) | 3001 | HTTP port |
/// | CORS_ORIGINS | http://localhost:3000,https://markit.co.in | allowed browser origins |
/// | PRINTER_DEVICE | unset | explicit device node, e.g. /dev/usb/lp1 |
/// | TIMEZONE | Asia/Kolkata | receipt timestamps |
/// | CUSTOMER_CARE_PHONE | 9876543210 | receipt footer |
/// | RETURN_DAYS | 7 | receipt footer |
/// | LOG_LEVEL | info | log level when RUST_LOG is unset |
/// | LOG_DIR | unset | daily rolling log directory |
/// | ENVIRONMENT | development | environment name |
///
/// ```ignore
/// PRINTER_DEVICE=/dev/usb/lp1 HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// Browser origins allowed to call the API
    pub cors_origins: Vec<String>,
    /// Device node to print to; auto-detected when unset
    pub printer_device: Option<String>,
    pub timezone: Tz,
    pub customer_care_phone: String,
    pub return_days: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
            ),
            printer_device: std::env::var("PRINTER_DEVICE")
                .ok()
                .filter(|d| !d.trim().is_empty()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(DEFAULT_TIMEZONE),
            customer_care_phone: std::env::var("CUSTOMER_CARE_PHONE")
                .unwrap_or_else(|_| "9876543210".into()),
            return_days: std::env::var("RETURN_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(7),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3001,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            printer_device: None,
            timezone: DEFAULT_TIMEZONE,
            customer_care_phone: "9876543210".into(),
            return_days: 7,
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
        }
    }
}

/// Comma-separated origin list, blanks dropped
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
