//! Application configuration loaded from environment variables.
//!
//! Every value has a fallback: a missing spreadsheet credential switches the
//! sheets client to public-export mode, and missing profile or blog values use
//! the hardcoded defaults below. Nothing here fails startup.

use std::env;
use std::path::PathBuf;

/// Default sheets cache TTL (1 hour).
pub const DEFAULT_SHEETS_CACHE_TTL_MS: u64 = 3_600_000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL for CORS
    pub frontend_url: String,

    // --- Google Sheets ---
    /// Spreadsheet ID holding all content and form sheets
    pub spreadsheet_id: String,
    /// Base64-encoded service-account JSON (None = public access only)
    pub google_api_key: Option<String>,
    /// How long fetched sheet contents stay fresh
    pub sheets_cache_ttl_ms: u64,

    /// Fallbacks for the profile ("main") sheet
    pub profile_defaults: ProfileDefaults,

    // --- Blog ---
    /// External blog content service ID
    pub blog_id: Option<String>,
    /// Blog post catalog file
    pub blog_posts_path: PathBuf,
    pub blog: BlogSettings,
}

/// Default profile values, used field-by-field when the sheet cell is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub name: String,
    pub title: String,
    pub personal_description: String,
    pub cv_link: String,
    pub contact_me: String,
    pub github_username: String,
    pub github_profile: String,
    pub linkedin_profile: String,
    pub email_address: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            name: "João Melo".to_string(),
            title: "Software Developer".to_string(),
            personal_description: "I'm a fullstack developer with 5 years of experience, \
                                   primarily focused on backend development."
                .to_string(),
            cv_link: "#".to_string(),
            contact_me: "#contact".to_string(),
            github_username: "jhonas8".to_string(),
            github_profile: "https://github.com/jhonas8".to_string(),
            linkedin_profile: "https://www.linkedin.com/in/joao-melo-ribeiro/".to_string(),
            email_address: "joao.victor.ribeiro.melo@joaomeloltda.com".to_string(),
        }
    }
}

impl ProfileDefaults {
    fn from_env() -> Self {
        let fallback = Self::default();
        Self {
            name: env_or("PROFILE_NAME", fallback.name),
            title: env_or("PROFILE_TITLE", fallback.title),
            personal_description: env_or("PROFILE_DESCRIPTION", fallback.personal_description),
            cv_link: env_or("PROFILE_CV_LINK", fallback.cv_link),
            contact_me: env_or("PROFILE_CONTACT_ME", fallback.contact_me),
            github_username: env_or("GITHUB_USERNAME", fallback.github_username),
            github_profile: env_or("GITHUB_PROFILE", fallback.github_profile),
            linkedin_profile: env_or("LINKEDIN_PROFILE", fallback.linkedin_profile),
            email_address: env_or("EMAIL_ADDRESS", fallback.email_address),
        }
    }
}

/// Blog presentation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSettings {
    pub display_name: String,
    pub copyright: String,
    pub default_title: String,
    pub description: String,
    pub base_url: String,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            display_name: "João Melo".to_string(),
            copyright: "João Melo".to_string(),
            default_title: "João Melo - Software Developer".to_string(),
            description: "Fullstack developer with 5 years of experience, sharing insights on \
                          software development, tech trends, and industry best practices."
                .to_string(),
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl BlogSettings {
    fn from_env() -> Self {
        let fallback = Self::default();
        Self {
            display_name: env_or("NEXT_PUBLIC_BLOG_DISPLAY_NAME", fallback.display_name),
            copyright: env_or("NEXT_PUBLIC_BLOG_COPYRIGHT", fallback.copyright),
            default_title: env_or("NEXT_DEFAULT_METADATA_DEFAULT_TITLE", fallback.default_title),
            description: env_or("NEXT_PUBLIC_BLOG_DESCRIPTION", fallback.description),
            base_url: env_or("NEXT_PUBLIC_BASE_URL", fallback.base_url),
        }
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:3000".to_string(),
            spreadsheet_id: "test-spreadsheet".to_string(),
            google_api_key: None,
            sheets_cache_ttl_ms: DEFAULT_SHEETS_CACHE_TTL_MS,
            profile_defaults: ProfileDefaults::default(),
            blog_id: None,
            blog_posts_path: PathBuf::from("data/blog_posts.json"),
            blog: BlogSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let spreadsheet_id = env::var("GOOGLE_EXSPREADSHEET_ID").unwrap_or_default();
        if spreadsheet_id.is_empty() {
            tracing::warn!("GOOGLE_EXSPREADSHEET_ID is not set; sheet reads will return no data");
        }

        let google_api_key = non_empty_var("GOOGLE_API_KEY");
        if google_api_key.is_none() {
            tracing::warn!("GOOGLE_API_KEY is not set; using public spreadsheet access");
        }

        let blog_id = non_empty_var("WISP_BLOG_ID");
        if blog_id.is_none() {
            tracing::warn!("WISP_BLOG_ID is not set");
        }

        Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            spreadsheet_id,
            google_api_key,
            sheets_cache_ttl_ms: parse_ttl(env::var("SHEETS_CACHE_TTL_MS").ok().as_deref()),
            profile_defaults: ProfileDefaults::from_env(),
            blog_id,
            blog_posts_path: env::var("BLOG_POSTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/blog_posts.json")),
            blog: BlogSettings::from_env(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(name: &str, fallback: String) -> String {
    non_empty_var(name).unwrap_or(fallback)
}

/// Parse the cache TTL, falling back to the default for absent or malformed values.
fn parse_ttl(raw: Option<&str>) -> u64 {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => DEFAULT_SHEETS_CACHE_TTL_MS,
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %v, "Invalid SHEETS_CACHE_TTL_MS, using default");
            DEFAULT_SHEETS_CACHE_TTL_MS
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed service-account credentials: {0}")]
    Credentials(String),
}
