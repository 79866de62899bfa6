use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Viewport width (px) below which the layout switches to mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub mobile_breakpoint_px: u32,
    pub overlay_enter_delay_ms: u32,
    pub overlay_exit_delay_ms: u32,
    pub toast_auto_dismiss_ms: u32,
    pub currency_prefix: String,
    pub thousands_separator: char,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            overlay_enter_delay_ms: 10,
            overlay_exit_delay_ms: 300,
            toast_auto_dismiss_ms: 3000,
            currency_prefix: "Rp.".to_string(),
            thousands_separator: '.',
        }
    }
}

impl AppConfig {
    /// Defaults plus overrides baked in at build time.
    pub fn load() -> Self {
        Self::with_api_override(option_env!("TRACKER_API_URL"))
    }

    fn with_api_override(api_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.and_then(normalize_base_url) {
            config.api_base_url = url;
        }
        config
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
