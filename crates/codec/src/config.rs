/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Insert `?` continuation markers into long payloads
    pub wrap_lines: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { wrap_lines: true }
    }
}

impl CodecConfig {
    /// Create from environment variables
    ///
    /// `FUMEN_WRAP=0|false|off|no` disables wrapping.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let wrap_lines = lookup("FUMEN_WRAP")
            .map(|s| s.trim().to_ascii_lowercase())
            .and_then(|s| match s.as_str() {
                "0" | "false" | "off" | "no" => Some(false),
                "1" | "true" | "on" | "yes" => Some(true),
                _ => None,
            })
            .unwrap_or(true);

        Self { wrap_lines }
    }
}
