//! Error type shared by config loading and DOM wiring.
//!
//! Missing page elements are not errors: each behavior disables itself and the
//! rest of the page keeps working. `PageError` covers the cases where the host
//! itself misbehaves or a config override is malformed.

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("browser window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("dom call failed: {0}")]
    Dom(String),
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for PageError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
