//! Error type shared by the configuration layer and the DOM adapter.
//!
//! The simulation in [`crate::character`] never fails once constructed; only
//! config parsing/validation and browser calls can produce a [`WidgetError`].

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("DOM error: {0}")]
    Dom(String),
}

impl WidgetError {
    /// Wrap a rejected browser call, keeping whatever text the JS side gave us.
    pub fn dom(context: &str, value: JsValue) -> Self {
        match value.as_string() {
            Some(s) => Self::Dom(format!("{context}: {s}")),
            None => Self::Dom(format!("{context}: {value:?}")),
        }
    }
}

impl From<WidgetError> for JsValue {
    fn from(e: WidgetError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub type Result<T, E = WidgetError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let e = WidgetError::InvalidConfig("gravity must be > 0".into());
        assert_eq!(e.to_string(), "invalid config: gravity must be > 0");
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: WidgetError = err.into();
        assert!(matches!(e, WidgetError::Json(_)));
    }
}
