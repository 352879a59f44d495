use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("No global window available")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("Invalid landing config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for LandingError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        LandingError::Js(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<LandingError> for wasm_bindgen::JsValue {
    fn from(error: LandingError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}
