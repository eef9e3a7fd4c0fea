use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum IntroError {
    #[error("No browser window available")]
    NoWindow,
    #[error("Session storage is not available")]
    StorageUnavailable,
    #[error("DOM call {call} failed: {detail}")]
    Dom { call: &'static str, detail: String },
}

impl IntroError {
    pub fn dom(call: &'static str, err: JsValue) -> Self {
        IntroError::Dom {
            call,
            detail: format!("{:?}", err),
        }
    }
}
