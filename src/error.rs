// Fatal startup failures. Everything after startup is infallible.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no canvas element with id `{0}`")]
    CanvasNotFound(String),
    #[error("canvas `{0}` has no 2d context")]
    NoContext(String),
    #[error("failed to load background image `{0}`")]
    BackgroundLoad(String),
    #[error("pixel buffer holds {actual} bytes, expected {width}x{height} RGBA")]
    BufferSize { width: u32, height: u32, actual: usize },
}

impl From<SimError> for JsValue {
    fn from(err: SimError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_resource() {
        assert_eq!(
            SimError::CanvasNotFound("volcano".into()).to_string(),
            "no canvas element with id `volcano`"
        );
        assert_eq!(
            SimError::BackgroundLoad("tvashtar_plume.gif".into()).to_string(),
            "failed to load background image `tvashtar_plume.gif`"
        );
        assert_eq!(
            SimError::BufferSize { width: 2, height: 3, actual: 5 }.to_string(),
            "pixel buffer holds 5 bytes, expected 2x3 RGBA"
        );
    }
}
