use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, Error>;

/// A browser object the renderer needs and could not get.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    #[error("window")]
    Window,

    #[error("document")]
    Document,

    #[error("canvas element '#{0}'")]
    Canvas(String),

    #[error("element '#{0}' is not a canvas")]
    NotACanvas(String),

    #[error("2d rendering context")]
    Context2d,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(Resource),

    #[error("malformed ripple config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid ripple config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let message = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<Resource> for Error {
    fn from(resource: Resource) -> Self {
        Self::ResourceUnavailable(resource)
    }
}
