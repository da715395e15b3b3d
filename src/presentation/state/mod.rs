mod app_state;

pub use app_state::{AppState, DEFAULT_UPLOAD_LIMIT_BYTES};
