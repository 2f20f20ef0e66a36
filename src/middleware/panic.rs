use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{error::INTERNAL_MESSAGE, logging::panic_message};

pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_to_text)
}

fn panic_to_text(panic: Box<dyn Any + Send + 'static>) -> Response {
    let client_message = if cfg!(debug_assertions) {
        format!("{INTERNAL_MESSAGE}: {}", panic_message(&*panic))
    } else {
        INTERNAL_MESSAGE.to_string()
    };

    (StatusCode::INTERNAL_SERVER_ERROR, client_message).into_response()
}
