use std::sync::Arc;

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::Deserialize;

use crate::board::{BoardError, BoardService};

pub fn new_routes(board: Arc<BoardService>) -> actix_web::Scope {
    web::scope("/clock")
        .route("", web::get().to(get_clock))
        .app_data(web::Data::from(board))
}

#[derive(Debug, Deserialize)]
struct ClockQuery {
    display: Option<String>,
}

async fn get_clock(
    board: web::Data<BoardService>,
    query: web::Query<ClockQuery>,
) -> Result<HttpResponse, BoardError> {
    let image = board.render(query.display.as_deref()).await?;

    Ok(HttpResponse::Ok().content_type(board.content_type()).body(image))
}

impl ResponseError for BoardError {
    fn status_code(&self) -> StatusCode {
        tracing::warn!("BoardError: {:?}", self);

        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).finish()
    }
}
