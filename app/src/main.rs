use std::sync::Arc;

use settings::Settings;

mod adapter;
mod board;
mod core;
mod grid;
pub mod port;
mod render;
mod settings;

#[tokio::main(flavor = "multi_thread")]
pub async fn main() {
    let settings = Settings::new().expect("Error reading configuration");

    settings
        .monitoring
        .init()
        .expect("Error initializing monitoring");

    let board = Arc::new(
        settings
            .new_board_service()
            .expect("Error initializing board service"),
    );

    tracing::info!("Starting HTTP server");

    settings
        .server
        .run_server(move || vec![adapter::board_api::new_routes(board.clone())])
        .await
        .expect("HTTP server execution failed");
}
