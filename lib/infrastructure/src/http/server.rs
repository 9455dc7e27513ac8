use actix_web::*;
use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Seconds in-flight requests get to finish after a shutdown signal
    pub grace: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            workers: None,
            grace: 5,
        }
    }
}

impl HttpServerConfig {
    pub async fn run_server<F>(&self, scopes: F) -> anyhow::Result<()>
    where
        F: Fn() -> Vec<Scope> + Send + Clone + 'static,
    {
        let mut http_server = HttpServer::new(move || {
            let mut app = App::new().wrap(tracing_actix_web::TracingLogger::default());

            for scope in scopes() {
                app = app.service(scope);
            }

            app
        })
        .disable_signals()
        .shutdown_timeout(self.grace);

        if let Some(workers) = self.workers {
            http_server = http_server.workers(workers);
        }

        let server = http_server
            .bind((self.host.as_str(), self.port))
            .with_context(|| format!("Error binding HTTP server to {}:{}", self.host, self.port))?
            .run();

        let handle = server.handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received, stopping HTTP server");
                handle.stop(true).await;
            }
        });

        tracing::info!("Listening on {}:{}", self.host, self.port);

        server
            .await
            .with_context(|| format!("Error running HTTP server on port {}", self.port))?;

        tracing::info!("HTTP server gracefully stopped");
        Ok(())
    }
}
