// --- Asesor de cursos - Archivo principal ---

use coursepath::server::AppState;
use coursepath::{load_catalog, run_server, AppConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursepath=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!(data = %config.data_path.display(), "=== Asesor de cursos (API) ===");

    let catalog = match load_catalog(&config.data_path) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "no se pudo cargar el catálogo");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let state = AppState::new(catalog, &config);
    let report = state.graph.integrity_report();
    if !report.is_clean() {
        info!(
            dangling = report.dangling_edges.len(),
            cycles = report.cycles.len(),
            "catálogo con problemas de integridad (ver GET /integrity)"
        );
    }

    info!("Iniciando servidor en http://{}", config.bind);
    run_server(state, &config.bind).await
}
