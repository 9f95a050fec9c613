use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use fleetpro::config::environment::EnvironmentConfig;
use fleetpro::create_app;
use fleetpro::state::AppState;
use fleetpro::storage::JsonStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 FleetPro - Fleet Management API");
    info!("==================================");

    let config = EnvironmentConfig::default();

    // Inicializar el store de colecciones JSON
    let store = match JsonStore::open(config.data_dir.clone()).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error inicializando el store de datos: {}", e);
            return Err(anyhow::anyhow!("Error de almacenamiento: {}", e));
        }
    };

    if !config.has_autotrak_credentials() {
        info!("⚠️ AUTOTRAK credentials not set — /api/positions will return []");
    }

    // Crear router de la API
    let app_state = AppState::new(store, config.clone());
    let app = create_app(app_state);

    // Puerto del servidor
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  / - Health check");
    info!("📋 Tasks:");
    info!("   GET  /api/tasks - Listar tareas");
    info!("   GET  /api/tasks/board?date=YYYY-MM-DD - Tablero agrupado por estado");
    info!("   POST /api/tasks - Crear tarea");
    info!("   PUT  /api/tasks/:id - Actualizar tarea");
    info!("   DELETE /api/tasks/:id - Eliminar tarea");
    info!("🧑 Drivers:");
    info!("   GET  /api/drivers - Listar conductores");
    info!("   POST /api/drivers - Crear conductor");
    info!("   PUT  /api/drivers/:id - Actualizar conductor");
    info!("   DELETE /api/drivers/:id - Eliminar conductor");
    info!("🚗 Vehicles:");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("📍 Points / Locations:");
    info!("   GET  /api/points - Puntos de carga/descarga");
    info!("   POST /api/points - Crear punto");
    info!("   PUT  /api/points/:id - Actualizar punto");
    info!("   DELETE /api/points/:id - Eliminar punto");
    info!("   GET  /api/locations - Listar ubicaciones");
    info!("   POST /api/locations - Crear ubicación");
    info!("🛰️ Telemetría:");
    info!("   GET  /api/positions - Posiciones en vivo (Autotrak)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
