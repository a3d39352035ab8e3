use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use house_price_app::config::Settings;
use house_price_app::routes::{self, AppState};
use house_price_app::services::load_predictor;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting house price service...");
    info!(
        "Loading artifacts: encoder={}, scaler={}, model={}",
        settings.artifacts.encoder_path,
        settings.artifacts.scaler_path,
        settings.artifacts.model_path
    );

    // No request is served unless all three artifacts load and agree
    let predictor = match load_predictor(&settings.artifacts) {
        Ok(predictor) => predictor,
        Err(e) => {
            match e.kind() {
                Some(kind) => error!("Failed to load {} artifact: {}", kind, e),
                None => error!("Failed to assemble pipeline: {}", e),
            }
            std::process::exit(1);
        }
    };

    info!(
        "Pipeline ready (training run {}, {} features)",
        predictor.training_run(),
        predictor.schema().width()
    );

    let app_state = AppState::new(predictor);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(1);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
