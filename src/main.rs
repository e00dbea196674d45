use tokio::net::TcpListener;
use tracing::info;
use blog_generator::{
    config::Config,
    api::routes::create_router,
    logging::configure_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env may carry RUST_LOG, so load it before the subscriber
    dotenv::dotenv().ok();
    configure_logging();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    info!(
        model = %config.groq_model,
        news_enabled = config.news_api_key.is_some(),
        "starting blog generator"
    );

    let app_state = AppState::from_config(config)?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!("Listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
