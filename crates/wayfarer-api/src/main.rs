use wayfarer_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (store, storage, routes)
    let (_state, router) = wayfarer_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    wayfarer_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
