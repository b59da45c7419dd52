use condense::api;
use condense::config::ApiConfig;
use condense::summarizer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env();

    println!("📂 Upload dir: {}", config.upload_dir);
    println!("📂 Summary dir: {}", config.summary_dir);
    std::fs::create_dir_all(&config.upload_dir)?;
    std::fs::create_dir_all(&config.summary_dir)?;

    println!("📦 Initializing summarizer ({})...", config.summary_model);
    let provider = summarizer::create_provider(config.summarizer_config()).await;
    api::set_provider_handle(provider);

    println!("🚀 Starting API server on http://{} ...", config.bind_addr());
    api::start_api_server(&config).await
}
