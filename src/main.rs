use std::sync::Arc;

use recipecore_api::{
    config::Config,
    db::{self, Cache, CacheWriterHandle, MemoryRecipeStore, PgRecipeStore, RecipeStore},
    routes::{create_router, AppState},
    services::providers::{VideoProvider, YouTubeProvider},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipecore_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let recipe_store = build_recipe_store(&config).await?;
    let (cache, cache_handle) = build_cache(&config)?;

    if config.youtube_api_key.is_none() {
        tracing::warn!("YOUTUBE_API_KEY not set, video endpoints will return errors");
    }
    let video_provider: Arc<dyn VideoProvider> = Arc::new(YouTubeProvider::new(
        config.youtube_api_key.clone(),
        config.youtube_api_url.clone(),
        cache,
    ));

    let state = Arc::new(AppState::new(recipe_store, video_provider));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "RecipeCore API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn build_recipe_store(config: &Config) -> anyhow::Result<Arc<dyn RecipeStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::run_migrations(&pool).await?;
            tracing::info!("Using PostgreSQL recipe store");
            Ok(Arc::new(PgRecipeStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, recipes are kept in memory only");
            Ok(Arc::new(MemoryRecipeStore::new()))
        }
    }
}

fn build_cache(config: &Config) -> anyhow::Result<(Option<Cache>, Option<CacheWriterHandle>)> {
    match &config.redis_url {
        Some(url) => {
            let client = db::create_redis_client(url)?;
            let (cache, handle) = Cache::new(client);
            tracing::info!("YouTube responses cached in Redis");
            Ok((Some(cache), Some(handle)))
        }
        None => Ok((None, None)),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
