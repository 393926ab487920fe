use chat_gate::auth::AuthGate;
use chat_gate::config::Args;
use chat_gate::rate_limit::{AdmissionLimiter, bucket_sweeper};
use chat_gate::router::build_router;
use chat_gate::state::AppState;
use clap::Parser; // for cli
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_gate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // parse cli arguments
    let args = Args::parse();
    args.validate()?;

    let auth = AuthGate::new(args.api_key.clone());
    let state = AppState::new(auth, AdmissionLimiter::new(args.rate_limit, args.rate_window()));

    // spawn the bucket sweeper
    if let Some(every) = args.sweep_every() {
        let limiter = Arc::clone(&state.limiter);
        tokio::spawn(async move {
            bucket_sweeper(limiter, every).await;
        });
    }

    let app = build_router(state.clone());

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(address = %listener.local_addr()?, "Gate listening");
    tracing::info!(
        api_key_required = state.auth.is_enabled(),
        rate_limit = args.rate_limit,
        rate_window_ms = args.rate_window_ms,
        sweep_interval_secs = args.sweep_interval,
        "Configuration loaded"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
