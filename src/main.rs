use std::sync::Arc;

use jobmatch_onboarding::api::{HttpProfileApi, ProfileApi};
use jobmatch_onboarding::config::AppConfig;
use jobmatch_onboarding::error::Result;
use jobmatch_onboarding::onboarding::{
    CompletionHydrator, MountGuard, OnboardingRouteState, ProgressStore, RouteBinder,
    onboarding_routes,
};
use jobmatch_onboarding::store::{LibSqlBackend, SettingsStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export JOBMATCH_API_URL=https://api.example.org");
        std::process::exit(1);
    });
    let route = std::env::args().nth(1);

    // ── Persistence ─────────────────────────────────────────────────────
    let db: Arc<dyn SettingsStore> = Arc::new(LibSqlBackend::new_local(&config.db_path).await?);
    let store = Arc::new(ProgressStore::load(db).await);

    // ── Hydration ───────────────────────────────────────────────────────
    let api: Arc<dyn ProfileApi> = Arc::new(HttpProfileApi::new(&config.api)?);
    let hydrator = Arc::new(CompletionHydrator::new(api, Arc::clone(&store)));
    let mount = MountGuard::new();
    if let Some(report) = hydrator.hydrate(&mount.token()).await {
        for resource in &report.failed {
            eprintln!("   Warning: could not fetch {resource}; its steps stay as they were");
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────
    if let Some(route) = route {
        let binder = RouteBinder::with_base(Arc::clone(&store), config.onboarding_base.clone());
        if binder.on_navigate(&route).await.is_none() {
            eprintln!("   Route {route} does not match an onboarding step");
        }
    }

    let checklist = store.checklist().await;
    println!("Onboarding {}% complete", checklist.progress);
    for step in &checklist.steps {
        let mark = if step.completed { "x" } else { " " };
        let active = if step.id == checklist.current_step { " <" } else { "" };
        println!("  [{mark}] {}{active}", step.name);
    }

    // ── Status server ───────────────────────────────────────────────────
    if let Some(port) = config.status_port {
        let app = onboarding_routes(OnboardingRouteState {
            store: Arc::clone(&store),
        });
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        tracing::info!(port, "Onboarding status server started");
        axum::serve(listener, app).await?;
    }

    Ok(())
}
