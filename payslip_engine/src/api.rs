//! HTTP API for the Payslip Engine.
//!
//! This module exposes the engine over a minimal REST API using the
//! [`axum`](https://crates.io/crates/axum) framework.  Clients post an
//! employee profile (plus any caller-owned amounts) and receive the
//! derived fields, the payslip view model, or the notification envelope
//! in JSON.  All routes share the rules loaded at start-up.

use crate::config::Config;
use crate::engine::{recompute_derived, run_payslip, PayrollRules, PayslipRequest};
use crate::models::{DerivedFields, EmployeeProfile, Payslip};
use crate::sync::{SyncEnvelope, SyncMetadata};
use anyhow::Result;
use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Application state shared across requests.  The rules are loaded
/// once at start-up and only read afterwards.
pub struct AppState {
    pub rules: PayrollRules,
    pub metadata: SyncMetadata,
}

impl AppState {
    pub fn new(rules: PayrollRules, metadata: SyncMetadata) -> Self {
        Self { rules, metadata }
    }
}

/// Build the API router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/derived", post(derived_handler))
        .route("/api/payslip", post(payslip_handler))
        .route("/api/envelope", post(envelope_handler))
        .with_state(state)
}

/// Handler for POST /api/derived
async fn derived_handler(
    State(app_state): State<Arc<AppState>>,
    Json(profile): Json<EmployeeProfile>,
) -> Json<DerivedFields> {
    Json(recompute_derived(&profile, &app_state.rules))
}

/// Handler for POST /api/payslip
async fn payslip_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<PayslipRequest>,
) -> Json<Payslip> {
    info!(employee_id = %request.employee.employee_id, "computing payslip");
    Json(run_payslip(request, &app_state.rules))
}

/// Handler for POST /api/envelope
async fn envelope_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<PayslipRequest>,
) -> Json<SyncEnvelope> {
    let state = request.into_state(&app_state.rules);
    Json(SyncEnvelope::new(
        state,
        &app_state.rules,
        app_state.metadata.clone(),
        Utc::now(),
    ))
}

/// Launch the API server.  Loads the rules named by `config`, binds to
/// its address and blocks until the server terminates.
pub async fn serve(config: Config) -> Result<()> {
    let rules = match &config.rules_dir {
        Some(dir) => crate::config::load_rules(dir)?,
        None => PayrollRules::default(),
    };
    let state = Arc::new(AppState::new(rules, config.metadata));
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "server listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
