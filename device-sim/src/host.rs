use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use dashboard_common::{
    AccessPointInfo, NetworkInfo, SignalReading, PATH_AP, PATH_LED, PATH_NETINFO, PATH_RSSI,
    PATH_TEMP,
};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;

// rp2040 sensor conversion, Kelvin in Q18.14.
const ADC_TO_KELVIN_Q18_14_OFFSET: i64 = 11_638_810;
const ADC_TO_KELVIN_Q18_14_SLOPE: i64 = 7_670;
const Q18_14_BITS: u32 = 14;

const RSSI_UNAVAILABLE: i32 = i16::MAX as i32;

#[derive(Debug, Clone)]
struct SimConfig {
    fractional_bits: u32,
    network: NetworkInfo,
}

#[derive(Debug, Default)]
struct SimState {
    led_on: bool,
    tick: u64,
}

impl SimState {
    fn adc_raw(&self) -> i64 {
        // Roughly 300 K, drifting by a few tenths of a degree.
        876 + (self.tick % 6) as i64
    }

    fn rssi(&self) -> i32 {
        if self.tick % 10 == 9 {
            return RSSI_UNAVAILABLE;
        }
        -48 - (self.tick % 12) as i32
    }
}

#[derive(Clone)]
struct AppState {
    sim: Arc<Mutex<SimState>>,
    config: Arc<SimConfig>,
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let fractional_bits = std::env::var("SIM_FRACTIONAL_BITS")
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|bits| *bits == 12 || *bits == 14)
        .unwrap_or(Q18_14_BITS);

    let config = SimConfig {
        fractional_bits,
        network: NetworkInfo {
            host: std::env::var("SIM_HOSTNAME").unwrap_or_else(|_| "picow-sim".to_string()),
            ip: "127.0.0.1".to_string(),
            mac: "28:cd:c1:0f:00:01".to_string(),
            ssid: std::env::var("SIM_SSID").unwrap_or_else(|_| "sim-ap".to_string()),
        },
    };

    let app_state = AppState {
        sim: Arc::new(Mutex::new(SimState::default())),
        config: Arc::new(config),
    };
    spawn_drift_loop(app_state.clone());

    let port = std::env::var("SIM_HTTP_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8081);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind device simulator at {addr}"))?;

    info!(
        "device simulator listening on http://{addr} (Q{}.{fractional_bits})",
        32 - fractional_bits
    );
    axum::serve(listener, router(app_state)).await?;
    Ok(())
}

fn router(app_state: AppState) -> Router {
    Router::new()
        .route(PATH_TEMP, get(handle_temp))
        .route(PATH_LED, get(handle_led))
        .route(PATH_NETINFO, get(handle_netinfo))
        .route(PATH_AP, get(handle_ap))
        .route(PATH_RSSI, get(handle_rssi))
        .with_state(app_state)
}

fn spawn_drift_loop(app_state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(2));
        loop {
            interval.tick().await;
            let mut sim = app_state.sim.lock().await;
            sim.tick = sim.tick.wrapping_add(1);
        }
    });
}

async fn handle_temp(State(state): State<AppState>) -> impl IntoResponse {
    let raw = state.sim.lock().await.adc_raw();
    let q18_14 = ADC_TO_KELVIN_Q18_14_OFFSET - ADC_TO_KELVIN_Q18_14_SLOPE * raw;
    let value = q18_14 >> (Q18_14_BITS - state.config.fractional_bits);
    value.to_string()
}

async fn handle_led(State(state): State<AppState>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let mut sim = state.sim.lock().await;
    match query.as_deref() {
        None => {}
        Some("op=on") => sim.led_on = true,
        Some("op=off") => sim.led_on = false,
        Some("op=toggle") => sim.led_on = !sim.led_on,
        Some(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    }
    let bit = if sim.led_on { "1" } else { "0" };
    bit.into_response()
}

async fn handle_netinfo(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config.network.clone())
}

async fn handle_ap(State(state): State<AppState>) -> impl IntoResponse {
    let rssi = state.sim.lock().await.rssi();
    let have_rssi = rssi != RSSI_UNAVAILABLE;
    Json(AccessPointInfo {
        ssid: state.config.network.ssid.clone(),
        have_rssi,
        rssi: have_rssi.then_some(rssi),
    })
}

async fn handle_rssi(State(state): State<AppState>) -> impl IntoResponse {
    let rssi = state.sim.lock().await.rssi();
    Json(SignalReading {
        rssi,
        valid: rssi != RSSI_UNAVAILABLE,
    })
}
