use std::{
    cell::{Ref, RefCell},
    sync::OnceLock,
    time::Instant,
};

use dashboard_common::{
    decode_fixed_point, led_command_path, AccessPointInfo, DashboardConfig, DashboardError,
    FixedPointFormat, InfoSource, KeyValueStore, LedOp, NetworkInfo, Notifier, PollTask,
    PreferenceStore, ScalePreference, SessionState, SignalReading, Visibility, PATH_AP, PATH_LED,
    PATH_NETINFO, PATH_RSSI, PATH_TEMP,
};
use tracing::{debug, info, warn};

use crate::{
    fetch::{HttpTransport, ResourceFetcher},
    view::View,
};

pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        static START: OnceLock<Instant> = OnceLock::new();
        START
            .get_or_init(Instant::now)
            .elapsed()
            .as_millis()
            .try_into()
            .unwrap_or(u64::MAX)
    }
}

// All methods take `&self` and never hold a borrow across a fetch, so
// several refreshes can be in flight on one thread. Each one writes its own
// field when its response arrives; there is no request sequencing.
pub struct UpdateController<T, V, S, C> {
    fetcher: ResourceFetcher<T>,
    view: RefCell<V>,
    preferences: RefCell<PreferenceStore<S>>,
    notifier: RefCell<Notifier>,
    session: RefCell<SessionState>,
    clock: C,
    format: FixedPointFormat,
    info_source: InfoSource,
}

impl<T, V, S, C> UpdateController<T, V, S, C>
where
    T: HttpTransport,
    V: View,
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(
        transport: T,
        view: V,
        preferences: PreferenceStore<S>,
        clock: C,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            fetcher: ResourceFetcher::new(transport),
            view: RefCell::new(view),
            preferences: RefCell::new(preferences),
            notifier: RefCell::new(Notifier::default()),
            session: RefCell::new(SessionState::default()),
            clock,
            format: config.fixed_point_format(),
            info_source: config.info_source,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn session(&self) -> SessionState {
        self.session.borrow().clone()
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    pub fn toast_message(&self) -> Option<String> {
        self.notifier.borrow().message().map(str::to_string)
    }

    pub fn is_visible(&self) -> bool {
        self.session.borrow().is_visible()
    }

    pub fn signal_task(&self) -> PollTask {
        match self.info_source {
            InfoSource::NetInfo => PollTask::SignalStrength,
            InfoSource::Ap => PollTask::AccessPoint,
        }
    }

    pub async fn start(&self) {
        let scale = self.preferences.borrow().load();
        self.session.borrow_mut().set_scale(scale);
        self.view.borrow_mut().set_active_scale(None, scale);
        info!("dashboard starting with scale {scale}");

        self.refresh_temperature().await;
        self.refresh_led(PATH_LED).await;
        if self.info_source == InfoSource::NetInfo {
            self.refresh_network_info().await;
        }
        self.refresh_signal().await;
    }

    pub async fn run_task(&self, task: PollTask) {
        match task {
            PollTask::Temperature => self.refresh_temperature().await,
            PollTask::SignalStrength => self.refresh_signal_strength().await,
            PollTask::AccessPoint => self.refresh_access_point().await,
        }
    }

    pub async fn refresh_temperature(&self) {
        if !self.is_visible() {
            debug!("temperature refresh skipped while hidden");
            return;
        }

        match self.fetch_temperature().await {
            Ok(kelvin) => {
                let (value, scale) = {
                    let mut session = self.session.borrow_mut();
                    session.record_temperature(kelvin);
                    (session.display_temperature(), session.scale())
                };
                debug!("temperature {kelvin:.4} K rendered as {value} {scale}");
                self.view.borrow_mut().set_temperature(value, scale);
            }
            Err(err) => self.notify(&err),
        }
    }

    async fn fetch_temperature(&self) -> Result<f64, DashboardError> {
        let response = self.fetcher.fetch(PATH_TEMP).await?;
        decode_fixed_point(response.text(), self.format)
    }

    // Runs regardless of visibility so user commands always go out.
    pub async fn refresh_led(&self, path: &str) {
        let result = match self.fetcher.fetch(path).await {
            Ok(response) => parse_led_bit(path, response.text()),
            Err(err) => Err(err),
        };

        match result {
            Ok(on) => {
                self.session.borrow_mut().record_led(on);
                self.view.borrow_mut().set_led_state(on);
            }
            Err(err) => self.notify(&err),
        }
    }

    pub async fn led_command(&self, op: LedOp) {
        self.refresh_led(&led_command_path(op)).await;
    }

    pub async fn refresh_network_info(&self) {
        if !self.is_visible() {
            debug!("network info refresh skipped while hidden");
            return;
        }

        match self.fetch_json::<NetworkInfo>(PATH_NETINFO).await {
            Ok(info) => self.view.borrow_mut().show_network_info(&info),
            Err(err) => self.notify(&err),
        }
    }

    pub async fn refresh_signal_strength(&self) {
        if !self.is_visible() {
            debug!("signal strength refresh skipped while hidden");
            return;
        }

        match self.fetch_json::<SignalReading>(PATH_RSSI).await {
            Ok(reading) if reading.valid => self.view.borrow_mut().set_signal_strength(reading),
            Ok(reading) => debug!("discarding invalid rssi reading {}", reading.rssi),
            Err(err) => self.notify(&err),
        }
    }

    pub async fn refresh_access_point(&self) {
        if !self.is_visible() {
            debug!("access point refresh skipped while hidden");
            return;
        }

        match self.fetch_json::<AccessPointInfo>(PATH_AP).await {
            Ok(info) => self.view.borrow_mut().show_access_point(&info),
            Err(err) => self.notify(&err),
        }
    }

    pub async fn refresh_signal(&self) {
        self.run_task(self.signal_task()).await;
    }

    // The AP firmware has no `/netinfo`; its panel comes from `/ap`.
    pub async fn reload_info(&self) {
        match self.info_source {
            InfoSource::NetInfo => self.refresh_network_info().await,
            InfoSource::Ap => self.refresh_access_point().await,
        }
    }

    async fn fetch_json<D: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<D, DashboardError> {
        self.fetcher.fetch(path).await?.json()
    }

    pub fn set_scale(&self, scale: ScalePreference) -> bool {
        let Some(previous) = self.session.borrow_mut().set_scale(scale) else {
            return false;
        };

        self.view.borrow_mut().set_active_scale(Some(previous), scale);
        if let Err(err) = self.preferences.borrow_mut().save(scale) {
            self.notify(&err);
        }

        // Reconvert the cached reading; no fetch.
        let value = self.session.borrow().display_temperature();
        self.view.borrow_mut().set_temperature(value, scale);
        info!("scale changed {previous} -> {scale}");
        true
    }

    pub fn set_scale_code(&self, code: &str) -> bool {
        match code.parse::<ScalePreference>() {
            Ok(scale) => self.set_scale(scale),
            Err(err) => {
                self.notify(&err);
                false
            }
        }
    }

    pub fn set_visibility(&self, visibility: Visibility) -> bool {
        let became_visible = self.session.borrow_mut().set_visibility(visibility);
        debug!("visibility {visibility:?}");
        became_visible
    }

    pub async fn on_visibility_change(&self) {
        if !self.is_visible() {
            return;
        }
        self.refresh_temperature().await;
        self.refresh_signal().await;
    }

    pub fn notify(&self, err: &DashboardError) {
        warn!("{err}");
        let message = err.to_string();
        let now_ms = self.clock.now_ms();
        self.notifier.borrow_mut().show(message.as_str(), now_ms);
        self.view.borrow_mut().show_toast(&message);
    }

    pub fn expire_toast(&self) {
        let now_ms = self.clock.now_ms();
        if self.notifier.borrow_mut().expire(now_ms) {
            self.view.borrow_mut().hide_toast();
        }
    }
}

fn parse_led_bit(path: &str, body: &str) -> Result<bool, DashboardError> {
    body.trim()
        .parse::<i64>()
        .map(|bit| bit != 0)
        .map_err(|_| DashboardError::body_parse(path, format!("{body:?} is not an LED bit")))
}
