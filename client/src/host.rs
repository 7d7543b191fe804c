use std::{
    io::{ErrorKind, Stdout},
    path::{Path, PathBuf},
    rc::Rc,
    time::Duration,
};

use anyhow::Context;
use dashboard_common::{DashboardConfig, PollTask, PreferenceStore, Scheduler, Visibility};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::LocalSet,
    time::MissedTickBehavior,
};
use tracing::{info, warn};

use crate::{
    commands::{self, parse_command, Command, HELP},
    controller::{MonotonicClock, UpdateController},
    fetch::ReqwestTransport,
    store::FileStore,
    view::TerminalView,
};

type HostController =
    UpdateController<ReqwestTransport, TerminalView<Stdout>, FileStore, MonotonicClock>;

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let data_dir = std::env::var("DASHBOARD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./.dashboard"));

    let mut config = load_config(&data_dir.join("config.json")).unwrap_or_else(|err| {
        warn!("failed to load dashboard config: {err:#}");
        DashboardConfig::default()
    });
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config.sanitize();

    let timeout =
        (config.request_timeout_ms > 0).then(|| Duration::from_millis(config.request_timeout_ms));
    let transport = ReqwestTransport::new(&config.device_url, timeout)?;

    let store_path = data_dir.join("preferences.json");
    let store = FileStore::open(&store_path).unwrap_or_else(|err| {
        warn!("failed to read preferences from {}: {err:#}", store_path.display());
        FileStore::empty(&store_path)
    });

    let controller = Rc::new(UpdateController::new(
        transport,
        TerminalView::new(std::io::stdout()),
        PreferenceStore::new(store),
        MonotonicClock,
        &config,
    ));

    info!("polling device at {}", config.device_url);
    LocalSet::new()
        .run_until(drive(controller, &config))
        .await
}

async fn drive(controller: Rc<HostController>, config: &DashboardConfig) -> anyhow::Result<()> {
    controller.start().await;

    let now_ms = controller.now_ms();
    let mut scheduler = Scheduler::new();
    scheduler.every(PollTask::Temperature, config.temp_interval_ms, now_ms);
    scheduler.every(controller.signal_task(), config.signal_interval_ms, now_ms);

    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    println!("{HELP}");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                controller.expire_toast();
                for task in scheduler.due(controller.now_ms()) {
                    spawn_task(&controller, task);
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("failed to read command line")? else {
                    info!("stdin closed, polling continues without commands");
                    stdin_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => println!("{HELP}"),
                    Ok(Some(command)) => {
                        if let Command::Visibility(visibility) = command {
                            follow_visibility(&mut scheduler, visibility, controller.now_ms());
                        }
                        spawn_command(&controller, command);
                    }
                    Ok(None) => {}
                    Err(err) => println!("{err}; {HELP}"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("dashboard stopped");
    Ok(())
}

// Hidden sessions poll nothing; showing again restarts every interval.
fn follow_visibility(scheduler: &mut Scheduler<PollTask>, visibility: Visibility, now_ms: u64) {
    match visibility {
        Visibility::Hidden => scheduler.pause(),
        Visibility::Visible => scheduler.resume(now_ms),
    }
}

fn spawn_task(controller: &Rc<HostController>, task: PollTask) {
    let controller = Rc::clone(controller);
    tokio::task::spawn_local(async move { controller.run_task(task).await });
}

fn spawn_command(controller: &Rc<HostController>, command: Command) {
    let controller = Rc::clone(controller);
    tokio::task::spawn_local(async move { commands::handle(&controller, command).await });
}

fn load_config(path: &Path) -> anyhow::Result<DashboardConfig> {
    match std::fs::read(path) {
        Ok(raw) => serde_json::from_slice(&raw)
            .with_context(|| format!("invalid config at {}", path.display())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(DashboardConfig::default()),
        Err(err) => Err(err.into()),
    }
}

fn apply_env_overrides(config: &mut DashboardConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("DEVICE_URL") {
        config.device_url = url;
    }
    if let Some(bits) = var("DASHBOARD_FRACTIONAL_BITS").and_then(|value| value.parse().ok()) {
        config.fractional_bits = bits;
    }
    if let Some(value) = var("DASHBOARD_INFO_SOURCE") {
        match value.parse() {
            Ok(source) => config.info_source = source,
            Err(err) => warn!("ignoring DASHBOARD_INFO_SOURCE: {err}"),
        }
    }
}
