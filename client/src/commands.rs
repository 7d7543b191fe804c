use dashboard_common::{KeyValueStore, LedOp, Visibility, PATH_LED};

use crate::{
    controller::{Clock, UpdateController},
    fetch::HttpTransport,
    view::View,
};

pub const HELP: &str =
    "commands: k | c | f | scale <K|C|F> | on | off | toggle | led | hide | show | reload | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scale(String),
    Led(Option<LedOp>),
    Visibility(Visibility),
    Reload,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments: {line:?}"));
    }

    let command = match (head.to_ascii_lowercase().as_str(), arg) {
        ("k", None) => Command::Scale("K".to_string()),
        ("c", None) => Command::Scale("C".to_string()),
        ("f", None) => Command::Scale("F".to_string()),
        ("scale", Some(code)) => Command::Scale(code.to_string()),
        ("on", None) => Command::Led(Some(LedOp::On)),
        ("off", None) => Command::Led(Some(LedOp::Off)),
        ("toggle", None) => Command::Led(Some(LedOp::Toggle)),
        ("led", None) => Command::Led(None),
        ("hide", None) => Command::Visibility(Visibility::Hidden),
        ("show", None) => Command::Visibility(Visibility::Visible),
        ("reload", None) => Command::Reload,
        ("help", None) | ("?", None) => Command::Help,
        ("quit", None) | ("exit", None) => Command::Quit,
        _ => return Err(format!("unknown command: {line:?}")),
    };
    Ok(Some(command))
}

pub async fn handle<T, V, S, C>(controller: &UpdateController<T, V, S, C>, command: Command)
where
    T: HttpTransport,
    V: View,
    S: KeyValueStore,
    C: Clock,
{
    match command {
        Command::Scale(code) => {
            controller.set_scale_code(&code);
        }
        Command::Led(Some(op)) => controller.led_command(op).await,
        Command::Led(None) => controller.refresh_led(PATH_LED).await,
        Command::Visibility(visibility) => {
            if controller.set_visibility(visibility) {
                controller.on_visibility_change().await;
            }
        }
        Command::Reload => controller.reload_info().await,
        Command::Help | Command::Quit => {}
    }
}
