use std::io::Write;

use chrono::Local;
use dashboard_common::{AccessPointInfo, NetworkInfo, ScalePreference, SignalReading};
use tracing::warn;

pub trait View {
    fn set_temperature(&mut self, value: i64, scale: ScalePreference);
    fn set_active_scale(&mut self, previous: Option<ScalePreference>, current: ScalePreference);
    fn set_led_state(&mut self, on: bool);
    fn show_network_info(&mut self, info: &NetworkInfo);
    fn show_access_point(&mut self, info: &AccessPointInfo);
    fn set_signal_strength(&mut self, reading: SignalReading);
    fn show_toast(&mut self, message: &str);
    fn hide_toast(&mut self);
}

pub fn scale_label(scale: ScalePreference) -> &'static str {
    match scale {
        ScalePreference::Kelvin => "Kelvin",
        ScalePreference::Celsius => "Celsius",
        ScalePreference::Fahrenheit => "Fahrenheit",
    }
}

pub struct TerminalView<W> {
    out: W,
    active_scale: ScalePreference,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            active_scale: ScalePreference::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let stamp = Local::now().format("%H:%M:%S");
        if let Err(err) = writeln!(self.out, "[{stamp}] {text}").and_then(|_| self.out.flush()) {
            warn!("terminal write failed: {err}");
        }
    }

    fn scale_bar(&self) -> String {
        ScalePreference::ALL
            .iter()
            .map(|&scale| {
                if scale == self.active_scale {
                    format!("[{scale}]")
                } else {
                    format!(" {scale} ")
                }
            })
            .collect()
    }
}

impl<W: Write> View for TerminalView<W> {
    fn set_temperature(&mut self, value: i64, scale: ScalePreference) {
        self.line(&format!("temperature {value} {scale}"));
    }

    fn set_active_scale(&mut self, _previous: Option<ScalePreference>, current: ScalePreference) {
        self.active_scale = current;
        let bar = self.scale_bar();
        self.line(&format!("scale {bar} ({})", scale_label(current)));
    }

    fn set_led_state(&mut self, on: bool) {
        self.line(if on { "led ON" } else { "led OFF" });
    }

    fn show_network_info(&mut self, info: &NetworkInfo) {
        self.line(&format!(
            "host {} ip {} mac {} ssid {}",
            info.host, info.ip, info.mac, info.ssid
        ));
    }

    fn show_access_point(&mut self, info: &AccessPointInfo) {
        match info.signal() {
            Some(reading) => self.line(&format!(
                "ssid {} rssi {} dBm ({}%)",
                info.ssid,
                reading.rssi,
                reading.percent()
            )),
            None => self.line(&format!("ssid {}", info.ssid)),
        }
    }

    fn set_signal_strength(&mut self, reading: SignalReading) {
        self.line(&format!(
            "rssi {} dBm, signal strength {}%",
            reading.rssi,
            reading.percent()
        ));
    }

    fn show_toast(&mut self, message: &str) {
        self.line(&format!("error: {message}"));
    }

    fn hide_toast(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(view: TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).expect("utf8 output")
    }

    #[test]
    fn marks_active_scale() {
        let mut view = TerminalView::new(Vec::new());
        view.set_active_scale(Some(ScalePreference::Kelvin), ScalePreference::Celsius);
        view.set_temperature(27, ScalePreference::Celsius);

        let out = rendered(view);
        assert!(out.contains("scale  K [C] F  (Celsius)"), "{out}");
        assert!(out.contains("temperature 27 C"), "{out}");
    }

    #[test]
    fn renders_signal_and_led() {
        let mut view = TerminalView::new(Vec::new());
        view.set_led_state(true);
        view.set_signal_strength(SignalReading {
            rssi: -70,
            valid: true,
        });
        view.show_access_point(&AccessPointInfo {
            ssid: "lab".to_string(),
            have_rssi: false,
            rssi: None,
        });

        let out = rendered(view);
        assert!(out.contains("led ON"));
        assert!(out.contains("rssi -70 dBm, signal strength 60%"));
        assert!(out.contains("ssid lab\n"));
    }
}
