use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalePreference {
    #[default]
    #[serde(rename = "K")]
    Kelvin,
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl ScalePreference {
    pub const ALL: [Self; 3] = [Self::Kelvin, Self::Celsius, Self::Fahrenheit];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kelvin => "K",
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

impl fmt::Display for ScalePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalePreference {
    type Err = DashboardError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "K" => Ok(Self::Kelvin),
            "C" => Ok(Self::Celsius),
            "F" => Ok(Self::Fahrenheit),
            other => Err(DashboardError::InvalidScale(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedOp {
    On,
    Off,
    Toggle,
}

impl LedOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Toggle => "toggle",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoSource {
    #[default]
    NetInfo,
    Ap,
}

impl FromStr for InfoSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "netinfo" => Ok(Self::NetInfo),
            "ap" => Ok(Self::Ap),
            other => Err(format!("unknown info source {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollTask {
    Temperature,
    SignalStrength,
    AccessPoint,
}

impl PollTask {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::SignalStrength => "signal-strength",
            Self::AccessPoint => "access-point",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub host: String,
    pub ip: String,
    pub mac: String,
    pub ssid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPointInfo {
    pub ssid: String,
    #[serde(default)]
    pub have_rssi: bool,
    #[serde(default)]
    pub rssi: Option<i32>,
}

impl AccessPointInfo {
    pub fn signal(&self) -> Option<SignalReading> {
        match (self.have_rssi, self.rssi) {
            (true, Some(rssi)) => Some(SignalReading { rssi, valid: true }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReading {
    pub rssi: i32,
    pub valid: bool,
}

impl SignalReading {
    // `2 * (100 + rssi)` capped to 0..=100.
    pub fn percent(self) -> u8 {
        signal_percent(self.rssi)
    }
}

pub fn signal_percent(rssi: i32) -> u8 {
    let pct = 2 * (100 + i64::from(rssi));
    pct.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scale_codes_round_trip_through_display() {
        for scale in ScalePreference::ALL {
            assert_eq!(scale.to_string().parse::<ScalePreference>(), Ok(scale));
        }
    }

    #[test]
    fn unknown_scale_code_is_invalid_scale() {
        assert_eq!(
            "X".parse::<ScalePreference>(),
            Err(DashboardError::InvalidScale("X".to_string()))
        );
        assert!("k".parse::<ScalePreference>().is_err());
        assert!("".parse::<ScalePreference>().is_err());
    }

    #[test]
    fn signal_percent_is_clamped() {
        assert_eq!(signal_percent(-100), 0);
        assert_eq!(signal_percent(-120), 0);
        assert_eq!(signal_percent(-75), 50);
        assert_eq!(signal_percent(-50), 100);
        assert_eq!(signal_percent(0), 100);
        assert_eq!(signal_percent(i32::MIN), 0);
        assert_eq!(signal_percent(i32::MAX), 100);
        for rssi in -200..=50 {
            assert!(signal_percent(rssi) <= 100);
        }
    }

    #[test]
    fn access_point_signal_requires_have_rssi() {
        let with = AccessPointInfo {
            ssid: "lab".to_string(),
            have_rssi: true,
            rssi: Some(-60),
        };
        assert_eq!(with.signal().map(SignalReading::percent), Some(80));

        let without = AccessPointInfo {
            have_rssi: false,
            ..with.clone()
        };
        assert_eq!(without.signal(), None);
    }

    #[test]
    fn access_point_json_allows_missing_rssi() {
        let json = r#"{"ssid":"lab","have_rssi":false}"#;
        let info: AccessPointInfo = serde_json::from_str(json).expect("valid ap json");
        assert_eq!(info.rssi, None);
        assert!(!info.have_rssi);
    }
}
