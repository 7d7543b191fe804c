use serde::{Deserialize, Serialize};

use crate::{
    temperature::{FixedPointFormat, Q18_14_FRACTIONAL_BITS},
    types::InfoSource,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub device_url: String,
    pub fractional_bits: u32,
    pub info_source: InfoSource,
    pub temp_interval_ms: u64,
    pub signal_interval_ms: u64,
    pub tick_ms: u64,
    // Zero leaves requests to the HTTP client's own defaults.
    pub request_timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            device_url: "http://127.0.0.1:8081".to_string(),
            fractional_bits: Q18_14_FRACTIONAL_BITS,
            info_source: InfoSource::NetInfo,
            // Staggered so the two polls rarely hit the device together.
            temp_interval_ms: 2 * 2_718,
            signal_interval_ms: 3 * 3_141,
            tick_ms: 100,
            request_timeout_ms: 0,
        }
    }
}

impl DashboardConfig {
    pub fn sanitize(&mut self) {
        if FixedPointFormat::from_bits(self.fractional_bits).is_none() {
            self.fractional_bits = Q18_14_FRACTIONAL_BITS;
        }

        self.temp_interval_ms = self.temp_interval_ms.clamp(500, 3_600_000);
        self.signal_interval_ms = self.signal_interval_ms.clamp(500, 3_600_000);
        self.tick_ms = self.tick_ms.clamp(10, 1_000);

        let trimmed = self.device_url.trim().trim_end_matches('/');
        self.device_url = if trimmed.is_empty() {
            Self::default().device_url
        } else {
            trimmed.to_string()
        };
    }

    pub fn fixed_point_format(&self) -> FixedPointFormat {
        FixedPointFormat::from_bits(self.fractional_bits).unwrap_or_default()
    }
}
