use crate::types::LedOp;

pub const PATH_TEMP: &str = "/temp";
pub const PATH_LED: &str = "/led";
pub const PATH_NETINFO: &str = "/netinfo";
pub const PATH_AP: &str = "/ap";
pub const PATH_RSSI: &str = "/rssi";

pub fn led_command_path(op: LedOp) -> String {
    format!("{PATH_LED}?op={}", op.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_command_paths() {
        assert_eq!(led_command_path(LedOp::On), "/led?op=on");
        assert_eq!(led_command_path(LedOp::Off), "/led?op=off");
        assert_eq!(led_command_path(LedOp::Toggle), "/led?op=toggle");
    }
}
