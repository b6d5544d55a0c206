use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Network knobs for [`probe_with_options`](crate::probe_with_options).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub port: u16,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
        }
    }
}

// std rejects a zero socket timeout
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

impl ProbeOptions {
    /// Same timeout for connect, reads and writes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.read_timeout = timeout;
        self.write_timeout = timeout;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub(crate) fn connect_timeout(&self) -> Duration {
        self.connect_timeout.max(MIN_TIMEOUT)
    }

    pub(crate) fn read_timeout(&self) -> Duration {
        self.read_timeout.max(MIN_TIMEOUT)
    }

    pub(crate) fn write_timeout(&self) -> Duration {
        self.write_timeout.max(MIN_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeouts_are_clamped() {
        let options = ProbeOptions::default().with_timeout(Duration::ZERO);
        assert_eq!(options.connect_timeout(), MIN_TIMEOUT);
        assert_eq!(options.read_timeout(), MIN_TIMEOUT);
        assert_eq!(options.write_timeout(), MIN_TIMEOUT);
    }

    #[test]
    fn defaults_target_smtp_port() {
        let options = ProbeOptions::default();
        assert_eq!(options.port, 25);
        assert_eq!(options.with_port(2525).port, 2525);
    }
}
