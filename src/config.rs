use std::env;
use std::time::Duration;

pub const DEFAULT_TASKS_URL: &str = "https://isaak.dev/index.json";
pub const DEFAULT_REPORT_URL: &str = "https://httpbin.org/post";
pub const DEFAULT_UDP_PAYLOAD: &str = "Spectet Healtcheck";

#[derive(Clone, Debug)]
pub struct Config {
    pub endpoints: EndpointsConfig,
    pub checks: ChecksConfig,
    pub run: RunConfig,
}

impl Config {
    /// Builds the configuration from `HEALTHPROBE_*` environment variables, falling back to the
    /// defaults for anything unset or unparseable.
    pub fn new() -> Self {
        let defaults = Config::default();
        Config {
            endpoints: EndpointsConfig {
                tasks_url: env::var("HEALTHPROBE_TASKS_URL")
                    .unwrap_or(defaults.endpoints.tasks_url),
                report_url: env::var("HEALTHPROBE_REPORT_URL")
                    .unwrap_or(defaults.endpoints.report_url),
            },
            checks: ChecksConfig {
                udp: UdpCheckConfig {
                    payload: env::var("HEALTHPROBE_UDP_PAYLOAD")
                        .unwrap_or(defaults.checks.udp.payload),
                    timeout: seconds_from_env(
                        "HEALTHPROBE_UDP_TIMEOUT",
                        defaults.checks.udp.timeout,
                    ),
                },
                icmp: IcmpCheckConfig {
                    timeout: seconds_from_env(
                        "HEALTHPROBE_ICMP_TIMEOUT",
                        defaults.checks.icmp.timeout,
                    ),
                },
            },
            run: RunConfig {
                check_timeout: seconds_from_env(
                    "HEALTHPROBE_CHECK_TIMEOUT",
                    defaults.run.check_timeout,
                ),
                concurrency: env::var("HEALTHPROBE_CONCURRENCY")
                    .ok()
                    .and_then(|c| c.parse::<usize>().ok())
                    .unwrap_or(defaults.run.concurrency)
                    .max(1),
            },
        }
    }
}

/// The built-in values, independent of the environment.
impl Default for Config {
    fn default() -> Self {
        Config {
            endpoints: EndpointsConfig {
                tasks_url: DEFAULT_TASKS_URL.to_string(),
                report_url: DEFAULT_REPORT_URL.to_string(),
            },
            checks: ChecksConfig {
                udp: UdpCheckConfig {
                    payload: DEFAULT_UDP_PAYLOAD.to_string(),
                    timeout: Duration::from_secs(5),
                },
                icmp: IcmpCheckConfig {
                    timeout: Duration::from_secs(1),
                },
            },
            run: RunConfig {
                check_timeout: Duration::from_secs(30),
                concurrency: 1,
            },
        }
    }
}

/// The collaborator endpoints: where tasks come from and where results go.
#[derive(Clone, Debug)]
pub struct EndpointsConfig {
    pub tasks_url: String,
    pub report_url: String,
}

#[derive(Clone, Debug)]
pub struct ChecksConfig {
    pub udp: UdpCheckConfig,
    pub icmp: IcmpCheckConfig,
}

#[derive(Clone, Debug)]
pub struct UdpCheckConfig {
    /// Sentinel written to the peer. A reply of exactly this length counts as reached.
    pub payload: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct IcmpCheckConfig {
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Upper bound for a single check, regardless of protocol.
    pub check_timeout: Duration,
    /// Number of tasks checked at once. 1 means strictly sequential.
    pub concurrency: usize,
}

fn seconds_from_env(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial] // Tests that manipulate environment variables should not run concurrently.
    fn test_defaults() {
        for name in [
            "HEALTHPROBE_TASKS_URL",
            "HEALTHPROBE_REPORT_URL",
            "HEALTHPROBE_UDP_PAYLOAD",
            "HEALTHPROBE_UDP_TIMEOUT",
            "HEALTHPROBE_ICMP_TIMEOUT",
            "HEALTHPROBE_CHECK_TIMEOUT",
            "HEALTHPROBE_CONCURRENCY",
        ] {
            env::remove_var(name);
        }
        let config = Config::new();
        assert_eq!(config.endpoints.tasks_url, DEFAULT_TASKS_URL);
        assert_eq!(config.endpoints.report_url, DEFAULT_REPORT_URL);
        assert_eq!(config.checks.udp.payload, "Spectet Healtcheck");
        assert_eq!(config.checks.udp.timeout, Duration::from_secs(5));
        assert_eq!(config.checks.icmp.timeout, Duration::from_secs(1));
        assert_eq!(config.run.check_timeout, Duration::from_secs(30));
        assert_eq!(config.run.concurrency, 1);
    }

    #[test]
    #[serial] // Tests that manipulate environment variables should not run concurrently.
    fn test_values_from_env() {
        env::set_var("HEALTHPROBE_TASKS_URL", "http://127.0.0.1:1234/tasks");
        env::set_var("HEALTHPROBE_UDP_TIMEOUT", "2");
        env::set_var("HEALTHPROBE_CONCURRENCY", "8");
        let config = Config::new();
        assert_eq!(config.endpoints.tasks_url, "http://127.0.0.1:1234/tasks");
        assert_eq!(config.checks.udp.timeout, Duration::from_secs(2));
        assert_eq!(config.run.concurrency, 8);
        env::remove_var("HEALTHPROBE_TASKS_URL");
        env::remove_var("HEALTHPROBE_UDP_TIMEOUT");
        env::remove_var("HEALTHPROBE_CONCURRENCY");
    }

    #[test]
    #[serial] // Tests that manipulate environment variables should not run concurrently.
    fn test_invalid_numbers_fall_back_to_defaults() {
        env::set_var("HEALTHPROBE_CHECK_TIMEOUT", "soon");
        env::set_var("HEALTHPROBE_CONCURRENCY", "0");
        let config = Config::new();
        assert_eq!(config.run.check_timeout, Duration::from_secs(30));
        assert_eq!(config.run.concurrency, 1);
        env::remove_var("HEALTHPROBE_CHECK_TIMEOUT");
        env::remove_var("HEALTHPROBE_CONCURRENCY");
    }

    #[test]
    #[serial] // Tests that manipulate environment variables should not run concurrently.
    fn test_default_ignores_env() {
        env::set_var("HEALTHPROBE_REPORT_URL", "http://127.0.0.1:1234/reports");
        env::set_var("HEALTHPROBE_CONCURRENCY", "4");
        let config = Config::default();
        assert_eq!(config.endpoints.report_url, DEFAULT_REPORT_URL);
        assert_eq!(config.run.concurrency, 1);
        env::remove_var("HEALTHPROBE_REPORT_URL");
        env::remove_var("HEALTHPROBE_CONCURRENCY");
    }

    #[test]
    fn test_debug_output_lists_nested_sections() {
        let debug = format!("{:?}", Config::default());
        assert!(debug.starts_with("Config { endpoints: EndpointsConfig {"));
        assert!(debug.contains("udp: UdpCheckConfig { payload: \"Spectet Healtcheck\""));
        assert!(debug.contains("run: RunConfig { check_timeout: 30s, concurrency: 1 }"));
    }
}
