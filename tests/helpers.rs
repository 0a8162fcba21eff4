use std::process::Output;
use tokio::process::Command;

/// Runs the binary through `cargo run` with the given arguments and environment and waits for
/// it to exit.
pub async fn run_healthprobe(args: &[&str], env_vars: &[(&str, &str)]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .env("RUST_LOG", "info")
        .env("HEALTHPROBE_CONCURRENCY", "1")
        .envs(env_vars.to_owned())
        .output()
        .await
        .expect("The command should run to completion.")
}

/// Asserts that for every pattern at least one line of the output matches.
#[allow(dead_code)] // Not dead code, used in tests.
pub fn check_log_output_regex(output: &[u8], regex_expected_lines: Vec<&str>) {
    let output = String::from_utf8_lossy(output);
    for expected_line in regex_expected_lines {
        let re = regex::Regex::new(expected_line).expect("Failed to compile regex");
        let found = output.lines().any(|line| re.is_match(line));
        assert!(
            found,
            "The output contains the line '{}'. Output was:\n{}",
            expected_line, output
        );
    }
}

/// Asserts that every expected line is present in the output verbatim.
#[allow(dead_code)] // Not dead code, used in tests.
pub fn check_log_output(output: &[u8], expected_lines: Vec<&str>) {
    let output = String::from_utf8_lossy(output);
    for expected_line in expected_lines {
        let found = output.lines().any(|line| line == expected_line);
        assert!(
            found,
            "The output contains the line '{}'. Output was:\n{}",
            expected_line, output
        );
    }
}

/// Returns a loopback port nothing is listening on.
#[allow(dead_code)] // Not dead code, used in tests.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("A port should be free.");
    listener
        .local_addr()
        .expect("The listener should have an address.")
        .port()
}
