//! Contract tests for the command-line host driver
//!
//! Stand-in programs replace mdfind/open/osascript so the argument
//! handling can be checked on any Unix machine.

#![cfg(unix)]

use psbridge::host::{HostDriver, OsascriptHost};
use psbridge::Error;
use std::path::Path;
use std::time::Duration;

const MISSING: &str = "psbridge-test-no-such-program";

#[tokio::test]
async fn test_discovery_with_no_results() {
    let host = OsascriptHost::with_programs("true", MISSING, MISSING);
    let found = host.discover("com.adobe.Photoshop").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_discovery_takes_first_line() {
    // echo prints its single argument back, proving the query is not split
    let host = OsascriptHost::with_programs("echo", MISSING, MISSING);
    let found = host.discover("com.adobe.Photoshop").await.unwrap();
    assert_eq!(
        found.as_deref(),
        Some("kMDItemCFBundleIdentifier == 'com.adobe.Photoshop'")
    );
}

#[tokio::test]
async fn test_discovery_command_failure() {
    let host = OsascriptHost::with_programs("false", MISSING, MISSING);
    let result = host.discover("com.adobe.Photoshop").await;
    assert!(matches!(result, Err(Error::DiscoveryFailed { .. })));

    let host = OsascriptHost::with_programs(MISSING, MISSING, MISSING);
    let result = host.discover("com.adobe.Photoshop").await;
    assert!(matches!(result, Err(Error::DiscoveryFailed { .. })));
}

#[tokio::test]
async fn test_launch() {
    let host = OsascriptHost::with_programs(MISSING, "true", MISSING);
    assert!(host.launch("/Applications/Adobe Photoshop.app").await.is_ok());

    let host = OsascriptHost::with_programs(MISSING, "false", MISSING);
    let result = host.launch("/Applications/Adobe Photoshop.app").await;
    assert!(matches!(
        result,
        Err(Error::LaunchFailed { application, .. }) if application == "/Applications/Adobe Photoshop.app"
    ));
}

#[tokio::test]
async fn test_dispatch_passes_applescript_as_one_argument() {
    let host = OsascriptHost::with_programs(MISSING, MISSING, "echo");
    let output = host
        .dispatch(
            "com.adobe.Photoshop",
            Path::new("/tmp/psbridge/script.jsx"),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    assert!(output.success);
    assert_eq!(output.exit_code, Some(0));
    assert!(output.stdout.contains("with timeout of 5 seconds"));
    assert!(output
        .stdout
        .contains("tell application id \"com.adobe.Photoshop\" to do javascript (\"#include /tmp/psbridge/script.jsx\")"));
}

#[tokio::test]
async fn test_dispatch_failure_is_an_output_not_an_error() {
    let host = OsascriptHost::with_programs(MISSING, MISSING, "false");
    let output = host
        .dispatch(
            "com.adobe.Photoshop",
            Path::new("/tmp/script.jsx"),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    assert!(!output.success);
    assert_eq!(output.exit_code, Some(1));
}

#[tokio::test]
async fn test_dispatch_spawn_failure() {
    let host = OsascriptHost::with_programs(MISSING, MISSING, MISSING);
    let result = host
        .dispatch(
            "com.adobe.Photoshop",
            Path::new("/tmp/script.jsx"),
            Duration::from_secs(5),
        )
        .await;

    assert!(matches!(result, Err(Error::DispatchSpawnFailed { .. })));
}
