use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `contents` to a fresh `peakusage.toml`; keep the dir alive while in use.
pub fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("peakusage.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

/// Config pointing `identifier` at `host:port` over a direct Jolokia agent.
pub fn direct_target(identifier: &str, host: &str, port: u16) -> String {
    format!(
        "[collector]\nconnect_timeout_secs = 3\n\n\
         [transport]\nmode = \"direct\"\nrequest_timeout_secs = 2\n\n\
         [targets.{identifier}]\nhost = \"{host}\"\nport = {port}\n"
    )
}
