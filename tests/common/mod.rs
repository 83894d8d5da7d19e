//! Common test utilities for bridgectl integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A minimal unit file, shaped like the one the gateway checkout ships.
#[allow(dead_code)]
pub const UNIT_TEMPLATE: &str = "\
[Unit]
Description=RustBridge Modbus to MQTT gateway
After=network-online.target

[Service]
Type=simple
User=rustbridge
Environment=RUSTBRIDGE_CONFIG=/etc/rustbridge/config.yaml
ExecStart=/usr/local/bin/rustbridge
Restart=on-failure

[Install]
WantedBy=multi-user.target
";

/// A minimal default config, shaped like the one the checkout ships.
#[allow(dead_code)]
pub const CONFIG_TEMPLATE: &str = "\
server:
  host: 0.0.0.0
  port: 3000
  metrics_enabled: true
mqtt:
  host: localhost
  port: 1883
  client_id: rustbridge
  topic_prefix: rustbridge
  qos: 1
devices: []
";

/// A gateway project checkout fixture
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the checkout root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create an empty checkout
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a checkout carrying the config and unit templates
    pub fn with_templates() -> Self {
        let project = Self::new();
        project.write_file("config.yaml", CONFIG_TEMPLATE);
        project.write_file("rustbridge.service", UNIT_TEMPLATE);
        project
    }

    /// Write a file under the checkout
    pub fn write_file(&self, rel: &str, content: &str) {
        let file_path = self.path.join(rel);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Drop a fake prebuilt release binary into the checkout
    pub fn add_release_artifact(&self) -> PathBuf {
        let release = self.path.join("target").join("release");
        std::fs::create_dir_all(&release).expect("Failed to create target/release");
        let artifact = release.join("rustbridge");
        std::fs::write(&artifact, b"\x7fELF fake gateway binary").expect("Failed to write artifact");
        artifact
    }

    /// Root as a string, for --project-root arguments
    pub fn root_arg(&self) -> String {
        self.path.display().to_string()
    }
}
