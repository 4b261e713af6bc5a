//! Test configuration helpers for creating downloaders against a mock backend

use record_zip_dl::{Config, FileCollisionAction, MassFileDownloader, OutputConfig, SourceConfig};
use tempfile::TempDir;
use wiremock::MockServer;

/// Path the mock backend serves record files on
pub const FILES_PATH: &str = "/api/record-files";

/// Authorization header value configured for every test downloader
pub const TEST_AUTH: &str = "Bearer test-token";

/// Build a config writing into `temp_dir/downloads` and reading from `server`
pub fn test_config(
    server: &MockServer,
    temp_dir: &TempDir,
    collision: FileCollisionAction,
) -> Config {
    Config {
        output: OutputConfig {
            output_dir: temp_dir.path().join("downloads"),
            file_collision: collision,
            ..Default::default()
        },
        source: Some(SourceConfig {
            endpoint: format!("{}{}", server.uri(), FILES_PATH),
            auth_header: Some(TEST_AUTH.to_string()),
        }),
        ..Default::default()
    }
}

/// Downloader wired to `server` with the default HTTP/ZIP/directory stack
pub fn create_http_downloader(
    server: &MockServer,
    collision: FileCollisionAction,
) -> (MassFileDownloader, TempDir) {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = test_config(server, &temp_dir, collision);
    let downloader = MassFileDownloader::from_config(config).expect("failed to create downloader");
    (downloader, temp_dir)
}
