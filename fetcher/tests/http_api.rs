//! HTTP client behaviour against a mock build API.
//!
//! `HttpApi` is blocking; wiremock serves from its own thread, so the
//! blocking calls can run directly inside the async tests.

use camino::Utf8PathBuf;
use paper_fetch::acquisition::{
    AcquisitionError, AcquisitionOutcome, AcquisitionRequest, ensure_artifact,
};
use paper_fetch::api::{
    ApiError, ArtifactDownloader, BuildInfo, BuildInfoService, BuildsListService, HttpApi,
    VersionsListService,
};
use paper_fetch::config::FetchConfig;
use paper_fetch::error::{ErrorKind, FetchError};
use paper_fetch::fetch::{FetchRequest, FetchServices, run_fetch};
use paper_fetch::files::LocalFileService;
use paper_fetch::resolution::ResolveOptions;
use paper_fetch::test_utils::{build_info_json, builds_json, sha256_hex, versions_json};
use paper_fetch::version::Version;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT_PATH: &str = "/v2/projects/paper";
const JAR: &[u8] = b"paper 1.20.2 build 318";

fn api_for(server: &MockServer) -> HttpApi {
    HttpApi::new(&FetchConfig {
        api_root: format!("{}/v2", server.uri()),
        timeout: Duration::from_secs(5),
        ..FetchConfig::default()
    })
}

fn build(version: &str, build: u32, channel: &str, content: &[u8]) -> BuildInfo {
    BuildInfo {
        version: Version::from(version),
        build,
        channel: channel.to_owned(),
        artifact_name: format!("paper-{version}-{build}.jar"),
        sha256: sha256_hex(content),
    }
}

async fn mount_json(server: &MockServer, route: String, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

async fn mount_build(server: &MockServer, info: &BuildInfo, builds: &[u32]) {
    let version = info.version.as_str();
    mount_json(
        server,
        format!("{PROJECT_PATH}/versions/{version}"),
        builds_json("paper", version, builds),
    )
    .await;
    mount_json(
        server,
        format!("{PROJECT_PATH}/versions/{version}/builds/{}", info.build),
        build_info_json(info),
    )
    .await;
}

#[tokio::test]
async fn versions_are_returned_in_ascending_order() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        PROJECT_PATH.to_owned(),
        versions_json("paper", &["1.20.2", "1.9.4", "1.20", "1.19.4"]),
    )
    .await;

    let versions = api_for(&server).list_versions().expect("catalogue");

    let names: Vec<&str> = versions.iter().map(Version::as_str).collect();
    assert_eq!(names, ["1.9.4", "1.19.4", "1.20", "1.20.2"]);
}

#[tokio::test]
async fn builds_are_returned_in_ascending_order() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        format!("{PROJECT_PATH}/versions/1.20.2"),
        builds_json("paper", "1.20.2", &[318, 17, 300]),
    )
    .await;

    let builds = api_for(&server)
        .list_builds(&Version::from("1.20.2"))
        .expect("build list");

    assert_eq!(builds, [17, 300, 318]);
}

#[tokio::test]
async fn build_info_is_decoded() {
    let server = MockServer::start().await;
    let expected = build("1.20.2", 318, "experimental", JAR);
    mount_build(&server, &expected, &[318]).await;

    let info = api_for(&server)
        .build_info(&Version::from("1.20.2"), 318)
        .expect("build info");

    assert_eq!(info, expected);
    assert!(!info.is_stable());
}

#[tokio::test]
async fn empty_version_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let api = api_for(&server);

    let builds_err = api.list_builds(&Version::from("")).expect_err("empty version");
    let info_err = api.build_info(&Version::from(""), 1).expect_err("empty version");

    assert!(matches!(builds_err, ApiError::InvalidArgument { argument: "version" }));
    assert!(matches!(info_err, ApiError::InvalidArgument { argument: "version" }));
}

#[tokio::test]
async fn missing_version_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT_PATH}/versions/0.0")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .list_builds(&Version::from("0.0"))
        .expect_err("unknown version");

    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn server_error_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROJECT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api_for(&server).list_versions().expect_err("server error");

    assert!(matches!(err, ApiError::Http { .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    mount_json(&server, PROJECT_PATH.to_owned(), "{\"versions\": [".to_owned()).await;

    let err = api_for(&server).list_versions().expect_err("truncated body");

    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn artefact_is_streamed_to_destination() {
    let server = MockServer::start().await;
    let info = build("1.20.2", 318, "default", JAR);
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_PATH}/versions/1.20.2/builds/318/downloads/paper-1.20.2-318.jar"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JAR))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("temp dir");
    let dest = dir.path().join("paper.jar");

    let written = api_for(&server)
        .download_artifact(&info, &dest)
        .expect("download");

    assert_eq!(written, JAR.len() as u64);
    assert_eq!(std::fs::read(&dest).expect("downloaded file"), JAR);
}

#[tokio::test]
async fn repeated_run_downloads_once() {
    let server = MockServer::start().await;
    let stable = build("1.20.2", 318, "default", JAR);
    let experimental = build("1.20.4", 2, "experimental", b"paper 1.20.4");
    mount_json(
        &server,
        PROJECT_PATH.to_owned(),
        versions_json("paper", &["1.20.2", "1.20.4"]),
    )
    .await;
    mount_build(&server, &stable, &[300, 318]).await;
    mount_build(&server, &experimental, &[1, 2]).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_PATH}/versions/1.20.2/builds/318/downloads/paper-1.20.2-318.jar"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JAR))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let destination = Utf8PathBuf::try_from(dir.path().join("paper.jar")).expect("UTF-8 path");
    let api = api_for(&server);
    let services = FetchServices {
        versions: &api,
        builds: &api,
        build_info: &api,
        downloader: &api,
        files: &LocalFileService,
    };
    let request = FetchRequest {
        project: "paper",
        resolve: ResolveOptions::default(),
        destination: &destination,
        skip_download: false,
        quiet: true,
    };

    let first = run_fetch(&request, &services, &mut Vec::new()).expect("first run");
    let second = run_fetch(&request, &services, &mut Vec::new()).expect("second run");

    assert_eq!(first.build, stable);
    assert!(matches!(first.outcome, AcquisitionOutcome::Downloaded { .. }));
    assert_eq!(second.outcome, AcquisitionOutcome::AlreadyPresent);
}

#[tokio::test]
async fn tampered_artefact_fails_the_run() {
    let server = MockServer::start().await;
    let stable = build("1.20.2", 318, "default", JAR);
    mount_json(&server, PROJECT_PATH.to_owned(), versions_json("paper", &["1.20.2"])).await;
    mount_build(&server, &stable, &[318]).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_PATH}/versions/1.20.2/builds/318/downloads/paper-1.20.2-318.jar"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tampered".as_slice()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let destination = Utf8PathBuf::try_from(dir.path().join("paper.jar")).expect("UTF-8 path");
    let api = api_for(&server);
    let services = FetchServices {
        versions: &api,
        builds: &api,
        build_info: &api,
        downloader: &api,
        files: &LocalFileService,
    };
    let request = FetchRequest {
        project: "paper",
        resolve: ResolveOptions::default(),
        destination: &destination,
        skip_download: false,
        quiet: false,
    };
    let mut stderr = Vec::new();

    let err = run_fetch(&request, &services, &mut stderr).expect_err("digest differs");

    assert_eq!(err.kind(), ErrorKind::IntegrityMismatch);
    let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
    assert!(stderr_text.contains("Download is invalid!!"));
}

/// Serve one response that promises `declared` bytes, send `body`, and hang up.
fn serve_truncated(declared: usize, body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("listener address");
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut line = String::new();
        while reader.read_line(&mut line).expect("read request") > 2 {
            line.clear();
        }
        let mut stream = stream;
        let head = format!(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/java-archive\r\n\
             Content-Length: {declared}\r\n\r\n"
        );
        stream.write_all(head.as_bytes()).expect("write head");
        stream.write_all(body).expect("write body");
        stream.flush().expect("flush");
    });
    format!("http://{addr}/v2")
}

#[test]
fn connection_dropped_mid_download_is_a_network_failure() {
    let api_root = serve_truncated(1000, b"0123456789");
    let api = HttpApi::new(&FetchConfig {
        api_root,
        timeout: Duration::from_secs(5),
        ..FetchConfig::default()
    });
    let dir = tempfile::tempdir().expect("temp dir");
    let destination = Utf8PathBuf::try_from(dir.path().join("paper.jar")).expect("UTF-8 path");
    let info = build("1.20.2", 318, "default", JAR);
    let request = AcquisitionRequest {
        build: &info,
        destination: &destination,
        skip_download: false,
    };

    let err = ensure_artifact(&request, &api, &LocalFileService).expect_err("body was cut short");

    assert!(
        matches!(&err, AcquisitionError::Download(ApiError::Http { .. })),
        "unexpected error: {err:?}"
    );
    assert_eq!(FetchError::from(err).kind(), ErrorKind::Network);
}
