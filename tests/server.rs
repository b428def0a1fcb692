//! End-to-end tests over a real listener.

use reqwest::StatusCode;
use vanityurl::config::{parse_config, PackageConfig};
use vanityurl::VanityConfig;

mod common;

fn config() -> VanityConfig {
    parse_config(
        r#"
host = "go.foo.dev"
cache_age_secs = 123

[[packages]]
path = "/bar"
repository_url = "https://github.com/foo/bar"

[[packages]]
path = "/bar/nested"
repository_url = "https://git.example.com/nested"
vcs = "hg"
display = "nested_display"
"#,
    )
    .unwrap()
}

#[tokio::test]
async fn test_serves_configured_packages() {
    let server = common::start_server(config()).await;
    let client = common::client();

    let res = client.get(server.url("/bar?go-get=1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["cache-control"], "public, max-age=123");
    assert_eq!(res.headers()["content-type"], "text/html; charset=utf-8");
    assert!(res.headers().contains_key("x-request-id"));

    let body = res.text().await.unwrap();
    assert!(body.contains(r#"<meta name="go-import" content="go.foo.dev/bar git https://github.com/foo/bar">"#));
    assert!(body.contains("https://github.com/foo/bar/tree/master{/dir}"));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_most_specific_package_wins() {
    let server = common::start_server(config()).await;
    let client = common::client();

    let body = client
        .get(server.url("/bar/nested/deep/pkg"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"<meta name="go-import" content="go.foo.dev/bar/nested hg https://git.example.com/nested">"#));
    assert!(body.contains("https://pkg.go.dev/go.foo.dev/bar/nested/deep/pkg"));

    let body = client
        .get(server.url("/bar/other"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"<meta name="go-import" content="go.foo.dev/bar git https://github.com/foo/bar">"#));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = common::start_server(config()).await;

    let res = common::client().get(server.url("/baz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Package not found");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_host_header_used_without_configured_host() {
    let mut config = config();
    config.host = None;
    config.packages = vec![PackageConfig {
        path: "/foo".into(),
        repository_url: "https://gitlab.com/acme/foo".into(),
        ..PackageConfig::default()
    }];

    let server = common::start_server(config).await;
    let body = common::client()
        .get(server.url("/foo"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let want = format!(
        r#"<meta name="go-import" content="{}/foo git https://gitlab.com/acme/foo">"#,
        server.addr
    );
    assert!(body.contains(&want), "missing {} in {}", want, body);

    server.stop().await.unwrap();
}
