//! Integration tests for the redirect-inspection endpoint and the
//! chain-following engine.

use serde_json::Value;
use trace_proxy::config::ServiceConfig;
use trace_proxy::error::ProxyError;
use trace_proxy::trace::RedirectRecorder;
use trace_proxy::upstream;
use trace_proxy::validate::validate_target;

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn trace_records_one_hop_per_redirect_in_order() {
    let upstream_addr = common::start_redirect_upstream(3, "made it").await;
    let (base, _shutdown) = common::start_service(ServiceConfig::default()).await;

    let target = format!("http://{}/hop/0", upstream_addr);
    let res = client()
        .get(format!("{}/redirect", base))
        .query(&[("url", target.as_str())])
        .header("accept", "application/json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let trace: Value = res.json().await.unwrap();
    let hops = trace.as_array().unwrap();
    assert_eq!(hops.len(), 3);

    for (n, hop) in hops.iter().enumerate() {
        assert_eq!(hop["status"], 302, "every recorded hop is a redirect");
        assert_eq!(
            hop["url"],
            format!("http://{}/hop/{}", upstream_addr, n),
            "hops are in chronological order"
        );
    }
    // The terminal 200 response is not part of the trace.
    assert!(hops.iter().all(|h| h["status"] != 200));
}

#[tokio::test]
async fn trace_preserves_multi_value_headers_within_a_hop() {
    let upstream_addr = common::start_redirect_upstream(1, "done").await;
    let (base, _shutdown) = common::start_service(ServiceConfig::default()).await;

    let target = format!("http://{}/hop/0", upstream_addr);
    let res = client()
        .get(format!("{}/redirect", base))
        .query(&[("url", target.as_str())])
        .header("accept", "application/json")
        .send()
        .await
        .unwrap();

    let trace: Value = res.json().await.unwrap();
    let cookies = trace[0]["headers"]["set-cookie"].as_array().unwrap();
    assert_eq!(cookies.len(), 2);
    assert_eq!(cookies[0], "hop=0");
    assert_eq!(cookies[1], "flavor=oatmeal");
}

#[tokio::test]
async fn direct_answer_yields_empty_trace() {
    let upstream_addr = common::start_fixed_upstream("immediate").await;
    let (base, _shutdown) = common::start_service(ServiceConfig::default()).await;

    let target = format!("http://{}/", upstream_addr);
    let res = client()
        .get(format!("{}/redirect", base))
        .query(&[("url", target.as_str())])
        .header("accept", "application/json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let trace: Value = res.json().await.unwrap();
    assert_eq!(trace.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn trace_response_identifies_the_handling_instance() {
    let upstream_addr = common::start_fixed_upstream("ok").await;
    let mut config = ServiceConfig::default();
    config.server.service_name = "trace-proxy-test".into();
    let (base, _shutdown) = common::start_service(config).await;

    let target = format!("http://{}/", upstream_addr);
    let res = client()
        .get(format!("{}/redirect", base))
        .query(&[("url", target.as_str())])
        .send()
        .await
        .unwrap();

    let served_by = res
        .headers()
        .get("x-served-by")
        .expect("x-served-by header set")
        .to_str()
        .unwrap();
    assert!(served_by.starts_with("trace-proxy-test/"));
}

#[tokio::test]
async fn html_rendering_is_the_default() {
    let upstream_addr = common::start_redirect_upstream(1, "done").await;
    let (base, _shutdown) = common::start_service(ServiceConfig::default()).await;

    let target = format!("http://{}/hop/0", upstream_addr);
    let res = client()
        .get(format!("{}/redirect", base))
        .query(&[("url", target.as_str())])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let body = res.text().await.unwrap();
    assert!(body.contains("302"));
    assert!(body.contains("/hop/0"));
}

#[tokio::test]
async fn chain_past_the_limit_is_a_distinct_error() {
    // 21 redirect responses; the limit of 20 refuses the 21st hop.
    let upstream_addr = common::start_redirect_upstream(21, "never seen").await;
    let (base, _shutdown) = common::start_service(ServiceConfig::default()).await;

    let target = format!("http://{}/hop/0", upstream_addr);
    let res = client()
        .get(format!("{}/redirect", base))
        .query(&[("url", target.as_str())])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    let body = res.text().await.unwrap();
    assert!(body.contains("stopped after 20 redirects"), "body: {body}");
}

#[tokio::test]
async fn limit_refuses_twenty_first_hop_exactly() {
    let upstream_addr = common::start_redirect_upstream(21, "never seen").await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    let target = validate_target(&format!("http://{}/hop/0", upstream_addr)).unwrap();
    let mut recorder = RedirectRecorder::default();
    let err = upstream::follow_redirects(&client, &target, &mut recorder)
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::LimitExceeded(20)));
    assert_eq!(recorder.hops().len(), 20, "no 21st hop recorded");
    assert_eq!(
        recorder.hops().last().unwrap().url,
        format!("http://{}/hop/19", upstream_addr)
    );
}

#[tokio::test]
async fn chain_within_the_limit_succeeds_end_to_end() {
    let upstream_addr = common::start_redirect_upstream(20, "made it").await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    let target = validate_target(&format!("http://{}/hop/0", upstream_addr)).unwrap();
    let mut recorder = RedirectRecorder::default();
    let response = upstream::follow_redirects(&client, &target, &mut recorder)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(recorder.hops().len(), 20);
}

#[tokio::test]
async fn unreachable_target_is_a_transport_error() {
    let dead = common::unreachable_addr().await;
    let (base, _shutdown) = common::start_service(ServiceConfig::default()).await;

    let target = format!("http://{}/", dead);
    let res = client()
        .get(format!("{}/redirect", base))
        .query(&[("url", target.as_str())])
        .send()
        .await
        .unwrap();

    // No partial trace is presented as success.
    assert_eq!(res.status(), 500);
}

#[tokio::test]
async fn missing_url_is_rejected_without_outbound_call() {
    let (base, _shutdown) = common::start_service(ServiceConfig::default()).await;

    let res = client()
        .get(format!("{}/redirect", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let res = client()
        .get(format!("{}/redirect?url=", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn shutdown_stops_the_server() {
    let (base, shutdown) = common::start_service(ServiceConfig::default()).await;

    let res = client().get(format!("{}/ping", base)).send().await.unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    assert!(client().get(format!("{}/ping", base)).send().await.is_err());
}
