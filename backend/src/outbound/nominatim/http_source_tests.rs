//! Regression coverage for the Nominatim adapter.
//!
//! Network behaviour is exercised against an in-process actix server bound
//! to an ephemeral port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode as ActixStatus;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use rstest::rstest;

use super::*;

const SAMPLE_BODY: &str = r#"[
    {
        "place_id": 2817,
        "licence": "Data (c) OpenStreetMap contributors, ODbL 1.0",
        "osm_type": "relation",
        "osm_id": 1767,
        "lat": "40.9903",
        "lon": "29.0290",
        "class": "boundary",
        "type": "administrative",
        "importance": 0.61,
        "display_name": "Kadikoy, Istanbul, Turkiye",
        "address": { "town": "Kadikoy", "province": "Istanbul", "country_code": "tr" },
        "boundingbox": ["40.9608", "41.0133", "29.0150", "29.1037"]
    }
]"#;

#[derive(Debug, Default, Clone)]
struct Seen {
    query: String,
    user_agent: Option<String>,
    from: Option<String>,
}

struct Upstream {
    endpoint: Url,
    handle: ServerHandle,
    seen: Arc<Mutex<Option<Seen>>>,
}

impl Upstream {
    async fn stop(self) {
        self.handle.stop(false).await;
    }

    fn seen(&self) -> Seen {
        self.seen
            .lock()
            .expect("seen lock")
            .clone()
            .expect("upstream received a request")
    }
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn spawn_upstream(status: u16, body: &'static str, delay: Duration) -> Upstream {
    let seen: Arc<Mutex<Option<Seen>>> = Arc::new(Mutex::new(None));
    let recorder = seen.clone();
    let server = HttpServer::new(move || {
        let recorder = recorder.clone();
        App::new().default_service(web::to(move |req: HttpRequest| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().expect("seen lock") = Some(Seen {
                    query: req.query_string().to_owned(),
                    user_agent: header(&req, "user-agent"),
                    from: header(&req, "from"),
                });
                tokio::time::sleep(delay).await;
                HttpResponse::build(ActixStatus::from_u16(status).expect("valid status"))
                    .content_type("application/json")
                    .body(body)
            }
        }))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind ephemeral port");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Upstream {
        endpoint: Url::parse(&format!("http://{addr}/search")).expect("endpoint url"),
        handle,
        seen,
    }
}

fn source(endpoint: Url, timeout: Duration) -> NominatimHttpSource {
    NominatimHttpSource::new(
        endpoint,
        timeout,
        NominatimIdentity {
            user_agent: "parcel-backend-tests/0.1".to_owned(),
            from_email: Some("ops@example.com".to_owned()),
        },
        NominatimQueryOptions::default(),
    )
    .expect("client builds")
}

#[actix_web::test]
async fn sends_identity_and_search_parameters() {
    let upstream = spawn_upstream(200, SAMPLE_BODY, Duration::ZERO);

    let results = source(upstream.endpoint.clone(), Duration::from_secs(5))
        .search(&GeocodeQuery::new("Kadikoy Istanbul"))
        .await
        .expect("search succeeds");

    let seen = upstream.seen();
    upstream.stop().await;
    assert_eq!(
        seen.query,
        "format=json&addressdetails=1&limit=8&countrycodes=tr&accept-language=tr&q=Kadikoy+Istanbul"
    );
    assert_eq!(seen.user_agent.as_deref(), Some("parcel-backend-tests/0.1"));
    assert_eq!(seen.from.as_deref(), Some("ops@example.com"));

    assert_eq!(results.len(), 1);
    let candidate = &results[0];
    assert_eq!(candidate.place_id, 2817);
    assert_eq!(candidate.lat, 40.9903);
    assert_eq!(candidate.lon, 29.0290);
    assert_eq!(candidate.category.as_deref(), Some("boundary"));
    assert_eq!(candidate.bounding_box, Some([40.9608, 41.0133, 29.0150, 29.1037]));
    assert_eq!(candidate.address.get("province").map(String::as_str), Some("Istanbul"));
}

#[actix_web::test]
async fn service_unavailable_is_reported_not_swallowed() {
    let upstream = spawn_upstream(503, "Service Unavailable", Duration::ZERO);

    let err = source(upstream.endpoint.clone(), Duration::from_secs(5))
        .search(&GeocodeQuery::new("Ankara"))
        .await
        .expect_err("503 must fail");

    upstream.stop().await;
    assert_eq!(
        err,
        GeocodingSourceError::upstream_status(503_u16, "status 503: Service Unavailable")
    );
}

#[actix_web::test]
async fn slow_upstream_times_out() {
    let upstream = spawn_upstream(200, "[]", Duration::from_secs(2));

    let err = source(upstream.endpoint.clone(), Duration::from_millis(200))
        .search(&GeocodeQuery::new("Izmir"))
        .await
        .expect_err("timeout");

    upstream.stop().await;
    assert!(
        matches!(err, GeocodingSourceError::Timeout { .. }),
        "expected timeout, got {err:?}"
    );
}

#[actix_web::test]
async fn unreachable_upstream_is_a_transport_error() {
    let upstream = spawn_upstream(200, "[]", Duration::ZERO);
    let endpoint = upstream.endpoint.clone();
    upstream.stop().await;

    let err = source(endpoint, Duration::from_secs(2))
        .search(&GeocodeQuery::new("Bursa"))
        .await
        .expect_err("connection refused");

    assert!(
        matches!(err, GeocodingSourceError::Transport { .. }),
        "expected transport error, got {err:?}"
    );
}

#[rstest]
#[case::not_json("<html>busy</html>")]
#[case::object_not_array(r#"{"error": "Unable to geocode"}"#)]
#[case::bad_latitude(r#"[{"place_id": 1, "display_name": "x", "lat": "north", "lon": "29"}]"#)]
fn undecodable_payloads_are_decode_errors(#[case] body: &str) {
    let err = parse_candidates(body.as_bytes()).expect_err("decode fails");
    assert!(matches!(err, GeocodingSourceError::Decode { .. }));
}

#[rstest]
fn empty_result_list_decodes() {
    assert_eq!(parse_candidates(b"[]").expect("decodes"), Vec::new());
}

#[rstest]
fn long_error_bodies_are_truncated() {
    let body = "x".repeat(400);
    let err = map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes());
    let message = err.to_string();
    assert!(message.contains("..."));
    assert!(message.len() < 260);
}
