use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use chiller_compare::models::{
    CompareRequest, DiagnosticKind, DocumentInput, OpexInputs, Payback, Presence, PowerSource,
    Side, Unit, Value,
};
use chiller_compare::{api, chiller_registry, AppConfig, ComparisonService};
use indexmap::IndexMap;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn service() -> ComparisonService {
    let registry = Arc::new(chiller_registry().unwrap());
    ComparisonService::new(registry, AppConfig::default().opex.defaults())
}

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|l| l.to_string()).collect()
}

/// 厂商 Product Report 版式，两页，第二页前有一页空白
fn datasheet_a() -> DocumentInput {
    DocumentInput {
        name: "Trane CGAF 090".to_string(),
        pages: vec![
            lines(&[
                "Product Report",
                "Model CGAF 090",
                "Refrigerant Type R454B",
                "Net capacity 300.0 kW",
                "Gross unit power 100.0 kW",
                "Net EER 3.00 EER",
            ]),
            lines(&["", "   "]),
            lines(&[
                "Sound power level 88 furlongs",
                "Operating weight 2,450 kg",
            ]),
        ],
        overrides: IndexMap::new(),
    }
}

/// 通用 "标签: 取值" 版式，英制制冷量
fn datasheet_b() -> DocumentInput {
    let mut overrides = IndexMap::new();
    overrides.insert(
        "refrigerant_gwp".to_string(),
        Value::numeric(675.0, Unit::None),
    );
    DocumentInput {
        name: "Competitor XYZ".to_string(),
        pages: vec![lines(&[
            "Model XYZ-200",
            "Refrigerant: R32",
            "Cooling capacity: 85 tons",
            "Power input: 90 kW",
            "Operating weight 2600 kg",
        ])],
        overrides,
    }
}

fn request() -> CompareRequest {
    CompareRequest {
        title: None,
        option_a: datasheet_a(),
        option_b: datasheet_b(),
        opex: OpexInputs {
            capex_a: Some(100_000.0),
            capex_b: Some(112_000.0),
            ..Default::default()
        },
    }
}

#[test]
fn full_comparison_of_two_datasheets() {
    let report = service().compare(request()).unwrap();

    assert_eq!(report.header.title, "Chiller Datasheet Comparison Report");
    assert_eq!(report.header.option_a, "Trane CGAF 090");
    assert_eq!(report.header.currency.as_deref(), Some("€"));
    assert_eq!(report.registry_version, "chiller-v1");
    assert_eq!(report.comparison.len(), 35);
    assert_eq!(report.comparison[0].key, "model");

    let a = &report.specification_a;
    let b = &report.specification_b;
    assert_eq!(a.get("model"), Some(&Value::text("CGAF 090")));
    assert_eq!(b.get("model"), Some(&Value::text("XYZ-200")));
    assert_eq!(a.get("refrigerant"), Some(&Value::text("R454B")));
    assert_eq!(b.get("refrigerant"), Some(&Value::text("R32")));
    assert_eq!(a.number("operating_weight"), Some(2450.0));
    assert_eq!(b.number("refrigerant_gwp"), Some(675.0));

    let capacity = report
        .comparison
        .iter()
        .find(|row| row.key == "net_capacity")
        .unwrap();
    assert_eq!(capacity.presence, Presence::Both);
    assert_eq!(capacity.unit, Some(Unit::Kw));
    assert!((capacity.delta.unwrap() - (85.0 * 3.516_852_842_1 - 300.0)).abs() < 1e-3);

    let gwp = report
        .comparison
        .iter()
        .find(|row| row.key == "refrigerant_gwp")
        .unwrap();
    assert_eq!(gwp.presence, Presence::OnlyB);
    assert!(gwp.delta.is_none());

    let opex = report.opex.as_ref().unwrap();
    assert_eq!(opex.power_source_a, PowerSource::Rated);
    assert!((opex.annual_cost_a - 30_000.0).abs() < 1e-6);
    assert!((opex.annual_cost_b - 27_000.0).abs() < 1e-6);
    assert!((opex.annual_cost_delta + 3_000.0).abs() < 1e-6);

    let payback = report.payback.as_ref().unwrap();
    assert!((payback.capex_delta - 12_000.0).abs() < 1e-9);
    assert!((payback.payback.years().unwrap() - 4.0).abs() < 1e-9);

    let unit_problem = report
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::UnrecognizedUnit)
        .unwrap();
    assert_eq!(unit_problem.side, Some(Side::A));
    assert_eq!(unit_problem.key.as_deref(), Some("sound_power"));
    assert!(a.get("sound_power").unwrap().is_absent());
    assert!(!report.notes.is_empty());
}

#[test]
fn missing_power_skips_opex_but_keeps_report() {
    let mut req = request();
    req.option_b.pages = vec![lines(&["Model XYZ-200"])];
    req.option_b.overrides.clear();

    let report = service().compare(req).unwrap();
    assert!(report.opex.is_none());
    assert!(report.payback.is_none());
    assert!(report.diagnostics.iter().any(|d| {
        d.kind == DiagnosticKind::MissingRequiredInput && d.side == Some(Side::B)
    }));
}

#[test]
fn cheaper_and_more_efficient_option_pays_back_immediately() {
    let mut req = request();
    req.opex.capex_b = Some(95_000.0);
    let report = service().compare(req).unwrap();
    assert_eq!(report.payback.unwrap().payback, Payback::Immediate);
}

#[test]
fn override_for_unknown_field_is_rejected() {
    let mut req = request();
    req.option_a
        .overrides
        .insert("colour".to_string(), Value::text("blue"));
    let err = service().compare(req).unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn health_and_fields_endpoints() {
    let app = api::router(Arc::new(service()));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");

    let response = app
        .oneshot(Request::builder().uri("/api/fields").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["version"], "chiller-v1");
    assert_eq!(json["fields"].as_array().unwrap().len(), 35);
}

fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn compare_endpoint_returns_report() {
    let app = api::router(Arc::new(service()));
    let body = serde_json::to_value(request()).unwrap();

    let response = app.oneshot(post("/api/compare", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["report"]["payback"]["payback"]["status"], "years");
    assert_eq!(json["report"]["comparison"].as_array().unwrap().len(), 35);
}

#[tokio::test]
async fn invalid_assumption_is_a_bad_request() {
    let app = api::router(Arc::new(service()));
    let mut body = serde_json::to_value(request()).unwrap();
    body["opex"]["eflh_hours"] = json!(-5.0);

    let response = app.oneshot(post("/api/compare", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["report"].is_null());
}

#[tokio::test]
async fn extract_endpoint_handles_single_document() {
    let app = api::router(Arc::new(service()));
    let body = serde_json::to_value(datasheet_b()).unwrap();

    let response = app.oneshot(post("/api/extract", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
    let power = &json["extraction"]["specification"]["slots"]["power_input"];
    assert_eq!(power["type"], "numeric");
    assert_eq!(power["value"], 90.0);
    assert_eq!(power["unit"], "kw");
}

#[tokio::test]
async fn extract_endpoint_rejects_mismatched_override() {
    let app = api::router(Arc::new(service()));
    let mut document = datasheet_b();
    document
        .overrides
        .insert("power_input".to_string(), Value::text("ninety"));
    let body = serde_json::to_value(document).unwrap();

    let response = app.oneshot(post("/api/extract", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["extraction"].is_null());
}

#[tokio::test]
async fn csv_endpoint_streams_comparison_table() {
    let app = api::router(Arc::new(service()));
    let body = serde_json::to_value(request()).unwrap();

    let response = app.oneshot(post("/api/compare/csv", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(
        text.lines().next(),
        Some("Metric,Key,Trane CGAF 090,Competitor XYZ,B - A,Unit")
    );
    assert_eq!(text.lines().count(), 36);
}
