use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::core::{
    Calculator, ChartSeries, ChartSurface, DepositInputs, PRINCIPAL_SLIDER, RATE_SLIDER,
    RawField, RingChart, RingStyle, SliderRange, Summary, TENURE_SLIDER,
};
use crate::error::CalcError;
use crate::format::CurrencyFormat;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Form fields as posted by the page; every field is optional and coerced.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MaturityPayload {
    principal: Option<RawField>,
    rate: Option<RawField>,
    years: Option<RawField>,
    months: Option<RawField>,
    compounding: Option<RawField>,
    /// Combined tenure slider; wins over `years`/`months` when present.
    tenure_months: Option<RawField>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TenureResponse {
    years: u32,
    months: u32,
    total_months: u32,
    label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedSummary {
    total_interest: String,
    total_investment: String,
    maturity_amount: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SliderPositions {
    principal: f64,
    rate: f64,
    tenure_months: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SliderRanges {
    principal: SliderRange,
    rate: SliderRange,
    tenure_months: SliderRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MaturityResponse {
    inputs: DepositInputs,
    tenure: TenureResponse,
    #[serde(flatten)]
    summary: Summary,
    series: ChartSeries,
    formatted: FormattedSummary,
    sliders: SliderPositions,
    slider_ranges: SliderRanges,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn apply_payload<S: ChartSurface>(calculator: &mut Calculator<S>, payload: MaturityPayload) {
    if let Some(v) = payload.principal {
        calculator.set_principal(v);
    }
    if let Some(v) = payload.rate {
        calculator.set_rate(v);
    }
    if let Some(v) = payload.years {
        calculator.set_years(v);
    }
    if let Some(v) = payload.months {
        calculator.set_months(v);
    }
    if let Some(v) = payload.compounding {
        calculator.set_compounding(v.compounding());
    }
    if let Some(v) = payload.tenure_months {
        calculator.slide_tenure(v.count());
    }
}

fn inputs_from_payload(payload: MaturityPayload) -> DepositInputs {
    let mut calculator = Calculator::<RingChart>::headless(DepositInputs::default());
    apply_payload(&mut calculator, payload);
    *calculator.inputs()
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<DepositInputs, String> {
    let payload = serde_json::from_str::<MaturityPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(inputs_from_payload(payload))
}

fn build_maturity_response<S: ChartSurface>(
    calculator: &Calculator<S>,
    currency: &CurrencyFormat,
) -> MaturityResponse {
    let summary = calculator.summary();
    let tenure = calculator.tenure();
    MaturityResponse {
        inputs: *calculator.inputs(),
        tenure: TenureResponse {
            years: tenure.years,
            months: tenure.months,
            total_months: tenure.total_months(),
            label: tenure.label(),
        },
        summary,
        series: calculator.series(),
        formatted: FormattedSummary {
            total_interest: currency.format(summary.total_interest),
            total_investment: currency.format(summary.total_investment),
            maturity_amount: currency.format(summary.maturity_amount),
        },
        sliders: SliderPositions {
            principal: calculator.principal_slider(),
            rate: calculator.rate_slider(),
            tenure_months: calculator.tenure_slider(),
        },
        slider_ranges: SliderRanges {
            principal: PRINCIPAL_SLIDER,
            rate: RATE_SLIDER,
            tenure_months: TENURE_SLIDER,
        },
    }
}

pub fn build_router(config: AppConfig) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/maturity",
            get(maturity_get_handler).post(maturity_post_handler),
        )
        .route("/api/chart.svg", get(chart_svg_handler))
        .fallback(not_found_handler)
        .with_state(config)
}

pub async fn run_http_server(config: AppConfig) -> Result<(), CalcError> {
    config.validate()?;
    let addr = config.socket_addr()?;
    let app = build_router(config);

    let listener = TcpListener::bind(addr).await?;
    info!("FD calculator listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, app).await?;
    Ok(())
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn maturity_get_handler(
    State(config): State<AppConfig>,
    Query(payload): Query<MaturityPayload>,
) -> Response {
    maturity_handler_impl(&config, payload)
}

async fn maturity_post_handler(
    State(config): State<AppConfig>,
    Json(payload): Json<MaturityPayload>,
) -> Response {
    maturity_handler_impl(&config, payload)
}

fn maturity_handler_impl(config: &AppConfig, payload: MaturityPayload) -> Response {
    debug!(?payload, "maturity request");
    let currency = match config.currency_format() {
        Ok(currency) => currency,
        Err(e) => {
            error!(error = %e, "currency formatter unavailable");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    let mut calculator = Calculator::<RingChart>::headless(DepositInputs::default());
    apply_payload(&mut calculator, payload);
    json_response(StatusCode::OK, build_maturity_response(&calculator, &currency))
}

async fn chart_svg_handler(Query(payload): Query<MaturityPayload>) -> Response {
    let inputs = inputs_from_payload(payload);
    let calculator = Calculator::new(inputs, RingChart::new(RingStyle::default()));
    match calculator.chart().and_then(|chart| chart.svg()) {
        Some(svg) => with_cache_control((
            [(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")],
            svg.to_string(),
        )),
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "chart was not drawn"),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Compounding, Tenure};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>, Option<String>) {
        let response = build_router(AppConfig::default())
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should collect");
        (status, body.to_vec(), content_type)
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::get(uri).body(Body::empty()).expect("request");
        let (status, body, _) = send(request).await;
        let json = serde_json::from_slice(&body).expect("json body");
        (status, json)
    }

    #[test]
    fn inputs_from_json_parses_web_keys() {
        let json = r#"{
          "principal": "250000",
          "rate": 7.1,
          "years": 3,
          "months": "4",
          "compounding": "monthly"
        }"#;
        let inputs = inputs_from_json(json).expect("json should parse");

        assert_approx(inputs.principal, 250_000.0);
        assert_approx(inputs.annual_rate_percent, 7.1);
        assert_eq!(inputs.tenure_years, 3);
        assert_eq!(inputs.tenure_months, 4);
        assert_eq!(inputs.compounding, Compounding::Monthly);
    }

    #[test]
    fn inputs_from_json_uses_page_defaults_for_missing_fields() {
        let inputs = inputs_from_json("{}").expect("json should parse");
        assert_eq!(inputs, DepositInputs::default());
    }

    #[test]
    fn inputs_from_json_coerces_garbage_to_zero() {
        let json = r#"{ "principal": "lots", "rate": -4, "years": "", "months": 30 }"#;
        let inputs = inputs_from_json(json).expect("json should parse");
        assert_eq!(inputs.principal, 0.0);
        assert_eq!(inputs.annual_rate_percent, 0.0);
        assert_eq!(inputs.tenure_years, 0);
        assert_eq!(inputs.tenure_months, 11);
    }

    #[test]
    fn tenure_slider_overrides_year_and_month_fields() {
        let json = r#"{ "years": 9, "months": 3, "tenureMonths": 25 }"#;
        let inputs = inputs_from_json(json).expect("json should parse");
        assert_eq!(
            Tenure::new(inputs.tenure_years, inputs.tenure_months),
            Tenure::new(2, 1)
        );
    }

    #[test]
    fn maturity_response_serialization_contains_expected_fields() {
        let calculator = Calculator::<RingChart>::headless(DepositInputs::default());
        let currency = AppConfig::default().currency_format().expect("currency");
        let response = build_maturity_response(&calculator, &currency);
        let json = serde_json::to_string(&response).expect("response should serialize");

        assert!(json.contains("\"totalInterest\""));
        assert!(json.contains("\"totalInvestment\""));
        assert!(json.contains("\"maturityAmount\""));
        assert!(json.contains("\"annualRatePercent\""));
        assert!(json.contains("\"compounding\":\"quarterly\""));
        assert!(json.contains("\"label\":\"5 years\""));
        assert!(json.contains("\"series\""));
        assert!(json.contains("\"sliderRanges\""));
    }

    #[tokio::test]
    async fn get_maturity_computes_and_formats() {
        let (status, json) =
            get_json("/api/maturity?principal=10000&rate=5&years=1&months=0&compounding=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_approx(json["maturityAmount"].as_f64().expect("number"), 10_500.0);
        assert_approx(json["totalInterest"].as_f64().expect("number"), 500.0);
        assert_approx(json["totalInvestment"].as_f64().expect("number"), 10_000.0);
        assert_eq!(json["formatted"]["maturityAmount"], "₹ 10,500");
        assert_eq!(json["formatted"]["totalInterest"], "₹ 500");
        assert_eq!(json["tenure"]["label"], "1 year");
        assert_eq!(json["sliders"]["tenureMonths"], 12);
        assert_eq!(json["series"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn get_maturity_with_bad_numbers_is_zero_not_an_error() {
        let (status, json) = get_json("/api/maturity?principal=abc&rate=5&years=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["maturityAmount"], 0.0);
        assert_eq!(json["totalInterest"], 0.0);
        assert_eq!(json["formatted"]["maturityAmount"], "₹ 0");
    }

    #[tokio::test]
    async fn post_maturity_accepts_json_body() {
        let request = Request::post("/api/maturity")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"principal":673340,"rate":1,"years":2,"months":1,"compounding":12}"#,
            ))
            .expect("request");
        let (status, body, _) = send(request).await;
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");

        let expected = 673_340.0 * (1.0 + 0.01 / 12.0_f64).powf(12.0 * (2.0 + 1.0 / 12.0));
        assert_eq!(status, StatusCode::OK);
        assert_approx(json["maturityAmount"].as_f64().expect("number"), expected);
        assert_eq!(json["formatted"]["maturityAmount"], "₹ 6,87,509.1");
        assert_eq!(json["tenure"]["label"], "2 years 1 month");
    }

    #[tokio::test]
    async fn chart_svg_is_served_as_svg() {
        let request = Request::get("/api/chart.svg?principal=1000&rate=10&years=2")
            .body(Body::empty())
            .expect("request");
        let (status, body, content_type) = send(request).await;
        let svg = String::from_utf8(body).expect("utf-8");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/svg+xml; charset=utf-8"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[tokio::test]
    async fn index_page_and_unknown_routes() {
        let request = Request::get("/").body(Body::empty()).expect("request");
        let (status, body, _) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8_lossy(&body).contains("/api/maturity"));

        let (status, json) = get_json("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Not found");
    }
}
