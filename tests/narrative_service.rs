//! End-to-end tests against a mock narrative service.

use madurometro::config::ReportConfig;
use madurometro::models::AnswerMap;
use madurometro::narrative::{
    NarrativeClient, NarrativeError, NarrativeSession, NarrativeState, FALLBACK_MESSAGE,
    REPORT_ENDPOINT,
};
use madurometro::results::{generate_markdown_report, SurveyResults};
use madurometro::taxonomy::Taxonomy;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_results() -> SurveyResults {
    let answers: AnswerMap =
        serde_json::from_str(include_str!("../fixtures/full-survey.json")).expect("fixture parses");
    SurveyResults::new(answers, Taxonomy::standard())
}

#[tokio::test]
async fn generate_returns_report_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REPORT_ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "report": "La organización muestra un nivel intermedio."
        })))
        .mount(&server)
        .await;

    let client = NarrativeClient::new(&server.uri(), None).unwrap();
    let report = client.generate(&sample_results().payload()).await.unwrap();

    assert_eq!(report, "La organización muestra un nivel intermedio.");
}

#[tokio::test]
async fn request_body_matches_the_service_contract() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REPORT_ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report": "ok" })))
        .mount(&server)
        .await;

    let client = NarrativeClient::new(&server.uri(), None).unwrap();
    client.generate(&sample_results().payload()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let raw = String::from_utf8(requests[0].body.clone()).unwrap();
    let body: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(body["Estrategia"]["Visión Digital"], 3.0);
    assert_eq!(body["Tecnología"]["Automatización de Procesos"], 4.0);
    assert_eq!(body["Analítica de datos"]["Gobierno de Datos"], 2.0);
    assert_eq!(body["Gente y Liderazgo"]["Cultura Digital"], 5.0);
    assert_eq!(body["Nombre"], "María García");
    assert_eq!(body["Empresa"], "Acme Corp");
    assert_eq!(body["TotalScore"], 3.5);

    // Pillar entries ride ahead of the trailing identity and total fields.
    let estrategia = raw.find("\"Estrategia\"").unwrap();
    let total = raw.find("\"TotalScore\"").unwrap();
    assert!(estrategia < total);
}

#[tokio::test]
async fn http_error_settles_on_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REPORT_ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "generation failed"
        })))
        .mount(&server)
        .await;

    let client = NarrativeClient::new(&server.uri(), None).unwrap();
    let mut session = NarrativeSession::new();
    let payload = sample_results().payload();

    let state = session.ensure(&client, &payload).await;

    assert_eq!(
        state,
        &NarrativeState::Failed(FALLBACK_MESSAGE.to_string())
    );
    assert_eq!(session.display_text(), Some(FALLBACK_MESSAGE));
}

#[tokio::test]
async fn status_error_carries_the_service_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REPORT_ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "detail": "model overloaded"
        })))
        .mount(&server)
        .await;

    let client = NarrativeClient::new(&server.uri(), None).unwrap();
    let err = client
        .generate(&sample_results().payload())
        .await
        .unwrap_err();

    match err {
        NarrativeError::Status { status, detail } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(detail, "model overloaded");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_settles_on_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REPORT_ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = NarrativeClient::new(&server.uri(), None).unwrap();
    let mut session = NarrativeSession::new();
    let payload = sample_results().payload();

    session.ensure(&client, &payload).await;

    assert_eq!(session.display_text(), Some(FALLBACK_MESSAGE));
}

#[tokio::test]
async fn narrative_is_fetched_once_per_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REPORT_ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report": "estable" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = NarrativeClient::new(&server.uri(), None).unwrap();
    let mut results = sample_results();

    results.ensure_narrative(&client).await;
    results.ensure_narrative(&client).await;

    assert_eq!(results.narrative().display_text(), Some("estable"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn failed_narrative_is_not_retried_within_a_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REPORT_ENDPOINT))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = NarrativeClient::new(&server.uri(), None).unwrap();
    let mut results = sample_results();

    results.ensure_narrative(&client).await;
    results.ensure_narrative(&client).await;

    assert_eq!(results.narrative().display_text(), Some(FALLBACK_MESSAGE));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn settled_narrative_lands_in_the_markdown_report() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REPORT_ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "report": "La organización destaca en liderazgo."
        })))
        .mount(&server)
        .await;

    let client = NarrativeClient::new(&server.uri(), None).unwrap();
    let mut results = sample_results();
    results.ensure_narrative(&client).await;

    let markdown = generate_markdown_report(&results, &ReportConfig::default());

    assert!(markdown.contains("## Análisis con IA"));
    assert!(markdown.contains("La organización destaca en liderazgo."));
    assert!(markdown.contains("| Madurez Digital | 3.5 | 70% | 04. Avanzado |"));
}
