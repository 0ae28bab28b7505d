use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lead_capture::app::ports::LeadStorePort;
use lead_capture::infra::{FileLeadStore, NoopNotifier, ReqwestLeadEndpoint};
use lead_capture::pipeline::LeadNormalizer;
use lead_capture::{
    normalize_lead_payload, RawLeadForm, SubmissionConfig, SubmissionKind, SubmitLeadUseCase,
    TimingMeta,
};

fn raw_form() -> RawLeadForm {
    RawLeadForm {
        name: " Ivana Kovač ".to_string(),
        email: "Ivana@Example.HR".to_string(),
        business_type: "pausalni-obrt".to_string(),
        invoice_volume: Some("11-50".to_string()),
        message: Some("Trebam fiskalizaciju.".to_string()),
        source: "guidance-card".to_string(),
        honeypot: String::new(),
    }
}

fn use_case(store: Arc<FileLeadStore>) -> SubmitLeadUseCase {
    SubmitLeadUseCase::new(
        Arc::new(ReqwestLeadEndpoint::new()),
        store,
        Arc::new(NoopNotifier),
    )
}

#[tokio::test]
async fn server_error_stores_lead_on_disk() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir()?;
    let store = Arc::new(FileLeadStore::new(dir.path().join("pending")));
    let config = SubmissionConfig::with_endpoint(format!("{}/leads", server.uri()));

    let result = use_case(store.clone())
        .capture_lead(&raw_form(), "", &TimingMeta::unknown(), &config)
        .await;

    assert_eq!(result.kind(), SubmissionKind::StoredLocally);
    let stored = store.load(result.payload().submission_id()).await?;
    assert_eq!(stored.as_ref().map(|p| p.email()), Some("ivana@example.hr"));
    Ok(())
}

#[tokio::test]
async fn accepted_lead_is_posted_without_honeypot() -> Result<()> {
    let server = MockServer::start().await;
    let payload = normalize_lead_payload(&raw_form(), "https://site.test/?utm_source=news&utm_campaign=spring");
    let submission_id = payload.submission_id().to_string();

    Mock::given(method("POST"))
        .and(path("/leads"))
        .and(header("Idempotency-Key", submission_id.as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir()?;
    let store = Arc::new(FileLeadStore::new(dir.path()));
    let config = SubmissionConfig::with_endpoint(format!("{}/leads", server.uri()));

    let result = use_case(store.clone())
        .submit_lead(payload, &TimingMeta::unknown(), &config)
        .await;
    assert_eq!(result.kind(), SubmissionKind::Sent);
    assert!(store.list().await?.is_empty());

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = requests[0].body_json()?;
    assert!(body.get("honeypot").is_none());
    assert_eq!(body["submissionId"], submission_id);
    assert_eq!(body["name"], "Ivana Kovač");
    assert_eq!(body["businessType"], "pausalni-obrt");
    assert_eq!(body["persona"], "sole-trader");
    assert_eq!(body["source"], "guidance-card");
    assert_eq!(body["utm"]["source"], "news");
    assert_eq!(body["utm"]["campaign"], "spring");
    assert!(body["utm"].get("medium").is_none());
    Ok(())
}

#[tokio::test]
async fn slow_endpoint_times_out_into_local_storage() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let dir = tempdir()?;
    let store = Arc::new(FileLeadStore::new(dir.path()));
    let config = SubmissionConfig {
        endpoint_url: Some(server.uri()),
        timeout: Duration::from_millis(200),
    };

    let result = use_case(store.clone())
        .capture_lead(&raw_form(), "", &TimingMeta::unknown(), &config)
        .await;

    assert_eq!(result.kind(), SubmissionKind::StoredLocally);
    assert_eq!(store.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unconfigured_endpoint_makes_no_request() -> Result<()> {
    let server = MockServer::start().await;
    let dir = tempdir()?;
    let store = Arc::new(FileLeadStore::new(dir.path()));

    let result = use_case(store.clone())
        .capture_lead(&raw_form(), "", &TimingMeta::unknown(), &SubmissionConfig::default())
        .await;

    assert_eq!(result.kind(), SubmissionKind::StoredLocally);
    assert_eq!(result.diagnostic(), Some("no endpoint configured"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
async fn retry_after_outage_delivers_same_submission() -> Result<()> {
    let dir = tempdir()?;
    let store = Arc::new(FileLeadStore::new(dir.path()));

    let stored = use_case(store.clone())
        .capture_lead(&raw_form(), "", &TimingMeta::unknown(), &SubmissionConfig::default())
        .await
        .into_payload();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Idempotency-Key", stored.submission_id().to_string().as_str()))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let result = use_case(store.clone())
        .retry_pending(stored.submission_id(), &SubmissionConfig::with_endpoint(server.uri()))
        .await?;

    assert_eq!(result.kind(), SubmissionKind::Sent);
    assert_eq!(result.payload().submitted_at(), stored.submitted_at());
    assert!(store.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn link_spam_is_rejected_silently() -> Result<()> {
    let server = MockServer::start().await;
    let dir = tempdir()?;
    let store = Arc::new(FileLeadStore::new(dir.path()));

    let mut raw = raw_form();
    raw.message = Some("https://a.test https://b.test https://c.test".to_string());

    let result = use_case(store.clone())
        .with_normalizer(LeadNormalizer::new(500))
        .capture_lead(&raw, "", &TimingMeta::unknown(), &SubmissionConfig::with_endpoint(server.uri()))
        .await;

    assert_eq!(result.kind(), SubmissionKind::Rejected);
    assert!(store.list().await?.is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
    Ok(())
}
