use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use medcalc_consult::consult::{NOT_CONFIGURED_MESSAGE, UNAVAILABLE_MESSAGE};
use medcalc_consult::error::ConsultError;
use medcalc_consult::prompt::SYSTEM_PROMPT;
use medcalc_consult::{ConsultBackend, DisabledConsult, get_clinical_context};

const TIMEOUT: Duration = Duration::from_secs(5);

/// Replies with fixed text and remembers the prompts it saw.
struct EchoBackend {
    reply: String,
    seen: Mutex<Vec<(String, String)>>,
}

impl EchoBackend {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl ConsultBackend for EchoBackend {
    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        user_message: &'a str,
    ) -> BoxFuture<'a, Result<String, ConsultError>> {
        self.seen
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_message.to_string()));
        let reply = self.reply.clone();
        Box::pin(async move { Ok(reply) })
    }
}

struct FailingBackend;

impl ConsultBackend for FailingBackend {
    fn generate<'a>(
        &'a self,
        _system_prompt: &'a str,
        _user_message: &'a str,
    ) -> BoxFuture<'a, Result<String, ConsultError>> {
        Box::pin(async { Err(ConsultError::Invocation("connection reset".to_string())) })
    }
}

struct SlowBackend;

impl ConsultBackend for SlowBackend {
    fn generate<'a>(
        &'a self,
        _system_prompt: &'a str,
        _user_message: &'a str,
    ) -> BoxFuture<'a, Result<String, ConsultError>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok("too late".to_string())
        })
    }
}

#[tokio::test]
async fn successful_consult_returns_model_text() {
    let backend = EchoBackend::new("  1. Đánh giá nhanh: nguy cơ cao.\n");
    let context = get_clinical_context(
        &backend,
        "Thang điểm CHA₂DS₂-VASc",
        "Nguy cơ cao",
        "4",
        TIMEOUT,
    )
    .await;

    assert!(!context.fallback);
    assert_eq!(context.text, "1. Đánh giá nhanh: nguy cơ cao.");

    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (system, user) = &seen[0];
    assert_eq!(system, SYSTEM_PROMPT);
    assert!(user.contains("Công cụ sử dụng: Thang điểm CHA₂DS₂-VASc"));
    assert!(user.contains("Kết quả: 4 điểm"));
    assert!(user.contains("Diễn giải: Nguy cơ cao"));
}

#[tokio::test]
async fn backend_failure_degrades_to_apology() {
    let context = get_clinical_context(&FailingBackend, "GCS", "Nhẹ", "15", TIMEOUT).await;
    assert!(context.fallback);
    assert_eq!(context.text, UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn empty_reply_degrades_to_apology() {
    let backend = EchoBackend::new("   ");
    let context = get_clinical_context(&backend, "GCS", "Nhẹ", "15", TIMEOUT).await;
    assert!(context.fallback);
    assert_eq!(context.text, UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn unconfigured_backend_is_not_called() {
    let context = get_clinical_context(&DisabledConsult, "SOFA", "Ổn định", "0", TIMEOUT).await;
    assert!(context.fallback);
    assert_eq!(context.text, NOT_CONFIGURED_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn slow_backend_times_out() {
    let context = get_clinical_context(&SlowBackend, "BMI", "Bình thường", "24.2", TIMEOUT).await;
    assert!(context.fallback);
    assert_eq!(context.text, UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn each_consult_gets_its_own_id() {
    let backend = EchoBackend::new("ok");
    let a = get_clinical_context(&backend, "GCS", "Nhẹ", "15", TIMEOUT).await;
    let b = get_clinical_context(&backend, "GCS", "Nhẹ", "15", TIMEOUT).await;
    assert_ne!(a.consult_id, b.consult_id);
}

#[tokio::test]
async fn context_serializes_with_timestamp() {
    let backend = EchoBackend::new("ok");
    let context = get_clinical_context(&backend, "GCS", "Nhẹ", "NT", TIMEOUT).await;
    let json = serde_json::to_value(&context).unwrap();
    assert_eq!(json["text"], "ok");
    assert_eq!(json["fallback"], false);
    assert!(json["generated_at"].is_string());
}

/// Requires AWS credentials with Bedrock access.
#[tokio::test]
#[ignore]
async fn bedrock_consult_round_trip() {
    let client = medcalc_consult::client::build_client("us-east-1").await;
    let backend = medcalc_consult::BedrockConsult::new(
        client,
        "us.anthropic.claude-haiku-4-5-20251001-v1:0",
        512,
    );
    let context = get_clinical_context(&backend, "Thang điểm qSOFA", "Nguy cơ cao", "2", Duration::from_secs(60)).await;
    assert!(!context.fallback, "{}", context.text);
}
