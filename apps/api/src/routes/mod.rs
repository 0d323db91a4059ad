pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::shortlist::handlers::{self, MAX_RESUMES, MAX_RESUME_BYTES};
use crate::state::AppState;

/// Whole-request cap: every resume at its limit plus room for the text fields.
pub const MAX_REQUEST_BYTES: usize = MAX_RESUMES * MAX_RESUME_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/shortlist", post(handlers::handle_shortlist_upload))
        .route("/api/v1/shortlist/text", post(handlers::handle_shortlist_text))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::audit::AuditLog;
    use crate::embedding::HashedEmbedder;
    use crate::explanation::ExplanationGenerator;
    use crate::llm_client::LlmError;
    use crate::matching::ScoreRecord;
    use crate::shortlist::Shortlister;
    use crate::taxonomy::SkillTaxonomy;

    const JD: &str = "Data engineer with 3+ years of Python, SQL and Airflow experience.";
    const RESUME: &str = "Data engineer 2018 - 2023. Skills: Python, SQL, Airflow, Spark. \
        Built ETL pipelines and automated reporting.";

    struct EchoExplainer;

    #[async_trait]
    impl ExplanationGenerator for EchoExplainer {
        async fn generate(&self, record: &ScoreRecord, name: &str) -> Result<String, LlmError> {
            Ok(format!("{name} scored {}", record.final_score))
        }
    }

    fn app(audit_path: &Path, explainer: Option<Arc<dyn ExplanationGenerator>>) -> Router {
        let state = AppState {
            shortlister: Shortlister::new(
                Arc::new(SkillTaxonomy::builtin()),
                Arc::new(HashedEmbedder::new(128).unwrap()),
                0.7,
            ),
            explainer,
            audit: Arc::new(AuditLog::open(audit_path).unwrap()),
        };
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(&dir.path().join("audit.jsonl"), None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "shortlist-api");
    }

    #[tokio::test]
    async fn test_text_shortlist_ranks_and_audits() {
        let dir = tempfile::tempdir().unwrap();
        let audit_path = dir.path().join("audit.jsonl");
        let request = json_request(
            "/api/v1/shortlist/text",
            json!({
                "jd_text": JD,
                "skills": ["Python", " "],
                "resumes": [
                    {"name": "empty.txt", "text": "   "},
                    {"name": "ops.txt", "text": "Answered phones and filed reports."},
                    {"name": "data.txt", "text": RESUME}
                ]
            }),
        );

        let response = app(&audit_path, None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        let ranked = body["ranked"].as_array().unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0]["name"], "data.txt");
        assert_eq!(ranked[0]["rank"], 1);
        assert_eq!(ranked[0]["explanation"]["source"], "fallback");
        assert_eq!(ranked[0]["display"]["experience_match"], "5 vs 3+");
        assert!(ranked[0]["score"]["final_score"].as_f64().unwrap()
            > ranked[1]["score"]["final_score"].as_f64().unwrap());

        assert_eq!(body["failures"][0]["name"], "empty.txt");
        assert_eq!(body["summary"]["total"], 3);
        assert_eq!(body["summary"]["failed"], 1);

        let audit = std::fs::read_to_string(&audit_path).unwrap();
        let events: Vec<Value> = audit.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(events.len(), 4);
        assert_eq!(events.last().unwrap()["event_type"], "batch_summary");
        assert!(events.iter().all(|e| e["batch_id"] == body["batch_id"]));
    }

    #[tokio::test]
    async fn test_generated_explanations_are_returned() {
        let dir = tempfile::tempdir().unwrap();
        let request = json_request(
            "/api/v1/shortlist/text",
            json!({
                "jd_text": JD,
                "skills": ["python"],
                "resumes": [{"name": "data.txt", "text": RESUME}]
            }),
        );

        let response = app(&dir.path().join("audit.jsonl"), Some(Arc::new(EchoExplainer)))
            .oneshot(request)
            .await
            .unwrap();
        let body = body_json(response).await;
        let explanation = &body["ranked"][0]["explanation"];
        assert_eq!(explanation["source"], "generated");
        assert!(explanation["text"].as_str().unwrap().starts_with("data.txt scored"));
    }

    #[tokio::test]
    async fn test_missing_skills_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let request = json_request(
            "/api/v1/shortlist/text",
            json!({
                "jd_text": JD,
                "skills": [],
                "resumes": [{"name": "data.txt", "text": RESUME}]
            }),
        );

        let response = app(&dir.path().join("audit.jsonl"), None)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_multipart_upload() {
        let dir = tempfile::tempdir().unwrap();
        let boundary = "X-SHORTLIST-BOUNDARY";
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"jd_text\"\r\n\r\n\
             {JD}\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"skills\"\r\n\r\n\
             Python, Spark\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"resumes\"; filename=\"data.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {RESUME}\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"resumes\"; filename=\"photo.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             not really a png\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/shortlist")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app(&dir.path().join("audit.jsonl"), None)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        assert_eq!(body["ranked"][0]["name"], "data.txt");
        assert_eq!(body["failures"][0]["name"], "photo.png");
        let required: Vec<&str> = body["required_skills"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"spark"));
        assert!(required.contains(&"python"));
    }
}
