use chrono::Utc;
use httpmock::prelude::*;
use numera::app::study::{StudyFigures, StudyKind, StudyRequest};
use numera::utils::rate_limit::RateLimitConfig;
use numera::{
    GeneratorConfig, NumeraError, OpenAiClient, Person, RateLimiter, StudyEngine,
};

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(GeneratorConfig {
        api_key: "sk-test".to_string(),
        endpoint: server.url("/v1/chat/completions"),
        ..GeneratorConfig::default()
    })
}

fn engine_for(server: &MockServer) -> StudyEngine<OpenAiClient> {
    let limiter = RateLimiter::new(RateLimitConfig::default(), Utc::now());
    StudyEngine::new(client_for(server), limiter)
}

fn profile_request() -> StudyRequest {
    StudyRequest {
        kind: StudyKind::Profile,
        person: Person::new("Jean")
            .with_last_name("Dupont")
            .with_birth_date("15/03/1990"),
        partner: None,
        reference_year: None,
        event: None,
    }
}

fn chat_completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_profile_study_end_to_end() {
    let server = MockServer::start();

    let analysis_json = serde_json::json!({
        "introduction": "A structured overview of the profile.",
        "lifePath": {
            "calculation": "15 -> 6, 03 -> 3, 1990 -> 19 -> 1, total 10 -> 1",
            "meaning": { "personality": "Independent and driven." }
        },
        "conclusion": { "summary": "A coherent profile." }
    })
    .to_string();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test")
            .json_body_partial(r#"{ "model": "gpt-4o-mini" }"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(chat_completion_body(&analysis_json));
    });

    let mut engine = engine_for(&server);
    let report = engine.run(&profile_request()).await.unwrap();

    api_mock.assert();
    assert_eq!(report.kind, StudyKind::Profile);
    match &report.figures {
        StudyFigures::Profile(profile) => {
            assert_eq!(profile.life_path, 1);
            assert_eq!(profile.expression, 3);
            assert_eq!(profile.intimate, 3);
        }
        other => panic!("expected profile figures, got {:?}", other),
    }
    assert_eq!(
        report.analysis.introduction.as_deref(),
        Some("A structured overview of the profile.")
    );
    assert!(report.analysis.life_path.is_some());
}

#[tokio::test]
async fn test_compatibility_study_with_partial_partner() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(chat_completion_body(
                r#"{ "introduction": "Compatibility reading." }"#,
            ));
    });

    let request = StudyRequest {
        kind: StudyKind::LoveCompatibility,
        person: Person::new("Alice")
            .with_last_name("Martin")
            .with_birth_date("2000-01-01"), // HTML form, normalized by validation
        partner: Some(Person::new("Bob")),
        reference_year: None,
        event: None,
    };

    let mut engine = engine_for(&server);
    let report = engine.run(&request).await.unwrap();

    api_mock.assert();
    match &report.figures {
        StudyFigures::Compatibility(result) => {
            assert_eq!(result.person1.life_path, Some(4));
            assert_eq!(result.person2.life_path, None);
            assert_eq!(result.scores.life_path, None);
        }
        other => panic!("expected compatibility figures, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generation_failure_surfaces_as_error() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).body("internal error");
    });

    let mut engine = engine_for(&server);
    let result = engine.run(&profile_request()).await;

    api_mock.assert();
    match result {
        Err(NumeraError::GenerationError { message }) => {
            assert!(message.contains("500"));
        }
        other => panic!("expected generation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_free_text_answer_falls_back() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(chat_completion_body(
                "Your life path number is 1, a pioneer's path.",
            ));
    });

    let mut engine = engine_for(&server);
    let report = engine.run(&profile_request()).await.unwrap();

    api_mock.assert();
    assert_eq!(
        report.analysis.introduction.as_deref(),
        Some("Your life path number is 1, a pioneer's path.")
    );
    assert!(report.analysis.life_path.is_none());
}

#[tokio::test]
async fn test_rate_limiter_denies_once_quota_is_spent() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(chat_completion_body(r#"{ "introduction": "ok" }"#));
    });

    let limiter = RateLimiter::new(
        RateLimitConfig {
            per_minute: 1,
            per_hour: 10,
            per_day: 50,
        },
        Utc::now(),
    );
    let mut engine = StudyEngine::new(client_for(&server), limiter);

    assert!(engine.run(&profile_request()).await.is_ok());
    match engine.run(&profile_request()).await {
        Err(NumeraError::RateLimited { scope, .. }) => {
            assert_eq!(scope, "per-minute");
        }
        other => panic!("expected rate limit denial, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_request_never_reaches_the_service() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(chat_completion_body(r#"{ "introduction": "ok" }"#));
    });

    let request = StudyRequest {
        kind: StudyKind::Profile,
        person: Person::new("Jean").with_birth_date("31/02/1990"),
        partner: None,
        reference_year: None,
        event: None,
    };

    let mut engine = engine_for(&server);
    let result = engine.run(&request).await;

    assert!(matches!(result, Err(NumeraError::InvalidDate { .. })));
    api_mock.assert_hits(0);
}
