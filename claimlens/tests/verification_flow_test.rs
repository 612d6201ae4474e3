use claimlens::llm::factcheck::Classification;
use claimlens::llm::remote::RemoteLlmProvider;
use claimlens::news::NewsClient;
use claimlens::state::SessionState;
use claimlens::verification::{run_fact_check, run_summarize, FACT_CHECK_ERROR_EXPLANATION};
use mockito::Matcher;

fn chat_body(content: &str) -> String {
    serde_json::json!({
        "model": "gpt-4o",
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

const EVIDENCE_BODY: &str = r#"{
    "news": [{
        "id": "e-1",
        "title": "Report A",
        "description": "confirms allegation",
        "url": "https://example.test/report-a",
        "published": "2025-10-01 04:12:53 +0000"
    }]
}"#;

#[tokio::test]
async fn fact_check_happy_path_classifies_and_stores_verdict() {
    let mut news_server = mockito::Server::new_async().await;
    let mut llm_server = mockito::Server::new_async().await;

    // The secondary search must receive the truncated *headline* (first 25
    // characters), not the claim text
    let news_mock = news_server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded(
            "keywords".into(),
            "Court filing reveals new ".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EVIDENCE_BODY)
        .create_async()
        .await;

    let verdict = "Based on the evidence, this claim is true because...";
    let llm_mock = llm_server
        .mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            // Evidence is embedded as "title: description" lines
            Matcher::Regex("Report A: confirms allegation".to_string()),
            // The claim text itself rides along unshortened
            Matcher::Regex("the defendant admitted the scheme".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(verdict))
        .create_async()
        .await;

    let news = NewsClient::new(news_server.url(), "news-key", "en");
    let provider = RemoteLlmProvider::new(llm_server.url(), "llm-key", "gpt-4o");
    let state = SessionState::new();

    run_fact_check(
        &state,
        &news,
        &provider,
        "article-1",
        "the defendant admitted the scheme",
        "Court filing reveals new testimony today",
    )
    .await;

    let result = state.fact_check_of("article-1").expect("stored result");
    assert_eq!(result.classification, Classification::True);
    assert_eq!(result.explanation, verdict);
    assert!(!state.is_checking("article-1"));

    news_mock.assert_async().await;
    llm_mock.assert_async().await;
}

#[tokio::test]
async fn fact_check_with_no_evidence_fails_into_uncertain() {
    let mut news_server = mockito::Server::new_async().await;
    let mut llm_server = mockito::Server::new_async().await;

    let news_mock = news_server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"news": []}"#)
        .create_async()
        .await;

    // The verdict call must never happen when the search comes back empty
    let llm_mock = llm_server
        .mock("POST", "/")
        .expect(0)
        .create_async()
        .await;

    let news = NewsClient::new(news_server.url(), "news-key", "en");
    let provider = RemoteLlmProvider::new(llm_server.url(), "llm-key", "gpt-4o");
    let state = SessionState::new();

    run_fact_check(&state, &news, &provider, "article-1", "claim", "headline").await;

    let result = state.fact_check_of("article-1").expect("stored result");
    assert_eq!(result.classification, Classification::Uncertain);
    assert_eq!(result.explanation, FACT_CHECK_ERROR_EXPLANATION);
    assert!(!state.is_checking("article-1"));

    news_mock.assert_async().await;
    llm_mock.assert_async().await;
}

#[tokio::test]
async fn fact_check_upstream_failure_folds_into_uncertain() {
    let mut news_server = mockito::Server::new_async().await;
    let mut llm_server = mockito::Server::new_async().await;

    let _news_mock = news_server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EVIDENCE_BODY)
        .create_async()
        .await;

    // Verdict service falls over
    let _llm_mock = llm_server
        .mock("POST", "/")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let news = NewsClient::new(news_server.url(), "news-key", "en");
    let provider = RemoteLlmProvider::new(llm_server.url(), "llm-key", "gpt-4o");
    let state = SessionState::new();

    run_fact_check(&state, &news, &provider, "article-1", "claim", "headline").await;

    let result = state.fact_check_of("article-1").expect("stored result");
    assert_eq!(result.classification, Classification::Uncertain);
    assert_eq!(result.explanation, FACT_CHECK_ERROR_EXPLANATION);
    assert!(!state.is_checking("article-1"));
}

#[tokio::test]
async fn fact_check_retrigger_overwrites_previous_result() {
    let mut news_server = mockito::Server::new_async().await;
    let mut llm_server = mockito::Server::new_async().await;

    let _news_mock = news_server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EVIDENCE_BODY)
        .expect(2)
        .create_async()
        .await;

    // Two runs on the same article id, distinguished by claim text
    let _first = llm_server
        .mock("POST", "/")
        .match_body(Matcher::Regex("first claim".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("the claim is false."))
        .create_async()
        .await;
    let _second = llm_server
        .mock("POST", "/")
        .match_body(Matcher::Regex("second claim".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("the claim is true."))
        .create_async()
        .await;

    let news = NewsClient::new(news_server.url(), "news-key", "en");
    let provider = RemoteLlmProvider::new(llm_server.url(), "llm-key", "gpt-4o");
    let state = SessionState::new();

    run_fact_check(&state, &news, &provider, "article-1", "first claim", "headline").await;
    assert_eq!(
        state.fact_check_of("article-1").unwrap().classification,
        Classification::False
    );

    run_fact_check(&state, &news, &provider, "article-1", "second claim", "headline").await;

    // Whichever run settles last wins
    let result = state.fact_check_of("article-1").expect("stored result");
    assert_eq!(result.classification, Classification::True);
    assert_eq!(result.explanation, "the claim is true.");
    assert!(!state.is_checking("article-1"));
}

#[tokio::test]
async fn summarize_stores_trimmed_synopsis() {
    let mut llm_server = mockito::Server::new_async().await;

    let llm_mock = llm_server
        .mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            // Fixed preamble carries the configured topic
            Matcher::Regex("smart brevity framework".to_string()),
            Matcher::Regex("climate policy".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("  A tidy synopsis of the article.  "))
        .create_async()
        .await;

    let provider = RemoteLlmProvider::new(llm_server.url(), "llm-key", "gpt-4");
    let state = SessionState::new();

    run_summarize(
        &state,
        &provider,
        "climate policy",
        "article-1",
        "the article description",
    )
    .await;

    assert_eq!(
        state.summary_of("article-1").as_deref(),
        Some("A tidy synopsis of the article.")
    );
    assert!(!state.is_summarizing("article-1"));

    llm_mock.assert_async().await;
}

#[tokio::test]
async fn summarize_failure_is_silent() {
    let mut llm_server = mockito::Server::new_async().await;

    let _llm_mock = llm_server
        .mock("POST", "/")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let provider = RemoteLlmProvider::new(llm_server.url(), "llm-key", "gpt-4");
    let state = SessionState::new();

    run_summarize(&state, &provider, "climate policy", "article-1", "text").await;

    // No summary, no user-visible error, flag cleared
    assert!(state.summary_of("article-1").is_none());
    assert!(!state.is_summarizing("article-1"));
}
