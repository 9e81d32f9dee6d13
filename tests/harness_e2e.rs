//! End-to-end runs of the harness against a local mock server: real
//! backends, real HTTP, scripted vendor responses.

use runway::backends::{AzureOpenAI, Cohere, HuggingFace};
use runway::{successful_texts, Harness, HarnessError, PromptRequest, Reranker};

fn chat_body(text: &str) -> String {
    format!(r#"{{"choices":[{{"message":{{"role":"assistant","content":"{text}"}}}}]}}"#)
}

#[tokio::test]
async fn mixed_vendor_run_collects_every_outcome() {
    let mut server = mockito::Server::new_async().await;

    let hf_mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(chat_body("4"))
        .create_async()
        .await;
    let azure_mock = server
        .mock("POST", "/openai/deployments/gpt-4o/chat/completions")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;
    let cohere_mock = server
        .mock("POST", "/v2/chat")
        .with_status(200)
        .with_body(r#"{"message":{"role":"assistant","content":[{"type":"text","text":"2+2 equals 4."}]}}"#)
        .create_async()
        .await;

    let harness = Harness::builder()
        .provider(Box::new(HuggingFace::with_base_url("hf", server.url())))
        .provider(Box::new(AzureOpenAI::new("az", server.url())))
        .provider(Box::new(Cohere::with_base_url("co", server.url())))
        .build();

    let results = harness
        .run(&PromptRequest::new("2+2=?"), &["kimi-k2", "gpt-4o", "command-a"])
        .await
        .unwrap();

    hf_mock.assert_async().await;
    azure_mock.assert_async().await;
    cohere_mock.assert_async().await;

    assert_eq!(results.len(), 3);
    assert_eq!(results.get("kimi-k2").unwrap().text(), Some("4"));
    assert_eq!(results.get("command-a").unwrap().text(), Some("2+2 equals 4."));

    let failed = results.get("gpt-4o").unwrap();
    assert!(!failed.is_success());
    assert!(failed.failure_message().unwrap().contains("503"));

    let order: Vec<&str> = results.iter().map(|r| r.model_key.as_str()).collect();
    assert_eq!(order, vec!["kimi-k2", "gpt-4o", "command-a"]);
}

#[tokio::test]
async fn blank_prompt_never_reaches_the_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let harness = Harness::builder()
        .provider(Box::new(HuggingFace::with_base_url("hf", server.url())))
        .build();

    let err = harness
        .run(&PromptRequest::new("   "), &["kimi-k2"])
        .await
        .unwrap_err();

    assert!(matches!(err, HarnessError::InvalidInput(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn successful_answers_flow_into_the_reranker() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(chat_body("Alexander Bustamante was Jamaica's first Prime Minister."))
        .expect(2)
        .create_async()
        .await;
    server
        .mock("POST", "/v2/chat")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;
    let rerank_mock = server
        .mock("POST", "/v2/rerank")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "query": "Who is the first Prime Minister of Jamaica?",
            "top_n": 2,
        })))
        .with_status(200)
        .with_body(
            r#"{"results":[{"index":0,"relevance_score":0.91},{"index":1,"relevance_score":0.89}]}"#,
        )
        .create_async()
        .await;

    let harness = Harness::builder()
        .provider(Box::new(HuggingFace::with_base_url("hf", server.url())))
        .provider(Box::new(Cohere::with_base_url("co", server.url())))
        .build();

    let query = "Who is the first Prime Minister of Jamaica?";
    let results = harness
        .run(&PromptRequest::new(query), &["oss-20b", "kimi-k2", "command-r7b"])
        .await
        .unwrap();

    // Only the two HuggingFace answers survive; the Cohere chat failure is
    // excluded before reranking.
    let documents = successful_texts(&results);
    assert_eq!(documents.len(), 2);

    let reranker = Reranker::new(Box::new(Cohere::with_base_url("co", server.url())));
    let ranked = reranker.rerank(query, &documents, 5).await.unwrap();

    rerank_mock.assert_async().await;
    assert_eq!(ranked.len(), 2);
    assert!(ranked[0].score >= ranked[1].score);
    assert!(ranked[0].text.contains("Bustamante"));
}
