use eva_functions::domain::embedding::Embedder;
use eva_functions::infrastructure::embeddings::OpenAiEmbedding;
use eva_functions::util::testing::{init_test_env, EnvGuard};
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn given_mock_server_when_embed_then_returns_vector() {
    init_test_env();
    let _guard = EnvGuard::new();
    env::set_var("OPENAI_API_KEY", "test_key");

    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/v1/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": [{"embedding": [0.1, 0.2, 0.3]}]}"#)
        .create();

    let openai = OpenAiEmbedding::new(server.url(), "text-embedding-ada-002".to_string());

    let embedding = openai.embed("example text").unwrap().unwrap();
    assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
}

#[test]
#[serial]
fn given_empty_data_array_when_embed_then_returns_none() {
    init_test_env();
    let _guard = EnvGuard::new();
    env::set_var("OPENAI_API_KEY", "test_key");

    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/v1/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": []}"#)
        .create();

    let openai = OpenAiEmbedding::new(server.url(), "text-embedding-ada-002".to_string());

    let result = openai.embed("example text").unwrap();
    assert!(result.is_none());
}

#[test]
#[serial]
fn given_server_error_when_embed_then_returns_error() {
    init_test_env();
    let _guard = EnvGuard::new();
    env::set_var("OPENAI_API_KEY", "test_key");

    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/v1/embeddings")
        .with_status(500)
        .with_body(r#"{"error": "boom"}"#)
        .create();

    let openai = OpenAiEmbedding::new(server.url(), "text-embedding-ada-002".to_string());

    let result = openai.embed("example text");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("boom"));
}

#[test]
#[serial]
fn given_malformed_response_when_embed_then_returns_error() {
    init_test_env();
    let _guard = EnvGuard::new();
    env::set_var("OPENAI_API_KEY", "test_key");

    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/v1/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create();

    let openai = OpenAiEmbedding::new(server.url(), "text-embedding-ada-002".to_string());

    assert!(openai.embed("example text").is_err());
}
