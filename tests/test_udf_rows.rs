//! Drives both UDFs through the `ScalarFunction` seam the way a host engine
//! does: one instance, many rows.

use eva_functions::domain::completion::{
    CompletionChoice, CompletionParams, CompletionResponse, LanguageModel,
};
use eva_functions::domain::embedding::Embedder;
use eva_functions::domain::error::DomainResult;
use eva_functions::functions::{Embeddings, EvaLlama, ScalarFunction, Value};
use eva_functions::util::testing::init_test_env;
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct FixedEmbedder {
    vector: Vec<f32>,
    calls: AtomicUsize,
}

impl Embedder for FixedEmbedder {
    fn embed(&self, _text: &str) -> DomainResult<Option<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(self.vector.clone()))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct EchoModel;

impl LanguageModel for EchoModel {
    fn complete(
        &self,
        prompt: &str,
        _params: &CompletionParams,
    ) -> DomainResult<CompletionResponse> {
        Ok(CompletionResponse {
            choices: vec![CompletionChoice {
                text: format!("echo: {}", prompt.len()),
            }],
        })
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn given_row_batch_when_embeddings_forward_then_scores_and_memoizes() {
    init_test_env();

    let embedder = Arc::new(FixedEmbedder {
        vector: vec![1.0, 0.0],
        calls: AtomicUsize::new(0),
    });
    let mut function: Box<dyn ScalarFunction> = Box::new(Embeddings::new(embedder.clone()));

    // A host scan: same prompt per row, varying stored vectors.
    let rows: &[(&str, &str)] = &[
        ("find the parser", "[1.0, 0.0]"),
        ("find the parser", "[0.0, 1.0]"),
        ("find the parser", "[]"),
        ("find the parser", "[-1.0, 0.0]"),
    ];

    let mut scores = Vec::new();
    for &(prompt, encoded) in rows {
        let Value::Float32(score) = function.forward(&[prompt, encoded]).unwrap() else {
            panic!("Embeddings must produce a float column");
        };
        scores.push(score);
    }

    assert!((scores[0] - 1.0).abs() < 1e-6); // identical vector
    assert!(scores[1].abs() < 1e-6); // orthogonal
    assert_eq!(scores[2], -1.0); // empty vector sentinel
    assert!((scores[3] + 1.0).abs() < 1e-6); // opposite direction

    // One prompt, one embed call across the whole batch.
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn given_row_batch_when_eva_llama_forward_then_returns_first_choice_per_row() {
    init_test_env();

    let mut function: Box<dyn ScalarFunction> = Box::new(EvaLlama::new(Arc::new(EchoModel)));

    for (prompt, context) in [("short", "ctx"), ("a longer prompt", "more context")] {
        let Value::Str(response) = function.forward(&[prompt, context]).unwrap() else {
            panic!("EvaLlama must produce a string column");
        };
        assert!(response.starts_with("echo: "));
    }
}
