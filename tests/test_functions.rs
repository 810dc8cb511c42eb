use eva_functions::config::Settings;
use eva_functions::domain::error::DomainError;
use eva_functions::functions::signature::ColumnType;
use eva_functions::functions::{
    create_function_with_settings, Embeddings, EvaLlama, FUNCTION_NAMES,
};
use eva_functions::util::testing::init_test_env;

#[test]
fn given_unknown_name_when_create_function_then_error_lists_registered() {
    init_test_env();

    let result = create_function_with_settings("NoSuchFunction", &Settings::default());

    let err = result.err().expect("unknown function must be an error");
    assert!(matches!(err, DomainError::FunctionNotFound(_)));
    let message = err.to_string();
    assert!(message.contains("NoSuchFunction"));
    for name in FUNCTION_NAMES {
        assert!(message.contains(name));
    }
}

#[test]
fn given_embeddings_name_when_create_function_then_signature_matches_declaration() {
    init_test_env();

    // Construction wires up the API client but performs no network I/O.
    let function = create_function_with_settings(Embeddings::NAME, &Settings::default()).unwrap();

    assert_eq!(function.name(), "Embeddings");

    let signature = function.signature();
    let input_names: Vec<&str> = signature.inputs.iter().map(|c| c.name).collect();
    assert_eq!(input_names, vec!["prompt", "embeddings"]);
    assert!(signature
        .inputs
        .iter()
        .all(|c| c.dtype == ColumnType::Str));

    assert_eq!(signature.outputs.len(), 1);
    assert_eq!(signature.outputs[0].name, "distance");
    assert_eq!(signature.outputs[0].dtype, ColumnType::Float32);
}

#[test]
fn given_function_names_then_both_udfs_are_registered() {
    assert_eq!(FUNCTION_NAMES, &[Embeddings::NAME, EvaLlama::NAME]);
    assert_eq!(Embeddings::NAME, "Embeddings");
    assert_eq!(EvaLlama::NAME, "EvaLlama");
}
