use crate::recognize::any_of;
use crate::{Lexer, LexerBuildError, StateLabel, TokenType};

const A: TokenType = TokenType::new("A");
const FIRST: StateLabel = StateLabel::new("FIRST");
const SECOND: StateLabel = StateLabel::new("SECOND");

#[test]
fn no_states() {
    let err = Lexer::builder().build().unwrap_err();

    assert_eq!(err, LexerBuildError::NoStates);
}

#[test]
fn single_state_kind() {
    let lexer = Lexer::builder()
        .state(|s| {
            s.on("a").is_token(A);
        })
        .build()
        .unwrap();

    assert_eq!(lexer.state_count(), 1);
    assert_eq!(lexer.default_label(), None);
}

#[test]
fn unlabeled_state_mixed_with_labeled() {
    let err = Lexer::builder()
        .state(|_| {})
        .labeled_state(FIRST, |_| {})
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::MixedStateKinds);
}

#[test]
fn unlabeled_state_mixed_with_default() {
    let err = Lexer::builder()
        .state(|_| {})
        .default_state(|_| {})
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::MixedStateKinds);
}

#[test]
fn two_unlabeled_states() {
    let err = Lexer::builder()
        .state(|_| {})
        .state(|_| {})
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::MultipleDefaultStates);
}

#[test]
fn two_default_states() {
    let err = Lexer::builder()
        .default_state(|_| {})
        .default_state(|_| {})
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::MultipleDefaultStates);
}

#[test]
fn default_state_and_redirect() {
    let err = Lexer::builder()
        .default_state(|_| {})
        .labeled_state(FIRST, |_| {})
        .default_to(FIRST)
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::MultipleDefaultStates);
}

#[test]
fn labeled_states_without_default() {
    let err = Lexer::builder()
        .labeled_state(FIRST, |_| {})
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::MissingDefaultState);
}

#[test]
fn duplicate_label() {
    let err = Lexer::builder()
        .default_state(|_| {})
        .labeled_state(FIRST, |_| {})
        .labeled_state(FIRST, |_| {})
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::DuplicateLabel(FIRST));
    insta::assert_snapshot!(err.to_string(), @"state `FIRST` is declared more than once");
}

#[test]
fn redirect_to_unknown_label() {
    let err = Lexer::builder()
        .labeled_state(FIRST, |_| {})
        .default_to(SECOND)
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::UnknownLabel(SECOND));
}

#[test]
fn transition_to_unknown_label() {
    let err = Lexer::builder()
        .default_state(|s| {
            s.on("a").is_token(A).then_state(SECOND);
        })
        .labeled_state(FIRST, |_| {})
        .build()
        .unwrap_err();

    assert_eq!(err, LexerBuildError::UnknownLabel(SECOND));
}

#[test]
fn empty_any_of() {
    let empty: Vec<String> = Vec::new();

    assert_eq!(any_of(empty).unwrap_err(), LexerBuildError::EmptyStringSet);
}
