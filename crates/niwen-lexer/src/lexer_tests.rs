use indoc::indoc;

use crate::recognize::{any_of, regex};
use crate::{
    Incoherence, LexError, Lexer, Matcher, MatcherResult, NextState, StateLabel, Token, TokenType,
};

const DOT: TokenType = TokenType::new("DOT");
const A: TokenType = TokenType::new("A");
const B: TokenType = TokenType::new("B");
const NUMBER: TokenType = TokenType::new("NUMBER");
const PLUS: TokenType = TokenType::new("PLUS");
const WORD: TokenType = TokenType::new("WORD");
const QUOTE: TokenType = TokenType::new("QUOTE");
const STRING_CONTENT: TokenType = TokenType::new("STRING_CONTENT");
const KEYWORD: TokenType = TokenType::new("KEYWORD");

const STRING: StateLabel = StateLabel::new("STRING");
const CODE: StateLabel = StateLabel::new("CODE");

fn snapshot(lexer: &Lexer, input: &str) -> String {
    let tokens = lexer.tokenize(input).expect("tokenize failed");
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!(
            "{:?} {:?} {}..{}\n",
            token.token_type, token.text, token.starts_at, token.ends_at
        ));
    }
    out
}

fn arithmetic() -> Lexer {
    Lexer::builder()
        .state(|s| {
            s.on(regex("[0-9]+").unwrap()).is_token(NUMBER);
            s.on("+").is_token(PLUS);
            s.on(" ").ignore();
        })
        .build()
        .unwrap()
}

fn strings() -> Lexer {
    Lexer::builder()
        .default_state(|s| {
            s.on('"').is_token(QUOTE).then_state(STRING);
            s.on(regex("[a-z]+").unwrap()).is_token(WORD);
            s.on(" ").ignore();
        })
        .labeled_state(STRING, |s| {
            s.on(regex(r#"[^"]+"#).unwrap()).is_token(STRING_CONTENT);
            s.on('"').is_token(QUOTE).then_default_state();
        })
        .build()
        .unwrap()
}

#[test]
fn single_char_tokens() {
    let lexer = Lexer::builder()
        .state(|s| {
            s.on(".").is_token(DOT);
        })
        .build()
        .unwrap();

    insta::assert_snapshot!(snapshot(&lexer, "...."), @r#"
    DOT "." 0..1
    DOT "." 1..2
    DOT "." 2..3
    DOT "." 3..4
    "#);
}

#[test]
fn ignored_spans_emit_nothing() {
    let lexer = Lexer::builder()
        .state(|s| {
            s.on(" ").ignore();
            s.on("a").is_token(A);
            s.on("b").is_token(B);
        })
        .build()
        .unwrap();

    let out = lexer.tokenize_with_spans("ab ").unwrap();

    assert_eq!(
        out.tokens,
        vec![Token::new("a", 0, 1, A), Token::new("b", 1, 2, B)]
    );
    assert_eq!(out.ignored, vec![2..3]);
}

#[test]
fn numbers_and_operators() {
    insta::assert_snapshot!(snapshot(&arithmetic(), "123 + 4567"), @r#"
    NUMBER "123" 0..3
    PLUS "+" 4..5
    NUMBER "4567" 6..10
    "#);
}

#[test]
fn first_declared_matcher_wins() {
    let lexer = Lexer::builder()
        .state(|s| {
            s.on("a").is_token(A);
            s.on(regex("[a-z]+").unwrap()).is_token(WORD);
        })
        .build()
        .unwrap();

    insta::assert_snapshot!(snapshot(&lexer, "abc"), @r#"
    A "a" 0..1
    WORD "bc" 1..3
    "#);
}

#[test]
fn string_set_keywords_before_words() {
    let lexer = Lexer::builder()
        .state(|s| {
            s.on(any_of(["let", "in"]).unwrap()).is_token(KEYWORD);
            s.on(regex("[a-z]+").unwrap()).is_token(WORD);
            s.on(" ").ignore();
        })
        .build()
        .unwrap();

    insta::assert_snapshot!(snapshot(&lexer, "let x in"), @r#"
    KEYWORD "let" 0..3
    WORD "x" 4..5
    KEYWORD "in" 6..8
    "#);
}

#[test]
fn labeled_states_switch_and_return() {
    insta::assert_snapshot!(snapshot(&strings(), r#"say "hi there" now"#), @r#"
    WORD "say" 0..3
    QUOTE "\"" 4..5
    STRING_CONTENT "hi there" 5..13
    QUOTE "\"" 13..14
    WORD "now" 15..18
    "#);
}

#[test]
fn default_redirect_starts_in_labeled_state() {
    let lexer = Lexer::builder()
        .labeled_state(CODE, |s| {
            s.on("a").is_token(A);
            s.on("\"").is_token(QUOTE).then_state(STRING);
        })
        .labeled_state(STRING, |s| {
            s.on("b").is_token(B);
            s.on("\"").is_token(QUOTE).then_default_state();
        })
        .default_to(CODE)
        .build()
        .unwrap();

    assert_eq!(lexer.default_label(), Some(CODE));
    insta::assert_snapshot!(snapshot(&lexer, r#"a"b"a"#), @r#"
    A "a" 0..1
    QUOTE "\"" 1..2
    B "b" 2..3
    QUOTE "\"" 3..4
    A "a" 4..5
    "#);
}

#[test]
fn no_match_is_fatal() {
    let err = arithmetic().tokenize("1 + ?").unwrap_err();

    assert_eq!(
        err,
        LexError::NoMatch {
            index: 4,
            character: '?',
            state: None,
        }
    );
    insta::assert_snapshot!(err.to_string(), @"no match at index 4 ('?') in the default state");
}

#[test]
fn no_match_in_labeled_state() {
    let lexer = Lexer::builder()
        .default_state(|s| {
            s.on("a").is_token(A).then_state(STRING);
        })
        .labeled_state(STRING, |s| {
            s.on("b").is_token(B).then_default_state();
        })
        .build()
        .unwrap();

    let err = lexer.tokenize("aa").unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"no match at index 1 ('a') in state `STRING`");
}

#[test]
fn empty_input_yields_no_tokens() {
    assert!(arithmetic().tokenize("").unwrap().is_empty());
}

#[test]
fn tokens_and_ignored_spans_cover_input() {
    let lexer = strings();
    let inputs = [
        "",
        "abc",
        "a b  c",
        r#""x""#,
        r#"ab "cd ef" gh "" i"#,
        "   ",
    ];

    for input in inputs {
        let out = lexer.tokenize_with_spans(input).unwrap();
        let mut pieces: Vec<(usize, usize)> = out
            .tokens
            .iter()
            .map(|t| (t.starts_at, t.ends_at))
            .chain(out.ignored.iter().map(|r| (r.start, r.end)))
            .collect();
        pieces.sort();

        let mut rebuilt = String::new();
        let mut cursor = 0;
        for (start, end) in pieces {
            assert_eq!(start, cursor, "gap or overlap in {input:?}");
            rebuilt.push_str(&input[start..end]);
            cursor = end;
        }
        assert_eq!(rebuilt, input);
    }
}

#[derive(Debug)]
struct Fixed(MatcherResult);

impl Matcher for Fixed {
    fn match_at(&self, _text: &str, _offset: usize) -> MatcherResult {
        self.0.clone()
    }
}

fn lexer_with(result: MatcherResult) -> Lexer {
    Lexer::builder()
        .state(|s| {
            s.matcher(Fixed(result));
        })
        .build()
        .unwrap()
}

fn incoherence(err: LexError) -> Incoherence {
    match err {
        LexError::IncoherentToken { kind, .. } | LexError::IncoherentIgnore { kind, .. } => kind,
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn custom_matcher_text_length_mismatch() {
    let lexer = lexer_with(MatcherResult::Matched {
        token: Token::new("ab", 0, 1, A),
        next: NextState::NoChange,
    });

    let err = lexer.tokenize("ab").unwrap_err();

    assert_eq!(incoherence(err), Incoherence::TextLength);
}

#[test]
fn custom_matcher_token_starting_elsewhere() {
    let lexer = lexer_with(MatcherResult::Matched {
        token: Token::new("a", 0, 1, A),
        next: NextState::NoChange,
    });

    // First token is fine, the second one claims to start at 0 again.
    let err = lexer.tokenize("aa").unwrap_err();

    assert_eq!(incoherence(err), Incoherence::StartMismatch);
}

#[test]
fn custom_matcher_token_past_end() {
    let lexer = lexer_with(MatcherResult::Matched {
        token: Token::new("abc", 0, 3, A),
        next: NextState::NoChange,
    });

    let err = lexer.tokenize("ab").unwrap_err();

    assert_eq!(incoherence(err), Incoherence::PastEnd);
}

#[test]
fn custom_matcher_empty_ignore() {
    let lexer = lexer_with(MatcherResult::Ignore {
        ends_at: 0,
        next: NextState::NoChange,
    });

    let err = lexer.tokenize("a").unwrap_err();

    assert_eq!(incoherence(err), Incoherence::Empty);
}

#[test]
fn custom_matcher_unknown_state() {
    const NOWHERE: StateLabel = StateLabel::new("NOWHERE");
    let lexer = lexer_with(MatcherResult::Ignore {
        ends_at: 1,
        next: NextState::Labeled(NOWHERE),
    });

    let err = lexer.tokenize("ab").unwrap_err();

    assert_eq!(err, LexError::UnknownState(NOWHERE));
}

#[test]
fn tokens_serialize_to_json() {
    let tokens = arithmetic().tokenize("1+2").unwrap();
    let json = serde_json::to_string_pretty(&tokens).unwrap();

    assert_eq!(
        json,
        indoc! {r#"
        [
          {
            "text": "1",
            "starts_at": 0,
            "ends_at": 1,
            "type": "NUMBER"
          },
          {
            "text": "+",
            "starts_at": 1,
            "ends_at": 2,
            "type": "PLUS"
          },
          {
            "text": "2",
            "starts_at": 2,
            "ends_at": 3,
            "type": "NUMBER"
          }
        ]"#}
    );
}

#[test]
fn lexer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Lexer>();

    let lexer = std::sync::Arc::new(arithmetic());
    let handles: Vec<_> = ["1+2", "30 + 4"]
        .into_iter()
        .map(|input| {
            let lexer = lexer.clone();
            std::thread::spawn(move || lexer.tokenize(input).map(|t| t.len()))
        })
        .collect();

    let counts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![Ok(3), Ok(3)]);
}
