use indoc::indoc;
use niwen_lexer::{Token, TokenType};

use crate::{
    Colors, DebugTracer, NodeDeclaration, NodeParameterKey, ParseError, ParseLimits, Parser,
    Verbosity, item,
};

const NUMBER: TokenType = TokenType::new("NUMBER");
const PLUS: TokenType = TokenType::new("PLUS");
const WORD: TokenType = TokenType::new("WORD");

fn tokens(pairs: &[(TokenType, &str)]) -> Vec<Token> {
    let mut offset = 0;
    pairs
        .iter()
        .map(|(token_type, text)| {
            let token = Token::new(*text, offset, offset + text.len(), *token_type);
            offset += text.len();
            token
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
struct Addition {
    left: i64,
    right: i64,
}

const LEFT: NodeParameterKey<i64> = NodeParameterKey::new("left");
const RIGHT: NodeParameterKey<i64> = NodeParameterKey::new("right");
const ADDITION: NodeDeclaration<Addition> = NodeDeclaration::new("Addition", |d| {
    Ok(Addition {
        left: d.take(LEFT)?,
        right: d.take(RIGHT)?,
    })
});

fn parse_int(text: String) -> i64 {
    text.parse().unwrap_or_default()
}

fn addition() -> Parser<Addition> {
    Parser::builder()
        .describe_root(&ADDITION, |n| {
            n.expect_token(NUMBER).transform(parse_int).store_in(LEFT);
            n.expect_token(PLUS);
            n.expect_token(NUMBER).transform(parse_int).store_in(RIGHT);
        })
        .build()
        .unwrap()
}

const VALUE: NodeParameterKey<String> = NodeParameterKey::new("value");
const ATOM: NodeDeclaration<String> = NodeDeclaration::new("Atom", |d| d.take(VALUE));

fn atom() -> Parser<String> {
    Parser::builder()
        .describe_root(&ATOM, |n| {
            n.either(|e| {
                e.branch(|b| {
                    b.expect_token(NUMBER).store_in(item());
                })
                .branch(|b| {
                    b.expect_token(WORD).store_in(item());
                });
            })
            .store_in(VALUE);
        })
        .build()
        .unwrap()
}

#[test]
fn successful_parse_tree() {
    let input = tokens(&[(NUMBER, "123"), (PLUS, "+"), (NUMBER, "4567")]);
    let (result, trace) = addition().parse_with_debugger(&input);

    assert_eq!(result, addition().parse(&input));
    insta::assert_snapshot!(trace, @r"
    Node Addition
      Token NUMBER
        ✔ matched tokens 0..1
        left: i64 = 123
      Token PLUS
        ✔ matched tokens 1..2
      Token NUMBER
        ✔ matched tokens 2..3
        right: i64 = 4567
      ✔ matched tokens 0..3
      <root>: Addition = Addition { left: 123, right: 4567 }
    ");
}

#[test]
fn failed_branches_are_listed() {
    let input = tokens(&[(PLUS, "+")]);
    let (result, trace) = atom().parse_with_debugger(&input);

    assert!(result.is_err());
    insta::assert_snapshot!(trace, @r#"
    Node Atom
      Either (2 branches)
        Branch 1
          Token NUMBER
            ✘ expected Token NUMBER, found PLUS "+" (at token 0)
          ✘ expected Token NUMBER, found PLUS "+" (at token 0)
        Branch 2
          Token WORD
            ✘ expected Token WORD, found PLUS "+" (at token 0)
          ✘ expected Token WORD, found PLUS "+" (at token 0)
        ✘ none of the 2 branches matched (at token 0)
      ✘ none of the 2 branches matched (at token 0)
    "#);
}

#[test]
fn verbose_trace_shows_start_index() {
    let input = tokens(&[(WORD, "hi")]);
    let mut tracer = DebugTracer::new(Verbosity::Verbose, Colors::OFF);
    let value = atom().parse_with(&input, &mut tracer).unwrap();

    assert_eq!(value, "hi");
    insta::assert_snapshot!(tracer.render(), @r#"
    Node Atom @0
      Either (2 branches) @0
        Branch 1 @0
          Token NUMBER @0
            ✘ expected Token NUMBER, found WORD "hi" (at token 0)
          ✘ expected Token NUMBER, found WORD "hi" (at token 0)
        Branch 2 @0
          Token WORD @0
            ✔ matched tokens 0..1
            <item>: String = "hi"
          ✔ matched tokens 0..1
        ✔ matched tokens 0..1
        value: String = "hi"
      ✔ matched tokens 0..1
      <root>: String = "hi"
    "#);
}

#[test]
fn aborted_parse_closes_open_frames() {
    let input = tokens(&[(NUMBER, "1"), (PLUS, "+"), (NUMBER, "2")]);
    let mut tracer = DebugTracer::default();
    let result = addition().parse_with_limits(&input, ParseLimits::new().exec_fuel(2));
    assert_eq!(result.unwrap_err(), ParseError::ExecFuelExhausted(2));

    let parser = Parser::builder()
        .describe_root(&ADDITION, |n| {
            n.expect_token(NUMBER).transform(parse_int).store_in(LEFT);
            n.expect_token(PLUS);
            n.expect_token(NUMBER).transform(parse_int).store_in(RIGHT);
        })
        .limits(ParseLimits::new().exec_fuel(2))
        .build()
        .unwrap();
    let err = parser.parse_with(&input, &mut tracer).unwrap_err();
    assert_eq!(err, ParseError::ExecFuelExhausted(2));
    assert_eq!(
        tracer.render(),
        indoc! {"
            Node Addition
              Token NUMBER
                ✔ matched tokens 0..1
                left: i64 = 1
              ✘ aborted: execution limit exceeded after 2 evaluation steps
        "}
    );
}

#[test]
fn colors_wrap_markers() {
    let input = tokens(&[(WORD, "x")]);
    let mut tracer = DebugTracer::new(Verbosity::Default, Colors::ON);
    atom().parse_with(&input, &mut tracer).unwrap();

    let rendered = tracer.render();
    assert!(rendered.starts_with("\x1b[34mNode Atom\x1b[0m\n"));
    assert!(rendered.contains("\x1b[32m✔\x1b[0m matched tokens 0..1"));
    assert!(rendered.contains("\x1b[31m✘\x1b[0m expected Token NUMBER"));
}
