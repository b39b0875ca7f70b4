//! Unit tests for the parser module.
//!
//! This module contains tests for the shunting-yard parser including:
//! - Precedence and associativity
//! - Unary operators
//! - Function calls, tuples and the empty tuple
//! - `let` statements
//! - Mismatched parentheses and missing operands

use crate::{
    ast::ast::SyntaxTree,
    errors::errors::{Error, ErrorCategory},
    lexer::{
        lexer::Lexer,
        tokens::{Keyword, Operator, Token, TokenKind},
    },
};

use super::parser::{parse, Parser};

fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source.chars(), Some("test.lang".to_string())).collect()
}

fn parse_str(source: &str) -> Result<Vec<SyntaxTree>, Error> {
    let (_, result) = parse(Lexer::new(source.chars(), Some("test.lang".to_string())));
    result
}

fn render(source: &str) -> String {
    parse_str(source)
        .unwrap()
        .iter()
        .map(SyntaxTree::to_string)
        .collect::<Vec<String>>()
        .join(" ")
}

#[test]
fn test_parse_binary_operators() {
    for operator in ["+", "-", "*", "/", "%", "==", "!=", ">", ">=", "<", "<=", ".", ":"] {
        let source = format!("7 {} x", operator);
        let trees = parse_str(&source).unwrap();

        assert_eq!(trees.len(), 1, "{}", source);
        assert_eq!(trees[0].value.value, operator);
        assert_eq!(trees[0].children.len(), 2);
        assert_eq!(trees[0].children[0].value.value, "7");
        assert_eq!(trees[0].children[1].value.value, "x");
    }
}

#[test]
fn test_parse_left_associativity() {
    assert_eq!(render("1-2-3"), "(- (- 1 2) 3)");
    assert_eq!(render("8/4/2"), "(/ (/ 8 4) 2)");
    assert_eq!(render("a.b.c"), "(. (. a b) c)");
}

#[test]
fn test_parse_precedence() {
    assert_eq!(render("2+3*4"), "(+ 2 (* 3 4))");
    assert_eq!(render("2*3+4"), "(+ (* 2 3) 4)");
    assert_eq!(render("4*5%6+3"), "(+ (% (* 4 5) 6) 3)");
    assert_eq!(render("a.b + c"), "(+ (. a b) c)");
}

#[test]
fn test_parse_unlisted_operators_bind_tightest() {
    assert_eq!(render("a == b + c"), "(+ (== a b) c)");
    assert_eq!(render("a + b < c"), "(+ a (< b c))");
}

#[test]
fn test_parse_grouping() {
    assert_eq!(render("(1+2)*3"), "(* (+ 1 2) 3)");
    assert_eq!(render("((x))"), "x");
}

#[test]
fn test_parse_chained_unary() {
    let trees = parse_str("!!1").unwrap();

    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].value.kind, TokenKind::Operator(Operator::Not));
    assert_eq!(trees[0].children.len(), 1);
    assert_eq!(trees[0].children[0].value.kind, TokenKind::Operator(Operator::Not));
    assert_eq!(trees[0].to_string(), "(! (! 1))");
}

#[test]
fn test_parse_unary_binds_before_binary() {
    assert_eq!(render("!a + b"), "(+ (! a) b)");
    assert_eq!(render("a * !b"), "(* a (! b))");
}

#[test]
fn test_parse_function_call() {
    let trees = parse_str("f(1,2)").unwrap();
    let call = &trees[0];

    assert_eq!(call.value.kind, TokenKind::Function);
    assert_eq!(call.children.len(), 1);
    assert_eq!(
        call.children[0].value.kind,
        TokenKind::Keyword(Keyword::Comma)
    );
    assert_eq!(call.to_string(), "(f (, 1 2))");

    let arguments: Vec<&str> = call
        .arguments()
        .iter()
        .map(|argument| argument.value.value.as_str())
        .collect();
    assert_eq!(arguments, vec!["1", "2"]);
}

#[test]
fn test_parse_empty_call() {
    let trees = parse_str("f()").unwrap();

    assert_eq!(trees[0].to_string(), "(f ())");
    assert!(trees[0].children[0].is_empty_tuple());
    assert!(trees[0].arguments().is_empty());
}

#[test]
fn test_parse_argument_list_flattens_in_order() {
    let trees = parse_str("f(a, b + 1, c)").unwrap();

    assert_eq!(trees[0].to_string(), "(f (, (, a (+ b 1)) c))");

    let arguments: Vec<String> = trees[0]
        .arguments()
        .iter()
        .map(|argument| argument.to_string())
        .collect();
    assert_eq!(arguments, vec!["a", "(+ b 1)", "c"]);
}

#[test]
fn test_parse_tuple_argument() {
    let trees = parse_str("f((1,2))").unwrap();

    assert_eq!(trees[0].to_string(), "(f (, 1 2))");

    let arguments = trees[0].arguments();
    assert_eq!(arguments.len(), 1);
    assert!(arguments[0].is_tuple());
}

#[test]
fn test_parse_nested_calls() {
    assert_eq!(render("_(f(5), 7*8)"), "(_ (, (f 5) (* 7 8)))");
    assert_eq!(render("(f(1)) + 2"), "(+ (f 1) 2)");
}

#[test]
fn test_parse_tuples_and_members() {
    assert_eq!(render("h.string"), "(. h string)");
    assert_eq!(render("().tuple.do"), "(. (. () tuple) do)");
    assert_eq!(render("(7*8, 6+3)"), "(, (* 7 8) (+ 6 3))");
    assert_eq!(
        render("((((6,7,8),8))).string"),
        "(. (, (, (, 6 7) 8) 8) string)"
    );
}

#[test]
fn test_parse_empty_tuple() {
    let trees = parse_str("()").unwrap();

    assert_eq!(trees.len(), 1);
    assert!(trees[0].is_empty_tuple());
}

#[test]
fn test_parse_let_statement() {
    assert_eq!(render("let x: i32 = 5 ;"), "(let (= (: x i32) 5))");
    assert_eq!(render("let y = 1 + 2;"), "(let (= y (+ 1 2)))");
}

#[test]
fn test_parse_let_with_tuple_type() {
    assert_eq!(
        render("let p: tuple(i32, bool) = (1, true) ;"),
        "(let (= (: p (tuple (, i32 bool))) (, 1 true)))"
    );
}

#[test]
fn test_parse_statements_in_encounter_order() {
    let trees = parse_str("let a = 1; let b = a + 2; b").unwrap();

    assert_eq!(trees.len(), 3);
    assert_eq!(trees[0].to_string(), "(let (= a 1))");
    assert_eq!(trees[1].to_string(), "(let (= b (+ a 2)))");
    assert_eq!(trees[2].to_string(), "b");
}

#[test]
fn test_parse_unclosed_paren() {
    let error = parse_str("(1").unwrap_err();

    assert_eq!(error.get_error_name(), "MismatchedParenthesis");
    assert_eq!(error.get_category(), ErrorCategory::Syntax);
    assert_eq!(error.get_position().0, 0);

    assert_eq!(
        parse_str("f(1").unwrap_err().get_error_name(),
        "MismatchedParenthesis"
    );
}

#[test]
fn test_parse_extra_close_paren() {
    let (parser, result) = parse(lex("1)"));

    assert_eq!(parser.diagnostics().len(), 1);
    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "LexicalError");
    assert_eq!(error.get_category(), ErrorCategory::Lexical);
}

#[test]
fn test_parse_close_paren_without_opener() {
    // Drop the opener the lexer would have insisted on.
    let tokens: Vec<Token> = lex("(1)").into_iter().skip(1).collect();
    let (_, result) = parse(tokens);

    assert_eq!(result.unwrap_err().get_error_name(), "MismatchedParenthesis");
}

#[test]
fn test_parse_missing_operand() {
    let tokens: Vec<Token> = lex("1 + 2").into_iter().skip(1).collect();
    let (_, result) = parse(tokens);

    assert_eq!(result.unwrap_err().get_error_name(), "MissingOperand");
}

#[test]
fn test_parse_operand_never_crosses_a_paren() {
    for source in ["1 * (2 + )", "1 + (!)", "g(x, f(1 +))", "(1 +"] {
        let error = parse_str(source).unwrap_err();

        assert_eq!(error.get_error_name(), "MissingOperand", "{}", source);
        assert_eq!(error.get_category(), ErrorCategory::Syntax);
    }
}

#[test]
fn test_parse_operand_never_crosses_a_statement() {
    for source in ["1; 2 +", "let x = 1; 2 +", "let a = 1; !"] {
        assert_eq!(
            parse_str(source).unwrap_err().get_error_name(),
            "MissingOperand",
            "{}",
            source
        );
    }
}

#[test]
fn test_parse_tuple_is_marked_at_every_link() {
    let trees = parse_str("(1, 2, 3)").unwrap();
    let tuple = &trees[0];

    assert_eq!(tuple.to_string(), "(, (, 1 2) 3)");
    assert!(tuple.is_tuple());
    assert!(tuple.children[0].is_tuple());
    assert_eq!(tuple.value.kind, TokenKind::Keyword(Keyword::Comma));
    assert_eq!(tuple.children[0].value.kind, TokenKind::Keyword(Keyword::Comma));
}

#[test]
fn test_parse_nested_tuple_keeps_its_elements() {
    let trees = parse_str("f((1, 2), (3, 4, 5), 6)").unwrap();
    let arguments = trees[0].arguments();

    assert_eq!(arguments.len(), 3);
    assert!(arguments[0].is_tuple());
    assert!(arguments[1].is_tuple());
    assert!(arguments[1].children[0].is_tuple());
    assert_eq!(arguments[2].to_string(), "6");

    let outer = parse_str("((1, 2), 3)").unwrap();
    assert!(outer[0].is_tuple());
    assert!(outer[0].children[0].is_tuple());
    assert_eq!(outer[0].children[0].to_string(), "(, 1 2)");
}

#[test]
fn test_parse_lexical_error_is_reported() {
    let (parser, result) = parse(lex("1 + @"));

    assert_eq!(parser.diagnostics().len(), 1);
    assert!(result
        .unwrap_err()
        .get_error_impl()
        .to_string()
        .contains("unexpected rune '@'"));
}

#[test]
fn test_parse_invalid_token_is_reported() {
    let mut tokens = lex("1");
    tokens[0].kind = TokenKind::Invalid;
    let (parser, result) = parse(tokens);

    assert_eq!(parser.diagnostics().len(), 1);
    assert_eq!(result.unwrap_err().get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parser_streams_statements() {
    let mut parser = Parser::new();

    for token in lex("let a = 1;") {
        parser.push(token).unwrap();
    }
    assert_eq!(parser.operands().len(), 1);

    for token in lex("a * 2") {
        parser.push(token).unwrap();
    }

    let trees = parser.finish().unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1].to_string(), "(* a 2)");
}

#[test]
fn test_parse_ignores_eof_token() {
    let tokens = crate::lexer::lexer::tokenize("a + 1".to_string(), None).unwrap();
    let (_, result) = parse(tokens);

    assert_eq!(result.unwrap()[0].to_string(), "(+ a 1)");
}
