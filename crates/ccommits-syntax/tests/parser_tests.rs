use ccommits_syntax::ast::CommitType;
use ccommits_syntax::error::ParseError;
use ccommits_syntax::lexer::TokenKind;
use ccommits_syntax::parser::parse_commit;

fn grammar_error(source: &str) -> ccommits_syntax::ParseFailure {
    match parse_commit(source) {
        Err(ParseError::Grammar(failure)) => failure,
        other => panic!("Expected grammar error for {:?}, got {:?}", source, other),
    }
}

#[test]
fn test_valid_header() {
    let msg = parse_commit("feat: add login\n").unwrap();

    assert_eq!(msg.title.commit_type, CommitType::Feat);
    assert_eq!(msg.title.description, "add login");
    assert!(msg.body.is_empty());
    assert!(msg.comments.is_empty());
    assert!(msg.diff.is_none());
}

#[test]
fn test_scope_and_breaking_modifier() {
    let msg = parse_commit("feat(api)!: change shape\n").unwrap();

    assert_eq!(msg.title.commit_type, CommitType::Feat);
    assert_eq!(msg.title.scope.as_deref(), Some("api"));
    assert!(msg.title.breaking);
    assert_eq!(msg.title.description, "change shape");
    assert_eq!(msg.title.to_string(), "feat(api)!: change shape");
}

#[test]
fn test_breaking_without_scope() {
    let msg = parse_commit("refactor!: drop node 14").unwrap();

    assert_eq!(msg.title.commit_type, CommitType::Refactor);
    assert_eq!(msg.title.scope, None);
    assert!(msg.is_breaking());
}

#[test]
fn test_empty_scope_is_valid() {
    let msg = parse_commit("fix(): empty scope\n").unwrap();
    assert_eq!(msg.title.scope.as_deref(), Some(""));
}

#[test]
fn test_every_commit_type() {
    for commit_type in CommitType::ALL {
        let source = format!("{}: something", commit_type);
        let msg = parse_commit(&source).unwrap();
        assert_eq!(msg.title.commit_type, commit_type);
    }
}

#[test]
fn test_description_starting_with_keyword() {
    let msg = parse_commit("chore: fix typo in ci config\n").unwrap();
    assert_eq!(msg.title.description, "fix typo in ci config");
}

#[test]
fn test_missing_type() {
    let failure = grammar_error("foobar");

    assert_eq!(failure.found.kind, TokenKind::Text);
    assert_eq!(failure.span().col, 0);
    assert_eq!(failure.expected.as_slice(), &[TokenKind::CommitType]);
}

#[test]
fn test_missing_separator_at_eof() {
    let failure = grammar_error("feat");

    assert_eq!(failure.found.kind, TokenKind::Eof);
    assert_eq!(failure.span().col, 4);
    assert_eq!(
        failure.expected.as_slice(),
        &[TokenKind::Scope, TokenKind::BreakingModifier, TokenKind::Colon]
    );
}

#[test]
fn test_missing_colon() {
    let failure = grammar_error("feat my message");

    assert_eq!(failure.found.kind, TokenKind::Whitespace);
    assert_eq!(failure.span().line, 0);
    assert_eq!(failure.span().col, 4);
}

#[test]
fn test_missing_space_after_colon() {
    let failure = grammar_error("feat:my message\n");

    assert_eq!(failure.span().col, 5);
    assert_eq!(failure.expected.as_slice(), &[TokenKind::Whitespace]);
}

#[test]
fn test_exact_failure_position_after_modifier() {
    let failure = grammar_error("feat!:foobar");
    assert_eq!(failure.span().col, 6);
}

#[test]
fn test_empty_description() {
    let failure = grammar_error("feat: \nbody");
    assert_eq!(failure.found.kind, TokenKind::Newline);
    assert_eq!(failure.span().col, 6);
    assert!(failure.expects(TokenKind::Text));

    let failure = grammar_error("feat: ");
    assert_eq!(failure.found.kind, TokenKind::Eof);
    assert_eq!(failure.span().col, 6);
}

#[test]
fn test_expected_set_shrinks_after_scope() {
    let failure = grammar_error("feat(api)x: y");
    assert_eq!(failure.span().col, 9);
    assert_eq!(
        failure.expected.as_slice(),
        &[TokenKind::BreakingModifier, TokenKind::Colon]
    );
}

#[test]
fn test_modifier_before_scope_is_rejected() {
    let failure = grammar_error("feat!(api): x");
    assert_eq!(failure.found.kind, TokenKind::Scope);
    assert_eq!(failure.span().col, 5);
    assert_eq!(failure.expected.as_slice(), &[TokenKind::Colon]);
}

#[test]
fn test_error_messages() {
    let err = parse_commit("feat my message").unwrap_err();
    assert_eq!(
        err.to_string(),
        "1:5: unexpected whitespace \" \" (expected scope, '!' or ':')"
    );

    let err = parse_commit("foobar").unwrap_err();
    assert_eq!(
        err.to_string(),
        "1:1: unexpected text \"foobar\" (expected commit type)"
    );

    let err = parse_commit("feat").unwrap_err();
    assert_eq!(
        err.to_string(),
        "1:5: unexpected end of input (expected scope, '!' or ':')"
    );
}

#[test]
fn test_body_and_comments_are_collected() {
    let source = "feat: x\n\nLine one\n\nLine two\n# comment\nmore\n\n";
    let msg = parse_commit(source).unwrap();

    assert_eq!(msg.body, vec!["Line one", "", "Line two", "more"]);
    assert_eq!(msg.comments, vec!["# comment"]);
    assert!(msg.has_body());
}

#[test]
fn test_body_is_never_validated() {
    let msg = parse_commit("fix: x\n\nfeat my message\n(((!:\n").unwrap();
    assert_eq!(msg.body, vec!["feat my message", "(((!:"]);
}

#[test]
fn test_nested_scope() {
    let msg = parse_commit("feat(a(b)): x\n").unwrap();
    assert_eq!(msg.title.scope.as_deref(), Some("a(b)"));
}

#[test]
fn test_stray_carriage_return_ends_body() {
    let msg = parse_commit("feat: ok\n\nfirst\nprogress 10%\rprogress 20%\nlast\n").unwrap();
    assert_eq!(msg.title.description, "ok");
    assert_eq!(msg.body, vec!["first", "progress 10%"]);

    let msg = parse_commit("feat: ok\n# note\r x\n").unwrap();
    assert_eq!(msg.comments, vec!["# note"]);
    assert!(msg.body.is_empty());

    assert!(parse_commit("feat: ok\n\r").is_ok());
}

#[test]
fn test_diff_section_is_ignored() {
    let source = "feat: x\n# Please enter\ndiff --git a/x b/x\n@@ )( !: garbage\n\rfoo";
    let msg = parse_commit(source).unwrap();

    assert_eq!(msg.diff.as_deref(), Some("diff --git a/x b/x"));
    assert_eq!(msg.comments, vec!["# Please enter"]);
}

#[test]
fn test_crlf_message() {
    let msg = parse_commit("docs: x\r\n\r\nbody\r\n").unwrap();
    assert_eq!(msg.title.description, "x");
    assert_eq!(msg.body, vec!["body"]);
}
