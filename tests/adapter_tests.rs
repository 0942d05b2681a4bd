// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_lint::{
    ast::{AstAdapter, Expression, LiteralKind, Projection, Statement, StatementKind},
    dialect::{SqlDialect, SqlParser, SqlparserParser},
    error::AnalysisError
};

fn normalize_with(sql: &str, adapter: AstAdapter) -> Result<Vec<Statement>, AnalysisError> {
    let raw = SqlparserParser
        .parse(sql, adapter.dialect(), 64)
        .expect("test SQL must parse");
    adapter.normalize(&raw)
}

fn normalize(sql: &str) -> Vec<Statement> {
    normalize_with(sql, AstAdapter::new(SqlDialect::Generic)).unwrap()
}

fn predicate(sql: &str) -> Expression {
    normalize(sql)
        .remove(0)
        .predicate
        .expect("statement should have a predicate")
}

#[test]
fn test_bare_star_projection() {
    let stmts = normalize("SELECT * FROM users");
    assert_eq!(stmts[0].projection, Projection::Star);
    assert_eq!(stmts[0].kind, StatementKind::Select);
}

#[test]
fn test_qualified_wildcard_is_a_column() {
    let stmts = normalize("SELECT id, u.* FROM users u");
    let Projection::Columns(cols) = &stmts[0].projection else {
        panic!("expected explicit columns");
    };
    assert_eq!(cols.len(), 2);
    assert!(stmts[0].projection.has_wildcard());
}

#[test]
fn test_explicit_columns_have_no_wildcard() {
    let stmts = normalize("SELECT id, name AS n, COUNT(*) FROM users");
    assert!(!stmts[0].projection.has_wildcard());
}

#[test]
fn test_parentheses_are_transparent() {
    let pred = predicate("SELECT a FROM t WHERE (a = 1) OR b = 2");
    let Expression::BinaryOp {
        operator,
        left,
        ..
    } = pred
    else {
        panic!("expected a binary operator");
    };
    assert_eq!(operator.as_str(), "OR");
    assert!(matches!(*left, Expression::BinaryOp { ref operator, .. } if operator.as_str() == "="));
}

#[test]
fn test_string_literal_is_unquoted() {
    let pred = predicate("SELECT a FROM t WHERE name LIKE 'abc%'");
    let Expression::BinaryOp {
        operator,
        right,
        ..
    } = pred
    else {
        panic!("expected a binary operator");
    };
    assert_eq!(operator.as_str(), "LIKE");
    assert_eq!(
        *right,
        Expression::Literal {
            value: "abc%".to_string(),
            kind:  LiteralKind::String
        }
    );
}

#[test]
fn test_not_like_keeps_negation() {
    let pred = predicate("SELECT a FROM t WHERE name NOT LIKE '%x'");
    assert!(matches!(pred, Expression::BinaryOp { ref operator, .. } if operator.as_str() == "NOT LIKE"));
}

#[test]
fn test_number_literal() {
    let pred = predicate("SELECT a FROM t WHERE id = 42");
    let Expression::BinaryOp {
        right, ..
    } = pred
    else {
        panic!("expected a binary operator");
    };
    assert_eq!(*right, Expression::number("42"));
}

#[test]
fn test_subquery_predicate_is_reachable() {
    let pred = predicate("SELECT a FROM t WHERE a IN (SELECT b FROM u WHERE b = 1 OR b = 2)");
    let Expression::Unknown {
        children, ..
    } = pred
    else {
        panic!("expected an opaque IN node");
    };
    assert_eq!(children.len(), 2);
    assert!(matches!(&children[1], Expression::BinaryOp { operator, .. } if operator.as_str() == "OR"));
}

#[test]
fn test_statement_kinds() {
    let stmts = normalize(
        "INSERT INTO t SELECT * FROM u; UPDATE t SET a = 1 WHERE b = 2; DELETE FROM t WHERE \
         c = 3; CREATE TABLE x (id INT)"
    );
    let kinds: Vec<_> = stmts.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [
            StatementKind::Insert,
            StatementKind::Update,
            StatementKind::Delete,
            StatementKind::Other
        ]
    );
    assert_eq!(stmts[0].projection, Projection::Star);
    assert!(stmts[1].predicate.is_some());
    assert!(stmts[2].predicate.is_some());
    assert!(stmts[3].predicate.is_none());
}

#[test]
fn test_statement_indices_and_lines() {
    let stmts = normalize("SELECT a FROM t;\nSELECT b FROM u;");
    assert_eq!(stmts[0].index, 0);
    assert_eq!(stmts[1].index, 1);
    assert_eq!(stmts[0].line(), Some(1));
    assert_eq!(stmts[1].line(), Some(2));
}

#[test]
fn test_union_concatenates_projections() {
    let stmts = normalize("SELECT a FROM t UNION SELECT * FROM u WHERE b = 1");
    let Projection::Columns(cols) = &stmts[0].projection else {
        panic!("expected explicit columns");
    };
    assert_eq!(cols.len(), 2);
    assert!(stmts[0].projection.has_wildcard());
    assert!(matches!(
        stmts[0].predicate,
        Some(Expression::Unknown { ref children, .. }) if children.len() == 1
    ));
}

#[test]
fn test_depth_limit() {
    let terms: Vec<String> = (0..40).map(|i| format!("a = {}", i)).collect();
    let sql = format!("SELECT a FROM t WHERE {}", terms.join(" OR "));
    let adapter = AstAdapter::new(SqlDialect::Generic).with_max_depth(10);
    let err = normalize_with(&sql, adapter).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::DepthLimitExceeded {
            limit: 10
        }
    );
}

#[test]
fn test_unsupported_construct_lenient_and_strict() {
    let sql = "SELECT a FROM t WHERE flag IS TRUE";
    let lenient = normalize_with(sql, AstAdapter::new(SqlDialect::Generic)).unwrap();
    assert!(matches!(
        lenient[0].predicate,
        Some(Expression::Unknown { ref children, .. }) if children.is_empty()
    ));

    let strict = normalize_with(sql, AstAdapter::new(SqlDialect::Generic).strict(true));
    assert!(matches!(
        strict,
        Err(AnalysisError::UnsupportedConstruct { .. })
    ));
}

#[test]
fn test_update_predicate_is_mapped() {
    let stmts = normalize("UPDATE t SET a = 1 WHERE b = 1 OR c = 2");
    assert_eq!(stmts[0].kind, StatementKind::Update);
    assert!(matches!(
        stmts[0].predicate,
        Some(Expression::BinaryOp { ref operator, .. }) if operator.as_str() == "OR"
    ));
}
