use super::*;

#[test]
fn test_collects_all_pipeline_statements() {
    let statements = collect_statements();
    // 6 staging transforms + 3 warehouse tables + 3 views
    assert_eq!(statements.len(), 12);
}

#[test]
fn test_every_statement_parses() {
    let dialect = DuckDbDialect {};
    for (name, sql) in collect_statements() {
        let parsed = Parser::parse_sql(&dialect, &sql);
        assert!(parsed.is_ok(), "{} failed to parse: {:?}", name, parsed);
        assert_eq!(parsed.unwrap().len(), 1, "{} is not a single statement", name);
    }
}

#[test]
fn test_statements_are_selects_only() {
    let dialect = DuckDbDialect {};
    for (name, sql) in collect_statements() {
        let statements = Parser::parse_sql(&dialect, &sql).unwrap();
        assert!(
            matches!(statements[0], sqlparser::ast::Statement::Query(_)),
            "{} is not a plain SELECT",
            name
        );
    }
}
