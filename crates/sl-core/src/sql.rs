//! SQL identifier quoting and literal escaping
//!
//! Every dynamically constructed statement in the pipeline goes through
//! these helpers so that relation names and string values can never break
//! out of their syntactic position.

/// Quote a SQL identifier.
///
/// Wraps the identifier in double quotes and escapes embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use sl_core::sql::quote_ident;
/// assert_eq!(quote_ident("dim_customers"), r#""dim_customers""#);
/// assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a potentially catalog-qualified name (e.g. `crm.crm_customer_info`).
///
/// Splits on `.` and individually quotes each component.
///
/// # Examples
/// ```
/// use sl_core::sql::quote_qualified;
/// assert_eq!(quote_qualified("fact_sales"), r#""fact_sales""#);
/// assert_eq!(
///     quote_qualified("crm.crm_customer_info"),
///     r#""crm"."crm_customer_info""#
/// );
/// ```
pub fn quote_qualified(name: &str) -> String {
    name.split('.')
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(".")
}

/// Render a value as a single-quoted SQL string literal.
///
/// Embedded single quotes are doubled. Used for file paths in `read_csv`
/// and `ATTACH` statements and for fixed vocabulary values.
///
/// # Examples
/// ```
/// use sl_core::sql::str_literal;
/// assert_eq!(str_literal("data/cust_info.csv"), "'data/cust_info.csv'");
/// assert_eq!(str_literal("O'Brien"), "'O''Brien'");
/// ```
pub fn str_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_simple() {
        assert_eq!(quote_ident("orders"), r#""orders""#);
    }

    #[test]
    fn test_quote_ident_embedded_quote() {
        assert_eq!(quote_ident(r#"a"b"#), r#""a""b""#);
    }

    #[test]
    fn test_quote_ident_keeps_dots() {
        // quote_ident treats the whole string as one identifier
        assert_eq!(quote_ident("a.b"), r#""a.b""#);
    }

    #[test]
    fn test_quote_qualified_unqualified() {
        assert_eq!(quote_qualified("orders"), r#""orders""#);
    }

    #[test]
    fn test_quote_qualified_two_parts() {
        assert_eq!(quote_qualified("erp.orders"), r#""erp"."orders""#);
    }

    #[test]
    fn test_str_literal_plain() {
        assert_eq!(str_literal("hello"), "'hello'");
    }

    #[test]
    fn test_str_literal_escapes_quotes() {
        assert_eq!(str_literal("it's"), "'it''s'");
    }
}
