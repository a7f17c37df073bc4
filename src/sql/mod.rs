//! SQL text helpers.
//!
//! Report bodies refer to the platform schema through a `{db}` placeholder
//! instead of formatting the configured database name into each statement.
//! [`render`] is the only place that value enters SQL text, always as a
//! quoted identifier.

/// Placeholder for the platform schema in report templates.
pub const SCHEMA_PLACEHOLDER: &str = "{db}";

/// Quote an identifier with backticks (MySQL).
pub fn quote_identifier(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Replace every schema placeholder with the quoted database name.
pub fn render(template: &str, database: &str) -> String {
    template.replace(SCHEMA_PLACEHOLDER, &quote_identifier(database))
}
