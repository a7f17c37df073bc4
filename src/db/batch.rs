//! Statement batching.
//!
//! Splits a SQL text on top-level semicolons so a multi-statement batch can
//! be run statement by statement on one connection.

/// Marker that opens the read-only snapshot for a query batch.
pub const READ_ONLY_TRANSACTION: &str = "START TRANSACTION READ ONLY";

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Quoted(char),
    LineComment,
    BlockComment,
}

/// Split SQL text into statements.
///
/// Semicolons inside quoted strings, backtick identifiers and comments do
/// not terminate a statement. Empty statements are dropped; each returned
/// statement is trimmed.
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut state = State::Code;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                ';' => {
                    push_statement(&mut statements, &current);
                    current.clear();
                    continue;
                }
                '\'' | '"' | '`' => state = State::Quoted(c),
                '#' => state = State::LineComment,
                '-' if opens_dash_comment(chars.clone()) => state = State::LineComment,
                '/' if chars.peek() == Some(&'*') => {
                    current.push(c);
                    current.push('*');
                    chars.next();
                    state = State::BlockComment;
                    continue;
                }
                _ => {}
            },
            State::Quoted(quote) => {
                if c == '\\' && quote != '`' {
                    current.push(c);
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                    continue;
                }
                if c == quote {
                    // Doubled quote is an escaped quote
                    if chars.peek() == Some(&quote) {
                        current.push(c);
                        current.push(quote);
                        chars.next();
                        continue;
                    }
                    state = State::Code;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    current.push(c);
                    current.push('/');
                    chars.next();
                    state = State::Code;
                    continue;
                }
            }
        }
        current.push(c);
    }

    push_statement(&mut statements, &current);
    statements
}

/// `--` starts a comment only when followed by whitespace, a control
/// character or the end of input. `rest` begins after the first dash.
fn opens_dash_comment(mut rest: impl Iterator<Item = char>) -> bool {
    rest.next() == Some('-')
        && rest
            .next()
            .map_or(true, |c| c.is_whitespace() || c.is_control())
}

fn push_statement(statements: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

/// The statement wrapped in a read-only transaction, as a batch.
pub fn read_only_batch(sql: &str) -> Vec<String> {
    let mut batch = vec![READ_ONLY_TRANSACTION.to_string()];
    batch.extend(split_statements(sql));
    batch
}
