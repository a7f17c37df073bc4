//! In-memory connector that replays scripted replies.
//!
//! Used to test the execution layer and report producers without a server.
//! Each `execute` or `run_batch` call consumes one scripted reply, and every
//! connection open and close is counted.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::connection::{Connection, Connector, StatementResult};
use super::error::{DbError, DbResult};

#[derive(Default)]
struct ScriptState {
    replies: VecDeque<DbResult<Vec<StatementResult>>>,
    refuse: Option<String>,
    fail_close: bool,
    opened: usize,
    closed: usize,
    statements: Vec<String>,
}

/// Connector whose connections answer from a script.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the results of the next call, one per statement.
    pub fn then_batch(self, results: Vec<StatementResult>) -> Self {
        self.lock().replies.push_back(Ok(results));
        self
    }

    /// Queue a failure for the next call.
    pub fn then_error(self, error: DbError) -> Self {
        self.lock().replies.push_back(Err(error));
        self
    }

    /// Make every connection attempt fail.
    pub fn refuse_connections(self, message: impl Into<String>) -> Self {
        self.lock().refuse = Some(message.into());
        self
    }

    /// Make closing a connection fail.
    pub fn fail_on_close(self) -> Self {
        self.lock().fail_close = true;
        self
    }

    /// Number of connections opened.
    pub fn opened(&self) -> usize {
        self.lock().opened
    }

    /// Number of connections closed.
    pub fn closed(&self) -> usize {
        self.lock().closed
    }

    /// Every statement received, in order.
    pub fn statements(&self) -> Vec<String> {
        self.lock().statements.clone()
    }

    /// Replies not yet consumed.
    pub fn pending_replies(&self) -> usize {
        self.lock().replies.len()
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self) -> DbResult<Box<dyn Connection>> {
        let mut state = self.lock();
        if let Some(message) = &state.refuse {
            return Err(DbError::ConnectionFailed(message.clone()));
        }
        state.opened += 1;
        Ok(Box::new(ScriptedConnection {
            state: Arc::clone(&self.state),
        }))
    }
}

struct ScriptedConnection {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedConnection {
    fn next_reply(&self, statements: &[String]) -> DbResult<Vec<StatementResult>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.statements.extend(statements.iter().cloned());
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(DbError::QueryFailed("no scripted reply".to_string())))
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn execute(&mut self, sql: &str) -> DbResult<u64> {
        let results = self.next_reply(&[sql.to_string()])?;
        Ok(results
            .iter()
            .map(|r| match r {
                StatementResult::Ack { rows_affected } => *rows_affected,
                StatementResult::Rows(_) => 0,
            })
            .sum())
    }

    async fn run_batch(&mut self, statements: &[String]) -> DbResult<Vec<StatementResult>> {
        self.next_reply(statements)
    }

    async fn close(self: Box<Self>) -> DbResult<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.closed += 1;
        if state.fail_close {
            return Err(DbError::QueryFailed("close failed".to_string()));
        }
        Ok(())
    }
}
