//! BankTransaction - the state machine around one command
//!
//! Command failures during `execute`/`undo` are not propagated; they are
//! recorded as the terminal `Failed` state carrying the structured
//! reason. Callers inspect the state to learn the outcome. Only misuse of
//! the state machine itself (wrong pre-state) is returned as an error.

use crate::command::BalanceOperation;
use crate::error::AccountError;
use multibank_core::TransactionId;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Shared handle to a transaction.
///
/// A transaction is owned by the history of every account it touched and
/// by whoever issued it.
pub type TransactionHandle = Rc<RefCell<BankTransaction>>;

/// Transaction lifecycle.
///
/// `Started -> Ended` on success, `Ended -> Canceled` on undo, and any
/// command failure lands in `Failed` with the reason attached. Re-running
/// from `Canceled` is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionState {
    Started,
    Ended,
    Canceled,
    Failed(AccountError),
}

impl TransactionState {
    pub fn is_failed(&self) -> bool {
        matches!(self, TransactionState::Failed(_))
    }

    /// The failure reason, when failed.
    pub fn failure(&self) -> Option<&AccountError> {
        match self {
            TransactionState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionState::Started => write!(f, "Started"),
            TransactionState::Ended => write!(f, "Ended"),
            TransactionState::Canceled => write!(f, "Canceled"),
            TransactionState::Failed(reason) => write!(f, "Failed: {reason}"),
        }
    }
}

/// One issued transaction: a fixed identity, the wrapped command, and the
/// current state.
pub struct BankTransaction {
    id: TransactionId,
    command: Box<dyn BalanceOperation>,
    state: TransactionState,
}

impl BankTransaction {
    /// Wrap a command. The identity is fixed here, independent of state.
    pub fn new(command: Box<dyn BalanceOperation>) -> Self {
        Self {
            id: TransactionId::new(),
            command,
            state: TransactionState::Started,
        }
    }

    /// Wrap into the shared handle form recorded on account histories.
    pub fn into_handle(self) -> TransactionHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    /// Human-readable status line.
    pub fn status(&self) -> String {
        format!("BankTransaction {}", self.state)
    }

    /// Run the command. Valid from `Started` or `Canceled`.
    ///
    /// A command failure moves the transaction to `Failed` and still
    /// returns `Ok`; the error lives in the state.
    pub fn execute(&mut self) -> Result<(), AccountError> {
        match self.state {
            TransactionState::Started | TransactionState::Canceled => {}
            _ => return Err(AccountError::TransactionAlreadyInProgress),
        }

        match self.command.execute() {
            Ok(()) => {
                debug!(id = %self.id, "transaction ended");
                self.state = TransactionState::Ended;
            }
            Err(reason) => {
                warn!(id = %self.id, %reason, "transaction failed");
                self.state = TransactionState::Failed(reason);
            }
        }
        Ok(())
    }

    /// Reverse the command. Valid from `Ended` or `Canceled`.
    ///
    /// A cancel failure moves the transaction to `Failed` and still
    /// returns `Ok`.
    pub fn undo(&mut self) -> Result<(), AccountError> {
        match self.state {
            TransactionState::Ended | TransactionState::Canceled => {}
            _ => return Err(AccountError::TransactionNotUndoable),
        }

        match self.command.cancel() {
            Ok(()) => {
                debug!(id = %self.id, "transaction canceled");
                self.state = TransactionState::Canceled;
            }
            Err(reason) => {
                warn!(id = %self.id, %reason, "transaction undo failed");
                self.state = TransactionState::Failed(reason);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for BankTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankTransaction")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Command stub with scripted outcomes.
    struct Scripted {
        execute_result: RefCell<Vec<Result<(), AccountError>>>,
        cancel_result: RefCell<Vec<Result<(), AccountError>>>,
    }

    impl Scripted {
        fn new(
            execute: Vec<Result<(), AccountError>>,
            cancel: Vec<Result<(), AccountError>>,
        ) -> Self {
            Self {
                execute_result: RefCell::new(execute),
                cancel_result: RefCell::new(cancel),
            }
        }

        fn ok() -> Self {
            Self::new(vec![Ok(()), Ok(())], vec![Ok(()), Ok(())])
        }
    }

    impl BalanceOperation for Scripted {
        fn execute(&self) -> Result<(), AccountError> {
            self.execute_result.borrow_mut().remove(0)
        }

        fn cancel(&self) -> Result<(), AccountError> {
            self.cancel_result.borrow_mut().remove(0)
        }
    }

    #[test]
    fn test_success_path() {
        let mut tx = BankTransaction::new(Box::new(Scripted::ok()));
        assert_eq!(*tx.state(), TransactionState::Started);

        tx.execute().unwrap();
        assert_eq!(*tx.state(), TransactionState::Ended);

        tx.undo().unwrap();
        assert_eq!(*tx.state(), TransactionState::Canceled);
    }

    #[test]
    fn test_command_failure_becomes_state() {
        let mut tx = BankTransaction::new(Box::new(Scripted::new(
            vec![Err(AccountError::InsufficientFunds {
                balance: 0,
                requested: 10,
            })],
            vec![],
        )));

        // The caller still gets Ok; the failure is data.
        tx.execute().unwrap();
        assert!(tx.state().is_failed());
        assert_eq!(
            tx.state().failure(),
            Some(&AccountError::InsufficientFunds {
                balance: 0,
                requested: 10
            })
        );
    }

    #[test]
    fn test_execute_guard() {
        let mut tx = BankTransaction::new(Box::new(Scripted::ok()));
        tx.execute().unwrap();
        // Ended is not a valid pre-state for execute.
        assert_eq!(
            tx.execute(),
            Err(AccountError::TransactionAlreadyInProgress)
        );
    }

    #[test]
    fn test_undo_guard() {
        let mut tx = BankTransaction::new(Box::new(Scripted::ok()));
        assert_eq!(tx.undo(), Err(AccountError::TransactionNotUndoable));
    }

    #[test]
    fn test_reexecute_after_cancel_is_allowed() {
        let mut tx = BankTransaction::new(Box::new(Scripted::ok()));
        tx.execute().unwrap();
        tx.undo().unwrap();
        tx.execute().unwrap();
        assert_eq!(*tx.state(), TransactionState::Ended);
    }

    #[test]
    fn test_undo_failure_becomes_state() {
        let mut tx = BankTransaction::new(Box::new(Scripted::new(
            vec![Ok(())],
            vec![Err(AccountError::PeriodNotExpired)],
        )));
        tx.execute().unwrap();
        tx.undo().unwrap();
        assert_eq!(
            *tx.state(),
            TransactionState::Failed(AccountError::PeriodNotExpired)
        );
    }

    #[test]
    fn test_status_line() {
        let mut tx = BankTransaction::new(Box::new(Scripted::ok()));
        assert_eq!(tx.status(), "BankTransaction Started");
        tx.execute().unwrap();
        assert_eq!(tx.status(), "BankTransaction Ended");
    }

    #[test]
    fn test_identity_is_stable() {
        let mut tx = BankTransaction::new(Box::new(Scripted::ok()));
        let id = tx.id();
        tx.execute().unwrap();
        tx.undo().unwrap();
        assert_eq!(tx.id(), id);
    }
}
