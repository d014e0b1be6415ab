//! Action execution.
//!
//! Each [`ActionKind`] has its own state machine. Input is validated before
//! anything is sent; an action already `Submitting` refuses a second trigger.
//! Two-step actions send the token approval and wait for it to settle before
//! the primary write. After any confirmed write the dashboard is re-read.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use super::dashboard::{self, DashboardSnapshot};
use crate::domain::{ActionKind, ActionLimits, ActionRequest, ActionState, PreparedAction, TxReceipt};
use crate::error::{Error, Result, ValidationError, WriteError};
use crate::port::ShareContract;

/// Result of a confirmed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    /// Approval receipt for two-step actions.
    pub approval: Option<TxReceipt>,
    pub receipt: TxReceipt,
    /// Read state refreshed after confirmation.
    pub snapshot: DashboardSnapshot,
}

const CANCELLED: &str = "cancelled before confirmation; check the explorer before resubmitting";

pub struct ActionExecutor<C: ?Sized> {
    contract: Arc<C>,
    limits: ActionLimits,
    states: Mutex<HashMap<ActionKind, ActionState>>,
}

impl<C> ActionExecutor<C>
where
    C: ShareContract + ?Sized,
{
    pub fn new(contract: Arc<C>, limits: ActionLimits) -> Self {
        Self {
            contract,
            limits,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Current state of one action.
    pub fn state(&self, kind: ActionKind) -> ActionState {
        self.states.lock().get(&kind).cloned().unwrap_or_default()
    }

    /// Whether `request` would be accepted right now. Does not read the chain.
    pub fn can_submit(&self, request: &ActionRequest) -> bool {
        !self.state(request.kind()).is_submitting()
            && request.prepare(self.contract.address(), &self.limits).is_ok()
    }

    /// Validate and submit one action.
    ///
    /// # Errors
    ///
    /// Validation failures return before any state change. Failures after
    /// submission started leave the action `Failed`; the next call starts over.
    /// Dropping the returned future mid-submission also leaves it `Failed`.
    pub async fn execute(&self, request: ActionRequest) -> Result<ActionOutcome> {
        let kind = request.kind();
        let prepared = request.prepare(self.contract.address(), &self.limits)?;
        let submission = self.begin(kind)?;

        match self.send(&prepared).await {
            Ok((approval, receipt)) => {
                info!(
                    action = %kind,
                    tx_hash = %receipt.tx_hash,
                    "Action confirmed"
                );
                submission.settle(ActionState::Confirmed {
                    receipt: receipt.clone(),
                });
                let snapshot = dashboard::snapshot(&*self.contract, self.contract.account()).await;
                self.set(kind, ActionState::Idle);
                Ok(ActionOutcome {
                    kind,
                    approval,
                    receipt,
                    snapshot,
                })
            }
            Err(e) => {
                warn!(action = %kind, error = %e, "Action failed");
                submission.settle(ActionState::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Move `kind` into `Submitting`, refusing if it already is.
    fn begin(&self, kind: ActionKind) -> std::result::Result<Submission<'_>, ValidationError> {
        let mut states = self.states.lock();
        let state = states.entry(kind).or_default();
        if state.is_submitting() {
            return Err(ValidationError::InProgress { action: kind });
        }
        *state = ActionState::Submitting;
        Ok(Submission {
            states: &self.states,
            kind,
            settled: false,
        })
    }

    fn set(&self, kind: ActionKind, state: ActionState) {
        self.states.lock().insert(kind, state);
    }

    async fn send(&self, prepared: &PreparedAction) -> Result<(Option<TxReceipt>, TxReceipt)> {
        let account = self.contract.account().ok_or(WriteError::ReadOnly)?;

        if prepared.kind.owner_only() {
            let owner = self.contract.owner().await?;
            if owner != account {
                return Err(Error::Validation(ValidationError::NotOwner { account, owner }));
            }
        }

        let approval = match &prepared.approval {
            Some(call) => {
                info!(action = %prepared.kind, call = %call, "Approving token spend");
                Some(self.contract.submit(call.clone()).await?)
            }
            None => None,
        };

        info!(action = %prepared.kind, call = %prepared.primary, "Submitting transaction");
        let receipt = self.contract.submit(prepared.primary.clone()).await?;
        Ok((approval, receipt))
    }
}

/// Holds one action in `Submitting`. Dropped unsettled, the action is marked
/// `Failed` so the next trigger is accepted.
struct Submission<'a> {
    states: &'a Mutex<HashMap<ActionKind, ActionState>>,
    kind: ActionKind,
    settled: bool,
}

impl Submission<'_> {
    fn settle(mut self, state: ActionState) {
        self.states.lock().insert(self.kind, state);
        self.settled = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!(action = %self.kind, "Submission cancelled before it settled");
        self.states.lock().insert(
            self.kind,
            ActionState::Failed {
                message: CANCELLED.to_string(),
            },
        );
    }
}
