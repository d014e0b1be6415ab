//! Action executor behavior against the in-memory contract.

use std::sync::Arc;
use std::time::Duration;

use plstr::application::ActionExecutor;
use plstr::domain::{ActionKind, ActionLimits, ActionRequest, ActionState, WriteCall};
use plstr::error::{Error, ValidationError, WriteError};
use plstr::testkit::domain::{addr, tokens};
use plstr::testkit::{ContractEvent, MockShareContract};
use tokio::sync::Notify;
use tokio::time::timeout;

fn executor(contract: &Arc<MockShareContract>) -> ActionExecutor<MockShareContract> {
    ActionExecutor::new(Arc::clone(contract), ActionLimits::default())
}

fn issue(amount: &str) -> ActionRequest {
    ActionRequest::Issue {
        amount: amount.to_string(),
    }
}

fn redeem(amount: &str) -> ActionRequest {
    ActionRequest::Redeem {
        amount: amount.to_string(),
    }
}

fn position(events: &[ContractEvent], wanted: &ContractEvent) -> usize {
    events
        .iter()
        .position(|event| event == wanted)
        .unwrap_or_else(|| panic!("{wanted:?} not found in {events:?}"))
}

#[tokio::test]
async fn issue_approves_exact_amount_before_issuing() {
    let contract = Arc::new(MockShareContract::new());
    let executor = executor(&contract);

    let outcome = executor.execute(issue("1005")).await.unwrap();

    let approve = WriteCall::ApproveToken {
        spender: MockShareContract::CONTRACT,
        amount: tokens(1005),
    };
    let primary = WriteCall::IssueShares {
        amount: tokens(1005),
    };
    assert_eq!(contract.writes(), vec![approve, primary.clone()]);

    let events = contract.events();
    let approval_settled = position(&events, &ContractEvent::Settled("approve"));
    let issue_sent = position(&events, &ContractEvent::Sent(primary));
    assert!(approval_settled < issue_sent);

    assert!(outcome.approval.is_some());
    assert_eq!(outcome.kind, ActionKind::Issue);
    assert_eq!(executor.state(ActionKind::Issue), ActionState::Idle);
}

#[tokio::test]
async fn confirmed_action_refreshes_dashboard() {
    let contract = Arc::new(MockShareContract::new());
    let executor = executor(&contract);

    let outcome = executor.execute(redeem("10")).await.unwrap();

    assert!(outcome.approval.is_none());
    assert!(outcome.snapshot.contract_info.is_ok());
    let account = outcome.snapshot.account.expect("signing account is read");
    assert_eq!(account.address, MockShareContract::ACCOUNT);
    assert!(contract.read_count("getContractInfo") >= 1);
}

#[tokio::test]
async fn below_minimum_issue_sends_nothing() {
    let contract = Arc::new(MockShareContract::new());
    let executor = executor(&contract);

    let result = executor.execute(issue("1000")).await;

    match result {
        Err(Error::Validation(ValidationError::BelowMinimum { amount, minimum })) => {
            assert_eq!(amount, tokens(1000));
            assert_eq!(minimum, tokens(1005));
        }
        other => panic!("expected BelowMinimum, got {other:?}"),
    }
    assert!(contract.events().is_empty());
    assert_eq!(executor.state(ActionKind::Issue), ActionState::Idle);
    assert!(!executor.can_submit(&issue("500")));
    assert!(!executor.can_submit(&issue("1000")));
    assert!(executor.can_submit(&issue("1005")));
}

#[tokio::test]
async fn invalid_input_is_rejected_locally() {
    let contract = Arc::new(MockShareContract::new());
    let executor = executor(&contract);

    for input in ["", "abc", "-5", "0"] {
        let result = executor.execute(redeem(input)).await;
        assert!(
            matches!(result, Err(Error::Validation(_))),
            "{input:?} should fail validation, got {result:?}"
        );
    }
    assert!(contract.writes().is_empty());
}

#[tokio::test]
async fn rejected_approval_fails_then_retry_starts_over() {
    let contract = Arc::new(
        MockShareContract::new()
            .with_write_result("approve", Err(WriteError::UserRejected("user denied".into()))),
    );
    let executor = executor(&contract);

    let result = executor.execute(issue("2000")).await;
    assert!(matches!(
        result,
        Err(Error::Write(WriteError::UserRejected(_)))
    ));
    // the primary write was never sent
    assert_eq!(contract.writes().len(), 1);
    match executor.state(ActionKind::Issue) {
        ActionState::Failed { message } => assert!(message.contains("rejected")),
        other => panic!("expected Failed, got {other:?}"),
    }

    let outcome = executor.execute(issue("2000")).await.unwrap();
    assert_eq!(outcome.receipt.block_number, Some(2));
    assert_eq!(contract.writes().len(), 3);
    assert_eq!(executor.state(ActionKind::Issue), ActionState::Idle);
}

#[tokio::test]
async fn revert_reason_is_kept() {
    let contract = Arc::new(MockShareContract::new().with_write_result(
        "redeemShares",
        Err(WriteError::Reverted {
            reason: Some("Insufficient PLSTR balance".into()),
            tx_hash: None,
        }),
    ));
    let executor = executor(&contract);

    let err = executor.execute(redeem("10")).await.unwrap_err();
    assert!(err.to_string().contains("Insufficient PLSTR balance"));
    match executor.state(ActionKind::Redeem) {
        ActionState::Failed { message } => {
            assert!(message.contains("Insufficient PLSTR balance"))
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn second_trigger_while_submitting_is_refused() {
    let gate = Arc::new(Notify::new());
    let contract = Arc::new(MockShareContract::new().with_gate(Arc::clone(&gate)));
    let executor = Arc::new(executor(&contract));

    let first = tokio::spawn({
        let executor = Arc::clone(&executor);
        async move { executor.execute(redeem("10")).await }
    });
    while !executor.state(ActionKind::Redeem).is_submitting() {
        tokio::task::yield_now().await;
    }

    assert!(!executor.can_submit(&redeem("5")));
    let second = executor.execute(redeem("5")).await;
    assert!(matches!(
        second,
        Err(Error::Validation(ValidationError::InProgress {
            action: ActionKind::Redeem
        }))
    ));

    gate.notify_one();
    first.await.unwrap().unwrap();
    assert_eq!(
        contract.writes(),
        vec![WriteCall::RedeemShares { amount: tokens(10) }]
    );
    assert_eq!(executor.state(ActionKind::Redeem), ActionState::Idle);
}

#[tokio::test]
async fn abandoned_submission_can_be_retried() {
    let gate = Arc::new(Notify::new());
    let contract = Arc::new(MockShareContract::new().with_gate(Arc::clone(&gate)));
    let executor = executor(&contract);

    let abandoned = timeout(Duration::from_millis(20), executor.execute(redeem("10"))).await;
    assert!(abandoned.is_err(), "the gated write should still be pending");
    match executor.state(ActionKind::Redeem) {
        ActionState::Failed { message } => assert!(message.contains("cancelled")),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(executor.can_submit(&redeem("10")));

    // stored permit lets the next gated write through
    gate.notify_one();
    let outcome = executor.execute(redeem("10")).await.unwrap();
    assert_eq!(outcome.kind, ActionKind::Redeem);
    assert_eq!(contract.writes().len(), 2);
    assert_eq!(executor.state(ActionKind::Redeem), ActionState::Idle);
}

#[tokio::test]
async fn owner_actions_require_owner() {
    let contract = Arc::new(MockShareContract::new());
    let executor = executor(&contract);

    let result = executor
        .execute(ActionRequest::Mint {
            amount: "100".into(),
        })
        .await;

    match result {
        Err(Error::Validation(ValidationError::NotOwner { account, owner })) => {
            assert_eq!(account, MockShareContract::ACCOUNT);
            assert_eq!(owner, addr(0xAA));
        }
        other => panic!("expected NotOwner, got {other:?}"),
    }
    assert!(contract.writes().is_empty());
}

#[tokio::test]
async fn owner_deposit_approves_then_deposits() {
    let contract = Arc::new(MockShareContract::new().as_owner());
    let executor = executor(&contract);

    executor
        .execute(ActionRequest::Deposit {
            amount: "250.5".into(),
        })
        .await
        .unwrap();

    let amount = plstr::domain::Amount::parse("250.5").unwrap();
    assert_eq!(
        contract.writes(),
        vec![
            WriteCall::ApproveToken {
                spender: MockShareContract::CONTRACT,
                amount,
            },
            WriteCall::DepositStakedPls { amount },
        ]
    );
}

#[tokio::test]
async fn owner_recover_and_transfer_send_single_writes() {
    let contract = Arc::new(MockShareContract::new().as_owner());
    let executor = executor(&contract);
    let recipient = addr(0x42);

    executor
        .execute(ActionRequest::Recover {
            token: MockShareContract::TOKEN.to_string(),
            recipient: recipient.to_string(),
            amount: "1".into(),
        })
        .await
        .unwrap();
    executor
        .execute(ActionRequest::TransferOwnership {
            new_owner: recipient.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        contract.writes(),
        vec![
            WriteCall::RecoverTokens {
                token: MockShareContract::TOKEN,
                recipient,
                amount: tokens(1),
            },
            WriteCall::TransferOwnership {
                new_owner: recipient
            },
        ]
    );
}

#[tokio::test]
async fn read_only_connection_cannot_write() {
    let contract = Arc::new(MockShareContract::new().read_only());
    let executor = executor(&contract);

    let result = executor.execute(redeem("10")).await;
    assert!(matches!(result, Err(Error::Write(WriteError::ReadOnly))));
    assert!(matches!(
        executor.state(ActionKind::Redeem),
        ActionState::Failed { .. }
    ));
}
