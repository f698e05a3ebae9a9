//! Agent::respond behavior against a scripted capability

mod common;

use std::sync::Arc;

use common::{agent, failing, fixed, lead, member, sequence, CallLog, ScriptedConfirm};
use roundtable::agent::prompts::{ACTION_CANCELLED, ERROR_PREFIX, NO_RESPONSE};
use roundtable::agent::FixedConfirm;
use roundtable::core::{ChatMessage, ProposedAction};

fn with_action(text: &str) -> common::Responder {
    let text = text.to_string();
    Box::new(move |_| {
        Ok(vec![
            ChatMessage::assistant("考え中"),
            ChatMessage::assistant(text.clone()).with_action(ProposedAction::new("python", "print('hi')")),
        ])
    })
}

#[tokio::test]
async fn test_prompt_template_and_last_topic() {
    let log = CallLog::default();
    let mut bob = agent(member("Bob", 1), &log, fixed("了解"), false, Arc::new(FixedConfirm(true)));

    let reply = bob.respond("価格は？", "これまでの議論", "Pricing").await;

    assert_eq!(reply, "了解");
    assert_eq!(bob.last_topic(), "Pricing");
    assert_eq!(
        log.prompts_for("Bob"),
        vec!["これまでの議論\n\nトピック: Pricing\n\nユーザーの質問: 価格は？\n\nあなたの回答:"]
    );
}

#[tokio::test]
async fn test_completion_phrase_sets_flag() {
    let log = CallLog::default();
    let mut bob = agent(
        member("Bob", 1),
        &log,
        sequence(&["分析の結果、タスク完了です。", "要件満たすと判断します", "in progress"]),
        false,
        Arc::new(FixedConfirm(true)),
    );

    bob.respond("q", "", "").await;
    assert!(bob.task_completed());

    bob.respond("q", "", "").await;
    assert!(bob.task_completed());

    bob.respond("q", "", "").await;
    assert!(!bob.task_completed());
}

#[tokio::test]
async fn test_capability_failure_becomes_text() {
    let log = CallLog::default();
    let mut bob = agent(
        member("Bob", 1),
        &log,
        failing("connection refused"),
        false,
        Arc::new(FixedConfirm(true)),
    );

    let reply = bob.respond("q", "", "").await;

    assert!(reply.starts_with(ERROR_PREFIX));
    assert!(reply.contains("connection refused"));
    assert!(!bob.task_completed());
}

#[tokio::test]
async fn test_empty_reply_placeholder() {
    let log = CallLog::default();
    let mut bob = agent(
        member("Bob", 1),
        &log,
        Box::new(|_| Ok(Vec::new())),
        false,
        Arc::new(FixedConfirm(true)),
    );

    assert_eq!(bob.respond("q", "", "").await, NO_RESPONSE);
}

#[tokio::test]
async fn test_declined_action_is_cancelled() {
    let log = CallLog::default();
    let confirm = Arc::new(ScriptedConfirm::new([false], false));
    let mut bob = agent(member("Bob", 1), &log, with_action("タスク完了"), true, confirm.clone());

    let reply = bob.respond("q", "", "").await;

    assert_eq!(reply, ACTION_CANCELLED);
    assert!(!bob.task_completed());
    let asked = confirm.asked();
    assert_eq!(asked.len(), 1);
    assert!(asked[0].contains("print('hi')"));
}

#[tokio::test]
async fn test_approved_action_returns_last_content() {
    let log = CallLog::default();
    let confirm = Arc::new(ScriptedConfirm::new([true], false));
    let mut bob = agent(member("Bob", 1), &log, with_action("実行しました。タスク完了"), true, confirm);

    let reply = bob.respond("q", "", "").await;

    assert_eq!(reply, "実行しました。タスク完了");
    assert!(bob.task_completed());
}

#[tokio::test]
async fn test_no_approval_gate_when_not_required() {
    let log = CallLog::default();
    let confirm = Arc::new(ScriptedConfirm::new([], false));
    let mut bob = agent(member("Bob", 1), &log, with_action("done"), false, confirm.clone());

    assert_eq!(bob.respond("q", "", "").await, "done");
    assert!(confirm.asked().is_empty());
}

#[tokio::test]
async fn test_cleanup_releases_capability() {
    let log = CallLog::default();
    let mut alice = agent(lead("Alice", 5), &log, fixed("ok"), false, Arc::new(FixedConfirm(true)));

    alice.cleanup().await;

    assert_eq!(log.cleanups(), 1);
    assert!(alice.is_coordinator());
}
