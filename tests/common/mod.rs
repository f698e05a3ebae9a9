//! Shared test doubles: a scripted chat capability and call recording

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use roundtable::agent::Confirm;
use roundtable::core::{AgentDefinition, ChatMessage, Result, RoundtableError};
use roundtable::{Agent, ChatCapability, ChatOptions};

/// Produces the messages for one prompt
pub type Responder = Box<dyn FnMut(&str) -> Result<Vec<ChatMessage>> + Send + Sync>;

/// Every chat call across all agents, in order, plus cleanup count
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    cleanups: Arc<AtomicUsize>,
}

impl CallLog {
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the agents called, in order
    pub fn speakers(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    pub fn count_for(&self, name: &str) -> usize {
        self.calls().iter().filter(|(n, _)| n == name).count()
    }

    pub fn prompts_for(&self, name: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(n, _)| n == name)
            .map(|(_, prompt)| prompt)
            .collect()
    }

    pub fn cleanups(&self) -> usize {
        self.cleanups.load(Ordering::SeqCst)
    }
}

pub struct ScriptedCapability {
    name: String,
    options: ChatOptions,
    responder: Responder,
    log: CallLog,
}

impl ScriptedCapability {
    pub fn new(name: &str, log: CallLog, responder: Responder) -> Self {
        Self {
            name: name.to_string(),
            options: ChatOptions::default(),
            responder,
            log,
        }
    }
}

#[async_trait]
impl ChatCapability for ScriptedCapability {
    fn configure(&mut self, options: ChatOptions) {
        self.options = options;
    }

    fn options(&self) -> &ChatOptions {
        &self.options
    }

    async fn chat(&mut self, prompt: &str) -> Result<Vec<ChatMessage>> {
        self.log
            .calls
            .lock()
            .unwrap()
            .push((self.name.clone(), prompt.to_string()));
        (self.responder)(prompt)
    }

    async fn cleanup(&mut self) -> Result<()> {
        self.log.cleanups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Answers from a queue, recording every prompt it was asked; once the
/// queue is empty it keeps returning `fallback`
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
    fallback: bool,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
            fallback,
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, prompt: &str) -> Result<bool> {
        self.asked.lock().unwrap().push(prompt.to_string());
        let answer = self.answers.lock().unwrap().pop_front();
        Ok(answer.unwrap_or(self.fallback))
    }
}

/// Fails every confirmation, like a console whose input broke
pub struct BrokenConsole;

#[async_trait]
impl Confirm for BrokenConsole {
    async fn confirm(&self, _prompt: &str) -> Result<bool> {
        Err(RoundtableError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )))
    }
}

/// Always answers with the same text
pub fn fixed(text: &str) -> Responder {
    let text = text.to_string();
    Box::new(move |_| Ok(vec![ChatMessage::assistant(text.clone())]))
}

/// Answers from a list, repeating the last entry once exhausted
pub fn sequence(texts: &[&str]) -> Responder {
    let texts: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
    let mut index = 0;
    Box::new(move |_| {
        let text = texts[index.min(texts.len() - 1)].clone();
        index += 1;
        Ok(vec![ChatMessage::assistant(text)])
    })
}

/// Fails every call
pub fn failing(message: &str) -> Responder {
    let message = message.to_string();
    Box::new(move |_| Err(RoundtableError::provider(message.clone())))
}

/// Coordinator double: answers summary, next-question and final-summary
/// requests with fixed text, and guidance requests from `guidance` in turn
/// (repeating the last one)
pub fn coordinator(guidance: &[&str]) -> Responder {
    let guidance: Vec<String> = guidance.iter().map(|g| g.to_string()).collect();
    let mut round = 0;
    Box::new(move |prompt| {
        let text = if prompt.contains("最終的または暫定的なまとめ") {
            "最終まとめ".to_string()
        } else if prompt.contains("質問を1つ提案") {
            "次の質問案".to_string()
        } else if prompt.contains("簡潔にまとめてください") {
            "サマリー本文".to_string()
        } else {
            let text = guidance[round.min(guidance.len() - 1)].clone();
            round += 1;
            text
        };
        Ok(vec![ChatMessage::assistant(text)])
    })
}

/// Build an agent around a scripted capability
pub fn agent(
    definition: AgentDefinition,
    log: &CallLog,
    responder: Responder,
    require_approval: bool,
    confirm: Arc<dyn Confirm>,
) -> Agent {
    let mut capability = ScriptedCapability::new(&definition.name, log.clone(), responder);
    capability.configure(ChatOptions {
        model: "scripted".to_string(),
        require_approval,
        ..Default::default()
    });
    Agent::new(definition, Box::new(capability), confirm)
}

pub fn member(name: &str, priority: i32) -> AgentDefinition {
    AgentDefinition::new(name, "冷静", "分析", "メンバー", priority)
}

pub fn lead(name: &str, priority: i32) -> AgentDefinition {
    AgentDefinition::coordinator(name, "公平", "進行", priority)
}
