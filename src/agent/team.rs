//! Agent team orchestrator
//!
//! Runs the coordinator-led round loop. Each round goes through these states:
//! Awaiting-Coordinator → Awaiting-Supplements → Summarizing →
//! (Confirm-Stop | Confirm-Continue) → Idle.
//!
//! Capability calls are strictly sequential: the coordinator first, then the
//! named speaker or every other agent in roster order, then the coordinator's
//! summary and next-question calls.

use std::sync::Arc;

use crate::agent::confirm::Confirm;
use crate::agent::context::Context;
use crate::agent::guidance::parse_guidance;
use crate::agent::participant::Agent;
use crate::agent::prompts::{self, CONFIRM_CONTINUE, CONFIRM_STOP, NO_SUPPLEMENT_PHRASE};
use crate::core::{Config, Result, RoundtableError};

/// Why the round loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// `max_iterations` rounds ran
    MaxIterations,
    /// Every agent reported completion and the operator agreed to stop
    AllTasksCompleted,
    /// The operator declined to continue
    Declined,
}

/// Outcome of one `process_query` session
#[derive(Debug, Clone)]
pub struct Discussion {
    /// Rounds started, including one cut short by the stop confirmation
    pub rounds: usize,
    pub ended_by: EndReason,
    /// The coordinator's closing summary
    pub final_summary: String,
    /// The session transcript the closing summary was based on
    pub transcript: String,
}

/// A roster of agents led by exactly one coordinator
pub struct AgentTeam {
    /// Sorted by priority, highest first
    agents: Vec<Agent>,
    /// Index of the coordinator in `agents`
    coordinator: usize,
    confirm: Arc<dyn Confirm>,
    current_topic: String,
}

impl AgentTeam {
    /// Build a team, ordering the roster by descending priority
    ///
    /// Fails unless exactly one agent holds the coordinator role and all
    /// names are distinct.
    pub fn new(mut agents: Vec<Agent>, confirm: Arc<dyn Confirm>) -> Result<Self> {
        // stable: ties keep their configured order
        agents.sort_by(|a, b| b.priority().cmp(&a.priority()));

        for (i, agent) in agents.iter().enumerate() {
            if agents[..i].iter().any(|other| other.name() == agent.name()) {
                return Err(RoundtableError::DuplicateAgent(agent.name().to_string()));
            }
        }

        let coordinators: Vec<usize> = agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.is_coordinator())
            .map(|(i, _)| i)
            .collect();

        let coordinator = match coordinators.as_slice() {
            [index] => *index,
            [] => return Err(RoundtableError::NoCoordinator),
            many => {
                return Err(RoundtableError::MultipleCoordinators(
                    many.iter().map(|&i| agents[i].name().to_string()).collect(),
                ))
            }
        };

        Ok(Self {
            agents,
            coordinator,
            confirm,
            current_topic: String::new(),
        })
    }

    /// Build every configured agent and the team around them
    pub fn from_config(config: &Config, confirm: Arc<dyn Confirm>) -> Result<Self> {
        let agents = config
            .agents
            .iter()
            .cloned()
            .map(|definition| Agent::from_config(definition, config, confirm.clone()))
            .collect::<Result<Vec<_>>>()?;

        Self::new(agents, confirm)
    }

    /// Run a discussion on `query` for at most `max_iterations` rounds
    ///
    /// Completion flags are reset on every exit path, including errors from
    /// the confirmation prompts.
    pub async fn process_query(&mut self, query: &str, max_iterations: usize) -> Result<Discussion> {
        let result = self.run_discussion(query, max_iterations).await;
        self.reset_completion();
        result
    }

    async fn run_discussion(&mut self, query: &str, max_iterations: usize) -> Result<Discussion> {
        let mut context = Context::new();
        let mut rounds = 0;
        let mut ended_by = EndReason::MaxIterations;

        for iteration in 0..max_iterations {
            let round = iteration + 1;
            rounds = round;
            log::info!("ラウンド {} 開始", round);
            println!("\nラウンド {}:", round);

            let coordinator_reply = self.agents[self.coordinator]
                .respond(query, context.as_str(), "")
                .await;
            let guidance = parse_guidance(&coordinator_reply);
            self.current_topic = guidance.topic.clone();
            println!(
                "{}（コーディネーター）の指示:\n{}",
                self.coordinator().name(),
                coordinator_reply
            );

            if self.all_tasks_completed() && self.confirm.confirm(CONFIRM_STOP).await? {
                log::info!("all agents reported completion, stopping after round {}", round);
                ended_by = EndReason::AllTasksCompleted;
                break;
            }

            context.push_coordinator(round, &coordinator_reply);

            let named = guidance.speaker().and_then(|name| self.position(name));
            match named {
                Some(index) => {
                    let reply = self.agents[index]
                        .respond(query, context.as_str(), &self.current_topic)
                        .await;
                    let agent = &self.agents[index];
                    println!("\n{}（{}）の回答:\n{}", agent.name(), agent.role(), reply);
                    context.push_contribution(agent.name(), &reply);
                }
                None => {
                    if let Some(name) = guidance.speaker() {
                        log::warn!("次の発言者 {} is not on the roster, asking everyone", name);
                    }
                    self.gather_supplements(query, &mut context).await;
                }
            }

            let (summary, next_question) = self.summarize(&context).await;
            println!("\n議論のサマリー:\n{}", summary);
            println!("\n次のラウンドの質問:\n{}", next_question);
            context.push_summary(&summary, &next_question);

            if !self.confirm.confirm(CONFIRM_CONTINUE).await? {
                ended_by = EndReason::Declined;
                break;
            }
        }

        println!("\n最終的なまとめ:");
        let final_summary = self.agents[self.coordinator]
            .respond(query, &prompts::final_summary_context(context.as_str()), "")
            .await;
        println!("{}", final_summary);
        log::info!("議論のまとめ完了");

        Ok(Discussion {
            rounds,
            ended_by,
            final_summary,
            transcript: context.into_string(),
        })
    }

    /// Ask every non-coordinator agent once, in roster order, appending each
    /// reply that does not decline to add anything
    async fn gather_supplements(&mut self, query: &str, context: &mut Context) {
        for index in 0..self.agents.len() {
            if index == self.coordinator {
                continue;
            }

            let reply = self.agents[index]
                .respond(query, context.as_str(), &self.current_topic)
                .await;
            let agent = &self.agents[index];

            if reply.contains(NO_SUPPLEMENT_PHRASE) {
                log::debug!("{} has nothing to add", agent.name());
                continue;
            }

            println!("\n{}（{}）からの補足:\n{}", agent.name(), agent.role(), reply);
            context.push_contribution(agent.name(), &reply);
        }
    }

    /// Coordinator's summary of the transcript and its next-round question
    async fn summarize(&mut self, context: &Context) -> (String, String) {
        let coordinator = &mut self.agents[self.coordinator];
        let summary = coordinator
            .respond(&prompts::summary_request(context.as_str()), "", "")
            .await;
        let next_question = coordinator
            .respond(
                &prompts::next_question_request(context.as_str(), &summary),
                "",
                "",
            )
            .await;
        (summary, next_question)
    }

    /// Release every agent's capability
    pub async fn shutdown(&mut self) {
        for agent in &mut self.agents {
            agent.cleanup().await;
        }
        log::info!("released {} agents", self.agents.len());
    }

    /// True once every agent, coordinator included, reported completion
    pub fn all_tasks_completed(&self) -> bool {
        self.agents.iter().all(Agent::task_completed)
    }

    pub fn reset_completion(&mut self) {
        for agent in &mut self.agents {
            agent.reset_completion();
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.agents.iter().position(|agent| agent.name() == name)
    }

    /// Roster in speaking order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.position(name).map(|index| &self.agents[index])
    }

    pub fn coordinator(&self) -> &Agent {
        &self.agents[self.coordinator]
    }

    /// Topic parsed from the most recent coordinator guidance
    pub fn current_topic(&self) -> &str {
        &self.current_topic
    }
}
