//! CLI commands
//!
//! Special commands that can be entered at the query prompt. Anything else is
//! treated as a query for the team.

use crate::agent::AgentTeam;

/// Result of parsing a line of input
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command: run it as a query
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Leave the read loop
    Exit,
    /// Nothing to do (blank line)
    None,
}

/// Parse and handle special commands
pub fn handle_command(input: &str, team: &AgentTeam) -> CommandResult {
    let input = input.trim();

    if input.is_empty() {
        return CommandResult::None;
    }

    match input.to_lowercase().as_str() {
        "exit" => CommandResult::Exit,
        "help" => CommandResult::Handled(help_text()),
        "agents" => CommandResult::Handled(roster_text(team)),
        _ => CommandResult::Continue(input.to_string()),
    }
}

/// Roster in speaking order with completion state
pub fn roster_text(team: &AgentTeam) -> String {
    let mut lines = vec!["エージェント一覧:".to_string()];
    for agent in team.agents() {
        let marker = if agent.is_coordinator() { "★" } else { " " };
        lines.push(format!(
            " {} {} ({}, {}専門家) 役割: {} 優先度: {}",
            marker,
            agent.name(),
            agent.personality(),
            agent.expertise(),
            agent.role(),
            agent.priority()
        ));
    }
    lines.join("\n")
}

fn help_text() -> String {
    r#"使い方:
  質問を入力するとエージェントチームが議論します。
  ラウンドごとに継続するか確認されます (はい/いいえ)。

コマンド:
  agents   エージェント一覧を表示
  help     このヘルプを表示
  exit     終了"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Agent, FixedConfirm};
    use crate::core::{AgentDefinition, Config};
    use std::sync::Arc;

    fn team() -> AgentTeam {
        let config = Config::default();
        let confirm = Arc::new(FixedConfirm(false));
        let agents = vec![
            AgentDefinition::new("Bob", "curious", "pricing", "analyst", 1),
            AgentDefinition::coordinator("Alice", "calm", "planning", 9),
        ]
        .into_iter()
        .map(|def| Agent::from_config(def, &config, confirm.clone()).unwrap())
        .collect();
        AgentTeam::new(agents, confirm).unwrap()
    }

    #[test]
    fn test_exit_is_case_insensitive() {
        let team = team();
        assert_eq!(handle_command("exit", &team), CommandResult::Exit);
        assert_eq!(handle_command("  EXIT ", &team), CommandResult::Exit);
    }

    #[test]
    fn test_query_passes_through() {
        let team = team();
        assert_eq!(
            handle_command(" 新製品の価格を決めたい ", &team),
            CommandResult::Continue("新製品の価格を決めたい".to_string())
        );
        assert_eq!(handle_command("   ", &team), CommandResult::None);
    }

    #[test]
    fn test_agents_lists_roster_in_order() {
        let team = team();
        match handle_command("agents", &team) {
            CommandResult::Handled(text) => {
                let alice = text.find("Alice").unwrap();
                let bob = text.find("Bob").unwrap();
                assert!(alice < bob);
                assert!(text.contains("★ Alice"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
