//! Agent CLI commands.

use anyhow::Result;
use std::path::Path;

use crate::cli::context::AppContext;
use crate::cli::output::{output, truncate, CommandOutput};
use crate::cli::table::{list_table, render_list};
use crate::cli::types::AgentCommands;
use crate::domain::models::{Agent, StepAction};
use crate::domain::ports::AgentRepository;

#[derive(Debug, serde::Serialize)]
pub struct AgentOutput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub capabilities: Vec<String>,
}

impl From<&Agent> for AgentOutput {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            name: agent.name.clone(),
            description: agent.description.clone(),
            capabilities: agent.capabilities.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AgentListOutput {
    pub agents: Vec<AgentOutput>,
    pub total: usize,
}

impl CommandOutput for AgentListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "name", "capabilities"]);
        for agent in &self.agents {
            table.add_row(vec![
                agent.id.clone(),
                truncate(&agent.name, 25),
                truncate(&agent.capabilities.join(", "), 50),
            ]);
        }
        render_list("agent", &table, self.total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AgentActionOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for AgentActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(cmd: AgentCommands, config_path: Option<&Path>, json: bool) -> Result<()> {
    let ctx = AppContext::init(config_path).await?;

    match cmd {
        AgentCommands::Add {
            id,
            name,
            description,
            capabilities,
        } => {
            let actions = capabilities
                .iter()
                .map(|s| s.trim().parse::<StepAction>())
                .collect::<Result<Vec<_>, _>>()?;

            let mut agent = Agent::new(id, name, actions);
            if let Some(description) = description {
                agent = agent.with_description(description);
            }

            ctx.agents.insert(&agent).await?;
            output(
                &AgentActionOutput {
                    success: true,
                    message: format!("Agent '{}' registered", agent.id),
                },
                json,
            );
        }
        AgentCommands::List => {
            let agents = ctx.agents.list().await?;
            let outputs: Vec<AgentOutput> = agents.iter().map(AgentOutput::from).collect();
            let total = outputs.len();
            output(
                &AgentListOutput {
                    agents: outputs,
                    total,
                },
                json,
            );
        }
        AgentCommands::Remove { id } => {
            ctx.agents.delete(&id).await?;
            output(
                &AgentActionOutput {
                    success: true,
                    message: format!("Agent '{id}' removed"),
                },
                json,
            );
        }
    }

    Ok(())
}
