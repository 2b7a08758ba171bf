//! Agent profiles.
//!
//! Profiles are plain data: a role, a goal, a backstory and which executor
//! performs the agent's tasks. Nothing here decides how work gets done.

use serde::{Deserialize, Serialize};

/// What performs an agent's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentExecutor {
    /// A chat completion from the language model.
    ChatModel,
    /// The coding tool.
    CodingTool,
}

/// The two members of the crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Breaks requirements into steps and reviews results.
    DevelopmentManager,
    /// Implements steps with the coding tool.
    SeniorEngineer,
}

impl AgentRole {
    /// The profile for this role.
    pub fn profile(&self) -> AgentProfile {
        match self {
            Self::DevelopmentManager => AgentProfile::development_manager(),
            Self::SeniorEngineer => AgentProfile::senior_engineer(),
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DevelopmentManager => write!(f, "development_manager"),
            Self::SeniorEngineer => write!(f, "senior_engineer"),
        }
    }
}

/// Declarative description of an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Job title.
    pub role: String,
    /// What the agent is trying to achieve.
    pub goal: String,
    /// Persona text.
    pub backstory: String,
    /// Whether the agent hands work to other agents.
    pub allow_delegation: bool,
    /// What performs this agent's tasks.
    pub executor: AgentExecutor,
}

impl AgentProfile {
    /// The Development Manager.
    pub fn development_manager() -> Self {
        Self {
            role: "Development Manager".into(),
            goal: "Oversee the software development process from requirements to deployment, \
                   ensuring tasks are well-defined, assigned correctly to the Senior Software \
                   Engineer, and meet user requirements."
                .into(),
            backstory: "You are an experienced Development Manager, skilled in breaking down \
                        complex software requirements into actionable, specific, and testable \
                        tasks for your Senior Software Engineer. You excel at communication, \
                        coordination, reviewing the engineer's work, and ensuring the final \
                        product aligns perfectly with the user's needs and quality standards. \
                        You always ensure the engineer has clear instructions and context."
                .into(),
            allow_delegation: true,
            executor: AgentExecutor::ChatModel,
        }
    }

    /// The Senior Software Engineer.
    pub fn senior_engineer() -> Self {
        Self {
            role: "Senior Software Engineer".into(),
            goal: "Take development tasks, implement them using the Aider tool, write \
                   high-quality code and tests, ensure test coverage targets are met, and \
                   report results."
                .into(),
            backstory: "You are a highly skilled Senior Software Engineer specialized in using \
                        AI tools for development. You receive tasks from the Development Manager \
                        and utilize the Aider tool to write, modify, and test code efficiently. \
                        You are meticulous about code quality, testing (aiming for 90%+ \
                        coverage), and following instructions precisely."
                .into(),
            allow_delegation: false,
            executor: AgentExecutor::CodingTool,
        }
    }

    /// System instruction given to the model when this agent speaks.
    pub fn system_instruction(&self) -> String {
        format!(
            "You are the {}. {}\n\nYour goal: {}",
            self.role, self.backstory, self.goal
        )
    }
}
