//! The crew: runs a plan's tasks in order, each by its agent's executor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::agents::AgentExecutor;
use crate::aider::{AiderTool, CodingTool};
use crate::config::{RunnerConfig, API_KEY_ENV};
use crate::error::{Result, RunnerError};
use crate::llm::{ChatModel, GeminiClient};
use crate::plan::CrewPlan;
use crate::runner::ExternalTaskRunner;

/// Manager and engineer working through a sequential plan.
pub struct Crew {
    config: RunnerConfig,
    chat: Arc<dyn ChatModel>,
    tool: Arc<dyn CodingTool>,
}

impl Crew {
    /// Creates a crew backed by Gemini and aider.
    pub fn new(config: RunnerConfig) -> Self {
        let chat = GeminiClient::new(
            config.api_key().unwrap_or_default(),
            config.chat_model.clone(),
        );
        let tool = AiderTool::new(&config);
        Self::with_components(config, Arc::new(chat), Arc::new(tool))
    }

    /// Creates a crew with explicit executors.
    pub fn with_components(
        config: RunnerConfig,
        chat: Arc<dyn ChatModel>,
        tool: Arc<dyn CodingTool>,
    ) -> Self {
        Self { config, chat, tool }
    }

    /// Runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs every task in order and returns the last task's output.
    pub async fn kickoff(&self, plan: &CrewPlan) -> Result<String> {
        let mut outputs: Vec<String> = Vec::with_capacity(plan.len());

        for (index, task) in plan.tasks().iter().enumerate() {
            let profile = task.agent.profile();
            let context: Vec<(&str, &str)> = task
                .context
                .iter()
                .map(|&c| (plan.tasks()[c].name.as_str(), outputs[c].as_str()))
                .collect();
            let instruction = task.render(&context);

            info!(
                step = index + 1,
                total = plan.len(),
                task = %task.name,
                agent = %task.agent,
                "crew task started"
            );

            let output = match profile.executor {
                AgentExecutor::ChatModel => {
                    self.chat
                        .complete(&profile.system_instruction(), &instruction)
                        .await?
                }
                AgentExecutor::CodingTool => self.tool.run(&instruction).await?,
            };

            debug!(task = %task.name, output_len = output.len(), "crew task finished");
            outputs.push(output);
        }

        outputs
            .pop()
            .ok_or_else(|| RunnerError::Framework("plan produced no output".into()))
    }
}

#[async_trait]
impl ExternalTaskRunner for Crew {
    fn name(&self) -> &str {
        "crew"
    }

    fn preflight(&self) -> Result<()> {
        if !self.config.has_api_key() {
            return Err(RunnerError::MissingCredential(API_KEY_ENV.to_string()));
        }
        if !self.tool.is_available() {
            return Err(RunnerError::BinaryNotFound(self.tool.info().command.clone()));
        }
        Ok(())
    }

    async fn execute(&self, instruction: &str) -> Result<String> {
        let plan = CrewPlan::for_prompt(instruction);
        info!(tasks = plan.len(), "starting crew execution");
        let result = self.kickoff(&plan).await?;
        info!(result_len = result.len(), "crew execution finished");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aider::ToolInfo;
    use std::sync::Mutex;

    /// Replies with a numbered answer and records every prompt.
    struct ScriptedModel {
        prompts: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl ScriptedModel {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
            if self.fail {
                return Err(RunnerError::Model("quota exceeded".into()));
            }
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push((system.to_string(), prompt.to_string()));
            Ok(format!("manager reply {}", prompts.len()))
        }
    }

    struct RecordingTool {
        info: ToolInfo,
        available: bool,
        instructions: Mutex<Vec<String>>,
    }

    impl RecordingTool {
        fn new(available: bool) -> Arc<Self> {
            Arc::new(Self {
                info: ToolInfo {
                    id: "fake".into(),
                    name: "Fake Tool".into(),
                    description: "records instructions".into(),
                    command: "fake-aider".into(),
                },
                available,
                instructions: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CodingTool for RecordingTool {
        fn info(&self) -> &ToolInfo {
            &self.info
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn run(&self, instructions: &str) -> Result<String> {
            self.instructions.lock().unwrap().push(instructions.to_string());
            Ok("OK: file created".into())
        }
    }

    fn configured() -> RunnerConfig {
        RunnerConfig::new().with_api_key("test-key")
    }

    #[tokio::test]
    async fn test_execute_runs_plan_in_order() {
        let model = ScriptedModel::new();
        let tool = RecordingTool::new(true);
        let crew = Crew::with_components(configured(), model.clone(), tool.clone());

        let result = crew.execute("Create hello.py").await.unwrap();

        // Review is the last task and is answered by the manager.
        assert_eq!(result, "manager reply 2");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].0.starts_with("You are the Development Manager."));
        assert!(prompts[0].1.contains("'Create hello.py'"));
        assert!(prompts[1].1.contains("Context from implement:\nOK: file created"));

        let instructions = tool.instructions.lock().unwrap();
        assert_eq!(instructions.len(), 1);
        assert!(instructions[0].contains("Context from plan:\nmanager reply 1"));
    }

    #[tokio::test]
    async fn test_model_failure_stops_the_crew() {
        let tool = RecordingTool::new(true);
        let crew = Crew::with_components(configured(), ScriptedModel::failing(), tool.clone());

        let err = crew.execute("x").await.unwrap_err();

        assert!(matches!(err, RunnerError::Model(ref m) if m == "quota exceeded"));
        assert!(tool.instructions.lock().unwrap().is_empty());
    }

    #[test]
    fn test_preflight_requires_api_key() {
        let crew = Crew::with_components(
            RunnerConfig::new(),
            ScriptedModel::new(),
            RecordingTool::new(true),
        );
        let err = crew.preflight().unwrap_err();
        assert!(matches!(err, RunnerError::MissingCredential(ref k) if k == "GOOGLE_API_KEY"));
    }

    #[test]
    fn test_preflight_requires_tool() {
        let crew = Crew::with_components(configured(), ScriptedModel::new(), RecordingTool::new(false));
        let err = crew.preflight().unwrap_err();
        assert!(matches!(err, RunnerError::BinaryNotFound(ref b) if b == "fake-aider"));
    }

    #[test]
    fn test_preflight_ok() {
        let crew = Crew::with_components(configured(), ScriptedModel::new(), RecordingTool::new(true));
        assert!(crew.preflight().is_ok());
        assert_eq!(crew.name(), "crew");
    }

    #[tokio::test]
    async fn test_kickoff_custom_plan() {
        use crate::agents::AgentRole;
        use crate::plan::CrewTask;

        let tool = RecordingTool::new(true);
        let crew = Crew::with_components(configured(), ScriptedModel::new(), tool.clone());
        let plan = CrewPlan::new(vec![CrewTask::new(
            "only",
            "Write the file.",
            "A file.",
            AgentRole::SeniorEngineer,
        )])
        .unwrap();

        assert_eq!(crew.kickoff(&plan).await.unwrap(), "OK: file created");
    }
}
