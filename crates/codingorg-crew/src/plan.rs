//! Crew tasks and the sequential plan built for each prompt.

use crate::agents::AgentRole;
use crate::error::{Result, RunnerError};

/// One step of the crew's process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewTask {
    /// Short identifier used in logs and context headers.
    pub name: String,
    /// What to do.
    pub description: String,
    /// What a good result looks like.
    pub expected_output: String,
    /// Who does it.
    pub agent: AgentRole,
    /// Indices of earlier tasks whose output this task receives.
    pub context: Vec<usize>,
}

impl CrewTask {
    /// Creates a task with no context.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: AgentRole,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            context: Vec::new(),
        }
    }

    /// Adds an earlier task's output as context.
    pub fn with_context(mut self, index: usize) -> Self {
        self.context.push(index);
        self
    }

    /// Builds the instruction handed to the executor.
    ///
    /// `context` pairs each context task's name with its output.
    pub fn render(&self, context: &[(&str, &str)]) -> String {
        let mut text = format!(
            "{}\n\nExpected output: {}",
            self.description, self.expected_output
        );
        for (name, output) in context {
            text.push_str(&format!("\n\nContext from {}:\n{}", name, output));
        }
        text
    }
}

/// An ordered list of tasks run one after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewPlan {
    tasks: Vec<CrewTask>,
}

impl CrewPlan {
    /// Creates a plan, checking every context index points to an earlier task.
    pub fn new(tasks: Vec<CrewTask>) -> Result<Self> {
        if tasks.is_empty() {
            return Err(RunnerError::Framework("plan has no tasks".into()));
        }
        for (i, task) in tasks.iter().enumerate() {
            if let Some(bad) = task.context.iter().find(|&&c| c >= i) {
                return Err(RunnerError::Framework(format!(
                    "task '{}' depends on task {} which does not run before it",
                    task.name, bad
                )));
            }
        }
        Ok(Self { tasks })
    }

    /// The plan → implement → review process for one user requirement.
    pub fn for_prompt(prompt: &str) -> Self {
        let plan = CrewTask::new(
            "plan",
            format!(
                "Analyze the user requirement: '{}'. Break it down into specific, actionable \
                 technical steps for the Senior Software Engineer. Define the expected output \
                 or changes for each step. Delegate the first implementation step to the \
                 Senior Software Engineer.",
                prompt
            ),
            "A clear, step-by-step technical plan and delegation of the first coding task to \
             the Senior Software Engineer.",
            AgentRole::DevelopmentManager,
        );

        let implement = CrewTask::new(
            "implement",
            "Receive the technical plan and specific task from the Development Manager. Use \
             the Aider Coding Tool to implement the assigned task. Ensure you write necessary \
             tests to meet the 90% coverage goal. Report the results, including any code \
             changes or errors, back to the Development Manager.",
            "Completed code changes, test results, and a status report including any issues \
             encountered.",
            AgentRole::SeniorEngineer,
        )
        .with_context(0);

        let review = CrewTask::new(
            "review",
            "Review the code changes and test results provided by the Senior Software \
             Engineer. Verify if the implementation meets the requirements of the assigned \
             task and the overall user prompt. Provide feedback or request revisions if \
             necessary. If satisfied, prepare a summary for the user.",
            "A review summary, potentially including feedback for the engineer or a final \
             report for the user.",
            AgentRole::DevelopmentManager,
        )
        .with_context(1);

        Self {
            tasks: vec![plan, implement, review],
        }
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> &[CrewTask] {
        &self.tasks
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always false for a constructed plan.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_prompt_builds_three_sequential_tasks() {
        let plan = CrewPlan::for_prompt("Create hello.py");
        let tasks = plan.tasks();

        assert_eq!(plan.len(), 3);
        assert_eq!(tasks[0].name, "plan");
        assert_eq!(tasks[0].agent, AgentRole::DevelopmentManager);
        assert!(tasks[0].description.contains("'Create hello.py'"));
        assert!(tasks[0].context.is_empty());

        assert_eq!(tasks[1].agent, AgentRole::SeniorEngineer);
        assert_eq!(tasks[1].context, vec![0]);

        assert_eq!(tasks[2].agent, AgentRole::DevelopmentManager);
        assert_eq!(tasks[2].context, vec![1]);
    }

    #[test]
    fn test_for_prompt_is_valid() {
        let tasks = CrewPlan::for_prompt("x").tasks().to_vec();
        assert!(CrewPlan::new(tasks).is_ok());
    }

    #[test]
    fn test_new_rejects_forward_context() {
        let tasks = vec![
            CrewTask::new("a", "d", "e", AgentRole::DevelopmentManager).with_context(1),
            CrewTask::new("b", "d", "e", AgentRole::SeniorEngineer),
        ];
        let err = CrewPlan::new(tasks).unwrap_err();
        assert!(err.to_string().contains("task 'a' depends on task 1"));
    }

    #[test]
    fn test_new_rejects_self_context() {
        let tasks = vec![CrewTask::new("a", "d", "e", AgentRole::DevelopmentManager).with_context(0)];
        assert!(CrewPlan::new(tasks).is_err());
    }

    #[test]
    fn test_new_rejects_empty_plan() {
        assert!(CrewPlan::new(Vec::new()).is_err());
    }

    #[test]
    fn test_render_includes_context() {
        let task = CrewTask::new("review", "Review it.", "A summary.", AgentRole::DevelopmentManager);
        let text = task.render(&[("implement", "wrote hello.py")]);

        assert!(text.starts_with("Review it.\n\nExpected output: A summary."));
        assert!(text.ends_with("Context from implement:\nwrote hello.py"));
    }
}
