//! The task runner interface.
//!
//! `ExternalTaskRunner` is the only thing the orchestration layer knows about
//! whatever actually plans and performs the work. The crew in this crate is
//! one implementation; tests substitute fakes.

use async_trait::async_trait;

use crate::error::Result;

/// Performs one instruction end to end.
///
/// # Example
///
/// ```ignore
/// use codingorg_crew::ExternalTaskRunner;
///
/// async fn run(runner: &dyn ExternalTaskRunner) {
///     if let Err(e) = runner.preflight() {
///         eprintln!("not configured: {}", e);
///         return;
///     }
///     match runner.execute("Create hello.py").await {
///         Ok(output) => println!("{}", output),
///         Err(e) => eprintln!("failed: {}", e),
///     }
/// }
/// ```
#[async_trait]
pub trait ExternalTaskRunner: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Checks credentials and configuration without doing any work.
    fn preflight(&self) -> Result<()>;

    /// Runs the instruction and returns the captured output.
    async fn execute(&self, instruction: &str) -> Result<String>;
}
