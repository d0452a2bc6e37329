use crate::domain::AppError;

/// Terminal seam for the wizard.
///
/// The production implementation renders with dialoguer; tests drive the
/// flow with a scripted console instead.
pub trait Console {
    /// Display a step's instruction lines alongside its commentary lines.
    fn show_step(&self, instructions: &[String], help: &[String]);

    /// Display a recoverable validation error under the current step.
    fn show_error(&self, error: &str);

    /// Display free-form progress or closing text.
    fn show_message(&self, text: &str);

    /// Block for a single line of input. Empty input is legal; each step's
    /// rule decides whether it is acceptable.
    fn read_line(&self, prompt: &str) -> Result<String, AppError>;

    /// Block for masked input; every typed character is echoed as a mask
    /// while the real value is accumulated.
    fn read_secret(&self, prompt: &str) -> Result<String, AppError>;
}
