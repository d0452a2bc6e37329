pub mod commands;
mod context;
mod flow;
mod invoker;
mod prompts;
mod report;

pub use context::AppContext;
pub use flow::CurationFlow;
pub use invoker::BuildInvoker;
pub use prompts::{PromptCatalog, PromptStep};
pub use report::ResultReporter;
