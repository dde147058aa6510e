pub mod assistant;
pub mod notes;
pub mod session;
pub mod shared;
pub mod tasks;

pub use assistant::AssistantPanel;
pub use notes::NotesModule;
pub use session::{ErrorBanner, SessionBar};
pub use tasks::TasksModule;
