//! Domain model for tasks.

mod error;
mod ids;
mod priority;
mod status;
mod task;
mod title;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use priority::TaskPriority;
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task, TaskUpdate};
pub use title::TaskTitle;
