pub mod builtin_task_assets;

pub use builtin_task_assets::{load_builtin_registry, load_builtin_tasks, read_builtin_task_file};
