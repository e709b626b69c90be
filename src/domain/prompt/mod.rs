mod renderer;

pub use renderer::{RenderedPrompt, check_templates, render};
