pub mod demo;
pub mod prompts;
