pub mod analysis;
pub mod openai;
pub mod prompts;

pub use analysis::{parse_analysis, Analysis};
pub use openai::{GeneratorConfig, OpenAiClient};
