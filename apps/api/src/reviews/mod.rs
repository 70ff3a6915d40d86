// Review generation and post-processing.
// Raw model output is cleaned line by line, then emoji are rationed across the batch.
// All LLM calls go through llm_client via the ReviewGenerator seam.

pub mod appender;
pub mod context_emoji;
pub mod emoji;
pub mod ending;
pub mod generator;
pub mod handlers;
pub mod markers;
pub mod options;
pub mod pipeline;
pub mod placement;
pub mod prompts;
pub mod quota;
pub mod service;
