//! Alfred, the gala assistant that answers with the help of its tools

use tracing::{debug, warn};

use alfred_core::{ChatMessage, Error, GenerationConfig, LLMProvider, Result, ToolRegistry};

pub const ALFRED_INSTRUCTIONS: &str = "You are Alfred, a helpful assistant at a gala event.\n\
When asked about guests, use the guest_info_retriever tool and then provide \
a natural, conversational response based on the information retrieved.\n\
Do not just dump the raw data - synthesize it into a friendly answer.";

/// Upper bound on model turns for a single question
pub const DEFAULT_MAX_STEPS: usize = 5;

/// Tool-calling agent: the model decides which tools to call, Alfred runs them
pub struct Alfred<L: LLMProvider> {
    llm: L,
    tools: ToolRegistry,
    instructions: String,
    max_steps: usize,
    generation: GenerationConfig,
}

impl<L: LLMProvider> Alfred<L> {
    pub fn new(llm: L, tools: ToolRegistry) -> Self {
        let generation = GenerationConfig {
            model_id: llm.model_id().to_string(),
            ..Default::default()
        };

        Self {
            llm,
            tools,
            instructions: ALFRED_INSTRUCTIONS.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
            generation,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Answer a single question
    ///
    /// Tool failures are reported back to the model as text and do not end
    /// the run.
    pub async fn run(&self, question: &str) -> Result<String> {
        let specs = self.tools.specs();
        let mut messages = vec![
            ChatMessage::system(&self.instructions),
            ChatMessage::user(question),
        ];

        for step in 1..=self.max_steps {
            let reply = self.llm.chat(&messages, &specs, &self.generation).await?;

            if !reply.has_tool_calls() {
                let answer = reply.content.unwrap_or_default().trim().to_string();
                if answer.is_empty() {
                    return Err(Error::Agent("model returned an empty answer".to_string()));
                }
                return Ok(answer);
            }

            let calls = reply.tool_calls.clone();
            messages.push(reply);

            for call in calls {
                debug!(step, tool = %call.name, arguments = %call.arguments, "tool call");

                let output = match self.tools.call(&call.name, call.arguments).await {
                    Ok(output) => output,
                    Err(e) => {
                        warn!(tool = %call.name, error = %e, "tool call failed");
                        format!("Error: {}", e)
                    }
                };

                messages.push(ChatMessage::tool_result(call.id, output));
            }
        }

        Err(Error::Agent(format!(
            "no final answer after {} steps",
            self.max_steps
        )))
    }
}
