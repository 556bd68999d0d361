use domain::session::{Role, Turn};

pub const DEFAULT_USER_LABEL: &str = "User";
pub const DEFAULT_ASSISTANT_LABEL: &str = "Assistant";
pub const DEFAULT_MEMORY_INSTRUCTION: &str = "Answer the user's question based on the conversation history above. \
If the user mentioned any information earlier, remember it and refer to it.";

/// Labels and instruction line used when flattening a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextTemplate {
    pub user_label: String,
    pub assistant_label: String,
    pub memory_instruction: String,
}

impl Default for ContextTemplate {
    fn default() -> Self {
        Self {
            user_label: DEFAULT_USER_LABEL.to_string(),
            assistant_label: DEFAULT_ASSISTANT_LABEL.to_string(),
            memory_instruction: DEFAULT_MEMORY_INSTRUCTION.to_string(),
        }
    }
}

/// Turns a transcript into the single prompt string sent to a completion
/// backend. No native multi-turn API is assumed, so the history is stuffed
/// into the prompt and the text ends primed for the assistant's reply.
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    template: ContextTemplate,
}

impl ContextBuilder {
    pub fn new(template: ContextTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &ContextTemplate {
        &self.template
    }

    fn label(&self, role: Role) -> &str {
        match role {
            Role::User => &self.template.user_label,
            Role::Assistant => &self.template.assistant_label,
        }
    }

    pub fn build(&self, turns: &[Turn]) -> String {
        let mut context = String::new();
        for turn in turns {
            context.push_str(self.label(turn.role()));
            context.push_str(": ");
            context.push_str(turn.content());
            context.push('\n');
        }

        context.push_str(&self.template.memory_instruction);
        context.push('\n');

        let last_user = turns
            .iter()
            .rev()
            .find(|t| t.role() == Role::User)
            .map(|t| t.content())
            .unwrap_or_default();
        context.push_str(&format!(
            "{}: {}\n{}: ",
            self.template.user_label, last_user, self.template.assistant_label
        ));
        context
    }
}
