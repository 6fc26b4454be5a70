// Declare the display submodule
mod display;

// Declare the chat submodule (containing the chat_loop logic)
mod chat;

// Re-export the public API from the chat submodule
pub use chat::{
    build_prompt, chat_loop, parse_line, render_answer, run_session, LineCommand, LineReader,
    PROMPT_TEMPLATE_PREFIX,
};
