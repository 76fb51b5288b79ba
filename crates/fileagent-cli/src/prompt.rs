use anyhow::Result;
use fileagent::models::message::Message;

pub mod rustyline;
pub mod thinking;

pub const HELP_TEXT: &str = "Commands:
exit - End the session (any letter case)
/t - Toggle Light/Dark theme
/? | /help - Display this help message
Ctrl+C or Ctrl+D - End the session";

pub trait Prompt {
    fn render(&mut self, message: Box<Message>);
    fn render_error(&mut self, error: &str) {
        eprintln!("Error: {}", error);
    }
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&self);
    fn close(&self);
    fn ready(&self) {
        println!("\n");
        println!("fileagent is running! Tell it what to do with your files, or type exit to leave.");
        println!("\n");
    }
}

#[derive(Debug, PartialEq)]
pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Optional content as sometimes the user may be issuing a command eg. (Exit)
}

impl Input {
    pub fn message<S: Into<String>>(text: S) -> Self {
        Input {
            input_type: InputType::Message,
            content: Some(text.into()),
        }
    }

    pub fn control(input_type: InputType) -> Self {
        Input {
            input_type,
            content: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Message,  // User sent a message
    Exit,     // User wants to exit the session
}

pub enum Theme {
    Light,
    Dark,
}

/// Classify a raw line typed by the user
pub fn parse_input(line: &str) -> Input {
    let text = line.trim();
    if text.is_empty() {
        Input::control(InputType::AskAgain)
    } else if text.eq_ignore_ascii_case("exit") {
        Input::control(InputType::Exit)
    } else {
        Input::message(text)
    }
}
