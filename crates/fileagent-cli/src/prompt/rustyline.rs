use std::{
    collections::HashMap,
    io::{self, Write},
};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::spinner;
use console::style;
use fileagent::models::message::{Message, MessageContent, ToolRequest, ToolResponse};
use fileagent::models::{content::Content, tool::ToolCall};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;

use super::{
    parse_input, thinking::get_random_thinking_message, Input, InputType, Prompt, Theme, HELP_TEXT,
};

const PROMPT: &str = "\x1b[1m\x1b[38;5;30mYou: \x1b[0m";
const MAX_STRING_LENGTH: usize = 40;
const INDENT: &str = "    ";

pub struct RustylinePrompt {
    editor: DefaultEditor,
    spinner: cliclack::ProgressBar,
    theme: Theme,
    renderers: HashMap<String, Box<dyn ToolRenderer>>,
}

impl RustylinePrompt {
    pub fn new() -> Result<Self> {
        let mut renderers: HashMap<String, Box<dyn ToolRenderer>> = HashMap::new();
        let default_renderer = DefaultRenderer;
        renderers.insert(default_renderer.tool_name(), Box::new(default_renderer));
        let terminal_renderer = TerminalRenderer;
        renderers.insert(terminal_renderer.tool_name(), Box::new(terminal_renderer));

        Ok(RustylinePrompt {
            editor: DefaultEditor::new()?,
            spinner: spinner(),
            theme: Theme::Dark,
            renderers,
        })
    }

    fn theme_name(&self) -> &'static str {
        match self.theme {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }

    fn renderer(&self, tool_name: &str) -> &dyn ToolRenderer {
        self.renderers
            .get(tool_name)
            .or_else(|| self.renderers.get("default"))
            .map(|renderer| renderer.as_ref())
            .unwrap_or(&DefaultRenderer)
    }
}

/// Implement the ToolRenderer trait for each tool that you want to render in the prompt.
trait ToolRenderer {
    fn tool_name(&self) -> String;
    fn request(&self, tool_request: &ToolRequest, theme: &str);
    fn response(&self, tool_response: &ToolResponse, theme: &str);
}

struct DefaultRenderer;

impl ToolRenderer for DefaultRenderer {
    fn tool_name(&self) -> String {
        "default".to_string()
    }

    fn request(&self, tool_request: &ToolRequest, theme: &str) {
        match &tool_request.tool_call {
            Ok(call) => {
                print_request_header(call);
                print_params(&call.arguments, 0);
                print_newline();
            }
            Err(e) => print_markdown(&e.to_string(), theme),
        }
    }

    fn response(&self, tool_response: &ToolResponse, theme: &str) {
        default_response_renderer(tool_response, theme);
    }
}

struct TerminalRenderer;

impl ToolRenderer for TerminalRenderer {
    fn tool_name(&self) -> String {
        "terminal_tool".to_string()
    }

    fn request(&self, tool_request: &ToolRequest, theme: &str) {
        match &tool_request.tool_call {
            Ok(call) => {
                print_request_header(call);

                match (call.arguments.get("directory"), call.arguments.get("command")) {
                    (Some(Value::String(dir)), Some(Value::String(command))) => {
                        println!("{}: {}", style("directory").dim(), style(dir).green());
                        println!("{}: {}", style("command").dim(), style(command).green());
                    }
                    _ => print_params(&call.arguments, 0),
                }
                print_newline();
            }
            Err(e) => print_markdown(&e.to_string(), theme),
        }
    }

    fn response(&self, tool_response: &ToolResponse, theme: &str) {
        // Command output is shown as is, markdown highlighting would mangle it
        match &tool_response.tool_result {
            Ok(contents) => {
                for content in contents {
                    if let Content::Text(text) = content {
                        println!("{}", style(&text.text).dim());
                    }
                }
            }
            Err(e) => print_markdown(&e.to_string(), theme),
        }
    }
}

fn default_response_renderer(tool_response: &ToolResponse, theme: &str) {
    match &tool_response.tool_result {
        Ok(contents) => {
            for content in contents {
                if let Content::Text(text) = content {
                    print_markdown(&text.text, theme);
                }
            }
        }
        Err(e) => print_markdown(&e.to_string(), theme),
    }
}

fn print_request_header(call: &ToolCall) {
    let tool_header = format!(
        "─── {} ──────────────────────────",
        style(&call.name).magenta().dim(),
    );
    print_newline();
    println!("{}", tool_header);
}

fn print_markdown(content: &str, theme: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();
    if printed.is_err() {
        println!("{}", content);
    }
}

/// Format and print parameters recursively with proper indentation and colors
fn print_params(value: &Value, depth: usize) {
    let indent = INDENT.repeat(depth);

    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}{}:", indent, style(key).dim());
                        print_params(val, depth + 1);
                    }
                    Value::String(s) => {
                        if s.len() > MAX_STRING_LENGTH {
                            println!("{}{}: {}", indent, style(key).dim(), style("...").dim());
                        } else {
                            println!("{}{}: {}", indent, style(key).dim(), style(s).green());
                        }
                    }
                    Value::Number(n) => {
                        println!("{}{}: {}", indent, style(key).dim(), style(n).blue());
                    }
                    Value::Bool(b) => {
                        println!("{}{}: {}", indent, style(key).dim(), style(b).blue());
                    }
                    Value::Null => {
                        println!("{}{}: {}", indent, style(key).dim(), style("null").dim());
                    }
                }
            }
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                println!("{}{}.", indent, i + 1);
                print_params(item, depth + 1);
            }
        }
        Value::String(s) => {
            if s.len() > MAX_STRING_LENGTH {
                println!(
                    "{}{}",
                    indent,
                    style(format!("[{} chars]", s.len())).yellow()
                );
            } else {
                println!("{}{}", indent, style(s).green());
            }
        }
        other => println!("{}{}", indent, style(other).yellow()),
    }
}

fn print_newline() {
    println!();
}

impl Prompt for RustylinePrompt {
    fn render(&mut self, message: Box<Message>) {
        let theme = self.theme_name();

        let mut last_tool_name: &str = "default";
        for message_content in &message.content {
            match message_content {
                MessageContent::Text(text) => print_markdown(&text.text, theme),
                MessageContent::ToolRequest(tool_request) => {
                    if let Ok(call) = &tool_request.tool_call {
                        last_tool_name = &call.name;
                    }
                    self.renderer(last_tool_name).request(tool_request, theme);
                }
                MessageContent::ToolResponse(tool_response) => {
                    self.renderer(last_tool_name).response(tool_response, theme)
                }
            }
        }

        print_newline();
        let _ = io::stdout().flush();
    }

    fn render_error(&mut self, error: &str) {
        eprintln!("{} {}", style("Error:").red().bold(), error);
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner
            .start(format!("{}...", get_random_thinking_message()));
    }

    fn hide_busy(&self) {
        self.spinner.stop("");
    }

    fn get_input(&mut self) -> Result<Input> {
        let line = match self.editor.readline(PROMPT) {
            Ok(text) => text,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Ok(Input::control(InputType::Exit));
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                return Ok(Input::control(InputType::Exit));
            }
        };
        let _ = self.editor.add_history_entry(line.as_str());

        let text = line.trim();
        if text.eq_ignore_ascii_case("/t") {
            self.theme = match self.theme {
                Theme::Light => {
                    println!("Switching to Dark theme");
                    Theme::Dark
                }
                Theme::Dark => {
                    println!("Switching to Light theme");
                    Theme::Light
                }
            };
            Ok(Input::control(InputType::AskAgain))
        } else if text.eq_ignore_ascii_case("/?") || text.eq_ignore_ascii_case("/help") {
            println!("{}", HELP_TEXT);
            Ok(Input::control(InputType::AskAgain))
        } else {
            Ok(parse_input(text))
        }
    }

    fn close(&self) {
        // No cleanup required
    }
}
