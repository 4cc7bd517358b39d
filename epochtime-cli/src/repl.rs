// Interactive converter using editline
//
// Each line is a timestamp to convert into the current parameter, or
// `name = timestamp` to convert into a named parameter, or
// `echo text` to print text with `{name}` references substituted.

use editline::{LineEditor, terminals::StdioTerminal};
use epochtime_core::TimestampConverter;
use std::io::Write;

use crate::stdio_host::StdioHost;

#[derive(Debug, PartialEq)]
enum ReplCommand<'a> {
    Quit,
    Echo(&'a str),
    Convert { param: Option<&'a str>, human_time: &'a str },
}

fn is_param_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_line(line: &str) -> ReplCommand<'_> {
    if line == "quit" || line == "exit" {
        return ReplCommand::Quit;
    }
    if line == "echo" {
        return ReplCommand::Echo("");
    }
    if let Some(text) = line.strip_prefix("echo ") {
        return ReplCommand::Echo(text);
    }
    if let Some((name, rest)) = line.split_once('=') {
        let name = name.trim();
        if is_param_name(name) {
            return ReplCommand::Convert {
                param: Some(name),
                human_time: rest.trim(),
            };
        }
    }
    ReplCommand::Convert {
        param: None,
        human_time: line,
    }
}

pub fn run_repl(
    converter: &TimestampConverter,
    default_param: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("epochtime v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Zone: {}", converter.zone().describe());
    println!("Type a timestamp (YYYY-MM-DD HH:MM:SS) to save it as `{}`", default_param);
    println!("Type `name = YYYY-MM-DD HH:MM:SS` to save under another name");
    println!("Type `echo text {{name}}` to print text with saved values substituted");
    println!("Type `quit` or press Ctrl-D to exit");

    let mut host = StdioHost::new();
    let mut editor = LineEditor::new(1024, 50);
    let mut terminal = StdioTerminal::new();

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        match editor.read_line(&mut terminal) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_line(trimmed) {
                    ReplCommand::Quit => break,
                    ReplCommand::Echo(text) => println!("{}", host.store().eval_string(text)),
                    ReplCommand::Convert { param, human_time } => {
                        converter.convert(&mut host, human_time, param.unwrap_or(default_param));
                    }
                }
            }
            Err(editline::Error::Eof) => {
                // EOF (Ctrl-D)
                println!("\nGoodbye!");
                break;
            }
            Err(editline::Error::Interrupted) => {
                // Ctrl-C - just continue
                println!("^C");
                continue;
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}
