//! Interactive console
//!
//! Line-oriented front end for [`Ide`]. Lines starting with `:` drive the
//! editor (open, save, run, switch language, ...); anything else is a
//! shell command for the embedded console. `:prev` / `:next` stand in for
//! the Up / Down keys: the recalled line becomes the pending input and an
//! empty line submits it.

use std::path::PathBuf;
use anyhow::{anyhow, Result};

use scribe_core::{Language, ScribeError};
use scribe_runner::Recall;

use crate::commands::format_highlights;
use crate::ide::Ide;

/// What the front end should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text
    Output(String),
    /// Nothing to print
    Empty,
    /// Leave the console
    Quit,
}

pub const HELP: &str = "\
:open PATH            load a file (relative to the project, if one is open)
:save                 save the buffer
:saveas PATH          save the buffer under a new name (same resolution)
:new                  start an empty buffer
:append TEXT          add a line to the buffer
:show                 print the buffer
:lang NAME            set the language (Python, JavaScript, TypeScript, C#)
:run                  run the buffer with the language's toolchain
:highlight            list highlight ranges of the buffer
:project new DIR      create a project with a src folder
:project open DIR     bind a project and list its sources
:prev / :next         recall console history (empty line runs it)
:history              list console history
:title                show the window title
:help                 this text
:quit                 leave
anything else         runs as a shell command";

/// Console front end state
pub struct Console {
    ide: Ide,
    pending: String,
}

impl Console {
    pub fn new(ide: Ide) -> Self {
        Self {
            ide,
            pending: String::new(),
        }
    }

    pub fn ide(&self) -> &Ide {
        &self.ide
    }

    /// Line recalled from history, waiting to be submitted
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Handle one input line
    pub async fn handle(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.is_empty() {
            if self.pending.is_empty() {
                return Ok(Reply::Empty);
            }
            let pending = std::mem::take(&mut self.pending);
            return Ok(Reply::Output(self.ide.execute(&pending).await?));
        }

        let Some(command) = line.strip_prefix(':') else {
            self.pending.clear();
            return Ok(Reply::Output(self.ide.execute(line).await?));
        };

        // Only the separator is dropped; `:append` keeps indentation
        let (name, raw_arg) = command.split_once(' ').unwrap_or((command, ""));
        let arg = raw_arg.trim();

        match name {
            "prev" | "next" => {
                let direction = if name == "prev" { Recall::Previous } else { Recall::Next };
                self.pending = self.ide.recall(direction).to_string();
                Ok(Reply::Output(format!("> {}", self.pending)))
            }
            "open" => {
                let path = required_path(arg, ":open PATH")?;
                self.ide.open_file(path).await?;
                Ok(Reply::Output(self.ide.session().title().to_string()))
            }
            "save" => match self.ide.save().await {
                Ok(()) => Ok(Reply::Output("saved".to_string())),
                Err(e) if matches!(
                    e.downcast_ref::<ScribeError>(),
                    Some(ScribeError::NoFilePath)
                ) =>
                {
                    Ok(Reply::Output("untitled buffer: use :saveas PATH".to_string()))
                }
                Err(e) => Err(e),
            },
            "saveas" => {
                let path = required_path(arg, ":saveas PATH")?;
                self.ide.save_as(path).await?;
                Ok(Reply::Output(self.ide.session().title().to_string()))
            }
            "new" => {
                self.ide.new_file();
                Ok(Reply::Output(self.ide.session().title().to_string()))
            }
            "append" => {
                let mut text = self.ide.text().to_string();
                text.push_str(raw_arg);
                text.push('\n');
                self.ide.edit(text);
                Ok(Reply::Empty)
            }
            "show" => Ok(Reply::Output(self.ide.text().to_string())),
            "lang" => {
                let language: Language = arg.parse()?;
                self.ide.set_language(language);
                Ok(Reply::Output(format!("language: {}", language)))
            }
            "run" => {
                let output = self.ide.run().await?;
                Ok(Reply::Output(output.text().to_string()))
            }
            "highlight" => {
                let rendered = format_highlights(self.ide.text(), self.ide.highlights());
                Ok(Reply::Output(rendered))
            }
            "project" => {
                let (action, dir) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
                let dir = required_path(dir.trim(), ":project new|open DIR")?;
                match action {
                    "new" => {
                        self.ide.new_project(dir).await?;
                        Ok(Reply::Output(self.ide.session().title().to_string()))
                    }
                    "open" => {
                        let sources = self.ide.open_project(dir.clone()).await?;
                        let mut out = self.ide.session().title().to_string();
                        for source in sources {
                            let shown = source.strip_prefix(&dir).unwrap_or(&source);
                            out.push_str(&format!("\n  {}", shown.display()));
                        }
                        Ok(Reply::Output(out))
                    }
                    _ => Err(anyhow!("usage: :project new|open DIR")),
                }
            }
            "history" => {
                let entries = self.ide.console().history().entries();
                Ok(Reply::Output(entries.join("\n")))
            }
            "title" => Ok(Reply::Output(self.ide.session().title().to_string())),
            "help" => Ok(Reply::Output(HELP.to_string())),
            "quit" | "q" | "exit" => Ok(Reply::Quit),
            other => Err(anyhow!("unknown command :{} (try :help)", other)),
        }
    }
}

fn required_path(arg: &str, usage: &str) -> Result<PathBuf> {
    if arg.is_empty() {
        Err(anyhow!("usage: {}", usage))
    } else {
        Ok(PathBuf::from(arg))
    }
}
