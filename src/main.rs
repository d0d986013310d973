//! Scribe - minimal code editor
//!
//! Without arguments starts the interactive console; otherwise runs one of
//! the one-shot commands.

use std::path::PathBuf;
use anyhow::{anyhow, bail, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scribe::commands::{HighlightCommand, NewProjectCommand, RunCommand, ToolchainsCommand};
use scribe::core::{AppConfig, Language, APP_NAME};
use scribe::{Console, Ide, Reply, VERSION};

const USAGE: &str = "\
usage: scribe [COMMAND]

commands:
  run FILE [--lang NAME]        run a source file and print its output
  highlight FILE [--lang NAME]  print the highlight ranges of a file
  new-project DIR               create a project with a src folder
  toolchains                    show which toolchains are installed
  help                          this text

Without a command the interactive console starts.";

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("{} v{} starting...", APP_NAME, VERSION);

    let config = match AppConfig::load().await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        return repl(config).await;
    };

    match command.as_str() {
        "run" => {
            let (path, language) = file_args(rest)?;
            print!("{}", RunCommand { path, language }.execute(&config).await?);
        }
        "highlight" => {
            let (path, language) = file_args(rest)?;
            print!("{}", HighlightCommand { path, language }.execute(&config).await?);
        }
        "new-project" => {
            let [dir] = rest else {
                bail!("usage: scribe new-project DIR");
            };
            let project = NewProjectCommand { path: PathBuf::from(dir) }.execute().await?;
            println!("created {}", project.src_dir().display());
        }
        "toolchains" => print!("{}", ToolchainsCommand.execute(&config)?),
        "help" | "-h" | "--help" => println!("{}", USAGE),
        "-V" | "--version" => println!("{} {}", APP_NAME, VERSION),
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }

    Ok(())
}

/// Parse `FILE [--lang NAME]`
fn file_args(args: &[String]) -> Result<(PathBuf, Option<Language>)> {
    match args {
        [file] => Ok((PathBuf::from(file), None)),
        [file, flag, name] if flag == "--lang" => Ok((PathBuf::from(file), Some(name.parse()?))),
        _ => Err(anyhow!("expected FILE [--lang NAME]")),
    }
}

/// Interactive console on stdin/stdout
async fn repl(config: AppConfig) -> Result<()> {
    let mut console = Console::new(Ide::new(config));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("{} v{} - :help for commands", APP_NAME, VERSION);

    loop {
        let prompt = format!("{}> {}", console.ide().session().language(), console.pending());
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match console.handle(&line).await {
            Ok(Reply::Output(text)) if text.ends_with('\n') => print!("{}", text),
            Ok(Reply::Output(text)) => println!("{}", text),
            Ok(Reply::Empty) => {}
            Ok(Reply::Quit) => break,
            Err(e) => eprintln!("error: {:#}", e),
        }
    }

    if let Err(e) = console.ide().config().save().await {
        warn!("Failed to save configuration: {}", e);
    }

    Ok(())
}
