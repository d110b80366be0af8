//! InsightX CLI
//!
//! Terminal front-end for the InsightX analytics service:
//! - Chat with the question-answering backend
//! - Show the transaction dashboard
//! - Inspect or reset the local session and history

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};

use insightx::api::HttpClient;
use insightx::chat::SUGGESTED_QUESTIONS;
use insightx::config::{generate_default_config, Config};
use insightx::dashboard::{DashboardLoader, DashboardView, LoadState, SectionCard, DATASET_CAPTION};
use insightx::render::{typing_indicator_plain, MessageView};
use insightx::shell::{Shell, Tab, FOOTER_CAPTION};
use insightx::store::FileStore;
use insightx::{Message, QaClient, SendOutcome};

#[derive(Parser)]
#[command(name = "insightx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ask questions about UPI transactions and browse the InsightX dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Question-answering service URL
    #[arg(long, global = true)]
    pub qa_url: Option<String>,

    /// Dashboard API URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding the session and history
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat (default)
    Chat,

    /// Ask a single question
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Show the transaction dashboard
    Dashboard {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the stored conversation
    History,

    /// Clear the stored conversation
    Clear {
        /// Also reset the conversation memory on the server
        #[arg(long)]
        remote: bool,
    },

    /// Print the session id
    Session,

    /// Check backend connectivity
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.qa_url {
        config.endpoints.qa_url = url;
    }
    if let Some(url) = cli.api_url {
        config.endpoints.api_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    insightx::logging::init(&config.logging);
    tracing::debug!("InsightX CLI v{}", env!("CARGO_PKG_VERSION"));

    let command = cli.command.unwrap_or(Commands::Chat);
    if let Commands::Config { output } = command {
        return write_default_config(output.as_deref());
    }

    run(command, &config).await
}

async fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    let client = HttpClient::new(config.http_client_config())?;
    let store = FileStore::in_dir(config.data_dir());
    let mut shell = Shell::init(store);

    match command {
        Commands::Chat => run_chat(&mut shell, &client).await?,

        Commands::Ask { question } => {
            let question = question.join(" ");
            let chat = shell.chat_mut();
            let outcome = chat.send(&client, Some(question.as_str())).await;
            let reply = ask_reply(&outcome, chat.messages())?;
            println!("{}", reply);
        }

        Commands::Dashboard { format } => {
            let mut loader = DashboardLoader::new();
            let state = loader.load(&client).await;
            print_dashboard(state, format)?;
        }

        Commands::History => {
            let messages = shell.chat().messages();
            if messages.is_empty() {
                println!("No messages yet.");
            }
            for message in messages {
                println!("{}\n", MessageView::of(message).to_plain());
            }
        }

        Commands::Clear { remote } => {
            let count = shell.chat().messages().len();
            shell.clear_chat();
            println!("Cleared {} messages.", count);

            if remote {
                match client.clear_session(shell.session_id()).await {
                    Ok(()) => println!("Server session reset."),
                    Err(e) => eprintln!("Server session not reset: {}", e),
                }
            }
        }

        Commands::Session => println!("{}", shell.session_id()),

        Commands::Status => {
            let http = client.config();
            println!("InsightX v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("QA endpoint:   {}", http.qa_url);
            println!("API endpoint:  {}", http.dashboard_url);
            println!("Data dir:      {}", config.storage.data_dir);
            println!("Session:       {}", shell.session_id());
            println!("Messages:      {}", shell.chat().messages().len());
            println!();

            match client.health().await {
                Ok(health) if health.is_ok() => println!("Backend: ok ({})", health.message),
                Ok(health) => println!("Backend: {} ({})", health.status, health.message),
                Err(e) => {
                    eprintln!("Cannot connect to InsightX at {}", http.qa_url);
                    eprintln!("Error: {}", e);
                }
            }
        }

        Commands::Config { output } => write_default_config(output.as_deref())?,
    }

    Ok(())
}

/// The reply appended by a one-shot `ask`
fn ask_reply<'a>(outcome: &SendOutcome, messages: &'a [Message]) -> anyhow::Result<&'a str> {
    match outcome {
        SendOutcome::Answered | SendOutcome::Fallback => messages
            .last()
            .map(|m| m.content.as_str())
            .context("no reply recorded"),
        SendOutcome::Empty => anyhow::bail!("question is empty"),
        SendOutcome::Busy | SendOutcome::Stale => anyhow::bail!("question was not sent"),
    }
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn run_chat(shell: &mut Shell<FileStore>, client: &HttpClient) -> anyhow::Result<()> {
    println!("InsightX chat · session {}", shell.session_id());
    println!("Commands: /clear  /dashboard  /quit");
    println!();

    for message in shell.chat().messages() {
        println!("{}\n", MessageView::of(message).to_plain());
    }
    if shell.chat().messages().is_empty() {
        println!("Try asking:");
        for (i, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
            println!("  {}. {}", i + 1, question);
        }
        println!();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "/quit" | "/exit" => break,
            "/clear" => {
                shell.clear_chat();
                println!("Conversation cleared.\n");
                continue;
            }
            "/dashboard" => {
                shell.select_tab(Tab::Dashboard);
                let mut loader = DashboardLoader::new();
                let state = loader.load(client).await;
                print_dashboard(state, OutputFormat::Table)?;
                shell.select_tab(Tab::Chat);
                continue;
            }
            _ => {}
        }

        let text = suggestion(line, shell.chat().messages().is_empty()).unwrap_or(line);
        let Some(pending) = shell.chat_mut().begin_send(Some(text)) else {
            continue;
        };
        if text != line {
            println!("{}", MessageView::of(&Message::user(text)).to_plain());
        }

        print!("{}", typing_indicator_plain());
        std::io::stdout().flush()?;

        let request = pending.request().clone();
        tokio::select! {
            outcome = client.ask(&request) => {
                print!("\r\x1b[2K");
                shell.chat_mut().complete(pending, outcome);
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                shell.shutdown();
                break;
            }
        }

        if let Some(reply) = shell.chat().history().last() {
            println!("{}\n", MessageView::of(reply).to_plain());
        }
    }

    println!("{}", FOOTER_CAPTION);
    Ok(())
}

/// `1`-`4` pick a suggested question while the conversation is empty
fn suggestion(line: &str, empty: bool) -> Option<&'static str> {
    if !empty {
        return None;
    }
    let index: usize = line.parse().ok()?;
    SUGGESTED_QUESTIONS.get(index.checked_sub(1)?).copied()
}

fn print_dashboard(state: &LoadState, format: OutputFormat) -> anyhow::Result<()> {
    let Some(data) = state.data() else {
        println!("Loading...");
        return Ok(());
    };

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    let view = DashboardView::build(data);
    println!("Transaction Analytics");
    println!("{}", DATASET_CAPTION);
    println!();

    for card in &view.stats {
        println!("{} {:<20} {:>12}   {}", card.icon, card.title, card.value, card.subtitle);
    }

    for section in view.sections() {
        println!();
        print_section(section);
    }

    let missing = data.missing();
    if !missing.is_empty() {
        println!();
        eprintln!("Unavailable: {}", missing.join(", "));
    }
    Ok(())
}

const BAR_WIDTH: u32 = 30;

fn print_section(section: &SectionCard) {
    println!("{}  ({})", section.title, section.subtitle);
    println!("{}", "-".repeat(60));

    if section.rows.is_empty() {
        println!("  {}", insightx::dashboard::PLACEHOLDER);
        return;
    }

    for row in &section.rows {
        let filled = (row.percent * BAR_WIDTH / 100) as usize;
        println!(
            "  {:<18} {:<30} {:>10}",
            row.label,
            "█".repeat(filled),
            row.display_value()
        );
    }
}
