use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use dotenv::dotenv;

use mailmind::agent::Agent;
use mailmind::ingestion::run_ingestion;
use mailmind::mailbox::{FileMailbox, Mailbox, INBOX_FILE};
use mailmind::models::Email;
use mailmind::prompts::PromptSet;
use mailmind::storage::draft_store::DRAFT_FILE;
use mailmind::storage::processed_store::PROCESSED_FILE;
use mailmind::storage::prompt_store::PROMPT_FILE;
use mailmind::storage::{
    self, DraftStore, FileDraftStore, FilePromptStore, FileProcessedStore, PromptStore,
};

#[derive(Parser)]
#[command(name = "mailmind")]
#[command(about = "Email productivity agent: categorize, extract tasks, draft replies", version)]
struct Cli {
    /// Directory holding the inbox, prompts, drafts and processed results
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Owner identity tagged onto saved drafts
    #[arg(long, global = true, default_value = "local")]
    owner: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the emails in the inbox
    Inbox,
    /// Apply an instruction to one email (empty instruction summarizes)
    Run {
        /// Email id from the inbox
        id: String,
        /// Free-form instruction, e.g. "what are my tasks" or
        /// "draft a reply tone: friendly"
        #[arg(default_value = "")]
        instruction: String,
        /// Persist a produced draft for later review
        #[arg(long)]
        save_draft: bool,
    },
    /// Categorize and extract actions for every unprocessed email
    Ingest,
    /// Manage the instruction templates
    Prompts {
        #[command(subcommand)]
        action: PromptsAction,
    },
    /// List saved drafts
    Drafts,
}

#[derive(Subcommand)]
enum PromptsAction {
    /// Print the current templates
    Show,
    /// Restore the default templates
    Reset,
    /// Replace one template
    Set { key: String, text: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => storage::default_data_dir()?,
    };

    match cli.command {
        Commands::Inbox => list_inbox(&data_dir),
        Commands::Run {
            id,
            instruction,
            save_draft,
        } => run_instruction(&data_dir, &cli.owner, &id, &instruction, save_draft).await,
        Commands::Ingest => ingest(&data_dir),
        Commands::Prompts { action } => manage_prompts(&data_dir, action),
        Commands::Drafts => list_drafts(&data_dir),
    }
}

fn list_inbox(data_dir: &PathBuf) -> Result<()> {
    let inbox = FileMailbox::new(data_dir.join(INBOX_FILE)).fetch()?;
    if inbox.is_empty() {
        println!("{}", style("Inbox is empty").dim());
        return Ok(());
    }
    for email in &inbox {
        println!(
            "{}  {}  {}",
            style(&email.id).cyan(),
            style(&email.sender).dim(),
            email.subject
        );
    }
    Ok(())
}

async fn run_instruction(
    data_dir: &PathBuf,
    owner: &str,
    id: &str,
    instruction: &str,
    save_draft: bool,
) -> Result<()> {
    let email = find_email(data_dir, id)?;
    let prompts = FilePromptStore::new(data_dir.join(PROMPT_FILE)).load()?;
    let agent = Agent::from_env();
    if !agent.is_online() {
        println!("{}", style("No backend configured, using offline rules").dim());
    }

    let response = agent.reply(&email, instruction, &prompts).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if save_draft {
        match response.draft {
            Some(draft) => {
                let record = FileDraftStore::new(data_dir.join(DRAFT_FILE)).save(draft, owner)?;
                println!("{} {}", style("Saved draft").green(), record.id);
            }
            None => println!("{}", style("No draft in response; nothing saved").yellow()),
        }
    }
    Ok(())
}

fn find_email(data_dir: &PathBuf, id: &str) -> Result<Email> {
    let inbox = FileMailbox::new(data_dir.join(INBOX_FILE)).fetch()?;
    inbox
        .into_iter()
        .find(|email| email.id == id)
        .with_context(|| format!("No email with id {id}"))
}

fn ingest(data_dir: &PathBuf) -> Result<()> {
    let mailbox = FileMailbox::new(data_dir.join(INBOX_FILE));
    let store = FileProcessedStore::new(data_dir.join(PROCESSED_FILE));
    let prompts = FilePromptStore::new(data_dir.join(PROMPT_FILE)).load()?;

    let processed = run_ingestion(&mailbox, &store, &prompts)?;
    println!("Processed {} emails", processed.len());
    for (id, entry) in &processed {
        println!(
            "{}  {}  {} action(s)",
            style(id).cyan(),
            entry.category,
            entry.actions.len()
        );
    }
    Ok(())
}

fn manage_prompts(data_dir: &PathBuf, action: PromptsAction) -> Result<()> {
    let store = FilePromptStore::new(data_dir.join(PROMPT_FILE));
    match action {
        PromptsAction::Show => {
            print!("{}", store.load()?);
        }
        PromptsAction::Reset => {
            store.reset()?;
            println!("{}", style("Prompts restored to defaults").green());
        }
        PromptsAction::Set { key, text } => {
            let mut prompts = store.load()?;
            match key.as_str() {
                "categorization" => prompts.categorization = text,
                "action_item" => prompts.action_item = text,
                "auto_reply" => prompts.auto_reply = text,
                "tone_instructions" => prompts.tone_instructions = text,
                other => anyhow::bail!(
                    "Unknown prompt key '{other}' (expected categorization, action_item, auto_reply, or tone_instructions)"
                ),
            }
            store.save(&prompts)?;
            println!("{} {}", style("Updated").green(), key);
        }
    }
    Ok(())
}

fn list_drafts(data_dir: &PathBuf) -> Result<()> {
    let drafts = FileDraftStore::new(data_dir.join(DRAFT_FILE)).list()?;
    if drafts.is_empty() {
        println!("{}", style("No saved drafts").dim());
        return Ok(());
    }
    for record in &drafts {
        println!(
            "{}  {}  {}",
            style(&record.id).cyan(),
            style(record.created_at.to_rfc3339()).dim(),
            record.subject
        );
    }
    Ok(())
}
