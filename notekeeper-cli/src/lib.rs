pub mod settings;
pub mod shell;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use log::info;
use notekeeper_core::{
    ApiClient, AuthContext, ContactMessage, Credentials, ManagerOptions, NoteManager,
    NotekeeperError, NotesApi, Result, TagSplit,
};

use settings::AppSettings;
use shell::Shell;

#[derive(Debug, Parser)]
#[command(name = "notekeeper", version, about = "Manage your notes from the terminal")]
pub struct Cli {
    /// Base URL of the notes service.
    #[arg(long, env = "NOTEKEEPER_SERVER")]
    pub server: Option<String>,

    /// Account to log in with.
    #[arg(long, short)]
    pub user: Option<String>,

    /// Drop empty tags instead of keeping them.
    #[arg(long)]
    pub drop_empty_tags: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive notes shell (the default).
    Shell,
    /// Create an account.
    Signup { username: String },
    /// Send a message to the site operators.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        message: String,
    },
    /// Store the current --server/--user/--drop-empty-tags as defaults.
    Configure,
}

/// Applies command-line overrides on top of the stored settings.
pub fn effective_settings(cli: &Cli, stored: AppSettings) -> AppSettings {
    let mut settings = stored;
    if let Some(server) = &cli.server {
        settings.server_url = server.clone();
    }
    if let Some(user) = &cli.user {
        settings.username = Some(user.clone());
    }
    if cli.drop_empty_tags {
        settings.tag_split = TagSplit::DropEmpty;
    }
    settings
}

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let settings = effective_settings(&cli, settings::load_settings());
    info!("Using server {}", settings.server_url);

    match &cli.command {
        Some(Commands::Configure) => {
            settings::save_settings(&settings)?;
            println!("Saved settings to {}", settings::settings_file_path().display());
            Ok(())
        }
        Some(Commands::Signup { username }) => {
            let client = ApiClient::new(&settings.client_config())?;
            let password = read_password()?;
            let user = client.signup(&Credentials::new(username.clone(), password))?;
            println!("Account {} created. You can now log in.", user.username);
            Ok(())
        }
        Some(Commands::Contact { name, email, subject, message }) => {
            let client = ApiClient::new(&settings.client_config())?;
            client.send_contact(&ContactMessage {
                name: name.clone(),
                email: email.clone(),
                subject: subject.clone(),
                message: message.clone(),
            })?;
            println!("Message sent successfully!");
            Ok(())
        }
        Some(Commands::Shell) | None => run_shell(&settings),
    }
}

fn run_shell(settings: &AppSettings) -> Result<()> {
    let client = ApiClient::new(&settings.client_config())?;
    info!("Opening shell against {}", client.base_url());
    let auth = authenticate(&client, settings)?;
    let options = ManagerOptions {
        tag_split: settings.tag_split,
    };
    let mut manager = NoteManager::with_options(client.clone(), auth, options);
    if let Some(user) = manager.auth().user() {
        println!("Logged in as {}. Type `help` for commands.", user.username);
    }
    initial_load(&mut manager, &mut io::stderr())?;

    let stdin = io::stdin();
    let mut shell = Shell::new(manager, client, stdin.lock(), io::stdout());
    shell.run()
}

/// Fetches the notes once before the shell starts. A failure is written to
/// `err` and its notice cleared, so the shell does not print it again.
fn initial_load<A: NotesApi>(manager: &mut NoteManager<A>, err: &mut impl Write) -> Result<()> {
    if let Err(e) = manager.load() {
        writeln!(err, "! {}", e.user_message())?;
        manager.clear_notice();
    }
    Ok(())
}

/// Resumes an existing session or logs in with the configured username.
fn authenticate(client: &ApiClient, settings: &AppSettings) -> Result<AuthContext> {
    let existing = client.check_session()?;
    if existing.is_authenticated() {
        return Ok(existing);
    }
    let Some(username) = settings.username.clone() else {
        return Err(NotekeeperError::Validation(
            "No username configured; pass --user or run `notekeeper --user <name> configure`"
                .to_string(),
        ));
    };
    let password = read_password()?;
    client.login(&Credentials::new(username, password))
}

/// Takes the password from `NOTEKEEPER_PASSWORD`, or asks on the terminal.
fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var("NOTEKEEPER_PASSWORD") {
        return Ok(password);
    }
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
