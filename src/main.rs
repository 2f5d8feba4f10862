use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use jiff::{Timestamp, tz::TimeZone};

use crate::{
    config::{STORE_PATH_ENV, Settings},
    escape::{Surface, escape_terminal},
    models::{
        admin::{AdminGate, GateError},
        notice::{Category, NoticeId},
        store::NoticeStore,
    },
    projector::{Filter, Projector},
    services::{
        admin::{LoginError, LoginParameters, load_gate, login, logout},
        export::{ExportTarget, export_notices},
        form::{NoticeForm, SubmitError, Submission},
        notices::{
            CreateNoticeError, DeleteNoticeError, UpdateNoticeError, ValidationError,
            delete_notice, load_notices,
        },
    },
    storage::{json::JsonFileStorage, session::JsonSessionFile},
};

mod config;
mod escape;
mod html;
mod logging;
mod models;
mod projector;
mod services;
mod storage;
mod ui;

#[derive(Parser)]
#[command(
    name = "notices",
    about = "A small community notice board for your terminal"
)]
struct Cli {
    /// Use this notice store instead of the one in the local data directory
    #[arg(long, global = true, env = STORE_PATH_ENV)]
    store: Option<PathBuf>,

    /// Print diagnostics to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current notices: all, announcement, event, alert or general
    List {
        #[arg(default_value = "all")]
        filter: Filter,
    },

    /// Print current notices as HTML cards
    Render {
        #[arg(default_value = "all")]
        filter: Filter,
    },

    /// Post a new notice (admin only)
    Add {
        /// Notice title
        #[arg(short, long)]
        title: String,

        /// Notice body
        #[arg(short, long)]
        message: String,

        /// announcement, event, alert or general
        #[arg(short, long, default_value = "announcement")]
        category: Category,

        /// Hide the notice after this date (YYYY-MM-DD)
        #[arg(short, long)]
        expiry: Option<String>,

        /// Who is posting (defaults to "Admin")
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Change an existing notice (admin only)
    Edit {
        /// Notice id, as shown by `notices list` in admin mode
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New body
        #[arg(short, long)]
        message: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<Category>,

        /// New expiry date (YYYY-MM-DD)
        #[arg(short, long)]
        expiry: Option<String>,

        /// Remove the expiry date
        #[arg(long, conflicts_with = "expiry")]
        no_expiry: bool,

        /// New author
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Remove a notice (admin only)
    Delete {
        /// Notice id, as shown by `notices list` in admin mode
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Unlock admin mode
    Login {
        /// Password to use instead of prompting for it
        #[arg(long)]
        password: Option<String>,
    },

    /// Leave admin mode
    Logout,

    /// Save every notice as indented JSON
    Export {
        /// Output file, `-` for stdout [default: notices.json]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(message: &str) -> bool {
    match prompt(message) {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn exit_with_gate_error(error: &GateError) -> ! {
    match error {
        GateError::NotAuthenticated => {
            eprintln!("Error: Admin login required");
            eprintln!("\nRun `notices login` first.");
        }
        GateError::IncorrectPassword => {
            eprintln!("Error: Incorrect password");
        }
    }
    std::process::exit(1);
}

fn exit_with_validation_error(error: &ValidationError) -> ! {
    match error {
        ValidationError::MissingTitleOrMessage => {
            eprintln!("Error: Please enter title and message.");
        }
        ValidationError::InvalidExpiry(date_str, error) => {
            eprintln!("Error: Invalid expiry date '{}': {}", date_str, error);
            eprintln!("\nExpected format: YYYY-MM-DD (e.g., 2025-11-25)");
        }
    }
    std::process::exit(1);
}

fn submit_form(
    form: &mut NoticeForm,
    store: &mut NoticeStore,
    storage: &JsonFileStorage,
    gate: &AdminGate,
) {
    match form.submit(store, storage, gate) {
        Ok(Submission::Created(notice)) => {
            println!("✓ Notice posted: {}", escape_terminal(&notice.title));
            println!("  {}", escape_terminal(notice.id.as_str()));
        }
        Ok(Submission::Updated(notice)) => {
            println!("✓ Notice updated: {}", escape_terminal(&notice.title));
            println!("  {}", escape_terminal(notice.id.as_str()));
        }
        Ok(Submission::Missing(id)) => {
            println!(
                "No notice with id '{}'; nothing changed.",
                escape_terminal(id.as_str())
            );
        }
        Err(SubmitError::Gate(e))
        | Err(SubmitError::Create(CreateNoticeError::Gate(e)))
        | Err(SubmitError::Update(UpdateNoticeError::Gate(e))) => exit_with_gate_error(&e),
        Err(SubmitError::Validation(e))
        | Err(SubmitError::Create(CreateNoticeError::Validation(e)))
        | Err(SubmitError::Update(UpdateNoticeError::Validation(e))) => {
            exit_with_validation_error(&e)
        }
        Err(SubmitError::Create(CreateNoticeError::Storage(e)))
        | Err(SubmitError::Update(UpdateNoticeError::Storage(e))) => {
            eprintln!("Error: Failed to save notice: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let settings = Settings::resolve(cli.store);
    if let Err(e) = settings.ensure_data_dir() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    tracing::debug!(store = %settings.store_path.display(), "resolved settings");

    let storage = JsonFileStorage::new(settings.store_path.clone());
    let sessions = JsonSessionFile::new(settings.session_path.clone());

    let mut store = match load_notices(&storage) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Failed to load notices: {}", e);
            std::process::exit(1);
        }
    };

    let mut gate = match load_gate(&sessions) {
        Ok(gate) => gate,
        Err(e) => {
            eprintln!("Error: Failed to load admin session: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::List {
        filter: Filter::All,
    }) {
        Commands::List { filter } => {
            let projector = Projector::new(Surface::Terminal, TimeZone::system());
            let view = projector.project(&store, filter, Timestamp::now(), &gate);
            ui::render_board(&view, filter, gate.is_authenticated());
        }
        Commands::Render { filter } => {
            let board = html::render_board(
                &store,
                filter,
                Timestamp::now(),
                &gate,
                TimeZone::system(),
            );
            print!("{}", board);
        }
        Commands::Add {
            title,
            message,
            category,
            expiry,
            author,
        } => {
            let mut form = NoticeForm {
                category,
                title,
                message,
                expiry: expiry.unwrap_or_default(),
                author: author.unwrap_or_default(),
                ..NoticeForm::new()
            };
            submit_form(&mut form, &mut store, &storage, &gate);
        }
        Commands::Edit {
            id,
            title,
            message,
            category,
            expiry,
            no_expiry,
            author,
        } => {
            if let Err(e) = gate.require() {
                exit_with_gate_error(&e);
            }

            let id = NoticeId::from(id);
            let Some(notice) = store.get(&id) else {
                println!(
                    "No notice with id '{}'; nothing changed.",
                    escape_terminal(id.as_str())
                );
                return;
            };

            let mut form = NoticeForm::edit(notice);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(message) = message {
                form.message = message;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(expiry) = expiry {
                form.expiry = expiry;
            }
            if no_expiry {
                form.expiry.clear();
            }
            if let Some(author) = author {
                form.author = author;
            }
            submit_form(&mut form, &mut store, &storage, &gate);
        }
        Commands::Delete { id, yes } => {
            if let Err(e) = gate.require() {
                exit_with_gate_error(&e);
            }

            let id = NoticeId::from(id);
            let Some(notice) = store.get(&id) else {
                println!(
                    "No notice with id '{}'; nothing changed.",
                    escape_terminal(id.as_str())
                );
                return;
            };

            let question = format!("Delete '{}'? [y/N] ", escape_terminal(&notice.title));
            if !yes && !confirm(&question) {
                println!("Nothing deleted.");
                return;
            }

            match delete_notice(&mut store, &storage, &gate, &id) {
                Ok(Some(notice)) => {
                    println!("✓ Notice deleted: {}", escape_terminal(&notice.title));
                }
                Ok(None) => {
                    println!(
                        "No notice with id '{}'; nothing changed.",
                        escape_terminal(id.as_str())
                    );
                }
                Err(DeleteNoticeError::Gate(e)) => exit_with_gate_error(&e),
                Err(DeleteNoticeError::Storage(e)) => {
                    eprintln!("Error: Failed to delete notice: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Login { password } => {
            if gate.is_authenticated() {
                println!("Already in admin mode");
                return;
            }

            let attempt = match password {
                Some(password) => password,
                None => match prompt("Admin password: ") {
                    Ok(attempt) => attempt,
                    Err(e) => {
                        eprintln!("Error: Failed to read password: {}", e);
                        std::process::exit(1);
                    }
                },
            };

            let params = LoginParameters {
                attempt,
                password: settings.admin_password.clone(),
            };
            match login(&mut gate, &sessions, params) {
                Ok(()) => {
                    println!("✓ Admin mode unlocked");
                    println!("  Notices now show their edit and delete commands.");
                }
                Err(LoginError::Gate(e)) => exit_with_gate_error(&e),
                Err(LoginError::Storage(e)) => {
                    eprintln!("Error: Failed to save admin session: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Logout => {
            if let Err(e) = logout(&mut gate, &sessions) {
                eprintln!("Error: Failed to save admin session: {}", e);
                std::process::exit(1);
            }
            println!("✓ Logged out of admin mode");
        }
        Commands::Export { output } => {
            let target = ExportTarget::from_arg(output);
            if let Err(e) = export_notices(&store, &target) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            if let ExportTarget::File(path) = target {
                println!("✓ Exported {} notices to {}", store.len(), path.display());
            }
        }
    }
}
