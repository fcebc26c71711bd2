mod auth;
mod config;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};

use quiz_core::{QuizSession, ScoreStore, SessionOptions, Subject, User, UserStore};
use quiz_store::SqliteStore;

use crate::auth::{hash_password, verify_password, MIN_PASSWORD_LEN};
use crate::config::{load_config, show_config_path, Config};

#[derive(Parser)]
#[command(
    name = "calcquiz",
    version,
    about = "Level 3 calculus revision — practice quizzes with score history"
)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Display name (prompted if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Login name (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Run a practice quiz
    Practice {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Quiz subject
        #[arg(short, long)]
        subject: CliSubject,

        /// Questions in this run (default from config)
        #[arg(short, long)]
        questions: Option<usize>,
    },

    /// Show your score history
    Scores {
        /// Login name
        #[arg(short, long)]
        username: String,
    },

    /// Per-subject summary of your results
    Stats {
        /// Login name
        #[arg(short, long)]
        username: String,
    },

    /// List the available subjects
    Subjects,

    /// Show the answer-format guidelines
    Guidelines,

    /// Show current configuration
    Config,
}

#[derive(Clone, ValueEnum)]
enum CliSubject {
    Surds,
    Complex,
    Polynomials,
    Differentiation,
}

impl From<CliSubject> for Subject {
    fn from(val: CliSubject) -> Self {
        match val {
            CliSubject::Surds => Subject::Surds,
            CliSubject::Complex => Subject::Complex,
            CliSubject::Polynomials => Subject::Polynomials,
            CliSubject::Differentiation => Subject::Differentiation,
        }
    }
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("nz", "calcquiz", "calcquiz")
        .map(|dirs| dirs.data_dir().join("quiz.db"))
        .unwrap_or_else(|| PathBuf::from("quiz.db"))
}

fn open_store(db: Option<PathBuf>, config: &Config) -> Result<SqliteStore> {
    let path = db
        .or_else(|| config.store.path.as_ref().map(PathBuf::from))
        .unwrap_or_else(default_db_path);
    tracing::debug!(path = %path.display(), "opening store");
    SqliteStore::new(&path).context("failed to open database")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config()?;
    let store = open_store(cli.db, &config)?;

    match cli.command {
        Commands::Register { name, username } => cmd_register(&store, name, username),
        Commands::Practice {
            username,
            subject,
            questions,
        } => cmd_practice(&store, &config, &username, subject.into(), questions),
        Commands::Scores { username } => cmd_scores(&store, &username),
        Commands::Stats { username } => cmd_stats(&store, &username),
        Commands::Subjects => cmd_subjects(),
        Commands::Guidelines => cmd_guidelines(),
        Commands::Config => cmd_config(&config),
    }
}

// ---------------------------------------------------------------------------
// Account commands
// ---------------------------------------------------------------------------

fn cmd_register(store: &SqliteStore, name: Option<String>, username: Option<String>) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => prompt_line("Name: ")?,
    };
    if name.is_empty() {
        bail!("please enter your name");
    }

    let username = match username {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    if username.is_empty() {
        bail!("please enter your desired username");
    }
    if store.find_by_username(&username)?.is_some() {
        bail!("this username has been taken");
    }

    let password = rpassword::prompt_password_stdout("Password (8+ characters): ")?;
    if password.len() < MIN_PASSWORD_LEN {
        bail!("your password is shorter than {MIN_PASSWORD_LEN} characters");
    }
    let confirm = rpassword::prompt_password_stdout("Confirm password: ")?;
    if password != confirm {
        bail!("passwords do not match");
    }

    let user = User::new(name, username.clone(), hash_password(&password));
    store.add_user(&user)?;

    println!("You have successfully registered your account, {username}.");
    Ok(())
}

fn login(store: &SqliteStore, username: &str) -> Result<User> {
    let user = store
        .find_by_username(username)?
        .ok_or_else(|| anyhow!("incorrect username or password"))?;

    let password = rpassword::prompt_password_stdout("Password: ")?;
    if !verify_password(&password, &user.password_hash) {
        bail!("incorrect username or password");
    }
    Ok(user)
}

// ---------------------------------------------------------------------------
// Quiz commands
// ---------------------------------------------------------------------------

fn cmd_practice(
    store: &SqliteStore,
    config: &Config,
    username: &str,
    subject: Subject,
    questions: Option<usize>,
) -> Result<()> {
    let user = login(store, username)?;

    let options = SessionOptions {
        questions: questions.unwrap_or(config.quiz.questions),
        surd_terms: config.quiz.surd_terms,
    };
    let session = QuizSession::start(subject, &options)?;

    println!("Welcome {}. Subject: {}.", user.name, subject.title());
    println!("Answer each question, then press enter. See `calcquiz guidelines` for notation.");

    let mut score = 0;
    for index in 0..session.len() {
        let prompt = session
            .prompt(index)
            .ok_or_else(|| anyhow!("question {index} missing"))?;
        println!("\n[{}/{}] {}", index + 1, session.len(), prompt);

        let response = read_answer()?;
        let verdict = session.check(index, &response)?;
        if verdict.correct {
            score += 1;
            println!("You are correct");
        } else {
            println!("You are incorrect. The answer was {}", verdict.expected);
        }
    }

    println!("\nYou have scored {score} out of {}", session.len());

    let today = Local::now().date_naive();
    store.record_score(&session.score_record(&user.id, today, score))?;
    println!("Score saved.");
    Ok(())
}

fn cmd_scores(store: &SqliteStore, username: &str) -> Result<()> {
    let user = login(store, username)?;
    let scores = store.scores_for_user(&user.id)?;

    if scores.is_empty() {
        println!("No scores yet. Run `calcquiz practice` to take a quiz.");
        return Ok(());
    }

    println!("{:<18} {:>5}  Date", "Subject", "Score");
    println!("{}", "-".repeat(37));
    for record in &scores {
        println!(
            "{:<18} {:>5}  {}",
            record.subject.title(),
            record.score,
            record.date
        );
    }
    Ok(())
}

fn cmd_stats(store: &SqliteStore, username: &str) -> Result<()> {
    let user = login(store, username)?;
    let scores = store.scores_for_user(&user.id)?;

    if scores.is_empty() {
        println!("No scores yet.");
        return Ok(());
    }

    println!("{:<18} {:>7} {:>6} {:>8}", "Subject", "Quizzes", "Best", "Average");
    println!("{}", "-".repeat(42));
    for subject in Subject::ALL {
        let taken: Vec<u32> = scores
            .iter()
            .filter(|r| r.subject == subject)
            .map(|r| r.score)
            .collect();
        if taken.is_empty() {
            continue;
        }
        let best = taken.iter().max().copied().unwrap_or(0);
        let avg = taken.iter().sum::<u32>() as f64 / taken.len() as f64;
        println!(
            "{:<18} {:>7} {:>6} {:>8.2}",
            subject.title(),
            taken.len(),
            best,
            avg
        );
    }
    Ok(())
}

fn cmd_subjects() -> Result<()> {
    println!("{:<18} Id", "Subject");
    println!("{}", "-".repeat(30));
    for subject in Subject::ALL {
        println!("{:<18} {}", subject.title(), subject);
    }
    Ok(())
}

fn cmd_guidelines() -> Result<()> {
    println!(
        "\
How to enter answers:

  1) Powers are written as x^(y)
  2) Square roots, logs and ln are sqrt(x), log(b)(x), ln(x)
  3) For division, bracket numerator and denominator, e.g. (x-y)/(x+y)
  4) For polynomials, write the quotient, then r, then the remainder, e.g. ax+brc
  5) For sin, cos, tan the answer has the form a*sin(b)
  6) Decimals are rounded to 2 d.p.

Example answers:
  Surds            48*sqrt(2)
  Complex Numbers  5.00 + 5.00i  or  5.00*cis(0.50)
  Polynomials      5.00x+5.00r5.00
  Differentiation  5*sec^2(5t)"
    );
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    let db = config
        .store
        .path
        .clone()
        .unwrap_or_else(|| default_db_path().display().to_string());
    println!("Config file: {}", show_config_path());
    println!("Database:    {db}");
    println!("Questions:   {}", config.quiz.questions);
    println!("Surd terms:  {}", config.quiz.surd_terms);
    Ok(())
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        bail!("unexpected end of input");
    }
    Ok(line.trim().to_string())
}

/// Keep prompting until the user enters something non-empty.
fn read_answer() -> Result<String> {
    loop {
        let line = prompt_line("> ")?;
        if line.is_empty() {
            println!("Please do not leave the answer empty");
            continue;
        }
        return Ok(line);
    }
}
