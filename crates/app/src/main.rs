mod interactive;
mod report;

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use scorecard_core::model::{DraftId, HistoryId, InterviewSettings, RecommendationFilter, RoleLevel};
use services::{
    AppServices, BankSource, Clock, DEFAULT_REVIEW_LIMIT, HistoryQuery, InterviewSession,
    QuestionBank, ReviewMode, ReviewQuery, ReviewService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { what: &'static str },
    UnknownArg(String),
    InvalidValue { flag: &'static str, raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { what } => write!(f, "missing argument: {what}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidValue { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.parse().map_err(|_| ArgsError::InvalidValue { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  scorecard interview [--role <template>] [--resume <draft-id>]");
    eprintln!("  scorecard generate");
    eprintln!("  scorecard drafts [list | delete <id> | clear]");
    eprintln!("  scorecard history [list | export | delete <id> | clear]");
    eprintln!("                    [--search <text>] [--filter all|hire|consider|not-ready] [--out <path>]");
    eprintln!("  scorecard questions [list | add <category> <question> | delete <category> <index> | clear <category>]");
    eprintln!("                      [--short <text>] [--look-for <text>]");
    eprintln!("  scorecard categories [list | add <name> | rename <id> <name> | delete <id>]");
    eprintln!("  scorecard templates | apply-template <id> | reset-questions");
    eprintln!("  scorecard settings [show | set] [--per-category <1-10>] [--total <1-50>]");
    eprintln!("  scorecard review [--level all|junior|mid|senior] [--search <text>] [--mode random|full] [--limit <n>]");
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  --db <sqlite_url>        default sqlite:scorecard.sqlite3");
    eprintln!("  --bank <path|url>        default content/questions.json");
    eprintln!("  --review-bank <path|url> default content/question.json");
    eprintln!("  --yes, -y                skip confirmation prompts");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SCORECARD_DB_URL, SCORECARD_BANK, SCORECARD_REVIEW_BANK, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Interview,
    Generate,
    Drafts,
    History,
    Questions,
    Categories,
    Templates,
    ApplyTemplate,
    ResetQuestions,
    Settings,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "interview" => Some(Self::Interview),
            "generate" => Some(Self::Generate),
            "drafts" => Some(Self::Drafts),
            "history" => Some(Self::History),
            "questions" => Some(Self::Questions),
            "categories" => Some(Self::Categories),
            "templates" => Some(Self::Templates),
            "apply-template" => Some(Self::ApplyTemplate),
            "reset-questions" => Some(Self::ResetQuestions),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    bank: BankSource,
    review_bank: BankSource,
    role: Option<String>,
    resume: Option<DraftId>,
    search: String,
    filter: RecommendationFilter,
    level: RoleLevel,
    mode: ReviewMode,
    limit: usize,
    out: Option<PathBuf>,
    short_answer: String,
    look_for: String,
    per_category: Option<u32>,
    total: Option<u32>,
    assume_yes: bool,
    positional: Vec<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            db_url: std::env::var("SCORECARD_DB_URL")
                .ok()
                .map_or_else(|| normalize_sqlite_url("scorecard.sqlite3".into()), normalize_sqlite_url),
            bank: BankSource::parse(
                &std::env::var("SCORECARD_BANK").unwrap_or_else(|_| "content/questions.json".into()),
            ),
            review_bank: BankSource::parse(
                &std::env::var("SCORECARD_REVIEW_BANK")
                    .unwrap_or_else(|_| "content/question.json".into()),
            ),
            role: None,
            resume: None,
            search: String::new(),
            filter: RecommendationFilter::All,
            level: RoleLevel::All,
            mode: ReviewMode::Random,
            limit: DEFAULT_REVIEW_LIMIT,
            out: None,
            short_answer: String::new(),
            look_for: String::new(),
            per_category: None,
            total: None,
            assume_yes: false,
            positional: Vec::new(),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--bank" => parsed.bank = BankSource::parse(&require_value(args, "--bank")?),
                "--review-bank" => {
                    parsed.review_bank = BankSource::parse(&require_value(args, "--review-bank")?);
                }
                "--role" => parsed.role = Some(require_value(args, "--role")?),
                "--resume" => parsed.resume = Some(parse_value(args, "--resume")?),
                "--search" => parsed.search = require_value(args, "--search")?,
                "--filter" => parsed.filter = parse_value(args, "--filter")?,
                "--level" => parsed.level = parse_value(args, "--level")?,
                "--mode" => parsed.mode = parse_value(args, "--mode")?,
                "--limit" => {
                    let limit: usize = parse_value(args, "--limit")?;
                    if limit == 0 {
                        return Err(ArgsError::InvalidValue {
                            flag: "--limit",
                            raw: limit.to_string(),
                        });
                    }
                    parsed.limit = limit;
                }
                "--out" => parsed.out = Some(PathBuf::from(require_value(args, "--out")?)),
                "--short" => parsed.short_answer = require_value(args, "--short")?,
                "--look-for" => parsed.look_for = require_value(args, "--look-for")?,
                "--per-category" => parsed.per_category = Some(parse_value(args, "--per-category")?),
                "--total" => parsed.total = Some(parse_value(args, "--total")?),
                "--yes" | "-y" => parsed.assume_yes = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => parsed.positional.push(arg),
            }
        }

        Ok(parsed)
    }

    fn action(&self) -> Option<&str> {
        self.positional.first().map(String::as_str)
    }

    fn positional(&self, index: usize, what: &'static str) -> Result<&str, ArgsError> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or(ArgsError::MissingArgument { what })
    }

    fn positional_parsed<T: std::str::FromStr>(
        &self,
        index: usize,
        what: &'static str,
    ) -> Result<T, ArgsError> {
        let raw = self.positional(index, what)?;
        raw.parse().map_err(|_| ArgsError::InvalidValue {
            flag: what,
            raw: raw.to_owned(),
        })
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Ask before a destructive change. `--yes` answers for the user; end of input declines.
fn confirm(args: &Args, question: &str, input: &mut impl BufRead) -> io::Result<bool> {
    if args.assume_yes {
        return Ok(true);
    }
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let confirmed = is_yes(&answer);
    if !confirmed {
        println!("Cancelled.");
    }
    Ok(confirmed)
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn parse_args(argv: &mut impl Iterator<Item = String>) -> Result<Args, ArgsError> {
    Args::parse(argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);

    let cmd = match argv.next() {
        None => {
            print_usage();
            return Ok(());
        }
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(());
        }
        // Review mode reads only the review bank and never opens the database.
        Some(first) if first == "review" => return review(&parse_args(&mut argv)?).await,
        Some(first) => Command::from_arg(&first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let args = parse_args(&mut argv)?;

    prepare_sqlite_file(&args.db_url)?;
    let clock = Clock::default_clock();
    let services = AppServices::new_sqlite(&args.db_url, clock).await?;
    info!(db = %args.db_url, command = ?cmd, "storage ready");

    match cmd {
        Command::Interview => {
            let bank = QuestionBank::load_or_empty(&args.bank).await;
            interactive::run(&services, &bank, args.role.as_deref(), args.resume).await
        }
        Command::Generate => generate(&services, &args).await,
        Command::Drafts => drafts(&services, &args, &mut io::stdin().lock()).await,
        Command::History => history(&services, &args, &mut io::stdin().lock()).await,
        Command::Questions => questions(&services, &args, &mut io::stdin().lock()).await,
        Command::Categories => categories(&services, &args, &mut io::stdin().lock()).await,
        Command::Templates => {
            let bank = QuestionBank::load(&args.bank).await?;
            let settings = services.settings().load().await?;
            report::templates(&bank, &settings.selected_template);
            Ok(())
        }
        Command::ApplyTemplate => apply_template(&services, &args, &mut io::stdin().lock()).await,
        Command::ResetQuestions => {
            reset_questions(&services, &args, &mut io::stdin().lock()).await
        }
        Command::Settings => settings(&services, &args).await,
    }
}

async fn apply_template(
    services: &AppServices,
    args: &Args,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = args.positional(0, "template id")?;
    let bank = QuestionBank::load(&args.bank).await?;
    if !confirm(
        args,
        &format!("Apply template {id}? This replaces your questions and settings."),
        input,
    )? {
        return Ok(());
    }
    let settings = services.questions().apply_template(&bank, id).await?;
    println!("Applied template {id}.");
    report::settings(&settings);
    Ok(())
}

async fn reset_questions(
    services: &AppServices,
    args: &Args,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let bank = QuestionBank::load(&args.bank).await?;
    if !confirm(
        args,
        "Reset all questions to the junior template? Your edits will be lost.",
        input,
    )? {
        return Ok(());
    }
    let store = services.questions().reset_to_defaults(&bank).await?;
    println!(
        "Questions reset to junior template defaults ({} questions).",
        store.question_count()
    );
    Ok(())
}

async fn generate(services: &AppServices, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let bank = QuestionBank::load_or_empty(&args.bank).await;
    let (settings, store) = services.load_question_store(&bank).await?;
    let role = args
        .role
        .clone()
        .unwrap_or_else(|| settings.selected_template.clone());
    let mut session = InterviewSession::new(role, Clock::default_clock().today());
    session.generate(&store, &settings);
    report::session_questions(&session);
    Ok(())
}

async fn drafts(
    services: &AppServices,
    args: &Args,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let workflow = services.interview();
    match args.action().unwrap_or("list") {
        "list" => report::drafts(&workflow.resumable_drafts().await?),
        "delete" => {
            let id: DraftId = args.positional_parsed(1, "draft id")?;
            if !confirm(args, &format!("Delete draft {id}?"), input)? {
                return Ok(());
            }
            if workflow.discard_draft(id).await? {
                println!("Deleted draft {id}.");
            } else {
                println!("No draft {id}.");
            }
        }
        "clear" => {
            if !confirm(args, "Delete all drafts?", input)? {
                return Ok(());
            }
            workflow.clear_drafts().await?;
            println!("All drafts cleared.");
        }
        other => return Err(ArgsError::UnknownArg(other.to_owned()).into()),
    }
    Ok(())
}

async fn history(
    services: &AppServices,
    args: &Args,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let history = services.history();
    match args.action().unwrap_or("list") {
        "list" => {
            let query = HistoryQuery {
                search: args.search.clone(),
                recommendation: args.filter,
            };
            report::history(&history.filter(&query).await?);
        }
        "export" => {
            let export = history.export().await?;
            let path = args
                .out
                .clone()
                .unwrap_or_else(|| PathBuf::from(&export.file_name));
            std::fs::write(&path, export.json)?;
            println!("History exported to {}.", path.display());
        }
        "delete" => {
            let id: HistoryId = args.positional_parsed(1, "history id")?;
            if !confirm(args, &format!("Delete history entry {id}?"), input)? {
                return Ok(());
            }
            if history.delete(id).await? {
                println!("Deleted history entry {id}.");
            } else {
                println!("No history entry {id}.");
            }
        }
        "clear" => {
            if !confirm(args, "Delete all interview history?", input)? {
                return Ok(());
            }
            history.clear_all().await?;
            println!("History cleared.");
        }
        other => return Err(ArgsError::UnknownArg(other.to_owned()).into()),
    }
    Ok(())
}

async fn questions(
    services: &AppServices,
    args: &Args,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let questions = services.questions();
    match args.action().unwrap_or("list") {
        "list" => {
            let bank = QuestionBank::load_or_empty(&args.bank).await;
            let (_, store) = services.load_question_store(&bank).await?;
            for id in questions.known_categories().await? {
                let label = questions.label(&id).await?;
                report::category_questions(&id, &label, store.get(&id).unwrap_or_default());
            }
        }
        "add" => {
            let category = args.positional(1, "category")?;
            let text = args.positional(2, "question")?;
            questions
                .add_question(category, text, &args.short_answer, &args.look_for)
                .await?;
            println!("Question added to {category}.");
        }
        "delete" => {
            let category = args.positional(1, "category")?;
            let index: usize = args.positional_parsed(2, "question index")?;
            if !confirm(args, &format!("Delete question {index} from {category}?"), input)? {
                return Ok(());
            }
            let removed = questions
                .delete_question(category, index.saturating_sub(1))
                .await?;
            println!("Deleted: {}", removed.question);
        }
        "clear" => {
            let category = args.positional(1, "category")?;
            if !confirm(args, &format!("Delete all questions in {category}?"), input)? {
                return Ok(());
            }
            questions.clear_category(category).await?;
            println!("All questions in {category} deleted.");
        }
        other => return Err(ArgsError::UnknownArg(other.to_owned()).into()),
    }
    Ok(())
}

async fn categories(
    services: &AppServices,
    args: &Args,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    let questions = services.questions();
    match args.action().unwrap_or("list") {
        "list" => {
            let custom = questions.custom_categories().await?;
            for id in questions.known_categories().await? {
                let label = questions.label(&id).await?;
                let kind = if custom.contains_key(&id) { "custom" } else { "default" };
                println!("{id:<16} {label} ({kind})");
            }
        }
        "add" => {
            let id = questions.add_category(args.positional(1, "category name")?).await?;
            println!("Custom category added: {id}");
        }
        "rename" => {
            let id = args.positional(1, "category id")?;
            questions
                .rename_category(id, args.positional(2, "category name")?)
                .await?;
            println!("Category {id} renamed.");
        }
        "delete" => {
            let id = args.positional(1, "category id")?;
            if !confirm(
                args,
                &format!("Delete category {id} and all its questions?"),
                input,
            )? {
                return Ok(());
            }
            questions.delete_category(id).await?;
            println!("Category {id} deleted with its questions.");
        }
        other => return Err(ArgsError::UnknownArg(other.to_owned()).into()),
    }
    Ok(())
}

async fn settings(services: &AppServices, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = services.settings();
    let current = settings.load().await?;
    match args.action().unwrap_or("show") {
        "show" => report::settings(&current),
        "set" => {
            let updated = InterviewSettings {
                max_questions_per_category: args
                    .per_category
                    .unwrap_or(current.max_questions_per_category),
                max_total_questions: args.total.unwrap_or(current.max_total_questions),
                ..current
            };
            report::settings(&settings.save(updated).await?);
        }
        other => return Err(ArgsError::UnknownArg(other.to_owned()).into()),
    }
    Ok(())
}

async fn review(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let service = ReviewService::load(&args.review_bank).await?;
    let query = ReviewQuery {
        level: args.level,
        search: args.search.clone(),
        mode: args.mode,
        limit: args.limit,
    };
    let selected = service.select(&query);
    println!(
        "Showing {} of {} matching questions.",
        selected.len(),
        service.matching_count(&query)
    );
    report::review(&selected);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_core::model::{QuestionRecord, QuestionSet};
    use scorecard_core::time::fixed_clock;

    async fn services_with_history() -> AppServices {
        let services = AppServices::in_memory(fixed_clock());
        let mut store = QuestionSet::new();
        store.insert("kotlin", vec![QuestionRecord::new("val vs var?", "", "")]);

        let workflow = services.interview();
        let mut session = workflow.new_session("junior");
        session.set_candidate_name("Ada");
        session.generate(&store, &InterviewSettings::default());
        workflow.save_draft(&mut session).await.unwrap();
        workflow.complete(&mut session).await.unwrap();

        let mut next = workflow.new_session("junior");
        next.set_candidate_name("Grace");
        workflow.save_draft(&mut next).await.unwrap();
        services
    }

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_owned());
        Args::parse(&mut iter)
    }

    #[test]
    fn parses_flags_and_positionals() {
        let args = parse(&[
            "list",
            "--search",
            "ada",
            "--filter",
            "not-ready",
            "--db",
            "sqlite::memory:",
            "--bank",
            "https://example.com/q.json",
        ])
        .unwrap();
        assert_eq!(args.action(), Some("list"));
        assert_eq!(args.search, "ada");
        assert_eq!(args.filter, RecommendationFilter::NotReady);
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.bank, BankSource::Url("https://example.com/q.json".into()));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse(&["--limit", "0"]),
            Err(ArgsError::InvalidValue { flag: "--limit", .. })
        ));
        assert!(matches!(
            parse(&["--level", "staff"]),
            Err(ArgsError::InvalidValue { flag: "--level", .. })
        ));
        assert!(matches!(parse(&["--db"]), Err(ArgsError::MissingValue { .. })));
        assert!(matches!(parse(&["--nope"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn sqlite_urls_become_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert_eq!(normalize_sqlite_url("sqlite:///tmp/a.db".into()), "sqlite:///tmp/a.db");
        let url = normalize_sqlite_url("sqlite:data/a.db".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/a.db"));
    }

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
        assert!(parse(&["clear", "-y"]).unwrap().assume_yes);
    }

    #[tokio::test]
    async fn declined_clear_keeps_history_and_drafts() {
        let services = services_with_history().await;

        let args = parse(&["clear"]).unwrap();
        history(&services, &args, &mut "n\n".as_bytes()).await.unwrap();
        drafts(&services, &args, &mut io::empty()).await.unwrap();
        assert_eq!(services.history().list().await.unwrap().len(), 1);
        assert_eq!(services.interview().resumable_drafts().await.unwrap().len(), 1);

        let args = parse(&["clear", "--yes"]).unwrap();
        history(&services, &args, &mut io::empty()).await.unwrap();
        assert!(services.history().list().await.unwrap().is_empty());

        let args = parse(&["clear"]).unwrap();
        drafts(&services, &args, &mut "y\n".as_bytes()).await.unwrap();
        assert!(services.interview().resumable_drafts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn declined_category_delete_keeps_questions() {
        let services = AppServices::in_memory(fixed_clock());
        let manage = services.questions();
        let id = manage.add_category("System Design").await.unwrap();
        manage.add_question(&id, "CAP theorem?", "", "").await.unwrap();

        let args = parse(&["delete", id.as_str()]).unwrap();
        categories(&services, &args, &mut "no\n".as_bytes()).await.unwrap();
        assert!(manage.custom_categories().await.unwrap().contains_key(&id));

        let args = parse(&["clear", id.as_str()]).unwrap();
        questions(&services, &args, &mut "\n".as_bytes()).await.unwrap();
        assert_eq!(manage.questions().await.unwrap().get(&id).unwrap().len(), 1);

        let args = parse(&["delete", id.as_str(), "--yes"]).unwrap();
        categories(&services, &args, &mut io::empty()).await.unwrap();
        assert!(manage.custom_categories().await.unwrap().is_empty());
    }
}
