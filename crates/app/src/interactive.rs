//! Line-driven interview loop over stdin.

use std::error::Error;
use std::io::{self, Write};

use scorecard_core::model::{Decision, DraftId, InterviewSettings, QuestionSet, Verdict};
use services::{
    AppServices, AutosaveTimer, InterviewSession, InterviewWorkflow, QuestionBank, SessionError,
};
use tracing::{debug, warn};

use crate::report;

fn print_help() {
    println!("Commands:");
    println!("  name <text>            set candidate name");
    println!("  interviewer <text>     set interviewer name");
    println!("  role <text>            set role");
    println!("  date <YYYY-MM-DD>      set interview date");
    println!("  generate               draw a new set of questions (clears scores)");
    println!("  list                   show questions and scores");
    println!("  score <n> <g|o|w>      score question n as good, okay or weak");
    println!("  show <n>               toggle the answer for question n");
    println!("  notes <text>           set overall notes");
    println!("  decision <strong-yes|yes|maybe|no|none>");
    println!("  results                show the running score");
    println!("  save                   save a draft now");
    println!("  complete               record the interview in history");
    println!("  reset                  discard this interview and its draft");
    println!("  quit                   save a draft and exit");
}

fn prompt(label: &str) -> io::Result<()> {
    print!("{label}");
    io::stdout().flush()
}

fn read_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<Option<String>> {
    lines.next().transpose()
}

fn parse_index(raw: &str, len: usize) -> Option<usize> {
    let n: usize = raw.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Offer to resume when drafts exist; otherwise start fresh.
///
/// Unknown or malformed ids re-prompt. Blank input or end of input starts fresh.
async fn start_session(
    workflow: &InterviewWorkflow,
    default_role: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<InterviewSession, Box<dyn Error>> {
    let drafts = workflow.resumable_drafts().await?;
    if drafts.is_empty() {
        return Ok(workflow.new_session(default_role));
    }

    println!("Unfinished interviews:");
    report::drafts(&drafts);
    loop {
        prompt("Resume a draft? Enter its id, or press enter to start fresh: ")?;
        let Some(answer) = read_line(lines)? else {
            return Ok(workflow.new_session(default_role));
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(workflow.new_session(default_role));
        }
        let Ok(id) = answer.parse::<DraftId>() else {
            println!("Not a draft id: {answer}");
            continue;
        };
        match workflow.resume(id, default_role).await {
            Ok(session) => return Ok(session),
            Err(SessionError::DraftNotFound(_)) => println!("No draft {id}."),
            Err(err) => return Err(err.into()),
        }
    }
}

pub async fn run(
    services: &AppServices,
    bank: &QuestionBank,
    role: Option<&str>,
    resume: Option<DraftId>,
) -> Result<(), Box<dyn Error>> {
    let workflow = services.interview();
    let (settings, store) = services.load_question_store(bank).await?;
    let default_role = role.map_or_else(|| settings.selected_template.clone(), str::to_owned);
    let mut lines = io::stdin().lines();

    let mut session = match resume {
        Some(id) => workflow.resume(id, &default_role).await?,
        None => start_session(&workflow, &default_role, &mut lines).await?,
    };

    let mut timer = AutosaveTimer::default();
    timer.arm(workflow.clock().now());
    print_help();

    loop {
        prompt("> ")?;
        let Some(line) = read_line(&mut lines)? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let keep_going = handle(
            command,
            rest,
            &workflow,
            &mut session,
            &store,
            &settings,
            &mut lines,
        )
        .await?;
        if !keep_going {
            break;
        }

        if workflow.autosave(&mut session, &mut timer).await? {
            debug!(draft_id = ?session.draft_id(), "autosaved");
        }
    }

    if session.has_progress() {
        if let Some(id) = workflow.save_draft(&mut session).await? {
            println!("Draft {id} saved.");
        }
    }
    Ok(())
}

async fn handle(
    command: &str,
    rest: &str,
    workflow: &InterviewWorkflow,
    session: &mut InterviewSession,
    store: &QuestionSet,
    settings: &InterviewSettings,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<bool, Box<dyn Error>> {
    match command {
        "" => {}
        "help" | "?" => print_help(),
        "name" => session.set_candidate_name(rest),
        "interviewer" => session.set_interviewer_name(rest),
        "role" => session.set_role(rest),
        "date" => match rest.parse() {
            Ok(date) => session.set_interview_date(date),
            Err(_) => println!("Dates look like 2024-05-31."),
        },
        "notes" => session.set_overall_notes(rest),
        "decision" => match rest {
            "none" | "" => session.set_decision(None),
            other => match other.parse::<Decision>() {
                Ok(decision) => session.set_decision(Some(decision)),
                Err(err) => println!("{err}"),
            },
        },
        "generate" => {
            session.generate(store, settings);
            report::session_questions(session);
        }
        "list" => report::session_questions(session),
        "score" => {
            let (index, verdict) = rest.split_once(' ').unwrap_or((rest, ""));
            let Some(index) = parse_index(index, session.selected_questions().len()) else {
                println!("No such question: {index}");
                return Ok(true);
            };
            match verdict.parse::<Verdict>() {
                Ok(verdict) => session.score(index, verdict)?,
                Err(err) => println!("{err}"),
            }
        }
        "show" => match parse_index(rest, session.selected_questions().len()) {
            Some(index) => {
                session.toggle_answer(index)?;
                report::session_questions(session);
            }
            None => println!("No such question: {rest}"),
        },
        "results" => report::results(session),
        "save" => match workflow.save_draft(session).await? {
            Some(id) => println!("Draft {id} saved."),
            None => println!("Nothing to save yet."),
        },
        "complete" => match workflow.complete(session).await {
            Ok(entry) => println!(
                "Interview for {} saved to history: {}% ({})",
                entry.candidate_name, entry.scores.percentage, entry.recommendation
            ),
            Err(err @ (SessionError::MissingCandidateName | SessionError::NoQuestions)) => {
                println!("{err}");
            }
            Err(err) => return Err(err.into()),
        },
        "reset" => {
            prompt("Reset this interview? Scores, notes and its draft will be lost. [y/N] ")?;
            let answer = read_line(lines)?.unwrap_or_default();
            if crate::is_yes(&answer) {
                workflow.reset(session).await?;
                println!("Interview reset.");
            } else {
                println!("Cancelled.");
            }
        }
        "quit" | "exit" => return Ok(false),
        other => {
            warn!(command = other, "unknown interview command");
            println!("Unknown command: {other} (type help)");
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use scorecard_core::time::fixed_clock;

    fn scripted(answers: &[&str]) -> impl Iterator<Item = io::Result<String>> + use<> {
        answers
            .iter()
            .map(|answer| Ok((*answer).to_owned()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[tokio::test]
    async fn resume_prompt_retries_bad_ids() {
        let services = AppServices::in_memory(fixed_clock());
        let workflow = services.interview();
        let mut draft = workflow.new_session("junior");
        draft.set_candidate_name("Ada");
        let id = workflow.save_draft(&mut draft).await.unwrap().unwrap();

        let missing = (id.value() + 1).to_string();
        let mut lines = scripted(&["abc", missing.as_str(), id.to_string().as_str()]);
        let session = start_session(&workflow, "junior", &mut lines).await.unwrap();
        assert_eq!(session.draft_id(), Some(id));
        assert_eq!(session.candidate_name(), "Ada");

        let mut lines = scripted(&["nope", ""]);
        let session = start_session(&workflow, "junior", &mut lines).await.unwrap();
        assert_eq!(session.draft_id(), None);
    }

    #[test]
    fn question_numbers_are_one_based() {
        assert_eq!(parse_index("1", 3), Some(0));
        assert_eq!(parse_index(" 3 ", 3), Some(2));
        assert_eq!(parse_index("0", 3), None);
        assert_eq!(parse_index("4", 3), None);
        assert_eq!(parse_index("x", 3), None);
    }
}
