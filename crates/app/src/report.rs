//! Plain-text rendering for the command line.

use scorecard_core::model::{
    Draft, HistoryEntry, InterviewSettings, QuestionRecord, ReviewQuestion, category_label,
    decision_text,
};
use services::{InterviewSession, QuestionBank};

pub fn settings(settings: &InterviewSettings) {
    println!("Template:               {}", settings.selected_template);
    println!("Max per category:       {}", settings.max_questions_per_category);
    println!("Max total questions:    {}", settings.max_total_questions);
}

pub fn templates(bank: &QuestionBank, selected: &str) {
    let mut any = false;
    for (id, meta) in bank.templates() {
        any = true;
        let marker = if id == selected { "*" } else { " " };
        println!("{marker} {id:<10} {}", meta.name);
        if !meta.description.is_empty() {
            println!("    {}", meta.description);
        }
    }
    if !any {
        println!("No templates in question bank.");
    }
}

pub fn session_questions(session: &InterviewSession) {
    if session.selected_questions().is_empty() {
        println!("No questions selected. Add questions or load a question bank first.");
        return;
    }
    for (index, selected) in session.selected_questions().iter().enumerate() {
        let label = category_label(&selected.category).unwrap_or(selected.category.as_str());
        let verdict = session
            .scores()
            .get(&index)
            .map_or("-", |verdict| verdict.as_str());
        println!("{:>3}. [{label}] {} ({verdict})", index + 1, selected.question());
        if session.is_answer_shown(index) {
            answer_lines(&selected.record);
        }
    }
}

fn answer_lines(record: &QuestionRecord) {
    if !record.short_answer.is_empty() {
        println!("       Answer:   {}", record.short_answer);
    }
    if !record.look_for.is_empty() {
        println!("       Look for: {}", record.look_for);
    }
    if let Some(answer) = &record.answer {
        println!("       Details:  {answer}");
    }
}

pub fn results(session: &InterviewSession) {
    let results = session.results();
    println!(
        "Good {} / Okay {} / Weak {} / Unscored {}",
        results.good,
        results.okay,
        results.weak,
        results.unscored()
    );
    println!("Score: {}%  ->  {}", results.percentage, results.recommendation());
    println!("Decision: {}", decision_text(session.decision()));
}

pub fn drafts(drafts: &[Draft]) {
    if drafts.is_empty() {
        println!("No drafts.");
        return;
    }
    for draft in drafts {
        let name = if draft.candidate_name.trim().is_empty() {
            "(unnamed)"
        } else {
            draft.candidate_name.as_str()
        };
        println!(
            "{}  {name}  {}  {}/{} scored  saved {}",
            draft.id,
            draft.interview_date,
            draft.scored_count(),
            draft.selected_questions.len(),
            draft.saved_at.format("%Y-%m-%d %H:%M")
        );
    }
}

pub fn history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No interviews found.");
        return;
    }
    for entry in entries {
        println!(
            "{}  {}  {}  {}%  {}  (decision: {})",
            entry.id,
            entry.candidate_name,
            entry.interview_date,
            entry.scores.percentage,
            entry.recommendation,
            decision_text(entry.decision)
        );
        if !entry.interviewer_name.is_empty() {
            println!("    interviewer: {}", entry.interviewer_name);
        }
    }
}

pub fn category_questions(id: &str, label: &str, questions: &[QuestionRecord]) {
    println!("{label} ({id}): {} questions", questions.len());
    for (index, record) in questions.iter().enumerate() {
        println!("  {:>3}. {}", index + 1, record.question);
    }
}

pub fn review(questions: &[&ReviewQuestion]) {
    for (index, question) in questions.iter().enumerate() {
        println!("{:>3}. [{}] {}", index + 1, question.level, question.question);
        if !question.short_answer.is_empty() {
            println!("       {}", question.short_answer);
        }
        if let Some(look_for) = &question.look_for {
            println!("       Look for: {look_for}");
        }
    }
}
