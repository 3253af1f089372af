use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::profile::InterestQuestion;
use crate::scoring::{ScoredCourse, Tier, TierGroups};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a 0-1 score as a percentage ("96%", "72.5%")
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.1}%", score * 100.0);
    formatted.replace(".0%", "%")
}

/// Short tier marker for table rows
fn tier_badge(tier: Tier) -> &'static str {
    match tier {
        Tier::HighlyRecommended => "HIGH",
        Tier::ModeratelyRecommended => "MOD",
        Tier::ConditionallyEligible => "COND",
    }
}

fn colored_badge(tier: Tier, use_colors: bool) -> String {
    let padded = format!("{:<4}", tier_badge(tier));
    if !use_colors {
        return padded;
    }
    match tier {
        Tier::HighlyRecommended => padded.green().bold().to_string(),
        Tier::ModeratelyRecommended => padded.yellow().to_string(),
        Tier::ConditionallyEligible => padded.dimmed().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn format_row(rank: usize, scored: &ScoredCourse, use_colors: bool, width: Option<usize>) -> String {
    // Index: 3, score: 6, badge: 4, aptitude marker: up to 2
    let index_str = format!("{:>2}.", rank);
    let score_str = format!("{:>6}", format_score(scored.overall_score));
    let marker = if scored.course.requires_aptitude_test() {
        " *"
    } else {
        ""
    };
    let fixed_width = 3 + 1 + 6 + 2 + 4 + 2 + marker.len();

    let title = scored.course.title();
    let title = match width {
        Some(w) if w > fixed_width + 10 => truncate_title(&title, w - fixed_width),
        // Very narrow terminal, show truncated
        Some(_) => truncate_title(&title, 20),
        // No terminal (pipe), don't truncate
        None => title,
    };

    if use_colors {
        format!(
            "{} {}  {}  {}{}",
            index_str.dimmed(),
            score_str.bold(),
            colored_badge(scored.tier, true),
            title,
            marker.cyan()
        )
    } else {
        format!(
            "{} {}  {}  {}{}",
            index_str,
            score_str,
            colored_badge(scored.tier, false),
            title,
            marker
        )
    }
}

/// Format ranked courses as a table: Index, Overall score, Tier, Course - University.
/// Courses that require an aptitude test are marked with `*`.
pub fn format_scored_table(courses: &[ScoredCourse], use_colors: bool) -> String {
    if courses.is_empty() {
        return "No eligible courses found for this stream.".to_string();
    }

    let width = get_terminal_width();
    courses
        .iter()
        .enumerate()
        .map(|(idx, scored)| format_row(idx + 1, scored, use_colors, width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked courses grouped under tier headings.
/// Row indices keep the overall rank so they work with `show`.
pub fn format_tier_groups(courses: &[ScoredCourse], use_colors: bool) -> String {
    if courses.is_empty() {
        return "No eligible courses found for this stream.".to_string();
    }

    let width = get_terminal_width();
    let groups = TierGroups::from_scored(courses);
    let mut sections = Vec::new();

    for tier in Tier::ordered() {
        let members = groups.get(tier);
        let heading = format!("{} ({})", tier.label(), members.len());
        let mut lines = vec![if use_colors {
            heading.bold().to_string()
        } else {
            heading
        }];

        if members.is_empty() {
            lines.push("  (none)".to_string());
        }
        for member in members {
            let rank = courses
                .iter()
                .position(|c| std::ptr::eq(c, *member))
                .map(|i| i + 1)
                .unwrap_or(0);
            lines.push(format!("  {}", format_row(rank, member, use_colors, width)));
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

fn interest_labels(questions: &[InterestQuestion]) -> String {
    if questions.is_empty() {
        return "none".to_string();
    }
    questions
        .iter()
        .map(|q| q.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a single course with detailed multi-line output
pub fn format_course_detail(scored: &ScoredCourse, use_colors: bool) -> String {
    let course = scored.course;
    let mut lines = Vec::new();

    let title = course.title();
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });
    if !course.description.is_empty() {
        lines.push(format!("  {}", course.description));
    }
    lines.push(format!("  Tier: {}", scored.tier.label()));
    lines.push(format!(
        "  Overall: {}  (academic {:.2}/5, interest {})",
        format_score(scored.overall_score),
        scored.academic_score,
        format_score(scored.interest_score)
    ));
    lines.push(format!(
        "  Course interests: {}",
        interest_labels(&course.interests)
    ));
    lines.push(format!(
        "  Matching interests: {}",
        interest_labels(&scored.matching_interests)
    ));

    if let Some(min) = course.minimum_grade {
        lines.push(format!(
            "  Required subjects: {} (minimum {})",
            if course.required_subjects.is_empty() {
                "any".to_string()
            } else {
                course.required_subjects.join(", ")
            },
            min
        ));
    }
    for gap in &scored.requirement_gaps {
        let text = format!("  ! {}", gap);
        lines.push(if use_colors {
            text.red().to_string()
        } else {
            text
        });
    }

    if course.requires_aptitude_test() {
        lines.push(format!(
            "  Aptitude tests: {}",
            course.aptitude_tests.join(", ")
        ));
    } else {
        lines.push("  Aptitude tests: none".to_string());
    }

    lines.join("\n")
}

/// Format ranked courses as tab-separated values for scripting
/// Columns: overall, tier, id, course, university (no headers, no colors)
pub fn format_tsv(courses: &[ScoredCourse]) -> String {
    courses
        .iter()
        .map(|scored| {
            format!(
                "{:.3}\t{}\t{}\t{}\t{}",
                scored.overall_score,
                scored.tier,
                scored.course.id,
                scored.course.name,
                scored.course.university
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// List the interest quiz questions with their ids
pub fn format_questions() -> String {
    InterestQuestion::all()
        .iter()
        .map(|q| format!("{:>2}. {:<18} {}", q.number(), q.id(), q.prompt()))
        .collect::<Vec<_>>()
        .join("\n")
}
