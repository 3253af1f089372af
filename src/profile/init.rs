use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::academic::{Grade, SubjectResult};
use super::interests::{InterestQuestion, MAX_RATING, MIN_RATING};
use super::storage::{get_profile_path, save_profile, StudentProfile};
use super::stream::Stream;

/// Line-oriented prompter over any reader/writer pair.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt with a message and return the trimmed input. EOF reads as empty.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write output")
    }

    fn prompt_stream(&mut self) -> Result<Stream> {
        let choices = Stream::all()
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ");
        self.say(&format!("Streams: {}", choices))?;
        loop {
            let input = self.prompt("A/L stream: ")?;
            match Stream::parse(&input) {
                Some(stream) => return Ok(stream),
                None if input.is_empty() => anyhow::bail!("No stream entered"),
                None => self.say(&format!("  Unknown stream '{}'. Try again.", input))?,
            }
        }
    }

    fn prompt_subjects(&mut self) -> Result<Vec<SubjectResult>> {
        self.say("Enter each subject as NAME=GRADE (e.g. Physics=A). Blank line to finish.")?;
        let mut subjects = Vec::new();
        loop {
            let input = self.prompt("Subject: ")?;
            if input.is_empty() {
                if subjects.is_empty() {
                    self.say("  At least one subject is required.")?;
                    // Keep asking only while there is input left to read
                    if self.input.fill_buf().map(|b| b.is_empty()).unwrap_or(true) {
                        anyhow::bail!("No subjects entered");
                    }
                    continue;
                }
                return Ok(subjects);
            }
            match parse_subject(&input) {
                Ok(subject) => subjects.push(subject),
                Err(msg) => self.say(&format!("  Invalid: {}. Try again.", msg))?,
            }
        }
    }

    fn prompt_interests(&mut self) -> Result<BTreeMap<String, i64>> {
        self.say(&format!(
            "Rate each statement from {} (not at all) to {} (very). Blank skips.",
            MIN_RATING, MAX_RATING
        ))?;
        let mut ratings = BTreeMap::new();
        for question in InterestQuestion::all() {
            let rating = loop {
                let input = self.prompt(&format!(
                    "{:>2}. {} ",
                    question.number(),
                    question.prompt()
                ))?;
                if input.is_empty() {
                    break None;
                }
                match parse_rating(&input) {
                    Ok(r) => break Some(r),
                    Err(msg) => self.say(&format!("  Invalid: {}. Try again.", msg))?,
                }
            };
            if let Some(r) = rating {
                ratings.insert(question.id().to_string(), r);
            }
        }
        Ok(ratings)
    }
}

/// Parse "Subject=Grade". The grade must be one of A, B, C, S, F.
pub fn parse_subject(s: &str) -> Result<SubjectResult, String> {
    let (name, grade) = s
        .split_once('=')
        .ok_or_else(|| "expected NAME=GRADE".to_string())?;
    let name = name.trim();
    if name.is_empty() {
        return Err("subject name is empty".to_string());
    }
    let grade = Grade::parse(grade)
        .ok_or_else(|| format!("grade '{}' must be one of A, B, C, S, F", grade.trim()))?;
    Ok(SubjectResult::new(name, grade.letter()))
}

fn parse_rating(s: &str) -> Result<i64, String> {
    match s.trim().parse::<i64>() {
        Ok(r) if (MIN_RATING as i64..=MAX_RATING as i64).contains(&r) => Ok(r),
        _ => Err(format!(
            "rating must be a number from {} to {}",
            MIN_RATING, MAX_RATING
        )),
    }
}

/// Collect a profile interactively from `input`, echoing prompts to `output`.
pub fn collect_profile<R: BufRead, W: Write>(input: R, output: W) -> Result<StudentProfile> {
    let mut prompter = Prompter { input, output };

    prompter.say("")?;
    prompter.say("Course Rank Profile Wizard")?;
    prompter.say("==========================")?;
    prompter.say("")?;

    let name = prompter.prompt("Your name (optional): ")?;
    let stream = prompter.prompt_stream()?;
    prompter.say("")?;
    let subjects = prompter.prompt_subjects()?;
    prompter.say("")?;
    let interests = prompter.prompt_interests()?;

    Ok(StudentProfile {
        name: if name.is_empty() { None } else { Some(name) },
        stream: stream.label().to_string(),
        subjects,
        interests,
    })
}

/// Run the interactive wizard on stdin/stdout and save the resulting profile.
///
/// Uses `path` when given, otherwise the default profile path.
pub fn run_init_wizard(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p,
        None => get_profile_path()?,
    };

    let stdin = std::io::stdin();
    let profile = collect_profile(stdin.lock(), std::io::stdout())?;
    save_profile(&path, &profile)?;

    println!();
    println!("Profile saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_subject() {
        let subject = parse_subject("Physics = a").unwrap();
        assert_eq!(subject.name, "Physics");
        assert_eq!(subject.grade, "A");
        assert!(parse_subject("Physics").is_err());
        assert!(parse_subject("=A").is_err());
        assert!(parse_subject("Physics=Z").is_err());
    }

    #[test]
    fn test_parse_rating_bounds() {
        assert_eq!(parse_rating("1"), Ok(1));
        assert_eq!(parse_rating(" 5 "), Ok(5));
        assert!(parse_rating("0").is_err());
        assert!(parse_rating("6").is_err());
        assert!(parse_rating("five").is_err());
    }

    #[test]
    fn test_collect_profile_full_session() {
        let mut script = String::new();
        script.push_str("Nimal\n");
        script.push_str("astronomy\n"); // rejected, asked again
        script.push_str("physical science\n");
        script.push_str("Combined Mathematics=A\n");
        script.push_str("Physics=Q\n"); // rejected, asked again
        script.push_str("Physics=A\n");
        script.push_str("Chemistry=B\n");
        script.push('\n');
        // 12 interest answers: skip the first, answer the rest
        script.push('\n');
        for _ in 0..11 {
            script.push_str("4\n");
        }

        let mut out = Vec::new();
        let profile = collect_profile(Cursor::new(script), &mut out).unwrap();

        assert_eq!(profile.name.as_deref(), Some("Nimal"));
        assert_eq!(profile.stream, "Physical Science");
        assert_eq!(profile.subjects.len(), 3);
        assert_eq!(profile.interests.len(), 11);
        assert!(!profile.interests.contains_key("structural-design"));
        assert_eq!(profile.interests.get("technology"), Some(&4));

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Unknown stream 'astronomy'"));
        assert!(transcript.contains("grade 'Q' must be one of"));
    }

    #[test]
    fn test_collect_profile_requires_subjects() {
        let script = "\nArts\n\n";
        let result = collect_profile(Cursor::new(script), Vec::new());
        assert!(result.is_err());
    }
}
