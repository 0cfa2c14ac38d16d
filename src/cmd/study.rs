// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::BufRead;
use std::io::Write;

use crate::app::App;
use crate::error::Fallible;
use crate::provider::FALLBACK_QUOTE;
use crate::provider::VocabularyProvider;
use crate::types::date::Date;
use crate::types::word::VocabularyEntry;
use crate::workspace::Workspace;

pub async fn study(directory: Option<String>) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let today = workspace.today()?;
    let app = workspace.app()?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_study(&app, today, &mut input, &mut output).await
}

pub async fn run_study<P, R, W>(
    app: &App<P>,
    date: Date,
    input: &mut R,
    output: &mut W,
) -> Fallible<()>
where
    P: VocabularyProvider,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", date.format_long())?;
    let session = match app.start_daily_study(date).await {
        Ok(session) => session,
        Err(e) => {
            writeln!(output, "Could not load today's words. Try again later.")?;
            return Err(e);
        }
    };
    if session.completed() {
        writeln!(output, "Today's study is already complete. Reviewing.")?;
    }
    if session.words().is_empty() {
        writeln!(output, "No words today.")?;
        return Ok(());
    }
    match run_flashcards(session.words(), input, output)? {
        Outcome::Finished => {
            let done = app.complete_study(&session).await?;
            writeln!(output)?;
            writeln!(output, "Done for today!")?;
            writeln!(output, "{}", done.quote().unwrap_or(FALLBACK_QUOTE))?;
        }
        Outcome::Quit => {
            writeln!(output, "Stopped. Today's words are saved.")?;
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Finished,
    Quit,
}

enum Action {
    /// Reveal the current card, or advance if it is revealed.
    Next,
    Previous,
    Quit,
}

impl Action {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" => Some(Action::Next),
            "p" => Some(Action::Previous),
            "q" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Walk through the cards. End of input counts as quitting.
pub fn run_flashcards<R: BufRead, W: Write>(
    words: &[VocabularyEntry],
    input: &mut R,
    output: &mut W,
) -> Fallible<Outcome> {
    if words.is_empty() {
        return Ok(Outcome::Finished);
    }
    let total = words.len();
    let mut index = 0;
    let mut reveal = false;
    print_front(output, &words[index], index, total)?;
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Outcome::Quit);
        }
        let Some(action) = Action::parse(&line) else {
            writeln!(output, "Enter: next, p: previous, q: quit")?;
            continue;
        };
        match action {
            Action::Next => {
                if !reveal {
                    reveal = true;
                    print_back(output, &words[index])?;
                } else if index + 1 == total {
                    return Ok(Outcome::Finished);
                } else {
                    index += 1;
                    reveal = false;
                    print_front(output, &words[index], index, total)?;
                }
            }
            Action::Previous => {
                if index > 0 {
                    index -= 1;
                }
                reveal = false;
                print_front(output, &words[index], index, total)?;
            }
            Action::Quit => return Ok(Outcome::Quit),
        }
    }
}

fn print_front<W: Write>(
    output: &mut W,
    word: &VocabularyEntry,
    index: usize,
    total: usize,
) -> Fallible<()> {
    writeln!(output)?;
    writeln!(output, "[{}/{}] {}  {}", index + 1, total, word.headword(), word.level)?;
    Ok(())
}

fn print_back<W: Write>(output: &mut W, word: &VocabularyEntry) -> Fallible<()> {
    writeln!(output, "  {}", word.hiragana)?;
    writeln!(output, "  {}", word.meaning)?;
    writeln!(output, "  {}", word.example_jp)?;
    writeln!(output, "  {}", word.example_kr)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::persist::load_history;
    use crate::provider::mock::MockProvider;
    use crate::store::memory::MemoryStore;
    use crate::types::word::sample_word;

    fn words() -> Vec<VocabularyEntry> {
        vec![
            sample_word("1", "猫", "ねこ", "고양이"),
            sample_word("2", "犬", "いぬ", "개"),
        ]
    }

    fn drive(words: &[VocabularyEntry], keys: &str) -> Fallible<(Outcome, String)> {
        let mut input = Cursor::new(keys.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome = run_flashcards(words, &mut input, &mut output)?;
        Ok((outcome, String::from_utf8_lossy(&output).into_owned()))
    }

    #[test]
    fn test_walk_to_the_end() -> Fallible<()> {
        let (outcome, output) = drive(&words(), "\n\n\n\n")?;
        assert_eq!(outcome, Outcome::Finished);
        assert!(output.contains("[1/2] 猫"));
        assert!(output.contains("고양이"));
        assert!(output.contains("[2/2] 犬"));
        assert!(output.contains("개"));
        Ok(())
    }

    #[test]
    fn test_no_cards_finishes_at_once() -> Fallible<()> {
        let (outcome, output) = drive(&[], "q\n")?;
        assert_eq!(outcome, Outcome::Finished);
        assert!(output.is_empty());
        Ok(())
    }

    #[test]
    fn test_quit_early() -> Fallible<()> {
        let (outcome, output) = drive(&words(), "\nq\n")?;
        assert_eq!(outcome, Outcome::Quit);
        assert!(!output.contains("[2/2]"));
        Ok(())
    }

    #[test]
    fn test_end_of_input_quits() -> Fallible<()> {
        let (outcome, _) = drive(&words(), "\n\n\n")?;
        assert_eq!(outcome, Outcome::Quit);
        Ok(())
    }

    #[test]
    fn test_previous() -> Fallible<()> {
        let (outcome, output) = drive(&words(), "\n\np\nq\n")?;
        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(output.matches("[1/2] 猫").count(), 2);
        Ok(())
    }

    #[test]
    fn test_unknown_key_shows_help() -> Fallible<()> {
        let (_, output) = drive(&words(), "x\nq\n")?;
        assert!(output.contains("Enter: next, p: previous, q: quit"));
        Ok(())
    }

    #[tokio::test]
    async fn test_study_completes_the_day() -> Fallible<()> {
        let store = MemoryStore::new();
        let app = App::load(MockProvider::new(), Box::new(store.clone()));
        let date = Date::from_ymd(2024, 5, 1)?;
        let mut input = Cursor::new(b"\n\n\n\n\n\n".to_vec());
        let mut output = Vec::new();
        run_study(&app, date, &mut input, &mut output).await?;
        let output = String::from_utf8_lossy(&output);
        assert!(output.contains("2024년 5월 1일 (수)"));
        assert!(output.contains("七転び八起き"));
        let history = load_history(&store);
        assert!(history.get(date).is_some_and(|s| s.completed()));
        Ok(())
    }

    #[tokio::test]
    async fn test_study_shows_fallback_quote() -> Fallible<()> {
        let provider = MockProvider::new().failing_quote();
        let app = App::load(provider, Box::new(MemoryStore::new()));
        let date = Date::from_ymd(2024, 5, 1)?;
        let mut input = Cursor::new(b"\n\n\n\n\n\n".to_vec());
        let mut output = Vec::new();
        run_study(&app, date, &mut input, &mut output).await?;
        assert!(String::from_utf8_lossy(&output).contains(FALLBACK_QUOTE));
        Ok(())
    }

    #[tokio::test]
    async fn test_study_reports_provider_failure() -> Fallible<()> {
        let store = MemoryStore::new();
        let provider = MockProvider::new().failing_words();
        let app = App::load(provider, Box::new(store.clone()));
        let date = Date::from_ymd(2024, 5, 1)?;
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        assert!(run_study(&app, date, &mut input, &mut output).await.is_err());
        assert!(String::from_utf8_lossy(&output).contains("Try again later."));
        assert!(load_history(&store).is_empty());
        Ok(())
    }
}
