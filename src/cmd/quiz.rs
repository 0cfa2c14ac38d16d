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

use crate::error::Fallible;
use crate::error::fail;
use crate::kana::Script;
use crate::persist::load_history;
use crate::quiz::QuizKind;
use crate::quiz::QuizPool;
use crate::quiz::QuizRound;
use crate::quiz::start_round;
use crate::quiz::submit_answer;
use crate::types::date::Date;
use crate::types::history::History;
use crate::workspace::Workspace;
use crate::workspace::resolve_directory;

pub fn kana_quiz(directory: Option<String>, script: Script, size: usize) -> Fallible<()> {
    resolve_directory(directory)?;
    let round = start_round(QuizPool::kana(script), size, &mut rand::rng());
    play(round)
}

pub fn word_quiz(directory: Option<String>, date: Option<Date>, size: usize) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let history = load_history(&workspace.db);
    if history.is_empty() {
        println!("No studied words yet. Run `komorebi study` first.");
        return Ok(());
    }
    let pool = word_pool(&history, date)?;
    if pool.is_empty() {
        println!("No words to ask.");
        return Ok(());
    }
    log::debug!("Sampling {size} of {} words.", pool.len());
    let round = start_round(pool, size, &mut rand::rng());
    play(round)
}

/// The words of one day, or of every day studied so far.
pub fn word_pool(history: &History, date: Option<Date>) -> Fallible<QuizPool> {
    match date {
        Some(date) => match history.get(date) {
            Some(session) => Ok(QuizPool::vocabulary(session.words())),
            None => fail(format!("no study session on {date}.")),
        },
        None => Ok(QuizPool::vocabulary(history.words())),
    }
}

fn play(round: QuizRound) -> Fallible<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_quiz(round, &mut input, &mut output)?;
    Ok(())
}

/// Ask each question in turn and print the final score. End of input stops
/// the round early.
pub fn run_quiz<R: BufRead, W: Write>(
    round: QuizRound,
    input: &mut R,
    output: &mut W,
) -> Fallible<QuizRound> {
    let total = round.len();
    if total > 0 {
        match round.kind() {
            QuizKind::Kana => writeln!(output, "Type the romanization of each kana.")?,
            QuizKind::Vocabulary => writeln!(output, "Type the meaning of each word.")?,
        }
    }
    let mut round = round;
    while let Some(question) = round.current() {
        writeln!(output)?;
        writeln!(output, "[{}/{}] {}", round.index() + 1, total, question.prompt)?;
        write!(output, "> ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let submission = submit_answer(&round, &line)?;
        if submission.correct {
            writeln!(output, "Correct!")?;
        } else {
            writeln!(output, "Wrong. Answer: {}", submission.expected)?;
        }
        round = submission.round;
    }
    if !round.finished() {
        writeln!(output, "Stopped after {} of {} questions.", round.index(), total)?;
    }
    writeln!(output, "Score: {} / {}", round.score(), total)?;
    Ok(round)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::types::session::StudySession;
    use crate::types::word::sample_word;

    fn drive(round: QuizRound, answers: &str) -> Fallible<(QuizRound, String)> {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let round = run_quiz(round, &mut input, &mut output)?;
        Ok((round, String::from_utf8_lossy(&output).into_owned()))
    }

    fn history() -> Fallible<History> {
        let first = StudySession::new(
            Date::from_ymd(2024, 5, 1)?,
            vec![sample_word("1", "猫", "ねこ", "고양이")],
        );
        let second = StudySession::new(
            Date::from_ymd(2024, 5, 2)?,
            vec![
                sample_word("2", "犬", "いぬ", "개"),
                sample_word("3", "愛", "あい", "사랑, 애정"),
            ],
        );
        Ok(History::new().with_session(first).with_session(second))
    }

    #[test]
    fn test_all_correct() -> Fallible<()> {
        let words = [sample_word("1", "猫", "ねこ", "고양이")];
        let round = start_round(QuizPool::vocabulary(&words), 10, &mut StdRng::seed_from_u64(1));
        let (round, output) = drive(round, "고양이\n")?;
        assert!(round.finished());
        assert!(output.contains("[1/1] 猫 (ねこ)"));
        assert!(output.contains("Correct!"));
        assert!(output.contains("Score: 1 / 1"));
        assert!(!output.contains("Stopped"));
        Ok(())
    }

    #[test]
    fn test_wrong_answer_shows_expected() -> Fallible<()> {
        let words = [sample_word("1", "愛", "あい", "사랑, 애정")];
        let round = start_round(QuizPool::vocabulary(&words), 1, &mut StdRng::seed_from_u64(1));
        let (_, output) = drive(round, "애증\n")?;
        assert!(output.contains("Wrong. Answer: 사랑, 애정"));
        assert!(output.contains("Score: 0 / 1"));
        Ok(())
    }

    #[test]
    fn test_end_of_input_stops_early() -> Fallible<()> {
        let pool = QuizPool::kana(Script::Hiragana);
        let round = start_round(pool, 5, &mut StdRng::seed_from_u64(1));
        let (round, output) = drive(round, "")?;
        assert!(!round.finished());
        assert!(output.contains("Stopped after 0 of 5 questions."));
        assert!(output.contains("Score: 0 / 5"));
        Ok(())
    }

    #[test]
    fn test_empty_round_prints_score() -> Fallible<()> {
        let round = start_round(QuizPool::kana(Script::Both), 0, &mut StdRng::seed_from_u64(1));
        let (_, output) = drive(round, "")?;
        assert_eq!(output, "Score: 0 / 0\n");
        Ok(())
    }

    #[test]
    fn test_word_pool_for_one_day() -> Fallible<()> {
        let history = history()?;
        let pool = word_pool(&history, Some(Date::from_ymd(2024, 5, 2)?))?;
        assert_eq!(pool.len(), 2);
        Ok(())
    }

    #[test]
    fn test_word_pool_for_all_days() -> Fallible<()> {
        let pool = word_pool(&history()?, None)?;
        assert_eq!(pool.len(), 3);
        Ok(())
    }

    #[test]
    fn test_word_pool_for_unstudied_day() -> Fallible<()> {
        let result = word_pool(&history()?, Some(Date::from_ymd(2024, 6, 1)?));
        assert!(result.is_err());
        Ok(())
    }
}
