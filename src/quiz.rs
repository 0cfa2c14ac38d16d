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

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::Fallible;
use crate::error::fail;
use crate::kana::Script;
use crate::types::word::VocabularyEntry;

/// Decides how answers are compared.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuizKind {
    /// Kana to romanization. Case-insensitive exact match.
    Kana,
    /// Word to meaning. The answer must occur in the meaning.
    Vocabulary,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Question {
    pub prompt: String,
    pub expected: String,
}

/// The candidates a round is sampled from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QuizPool {
    kind: QuizKind,
    questions: Vec<Question>,
}

impl QuizPool {
    pub fn kana(script: Script) -> Self {
        let questions = script
            .table()
            .into_iter()
            .map(|kana| Question {
                prompt: kana.kana.to_string(),
                expected: kana.romaji.to_string(),
            })
            .collect();
        Self {
            kind: QuizKind::Kana,
            questions,
        }
    }

    pub fn vocabulary<'a>(words: impl IntoIterator<Item = &'a VocabularyEntry>) -> Self {
        let questions = words
            .into_iter()
            .map(|word| {
                let prompt = if word.headword() == word.hiragana {
                    word.hiragana.clone()
                } else {
                    format!("{} ({})", word.headword(), word.hiragana)
                };
                Question {
                    prompt,
                    expected: word.meaning.clone(),
                }
            })
            .collect();
        Self {
            kind: QuizKind::Vocabulary,
            questions,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A quiz in progress. Not persisted.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QuizRound {
    kind: QuizKind,
    questions: Vec<Question>,
    index: usize,
    score: usize,
    finished: bool,
}

impl QuizRound {
    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    /// The number of questions in the round.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// The question awaiting an answer.
    pub fn current(&self) -> Option<&Question> {
        if self.finished {
            None
        } else {
            self.questions.get(self.index)
        }
    }
}

/// Start a round of `sample_size` questions drawn from `pool` without
/// replacement, in random order. Asking for more questions than the pool has
/// uses the whole pool.
pub fn start_round<R: Rng + ?Sized>(pool: QuizPool, sample_size: usize, rng: &mut R) -> QuizRound {
    let QuizPool {
        kind,
        mut questions,
    } = pool;
    questions.shuffle(rng);
    questions.truncate(sample_size);
    let finished = questions.is_empty();
    QuizRound {
        kind,
        questions,
        index: 0,
        score: 0,
        finished,
    }
}

/// The outcome of one answer. `round` has already advanced, so the
/// correctness and the expected answer are reported alongside it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Submission {
    pub round: QuizRound,
    pub correct: bool,
    pub expected: String,
}

/// Grade an answer to the current question. The given round is left as it
/// was; the advanced one is in the [`Submission`].
pub fn submit_answer(round: &QuizRound, raw_input: &str) -> Fallible<Submission> {
    let Some(question) = round.current() else {
        return fail("round is already finished");
    };
    let expected = question.expected.clone();
    let correct = is_correct(round.kind, &expected, raw_input);
    let mut round = round.clone();
    if correct {
        round.score += 1;
    }
    round.index += 1;
    if round.index == round.questions.len() {
        round.finished = true;
    }
    Ok(Submission {
        round,
        correct,
        expected,
    })
}

/// Compare an answer against the expected one. Blank answers are never
/// correct.
pub fn is_correct(kind: QuizKind, expected: &str, raw_input: &str) -> bool {
    let answer = raw_input.trim();
    if answer.is_empty() {
        return false;
    }
    match kind {
        QuizKind::Kana => answer.to_lowercase() == expected,
        QuizKind::Vocabulary => expected.contains(answer),
    }
}
