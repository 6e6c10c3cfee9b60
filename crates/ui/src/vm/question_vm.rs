use quiz_core::model::{AnswerLedger, OptionLetter, Question};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: OptionLetter,
    pub text: String,
    /// `"A. text"`, as shown on the option button.
    pub label: String,
    pub is_selected: bool,
}

/// Everything the quiz screen shows for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub text: String,
    pub counter_text: String,
    pub progress_percent: u32,
    pub options: Vec<OptionVm>,
    pub is_first: bool,
    pub is_last: bool,
    pub answered_count: usize,
}

impl QuestionVm {
    #[must_use]
    pub fn answered_text(&self) -> String {
        format!("{} answered", self.answered_count)
    }
}

/// Display model for `questions[index]`, or `None` when the index is out of
/// range (no quiz loaded).
#[must_use]
pub fn render_question(
    questions: &[Question],
    index: usize,
    answers: &AnswerLedger,
) -> Option<QuestionVm> {
    let question = questions.get(index)?;
    let total = questions.len();
    let position = index + 1;
    let selected = answers.get(index);

    let options = question
        .lettered_options()
        .map(|(letter, text)| OptionVm {
            letter,
            text: text.to_string(),
            label: format!("{letter}. {text}"),
            is_selected: selected == Some(letter),
        })
        .collect();

    Some(QuestionVm {
        index,
        text: question.text().to_string(),
        counter_text: format!("Question {position} of {total}"),
        progress_percent: progress_percent(position, total),
        options,
        is_first: index == 0,
        is_last: position == total,
        answered_count: answers.count(),
    })
}

// Rounds half up; `total` is never zero here.
fn progress_percent(position: usize, total: usize) -> u32 {
    let percent = (position * 200 + total) / (total * 2);
    u32::try_from(percent).unwrap_or(100)
}
