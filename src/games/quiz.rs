use rand::Rng;

struct QuestionDef {
    question: &'static str,
    options: [&'static str; 4],
    correct: usize,
}

const QUESTIONS: &[QuestionDef] = &[
    QuestionDef {
        question: "What is the capital of France?",
        options: ["Madrid", "Paris", "London", "Berlin"],
        correct: 1,
    },
    QuestionDef {
        question: "How many planets are there in the solar system?",
        options: ["7", "8", "9", "10"],
        correct: 1,
    },
    QuestionDef {
        question: "In which year did humans first land on the Moon?",
        options: ["1965", "1969", "1972", "1975"],
        correct: 1,
    },
];

/// One question, answered once
#[derive(Debug, Clone)]
pub struct Quiz {
    question: String,
    options: Vec<String>,
    correct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct: bool,
    pub correct_option: String,
}

impl Quiz {
    pub fn new(question: impl Into<String>, options: Vec<String>, correct: usize) -> Self {
        Self {
            question: question.into(),
            options,
            correct,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let def = &QUESTIONS[rng.gen_range(0..QUESTIONS.len())];
        Self::new(
            def.question,
            def.options.iter().map(|o| o.to_string()).collect(),
            def.correct,
        )
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn answer(&self, choice: usize) -> QuizOutcome {
        QuizOutcome {
            correct: choice == self.correct,
            correct_option: self.options.get(self.correct).cloned().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Quiz {
        Quiz::new(
            "What is the capital of France?",
            vec!["Madrid".into(), "Paris".into(), "London".into()],
            1,
        )
    }

    #[test]
    fn test_correct_answer() {
        let outcome = sample().answer(1);
        assert!(outcome.correct);
        assert_eq!(outcome.correct_option, "Paris");
    }

    #[test]
    fn test_wrong_answer_reveals_correct_option() {
        let outcome = sample().answer(2);
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_option, "Paris");
    }

    #[test]
    fn test_random_question_has_valid_answer() {
        let mut rng = StdRng::seed_from_u64(1);
        let quiz = Quiz::random(&mut rng);
        assert_eq!(quiz.options().len(), 4);
        assert!(!quiz.answer(usize::MAX).correct);
        assert!(!quiz.answer(0).correct_option.is_empty());
    }
}
