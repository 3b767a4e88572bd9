//! 固定题库
//!
//! 编译期固定的 10 道题，进程生命周期内不可变。

use once_cell::sync::Lazy;

/// 每道题固定 4 个选项
pub const OPTION_COUNT: usize = 4;

/// 单道问答题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: &'static str,
    pub options: [&'static str; OPTION_COUNT],
    pub correct_index: usize,
    pub explanation: &'static str,
}

static QUESTION_BANK: Lazy<Vec<QuizQuestion>> = Lazy::new(|| {
    vec![
        QuizQuestion {
            id: 1,
            question: "What's the birthday person's favorite color?",
            options: ["Blue", "Purple", "Green", "Pink"],
            correct_index: 1,
            explanation: "Purple has always been their favorite since childhood!",
        },
        QuizQuestion {
            id: 2,
            question: "In which month were they born?",
            options: ["January", "July", "September", "December"],
            correct_index: 1,
            explanation: "A summer baby born in the beautiful month of July!",
        },
        QuizQuestion {
            id: 3,
            question: "What's their favorite type of music?",
            options: ["Pop", "Rock", "Jazz", "Classical"],
            correct_index: 0,
            explanation: "They love singing along to catchy pop songs!",
        },
        QuizQuestion {
            id: 4,
            question: "What's their dream vacation destination?",
            options: ["Paris", "Tokyo", "New York", "Bali"],
            correct_index: 2,
            explanation: "The city that never sleeps has always fascinated them!",
        },
        QuizQuestion {
            id: 5,
            question: "What's their favorite food?",
            options: ["Pizza", "Sushi", "Tacos", "Ice Cream"],
            correct_index: 0,
            explanation: "Nothing beats a good slice of pizza for them!",
        },
        QuizQuestion {
            id: 6,
            question: "What hobby do they enjoy most?",
            options: ["Reading", "Gaming", "Cooking", "Photography"],
            correct_index: 3,
            explanation: "They love capturing beautiful moments through their lens!",
        },
        QuizQuestion {
            id: 7,
            question: "What's their favorite season?",
            options: ["Spring", "Summer", "Fall", "Winter"],
            correct_index: 2,
            explanation: "The beautiful colors of autumn always make them happy!",
        },
        QuizQuestion {
            id: 8,
            question: "What's their biggest fear?",
            options: ["Heights", "Spiders", "Public Speaking", "Dark"],
            correct_index: 0,
            explanation: "They prefer to keep their feet firmly on the ground!",
        },
        QuizQuestion {
            id: 9,
            question: "What's their favorite movie genre?",
            options: ["Comedy", "Horror", "Romance", "Action"],
            correct_index: 2,
            explanation: "They're a hopeless romantic who loves a good love story!",
        },
        QuizQuestion {
            id: 10,
            question: "What superpower would they choose?",
            options: ["Flying", "Invisibility", "Time Travel", "Mind Reading"],
            correct_index: 2,
            explanation: "They'd love to visit different time periods and meet historical figures!",
        },
    ]
});

/// 返回固定题库
pub fn question_bank() -> &'static [QuizQuestion] {
    &QUESTION_BANK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_is_ten_questions_with_valid_answers() {
        let bank = question_bank();
        assert_eq!(bank.len(), 10);
        for question in bank {
            assert!(question.correct_index < OPTION_COUNT);
            assert!(!question.question.is_empty());
            assert!(!question.explanation.is_empty());
        }
    }
}
