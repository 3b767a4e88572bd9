//! 生日问答（Trivia）
//!
//! 完全独立的静态状态机子树：固定题库、会话内计分、无任何存储交互，
//! 结果也不做持久化。

pub mod questions;
pub mod session;

pub use questions::{question_bank, QuizQuestion, OPTION_COUNT};
pub use session::{AnswerRecord, OptionHighlight, QuizPhase, QuizSession, ScoreBand};
