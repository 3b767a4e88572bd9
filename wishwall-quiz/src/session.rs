//! 问答会话状态机
//!
//! start → answering → revealed →（最后一题后）finished。
//! 每道题只允许选择一次，选定即不可更改；后续对其他选项的点击
//! 通过"选择仍为空"这一检查直接忽略。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::questions::{question_bank, QuizQuestion, OPTION_COUNT};

/// 会话阶段标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// 开始页：题量与无时限说明
    Start,
    /// 正在作答当前题
    Answering,
    /// 当前题已选择，展示对错高亮与解析
    Revealed,
    /// 全部题目完成，展示总分
    Finished,
}

/// 每道题的作答记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u32,
    pub selected_index: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// 选择后每个选项的展示分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionHighlight {
    /// 尚未选择
    Neutral,
    /// 正确选项（绿色）
    Correct,
    /// 被选中的错误选项（红色）
    WrongSelection,
    /// 其余选项（置灰）
    Dimmed,
}

/// 按正确率划分的结果档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// ≥80%
    Top,
    /// ≥60%
    High,
    /// ≥40%
    Middle,
    /// <40%
    Low,
}

/// 问答会话，仅存在于 UI 内的临时状态
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: &'static [QuizQuestion],
    phase: QuizPhase,
    current: usize,
    score: u32,
    selected: Option<usize>,
    answers: Vec<AnswerRecord>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            questions: question_bank(),
            phase: QuizPhase::Start,
            current: 0,
            score: 0,
            selected: None,
            answers: Vec::new(),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// 当前题目，start/finished 阶段为空
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Answering | QuizPhase::Revealed => self.questions.get(self.current),
            _ => None,
        }
    }

    /// 进度条文案用的 1-based 序号
    pub fn position(&self) -> usize {
        self.current + 1
    }

    /// 已作答题数，进行中的"Score: s/answered"展示用
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn progress_percent(&self) -> u32 {
        (self.position() * 100 / self.total()) as u32
    }

    /// 从开始页进入第一题
    pub fn begin(&mut self) {
        if self.phase == QuizPhase::Start {
            debug!(total = self.total(), "quiz session started");
            self.phase = QuizPhase::Answering;
        }
    }

    /// 选择当前题的一个选项
    ///
    /// 返回 `None` 表示点击被忽略：不在作答阶段、该题已选过、
    /// 或下标越界。首次有效选择记录作答、按对错计分并进入 revealed。
    pub fn select_answer(&mut self, index: usize) -> Option<AnswerRecord> {
        if self.phase != QuizPhase::Answering || self.selected.is_some() || index >= OPTION_COUNT {
            return None;
        }
        let question = self.questions.get(self.current)?;
        let record = AnswerRecord {
            question_id: question.id,
            selected_index: index,
            correct_index: question.correct_index,
            is_correct: index == question.correct_index,
        };
        self.selected = Some(index);
        if record.is_correct {
            self.score += 1;
        }
        self.answers.push(record);
        self.phase = QuizPhase::Revealed;
        debug!(
            question_id = question.id,
            selected = index,
            correct = record.is_correct,
            score = self.score,
            "answer selected"
        );
        Some(record)
    }

    /// 揭示后推进：非最后一题则进入下一题，否则结束
    pub fn next_question(&mut self) {
        if self.phase != QuizPhase::Revealed {
            return;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            self.phase = QuizPhase::Answering;
        } else {
            self.phase = QuizPhase::Finished;
            debug!(score = self.score, total = self.total(), "quiz finished");
        }
    }

    /// 清空全部会话状态回到开始页
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 选择后的选项展示分类
    pub fn option_highlight(&self, index: usize) -> OptionHighlight {
        let Some(selected) = self.selected else {
            return OptionHighlight::Neutral;
        };
        let correct = self
            .questions
            .get(self.current)
            .map(|q| q.correct_index)
            .unwrap_or(usize::MAX);
        if index == correct {
            OptionHighlight::Correct
        } else if index == selected {
            OptionHighlight::WrongSelection
        } else {
            OptionHighlight::Dimmed
        }
    }

    /// 当前题是否答对（revealed 阶段的结果横幅）
    pub fn current_is_correct(&self) -> Option<bool> {
        match self.phase {
            QuizPhase::Revealed => self.answers.last().map(|r| r.is_correct),
            _ => None,
        }
    }

    /// 正确率百分比，四舍五入
    pub fn percentage(&self) -> u32 {
        (self.score as f64 * 100.0 / self.total() as f64).round() as u32
    }

    /// 按正确率档位给出的结果文案
    pub fn score_message(&self) -> &'static str {
        let percentage = self.percentage();
        if percentage == 100 {
            "Perfect! You know them incredibly well! 🏆"
        } else if percentage >= 80 {
            "Amazing! You're definitely a close friend! ⭐"
        } else if percentage >= 60 {
            "Great job! You know them pretty well! 👏"
        } else if percentage >= 40 {
            "Not bad! There's still more to learn! 😊"
        } else {
            "Time to spend more time together! 💝"
        }
    }

    pub fn score_band(&self) -> ScoreBand {
        let percentage = self.percentage();
        if percentage >= 80 {
            ScoreBand::Top
        } else if percentage >= 60 {
            ScoreBand::High
        } else if percentage >= 40 {
            ScoreBand::Middle
        } else {
            ScoreBand::Low
        }
    }

    /// 结果页的 "score / total" 文案
    pub fn score_display(&self) -> String {
        format!("{} / {}", self.score, self.total())
    }
}
