//! 问答数据模型
//!
//! `QaRecord` 是一次成功生成的不可变快照：岗位 + 技术题 + 个人题

use serde::{Deserialize, Serialize};

/// 单个问答对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    pub question: String,
    pub answer: String,
}

impl QaItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// 问答分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Technical,
    Personal,
}

impl Section {
    /// 按展示顺序排列的全部分组
    pub const ALL: [Section; 2] = [Section::Technical, Section::Personal];

    /// 文档中使用的分组标题
    pub fn title(self) -> &'static str {
        match self {
            Section::Technical => "Technical Questions",
            Section::Personal => "Personal Questions",
        }
    }

    /// 纯文本导出中使用的大写横幅
    pub fn banner(self) -> &'static str {
        match self {
            Section::Technical => "TECHNICAL QUESTIONS",
            Section::Personal => "PERSONAL QUESTIONS",
        }
    }
}

/// 一次生成结果
///
/// 构造后不可修改；新的生成产生新的 `QaRecord`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaRecord {
    role: String,
    technical: Vec<QaItem>,
    personal: Vec<QaItem>,
}

impl QaRecord {
    /// 创建记录，`role` 会被去除首尾空白
    pub fn new(role: impl Into<String>, technical: Vec<QaItem>, personal: Vec<QaItem>) -> Self {
        Self {
            role: role.into().trim().to_string(),
            technical,
            personal,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn technical(&self) -> &[QaItem] {
        &self.technical
    }

    pub fn personal(&self) -> &[QaItem] {
        &self.personal
    }

    /// 取某个分组的问答列表
    pub fn section(&self, section: Section) -> &[QaItem] {
        match section {
            Section::Technical => &self.technical,
            Section::Personal => &self.personal,
        }
    }

    /// 两个分组的题目总数
    pub fn total_items(&self) -> usize {
        self.technical.len() + self.personal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}
