//! 导航控制器
//!
//! 维护当前题目索引。不循环：到达两端后 next/prev 不再移动。

use tracing::debug;

use crate::error::{QuizError, QuizResult};
use crate::store::QuestionStore;

/// 当前显示的题目卡片
///
/// 每次显示都会生成新的 `generation`，包括重新跳到当前这道题。
/// 因此重新跳到同一题后，旧卡片上尚未返回的 AI 建议会被丢弃，
/// 按钮也随新卡片重新可用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToken {
    pub generation: u64,
    pub index: usize,
}

/// 导航控制器
#[derive(Debug, Clone)]
pub struct NavigationController {
    current: Option<usize>,
    len: usize,
    generation: u64,
}

impl NavigationController {
    /// 为给定题库创建控制器；非空题库从第 0 题开始
    pub fn new(store: &QuestionStore) -> Self {
        let len = store.len();
        Self {
            current: if len > 0 { Some(0) } else { None },
            len,
            generation: 0,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn view_token(&self) -> Option<ViewToken> {
        self.current.map(|index| ViewToken {
            generation: self.generation,
            index,
        })
    }

    // 即使 index 与当前相同也递增 generation，旧卡片的 token 随之失效
    fn show(&mut self, index: usize) {
        self.current = Some(index);
        self.generation += 1;
        debug!("显示第 {}/{} 题", index + 1, self.len);
    }

    /// 跳到指定索引，失败时状态不变
    pub fn jump_to(&mut self, index: usize) -> QuizResult<()> {
        if self.len == 0 {
            return Err(QuizError::EmptyStore);
        }
        if index >= self.len {
            return Err(QuizError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.show(index);
        Ok(())
    }

    /// 按 (年度, 问题组, 题号) 跳转，失败时状态不变
    pub fn jump_to_key(
        &mut self,
        store: &QuestionStore,
        year: &str,
        set: &str,
        number: &str,
    ) -> QuizResult<()> {
        if store.is_empty() {
            return Err(QuizError::EmptyStore);
        }
        let index = store.find_by_key(year, set, number)?;
        self.jump_to(index)
    }

    /// 前进一题，返回是否移动
    pub fn next(&mut self) -> bool {
        match self.current {
            Some(index) if index + 1 < self.len => {
                self.show(index + 1);
                true
            }
            _ => false,
        }
    }

    /// 后退一题，返回是否移动
    pub fn prev(&mut self) -> bool {
        match self.current {
            Some(index) if index > 0 => {
                self.show(index - 1);
                true
            }
            _ => false,
        }
    }

    /// 是否在第一题（空题库视为 true，"上一题"按钮禁用）
    pub fn at_start(&self) -> bool {
        self.current.map_or(true, |index| index == 0)
    }

    /// 是否在最后一题（空题库视为 true，"下一题"按钮禁用）
    pub fn at_end(&self) -> bool {
        self.current.map_or(true, |index| index + 1 >= self.len)
    }
}
