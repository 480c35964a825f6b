//! 测验会话
//!
//! 启动时构造一次，持有题库和导航控制器，以引用传给显示层。

use crate::error::QuizResult;
use crate::filter::FilterCascade;
use crate::models::catalog::DatasetCatalog;
use crate::models::question::QuestionRecord;
use crate::navigation::{NavigationController, ViewToken};
use crate::store::{LoadReport, QuestionStore};

pub struct QuizSession {
    store: QuestionStore,
    nav: NavigationController,
}

impl QuizSession {
    pub fn new(store: QuestionStore) -> Self {
        let nav = NavigationController::new(&store);
        Self { store, nav }
    }

    /// 从数据集目录加载并创建会话
    pub fn load(catalog: &DatasetCatalog, order: &[String]) -> (Self, LoadReport) {
        let mut store = QuestionStore::new();
        let report = store.load(catalog, order);
        (Self::new(store), report)
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn filters(&self) -> FilterCascade<'_> {
        FilterCascade::new(&self.store)
    }

    /// 当前题目；题库为空时为 None
    pub fn current(&self) -> Option<&QuestionRecord> {
        self.nav
            .current_index()
            .and_then(|index| self.store.at(index).ok())
    }

    pub fn view_token(&self) -> Option<ViewToken> {
        self.nav.view_token()
    }

    /// 该卡片是否仍在显示
    pub fn is_current(&self, token: ViewToken) -> bool {
        self.nav.view_token() == Some(token)
    }

    pub fn jump_to(&mut self, index: usize) -> QuizResult<()> {
        self.nav.jump_to(index)
    }

    pub fn jump_to_key(&mut self, year: &str, set: &str, number: &str) -> QuizResult<()> {
        self.nav.jump_to_key(&self.store, year, set, number)
    }

    pub fn next(&mut self) -> bool {
        self.nav.next()
    }

    pub fn prev(&mut self) -> bool {
        self.nav.prev()
    }

    pub fn at_start(&self) -> bool {
        self.nav.at_start()
    }

    pub fn at_end(&self) -> bool {
        self.nav.at_end()
    }
}
