//! 题目卡片的文本渲染

use crate::models::question::{Answer, QuestionRecord};

const NO_HINT: &str = "この問題にはヒントがありません。";

/// 标题：`[令和5年] 必須問題 問1`
pub fn title(record: &QuestionRecord) -> String {
    format!(
        "[{}] {} {}",
        record.raw_year(),
        record.question_set(),
        record.question_number()
    )
}

pub fn genres(record: &QuestionRecord) -> String {
    record.data().genre.join(" / ")
}

pub fn hint(record: &QuestionRecord) -> String {
    let hint = record
        .data()
        .hint
        .as_deref()
        .filter(|h| !h.is_empty())
        .unwrap_or(NO_HINT);
    format!("【ヒント】\n{}", hint)
}

/// 模范解答 + 解说
///
/// 形式由题型决定：填空题逐行列出空栏，其他题型显示解答过程和最终答案
pub fn answer(record: &QuestionRecord) -> String {
    let data = record.data();
    let mut out = String::from("【模範解答】\n");

    match data.answer() {
        Answer::Blanks(blanks) => {
            for blank in &blanks {
                out.push_str(&format!("{}: {}\n", blank.label, blank.value));
            }
        }
        Answer::Text {
            process,
            final_text,
        } => {
            if let Some(process) = process.filter(|p| !p.is_empty()) {
                out.push_str(&process);
                out.push('\n');
            }
            out.push_str(&final_text);
            out.push('\n');
        }
    }

    out.push_str("\n【解説】\n");
    out.push_str(data.explanation.as_deref().unwrap_or_default());
    out
}

/// 完整卡片（题干部分）
pub fn card(record: &QuestionRecord, position: usize, total: usize) -> String {
    let data = record.data();
    let mut out = format!("({}/{}) {}\n", position + 1, total, title(record));

    let genres = genres(record);
    if !genres.is_empty() {
        out.push_str(&genres);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&data.question_text);
    out.push('\n');

    if let Some(image) = data.question_image.as_deref().filter(|i| !i.is_empty()) {
        out.push_str(&format!("[図] {}\n", image));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::DatasetCatalog;
    use crate::store::QuestionStore;

    fn record_from(json: serde_json::Value) -> QuestionStore {
        let mut catalog = DatasetCatalog::new();
        catalog.insert_records("main", vec![serde_json::from_value(json).unwrap()]);
        let mut store = QuestionStore::new();
        store.load(&catalog, &["main".to_string()]);
        store
    }

    #[test]
    fn test_fill_in_card() {
        let store = record_from(serde_json::json!({
            "id": "r7_no1_q1",
            "year": "令和7年",
            "q_set": "必須問題",
            "q_num": "問1",
            "genre": ["測量法", "用語"],
            "type": "fill-in-the-blank",
            "question_text": "空欄を埋めよ。",
            "question_image": "img/r7_q1.png",
            "answer": { "ア": "基本測量", "イ": "公共測量" },
            "explanation": "測量法第4条・第5条。"
        }));
        let record = store.at(0).unwrap();

        assert_eq!(title(record), "[令和7年] 必須問題 問1");
        let card = card(record, 0, 3);
        assert!(card.starts_with("(1/3) [令和7年] 必須問題 問1\n測量法 / 用語\n"));
        assert!(card.contains("[図] img/r7_q1.png"));
        assert_eq!(
            answer(record),
            "【模範解答】\nア: 基本測量\nイ: 公共測量\n\n【解説】\n測量法第4条・第5条。"
        );
        assert_eq!(hint(record), format!("【ヒント】\n{}", NO_HINT));
    }

    #[test]
    fn test_calculation_card() {
        let store = record_from(serde_json::json!({
            "id": "r7_no2_q3",
            "year": "R7",
            "q_set": "選択問題A",
            "q_num": "問3",
            "type": "calculation",
            "question_text": "標高を求めよ。",
            "hint": "器械高を先に求める。",
            "answer_process": "H = 10.000 + 1.234 - 0.567",
            "answer_text": "10.667 m"
        }));
        let record = store.at(0).unwrap();

        assert_eq!(hint(record), "【ヒント】\n器械高を先に求める。");
        assert!(answer(record).starts_with("【模範解答】\nH = 10.000 + 1.234 - 0.567\n10.667 m\n"));
    }

    #[test]
    fn test_free_form_ignores_stray_answer_map() {
        let store = record_from(serde_json::json!({
            "id": "r5_no2_q1",
            "year": "R5",
            "q_set": "必須問題",
            "q_num": "問1",
            "type": "calculation",
            "answer": { "ア": "1" },
            "answer_process": "1 + 41",
            "answer_text": "final 42",
            "explanation": "足し算。"
        }));
        let record = store.at(0).unwrap();

        assert_eq!(
            answer(record),
            "【模範解答】\n1 + 41\nfinal 42\n\n【解説】\n足し算。"
        );
    }
}
