use sokuryo_quiz::models::{load_catalog, DatasetCatalog, QuestionData};
use sokuryo_quiz::{render, QuizError, QuizSession};
use std::path::PathBuf;

fn rec(id: &str, year: &str, set: &str, number: &str) -> QuestionData {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "year": year,
        "q_set": set,
        "q_num": number,
        "type": "calculation",
        "question_text": "問題文",
        "answer_final": "答え",
    }))
    .unwrap()
}

#[test]
fn test_two_collections_end_to_end() {
    let mut catalog = DatasetCatalog::new();
    catalog.insert_records("A", vec![rec("a1", "令和5年", "必須問題", "問1")]);
    catalog.insert_records("B", vec![rec("b1", "R5", "必須問題", "問2")]);

    let (mut session, report) = QuizSession::load(&catalog, &["A".to_string(), "B".to_string()]);

    assert_eq!(report.loaded, 2);
    assert_eq!(session.store().len(), 2);
    assert!(session
        .store()
        .all()
        .iter()
        .all(|r| r.normalized_year() == "R5"));

    session.jump_to_key("R5", "必須問題", "問2").unwrap();
    assert_eq!(session.current().unwrap().id(), "b1");
    assert!(!session.next());
    assert_eq!(session.current().unwrap().id(), "b1");
    assert!(session.at_end());
}

#[test]
fn test_cascade_over_loaded_session() {
    let mut catalog = DatasetCatalog::new();
    catalog.insert_records(
        "r4",
        vec![
            rec("1", "令和4年", "選択問題B", "問1"),
            rec("2", "令和4年", "必須問題", "問2"),
            rec("3", "令和4年", "必須問題", "問1"),
        ],
    );
    catalog.insert_records("r3", vec![rec("4", "R3", "必須問題", "問1")]);
    catalog.insert_records("r5", vec![rec("5", "R5", "必須問題", "問1")]);

    let (session, _) = QuizSession::load(
        &catalog,
        &["r3".to_string(), "r5".to_string(), "r4".to_string()],
    );
    let filters = session.filters();

    assert_eq!(filters.years(), vec!["R5", "R4", "R3"]);
    assert_eq!(filters.question_sets("R4"), vec!["必須問題", "選択問題B"]);
    assert_eq!(filters.question_numbers("R4", "必須問題"), vec!["問1", "問2"]);
}

#[test]
fn test_unknown_key_reports_not_found() {
    let mut catalog = DatasetCatalog::new();
    catalog.insert_records("A", vec![rec("a1", "R5", "必須問題", "問1")]);
    let (mut session, _) = QuizSession::load(&catalog, &["A".to_string()]);

    let err = session.jump_to_key("R4", "必須問題", "問1").unwrap_err();
    assert!(matches!(err, QuizError::NotFound { .. }));
    assert_eq!(session.navigation().current_index(), Some(0));
}

#[test]
fn test_load_catalog_from_folder() {
    let folder: PathBuf =
        std::env::temp_dir().join(format!("sokuryo_quiz_data_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&folder);
    std::fs::create_dir_all(&folder).unwrap();

    std::fs::write(
        folder.join("r7_no1.toml"),
        r#"
[[questions]]
id = "r7_no1_q1"
year = "令和7年"
q_set = "必須問題"
q_num = "問1"
type = "fill-in-the-blank"
question_text = "空欄を埋めよ。"
answer = { "ア" = "三角点" }
"#,
    )
    .unwrap();
    std::fs::write(
        folder.join("r6_no1.json"),
        r#"[{"id": "r6_no1_q1", "year": "R6", "q_set": "必須問題", "q_num": "問1"}]"#,
    )
    .unwrap();
    std::fs::write(folder.join("broken.toml"), "questions = 3").unwrap();
    std::fs::write(folder.join("notes.txt"), "ignored").unwrap();

    let catalog = tokio_test::block_on(load_catalog(folder.to_str().unwrap())).unwrap();
    assert_eq!(catalog.names(), vec!["broken", "r6_no1", "r7_no1"]);

    let (session, report) = QuizSession::load(&catalog, &catalog.names());
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(session.filters().years(), vec!["R7", "R6"]);

    let _ = std::fs::remove_dir_all(&folder);
}

#[test]
fn test_irregular_records_load_and_render() {
    let folder: PathBuf =
        std::env::temp_dir().join(format!("sokuryo_quiz_irregular_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&folder);
    std::fs::create_dir_all(&folder).unwrap();

    std::fs::write(
        folder.join("mixed.json"),
        r#"[
            {"id": "n1", "year": "R6", "q_set": "必須問題", "q_num": "問1",
             "type": "calculation", "answer": null, "answer_text": "42"},
            {"id": "n2", "year": "R5", "q_set": "必須問題", "q_num": "問1",
             "type": "calculation", "answer": {"ア": "1"}, "answer_text": "final 42"},
            {"id": "n3", "year": "R05", "q_set": "必須問題", "q_num": "問1"},
            {"id": "n4", "year": "R+5", "q_set": "必須問題", "q_num": "問1"}
        ]"#,
    )
    .unwrap();

    let catalog = tokio_test::block_on(load_catalog(folder.to_str().unwrap())).unwrap();
    let (mut session, report) = QuizSession::load(&catalog, &catalog.names());
    assert!(report.skipped.is_empty());
    assert_eq!(report.loaded, 4);
    assert_eq!(session.filters().years(), vec!["R6", "R5"]);

    let card = render::answer(session.current().unwrap());
    assert!(card.starts_with("【模範解答】\n42\n"));

    session.jump_to_key("R5", "必須問題", "問1").unwrap();
    let card = render::answer(session.current().unwrap());
    assert!(card.starts_with("【模範解答】\nfinal 42\n"));
    assert!(!card.contains("ア: 1"));

    let _ = std::fs::remove_dir_all(&folder);
}
