use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use sokuryo_quiz::models::load_catalog;
use sokuryo_quiz::render;
use sokuryo_quiz::services::{AdviceService, MemoStore};
use sokuryo_quiz::utils::logging;
use sokuryo_quiz::{
    AdviceButton, AdviceFlow, AdviceOutcome, AdviceRefusal, Config, QuizSession, Selection,
    ViewToken,
};

const HELP: &str = "\
n / p            次の問題 / 前の問題
g <番号>         指定番号の問題へ
y [年度]         年度一覧 / 年度を選択
s [問題セット]   問題セット一覧 / 問題セットを選択
k [問番号]       問番号一覧 / 問番号を選択して移動
j <年度> <セット> <問番号>  直接移動
h / a            ヒント / 模範解答と解説
m [テキスト]     メモを表示 / 保存
ai <解答>        この解答でAIに相談する
help / quit";

/// 当前显示的卡片
struct Card {
    token: ViewToken,
    advice: AdviceButton,
}

struct AdviceMessage {
    token: ViewToken,
    outcome: AdviceOutcome,
}

fn show_card(session: &QuizSession, memos: &MemoStore) -> Option<Card> {
    let (Some(record), Some(token)) = (session.current(), session.view_token()) else {
        println!("問題の読み込みに失敗しました。");
        return None;
    };

    debug!("显示题目 {}", record);
    println!("{}", "─".repeat(60));
    print!("{}", render::card(record, token.index, session.store().len()));
    let memo = memos.get(record.id());
    if !memo.is_empty() {
        println!("[メモ] {}", memo);
    }
    let prev = if session.at_start() { "-" } else { "p" };
    let next = if session.at_end() { "-" } else { "n" };
    println!("[{}] 前へ  [{}] 次へ", prev, next);

    Some(Card {
        token,
        advice: AdviceButton::new(),
    })
}

fn print_options(label: &str, options: &[String]) {
    if options.is_empty() {
        println!("{}: (なし)", label);
    } else {
        println!("{}: {}", label, options.join(" | "));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config.data_folder, config.has_api_key());

    // 加载数据集
    let catalog = load_catalog(&config.data_folder).await?;
    let order = if config.dataset_order.is_empty() {
        catalog.names()
    } else {
        config.dataset_order.clone()
    };
    let (mut session, report) = QuizSession::load(&catalog, &order);
    for skipped in &report.skipped {
        println!("⚠️ {}", skipped);
    }

    let mut memos = MemoStore::open(&config.memo_file)?;

    let advice_flow = match AdviceService::new(&config) {
        Ok(service) => Some(AdviceFlow::new(service)),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<AdviceMessage>();
    let mut selection = Selection::new();
    let mut card = show_card(&session, &memos);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(message) = rx.recv() => {
                // 已经离开该卡片时丢弃结果
                if !session.is_current(message.token) {
                    debug!("丢弃过期的 AI 建议 (卡片 {:?})", message.token);
                    continue;
                }
                match message.outcome {
                    AdviceOutcome::Advice(text) => println!("【AIからのアドバイス】\n\n{}", text),
                    AdviceOutcome::Failed(_) => println!(
                        "AIアドバイスの取得に失敗しました。APIキーまたはネットワーク接続を確認してください。"
                    ),
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("⚠️ 读取输入失败: {}", e);
                        continue;
                    }
                };
                let line = line.trim();
                let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
                let rest = rest.trim();

                match command {
                    "" => {}
                    "quit" | "exit" => break,
                    "help" => println!("{}", HELP),
                    "n" => {
                        if session.next() {
                            card = show_card(&session, &memos);
                        }
                    }
                    "p" => {
                        if session.prev() {
                            card = show_card(&session, &memos);
                        }
                    }
                    "g" => match rest.parse::<usize>() {
                        Ok(n) if n > 0 => match session.jump_to(n - 1) {
                            Ok(()) => card = show_card(&session, &memos),
                            Err(e) => println!("{}", e),
                        },
                        _ => println!("番号を指定してください。"),
                    },
                    "y" => {
                        if rest.is_empty() {
                            print_options("年度", &session.filters().years());
                        } else {
                            selection.select_year(rest);
                            print_options("問題セット", &selection.set_options(&session.filters()));
                        }
                    }
                    "s" => {
                        if selection.year().is_none() {
                            println!("先に年度を選択してください。");
                        } else if rest.is_empty() {
                            print_options("問題セット", &selection.set_options(&session.filters()));
                        } else {
                            selection.select_set(rest);
                            print_options("問番号", &selection.number_options(&session.filters()));
                        }
                    }
                    "k" => {
                        if rest.is_empty() {
                            print_options("問番号", &selection.number_options(&session.filters()));
                        } else {
                            selection.select_number(rest);
                            let Some((year, set, number)) = selection.key() else {
                                println!("先に年度と問題セットを選択してください。");
                                continue;
                            };
                            match session.jump_to_key(year, set, number) {
                                Ok(()) => card = show_card(&session, &memos),
                                Err(e) => println!("指定された問題が見つかりません。({})", e),
                            }
                        }
                    }
                    "j" => {
                        let parts: Vec<&str> = rest.split_whitespace().collect();
                        match parts.as_slice() {
                            [year, set, number] => match session.jump_to_key(year, set, number) {
                                Ok(()) => card = show_card(&session, &memos),
                                Err(e) => println!("指定された問題が見つかりません。({})", e),
                            },
                            _ => println!("使い方: j <年度> <セット> <問番号>"),
                        }
                    }
                    "h" => {
                        if let Some(record) = session.current() {
                            println!("{}", render::hint(record));
                        }
                    }
                    "a" => {
                        if let Some(record) = session.current() {
                            println!("{}", render::answer(record));
                        }
                    }
                    "m" => {
                        let Some(record) = session.current() else { continue };
                        if rest.is_empty() {
                            let memo = memos.get(record.id());
                            println!("{}", if memo.is_empty() { "(メモなし)" } else { memo });
                        } else {
                            match memos.save(record.id(), rest) {
                                Ok(()) => println!("「{}」のメモを保存しました！", record.id()),
                                Err(e) => {
                                    warn!("⚠️ 备忘录保存失败 #{}: {:#}", record.id(), e);
                                    println!("メモの保存に失敗しました。");
                                }
                            }
                        }
                    }
                    "ai" => {
                        let (Some(record), Some(current)) = (session.current(), card.as_ref()) else {
                            continue;
                        };
                        let Some(flow) = advice_flow.as_ref() else {
                            println!("APIキーが設定されていません。");
                            continue;
                        };
                        let task = match flow.begin(&current.advice, record, rest) {
                            Ok(task) => task,
                            Err(AdviceRefusal::EmptyAnswer) => {
                                println!("解答を入力してから「AIに相談」してください。");
                                continue;
                            }
                            Err(AdviceRefusal::Busy) => {
                                println!("AIが分析中...⏳");
                                continue;
                            }
                        };
                        println!("AIが分析中...⏳");
                        debug!("AI 请求已排队: #{}", task.request().question_id);

                        let tx = tx.clone();
                        let token = current.token;
                        tokio::spawn(async move {
                            let outcome = task.run().await;
                            let _ = tx.send(AdviceMessage { token, outcome });
                        });
                    }
                    other => println!("不明なコマンド: {} (help で一覧)", other),
                }
            }
        }
    }

    Ok(())
}
