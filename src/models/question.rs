use serde::Deserialize;
use std::fmt;

/// 题型分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// 填空题（答案为 空栏 → 值 的映射）
    FillInTheBlank,
    /// 论述题 / 计算题（答案为 过程 + 最终结果）
    FreeForm,
}

impl QuestionKind {
    /// 从原始 type 字符串判断题型
    ///
    /// 只要包含 `fill-in-the-blank` 即视为填空题
    pub fn from_type_label(label: &str) -> Self {
        if label.contains("fill-in-the-blank") {
            QuestionKind::FillInTheBlank
        } else {
            QuestionKind::FreeForm
        }
    }
}

/// 填空题的一个空栏
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankAnswer {
    pub label: String,
    pub value: String,
}

/// 模范解答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// 空栏 → 值（保持数据中的顺序，键唯一）
    Blanks(Vec<BlankAnswer>),
    /// 计算过程（可选）+ 最终答案
    Text {
        process: Option<String>,
        final_text: String,
    },
}

impl Answer {
    /// 发送给 AI 建议服务的"标准答案"文本
    pub fn expected_text(&self) -> String {
        match self {
            Answer::Blanks(blanks) => blanks
                .iter()
                .map(|b| format!("{}: {}", b.label, b.value))
                .collect::<Vec<_>>()
                .join("\n"),
            Answer::Text {
                process,
                final_text,
            } => {
                if final_text.is_empty() {
                    process.clone().unwrap_or_default()
                } else {
                    final_text.clone()
                }
            }
        }
    }
}

/// 数据文件中的一道题（未归一化）
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionData {
    pub id: String,
    #[serde(rename = "year", default)]
    pub raw_year: Option<String>,
    #[serde(rename = "q_set", default)]
    pub question_set: String,
    #[serde(rename = "q_num", default)]
    pub question_number: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(rename = "type", default)]
    pub type_label: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub question_image: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,

    #[serde(rename = "answer", default, deserialize_with = "deserialize_blanks")]
    pub answer_blanks: Option<Vec<BlankAnswer>>,
    #[serde(default)]
    pub answer_process: Option<String>,
    #[serde(default)]
    pub answer_text: Option<String>,
    #[serde(default)]
    pub answer_final: Option<String>,
}

impl QuestionData {
    pub fn kind(&self) -> QuestionKind {
        QuestionKind::from_type_label(&self.type_label)
    }

    /// 组装模范解答，由题型决定形式
    ///
    /// - 填空题：`answer` 映射（缺失时为空）
    /// - 其他：`answer_text`，其次 `answer_final`，多余的 `answer` 映射被忽略
    pub fn answer(&self) -> Answer {
        if self.kind() == QuestionKind::FillInTheBlank {
            return Answer::Blanks(self.answer_blanks.clone().unwrap_or_default());
        }
        let final_text = self
            .answer_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.answer_final.as_deref())
            .unwrap_or_default()
            .to_string();
        Answer::Text {
            process: self.answer_process.clone(),
            final_text,
        }
    }
}

// 填空答案：保持键的顺序，值可以是字符串或数字；null 视为没有答案
fn deserialize_blanks<'de, D>(deserializer: D) -> Result<Option<Vec<BlankAnswer>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{MapAccess, Visitor};

    struct AnswerValue(String);

    impl<'de> Deserialize<'de> for AnswerValue {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct ValueVisitor;

            impl<'de> Visitor<'de> for ValueVisitor {
                type Value = AnswerValue;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a string or number answer value")
                }

                fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(AnswerValue(value.to_string()))
                }

                fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(AnswerValue(value.to_string()))
                }

                fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(AnswerValue(value.to_string()))
                }

                fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(AnswerValue(value.to_string()))
                }
            }

            deserializer.deserialize_any(ValueVisitor)
        }
    }

    struct Blanks(Vec<BlankAnswer>);

    impl<'de> Deserialize<'de> for Blanks {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_map(BlanksVisitor)
        }
    }

    struct BlanksVisitor;

    impl<'de> Visitor<'de> for BlanksVisitor {
        type Value = Blanks;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of blank label to answer value")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut blanks: Vec<BlankAnswer> = Vec::new();
            while let Some((label, AnswerValue(value))) = map.next_entry::<String, AnswerValue>()? {
                if let Some(existing) = blanks.iter_mut().find(|b| b.label == label) {
                    existing.value = value;
                } else {
                    blanks.push(BlankAnswer { label, value });
                }
            }
            Ok(Blanks(blanks))
        }
    }

    Ok(Option::<Blanks>::deserialize(deserializer)?.map(|Blanks(blanks)| blanks))
}

/// 题库中的一道题（年度已归一化）
///
/// 加载后不可变，`normalized_year` 只在加载时计算一次
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    normalized_year: String,
    data: QuestionData,
}

impl QuestionRecord {
    pub(crate) fn new(data: QuestionData, normalized_year: String) -> Self {
        Self {
            normalized_year,
            data,
        }
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn raw_year(&self) -> &str {
        self.data.raw_year.as_deref().unwrap_or_default()
    }

    pub fn normalized_year(&self) -> &str {
        &self.normalized_year
    }

    pub fn question_set(&self) -> &str {
        &self.data.question_set
    }

    pub fn question_number(&self) -> &str {
        &self.data.question_number
    }

    pub fn data(&self) -> &QuestionData {
        &self.data
    }

    /// 三元组是否完全一致（区分大小写，不做年度以外的归一化）
    pub fn matches_key(&self, year: &str, set: &str, number: &str) -> bool {
        self.normalized_year == year
            && self.data.question_set == set
            && self.data.question_number == number
    }
}

impl fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} (#{})",
            self.normalized_year, self.data.question_set, self.data.question_number, self.data.id
        )
    }
}
