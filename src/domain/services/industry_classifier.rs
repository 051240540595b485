// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 未命中任何行业时使用的通用分类
pub const GENERAL_INDUSTRY: &str = "general";

/// 行业关键词表，按声明顺序参与评分；得分相同时先声明者胜出
pub const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "healthcare",
        &[
            "hospital", "clinic", "medical", "doctor", "physician", "patient", "patients",
            "healthcare", "dental", "dentist", "nurse", "pharmacy", "therapy", "surgery",
        ],
    ),
    (
        "real_estate",
        &[
            "real estate", "realtor", "property", "properties", "homes", "listing", "listings",
            "mortgage", "broker", "apartment", "apartments",
        ],
    ),
    (
        "legal",
        &[
            "attorney", "attorneys", "lawyer", "lawyers", "law firm", "legal", "litigation",
            "counsel", "court", "injury", "divorce",
        ],
    ),
    (
        "restaurant",
        &[
            "restaurant", "menu", "dining", "cuisine", "chef", "food", "reservation",
            "reservations", "takeout", "catering", "brunch",
        ],
    ),
    (
        "automotive",
        &[
            "auto", "car", "cars", "vehicle", "vehicles", "dealership", "tire", "tires",
            "mechanic", "collision", "oil change",
        ],
    ),
    (
        "construction",
        &[
            "construction", "contractor", "contractors", "roofing", "plumbing", "remodeling",
            "renovation", "builder", "hvac", "electrician",
        ],
    ),
    (
        "technology",
        &[
            "software", "technology", "cloud", "saas", "platform", "developer", "developers",
            "api", "cybersecurity", "it services",
        ],
    ),
    (
        "finance",
        &[
            "bank", "banking", "finance", "financial", "investment", "investments", "insurance",
            "loan", "loans", "credit", "accounting", "tax",
        ],
    ),
    (
        "retail",
        &[
            "shop", "store", "retail", "products", "sale", "shipping", "cart", "boutique",
            "checkout",
        ],
    ),
    (
        "education",
        &[
            "school", "education", "university", "college", "course", "courses", "students",
            "tutoring", "academy", "curriculum",
        ],
    ),
    (
        "fitness",
        &[
            "gym", "fitness", "workout", "trainer", "yoga", "pilates", "membership", "crossfit",
        ],
    ),
    (
        "beauty",
        &[
            "salon", "spa", "beauty", "hair", "nails", "massage", "skincare", "barber",
        ],
    ),
];

/// 分类置信度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// 由命中总次数和不同关键词数量推导置信度；不足以分类时返回 `None`
    pub fn from_counts(total_matches: usize, distinct_keywords: usize) -> Option<Self> {
        if total_matches >= 10 && distinct_keywords >= 3 {
            Some(Confidence::High)
        } else if total_matches >= 5 && distinct_keywords >= 2 {
            Some(Confidence::Medium)
        } else if total_matches >= 2 {
            Some(Confidence::Low)
        } else {
            None
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// 单个关键词命中情况
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub count: usize,
}

/// 行业分类结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryClassification {
    pub industry: String,
    pub confidence: Confidence,
    /// 胜出行业的关键词命中总次数
    pub score: usize,
    pub matched_keywords: Vec<KeywordMatch>,
}

impl IndustryClassification {
    fn general(score: usize) -> Self {
        Self {
            industry: GENERAL_INDUSTRY.to_string(),
            confidence: Confidence::Low,
            score,
            matched_keywords: Vec::new(),
        }
    }

    pub fn is_general(&self) -> bool {
        self.industry == GENERAL_INDUSTRY
    }
}

struct IndustryMatcher {
    industry: &'static str,
    keywords: Vec<(&'static str, Regex)>,
}

/// 基于关键词频率的行业分类器
pub struct IndustryClassifier {
    matchers: Vec<IndustryMatcher>,
}

impl Default for IndustryClassifier {
    fn default() -> Self {
        Self::new(INDUSTRY_KEYWORDS)
    }
}

impl IndustryClassifier {
    /// 使用给定的行业关键词表构建分类器
    pub fn new(table: &'static [(&'static str, &'static [&'static str])]) -> Self {
        let matchers = table
            .iter()
            .map(|(industry, keywords)| IndustryMatcher {
                industry: *industry,
                keywords: keywords
                    .iter()
                    .filter_map(|kw| {
                        Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw)))
                            .ok()
                            .map(|re| (*kw, re))
                    })
                    .collect(),
            })
            .collect();
        Self { matchers }
    }

    /// 对文本进行行业分类
    ///
    /// 每个关键词按整词、大小写不敏感计数；总次数最高的行业胜出，
    /// 并列时保留声明顺序靠前的行业。
    pub fn classify(&self, text: &str) -> IndustryClassification {
        let mut best: Option<(&'static str, usize, Vec<KeywordMatch>)> = None;

        for matcher in &self.matchers {
            let matches: Vec<KeywordMatch> = matcher
                .keywords
                .iter()
                .filter_map(|(kw, re)| {
                    let count = re.find_iter(text).count();
                    (count > 0).then(|| KeywordMatch {
                        keyword: kw.to_string(),
                        count,
                    })
                })
                .collect();
            let score: usize = matches.iter().map(|m| m.count).sum();

            let replace = match &best {
                None => true,
                Some((_, best_score, _)) => score > *best_score,
            };
            if replace {
                best = Some((matcher.industry, score, matches));
            }
        }

        let Some((industry, score, mut matched_keywords)) = best else {
            return IndustryClassification::general(0);
        };

        match Confidence::from_counts(score, matched_keywords.len()) {
            Some(confidence) => {
                matched_keywords.sort_by(|a, b| b.count.cmp(&a.count));
                IndustryClassification {
                    industry: industry.to_string(),
                    confidence,
                    score,
                    matched_keywords,
                }
            }
            None => IndustryClassification::general(score),
        }
    }
}

static DEFAULT_CLASSIFIER: Lazy<IndustryClassifier> = Lazy::new(IndustryClassifier::default);

/// 使用内置关键词表进行分类
pub fn classify_industry(text: &str) -> IndustryClassification {
    DEFAULT_CLASSIFIER.classify(text)
}
