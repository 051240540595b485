// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

pub const REASON_INVALID_FORMAT: &str = "Invalid URL format";
pub const REASON_INVALID_PROTOCOL: &str = "Invalid protocol";
pub const REASON_MISSING_HOST: &str = "Missing hostname";

/// 无效URL及原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidUrl {
    pub url: String,
    pub reason: String,
}

/// 重复URL及出现次数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateUrl {
    pub url: String,
    pub count: usize,
}

/// 批量URL校验报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlValidationReport {
    /// 去重后的有效URL，保留首次出现时的大小写
    pub valid: Vec<String>,
    pub invalid: Vec<InvalidUrl>,
    pub duplicates: Vec<DuplicateUrl>,
    /// 非空输入行数
    pub total: usize,
}

/// 校验单个URL，返回失败原因
pub fn check_url(candidate: &str) -> Result<Url, &'static str> {
    let parsed = Url::parse(candidate).map_err(|err| match err {
        // http(s) with nothing after "//" fails in the parser itself
        url::ParseError::EmptyHost => REASON_MISSING_HOST,
        _ => REASON_INVALID_FORMAT,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(REASON_INVALID_PROTOCOL);
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(REASON_MISSING_HOST),
    }
}

/// 校验以换行分隔的URL文本块
///
/// 空白行被忽略；有效URL按完整字符串大小写不敏感去重。
pub fn validate_urls(text: &str) -> UrlValidationReport {
    let mut report = UrlValidationReport::default();
    // lowercase key -> (index into valid, occurrences)
    let mut seen: HashMap<String, (usize, usize)> = HashMap::new();

    for line in text.lines() {
        let candidate = line.trim();
        if candidate.is_empty() {
            continue;
        }
        report.total += 1;

        if let Err(reason) = check_url(candidate) {
            report.invalid.push(InvalidUrl {
                url: candidate.to_string(),
                reason: reason.to_string(),
            });
            continue;
        }

        let key = candidate.to_lowercase();
        match seen.get_mut(&key) {
            Some((_, count)) => *count += 1,
            None => {
                seen.insert(key, (report.valid.len(), 1));
                report.valid.push(candidate.to_string());
            }
        }
    }

    let mut duplicates: Vec<(usize, usize)> = seen
        .into_values()
        .filter(|(_, count)| *count > 1)
        .collect();
    duplicates.sort_by_key(|(index, _)| *index);
    report.duplicates = duplicates
        .into_iter()
        .map(|(index, count)| DuplicateUrl {
            url: report.valid[index].clone(),
            count,
        })
        .collect();

    report
}
