// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::facility::{
    ContactMethods, FacilityData, InsuranceInfo, QualityChecks, StaffInfo, WebsiteQuality,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const MAX_NAME_LEN: usize = 200;
const MAX_ADDRESS_LEN: usize = 300;
const MAX_HOURS_LEN: usize = 500;
const MAX_PHONES: usize = 5;
const MAX_SERVICES: usize = 15;
const MAX_SPECIALTIES: usize = 10;

/// 常见医疗服务关键词
pub const SERVICE_KEYWORDS: &[&str] = &[
    "emergency", "urgent care", "surgery", "cardiology", "pediatrics", "orthopedics",
    "neurology", "oncology", "radiology", "laboratory", "physical therapy", "mental health",
    "psychiatry", "dermatology", "primary care", "family medicine", "internal medicine",
    "dental", "vision", "pharmacy", "rehabilitation", "hospice", "home health",
];

/// 医学专科关键词
pub const SPECIALTY_KEYWORDS: &[&str] = &[
    "cardiologist", "neurologist", "orthopedic", "surgeon", "pediatrician", "dermatologist",
    "psychiatrist", "oncologist", "radiologist", "urologist", "gastroenterologist",
    "rheumatologist", "endocrinologist", "nephrologist",
];

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?1?\s*\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})")
        .expect("Failed to compile phone regex")
});
static CONTACT_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{3}[-.]?\d{3}[-.]?\d{4}").expect("Failed to compile contact number regex")
});
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("Failed to compile email regex")
});
static BOOKING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)book|appointment|schedule").expect("Failed to compile booking regex")
});
static SOCIAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)facebook|twitter|linkedin|instagram").expect("Failed to compile social regex")
});

/// 提取服务
///
/// 负责从机构网站的 HTML 中提取结构化数据
pub struct ExtractionService;

impl ExtractionService {
    /// 从页面提取机构信息
    pub fn extract_facility(url: &str, html: &str) -> FacilityData {
        let document = Html::parse_document(html);
        let text = page_text(&document);
        let lower = text.to_lowercase();
        let phone = extract_phones(&text);
        let has_contact_form =
            elements(&document, "form").any(|form| class_contains(&form, &["contact"]));
        let hours = first_with_class(&document, &["hours", "schedule", "operating"])
            .map(|el| truncate(&element_text(&el), MAX_HOURS_LEN))
            .filter(|s| !s.is_empty());
        let website_quality = assess_website_quality(url, &document, &text);

        FacilityData {
            url: url.to_string(),
            scraped_at: Some(Utc::now()),
            facility_name: extract_facility_name(&document),
            address: extract_address(&document),
            hours,
            services: keywords_present(&lower, SERVICE_KEYWORDS, MAX_SERVICES),
            specialties: keywords_present(&lower, SPECIALTY_KEYWORDS, MAX_SPECIALTIES),
            staff_info: extract_staff_info(&document),
            insurance: InsuranceInfo {
                accepts_insurance: lower.contains("insurance"),
                accepts_medicare: lower.contains("medicare"),
                accepts_medicaid: lower.contains("medicaid"),
                accepts_tricare: lower.contains("tricare"),
            },
            contact_methods: ContactMethods {
                phone: !phone.is_empty(),
                email: EMAIL_REGEX.is_match(&text),
                contact_form: has_contact_form,
                online_booking: BOOKING_REGEX.is_match(&text),
            },
            website_quality,
            phone,
            text,
        }
    }
}

fn elements<'a>(document: &'a Html, css: &str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let selector = Selector::parse(css).ok();
    selector
        .into_iter()
        .flat_map(move |sel| document.select(&sel).collect::<Vec<_>>())
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn page_text(document: &Html) -> String {
    elements(document, "body")
        .next()
        .map(|body| element_text(&body))
        .unwrap_or_else(|| element_text(&document.root_element()))
}

fn truncate(text: &str, max: usize) -> String {
    text.trim().chars().take(max).collect()
}

fn class_contains(element: &ElementRef, needles: &[&str]) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| {
            let class = class.to_lowercase();
            needles.iter().any(|n| class.contains(n))
        })
        .unwrap_or(false)
}

fn with_class<'a>(document: &'a Html, needles: &'a [&'a str]) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    elements(document, "[class]").filter(move |el| class_contains(el, needles))
}

fn first_with_class<'a>(document: &'a Html, needles: &'a [&'a str]) -> Option<ElementRef<'a>> {
    with_class(document, needles).next()
}

fn meta_content(document: &Html, css: &str) -> Option<String> {
    elements(document, css)
        .filter_map(|el| el.value().attr("content").map(str::to_string))
        .find(|s| !s.trim().is_empty())
}

fn extract_facility_name(document: &Html) -> Option<String> {
    ["h1", "title"]
        .iter()
        .find_map(|css| {
            elements(document, css)
                .next()
                .map(|el| element_text(&el))
                .filter(|s| !s.is_empty())
        })
        .or_else(|| meta_content(document, r#"meta[property="og:title"]"#))
        .or_else(|| meta_content(document, r#"meta[name="title"]"#))
        .map(|name| truncate(&name, MAX_NAME_LEN))
}

/// 提取去重后的电话号码，最多五个
pub fn extract_phones(text: &str) -> Vec<String> {
    let mut phones: Vec<String> = Vec::new();
    for caps in PHONE_REGEX.captures_iter(text) {
        let phone = format!("({}) {}-{}", &caps[1], &caps[2], &caps[3]);
        if !phones.contains(&phone) {
            phones.push(phone);
        }
        if phones.len() == MAX_PHONES {
            break;
        }
    }
    phones
}

fn extract_address(document: &Html) -> Option<String> {
    elements(document, "address")
        .next()
        .or_else(|| first_with_class(document, &["address"]))
        .or_else(|| first_with_class(document, &["location"]))
        .map(|el| truncate(&element_text(&el), MAX_ADDRESS_LEN))
        .filter(|s| !s.is_empty())
}

/// 返回文本中出现的关键词（首字母大写），保持关键词表顺序
pub fn keywords_present(lower_text: &str, keywords: &[&str], max: usize) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| lower_text.contains(*kw))
        .take(max)
        .map(|kw| title_case(kw))
        .collect()
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_staff_info(document: &Html) -> StaffInfo {
    let count = with_class(document, &["staff", "team", "provider", "doctor", "physician"]).count();
    StaffInfo {
        has_staff_section: count > 0,
        staff_count: count,
    }
}

fn assess_website_quality(url: &str, document: &Html, text: &str) -> WebsiteQuality {
    let checks = QualityChecks {
        has_title: elements(document, "title").next().is_some(),
        has_meta_description: elements(document, r#"meta[name="description"]"#).next().is_some(),
        has_contact_info: CONTACT_NUMBER_REGEX.is_match(text),
        has_address: elements(document, "address").next().is_some(),
        has_images: elements(document, "img").count() > 3,
        has_services_info: with_class(document, &["service", "specialty"]).next().is_some(),
        is_mobile_responsive: elements(document, r#"meta[name="viewport"]"#).next().is_some(),
        has_ssl: url.starts_with("https://"),
        has_social_links: elements(document, "a[href]").any(|a| {
            a.value()
                .attr("href")
                .map(|href| SOCIAL_REGEX.is_match(href))
                .unwrap_or(false)
        }),
        has_navigation: elements(document, "nav").next().is_some(),
    };
    WebsiteQuality::from(checks)
}
