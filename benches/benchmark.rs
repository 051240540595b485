// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 性能基准测试套件
//!
//! 覆盖 URL 校验、行业分类、呼叫合规检查和页面提取这几条热路径

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use scrapex::domain::services::compliance_service::check_call_compliance;
use scrapex::domain::services::extraction_service::ExtractionService;
use scrapex::domain::services::industry_classifier::classify_industry;
use scrapex::domain::services::url_validator::validate_urls;
use std::hint::black_box;

const CLINIC_PAGE: &str = r#"<html><head>
<title>Springfield Family Clinic</title>
<meta name="description" content="Primary care and urgent care in Springfield">
<meta name="viewport" content="width=device-width">
</head><body>
<nav><a href="https://facebook.com/springfieldclinic">Facebook</a></nav>
<h1>Springfield Family Clinic</h1>
<address>123 Main St, Springfield, IL 62701</address>
<div class="hours">Mon-Fri 8am-6pm</div>
<p>Call (217) 555-0142 or email front@springfieldclinic.example to book an appointment.</p>
<section class="services">Primary care, urgent care, pediatrics, laboratory and radiology.</section>
<div class="team"><div class="doctor">Dr. Lee, pediatrician</div><div class="doctor">Dr. Ortiz</div></div>
<p>We accept insurance, Medicare and Medicaid.</p>
<form class="contact-form"></form>
</body></html>"#;

fn url_list(size: usize) -> String {
    (0..size)
        .map(|i| match i % 4 {
            0 => format!("https://clinic{}.example.com/about", i),
            1 => format!("http://dental{}.example.org", i),
            2 => "not a url".to_string(),
            _ => "https://clinic0.example.com/about".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 基准测试：URL 列表校验
fn benchmark_validate_urls(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_urls");
    for size in [10, 100, 1000].iter() {
        let text = url_list(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(validate_urls(text)))
        });
    }
    group.finish();
}

/// 基准测试：行业分类
fn benchmark_classify_industry(c: &mut Criterion) {
    let text = "Our medical clinic offers patient care, hospital referrals and a \
                pharmacy. Schedule an appointment with a doctor or nurse today.";
    c.bench_function("classify_industry", |b| {
        b.iter(|| black_box(classify_industry(black_box(text))))
    });
}

/// 基准测试：呼叫合规检查
fn benchmark_check_call_compliance(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap();
    let mut group = c.benchmark_group("check_call_compliance");
    for phone in ["(212) 555-0100", "+1 415 555 0100", "(999) 555-0100"] {
        group.bench_with_input(BenchmarkId::from_parameter(phone), phone, |b, phone| {
            b.iter(|| black_box(check_call_compliance(phone, now)))
        });
    }
    group.finish();
}

/// 基准测试：机构信息提取
fn benchmark_extract_facility(c: &mut Criterion) {
    c.bench_function("extract_facility", |b| {
        b.iter(|| {
            black_box(ExtractionService::extract_facility(
                "https://springfieldclinic.example",
                black_box(CLINIC_PAGE),
            ))
        })
    });
}

criterion_group!(
    benches,
    benchmark_validate_urls,
    benchmark_classify_industry,
    benchmark_check_call_compliance,
    benchmark_extract_facility
);
criterion_main!(benches);
