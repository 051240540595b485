// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 从机构网站提取的数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityData {
    #[serde(default)]
    pub url: String,
    pub scraped_at: Option<DateTime<Utc>>,
    pub facility_name: Option<String>,
    /// 去重后的电话号码，格式 (AAA) BBB-CCCC
    #[serde(default)]
    pub phone: Vec<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub staff_info: StaffInfo,
    #[serde(default)]
    pub insurance: InsuranceInfo,
    #[serde(default)]
    pub contact_methods: ContactMethods,
    #[serde(default)]
    pub website_quality: WebsiteQuality,
    /// 页面纯文本，仅供行业分类使用
    #[serde(default, skip_serializing)]
    pub text: String,
}

impl FacilityData {
    pub fn display_name(&self) -> &str {
        self.facility_name.as_deref().unwrap_or("Unknown")
    }

    pub fn primary_phone(&self) -> Option<&str> {
        self.phone.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    pub has_staff_section: bool,
    pub staff_count: usize,
}

/// 保险接受情况
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceInfo {
    pub accepts_insurance: bool,
    pub accepts_medicare: bool,
    pub accepts_medicaid: bool,
    pub accepts_tricare: bool,
}

/// 可用联系方式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethods {
    pub phone: bool,
    pub email: bool,
    pub contact_form: bool,
    pub online_booking: bool,
}

/// 网站质量评估
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebsiteQuality {
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    #[serde(default)]
    pub checks: QualityChecks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityChecks {
    pub has_title: bool,
    pub has_meta_description: bool,
    pub has_contact_info: bool,
    pub has_address: bool,
    pub has_images: bool,
    pub has_services_info: bool,
    pub is_mobile_responsive: bool,
    pub has_ssl: bool,
    pub has_social_links: bool,
    pub has_navigation: bool,
}

impl QualityChecks {
    pub const MAX_SCORE: u32 = 10;

    pub fn passed(&self) -> u32 {
        [
            self.has_title,
            self.has_meta_description,
            self.has_contact_info,
            self.has_address,
            self.has_images,
            self.has_services_info,
            self.is_mobile_responsive,
            self.has_ssl,
            self.has_social_links,
            self.has_navigation,
        ]
        .iter()
        .filter(|passed| **passed)
        .count() as u32
    }
}

impl From<QualityChecks> for WebsiteQuality {
    fn from(checks: QualityChecks) -> Self {
        let score = checks.passed();
        Self {
            score,
            max_score: QualityChecks::MAX_SCORE,
            percentage: score as f64 / QualityChecks::MAX_SCORE as f64 * 100.0,
            checks,
        }
    }
}
