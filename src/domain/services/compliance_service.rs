// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 允许呼叫的本地起始小时（含）
pub const BUSINESS_HOURS_START: u32 = 8;
/// 允许呼叫的本地结束小时（不含）
pub const BUSINESS_HOURS_END: u32 = 21;
/// 无法识别州时使用的默认时区
pub const DEFAULT_TIMEZONE: Tz = Tz::America__New_York;

/// 要求通话双方同意录音的州
pub const TWO_PARTY_CONSENT_STATES: &[&str] = &[
    "CA", "CT", "FL", "IL", "MD", "MA", "MI", "MT", "NV", "NH", "PA", "WA",
];

const AREA_CODES_BY_STATE: &[(&str, &[&str])] = &[
    ("AL", &["205", "251", "256", "334", "659", "938"]),
    ("AK", &["907"]),
    ("AZ", &["480", "520", "602", "623", "928"]),
    ("AR", &["479", "501", "870"]),
    (
        "CA",
        &[
            "209", "213", "279", "310", "323", "408", "415", "424", "442", "510", "530", "559",
            "562", "619", "626", "628", "650", "657", "661", "669", "707", "714", "747", "760",
            "805", "818", "820", "831", "840", "858", "909", "916", "925", "949", "951",
        ],
    ),
    ("CO", &["303", "719", "720", "970"]),
    ("CT", &["203", "475", "860", "959"]),
    ("DE", &["302"]),
    ("DC", &["202", "771"]),
    (
        "FL",
        &[
            "239", "305", "321", "352", "386", "407", "561", "689", "727", "754", "772", "786",
            "813", "850", "863", "904", "941", "954",
        ],
    ),
    (
        "GA",
        &["229", "404", "470", "478", "678", "706", "762", "770", "912"],
    ),
    ("HI", &["808"]),
    ("ID", &["208", "986"]),
    (
        "IL",
        &[
            "217", "224", "309", "312", "331", "618", "630", "708", "773", "779", "815", "847",
            "872",
        ],
    ),
    ("IN", &["219", "260", "317", "463", "574", "765", "812", "930"]),
    ("IA", &["319", "515", "563", "641", "712"]),
    ("KS", &["316", "620", "785", "913"]),
    ("KY", &["270", "364", "502", "606", "859"]),
    ("LA", &["225", "318", "337", "504", "985"]),
    ("ME", &["207"]),
    ("MD", &["240", "301", "410", "443", "667"]),
    (
        "MA",
        &["339", "351", "413", "508", "617", "774", "781", "857", "978"],
    ),
    (
        "MI",
        &[
            "231", "248", "269", "313", "517", "586", "616", "734", "810", "906", "947", "989",
        ],
    ),
    ("MN", &["218", "320", "507", "612", "651", "763", "952"]),
    ("MS", &["228", "601", "662", "769"]),
    ("MO", &["314", "417", "573", "636", "660", "816"]),
    ("MT", &["406"]),
    ("NE", &["308", "402", "531"]),
    ("NV", &["702", "725", "775"]),
    ("NH", &["603"]),
    (
        "NJ",
        &["201", "551", "609", "640", "732", "848", "856", "862", "908", "973"],
    ),
    ("NM", &["505", "575"]),
    (
        "NY",
        &[
            "212", "315", "332", "347", "516", "518", "585", "607", "631", "646", "680", "716",
            "718", "838", "845", "914", "917", "929", "934",
        ],
    ),
    (
        "NC",
        &["252", "336", "704", "743", "828", "910", "919", "980", "984"],
    ),
    ("ND", &["701"]),
    (
        "OH",
        &[
            "216", "220", "234", "330", "380", "419", "440", "513", "567", "614", "740", "937",
        ],
    ),
    ("OK", &["405", "539", "580", "918"]),
    ("OR", &["458", "503", "541", "971"]),
    (
        "PA",
        &[
            "215", "223", "267", "272", "412", "445", "484", "570", "610", "717", "724", "814",
            "878",
        ],
    ),
    ("RI", &["401"]),
    ("SC", &["803", "839", "843", "854", "864"]),
    ("SD", &["605"]),
    ("TN", &["423", "615", "629", "731", "865", "901", "931"]),
    (
        "TX",
        &[
            "210", "214", "254", "281", "325", "346", "361", "409", "430", "432", "469", "512",
            "682", "713", "726", "737", "806", "817", "830", "832", "903", "915", "936", "940",
            "956", "972", "979",
        ],
    ),
    ("UT", &["385", "435", "801"]),
    ("VT", &["802"]),
    (
        "VA",
        &["276", "434", "540", "571", "703", "757", "804"],
    ),
    ("WA", &["206", "253", "360", "425", "509", "564"]),
    ("WV", &["304", "681"]),
    ("WI", &["262", "414", "534", "608", "715", "920"]),
    ("WY", &["307"]),
];

const STATE_TIMEZONES: &[(&str, Tz)] = &[
    ("AL", Tz::America__Chicago),
    ("AK", Tz::America__Anchorage),
    ("AZ", Tz::America__Phoenix),
    ("AR", Tz::America__Chicago),
    ("CA", Tz::America__Los_Angeles),
    ("CO", Tz::America__Denver),
    ("CT", Tz::America__New_York),
    ("DE", Tz::America__New_York),
    ("DC", Tz::America__New_York),
    ("FL", Tz::America__New_York),
    ("GA", Tz::America__New_York),
    ("HI", Tz::Pacific__Honolulu),
    ("ID", Tz::America__Boise),
    ("IL", Tz::America__Chicago),
    ("IN", Tz::America__Indiana__Indianapolis),
    ("IA", Tz::America__Chicago),
    ("KS", Tz::America__Chicago),
    ("KY", Tz::America__New_York),
    ("LA", Tz::America__Chicago),
    ("ME", Tz::America__New_York),
    ("MD", Tz::America__New_York),
    ("MA", Tz::America__New_York),
    ("MI", Tz::America__Detroit),
    ("MN", Tz::America__Chicago),
    ("MS", Tz::America__Chicago),
    ("MO", Tz::America__Chicago),
    ("MT", Tz::America__Denver),
    ("NE", Tz::America__Chicago),
    ("NV", Tz::America__Los_Angeles),
    ("NH", Tz::America__New_York),
    ("NJ", Tz::America__New_York),
    ("NM", Tz::America__Denver),
    ("NY", Tz::America__New_York),
    ("NC", Tz::America__New_York),
    ("ND", Tz::America__Chicago),
    ("OH", Tz::America__New_York),
    ("OK", Tz::America__Chicago),
    ("OR", Tz::America__Los_Angeles),
    ("PA", Tz::America__New_York),
    ("RI", Tz::America__New_York),
    ("SC", Tz::America__New_York),
    ("SD", Tz::America__Chicago),
    ("TN", Tz::America__Chicago),
    ("TX", Tz::America__Chicago),
    ("UT", Tz::America__Denver),
    ("VT", Tz::America__New_York),
    ("VA", Tz::America__New_York),
    ("WA", Tz::America__Los_Angeles),
    ("WV", Tz::America__New_York),
    ("WI", Tz::America__Chicago),
    ("WY", Tz::America__Denver),
];

static AREA_CODE_INDEX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    AREA_CODES_BY_STATE
        .iter()
        .flat_map(|(state, codes)| codes.iter().map(move |code| (*code, *state)))
        .collect()
});

/// 营业时间检查结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHoursCheck {
    /// 当前本地时间是否处于允许呼叫的时段
    pub is_valid: bool,
    /// 本地小时（0-23）
    pub local_hour: u32,
    /// 本地时间，格式 HH:MM
    pub local_time: String,
    /// IANA 时区名称
    pub timezone: String,
    pub message: String,
}

/// 呼叫合规判定
///
/// `warnings` 仅供提示，不影响是否可以呼叫；
/// `blockers` 非空时 `can_call` 一定为 false。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub can_call: bool,
    pub state: Option<String>,
    pub timezone: String,
    pub is_two_party_consent: bool,
    pub is_within_business_hours: bool,
    pub warnings: Vec<String>,
    pub blockers: Vec<String>,
}

/// 从电话号码中提取美国区号
///
/// 仅接受 10 位数字，或以 1 开头的 11 位数字
pub fn area_code_from_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => Some(digits[0..3].to_string()),
        11 if digits.starts_with('1') => Some(digits[1..4].to_string()),
        _ => None,
    }
}

/// 根据区号查找所属州
pub fn state_for_area_code(area_code: &str) -> Option<&'static str> {
    AREA_CODE_INDEX.get(area_code).copied()
}

/// 根据电话号码查找所属州，区号无法识别时返回 `None`
pub fn get_state_from_phone(phone: &str) -> Option<&'static str> {
    area_code_from_phone(phone).and_then(|code| state_for_area_code(&code))
}

/// 州对应的 IANA 时区，未知州回落到美东时区
pub fn timezone_for_state(state: &str) -> Tz {
    STATE_TIMEZONES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(state))
        .map(|(_, tz)| *tz)
        .unwrap_or(DEFAULT_TIMEZONE)
}

/// 所有已知州的时区（去重）
pub fn known_timezones() -> Vec<Tz> {
    let mut zones: Vec<Tz> = Vec::new();
    for (_, tz) in STATE_TIMEZONES {
        if !zones.contains(tz) {
            zones.push(*tz);
        }
    }
    zones
}

pub fn is_two_party_consent_state(state: &str) -> bool {
    TWO_PARTY_CONSENT_STATES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(state))
}

/// 判断给定时刻在指定时区是否处于 08:00-21:00 呼叫窗口内
pub fn is_within_business_hours(tz: Tz, now: DateTime<Utc>) -> BusinessHoursCheck {
    let local = now.with_timezone(&tz);
    let local_hour = local.hour();
    let local_time = local.format("%H:%M").to_string();
    let is_valid = (BUSINESS_HOURS_START..BUSINESS_HOURS_END).contains(&local_hour);

    let message = if is_valid {
        format!("Within calling hours ({} local)", local_time)
    } else {
        format!(
            "Outside calling hours ({:02}:00-{:02}:00 local). Current local time: {}",
            BUSINESS_HOURS_START, BUSINESS_HOURS_END, local_time
        )
    };

    BusinessHoursCheck {
        is_valid,
        local_hour,
        local_time,
        timezone: tz.name().to_string(),
        message,
    }
}

/// 对电话号码执行呼叫合规检查
///
/// 1. 区号 → 州（未知州仅产生警告，时区回落到美东）
/// 2. 州 → 时区
/// 3. 双方同意录音州 → 警告
/// 4. 本地时间不在呼叫窗口 → 阻断
pub fn check_call_compliance(phone: &str, now: DateTime<Utc>) -> ComplianceVerdict {
    let mut warnings = Vec::new();
    let mut blockers = Vec::new();

    let area_code = area_code_from_phone(phone);
    let state = area_code.as_deref().and_then(state_for_area_code);

    let tz = match state {
        Some(state) => timezone_for_state(state),
        None => {
            let warning = match &area_code {
                Some(code) => format!(
                    "Could not determine state for area code {}; defaulting to US Eastern time",
                    code
                ),
                None => "Could not determine state from phone number; defaulting to US Eastern time"
                    .to_string(),
            };
            warnings.push(warning);
            DEFAULT_TIMEZONE
        }
    };

    let is_two_party_consent = state.map(is_two_party_consent_state).unwrap_or(false);
    if let Some(state) = state.filter(|_| is_two_party_consent) {
        warnings.push(format!(
            "{} is a two-party consent state: all parties must consent before the call is recorded",
            state
        ));
    }

    let hours = is_within_business_hours(tz, now);
    if !hours.is_valid {
        blockers.push(format!(
            "Outside business hours: local time is {} in {} (calls allowed {:02}:00-{:02}:00)",
            hours.local_time, hours.timezone, BUSINESS_HOURS_START, BUSINESS_HOURS_END
        ));
    }

    ComplianceVerdict {
        can_call: blockers.is_empty(),
        state: state.map(str::to_string),
        timezone: tz.name().to_string(),
        is_two_party_consent,
        is_within_business_hours: hours.is_valid,
        warnings,
        blockers,
    }
}

#[cfg(test)]
pub(crate) fn area_code_table() -> &'static [(&'static str, &'static [&'static str])] {
    AREA_CODES_BY_STATE
}
