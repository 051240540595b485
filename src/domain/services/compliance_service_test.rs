// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::compliance_service::*;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

fn at_local(tz: Tz, month: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    tz.with_ymd_and_hms(2026, month, 15, hour, minute, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

#[test]
fn test_known_area_codes_resolve_to_states() {
    let cases = [
        ("(212) 555-1234", "NY"),
        ("415-555-0100", "CA"),
        ("312.555.0100", "IL"),
        ("+1 713 555 0100", "TX"),
        ("13055550100", "FL"),
        ("2065550100", "WA"),
        ("907-555-0100", "AK"),
        ("808-555-0100", "HI"),
        ("202-555-0100", "DC"),
    ];

    for (phone, expected) in cases {
        assert_eq!(get_state_from_phone(phone), Some(expected), "phone {}", phone);
    }
}

#[test]
fn test_every_table_entry_round_trips() {
    for (state, codes) in area_code_table() {
        for code in codes.iter() {
            let ten = format!("{}5550100", code);
            let eleven = format!("1{}5550100", code);
            assert_eq!(get_state_from_phone(&ten), Some(*state), "{}", ten);
            assert_eq!(get_state_from_phone(&eleven), Some(*state), "{}", eleven);
        }
    }
}

#[test]
fn test_unmapped_area_codes_return_none() {
    assert_eq!(get_state_from_phone("999-555-0100"), None);
    assert_eq!(get_state_from_phone("(555) 123-4567"), None);
    assert_eq!(get_state_from_phone("1-000-555-0100"), None);
}

#[test]
fn test_malformed_numbers_return_none() {
    assert_eq!(area_code_from_phone("555-1234"), None);
    assert_eq!(area_code_from_phone("22125551234"), None);
    assert_eq!(area_code_from_phone("212555123456"), None);
    assert_eq!(area_code_from_phone(""), None);
    assert_eq!(get_state_from_phone("+44 20 7946 0958"), None);
}

#[test]
fn test_area_code_extraction() {
    assert_eq!(area_code_from_phone("(212) 555-1234").as_deref(), Some("212"));
    assert_eq!(area_code_from_phone("+1 (415) 555-1234").as_deref(), Some("415"));
}

#[test]
fn test_state_timezones() {
    assert_eq!(timezone_for_state("NY"), Tz::America__New_York);
    assert_eq!(timezone_for_state("ca"), Tz::America__Los_Angeles);
    assert_eq!(timezone_for_state("AZ"), Tz::America__Phoenix);
    assert_eq!(timezone_for_state("ZZ"), DEFAULT_TIMEZONE);
}

#[test]
fn test_two_party_consent_membership() {
    for state in TWO_PARTY_CONSENT_STATES {
        assert!(is_two_party_consent_state(state));
    }
    assert!(!is_two_party_consent_state("NY"));
    assert!(!is_two_party_consent_state("TX"));
}

#[test]
fn test_business_hours_every_zone_every_hour() {
    for tz in known_timezones() {
        for month in [1, 7] {
            for hour in 0..24 {
                let check = is_within_business_hours(tz, at_local(tz, month, hour, 30));
                assert_eq!(check.local_hour, hour);
                assert_eq!(
                    check.is_valid,
                    (8..21).contains(&hour),
                    "{} month {} hour {}",
                    tz.name(),
                    month,
                    hour
                );
                assert_eq!(check.timezone, tz.name());
            }
        }
    }
}

#[test]
fn test_business_hours_boundaries() {
    let tz = Tz::America__New_York;
    assert!(!is_within_business_hours(tz, at_local(tz, 1, 7, 59)).is_valid);
    assert!(is_within_business_hours(tz, at_local(tz, 1, 8, 0)).is_valid);
    assert!(is_within_business_hours(tz, at_local(tz, 1, 20, 59)).is_valid);

    let closed = is_within_business_hours(tz, at_local(tz, 1, 21, 0));
    assert!(!closed.is_valid);
    assert_eq!(closed.local_time, "21:00");
}

#[test]
fn test_two_party_state_is_warning_not_blocker() {
    let tz = Tz::America__Los_Angeles;
    let verdict = check_call_compliance("415-555-0100", at_local(tz, 1, 10, 0));

    assert!(verdict.can_call);
    assert_eq!(verdict.state.as_deref(), Some("CA"));
    assert_eq!(verdict.timezone, "America/Los_Angeles");
    assert!(verdict.is_two_party_consent);
    assert!(verdict.is_within_business_hours);
    assert_eq!(verdict.warnings.len(), 1);
    assert!(verdict.blockers.is_empty());
}

#[test]
fn test_outside_hours_blocks_call() {
    let tz = Tz::America__Chicago;
    let verdict = check_call_compliance("(312) 555-0100", at_local(tz, 1, 22, 15));

    assert!(!verdict.can_call);
    assert!(!verdict.is_within_business_hours);
    assert_eq!(verdict.blockers.len(), 1);
    assert!(verdict.blockers[0].contains("22:15"));
}

#[test]
fn test_unknown_state_defaults_to_eastern_with_warning() {
    let eastern = Tz::America__New_York;
    let verdict = check_call_compliance("(555) 123-4567", at_local(eastern, 1, 12, 0));

    assert!(verdict.can_call);
    assert_eq!(verdict.state, None);
    assert_eq!(verdict.timezone, "America/New_York");
    assert!(!verdict.is_two_party_consent);
    assert_eq!(verdict.warnings.len(), 1);
    assert!(verdict.warnings[0].contains("555"));
}

#[test]
fn test_local_time_follows_number_not_server() {
    // 17:00 UTC in January: 12:00 in New York, 09:00 in Los Angeles, 07:00 in Honolulu
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap();
    assert!(check_call_compliance("212-555-0100", now).can_call);
    assert!(check_call_compliance("415-555-0100", now).can_call);
    assert!(!check_call_compliance("808-555-0100", now).can_call);
}

#[test]
fn test_never_can_call_outside_business_hours() {
    let phones = [
        "212-555-0100",
        "415-555-0100",
        "808-555-0100",
        "555-555-0100",
        "not a phone",
        "+1 (907) 555-0100",
    ];

    for phone in phones {
        for hour in 0..24 {
            let now = Utc.with_ymd_and_hms(2026, 3, 20, hour, 0, 0).unwrap();
            let verdict = check_call_compliance(phone, now);
            if !verdict.is_within_business_hours {
                assert!(!verdict.can_call, "{} at {}:00 UTC", phone, hour);
            }
            assert_eq!(verdict.can_call, verdict.blockers.is_empty());
        }
    }
}
