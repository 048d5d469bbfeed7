//! Tests for device id derivation and validation

use super::*;
use proptest::prelude::*;

#[test]
fn test_reference_vector_linux() {
    let id = derive("JohnDoe123", "Linux").unwrap();
    assert_eq!(id.as_str(), "776c610246edd49c");
    assert_eq!(id.app_prefix(), APP_PREFIX);
    assert_eq!(id.platform_code(), "02");
    assert_eq!(id.username_hex(), "46edd49c");
}

#[test]
fn test_short_username_is_padded() {
    assert_eq!(normalize_username("Al"), "al0000");
    assert_eq!(derive("Al", "Windows").unwrap().as_str(), "776c610126249d00");
}

#[test]
fn test_normalization_takes_first_eight_before_filtering() {
    // "j.r.r.tolkien" -> "j.r.r.to" -> "jrrto" -> padded
    assert_eq!(normalize_username("j.r.r.tolkien"), "jrrto0");
    assert_eq!(normalize_username("JohnDoe123"), "johndo");
    assert_eq!(normalize_username(""), "000000");
    assert_eq!(normalize_username("___"), "000000");
}

#[test]
fn test_non_ascii_letters_are_dropped() {
    assert_eq!(normalize_username("Jösé"), "js0000");
}

#[test]
fn test_platform_table() {
    let expected = [
        ("Windows", "01"),
        ("Linux", "02"),
        ("Darwin", "03"),
        ("macOS", "03"),
        ("Java", "04"),
        ("FreeBSD", "05"),
        ("OpenBSD", "06"),
        ("NetBSD", "07"),
        ("SunOS", "08"),
        ("AIX", "09"),
        ("HP-UX", "0a"),
        ("Plan9", "00"),
        ("linux", "00"),
    ];
    for (platform, code) in expected {
        assert_eq!(platform_code(platform), code, "platform {}", platform);
    }
}

#[test]
fn test_unknown_platform_maps_to_zero_code() {
    let id = derive("alice", "Haiku").unwrap();
    assert_eq!(id.platform_code(), "00");
}

#[test]
fn test_encode_known_values() {
    assert_eq!(encode_base36_to_hex("000000").unwrap(), "00000000");
    assert_eq!(encode_base36_to_hex("zzzzzz").unwrap(), "81bf0fff");
    assert_eq!(encode_base36_to_hex("alice0").unwrap(), "2631ac38");
}

#[test]
fn test_encode_rejects_wrong_length() {
    let err = encode_base36_to_hex("abc").unwrap_err();
    assert!(matches!(err, WlaterError::InvalidInput(_)));
    assert!(encode_base36_to_hex("abcdefg").is_err());
}

#[test]
fn test_encode_rejects_characters_outside_base36() {
    for bad in ["ABCDEF", "abc-ef", "abcdé0", "ab cde"] {
        let err = encode_base36_to_hex(bad).unwrap_err();
        assert!(
            matches!(err, WlaterError::InvalidInput(_)),
            "expected InvalidInput for {:?}",
            bad
        );
    }
}

#[test]
fn test_validation_rejects_short_id() {
    let err = DeviceId::parse("776c610112345").unwrap_err();
    assert!(matches!(err, WlaterError::InvalidInput(_)));
    assert!(err.to_string().contains("got 13"));
}

#[test]
fn test_validation_rejects_non_hex() {
    let err = DeviceId::parse("776c61011234567g").unwrap_err();
    assert!(matches!(err, WlaterError::InvalidInput(_)));
    assert!(err.to_string().contains("hexadecimal"));
}

#[test]
fn test_validation_accepts_sixteen_hex_digits() {
    let id: DeviceId = "776c610112345678".parse().unwrap();
    assert_eq!(id.as_str(), "776c610112345678");
}

#[test]
fn test_validation_trims_and_lowercases() {
    let id = DeviceId::parse("  DEADBEEFDEADBEEF\n").unwrap();
    assert_eq!(id.as_str(), FALLBACK_DEVICE_ID);
    assert_eq!(id, DeviceId::fallback());
}

#[test]
fn test_serde_round_trip_validates() {
    let id = derive("root", "Linux").unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"776c610263c80cd0\"");

    let bad: std::result::Result<DeviceId, _> = serde_json::from_str("\"nothex\"");
    assert!(bad.is_err());
}

#[test]
fn test_derived_breakdown() {
    let derived = DerivedDeviceId::from_parts("jsmith", "Darwin").unwrap();
    assert_eq!(derived.normalized, "jsmith");
    assert_eq!(derived.device_id.as_str(), "776c61034757d0c5");
    assert_eq!(derived.system, "Darwin");
}

proptest! {
    #[test]
    fn prop_derive_is_deterministic(username in ".{0,24}", platform in "[A-Za-z-]{0,10}") {
        let first = derive(&username, &platform).unwrap();
        let second = derive(&username, &platform).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_derive_shape(username in ".{0,24}", platform in prop::sample::select(vec![
        "Windows", "Linux", "Darwin", "Java", "FreeBSD", "OpenBSD",
        "NetBSD", "SunOS", "AIX", "HP-UX", "Unknown",
    ])) {
        let id = derive(&username, platform).unwrap();
        let s = id.as_str();
        prop_assert_eq!(s.len(), 16);
        prop_assert!(s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        prop_assert_eq!(&s[0..6], "776c61");
        let code = &s[6..8];
        prop_assert!(
            PLATFORM_CODES.iter().any(|(_, c)| *c == code) || code == "00",
            "unexpected platform code {}", code
        );
        prop_assert!(DeviceId::parse(s).is_ok());
    }

    #[test]
    fn prop_normalized_is_six_base36_chars(username in ".{0,24}") {
        let normalized = normalize_username(&username);
        prop_assert_eq!(normalized.len(), 6);
        prop_assert!(normalized.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
