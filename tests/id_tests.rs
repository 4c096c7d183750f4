//! Tests for time-ordered identifier generation

use foliostore::TimeUuid;

#[test]
fn test_ids_are_distinct() {
    let mut seen = std::collections::HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(TimeUuid::time_based_version7().to_short_string()));
    }
}

#[test]
fn test_ids_sort_in_allocation_order() {
    let ids: Vec<String> = (0..10_000)
        .map(|_| TimeUuid::time_based_version7().to_short_string())
        .collect();

    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted, "allocation order must match lexicographic order");
}

#[test]
fn test_short_string_shape() {
    let id = TimeUuid::time_based_version7().to_short_string();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_version_and_variant_bits() {
    let id = TimeUuid::time_based_version7();
    assert_eq!((id.msb() >> 12) & 0xF, 7, "version nibble must be 7");
    assert_eq!(id.lsb() >> 62, 0b10, "variant bits must be 10");
}

#[test]
fn test_timestamp_occupies_high_bits() {
    let before = TimeUuid::time_based_version7();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let after = TimeUuid::time_based_version7();
    assert!(after.msb() > before.msb());
}
