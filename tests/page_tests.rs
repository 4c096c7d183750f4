//! Tests for the page value contract

use foliostore::{MemoryObject, Page};

#[test]
fn test_serialize_round_trip() {
    let pages = vec![
        Page::new(vec![]),
        Page::new(vec![0]),
        Page::new(b"leaf node payload".to_vec()),
        Page::new(vec![0xFF; 128 * 1024]),
    ];
    for page in pages {
        let bytes = page.to_bytes().unwrap();
        assert_eq!(Page::from_bytes(&bytes).unwrap(), page);
    }
}

#[test]
fn test_from_bytes_rejects_garbage() {
    // a truncated length prefix cannot decode
    assert!(Page::from_bytes(&[1, 2, 3]).is_err());
}

#[test]
fn test_copy_is_independent() {
    let original = Page::new(b"shared?".to_vec());
    let copied = original.copy();
    assert_eq!(copied, original);

    // mutating a rebuilt original must not affect the copy
    let mut data = original.into_data();
    data[0] = b'X';
    assert_eq!(copied.data(), b"shared?");
}

#[test]
fn test_estimated_memory_tracks_payload() {
    let small = Page::new(vec![0; 10]);
    let large = Page::new(vec![0; 10_000]);
    assert!(small.estimated_memory() >= 10);
    assert!(large.estimated_memory() >= small.estimated_memory() + 9_000);
}
