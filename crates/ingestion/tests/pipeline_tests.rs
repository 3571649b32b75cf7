//! End-to-end pipeline tests: fetch + decode + parse + normalize.

use std::io::Write;

use ingestion::{load_facilities, Delimiter, Fetcher, TextEncoding};

fn utf16le_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut raw = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        raw.extend_from_slice(&unit.to_le_bytes());
    }
    file.write_all(&raw).unwrap();
    file
}

#[tokio::test]
async fn test_load_utf16_tab_separated() {
    let file = utf16le_file(
        "name\tregister_id\tgeo_epgs_4326_lat\tgeo_epgs_4326_lon\toccupancy_percentage\n\
         Hospital A\tH001\t41.4\t2.2\t80\n\
         \tH002\t41.3\t2.1\t50\n",
    );

    let fetcher = Fetcher::new().unwrap();
    let facilities = load_facilities(
        &fetcher,
        file.path().to_str().unwrap(),
        TextEncoding::Utf16Le,
        Delimiter::Tab,
    )
    .await;

    // The nameless second row is excluded.
    assert_eq!(facilities.len(), 1);
    assert_eq!(facilities[0].name, "Hospital A");
    assert_eq!(facilities[0].id, "H001");
    assert_eq!(facilities[0].occupancy_percent, 80.0);
    assert_eq!(facilities[0].display_index, 1);
}

#[tokio::test]
async fn test_missing_file_yields_empty_not_error() {
    let fetcher = Fetcher::new().unwrap();
    let facilities = load_facilities(
        &fetcher,
        "/no/such/file.csv",
        TextEncoding::Utf16Le,
        Delimiter::Tab,
    )
    .await;
    assert!(facilities.is_empty());
}

#[tokio::test]
async fn test_wrong_encoding_yields_empty_not_error() {
    // Odd-length garbage cannot decode as UTF-16 without replacement.
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x41, 0x42, 0x43]).unwrap();

    let fetcher = Fetcher::new().unwrap();
    let facilities = load_facilities(
        &fetcher,
        file.path().to_str().unwrap(),
        TextEncoding::Utf16Le,
        Delimiter::Tab,
    )
    .await;
    assert!(facilities.is_empty());
}
