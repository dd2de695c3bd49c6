//! End-to-end pipeline tests
//!
//! Full flow against one mocked catalog: guess -> search -> resolve ->
//! download -> files on disk.

use mockito::{Matcher, Server};
use subgrab::{ArchiveExtractor, CatalogClient, Grabber};

// =============================================================================
// Fixtures
// =============================================================================

fn mock_search_page() -> &'static str {
    r#"<html><body>
    <div class="col-md-9">
      <div class="box">
        <div class="d_title"><a href="/a/98765">Movie.Name.2020.1080P.BluRay</a></div>
        <span class="label">简体</span>
        <span class="label">English</span>
      </div>
    </div>
    </body></html>"#
}

/// Minimal stored zip holding a single "movie.srt" member
fn one_entry_zip(content: &[u8]) -> Vec<u8> {
    let name = b"movie.srt";
    let crc = {
        let mut crc = 0xFFFF_FFFFu32;
        for &byte in content {
            crc ^= byte as u32;
            for _ in 0..8 {
                let mask = (crc & 1).wrapping_neg();
                crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
            }
        }
        !crc
    };
    let size = content.len() as u32;

    let mut buf = Vec::new();
    let header = |buf: &mut Vec<u8>, sig: u32| buf.extend_from_slice(&sig.to_le_bytes());

    // Local file header
    header(&mut buf, 0x0403_4B50);
    buf.extend_from_slice(&20u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // flags
    buf.extend_from_slice(&0u16.to_le_bytes()); // stored
    buf.extend_from_slice(&0u16.to_le_bytes()); // time
    buf.extend_from_slice(&0x21u16.to_le_bytes()); // date
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(name);
    buf.extend_from_slice(content);

    // Central directory
    let cd_start = buf.len() as u32;
    header(&mut buf, 0x0201_4B50);
    buf.extend_from_slice(&20u16.to_le_bytes());
    buf.extend_from_slice(&20u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0x21u16.to_le_bytes());
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // local header offset
    buf.extend_from_slice(name);
    let cd_size = buf.len() as u32 - cd_start;

    // End of central directory
    header(&mut buf, 0x0605_4B50);
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&cd_size.to_le_bytes());
    buf.extend_from_slice(&cd_start.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());

    buf
}

// =============================================================================
// Full Pipeline
// =============================================================================

#[tokio::test]
async fn test_guess_search_download_flow() {
    let mut server = Server::new_async().await;
    let srt = b"1\n00:00:01,000 --> 00:00:02,000\nhello\n";

    let search_mock = server
        .mock("GET", "/search/Movie%20Name")
        .with_status(200)
        .with_body(mock_search_page())
        .create_async()
        .await;

    let ajax_body = format!(
        r#"{{"success": true, "url": "{}/dl/98765.zip"}}"#,
        server.url()
    );
    let resolve_mock = server
        .mock("POST", "/ajax/down_ajax")
        .match_body(Matcher::UrlEncoded("sub_id".into(), "98765".into()))
        .with_status(200)
        .with_body(ajax_body)
        .create_async()
        .await;

    let file_mock = server
        .mock("GET", "/dl/98765.zip")
        .with_status(200)
        .with_body(one_entry_zip(srt))
        .create_async()
        .await;

    let grabber = Grabber::with_parts(
        CatalogClient::with_base_url(server.url()),
        ArchiveExtractor::new(),
    );

    // Guess: the year split candidate comes first
    let candidates = grabber.guess("/media/films/Movie.Name.2020.1080P.BluRay.mkv");
    assert_eq!(candidates[0], "Movie Name");

    // Search with the first candidate
    let results = grabber.search(&candidates[0]).await.unwrap();
    search_mock.assert_async().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "98765");
    assert_eq!(results[0].languages_joined(), "简体,English");

    // Download the selected listing
    let dest = tempfile::tempdir().unwrap();
    let written = grabber.download(&results[0].id, dest.path()).await.unwrap();
    resolve_mock.assert_async().await;
    file_mock.assert_async().await;

    assert_eq!(written, vec![dest.path().join("movie.srt")]);
    assert_eq!(std::fs::read(&written[0]).unwrap(), srt);
}

#[tokio::test]
async fn test_download_with_empty_resolution_writes_nothing() {
    let mut server = Server::new_async().await;

    let resolve_mock = server
        .mock("POST", "/ajax/down_ajax")
        .with_status(200)
        .with_body(r#"{"success": false, "url": ""}"#)
        .create_async()
        .await;

    let grabber = Grabber::with_parts(
        CatalogClient::with_base_url(server.url()),
        ArchiveExtractor::new(),
    );

    let dest = tempfile::tempdir().unwrap();
    let written = grabber.download("98765", dest.path()).await.unwrap();

    resolve_mock.assert_async().await;
    assert!(written.is_empty());
    assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
}
