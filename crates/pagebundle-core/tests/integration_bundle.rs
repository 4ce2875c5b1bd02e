//! Integration test: scan a page, fetch its attachments from a local HTTP
//! server with curl, and check the archive written to disk.

mod common;

use std::io::{Cursor, Read};
use std::sync::Arc;

use pagebundle_core::config::BundleConfig;
use pagebundle_core::fetch::{CurlFetcher, FetchError};
use pagebundle_core::flow::{BundleError, BundleFlow, Delivery};
use pagebundle_core::lifecycle::{Activation, PageReady};
use pagebundle_core::page::html;
use pagebundle_core::record::discover_records;
use pagebundle_core::save::DirectorySaver;
use tempfile::tempdir;
use url::Url;

fn page(app_key: &str) -> String {
    format!(
        r#"<html><head>
          <script src="https://c1.example.com/dp/{app_key}/emb"></script>
        </head><body>
          <div><input type="file" name="EditRecordReport"><a href="/files/report.csv">report.csv</a></div>
          <div><input type="file" name="EditRecordEmpty"><a href="/files/none"></a></div>
          <div><input type="file" name="EditRecordScan"><a href="files/scan.pdf">scan.pdf</a></div>
          <div data-cb-cell-name="EditRecordCalculated_Field_1">Name</div>
          <div><span>claim 17</span></div>
        </body></html>"#
    )
}

fn unzip(path: &std::path::Path) -> Vec<(String, Vec<u8>)> {
    let bytes = std::fs::read(path).unwrap();
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut entry = zip.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (entry.name().to_string(), data)
        })
        .collect()
}

#[tokio::test]
async fn page_attachments_are_bundled_byte_for_byte() {
    let csv = b"id,amount\n1,42\n".to_vec();
    let pdf: Vec<u8> = (0u8..=255).cycle().take(32 * 1024).collect();
    let base = common::file_server::start(vec![
        ("/files/report.csv", csv.clone()),
        ("/files/scan.pdf", pdf.clone()),
    ]);

    let cfg = BundleConfig::default();
    let snapshot = html::scan(&page(&cfg.expected_app_key), &cfg.filename_field);

    let activation = Activation::new(cfg.expected_app_key.clone());
    let events: Vec<PageReady> = snapshot.app_keys.iter().map(PageReady::new).collect();
    assert!(activation.first_accepted(&events).is_some());

    let records = discover_records(&snapshot.cells, &cfg.input_name_marker);
    assert_eq!(records.len(), 2);

    let out = tempdir().unwrap();
    let flow = BundleFlow::new(
        Arc::new(CurlFetcher::new(&cfg.http)),
        Arc::new(DirectorySaver::new(out.path())),
    )
    .with_base_url(Url::parse(&base).unwrap());

    let target = snapshot.target_name.clone().unwrap();
    let delivery = flow.run(&target, &records, None).await.unwrap();
    let path = match delivery {
        Delivery::Saved { path, entries, .. } => {
            assert_eq!(entries, 2);
            path
        }
        Delivery::Skipped => panic!("archive was not delivered"),
    };
    assert_eq!(path, out.path().join("claim 17.zip"));
    assert_eq!(
        unzip(&path),
        vec![
            ("report.csv".to_string(), csv),
            ("scan.pdf".to_string(), pdf),
        ]
    );
}

#[tokio::test]
async fn missing_attachment_leaves_no_archive() {
    let base = common::file_server::start(vec![("/files/report.csv", b"x".to_vec())]);

    let cfg = BundleConfig::default();
    let snapshot = html::scan(&page(&cfg.expected_app_key), &cfg.filename_field);
    let records = discover_records(&snapshot.cells, &cfg.input_name_marker);

    let out = tempdir().unwrap();
    let flow = BundleFlow::new(
        Arc::new(CurlFetcher::new(&cfg.http)),
        Arc::new(DirectorySaver::new(out.path())),
    )
    .with_base_url(Url::parse(&base).unwrap());

    match flow.run("claim", &records, None).await {
        Err(BundleError::Fetch {
            filename, source, ..
        }) => {
            assert_eq!(filename, "scan.pdf");
            assert!(matches!(source, FetchError::Http(404)));
        }
        other => panic!("expected fetch failure, got {:?}", other),
    }
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn foreign_app_key_does_not_activate() {
    let cfg = BundleConfig::default();
    let snapshot = html::scan(&page("0000deadbeef"), &cfg.filename_field);
    let activation = Activation::new(cfg.expected_app_key);
    let events: Vec<PageReady> = snapshot.app_keys.iter().map(PageReady::new).collect();
    assert_eq!(events.len(), 1);
    assert!(activation.first_accepted(&events).is_none());
}

#[tokio::test]
async fn local_file_links_are_not_bundled() {
    let secret_dir = tempdir().unwrap();
    let secret = secret_dir.path().join("secret.txt");
    std::fs::write(&secret, b"PRIVATE KEY MATERIAL").unwrap();
    let secret_url = Url::from_file_path(&secret).unwrap();

    let base = common::file_server::start(vec![("/files/report.csv", b"x".to_vec())]);
    let html = format!(
        r#"<div><input type="file" name="EditRecordReport"><a href="/files/report.csv">report.csv</a></div>
           <div><input type="file" name="EditRecordNote"><a href="{secret_url}">innocent.txt</a></div>"#
    );

    let cfg = BundleConfig::default();
    let snapshot = html::scan(&html, &cfg.filename_field);
    let records = discover_records(&snapshot.cells, &cfg.input_name_marker);
    assert_eq!(records.len(), 2);

    let out = tempdir().unwrap();
    let flow = BundleFlow::new(
        Arc::new(CurlFetcher::new(&cfg.http)),
        Arc::new(DirectorySaver::new(out.path())),
    )
    .with_base_url(Url::parse(&base).unwrap());

    match flow.run("claim", &records, None).await {
        Err(BundleError::Fetch {
            filename, source, ..
        }) => {
            assert_eq!(filename, "innocent.txt");
            assert!(matches!(source, FetchError::InvalidUrl(_)));
        }
        other => panic!("expected the file link to be refused, got {:?}", other),
    }
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}
