use super::*;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_bundle_defaults() {
    match parse(&["pagebundle", "bundle", "page.html"]) {
        CliCommand::Bundle {
            page,
            json,
            name,
            base_url,
            app_key,
            out,
        } => {
            assert_eq!(page, PathBuf::from("page.html"));
            assert!(!json);
            assert!(name.is_none());
            assert!(base_url.is_none());
            assert!(app_key.is_none());
            assert!(out.is_none());
        }
        _ => panic!("expected Bundle"),
    }
}

#[test]
fn cli_parse_bundle_all_options() {
    match parse(&[
        "pagebundle",
        "bundle",
        "snap.json",
        "--json",
        "--name",
        "claim-17",
        "--base-url",
        "https://example.com/dp/",
        "--app-key",
        "abc",
        "--out",
        "/tmp/out",
    ]) {
        CliCommand::Bundle {
            page,
            json,
            name,
            base_url,
            app_key,
            out,
        } => {
            assert_eq!(page, PathBuf::from("snap.json"));
            assert!(json);
            assert_eq!(name.as_deref(), Some("claim-17"));
            assert_eq!(base_url.as_deref(), Some("https://example.com/dp/"));
            assert_eq!(app_key.as_deref(), Some("abc"));
            assert_eq!(out, Some(PathBuf::from("/tmp/out")));
        }
        _ => panic!("expected Bundle"),
    }
}

#[test]
fn cli_parse_inspect() {
    match parse(&["pagebundle", "inspect", "page.html"]) {
        CliCommand::Inspect { page, json } => {
            assert_eq!(page, PathBuf::from("page.html"));
            assert!(!json);
        }
        _ => panic!("expected Inspect"),
    }
}

#[test]
fn cli_parse_vars() {
    match parse(&["pagebundle", "vars", "https://example.com/?id=7"]) {
        CliCommand::Vars { url } => assert_eq!(url, "https://example.com/?id=7"),
        _ => panic!("expected Vars"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["pagebundle", "checksum", "claim-17.zip"]) {
        CliCommand::Checksum { path } => assert_eq!(path, "claim-17.zip"),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_bundle_requires_page() {
    assert!(Cli::try_parse_from(["pagebundle", "bundle"]).is_err());
}
