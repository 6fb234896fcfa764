use assert_cmd::prelude::*;
use chessgrid::render::pdf::count_pages;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

#[test]
fn generates_pdf_from_text_list() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("sheet.pdf");

    let exe = assert_cmd::cargo_bin!("chessgrid");
    Command::new(exe)
        .args([
            "generate",
            "--input",
            fixture("positions.txt").to_string_lossy().as_ref(),
            "--diagrams-per-page",
            "4",
            "--page-numbers",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"), "output is not a PDF");
    // Seven positions at four per page.
    assert_eq!(count_pages(&bytes), 2);
}

#[test]
fn generates_pdf_from_request_to_stdout() {
    let exe = assert_cmd::cargo_bin!("chessgrid");
    let output = Command::new(exe)
        .args([
            "generate",
            "--request",
            fixture("request.json").to_string_lossy().as_ref(),
            "--out",
            "-",
        ])
        .output()
        .expect("run chessgrid");
    assert!(output.status.success());
    assert!(output.stdout.starts_with(b"%PDF-"));
    assert_eq!(count_pages(&output.stdout), 2);
}

#[test]
fn invalid_request_exits_with_client_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("never.pdf");

    let exe = assert_cmd::cargo_bin!("chessgrid");
    let output = Command::new(exe)
        .args([
            "generate",
            "--request",
            fixture("bad_request.json").to_string_lossy().as_ref(),
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run chessgrid");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(r#"{"error":"FEN strings must be provided in a list."}"#),
        "{stderr}"
    );
    assert!(!out.exists());
}

#[test]
fn non_integer_diagrams_per_page_is_rejected() {
    let exe = assert_cmd::cargo_bin!("chessgrid");
    let output = Command::new(exe)
        .args([
            "generate",
            "--diagrams-per-page",
            "many",
            "--out",
            "-",
            "8/8/8/8/8/4k3/8/R7 w - - 0 1",
        ])
        .output()
        .expect("run chessgrid");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("diagrams_per_page must be an integer."));
}

#[test]
fn board_svg_goes_to_stdout() {
    let exe = assert_cmd::cargo_bin!("chessgrid");
    let output = Command::new(exe)
        .args(["board", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"])
        .output()
        .expect("run chessgrid");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn board_png_has_scaled_dimensions() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("board.png");

    let exe = assert_cmd::cargo_bin!("chessgrid");
    Command::new(exe)
        .args([
            "board",
            "8/8/1P6/8/2P5/5k2/2K5/4r3 b - - 0 1",
            "--format",
            "png",
            "--scale",
            "2",
            "--background",
            "white",
            "--turn-indicator",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let decoder = png::Decoder::new(fs::File::open(&out).expect("open png"));
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    assert_eq!((info.width, info.height), (780, 780));
}

#[test]
fn board_with_invalid_fen_is_a_client_error() {
    let exe = assert_cmd::cargo_bin!("chessgrid");
    let output = Command::new(exe)
        .args(["board", "not a fen"])
        .output()
        .expect("run chessgrid");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("8 ranks"));
}
