//! CLI tests for `itpatch list` and `itpatch patch`.
//!
//! Spawns the binary inside a temporary board tree and checks stdout, exit
//! codes, and the patched interrupt files.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use itpatch::exit_codes;
use itpatch::test_support::{BoardTree, IT_HEADER, IT_SOURCE};

fn itpatch(tree: &BoardTree, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_itpatch"))
        .current_dir(tree.workdir())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn itpatch");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("itpatch output")
}

#[test]
fn interactive_patch_comments_selected_board() {
    let tree = BoardTree::new().expect("tree");
    let board = tree.add_board("Nucleo-F429ZI", "stm32f4xx").expect("board");

    let output = itpatch(&tree, &["patch"], "0\n");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Choose MCU/Nucleo (Select a number):\n0: Nucleo-F429ZI\n"));
    assert!(stdout.contains("patched: file="));
    assert!(stdout.contains("blocks=3 lines=30"));
    assert!(stdout.contains("blocks=3 lines=3"));

    let source = fs::read_to_string(&board.source).expect("read source");
    assert!(source.contains("//void PendSV_Handler(void)\n"));
    let header = fs::read_to_string(&board.header).expect("read header");
    assert!(header.contains("//void SysTick_Handler(void);\n"));
}

#[test]
fn non_numeric_selection_exits_with_bad_selection() {
    let tree = BoardTree::new().expect("tree");
    let board = tree.add_board("Nucleo-F429ZI", "stm32f4xx").expect("board");

    let output = itpatch(&tree, &["patch"], "first\n");

    assert_eq!(output.status.code(), Some(exit_codes::BAD_SELECTION));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a number"));
    assert_eq!(fs::read_to_string(&board.source).expect("read"), IT_SOURCE);
}

#[test]
fn out_of_range_board_exits_with_bad_selection() {
    let tree = BoardTree::new().expect("tree");
    tree.add_board("Nucleo-F429ZI", "stm32f4xx").expect("board");

    let output = itpatch(&tree, &["patch", "--board", "5"], "");

    assert_eq!(output.status.code(), Some(exit_codes::BAD_SELECTION));
}

#[test]
fn missing_root_exits_with_not_found() {
    let tree = BoardTree::new().expect("tree");

    let output = itpatch(&tree, &["--root", "Boards", "list"], "");

    assert_eq!(output.status.code(), Some(exit_codes::NOT_FOUND));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn list_prints_menu_without_prompt() {
    let tree = BoardTree::new().expect("tree");
    tree.add_board("MCU-h725zgt6", "stm32h7xx").expect("board");

    let output = itpatch(&tree, &["list"], "");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0: MCU-h725zgt6\n");
}

#[test]
fn config_file_switches_to_delete_mode() {
    let tree = BoardTree::new().expect("tree");
    let board = tree.add_board("MCU-h725zgt6", "stm32h7xx").expect("board");
    fs::write(tree.workdir().join("itpatch.toml"), "mode = \"delete\"\n").expect("write config");

    let output = itpatch(&tree, &["patch", "--board", "MCU-h725zgt6"], "");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let header = fs::read_to_string(&board.header).expect("read header");
    assert_eq!(header.lines().count(), IT_HEADER.lines().count() - 3);
    assert!(!header.contains("SVC_Handler"));
}

#[test]
fn dry_run_reports_without_writing() {
    let tree = BoardTree::new().expect("tree");
    let board = tree.add_board("Nucleo-F429ZI", "stm32f4xx").expect("board");

    let output = itpatch(&tree, &["patch", "--board", "0", "--dry-run"], "");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).contains("dry-run: file="));
    assert_eq!(fs::read_to_string(&board.source).expect("read"), IT_SOURCE);
    assert_eq!(fs::read_to_string(&board.header).expect("read"), IT_HEADER);
}

#[test]
fn init_config_refuses_to_overwrite() {
    let tree = BoardTree::new().expect("tree");

    let first = itpatch(&tree, &["init-config"], "");
    assert_eq!(first.status.code(), Some(exit_codes::OK));
    let written = fs::read_to_string(tree.workdir().join("itpatch.toml")).expect("read config");
    assert!(written.contains("PendSV_Handler"));

    let second = itpatch(&tree, &["init-config"], "");
    assert_eq!(second.status.code(), Some(exit_codes::FAILED));
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));
}
