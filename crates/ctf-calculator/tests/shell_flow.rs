//! End-to-end flows through the shell: mock DOM page, file-backed
//! completion store and the shared driver specifications.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use ctf_calculator::config::CalculatorConfig;
use ctf_calculator::core::{FlagField, SecretCode};
use ctf_calculator::driver::{run_full_specification, CalculatorDriver};
use ctf_calculator::flag::{CompletionStore, FileStore, SubmitOutcome, FLAG};
use ctf_calculator::shell::{style, BodyState, Shell};
use ctf_calculator::wasm::{MockDom, WasmDriver};
use tempfile::TempDir;

fn file_shell(dir: &TempDir) -> Shell<MockDom, FileStore> {
    let path = dir.path().join("state").join("completion.json");
    let config = CalculatorConfig::default().with_storage_path(&path);
    let mut shell = Shell::new(MockDom::new(), FileStore::new(path), config);
    shell.setup();
    shell
}

fn press(shell: &mut Shell<MockDom, FileStore>, script: &str) {
    for ch in script.chars() {
        let key = ch.to_string();
        shell.key_down(&key);
        shell.key_up(&key);
    }
}

#[test]
fn test_full_specification_on_mock_dom() {
    run_full_specification(&mut WasmDriver::new());
}

#[test]
fn test_solve_with_keyboard_only() {
    let dir = TempDir::new().unwrap();
    let mut shell = file_shell(&dir);

    press(&mut shell, "1337+1337=");
    shell.key_down("Escape");
    press(&mut shell, "1337*1337=");
    let code = shell.page().flag_value().unwrap();
    assert_eq!(code, SecretCode::composed());

    // the player decodes the code outside the page and types the result
    let flag = SecretCode::decode(&code).unwrap();
    shell.page_mut().type_flag(&flag);
    shell.page_mut().enable_submit();
    assert_eq!(shell.click_submit(), Some(SubmitOutcome::Solved));

    assert_eq!(shell.page().message_text(), Some(style::SOLVED_MESSAGE));
    assert!(!shell.page().submit_form_visible());
    assert!(shell.page().has_share());
    assert!(shell.store().is_completed().unwrap());
}

#[test]
fn test_completion_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut shell = file_shell(&dir);
        shell.page_mut().type_flag(FLAG);
        shell.page_mut().enable_submit();
        assert_eq!(shell.click_submit(), Some(SubmitOutcome::Solved));
    }

    let shell = file_shell(&dir);
    assert_eq!(
        shell.page().message_text(),
        Some(style::ALREADY_COMPLETED_MESSAGE)
    );
    assert!(shell.page().get_element(style::SUBMIT_FORM_ID).is_none());
    assert!(shell.page().has_share());
    assert_eq!(shell.page().display_text(), "0");
}

#[test]
fn test_reset_reopens_challenge() {
    let dir = TempDir::new().unwrap();
    let mut shell = file_shell(&dir);
    shell.page_mut().type_flag(FLAG);
    shell.page_mut().enable_submit();
    shell.click_submit();

    let mut store = FileStore::new(dir.path().join("state").join("completion.json"));
    store.reset().unwrap();

    let shell = file_shell(&dir);
    assert!(shell.page().submit_form_visible());
    assert_eq!(shell.page().message_text(), Some(""));
}

#[test]
fn test_celebration_reverts_after_delay() {
    let mut driver = WasmDriver::new();
    driver.enable_submit();
    driver.type_flag(FLAG);
    assert_eq!(driver.submit_flag(), Some(SubmitOutcome::Solved));
    assert_eq!(driver.dom().body_state(), BodyState::Celebrating);

    driver.advance(Duration::from_millis(2999));
    assert_eq!(driver.dom().body_state(), BodyState::Celebrating);
    driver.advance(Duration::from_millis(1));
    assert_eq!(driver.dom().body_state(), BodyState::Default);
}

#[test]
fn test_share_opens_link_for_page() {
    let mut driver = WasmDriver::new();
    driver.enable_submit();
    driver.type_flag(FLAG);
    driver.submit_flag();

    driver.click_button(style::SHARE_BUTTON_ID);
    assert_eq!(
        driver.dom().opened_windows(),
        ["https://www.facebook.com/sharer/sharer.php?u=http://localhost:8080/"]
    );
}

#[test]
fn test_incorrect_flag_keeps_form() {
    let mut driver = WasmDriver::new();
    driver.enable_submit();
    driver.type_flag("CTF{nope}");
    assert_eq!(driver.submit_flag(), Some(SubmitOutcome::Incorrect));
    assert_eq!(
        driver.dom().message_text(),
        Some(style::INCORRECT_MESSAGE)
    );
    assert!(driver.dom().submit_form_visible());
    assert!(!driver.is_completed());
}
