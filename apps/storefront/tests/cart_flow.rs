//! Integration tests for the storefront cart.
//!
//! These exercise the store over real snapshot files in a temporary data
//! directory: persistence across reopen, checkout, and the `bunbo` CLI.

use std::path::Path;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use clap::Parser;

use bunbo_core::order::{CheckoutForm, PaymentMethod};
use bunbo_core::{LineCandidate, Money};
use bunbo_storage::{FileStorage, SnapshotStorage};
use bunbo_storefront::cli::{self, Cli};
use bunbo_storefront::commands::checkout::{place_order, CheckoutOutcome, UnavailableGateway};
use bunbo_storefront::commands::menu::load_menu;
use bunbo_storefront::notify::RecordingSink;
use bunbo_storefront::state::{CartConfig, CartStore};

const MENU: &str = r#"{
    "dishes": [
        {"id": "bun-bo-dac-biet", "name": "Bún bò đặc biệt", "price": 65000,
         "category": "signature", "spicyLevel": "Cay vừa"},
        {"id": "bun-bo-chay", "name": "Bún bò chay", "price": 45000, "category": "vegetarian"},
        {"id": "tra-da", "name": "Trà đá", "price": 5000, "category": "beverages"}
    ],
    "branches": [
        {"id": "hue", "name": "Chi nhánh Huế", "address": "1 Trần Hưng Đạo, Huế"}
    ]
}"#;

/// Opens a store over `<dir>/bunbo-cart.json`.
fn open_store(dir: &Path) -> (CartStore, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let store = CartStore::open(
        Arc::new(FileStorage::new(dir)),
        sink.clone(),
        CartConfig::default(),
    );
    (store, sink)
}

fn write_menu(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("menu.json");
    std::fs::write(&path, MENU).expect("failed to write menu");
    path
}

/// Runs the CLI against `dir` and returns what it printed.
fn bunbo(dir: &Path, args: &[&str]) -> String {
    let data_dir = dir.to_string_lossy().to_string();
    let menu = dir.join("menu.json").to_string_lossy().to_string();
    let mut argv = vec!["bunbo", "--data-dir", data_dir.as_str(), "--menu", menu.as_str()];
    argv.extend_from_slice(args);

    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    let mut out = Vec::new();
    cli::run(cli, &mut out).expect("command should succeed");
    String::from_utf8(out).expect("output is UTF-8")
}

#[test]
fn cart_survives_reopen() {
    let tmp = tempfile::tempdir().expect("failed to create tmpdir");

    let (store, _) = open_store(tmp.path());
    store.add_line(
        LineCandidate::new("bun-bo-dac-biet", "Bún bò đặc biệt", Money::new(65_000))
            .with_spicy_level("Cay vừa"),
        2,
    );
    store.add_line(LineCandidate::new("tra-da", "Trà đá", Money::new(5_000)), 150);
    store.update_quantity("tra-da", 3);
    let before = store.lines();
    drop(store);

    let (reopened, sink) = open_store(tmp.path());
    assert_eq!(reopened.lines(), before);
    assert_eq!(reopened.item_count(), 5);
    assert_eq!(reopened.subtotal(), Money::new(145_000));
    assert!(sink.is_empty());
}

#[test]
fn snapshot_file_is_a_json_array() {
    let tmp = tempfile::tempdir().expect("failed to create tmpdir");
    let (store, _) = open_store(tmp.path());
    store.add_line(LineCandidate::new("tra-da", "Trà đá", Money::new(5_000)), 1);

    let raw = std::fs::read_to_string(tmp.path().join("bunbo-cart.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"id": "tra-da", "name": "Trà đá", "price": 5000, "quantity": 1}])
    );
}

#[test]
fn corrupt_entries_are_dropped_on_open() {
    let tmp = tempfile::tempdir().expect("failed to create tmpdir");
    FileStorage::new(tmp.path())
        .set(
            "bunbo-cart",
            r#"[{"id": "a", "name": "A", "price": 1000, "quantity": 2}, {"id": 7}, "junk"]"#,
        )
        .unwrap();

    let (store, _) = open_store(tmp.path());
    assert_eq!(store.line_count(), 1);

    // The next write replaces the snapshot with the cleaned cart.
    store.update_quantity("a", 3);
    let (reopened, _) = open_store(tmp.path());
    assert_eq!(reopened.item_count(), 3);
}

#[test]
fn clear_is_idempotent_across_reopen() {
    let tmp = tempfile::tempdir().expect("failed to create tmpdir");
    let (store, sink) = open_store(tmp.path());
    store.add_line(LineCandidate::new("tra-da", "Trà đá", Money::new(5_000)), 1);
    sink.drain();

    store.clear_cart();
    store.clear_cart();
    assert_eq!(sink.drain().len(), 1);

    let (reopened, _) = open_store(tmp.path());
    assert!(reopened.is_empty());
}

#[test]
fn cod_checkout_empties_persisted_cart() {
    let tmp = tempfile::tempdir().expect("failed to create tmpdir");
    let menu = load_menu(&write_menu(tmp.path())).unwrap();
    let (store, _) = open_store(tmp.path());

    let dish = menu.dish("bun-bo-dac-biet").unwrap();
    store.add_line(dish.to_candidate(), 4);

    let form = CheckoutForm {
        name: "Nguyễn Văn An".to_string(),
        phone: "+84 905123456".to_string(),
        email: String::new(),
        address: "45 Nguyễn Huệ, Huế".to_string(),
        branch_id: "hue".to_string(),
        payment_method: PaymentMethod::Cod,
        note: "Nhiều rau".to_string(),
    };
    let now = Utc.timestamp_millis_opt(1_717_000_000_999).unwrap();
    let outcome = place_order(&store, &menu, &form, &UnavailableGateway, now).unwrap();

    let CheckoutOutcome::Confirmed { order } = outcome else {
        panic!("cash on delivery should confirm immediately");
    };
    assert_eq!(order.code, "BB000999");
    assert_eq!(order.subtotal, Money::new(260_000));
    assert_eq!(order.delivery_fee, Money::zero());
    assert_eq!(order.customer.phone, "+84905123456");

    let (reopened, _) = open_store(tmp.path());
    assert!(reopened.is_empty());
}

#[test]
fn cli_session() {
    let tmp = tempfile::tempdir().expect("failed to create tmpdir");
    write_menu(tmp.path());

    let out = bunbo(tmp.path(), &["menu", "--spicy"]);
    assert!(out.contains("bun-bo-dac-biet"));
    assert!(!out.contains("bun-bo-chay"));

    let out = bunbo(tmp.path(), &["add", "bun-bo-dac-biet", "-q", "2"]);
    assert!(out.contains("✓ Bún bò đặc biệt: Đã thêm vào giỏ hàng."));
    assert!(out.contains("130.000 ₫"));

    let out = bunbo(tmp.path(), &["add", "bun-bo-dac-biet"]);
    assert!(out.contains("Đã cập nhật số lượng (3) trong giỏ hàng."));

    let out = bunbo(tmp.path(), &["add", "tra-da", "-q", "2"]);
    assert!(out.contains("Giỏ hàng (5 món)"));
    assert!(out.contains("Mua thêm 45.000 ₫ để được miễn phí giao hàng"));

    let out = bunbo(tmp.path(), &["update", "tra-da", "0"]);
    assert!(out.contains("Đã xóa món khỏi giỏ hàng: Trà đá"));

    let out = bunbo(tmp.path(), &["--json", "show"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["totals"]["itemCount"], 3);
    assert_eq!(json["totals"]["subtotal"], 195000);
    assert_eq!(json["totals"]["total"], 210000);

    let out = bunbo(tmp.path(), &["clear"]);
    assert!(out.contains("Đã làm trống giỏ hàng"));
    assert!(out.contains("Giỏ hàng trống"));

    let out = bunbo(tmp.path(), &["clear"]);
    assert!(!out.contains("Đã làm trống giỏ hàng"));
}

#[test]
fn cli_checkout_on_empty_cart_fails() {
    let tmp = tempfile::tempdir().expect("failed to create tmpdir");
    write_menu(tmp.path());
    let data_dir = tmp.path().to_string_lossy().to_string();
    let menu = tmp.path().join("menu.json").to_string_lossy().to_string();

    let cli = Cli::try_parse_from([
        "bunbo", "--data-dir", data_dir.as_str(), "--menu", menu.as_str(), "checkout",
        "--name", "An", "--phone", "0905123456", "--address", "45 Nguyễn Huệ", "--branch", "hue",
    ])
    .unwrap();
    let err = cli::run(cli, &mut Vec::new()).unwrap_err();
    assert_eq!(err.code, bunbo_storefront::error::ErrorCode::CartEmpty);
}

#[test]
fn cli_reset_deletes_snapshot() {
    let tmp = tempfile::tempdir().expect("failed to create tmpdir");
    write_menu(tmp.path());

    bunbo(tmp.path(), &["add", "tra-da", "-q", "2"]);
    assert!(tmp.path().join("bunbo-cart.json").exists());

    let out = bunbo(tmp.path(), &["reset"]);
    assert!(out.contains("Giỏ hàng trống"));
    assert!(!out.contains("Đã làm trống giỏ hàng"), "reset does not toast");
    assert!(!tmp.path().join("bunbo-cart.json").exists());
}
