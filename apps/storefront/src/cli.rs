//! # `bunbo` Command Line
//!
//! Drives the cart store from a terminal. The cart persists in the data
//! directory between invocations, just as the web storefront keeps it in
//! local storage between page loads.
//!
//! # Usage
//!
//! ```bash
//! # Browse the menu
//! bunbo menu --category signature --spicy
//!
//! # Fill the cart
//! bunbo add bun-bo-dac-biet -q 2 --size "Lớn"
//! bunbo update bun-bo-dac-biet 3
//! bunbo remove tra-da
//! bunbo show
//!
//! # Place a cash-on-delivery order
//! bunbo checkout --name "Trần Thị Lan" --phone "0905 123 456" \
//!     --address "12 Lê Lợi, Huế" --branch hue
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use bunbo_core::order::{CheckoutForm, PaymentMethod};
use bunbo_core::PricingPolicy;

use crate::commands::cart::{self as cart_cmd, CartResponse};
use crate::commands::checkout::{self, CheckoutOutcome, UnavailableGateway};
use crate::commands::menu::{self as menu_cmd, MenuResponse};
use crate::error::ApiResult;
use crate::notify::{
    Notification, NotificationKind, NotificationSink, RecordingSink, TracingSink,
};
use crate::state::StoreConfig;

#[derive(Debug, Parser)]
#[command(name = "bunbo")]
#[command(author, version, about = "Bunbo storefront cart")]
pub struct Cli {
    /// Directory holding the cart snapshot (overrides BUNBO_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to menu.json (overrides BUNBO_MENU_PATH)
    #[arg(long, global = true)]
    pub menu: Option<PathBuf>,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Send toasts to the log instead of printing them
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List dishes
    Menu {
        /// Category id (`signature`, `special`, `vegetarian`, `sides`, `beverages`)
        #[arg(short, long)]
        category: Option<String>,

        /// Only spicy dishes
        #[arg(long)]
        spicy: bool,
    },
    /// Add a dish to the cart
    Add {
        dish_id: String,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// Bowl size shown on the line
        #[arg(long)]
        size: Option<String>,
    },
    /// Set a line's quantity (0 removes it)
    Update {
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
    /// Empty the cart and delete its saved snapshot
    Reset,
    /// Show the cart and totals
    Show,
    /// Place an order for the current cart
    Checkout {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long)]
        address: String,

        /// Branch id from the menu
        #[arg(long)]
        branch: String,

        /// `cod` or `momo`
        #[arg(long, default_value = "cod")]
        payment: PaymentMethod,

        #[arg(long, default_value = "")]
        note: String,
    },
    /// Record the result code returned by the payment provider
    PaymentResult { result_code: Option<String> },
}

/// Runs one command, writing its output to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> ApiResult<()> {
    let mut config = StoreConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(menu) = cli.menu {
        config.menu_path = Some(menu);
    }

    let recorder = Arc::new(RecordingSink::new());
    let sink: Arc<dyn NotificationSink> = if cli.quiet {
        Arc::new(TracingSink)
    } else {
        recorder.clone()
    };
    let store = crate::open_store(&config, sink);
    let pricing = config.cart.pricing();

    match cli.command {
        Command::Menu { category, spicy } => {
            let menu = menu_cmd::load_menu(&config.menu_path())?;
            let response = menu_cmd::list_menu(&menu, category.as_deref(), spicy);
            emit(out, cli.json, &response, |out| render_menu(out, &config, &response))?;
        }
        Command::Add {
            dish_id,
            quantity,
            size,
        } => {
            let menu = menu_cmd::load_menu(&config.menu_path())?;
            let response = cart_cmd::add_to_cart(&store, &menu, &dish_id, Some(quantity), size)?;
            emit_cart(out, cli.json, &config, &pricing, &recorder, &response)?;
        }
        Command::Update { id, quantity } => {
            let response = cart_cmd::update_cart_item(&store, &id, quantity);
            emit_cart(out, cli.json, &config, &pricing, &recorder, &response)?;
        }
        Command::Remove { id } => {
            let response = cart_cmd::remove_from_cart(&store, &id);
            emit_cart(out, cli.json, &config, &pricing, &recorder, &response)?;
        }
        Command::Clear => {
            let response = cart_cmd::clear_cart(&store);
            emit_cart(out, cli.json, &config, &pricing, &recorder, &response)?;
        }
        Command::Reset => {
            let response = cart_cmd::reset_cart(&store)?;
            emit_cart(out, cli.json, &config, &pricing, &recorder, &response)?;
        }
        Command::Show => {
            let response = cart_cmd::get_cart(&store);
            emit_cart(out, cli.json, &config, &pricing, &recorder, &response)?;
        }
        Command::Checkout {
            name,
            phone,
            email,
            address,
            branch,
            payment,
            note,
        } => {
            let menu = menu_cmd::load_menu(&config.menu_path())?;
            let form = CheckoutForm {
                name,
                phone,
                email,
                address,
                branch_id: branch,
                payment_method: payment,
                note,
            };
            // No payment provider is wired into the CLI; MoMo orders fail
            // with PAYMENT_ERROR and keep the cart.
            let outcome =
                checkout::place_order(&store, &menu, &form, &UnavailableGateway, Utc::now())?;
            print_toasts(out, &recorder)?;
            emit(out, cli.json, &outcome, |out| render_checkout(out, &config, &outcome))?;
        }
        Command::PaymentResult { result_code } => {
            let response = checkout::payment_result(&store, result_code.as_deref());
            print_toasts(out, &recorder)?;
            emit(out, cli.json, &response, |out| {
                writeln!(out, "{}", response.title)?;
                writeln!(out, "{}", response.message)
            })?;
        }
    }

    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

fn emit<T, F>(out: &mut dyn Write, json: bool, value: &T, text: F) -> ApiResult<()>
where
    T: Serialize,
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    if json {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| crate::error::ApiError::internal(e.to_string()))?;
        writeln!(out, "{rendered}")?;
    } else {
        text(out)?;
    }
    Ok(())
}

fn emit_cart(
    out: &mut dyn Write,
    json: bool,
    config: &StoreConfig,
    pricing: &PricingPolicy,
    recorder: &RecordingSink,
    response: &CartResponse,
) -> ApiResult<()> {
    print_toasts(out, recorder)?;
    emit(out, json, response, |out| render_cart(out, config, pricing, response))
}

fn print_toasts(out: &mut dyn Write, recorder: &RecordingSink) -> std::io::Result<()> {
    for toast in recorder.drain() {
        writeln!(out, "{}", toast_line(&toast))?;
    }
    Ok(())
}

fn toast_line(toast: &Notification) -> String {
    let marker = match toast.kind {
        NotificationKind::Success => "✓",
        NotificationKind::Info => "ℹ",
        NotificationKind::Plain => "•",
    };
    match &toast.description {
        Some(description) => format!("{marker} {}: {description}", toast.title),
        None => format!("{marker} {}", toast.title),
    }
}

fn render_cart(
    out: &mut dyn Write,
    config: &StoreConfig,
    pricing: &PricingPolicy,
    response: &CartResponse,
) -> std::io::Result<()> {
    let totals = &response.totals;
    if response.items.is_empty() {
        return writeln!(out, "Giỏ hàng trống");
    }

    writeln!(out, "Giỏ hàng ({} món)", totals.item_count)?;
    for line in &response.items {
        let mut label = line.name.clone();
        if let Some(size) = &line.variant.size {
            label.push_str(&format!(" ({size})"));
        }
        writeln!(
            out,
            "  {:>2} × {:<32} {:>14}",
            line.quantity,
            label,
            config.format_currency(line.line_total())
        )?;
    }
    writeln!(out, "  {:<37} {:>14}", "Tạm tính", config.format_currency(totals.subtotal))?;
    writeln!(
        out,
        "  {:<37} {:>14}",
        "Phí giao hàng",
        config.format_delivery_fee(totals.delivery_fee)
    )?;
    writeln!(out, "  {:<37} {:>14}", "Tổng cộng", config.format_currency(totals.total))?;

    if let Some(remaining) = pricing.remaining_for_free_shipping(totals.subtotal) {
        writeln!(
            out,
            "Mua thêm {} để được miễn phí giao hàng",
            config.format_currency(remaining)
        )?;
    }
    Ok(())
}

fn render_menu(
    out: &mut dyn Write,
    config: &StoreConfig,
    response: &MenuResponse,
) -> std::io::Result<()> {
    let categories: Vec<String> = response
        .categories
        .iter()
        .map(|c| format!("{} ({})", c.label, c.id))
        .collect();
    writeln!(out, "Danh mục: {}", categories.join(", "))?;

    for dish in &response.dishes {
        let spicy = if dish.is_spicy() { " 🌶" } else { "" };
        writeln!(
            out,
            "  {:<20} {:<32} {:>12}{spicy}",
            dish.id,
            dish.name,
            config.format_currency(dish.price)
        )?;
    }
    Ok(())
}

fn render_checkout(
    out: &mut dyn Write,
    config: &StoreConfig,
    outcome: &CheckoutOutcome,
) -> std::io::Result<()> {
    let order = outcome.order();
    writeln!(out, "Mã đơn hàng: {}", order.code)?;
    writeln!(out, "Khách hàng: {} ({})", order.customer.name, order.customer.phone)?;
    writeln!(out, "Thanh toán: {}", order.customer.payment_label)?;
    writeln!(out, "  {}", order.customer.payment_method.description())?;
    writeln!(out, "Tổng cộng: {}", config.format_currency(order.total))?;
    if let CheckoutOutcome::Redirect { pay_url, .. } = outcome {
        writeln!(out, "Thanh toán tại: {pay_url}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bunbo_core::{CheckoutTotals, LineCandidate, Money};

    #[test]
    fn test_parse_add() {
        let cli =
            Cli::try_parse_from(["bunbo", "add", "bun-bo", "-q", "3", "--size", "Lớn"]).unwrap();
        match cli.command {
            Command::Add {
                dish_id,
                quantity,
                size,
            } => {
                assert_eq!(dish_id, "bun-bo");
                assert_eq!(quantity, 3);
                assert_eq!(size.as_deref(), Some("Lớn"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_update() {
        let cli = Cli::try_parse_from(["bunbo", "update", "bun-bo", "-2"]).unwrap();
        assert!(matches!(cli.command, Command::Update { quantity: -2, .. }));
    }

    #[test]
    fn test_parse_checkout_payment_method() {
        let cli = Cli::try_parse_from([
            "bunbo", "--json", "checkout", "--name", "Lan", "--phone", "0905123456", "--address",
            "12 Lê Lợi", "--branch", "hue", "--payment", "momo",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Checkout {
                payment: PaymentMethod::Momo,
                ..
            }
        ));

        let err = Cli::try_parse_from([
            "bunbo", "checkout", "--name", "Lan", "--phone", "0905123456", "--address", "x",
            "--branch", "hue", "--payment", "card",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn test_render_cart() {
        let line = LineCandidate::new("a", "Bún bò", Money::new(50_000))
            .with_size("Lớn")
            .into_line(4);
        let response = CartResponse {
            items: vec![line],
            totals: CheckoutTotals {
                line_count: 1,
                item_count: 4,
                subtotal: Money::new(200_000),
                delivery_fee: Money::new(15_000),
                total: Money::new(215_000),
            },
        };

        let mut out = Vec::new();
        render_cart(&mut out, &StoreConfig::default(), &PricingPolicy::default(), &response)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Giỏ hàng (4 món)"));
        assert!(text.contains("Bún bò (Lớn)"));
        assert!(text.contains("215.000 ₫"));
        assert!(text.contains("Mua thêm 50.000 ₫ để được miễn phí giao hàng"));
    }

    #[test]
    fn test_toast_line() {
        let toast = Notification::new(
            NotificationKind::Success,
            "Bún bò",
            Some("Đã thêm.".to_string()),
        );
        assert_eq!(toast_line(&toast), "✓ Bún bò: Đã thêm.");
    }

    #[test]
    fn test_render_checkout_explains_payment() {
        use bunbo_core::order::OrderConfirmation;
        use bunbo_core::Cart;
        use chrono::TimeZone;

        let line = LineCandidate::new("a", "Bún bò", Money::new(65_000)).into_line(2);
        let cart = Cart::from_lines([line]);
        let form = CheckoutForm {
            name: "Lan".to_string(),
            phone: "0905123456".to_string(),
            email: String::new(),
            address: "12 Lê Lợi".to_string(),
            branch_id: "hue".to_string(),
            payment_method: PaymentMethod::Cod,
            note: String::new(),
        };
        let now = Utc.timestamp_millis_opt(1_717_000_000_123).unwrap();
        let order =
            OrderConfirmation::build(&form, None, &cart, &PricingPolicy::default(), now).unwrap();

        let mut out = Vec::new();
        render_checkout(&mut out, &StoreConfig::default(), &CheckoutOutcome::Confirmed { order })
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Mã đơn hàng: BB000123"));
        assert!(text.contains(PaymentMethod::Cod.description()));
        assert!(text.contains("145.000 ₫"));
    }
}
