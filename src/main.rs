//! CLOB Matching Core Demo.
//!
//! Walks the book through its lifecycle: resting and snapshots, FIFO sweeps,
//! market orders, IOC/FOK handling, post-only admission, and the replace
//! priority rules.

use clob_core::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("CLOB Matching Core");
    println!("Single Symbol, Price-Time Priority\n");

    scenario_1_insert_and_snapshot();
    scenario_2_fifo_sweep();
    scenario_3_market_order();
    scenario_4_ioc_and_fok();
    scenario_5_post_only();
    scenario_6_replace_rules();

    println!("\nAll scenarios completed.");
}

fn print_depth(book: &Book) {
    println!("  {} depth:", book.symbol());
    for level in book.asks(5).iter().rev() {
        println!("    ask {:>6} x {:<5} ({} orders)", level.px.value(), level.qty, level.order_count);
    }
    for level in book.bids(5) {
        println!("    bid {:>6} x {:<5} ({} orders)", level.px.value(), level.qty, level.order_count);
    }
    if let Some(spread) = book.spread() {
        println!("    spread: {}", spread);
    }
}

fn print_trades(book: &mut Book) {
    for trade in book.drain_trades() {
        println!(
            "    trade {} x {} taker={:?} maker={:?} ({})",
            trade.qty,
            trade.px,
            trade.taker_id,
            trade.maker_id,
            if trade.taker_is_buy { "buy" } else { "sell" },
        );
    }
}

/// Two passive orders rest and show up in the aggregated depth.
fn scenario_1_insert_and_snapshot() {
    println!("Scenario 1: Insert and Snapshot\n");

    let mut book = Book::new("DEMO", 1);
    book.add(Order::new_limit(
        OrderId(1),
        Side::Buy,
        Price::new_unchecked(10000),
        50,
        TimeInForce::Day,
        TsNs::now(),
    ));
    book.add(Order::new_limit(
        OrderId(2),
        Side::Sell,
        Price::new_unchecked(10100),
        30,
        TimeInForce::Day,
        TsNs::now(),
    ));

    print_depth(&book);
    println!();
}

/// A marketable limit sweeps the best price level in arrival order.
fn scenario_2_fifo_sweep() {
    println!("Scenario 2: Marketable Limit Sweeps FIFO\n");

    let mut book = Book::new("DEMO", 1);
    book.add(Order::new_limit(OrderId(1), Side::Sell, Price::new_unchecked(10100), 30, TimeInForce::Day, TsNs(1)));
    book.add(Order::new_limit(OrderId(2), Side::Sell, Price::new_unchecked(10100), 10, TimeInForce::Day, TsNs(2)));
    book.add(Order::new_limit(OrderId(3), Side::Sell, Price::new_unchecked(10150), 20, TimeInForce::Day, TsNs(3)));

    println!("  Buy 35 @ 10150 arrives:");
    book.add(Order::new_limit(OrderId(9), Side::Buy, Price::new_unchecked(10150), 35, TimeInForce::Day, TsNs(4)));
    print_trades(&mut book);
    print_depth(&book);
    println!();
}

/// Market orders consume the opposite side and never rest.
fn scenario_3_market_order() {
    println!("Scenario 3: Market Order Never Rests\n");

    let mut book = Book::new("DEMO", 1);
    book.add(Order::new_limit(OrderId(10), Side::Sell, Price::new_unchecked(10050), 15, TimeInForce::Day, TsNs(1)));
    book.add(Order::new_limit(OrderId(11), Side::Sell, Price::new_unchecked(10075), 20, TimeInForce::Day, TsNs(2)));

    println!("  Buy Market 25 arrives:");
    book.add(Order::new_market(OrderId(12), Side::Buy, 25, TsNs(3)));
    print_trades(&mut book);
    print_depth(&book);
    println!();
}

/// IOC discards residual; FOK is all-or-nothing with no partial mutation.
fn scenario_4_ioc_and_fok() {
    println!("Scenario 4: IOC and FOK\n");

    let mut book = Book::new("DEMO", 1);
    book.add(Order::new_limit(OrderId(1), Side::Sell, Price::new_unchecked(10100), 10, TimeInForce::Day, TsNs(1)));

    let accepted = book.add(Order::new_limit(OrderId(2), Side::Buy, Price::new_unchecked(10100), 25, TimeInForce::IOC, TsNs(2)));
    println!("  IOC Buy 25 @ 10100 accepted: {} (residual discarded)", accepted);
    print_trades(&mut book);

    book.add(Order::new_limit(OrderId(3), Side::Sell, Price::new_unchecked(10100), 10, TimeInForce::Day, TsNs(3)));
    let rejected = book.add(Order::new_limit(OrderId(4), Side::Buy, Price::new_unchecked(10100), 15, TimeInForce::FOK, TsNs(4)));
    println!("  FOK Buy 15 @ 10100 accepted: {} (only 10 available)", rejected);
    print_depth(&book);
    println!();
}

/// Post-only orders rest or reject; they never take liquidity.
fn scenario_5_post_only() {
    println!("Scenario 5: Post-Only\n");

    let mut book = Book::new("DEMO", 1);
    book.add(Order::new_limit(OrderId(1), Side::Sell, Price::new_unchecked(10100), 10, TimeInForce::Day, TsNs(1)));

    let crossing = book.add(Order::new_limit(OrderId(2), Side::Buy, Price::new_unchecked(10100), 5, TimeInForce::PostOnly, TsNs(2)));
    println!("  PostOnly Buy @ 10100 (would cross) accepted: {}", crossing);

    let passive = book.add(Order::new_limit(OrderId(3), Side::Buy, Price::new_unchecked(10050), 7, TimeInForce::PostOnly, TsNs(3)));
    println!("  PostOnly Buy @ 10050 accepted: {}", passive);
    print_depth(&book);
    println!();
}

/// Shrink keeps queue position; grow and price moves forfeit it.
fn scenario_6_replace_rules() {
    println!("Scenario 6: Replace Priority Rules\n");

    let mut book = Book::new("DEMO", 1);
    book.add(Order::new_limit(OrderId(1), Side::Sell, Price::new_unchecked(10100), 10, TimeInForce::Day, TsNs(1)));
    book.add(Order::new_limit(OrderId(2), Side::Sell, Price::new_unchecked(10100), 10, TimeInForce::Day, TsNs(2)));

    book.replace(OrderId(1), 10100, 6, TsNs(3));
    println!("  Shrunk id=1 to 6; Buy 8 @ 10150 arrives (id=1 still fills first):");
    book.add(Order::new_limit(OrderId(9), Side::Buy, Price::new_unchecked(10150), 8, TimeInForce::Day, TsNs(4)));
    print_trades(&mut book);

    let mut book = Book::new("DEMO", 1);
    book.add(Order::new_limit(OrderId(1), Side::Sell, Price::new_unchecked(10100), 10, TimeInForce::Day, TsNs(1)));
    book.add(Order::new_limit(OrderId(2), Side::Sell, Price::new_unchecked(10100), 10, TimeInForce::Day, TsNs(2)));

    book.replace(OrderId(1), 10100, 12, TsNs(3));
    println!("  Grew id=1 to 12; Buy 15 @ 10150 arrives (id=2 now fills first):");
    book.add(Order::new_limit(OrderId(9), Side::Buy, Price::new_unchecked(10150), 15, TimeInForce::Day, TsNs(4)));
    print_trades(&mut book);
    println!();
}
