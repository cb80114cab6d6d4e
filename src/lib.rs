//! Fillgate - Order validation and execution core for binary-outcome
//! prediction markets.
//!
//! This crate turns a user's buy/sell request into a funds-safe,
//! atomically applied change to balances and positions, pricing against
//! a live order-book snapshot. Money cannot be created or destroyed,
//! fills cannot exceed available liquidity, and concurrent orders from
//! the same user cannot double-spend.
//!
//! # Architecture
//!
//! Hexagonal: pure domain types, port traits at the seams, services in
//! the middle, adapters at the edges.
//!
//! - [`domain`] - Books, markets, orders, holdings, trades; all money as
//!   `rust_decimal` fixed-precision decimals
//! - [`port`] - `BookFeed` (pricing authority), `LedgerStore` (scoped
//!   transaction with exclusive row access), `Notifier` (fire-and-forget
//!   change events)
//! - [`service`] - The fill engine (best-price walk, all-or-nothing),
//!   limit router (cross or rest), and `OrderManager` (validation gates
//!   plus atomic ledger application)
//! - [`adapter`] - In-memory and SQLite (Diesel) ledger stores
//! - [`config`] - TOML configuration and tracing initialization
//! - [`error`] - Typed rejection taxonomy
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use fillgate::adapter::MemoryLedgerStore;
//! use fillgate::domain::{Instrument, Market, MarketId, PriceLevel, TradeSide, UserId};
//! use fillgate::port::notifier::NotifierRegistry;
//! use fillgate::service::OrderManager;
//! use fillgate::testkit::StaticBookFeed;
//! use rust_decimal_macros::dec;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> fillgate::error::Result<()> {
//! let store = MemoryLedgerStore::new();
//! store.put_market(Market::open(MarketId::from("m1"), "Will it rain?"));
//! store.credit_balance(&UserId::from("alice"), dec!(100));
//!
//! let feed = StaticBookFeed::new(
//!     vec![PriceLevel::new(dec!(0.55), dec!(30))],
//!     vec![PriceLevel::new(dec!(0.60), dec!(30))],
//! );
//!
//! let manager = OrderManager::new(store, feed, Arc::new(NotifierRegistry::new()));
//! let execution = manager
//!     .submit_market_order(
//!         UserId::from("alice"),
//!         MarketId::from("m1"),
//!         Instrument::Yes,
//!         TradeSide::Buy,
//!         dec!(10),
//!     )
//!     .await?;
//!
//! assert_eq!(execution.filled_size(), dec!(10));
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
