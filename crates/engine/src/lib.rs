//! Domain and persistence layer of the FX wallet backend.
//!
//! - [`ownership`] maps a caller login to the legal entity it may see.
//! - [`balances`] folds wallet entries into a per-currency [`BalanceSheet`].
//! - [`Engine`] wires both to the store and carries the CRUD operations of
//!   customers, currencies, smart trades and wallet entries.
//!
//! The two core modules are pure: they work on in-memory snapshots and take
//! the caller identity as an explicit argument.

pub use balances::{Balance, BalanceSheet, aggregate, truncate_to_integer};
pub use currencies::{Currency, CurrencyFields};
pub use customers::{Customer, CustomerFields};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use ownership::{resolve_scope, select_owner};
pub use smart_trades::{SmartTrade, SmartTradeFields};
pub use util::{ensure_new, ensure_same_id};
pub use wallets::{Owner, WalletEntry};

pub mod balances;
mod currencies;
mod customers;
mod error;
mod ops;
pub mod ownership;
mod smart_trades;
pub mod users;
mod util;
mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
