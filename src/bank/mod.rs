//! Banking module for handling accounts, the ledger, and the operation stream.
mod account;
mod ledger;
mod operation;
mod report;
mod state;
mod transaction;
mod types;

pub use account::*;
pub use ledger::*;
pub use operation::*;
pub use report::*;
pub use state::*;
pub use transaction::*;
pub use types::*;
