pub mod command;
pub mod ledger;
pub mod order;
pub mod queue;
pub mod session;
