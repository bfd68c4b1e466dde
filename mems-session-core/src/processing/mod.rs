pub mod ledger;
pub mod schedule;
pub mod stream_buffer;
