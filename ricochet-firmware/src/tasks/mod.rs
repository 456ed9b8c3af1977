//! Embassy async tasks
//!
//! The pager task owns every alert peripheral and runs the main loop;
//! the modem RX task only turns UART bytes into decoder messages.

pub mod modem_rx;
pub mod pager;

pub use modem_rx::modem_rx_task;
pub use pager::{pager_task, FirmwarePager};
