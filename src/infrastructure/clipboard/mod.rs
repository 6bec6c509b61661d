//! Clipboard backends that are not plain command-line tools
//!
//! Klipper is reached over D-Bus through a qdbus client, and the Windows
//! engine uses arboard in-process.

mod arboard;
mod qdbus;

pub use arboard::ArboardClipboard;
pub use qdbus::{
    QdbusKlipper, QdbusKlipperConnector, KLIPPER_INTERFACE, KLIPPER_PATH, KLIPPER_SERVICE,
};
