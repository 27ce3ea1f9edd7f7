pub mod nunchuk;

pub use nunchuk::{Nunchuk, NunchukError, NUNCHUK_ADDR};
