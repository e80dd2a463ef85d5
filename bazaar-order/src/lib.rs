pub mod escrow;
pub mod models;
pub mod checkout;
pub mod manager;

pub use escrow::{EscrowPolicy, EscrowTimeline};
pub use models::{OrderConfirmation, PaymentMethod, ShippingDetails};
pub use checkout::{Checkout, CheckoutPreview};
pub use manager::{OrderBook, OrderError};
