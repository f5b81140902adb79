pub mod payments_traits;

pub use payments_traits::PaymentAuthorityTrait;
