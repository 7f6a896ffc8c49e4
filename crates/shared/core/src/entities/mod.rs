mod child_order;
mod confirmation;
mod order_type;
mod position_effect;
mod side;

pub use child_order::{ChildOrder, OrderId};
pub use confirmation::{Confirmation, ConfirmationKind};
pub use order_type::OrderType;
pub use position_effect::PositionEffect;
pub use side::Side;
