//! Quantity throttle
//!
//! Converts the raw "expected minus filled" gap into a lot-size-conformant,
//! bounded child-order size. Pure; the participation-of-volume gate runs in
//! the engine before the schedule is even consulted.

use rust_decimal::Decimal;

use tempo_core::Quantity;

/// Size the next child order, or `None` when no order should be placed.
///
/// `lot_size` ZERO means the security has no lot size; `min_size` then
/// substitutes as the rounding unit (at least 1). `max_floor` ZERO means
/// no ceiling.
pub fn slice_quantity(
    leaves: Quantity,
    total_leaves: Quantity,
    lot_size: Quantity,
    min_size: Quantity,
    max_floor: Quantity,
    odd_lot_allowed: bool,
) -> Option<Quantity> {
    if leaves <= Decimal::ZERO {
        return None;
    }

    let odd_ok = odd_lot_allowed || lot_size <= Decimal::ZERO;
    let lot = if lot_size <= Decimal::ZERO {
        Decimal::ONE.max(min_size)
    } else {
        lot_size
    };

    let max_qty = if odd_ok {
        total_leaves
    } else {
        (total_leaves / lot).floor() * lot
    };
    if max_qty <= Decimal::ZERO {
        return None;
    }

    let mut would_qty = (leaves / lot).ceil() * lot;
    if would_qty < min_size {
        would_qty = min_size;
    }
    if max_floor > Decimal::ZERO && would_qty > max_floor {
        would_qty = max_floor;
    }
    if would_qty > max_qty {
        would_qty = max_qty;
    }
    Some(would_qty)
}
