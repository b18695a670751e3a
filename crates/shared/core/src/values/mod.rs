use rust_decimal::Decimal;

/// Unit price of a commodity
pub type Price = Decimal;

/// Units of a commodity (inventory, offer size, traded volume)
pub type Quantity = Decimal;

/// Money held or transferred by an agent
pub type Money = Decimal;
