use rust_decimal::Decimal;
use std::fmt;

/// Digits kept after the decimal point, matching the `NUMERIC(19, 2)` column
pub const BUDGET_SCALE: u32 = 2;

/// Digits allowed before the decimal point
pub const BUDGET_INTEGER_DIGITS: u32 = 17;

/// A team's budget
///
/// # Invariants
/// - Always strictly greater than zero
/// - At most 17 integer digits and 2 fractional digits, so storage never
///   rounds it
/// - Is immutable after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Budget(Decimal);

impl Budget {
    /// Creates a new Budget value object
    ///
    /// # Returns
    /// * `Ok(Budget)` - If the amount is positive and fits the budget precision
    /// * `Err(String)` - If the amount is zero, negative, or too precise
    ///
    /// # Example
    /// ```
    /// use rust_decimal::Decimal;
    /// use team_roster_api::domain::team::Budget;
    ///
    /// let budget = Budget::new(Decimal::new(100000000, 2)).expect("positive budget");
    /// assert_eq!(budget.amount(), Decimal::from(1_000_000));
    /// assert!(Budget::new(Decimal::ZERO).is_err());
    /// assert!(Budget::new(Decimal::new(1234, 3)).is_err());
    /// ```
    pub fn new(amount: Decimal) -> Result<Self, String> {
        if amount <= Decimal::ZERO {
            return Err("Team budget must be a positive number".to_string());
        }
        let integer_limit = Decimal::from(10_i64.pow(BUDGET_INTEGER_DIGITS));
        if amount.normalize().scale() > BUDGET_SCALE || amount >= integer_limit {
            return Err(format!(
                "Team budget must have at most {} integer digits and {} decimal places",
                BUDGET_INTEGER_DIGITS, BUDGET_SCALE
            ));
        }
        Ok(Self(amount))
    }

    /// Returns the budget amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Reconstructs a Budget read back from storage
    ///
    /// Storage enforces `budget > 0` with a check constraint, so the
    /// amount is trusted as-is.
    pub fn from_persistence(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
