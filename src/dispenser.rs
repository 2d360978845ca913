use thiserror::Error;

/// Note values handled by the dispenser, largest first.
pub const NOTE_VALUES: [u32; 6] = [100, 50, 20, 10, 5, 2];

#[derive(Error, Debug, PartialEq)]
pub enum DispenserError {
    #[error("amount cannot be dispensed with the available notes")]
    CannotDispense,
}

pub struct CashDispenser {
    available: [u32; 6],
}

impl CashDispenser {
    /// `available` holds the note count per denomination, in NOTE_VALUES
    /// order.
    pub fn new(available: [u32; 6]) -> CashDispenser {
        CashDispenser { available }
    }

    pub fn available(&self) -> [u32; 6] {
        self.available
    }

    /// Breaks `amount` into notes, greedily from the largest value down.
    /// The inventory is only decremented when the amount can be met
    /// exactly.
    pub fn dispense(&mut self, amount: u32) -> Result<[u32; 6], DispenserError> {
        let mut remaining = amount;
        let mut used = [0u32; 6];
        for (i, &value) in NOTE_VALUES.iter().enumerate() {
            let count = (remaining / value).min(self.available[i]);
            used[i] = count;
            remaining -= count * value;
        }
        if remaining > 0 {
            return Err(DispenserError::CannotDispense);
        }
        for (i, count) in used.iter().enumerate() {
            self.available[i] -= count;
        }
        Ok(used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispense() -> Result<(), DispenserError> {
        let mut dispenser = CashDispenser::new([10, 10, 10, 10, 10, 10]);
        let used = dispenser.dispense(280)?;
        assert_eq!(used, [2, 1, 1, 1, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_dispense_exact_inventory() -> Result<(), DispenserError> {
        let mut dispenser = CashDispenser::new([1, 1, 0, 0, 0, 0]);
        let used = dispenser.dispense(150)?;
        assert_eq!(used, [1, 1, 0, 0, 0, 0]);
        assert_eq!(dispenser.available(), [0, 0, 0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_dispense_insufficient_notes() {
        let mut dispenser = CashDispenser::new([0, 1, 0, 0, 0, 0]);
        let res = dispenser.dispense(150);
        assert_eq!(res.unwrap_err(), DispenserError::CannotDispense);
        // inventory untouched on failure
        assert_eq!(dispenser.available(), [0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_dispense_no_exact_change() {
        let mut dispenser = CashDispenser::new([0, 0, 0, 0, 1, 1]);
        let res = dispenser.dispense(3);
        assert_eq!(res.unwrap_err(), DispenserError::CannotDispense);
        assert_eq!(dispenser.available(), [0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_inventory_tracked_across_withdrawals() -> Result<(), DispenserError> {
        let mut dispenser = CashDispenser::new([10, 10, 10, 10, 10, 10]);
        dispenser.dispense(150)?;
        assert_eq!(dispenser.available(), [9, 9, 10, 10, 10, 10]);

        for _ in 0..9 {
            dispenser.dispense(150)?;
        }
        for _ in 0..10 {
            dispenser.dispense(5)?;
        }
        assert_eq!(dispenser.available(), [0, 0, 10, 10, 0, 10]);
        Ok(())
    }
}
