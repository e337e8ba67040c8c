//! Bill split recipients

use crate::utils::address::Address;
use crate::utils::errors::PayError;

#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub address: Address,
    pub name: String,
}

/// Ordered recipients of the next bill split
#[derive(Debug, Default)]
pub struct RecipientList {
    recipients: Vec<Recipient>,
}

impl RecipientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a recipient. A blank name becomes `Anonymous`.
    pub fn add(&mut self, address: &str, name: &str) -> Result<&Recipient, PayError> {
        let address: Address = address
            .parse()
            .map_err(|e| PayError::from_address("address", e))?;

        let name = match name.trim() {
            "" => "Anonymous".to_string(),
            name => name.to_string(),
        };

        self.recipients.push(Recipient { address, name });
        Ok(&self.recipients[self.recipients.len() - 1])
    }

    /// Remove by 1-based position
    pub fn remove(&mut self, position: usize) -> Result<Recipient, PayError> {
        if position == 0 || position > self.recipients.len() {
            return Err(PayError::validation(
                "index",
                format!("no recipient #{} (list has {})", position, self.recipients.len()),
            ));
        }
        Ok(self.recipients.remove(position - 1))
    }

    pub fn clear(&mut self) {
        self.recipients.clear();
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.iter()
    }

    /// Even share of `total`; no remainder correction
    pub fn amount_per_person(&self, total: f64) -> f64 {
        if self.recipients.is_empty() {
            0.0
        } else {
            total / self.recipients.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_add_and_remove() {
        let mut list = RecipientList::new();
        list.add(ALICE, "Alice").unwrap();
        list.add("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359", "  ").unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().nth(1).unwrap().name, "Anonymous");

        let removed = list.remove(1).unwrap();
        assert_eq!(removed.name, "Alice");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = RecipientList::new();
        assert!(matches!(list.remove(1), Err(PayError::Validation { field: "index", .. })));
        list.add(ALICE, "Alice").unwrap();
        assert!(matches!(list.remove(0), Err(PayError::Validation { field: "index", .. })));
    }

    #[test]
    fn test_add_rejects_bad_addresses() {
        let mut list = RecipientList::new();
        assert!(matches!(list.add("0xInvalid", "x"), Err(PayError::Validation { field: "address", .. })));
        assert!(matches!(list.add("bob.eth", "Bob"), Err(PayError::UnsupportedNameService(_))));
        assert!(list.is_empty());
    }

    #[test]
    fn test_amount_per_person() {
        let mut list = RecipientList::new();
        assert_eq!(list.amount_per_person(10.0), 0.0);
        list.add(ALICE, "A").unwrap();
        list.add(ALICE, "B").unwrap();
        list.add(ALICE, "C").unwrap();
        assert!((list.amount_per_person(1.0) - 1.0 / 3.0).abs() < 1e-12);
    }
}
