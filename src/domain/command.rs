use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Register,
    Pay,
    Update,
    Revert,
}

/// A request against the payment service, as read from one CSV row.
///
/// `amount` and `payment_method` are required by `register` and `update`
/// and ignored otherwise.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub r#type: CommandType,
    pub payment_id: String,
    pub amount: Option<Decimal>,
    pub payment_method: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(csv: &str) -> Command {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(csv.as_bytes());
        reader
            .deserialize()
            .next()
            .unwrap()
            .expect("Failed to deserialize command")
    }

    #[test]
    fn test_register_deserialization() {
        let cmd = parse("type, payment_id, amount, payment_method\nregister, P1, 1000.0, credit-card");
        assert_eq!(cmd.r#type, CommandType::Register);
        assert_eq!(cmd.payment_id, "P1");
        assert_eq!(cmd.amount, Some(dec!(1000.0)));
        assert_eq!(cmd.payment_method.as_deref(), Some("credit-card"));
    }

    #[test]
    fn test_pay_without_amount() {
        let cmd = parse("type, payment_id, amount, payment_method\npay, P1, ,");
        assert_eq!(cmd.r#type, CommandType::Pay);
        assert_eq!(cmd.amount, None);
        assert_eq!(cmd.payment_method, None);
    }

    #[test]
    fn test_short_record() {
        let cmd = parse("type, payment_id, amount, payment_method\nrevert, P7");
        assert_eq!(cmd.r#type, CommandType::Revert);
        assert_eq!(cmd.payment_id, "P7");
        assert_eq!(cmd.amount, None);
    }
}
